//! Five-step colour ramp over the prices currently on the map.

use std::fmt;

use crate::aggregate::RegionStats;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear blend towards `other`; `t = 0` keeps `self`, `t = 1` yields `other`.
    pub fn mix(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb::new(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }
}

impl fmt::Display for Rgb {
    /// Format as CSS hex: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<Rgb> for ratatui::style::Color {
    fn from(c: Rgb) -> Self {
        ratatui::style::Color::Rgb(c.r, c.g, c.b)
    }
}

/// Light → dark.
pub const TIER_COLORS: [Rgb; 5] = [
    Rgb::new(0xf3, 0xe5, 0xc8),
    Rgb::new(0xdf, 0xc0, 0x8a),
    Rgb::new(0xc4, 0x93, 0x4f),
    Rgb::new(0x9a, 0x62, 0x2a),
    Rgb::new(0x5e, 0x36, 0x12),
];

/// Used for every region when there is no usable price range.
pub const FALLBACK_COLOR: Rgb = Rgb::new(0xd9, 0xd9, 0xd9);

/// Upper ratio bounds of the first four tiers; the fifth takes the rest.
const TIER_THRESHOLDS: [f64; 4] = [0.2, 0.4, 0.6, 0.8];

/// Pooled price range of the displayed regions.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ColorScale {
    range: Option<(f64, f64)>,
}

/// One legend entry: a tier colour and the prices it covers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendBand {
    pub color: Rgb,
    pub from: f64,
    pub to: f64,
}

impl ColorScale {
    /// Min/max over every non-zero certified and non-certified average.
    ///
    /// Degenerate when no positive price exists or all prices are equal.
    pub fn from_stats<'a>(stats: impl IntoIterator<Item = &'a RegionStats>) -> Self {
        let prices = stats
            .into_iter()
            .flat_map(|s| [s.certified_avg, s.non_certified_avg])
            .filter(|p| *p != 0.0 && p.is_finite());
        Self::from_prices(prices)
    }

    pub fn from_prices(prices: impl IntoIterator<Item = f64>) -> Self {
        let range = prices.into_iter().fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((f64::min(lo, p), f64::max(hi, p))),
        });
        let range = range.filter(|(lo, hi)| hi > lo);
        if range.is_none() {
            log::debug!("degenerate price range, using fallback colour");
        }
        Self { range }
    }

    pub fn range(&self) -> Option<(f64, f64)> {
        self.range
    }

    pub fn is_degenerate(&self) -> bool {
        self.range.is_none()
    }

    /// Tier index (0 lightest … 4 darkest), or `None` on a degenerate scale.
    pub fn tier(&self, price: f64) -> Option<usize> {
        let (min, max) = self.range?;
        let ratio = (price - min) / (max - min);
        Some(
            TIER_THRESHOLDS
                .iter()
                .position(|t| ratio < *t)
                .unwrap_or(TIER_THRESHOLDS.len()),
        )
    }

    pub fn color(&self, price: f64) -> Rgb {
        self.tier(price).map_or(FALLBACK_COLOR, |t| TIER_COLORS[t])
    }

    /// Price bands for the legend; empty on a degenerate scale.
    pub fn legend(&self) -> Vec<LegendBand> {
        let Some((min, max)) = self.range else {
            return Vec::new();
        };
        let span = max - min;
        let mut bounds = vec![min];
        bounds.extend(TIER_THRESHOLDS.iter().map(|t| min + span * t));
        bounds.push(max);
        TIER_COLORS
            .iter()
            .zip(bounds.windows(2))
            .map(|(color, w)| LegendBand { color: *color, from: w[0], to: w[1] })
            .collect()
    }
}
