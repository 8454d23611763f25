//! Presentation-agnostic scene building shared by both renderers.
//!
//! [`MapLayer`] holds projected geometry and label anchors for one frame and
//! is built once. [`MapModel`] holds stats and the colour scale for one
//! auction and is rebuilt only when the auction changes. [`Scene`] joins the
//! two into what a renderer draws.

use std::collections::BTreeMap;

use geo::Coord;

use crate::aggregate::{RegionStats, aggregate};
use crate::classify::{ColorScale, LegendBand, Rgb};
use crate::data::RegionBoundary;
use crate::interaction::HOVER_BOOST;
use crate::labels::{BoundingBox, LabelStyle, RegionLabel, label_anchor};
use crate::projection::{ProjectedShape, ProjectionFrame, project_geometry};
use crate::regions::{self, is_excluded, province_names};
use crate::sales::{AuctionReport, format_price};

/// A region's static, frame-specific geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct MapRegion {
    pub id: String,
    pub name: String,
    /// Compact label for small shapes.
    pub short: String,
    pub shape: ProjectedShape,
    pub bbox: BoundingBox,
    pub anchor: Coord<f64>,
}

/// All drawable regions projected into one frame.
#[derive(Clone, Debug)]
pub struct MapLayer {
    pub frame: ProjectionFrame,
    pub regions: Vec<MapRegion>,
}

impl MapLayer {
    /// Projects every boundary except the excluded territory. Regions with
    /// missing or degenerate geometry are logged and left out.
    pub fn project(boundaries: &[RegionBoundary], frame: ProjectionFrame) -> Self {
        let mut drawn = Vec::with_capacity(boundaries.len());
        for b in boundaries {
            if is_excluded(&b.name) {
                log::debug!("not drawing excluded territory {}", b.name);
                continue;
            }
            let Some(geometry) = &b.geometry else {
                log::warn!("{}: no geometry, region not drawn", b.name);
                continue;
            };
            let province = regions::lookup(&b.name).or_else(|| regions::lookup(&b.id));
            let shape = project_geometry(geometry, &frame);
            let Some((bbox, anchor)) = label_anchor(province.map_or(b.id.as_str(), |p| p.id), &shape) else {
                log::warn!("{}: degenerate geometry, region not drawn", b.name);
                continue;
            };
            drawn.push(MapRegion {
                id: province.map_or_else(|| b.id.clone(), |p| p.id.to_string()),
                name: province.map_or_else(|| b.name.clone(), |p| p.name.to_string()),
                short: province.map_or_else(|| b.name.clone(), |p| p.code.to_string()),
                shape,
                bbox,
                anchor,
            });
        }
        Self { frame, regions: drawn }
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.id.as_str())
    }
}

impl MapRegion {
    /// Frame-space hit test with a bounding box pre-check.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let b = &self.bbox;
        x >= b.min_x && x <= b.max_x && y >= b.min_y && y <= b.max_y && self.shape.contains(x, y)
    }
}

/// Stats and colour scale for one auction.
#[derive(Clone, Debug, PartialEq)]
pub struct MapModel {
    pub auction_id: String,
    pub stats: BTreeMap<String, RegionStats>,
    pub scale: ColorScale,
    pub sale_count: usize,
}

impl MapModel {
    pub fn build(report: &AuctionReport) -> Self {
        let stats = aggregate(&report.sales, &province_names());
        let scale = ColorScale::from_stats(stats.values());
        log::debug!(
            "recomputed stats for auction {} ({} sales, range {:?})",
            report.id,
            report.sales.len(),
            scale.range()
        );
        Self {
            auction_id: report.id.clone(),
            stats,
            scale,
            sale_count: report.sales.len(),
        }
    }

    /// Stats for a region name; zeroed when the region has none.
    pub fn stats_for(&self, name: &str) -> RegionStats {
        self.stats
            .iter()
            .find(|(k, _)| regions::same_region(k, name))
            .map(|(_, s)| *s)
            .unwrap_or_default()
    }
}

/// Metric lines shown under a region name.
pub fn metric_lines(stats: &RegionStats) -> Vec<String> {
    let mut lines = Vec::new();
    if stats.certified_avg > 0.0 {
        lines.push(format_price(stats.certified_avg));
    }
    if stats.has_non_certified {
        lines.push(format!("NC {}", format_price(stats.non_certified_avg)));
    }
    lines
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneRegion {
    pub region: MapRegion,
    pub stats: RegionStats,
    /// Certified average if positive, else non-certified average.
    pub metric: f64,
    pub color: Rgb,
    pub label: RegionLabel,
}

/// What the user is currently pointing at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus<'a> {
    #[default]
    None,
    Hovered(&'a str),
    Selected(&'a str),
}

/// Resolved drawing style for one region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionStyle {
    pub fill: Rgb,
    pub opacity: f64,
    pub emphasized: bool,
}

const DIMMED_OPACITY: f64 = 0.45;

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub frame: ProjectionFrame,
    pub auction_id: String,
    pub regions: Vec<SceneRegion>,
    pub scale: ColorScale,
    pub legend: Vec<LegendBand>,
}

impl Scene {
    pub fn compose(layer: &MapLayer, model: &MapModel, style: &LabelStyle) -> Self {
        let regions = layer
            .regions
            .iter()
            .map(|r| {
                let stats = model.stats_for(&r.name);
                let metric = stats.display_metric();
                let label = style.layout(r.anchor, &r.bbox, &r.name, &metric_lines(&stats));
                SceneRegion {
                    region: r.clone(),
                    stats,
                    metric,
                    color: model.scale.color(metric),
                    label,
                }
            })
            .collect();
        Self {
            frame: layer.frame,
            auction_id: model.auction_id.clone(),
            regions,
            scale: model.scale,
            legend: model.scale.legend(),
        }
    }

    /// Topmost drawn region containing the frame point, if any.
    pub fn region_at(&self, x: f64, y: f64) -> Option<&SceneRegion> {
        self.regions.iter().rev().find(|r| r.region.contains(x, y))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.regions.iter().map(|r| r.region.id.as_str())
    }

    pub fn region(&self, id: &str) -> Option<&SceneRegion> {
        self.regions.iter().find(|r| r.region.id == id)
    }

    /// Hovering boosts the hovered region's colour lookup and dims the
    /// rest; a selection only emphasises the selected outline.
    pub fn style(&self, region: &SceneRegion, focus: Focus<'_>) -> RegionStyle {
        match focus {
            Focus::Hovered(id) if id == region.region.id => RegionStyle {
                fill: self.scale.color(region.metric + HOVER_BOOST),
                opacity: 1.0,
                emphasized: true,
            },
            Focus::Hovered(_) => RegionStyle { fill: region.color, opacity: DIMMED_OPACITY, emphasized: false },
            Focus::Selected(id) if id == region.region.id => {
                RegionStyle { fill: region.color, opacity: 1.0, emphasized: true }
            }
            _ => RegionStyle { fill: region.color, opacity: 1.0, emphasized: false },
        }
    }
}
