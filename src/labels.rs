//! Label anchors for irregular region shapes.
//!
//! The default anchor is the centre of the projected outer boundary's
//! bounding box. Shapes whose box centre lands somewhere awkward (notched or
//! elongated provinces, or a box centre that falls inside a neighbour) carry a
//! manual nudge expressed as a fraction of their own box.

use geo::Coord;

use crate::projection::ProjectedShape;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn of(points: impl IntoIterator<Item = Coord<f64>>) -> Option<Self> {
        points.into_iter().fold(None, |acc, c| {
            Some(match acc {
                None => BoundingBox { min_x: c.x, min_y: c.y, max_x: c.x, max_y: c.y },
                Some(b) => BoundingBox {
                    min_x: b.min_x.min(c.x),
                    min_y: b.min_y.min(c.y),
                    max_x: b.max_x.max(c.x),
                    max_y: b.max_y.max(c.y),
                },
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Point at fractional position (`fx`, `fy`) inside the box.
    pub fn at(&self, fx: f64, fy: f64) -> Coord<f64> {
        Coord {
            x: self.min_x + self.width() * fx,
            y: self.min_y + self.height() * fy,
        }
    }

    pub fn center(&self) -> Coord<f64> {
        self.at(0.5, 0.5)
    }
}

/// Where inside its bounding box a region's label sits.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Nudge {
    pub fx: f64,
    pub fy: f64,
}

const CENTER: Nudge = Nudge { fx: 0.5, fy: 0.5 };

/// Per-region overrides, keyed by region id. Anything absent uses [`CENTER`].
const LABEL_NUDGES: [(&str, Nudge); 6] = [
    // Box centre sits in the Northern Cape notch.
    ("ZA-WC", Nudge { fx: 0.45, fy: 0.60 }),
    ("ZA-NC", Nudge { fx: 0.40, fy: 0.45 }),
    // Keep clear of the Lesotho border.
    ("ZA-EC", Nudge { fx: 0.55, fy: 0.65 }),
    ("ZA-FS", Nudge { fx: 0.40, fy: 0.45 }),
    ("ZA-KZN", Nudge { fx: 0.55, fy: 0.45 }),
    ("ZA-MP", Nudge { fx: 0.45, fy: 0.55 }),
];

pub fn nudge_for(region_id: &str) -> Nudge {
    LABEL_NUDGES
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(region_id))
        .map_or(CENTER, |(_, n)| *n)
}

/// Anchor point and box for a projected region, `None` for an empty shape.
pub fn label_anchor(region_id: &str, shape: &ProjectedShape) -> Option<(BoundingBox, Coord<f64>)> {
    let bbox = BoundingBox::of(shape.outer_points())?;
    let nudge = nudge_for(region_id);
    Some((bbox, bbox.at(nudge.fx, nudge.fy)))
}

/// Font sizing for one presentation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
    pub name_size: f64,
    pub metric_size: f64,
    pub small_name_size: f64,
    pub small_metric_size: f64,
    /// Vertical distance between stacked lines.
    pub line_gap: f64,
    /// Boxes narrower or shorter than this are labelled small.
    pub small_threshold: f64,
}

pub const DESKTOP_LABELS: LabelStyle = LabelStyle {
    name_size: 13.0,
    metric_size: 11.0,
    small_name_size: 9.0,
    small_metric_size: 8.0,
    line_gap: 14.0,
    small_threshold: 70.0,
};

pub const MOBILE_LABELS: LabelStyle = LabelStyle {
    name_size: 9.0,
    metric_size: 8.0,
    small_name_size: 7.0,
    small_metric_size: 6.0,
    line_gap: 9.0,
    small_threshold: 32.0,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKind {
    Name,
    Metric,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelLine {
    pub kind: LabelKind,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegionLabel {
    pub anchor: Coord<f64>,
    pub small: bool,
    pub lines: Vec<LabelLine>,
}

impl LabelStyle {
    pub fn is_small(&self, bbox: &BoundingBox) -> bool {
        bbox.width() < self.small_threshold || bbox.height() < self.small_threshold
    }

    /// Stacks `name` above the anchor and up to two `metrics` below it.
    pub fn layout(&self, anchor: Coord<f64>, bbox: &BoundingBox, name: &str, metrics: &[String]) -> RegionLabel {
        let small = self.is_small(bbox);
        let (name_size, metric_size, gap) = if small {
            (self.small_name_size, self.small_metric_size, self.line_gap * 0.75)
        } else {
            (self.name_size, self.metric_size, self.line_gap)
        };

        let mut lines = vec![LabelLine {
            kind: LabelKind::Name,
            text: name.to_string(),
            x: anchor.x,
            y: anchor.y - gap * 0.5,
            font_size: name_size,
        }];
        lines.extend(metrics.iter().take(2).enumerate().map(|(i, text)| LabelLine {
            kind: LabelKind::Metric,
            text: text.clone(),
            x: anchor.x,
            y: anchor.y + gap * (0.5 + i as f64),
            font_size: metric_size,
        }));

        RegionLabel { anchor, small, lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{DESKTOP_FRAME, project_geometry};
    use approx::assert_abs_diff_eq;
    use geo::{Geometry, LineString, Polygon};

    fn shape(lon: f64, lat: f64, w: f64, h: f64) -> ProjectedShape {
        let ring = LineString::from(vec![(lon, lat), (lon + w, lat), (lon + w, lat + h), (lon, lat + h)]);
        project_geometry(&Geometry::Polygon(Polygon::new(ring, vec![])), &DESKTOP_FRAME)
    }

    #[test]
    fn uncorrected_region_uses_box_center() {
        let s = shape(26.0, -28.0, 2.0, 2.0);
        let (bbox, anchor) = label_anchor("ZA-GP", &s).expect("non-empty");
        assert_eq!(anchor, bbox.center());
    }

    #[test]
    fn corrected_region_is_nudged_within_its_box() {
        let s = shape(18.0, -34.0, 4.0, 2.0);
        let (bbox, anchor) = label_anchor("ZA-WC", &s).expect("non-empty");
        assert_abs_diff_eq!(anchor.x, bbox.min_x + bbox.width() * 0.45, epsilon = 1e-9);
        assert_abs_diff_eq!(anchor.y, bbox.min_y + bbox.height() * 0.60, epsilon = 1e-9);
        assert!(anchor.x > bbox.min_x && anchor.x < bbox.max_x);
    }

    #[test]
    fn empty_shape_has_no_anchor() {
        assert!(label_anchor("ZA-GP", &ProjectedShape::default()).is_none());
    }

    #[test]
    fn stacks_name_above_and_metrics_below() {
        let bbox = BoundingBox { min_x: 0.0, min_y: 0.0, max_x: 200.0, max_y: 150.0 };
        let anchor = bbox.center();
        let metrics = vec!["R 250.00/kg".to_string(), "NC R 180.00/kg".to_string(), "extra".to_string()];
        let label = DESKTOP_LABELS.layout(anchor, &bbox, "Free State", &metrics);
        assert!(!label.small);
        assert_eq!(label.lines.len(), 3);
        assert!(label.lines[0].y < anchor.y);
        assert!(label.lines[1].y > anchor.y);
        assert!(label.lines[2].y > label.lines[1].y);
        assert_eq!(label.lines[0].font_size, DESKTOP_LABELS.name_size);
    }

    #[test]
    fn small_boxes_get_smaller_fonts() {
        let narrow = BoundingBox { min_x: 0.0, min_y: 0.0, max_x: 40.0, max_y: 150.0 };
        let label = DESKTOP_LABELS.layout(narrow.center(), &narrow, "Gauteng", &["R 1/kg".to_string()]);
        assert!(label.small);
        assert_eq!(label.lines[0].font_size, DESKTOP_LABELS.small_name_size);
        assert_eq!(label.lines[1].font_size, DESKTOP_LABELS.small_metric_size);
    }
}
