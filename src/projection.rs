//! Linear lon/lat → drawing-frame projection.
//!
//! The map never pans or zooms, so a bounding-box-fitted equirectangular
//! transform is all that is needed. Both frames share the same geographic
//! bounds; only the pixel size differs, which keeps shapes congruent between
//! the desktop and mobile presentations.

use geo::{Contains, Coord, Geometry, LineString, MultiPolygon, Point, Polygon};

/// Geographic extent that is stretched over the drawing frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

/// Envelope of South Africa with a little slack on every side.
pub const ZA_BOUNDS: GeoBounds = GeoBounds {
    min_lon: 16.3,
    max_lon: 33.0,
    min_lat: -35.0,
    max_lat: -22.0,
};

/// Fixed geographic bounds plus the output viewBox they map onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionFrame {
    pub bounds: GeoBounds,
    pub width: f64,
    pub height: f64,
    pub margin_x: f64,
    pub margin_y: f64,
}

pub const DESKTOP_FRAME: ProjectionFrame = ProjectionFrame {
    bounds: ZA_BOUNDS,
    width: 800.0,
    height: 700.0,
    margin_x: 20.0,
    margin_y: 20.0,
};

pub const MOBILE_FRAME: ProjectionFrame = ProjectionFrame {
    bounds: ZA_BOUNDS,
    width: 360.0,
    height: 315.0,
    margin_x: 10.0,
    margin_y: 10.0,
};

impl ProjectionFrame {
    /// Width of the full viewBox, margins included.
    pub fn view_width(&self) -> f64 {
        self.width + 2.0 * self.margin_x
    }

    pub fn view_height(&self) -> f64 {
        self.height + 2.0 * self.margin_y
    }

    fn is_degenerate(&self) -> bool {
        let b = &self.bounds;
        !(b.max_lon - b.min_lon > 0.0 && b.max_lat - b.min_lat > 0.0)
    }

    /// Maps one geographic position into frame coordinates (y grows downward).
    pub fn project(&self, lon: f64, lat: f64) -> Coord<f64> {
        let b = &self.bounds;
        Coord {
            x: (lon - b.min_lon) / (b.max_lon - b.min_lon) * self.width + self.margin_x,
            y: (b.max_lat - lat) / (b.max_lat - b.min_lat) * self.height + self.margin_y,
        }
    }

    /// True when `c` lies inside the viewBox.
    pub fn encloses(&self, c: Coord<f64>) -> bool {
        (0.0..=self.view_width()).contains(&c.x) && (0.0..=self.view_height()).contains(&c.y)
    }
}

/// One drawing instruction of a compound path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathStep {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Close,
}

/// A region's geometry in frame coordinates.
///
/// Polygons keep their holes so that hit testing and `evenodd` filling both
/// treat enclaves as outside the region.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedShape {
    pub polygons: MultiPolygon<f64>,
}

impl Default for ProjectedShape {
    fn default() -> Self {
        Self { polygons: MultiPolygon(Vec::new()) }
    }
}

impl ProjectedShape {
    pub fn is_empty(&self) -> bool {
        self.polygons.0.is_empty()
    }

    /// All rings as one compound path: each ring (outer boundary or hole)
    /// starts with its own move so rings never join up.
    pub fn steps(&self) -> Vec<PathStep> {
        let mut steps = Vec::new();
        for poly in &self.polygons.0 {
            for ring in std::iter::once(poly.exterior()).chain(poly.interiors()) {
                let coords = open_ring(ring);
                let Some((first, rest)) = coords.split_first() else {
                    continue;
                };
                steps.push(PathStep::MoveTo(first.x, first.y));
                steps.extend(rest.iter().map(|c| PathStep::LineTo(c.x, c.y)));
                steps.push(PathStep::Close);
            }
        }
        steps
    }

    /// SVG `d` attribute for [`Self::steps`].
    pub fn svg_path(&self) -> String {
        let mut d = String::new();
        for step in self.steps() {
            match step {
                PathStep::MoveTo(x, y) => d.push_str(&format!("M{x:.2},{y:.2}")),
                PathStep::LineTo(x, y) => d.push_str(&format!("L{x:.2},{y:.2}")),
                PathStep::Close => d.push('Z'),
            }
        }
        d
    }

    /// Points of every outer boundary, holes excluded.
    pub fn outer_points(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.polygons.0.iter().flat_map(|p| p.exterior().0.iter().copied())
    }

    /// Every projected point, holes included.
    pub fn all_points(&self) -> impl Iterator<Item = Coord<f64>> + '_ {
        self.polygons.0.iter().flat_map(|p| {
            p.exterior()
                .0
                .iter()
                .chain(p.interiors().iter().flat_map(|r| r.0.iter()))
                .copied()
        })
    }

    /// Containment test in frame coordinates; points inside a hole are outside.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.polygons.contains(&Point::new(x, y))
    }
}

/// Ring coordinates without the repeated closing point.
fn open_ring(ring: &LineString<f64>) -> &[Coord<f64>] {
    match ring.0.as_slice() {
        [first, inner @ .., last] if first == last => {
            let len = inner.len() + 1;
            &ring.0[..len]
        }
        all => all,
    }
}

/// A ring is usable when it has at least three finite positions.
fn ring_is_valid(ring: &LineString<f64>) -> bool {
    open_ring(ring).len() >= 3 && ring.0.iter().all(|c| c.x.is_finite() && c.y.is_finite())
}

/// Projects one ring of (lon, lat) pairs.
pub fn project_ring(ring: &LineString<f64>, frame: &ProjectionFrame) -> LineString<f64> {
    ring.0.iter().map(|c| frame.project(c.x, c.y)).collect()
}

fn project_polygon(poly: &Polygon<f64>, frame: &ProjectionFrame) -> Option<Polygon<f64>> {
    if !ring_is_valid(poly.exterior()) {
        return None;
    }
    let holes = poly
        .interiors()
        .iter()
        .filter(|r| ring_is_valid(r))
        .map(|r| project_ring(r, frame))
        .collect();
    Some(Polygon::new(project_ring(poly.exterior(), frame), holes))
}

/// Projects polygon or multi-polygon geometry into `frame`.
///
/// Never fails: unsupported geometry kinds, malformed rings and a degenerate
/// frame all yield an empty shape (or drop just the offending polygon), and
/// the caller decides whether to skip the region.
pub fn project_geometry(geometry: &Geometry<f64>, frame: &ProjectionFrame) -> ProjectedShape {
    if frame.is_degenerate() {
        return ProjectedShape::default();
    }
    let polygons = match geometry {
        Geometry::Polygon(p) => project_polygon(p, frame).into_iter().collect(),
        Geometry::MultiPolygon(mp) => mp
            .0
            .iter()
            .filter_map(|p| project_polygon(p, frame))
            .collect(),
        _ => Vec::new(),
    };
    ProjectedShape { polygons: MultiPolygon(polygons) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geo::{LineString, Point, polygon};

    fn square(lon: f64, lat: f64, size: f64) -> LineString<f64> {
        LineString::from(vec![
            (lon, lat),
            (lon + size, lat),
            (lon + size, lat + size),
            (lon, lat + size),
            (lon, lat),
        ])
    }

    #[test]
    fn corners_of_bounds_map_to_frame_corners() {
        let f = DESKTOP_FRAME;
        let top_left = f.project(ZA_BOUNDS.min_lon, ZA_BOUNDS.max_lat);
        let bottom_right = f.project(ZA_BOUNDS.max_lon, ZA_BOUNDS.min_lat);
        assert_abs_diff_eq!(top_left.x, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(top_left.y, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bottom_right.x, 820.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bottom_right.y, 720.0, epsilon = 1e-9);
    }

    #[test]
    fn frames_are_congruent() {
        let d = DESKTOP_FRAME.project(26.0, -30.0);
        let m = MOBILE_FRAME.project(26.0, -30.0);
        let dx = (d.x - DESKTOP_FRAME.margin_x) / DESKTOP_FRAME.width;
        let mx = (m.x - MOBILE_FRAME.margin_x) / MOBILE_FRAME.width;
        let dy = (d.y - DESKTOP_FRAME.margin_y) / DESKTOP_FRAME.height;
        let my = (m.y - MOBILE_FRAME.margin_y) / MOBILE_FRAME.height;
        assert_abs_diff_eq!(dx, mx, epsilon = 1e-12);
        assert_abs_diff_eq!(dy, my, epsilon = 1e-12);
    }

    #[test]
    fn projection_is_deterministic() {
        let geom = Geometry::Polygon(Polygon::new(square(20.0, -30.0, 2.0), vec![]));
        let a = project_geometry(&geom, &DESKTOP_FRAME);
        let b = project_geometry(&geom, &DESKTOP_FRAME);
        assert_eq!(a, b);
        assert_eq!(a.steps(), b.steps());
    }

    #[test]
    fn simple_polygon_emits_one_move_and_closes() {
        let geom = Geometry::Polygon(Polygon::new(square(20.0, -30.0, 2.0), vec![]));
        let steps = project_geometry(&geom, &MOBILE_FRAME).steps();
        assert_eq!(steps.len(), 5);
        assert!(matches!(steps[0], PathStep::MoveTo(..)));
        assert!(steps[1..4].iter().all(|s| matches!(s, PathStep::LineTo(..))));
        assert_eq!(steps[4], PathStep::Close);
        assert_eq!(
            project_geometry(&geom, &MOBILE_FRAME).svg_path(),
            "M89.76,203.85L132.87,203.85L132.87,155.38L89.76,155.38Z"
        );
    }

    #[test]
    fn holes_start_their_own_subpath() {
        let outer = square(20.0, -32.0, 6.0);
        let hole = square(22.0, -30.0, 2.0);
        let geom = Geometry::Polygon(Polygon::new(outer, vec![hole]));
        let shape = project_geometry(&geom, &DESKTOP_FRAME);
        let moves = shape.steps().iter().filter(|s| matches!(s, PathStep::MoveTo(..))).count();
        assert_eq!(moves, 2);

        let inside_hole = DESKTOP_FRAME.project(23.0, -29.0);
        let inside_ring = DESKTOP_FRAME.project(20.5, -31.5);
        assert!(!shape.contains(inside_hole.x, inside_hole.y));
        assert!(shape.contains(inside_ring.x, inside_ring.y));
    }

    #[test]
    fn multipolygon_concatenates_rings() {
        let geom = Geometry::MultiPolygon(MultiPolygon(vec![
            Polygon::new(square(18.0, -34.0, 1.0), vec![]),
            Polygon::new(square(30.0, -25.0, 1.0), vec![]),
        ]));
        let shape = project_geometry(&geom, &DESKTOP_FRAME);
        assert_eq!(shape.polygons.0.len(), 2);
        let d = shape.svg_path();
        assert_eq!(d.matches('M').count(), 2);
        assert_eq!(d.matches('Z').count(), 2);
    }

    #[test]
    fn projected_points_stay_inside_frame() {
        let simple = Geometry::Polygon(polygon![
            (x: 16.5, y: -34.8), (x: 32.9, y: -34.8), (x: 32.9, y: -22.1), (x: 16.5, y: -22.1),
        ]);
        let holed = Geometry::Polygon(Polygon::new(
            square(20.0, -32.0, 6.0),
            vec![square(22.0, -30.0, 2.0)],
        ));
        let multi = Geometry::MultiPolygon(MultiPolygon(vec![
            Polygon::new(square(17.0, -34.5, 1.0), vec![]),
            Polygon::new(square(31.0, -23.5, 1.0), vec![]),
        ]));
        for frame in [DESKTOP_FRAME, MOBILE_FRAME] {
            for geom in [&simple, &holed, &multi] {
                let shape = project_geometry(geom, &frame);
                assert!(!shape.is_empty());
                assert!(shape.all_points().all(|c| frame.encloses(c)));
            }
        }
    }

    #[test]
    fn degenerate_geometry_yields_empty_shape() {
        let empty = Geometry::Polygon(Polygon::new(LineString::new(vec![]), vec![]));
        let two_points = Geometry::Polygon(Polygon::new(
            LineString::from(vec![(20.0, -30.0), (21.0, -30.0)]),
            vec![],
        ));
        let not_finite = Geometry::Polygon(Polygon::new(
            LineString::from(vec![(20.0, -30.0), (f64::NAN, -30.0), (21.0, -31.0)]),
            vec![],
        ));
        let point = Geometry::Point(Point::new(20.0, -30.0));
        for geom in [empty, two_points, not_finite, point] {
            let shape = project_geometry(&geom, &DESKTOP_FRAME);
            assert!(shape.is_empty());
            assert!(shape.steps().is_empty());
            assert_eq!(shape.svg_path(), "");
        }
        assert_eq!(project_geometry(&Geometry::Point(Point::new(0.0, 0.0)), &DESKTOP_FRAME), ProjectedShape::default());
        assert!(ProjectedShape::default().is_empty());
    }

    #[test]
    fn malformed_member_of_multipolygon_is_dropped_alone() {
        let geom = Geometry::MultiPolygon(MultiPolygon(vec![
            Polygon::new(LineString::new(vec![]), vec![]),
            Polygon::new(square(25.0, -30.0, 1.0), vec![]),
        ]));
        assert_eq!(project_geometry(&geom, &DESKTOP_FRAME).polygons.0.len(), 1);
    }

    #[test]
    fn degenerate_frame_yields_empty_shape() {
        let frame = ProjectionFrame {
            bounds: GeoBounds { min_lon: 20.0, max_lon: 20.0, min_lat: -30.0, max_lat: -20.0 },
            ..DESKTOP_FRAME
        };
        let geom = Geometry::Polygon(Polygon::new(square(20.0, -30.0, 2.0), vec![]));
        assert!(project_geometry(&geom, &frame).is_empty());
    }
}
