//! Court zone mapping.
//!
//! Zones are fixed regions of normalized court space, measured from a fixed
//! basket reference. Each [`ZoneName`] has its own boundary test; the tests
//! are mutually exclusive and together cover every point, so each release
//! point lands in exactly one zone.

use courtvision_model::court::Point2D;
use courtvision_model::shot::ZoneName;
use serde::{Deserialize, Serialize};

/// Fixed zone boundaries in normalized court units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneLayout {
    /// Basket reference the arc and angles are measured from.
    pub basket: Point2D,

    /// Half width of the paint rectangle around `basket.x`.
    pub paint_half_width: f64,

    /// Paint extends from the baseline down to this `y`.
    pub paint_depth: f64,

    /// Radius of the three-point arc around the basket.
    pub arc_radius: f64,

    /// Horizontal distance from the basket beyond which the straight corner
    /// segment of the three-point line applies.
    pub corner_offset: f64,

    /// Corner segment runs from the baseline down to this `y`.
    pub corner_line_y: f64,

    /// Three-pointers at least this many degrees off the court axis are
    /// corner shots.
    pub corner_angle_deg: f64,

    /// Three-pointers at least this many degrees off the court axis (and
    /// not corner) are wing shots; the rest are top of key.
    pub wing_angle_deg: f64,
}

impl Default for ZoneLayout {
    fn default() -> Self {
        Self {
            basket: Point2D::new(50.0, 5.0),
            paint_half_width: 15.0,
            paint_depth: 25.0,
            arc_radius: 40.0,
            corner_offset: 42.0,
            corner_line_y: 15.0,
            corner_angle_deg: 70.0,
            wing_angle_deg: 25.0,
        }
    }
}

/// Maps release points to court zones.
#[derive(Debug, Clone)]
pub struct ZoneMapper {
    layout: ZoneLayout,
}

impl ZoneMapper {
    pub fn new(layout: ZoneLayout) -> Self {
        Self { layout }
    }

    pub fn with_defaults() -> Self {
        Self::new(ZoneLayout::default())
    }

    /// Zone of a release point. Never fails: anything off the court,
    /// including non-finite coordinates, is `OutOfBounds`.
    pub fn classify(&self, point: Point2D) -> ZoneName {
        ZoneName::ALL
            .into_iter()
            .find(|zone| self.contains(*zone, point))
            .unwrap_or(ZoneName::OutOfBounds)
    }

    /// Boundary test for a single zone.
    pub fn contains(&self, zone: ZoneName, point: Point2D) -> bool {
        if !point.in_court_bounds() {
            return zone == ZoneName::OutOfBounds;
        }

        let dx = point.x - self.layout.basket.x;
        let left = dx < 0.0;
        let three = self.beyond_arc(point);
        let angle = self.angle_from_axis(point);

        match zone {
            ZoneName::Paint => !three && self.in_paint(point),
            ZoneName::MidRange => !three && !self.in_paint(point),
            ZoneName::CornerLeft => three && angle >= self.layout.corner_angle_deg && left,
            ZoneName::CornerRight => three && angle >= self.layout.corner_angle_deg && !left,
            ZoneName::WingLeft => three && self.in_wing_band(angle) && left,
            ZoneName::WingRight => three && self.in_wing_band(angle) && !left,
            ZoneName::TopOfKey => three && angle < self.layout.wing_angle_deg,
            ZoneName::OutOfBounds => false,
        }
    }

    fn in_paint(&self, point: Point2D) -> bool {
        (point.x - self.layout.basket.x).abs() <= self.layout.paint_half_width
            && point.y <= self.layout.paint_depth
    }

    fn beyond_arc(&self, point: Point2D) -> bool {
        let dx = (point.x - self.layout.basket.x).abs();
        point.distance_to(&self.layout.basket) > self.layout.arc_radius
            || (dx >= self.layout.corner_offset && point.y <= self.layout.corner_line_y)
    }

    fn in_wing_band(&self, angle: f64) -> bool {
        angle >= self.layout.wing_angle_deg && angle < self.layout.corner_angle_deg
    }

    /// Absolute angle in degrees between the court axis (straight out from
    /// the basket toward half court) and the direction to `point`.
    fn angle_from_axis(&self, point: Point2D) -> f64 {
        let dx = point.x - self.layout.basket.x;
        let dy = point.y - self.layout.basket.y;
        dx.atan2(dy).to_degrees().abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn zone(x: f64, y: f64) -> ZoneName {
        ZoneMapper::with_defaults().classify(Point2D::new(x, y))
    }

    #[test]
    fn test_named_spots() {
        assert_eq!(zone(50.0, 15.0), ZoneName::Paint);
        assert_eq!(zone(30.0, 20.0), ZoneName::MidRange);
        assert_eq!(zone(50.0, 35.0), ZoneName::MidRange);
        assert_eq!(zone(50.0, 70.0), ZoneName::TopOfKey);
        assert_eq!(zone(20.0, 50.0), ZoneName::WingLeft);
        assert_eq!(zone(80.0, 50.0), ZoneName::WingRight);
        assert_eq!(zone(3.0, 8.0), ZoneName::CornerLeft);
        assert_eq!(zone(97.0, 8.0), ZoneName::CornerRight);
    }

    #[test]
    fn test_off_court_is_out_of_bounds() {
        assert_eq!(zone(-1.0, 50.0), ZoneName::OutOfBounds);
        assert_eq!(zone(50.0, 100.5), ZoneName::OutOfBounds);
        assert_eq!(zone(f64::NAN, 50.0), ZoneName::OutOfBounds);
        assert_eq!(zone(50.0, f64::INFINITY), ZoneName::OutOfBounds);
    }

    #[test]
    fn test_court_corners_resolve() {
        assert_eq!(zone(0.0, 0.0), ZoneName::CornerLeft);
        assert_eq!(zone(100.0, 0.0), ZoneName::CornerRight);
        assert_eq!(zone(0.0, 100.0), ZoneName::WingLeft);
        assert_eq!(zone(100.0, 100.0), ZoneName::WingRight);
    }

    #[test]
    fn test_corner_segment_inside_arc_radius() {
        // Inside a widened arc, but past the straight corner segment.
        let mapper = ZoneMapper::new(ZoneLayout {
            arc_radius: 50.0,
            ..Default::default()
        });
        assert_eq!(mapper.classify(Point2D::new(7.0, 5.0)), ZoneName::CornerLeft);
        assert_eq!(mapper.classify(Point2D::new(7.0, 30.0)), ZoneName::MidRange);
    }

    #[test]
    fn test_grid_every_point_in_exactly_one_zone() {
        let mapper = ZoneMapper::with_defaults();
        for xi in 0..=100 {
            for yi in 0..=100 {
                let p = Point2D::new(xi as f64, yi as f64);
                let hits = ZoneName::ALL
                    .iter()
                    .filter(|z| mapper.contains(**z, p))
                    .count();
                assert_eq!(hits, 1, "point {p:?} matched {hits} zones");
            }
        }
    }

    proptest! {
        #[test]
        fn prop_exactly_one_zone(x in -20.0f64..120.0, y in -20.0f64..120.0) {
            let mapper = ZoneMapper::with_defaults();
            let p = Point2D::new(x, y);
            let hits = ZoneName::ALL.iter().filter(|z| mapper.contains(**z, p)).count();
            prop_assert_eq!(hits, 1);
            prop_assert_eq!(mapper.classify(p) == ZoneName::OutOfBounds, !p.in_court_bounds());
        }
    }
}
