//! Camera that follows a target with a dead zone and stays inside the map.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{DEAD_ZONE_MAX, DEAD_ZONE_MIN, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::geometry::Rect;
use crate::map::CameraBounds;

/// Size of the visible area in world units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    /// Width in world units.
    pub width: f64,
    /// Height in world units.
    pub height: f64,
}

impl Viewport {
    /// Size as a vector.
    #[must_use]
    pub const fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
        }
    }
}

/// Scrolling offset between world and screen space.
///
/// The tracked rectangle may roam freely inside the dead zone, the middle
/// half of the viewport on each axis. Leaving it drags the camera along by
/// the overflow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    offset: DVec2,
    viewport: Viewport,
}

impl Camera {
    /// Creates a camera at the origin.
    #[must_use]
    pub const fn new(viewport: Viewport) -> Self {
        Self {
            offset: DVec2::ZERO,
            viewport,
        }
    }

    /// World position of the top-left screen corner.
    #[must_use]
    pub const fn offset(&self) -> DVec2 {
        self.offset
    }

    /// Visible area size.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The viewport as a screen-space rectangle.
    #[must_use]
    pub const fn screen_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height)
    }

    /// Screen-space rectangle of the dead zone.
    #[must_use]
    pub fn dead_zone(&self) -> Rect {
        let size = self.viewport.size();
        let min = size * DEAD_ZONE_MIN;
        let max = size * DEAD_ZONE_MAX;
        Rect::from_corner(min, max - min)
    }

    /// Converts a world rectangle to screen space.
    #[must_use]
    pub fn to_screen(&self, world: Rect) -> Rect {
        world.translated(-self.offset)
    }

    /// Centres the view on `point`, then clamps into `bounds`.
    pub fn center_on(&mut self, point: DVec2, bounds: &CameraBounds) {
        self.offset = bounds.clamp(point - self.viewport.size() / 2.0);
    }

    /// Scrolls so `target`'s top-left corner is back inside the dead zone,
    /// then clamps into `bounds`.
    pub fn follow(&mut self, target: Rect, bounds: &CameraBounds) {
        let screen = self.to_screen(target);
        let zone = self.dead_zone();
        self.offset.x += overflow(screen.x, zone.x, zone.right());
        self.offset.y += overflow(screen.y, zone.y, zone.bottom());
        self.offset = bounds.clamp(self.offset);
    }
}

fn overflow(value: f64, low: f64, high: f64) -> f64 {
    if value > high {
        value - high
    } else if value < low {
        value - low
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    fn wide_bounds() -> CameraBounds {
        CameraBounds {
            min_x: 0.0,
            max_x: 10_000.0,
            min_y: 0.0,
            max_y: 10_000.0,
        }
    }

    #[fixture]
    fn camera() -> Camera {
        Camera::new(Viewport::default())
    }

    #[rstest]
    fn dead_zone_is_middle_half(camera: Camera) {
        assert_eq!(camera.dead_zone(), Rect::new(320.0, 180.0, 640.0, 360.0));
    }

    #[rstest]
    fn target_inside_dead_zone_does_not_scroll(mut camera: Camera) {
        camera.follow(Rect::new(500.0, 300.0, 20.0, 36.0), &wide_bounds());
        assert_eq!(camera.offset(), DVec2::ZERO);
    }

    #[rstest]
    #[case(Rect::new(1000.0, 300.0, 20.0, 36.0), DVec2::new(40.0, 0.0))]
    #[case(Rect::new(500.0, 600.0, 20.0, 36.0), DVec2::new(0.0, 60.0))]
    #[case(Rect::new(1000.0, 600.0, 20.0, 36.0), DVec2::new(40.0, 60.0))]
    fn overflow_scrolls_by_excess(
        mut camera: Camera,
        #[case] target: Rect,
        #[case] expected: DVec2,
    ) {
        camera.follow(target, &wide_bounds());
        assert_relative_eq!(camera.offset().x, expected.x);
        assert_relative_eq!(camera.offset().y, expected.y);
    }

    #[rstest]
    fn scrolling_left_is_clamped_at_zero(mut camera: Camera) {
        camera.follow(Rect::new(10.0, 10.0, 20.0, 36.0), &wide_bounds());
        assert_eq!(camera.offset(), DVec2::ZERO);
    }

    #[rstest]
    fn small_map_pins_camera(mut camera: Camera) {
        let pinned = CameraBounds {
            min_x: 0.0,
            max_x: 0.0,
            min_y: 0.0,
            max_y: 0.0,
        };
        for x in [-500.0, 0.0, 700.0, 5_000.0] {
            camera.follow(Rect::new(x, x, 20.0, 36.0), &pinned);
            assert_eq!(camera.offset(), DVec2::ZERO);
        }
    }

    #[rstest]
    fn center_on_clamps(mut camera: Camera) {
        camera.center_on(DVec2::new(100.0, 100.0), &wide_bounds());
        assert_eq!(camera.offset(), DVec2::ZERO);
        camera.center_on(DVec2::new(2000.0, 1000.0), &wide_bounds());
        assert_eq!(camera.offset(), DVec2::new(1360.0, 640.0));
    }
}
