//! Camera controller: smoothed pan/zoom, focus lock and frontier arming.
//!
//! Input only ever moves the target. `tick` eases the current state toward
//! it, so the rendered camera lags input by a few frames.

use glam::DVec2;

use starmap_core::state::{CameraState, CameraView, Viewport};
use starmap_core::types::BodyId;

use crate::config::{CameraConfig, ZoomRange};

#[derive(Debug, Clone)]
pub struct CameraController {
    current: CameraState,
    target: CameraState,
    focus: Option<BodyId>,
    frontier_armed: bool,
    viewport: Viewport,
    config: CameraConfig,
}

impl CameraController {
    pub fn new(config: CameraConfig) -> Self {
        let zoom = config.unfocused_zoom.clamp(1.0);
        let state = CameraState::new(0.0, 0.0, zoom);
        Self {
            current: state,
            target: state,
            focus: None,
            frontier_armed: false,
            viewport: config.viewport,
            config,
        }
    }

    pub fn current(&self) -> CameraState {
        self.current
    }

    pub fn target(&self) -> CameraState {
        self.target
    }

    pub fn focus(&self) -> Option<BodyId> {
        self.focus
    }

    pub fn frontier_armed(&self) -> bool {
        self.frontier_armed
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Zoom bounds for the current focus state.
    pub fn zoom_range(&self) -> ZoomRange {
        if self.focus.is_some() {
            self.config.focused_zoom
        } else {
            self.config.unfocused_zoom
        }
    }

    /// Set the desired camera state. Zoom is clamped; non-finite input is ignored.
    pub fn set_target(&mut self, x: f64, y: f64, zoom: f64) {
        if !(x.is_finite() && y.is_finite() && zoom.is_finite()) {
            log::warn!("Ignoring non-finite camera target ({}, {}, {})", x, y, zoom);
            return;
        }
        self.target = CameraState::new(x, y, self.zoom_range().clamp(zoom));
    }

    /// Drag by a screen-space delta. Releases focus; returns whether it did.
    pub fn pan_by_screen(&mut self, dx: f64, dy: f64) -> bool {
        if !(dx.is_finite() && dy.is_finite()) {
            return false;
        }
        let released = self.clear_focus();
        let zoom = self.current.zoom;
        self.set_target(self.target.x - dx / zoom, self.target.y - dy / zoom, self.target.zoom);
        released
    }

    /// Scale zoom by `factor`, keeping the world point under the cursor fixed.
    pub fn zoom_at(&mut self, factor: f64, screen_x: f64, screen_y: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let screen = DVec2::new(screen_x, screen_y);
        let anchor = self.target.screen_to_world(&self.viewport, screen);
        if !anchor.is_finite() {
            return;
        }
        let zoom = self.zoom_range().clamp(self.target.zoom * factor);
        let half = DVec2::new(self.viewport.width, self.viewport.height) * 0.5;
        let center = anchor - (screen - half) / zoom;
        self.set_target(center.x, center.y, zoom);
    }

    /// Lock onto `body` at `position` with the default focus zoom.
    pub fn focus_on(&mut self, body: BodyId, position: DVec2) {
        self.focus = Some(body);
        self.set_target(position.x, position.y, self.config.focus_zoom);
    }

    /// Drop the focus lock. Returns whether a lock was held.
    pub fn clear_focus(&mut self) -> bool {
        if self.focus.take().is_none() {
            return false;
        }
        self.target.zoom = self.zoom_range().clamp(self.target.zoom);
        true
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.viewport = Viewport { width, height };
        }
    }

    /// Advance one tick.
    ///
    /// `focus_lock` is the live position of the focused body when it should
    /// be chased (a focused star is not). Returns the camera's distance from
    /// the origin when the frontier warning arms on this tick.
    pub fn tick(&mut self, focus_lock: Option<DVec2>) -> Option<f64> {
        if let Some(pos) = focus_lock.filter(|p| p.is_finite()) {
            self.target.x = pos.x;
            self.target.y = pos.y;
        }

        let alpha = self.config.smoothing;
        self.current.x += (self.target.x - self.current.x) * alpha;
        self.current.y += (self.target.y - self.current.y) * alpha;
        self.current.zoom += (self.target.zoom - self.current.zoom) * alpha;

        let distance = self.current.distance_from_origin();
        if distance > self.config.frontier_distance {
            if self.focus.is_none() && !self.frontier_armed {
                self.frontier_armed = true;
                return Some(distance);
            }
        } else {
            self.frontier_armed = false;
        }
        None
    }

    /// World coordinate under a screen pixel, using the rendered camera.
    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        self.current.screen_to_world(&self.viewport, screen)
    }

    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        self.current.world_to_screen(&self.viewport, world)
    }

    pub fn view(&self) -> CameraView {
        let range = self.zoom_range();
        CameraView {
            current: self.current,
            target: self.target,
            viewport: self.viewport,
            focus: self.focus,
            zoom_min: range.min,
            zoom_max: range.max,
            frontier_armed: self.frontier_armed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> CameraController {
        CameraController::new(CameraConfig::default())
    }

    #[test]
    fn zoom_always_clamped() {
        let mut cam = camera();
        for z in [-5.0, 0.0, 0.05, 0.5, 1.9, 3.0, 100.0] {
            cam.set_target(0.0, 0.0, z);
            assert!(cam.zoom_range().contains(cam.target().zoom), "zoom {z}");
        }
        cam.focus_on(BodyId(1), DVec2::new(10.0, 10.0));
        for z in [-5.0, 0.5, 4.0, 100.0] {
            cam.set_target(0.0, 0.0, z);
            let t = cam.target().zoom;
            assert!((1.0..=8.0).contains(&t), "focused zoom {z} -> {t}");
        }
    }

    #[test]
    fn clearing_focus_reclamps_zoom() {
        let mut cam = camera();
        cam.focus_on(BodyId(1), DVec2::ZERO);
        assert_eq!(cam.target().zoom, 3.0);
        assert!(cam.clear_focus());
        assert_eq!(cam.target().zoom, 2.0);
        assert!(!cam.clear_focus());
    }

    #[test]
    fn easing_converges() {
        let mut cam = camera();
        cam.set_target(100.0, -50.0, 2.0);
        cam.tick(None);
        assert!((cam.current().x - 10.0).abs() < 1e-9);
        for _ in 0..200 {
            cam.tick(None);
        }
        assert!((cam.current().x - 100.0).abs() < 1e-6);
        assert!((cam.current().zoom - 2.0).abs() < 1e-6);
    }

    #[test]
    fn focus_lock_chases_body() {
        let mut cam = camera();
        cam.focus_on(BodyId(2), DVec2::new(50.0, 0.0));
        cam.tick(Some(DVec2::new(60.0, 5.0)));
        assert_eq!(cam.target().x, 60.0);
        assert_eq!(cam.target().y, 5.0);
    }

    #[test]
    fn pan_releases_focus_and_moves_target() {
        let mut cam = camera();
        cam.focus_on(BodyId(2), DVec2::ZERO);
        assert!(cam.pan_by_screen(10.0, 0.0));
        assert_eq!(cam.focus(), None);
        // current zoom is still 1.0, so 10 px = 10 units
        assert!((cam.target().x + 10.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_at_keeps_cursor_point_fixed() {
        let mut cam = camera();
        let screen = DVec2::new(900.0, 200.0);
        let before = cam.target().screen_to_world(&cam.viewport(), screen);
        cam.zoom_at(1.5, screen.x, screen.y);
        let after = cam.target().screen_to_world(&cam.viewport(), screen);
        assert!((before - after).length() < 1e-9);
        assert!((cam.target().zoom - 1.5).abs() < 1e-9);
    }

    #[test]
    fn non_finite_input_ignored() {
        let mut cam = camera();
        cam.set_target(f64::NAN, 0.0, 1.0);
        cam.zoom_at(f64::INFINITY, 0.0, 0.0);
        cam.pan_by_screen(f64::NAN, 1.0);
        assert_eq!(cam.target(), CameraState::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn frontier_arms_once_per_excursion() {
        let mut cam = camera();
        cam.set_target(10_000.0, 0.0, 1.0);
        let mut warnings = 0;
        for _ in 0..300 {
            if cam.tick(None).is_some() {
                warnings += 1;
            }
        }
        assert_eq!(warnings, 1);
        assert!(cam.frontier_armed());

        cam.set_target(0.0, 0.0, 1.0);
        for _ in 0..300 {
            assert!(cam.tick(None).is_none());
        }
        assert!(!cam.frontier_armed());

        cam.set_target(10_000.0, 0.0, 1.0);
        let again = (0..300).filter(|_| cam.tick(None).is_some()).count();
        assert_eq!(again, 1);
    }

    #[test]
    fn frontier_suppressed_while_focused() {
        let mut cam = camera();
        cam.focus_on(BodyId(0), DVec2::new(9000.0, 0.0));
        for _ in 0..300 {
            assert!(cam.tick(None).is_none());
        }
    }
}
