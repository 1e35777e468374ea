//! Pointer/touch driven state shared by the whole scene: the drift speed
//! multiplier and the camera transform applied to the field container.

use crate::constants::{
    CAMERA_MAX_SCALE, CAMERA_MIN_SCALE, SPEED_MULTIPLIER_HELD, SPEED_MULTIPLIER_IDLE,
    SPEED_MULTIPLIER_RELEASED, TOUCH_DRAG_SENSITIVITY,
};
use glam::Vec2;

/// Scalar captured by each drift particle at spawn time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedMultiplier(f32);

impl Default for SpeedMultiplier {
    fn default() -> Self {
        Self(SPEED_MULTIPLIER_IDLE)
    }
}

impl SpeedMultiplier {
    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
    #[inline]
    pub fn hold(&mut self) {
        self.0 = SPEED_MULTIPLIER_HELD;
    }
    #[inline]
    pub fn release(&mut self) {
        self.0 = SPEED_MULTIPLIER_RELEASED;
    }
}

/// Rotation (degrees) and uniform scale of the field container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTransform {
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub scale: f32,
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            scale: 1.0,
        }
    }
}

impl CameraTransform {
    pub fn to_css(&self) -> String {
        format!(
            "translate(-50%, -50%) rotateX({}deg) rotateY({}deg) scale({})",
            self.rotation_x, self.rotation_y, self.scale
        )
    }
}

#[derive(Clone, Copy, Debug)]
struct Pinch {
    initial_distance: f32,
    initial_scale: f32,
}

/// Tracks drag/pinch gestures and folds them into the speed multiplier and
/// the camera. Camera changes are coalesced: however many moves arrive
/// between frames, [`Interaction::take_camera_update`] yields at most one.
#[derive(Clone, Debug)]
pub struct Interaction {
    pub speed: SpeedMultiplier,
    camera: CameraTransform,
    camera_dirty: bool,
    dragging: bool,
    last: Vec2,
    pinch: Option<Pinch>,
    mouse_sensitivity: f32,
}

impl Interaction {
    pub fn new(mouse_sensitivity: f32) -> Self {
        Self {
            speed: SpeedMultiplier::default(),
            camera: CameraTransform::default(),
            camera_dirty: false,
            dragging: false,
            last: Vec2::ZERO,
            pinch: None,
            mouse_sensitivity,
        }
    }

    #[inline]
    pub fn camera(&self) -> CameraTransform {
        self.camera
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.speed.hold();
        self.dragging = true;
        self.last = pos;
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        if self.dragging {
            self.rotate_by(pos - self.last, self.mouse_sensitivity);
            self.last = pos;
        }
    }

    pub fn pointer_up(&mut self) {
        self.speed.release();
        self.dragging = false;
    }

    pub fn touch_start(&mut self, touches: &[Vec2]) {
        match touches {
            [only] => {
                self.speed.hold();
                self.dragging = true;
                self.last = *only;
            }
            [a, b, ..] => {
                self.dragging = false;
                let initial_distance = a.distance(*b);
                // Coincident fingers give no usable baseline.
                self.pinch = (initial_distance > 0.0).then_some(Pinch {
                    initial_distance,
                    initial_scale: self.camera.scale,
                });
            }
            [] => {}
        }
    }

    pub fn touch_move(&mut self, touches: &[Vec2]) {
        match touches {
            [only] if self.dragging => {
                self.rotate_by(*only - self.last, TOUCH_DRAG_SENSITIVITY);
                self.last = *only;
            }
            [a, b, ..] => {
                if let Some(p) = self.pinch {
                    let ratio = a.distance(*b) / p.initial_distance;
                    self.camera.scale =
                        (p.initial_scale * ratio).clamp(CAMERA_MIN_SCALE, CAMERA_MAX_SCALE);
                    self.camera_dirty = true;
                }
            }
            _ => {}
        }
    }

    pub fn touch_end(&mut self) {
        self.speed.release();
        self.dragging = false;
        self.pinch = None;
    }

    /// Returns the camera once per batch of changes.
    pub fn take_camera_update(&mut self) -> Option<CameraTransform> {
        std::mem::take(&mut self.camera_dirty).then_some(self.camera)
    }

    fn rotate_by(&mut self, delta: Vec2, sensitivity: f32) {
        self.camera.rotation_y += delta.x * sensitivity;
        self.camera.rotation_x -= delta.y * sensitivity;
        self.camera_dirty = true;
    }
}
