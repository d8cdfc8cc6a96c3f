// Damped orbit camera: pointer drag steers target yaw/pitch, the wheel
// steers target distance, and `update` eases the live values toward the
// targets each frame.

use glam::{Mat4, Vec3};

use crate::constants::{
    CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE, CAMERA_NEAR,
    CAMERA_START_DISTANCE, ORBIT_DAMPING, ORBIT_MAX_PITCH, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};

#[derive(Debug, Clone)]
pub struct OrbitCamera {
    yaw: f32,
    pitch: f32,
    distance: f32,
    target_yaw: f32,
    target_pitch: f32,
    target_distance: f32,
    aspect: f32,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: CAMERA_START_DISTANCE,
            target_yaw: 0.0,
            target_pitch: 0.0,
            target_distance: CAMERA_START_DISTANCE,
            aspect: 1.0,
        }
    }

    /// Recompute the aspect ratio from the mount bounds at call time.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn rotate_by(&mut self, dx_px: f32, dy_px: f32) {
        self.target_yaw -= dx_px * ORBIT_ROTATE_SPEED;
        self.target_pitch =
            (self.target_pitch + dy_px * ORBIT_ROTATE_SPEED).clamp(-ORBIT_MAX_PITCH, ORBIT_MAX_PITCH);
    }

    pub fn zoom_by(&mut self, delta: f32) {
        self.target_distance = (self.target_distance + delta * ORBIT_ZOOM_SPEED)
            .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    /// Advance the damping toward the targets. The easing factor is the
    /// classic per-frame `ORBIT_DAMPING` made frame-rate independent.
    pub fn update(&mut self, dt_sec: f32) {
        let alpha = 1.0 - (1.0 - ORBIT_DAMPING).powf((dt_sec * 60.0).max(0.0));
        self.yaw += (self.target_yaw - self.yaw) * alpha;
        self.pitch += (self.target_pitch - self.pitch) * alpha;
        self.distance += (self.target_distance - self.distance) * alpha;
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            CAMERA_FOV_DEG.to_radians(),
            self.aspect.max(1e-4),
            CAMERA_NEAR,
            CAMERA_FAR,
        )
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
