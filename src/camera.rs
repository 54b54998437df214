use std::time::Duration;

use glam::{Mat4, Quat, Vec3};
use serde::Deserialize;

pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    width: u32,
    height: u32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, -5.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            width: 800,
            height: 600,
        }
    }
}

impl Camera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            eye: config.eye,
            target: config.target,
            fov_degrees: config.fov_degrees,
            near: config.near,
            far: config.far,
            ..Default::default()
        }
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn set_resolution(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Invalid camera resolution {}x{}, clamping to 1", width, height);
        }

        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_lh(
            self.fov_degrees.to_radians(),
            self.aspect_ratio(),
            self.near,
            self.far,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Radians per second the orbit controller turns around `target`.
    pub orbit_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let camera = Camera::default();

        Self {
            eye: camera.eye,
            target: camera.target,
            fov_degrees: camera.fov_degrees,
            near: camera.near,
            far: camera.far,
            orbit_speed: 0.5,
        }
    }
}

/// Moves the camera once per frame, before the view matrix is uploaded.
pub trait CameraController {
    fn update(&mut self, camera: &mut Camera, delta: Duration);
}

/// Leaves the camera where it is.
pub struct FixedController;

impl CameraController for FixedController {
    fn update(&mut self, _camera: &mut Camera, _delta: Duration) {}
}

/// Circles the eye around the target on the plane perpendicular to `up`.
pub struct OrbitController {
    pub speed: f32,
}

impl CameraController for OrbitController {
    fn update(&mut self, camera: &mut Camera, delta: Duration) {
        let angle = self.speed * delta.as_secs_f32();
        let rotation = Quat::from_axis_angle(camera.up.normalize_or(Vec3::Y), angle);
        camera.eye = camera.target + rotation * (camera.eye - camera.target);
    }
}
