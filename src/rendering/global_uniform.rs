use glam::Vec3;

use crate::frame_timer::FrameTimer;
use crate::rendering::renderer::{Renderer, UniformValue};

/// Per-frame values every shader can read, named after the shadertoy globals.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GlobalUniformState {
    pub resolution: [f32; 2],
    pub time: f32,
    pub time_delta: f32,
    pub frame: i32,
}

impl GlobalUniformState {
    pub fn new(resolution: (u32, u32), timer: &FrameTimer) -> Self {
        Self {
            resolution: [resolution.0 as f32, resolution.1 as f32],
            time: timer.total_elapsed().as_secs_f32(),
            time_delta: timer.frame_elapsed().as_secs_f32(),
            frame: timer.frame_count() as i32,
        }
    }

    pub fn upload<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        let [width, height] = self.resolution;

        renderer.set_uniform("iResolution", UniformValue::Vec3(Vec3::new(width, height, 1.0)));
        renderer.set_uniform("iTime", UniformValue::Float(self.time));
        renderer.set_uniform("iTimeDelta", UniformValue::Float(self.time_delta));
        renderer.set_uniform("iFrame", UniformValue::Int(self.frame));
    }
}
