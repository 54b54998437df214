use glam::{Mat4, Vec4};

use crate::camera::{Camera, CameraController};
use crate::config::EngineConfig;
use crate::frame_timer::FrameTimer;
use crate::rendering::global_uniform::GlobalUniformState;
use crate::rendering::renderer::{DrawMode, Feature, FrontFace, Renderer, UniformValue};
use crate::rendering::traversal::render_object;
use crate::resources::{ResourceHandle, Resources};
use crate::scene_graph::Scene;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u32,
    pub draw_calls: usize,
}

/// Drives one frame of the scene against a [`Renderer`].
pub struct GraphicsEngine {
    pub camera: Camera,
    controller: Box<dyn CameraController>,
    timer: FrameTimer,
    base_shader: ResourceHandle,
    clear_colour: Vec4,
    draw_modes: Vec<DrawMode>,
    width: u32,
    height: u32,
}

impl GraphicsEngine {
    pub fn new(
        config: &EngineConfig,
        resources: &mut Resources,
        controller: Box<dyn CameraController>,
    ) -> Self {
        let base_shader = resources.shaders.register(config.base_shader.as_str());

        let mut engine = Self {
            camera: Camera::from_config(&config.camera),
            controller,
            timer: FrameTimer::new(),
            base_shader,
            clear_colour: config.clear_colour,
            draw_modes: config.draw_modes.clone(),
            width: 1,
            height: 1,
        };

        engine.set_viewport(config.width, config.height);
        engine
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring zero sized viewport {}x{}", width, height);
            return;
        }

        self.width = width;
        self.height = height;
    }

    pub fn viewport(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    pub fn render<R: Renderer + ?Sized>(&mut self, scene: &Scene, renderer: &mut R) -> FrameStats {
        renderer.bind_target();
        renderer.clear(self.clear_colour);
        renderer.set_viewport(self.width, self.height);

        renderer.set_feature(Feature::Cull, false);
        renderer.set_feature(Feature::Depth, true);
        renderer.set_front_face(FrontFace::Clockwise);

        renderer.use_shader(self.base_shader);

        self.camera.set_resolution(self.width, self.height);
        self.controller
            .update(&mut self.camera, self.timer.frame_elapsed());

        renderer.set_uniform("iView", UniformValue::Mat4(self.camera.view()));
        renderer.set_uniform("iProjection", UniformValue::Mat4(self.camera.projection()));
        GlobalUniformState::new(self.viewport(), &self.timer).upload(renderer);

        let draw_calls = self
            .draw_modes
            .iter()
            .map(|&mode| render_object(scene, scene.root(), Mat4::IDENTITY, mode, renderer))
            .sum();

        renderer.unbind_target();

        let stats = FrameStats {
            frame: self.timer.frame_count(),
            draw_calls,
        };
        log::debug!("Frame {}: {} draw calls", stats.frame, stats.draw_calls);

        self.timer.frame();
        stats
    }
}
