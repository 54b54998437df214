use glam::{Mat4, Vec4};

use crate::rendering::renderer::{DrawMode, Feature, FrontFace, Renderer, UniformValue};
use crate::resources::ResourceHandle;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    BindTarget,
    Clear(Vec4),
    SetViewport(u32, u32),
    SetFeature(Feature, bool),
    SetFrontFace(FrontFace),
    UseShader(ResourceHandle),
    SetUniform(String, UniformValue),
    Draw {
        mesh: ResourceHandle,
        world: Mat4,
        mode: DrawMode,
    },
    UnbindTarget,
}

/// Renderer without a GPU. Records the commands of the current frame, which
/// starts at `bind_target`.
#[derive(Default)]
pub struct HeadlessRenderer {
    commands: Vec<RenderCommand>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn draws(&self) -> impl Iterator<Item = (ResourceHandle, Mat4, DrawMode)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            RenderCommand::Draw { mesh, world, mode } => Some((*mesh, *world, *mode)),
            _ => None,
        })
    }

    fn record(&mut self, command: RenderCommand) {
        log::trace!("{:?}", command);
        self.commands.push(command);
    }
}

impl Renderer for HeadlessRenderer {
    fn bind_target(&mut self) {
        self.commands.clear();
        self.record(RenderCommand::BindTarget);
    }

    fn clear(&mut self, color: Vec4) {
        self.record(RenderCommand::Clear(color));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.record(RenderCommand::SetViewport(width, height));
    }

    fn set_feature(&mut self, feature: Feature, enabled: bool) {
        self.record(RenderCommand::SetFeature(feature, enabled));
    }

    fn set_front_face(&mut self, front_face: FrontFace) {
        self.record(RenderCommand::SetFrontFace(front_face));
    }

    fn use_shader(&mut self, shader: ResourceHandle) {
        self.record(RenderCommand::UseShader(shader));
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.record(RenderCommand::SetUniform(name.to_string(), value));
    }

    fn draw(&mut self, mesh: ResourceHandle, world: Mat4, mode: DrawMode) {
        self.record(RenderCommand::Draw { mesh, world, mode });
    }

    fn unbind_target(&mut self) {
        self.record(RenderCommand::UnbindTarget);
    }
}
