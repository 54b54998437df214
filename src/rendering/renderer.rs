use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::resources::ResourceHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Cull,
    Depth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontFace {
    Clockwise,
    #[allow(dead_code)]
    CounterClockwise,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawMode {
    #[default]
    Fill,
    Lines,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec3(Vec3),
    Mat4(Mat4),
}

/// The graphics backend the frame is recorded against.
///
/// Implementations own every GPU object; the scene graph only hands over
/// resource handles and matrices. Calls arrive in frame order on one thread.
pub trait Renderer {
    fn bind_target(&mut self);

    fn clear(&mut self, color: Vec4);

    fn set_viewport(&mut self, width: u32, height: u32);

    fn set_feature(&mut self, feature: Feature, enabled: bool);

    fn set_front_face(&mut self, front_face: FrontFace);

    fn use_shader(&mut self, shader: ResourceHandle);

    fn set_uniform(&mut self, name: &str, value: UniformValue);

    /// Draws `mesh` with the bound shader. The backend uploads `world` as the
    /// `iModel` uniform before issuing the draw.
    fn draw(&mut self, mesh: ResourceHandle, world: Mat4, mode: DrawMode);

    fn unbind_target(&mut self);
}
