pub mod global_uniform;
pub mod graphics_engine;
pub mod headless;
pub mod renderer;
pub mod traversal;
