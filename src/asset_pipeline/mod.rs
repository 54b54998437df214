pub mod gltf_source;
pub mod model_list;
