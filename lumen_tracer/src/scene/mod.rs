//! Scene management module
//!
//! Provides scenes (primitives, materials, lights), their GPU packing and
//! the scene manager.

mod gpu_data;
mod material;
mod scene;
mod scene_manager;

pub use gpu_data::{GpuLight, GpuMaterial, GpuPrimitive, GpuSceneData, LightCount, PrimitiveCounts};
pub use material::{Material, PointLight};
pub use scene::Scene;
pub use scene_manager::SceneManager;
