//! GPU records for scene payloads.
//!
//! Every record is a sequence of vec4 so the layout matches std430 without
//! implicit padding.

use bytemuck::{Pod, Zeroable};
use glam::Vec4;
use crate::geometry::Primitive;
use super::material::{Material, PointLight};

/// Packed primitive geometry (48 bytes).
///
/// - sphere: `(center, radius²)`, `0`, `0`
/// - triangle: `(v0, e2.x)`, `(e1 × e2, e2.y)`, `(e1, e2.z)`
/// - box: `(center, 0)`, `(half lengths, 0)`, `0`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuPrimitive {
    pub data: [[f32; 4]; 3],
}

impl GpuPrimitive {
    pub fn from_primitive(primitive: &Primitive) -> Self {
        let rows = match primitive {
            Primitive::Sphere(sphere) => [
                sphere.center.extend(sphere.radius * sphere.radius),
                Vec4::ZERO,
                Vec4::ZERO,
            ],
            Primitive::Triangle(triangle) => {
                let [v0, v1, v2] = triangle.vertices;
                let e1 = v1 - v0;
                let e2 = v2 - v0;
                [
                    v0.extend(e2.x),
                    e1.cross(e2).extend(e2.y),
                    e1.extend(e2.z),
                ]
            }
            Primitive::Box(aabb) => [
                aabb.center().extend(0.0),
                (aabb.lengths() * 0.5).extend(0.0),
                Vec4::ZERO,
            ],
        };
        Self { data: rows.map(|row| row.to_array()) }
    }
}

/// Packed material (48 bytes): `(albedo, 0)`, `(metallic, roughness, ao, 0)`,
/// `(reflectance, 0)`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuMaterial {
    pub albedo: [f32; 4],
    pub metallic_roughness_ao: [f32; 4],
    pub reflectance: [f32; 4],
}

impl From<&Material> for GpuMaterial {
    fn from(material: &Material) -> Self {
        Self {
            albedo: material.albedo.extend(0.0).to_array(),
            metallic_roughness_ao: [material.metallic, material.roughness, material.ao, 0.0],
            reflectance: material.reflectance().extend(0.0).to_array(),
        }
    }
}

/// Packed point light (32 bytes): `(position, 0)`, `(color, 0)`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuLight {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

impl From<&PointLight> for GpuLight {
    fn from(light: &PointLight) -> Self {
        Self {
            position: light.position.extend(0.0).to_array(),
            color: light.color.extend(0.0).to_array(),
        }
    }
}

/// Uniform block: primitive count per type (16 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct PrimitiveCounts {
    pub spheres: i32,
    pub triangles: i32,
    pub boxes: i32,
    pub _pad: i32,
}

impl PrimitiveCounts {
    pub fn count(primitives: &[Primitive]) -> Self {
        let mut counts = Self::zeroed();
        for primitive in primitives {
            match primitive {
                Primitive::Sphere(_) => counts.spheres += 1,
                Primitive::Triangle(_) => counts.triangles += 1,
                Primitive::Box(_) => counts.boxes += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> i32 {
        self.spheres + self.triangles + self.boxes
    }
}

/// Uniform block: point light count (16 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct LightCount {
    pub count: i32,
    pub _pad: [i32; 3],
}

impl LightCount {
    pub fn new(count: usize) -> Self {
        Self {
            count: count as i32,
            _pad: [0; 3],
        }
    }
}

/// All scene payloads except the tree, ready for upload
pub struct GpuSceneData {
    pub counts: PrimitiveCounts,
    pub primitives: Vec<GpuPrimitive>,
    pub materials: Vec<GpuMaterial>,
    pub light_count: LightCount,
    pub lights: Vec<GpuLight>,
}

impl GpuSceneData {
    /// Pack primitives, materials and lights in collection order
    pub fn pack(primitives: &[Primitive], materials: &[Material], lights: &[PointLight]) -> Self {
        Self {
            counts: PrimitiveCounts::count(primitives),
            primitives: primitives.iter().map(GpuPrimitive::from_primitive).collect(),
            materials: materials.iter().map(GpuMaterial::from).collect(),
            light_count: LightCount::new(lights.len()),
            lights: lights.iter().map(GpuLight::from).collect(),
        }
    }

    pub fn counts_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.counts)
    }

    pub fn primitives_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.primitives)
    }

    pub fn materials_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.materials)
    }

    pub fn light_count_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.light_count)
    }

    pub fn lights_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lights)
    }
}

#[cfg(test)]
#[path = "gpu_data_tests.rs"]
mod tests;
