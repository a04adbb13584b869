/// Scene — primitives, materials and lights of one raytraced scene.
///
/// Primitives are collected during setup and identified by their insertion
/// index. `finalize` builds the acceleration structure once, packs every
/// payload and hands it to the graphics device at the configured binding
/// slots. A finalized scene is read-only.

use std::sync::Arc;
use crate::accel::{AccelerationStructure, FlatStructure};
use crate::config::AccelConfig;
use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, Primitive, Sphere, Triangle};
use crate::graphics_device::{Buffer, BufferDesc, BufferUsage, GraphicsDevice};
use super::gpu_data::GpuSceneData;
use super::material::{Material, PointLight};

const SOURCE: &str = "lumen::Scene";

/// A raytraced scene.
pub struct Scene {
    /// Acceleration structure and upload configuration
    config: AccelConfig,
    /// Primitive collection (index = primitive id)
    primitives: Vec<Primitive>,
    /// One material per primitive, same order
    materials: Vec<Material>,
    /// Point lights
    lights: Vec<PointLight>,
    /// Triangles accepted so far (checked against `triangle_limit`)
    triangle_count: usize,
    /// Triangles rejected by `triangle_limit`
    dropped_triangles: usize,
    /// Flattened tree, set by `finalize`
    flat_structure: Option<FlatStructure>,
    /// Uploaded buffers, kept alive as long as the scene
    buffers: Vec<Arc<dyn Buffer>>,
}

impl Scene {
    /// Create an empty scene
    ///
    /// # Errors
    ///
    /// Returns `InitializationFailed` if `config` does not validate.
    pub fn new(config: AccelConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            primitives: Vec::new(),
            materials: Vec::new(),
            lights: Vec::new(),
            triangle_count: 0,
            dropped_triangles: 0,
            flat_structure: None,
            buffers: Vec::new(),
        })
    }

    // ===== SETUP =====

    /// Add a sphere, returning its primitive index
    pub fn add_sphere(&mut self, sphere: Sphere, material: Material) -> Result<usize> {
        self.push_primitive(sphere.into(), material)
    }

    /// Add an axis-aligned box, returning its primitive index
    pub fn add_box(&mut self, aabb: BoundingBox, material: Material) -> Result<usize> {
        self.push_primitive(aabb.into(), material)
    }

    /// Add a triangle, returning its primitive index
    ///
    /// Returns `Ok(None)` once `triangle_limit` triangles have been accepted;
    /// the triangle is dropped.
    pub fn add_triangle(
        &mut self,
        triangle: Triangle,
        material: Material,
    ) -> Result<Option<usize>> {
        self.ensure_not_finalized()?;

        if let Some(limit) = self.config.triangle_limit {
            if self.triangle_count >= limit {
                self.dropped_triangles += 1;
                crate::engine_warn!(
                    SOURCE,
                    "Triangle limit of {} reached, dropping triangle ({} dropped so far)",
                    limit,
                    self.dropped_triangles
                );
                return Ok(None);
            }
        }

        let index = self.push_primitive(triangle.into(), material)?;
        self.triangle_count += 1;
        Ok(Some(index))
    }

    /// Add a point light, returning its index
    pub fn add_point_light(&mut self, light: PointLight) -> Result<usize> {
        self.ensure_not_finalized()?;
        self.lights.push(light);
        Ok(self.lights.len() - 1)
    }

    fn push_primitive(&mut self, primitive: Primitive, material: Material) -> Result<usize> {
        self.ensure_not_finalized()?;
        self.primitives.push(primitive);
        self.materials.push(material);
        Ok(self.primitives.len() - 1)
    }

    fn ensure_not_finalized(&self) -> Result<()> {
        if self.is_finalized() {
            return Err(Error::InvalidResource("Scene already finalized".to_string()));
        }
        Ok(())
    }

    // ===== ACCESSORS =====

    pub fn config(&self) -> &AccelConfig {
        &self.config
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Triangles rejected by `triangle_limit`
    pub fn dropped_triangle_count(&self) -> usize {
        self.dropped_triangles
    }

    pub fn is_finalized(&self) -> bool {
        self.flat_structure.is_some()
    }

    /// Flattened tree, available once finalized
    pub fn flat_structure(&self) -> Option<&FlatStructure> {
        self.flat_structure.as_ref()
    }

    /// Buffers handed to the device by `finalize`
    pub fn uploaded_buffers(&self) -> &[Arc<dyn Buffer>] {
        &self.buffers
    }

    // ===== FINALIZATION =====

    /// Build the flat acceleration structure over the current primitives
    ///
    /// Does not change the scene.
    pub fn build_acceleration_structure(&self) -> FlatStructure {
        AccelerationStructure::build(&self.primitives, &self.config)
    }

    /// Build, pack and upload the scene, then bind every payload
    ///
    /// Upload order: primitive counts, primitives, materials, light count,
    /// lights, nodes, contents.
    ///
    /// # Errors
    ///
    /// - `InvalidResource` if the scene is already finalized
    /// - Any error of the graphics device (e.g. `OutOfMemory`); the scene
    ///   then stays unfinalized
    pub fn finalize(&mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        self.ensure_not_finalized()?;

        if self.primitives.is_empty() {
            crate::engine_warn!(SOURCE, "Finalizing a scene without primitives");
        }

        let flat = self.build_acceleration_structure();
        let data = GpuSceneData::pack(&self.primitives, &self.materials, &self.lights);
        let contents = flat.contents_bytes();
        let slots = self.config.bindings;

        let payloads: [(&str, BufferUsage, u32, &[u8]); 7] = [
            ("primitive_counts", BufferUsage::Uniform, slots.primitive_counts, data.counts_bytes()),
            ("primitives", BufferUsage::Storage, slots.primitives, data.primitives_bytes()),
            ("materials", BufferUsage::Storage, slots.materials, data.materials_bytes()),
            ("light_count", BufferUsage::Uniform, slots.light_count, data.light_count_bytes()),
            ("lights", BufferUsage::Storage, slots.lights, data.lights_bytes()),
            ("nodes", BufferUsage::Storage, slots.nodes, flat.nodes_bytes()),
            ("contents", BufferUsage::Storage, slots.contents, contents.as_slice()),
        ];

        // Nothing is bound until every upload succeeded
        let mut uploads = Vec::with_capacity(payloads.len());
        for (name, usage, binding, bytes) in payloads {
            let buffer = device.create_buffer(BufferDesc::for_data(name, usage, bytes), bytes)
                .map_err(|e| {
                    crate::engine_error!(
                        SOURCE,
                        "Failed to upload '{}' ({} bytes): {}",
                        name,
                        bytes.len(),
                        e
                    );
                    e
                })?;
            uploads.push((binding, buffer));
        }

        let mut buffers = Vec::with_capacity(uploads.len());
        for (binding, buffer) in uploads {
            device.bind_buffer(binding, &buffer)?;
            buffers.push(buffer);
        }

        crate::engine_info!(
            SOURCE,
            "Scene finalized: {} primitives, {} lights, {} nodes, {} content entries",
            self.primitives.len(),
            self.lights.len(),
            flat.node_count(),
            flat.content_count()
        );

        self.buffers = buffers;
        self.flat_structure = Some(flat);
        Ok(())
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
