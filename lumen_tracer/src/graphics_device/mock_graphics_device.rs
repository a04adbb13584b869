/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Records every created buffer with its bytes and every binding, so tests
/// can inspect exactly what a scene uploaded. An optional byte budget makes
/// `create_buffer` fail with `OutOfMemory`.

use std::sync::{Arc, Mutex};
use rustc_hash::FxHashMap;
use crate::graphics_device::{Buffer, BufferDesc, BufferUsage, GraphicsDevice};
use crate::error::{Error, Result};
use crate::engine_bail;

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub name: String,
    pub size: u64,
    pub usage: BufferUsage,
    pub data: Vec<u8>,
}

impl MockBuffer {
    pub fn new(desc: BufferDesc, data: &[u8]) -> Self {
        Self {
            name: desc.name,
            size: desc.size,
            usage: desc.usage,
            data: data.to_vec(),
        }
    }
}

impl Buffer for MockBuffer {
    fn size(&self) -> u64 {
        self.size
    }

    fn usage(&self) -> BufferUsage {
        self.usage
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Recording graphics device
///
/// Clones share the same records, so a test can keep a handle after moving
/// the device into the engine.
#[derive(Clone, Default)]
pub struct MockGraphicsDevice {
    /// Created buffers, in creation order
    pub created_buffers: Arc<Mutex<Vec<Arc<MockBuffer>>>>,
    /// (usage, slot) -> name of the bound buffer
    pub bindings: Arc<Mutex<FxHashMap<(BufferUsage, u32), String>>>,
    /// Maximum total bytes, None = unlimited
    pub budget: Option<u64>,
}

impl MockGraphicsDevice {
    /// Create a new mock device without memory limit
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock device that runs out of memory past `budget` bytes
    pub fn with_budget(budget: u64) -> Self {
        Self {
            budget: Some(budget),
            ..Self::default()
        }
    }

    /// Names of created buffers
    pub fn created_buffer_names(&self) -> Vec<String> {
        self.created_buffers.lock().unwrap()
            .iter()
            .map(|b| b.name.clone())
            .collect()
    }

    /// Bytes of the created buffer named `name`
    pub fn buffer_data(&self, name: &str) -> Option<Vec<u8>> {
        self.created_buffers.lock().unwrap()
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.data.clone())
    }

    /// Name of the buffer bound at (`usage`, `binding`)
    pub fn bound_at(&self, usage: BufferUsage, binding: u32) -> Option<String> {
        self.bindings.lock().unwrap().get(&(usage, binding)).cloned()
    }

    /// Number of bindings made
    pub fn binding_count(&self) -> usize {
        self.bindings.lock().unwrap().len()
    }

    fn allocated_bytes(&self) -> u64 {
        self.created_buffers.lock().unwrap().iter().map(|b| b.size).sum()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc, data: &[u8]) -> Result<Arc<dyn Buffer>> {
        if data.len() as u64 > desc.size {
            return Err(Error::InvalidResource(format!(
                "buffer '{}' holds {} bytes, got {}", desc.name, desc.size, data.len()
            )));
        }
        if let Some(budget) = self.budget {
            if self.allocated_bytes() + desc.size > budget {
                return Err(Error::OutOfMemory);
            }
        }

        let buffer = Arc::new(MockBuffer::new(desc, data));
        self.created_buffers.lock().unwrap().push(Arc::clone(&buffer));
        Ok(buffer)
    }

    fn bind_buffer(&mut self, binding: u32, buffer: &Arc<dyn Buffer>) -> Result<()> {
        let mut bindings = self.bindings.lock().unwrap();
        let key = (buffer.usage(), binding);
        if let Some(existing) = bindings.get(&key) {
            engine_bail!(
                "lumen::MockGraphicsDevice",
                "{:?} binding {} already holds '{}'", key.0, binding, existing
            );
        }
        bindings.insert(key, buffer.name().to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
