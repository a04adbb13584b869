/// GraphicsDevice trait - sink receiving scene payloads and their binding slots

use std::sync::Arc;
use crate::error::Result;
use super::buffer::{Buffer, BufferDesc};

/// Upload sink for a finalized scene
///
/// Implemented by backend-specific devices. Uniform and storage bindings are
/// separate namespaces: binding a uniform buffer at slot 5 does not replace a
/// storage buffer bound at slot 5.
pub trait GraphicsDevice: Send + Sync {
    /// Create a buffer initialized with `data`
    ///
    /// # Arguments
    ///
    /// * `desc` - Buffer descriptor (`desc.size` must hold `data`)
    /// * `data` - Initial contents
    ///
    /// # Errors
    ///
    /// `OutOfMemory` when the device cannot allocate the buffer,
    /// `InvalidResource` when `data` does not fit in `desc.size`.
    fn create_buffer(&mut self, desc: BufferDesc, data: &[u8]) -> Result<Arc<dyn Buffer>>;

    /// Bind `buffer` at `binding` in the namespace of its usage
    fn bind_buffer(&mut self, binding: u32, buffer: &Arc<dyn Buffer>) -> Result<()>;
}
