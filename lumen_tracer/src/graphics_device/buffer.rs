/// Buffer trait and buffer descriptor

/// Buffer usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    /// Uniform/constant buffer (small fixed-size records)
    Uniform,
    /// Storage buffer (arrays read by the compute pass)
    Storage,
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
    /// Buffer usage
    pub usage: BufferUsage,
    /// Debug label
    pub name: String,
}

impl BufferDesc {
    /// Descriptor sized for `data`
    pub fn for_data(name: impl Into<String>, usage: BufferUsage, data: &[u8]) -> Self {
        Self {
            size: data.len() as u64,
            usage,
            name: name.into(),
        }
    }
}

/// Buffer resource trait
///
/// Implemented by backend-specific buffer types. Contents are written once
/// at creation; the buffer is released when the last handle is dropped.
pub trait Buffer: Send + Sync {
    /// Size in bytes
    fn size(&self) -> u64;

    /// Usage the buffer was created with
    fn usage(&self) -> BufferUsage;

    /// Debug label
    fn name(&self) -> &str;
}
