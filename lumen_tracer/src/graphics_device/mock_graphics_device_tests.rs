/// Unit tests for MockGraphicsDevice and MockBuffer

use super::*;
use serial_test::serial;

fn storage(name: &str, data: &[u8]) -> BufferDesc {
    BufferDesc::for_data(name, BufferUsage::Storage, data)
}

// ============================================================================
// MockBuffer Tests
// ============================================================================

#[test]
fn test_mock_buffer_creation() {
    let buffer = MockBuffer::new(storage("nodes", &[1, 2, 3, 4]), &[1, 2, 3, 4]);
    assert_eq!(buffer.size(), 4);
    assert_eq!(buffer.usage(), BufferUsage::Storage);
    assert_eq!(buffer.name(), "nodes");
    assert_eq!(buffer.data, vec![1, 2, 3, 4]);
}

// ============================================================================
// MockGraphicsDevice Tests
// ============================================================================

#[test]
fn test_create_buffer_records_data() {
    let mut device = MockGraphicsDevice::new();
    let buffer = device.create_buffer(storage("contents", &[9, 8]), &[9, 8]).unwrap();

    assert_eq!(buffer.size(), 2);
    assert_eq!(device.created_buffer_names(), vec!["contents".to_string()]);
    assert_eq!(device.buffer_data("contents"), Some(vec![9, 8]));
    assert_eq!(device.buffer_data("missing"), None);
}

#[test]
fn test_create_buffer_accepts_empty_data() {
    let mut device = MockGraphicsDevice::new();
    let buffer = device.create_buffer(storage("empty", &[]), &[]).unwrap();
    assert_eq!(buffer.size(), 0);
}

#[test]
fn test_create_buffer_rejects_oversized_data() {
    let mut device = MockGraphicsDevice::new();
    let desc = BufferDesc { size: 2, usage: BufferUsage::Uniform, name: "counts".to_string() };
    let result = device.create_buffer(desc, &[0; 16]);
    assert!(matches!(result, Err(Error::InvalidResource(_))));
    assert!(device.created_buffer_names().is_empty());
}

#[test]
fn test_budget_triggers_out_of_memory() {
    let mut device = MockGraphicsDevice::with_budget(100);
    assert!(device.create_buffer(storage("a", &[0; 60]), &[0; 60]).is_ok());
    assert!(device.create_buffer(storage("b", &[0; 40]), &[0; 40]).is_ok());

    let result = device.create_buffer(storage("c", &[0; 1]), &[0; 1]);
    assert!(matches!(result, Err(Error::OutOfMemory)));
    assert_eq!(device.created_buffer_names().len(), 2);
}

#[test]
fn test_clones_share_records() {
    let handle = MockGraphicsDevice::new();
    let mut device = handle.clone();
    device.create_buffer(storage("shared", &[1]), &[1]).unwrap();
    assert_eq!(handle.created_buffer_names(), vec!["shared".to_string()]);
}

#[test]
fn test_bindings_are_namespaced_by_usage() {
    let mut device = MockGraphicsDevice::new();
    let materials = device.create_buffer(storage("materials", &[0; 4]), &[0; 4]).unwrap();
    let light_count = device
        .create_buffer(BufferDesc::for_data("light_count", BufferUsage::Uniform, &[0; 16]), &[0; 16])
        .unwrap();

    device.bind_buffer(5, &materials).unwrap();
    device.bind_buffer(5, &light_count).unwrap();

    assert_eq!(device.binding_count(), 2);
    assert_eq!(device.bound_at(BufferUsage::Storage, 5), Some("materials".to_string()));
    assert_eq!(device.bound_at(BufferUsage::Uniform, 5), Some("light_count".to_string()));
    assert_eq!(device.bound_at(BufferUsage::Storage, 6), None);
}

#[test]
#[serial]
fn test_rebinding_same_slot_fails() {
    let mut device = MockGraphicsDevice::new();
    let a = device.create_buffer(storage("a", &[0; 4]), &[0; 4]).unwrap();
    let b = device.create_buffer(storage("b", &[0; 4]), &[0; 4]).unwrap();

    device.bind_buffer(7, &a).unwrap();
    let result = device.bind_buffer(7, &b);

    assert!(matches!(result, Err(Error::BackendError(_))));
    assert_eq!(device.bound_at(BufferUsage::Storage, 7), Some("a".to_string()));
}
