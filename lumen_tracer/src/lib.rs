/*!
# Lumen Tracer

CPU side of a real-time GPU raytracer.

This crate collects scene primitives (spheres, triangles, axis-aligned boxes),
builds a spatial acceleration structure over them (BVH or k-d tree), flattens
it into pointer-free arrays and hands every payload to a graphics device at
fixed binding slots for a compute pass to traverse.

## Architecture

- **Geometry**: primitives and axis-aligned bounding boxes
- **Accel**: median-split tree construction and pre-order flattening
- **Scene**: primitive/material/light collection, GPU packing, finalization
- **GraphicsDevice**: upload sink trait implemented by backends
- **Engine**: global logger, scene manager and graphics device singletons
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod geometry;
pub mod accel;
pub mod graphics_device;
pub mod scene;

// Main lumen namespace module
pub mod lumen {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Configuration
    pub use crate::config::{AccelConfig, BindingSlots, ContentLayout, TreeKind, MAX_TREE_DEPTH};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Geometry sub-module
    pub mod geometry {
        pub use crate::geometry::*;
    }

    // Acceleration structure sub-module
    pub mod accel {
        pub use crate::accel::*;
    }

    // Graphics device sub-module
    pub mod device {
        pub use crate::graphics_device::{Buffer, BufferDesc, BufferUsage, GraphicsDevice};
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
