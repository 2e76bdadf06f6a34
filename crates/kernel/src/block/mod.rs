//! Server-rendered blocks known to the kernel.

mod registry;

pub use registry::{BlockError, BlockRegistry, default_registry};
