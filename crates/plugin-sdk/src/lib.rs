//! Site Counts Block SDK
//!
//! Types, traits, and render builders for server-rendered blocks.
//! Blocks depend on this crate and read host data only through the
//! traits in [`host`]; the kernel supplies the implementations.

pub mod block;
pub mod host;
pub mod host_errors;
pub mod i18n;
pub mod render;
pub mod types;

pub mod prelude {
    pub use crate::block::{AttributeDefinition, Block, BlockDefinition, RenderServices};
    pub use crate::host::{ContentTypeRegistry, Host, ItemQuery, PublishedCounts};
    pub use crate::host_errors::{HostError, HostResult};
    pub use crate::i18n::{SourceStrings, Translator, interpolate};
    pub use crate::render;
    pub use crate::render::RenderElement;
    pub use crate::types::*;
}
