//! Server-rendered block contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::host::Host;
use crate::i18n::Translator;
use crate::render::RenderElement;
use crate::types::RenderContext;

/// A block attribute declared in the block's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    pub name: String,
    /// JSON type name ("string", "boolean", ...).
    #[serde(rename = "type")]
    pub attr_type: String,
}

impl AttributeDefinition {
    pub fn string(name: &str) -> Self {
        Self {
            name: name.into(),
            attr_type: "string".into(),
        }
    }
}

/// Block metadata, as listed to editors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDefinition {
    /// Namespaced name (e.g., "site-counts/site-counts").
    pub name: String,
    pub title: String,
    pub description: String,
    /// Translation text domain for the block's strings.
    pub text_domain: String,
    pub attributes: Vec<AttributeDefinition>,
}

/// Services a block may call while rendering.
pub struct RenderServices<'a> {
    pub host: &'a dyn Host,
    pub translator: &'a dyn Translator,
}

/// A block rendered on the server for every request.
#[async_trait]
pub trait Block: Send + Sync {
    fn definition(&self) -> BlockDefinition;

    /// Build the block's render tree.
    ///
    /// Rendering never fails: sections whose data is unavailable are omitted.
    async fn render(&self, services: &RenderServices<'_>, ctx: &RenderContext) -> RenderElement;
}
