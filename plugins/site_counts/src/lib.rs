//! Site Counts block.
//!
//! Renders three sections, in order: published counts per public content
//! type, the id of the item being viewed, and a short list of matching
//! posts that leaves out the current item.

pub mod count_summary;
pub mod current_item;
pub mod filtered_list;

use async_trait::async_trait;
use site_counts_sdk::prelude::*;

pub use filtered_list::FilteredListSettings;

/// Registered block name.
pub const BLOCK_NAME: &str = "site-counts/site-counts";

/// Translation text domain for every string this block renders.
pub const TEXT_DOMAIN: &str = "site-counts";

/// The Site Counts block.
#[derive(Debug, Clone, Default)]
pub struct SiteCountsBlock {
    list: FilteredListSettings,
}

impl SiteCountsBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different filter for the post list.
    pub fn with_list_settings(mut self, list: FilteredListSettings) -> Self {
        self.list = list;
        self
    }
}

#[async_trait]
impl Block for SiteCountsBlock {
    fn definition(&self) -> BlockDefinition {
        BlockDefinition {
            name: BLOCK_NAME.into(),
            title: "Site Counts".into(),
            description: "Published content counts, the current post, and a filtered post list"
                .into(),
            text_domain: TEXT_DOMAIN.into(),
            attributes: vec![AttributeDefinition::string("className")],
        }
    }

    async fn render(&self, services: &RenderServices<'_>, ctx: &RenderContext) -> RenderElement {
        let language = ctx.language.as_deref();

        let mut wrapper = render::container().class("site-counts");
        if let Some(class_name) = ctx
            .attributes
            .class_name
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
        {
            wrapper = wrapper.class(class_name);
        }

        let heading = services
            .translator
            .translate(TEXT_DOMAIN, language, "Post Counts");
        let counts = count_summary::sentences(services, language).await;

        wrapper = wrapper
            .child("counts_heading", render::markup("h2", &heading).weight(0).build())
            .child("counts", render::item_list(&counts).weight(1).build())
            .child(
                "current_item",
                render::markup("p", &current_item::label(services.translator, ctx))
                    .weight(2)
                    .build(),
            );

        if let Some((header, list)) = filtered_list::render(services, &self.list, ctx).await {
            let header = RenderElement {
                weight: Some(3),
                ..header
            };
            let list = RenderElement {
                weight: Some(4),
                ..list
            };
            wrapper = wrapper.child("list_heading", header).child("list", list);
        }

        wrapper.build()
    }
}
