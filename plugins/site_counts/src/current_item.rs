//! Label naming the item currently being viewed.

use site_counts_sdk::prelude::*;

use crate::TEXT_DOMAIN;

/// `The current post ID is {id}`; the id is empty when nothing is viewed.
pub fn label(translator: &dyn Translator, ctx: &RenderContext) -> String {
    let template = translator.translate(
        TEXT_DOMAIN,
        ctx.language.as_deref(),
        "The current post ID is {id}",
    );
    let id = ctx
        .current_item
        .as_ref()
        .map(ItemId::as_str)
        .unwrap_or_default();
    interpolate(&template, &[("id", id)])
}
