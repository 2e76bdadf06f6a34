//! Bounded list of tagged, categorised posts published during office hours.
//!
//! One query is issued with a page size of `cap + 1`. The single spare row
//! absorbs the exclusion of the current item; it is a fixed margin, not an
//! adaptive one, so a page that still comes back short of the cap is logged.

use site_counts_sdk::prelude::*;
use tracing::{debug, warn};

use crate::TEXT_DOMAIN;

/// Maximum number of titles shown.
pub const DEFAULT_CAP: usize = 5;

/// Filter and cap for the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredListSettings {
    pub tag: String,
    pub category: String,
    pub hours: HourWindow,
    pub cap: usize,
}

impl Default for FilteredListSettings {
    fn default() -> Self {
        Self {
            tag: "foo".into(),
            category: "baz".into(),
            hours: HourWindow::default(),
            cap: DEFAULT_CAP,
        }
    }
}

impl FilteredListSettings {
    /// Rows requested from the executor: the cap plus one for the current item.
    pub fn page_size(&self) -> usize {
        self.cap + 1
    }

    /// Criteria for the single query this list issues.
    pub fn criteria(&self) -> QueryCriteria {
        QueryCriteria {
            item_type: "post".into(),
            page_size: self.page_size(),
            status: ItemStatus::Published,
            hours: self.hours,
            tag: self.tag.clone(),
            category: self.category.clone(),
            hints: QueryHints {
                count_total: false,
                prime_meta_cache: false,
                prime_term_cache: false,
            },
        }
    }
}

/// Walk `items` in order, skipping `current`, and keep at most `cap` titles.
///
/// Stops pulling from the iterator as soon as the cap is reached.
pub fn select_titles<I>(items: I, current: Option<&ItemId>, cap: usize) -> Vec<String>
where
    I: IntoIterator<Item = ContentItem>,
{
    items
        .into_iter()
        .filter(|item| current != Some(&item.id))
        .take(cap)
        .map(|item| item.title)
        .collect()
}

/// Header and list elements, or `None` when nothing was accepted.
pub async fn render(
    services: &RenderServices<'_>,
    settings: &FilteredListSettings,
    ctx: &RenderContext,
) -> Option<(RenderElement, RenderElement)> {
    let criteria = settings.criteria();
    let results = match services.host.query(&criteria).await {
        Ok(results) => results,
        Err(e) => {
            warn!(error = %e, tag = %settings.tag, category = %settings.category, "filtered list query failed");
            return None;
        }
    };

    let returned = results.len();
    let titles = select_titles(results, ctx.current_item.as_ref(), settings.cap);
    debug!(returned, accepted = titles.len(), "filtered list selected");

    if returned == criteria.page_size && titles.len() < settings.cap {
        warn!(
            returned,
            accepted = titles.len(),
            cap = settings.cap,
            "filtered list under-filled a full page; more matches may exist beyond it"
        );
    }

    if titles.is_empty() {
        return None;
    }

    let template = services.translator.translate(
        TEXT_DOMAIN,
        ctx.language.as_deref(),
        "Any {count} posts with the tag of {tag} and the category of {category}",
    );
    let header = interpolate(
        &template,
        &[
            ("count", titles.len().to_string().as_str()),
            ("tag", settings.tag.as_str()),
            ("category", settings.category.as_str()),
        ],
    );

    Some((
        render::markup("h2", &header).build(),
        render::item_list(&titles).build(),
    ))
}
