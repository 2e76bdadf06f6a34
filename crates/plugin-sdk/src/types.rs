//! Core types shared between blocks and the host.
//!
//! Everything here is plain data: the host produces it, blocks read it.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque item identifier.
///
/// Hosts key items by integers, UUIDs or slugs; blocks only ever compare
/// identifiers for equality and print them, so the string form is canonical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for ItemId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<Uuid> for ItemId {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}

/// A content type as exposed by the host registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentType {
    /// Machine name (e.g., "post", "page").
    pub name: String,

    /// Label used for zero or many items ("Posts").
    pub plural_label: String,

    /// Label used for exactly one item ("Post").
    pub singular_label: String,

    /// Whether the type is publicly visible.
    #[serde(default = "default_public")]
    pub public: bool,
}

fn default_public() -> bool {
    true
}

impl ContentType {
    pub fn new(
        name: impl Into<String>,
        singular_label: impl Into<String>,
        plural_label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            plural_label: plural_label.into(),
            singular_label: singular_label.into(),
            public: true,
        }
    }

    /// Mark the type as hidden from public listings.
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }
}

/// A single result row from the query executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: ItemId,
    pub title: String,
}

impl ContentItem {
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Publication status filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Published,
    Unpublished,
}

impl ItemStatus {
    /// Numeric status as stored by the host (1 = published).
    pub fn as_i16(self) -> i16 {
        match self {
            ItemStatus::Published => 1,
            ItemStatus::Unpublished => 0,
        }
    }
}

/// Inclusive hour-of-day window (`0..=23`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub from: u32,
    pub to: u32,
}

impl HourWindow {
    /// Build a window, returning `None` unless `from <= to <= 23`.
    pub fn new(from: u32, to: u32) -> Option<Self> {
        (from <= to && to <= 23).then_some(Self { from, to })
    }

    pub fn contains(&self, hour: u32) -> bool {
        (self.from..=self.to).contains(&hour)
    }
}

impl Default for HourWindow {
    /// Office hours, 09:00 through 17:59.
    fn default() -> Self {
        Self { from: 9, to: 17 }
    }
}

/// Performance hints passed to the executor.
///
/// These may change how much work the host does, never which items come back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryHints {
    /// Compute the total number of matches beyond the page.
    pub count_total: bool,
    /// Warm the per-item metadata cache for the returned rows.
    pub prime_meta_cache: bool,
    /// Warm the per-item term cache for the returned rows.
    pub prime_term_cache: bool,
}

/// Structured filter criteria for one bounded query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCriteria {
    pub item_type: String,
    pub page_size: usize,
    pub status: ItemStatus,
    pub hours: HourWindow,
    pub tag: String,
    pub category: String,
    #[serde(default)]
    pub hints: QueryHints,
}

/// Results of one query: an owned, single-pass handle.
///
/// The handle is consumed by iteration. Walking the results again means
/// issuing the query again.
#[derive(Debug, Clone, Default)]
pub struct QueryResults {
    items: Vec<ContentItem>,
    total: Option<u64>,
}

impl QueryResults {
    pub fn new(items: Vec<ContentItem>) -> Self {
        Self { items, total: None }
    }

    /// Attach the total match count (only when `count_total` was requested).
    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }
}

impl IntoIterator for QueryResults {
    type Item = ContentItem;
    type IntoIter = std::vec::IntoIter<ContentItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Attributes stored with a block instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockAttributes {
    /// Extra CSS class chosen in the editor.
    #[serde(rename = "className", default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

/// Per-render context handed to a block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// The item being viewed, if any.
    pub current_item: Option<ItemId>,

    pub attributes: BlockAttributes,

    /// Requested language code (e.g., "fr"). `None` means source strings.
    pub language: Option<String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_current_item(mut self, id: impl Into<ItemId>) -> Self {
        self.current_item = Some(id.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.attributes.class_name = Some(class_name.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}
