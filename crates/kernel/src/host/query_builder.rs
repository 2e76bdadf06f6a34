//! SQL for the filtered item query, built with SeaQuery.
//!
//! Items live in `item` (`type`, `status`, `created` unix seconds,
//! `stage_id`, `fields` JSONB). Tags and categories live in `category_tag`
//! and are referenced from `fields.field_tags` / `fields.field_category`
//! as `[{"target_id": "<uuid>"}]`.

use sea_query::{
    Alias, Asterisk, Expr, ExprTrait, Order, PostgresQueryBuilder, Query, SelectStatement,
    SimpleExpr,
};
use site_counts_sdk::types::{ItemStatus, QueryCriteria};

/// Stage whose items are publicly visible.
const LIVE_STAGE: &str = "live";

/// Query builder for one filtered, bounded item query.
pub struct FilteredItemsQuery<'a> {
    criteria: &'a QueryCriteria,
}

impl<'a> FilteredItemsQuery<'a> {
    pub fn new(criteria: &'a QueryCriteria) -> Self {
        Self { criteria }
    }

    /// `SELECT id, title` with every filter, newest first, one page.
    pub fn build(&self) -> String {
        let mut query = Query::select();
        query
            .column((Alias::new("item"), Alias::new("id")))
            .column((Alias::new("item"), Alias::new("title")))
            .from(Alias::new("item"));

        self.add_filters(&mut query);

        query
            .order_by((Alias::new("item"), Alias::new("created")), Order::Desc)
            .order_by((Alias::new("item"), Alias::new("id")), Order::Desc)
            .limit(self.criteria.page_size as u64);

        query.to_string(PostgresQueryBuilder)
    }

    /// `SELECT COUNT(*)` over the same filters, without the page bound.
    pub fn build_count(&self) -> String {
        let mut query = Query::select();
        query.expr(Expr::col(Asterisk).count());
        query.from(Alias::new("item"));

        self.add_filters(&mut query);

        query.to_string(PostgresQueryBuilder)
    }

    fn add_filters(&self, query: &mut SelectStatement) {
        let c = self.criteria;
        query
            .and_where(item_col("type").eq(c.item_type.as_str()))
            .and_where(item_col("status").eq(c.status.as_i16()))
            .and_where(item_col("stage_id").eq(LIVE_STAGE))
            .and_where(Expr::cust(format!(
                "EXTRACT(HOUR FROM to_timestamp(\"item\".\"created\") AT TIME ZONE 'UTC') BETWEEN {} AND {}",
                c.hours.from, c.hours.to
            )))
            .and_where(term_filter("tags", "field_tags", &c.tag))
            .and_where(term_filter("categories", "field_category", &c.category));
    }
}

/// `SELECT COUNT(*)` of published, live items of one type.
pub fn build_published_count(type_name: &str) -> String {
    let mut query = Query::select();
    query
        .expr(Expr::col(Asterisk).count())
        .from(Alias::new("item"))
        .and_where(item_col("type").eq(type_name))
        .and_where(item_col("status").eq(ItemStatus::Published.as_i16()))
        .and_where(item_col("stage_id").eq(LIVE_STAGE));
    query.to_string(PostgresQueryBuilder)
}

/// `SELECT type AS type_name, label, settings` of every content type, by name.
pub fn build_content_types() -> String {
    Query::select()
        .expr_as(Expr::col(Alias::new("type")), Alias::new("type_name"))
        .columns([Alias::new("label"), Alias::new("settings")])
        .from(Alias::new("item_type"))
        .order_by(Alias::new("type"), Order::Asc)
        .to_string(PostgresQueryBuilder)
}

fn item_col(name: &str) -> Expr {
    Expr::col((Alias::new("item"), Alias::new(name)))
}

/// `EXISTS` sub-select matching a term by label within `vocabulary`.
fn term_filter(vocabulary: &str, field: &str, label: &str) -> SimpleExpr {
    let subquery = Query::select()
        .expr(Expr::val(1))
        .from_as(Alias::new("category_tag"), Alias::new("t"))
        .and_where(Expr::col((Alias::new("t"), Alias::new("category_id"))).eq(vocabulary))
        .and_where(Expr::col((Alias::new("t"), Alias::new("label"))).eq(label))
        .and_where(Expr::cust(format!(
            "\"item\".\"fields\" -> '{field}' @> jsonb_build_array(jsonb_build_object('target_id', \"t\".\"id\"::text))"
        )))
        .to_owned();
    Expr::exists(subquery)
}
