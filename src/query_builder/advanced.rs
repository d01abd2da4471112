//! The compiled form of a [`QueryBuilder`](super::QueryBuilder).
//!
//! Clauses are applied in a fixed order: business/shop scope, filters, time
//! ranges, set membership, grouping and ordering, then paging.

use super::conditions::Condition;
use super::filters::{FilterSpec, SetMembership, TimeRange};
use super::options::{QueryOptions, SortDirection};
use super::params::QueryParam;
use super::select::SelectQuery;
use crate::constants::columns;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvancedQuery {
    options: QueryOptions,
    filters: Vec<FilterSpec>,
    time_ranges: BTreeMap<String, TimeRange>,
    set_memberships: BTreeMap<String, SetMembership>,
}

impl AdvancedQuery {
    pub fn new(options: QueryOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    pub(crate) fn options_mut(&mut self) -> &mut QueryOptions {
        &mut self.options
    }

    pub fn filters(&self) -> &[FilterSpec] {
        &self.filters
    }

    pub(crate) fn add_filter(&mut self, filter: FilterSpec) {
        self.filters.push(filter);
    }

    /// Registers (or replaces) the range for its field
    pub(crate) fn add_time_range(&mut self, range: TimeRange) {
        self.time_ranges.insert(range.field.clone(), range);
    }

    /// Registers (or replaces) the tokens for its field
    pub(crate) fn add_set_membership(&mut self, membership: SetMembership) {
        self.set_memberships
            .insert(membership.field.clone(), membership);
    }

    fn apply_business_and_shop(&self, mut query: SelectQuery) -> SelectQuery {
        let options = &self.options;
        if options.exclude_business_and_shop {
            return query;
        }

        if !options.exclude_business && (options.business_id > 0 || options.include_business_id_zero)
        {
            let field = format!("{}{}", options.table_prefix, columns::BUSINESS_ID);
            query = query.where_eq(&field, Value::from(options.business_id));
        }

        if !options.exclude_shop && options.shop_id > 0 {
            let field = format!("{}{}", options.table_prefix, columns::SHOP_ID);
            query = query.where_eq(&field, Value::from(options.shop_id));
        }

        query
    }

    fn apply_filters(&self, query: SelectQuery) -> SelectQuery {
        self.filters
            .iter()
            .filter_map(FilterSpec::to_condition)
            .fold(query, SelectQuery::where_condition)
    }

    fn apply_time_ranges(&self, query: SelectQuery) -> SelectQuery {
        self.time_ranges
            .values()
            .map(TimeRange::to_condition)
            .fold(query, SelectQuery::where_condition)
    }

    fn apply_set_memberships(&self, query: SelectQuery) -> SelectQuery {
        let strategy = query.dialect().set_membership();
        let conditions: Vec<Condition> = self
            .set_memberships
            .values()
            .filter_map(|membership| membership.to_condition(strategy))
            .collect();
        conditions
            .into_iter()
            .fold(query, SelectQuery::where_condition)
    }

    fn apply_group_and_order(&self, mut query: SelectQuery) -> SelectQuery {
        let options = &self.options;
        if !options.group_by.is_empty() {
            query = query.group_by(&options.group_by);
        }

        if !options.disable_order_by && !options.by.is_empty() {
            let field = format!("{}{}", options.table_prefix, options.by);
            query = query.order_by(&field, SortDirection::from_order(&options.order));
        }

        query
    }

    /// Offset 0 is indistinguishable from unset and is not written
    fn apply_pagination(&self, mut query: SelectQuery) -> SelectQuery {
        if self.options.limit > 0 {
            query = query.limit(self.options.limit as u64);
        }
        if self.options.offset > 0 {
            query = query.offset(self.options.offset as u64);
        }
        query
    }
}

impl QueryParam for AdvancedQuery {
    fn apply(&self, query: SelectQuery) -> SelectQuery {
        debug!(
            table = query.table(),
            dialect = %query.dialect(),
            filters = self.filters.len(),
            time_ranges = self.time_ranges.len(),
            set_memberships = self.set_memberships.len(),
            "Compiling advanced query"
        );

        let query = self.apply_business_and_shop(query);
        let query = self.apply_filters(query);
        let query = self.apply_time_ranges(query);
        let query = self.apply_set_memberships(query);
        let query = self.apply_group_and_order(query);
        self.apply_pagination(query)
    }
}
