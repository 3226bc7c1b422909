//! 请求参数：平铺的搜索/过滤/排序/分页，以及支持嵌套 AND/OR 的高级搜索。

use crate::builder::SqlBuilder;
use crate::criteria::{
    ConditionValue, Criterion, FilterCriteria, LogicalGroup, LogicalOperator, SearchCriteria,
    SortCriteria,
};
use crate::pagination::PaginationParams;
use serde::{Deserialize, Serialize};

/// 平铺查询参数：`search` 之间是 OR，`filters` 之间是 AND。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    pub search: Vec<SearchCriteria>,
    pub filters: Vec<FilterCriteria>,
    pub sort: Vec<SortCriteria>,
    pub pagination: PaginationParams,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_search(
        &mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<ConditionValue>,
    ) -> &mut Self {
        self.search.push(Criterion::new(field, operator, value));
        self
    }

    pub fn add_filter(
        &mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<ConditionValue>,
    ) -> &mut Self {
        self.filters.push(Criterion::new(field, operator, value));
        self
    }

    /// 排序方向大小写不敏感；不是 `desc` 的一律按升序处理。
    pub fn add_sort(&mut self, field: impl Into<String>, order: &str) -> &mut Self {
        self.sort.push(SortCriteria::new(field, order));
        self
    }

    pub fn set_pagination(&mut self, page: i64, limit: i64) -> &mut Self {
        self.pagination = PaginationParams::new(page, limit);
        self
    }

    pub fn has_search(&self) -> bool {
        !self.search.is_empty()
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn has_sort(&self) -> bool {
        !self.sort.is_empty()
    }

    /// 把搜索条件作为一个 WHERE 片段加入 builder。
    pub fn apply_search(&self, builder: &mut SqlBuilder) {
        if self.has_search() {
            let expr = builder.build_search_conditions(&self.search);
            builder.add_where_condition(expr);
        }
    }

    /// 把过滤条件作为一个 WHERE 片段加入 builder。
    pub fn apply_filters(&self, builder: &mut SqlBuilder) {
        if self.has_filters() {
            let expr = builder.build_filter_conditions(&self.filters);
            builder.add_where_condition(expr);
        }
    }

    /// 返回 ORDER BY 子句；没有排序条件时返回空串。
    pub fn apply_sort(&self, builder: &SqlBuilder, include_prefix: bool) -> String {
        if self.has_sort() {
            return builder.build_order_by_with_prefix(&self.sort, include_prefix);
        }
        String::new()
    }
}

/// 高级查询参数：`search_groups` 之间是 AND，组内按各自的运算符连接。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedQueryParams {
    pub search_groups: Vec<LogicalGroup>,
    pub filters: Vec<FilterCriteria>,
    pub sort: Vec<SortCriteria>,
    pub pagination: PaginationParams,
}

impl AdvancedQueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_search_group(
        &mut self,
        operator: LogicalOperator,
        conditions: Vec<SearchCriteria>,
    ) -> &mut Self {
        self.search_groups.push(LogicalGroup::new(operator, conditions));
        self
    }

    /// 给第 `parent_index` 个顶层分组追加嵌套分组；下标越界时什么也不做。
    pub fn add_nested_search_group(
        &mut self,
        parent_index: usize,
        operator: LogicalOperator,
        conditions: Vec<SearchCriteria>,
    ) -> &mut Self {
        match self.search_groups.get_mut(parent_index) {
            Some(parent) => parent.groups.push(LogicalGroup::new(operator, conditions)),
            None => tracing::debug!(
                parent_index,
                groups = self.search_groups.len(),
                "nested search group parent out of range"
            ),
        }
        self
    }

    pub fn add_filter(
        &mut self,
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<ConditionValue>,
    ) -> &mut Self {
        self.filters.push(Criterion::new(field, operator, value));
        self
    }

    pub fn add_sort(&mut self, field: impl Into<String>, order: &str) -> &mut Self {
        self.sort.push(SortCriteria::new(field, order));
        self
    }

    pub fn set_pagination(&mut self, page: i64, limit: i64) -> &mut Self {
        self.pagination = PaginationParams::new(page, limit);
        self
    }

    pub fn has_search_groups(&self) -> bool {
        !self.search_groups.is_empty()
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn has_sort(&self) -> bool {
        !self.sort.is_empty()
    }

    pub fn apply_advanced_search(&self, builder: &mut SqlBuilder) {
        if self.has_search_groups() {
            let expr = builder.build_advanced_search_conditions(&self.search_groups);
            builder.add_where_condition(expr);
        }
    }

    pub fn apply_filters(&self, builder: &mut SqlBuilder) {
        if self.has_filters() {
            let expr = builder.build_filter_conditions(&self.filters);
            builder.add_where_condition(expr);
        }
    }

    pub fn apply_sort(&self, builder: &SqlBuilder, include_prefix: bool) -> String {
        if self.has_sort() {
            return builder.build_order_by_with_prefix(&self.sort, include_prefix);
        }
        String::new()
    }
}
