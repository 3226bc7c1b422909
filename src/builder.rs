//! SqlBuilder：一次查询的 WHERE 片段与绑定参数累加器。

use crate::args::Args;
use crate::cond::{BuildError, Cond};
use crate::criteria::{FilterCriteria, LogicalGroup, SearchCriteria, SortCriteria};
use crate::options::{IRegexMode, default_iregex_mode};
use crate::order_by::build_order_by;
use crate::value::SqlValue;
use crate::where_clause::WhereClause;

/// 收集 WHERE 片段和共享参数序列。
///
/// 所有 `build_*` 调用都往同一个参数序列里追加，顺序与各片段中 `?` 的出现
/// 顺序一致；把片段按 `add_where_condition` 的顺序拼接后，`params()` 可以直接
/// 按位置绑定。不支持并发修改：每条查询使用独立的 builder。
#[derive(Debug, Clone, PartialEq)]
pub struct SqlBuilder {
    where_clause: WhereClause,
    args: Args,
    iregex: IRegexMode,
}

impl Default for SqlBuilder {
    fn default() -> Self {
        Self {
            where_clause: WhereClause::new(),
            args: Args::new(),
            iregex: default_iregex_mode(),
        }
    }
}

impl SqlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_iregex_mode(&mut self, mode: IRegexMode) -> IRegexMode {
        let old = self.iregex;
        self.iregex = mode;
        old
    }

    pub fn iregex_mode(&self) -> IRegexMode {
        self.iregex
    }

    /// 基于本 builder 参数序列的 Cond，用于手写条件。
    pub fn cond(&mut self) -> Cond<'_> {
        Cond::new(&mut self.args).with_iregex_mode(self.iregex)
    }

    /// BuildSearchConditions：OR 逻辑，结果带括号。
    pub fn build_search_conditions(&mut self, search: &[SearchCriteria]) -> String {
        self.cond().build_disjunction(search)
    }

    /// BuildFilterConditions：AND 逻辑，结果不带括号。
    pub fn build_filter_conditions(&mut self, filters: &[FilterCriteria]) -> String {
        self.cond().build_conjunction(filters)
    }

    /// BuildAdvancedSearchConditions：每个顶层分组独立编译后用 AND 连接。
    pub fn build_advanced_search_conditions(&mut self, groups: &[LogicalGroup]) -> String {
        self.cond().build_groups(groups)
    }

    /// 编译单个条件（未知运算符等情况返回空串）。
    pub fn build_condition(&mut self, criterion: &SearchCriteria) -> String {
        self.cond().build(criterion)
    }

    pub fn try_build_search_conditions(
        &mut self,
        search: &[SearchCriteria],
    ) -> Result<String, BuildError> {
        self.cond().try_build_disjunction(search)
    }

    pub fn try_build_filter_conditions(
        &mut self,
        filters: &[FilterCriteria],
    ) -> Result<String, BuildError> {
        self.cond().try_build_conjunction(filters)
    }

    pub fn try_build_advanced_search_conditions(
        &mut self,
        groups: &[LogicalGroup],
    ) -> Result<String, BuildError> {
        self.cond().try_build_groups(groups)
    }

    pub fn try_build_condition(
        &mut self,
        criterion: &SearchCriteria,
    ) -> Result<String, BuildError> {
        self.cond().try_build(criterion)
    }

    /// BuildOrderBy，带 `ORDER BY ` 前缀。
    pub fn build_order_by(&self, sort: &[SortCriteria]) -> String {
        build_order_by(sort, true)
    }

    pub fn build_order_by_with_prefix(
        &self,
        sort: &[SortCriteria],
        include_prefix: bool,
    ) -> String {
        build_order_by(sort, include_prefix)
    }

    /// AddWhereCondition：空串被忽略。
    pub fn add_where_condition(&mut self, condition: impl Into<String>) {
        let condition = condition.into();
        if condition.is_empty() {
            return;
        }
        tracing::trace!(fragment = %condition, "add where condition");
        self.where_clause.add_where_expr([condition]);
    }

    /// GetWhereClause，带 `WHERE ` 前缀；没有条件时返回空串。
    pub fn where_clause(&self) -> String {
        self.where_clause.build(true)
    }

    pub fn where_clause_with_prefix(&self, include_prefix: bool) -> String {
        self.where_clause.build(include_prefix)
    }

    /// GetParams：按占位符顺序排列的全部参数。
    pub fn params(&self) -> &[SqlValue] {
        self.args.values()
    }

    pub fn into_params(self) -> Vec<SqlValue> {
        self.args.into_values()
    }

    /// 还没有任何 WHERE 片段。
    pub fn is_empty(&self) -> bool {
        self.where_clause.is_empty()
    }
}
