//! halo-query-builder：把搜索/过滤/排序/分页请求编译成参数化 SQL 片段。

pub mod args;
pub mod builder;
pub mod cond;
pub mod criteria;
mod group;
pub mod operator;
pub mod options;
pub mod order_by;
pub mod pagination;
pub mod query_params;
mod string_builder;
pub mod value;
pub mod where_clause;

pub use crate::args::{Args, PLACEHOLDER};
pub use crate::builder::SqlBuilder;
pub use crate::cond::{BuildError, Cond};
pub use crate::criteria::{
    ConditionValue, Criterion, FilterCriteria, LogicalGroup, LogicalOperator, SearchCriteria,
    SortCriteria, SortOrder, UnknownLogicalOperator, create_filter_condition,
    create_search_condition, create_search_group,
};
pub use crate::operator::{Arity, Operator, Transform, UnknownOperator};
pub use crate::options::{
    DefaultIRegexModeGuard, IRegexMode, default_iregex_mode, set_default_iregex_mode,
    set_default_iregex_mode_scoped,
};
pub use crate::order_by::build_order_by;
pub use crate::pagination::{
    DEFAULT_LIMIT, DEFAULT_PAGE, PaginationMeta, PaginationParams, calculate_pagination_meta,
};
pub use crate::query_params::{AdvancedQueryParams, QueryParams};
pub use crate::value::SqlValue;
pub use crate::where_clause::WhereClause;

/// 便捷命名空间：允许 `use halo_space::query::{...}` 形式导入。
pub mod query {
    pub use crate::*;
}
