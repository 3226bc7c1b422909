//! ORDER BY 子句。

use crate::criteria::SortCriteria;
use crate::string_builder::StringBuilder;

/// 构建 `ORDER BY a ASC, b DESC`；`include_prefix` 为 false 时不带 `ORDER BY `。
/// 排序列表为空时总是返回空串。
pub fn build_order_by(sort: &[SortCriteria], include_prefix: bool) -> String {
    if sort.is_empty() {
        return String::new();
    }

    let clauses: Vec<String> = sort
        .iter()
        .map(|s| format!("{} {}", s.field, s.order.as_sql()))
        .collect();

    let mut buf = StringBuilder::new();
    if include_prefix {
        buf.write_str("ORDER BY ");
    }
    buf.write_strings(&clauses, ", ");
    buf.into_string()
}
