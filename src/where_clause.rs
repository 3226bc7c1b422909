//! WhereClause：按顺序收集独立编译的 WHERE 片段，最终用 AND 连接。

use crate::string_builder::{StringBuilder, filter_empty_strings};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WhereClause {
    and_exprs: Vec<String>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// AddWhereExpr：追加片段；空片段被忽略，避免产生多余的 `AND`。
    pub fn add_where_expr<I, S>(&mut self, exprs: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let exprs = filter_empty_strings(exprs.into_iter().map(Into::into).collect());
        self.and_exprs.extend(exprs);
    }

    pub fn exprs(&self) -> &[String] {
        &self.and_exprs
    }

    pub fn is_empty(&self) -> bool {
        self.and_exprs.is_empty()
    }

    pub fn clear(&mut self) {
        self.and_exprs.clear();
    }

    /// 构建 `WHERE a AND b`；`include_prefix` 为 false 时不带 `WHERE `。
    /// 没有片段时总是返回空串。
    pub fn build(&self, include_prefix: bool) -> String {
        let mut body = StringBuilder::new();
        body.write_strings(&self.and_exprs, " AND ");
        if body.is_empty() {
            return String::new();
        }

        let mut buf = StringBuilder::new();
        if include_prefix {
            buf.write_str("WHERE ");
        }
        buf.write_str(&body.into_string());
        buf.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::WhereClause;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_renders_nothing() {
        let wc = WhereClause::new();
        assert_eq!(wc.build(true), "");
        assert_eq!(wc.build(false), "");
    }

    #[test]
    fn blank_exprs_are_dropped() {
        let mut wc = WhereClause::new();
        wc.add_where_expr(["", ""]);
        assert!(wc.is_empty());
        assert_eq!(wc.build(true), "");
    }

    #[test]
    fn joins_with_and() {
        let mut wc = WhereClause::new();
        wc.add_where_expr(["(a = ? OR b = ?)"]);
        wc.add_where_expr(["", "c > ?"]);
        assert_eq!(wc.build(true), "WHERE (a = ? OR b = ?) AND c > ?");
        assert_eq!(wc.build(false), "(a = ? OR b = ?) AND c > ?");
        assert_eq!(wc.exprs().len(), 2);
    }

    #[test]
    fn clear_resets() {
        let mut wc = WhereClause::new();
        wc.add_where_expr(["a = ?"]);
        wc.clear();
        assert_eq!(wc.build(true), "");
    }
}
