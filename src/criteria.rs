//! 请求侧的条件、排序与逻辑分组类型。

use crate::operator::Operator;
use crate::value::SqlValue;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 条件值：缺省、单值或列表值。
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum ConditionValue {
    #[default]
    Absent,
    Single(SqlValue),
    List(Vec<SqlValue>),
}

impl ConditionValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn as_list(&self) -> Option<&[SqlValue]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }
}

/// 嵌入通配符模式时的文本：缺省为空串，列表为 `[a b c]`。
impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Single(v) => write!(f, "{v}"),
            Self::List(vs) => {
                f.write_str("[")?;
                for (i, v) in vs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for ConditionValue {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Absent => s.serialize_none(),
            Self::Single(v) => v.serialize(s),
            Self::List(vs) => {
                let mut seq = s.serialize_seq(Some(vs.len()))?;
                for v in vs {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
        }
    }
}

impl From<serde_json::Value> for ConditionValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Absent,
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(SqlValue::from).collect())
            }
            other => Self::Single(other.into()),
        }
    }
}

macro_rules! impl_single_from {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for ConditionValue {
                fn from(v: $t) -> Self {
                    Self::Single(v.into())
                }
            }
        )*
    };
}

impl_single_from!(
    SqlValue,
    bool,
    i32,
    i64,
    u32,
    u64,
    f64,
    String,
    &'static str,
    time::OffsetDateTime,
);

impl From<()> for ConditionValue {
    fn from(_: ()) -> Self {
        Self::Absent
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for ConditionValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => Self::Single(v.into()),
            None => Self::Absent,
        }
    }
}

impl<T: Into<SqlValue>> From<Vec<T>> for ConditionValue {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<SqlValue>, const N: usize> From<[T; N]> for ConditionValue {
    fn from(v: [T; N]) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

/// 单个搜索/过滤条件。
///
/// `operator` 保留请求中的原始名字：未知名字不会在反序列化时报错，
/// 而是在编译时被跳过。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub field: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub value: ConditionValue,
}

/// 搜索条件（OR 组合）。
pub type SearchCriteria = Criterion;
/// 过滤条件（AND 组合）。
pub type FilterCriteria = Criterion;

impl Criterion {
    pub fn new(
        field: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<ConditionValue>,
    ) -> Self {
        Self {
            field: field.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// 已注册的运算符；未知名字返回 `None`。
    pub fn operator(&self) -> Option<Operator> {
        Operator::from_name(&self.operator)
    }
}

/// CreateSearchCondition。
pub fn create_search_condition(
    field: impl Into<String>,
    operator: impl Into<String>,
    value: impl Into<ConditionValue>,
) -> SearchCriteria {
    Criterion::new(field, operator, value)
}

/// CreateFilterCondition。
pub fn create_filter_condition(
    field: impl Into<String>,
    operator: impl Into<String>,
    value: impl Into<ConditionValue>,
) -> FilterCriteria {
    Criterion::new(field, operator, value)
}

/// 排序方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// 宽松解析：只有大小写不敏感的 `desc` 是降序，其余一律升序。
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl From<String> for SortOrder {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

/// `null` 按升序处理。
impl From<Option<String>> for SortOrder {
    fn from(s: Option<String>) -> Self {
        s.map(Self::from).unwrap_or_default()
    }
}

impl From<&str> for SortOrder {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<SortOrder> for String {
    fn from(o: SortOrder) -> Self {
        match o {
            SortOrder::Asc => "asc".to_string(),
            SortOrder::Desc => "desc".to_string(),
        }
    }
}

/// 排序条件。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriteria {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortCriteria {
    pub fn new(field: impl Into<String>, order: impl Into<SortOrder>) -> Self {
        Self {
            field: field.into(),
            order: order.into(),
        }
    }
}

/// 逻辑分组的连接符。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

impl LogicalOperator {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown logical operator `{0}`, expected AND or OR")]
pub struct UnknownLogicalOperator(pub String);

impl FromStr for LogicalOperator {
    type Err = UnknownLogicalOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("and") {
            Ok(Self::And)
        } else if s.eq_ignore_ascii_case("or") {
            Ok(Self::Or)
        } else {
            Err(UnknownLogicalOperator(s.to_string()))
        }
    }
}

impl TryFrom<String> for LogicalOperator {
    type Error = UnknownLogicalOperator;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LogicalOperator> for String {
    fn from(op: LogicalOperator) -> Self {
        op.as_str().to_string()
    }
}

/// 逻辑分组：直接条件 + 嵌套分组。子节点按值持有，不可能成环。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogicalGroup {
    #[serde(default)]
    pub operator: LogicalOperator,
    #[serde(default)]
    pub conditions: Vec<SearchCriteria>,
    #[serde(default)]
    pub groups: Vec<LogicalGroup>,
}

impl LogicalGroup {
    pub fn new(operator: LogicalOperator, conditions: Vec<SearchCriteria>) -> Self {
        Self {
            operator,
            conditions,
            groups: Vec::new(),
        }
    }

    pub fn and(conditions: Vec<SearchCriteria>) -> Self {
        Self::new(LogicalOperator::And, conditions)
    }

    pub fn or(conditions: Vec<SearchCriteria>) -> Self {
        Self::new(LogicalOperator::Or, conditions)
    }

    /// 追加一个嵌套分组。
    pub fn group(mut self, group: LogicalGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.groups.is_empty()
    }
}

/// CreateSearchGroup。
pub fn create_search_group(
    operator: LogicalOperator,
    conditions: impl IntoIterator<Item = SearchCriteria>,
) -> LogicalGroup {
    LogicalGroup::new(operator, conditions.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::{
        ConditionValue, Criterion, LogicalGroup, LogicalOperator, SortCriteria, SortOrder,
    };
    use crate::operator::Operator;
    use crate::value::SqlValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn sort_order_is_permissive() {
        assert_eq!(SortOrder::parse("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("DESC"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("Desc"), SortOrder::Desc);
        assert_eq!(SortOrder::parse("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::parse("descending"), SortOrder::Asc);
        assert_eq!(SortOrder::parse(""), SortOrder::Asc);
    }

    #[test]
    fn logical_operator_parse_ignores_case() {
        assert_eq!("and".parse::<LogicalOperator>(), Ok(LogicalOperator::And));
        assert_eq!("Or".parse::<LogicalOperator>(), Ok(LogicalOperator::Or));
        assert!("xor".parse::<LogicalOperator>().is_err());
    }

    #[test]
    fn condition_value_from_json() {
        assert_eq!(ConditionValue::from(json!(null)), ConditionValue::Absent);
        assert_eq!(
            ConditionValue::from(json!([1, "a"])),
            ConditionValue::List(vec![SqlValue::I64(1), SqlValue::from("a")])
        );
        assert_eq!(
            ConditionValue::from(json!("x")),
            ConditionValue::Single(SqlValue::from("x"))
        );
    }

    #[test]
    fn condition_value_display() {
        assert_eq!(ConditionValue::Absent.to_string(), "");
        assert_eq!(ConditionValue::from("abc").to_string(), "abc");
        assert_eq!(ConditionValue::from(vec![1, 2]).to_string(), "[1 2]");
    }

    #[test]
    fn criterion_deserialize_keeps_unknown_operator() {
        let c: Criterion =
            serde_json::from_value(json!({"field": "a", "operator": "between"})).unwrap();
        assert_eq!(c.operator, "between");
        assert_eq!(c.operator(), None);
        assert_eq!(c.value, ConditionValue::Absent);
    }

    #[test]
    fn criterion_without_operator_is_skippable() {
        let c: Criterion = serde_json::from_value(json!({"field": "a", "value": 1})).unwrap();
        assert_eq!(c.operator, "");
        assert_eq!(c.operator(), None);
    }

    #[test]
    fn null_sort_order_is_ascending() {
        let s: SortCriteria =
            serde_json::from_value(json!({"field": "id", "order": null})).unwrap();
        assert_eq!(s.order, SortOrder::Asc);
        let s: SortCriteria = serde_json::from_value(json!({"field": "id"})).unwrap();
        assert_eq!(s.order, SortOrder::Asc);
    }

    #[test]
    fn criterion_accepts_typed_operator() {
        let c = Criterion::new("status", Operator::In, vec!["a", "b"]);
        assert_eq!(c.operator, "in");
        assert_eq!(c.operator(), Some(Operator::In));
    }

    #[test]
    fn group_deserialize_nested() {
        let g: LogicalGroup = serde_json::from_value(json!({
            "operator": "and",
            "conditions": [{"field": "title", "operator": "eq", "value": "test"}],
            "groups": [{"operator": "OR", "conditions": []}]
        }))
        .unwrap();
        assert_eq!(g.operator, LogicalOperator::And);
        assert_eq!(g.groups.len(), 1);
        assert_eq!(g.groups[0].operator, LogicalOperator::Or);
        assert!(g.groups[0].is_empty());
    }

    #[test]
    fn group_rejects_unknown_logical_operator() {
        let r = serde_json::from_value::<LogicalGroup>(json!({"operator": "xor"}));
        assert!(r.is_err());
    }

    #[test]
    fn sort_criteria_serde() {
        let s: SortCriteria =
            serde_json::from_value(json!({"field": "id", "order": "DESC"})).unwrap();
        assert_eq!(s, SortCriteria::new("id", SortOrder::Desc));
        assert_eq!(
            serde_json::to_value(&s).unwrap(),
            json!({"field": "id", "order": "desc"})
        );
    }
}
