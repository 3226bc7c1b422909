//! 运算符注册表：封闭的运算符集合，每个运算符对应唯一的谓词模板与取值变换。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 支持的条件运算符（不提供扩展点）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    #[serde(rename = "eq")]
    Equal,
    #[serde(rename = "ne")]
    NotEqual,
    #[serde(rename = "gt")]
    GreaterThan,
    #[serde(rename = "gte")]
    GreaterEqualThan,
    #[serde(rename = "lt")]
    LessThan,
    #[serde(rename = "lte")]
    LessEqualThan,
    Contains,
    #[serde(rename = "icontains")]
    IContains,
    StartsWith,
    #[serde(rename = "istarts_with")]
    IStartsWith,
    EndsWith,
    #[serde(rename = "iends_with")]
    IEndsWith,
    Like,
    #[serde(rename = "ilike")]
    ILike,
    In,
    NotIn,
    IsNull,
    IsNotNull,
    FullText,
    Regex,
    #[serde(rename = "iregex")]
    IRegex,
}

/// 运算符的取值形态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// 不绑定参数（`IS NULL` / `IS NOT NULL`）。
    Nullary,
    /// 绑定一个参数。
    Unary,
    /// 每个元素绑定一个参数（`IN` / `NOT IN`），要求非空列表。
    List,
}

/// 绑定前对取值做的变换。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// 原样绑定。
    Verbatim,
    /// `%v%`
    Wrap,
    /// `v%`
    Prefix,
    /// `%v`
    Suffix,
}

impl Transform {
    /// 把文本按模式包上 `%`；`Verbatim` 原样返回。
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Verbatim => text.to_string(),
            Self::Wrap => format!("%{text}%"),
            Self::Prefix => format!("{text}%"),
            Self::Suffix => format!("%{text}"),
        }
    }
}

impl Operator {
    pub const ALL: [Operator; 21] = [
        Self::Equal,
        Self::NotEqual,
        Self::GreaterThan,
        Self::GreaterEqualThan,
        Self::LessThan,
        Self::LessEqualThan,
        Self::Contains,
        Self::IContains,
        Self::StartsWith,
        Self::IStartsWith,
        Self::EndsWith,
        Self::IEndsWith,
        Self::Like,
        Self::ILike,
        Self::In,
        Self::NotIn,
        Self::IsNull,
        Self::IsNotNull,
        Self::FullText,
        Self::Regex,
        Self::IRegex,
    ];

    /// 请求中使用的运算符名。
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "eq",
            Self::NotEqual => "ne",
            Self::GreaterThan => "gt",
            Self::GreaterEqualThan => "gte",
            Self::LessThan => "lt",
            Self::LessEqualThan => "lte",
            Self::Contains => "contains",
            Self::IContains => "icontains",
            Self::StartsWith => "starts_with",
            Self::IStartsWith => "istarts_with",
            Self::EndsWith => "ends_with",
            Self::IEndsWith => "iends_with",
            Self::Like => "like",
            Self::ILike => "ilike",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::IsNull => "is_null",
            Self::IsNotNull => "is_not_null",
            Self::FullText => "full_text",
            Self::Regex => "regex",
            Self::IRegex => "iregex",
        }
    }

    /// 按名字查找运算符；名字区分大小写，未知名字返回 `None`。
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }

    pub fn arity(self) -> Arity {
        match self {
            Self::IsNull | Self::IsNotNull => Arity::Nullary,
            Self::In | Self::NotIn => Arity::List,
            _ => Arity::Unary,
        }
    }

    pub fn transform(self) -> Transform {
        match self {
            Self::Contains | Self::IContains => Transform::Wrap,
            Self::StartsWith | Self::IStartsWith => Transform::Prefix,
            Self::EndsWith | Self::IEndsWith => Transform::Suffix,
            _ => Transform::Verbatim,
        }
    }

    /// 取值是否会先被格式化成文本（通配符模式）。
    pub fn is_pattern(self) -> bool {
        self.transform() != Transform::Verbatim
    }

    /// 大小写不敏感：字段与占位符都包一层 `LOWER(...)`。
    pub fn is_case_insensitive(self) -> bool {
        matches!(
            self,
            Self::IContains | Self::IStartsWith | Self::IEndsWith | Self::ILike
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator `{0}`")]
pub struct UnknownOperator(pub String);

#[cfg(test)]
mod tests {
    use super::{Arity, Operator, Transform};
    use pretty_assertions::assert_eq;

    #[test]
    fn names_round_trip_through_lookup() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_name(op.as_str()), Some(op));
            assert_eq!(op.as_str().parse::<Operator>(), Ok(op));
        }
    }

    #[test]
    fn serde_names_match_wire_names() {
        for op in Operator::ALL {
            let json = serde_json::to_string(&op).unwrap();
            assert_eq!(json, format!("\"{}\"", op.as_str()));
        }
    }

    #[test]
    fn unknown_names() {
        assert_eq!(Operator::from_name("between"), None);
        assert_eq!(Operator::from_name("EQ"), None);
        assert_eq!(Operator::from_name(""), None);
        assert!("nope".parse::<Operator>().is_err());
    }

    #[test]
    fn wildcard_placement() {
        assert_eq!(Operator::Contains.transform().apply("x"), "%x%");
        assert_eq!(Operator::IContains.transform().apply("x"), "%x%");
        assert_eq!(Operator::StartsWith.transform().apply("x"), "x%");
        assert_eq!(Operator::IStartsWith.transform().apply("x"), "x%");
        assert_eq!(Operator::EndsWith.transform().apply("x"), "%x");
        assert_eq!(Operator::IEndsWith.transform().apply("x"), "%x");
        assert_eq!(Operator::Like.transform(), Transform::Verbatim);
        assert_eq!(Operator::ILike.transform(), Transform::Verbatim);
    }

    #[test]
    fn arity() {
        assert_eq!(Operator::IsNull.arity(), Arity::Nullary);
        assert_eq!(Operator::NotIn.arity(), Arity::List);
        assert_eq!(Operator::FullText.arity(), Arity::Unary);
    }
}
