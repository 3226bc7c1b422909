//! Cond：把单个 (field, operator, value) 条件编译成参数化谓词。
//!
//! 每个生成 `?` 的地方都紧跟着一次 `Args::add`，所以参数顺序始终与占位符
//! 从左到右的出现顺序一致。

use crate::args::Args;
use crate::criteria::{ConditionValue, Criterion};
use crate::operator::{Arity, Operator};
use crate::options::{IRegexMode, default_iregex_mode};
use crate::string_builder::{StringBuilder, filter_empty_strings};
use crate::value::SqlValue;

/// strict 模式下的编译错误；宽松模式下同样的情况只会让条件被跳过。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("field `{field}`: unknown operator `{operator}`")]
    UnknownOperator { field: String, operator: String },
    #[error("field `{field}`: operator `{operator}` requires a non-empty list")]
    EmptyList { field: String, operator: Operator },
    #[error("field `{field}`: operator `{operator}` requires a list value")]
    ExpectedList { field: String, operator: Operator },
    #[error("field `{field}`: operator `{operator}` requires a scalar value, got a list")]
    ExpectedScalar { field: String, operator: Operator },
    #[error("field `{field}`: operator `{operator}` requires a value")]
    MissingValue { field: String, operator: Operator },
}

/// Cond 提供构造条件表达式的辅助方法，参数写入借用的 `Args`。
#[derive(Debug)]
pub struct Cond<'a> {
    args: &'a mut Args,
    iregex: IRegexMode,
}

impl<'a> Cond<'a> {
    pub fn new(args: &'a mut Args) -> Self {
        Self {
            args,
            iregex: default_iregex_mode(),
        }
    }

    pub fn with_iregex_mode(mut self, mode: IRegexMode) -> Self {
        self.iregex = mode;
        self
    }

    pub fn args(&self) -> &Args {
        &*self.args
    }

    pub(crate) fn truncate_args(&mut self, len: usize) {
        self.args.truncate(len);
    }

    pub fn equal(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.unary(field, Operator::Equal, value.into())
    }

    pub fn not_equal(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.unary(field, Operator::NotEqual, value.into())
    }

    pub fn greater_than(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.unary(field, Operator::GreaterThan, value.into())
    }

    pub fn greater_equal_than(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.unary(field, Operator::GreaterEqualThan, value.into())
    }

    pub fn less_than(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.unary(field, Operator::LessThan, value.into())
    }

    pub fn less_equal_than(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.unary(field, Operator::LessEqualThan, value.into())
    }

    pub fn contains(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.pattern(field, Operator::Contains, &value.into().to_string())
    }

    pub fn icontains(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.pattern(field, Operator::IContains, &value.into().to_string())
    }

    pub fn starts_with(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.pattern(field, Operator::StartsWith, &value.into().to_string())
    }

    pub fn istarts_with(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.pattern(field, Operator::IStartsWith, &value.into().to_string())
    }

    pub fn ends_with(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.pattern(field, Operator::EndsWith, &value.into().to_string())
    }

    pub fn iends_with(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.pattern(field, Operator::IEndsWith, &value.into().to_string())
    }

    /// 调用方自己提供通配符。
    pub fn like(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.unary(field, Operator::Like, value.into())
    }

    pub fn ilike(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.unary(field, Operator::ILike, value.into())
    }

    pub fn full_text(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.unary(field, Operator::FullText, value.into())
    }

    pub fn regex(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.unary(field, Operator::Regex, value.into())
    }

    pub fn iregex(&mut self, field: &str, value: impl Into<SqlValue>) -> String {
        self.unary(field, Operator::IRegex, value.into())
    }

    pub fn is_null(&self, field: &str) -> String {
        format!("{field} IS NULL")
    }

    pub fn is_not_null(&self, field: &str) -> String {
        format!("{field} IS NOT NULL")
    }

    /// 空列表返回空串且不追加参数。
    pub fn in_(
        &mut self,
        field: &str,
        values: impl IntoIterator<Item = impl Into<SqlValue>>,
    ) -> String {
        let values: Vec<SqlValue> = values.into_iter().map(Into::into).collect();
        self.membership(field, Operator::In, values)
    }

    /// 空列表返回空串且不追加参数。
    pub fn not_in(
        &mut self,
        field: &str,
        values: impl IntoIterator<Item = impl Into<SqlValue>>,
    ) -> String {
        let values: Vec<SqlValue> = values.into_iter().map(Into::into).collect();
        self.membership(field, Operator::NotIn, values)
    }

    /// 编译一个请求条件；未知运算符或 IN/NOT IN 取值不匹配时返回空串，不追加任何参数。
    pub fn build(&mut self, criterion: &Criterion) -> String {
        match self.compile(criterion, false) {
            Ok(expr) => expr,
            Err(err) => {
                tracing::debug!(
                    field = %criterion.field,
                    operator = %criterion.operator,
                    error = %err,
                    "skipping condition"
                );
                String::new()
            }
        }
    }

    /// strict 版本的 `build`：把宽松模式会跳过的情况作为错误返回。
    pub fn try_build(&mut self, criterion: &Criterion) -> Result<String, BuildError> {
        self.compile(criterion, true)
    }

    pub(crate) fn build_with(
        &mut self,
        criterion: &Criterion,
        strict: bool,
    ) -> Result<String, BuildError> {
        if strict {
            self.try_build(criterion)
        } else {
            Ok(self.build(criterion))
        }
    }

    /// 任何参数都只在确认条件可编译之后才写入。
    fn compile(&mut self, criterion: &Criterion, strict: bool) -> Result<String, BuildError> {
        let field = criterion.field.as_str();
        let Some(op) = criterion.operator() else {
            return Err(BuildError::UnknownOperator {
                field: field.to_string(),
                operator: criterion.operator.clone(),
            });
        };

        match op.arity() {
            Arity::Nullary => Ok(match op {
                Operator::IsNull => self.is_null(field),
                _ => self.is_not_null(field),
            }),
            Arity::List => match &criterion.value {
                ConditionValue::List(values) if !values.is_empty() => {
                    Ok(self.membership(field, op, values.clone()))
                }
                ConditionValue::List(_) => Err(BuildError::EmptyList {
                    field: field.to_string(),
                    operator: op,
                }),
                _ => Err(BuildError::ExpectedList {
                    field: field.to_string(),
                    operator: op,
                }),
            },
            Arity::Unary => match &criterion.value {
                ConditionValue::Single(v) if op.is_pattern() => {
                    Ok(self.pattern(field, op, &v.to_string()))
                }
                ConditionValue::Single(v) => Ok(self.unary(field, op, v.clone())),
                ConditionValue::Absent if strict => Err(BuildError::MissingValue {
                    field: field.to_string(),
                    operator: op,
                }),
                ConditionValue::Absent if op.is_pattern() => Ok(self.pattern(field, op, "")),
                ConditionValue::Absent => Ok(self.unary(field, op, SqlValue::Null)),
                ConditionValue::List(_) if strict => Err(BuildError::ExpectedScalar {
                    field: field.to_string(),
                    operator: op,
                }),
                value @ ConditionValue::List(_) if op.is_pattern() => {
                    Ok(self.pattern(field, op, &value.to_string()))
                }
                // 整个列表作为一个参数绑定。
                ConditionValue::List(values) => Ok(self.unary(field, op, SqlValue::list(values))),
            },
        }
    }

    fn pattern(&mut self, field: &str, op: Operator, text: &str) -> String {
        let value = op.transform().apply(text);
        self.unary(field, op, SqlValue::from(value))
    }

    fn unary(&mut self, field: &str, op: Operator, value: SqlValue) -> String {
        let ph = self.args.add(value);
        match op {
            Operator::Equal => format!("{field} = {ph}"),
            Operator::NotEqual => format!("{field} != {ph}"),
            Operator::GreaterThan => format!("{field} > {ph}"),
            Operator::GreaterEqualThan => format!("{field} >= {ph}"),
            Operator::LessThan => format!("{field} < {ph}"),
            Operator::LessEqualThan => format!("{field} <= {ph}"),
            Operator::FullText => format!("MATCH({field}) AGAINST({ph} IN NATURAL LANGUAGE MODE)"),
            Operator::Regex => format!("{field} REGEXP {ph}"),
            Operator::IRegex => match self.iregex {
                IRegexMode::Collation => format!("{field} REGEXP {ph}"),
                IRegexMode::Lower => format!("LOWER({field}) REGEXP LOWER({ph})"),
            },
            _ if op.is_case_insensitive() => format!("LOWER({field}) LIKE LOWER({ph})"),
            _ => format!("{field} LIKE {ph}"),
        }
    }

    fn membership(&mut self, field: &str, op: Operator, values: Vec<SqlValue>) -> String {
        if values.is_empty() {
            return String::new();
        }
        let phs = self.args.add_all(values);
        match op {
            Operator::NotIn => format!("{field} NOT IN ({phs})"),
            _ => format!("{field} IN ({phs})"),
        }
    }

    /// 用 OR 连接非空表达式并加括号；全部为空时返回空串。
    pub fn or(&self, exprs: impl IntoIterator<Item = String>) -> String {
        wrap_join(exprs, " OR ")
    }

    /// 用 AND 连接非空表达式并加括号；全部为空时返回空串。
    pub fn and(&self, exprs: impl IntoIterator<Item = String>) -> String {
        wrap_join(exprs, " AND ")
    }
}

pub(crate) fn wrap_join(exprs: impl IntoIterator<Item = String>, sep: &str) -> String {
    let exprs = filter_empty_strings(exprs.into_iter().collect());
    if exprs.is_empty() {
        return String::new();
    }
    let mut buf = StringBuilder::new();
    buf.write_char('(');
    buf.write_strings(&exprs, sep);
    buf.write_char(')');
    buf.into_string()
}
