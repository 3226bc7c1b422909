//! Args：按占位符出现顺序收集绑定参数。

use crate::value::SqlValue;

/// 唯一支持的占位符。
pub const PLACEHOLDER: &str = "?";

/// Args 存储一次查询的全部绑定参数。
///
/// 每次 `add` 都紧跟着一个写入 SQL 文本的 `?`，因此 `values()` 的顺序
/// 与最终 SQL 中占位符从左到右的顺序一致。
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Args {
    values: Vec<SqlValue>,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add：追加一个参数并返回对应的占位符。
    pub fn add(&mut self, value: impl Into<SqlValue>) -> &'static str {
        self.values.push(value.into());
        PLACEHOLDER
    }

    /// AddAll：按顺序追加一组参数，返回 `?, ?, ...`。
    pub fn add_all(&mut self, values: impl IntoIterator<Item = impl Into<SqlValue>>) -> String {
        let mut placeholders = Vec::new();
        for v in values {
            placeholders.push(self.add(v));
        }
        placeholders.join(", ")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn into_values(self) -> Vec<SqlValue> {
        self.values
    }

    /// 回滚到 `len` 个参数（strict 模式下出错时恢复调用前的状态）。
    pub(crate) fn truncate(&mut self, len: usize) {
        self.values.truncate(len);
    }
}
