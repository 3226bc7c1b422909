//! 条件列表与逻辑分组的编译。
//!
//! 分组按深度优先编译：先是本组的全部直接条件，再是各个嵌套分组，
//! 与它们在请求里的交错顺序无关。参数随文本一起按同样的顺序写入。

use crate::cond::{BuildError, Cond, wrap_join};
use crate::criteria::{Criterion, LogicalGroup};
use crate::string_builder::StringBuilder;

impl Cond<'_> {
    /// 搜索条件：OR 连接并加一层括号，如 `(a = ? OR b LIKE ?)`。
    pub fn build_disjunction(&mut self, conditions: &[Criterion]) -> String {
        self.disjunction_with(conditions, false).unwrap_or_default()
    }

    /// 过滤条件：AND 连接，不加括号（位于 WHERE 顶层）。
    pub fn build_conjunction(&mut self, conditions: &[Criterion]) -> String {
        self.conjunction_with(conditions, false).unwrap_or_default()
    }

    /// 编译一个逻辑分组；没有任何有效子节点时返回空串。
    pub fn build_group(&mut self, group: &LogicalGroup) -> String {
        self.group_with(group, false).unwrap_or_default()
    }

    /// 编译多个顶层分组，始终用 AND 连接，与各分组自身的运算符无关。
    pub fn build_groups(&mut self, groups: &[LogicalGroup]) -> String {
        self.groups_with(groups, false).unwrap_or_default()
    }

    pub fn try_build_disjunction(
        &mut self,
        conditions: &[Criterion],
    ) -> Result<String, BuildError> {
        self.atomic(|c| c.disjunction_with(conditions, true))
    }

    pub fn try_build_conjunction(
        &mut self,
        conditions: &[Criterion],
    ) -> Result<String, BuildError> {
        self.atomic(|c| c.conjunction_with(conditions, true))
    }

    pub fn try_build_group(&mut self, group: &LogicalGroup) -> Result<String, BuildError> {
        self.atomic(|c| c.group_with(group, true))
    }

    pub fn try_build_groups(&mut self, groups: &[LogicalGroup]) -> Result<String, BuildError> {
        self.atomic(|c| c.groups_with(groups, true))
    }

    /// 出错时把参数回滚到调用前的长度。
    fn atomic(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<String, BuildError>,
    ) -> Result<String, BuildError> {
        let mark = self.args().len();
        let res = f(self);
        if res.is_err() {
            self.truncate_args(mark);
        }
        res
    }

    fn compile_all(
        &mut self,
        conditions: &[Criterion],
        strict: bool,
    ) -> Result<Vec<String>, BuildError> {
        conditions
            .iter()
            .map(|c| self.build_with(c, strict))
            .collect()
    }

    fn disjunction_with(
        &mut self,
        conditions: &[Criterion],
        strict: bool,
    ) -> Result<String, BuildError> {
        let exprs = self.compile_all(conditions, strict)?;
        Ok(wrap_join(exprs, " OR "))
    }

    fn conjunction_with(
        &mut self,
        conditions: &[Criterion],
        strict: bool,
    ) -> Result<String, BuildError> {
        let exprs = self.compile_all(conditions, strict)?;
        let mut buf = StringBuilder::new();
        buf.write_strings(&exprs, " AND ");
        Ok(buf.into_string())
    }

    fn group_with(&mut self, group: &LogicalGroup, strict: bool) -> Result<String, BuildError> {
        let mut exprs = self.compile_all(&group.conditions, strict)?;
        for nested in &group.groups {
            let expr = self.group_with(nested, strict)?;
            if !expr.is_empty() {
                exprs.push(format!("({expr})"));
            }
        }
        Ok(wrap_join(exprs, &format!(" {} ", group.operator)))
    }

    fn groups_with(&mut self, groups: &[LogicalGroup], strict: bool) -> Result<String, BuildError> {
        let mut exprs = Vec::with_capacity(groups.len());
        for group in groups {
            exprs.push(self.group_with(group, strict)?);
        }
        let mut buf = StringBuilder::new();
        buf.write_strings(&exprs, " AND ");
        Ok(buf.into_string())
    }
}
