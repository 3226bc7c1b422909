//! 编译选项：控制 `iregex` 的渲染方式，以及全局默认值。

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, MutexGuard};

/// `iregex` 运算符的渲染方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IRegexMode {
    /// `field REGEXP ?`，与 `regex` 相同，依赖 MySQL 默认排序规则的大小写不敏感。
    #[default]
    Collation,
    /// `LOWER(field) REGEXP LOWER(?)`，用于 REGEXP 默认区分大小写的引擎。
    Lower,
}

static DEFAULT_IREGEX_MODE: AtomicU8 = AtomicU8::new(IRegexMode::Collation as u8);
static DEFAULT_IREGEX_MODE_LOCK: Mutex<()> = Mutex::new(());

impl IRegexMode {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => Self::Lower,
            _ => Self::Collation,
        }
    }

    fn to_u8(self) -> u8 {
        self as u8
    }
}

/// 获取当前全局默认 IRegexMode；新建的 `SqlBuilder` 会取这个值。
pub fn default_iregex_mode() -> IRegexMode {
    IRegexMode::from_u8(DEFAULT_IREGEX_MODE.load(Ordering::Relaxed))
}

/// 设置全局默认 IRegexMode，返回旧值。
pub fn set_default_iregex_mode(mode: IRegexMode) -> IRegexMode {
    let old = DEFAULT_IREGEX_MODE.swap(mode.to_u8(), Ordering::Relaxed);
    IRegexMode::from_u8(old)
}

/// 修改全局默认 IRegexMode 的 RAII guard（持有全局锁，避免并行测试互相干扰）。
pub struct DefaultIRegexModeGuard {
    _lock: MutexGuard<'static, ()>,
    old: IRegexMode,
}

impl Drop for DefaultIRegexModeGuard {
    fn drop(&mut self) {
        set_default_iregex_mode(self.old);
    }
}

/// 在一个作用域内临时设置默认 IRegexMode，退出作用域后自动恢复。
pub fn set_default_iregex_mode_scoped(mode: IRegexMode) -> DefaultIRegexModeGuard {
    let lock = DEFAULT_IREGEX_MODE_LOCK
        .lock()
        .unwrap_or_else(|e| e.into_inner());
    let old = set_default_iregex_mode(mode);
    DefaultIRegexModeGuard { _lock: lock, old }
}

impl fmt::Display for IRegexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Collation => "Collation",
            Self::Lower => "Lower",
        };
        f.write_str(s)
    }
}
