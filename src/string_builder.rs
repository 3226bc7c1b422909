//! 字符串拼接工具：按分隔符连接片段，跳过空片段。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    pub(crate) fn write_char(&mut self, c: char) {
        self.buf.push(c);
    }

    /// 用 `sep` 连接 `items`，空串不参与连接（不会产生多余的分隔符）。
    pub(crate) fn write_strings(&mut self, items: &[String], sep: &str) {
        let mut first_added = false;
        for s in items {
            if s.is_empty() {
                continue;
            }
            if first_added {
                self.buf.push_str(sep);
            }
            self.buf.push_str(s);
            first_added = true;
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}

pub(crate) fn filter_empty_strings(mut ss: Vec<String>) -> Vec<String> {
    ss.retain(|s| !s.is_empty());
    ss
}

#[cfg(test)]
mod tests {
    use super::{StringBuilder, filter_empty_strings};

    #[test]
    fn write_strings_skips_empty() {
        let mut b = StringBuilder::new();
        b.write_strings(
            &["".to_string(), "a".to_string(), "".to_string(), "b".to_string()],
            " AND ",
        );
        assert_eq!(b.into_string(), "a AND b");
    }

    #[test]
    fn filter_empty() {
        let v = filter_empty_strings(vec!["".into(), "x".into()]);
        assert_eq!(v, vec!["x".to_string()]);
    }
}
