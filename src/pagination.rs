//! 分页参数与分页元数据。

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// 分页参数：`page >= 1`，`limit >= 1`，`offset = (page - 1) * limit`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawPagination")]
pub struct PaginationParams {
    pub page: u64,
    pub limit: u64,
    pub offset: u64,
}

impl PaginationParams {
    /// 非正数的 page / limit 会被替换为默认值（1 / 10），不是错误。
    pub fn new(page: i64, limit: i64) -> Self {
        let page = positive_or(page, DEFAULT_PAGE);
        let limit = positive_or(limit, DEFAULT_LIMIT);
        Self {
            page,
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE as i64, DEFAULT_LIMIT as i64)
    }
}

fn positive_or(v: i64, default: u64) -> u64 {
    if v > 0 { v as u64 } else { default }
}

/// 请求中的原始分页字段；缺省或 `null` 按 0 处理，`offset` 总是按 page/limit 重新计算。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPagination {
    page: Option<i64>,
    limit: Option<i64>,
}

impl From<RawPagination> for PaginationParams {
    fn from(raw: RawPagination) -> Self {
        Self::new(raw.page.unwrap_or(0), raw.limit.unwrap_or(0))
    }
}

/// 分页元数据（用于 API 响应）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total_items: u64,
    #[serde(rename = "total_page")]
    pub total_pages: u64,
    pub current_page: u64,
    pub page_limit: u64,
}

/// 计算分页元数据：`total_pages = ceil(total_records / limit)`，最少为 1 页。
///
/// `limit` 为 0 时按默认值 10 计算。
pub fn calculate_pagination_meta(total_records: u64, page: u64, limit: u64) -> PaginationMeta {
    let limit = if limit == 0 { DEFAULT_LIMIT } else { limit };
    let total_pages = total_records.div_ceil(limit).max(1);
    PaginationMeta {
        total_items: total_records,
        total_pages,
        current_page: page,
        page_limit: limit,
    }
}

impl PaginationParams {
    /// 用当前 page/limit 计算分页元数据。
    pub fn meta(&self, total_records: u64) -> PaginationMeta {
        calculate_pagination_meta(total_records, self.page, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::{PaginationMeta, PaginationParams, calculate_pagination_meta};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn new_computes_offset() {
        let p = PaginationParams::new(3, 20);
        assert_eq!((p.page, p.limit, p.offset), (3, 20, 40));
    }

    #[test]
    fn non_positive_inputs_use_defaults() {
        assert_eq!(PaginationParams::new(0, 0), PaginationParams::new(1, 10));
        assert_eq!(PaginationParams::new(-5, -1), PaginationParams::default());
        let p = PaginationParams::new(2, -3);
        assert_eq!((p.page, p.limit, p.offset), (2, 10, 10));
    }

    #[test]
    fn meta_rounds_up() {
        assert_eq!(
            calculate_pagination_meta(23, 1, 10),
            PaginationMeta {
                total_items: 23,
                total_pages: 3,
                current_page: 1,
                page_limit: 10,
            }
        );
        assert_eq!(calculate_pagination_meta(20, 2, 10).total_pages, 2);
        assert_eq!(calculate_pagination_meta(21, 2, 10).total_pages, 3);
    }

    #[test]
    fn meta_empty_is_one_page() {
        assert_eq!(calculate_pagination_meta(0, 1, 10).total_pages, 1);
    }

    #[test]
    fn meta_zero_limit_uses_default() {
        let m = calculate_pagination_meta(25, 1, 0);
        assert_eq!((m.page_limit, m.total_pages), (10, 3));
    }

    #[test]
    fn meta_serializes_with_wire_names() {
        let m = PaginationParams::new(1, 10).meta(23);
        assert_eq!(
            serde_json::to_value(m).unwrap(),
            json!({"total_items": 23, "total_page": 3, "current_page": 1, "page_limit": 10})
        );
    }

    #[test]
    fn deserialize_clamps_and_recomputes_offset() {
        let p: PaginationParams =
            serde_json::from_value(json!({"page": 0, "limit": 25, "offset": 999})).unwrap();
        assert_eq!((p.page, p.limit, p.offset), (1, 25, 0));

        let p: PaginationParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(p, PaginationParams::default());
    }

    #[test]
    fn deserialize_null_fields_use_defaults() {
        let p: PaginationParams =
            serde_json::from_value(json!({"page": null, "limit": null})).unwrap();
        assert_eq!(p, PaginationParams::default());

        let p: PaginationParams =
            serde_json::from_value(json!({"page": 3, "limit": null})).unwrap();
        assert_eq!((p.page, p.limit, p.offset), (3, 10, 20));
    }
}
