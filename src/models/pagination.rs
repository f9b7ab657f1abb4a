/// Page size used when `limit` is missing or unusable
pub const DEFAULT_LIMIT: i64 = 3;

/// Page window for `GET /students`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-indexed page number
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    /// Parse raw `page`/`limit` query values.
    ///
    /// Anything absent, non-numeric, zero or negative falls back to
    /// page 1 and a limit of 3.
    pub fn from_query(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(1),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// SQL `OFFSET` for this page
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn parse_positive(value: Option<&str>) -> Option<i64> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
}
