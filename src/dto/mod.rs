pub mod application_dto;
pub mod audit_dto;
pub mod candidate_dto;
pub mod requisition_dto;

pub const DEFAULT_TAKE: i64 = 10;
pub const MAX_TAKE: i64 = 100;

/// Normalises paging query values: `skip >= 0`, `take` in `1..=MAX_TAKE`.
pub fn page_window(skip: Option<i64>, take: Option<i64>) -> (i64, i64) {
    let skip = skip.unwrap_or(0).max(0);
    let take = take.unwrap_or(DEFAULT_TAKE).clamp(1, MAX_TAKE);
    (skip, take)
}

/// Treats empty query values (`?status=`) as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
