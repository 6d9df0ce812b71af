pub mod application_service;
pub mod audit_service;
pub mod candidate_service;
pub mod requisition_service;

/// One page of a filtered listing plus the unpaged total for the same filter.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub skip: i64,
    pub take: i64,
}
