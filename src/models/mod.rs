pub mod application;
pub mod audit_log;
pub mod candidate;
pub mod requisition;
pub mod stage;
pub mod stage_history;
