//! Persistence traits and their PostgreSQL implementations.
//!
//! Services depend on the traits so the workflow rules can be exercised
//! without a database.

pub mod application_repository;
pub mod candidate_repository;
pub mod requisition_repository;
pub mod stage_history_repository;

pub use application_repository::{ApplicationRepository, PgApplicationRepository};
pub use candidate_repository::{CandidateRepository, PgCandidateRepository};
pub use requisition_repository::{PgRequisitionRepository, RequisitionRepository};
pub use stage_history_repository::{PgStageHistoryRepository, StageHistoryRepository};

/// Free-text and status filter used by the candidate and requisition lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub search_term: Option<String>,
    pub status: Option<String>,
}

/// Accumulates `WHERE` predicates with positional text arguments so a page
/// query and its count query can share one predicate.
#[derive(Debug, Default)]
pub(crate) struct WhereBuilder {
    filters: Vec<String>,
    args: Vec<String>,
}

impl WhereBuilder {
    pub fn eq(&mut self, column: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.args.push(value.to_string());
            self.filters.push(format!("{} = ${}", column, self.args.len()));
        }
        self
    }

    /// Case-insensitive substring match of `term` against any of `columns`.
    pub fn contains_any(&mut self, columns: &[&str], term: Option<&str>) -> &mut Self {
        if let Some(term) = term.map(str::trim).filter(|v| !v.is_empty()) {
            self.args.push(format!("%{}%", escape_like(term)));
            let placeholder = self.args.len();
            let alternatives: Vec<String> = columns
                .iter()
                .map(|column| format!("{} ILIKE ${}", column, placeholder))
                .collect();
            self.filters.push(format!("({})", alternatives.join(" OR ")));
        }
        self
    }

    pub fn clause(&self) -> String {
        if self.filters.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.filters.join(" AND "))
        }
    }

    /// Index the next positional parameter after the filter arguments will take.
    pub fn next_param(&self) -> usize {
        self.args.len() + 1
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
