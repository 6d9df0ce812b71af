use validator::ValidationError;

use crate::models::candidate::CANDIDATE_STATUSES;
use crate::models::requisition::REQUISITION_STATUSES;

fn one_of(value: &str, allowed: &[&str], code: &'static str) -> Result<(), ValidationError> {
    if allowed.iter().any(|candidate| *candidate == value) {
        return Ok(());
    }
    let mut err = ValidationError::new(code);
    err.message = Some(format!("must be one of: {}", allowed.join(", ")).into());
    Err(err)
}

pub fn candidate_status(value: &str) -> Result<(), ValidationError> {
    one_of(value, &CANDIDATE_STATUSES, "candidate_status")
}

pub fn requisition_status(value: &str) -> Result<(), ValidationError> {
    one_of(value, &REQUISITION_STATUSES, "requisition_status")
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_are_matched_exactly() {
        assert!(candidate_status("TechnicalAssessment").is_ok());
        assert!(candidate_status("technicalassessment").is_err());
        assert!(requisition_status("On Hold").is_ok());
        assert!(requisition_status("Paused").is_err());
    }

    #[test]
    fn rejection_lists_allowed_values() {
        let err = requisition_status("Paused").unwrap_err();
        assert_eq!(
            err.message.unwrap(),
            "must be one of: Open, Closed, On Hold, Cancelled"
        );
    }

    #[test]
    fn whitespace_only_is_blank() {
        assert!(not_blank("   ").is_err());
        assert!(not_blank(" alice ").is_ok());
    }
}
