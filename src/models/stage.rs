use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Hiring stages an application moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "Applied")]
    Applied,
    #[serde(rename = "Phone Screen")]
    PhoneScreen,
    #[serde(rename = "Technical Interview")]
    TechnicalInterview,
    #[serde(rename = "Onsite Interview")]
    OnsiteInterview,
    #[serde(rename = "Reference Check")]
    ReferenceCheck,
    #[serde(rename = "Offer")]
    Offer,
    #[serde(rename = "Hired")]
    Hired,
    #[serde(rename = "Rejected")]
    Rejected,
    #[serde(rename = "Withdrawn")]
    Withdrawn,
}

pub const INITIAL_STAGE: Stage = Stage::Applied;

impl Stage {
    pub const ALL: [Stage; 9] = [
        Stage::Applied,
        Stage::PhoneScreen,
        Stage::TechnicalInterview,
        Stage::OnsiteInterview,
        Stage::ReferenceCheck,
        Stage::Offer,
        Stage::Hired,
        Stage::Rejected,
        Stage::Withdrawn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Applied => "Applied",
            Stage::PhoneScreen => "Phone Screen",
            Stage::TechnicalInterview => "Technical Interview",
            Stage::OnsiteInterview => "Onsite Interview",
            Stage::ReferenceCheck => "Reference Check",
            Stage::Offer => "Offer",
            Stage::Hired => "Hired",
            Stage::Rejected => "Rejected",
            Stage::Withdrawn => "Withdrawn",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Hired | Stage::Rejected | Stage::Withdrawn)
    }

    /// Stages reachable in one move from `self`.
    pub fn next_stages(&self) -> &'static [Stage] {
        use Stage::*;
        match self {
            Applied => &[PhoneScreen, TechnicalInterview, Rejected, Withdrawn],
            PhoneScreen => &[TechnicalInterview, OnsiteInterview, Rejected, Withdrawn],
            TechnicalInterview => &[OnsiteInterview, ReferenceCheck, Rejected, Withdrawn],
            OnsiteInterview => &[ReferenceCheck, Offer, Rejected, Withdrawn],
            ReferenceCheck => &[Offer, Rejected, Withdrawn],
            Offer => &[Hired, Rejected, Withdrawn],
            Hired | Rejected | Withdrawn => &[],
        }
    }

    pub fn can_move_to(&self, next: Stage) -> bool {
        self.next_stages().contains(&next)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stage '{0}'")]
pub struct UnknownStage(pub String);

impl FromStr for Stage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Stage::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownStage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_names_case_insensitively() {
        assert_eq!("phone screen".parse::<Stage>().unwrap(), Stage::PhoneScreen);
        assert_eq!(" Offer ".parse::<Stage>().unwrap(), Stage::Offer);
        assert!("Coffee Chat".parse::<Stage>().is_err());
    }

    #[test]
    fn terminal_stages_have_no_outgoing_edges() {
        for stage in Stage::ALL {
            assert_eq!(stage.is_terminal(), stage.next_stages().is_empty(), "{stage}");
        }
    }

    #[test]
    fn every_open_stage_can_reject_or_withdraw() {
        for stage in Stage::ALL.iter().filter(|s| !s.is_terminal()) {
            assert!(stage.can_move_to(Stage::Rejected));
            assert!(stage.can_move_to(Stage::Withdrawn));
            assert!(!stage.can_move_to(*stage), "self edge on {stage}");
        }
    }

    #[test]
    fn hiring_requires_an_offer_first() {
        let hire_sources: Vec<_> = Stage::ALL
            .iter()
            .filter(|s| s.can_move_to(Stage::Hired))
            .collect();
        assert_eq!(hire_sources, vec![&Stage::Offer]);
    }
}
