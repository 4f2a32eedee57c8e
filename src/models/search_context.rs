//! Search context
//!
//! The immutable filter parameters of one (case type × role) pass.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Which side of the case the search filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyRole {
    /// Plaintiff / petitioner
    Petitioner,
    /// Defendant / respondent
    Respondent,
}

impl PartyRole {
    /// Id of the portal's radio button for this role
    pub fn radio_id(self) -> &'static str {
        match self {
            PartyRole::Petitioner => "radPCT",
            PartyRole::Respondent => "radDCT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PartyRole::Petitioner => "plaintiff/petitioner",
            PartyRole::Respondent => "defendant/respondent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchContext {
    pub state: String,
    pub district: String,
    pub court_complex: String,
    pub case_type_label: String,
    pub role: PartyRole,
    pub filing_year: u16,
}

impl Display for SearchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {}",
            self.case_type_label,
            self.role.label(),
            self.filing_year
        )
    }
}
