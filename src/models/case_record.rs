//! Case record
//!
//! The unit of output. Every section is optional in the sense that a failed
//! extraction leaves it at its `Default`; the record itself is always produced.

use serde::{Deserialize, Serialize};

use super::search_context::{PartyRole, SearchContext};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub details: CaseDetails,
    pub status: CaseStatus,
    pub petitioner_details: String,
    pub respondent_details: String,
    pub acts: Vec<Act>,
    pub history: Vec<HistoryEntry>,
    pub orders: Vec<OrderEntry>,

    // --- search tag ---
    pub state: String,
    pub district: String,
    pub court_complex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_role: Option<PartyRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filing_year: Option<u16>,
}

impl CaseRecord {
    /// Stamp the record with the pass it was discovered under
    pub fn tag(&mut self, search: &SearchContext) {
        self.state = search.state.clone();
        self.district = search.district.clone();
        self.court_complex = search.court_complex.clone();
        self.case_type = Some(search.case_type_label.clone());
        self.party_role = Some(search.role);
        self.filing_year = Some(search.filing_year);
    }

    /// Number of orders whose document reached durable storage
    pub fn archived_documents(&self) -> usize {
        self.orders
            .iter()
            .filter(|o| o.document_url.is_some())
            .count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filing_number: Option<String>,
    /// dd/mm/yyyy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    /// dd/mm/yyyy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cnr_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseStatus {
    /// dd/mm/yyyy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_hearing_date: Option<String>,
    /// dd/mm/yyyy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_hearing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nature_of_disposal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Act {
    pub name: String,
    pub sections: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub judge: String,
    pub date: String,
    pub hearing_date: String,
    pub purpose_of_hearing: String,
    pub business_on_date: BusinessDetail,
}

/// Contents of the per-row business panel. Empty when the panel could not be read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessDetail {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_purpose: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_hearing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nature_of_disposal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposal_date: Option<String>,
}

impl BusinessDetail {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    pub date: String,
    pub detail: String,
    /// Set only when the document reached durable storage
    #[serde(rename = "url", skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
}
