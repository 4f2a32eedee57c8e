//! Section parsers
//!
//! Pure row → field dispatch for the label/value tables of a case page.
//! Each recognized label maps to a fixed cell offset within its row.

use std::collections::BTreeMap;

use phf::phf_map;
use tracing::warn;

use crate::error::AppError;
use crate::models::{BusinessDetail, CaseDetails, CaseStatus};
use crate::portal;
use crate::services::labels;
use crate::services::PanelSpec;
use crate::utils::dates::{reformat_loose, reformat_strict};

#[derive(Debug, Clone, Copy)]
enum DetailsRow {
    Filing,
    Registration,
    Cnr,
}

static DETAILS_LABELS: phf::Map<&'static str, DetailsRow> = phf_map! {
    "filing number" => DetailsRow::Filing,
    "registration number" => DetailsRow::Registration,
    "cnr number" => DetailsRow::Cnr,
};

#[derive(Debug, Clone, Copy)]
enum StatusRow {
    FirstHearingDate,
    DecisionDate,
    NextHearingDate,
    CaseStatus,
    CaseStage,
    NatureOfDisposal,
    CourtNumber,
}

static STATUS_LABELS: phf::Map<&'static str, StatusRow> = phf_map! {
    "first hearing date" => StatusRow::FirstHearingDate,
    "decision date" => StatusRow::DecisionDate,
    "next hearing date" => StatusRow::NextHearingDate,
    "case status" => StatusRow::CaseStatus,
    "case stage" => StatusRow::CaseStage,
    "nature of disposal" => StatusRow::NatureOfDisposal,
    "court number and judge" => StatusRow::CourtNumber,
};

static BUSINESS_FIELDS: phf::Map<&'static str, &'static str> = phf_map! {
    "business" => "business",
    "next purpose" => "next_purpose",
    "next hearing date" => "next_hearing_date",
    "nature of disposal" => "nature_of_disposal",
    "disposal date" => "disposal_date",
};

/// Business-on-date panel opened from a history row
pub static BUSINESS_PANEL: PanelSpec = PanelSpec {
    ready: portal::BUSINESS_PANEL,
    rows: portal::BUSINESS_ROWS,
    skip_rows: 1,
    value_cell: 2,
    close_script: portal::CLOSE_BUSINESS_SCRIPT,
    closed: portal::BUSINESS_PANEL,
    fields: &BUSINESS_FIELDS,
};

/// Non-empty cell text at `index`
pub fn cell(cells: &[String], index: usize) -> Option<String> {
    cells
        .get(index)
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Apply one reformatter; a mismatch leaves the field absent
fn reformat(
    field: &'static str,
    raw: Option<String>,
    format: fn(&str) -> Option<String>,
) -> Option<String> {
    let raw = raw?;
    let formatted = format(&raw);
    if formatted.is_none() {
        warn!(
            "{}",
            AppError::ParseMismatch {
                field,
                value: raw.clone(),
            }
        );
    }
    formatted
}

pub fn apply_details_row(details: &mut CaseDetails, cells: &[String]) {
    if cells.len() < 2 {
        return;
    }
    match labels::lookup(&DETAILS_LABELS, &cells[0]) {
        Some(DetailsRow::Filing) => {
            details.filing_number = cell(cells, 1);
            details.filing_date = reformat("filing_date", cell(cells, 3), reformat_strict);
        }
        Some(DetailsRow::Registration) => {
            details.registration_number = cell(cells, 1);
            details.registration_date =
                reformat("registration_date", cell(cells, 3), reformat_strict);
        }
        Some(DetailsRow::Cnr) => {
            // Value cell carries a trailing note after the number
            details.cnr_number =
                cell(cells, 1).and_then(|v| v.split_whitespace().next().map(str::to_string));
        }
        None => {}
    }
}

pub fn apply_status_row(status: &mut CaseStatus, cells: &[String]) {
    if cells.len() < 2 {
        return;
    }
    let value = cell(cells, 1);
    match labels::lookup(&STATUS_LABELS, &cells[0]) {
        Some(StatusRow::FirstHearingDate) => {
            status.first_hearing_date = reformat("first_hearing_date", value, reformat_loose)
        }
        Some(StatusRow::DecisionDate) => {
            status.decision_date = reformat("decision_date", value, reformat_loose)
        }
        Some(StatusRow::NextHearingDate) => status.next_hearing_date = value,
        Some(StatusRow::CaseStatus) => status.case_status = value,
        Some(StatusRow::CaseStage) => status.case_stage = value,
        Some(StatusRow::NatureOfDisposal) => status.nature_of_disposal = value,
        Some(StatusRow::CourtNumber) => status.court_number = value,
        None => {}
    }
}

pub fn business_detail_from(mut fields: BTreeMap<String, String>) -> BusinessDetail {
    let mut take = |key: &str| fields.remove(key).filter(|v| !v.is_empty());
    BusinessDetail {
        business: take("business"),
        next_purpose: take("next_purpose"),
        next_hearing_date: take("next_hearing_date"),
        nature_of_disposal: take("nature_of_disposal"),
        disposal_date: take("disposal_date"),
    }
}
