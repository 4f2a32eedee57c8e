pub mod case_record;
pub mod search_context;

pub use case_record::{Act, BusinessDetail, CaseDetails, CaseRecord, CaseStatus, HistoryEntry, OrderEntry};
pub use search_context::{PartyRole, SearchContext};
