//! Case context
//!
//! "Which case of which pass am I on", carried into every log line so a
//! partial record can be traced back to its failures.

use std::fmt::Display;

use crate::models::SearchContext;

#[derive(Debug, Clone)]
pub struct CaseCtx<'a> {
    pub search: &'a SearchContext,
    /// 1-based position in the result list
    pub case_index: usize,
    pub total: usize,
}

impl<'a> CaseCtx<'a> {
    pub fn new(search: &'a SearchContext, case_index: usize, total: usize) -> Self {
        Self {
            search,
            case_index,
            total,
        }
    }
}

impl Display for CaseCtx<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} | {} | case {}/{}]",
            self.search.case_type_label,
            self.search.role.label(),
            self.case_index,
            self.total
        )
    }
}
