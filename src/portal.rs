//! Portal vocabulary
//!
//! CSS selectors and page scripts of the eCourts case-status portal.

// ---------- search form ----------
pub const CASE_STATUS_MENU: &str = "#leftPaneMenuCS";
pub const STATE_SELECT: &str = "#sess_state_code";
pub const DISTRICT_SELECT: &str = "#sess_dist_code";
pub const COURT_COMPLEX_SELECT: &str = "#court_complex_code";
pub const CASE_TYPE_TAB: &str = "#casetype-tabMenu";
pub const CASE_TYPE_SELECT: &str = "#case_type_2";
pub const YEAR_INPUT: &str = "#search_year";
pub const CAPTCHA_IMAGE: &str = "#captcha_image";
pub const CAPTCHA_INPUT: &str = "#ct_captcha_code";

/// Validation / "no records" modal; also used for CAPTCHA rejections
pub const VALIDATION_MODAL: &str = "#validateError";

pub const DISMISS_VALIDATION_SCRIPT: &str =
    "typeof closeModel === 'function' && closeModel({modal_id:'validateError'})";
pub const SUBMIT_SEARCH_SCRIPT: &str = "submitCaseType();";
pub const REFRESH_CAPTCHA_SCRIPT: &str =
    "typeof refreshCaptcha === 'function' && refreshCaptcha()";

// ---------- result list ----------
/// Header link reading e.g. "Total number of cases : 12"
pub const RESULT_TOTAL: &str = "#showList2 > div:nth-of-type(2) > a";
pub const RESULT_LINKS: &str = "a";
pub const VIEW_LINK_TEXT: &str = "View";

// ---------- case detail page ----------
pub const CASE_TYPE_HEADER: &str = "td[colspan='3'].fw-bold.text-uppercase";
pub const DETAILS_ROWS: &str = "table.case_details_table tr";
pub const STATUS_ROWS: &str = "table.case_status_table tr";
pub const PETITIONER_TABLE: &str = "table.Petitioner_Advocate_table";
pub const RESPONDENT_TABLE: &str = "table.Respondent_Advocate_table";
pub const ACTS_ROWS: &str = "table.acts_table tr";
pub const HISTORY_ROWS: &str = "table.history_table tbody tr";
pub const ORDER_TABLES: &str = "table.order_table";
pub const ROW: &str = "tr";
pub const CELL: &str = "td";
pub const LINK: &str = "a";

// ---------- business-on-date panel ----------
pub const BUSINESS_PANEL: &str = "#caseBusinessDiv_caseType";
pub const BUSINESS_ROWS: &str = "#caseBusinessDiv_caseType div center center table tr";
pub const CLOSE_BUSINESS_SCRIPT: &str = "back_fun('CScaseType')";

// ---------- order document viewer ----------
pub const ORDER_VIEWER_OBJECT: &str = "#modal_order_body object";
pub const BUTTON: &str = "button";
pub const CLOSE_BUTTON_TEXT: &str = "Close";
pub const CLOSE_BUTTON_CLASS: &str = "btn-close";
