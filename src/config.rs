use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::models::{PartyRole, SearchContext};

/// Scraper configuration
///
/// Built from defaults, then an optional TOML file, then environment variables.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Portal landing page
    pub portal_url: String,
    /// Attach to a running browser on this debug port; launch headless otherwise
    pub browser_debug_port: Option<u16>,
    /// Browser executable used for headless launch
    pub chrome_executable: Option<String>,

    // --- search plan ---
    pub state: String,
    pub district: String,
    pub court_complex: String,
    pub case_types: Vec<String>,
    pub roles: Vec<PartyRole>,
    pub filing_year: u16,

    // --- files ---
    /// Staging directory for downloaded documents
    pub staging_dir: PathBuf,
    /// Transient CAPTCHA screenshot, removed after every pass
    pub captcha_path: PathBuf,
    /// JSON-lines output for case records
    pub records_path: PathBuf,
    pub log_dir: PathBuf,

    // --- OCR ---
    pub tesseract_cmd: String,
    pub tesseract_psm: Option<u8>,
    pub captcha_attempts: usize,

    // --- blob storage ---
    /// e.g. https://account.blob.core.windows.net/orders
    pub blob_container_url: String,
    pub blob_sas_token: String,

    pub timeouts: Timeouts,
}

/// Wait budgets, all in milliseconds
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// Form controls (dependent dropdowns render asynchronously)
    pub control_ms: u64,
    /// Business-history panel open/close
    pub panel_ms: u64,
    /// Document viewer and its close control
    pub viewer_ms: u64,
    /// Result list after CAPTCHA submission
    pub results_ms: u64,
    /// Page navigation (back)
    pub navigation_ms: u64,
    /// Grace pause on the detail page; the portal exposes no readiness signal
    pub detail_settle_ms: u64,
    /// Interval between condition probes
    pub poll_ms: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            control_ms: 20_000,
            panel_ms: 10_000,
            viewer_ms: 5_000,
            results_ms: 15_000,
            navigation_ms: 10_000,
            detail_settle_ms: 2_000,
            poll_ms: 250,
        }
    }
}

impl Timeouts {
    pub fn control(&self) -> Duration {
        Duration::from_millis(self.control_ms)
    }

    pub fn panel(&self) -> Duration {
        Duration::from_millis(self.panel_ms)
    }

    pub fn viewer(&self) -> Duration {
        Duration::from_millis(self.viewer_ms)
    }

    pub fn results(&self) -> Duration {
        Duration::from_millis(self.results_ms)
    }

    pub fn navigation(&self) -> Duration {
        Duration::from_millis(self.navigation_ms)
    }

    pub fn detail_settle(&self) -> Duration {
        Duration::from_millis(self.detail_settle_ms)
    }

    pub fn poll(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            portal_url: "https://services.ecourts.gov.in/".to_string(),
            browser_debug_port: None,
            chrome_executable: None,
            state: "Delhi".to_string(),
            district: "East".to_string(),
            court_complex: "Karkardooma Court Complex".to_string(),
            case_types: vec![
                "CS (COMM) - CIVIL SUIT (COMMERCIAL)".to_string(),
                "EX - EXECUTION".to_string(),
                "MISC DJ - MISC. CASES FOR DJ ADJ".to_string(),
                "OMP (COMM) - COMMERCIAL ARBITRATION U/S 34".to_string(),
                "OMP (I)(COMM.) - Commercial Arbitration U/s 9".to_string(),
            ],
            roles: vec![PartyRole::Respondent, PartyRole::Petitioner],
            filing_year: 2024,
            staging_dir: PathBuf::from("pdf"),
            captcha_path: PathBuf::from("temp.png"),
            records_path: PathBuf::from("cases.jsonl"),
            log_dir: PathBuf::from("logs"),
            tesseract_cmd: "tesseract".to_string(),
            tesseract_psm: Some(7),
            captcha_attempts: 3,
            blob_container_url: String::new(),
            blob_sas_token: String::new(),
            timeouts: Timeouts::default(),
        }
    }
}

impl Config {
    /// Load `.env`, the TOML file named by `SCRAPER_CONFIG` (if any), then env overrides
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let base = match std::env::var("SCRAPER_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::default(),
        };

        base.with_env_overrides()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_toml(&content, &path.display().to_string())
    }

    pub fn from_toml(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: origin.to_string(),
            source,
        })
    }

    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(v) = std::env::var("PORTAL_URL") {
            self.portal_url = v;
        }
        if let Some(port) = parse_env::<u16>("BROWSER_DEBUG_PORT", "u16")? {
            self.browser_debug_port = Some(port);
        }
        if let Ok(v) = std::env::var("CHROME_EXECUTABLE") {
            self.chrome_executable = Some(v);
        }
        if let Ok(v) = std::env::var("SEARCH_STATE") {
            self.state = v;
        }
        if let Ok(v) = std::env::var("SEARCH_DISTRICT") {
            self.district = v;
        }
        if let Ok(v) = std::env::var("SEARCH_COURT_COMPLEX") {
            self.court_complex = v;
        }
        if let Some(year) = parse_env::<u16>("FILING_YEAR", "year")? {
            self.filing_year = year;
        }
        if let Ok(v) = std::env::var("STAGING_DIR") {
            self.staging_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("RECORDS_PATH") {
            self.records_path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("LOG_DIR") {
            self.log_dir = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("TESSERACT_CMD") {
            self.tesseract_cmd = v;
        }
        if let Some(attempts) = parse_env::<usize>("CAPTCHA_ATTEMPTS", "usize")? {
            self.captcha_attempts = attempts;
        }
        if let Ok(v) = std::env::var("BLOB_CONTAINER_URL") {
            self.blob_container_url = v;
        }
        if let Ok(v) = std::env::var("BLOB_SAS_TOKEN") {
            self.blob_sas_token = v;
        }
        Ok(self)
    }

    pub fn portal_base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.portal_url).map_err(|_| ConfigError::InvalidUrl {
            field: "portal_url",
            value: self.portal_url.clone(),
        })
    }

    /// One search context per (case type × role), case type outermost
    pub fn search_contexts(&self) -> Vec<SearchContext> {
        self.case_types
            .iter()
            .flat_map(|case_type| {
                self.roles.iter().map(move |role| SearchContext {
                    state: self.state.clone(),
                    district: self.district.clone(),
                    court_complex: self.court_complex.clone(),
                    case_type_label: case_type.clone(),
                    role: *role,
                    filing_year: self.filing_year,
                })
            })
            .collect()
    }
}

fn parse_env<T: FromStr>(
    var_name: &str,
    expected_type: &'static str,
) -> Result<Option<T>, ConfigError> {
    match std::env::var(var_name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type,
            }),
        Err(_) => Ok(None),
    }
}
