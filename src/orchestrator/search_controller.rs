//! Search controller - orchestration layer
//!
//! One (case type × role) pass:
//!
//! ```text
//! Idle → FormFilled → CaptchaPending → {Submitted | CaptchaRetry}
//!      → ResultsListed → (per item) DetailOpen → ResultsListed → Done
//! ```
//!
//! Any failure before `ResultsListed` aborts the pass with `AppError::Setup`.
//! After that, failures cost at most one case.

use reqwest::Url;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, SessionError};
use crate::infrastructure::ocr::normalize_captcha;
use crate::infrastructure::wait::poll_until;
use crate::infrastructure::{Condition, NavigableSession, OcrEngine, RecordSink};
use crate::models::SearchContext;
use crate::portal;
use crate::services::DocumentArchiver;
use crate::utils::logging::truncate_text;
use crate::workflow::{CaseCtx, CaseExtractor};

/// What the portal showed after a search submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Result list with its reported total
    Results(usize),
    /// The search itself found nothing
    NoResults,
    /// The CAPTCHA text was refused
    CaptchaRejected,
}

/// Statistics of one completed pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PassStats {
    pub reported_total: usize,
    pub captcha_attempts: usize,
    pub cases_visited: usize,
    pub records_persisted: usize,
    pub documents_archived: usize,
}

pub struct SearchController<'a, S: NavigableSession> {
    session: &'a S,
    ocr: &'a dyn OcrEngine,
    sink: &'a dyn RecordSink,
    archiver: &'a DocumentArchiver,
    config: &'a Config,
    portal: &'a Url,
}

impl<'a, S: NavigableSession> SearchController<'a, S> {
    pub fn new(
        session: &'a S,
        ocr: &'a dyn OcrEngine,
        sink: &'a dyn RecordSink,
        archiver: &'a DocumentArchiver,
        config: &'a Config,
        portal: &'a Url,
    ) -> Self {
        Self {
            session,
            ocr,
            sink,
            archiver,
            config,
            portal,
        }
    }

    pub async fn run_pass(&self, search: &SearchContext) -> AppResult<PassStats> {
        let mut stats = PassStats::default();

        // ========== FormFilled ==========
        self.fill_form(search).await?;
        info!("[{}] ✓ search form filled", search);

        // ========== CaptchaPending → Submitted ==========
        let (outcome, attempts) = self.submit_with_captcha(search).await?;
        stats.captcha_attempts = attempts;

        let SubmitOutcome::Results(total) = outcome else {
            info!("[{}] no cases found", search);
            self.dismiss_validation().await;
            return Ok(stats);
        };
        stats.reported_total = total;
        info!("[{}] 📋 {} cases listed", search, total);

        // ========== ResultsListed ==========
        for index in 0..total {
            let ctx = CaseCtx::new(search, index + 1, total);
            self.visit_case(&ctx, index, &mut stats).await?;
        }

        Ok(stats)
    }

    // ========== form ==========

    async fn fill_form(&self, search: &SearchContext) -> AppResult<()> {
        self.session
            .open(&self.config.portal_url)
            .await
            .map_err(|e| AppError::setup(self.config.portal_url.as_str(), e))?;

        let menu = self.clickable(portal::CASE_STATUS_MENU).await?;
        self.session
            .click(&menu)
            .await
            .map_err(|e| AppError::setup(portal::CASE_STATUS_MENU, e))?;

        // Dependent dropdowns: each one's options load after the previous change
        self.select(portal::STATE_SELECT, &search.state).await?;
        self.select(portal::DISTRICT_SELECT, &search.district).await?;
        self.select(portal::COURT_COMPLEX_SELECT, &search.court_complex)
            .await?;
        self.dismiss_validation().await;

        let tab = self.clickable(portal::CASE_TYPE_TAB).await?;
        self.session
            .click(&tab)
            .await
            .map_err(|e| AppError::setup(portal::CASE_TYPE_TAB, e))?;

        self.select(portal::CASE_TYPE_SELECT, &search.case_type_label)
            .await?;

        let year = self.present(portal::YEAR_INPUT).await?;
        self.session
            .fill(&year, &search.filing_year.to_string())
            .await
            .map_err(|e| AppError::setup(portal::YEAR_INPUT, e))?;
        self.dismiss_validation().await;

        let radio_selector = format!("#{}", search.role.radio_id());
        let radio = self.clickable(&radio_selector).await?;
        self.session
            .click(&radio)
            .await
            .map_err(|e| AppError::setup(radio_selector.as_str(), e))?;

        Ok(())
    }

    async fn present(&self, selector: &str) -> AppResult<S::Element> {
        self.session
            .wait_for(selector, self.config.timeouts.control())
            .await
            .map_err(|e| AppError::setup(selector, e))
    }

    async fn clickable(&self, selector: &str) -> AppResult<S::Element> {
        self.session
            .wait_until(
                &Condition::Clickable(selector.to_string()),
                self.config.timeouts.control(),
            )
            .await
            .map_err(|e| AppError::setup(selector, e))?;
        self.session
            .find_one(selector)
            .await
            .map_err(|e| AppError::setup(selector, e))
    }

    /// Select `text` once the option has been rendered into `selector`
    async fn select(&self, selector: &str, text: &str) -> AppResult<()> {
        let timeout = self.config.timeouts.control();
        self.present(selector).await?;

        let session = self.session;
        let selected = poll_until(timeout, session.poll_interval(), || async move {
            // Re-query: the portal replaces dependent selects wholesale
            let element = session.find_one(selector).await.ok()?;
            matches!(session.select_by_text(&element, text).await, Ok(true)).then_some(())
        })
        .await;

        selected.ok_or_else(|| {
            AppError::setup(
                selector,
                SessionError::Timeout {
                    condition: format!("option {:?}", text),
                    timeout,
                },
            )
        })
    }

    async fn dismiss_validation(&self) {
        if let Err(e) = self
            .session
            .execute_script(portal::DISMISS_VALIDATION_SCRIPT)
            .await
        {
            warn!("could not dismiss validation modal: {}", e);
        }
    }

    // ========== CAPTCHA ==========

    /// Up to `captcha_attempts` submissions, each with a fresh image
    async fn submit_with_captcha(&self, search: &SearchContext) -> AppResult<(SubmitOutcome, usize)> {
        let attempts = self.config.captcha_attempts.max(1);

        for attempt in 1..=attempts {
            if attempt > 1 {
                self.refresh_captcha().await;
            }

            let text = match self.solve_captcha().await? {
                Some(text) => text,
                None => {
                    warn!("[{}] CAPTCHA attempt {}/{}: nothing recognized", search, attempt, attempts);
                    continue;
                }
            };

            let input = self.present(portal::CAPTCHA_INPUT).await?;
            self.session
                .fill(&input, &text)
                .await
                .map_err(|e| AppError::setup(portal::CAPTCHA_INPUT, e))?;
            self.session
                .execute_script(portal::SUBMIT_SEARCH_SCRIPT)
                .await
                .map_err(|e| AppError::setup(portal::SUBMIT_SEARCH_SCRIPT, e))?;

            match self.classify_submission().await? {
                SubmitOutcome::CaptchaRejected => {
                    warn!("[{}] CAPTCHA attempt {}/{} rejected", search, attempt, attempts);
                    self.dismiss_validation().await;
                }
                outcome => return Ok((outcome, attempt)),
            }
        }

        Err(AppError::setup(
            portal::CAPTCHA_INPUT,
            format!("CAPTCHA not accepted after {} attempts", attempts),
        ))
    }

    /// Screenshot → file → OCR. `None` when OCR failed or read nothing.
    async fn solve_captcha(&self) -> AppResult<Option<String>> {
        let image = self.present(portal::CAPTCHA_IMAGE).await?;
        let png = self
            .session
            .screenshot(&image)
            .await
            .map_err(|e| AppError::setup(portal::CAPTCHA_IMAGE, e))?;

        let path = &self.config.captcha_path;
        tokio::fs::write(path, &png)
            .await
            .map_err(|e| AppError::io(path.display().to_string(), e))?;

        match self.ocr.recognize_text(&png).await {
            Ok(raw) => {
                let text = normalize_captcha(&raw);
                Ok((!text.is_empty()).then_some(text))
            }
            Err(e) => {
                warn!("{}", e);
                Ok(None)
            }
        }
    }

    async fn refresh_captcha(&self) {
        if let Err(e) = self
            .session
            .execute_script(portal::REFRESH_CAPTCHA_SCRIPT)
            .await
        {
            warn!("could not refresh CAPTCHA: {}", e);
        }
    }

    /// Wait for either the result header or the validation modal
    async fn classify_submission(&self) -> AppResult<SubmitOutcome> {
        let timeout = self.config.timeouts.results();
        let session = self.session;

        let outcome = poll_until(timeout, session.poll_interval(), || async move {
            let modal = Condition::Visible(portal::VALIDATION_MODAL.to_string());
            if matches!(session.check(&modal).await, Ok(true)) {
                let message = match session.find_one(portal::VALIDATION_MODAL).await {
                    Ok(el) => session.text(&el).await.unwrap_or_default(),
                    Err(_) => String::new(),
                };
                return Some(Ok(classify_modal(&message)));
            }

            let header = session.find_all(portal::RESULT_TOTAL).await.ok()?;
            let header = header.first()?;
            let text = session.text(header).await.ok()?;
            Some(parse_total(&text).map(SubmitOutcome::Results).ok_or(
                AppError::ParseMismatch {
                    field: "result total",
                    value: text,
                },
            ))
        })
        .await;

        match outcome {
            Some(Ok(outcome)) => Ok(outcome),
            Some(Err(e)) => Err(AppError::setup(portal::RESULT_TOTAL, e)),
            None => Err(AppError::setup(
                portal::RESULT_TOTAL,
                SessionError::Timeout {
                    condition: "result list or validation message".to_string(),
                    timeout,
                },
            )),
        }
    }

    // ========== pagination ==========

    /// Fresh "View" links; handles from before a navigation are never reused
    async fn view_links(&self) -> AppResult<Vec<S::Element>> {
        let mut links = Vec::new();
        for link in self.session.find_all(portal::RESULT_LINKS).await? {
            if self.session.text(&link).await?.trim() == portal::VIEW_LINK_TEXT {
                links.push(link);
            }
        }
        Ok(links)
    }

    /// Open, extract, persist and go back. `Err` only if the list never comes back.
    async fn visit_case(
        &self,
        ctx: &CaseCtx<'_>,
        index: usize,
        stats: &mut PassStats,
    ) -> AppResult<()> {
        let links = match self.view_links().await {
            Ok(links) => links,
            Err(e) => {
                warn!("{} result links unreadable: {}", ctx, e);
                return Ok(());
            }
        };
        let Some(link) = links.get(index) else {
            warn!("{} only {} view links listed", ctx, links.len());
            return Ok(());
        };

        let opened = async {
            self.session.scroll_into_view(link).await?;
            self.session.click(link).await
        };
        if let Err(e) = opened.await {
            warn!("{} could not open case: {}", ctx, e);
            return Ok(());
        }

        // ========== DetailOpen ==========
        let extractor =
            CaseExtractor::new(self.session, self.archiver, self.portal, &self.config.timeouts);
        let mut record = extractor.extract(ctx).await;
        record.tag(ctx.search);
        stats.cases_visited += 1;
        stats.documents_archived += record.archived_documents();

        match self.sink.insert_one(&record).await {
            Ok(()) => stats.records_persisted += 1,
            Err(e) => error!("{} ❌ record not persisted: {}", ctx, e),
        }

        self.return_to_results(ctx).await
    }

    async fn return_to_results(&self, ctx: &CaseCtx<'_>) -> AppResult<()> {
        if let Err(e) = self.session.back().await {
            warn!("{} back navigation failed: {}", ctx, e);
        }
        self.session
            .wait_until(
                &Condition::Present(portal::RESULT_TOTAL.to_string()),
                self.config.timeouts.navigation(),
            )
            .await
            .map_err(|e| AppError::setup(portal::RESULT_TOTAL, e))
    }
}

/// "Total number of cases : 12" → 12
pub fn parse_total(text: &str) -> Option<usize> {
    text.rsplit(':').next()?.trim().parse().ok()
}

/// The same modal reports both refused CAPTCHAs and empty searches
pub fn classify_modal(message: &str) -> SubmitOutcome {
    if message.to_lowercase().contains("captcha") {
        SubmitOutcome::CaptchaRejected
    } else {
        info!("validation message: {}", truncate_text(message.trim(), 120));
        SubmitOutcome::NoResults
    }
}
