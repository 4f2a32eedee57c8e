//! Case extractor - workflow layer
//!
//! Defines what "one case" means: every section of the detail page that is
//! currently open, assembled into a `CaseRecord`.
//!
//! Section order:
//! 1. details / status tables
//! 2. party blocks
//! 3. acts
//! 4. history (one business panel per row)
//! 5. orders (one document viewer per linked row)
//!
//! Every section returns `AppResult`; `settle` is the single place where a
//! failed section turns into its empty value.

use reqwest::Url;
use tracing::{debug, info, warn};

use super::case_ctx::CaseCtx;
use super::sections::{self, BUSINESS_PANEL};
use crate::config::Timeouts;
use crate::error::{AppError, AppResult};
use crate::infrastructure::wait::poll_until;
use crate::infrastructure::{Condition, NavigableSession};
use crate::models::{Act, BusinessDetail, CaseDetails, CaseRecord, CaseStatus, HistoryEntry, OrderEntry};
use crate::portal;
use crate::services::{bridge, DocumentArchiver, HttpIdentity, PanelNavigator};

/// Case extractor
///
/// - reads the detail page the controller has opened
/// - never navigates away from it
/// - never fails: a broken section leaves that section empty
pub struct CaseExtractor<'a, S: NavigableSession> {
    session: &'a S,
    archiver: &'a DocumentArchiver,
    portal: &'a Url,
    timeouts: &'a Timeouts,
}

impl<'a, S: NavigableSession> CaseExtractor<'a, S> {
    pub fn new(
        session: &'a S,
        archiver: &'a DocumentArchiver,
        portal: &'a Url,
        timeouts: &'a Timeouts,
    ) -> Self {
        Self {
            session,
            archiver,
            portal,
            timeouts,
        }
    }

    pub async fn extract(&self, ctx: &CaseCtx<'_>) -> CaseRecord {
        // The detail page exposes no readiness signal
        tokio::time::sleep(self.timeouts.detail_settle()).await;

        // ========== tables ==========
        let details = settle(ctx, "details", self.details().await);
        let status = settle(ctx, "status", self.status().await);

        // ========== parties ==========
        let petitioner_details = settle(
            ctx,
            "petitioner",
            self.party_block(portal::PETITIONER_TABLE).await,
        );
        let respondent_details = settle(
            ctx,
            "respondent",
            self.party_block(portal::RESPONDENT_TABLE).await,
        );

        // ========== acts ==========
        let acts = settle(ctx, "acts", self.acts().await);

        // ========== history ==========
        let history = settle(ctx, "history", self.history(ctx).await);

        // ========== orders ==========
        let orders = settle(ctx, "orders", self.orders(ctx).await);

        let record = CaseRecord {
            details,
            status,
            petitioner_details,
            respondent_details,
            acts,
            history,
            orders,
            ..CaseRecord::default()
        };

        info!(
            "{} ✓ extracted cnr={} history={} orders={} documents={}",
            ctx,
            record.details.cnr_number.as_deref().unwrap_or("?"),
            record.history.len(),
            record.orders.len(),
            record.archived_documents()
        );
        record
    }

    /// Trimmed text of every cell in `row`
    async fn row_texts(&self, row: &S::Element) -> AppResult<Vec<String>> {
        Ok(self.session.texts_within(row, portal::CELL).await?)
    }

    async fn details(&self) -> AppResult<CaseDetails> {
        let mut details = CaseDetails::default();

        match self.session.find_one(portal::CASE_TYPE_HEADER).await {
            Ok(header) => {
                let text = self.session.text(&header).await?;
                details.case_type = sections::cell(&[text], 0);
            }
            Err(e) => debug!("case type header missing: {}", e),
        }

        for row in self.session.find_all(portal::DETAILS_ROWS).await? {
            sections::apply_details_row(&mut details, &self.row_texts(&row).await?);
        }
        Ok(details)
    }

    async fn status(&self) -> AppResult<CaseStatus> {
        let mut status = CaseStatus::default();
        for row in self.session.find_all(portal::STATUS_ROWS).await? {
            sections::apply_status_row(&mut status, &self.row_texts(&row).await?);
        }
        Ok(status)
    }

    /// Opaque text of a party table; a missing table is an empty block
    async fn party_block(&self, selector: &str) -> AppResult<String> {
        match self.session.find_all(selector).await?.first() {
            Some(table) => Ok(self.session.text(table).await?.trim().to_string()),
            None => Ok(String::new()),
        }
    }

    async fn acts(&self) -> AppResult<Vec<Act>> {
        let mut acts = Vec::new();
        // First row is the header
        for row in self.session.find_all(portal::ACTS_ROWS).await?.iter().skip(1) {
            let cells = self.row_texts(row).await?;
            if cells.len() >= 2 {
                acts.push(Act {
                    name: cells[0].clone(),
                    sections: cells[1].clone(),
                });
            }
        }
        Ok(acts)
    }

    /// Rows are visited strictly one after another: panels are positional
    async fn history(&self, ctx: &CaseCtx<'_>) -> AppResult<Vec<HistoryEntry>> {
        let navigator = PanelNavigator::new(self.session, self.timeouts.panel());
        let rows = self.session.find_all(portal::HISTORY_ROWS).await?;
        let mut history = Vec::with_capacity(rows.len());

        for (index, row) in rows.iter().enumerate() {
            let cells = match self.session.find_all_within(row, portal::CELL).await {
                Ok(cells) => cells,
                Err(e) => {
                    warn!("{} history row {} unreadable: {}", ctx, index + 1, e);
                    continue;
                }
            };
            if cells.len() < 4 {
                continue;
            }

            let mut texts = Vec::with_capacity(4);
            for cell in &cells[..4] {
                texts.push(self.session.text(cell).await.unwrap_or_default().trim().to_string());
            }

            let business_on_date = match self.business_on_date(&navigator, &cells[1]).await {
                Ok(detail) => detail,
                Err(e) => {
                    warn!("{} history row {} business panel: {}", ctx, index + 1, e);
                    BusinessDetail::default()
                }
            };

            let mut texts = texts.into_iter();
            history.push(HistoryEntry {
                judge: texts.next().unwrap_or_default(),
                date: texts.next().unwrap_or_default(),
                hearing_date: texts.next().unwrap_or_default(),
                purpose_of_hearing: texts.next().unwrap_or_default(),
                business_on_date,
            });
        }

        Ok(history)
    }

    /// Business panel behind the link in the row's date cell
    async fn business_on_date(
        &self,
        navigator: &PanelNavigator<'_, S>,
        date_cell: &S::Element,
    ) -> AppResult<BusinessDetail> {
        let link = self.session.find_within(date_cell, portal::LINK).await?;
        let fields = navigator.with_panel(&link, &BUSINESS_PANEL).await?;
        Ok(sections::business_detail_from(fields))
    }

    async fn orders(&self, ctx: &CaseCtx<'_>) -> AppResult<Vec<OrderEntry>> {
        let identity = match bridge(self.session, self.portal).await {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!("{} documents will not be fetched: {}", ctx, e);
                None
            }
        };

        let mut orders = Vec::new();
        for (t, table) in self.session.find_all(portal::ORDER_TABLES).await?.iter().enumerate() {
            let rows = match self.session.find_all_within(table, portal::ROW).await {
                Ok(rows) => rows,
                Err(e) => {
                    warn!("{} order table {} unreadable: {}", ctx, t + 1, e);
                    continue;
                }
            };
            // First row is the header
            for (index, row) in rows.iter().enumerate().skip(1) {
                let (mut entry, link) = match self.order_row(row).await {
                    Ok(Some(parsed)) => parsed,
                    Ok(None) => continue,
                    Err(e) => {
                        warn!("{} order row {} unreadable: {}", ctx, index, e);
                        continue;
                    }
                };

                if let (Some(link), Some(identity)) = (link, identity.as_ref()) {
                    let label = format!("{} order {}", ctx, orders.len() + 1);
                    entry.document_url = self.order_document(&link, identity, &label).await;
                }

                orders.push(entry);
            }
        }
        Ok(orders)
    }

    /// Order columns plus the viewer link in the detail cell; `None` for short rows
    async fn order_row(&self, row: &S::Element) -> AppResult<Option<(OrderEntry, Option<S::Element>)>> {
        let cells = self.session.find_all_within(row, portal::CELL).await?;
        if cells.len() < 3 {
            return Ok(None);
        }

        let mut texts = Vec::with_capacity(3);
        for cell in &cells[..3] {
            texts.push(self.session.text(cell).await?.trim().to_string());
        }

        let link = self
            .session
            .find_all_within(&cells[2], portal::LINK)
            .await?
            .into_iter()
            .next();

        let entry = OrderEntry {
            order_number: sections::cell(&texts, 0),
            date: texts[1].clone(),
            detail: texts[2].clone(),
            document_url: None,
        };
        Ok(Some((entry, link)))
    }

    /// Open the viewer, archive its document, and always close the viewer
    async fn order_document(
        &self,
        link: &S::Element,
        identity: &HttpIdentity,
        label: &str,
    ) -> Option<String> {
        // A failed click may still have opened the viewer
        let archived = match self.session.click(link).await {
            Ok(()) => self.archive_from_viewer(identity, label).await,
            Err(e) => Err(e.into()),
        };
        self.close_viewer(label).await;

        match archived {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("{} no document: {}", label, e);
                None
            }
        }
    }

    async fn archive_from_viewer(&self, identity: &HttpIdentity, label: &str) -> AppResult<String> {
        let object = self
            .session
            .wait_for(portal::ORDER_VIEWER_OBJECT, self.timeouts.viewer())
            .await?;

        let data = self
            .session
            .attribute(&object, "data")
            .await?
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| AppError::ParseMismatch {
                field: "document locator",
                value: String::new(),
            })?;

        let locator = self
            .portal
            .join(data.trim())
            .map_err(|_| AppError::ParseMismatch {
                field: "document locator",
                value: data.clone(),
            })?;

        self.archiver.archive(&locator, identity, label).await
    }

    /// Best effort: a viewer left open only costs the next row its click
    async fn close_viewer(&self, label: &str) {
        let session = self.session;
        let button = poll_until(self.timeouts.viewer(), session.poll_interval(), || async move {
            let buttons = session.find_all(portal::BUTTON).await.ok()?;
            for button in buttons {
                if is_close_button(session, &button).await {
                    return Some(button);
                }
            }
            None
        })
        .await;

        let Some(button) = button else {
            warn!("{} viewer close control not found", label);
            return;
        };

        if let Err(e) = session.click(&button).await {
            warn!("{} viewer close failed: {}", label, e);
            return;
        }

        if let Err(e) = session
            .wait_until(
                &Condition::Invisible(portal::ORDER_VIEWER_OBJECT.to_string()),
                self.timeouts.viewer(),
            )
            .await
        {
            warn!("{} viewer still open: {}", label, e);
        }
    }
}

async fn is_close_button<S: NavigableSession>(session: &S, button: &S::Element) -> bool {
    if let Ok(text) = session.text(button).await {
        if text.contains(portal::CLOSE_BUTTON_TEXT) {
            return true;
        }
    }
    matches!(
        session.attribute(button, "class").await,
        Ok(Some(class)) if class.split_whitespace().any(|c| c == portal::CLOSE_BUTTON_CLASS)
    )
}

/// Record-assembly boundary: a failed section logs and becomes its default
fn settle<T: Default>(ctx: &CaseCtx<'_>, section: &str, result: AppResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!("{} section {} left empty: {}", ctx, section, e);
            T::default()
        }
    }
}
