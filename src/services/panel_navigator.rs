//! Panel navigator - business capability layer
//!
//! Opens a transient panel tied to one row, scrapes its label/value rows,
//! closes it and waits until the parent view is interactable again.
//! Only one panel can be open at a time and panels are positional, so rows
//! must go through here strictly one after another.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::debug;

use super::labels;
use crate::error::AppResult;
use crate::infrastructure::{Condition, NavigableSession};
use crate::portal;

/// Shape of one kind of panel
pub struct PanelSpec {
    /// Present once the panel has rendered
    pub ready: &'static str,
    /// Label/value rows inside the panel
    pub rows: &'static str,
    /// Header rows to skip
    pub skip_rows: usize,
    /// Cell holding the value; the label is always cell 0
    pub value_cell: usize,
    /// Page script that closes the panel
    pub close_script: &'static str,
    /// Invisible once the panel is closed
    pub closed: &'static str,
    /// Normalized label → output key
    pub fields: &'static phf::Map<&'static str, &'static str>,
}

pub struct PanelNavigator<'a, S: NavigableSession> {
    session: &'a S,
    timeout: Duration,
}

impl<'a, S: NavigableSession> PanelNavigator<'a, S> {
    pub fn new(session: &'a S, timeout: Duration) -> Self {
        Self { session, timeout }
    }

    /// Open the panel through `trigger`, scrape `spec.fields`, close it.
    ///
    /// Missing fields are simply absent from the map. An `Err` means the panel
    /// never opened or never closed.
    pub async fn with_panel(
        &self,
        trigger: &S::Element,
        spec: &PanelSpec,
    ) -> AppResult<BTreeMap<String, String>> {
        if let Err(e) = self.session.click(trigger).await {
            self.abandon(spec).await;
            return Err(e.into());
        }

        if let Err(e) = self
            .session
            .wait_until(&Condition::Present(spec.ready.to_string()), self.timeout)
            .await
        {
            self.abandon(spec).await;
            return Err(e.into());
        }

        let fields = self.scrape(spec).await;

        self.session.execute_script(spec.close_script).await?;
        self.session
            .wait_until(&Condition::Invisible(spec.closed.to_string()), self.timeout)
            .await?;

        Ok(fields)
    }

    /// The panel may have opened anyway or render late; never leave it over the next row
    async fn abandon(&self, spec: &PanelSpec) {
        if let Err(e) = self.session.execute_script(spec.close_script).await {
            debug!("panel close after failed open: {}", e);
        }
    }

    async fn scrape(&self, spec: &PanelSpec) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();

        let rows = match self.session.find_all(spec.rows).await {
            Ok(rows) => rows,
            Err(e) => {
                debug!("panel rows {} unreadable: {}", spec.rows, e);
                return fields;
            }
        };

        for (index, row) in rows.iter().enumerate().skip(spec.skip_rows) {
            let cells = match self.session.texts_within(row, portal::CELL).await {
                Ok(cells) => cells,
                Err(e) => {
                    debug!("panel row {} unreadable: {}", index, e);
                    continue;
                }
            };
            let (Some(label), Some(value)) = (cells.first(), cells.get(spec.value_cell)) else {
                continue;
            };
            if let Some(key) = labels::lookup(spec.fields, label) {
                fields.insert(key.to_string(), value.clone());
            }
        }

        fields
    }
}
