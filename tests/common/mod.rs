//! In-memory stand-ins for the browser, OCR, blob store and record sink.
//!
//! `FakePortal` keeps a selector-keyed node arena per page. Every navigation
//! rebuilds the page and bumps a generation counter, so handles captured
//! before the navigation fail with `SessionError::Stale`.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use ecourts_archiver::config::{Config, Timeouts};
use ecourts_archiver::error::{AppError, AppResult, SessionError, SessionResult};
use ecourts_archiver::infrastructure::{
    BlobStore, Condition, NavigableSession, OcrEngine, RecordSink, SessionCookie,
};
use ecourts_archiver::models::{CaseRecord, PartyRole};
use ecourts_archiver::portal;

// ========== portal content ==========

#[derive(Debug, Clone)]
pub struct FakeHistory {
    pub judge: String,
    pub date: String,
    pub hearing_date: String,
    pub purpose: String,
    /// `None`: clicking the date never opens a panel
    pub panel: Option<Vec<(String, String)>>,
    /// The date link opens its panel and then reports a failed click
    pub click_fails: bool,
}

#[derive(Debug, Clone)]
pub struct FakeOrder {
    pub number: String,
    pub date: String,
    pub detail: String,
    /// `data` attribute of the viewer's `<object>`; `None`: no link in the row
    pub document: Option<String>,
    /// Reading the detail cell's text fails
    pub unreadable: bool,
    /// The viewer link opens the viewer and then reports a failed click
    pub click_fails: bool,
}

#[derive(Debug, Clone)]
pub struct FakeCase {
    pub cnr: String,
    pub filing_number: String,
    pub acts: Vec<(String, String)>,
    pub history: Vec<FakeHistory>,
    pub orders: Vec<FakeOrder>,
    /// Selectors whose lookup fails on this case's detail page
    pub failing: Vec<&'static str>,
}

impl FakeCase {
    pub fn new(index: usize) -> Self {
        Self {
            cnr: format!("DLET01000{:03}2024", index),
            filing_number: format!("{}/2024", 100 + index),
            acts: vec![(
                "Arbitration and Conciliation Act".to_string(),
                "34".to_string(),
            )],
            history: Vec::new(),
            orders: Vec::new(),
            failing: Vec::new(),
        }
    }

    pub fn with_history(mut self, panel: Option<Vec<(&str, &str)>>) -> Self {
        let n = self.history.len() + 1;
        self.history.push(FakeHistory {
            judge: "District Judge (Commercial)".to_string(),
            date: format!("0{}-04-2024", n),
            hearing_date: format!("1{}-05-2024", n),
            purpose: "Arguments".to_string(),
            panel: panel.map(|fields| {
                fields
                    .into_iter()
                    .map(|(l, v)| (l.to_string(), v.to_string()))
                    .collect()
            }),
            click_fails: false,
        });
        self
    }

    /// History row whose panel opens although the click reports an error
    pub fn with_history_failing_click(mut self, panel: Vec<(&str, &str)>) -> Self {
        self = self.with_history(Some(panel));
        if let Some(last) = self.history.last_mut() {
            last.click_fails = true;
        }
        self
    }

    pub fn with_order(mut self, document: Option<&str>) -> Self {
        let n = self.orders.len() + 1;
        self.orders.push(FakeOrder {
            number: n.to_string(),
            date: format!("0{}-09-2024", n),
            detail: "Final Order".to_string(),
            document: document.map(str::to_string),
            unreadable: false,
            click_fails: false,
        });
        self
    }

    /// Order row whose detail cell cannot be read
    pub fn with_unreadable_order(mut self, document: Option<&str>) -> Self {
        self = self.with_order(document);
        if let Some(last) = self.orders.last_mut() {
            last.unreadable = true;
        }
        self
    }

    /// Order row whose viewer opens although the click reports an error
    pub fn with_order_failing_click(mut self, document: &str) -> Self {
        self = self.with_order(Some(document));
        if let Some(last) = self.orders.last_mut() {
            last.click_fails = true;
        }
        self
    }

    pub fn failing_on(mut self, selector: &'static str) -> Self {
        self.failing.push(selector);
        self
    }
}

pub fn business_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Business", "Arguments heard. Reserved for orders."),
        ("Next Purpose", "Orders"),
        ("Next Hearing Date", "03-09-2024"),
    ]
}

// ========== fake session ==========

#[derive(Debug, Clone)]
pub struct FakeElement {
    id: usize,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    None,
    OpenCase(usize),
    OpenPanel(usize),
    OpenViewer(usize),
    CloseViewer,
}

#[derive(Debug)]
struct Node {
    key: String,
    text: String,
    attrs: HashMap<String, String>,
    children: HashMap<&'static str, Vec<usize>>,
    action: Action,
    text_fails: bool,
    click_fails: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum View {
    Blank,
    Search,
    Results,
    Detail(usize),
}

struct State {
    nodes: Vec<Node>,
    page: HashMap<String, Vec<usize>>,
    generation: u64,
    view: View,
    modal: Option<String>,
    fills: HashMap<String, String>,
    captcha_rejections_left: usize,
    submitted_captchas: Vec<String>,
    captcha_refreshes: usize,
    visited: Vec<usize>,
    viewer_opens: usize,
    viewer_closes: usize,
    panel_opens: usize,
    panel_closes: usize,
}

pub struct FakePortal {
    cases: Vec<FakeCase>,
    cookies: Vec<SessionCookie>,
    missing_controls: HashSet<String>,
    state: Mutex<State>,
}

impl FakePortal {
    pub fn new(cases: Vec<FakeCase>) -> Self {
        Self {
            cases,
            cookies: vec![
                SessionCookie {
                    name: "SERVICES_SESSID".to_string(),
                    value: "abc123".to_string(),
                },
                SessionCookie {
                    name: "JSESSION".to_string(),
                    value: "42".to_string(),
                },
            ],
            missing_controls: HashSet::new(),
            state: Mutex::new(State {
                nodes: Vec::new(),
                page: HashMap::new(),
                generation: 0,
                view: View::Blank,
                modal: None,
                fills: HashMap::new(),
                captcha_rejections_left: 0,
                submitted_captchas: Vec::new(),
                captcha_refreshes: 0,
                visited: Vec::new(),
                viewer_opens: 0,
                viewer_closes: 0,
                panel_opens: 0,
                panel_closes: 0,
            }),
        }
    }

    pub fn with_cookies(mut self, cookies: Vec<SessionCookie>) -> Self {
        self.cookies = cookies;
        self
    }

    pub fn without_control(mut self, selector: &str) -> Self {
        self.missing_controls.insert(selector.to_string());
        self
    }

    pub fn rejecting_captchas(self, count: usize) -> Self {
        self.lock().captcha_rejections_left = count;
        self
    }

    pub fn visited(&self) -> Vec<usize> {
        self.lock().visited.clone()
    }

    pub fn submitted_captchas(&self) -> Vec<String> {
        self.lock().submitted_captchas.clone()
    }

    pub fn captcha_refreshes(&self) -> usize {
        self.lock().captcha_refreshes
    }

    pub fn viewer_opens(&self) -> usize {
        self.lock().viewer_opens
    }

    pub fn viewer_closes(&self) -> usize {
        self.lock().viewer_closes
    }

    pub fn panel_opens(&self) -> usize {
        self.lock().panel_opens
    }

    pub fn panel_closes(&self) -> usize {
        self.lock().panel_closes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    // ---------- page building ----------

    fn navigate(&self, state: &mut State, view: View) {
        state.generation += 1;
        state.nodes.clear();
        state.page.clear();
        state.modal = None;
        state.view = view;

        match view {
            View::Blank => {}
            View::Search => self.build_search(state),
            View::Results => {
                self.build_search(state);
                self.build_results(state);
            }
            View::Detail(index) => self.build_detail(state, index),
        }
    }

    fn build_search(&self, state: &mut State) {
        let controls = [
            portal::CASE_STATUS_MENU,
            portal::STATE_SELECT,
            portal::DISTRICT_SELECT,
            portal::COURT_COMPLEX_SELECT,
            portal::CASE_TYPE_TAB,
            portal::CASE_TYPE_SELECT,
            portal::YEAR_INPUT,
            portal::CAPTCHA_IMAGE,
            portal::CAPTCHA_INPUT,
        ];
        let radios = [
            format!("#{}", PartyRole::Petitioner.radio_id()),
            format!("#{}", PartyRole::Respondent.radio_id()),
        ];

        for selector in controls.iter().map(|s| s.to_string()).chain(radios) {
            if self.missing_controls.contains(&selector) {
                continue;
            }
            let id = add(state, &selector, "", Action::None);
            put(state, &selector, id);
        }
    }

    fn build_results(&self, state: &mut State) {
        let header = add(
            state,
            portal::RESULT_TOTAL,
            &format!("Total number of cases : {}", self.cases.len()),
            Action::None,
        );
        put(state, portal::RESULT_TOTAL, header);
        put(state, portal::RESULT_LINKS, header);

        for index in 0..self.cases.len() {
            let link = add(state, portal::RESULT_LINKS, "View", Action::OpenCase(index));
            put(state, portal::RESULT_LINKS, link);
        }
    }

    fn build_detail(&self, state: &mut State, index: usize) {
        let case = &self.cases[index];

        let header = add(state, portal::CASE_TYPE_HEADER, "EX - EXECUTION", Action::None);
        put(state, portal::CASE_TYPE_HEADER, header);

        let cnr_cell = format!("{} (Note the CNR number for future reference)", case.cnr);
        let details: [Vec<&str>; 4] = [
            vec!["Case Type", "EX - EXECUTION"],
            vec!["Filing Number", case.filing_number.as_str(), "Filing Date", "05-03-2024"],
            vec!["Registration Number", "98/2024", "Registration Date:", "07-03-2024"],
            vec!["CNR Number", cnr_cell.as_str()],
        ];
        for cells in &details {
            let r = row_node(state, portal::DETAILS_ROWS, cells);
            put(state, portal::DETAILS_ROWS, r);
        }

        for cells in [
            ["First Hearing Date", "12th March 2024"],
            ["Decision Date", "3rd September 2024"],
            ["Case Status", "Case disposed"],
            ["Nature of Disposal", "Contested--WITHDRAWN"],
            ["Court Number and Judge", "4-District Judge (Commercial)"],
        ] {
            let r = row_node(state, portal::STATUS_ROWS, &cells);
            put(state, portal::STATUS_ROWS, r);
        }

        let petitioner = add(
            state,
            portal::PETITIONER_TABLE,
            "  1) Acme Ltd\n Advocate- R. Sharma  ",
            Action::None,
        );
        put(state, portal::PETITIONER_TABLE, petitioner);
        let respondent = add(state, portal::RESPONDENT_TABLE, "1) Beta Traders", Action::None);
        put(state, portal::RESPONDENT_TABLE, respondent);

        let header = row_node(state, portal::ACTS_ROWS, &["Under Act(s)", "Under Section(s)"]);
        put(state, portal::ACTS_ROWS, header);
        for (name, sections) in &case.acts {
            let r = row_node(state, portal::ACTS_ROWS, &[name.as_str(), sections.as_str()]);
            put(state, portal::ACTS_ROWS, r);
        }

        for (n, entry) in case.history.iter().enumerate() {
            let r = row_node(
                state,
                portal::HISTORY_ROWS,
                &[
                    entry.judge.as_str(),
                    entry.date.as_str(),
                    entry.hearing_date.as_str(),
                    entry.purpose.as_str(),
                ],
            );
            let date_cell = state.nodes[r].children[portal::CELL][1];
            let link = add(state, portal::LINK, &entry.date, Action::OpenPanel(n));
            state.nodes[link].click_fails = entry.click_fails;
            child(state, date_cell, portal::LINK, link);
            put(state, portal::HISTORY_ROWS, r);
        }

        if !case.orders.is_empty() {
            let table = add(state, portal::ORDER_TABLES, "", Action::None);
            put(state, portal::ORDER_TABLES, table);
            // Header row has only <th> cells
            let header = add(state, portal::ROW, "Order Number Order Date Order Details", Action::None);
            child(state, table, portal::ROW, header);

            for (n, order) in case.orders.iter().enumerate() {
                let r = row_node(
                    state,
                    portal::ROW,
                    &[order.number.as_str(), order.date.as_str(), order.detail.as_str()],
                );
                let detail_cell = state.nodes[r].children[portal::CELL][2];
                state.nodes[detail_cell].text_fails = order.unreadable;
                if order.document.is_some() {
                    let link = add(state, portal::LINK, &order.detail, Action::OpenViewer(n));
                    state.nodes[link].click_fails = order.click_fails;
                    child(state, detail_cell, portal::LINK, link);
                }
                child(state, table, portal::ROW, r);
            }
        }
    }

    fn open_panel(&self, state: &mut State, row: usize) {
        let View::Detail(index) = state.view else {
            return;
        };
        let Some(fields) = &self.cases[index].history[row].panel else {
            return;
        };
        state.panel_opens += 1;

        let panel = add(state, portal::BUSINESS_PANEL, "", Action::None);
        put(state, portal::BUSINESS_PANEL, panel);
        let header = row_node(state, portal::BUSINESS_ROWS, &["Business on Date"]);
        put(state, portal::BUSINESS_ROWS, header);
        for (label, value) in fields {
            let r = row_node(
                state,
                portal::BUSINESS_ROWS,
                &[label.as_str(), ":", value.as_str()],
            );
            put(state, portal::BUSINESS_ROWS, r);
        }
    }

    fn open_viewer(&self, state: &mut State, order: usize) {
        let View::Detail(index) = state.view else {
            return;
        };
        let Some(document) = &self.cases[index].orders[order].document else {
            return;
        };
        state.viewer_opens += 1;

        let object = add(state, portal::ORDER_VIEWER_OBJECT, "", Action::None);
        state.nodes[object]
            .attrs
            .insert("data".to_string(), document.clone());
        put(state, portal::ORDER_VIEWER_OBJECT, object);

        let print = add(state, portal::BUTTON, "Print", Action::None);
        put(state, portal::BUTTON, print);
        let close = add(state, portal::BUTTON, "", Action::CloseViewer);
        state.nodes[close]
            .attrs
            .insert("class".to_string(), "btn-close".to_string());
        put(state, portal::BUTTON, close);
    }

    fn submit_search(&self, state: &mut State) {
        let captcha = state
            .fills
            .get(portal::CAPTCHA_INPUT)
            .cloned()
            .unwrap_or_default();
        state.submitted_captchas.push(captcha);

        if state.captcha_rejections_left > 0 {
            state.captcha_rejections_left -= 1;
            show_modal(state, "Invalid Captcha...!!!");
        } else if self.cases.is_empty() {
            show_modal(state, "Record not found");
        } else {
            state.view = View::Results;
            self.build_results(state);
        }
    }

    fn node<'s>(&self, state: &'s State, element: &FakeElement) -> SessionResult<&'s Node> {
        if element.generation != state.generation {
            return Err(SessionError::Stale);
        }
        state.nodes.get(element.id).ok_or(SessionError::Stale)
    }

    fn failing(&self, state: &State, selector: &str) -> bool {
        match state.view {
            View::Detail(index) => self.cases[index].failing.iter().any(|s| *s == selector),
            _ => false,
        }
    }
}

fn add(state: &mut State, key: &str, text: &str, action: Action) -> usize {
    state.nodes.push(Node {
        key: key.to_string(),
        text: text.to_string(),
        attrs: HashMap::new(),
        children: HashMap::new(),
        action,
        text_fails: false,
        click_fails: false,
    });
    state.nodes.len() - 1
}

fn put(state: &mut State, selector: &str, id: usize) {
    state.page.entry(selector.to_string()).or_default().push(id);
}

fn child(state: &mut State, parent: usize, selector: &'static str, id: usize) {
    state.nodes[parent]
        .children
        .entry(selector)
        .or_default()
        .push(id);
}

/// A row node with one `td` child per cell
fn row_node(state: &mut State, key: &str, cells: &[&str]) -> usize {
    let row = add(state, key, &cells.join(" "), Action::None);
    for cell in cells {
        let id = add(state, portal::CELL, cell, Action::None);
        child(state, row, portal::CELL, id);
    }
    row
}

fn show_modal(state: &mut State, message: &str) {
    state.modal = Some(message.to_string());
    let modal = add(state, portal::VALIDATION_MODAL, message, Action::None);
    state.page.insert(portal::VALIDATION_MODAL.to_string(), vec![modal]);
}

fn remove(state: &mut State, selectors: &[&str]) {
    for selector in selectors {
        state.page.remove(*selector);
    }
}

#[async_trait]
impl NavigableSession for FakePortal {
    type Element = FakeElement;

    async fn open(&self, _url: &str) -> SessionResult<()> {
        let mut state = self.lock();
        self.navigate(&mut state, View::Search);
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> SessionResult<Vec<FakeElement>> {
        let state = self.lock();
        if self.failing(&state, selector) {
            return Err(SessionError::driver(format!("injected failure on {}", selector)));
        }
        Ok(state
            .page
            .get(selector)
            .map(|ids| {
                ids.iter()
                    .map(|id| FakeElement {
                        id: *id,
                        generation: state.generation,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_all_within(
        &self,
        parent: &FakeElement,
        selector: &str,
    ) -> SessionResult<Vec<FakeElement>> {
        let state = self.lock();
        let node = self.node(&state, parent)?;
        Ok(node
            .children
            .get(selector)
            .map(|ids| {
                ids.iter()
                    .map(|id| FakeElement {
                        id: *id,
                        generation: state.generation,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn text(&self, element: &FakeElement) -> SessionResult<String> {
        let state = self.lock();
        let node = self.node(&state, element)?;
        if node.text_fails {
            return Err(SessionError::driver("injected text failure"));
        }
        Ok(node.text.clone())
    }

    async fn attribute(&self, element: &FakeElement, name: &str) -> SessionResult<Option<String>> {
        let state = self.lock();
        Ok(self.node(&state, element)?.attrs.get(name).cloned())
    }

    async fn click(&self, element: &FakeElement) -> SessionResult<()> {
        let mut state = self.lock();
        let node = self.node(&state, element)?;
        let (action, click_fails) = (node.action, node.click_fails);
        match action {
            Action::None => {}
            Action::OpenCase(index) => {
                state.visited.push(index);
                self.navigate(&mut state, View::Detail(index));
            }
            Action::OpenPanel(row) => self.open_panel(&mut state, row),
            Action::OpenViewer(order) => self.open_viewer(&mut state, order),
            Action::CloseViewer => {
                state.viewer_closes += 1;
                remove(&mut state, &[portal::ORDER_VIEWER_OBJECT, portal::BUTTON]);
            }
        }
        if click_fails {
            return Err(SessionError::driver("injected click failure"));
        }
        Ok(())
    }

    async fn scroll_into_view(&self, element: &FakeElement) -> SessionResult<()> {
        let state = self.lock();
        self.node(&state, element).map(|_| ())
    }

    async fn select_by_text(&self, element: &FakeElement, text: &str) -> SessionResult<bool> {
        let mut state = self.lock();
        let key = self.node(&state, element)?.key.clone();
        state.fills.insert(key, text.to_string());
        Ok(true)
    }

    async fn fill(&self, element: &FakeElement, text: &str) -> SessionResult<()> {
        let mut state = self.lock();
        let key = self.node(&state, element)?.key.clone();
        state.fills.insert(key, text.to_string());
        Ok(())
    }

    async fn execute_script(&self, code: &str) -> SessionResult<JsonValue> {
        let mut state = self.lock();
        if code == portal::SUBMIT_SEARCH_SCRIPT {
            self.submit_search(&mut state);
        } else if code == portal::CLOSE_BUSINESS_SCRIPT {
            state.panel_closes += 1;
            remove(&mut state, &[portal::BUSINESS_PANEL, portal::BUSINESS_ROWS]);
        } else if code == portal::DISMISS_VALIDATION_SCRIPT {
            state.modal = None;
            remove(&mut state, &[portal::VALIDATION_MODAL]);
        } else if code == portal::REFRESH_CAPTCHA_SCRIPT {
            state.captcha_refreshes += 1;
        }
        Ok(JsonValue::Null)
    }

    async fn screenshot(&self, element: &FakeElement) -> SessionResult<Vec<u8>> {
        let state = self.lock();
        self.node(&state, element)?;
        Ok(b"\x89PNG fake captcha".to_vec())
    }

    async fn cookies(&self) -> SessionResult<Vec<SessionCookie>> {
        Ok(self.cookies.clone())
    }

    async fn back(&self) -> SessionResult<()> {
        let mut state = self.lock();
        if let View::Detail(_) = state.view {
            self.navigate(&mut state, View::Results);
        }
        Ok(())
    }

    async fn check(&self, condition: &Condition) -> SessionResult<bool> {
        let state = self.lock();
        let present = state
            .page
            .get(condition.selector())
            .is_some_and(|ids| !ids.is_empty());
        Ok(match condition {
            Condition::Invisible(_) => !present,
            _ => present,
        })
    }

    fn poll_interval(&self) -> Duration {
        Duration::from_millis(1)
    }
}

// ========== collaborators ==========

/// Returns queued answers, then a fixed fallback
pub struct ScriptedOcr {
    answers: Mutex<VecDeque<AppResult<String>>>,
}

impl ScriptedOcr {
    pub fn new() -> Self {
        Self {
            answers: Mutex::new(VecDeque::new()),
        }
    }

    pub fn answering(self, answer: AppResult<String>) -> Self {
        self.answers.lock().unwrap().push_back(answer);
        self
    }
}

#[async_trait]
impl OcrEngine for ScriptedOcr {
    async fn recognize_text(&self, _image: &[u8]) -> AppResult<String> {
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(" x7Kq2\n".to_string()))
    }
}

#[derive(Default)]
pub struct MemoryStore {
    pub blobs: Mutex<Vec<(String, Vec<u8>)>>,
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn exists(&self, name: &str) -> AppResult<bool> {
        Ok(self.blobs.lock().unwrap().iter().any(|(n, _)| n == name))
    }

    async fn delete(&self, name: &str) -> AppResult<()> {
        self.blobs.lock().unwrap().retain(|(n, _)| n != name);
        Ok(())
    }

    async fn put(&self, name: &str, bytes: Vec<u8>, _overwrite: bool) -> AppResult<String> {
        self.blobs.lock().unwrap().push((name.to_string(), bytes));
        Ok(format!("https://blobs.test/orders/{}", name))
    }
}

#[derive(Default)]
pub struct MemorySink {
    pub records: Mutex<Vec<CaseRecord>>,
    pub fail: bool,
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn insert_one(&self, record: &CaseRecord) -> AppResult<()> {
        if self.fail {
            return Err(AppError::io("memory", std::io::Error::other("sink offline")));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

// ========== document server ==========

pub const PDF_BODY: &[u8] = b"%PDF-1.4 fake order";

/// Serves `PDF_BODY` for every request; returns the address and the request heads seen
pub async fn spawn_document_server() -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = requests.clone();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let seen = seen.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                seen.lock()
                    .unwrap()
                    .push(String::from_utf8_lossy(&buf[..n]).to_string());

                let head = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/pdf\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    PDF_BODY.len()
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(PDF_BODY).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, requests)
}

// ========== config ==========

/// One pass, short waits, every file under `dir`
pub fn test_config(portal_url: &str, dir: &Path) -> Config {
    Config {
        portal_url: portal_url.to_string(),
        case_types: vec!["EX - EXECUTION".to_string()],
        roles: vec![PartyRole::Petitioner],
        staging_dir: dir.join("pdf"),
        captcha_path: dir.join("temp.png"),
        records_path: dir.join("cases.jsonl"),
        log_dir: dir.join("logs"),
        timeouts: Timeouts {
            control_ms: 200,
            panel_ms: 50,
            viewer_ms: 50,
            results_ms: 200,
            navigation_ms: 200,
            detail_settle_ms: 0,
            poll_ms: 1,
        },
        ..Config::default()
    }
}
