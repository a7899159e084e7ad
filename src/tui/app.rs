//! History browser state and event handling.
//!
//! Input syntax: `risk_filter | fuzzy_query`
//! - Filter portion (left of `|`): applied to the previewed report's risks when Enter is
//!   pressed, e.g. `severity:critical severity:high | msa`
//! - Fuzzy portion (right of `|`, or the whole input without a pipe): real-time fuzzy matching
//!   of history entries by file name and summary via nucleo
//!
//! The full report of the selected entry is loaded lazily and cached until the selection
//! moves to a different entry.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use nucleo::{Config, Nucleo};
use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::warn;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::clipboard::{ClipboardProvider, LazyClipboard, copy_email_with_provider};
use crate::filters::{FilterExpr, parse_filter};
use crate::history::HistoryStore;
use crate::models::{AnalysisResult, HistoryEntry};
use crate::storage::KeyValueStore;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
const MAX_QUERY_LEN: usize = 256;
const PREVIEW_SCROLL_STEP: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// Loaded report for one entry; `None` when only the summary exists
struct CachedPreview {
    id: String,
    record: Option<AnalysisResult>,
}

pub struct App<S: KeyValueStore> {
    store: HistoryStore<S>,
    clipboard: Box<dyn ClipboardProvider>,
    nucleo: Nucleo<HistoryEntry>,
    entry_count: usize,
    selected_idx: usize,
    search_query: String,
    should_quit: bool,
    risk_filter: FilterExpr,
    filter_error: Option<String>,
    last_enter_time: Option<Instant>,
    preview: Option<CachedPreview>,
    preview_scroll: u16,
    confirm_clear: bool,
    status_message: Option<StatusMessage>,
    needs_redraw: bool,
    last_draw_time: Instant,
}

/// Text the fuzzy matcher sees for an entry
fn match_text(entry: &HistoryEntry) -> String {
    format!("{} {}", entry.file_name, entry.summary)
}

fn build_matcher(entries: Vec<HistoryEntry>) -> Nucleo<HistoryEntry> {
    let nucleo = Nucleo::new(Config::DEFAULT, Arc::new(|| {}), None, 1);
    let injector = nucleo.injector();
    for entry in entries {
        injector.push(entry, |entry, cols| {
            cols[0] = match_text(entry).into();
        });
    }
    nucleo
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: HistoryStore<S>) -> Result<Self> {
        let entries = store.list()?;
        let entry_count = entries.len();

        Ok(Self {
            store,
            clipboard: Box::new(LazyClipboard::default()),
            nucleo: build_matcher(entries),
            entry_count,
            selected_idx: 0,
            search_query: String::new(),
            should_quit: false,
            risk_filter: FilterExpr::new(),
            filter_error: None,
            last_enter_time: None,
            preview: None,
            preview_scroll: 0,
            confirm_clear: false,
            status_message: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        })
    }

    /// Replace the system clipboard
    pub fn with_clipboard(mut self, clipboard: Box<dyn ClipboardProvider>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn store(&self) -> &HistoryStore<S> {
        &self.store
    }

    pub fn into_store(self) -> HistoryStore<S> {
        self.store
    }

    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn success(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Success, STATUS_SUCCESS_DURATION_MS);
    }

    fn error(&mut self, text: impl Into<String>) {
        self.set_status(text, MessageType::Error, STATUS_ERROR_DURATION_MS);
    }

    fn check_and_clear_expired_status(&mut self) {
        let expired =
            self.status_message.as_ref().is_some_and(|msg| Instant::now() >= msg.expires_at);
        if expired {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            self.check_and_clear_expired_status();
            self.nucleo.tick(10);
            self.sync_preview();

            // Redraw when dirty or every 100ms to pick up terminal resizes
            let now = Instant::now();
            let stale = now.duration_since(self.last_draw_time) >= Duration::from_millis(100);
            if self.needs_redraw || stale {
                let matched = self.collect_matched_items();
                let preview = self.preview_record();
                let state = RenderState {
                    search_query: &self.search_query,
                    total_count: self.entry_count,
                    risk_filter: &self.risk_filter,
                    filter_error: self.filter_error.as_deref(),
                    status_message: self.status_message.as_ref(),
                    preview_scroll: self.preview_scroll,
                    confirm_clear: self.confirm_clear,
                };
                terminal.draw(|f| render_ui(f, &matched, self.selected_idx, preview, &state))?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn collect_matched_items(&self) -> Vec<&HistoryEntry> {
        let snapshot = self.nucleo.snapshot();
        snapshot.matched_items(..snapshot.matched_item_count()).map(|item| item.data).collect()
    }

    fn matched_count(&self) -> usize {
        self.nucleo.snapshot().matched_item_count() as usize
    }

    fn selected_entry(&self) -> Option<&HistoryEntry> {
        let idx = u32::try_from(self.selected_idx).ok()?;
        self.nucleo.snapshot().get_matched_item(idx).map(|item| item.data)
    }

    /// Full report of the selected entry, if loaded and present
    fn preview_record(&self) -> Option<&AnalysisResult> {
        self.preview.as_ref().and_then(|p| p.record.as_ref())
    }

    /// Load the selected entry's full report unless it is already cached
    fn sync_preview(&mut self) {
        let Some(id) = self.selected_entry().map(|entry| entry.id.clone()) else {
            if self.preview.take().is_some() {
                self.needs_redraw = true;
            }
            return;
        };
        if self.preview.as_ref().is_some_and(|p| p.id == id) {
            return;
        }

        let record = self.store.load_full(&id).unwrap_or_else(|e| {
            warn!(%id, error = %e, "failed to load full report");
            None
        });
        self.preview = Some(CachedPreview { id, record });
        self.preview_scroll = 0;
        self.needs_redraw = true;
    }

    fn handle_action(&mut self, action: Action) {
        if !matches!(action, Action::ClearHistory | Action::None) && self.confirm_clear {
            self.confirm_clear = false;
            self.needs_redraw = true;
        }

        let total_items = self.matched_count();
        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearSearch => {
                if self.search_query.is_empty() {
                    self.should_quit = true;
                } else {
                    self.search_query.clear();
                    self.update_nucleo_pattern();
                    self.selected_idx = 0;
                    self.needs_redraw = true;
                }
            }
            Action::MoveUp => self.move_selection(-1, total_items),
            Action::MoveDown => self.move_selection(1, total_items),
            Action::PageUp => self.move_selection(-10, total_items),
            Action::PageDown => self.move_selection(10, total_items),
            Action::ScrollPreviewUp => {
                self.preview_scroll = self.preview_scroll.saturating_sub(PREVIEW_SCROLL_STEP);
                self.needs_redraw = true;
            }
            Action::ScrollPreviewDown => {
                self.preview_scroll = self.preview_scroll.saturating_add(PREVIEW_SCROLL_STEP);
                self.needs_redraw = true;
            }
            Action::UpdateSearch(c) => self.update_search(c),
            Action::DeleteChar => self.delete_char(),
            Action::ApplyFilter => {
                // Debounce repeated Enter presses
                let should_apply =
                    self.last_enter_time.is_none_or(|t| t.elapsed() >= Duration::from_millis(150));
                if should_apply {
                    self.apply_filter();
                    self.last_enter_time = Some(Instant::now());
                }
            }
            Action::CopyEmail => self.copy_email(),
            Action::DeleteEntry => self.delete_selected(),
            Action::ClearHistory => self.clear_history(),
            Action::Refresh => match self.reload() {
                Ok(()) => self.success("✓ History reloaded"),
                Err(e) => self.error(format!("✗ Reload failed: {:#}", e)),
            },
            Action::None => {}
        }
    }

    fn copy_email(&mut self) {
        if self.selected_entry().is_none() {
            self.error("✗ No entry selected");
            return;
        }
        self.sync_preview();

        let outcome = match self.preview.as_ref().and_then(|p| p.record.as_ref()) {
            Some(result) => copy_email_with_provider(result, self.clipboard.as_mut()),
            None => Err(anyhow!("Only the summary of this analysis was saved")),
        };
        match outcome {
            Ok(()) => self.success("✓ Negotiation email copied to clipboard"),
            Err(e) => self.error(format!("✗ {}", e)),
        }
    }

    fn delete_selected(&mut self) {
        let Some((id, file_name)) =
            self.selected_entry().map(|entry| (entry.id.clone(), entry.file_name.clone()))
        else {
            self.error("✗ No entry selected");
            return;
        };

        match self.store.delete_one(&id) {
            Ok(true) => {
                self.success(format!("✓ Deleted {}", file_name));
                if let Err(e) = self.reload() {
                    self.error(format!("✗ Reload failed: {:#}", e));
                }
            }
            Ok(false) => self.error("✗ Entry no longer exists"),
            Err(e) => self.error(format!("✗ Delete failed: {:#}", e)),
        }
    }

    /// First press asks for confirmation, the second clears everything
    fn clear_history(&mut self) {
        if !self.confirm_clear {
            self.confirm_clear = true;
            self.needs_redraw = true;
            return;
        }

        self.confirm_clear = false;
        match self.store.clear_all() {
            Ok(()) => {
                self.success("✓ History cleared");
                if let Err(e) = self.reload() {
                    self.error(format!("✗ Reload failed: {:#}", e));
                }
            }
            Err(e) => self.error(format!("✗ Clear failed: {:#}", e)),
        }
    }

    /// Re-read the summary list and rebuild the matcher
    fn reload(&mut self) -> Result<()> {
        let entries = self.store.list()?;
        self.entry_count = entries.len();
        self.nucleo = build_matcher(entries);
        self.update_nucleo_pattern();
        self.settle_matcher();
        self.preview = None;

        let total = self.matched_count();
        self.selected_idx = self.selected_idx.min(total.saturating_sub(1));
        self.needs_redraw = true;
        Ok(())
    }

    /// Tick until the background match has finished
    fn settle_matcher(&mut self) {
        while self.nucleo.tick(10).running {}
    }

    fn move_selection(&mut self, delta: isize, total: usize) {
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = self.selected_idx.saturating_add_signed(delta);
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }
    }

    fn update_search(&mut self, c: char) {
        if self.search_query.len() < MAX_QUERY_LEN {
            self.search_query.push(c);
            self.update_nucleo_pattern();
            self.selected_idx = 0;
            self.needs_redraw = true;
        }
    }

    fn delete_char(&mut self) {
        if self.search_query.pop().is_some() {
            self.update_nucleo_pattern();
            self.selected_idx = 0;
            self.needs_redraw = true;
        }
    }

    fn update_nucleo_pattern(&mut self) {
        let fuzzy_query = self.parse_input().1.to_string();
        self.nucleo.pattern.reparse(
            0,
            &fuzzy_query,
            nucleo::pattern::CaseMatching::Smart,
            nucleo::pattern::Normalization::Smart,
            false,
        );
        self.nucleo.tick(10);
    }

    /// Split the input into (filter_portion, fuzzy_portion)
    fn parse_input(&self) -> (Option<&str>, &str) {
        match self.search_query.split_once('|') {
            Some((filter, fuzzy)) => {
                let filter = filter.trim();
                ((!filter.is_empty()).then_some(filter), fuzzy.trim())
            }
            None => (None, self.search_query.as_str()),
        }
    }

    /// Parse the filter portion and apply it to the report pane
    fn apply_filter(&mut self) {
        let parsed = match self.parse_input().0 {
            Some(filter) => parse_filter(filter),
            None => Ok(FilterExpr::new()),
        };

        match parsed {
            Ok(expr) => {
                self.risk_filter = expr;
                self.filter_error = None;
                self.preview_scroll = 0;
            }
            Err(e) => {
                self.filter_error = Some(format!(
                    "Parse error: {:#} | Try: severity:high category:payment | search",
                    e
                ));
            }
        }
        self.needs_redraw = true;
    }
}
