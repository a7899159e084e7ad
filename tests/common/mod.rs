//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;

use contractiq::history::{FULL_RECORD_PREFIX, HISTORY_KEY, HistoryStore};
use contractiq::models::{AnalysisResult, HistoryEntry, RiskItem};
use contractiq::storage::{FileStore, KeyValueStore};
use tempfile::TempDir;

/// Builder for a data directory pre-populated through the library
pub struct DataDirBuilder {
    temp_dir: TempDir,
    ids: Vec<String>,
}

impl DataDirBuilder {
    /// Create a new builder with an empty data directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir, ids: Vec::new() }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Ids of the recorded analyses, in the order they were added
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    fn store(&self) -> HistoryStore<FileStore> {
        let backend = FileStore::open(self.temp_dir.path()).expect("Failed to open data dir");
        HistoryStore::new(backend)
    }

    /// Record a completed analysis the way `analyze` does
    pub fn with_analysis(mut self, file_name: &str, result: &AnalysisResult) -> Self {
        let id = self.store().record_analysis(file_name, result).expect("Failed to record");
        self.ids.push(id);
        self
    }

    /// Add a summary entry whose full report was never stored
    pub fn with_summary_only(mut self, entry: HistoryEntry) -> Self {
        let mut store = self.store();
        let mut entries = store.list().expect("Failed to read history");
        self.ids.push(entry.id.clone());
        entries.insert(0, entry);

        let json = serde_json::to_string(&entries).expect("Failed to serialize history");
        store.backend_mut().set(HISTORY_KEY, &json).expect("Failed to write history");
        self
    }

    /// Store a full report that no summary entry points at
    pub fn with_orphan_record(self, id: &str, result: &AnalysisResult) -> Self {
        let json = serde_json::to_string(result).expect("Failed to serialize record");
        let mut backend = FileStore::open(self.temp_dir.path()).expect("Failed to open data dir");
        backend.set(&format!("{}{}", FULL_RECORD_PREFIX, id), &json).expect("Failed to write");
        self
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for DataDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for analysis reports
pub struct AnalysisBuilder {
    score: u8,
    risks: Vec<RiskItem>,
    contract_summary: String,
    explanation: Option<String>,
    negotiation_email: Option<String>,
}

impl AnalysisBuilder {
    pub fn new() -> Self {
        Self {
            score: 42,
            risks: Vec::new(),
            contract_summary: "Master services agreement".to_string(),
            explanation: Some("**High** risk found in payment terms.".to_string()),
            negotiation_email: None,
        }
    }

    pub fn score(mut self, score: u8) -> Self {
        self.score = score;
        self
    }

    pub fn risk(mut self, category: &str, severity: &str, check: &str, finding: &str) -> Self {
        self.risks.push(RiskItem {
            category: category.to_string(),
            severity: severity.to_string(),
            finding: finding.to_string(),
            expectation_check: check.to_string(),
            confidence: None,
        });
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.contract_summary = summary.to_string();
        self
    }

    pub fn explanation(mut self, explanation: &str) -> Self {
        self.explanation = Some(explanation.to_string());
        self
    }

    pub fn no_explanation(mut self) -> Self {
        self.explanation = None;
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.negotiation_email = Some(email.to_string());
        self
    }

    pub fn build(self) -> AnalysisResult {
        AnalysisResult {
            score: self.score,
            risks: self.risks,
            contract_summary: self.contract_summary,
            explanation: self.explanation,
            negotiation_email: self.negotiation_email,
        }
    }
}

impl Default for AnalysisBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary entry with the given id, as written by older versions
pub fn summary_entry(id: &str, file_name: &str, score: u8, summary: &str) -> HistoryEntry {
    HistoryEntry {
        id: id.to_string(),
        timestamp: 1_700_000_000_000,
        file_name: file_name.to_string(),
        score,
        summary: summary.to_string(),
    }
}

/// Answer exactly one HTTP request with `status_line` and a JSON `body`
///
/// Returns the base url to point the client at.
pub fn serve_once(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read local addr");

    thread::spawn(move || {
        let Ok((stream, _)) = listener.accept() else {
            return;
        };
        let mut reader = BufReader::new(stream.try_clone().expect("Failed to clone stream"));

        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap_or(0) == 0 {
                return;
            }
            if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                content_length = value.trim().parse().unwrap_or(0);
            }
            if line == "\r\n" {
                break;
            }
        }
        let mut body_bytes = vec![0u8; content_length];
        let _ = reader.read_exact(&mut body_bytes);

        let mut stream = stream;
        let _ = write!(
            stream,
            "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
             Connection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        let _ = stream.flush();
    });

    format!("http://{}", addr)
}

/// Base url of a port nothing listens on
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);
    format!("http://{}", addr)
}
