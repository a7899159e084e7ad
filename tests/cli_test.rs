/// CLI binary integration tests using assert_cmd
///
/// These tests invoke the actual binary against a temporary data directory
mod common;

use std::path::Path;

use assert_cmd::Command;
use common::{AnalysisBuilder, DataDirBuilder, closed_port_url, serve_once, summary_entry};
use contractiq::history::HistoryStore;
use contractiq::models::{AnalysisResponse, HistoryEntry};
use contractiq::storage::FileStore;
use predicates::prelude::*;

fn contractiq(data_dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_contractiq"));
    cmd.env("CONTRACTIQ_DATA_DIR", data_dir)
        .env_remove("CONTRACTIQ_API_URL")
        .env_remove("CONTRACTIQ_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn stored_entries(data_dir: &Path) -> Vec<HistoryEntry> {
    HistoryStore::new(FileStore::open(data_dir).unwrap()).list().unwrap()
}

#[test]
fn test_cli_no_command_shows_help_message() {
    let dir = DataDirBuilder::new().build();
    contractiq(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --help for usage information"));
}

#[test]
fn test_cli_help_flag() {
    let dir = DataDirBuilder::new().build();
    contractiq(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("browse"));
}

#[test]
fn test_cli_history_empty() {
    let dir = DataDirBuilder::new().build();
    contractiq(dir.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No analyses yet."));
}

#[test]
fn test_cli_history_json_empty() {
    let dir = DataDirBuilder::new().build();
    contractiq(dir.path()).args(["history", "--json"]).assert().success().stdout("[]\n");
}

#[test]
fn test_cli_history_lists_newest_first() {
    let dir = DataDirBuilder::new()
        .with_analysis("nda.pdf", &AnalysisBuilder::new().score(88).build())
        .with_analysis("lease.docx", &AnalysisBuilder::new().score(55).build())
        .build();

    let output = contractiq(dir.path()).arg("history").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lease = stdout.find("lease.docx").unwrap();
    let nda = stdout.find("nda.pdf").unwrap();
    assert!(lease < nda);
    assert!(stdout.contains(" 88/100"));
}

#[test]
fn test_cli_data_dir_flag_overrides_env() {
    let env_dir = DataDirBuilder::new().build();
    let flag_dir = DataDirBuilder::new()
        .with_analysis("msa.pdf", &AnalysisBuilder::new().build())
        .build();

    contractiq(env_dir.path())
        .arg("history")
        .arg("--data-dir")
        .arg(flag_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("msa.pdf"));
}

#[test]
fn test_cli_show_full_report() {
    let report = AnalysisBuilder::new()
        .score(35)
        .risk("Liability", "Critical", "Mismatch", "Your liability is unlimited.")
        .risk("Payment Terms", "High", "Mismatch", "Payment terms are Net 90.")
        .email("Dear Acme,\nWe propose Net 30.")
        .build();
    let builder = DataDirBuilder::new().with_analysis("msa.pdf", &report);
    let id = builder.ids()[0].clone();
    let dir = builder.build();

    contractiq(dir.path())
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 35/100"))
        .stdout(predicate::str::contains("[Critical] Liability"))
        .stdout(predicate::str::contains("High risk found in payment terms."))
        .stdout(predicate::str::contains("We propose Net 30."));
}

#[test]
fn test_cli_show_with_filter() {
    let report = AnalysisBuilder::new()
        .risk("Liability", "Critical", "Mismatch", "Your liability is unlimited.")
        .risk("Payment Terms", "High", "Mismatch", "Payment terms are Net 90.")
        .build();
    let builder = DataDirBuilder::new().with_analysis("msa.pdf", &report);
    let id = builder.ids()[0].clone();
    let dir = builder.build();

    contractiq(dir.path())
        .args(["show", &id, "--filter", "severity:high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Risks (1 of 2)"))
        .stdout(predicate::str::contains("[High] Payment Terms"))
        .stdout(predicate::str::contains("[Critical]").not());
}

#[test]
fn test_cli_show_invalid_filter() {
    let builder = DataDirBuilder::new().with_analysis("msa.pdf", &AnalysisBuilder::new().build());
    let id = builder.ids()[0].clone();
    let dir = builder.build();

    contractiq(dir.path())
        .args(["show", &id, "--filter", "owner:me"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown field"));
}

#[test]
fn test_cli_show_summary_only_entry() {
    let dir = DataDirBuilder::new()
        .with_summary_only(summary_entry("1600000000000", "old.docx", 61, "Older contract..."))
        .build();

    contractiq(dir.path())
        .args(["show", "1600000000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("old.docx"))
        .stdout(predicate::str::contains("Older contract..."))
        .stdout(predicate::str::contains("older history item without full details"));
}

#[test]
fn test_cli_show_unknown_id() {
    let dir = DataDirBuilder::new().build();
    contractiq(dir.path())
        .args(["show", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No analysis with id 42"));
}

#[test]
fn test_cli_delete() {
    let builder = DataDirBuilder::new()
        .with_analysis("a.pdf", &AnalysisBuilder::new().build())
        .with_analysis("b.pdf", &AnalysisBuilder::new().build());
    let first = builder.ids()[0].clone();
    let dir = builder.build();

    contractiq(dir.path())
        .args(["delete", &first])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted {}", first)));

    let entries = stored_entries(dir.path());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file_name, "b.pdf");
}

#[test]
fn test_cli_delete_unknown_id() {
    let dir = DataDirBuilder::new().build();
    contractiq(dir.path())
        .args(["delete", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No analysis with id missing"));
}

#[test]
fn test_cli_clear_with_yes() {
    let dir = DataDirBuilder::new()
        .with_analysis("a.pdf", &AnalysisBuilder::new().build())
        .with_analysis("b.pdf", &AnalysisBuilder::new().build())
        .build();

    contractiq(dir.path())
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("History cleared"));
    assert!(stored_entries(dir.path()).is_empty());
}

#[test]
fn test_cli_clear_declined() {
    let dir = DataDirBuilder::new().with_analysis("a.pdf", &AnalysisBuilder::new().build()).build();

    contractiq(dir.path())
        .arg("clear")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Delete all 1 analyses? [y/N]"))
        .stdout(predicate::str::contains("Cancelled"));
    assert_eq!(stored_entries(dir.path()).len(), 1);
}

#[test]
fn test_cli_clear_confirmed_on_stdin() {
    let dir = DataDirBuilder::new().with_analysis("a.pdf", &AnalysisBuilder::new().build()).build();

    contractiq(dir.path()).arg("clear").write_stdin("yes\n").assert().success();
    assert!(stored_entries(dir.path()).is_empty());
}

#[test]
fn test_cli_copy_email_summary_only_entry() {
    let dir = DataDirBuilder::new()
        .with_summary_only(summary_entry("1600000000000", "old.docx", 61, "Older contract..."))
        .build();

    contractiq(dir.path())
        .args(["copy-email", "1600000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("there is no email to copy"));
}

#[test]
fn test_cli_copy_email_without_email() {
    let builder = DataDirBuilder::new().with_analysis("msa.pdf", &AnalysisBuilder::new().build());
    let id = builder.ids()[0].clone();
    let dir = builder.build();

    contractiq(dir.path())
        .args(["copy-email", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no negotiation email"));
}

#[test]
fn test_cli_analyze_requires_expectations() {
    let dir = DataDirBuilder::new().build();
    let contract = dir.path().join("msa.pdf");
    std::fs::write(&contract, b"%PDF-1.4 contract").unwrap();

    contractiq(dir.path())
        .arg("analyze")
        .arg(&contract)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--expect"));
}

#[test]
fn test_cli_analyze_blank_expectations() {
    let dir = DataDirBuilder::new().build();
    let contract = dir.path().join("msa.pdf");
    std::fs::write(&contract, b"%PDF-1.4 contract").unwrap();

    contractiq(dir.path())
        .arg("analyze")
        .arg(&contract)
        .args(["--expect", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Describe your expectations"));
}

#[test]
fn test_cli_analyze_missing_file() {
    let dir = DataDirBuilder::new().build();
    contractiq(dir.path())
        .arg("analyze")
        .arg(dir.path().join("nope.pdf"))
        .args(["--expect", "Net 30"])
        .assert()
        .failure();
}

#[test]
fn test_cli_analyze_service_unreachable() {
    let dir = DataDirBuilder::new().build();
    let contract = dir.path().join("msa.pdf");
    std::fs::write(&contract, b"%PDF-1.4 contract").unwrap();

    contractiq(dir.path())
        .env("CONTRACTIQ_TIMEOUT_SECS", "5")
        .arg("analyze")
        .arg(&contract)
        .args(["--expect", "Net 30 payment terms"])
        .args(["--api-url", &closed_port_url()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Analysis failed"));
    assert!(stored_entries(dir.path()).is_empty());
}

#[test]
fn test_cli_analyze_records_history() {
    let dir = DataDirBuilder::new().build();
    let contract = dir.path().join("msa.pdf");
    std::fs::write(&contract, b"%PDF-1.4 contract").unwrap();

    let analysis = AnalysisBuilder::new()
        .score(42)
        .risk("Payment Terms", "High", "Mismatch", "Payment terms are Net 90.")
        .email("Dear Acme,")
        .build();
    let body = serde_json::to_string(&AnalysisResponse { analysis }).unwrap();
    let url = serve_once("HTTP/1.1 200 OK", body);

    contractiq(dir.path())
        .env("CONTRACTIQ_TIMEOUT_SECS", "10")
        .arg("analyze")
        .arg(&contract)
        .args(["--expect", "Net 30 payment terms"])
        .args(["--api-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 42/100"))
        .stdout(predicate::str::contains("[High] Payment Terms"))
        .stdout(predicate::str::contains("Saved to history as"));

    let entries = stored_entries(dir.path());
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].file_name, "msa.pdf");
    assert_eq!(entries[0].score, 42);
    assert!(entries[0].summary.ends_with("..."));
}

#[test]
fn test_cli_analyze_succeeds_when_history_write_fails() {
    let dir = DataDirBuilder::new().build();
    let contract = dir.path().join("msa.pdf");
    std::fs::write(&contract, b"%PDF-1.4 contract").unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"regular file").unwrap();

    let body = serde_json::to_string(&AnalysisResponse {
        analysis: AnalysisBuilder::new().score(42).build(),
    })
    .unwrap();
    let url = serve_once("HTTP/1.1 200 OK", body);

    let output = contractiq(&blocker.join("history"))
        .env("CONTRACTIQ_TIMEOUT_SECS", "10")
        .arg("analyze")
        .arg(&contract)
        .args(["--expect", "Net 30 payment terms"])
        .args(["--api-url", &url])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stdout.contains("Score: 42/100"));
    assert!(!stdout.contains("Saved to history as"));
    assert!(stderr.contains("failed to record analysis"));
    // stderr is a pipe here, so the log line carries no colour codes
    assert!(!stderr.contains("\x1b["));
}
