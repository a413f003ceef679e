//! Parseo de la línea de comandos.

use clap::Parser;
use pgtok_parity::cli::Cli;
use pgtok_parity::report::ReportFormat;

const DB: &str = "postgresql://postgres:pw@localhost:5432/postgres";

#[test]
fn db_url_accepts_both_spellings() {
    let a = Cli::try_parse_from(["pgtok-parity", "--db-url", DB]).unwrap();
    let b = Cli::try_parse_from(["pgtok-parity", "--db_url", DB]).unwrap();
    assert_eq!(a.db_url, DB);
    assert_eq!(b.db_url, DB);
}

#[test]
fn defaults() {
    let cli = Cli::try_parse_from(["pgtok-parity", "--db-url", DB]).unwrap();
    assert!(cli.scenarios.is_empty());
    assert_eq!(cli.determinism_rounds, 2);
    assert_eq!(cli.format, ReportFormat::Text);
    assert!(!cli.replace && !cli.persist && !cli.cleanup && !cli.advisory);
    if std::env::var("HF_ENDPOINT").is_err() {
        assert_eq!(cli.hub_url, "https://huggingface.co");
    }
}

#[test]
fn scenario_is_repeatable() {
    let cli = Cli::try_parse_from(["pgtok-parity",
                                   "--db-url",
                                   DB,
                                   "--scenario",
                                   "bert-base-uncased",
                                   "--scenario",
                                   "bert-base-chinese",
                                   "--format",
                                   "json"]).unwrap();
    assert_eq!(cli.scenarios, vec!["bert-base-uncased", "bert-base-chinese"]);
    assert_eq!(cli.format, ReportFormat::Json);
}

#[test]
fn zero_determinism_rounds_is_rejected() {
    let err = Cli::try_parse_from(["pgtok-parity", "--db-url", DB, "--determinism-rounds", "0"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[test]
fn cleanup_requires_persist() {
    let err = Cli::try_parse_from(["pgtok-parity", "--db-url", DB, "--cleanup"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    assert!(Cli::try_parse_from(["pgtok-parity", "--db-url", DB, "--cleanup", "--persist"]).is_ok());
}

#[test]
fn missing_db_url_is_an_error_without_env() {
    if std::env::var("DATABASE_URL").is_ok() {
        eprintln!("DATABASE_URL definido: omitiendo test");
        return;
    }
    let err = Cli::try_parse_from(["pgtok-parity"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}
