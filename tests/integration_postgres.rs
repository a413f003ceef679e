//! Paridad de punta a punta contra el hub real y una base con la extensión.
//! Requiere DATABASE_URL y PARITY_ONLINE=1; sin ambos los tests se omiten.

use clap::Parser;
use pgtok_parity::app::{execute, first_failure, run_plans};
use pgtok_parity::cli::Cli;
use pgtok_parity::config::HarnessConfig;
use parity_adapters::HttpArtifactFetcher;
use parity_core::ParityError;
use parity_persistence::PgTokenizerEngine;

fn online_db_url() -> Option<String> {
    let url = std::env::var("DATABASE_URL").unwrap_or_default();
    if url.is_empty() || std::env::var("PARITY_ONLINE").as_deref() != Ok("1") {
        eprintln!("DATABASE_URL / PARITY_ONLINE=1 no definidos; omitiendo test de integración");
        return None;
    }
    Some(url)
}

fn config(db_url: &str, extra: &[&str]) -> HarnessConfig {
    let mut argv = vec!["pgtok-parity", "--db-url", db_url];
    argv.extend_from_slice(extra);
    HarnessConfig::from_cli(Cli::try_parse_from(argv).expect("parse")).expect("config")
}

#[test]
fn builtin_scenarios_match_their_frozen_vectors() {
    let Some(db_url) = online_db_url() else { return };
    let cfg = config(&db_url, &[]);
    let mut out = Vec::new();

    let result = execute(&cfg, &mut out);

    let text = String::from_utf8(out).expect("utf8");
    assert!(result.is_ok(), "{result:?}\n{text}");
    assert!(text.contains("[PASS] bert-base-uncased (27 ids)"), "{text}");
    assert!(text.contains("[PASS] bert-base-chinese (9 ids)"), "{text}");
}

#[test]
fn rerun_with_replace_produces_identical_ids() {
    let Some(db_url) = online_db_url() else { return };
    let cfg = config(&db_url,
                     &["--scenario", "bert-base-chinese", "--model-name", "parity_rerun", "--replace", "--persist"]);
    let fetcher = HttpArtifactFetcher::new(cfg.http_timeout).expect("client");
    let connect = || PgTokenizerEngine::connect(&cfg.db).map_err(|e| ParityError::Connection(e.into()));

    let first = run_plans(&cfg.plans, &fetcher, connect);
    let second = run_plans(&cfg.plans, &fetcher, connect);

    assert_eq!(first[0].summary.produced, second[0].summary.produced);
    assert!(first_failure(first).is_ok());

    // Limpieza con una corrida más que borra al terminar.
    let cleanup = config(&db_url,
                         &["--scenario", "bert-base-chinese", "--model-name", "parity_rerun", "--replace", "--persist",
                           "--cleanup"]);
    assert!(first_failure(second).is_ok());
    assert!(execute(&cleanup, &mut std::io::sink()).is_ok());
}

#[test]
fn unknown_hub_path_fails_before_touching_the_database() {
    let Some(db_url) = online_db_url() else { return };
    let mut cfg = config(&db_url, &["--scenario", "bert-base-uncased"]);
    cfg.plans[0].scenario.artifact_url = "https://huggingface.co/google-bert/does-not-exist/resolve/main/tokenizer.json".into();
    let fetcher = HttpArtifactFetcher::new(cfg.http_timeout).expect("client");

    let runs = run_plans(&cfg.plans, &fetcher, || -> Result<PgTokenizerEngine, ParityError> {
        panic!("no debe abrirse una sesión si el fetch falla")
    });

    assert_eq!(first_failure(runs).unwrap_err().exit_code(), 3);
}
