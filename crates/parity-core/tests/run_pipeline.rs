//! Run completo sobre la fuente y el motor en memoria.

use std::cell::Cell;

use parity_core::engine::EngineCall;
use parity_core::stages::bind_tokenizer;
use parity_core::{ErrorClass, ExpectedSequence, FetchError, InMemoryTokenizerEngine, MismatchPolicy, ModelName, ParityError,
                  ParityOutcome, ParityRun, RunPlan, RunStage, Scenario, StaticArtifactSource, TokenizerName};

const URL: &str = "http://hub.test/acme/wordlevel/resolve/main/tokenizer.json";
const CONFIG: &str = r#"{"model": {"type": "WordLevel", "unk_token": "[UNK]",
    "vocab": {"[UNK]": 0, "postgres": 11, "is": 12, "a": 13, "database": 14}}}"#;

fn scenario(expected: &[u32]) -> Scenario {
    Scenario { name: "wordlevel".into(),
               artifact_url: URL.into(),
               input: "postgres is a database".into(),
               expected: ExpectedSequence::new(expected.to_vec()) }
}

fn plan(expected: &[u32]) -> RunPlan {
    RunPlan::new(scenario(expected),
                 ModelName::parse("model1").unwrap(),
                 TokenizerName::parse("tokenizer1").unwrap())
}

/// Presta el motor al run; el préstamo termina cuando el run suelta la sesión.
fn session<'a>(engine: &'a mut InMemoryTokenizerEngine) -> impl FnOnce() -> Result<&'a mut InMemoryTokenizerEngine, ParityError> + 'a {
    move || Ok(engine)
}

fn source() -> StaticArtifactSource {
    StaticArtifactSource::new().with_document(URL, CONFIG)
}

#[test]
fn full_run_reaches_checked_with_exact_match() {
    let src = source();
    let mut engine = InMemoryTokenizerEngine::new();
    let mut run = ParityRun::new(plan(&[11, 12, 13, 14]));

    let outcome = run.run_to_end(&src, session(&mut engine)).expect("run ok");

    assert_eq!(outcome, ParityOutcome::Match);
    assert_eq!(run.stage(), RunStage::Checked);
    assert_eq!(run.failed_at(), None);
    let summary = run.summary();
    assert!(summary.passed);
    assert_eq!(summary.artifact.as_ref().map(|a| a.byte_len), Some(CONFIG.len()));
    assert_eq!(run.log().variants().last(), Some(&"RunCompleted"));
}

#[test]
fn unreachable_artifact_never_touches_the_engine() {
    let src = StaticArtifactSource::new().with_failure(URL, FetchError::Transport("connection refused".into()));
    let connected = Cell::new(false);
    let mut run = ParityRun::new(plan(&[11]));

    let err = run.run_to_end(&src, || {
                      connected.set(true);
                      Ok(InMemoryTokenizerEngine::new())
                  })
                 .unwrap_err();

    assert!(matches!(err, ParityError::ArtifactFetch { ref url, .. } if url == URL));
    assert_eq!(err.class(), ErrorClass::Network);
    assert!(!connected.get(), "la sesión no debe abrirse si el fetch falla");
    assert_eq!(run.failed_at(), Some(RunStage::Fetched));
    assert_eq!(run.stage(), RunStage::Init);
}

#[test]
fn http_status_is_reported_with_url() {
    let src = StaticArtifactSource::new().with_failure(URL, FetchError::Status { status: 503 });
    let mut run = ParityRun::new(plan(&[11]));
    let err = run.fetch(&src).unwrap_err();
    assert_eq!(err.to_string(), format!("artifact fetch failed for {URL}: http status 503"));
}

#[test]
fn connection_failure_stops_before_registration() {
    let src = source();
    let mut run = ParityRun::new(plan(&[11]));
    let err = run.run_to_end(&src, || -> Result<InMemoryTokenizerEngine, _> {
                      Err(ParityError::Connection(parity_core::EngineCallError::new(parity_core::EngineErrorKind::Connection,
                                                                                    "refused")))
                  })
                 .unwrap_err();
    assert_eq!(err.class(), ErrorClass::Connection);
    assert_eq!(run.stage(), RunStage::Fetched);
    assert_eq!(run.failed_at(), Some(RunStage::Registered));
    let tail: Vec<_> = run.log().variants().into_iter().rev().take(2).collect();
    assert_eq!(tail, vec!["StageFailed", "StageStarted"]);
}

#[test]
fn binding_to_unregistered_model_fails_at_binder() {
    let mut engine = InMemoryTokenizerEngine::new();
    let tok = TokenizerName::parse("tokenizer1").unwrap();
    let ghost = ModelName::parse("never_registered").unwrap();

    let err = bind_tokenizer(&mut engine, &tok, &ghost).unwrap_err();

    assert!(matches!(err, ParityError::Binding { ref model, .. } if model == "never_registered"));
    assert!(!engine.has_tokenizer("tokenizer1"));
    assert!(!engine.calls().iter().any(|c| matches!(c, EngineCall::Tokenize { .. })));
}

#[test]
fn registering_twice_keeps_output_stable() {
    let src = source();
    let mut engine = InMemoryTokenizerEngine::new().rejecting_duplicates();

    let mut p = plan(&[11, 12, 13, 14]);
    p.replace_existing = true;
    let mut first = ParityRun::new(p.clone());
    first.run_to_end(&src, session(&mut engine)).expect("first run");
    let mut second = ParityRun::new(p);
    second.run_to_end(&src, session(&mut engine)).expect("second run");

    assert_eq!(first.produced(), second.produced());
    let drops = engine.calls().iter().filter(|c| matches!(c, EngineCall::DropModel(_))).count();
    assert_eq!(drops, 2);
}

#[test]
fn duplicate_registration_without_replace_is_a_registration_error() {
    let src = source();
    let mut engine = InMemoryTokenizerEngine::new().rejecting_duplicates();
    ParityRun::new(plan(&[11, 12, 13, 14])).run_to_end(&src, session(&mut engine)).expect("first run");

    let mut again = ParityRun::new(plan(&[11, 12, 13, 14]));
    let err = again.run_to_end(&src, session(&mut engine)).unwrap_err();
    assert!(matches!(err, ParityError::Registration { .. }));
    assert_eq!(again.failed_at(), Some(RunStage::Registered));
}

#[test]
fn nondeterministic_engine_fails_at_tokenization() {
    let src = source();
    let mut engine = InMemoryTokenizerEngine::new().drifting();
    let mut run = ParityRun::new(plan(&[11, 12, 13, 14]));

    let err = run.run_to_end(&src, session(&mut engine)).unwrap_err();

    assert!(matches!(err, ParityError::NonDeterministic { round: 2, .. }));
    assert_eq!(run.failed_at(), Some(RunStage::Tokenized));
}

#[test]
fn mismatch_fails_by_default_and_keeps_both_sequences() {
    let src = source();
    let mut engine = InMemoryTokenizerEngine::new();
    let mut run = ParityRun::new(plan(&[11, 12, 99, 14]));

    let err = run.run_to_end(&src, session(&mut engine)).unwrap_err();

    let ParityError::ParityMismatch(report) = err else { panic!("se esperaba ParityMismatch") };
    assert_eq!(report.expected.as_slice(), &[11, 12, 99, 14]);
    assert_eq!(report.produced.as_slice(), &[11, 12, 13, 14]);
    assert_eq!(report.first_divergence, Some(2));
    assert_eq!(run.failed_at(), Some(RunStage::Checked));
    assert!(!run.summary().passed);
}

#[test]
fn advisory_mismatch_completes_the_run() {
    let src = source();
    let mut engine = InMemoryTokenizerEngine::new();
    let mut p = plan(&[1, 2, 3]);
    p.mismatch_policy = MismatchPolicy::Advisory;
    let mut run = ParityRun::new(p);

    let outcome = run.run_to_end(&src, session(&mut engine)).expect("advisory no falla");

    assert!(!outcome.is_match());
    assert_eq!(run.stage(), RunStage::Checked);
    assert!(!run.summary().passed);
}

#[test]
fn stages_cannot_be_skipped_or_resumed_after_failure() {
    let mut engine = InMemoryTokenizerEngine::new();
    let mut run = ParityRun::new(plan(&[11]));

    let err = run.bind(&mut engine).unwrap_err();
    assert!(matches!(err, ParityError::InvalidTransition { expected: RunStage::Registered, found: RunStage::Init }));

    let src = StaticArtifactSource::new();
    assert!(run.fetch(&src).is_err());
    let err = run.fetch(&source()).unwrap_err();
    assert!(matches!(err, ParityError::RunHasFailed(RunStage::Fetched)));
}

#[test]
fn cleanup_drops_tokenizer_then_model() {
    let src = source();
    let mut engine = InMemoryTokenizerEngine::new();
    let mut p = plan(&[11, 12, 13, 14]);
    p.cleanup = true;
    ParityRun::new(p).run_to_end(&src, session(&mut engine)).expect("run ok");

    assert!(!engine.has_model("model1"));
    assert!(!engine.has_tokenizer("tokenizer1"));
    let tail: Vec<_> = engine.calls().iter().rev().take(2).cloned().collect();
    assert_eq!(tail,
               vec![EngineCall::DropModel("model1".into()), EngineCall::DropTokenizer("tokenizer1".into())]);
}

#[test]
fn cleanup_after_conflict_keeps_foreign_objects() {
    let src = source();
    let mut engine = InMemoryTokenizerEngine::new().rejecting_duplicates();
    // Modelo y tokenizer ya existentes, creados por otro.
    ParityRun::new(plan(&[11, 12, 13, 14])).run_to_end(&src, session(&mut engine)).expect("seed run");
    let mut p = plan(&[11, 12, 13, 14]);
    p.cleanup = true;
    let mut run = ParityRun::new(p);

    let err = run.run_to_end(&src, session(&mut engine)).unwrap_err();

    assert!(matches!(err, ParityError::Registration { .. }));
    assert!(engine.has_model("model1"));
    assert!(engine.has_tokenizer("tokenizer1"));
    assert!(!engine.calls().iter().any(|c| matches!(c, EngineCall::DropModel(_) | EngineCall::DropTokenizer(_))));
}

#[test]
fn cleanup_after_failed_binding_drops_only_the_model() {
    let src = source();
    let mut engine = InMemoryTokenizerEngine::new().rejecting_duplicates();
    // Tokenizer ajeno ligado a otro modelo con el mismo nombre de tokenizer.
    let mut other = plan(&[11, 12, 13, 14]);
    other.model = ModelName::parse("other_model").unwrap();
    ParityRun::new(other).run_to_end(&src, session(&mut engine)).expect("seed run");
    let mut p = plan(&[11, 12, 13, 14]);
    p.cleanup = true;
    let mut run = ParityRun::new(p);

    let err = run.run_to_end(&src, session(&mut engine)).unwrap_err();

    assert!(matches!(err, ParityError::Binding { .. }));
    assert!(!engine.has_model("model1"));
    assert!(engine.has_tokenizer("tokenizer1"));
    assert!(!engine.calls().iter().any(|c| matches!(c, EngineCall::DropTokenizer(_))));
}
