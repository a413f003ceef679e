//! Llamadas al catálogo de tokenizers sobre una base real con la extensión
//! instalada. Todo corre en modo rollback.


use parity_core::{BindingExpr, EngineErrorKind, ModelName, TokenizerEngine, TokenizerName};

#[test]
fn register_returns_exactly_one_row() {
    let Some(mut engine) = test_support::engine_with_extension() else { return };
    let model = ModelName::parse(&test_support::unique_model_name("reg")).expect("name");

    let row = engine.create_model(&model, test_support::WORDLEVEL_TOKENIZER).expect("create");

    assert_eq!(row.model, model);
    // La función es void: la fila existe y su texto es vacío.
    assert_eq!(row.result, "");
}

#[test]
fn duplicate_model_is_a_conflict() {
    let Some(mut engine) = test_support::engine_with_extension() else { return };
    let model = ModelName::parse(&test_support::unique_model_name("dup")).expect("name");
    engine.create_model(&model, test_support::WORDLEVEL_TOKENIZER).expect("first");

    let err = engine.create_model(&model, test_support::WORDLEVEL_TOKENIZER).unwrap_err();

    assert_eq!(err.kind, EngineErrorKind::Conflict, "{err}");
}

#[test]
fn invalid_config_is_rejected() {
    let Some(mut engine) = test_support::engine_with_extension() else { return };
    let model = ModelName::parse(&test_support::unique_model_name("bad")).expect("name");

    let err = engine.create_model(&model, "{\"not\": \"a tokenizer\"}").unwrap_err();

    assert_ne!(err.kind, EngineErrorKind::Protocol, "{err}");
}

#[test]
fn bind_after_register_and_drop_both() {
    let Some(mut engine) = test_support::engine_with_extension() else { return };
    let name = test_support::unique_model_name("bnd");
    let model = ModelName::parse(&name).expect("name");
    let tok = TokenizerName::parse(&format!("{name}_tokenizer")).expect("tok");
    engine.create_model(&model, test_support::WORDLEVEL_TOKENIZER).expect("create");

    let binding = BindingExpr::for_model(&model).expect("binding");
    engine.create_tokenizer(&tok, &binding).expect("bind");

    engine.drop_tokenizer(&tok).expect("drop tokenizer");
    engine.drop_model(&model).expect("drop model");
    // Nombres ausentes: el motor sólo advierte.
    engine.drop_tokenizer(&tok).expect("drop absent tokenizer");
    engine.drop_model(&model).expect("drop absent model");
}

#[test]
fn tokenize_unknown_tokenizer_fails() {
    let Some(mut engine) = test_support::engine_with_extension() else { return };
    let tok = TokenizerName::parse(&test_support::unique_model_name("ghost")).expect("tok");

    let err = engine.tokenize("postgres is a database", &tok).unwrap_err();

    assert_eq!(err.kind, EngineErrorKind::NotFound, "{err}");
}
