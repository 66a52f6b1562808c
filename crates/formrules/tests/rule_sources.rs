//! Rule sources feeding the compiler.

use std::fs;

use formrules::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn write_json(dir: &TempDir, name: &str, value: &serde_json::Value) {
    fs::write(dir.path().join(name), serde_json::to_vec_pretty(value).unwrap()).unwrap();
}

fn rules_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_json(
        &dir,
        "definitions.json",
        &json!({
            "definitions": {
                "routingNumber": {"type": "string", "required": true, "pattern": "^[0-9]{9}$"}
            }
        }),
    );
    write_json(
        &dir,
        "payment.json",
        &json!({
            "routingNumber": {"$ref": "#/definitions/routingNumber"},
            "amount": {"type": "number", "required": true, "minValue": 0.01}
        }),
    );
    dir
}

#[tokio::test]
async fn file_source_reads_form_and_definitions() {
    let dir = rules_dir();
    let source = FileSource::new(dir.path());

    let document = source.fetch_rule_document("payment").await.unwrap();
    assert_eq!(
        document.fields.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["routingNumber", "amount"]
    );
    assert!(document.definitions.contains_key("routingNumber"));
}

#[tokio::test]
async fn load_form_compiles_fetched_rules() {
    let dir = rules_dir();
    let source = FileSource::new(dir.path());

    let form = load_form(&source, &Compiler::default(), "payment").await.unwrap();
    assert_eq!(form.len(), 2);
    assert!(form.diagnostics().is_empty());
    assert!(form.validate_field("routingNumber", &json!("123456789")).is_ok());
    assert_eq!(
        form.validate_field("routingNumber", &json!("12345678"))
            .unwrap_err()
            .kind,
        FailureKind::Pattern
    );
}

#[tokio::test]
async fn unknown_form_is_reported() {
    let dir = rules_dir();
    let source = FileSource::new(dir.path());

    for form in ["refund", "../payment"] {
        let err = source.fetch_rule_document(form).await.unwrap_err();
        assert!(
            matches!(err, ConfigurationError::UnknownForm { .. }),
            "{form}: {err}"
        );
    }
}

#[tokio::test]
async fn missing_definitions_file_means_no_definitions() {
    let dir = TempDir::new().unwrap();
    write_json(
        &dir,
        "contact.json",
        &json!({
            "email": {"$ref": "#/definitions/email"},
            "name": {"type": "string", "required": true}
        }),
    );

    let form = load_form(&FileSource::new(dir.path()), &Compiler::default(), "contact")
        .await
        .unwrap();
    assert!(form.contains("name"));
    assert!(!form.contains("email"));
    assert_eq!(form.diagnostics().len(), 1);
}

#[tokio::test]
async fn separate_definitions_path() {
    let dir = rules_dir();
    let shared = TempDir::new().unwrap();
    write_json(
        &shared,
        "shared.json",
        &json!({"definitions": {"routingNumber": {"type": "string", "maxLength": 3}}}),
    );

    let source = FileSource::new(dir.path()).with_definitions(shared.path().join("shared.json"));
    let form = load_form(&source, &Compiler::default(), "payment").await.unwrap();
    assert_eq!(
        form.validate_field("routingNumber", &json!("1234"))
            .unwrap_err()
            .kind,
        FailureKind::MaxLength
    );
}

#[tokio::test]
async fn malformed_json_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    let err = FileSource::new(dir.path())
        .fetch_rule_document("broken")
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::Parse { .. }));
}

#[tokio::test]
async fn sources_work_behind_trait_objects() {
    let memory = InMemorySource::new().with_document(
        "payment",
        RuleDocument::new().with_field(
            "memo",
            FieldRule {
                max_length: Some(3),
                ..FieldRule::of_kind("string")
            },
        ),
    );
    let source: Box<dyn RuleSource> = Box::new(memory);

    let form = load_form(source.as_ref(), &Compiler::default(), "payment")
        .await
        .unwrap();
    assert!(form.validate_field("memo", &json!("abcd")).is_err());
}
