//! Rule document sources
//!
//! A [`RuleSource`] supplies the raw rule document for a form id. The crate
//! ships an in-memory source and a directory-backed source; network or
//! database backends implement the same trait.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::compiler::{CompiledForm, Compiler};
use crate::error::ConfigurationError;
use crate::rules::RuleDocument;

/// File name of the shared definitions document inside a [`FileSource`]
/// directory.
pub const DEFINITIONS_FILE: &str = "definitions.json";

/// Supplies rule documents by form id.
#[async_trait]
pub trait RuleSource: Send + Sync {
    /// Fetches the rule document for `form`.
    async fn fetch_rule_document(&self, form: &str) -> Result<RuleDocument, ConfigurationError>;
}

/// Fetches the rules for `form` and compiles them.
///
/// # Errors
///
/// Propagates the source's [`ConfigurationError`] unchanged.
pub async fn load_form<S>(
    source: &S,
    compiler: &Compiler,
    form: &str,
) -> Result<CompiledForm, ConfigurationError>
where
    S: RuleSource + ?Sized,
{
    let document = source.fetch_rule_document(form).await?;
    debug!(form, fields = document.len(), "Fetched rule document");
    Ok(compiler.compile(&document))
}

// ============================================================================
// IN-MEMORY
// ============================================================================

/// Preloaded documents keyed by form id.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    documents: HashMap<String, RuleDocument>,
}

impl InMemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the document for `form`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_document(mut self, form: impl Into<String>, document: RuleDocument) -> Self {
        self.insert(form, document);
        self
    }

    /// Adds or replaces the document for `form`, returning the old one.
    pub fn insert(
        &mut self,
        form: impl Into<String>,
        document: RuleDocument,
    ) -> Option<RuleDocument> {
        self.documents.insert(form.into(), document)
    }

    /// Known form ids, sorted.
    #[must_use]
    pub fn forms(&self) -> Vec<&str> {
        let mut forms: Vec<&str> = self.documents.keys().map(String::as_str).collect();
        forms.sort_unstable();
        forms
    }
}

#[async_trait]
impl RuleSource for InMemorySource {
    async fn fetch_rule_document(&self, form: &str) -> Result<RuleDocument, ConfigurationError> {
        self.documents
            .get(form)
            .cloned()
            .ok_or_else(|| ConfigurationError::unknown_form(form))
    }
}

// ============================================================================
// FILE
// ============================================================================

/// Reads `<dir>/<form>.json` plus a shared definitions document.
///
/// A missing definitions file means "no definitions"; a missing form file is
/// [`ConfigurationError::UnknownForm`].
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
    definitions: PathBuf,
}

impl FileSource {
    /// Serves forms from `dir`, with definitions in `dir/definitions.json`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let definitions = dir.join(DEFINITIONS_FILE);
        Self { dir, definitions }
    }

    /// Reads definitions from `path` instead.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_definitions(mut self, path: impl Into<PathBuf>) -> Self {
        self.definitions = path.into();
        self
    }

    /// Directory holding the form files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn form_path(&self, form: &str) -> Option<PathBuf> {
        let safe = !form.is_empty()
            && !form.contains(['/', '\\'])
            && form != "."
            && !form.contains("..");
        safe.then(|| self.dir.join(format!("{form}.json")))
    }

    async fn read_definitions(&self) -> Result<Value, ConfigurationError> {
        match tokio::fs::read_to_string(&self.definitions).await {
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                ConfigurationError::parse(self.definitions.display().to_string(), e)
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(
                    path = %self.definitions.display(),
                    "Definitions file not found, using no definitions"
                );
                Ok(Value::Null)
            }
            Err(err) => Err(ConfigurationError::io(&self.definitions, err)),
        }
    }
}

#[async_trait]
impl RuleSource for FileSource {
    async fn fetch_rule_document(&self, form: &str) -> Result<RuleDocument, ConfigurationError> {
        let path = self
            .form_path(form)
            .ok_or_else(|| ConfigurationError::unknown_form(form))?;

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigurationError::unknown_form(form));
            }
            Err(err) => return Err(ConfigurationError::io(&path, err)),
        };
        debug!(form, path = %path.display(), "Read rule file");

        let rules: Value = serde_json::from_str(&text)
            .map_err(|e| ConfigurationError::parse(path.display().to_string(), e))?;
        let definitions = self.read_definitions().await?;

        RuleDocument::from_json(&rules, &definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::FieldRule;

    #[tokio::test]
    async fn in_memory_serves_known_forms() {
        let source = InMemorySource::new().with_document(
            "payment",
            RuleDocument::new().with_field("memo", FieldRule::of_kind("string")),
        );

        let doc = source.fetch_rule_document("payment").await.unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(source.forms(), vec!["payment"]);

        let err = source.fetch_rule_document("refund").await.unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownForm { form } if form == "refund"));
    }

    #[test]
    fn file_source_rejects_path_like_form_ids() {
        let source = FileSource::new("/rules");
        assert!(source.form_path("payment").is_some());
        for form in ["", ".", "..", "../secrets", "a/b", "a\\b"] {
            assert!(source.form_path(form).is_none(), "{form:?}");
        }
    }

    #[tokio::test]
    async fn load_form_surfaces_fetch_errors() {
        let source = InMemorySource::new();
        let err = load_form(&source, &Compiler::default(), "missing")
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownForm { .. }));
    }
}
