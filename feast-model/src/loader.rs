//! YAML loading for entity definition files.
//!
//! Input is either a path to a `.yaml`/`.yml` file or the YAML text itself.
//! A single line ending in one of those extensions is treated as a path;
//! anything else is parsed as inline YAML.

use crate::dict::EntityDict;
use crate::error::{FeastError, FeastResult};
use serde::Deserialize;
use serde_json::Value;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Loads every non-empty document from a path or YAML string.
pub fn yaml_loader(input: &str) -> FeastResult<Vec<EntityDict>> {
    let (source, text) = read_source(input)?;
    let documents = parse_documents(&text)?;
    debug!(source, documents = documents.len(), "Loaded YAML");
    Ok(documents)
}

/// Loads exactly one document from a path or YAML string.
pub fn yaml_loader_single(input: &str) -> FeastResult<EntityDict> {
    single_document(yaml_loader(input)?)
}

/// Parses every non-empty document from YAML text. Never reads a file.
pub fn parse_yaml_str(text: &str) -> FeastResult<Vec<EntityDict>> {
    let documents = parse_documents(text)?;
    debug!(source = "text", documents = documents.len(), "Parsed YAML");
    Ok(documents)
}

/// Parses exactly one document from YAML text. Never reads a file.
pub fn parse_yaml_str_single(text: &str) -> FeastResult<EntityDict> {
    single_document(parse_yaml_str(text)?)
}

fn single_document(mut documents: Vec<EntityDict>) -> FeastResult<EntityDict> {
    match documents.len() {
        1 => Ok(documents.remove(0)),
        0 => Err(FeastError::Loader("no YAML document found".into())),
        n => Err(FeastError::Loader(format!(
            "{n} YAML documents found when only a single document is supported"
        ))),
    }
}

fn is_path(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.contains('\n') {
        return false;
    }
    let lower = trimmed.to_ascii_lowercase();
    lower.ends_with(".yaml") || lower.ends_with(".yml")
}

fn read_source(input: &str) -> FeastResult<(&'static str, Cow<'_, str>)> {
    if is_path(input) {
        let path = Path::new(input.trim());
        let text = fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = text.len(), "Read YAML file");
        Ok(("path", Cow::Owned(text)))
    } else {
        Ok(("inline", Cow::Borrowed(input)))
    }
}

fn parse_documents(text: &str) -> FeastResult<Vec<EntityDict>> {
    let mut documents = Vec::new();
    if text.trim().is_empty() {
        return Ok(documents);
    }
    for document in serde_yaml::Deserializer::from_str(text) {
        match Value::deserialize(document)? {
            Value::Null => continue,
            Value::Object(map) => documents.push(map),
            other => {
                return Err(FeastError::Loader(format!(
                    "expected a mapping, found {}",
                    kind(&other)
                )));
            }
        }
    }
    Ok(documents)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_detection() {
        assert!(is_path("entity.yaml"));
        assert!(is_path("/defs/Driver.YML"));
        assert!(!is_path("spec:\n  name: driver.yaml"));
        assert!(!is_path("spec: {name: driver}"));
    }

    #[test]
    fn text_parsing_never_opens_files() {
        let doc = parse_yaml_str_single("note: driver.yaml").unwrap();
        assert_eq!(doc["note"], "driver.yaml");
    }

    #[test]
    fn empty_documents_are_skipped() {
        let docs = parse_documents("---\n---\nspec: {name: a}\n").unwrap();
        assert_eq!(docs.len(), 1);
    }
}
