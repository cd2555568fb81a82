//! Commands behind the `feast-entity` binary.
//!
//! Each command takes the path of an entity definition file and writes its
//! output to the given writer, so the binary stays a thin argument parser.

use anyhow::{Context, Result};
use feast_model::loader::parse_yaml_str;
use feast_model::Entity;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info, warn};

/// Output format for `describe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

/// Outcome of validating a definition file.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: Vec<String>,
    /// Entity name (possibly empty) and the validation message.
    pub invalid: Vec<(String, String)>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Loads every entity defined in a YAML file.
pub fn load_entities(path: &Path) -> Result<Vec<Entity>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let documents = parse_yaml_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    documents
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            Entity::from_dict(doc)
                .with_context(|| format!("document {} in {}", i + 1, path.display()))
        })
        .collect()
}

/// Validates every entity in the file and writes one line per entity.
pub fn validate(path: &Path, out: &mut impl Write) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();
    for entity in load_entities(path)? {
        match entity.is_valid() {
            Ok(()) => {
                writeln!(out, "ok      {}", entity.name)?;
                report.valid.push(entity.name);
            }
            Err(e) => {
                warn!(entity = %entity.name, error = %e, "Invalid entity");
                writeln!(out, "invalid {}: {e}", entity.name)?;
                report.invalid.push((entity.name, e.to_string()));
            }
        }
    }
    info!(
        valid = report.valid.len(),
        invalid = report.invalid.len(),
        "Validation finished"
    );
    Ok(report)
}

/// Prints every entity in the chosen format.
pub fn describe(path: &Path, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let entities = load_entities(path)?;
    for (i, entity) in entities.iter().enumerate() {
        match format {
            OutputFormat::Yaml => {
                if i > 0 {
                    writeln!(out, "---")?;
                }
                write!(out, "{}", entity.to_yaml()?)?;
            }
            OutputFormat::Json => writeln!(out, "{entity}")?,
        }
    }
    Ok(())
}

/// Encodes the single entity in `path` as protobuf bytes into `output`.
///
/// Returns the number of bytes written.
pub fn encode(path: &Path, output: &Path) -> Result<usize> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let entity = Entity::from_yaml_str(&text)
        .with_context(|| format!("failed to load entity from {}", path.display()))?;
    let bytes = entity.to_bytes();
    fs::write(output, &bytes)
        .with_context(|| format!("failed to write {}", output.display()))?;
    debug!(entity = %entity.name, bytes = bytes.len(), "Encoded entity");
    Ok(bytes.len())
}

/// Decodes a protobuf-encoded entity and prints it as YAML.
pub fn decode(path: &Path, out: &mut impl Write) -> Result<Entity> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let entity = Entity::from_bytes(&bytes)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    write!(out, "{}", entity.to_yaml()?)?;
    Ok(entity)
}
