//! Migration file loading
//!
//! A migration file is a YAML document:
//!
//! ```yaml
//! webapp: Nspack
//! up:
//!   - add_functional_area: Masterfiles
//!     rmd_menu: false
//!   - add_program: Fruit
//!     functional_area: Masterfiles
//! down:
//!   - drop_functional_area: Masterfiles
//! ```
//!
//! Each step holds exactly one operation keyword whose value is the entity
//! name; the remaining keys are that operation's options. Parsing returns the
//! definition directly, so loading needs no shared state and is safe to call
//! from several threads at once.

use crate::definition::MigrationDefinition;
use crate::error::{MigrateError, MigrateResult};
use mm_core::{Direction, MigrationFile, Operation, OperationKind, OptionValue};
use serde::Deserialize;
use std::str::FromStr;

/// Top-level shape of a migration document
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MigrationDocument {
    webapp: String,
    #[serde(default)]
    dry_run: bool,
    #[serde(default)]
    up: Option<Vec<serde_yaml::Value>>,
    #[serde(default)]
    down: Option<Vec<serde_yaml::Value>>,
}

/// Read and parse the migration in `file`.
pub fn load(file: &MigrationFile) -> MigrateResult<MigrationDefinition> {
    log::debug!("Loading migration {}", file.path.display());
    let content = std::fs::read_to_string(&file.path).map_err(|e| MigrateError::ReadFailed {
        path: file.path.display().to_string(),
        source: e,
    })?;
    parse_definition(&content, &file.filename)
}

/// Parse migration file content. `filename` is only used in error messages.
pub fn parse_definition(content: &str, filename: &str) -> MigrateResult<MigrationDefinition> {
    let invalid = |message: String| MigrateError::InvalidDefinition {
        filename: filename.to_string(),
        message,
    };

    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_str(content) {
        let value = serde_yaml::Value::deserialize(document).map_err(|e| invalid(e.to_string()))?;
        if !value.is_null() {
            documents.push(value);
        }
    }

    let document = match documents.len() {
        0 => {
            return Err(MigrateError::NoDefinition {
                filename: filename.to_string(),
            })
        }
        1 => documents.remove(0),
        count => {
            return Err(MigrateError::MultipleDefinitions {
                filename: filename.to_string(),
                count,
            })
        }
    };

    let document: MigrationDocument =
        serde_yaml::from_value(document).map_err(|e| invalid(e.to_string()))?;

    let up = parse_procedure(document.up, Direction::Up, filename)?;
    let down = parse_procedure(document.down, Direction::Down, filename)?;

    let mut definition = MigrationDefinition::new(document.webapp)?.with_dry_run(document.dry_run);
    definition.up = up;
    definition.down = down;
    Ok(definition)
}

fn parse_procedure(
    steps: Option<Vec<serde_yaml::Value>>,
    direction: Direction,
    filename: &str,
) -> MigrateResult<Option<Vec<Operation>>> {
    let Some(steps) = steps else {
        return Ok(None);
    };
    steps
        .iter()
        .enumerate()
        .map(|(index, step)| {
            parse_step(step).map_err(|message| MigrateError::InvalidDefinition {
                filename: filename.to_string(),
                message: format!("{direction} step {}: {message}", index + 1),
            })
        })
        .collect::<MigrateResult<Vec<_>>>()
        .map(Some)
}

fn parse_step(step: &serde_yaml::Value) -> Result<Operation, String> {
    let mapping = step
        .as_mapping()
        .ok_or_else(|| "expected a mapping with one operation".to_string())?;

    let mut operation: Option<Operation> = None;
    let mut options = Vec::new();

    for (key, value) in mapping {
        let key = key
            .as_str()
            .ok_or_else(|| format!("keys must be strings, found {key:?}"))?;

        match OperationKind::from_str(key) {
            Ok(kind) => {
                if let Some(existing) = &operation {
                    return Err(format!(
                        "more than one operation ({} and {})",
                        existing.kind, kind
                    ));
                }
                let name = value
                    .as_str()
                    .ok_or_else(|| format!("{kind} needs a name string"))?;
                operation = Some(Operation::new(kind, name));
            }
            Err(()) => {
                let value = OptionValue::from_yaml(value).ok_or_else(|| {
                    format!("option '{key}' must be a string, boolean, integer or null")
                })?;
                options.push((key.to_string(), value));
            }
        }
    }

    let mut operation = operation.ok_or_else(|| {
        let keys: Vec<&str> = options.iter().map(|(k, _)| k.as_str()).collect();
        format!("no operation found among keys [{}]", keys.join(", "))
    })?;
    operation.options.extend(options);
    Ok(operation)
}

#[cfg(test)]
#[path = "loader_test.rs"]
mod tests;
