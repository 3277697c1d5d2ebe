//! Menu operations
//!
//! A migration's `up` and `down` procedures are ordered lists of
//! [`Operation`] values. Each operation names its target entity and carries
//! an option record; [`crate::statements`] turns them into SQL.

use crate::error::{CoreError, CoreResult};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The menu action an operation performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    AddFunctionalArea,
    DropFunctionalArea,
    ChangeFunctionalArea,
    AddProgram,
    DropProgram,
    ChangeProgram,
    AddProgramFunction,
    DropProgramFunction,
    MoveProgramFunction,
    ChangeProgramFunction,
}

impl OperationKind {
    /// All kinds, in declaration order
    pub const ALL: [OperationKind; 10] = [
        OperationKind::AddFunctionalArea,
        OperationKind::DropFunctionalArea,
        OperationKind::ChangeFunctionalArea,
        OperationKind::AddProgram,
        OperationKind::DropProgram,
        OperationKind::ChangeProgram,
        OperationKind::AddProgramFunction,
        OperationKind::DropProgramFunction,
        OperationKind::MoveProgramFunction,
        OperationKind::ChangeProgramFunction,
    ];

    /// Keyword used in migration files
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::AddFunctionalArea => "add_functional_area",
            OperationKind::DropFunctionalArea => "drop_functional_area",
            OperationKind::ChangeFunctionalArea => "change_functional_area",
            OperationKind::AddProgram => "add_program",
            OperationKind::DropProgram => "drop_program",
            OperationKind::ChangeProgram => "change_program",
            OperationKind::AddProgramFunction => "add_program_function",
            OperationKind::DropProgramFunction => "drop_program_function",
            OperationKind::MoveProgramFunction => "move_program_function",
            OperationKind::ChangeProgramFunction => "change_program_function",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

/// A scalar option value.
///
/// `Null` is kept distinct from an absent key: `group: ~` clears a column,
/// leaving `group` out leaves it untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl OptionValue {
    /// Convert a YAML scalar. Returns `None` for floats, sequences, mappings and tags.
    pub fn from_yaml(value: &serde_yaml::Value) -> Option<Self> {
        match value {
            serde_yaml::Value::Null => Some(OptionValue::Null),
            serde_yaml::Value::Bool(b) => Some(OptionValue::Bool(*b)),
            serde_yaml::Value::Number(n) => n.as_i64().map(OptionValue::Int),
            serde_yaml::Value::String(s) => Some(OptionValue::Str(s.clone())),
            _ => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(i64::from(value))
    }
}

impl From<Option<&str>> for OptionValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(OptionValue::Null, OptionValue::from)
    }
}

/// Named options supplied to an operation
pub type Options = BTreeMap<String, OptionValue>;

/// One menu operation: what to do, to which named entity, with which options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub kind: OperationKind,
    pub name: String,
    pub options: Options,
}

impl Operation {
    /// Create an operation with no options
    pub fn new(kind: OperationKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            options: Options::new(),
        }
    }

    /// Builder-style option setter
    pub fn option(mut self, key: &str, value: impl Into<OptionValue>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    /// Number of supplied options, not counting `ignored` keys.
    pub fn count_options(&self, ignored: &[&str]) -> usize {
        self.options
            .keys()
            .filter(|key| !ignored.contains(&key.as_str()))
            .count()
    }

    /// Reject any option key outside `allowed`.
    pub fn check_keys(&self, allowed: &[&str]) -> CoreResult<()> {
        match self
            .options
            .keys()
            .find(|key| !allowed.contains(&key.as_str()))
        {
            Some(key) => Err(CoreError::UnknownOption {
                operation: self.kind.to_string(),
                name: self.name.clone(),
                key: key.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Required, non-null string option.
    pub fn require_str(&self, key: &str) -> CoreResult<&str> {
        match self.nullable_str(key)? {
            Some(Some(value)) => Ok(value),
            Some(None) => Err(self.null_error(key)),
            None => Err(CoreError::MissingOption {
                operation: self.kind.to_string(),
                name: self.name.clone(),
                key: key.to_string(),
            }),
        }
    }

    /// Optional string option that may not be null.
    pub fn str_opt(&self, key: &str) -> CoreResult<Option<&str>> {
        match self.nullable_str(key)? {
            Some(Some(value)) => Ok(Some(value)),
            Some(None) => Err(self.null_error(key)),
            None => Ok(None),
        }
    }

    /// String option where null is meaningful.
    ///
    /// Outer `None`: key absent. `Some(None)`: key present with null.
    pub fn nullable_str(&self, key: &str) -> CoreResult<Option<Option<&str>>> {
        match self.options.get(key) {
            None => Ok(None),
            Some(OptionValue::Null) => Ok(Some(None)),
            Some(OptionValue::Str(s)) => Ok(Some(Some(s.as_str()))),
            Some(_) => Err(self.type_error(key, "a string")),
        }
    }

    /// Optional boolean option
    pub fn bool_opt(&self, key: &str) -> CoreResult<Option<bool>> {
        match self.options.get(key) {
            None => Ok(None),
            Some(OptionValue::Bool(b)) => Ok(Some(*b)),
            Some(OptionValue::Null) => Err(self.null_error(key)),
            Some(_) => Err(self.type_error(key, "a boolean")),
        }
    }

    /// Optional integer option
    pub fn int_opt(&self, key: &str) -> CoreResult<Option<i64>> {
        match self.options.get(key) {
            None => Ok(None),
            Some(OptionValue::Int(i)) => Ok(Some(*i)),
            Some(OptionValue::Null) => Err(self.null_error(key)),
            Some(_) => Err(self.type_error(key, "an integer")),
        }
    }

    /// Error for a change operation that would not change anything
    pub fn no_changes(&self) -> CoreError {
        CoreError::NoChanges {
            operation: self.kind.to_string(),
            name: self.name.clone(),
        }
    }

    fn type_error(&self, key: &str, expected: &'static str) -> CoreError {
        CoreError::InvalidOptionType {
            operation: self.kind.to_string(),
            name: self.name.clone(),
            key: key.to_string(),
            expected,
        }
    }

    fn null_error(&self, key: &str) -> CoreError {
        CoreError::NullOption {
            operation: self.kind.to_string(),
            name: self.name.clone(),
            key: key.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "operation_test.rs"]
mod tests;
