//! Run parameters and the parameter schema problems declare.
//!
//! Parameters arrive as a flat JSON object (`{"population_size": 60, ...}`).
//! Frontends frequently post numbers as strings, so numeric accessors accept
//! numeric text as well.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl ParamValue {
    /// Numeric view, accepting numeric text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(s) => s.trim().parse().ok(),
            ParamValue::Bool(_) => None,
        }
    }

    /// Boolean view, accepting `"true"`/`"false"` text.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            ParamValue::Text(s) => s.trim().parse().ok(),
            ParamValue::Number(_) => None,
        }
    }
}

/// Mapping of parameter name to value for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunParams {
    values: BTreeMap<String, ParamValue>,
}

impl RunParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of parameters.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load parameters from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Numeric parameter, if present.
    pub fn number(&self, name: &str) -> Result<Option<f64>, ConfigError> {
        match self.values.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_number()
                .filter(|n| !n.is_nan())
                .map(Some)
                .ok_or_else(|| ConfigError::InvalidType {
                    field: name.to_string(),
                    expected: "a number",
                }),
        }
    }

    pub fn number_or(&self, name: &str, default: f64) -> Result<f64, ConfigError> {
        Ok(self.number(name)?.unwrap_or(default))
    }

    pub fn require_number(&self, name: &str) -> Result<f64, ConfigError> {
        self.number(name)?.ok_or_else(|| missing(name))
    }

    /// Non-negative integer parameter, if present. Fractions are truncated.
    pub fn usize(&self, name: &str) -> Result<Option<usize>, ConfigError> {
        match self.number(name)? {
            None => Ok(None),
            Some(n) if !n.is_finite() => Err(ConfigError::out_of_range(name, n, "must be finite")),
            Some(n) if n < 0.0 => Err(ConfigError::out_of_range(
                name,
                n,
                "must be a non-negative integer",
            )),
            Some(n) => Ok(Some(n.trunc() as usize)),
        }
    }

    pub fn usize_or(&self, name: &str, default: usize) -> Result<usize, ConfigError> {
        Ok(self.usize(name)?.unwrap_or(default))
    }

    pub fn require_usize(&self, name: &str) -> Result<usize, ConfigError> {
        self.usize(name)?.ok_or_else(|| missing(name))
    }

    pub fn u64_or(&self, name: &str, default: u64) -> Result<u64, ConfigError> {
        Ok(self.usize(name)?.map_or(default, |n| n as u64))
    }

    pub fn bool_or(&self, name: &str, default: bool) -> Result<bool, ConfigError> {
        match self.values.get(name) {
            None => Ok(default),
            Some(value) => value.as_bool().ok_or_else(|| ConfigError::InvalidType {
                field: name.to_string(),
                expected: "a boolean",
            }),
        }
    }

    pub fn text_or(&self, name: &str, default: &str) -> Result<String, ConfigError> {
        match self.values.get(name) {
            None => Ok(default.to_string()),
            Some(ParamValue::Text(s)) => Ok(s.clone()),
            Some(_) => Err(ConfigError::InvalidType {
                field: name.to_string(),
                expected: "text",
            }),
        }
    }

    /// Copy of these parameters with every missing schema field set to its default.
    pub fn with_defaults(&self, schema: &[ParamField]) -> RunParams {
        let mut resolved = self.clone();
        for field in schema {
            if let Some(default) = &field.default
                && !resolved.contains(&field.name)
            {
                resolved.set(&field.name, default.clone());
            }
        }
        resolved
    }

    /// Check every schema field against its declared kind and bounds.
    ///
    /// Parameters not named in the schema pass through unchecked.
    pub fn validate_against(&self, schema: &[ParamField]) -> Result<(), ConfigError> {
        for field in schema {
            match self.values.get(&field.name) {
                None if field.optional || field.default.is_some() => {}
                None => return Err(missing(&field.name)),
                Some(value) => field.check(value)?,
            }
        }
        Ok(())
    }
}

fn missing(name: &str) -> ConfigError {
    ConfigError::Missing {
        field: name.to_string(),
    }
}

/// Kind of value a schema field accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Number,
    Text,
    Boolean,
}

/// One configurable field in a problem's parameter schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ParamValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl ParamField {
    fn new(name: &str, label: &str, kind: FieldKind, default: Option<ParamValue>) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            default,
            min: None,
            max: None,
            step: None,
            optional: false,
        }
    }

    pub fn number(name: &str, label: &str, default: f64) -> Self {
        Self::new(name, label, FieldKind::Number, Some(default.into()))
    }

    pub fn text(name: &str, label: &str, default: &str) -> Self {
        Self::new(name, label, FieldKind::Text, Some(default.into()))
    }

    pub fn boolean(name: &str, label: &str, default: bool) -> Self {
        Self::new(name, label, FieldKind::Boolean, Some(default.into()))
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    /// Mark the field optional and drop its default.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self.default = None;
        self
    }

    fn check(&self, value: &ParamValue) -> Result<(), ConfigError> {
        match self.kind {
            FieldKind::Number => {
                let n = value.as_number().ok_or_else(|| ConfigError::InvalidType {
                    field: self.name.clone(),
                    expected: "a number",
                })?;
                if let Some(min) = self.min
                    && n < min
                {
                    return Err(ConfigError::out_of_range(
                        &self.name,
                        n,
                        format!("must be at least {min}"),
                    ));
                }
                if let Some(max) = self.max
                    && n > max
                {
                    return Err(ConfigError::out_of_range(
                        &self.name,
                        n,
                        format!("must be at most {max}"),
                    ));
                }
                Ok(())
            }
            FieldKind::Boolean => value.as_bool().map(|_| ()).ok_or_else(|| {
                ConfigError::InvalidType {
                    field: self.name.clone(),
                    expected: "a boolean",
                }
            }),
            FieldKind::Text => match value {
                ParamValue::Text(_) => Ok(()),
                _ => Err(ConfigError::InvalidType {
                    field: self.name.clone(),
                    expected: "text",
                }),
            },
        }
    }
}
