// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed configuration overrides and build properties.
//!
//! Overrides are appended to the fixture's build configuration file.
//! Properties are flattened into the build tool invocation; they are only
//! validated when rendered for a specific [`PropertyStyle`].

use crate::error::HarnessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A configuration line appended to a fixture's build configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Override {
    /// Verbatim text, written as-is.
    Line(String),
    /// A key/value setting, written as `key<separator>value`.
    Setting { key: String, value: String },
}

impl Override {
    pub fn line(text: impl Into<String>) -> Self {
        Override::Line(text.into())
    }

    pub fn setting(key: impl Into<String>, value: impl ToString) -> Self {
        Override::Setting {
            key: key.into(),
            value: value.to_string(),
        }
    }

    /// Render as configuration text (without trailing newline).
    pub fn render(&self, separator: &str) -> String {
        match self {
            Override::Line(text) => text.clone(),
            Override::Setting { key, value } => format!("{key}{separator}{value}"),
        }
    }
}

impl From<&str> for Override {
    fn from(text: &str) -> Self {
        Override::Line(text.to_string())
    }
}

impl From<String> for Override {
    fn from(text: String) -> Self {
        Override::Line(text)
    }
}

/// Typed property value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Int(i) => write!(f, "{i}"),
            PropertyValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Int(i64::from(value))
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Str(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Str(value)
    }
}

/// A key/value property passed to the build tool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    key: String,
    value: PropertyValue,
}

impl Property {
    pub fn new(key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    /// `key=value` form, used by the flag and file styles and the run log.
    pub fn assignment(&self) -> String {
        format!("{}={}", self.key, self.value)
    }
}

/// Parses `key=value`. The value is kept as a string.
impl FromStr for Property {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((key, value)) => Ok(Property::new(key.trim(), value)),
            None => Err(HarnessError::invalid_property(s, "expected KEY=VALUE")),
        }
    }
}

/// How properties are handed to the build tool.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStyle {
    /// One `<prefix>key=value` command-line argument per property.
    #[default]
    Flag,
    /// One environment variable per property.
    Env,
    /// `key=value` lines appended to a properties file in the workspace.
    File,
}

/// Properties flattened for a single invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedProperties {
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub file_lines: Vec<String>,
}

/// Encoding parameters for [`render_properties`].
#[derive(Clone, Copy, Debug)]
pub struct PropertyEncoding<'a> {
    pub style: PropertyStyle,
    pub flag_prefix: &'a str,
    pub env_prefix: &'a str,
}

/// Validate and flatten properties into the configured invocation style.
///
/// Fails on the first invalid property; nothing is partially applied.
pub fn render_properties(
    properties: &[Property],
    encoding: PropertyEncoding<'_>,
) -> Result<RenderedProperties, HarnessError> {
    let mut rendered = RenderedProperties::default();
    for property in properties {
        validate(property, encoding.style)?;
        match encoding.style {
            PropertyStyle::Flag => rendered
                .args
                .push(format!("{}{}", encoding.flag_prefix, property.assignment())),
            PropertyStyle::Env => rendered.env.push((
                env_var_name(encoding.env_prefix, &property.key),
                property.value.to_string(),
            )),
            PropertyStyle::File => rendered.file_lines.push(property.assignment()),
        }
    }
    Ok(rendered)
}

fn validate(property: &Property, style: PropertyStyle) -> Result<(), HarnessError> {
    let key = &property.key;
    if key.is_empty() {
        return Err(HarnessError::invalid_property(key, "key is empty"));
    }
    if key.chars().any(char::is_whitespace) {
        return Err(HarnessError::invalid_property(key, "key contains whitespace"));
    }
    if key.contains('=') {
        return Err(HarnessError::invalid_property(key, "key contains '='"));
    }
    let value = property.value.to_string();
    if value.contains('\n') || value.contains('\r') {
        return Err(HarnessError::invalid_property(key, "value contains a newline"));
    }
    if style == PropertyStyle::Env
        && !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
    {
        return Err(HarnessError::invalid_property(
            key,
            "environment keys may only contain ASCII letters, digits, '.', '-' and '_'",
        ));
    }
    Ok(())
}

fn env_var_name(prefix: &str, key: &str) -> String {
    let mapped: String = key
        .chars()
        .map(|c| match c {
            '.' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect();
    format!("{prefix}{mapped}")
}

#[cfg(test)]
#[path = "overrides_tests.rs"]
mod tests;
