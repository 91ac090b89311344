//! Resolution of caller-supplied values against the manifest.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ParamError;
use crate::manifest::{Manifest, ParamValue};

/// Raw, untyped values as supplied by the caller.
///
/// A key mapped to `null` means "explicitly absent"; a missing key means
/// "use the declared default".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawValues {
    values: BTreeMap<String, serde_json::Value>,
}

impl RawValues {
    /// Empty set of values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a YAML (or JSON) params document: a mapping of name to value.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not a mapping.
    pub fn from_yaml(text: &str) -> Result<Self, String> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        let values: BTreeMap<String, serde_json::Value> =
            serde_yaml::from_str(text).map_err(|e| format!("Failed to parse params: {e}"))?;
        Ok(Self { values })
    }

    /// Sets `name` to `value`.
    pub fn set(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.values.insert(name.into(), value);
    }

    /// Applies a `NAME=VALUE` override; the value stays a string and is
    /// interpreted according to the parameter's kind during resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::InvalidAssignment`] if there is no `=` or the
    /// name is empty.
    pub fn assign(&mut self, assignment: &str) -> Result<(), ParamError> {
        match assignment.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                self.set(name.trim(), serde_json::Value::String(value.to_string()));
                Ok(())
            }
            _ => Err(ParamError::InvalidAssignment(assignment.to_string())),
        }
    }

    /// Marks `name` as explicitly absent.
    pub fn unset(&mut self, name: impl Into<String>) {
        self.set(name, serde_json::Value::Null);
    }
}

/// Fully typed values for one launch, in manifest order.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRequest {
    /// Volume to run in; provisioned on demand when `None`.
    pub volume: Option<String>,
    values: Vec<(&'static str, Option<ParamValue>)>,
}

impl LaunchRequest {
    /// Resolves `raw` against `manifest`.
    ///
    /// Omitted keys take the declared default, explicit `null` is absent
    /// even when a default exists, and local file references are made
    /// absolute against `base_dir`. Values are not range-checked; the
    /// pipeline validates its own bounds.
    ///
    /// # Errors
    ///
    /// Returns a [`ParamError`] for undeclared names, values of the wrong
    /// kind, or an absent required parameter.
    pub fn resolve(
        manifest: &Manifest,
        raw: &RawValues,
        base_dir: &Path,
    ) -> Result<Self, ParamError> {
        if let Some(name) = raw.values.keys().find(|name| manifest.get(name).is_none()) {
            return Err(ParamError::Unknown { name: name.clone() });
        }

        let mut values = Vec::with_capacity(manifest.len());
        for spec in manifest {
            let value = match raw.values.get(spec.name) {
                None => spec.default.clone(),
                Some(serde_json::Value::Null) => None,
                Some(given) => Some(ParamValue::from_json(spec, given, base_dir)?),
            };
            if value.is_none() && !spec.ty.is_optional() {
                return Err(ParamError::MissingRequired { name: spec.name.to_string() });
            }
            values.push((spec.name, value));
        }

        Ok(Self { volume: None, values })
    }

    /// Runs in an already provisioned volume instead of requesting one.
    #[must_use]
    pub fn with_volume(mut self, volume: impl Into<String>) -> Self {
        self.volume = Some(volume.into());
        self
    }

    /// The resolved value for `name`, `None` if absent or undeclared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.iter().find(|(n, _)| *n == name).and_then(|(_, v)| v.as_ref())
    }

    /// Iterates `(name, value)` pairs in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&ParamValue>)> {
        self.values.iter().map(|(name, value)| (*name, value.as_ref()))
    }
}
