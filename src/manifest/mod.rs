//! Typed parameter manifest for the pipeline.
//!
//! A [`Manifest`] is an ordered, immutable list of [`ParamSpec`]s. Order is
//! significant: flags are projected onto the command line in declaration
//! order, and the form renderer lays sections out the same way.

mod phageannotator;
pub mod value;

use std::collections::HashSet;

use serde::Serialize;

pub use phageannotator::phageannotator;
pub use value::{ParamValue, PathRef};

use crate::error::ParamError;

/// The underlying kind of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Free text.
    String,
    /// Signed integer.
    Integer,
    /// Floating point number.
    Float,
    /// Presence flag.
    Boolean,
    /// Reference to a single file.
    File,
    /// Reference to a directory.
    Directory,
}

impl ValueKind {
    /// Lowercase name used in error messages and rendered tables.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::File => "file",
            ValueKind::Directory => "directory",
        }
    }
}

/// Semantic type of a parameter: a kind, and whether it may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "presence", content = "kind", rename_all = "snake_case")]
pub enum ParamType {
    /// A value must be supplied (or defaulted).
    Required(ValueKind),
    /// `optional<T>`: absence is a legal value.
    Optional(ValueKind),
}

impl ParamType {
    /// The wrapped value kind.
    #[must_use]
    pub fn kind(self) -> ValueKind {
        match self {
            ParamType::Required(kind) | ParamType::Optional(kind) => kind,
        }
    }

    /// Whether absence is a legal value.
    #[must_use]
    pub fn is_optional(self) -> bool {
        matches!(self, ParamType::Optional(_))
    }

    /// Display form, e.g. `optional<integer>`.
    #[must_use]
    pub fn describe(self) -> String {
        match self {
            ParamType::Required(kind) => kind.as_str().to_string(),
            ParamType::Optional(kind) => format!("optional<{}>", kind.as_str()),
        }
    }
}

/// Declaration of a single user-facing parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    /// Unique key, also the flag name (`--<name>`).
    pub name: &'static str,
    /// Semantic type.
    #[serde(rename = "type")]
    pub ty: ParamType,
    /// Value used when the caller omits the parameter entirely.
    pub default: Option<ParamValue>,
    /// Form section this parameter opens, if any.
    pub section: Option<&'static str>,
    /// Help text shown next to the form field.
    pub description: Option<&'static str>,
    /// Whether this directory is a platform output location.
    pub output: bool,
}

impl ParamSpec {
    /// Declares a parameter with no default, section, or description.
    #[must_use]
    pub const fn new(name: &'static str, ty: ParamType) -> Self {
        Self { name, ty, default: None, section: None, description: None, output: false }
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: ParamValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Starts a new form section at this parameter.
    #[must_use]
    pub fn section(mut self, title: &'static str) -> Self {
        self.section = Some(title);
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn describe(mut self, text: &'static str) -> Self {
        self.description = Some(text);
        self
    }

    /// Marks the parameter as an output location.
    #[must_use]
    pub fn output(mut self) -> Self {
        self.output = true;
        self
    }
}

/// A group of consecutive specs under one section title.
#[derive(Debug, Clone, Serialize)]
pub struct Section<'a> {
    /// Title, `None` for specs declared before the first titled section.
    pub title: Option<&'static str>,
    /// Specs in declaration order.
    pub params: Vec<&'a ParamSpec>,
}

/// Ordered, name-unique collection of parameter specs.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Manifest {
    specs: Vec<ParamSpec>,
}

impl Manifest {
    /// Builds a manifest, preserving declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::Duplicate`] if two specs share a name.
    pub fn new(specs: Vec<ParamSpec>) -> Result<Self, ParamError> {
        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.name) {
                return Err(ParamError::Duplicate { name: spec.name.to_string() });
            }
        }
        Ok(Self { specs })
    }

    /// Iterates specs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ParamSpec> {
        self.specs.iter()
    }

    /// Looks up a spec by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    /// Number of declared parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the manifest declares nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Groups specs into form sections.
    ///
    /// A spec with a section title opens a new section; specs without one
    /// belong to the most recently opened section.
    #[must_use]
    pub fn sections(&self) -> Vec<Section<'_>> {
        let mut sections: Vec<Section<'_>> = Vec::new();
        for spec in &self.specs {
            match (spec.section, sections.last_mut()) {
                (None, Some(current)) => current.params.push(spec),
                (title, _) => sections.push(Section { title, params: vec![spec] }),
            }
        }
        sections
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a ParamSpec;
    type IntoIter = std::slice::Iter<'a, ParamSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.specs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &'static str) -> ParamSpec {
        ParamSpec::new(name, ParamType::Optional(ValueKind::String))
    }

    #[test]
    fn rejects_duplicate_names() {
        let result = Manifest::new(vec![spec("email"), spec("outdir"), spec("email")]);
        assert_eq!(result.unwrap_err(), ParamError::Duplicate { name: "email".into() });
    }

    #[test]
    fn preserves_declaration_order() {
        let manifest = Manifest::new(vec![spec("b"), spec("a"), spec("c")]).unwrap();
        let names: Vec<_> = manifest.iter().map(|s| s.name).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn untitled_specs_join_the_previous_section() {
        let manifest = Manifest::new(vec![
            spec("input").section("Input/output options"),
            spec("outdir"),
            spec("assembly_min_length").section("Assembly filtering options"),
        ])
        .unwrap();

        let sections = manifest.sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, Some("Input/output options"));
        assert_eq!(sections[0].params.len(), 2);
        assert_eq!(sections[1].params[0].name, "assembly_min_length");
    }

    #[test]
    fn leading_untitled_specs_form_their_own_section() {
        let manifest = Manifest::new(vec![spec("a"), spec("b").section("B")]).unwrap();
        let sections = manifest.sections();
        assert_eq!(sections[0].title, None);
        assert_eq!(sections[1].title, Some("B"));
    }

    #[test]
    fn describes_optional_types() {
        assert_eq!(ParamType::Optional(ValueKind::Integer).describe(), "optional<integer>");
        assert_eq!(ParamType::Required(ValueKind::File).describe(), "file");
    }
}
