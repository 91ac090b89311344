//! Concrete parameter values and their parsing.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use super::{ParamSpec, ValueKind};
use crate::error::ParamError;

/// Location of a file or directory argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathRef {
    /// Absolute path on the local filesystem.
    Local(PathBuf),
    /// Remote URI such as `latch:///data/samples.csv` or `s3://bucket/key`.
    Remote(String),
}

impl PathRef {
    /// Resolves a raw reference against `base`.
    ///
    /// Anything carrying a `scheme://` prefix is kept verbatim; relative
    /// local paths are joined onto `base`.
    #[must_use]
    pub fn resolve(raw: &str, base: &Path) -> Self {
        if has_scheme(raw) {
            return PathRef::Remote(raw.to_string());
        }
        let path = Path::new(raw);
        if path.is_absolute() {
            PathRef::Local(path.to_path_buf())
        } else {
            PathRef::Local(base.join(path))
        }
    }
}

impl fmt::Display for PathRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathRef::Local(path) => write!(f, "{}", path.display()),
            PathRef::Remote(uri) => f.write_str(uri),
        }
    }
}

impl Serialize for PathRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn has_scheme(raw: &str) -> bool {
    raw.split_once("://").is_some_and(|(scheme, _)| {
        !scheme.is_empty()
            && scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// A concrete value for one parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Free text.
    Str(String),
    /// Integer.
    Int(i64),
    /// Float.
    Float(f64),
    /// Presence flag.
    Bool(bool),
    /// File reference.
    File(PathRef),
    /// Directory reference.
    Dir(PathRef),
}

impl ParamValue {
    /// Shorthand for a string value.
    #[must_use]
    pub fn str(value: impl Into<String>) -> Self {
        ParamValue::Str(value.into())
    }

    /// Renders the value the way the pipeline reads it on its command line.
    ///
    /// Whole floats keep a trailing `.0` so `1.0` is not read back as an
    /// integer by the pipeline's schema validation.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            ParamValue::Str(s) => s.clone(),
            ParamValue::Int(n) => n.to_string(),
            ParamValue::Float(x) => render_float(*x),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::File(path) | ParamValue::Dir(path) => path.to_string(),
        }
    }

    /// Parses a JSON/YAML value for `spec`.
    ///
    /// Strings are accepted for numeric and boolean kinds, and numbers or
    /// booleans are accepted for string kinds.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::TypeMismatch`] when the value cannot be read as
    /// the declared kind. `null` is not handled here; callers treat it as
    /// absence before parsing.
    pub fn from_json(
        spec: &ParamSpec,
        raw: &serde_json::Value,
        base: &Path,
    ) -> Result<Self, ParamError> {
        use serde_json::Value;

        let kind = spec.ty.kind();
        let mismatch = || ParamError::TypeMismatch {
            name: spec.name.to_string(),
            expected: kind.as_str(),
            found: raw.to_string(),
        };

        match (kind, raw) {
            (_, Value::String(s)) => Self::parse_str(spec, s, base),
            (ValueKind::String, Value::Number(n)) => Ok(ParamValue::Str(n.to_string())),
            (ValueKind::String, Value::Bool(b)) => Ok(ParamValue::Str(b.to_string())),
            (ValueKind::Integer, Value::Number(n)) => {
                n.as_i64().map(ParamValue::Int).ok_or_else(mismatch)
            }
            (ValueKind::Float, Value::Number(n)) => {
                n.as_f64().map(ParamValue::Float).ok_or_else(mismatch)
            }
            (ValueKind::Boolean, Value::Bool(b)) => Ok(ParamValue::Bool(*b)),
            _ => Err(mismatch()),
        }
    }

    /// Parses a raw command-line string for `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`ParamError::TypeMismatch`] when the text cannot be read as
    /// the declared kind.
    pub fn parse_str(spec: &ParamSpec, raw: &str, base: &Path) -> Result<Self, ParamError> {
        let kind = spec.ty.kind();
        let mismatch = || ParamError::TypeMismatch {
            name: spec.name.to_string(),
            expected: kind.as_str(),
            found: format!("{raw:?}"),
        };
        let trimmed = raw.trim();

        match kind {
            ValueKind::String => Ok(ParamValue::Str(raw.to_string())),
            ValueKind::Integer => trimmed.parse().map(ParamValue::Int).map_err(|_| mismatch()),
            ValueKind::Float => trimmed
                .parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .map(ParamValue::Float)
                .ok_or_else(mismatch),
            ValueKind::Boolean => match trimmed.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(ParamValue::Bool(true)),
                "false" | "no" | "0" => Ok(ParamValue::Bool(false)),
                _ => Err(mismatch()),
            },
            ValueKind::File if !trimmed.is_empty() => {
                Ok(ParamValue::File(PathRef::resolve(trimmed, base)))
            }
            ValueKind::Directory if !trimmed.is_empty() => {
                Ok(ParamValue::Dir(PathRef::resolve(trimmed, base)))
            }
            ValueKind::File | ValueKind::Directory => Err(mismatch()),
        }
    }
}

fn render_float(x: f64) -> String {
    let text = x.to_string();
    if x.is_finite() && !text.contains(['.', 'e', 'E']) {
        format!("{text}.0")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ParamType;
    use serde_json::json;

    fn spec(kind: ValueKind) -> ParamSpec {
        ParamSpec::new("p", ParamType::Optional(kind))
    }

    #[test]
    fn whole_floats_keep_a_decimal_point() {
        assert_eq!(ParamValue::Float(1.0).render(), "1.0");
        assert_eq!(ParamValue::Float(0.95).render(), "0.95");
        assert_eq!(ParamValue::Float(-3.0).render(), "-3.0");
    }

    #[test]
    fn integers_accept_numeric_strings() {
        let value =
            ParamValue::from_json(&spec(ValueKind::Integer), &json!("1000"), Path::new("/"));
        assert_eq!(value.unwrap(), ParamValue::Int(1000));
    }

    #[test]
    fn integers_reject_fractions() {
        let err = ParamValue::from_json(&spec(ValueKind::Integer), &json!(1.5), Path::new("/"))
            .unwrap_err();
        assert!(matches!(err, ParamError::TypeMismatch { expected: "integer", .. }));
    }

    #[test]
    fn floats_accept_integers() {
        let value = ParamValue::from_json(&spec(ValueKind::Float), &json!(1), Path::new("/"));
        assert_eq!(value.unwrap(), ParamValue::Float(1.0));
    }

    #[test]
    fn strings_accept_numbers() {
        let value =
            ParamValue::from_json(&spec(ValueKind::String), &json!(21), Path::new("/"));
        assert_eq!(value.unwrap(), ParamValue::str("21"));
    }

    #[test]
    fn booleans_parse_common_spellings() {
        let s = spec(ValueKind::Boolean);
        let parse = |raw| ParamValue::parse_str(&s, raw, Path::new("/"));
        assert_eq!(parse("yes").unwrap(), ParamValue::Bool(true));
        assert_eq!(parse("False").unwrap(), ParamValue::Bool(false));
        assert!(parse("maybe").is_err());
    }

    #[test]
    fn relative_files_resolve_against_base() {
        let value =
            ParamValue::parse_str(&spec(ValueKind::File), "data/samples.csv", Path::new("/work"))
                .unwrap();
        let expected = PathRef::Local(PathBuf::from("/work/data/samples.csv"));
        assert_eq!(value, ParamValue::File(expected));
        assert_eq!(value.render(), "/work/data/samples.csv");
    }

    #[test]
    fn remote_references_pass_through() {
        let value = ParamValue::parse_str(
            &spec(ValueKind::Directory),
            "latch:///runs/out",
            Path::new("/work"),
        )
        .unwrap();
        assert_eq!(value, ParamValue::Dir(PathRef::Remote("latch:///runs/out".into())));
    }

    #[test]
    fn empty_file_reference_is_rejected() {
        assert!(ParamValue::parse_str(&spec(ValueKind::File), "  ", Path::new("/")).is_err());
    }

    #[test]
    fn scheme_detection_ignores_plain_paths() {
        assert!(has_scheme("s3://bucket/key"));
        assert!(!has_scheme("/tmp/a://b"));
        assert!(!has_scheme("://nothing"));
    }
}
