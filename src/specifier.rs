//! Requirement specifier parsing and package name normalization.
//!
//! Specifiers have the shape `name[extra1,extra2]==version`. Only the
//! exact `==` pin is split out; everything else about version syntax is
//! left alone.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Bracketed, comma-separated list of identifiers, e.g. `[doc,security]`.
static EXTRAS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?:[^\d\W]\w*)(?:,[^\d\W]\w*)*\]").expect("extras pattern is valid")
});

/// Runs of name separators collapsed by [`normalize`].
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_.]+").expect("separator pattern is valid"));

/// Errors produced while parsing a requirement specifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecifierError {
    /// The extras clause is not a well-formed `[a,b]` list at the end of the name.
    #[error("malformed extras in specifier '{0}'")]
    MalformedExtras(String),
    /// The specifier has no package name.
    #[error("missing package name in specifier '{0}'")]
    EmptyName(String),
}

/// A requirement specifier split into its components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Specifier {
    /// Normalized package name.
    pub name: String,
    /// Bracketed extras clause including the brackets, or empty.
    pub extras: String,
    /// Raw text after `==`, or empty when unpinned.
    pub version: String,
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.extras)?;
        if !self.version.is_empty() {
            write!(f, "=={}", self.version)?;
        }
        Ok(())
    }
}

/// Parses a requirement specifier such as `Foo_Bar[doc]==1.0`.
///
/// Empty input yields an empty [`Specifier`] rather than an error.
///
/// # Errors
///
/// Returns [`SpecifierError::MalformedExtras`] when the segment before `==`
/// contains `[` but does not end with a valid extras clause.
pub fn parse(s: &str) -> Result<Specifier, SpecifierError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Specifier::default());
    }

    let (segment, version) = match s.split_once("==") {
        Some((segment, version)) => (segment, version.to_string()),
        None => (s, String::new()),
    };

    if !segment.contains('[') {
        return Ok(Specifier { name: normalize(segment), extras: String::new(), version });
    }

    let found = EXTRAS
        .find(segment)
        .filter(|m| m.end() == segment.trim_end().len())
        .ok_or_else(|| SpecifierError::MalformedExtras(s.to_string()))?;

    Ok(Specifier {
        name: normalize(&segment[..found.start()]),
        extras: found.as_str().to_string(),
        version,
    })
}

/// Parses a specifier given on the command line, which must name a package.
///
/// # Errors
///
/// Returns any [`parse`] error, or [`SpecifierError::EmptyName`] when the
/// name part is empty.
pub fn parse_requested(s: &str) -> Result<Specifier, SpecifierError> {
    let spec = parse(s)?;
    if spec.name.is_empty() {
        return Err(SpecifierError::EmptyName(s.to_string()));
    }
    Ok(spec)
}

/// Returns the normalized name a manifest line refers to, if any.
///
/// Blank lines, comments and lines that do not parse refer to no package.
#[must_use]
pub fn line_name(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    match parse(trimmed) {
        Ok(spec) if !spec.name.is_empty() => Some(spec.name),
        Ok(_) => None,
        Err(err) => {
            tracing::debug!(%err, "passing through unparsable manifest line");
            None
        }
    }
}

/// Normalizes a package name: lowercase, separator runs collapsed to `-`.
#[must_use]
pub fn normalize(name: &str) -> String {
    SEPARATORS.replace_all(name.trim(), "-").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(s: &str) -> (String, String, String) {
        let spec = parse(s).unwrap();
        (spec.name, spec.extras, spec.version)
    }

    fn owned(name: &str, extras: &str, version: &str) -> (String, String, String) {
        (name.to_string(), extras.to_string(), version.to_string())
    }

    #[test]
    fn parses_plain_name() {
        assert_eq!(parts("loki"), owned("loki", "", ""));
    }

    #[test]
    fn parses_name_with_extras() {
        assert_eq!(parts("loki[doc,security]"), owned("loki", "[doc,security]", ""));
    }

    #[test]
    fn parses_name_with_version() {
        assert_eq!(parts("loki==0.0.1"), owned("loki", "", "0.0.1"));
    }

    #[test]
    fn parses_name_with_extras_and_version() {
        assert_eq!(parts("loki[doc,security]==0.0.1"), owned("loki", "[doc,security]", "0.0.1"));
    }

    #[test]
    fn empty_input_is_empty_specifier() {
        assert_eq!(parse("").unwrap(), Specifier::default());
        assert_eq!(parse("   ").unwrap(), Specifier::default());
    }

    #[test]
    fn plain_names_parse_to_their_normal_form() {
        for s in ["Django", "zope.interface", "Foo__Bar", "a-_.b"] {
            assert_eq!(parts(s), (normalize(s), String::new(), String::new()));
        }
    }

    #[test]
    fn name_is_normalized_before_extras() {
        assert_eq!(
            parts("Typing_Extensions[Full]==4.0"),
            owned("typing-extensions", "[Full]", "4.0")
        );
    }

    #[test]
    fn version_is_kept_verbatim() {
        assert_eq!(parts("pkg==1.0==2"), owned("pkg", "", "1.0==2"));
    }

    #[test]
    fn trailing_carriage_return_is_ignored() {
        assert_eq!(parts("starlette==0.25.0\r"), owned("starlette", "", "0.25.0"));
    }

    #[test]
    fn malformed_extras_are_rejected() {
        assert!(matches!(parse("loki[doc,"), Err(SpecifierError::MalformedExtras(_))));
        assert!(matches!(parse("loki[1doc]"), Err(SpecifierError::MalformedExtras(_))));
        assert!(matches!(parse("loki[doc]junk==1"), Err(SpecifierError::MalformedExtras(_))));
    }

    #[test]
    fn requested_specifier_needs_a_name() {
        assert_eq!(
            parse_requested("[doc]"),
            Err(SpecifierError::EmptyName("[doc]".to_string()))
        );
        assert!(parse_requested("loki").is_ok());
    }

    #[test]
    fn display_rejoins_components() {
        let spec = parse("Loki[doc]==0.0.1").unwrap();
        assert_eq!(spec.to_string(), "loki[doc]==0.0.1");
        assert_eq!(parse("loki").unwrap().to_string(), "loki");
    }

    #[test]
    fn line_name_skips_comments_and_blanks() {
        assert_eq!(line_name("# pinned"), None);
        assert_eq!(line_name(""), None);
        assert_eq!(line_name("broken[extras"), None);
        assert_eq!(line_name("Starlette[full]==0.25.0"), Some("starlette".to_string()));
    }

    #[test]
    fn normalize_lowercases_and_collapses_separators() {
        assert_eq!(normalize("Foo_Bar.Baz"), "foo-bar-baz");
        assert_eq!(normalize("a--__..b"), "a-b");
    }

    #[test]
    fn normalize_is_idempotent() {
        for s in ["Foo_Bar.Baz", "UPPER", "x._-y", "plain"] {
            assert_eq!(normalize(&normalize(s)), normalize(s));
        }
    }
}
