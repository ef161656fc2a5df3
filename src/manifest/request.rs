//! Packages requested on the command line.

use crate::specifier::{self, SpecifierError};

/// Normalized package names mapped to their requested extras clause.
///
/// Iteration follows the order names were first given. Giving the same
/// package again replaces its extras.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSet {
    entries: Vec<(String, String)>,
}

impl RequestSet {
    /// Creates an empty request set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a request set from raw specifier arguments.
    ///
    /// # Errors
    ///
    /// Returns the first argument that is not a valid, named specifier.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, SpecifierError> {
        let mut set = Self::new();
        for arg in args {
            let spec = specifier::parse_requested(arg.as_ref())?;
            set.insert(spec.name, spec.extras);
        }
        Ok(set)
    }

    /// Adds a package, replacing the extras of an existing entry.
    pub fn insert(&mut self, name: impl Into<String>, extras: impl Into<String>) {
        let name = name.into();
        let extras = extras.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = extras,
            None => self.entries.push((name, extras)),
        }
    }

    /// Returns `true` if the normalized name was requested.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(existing, _)| existing == name)
    }

    /// Iterates `(name, extras)` pairs in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(name, extras)| (name.as_str(), extras.as_str()))
    }

    /// Number of requested packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, E: Into<String>> FromIterator<(N, E)> for RequestSet {
    fn from_iter<T: IntoIterator<Item = (N, E)>>(iter: T) -> Self {
        let mut set = Self::new();
        for (name, extras) in iter {
            set.insert(name, extras);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_seen_order() {
        let set = RequestSet::from_args(&["zeta", "Alpha[x]==1.0", "mid"]).unwrap();
        let names: Vec<_> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn duplicate_names_keep_last_extras() {
        let set = RequestSet::from_args(&["Foo_Bar[a]", "zeta", "foo.bar[b]"]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().next(), Some(("foo-bar", "[b]")));
    }

    #[test]
    fn rejects_malformed_arguments() {
        assert!(matches!(
            RequestSet::from_args(&["ok", "bad[extras"]),
            Err(SpecifierError::MalformedExtras(_))
        ));
        assert!(matches!(RequestSet::from_args(&[""]), Err(SpecifierError::EmptyName(_))));
    }

    #[test]
    fn contains_matches_normalized_names() {
        let set: RequestSet = [("starlette", "")].into_iter().collect();
        assert!(set.contains("starlette"));
        assert!(!set.contains("Starlette"));
        assert!(!set.is_empty());
    }
}
