// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Package name value type.

use std::fmt;

/// Dot-separated package identifier.
///
/// The default (unnamed) package is an explicit, valid, empty value --
/// distinct from "package could not be resolved", which is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PackageName(String);

impl PackageName {
    /// Create a package name from a dotted identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The unnamed (default) package.
    pub fn unnamed() -> Self {
        Self(String::new())
    }

    /// Returns `true` for the unnamed package.
    pub fn is_unnamed(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Dot-separated segments, outermost first. Empty for the unnamed package.
    pub fn segments(&self) -> Vec<&str> {
        if self.0.is_empty() {
            Vec::new()
        } else {
            self.0.split('.').collect()
        }
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments() {
        let pkg = PackageName::new("com.example.model");
        assert_eq!(pkg.segments(), vec!["com", "example", "model"]);
    }

    #[test]
    fn test_unnamed_is_valid_and_empty() {
        let pkg = PackageName::unnamed();
        assert!(pkg.is_unnamed());
        assert!(pkg.segments().is_empty());
        assert_eq!(pkg.to_string(), "");
    }

    #[test]
    fn test_equality() {
        assert_eq!(PackageName::new("java.lang"), PackageName::from("java.lang"));
        assert_ne!(PackageName::new("java.lang"), PackageName::new("java.util"));
    }
}
