//! Dot separated node paths (`emailGroup.email`, `addressesGroup.0.city`)

use std::fmt;
use std::str::FromStr;

/// Location of a node below the root group. The empty path is the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FormPath(Vec<String>);

impl FormPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::root();
        }
        Self(path.split('.').map(str::to_string).collect())
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path one level down
    pub fn child(&self, segment: impl ToString) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }

    /// First `len` segments
    pub fn prefix(&self, len: usize) -> Self {
        Self(self.0[..len.min(self.0.len())].to_vec())
    }

    /// This path followed by each ancestor up to and including the root
    pub fn lineage(&self) -> impl Iterator<Item = FormPath> + '_ {
        (0..=self.0.len()).rev().map(|len| self.prefix(len))
    }
}

impl fmt::Display for FormPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl FromStr for FormPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for FormPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_root() {
        let path = FormPath::parse("");
        assert!(path.is_root());
        assert_eq!(path, FormPath::root());
        assert_eq!(path.lineage().count(), 1);
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        let path = FormPath::parse("addressesGroup.0.city");
        assert_eq!(path.segments(), ["addressesGroup", "0", "city"]);
        assert_eq!(path.to_string(), "addressesGroup.0.city");
    }

    #[test]
    fn test_child_and_prefix() {
        let path = FormPath::root().child("emailGroup").child("email");
        assert_eq!(path, FormPath::from("emailGroup.email"));
        assert_eq!(path.prefix(1), FormPath::from("emailGroup"));
        assert_eq!(path.prefix(5), path);
    }

    #[test]
    fn test_lineage_walks_up_to_root() {
        let path = FormPath::from("a.b.c");
        let lineage: Vec<String> = path.lineage().map(|p| p.to_string()).collect();
        assert_eq!(lineage, vec!["a.b.c", "a.b", "a", ""]);
    }
}
