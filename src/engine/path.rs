//! Hierarchical path indexing.
//!
//! Every config line is identified by the chain of its ancestors' texts
//! rather than its own text, so `no shutdown` under two different
//! interfaces never compares equal.
//!
//! Example: `interface Gi0/1` followed by ` no shutdown` yields the key
//! `"interface Gi0/1 > no shutdown"` for the second line.

use crate::utils::config::PATH_SEPARATOR;
use std::fmt;

/// One raw config line split into indent and stripped text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigLine<'a> {
    /// Raw line as it appeared in the input
    pub raw: &'a str,

    /// Number of leading whitespace characters
    pub indent: usize,

    /// Line text without surrounding whitespace
    pub text: &'a str,
}

impl<'a> ConfigLine<'a> {
    /// Split a raw line into indent and stripped text
    pub fn parse(raw: &'a str) -> Self {
        let indent = raw.chars().take_while(|c| c.is_whitespace()).count();
        Self {
            raw,
            indent,
            text: raw.trim(),
        }
    }

    /// Blank lines carry no text at all
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Ancestor-to-self stripped texts of one line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct HierarchicalPath(Vec<String>);

impl HierarchicalPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments (1 for a top-level line)
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The line's own stripped text
    pub fn leaf(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or("")
    }

    /// Joined path key used as comparison identity
    pub fn key(&self) -> String {
        self.0.join(PATH_SEPARATOR)
    }

    /// Same ancestors with a different leaf text
    pub fn with_leaf(&self, leaf: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.pop();
        segments.push(leaf.into());
        Self(segments)
    }

    /// Keys of every strict prefix, shortest first
    pub fn ancestor_keys(&self) -> Vec<String> {
        (1..self.0.len())
            .map(|depth| self.0[..depth].join(PATH_SEPARATOR))
            .collect()
    }
}

impl fmt::Display for HierarchicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Compute the hierarchical path of every line
///
/// **Public** - leaf of the whole engine, also used by the config model
/// and the change validator
///
/// # Algorithm
/// Keep a stack of (indent, text). For each line pop every entry whose
/// indent is >= the current indent (closed siblings and their children),
/// push the current line, and read the stack bottom-up.
pub fn index<S: AsRef<str>>(lines: &[S]) -> Vec<HierarchicalPath> {
    let mut stack: Vec<(usize, &str)> = Vec::new();
    let mut paths = Vec::with_capacity(lines.len());

    for raw in lines {
        let line = ConfigLine::parse(raw.as_ref());

        while stack.last().is_some_and(|(indent, _)| *indent >= line.indent) {
            stack.pop();
        }
        stack.push((line.indent, line.text));

        paths.push(HierarchicalPath::new(
            stack.iter().map(|(_, text)| text.to_string()).collect(),
        ));
    }

    paths
}

/// Compute the path key of every line
pub fn path_keys<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    index(lines).iter().map(HierarchicalPath::key).collect()
}

/// True when `prefix` is `key` itself or one of its ancestor keys
pub fn is_path_prefix(prefix: &str, key: &str) -> bool {
    key == prefix
        || key
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with(PATH_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn segs(path: &HierarchicalPath) -> Vec<&str> {
        path.segments().iter().map(String::as_str).collect()
    }

    #[test]
    fn test_index_two_interfaces() {
        let config = [
            "interface GigabitEthernet0/1",
            " description Uplink to Core Switch",
            " ip address 192.168.1.1 255.255.255.0",
            "interface GigabitEthernet0/2",
            " description Connection to Server",
        ];
        let paths = index(&config);

        assert_eq!(segs(&paths[0]), vec!["interface GigabitEthernet0/1"]);
        assert_eq!(
            segs(&paths[2]),
            vec![
                "interface GigabitEthernet0/1",
                "ip address 192.168.1.1 255.255.255.0"
            ]
        );
        assert_eq!(segs(&paths[3]), vec!["interface GigabitEthernet0/2"]);
        assert_eq!(
            paths[4].key(),
            "interface GigabitEthernet0/2 > description Connection to Server"
        );
    }

    #[test]
    fn test_index_nested_sections() {
        let config = [
            "router bgp 65000",
            " address-family ipv4",
            "  neighbor 10.0.0.1 activate",
            " exit-address-family",
        ];
        let keys = path_keys(&config);

        assert_eq!(
            keys[2],
            "router bgp 65000 > address-family ipv4 > neighbor 10.0.0.1 activate"
        );
        assert_eq!(keys[3], "router bgp 65000 > exit-address-family");
    }

    #[test]
    fn test_blank_line_resets_hierarchy() {
        let config = ["interface Gi0/0", "", " no shutdown"];
        let keys = path_keys(&config);

        assert_eq!(keys[1], "");
        // the blank line closed the interface block
        assert_eq!(keys[2], " > no shutdown");
    }

    #[test]
    fn test_config_line_parse() {
        let line = ConfigLine::parse("  ip address 10.0.0.1 255.0.0.0  ");
        assert_eq!(line.indent, 2);
        assert_eq!(line.text, "ip address 10.0.0.1 255.0.0.0");
        assert!(ConfigLine::parse("   ").is_blank());
    }

    #[test]
    fn test_with_leaf_and_ancestors() {
        let path = HierarchicalPath::new(vec![
            "interface Gi0/1".to_string(),
            "shutdown".to_string(),
        ]);

        assert_eq!(path.leaf(), "shutdown");
        assert_eq!(path.with_leaf("no shutdown").key(), "interface Gi0/1 > no shutdown");
        assert_eq!(path.ancestor_keys(), vec!["interface Gi0/1".to_string()]);
    }

    #[test]
    fn test_is_path_prefix() {
        assert!(is_path_prefix("interface Gi0/1", "interface Gi0/1"));
        assert!(is_path_prefix("interface Gi0/1", "interface Gi0/1 > shutdown"));
        assert!(!is_path_prefix("interface Gi0/1", "interface Gi0/10 > shutdown"));
    }
}
