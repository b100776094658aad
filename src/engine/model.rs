//! Structural config model.
//!
//! The classifier needs an order-independent view of each configuration to
//! tell "removed" apart from "moved". [`ConfigModel`] is the seam for that:
//! a vendor-aware parser can implement it, and [`IndentConfigModel`] is the
//! built-in indentation-only implementation.

use super::path::{index, ConfigLine};
use crate::utils::config::{COMMENT_PREFIX, PATH_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

/// Device platform of a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    #[default]
    CiscoIos,
    CiscoNxos,
    CiscoXr,
    AristaEos,
    JuniperJunos,
    FortinetFortios,
    HpComware5,
    HpProcurve,
    Vyos,
    Generic,
}

impl Platform {
    pub const ALL: [Platform; 10] = [
        Platform::CiscoIos,
        Platform::CiscoNxos,
        Platform::CiscoXr,
        Platform::AristaEos,
        Platform::JuniperJunos,
        Platform::FortinetFortios,
        Platform::HpComware5,
        Platform::HpProcurve,
        Platform::Vyos,
        Platform::Generic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Platform::CiscoIos => "CISCO_IOS",
            Platform::CiscoNxos => "CISCO_NXOS",
            Platform::CiscoXr => "CISCO_XR",
            Platform::AristaEos => "ARISTA_EOS",
            Platform::JuniperJunos => "JUNIPER_JUNOS",
            Platform::FortinetFortios => "FORTINET_FORTIOS",
            Platform::HpComware5 => "HP_COMWARE5",
            Platform::HpProcurve => "HP_PROCURVE",
            Platform::Vyos => "VYOS",
            Platform::Generic => "GENERIC",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('-', "_");
        Platform::ALL
            .into_iter()
            .find(|platform| platform.name().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("Unknown platform: {}", s))
    }
}

/// Path keys present on only one side of a structural comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuralDiff {
    /// Keys only in the target tree
    pub added: HashSet<String>,

    /// Keys only in the source tree
    pub deleted: HashSet<String>,
}

impl StructuralDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.deleted.is_empty()
    }
}

/// Order-independent tree of stripped line texts
///
/// Sibling lines with the same text merge into one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigTree {
    children: BTreeMap<String, ConfigTree>,
}

impl ConfigTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from indented lines, skipping blank and comment lines
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let significant: Vec<&str> = lines
            .iter()
            .map(AsRef::as_ref)
            .filter(|raw| {
                let line = ConfigLine::parse(raw);
                !line.is_blank() && !line.text.starts_with(COMMENT_PREFIX)
            })
            .collect();

        let mut tree = Self::new();
        for path in index(&significant) {
            tree.insert_path(path.segments());
        }
        tree
    }

    /// Insert one ancestor-to-self path, creating missing ancestors
    pub fn insert_path<S: AsRef<str>>(&mut self, segments: &[S]) {
        let mut node = self;
        for segment in segments {
            node = node
                .children
                .entry(segment.as_ref().to_string())
                .or_default();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Every path key in the tree
    pub fn keys(&self) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        self.collect_all(&mut Vec::new(), &mut |key| {
            keys.insert(key);
        });
        keys
    }

    /// Compare two trees regardless of line order
    ///
    /// # Returns
    /// `deleted` holds keys only in `self`, `added` keys only in `other`.
    /// A node missing on one side contributes all of its descendants too.
    pub fn structural_diff(&self, other: &ConfigTree) -> StructuralDiff {
        let mut deleted = HashSet::new();
        let mut added = HashSet::new();
        self.collect_only_here(other, &mut Vec::new(), &mut deleted);
        other.collect_only_here(self, &mut Vec::new(), &mut added);
        StructuralDiff { added, deleted }
    }

    fn collect_only_here(
        &self,
        other: &ConfigTree,
        prefix: &mut Vec<String>,
        out: &mut HashSet<String>,
    ) {
        for (text, child) in &self.children {
            prefix.push(text.clone());
            match other.children.get(text) {
                Some(counterpart) => child.collect_only_here(counterpart, prefix, out),
                None => {
                    out.insert(prefix.join(PATH_SEPARATOR));
                    child.collect_all(prefix, &mut |key| {
                        out.insert(key);
                    });
                }
            }
            prefix.pop();
        }
    }

    fn collect_all(&self, prefix: &mut Vec<String>, sink: &mut dyn FnMut(String)) {
        for (text, child) in &self.children {
            prefix.push(text.clone());
            sink(prefix.join(PATH_SEPARATOR));
            child.collect_all(prefix, sink);
            prefix.pop();
        }
    }
}

/// Collaborator that parses configurations into structural trees
pub trait ConfigModel {
    /// Whether `platform` has structural-parse support
    fn supports(&self, platform: Platform) -> bool;

    /// Parse `text`; `None` means the platform has no structural support
    fn parse(&self, platform: Platform, text: &str) -> Option<ConfigTree>;

    /// Structural diff of two texts, or `None` without capability
    fn structural_diff(&self, platform: Platform, source: &str, target: &str) -> Option<StructuralDiff> {
        let source_tree = self.parse(platform, source)?;
        let target_tree = self.parse(platform, target)?;
        Some(source_tree.structural_diff(&target_tree))
    }
}

/// Indentation-based model
///
/// Only IOS-style configurations are parsed by default; other platforms
/// report no capability so the classifier degrades instead of guessing.
#[derive(Debug, Clone)]
pub struct IndentConfigModel {
    platforms: Vec<Platform>,
}

impl IndentConfigModel {
    pub fn new() -> Self {
        Self {
            platforms: vec![Platform::CiscoIos],
        }
    }

    /// Model that treats every platform in `platforms` as indentation-structured
    pub fn with_platforms(platforms: impl IntoIterator<Item = Platform>) -> Self {
        Self {
            platforms: platforms.into_iter().collect(),
        }
    }
}

impl Default for IndentConfigModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigModel for IndentConfigModel {
    fn supports(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }

    fn parse(&self, platform: Platform, text: &str) -> Option<ConfigTree> {
        if !self.supports(platform) {
            return None;
        }
        let lines: Vec<&str> = text.lines().collect();
        Some(ConfigTree::from_lines(&lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(keys: &[&str]) -> HashSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_platform_round_trip_names() {
        for platform in Platform::ALL {
            assert_eq!(platform.name().parse::<Platform>().unwrap(), platform);
        }
        assert_eq!("cisco-ios".parse::<Platform>().unwrap(), Platform::CiscoIos);
        assert!("CISCO_ASA".parse::<Platform>().is_err());
    }

    #[test]
    fn test_tree_skips_comments_and_blanks() {
        let tree = ConfigTree::from_lines(&["hostname r1", "!", "", "interface Gi0/0", " no shutdown"]);

        let keys: Vec<String> = tree.keys().into_iter().collect();
        assert_eq!(
            keys,
            vec!["hostname r1", "interface Gi0/0", "interface Gi0/0 > no shutdown"]
        );
    }

    #[test]
    fn test_structural_diff_ignores_order() {
        let a = ConfigTree::from_lines(&["interface A", " x", "interface B", " y"]);
        let b = ConfigTree::from_lines(&["interface B", " y", "interface A", " x"]);

        assert!(a.structural_diff(&b).is_empty());
    }

    #[test]
    fn test_structural_diff_includes_descendants() {
        let a = ConfigTree::from_lines(&["interface A", " x", "interface B", " y"]);
        let b = ConfigTree::from_lines(&["interface A", " x", " z"]);
        let diff = a.structural_diff(&b);

        assert_eq!(diff.deleted, set(&["interface B", "interface B > y"]));
        assert_eq!(diff.added, set(&["interface A > z"]));
    }

    #[test]
    fn test_unsupported_platform_has_no_capability() {
        let model = IndentConfigModel::new();

        assert!(model.supports(Platform::CiscoIos));
        assert!(model.parse(Platform::JuniperJunos, "set system host-name r1").is_none());
        assert!(model.structural_diff(Platform::Vyos, "a", "b").is_none());

        let widened = IndentConfigModel::with_platforms(Platform::ALL);
        assert!(widened.structural_diff(Platform::Vyos, "a", "b").is_some());
    }
}
