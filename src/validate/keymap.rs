//! Change command parsing and key maps.
//!
//! Each change command is registered under two keys: the key it adds to the
//! expected config, and the key whose removal from the running config it
//! explains (`X` <-> `no X` on the leaf).

use crate::engine::{index, is_path_prefix, HierarchicalPath};
use crate::utils::config::{COMMENT_PREFIX, NEGATION_PREFIX};
use std::collections::HashMap;

/// One meaningful line of a change list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeCommand {
    /// Index of the line in the change text
    pub line: usize,

    pub path: HierarchicalPath,

    /// Leaf starts with `no `
    pub negated: bool,
}

impl ChangeCommand {
    pub fn key(&self) -> String {
        self.path.key()
    }

    /// Key this command adds to the expected config
    pub fn add_key(&self) -> String {
        self.path.key()
    }

    /// Key of the running-config line this command removes
    pub fn remove_key(&self) -> String {
        let leaf = self.path.leaf();
        let flipped = match leaf.strip_prefix(NEGATION_PREFIX) {
            Some(rest) if self.negated => rest.trim().to_string(),
            _ => format!("{}{}", NEGATION_PREFIX, leaf),
        };
        self.path.with_leaf(flipped).key()
    }
}

/// Parse change text into commands, skipping blank and comment lines
///
/// Paths are computed over every line, so a blank line still closes the
/// current block.
pub fn parse_change_commands<S: AsRef<str>>(lines: &[S]) -> Vec<ChangeCommand> {
    index(lines)
        .into_iter()
        .enumerate()
        .filter_map(|(line, path)| {
            let leaf = path.leaf();
            if leaf.is_empty() || leaf.starts_with(COMMENT_PREFIX) {
                return None;
            }
            let negated = leaf.starts_with(NEGATION_PREFIX);
            Some(ChangeCommand { line, path, negated })
        })
        .collect()
}

/// Insertion-ordered map from path key to change line indices
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMap {
    entries: Vec<(String, Vec<usize>)>,
    positions: HashMap<String, usize>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, line: usize) {
        match self.positions.get(&key) {
            Some(&pos) => self.entries[pos].1.push(line),
            None => {
                self.positions.insert(key.clone(), self.entries.len());
                self.entries.push((key, vec![line]));
            }
        }
    }

    /// Exact lookup
    pub fn get(&self, key: &str) -> Option<&[usize]> {
        self.positions
            .get(key)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    /// Exact lookup, then a case-insensitive scan in insertion order for the
    /// first entry equal to `key` or a path prefix of it
    pub fn lookup_with_prefix(&self, key: &str) -> Option<&[usize]> {
        if let Some(lines) = self.get(key) {
            return Some(lines);
        }

        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|(entry, _)| is_path_prefix(&entry.to_lowercase(), &key))
            .map(|(_, lines)| lines.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[usize])> {
        self.entries
            .iter()
            .map(|(key, lines)| (key.as_str(), lines.as_slice()))
    }
}

/// The `add` and `remove` maps of one change list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeKeyMaps {
    pub add: KeyMap,
    pub remove: KeyMap,
}

/// Register every command under its add and remove key
pub fn build_key_maps(commands: &[ChangeCommand]) -> ChangeKeyMaps {
    let mut maps = ChangeKeyMaps::default();
    for command in commands {
        maps.add.insert(command.add_key(), command.line);
        maps.remove.insert(command.remove_key(), command.line);
    }
    maps
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_skips_blank_and_comments() {
        let commands = parse_change_commands(&["!", "interface Gi0/1", " shutdown", "", "  "]);

        assert_eq!(commands.len(), 2);
        assert_eq!(commands[1].line, 2);
        assert_eq!(commands[1].key(), "interface Gi0/1 > shutdown");
    }

    #[test]
    fn test_symmetric_keys() {
        let commands = parse_change_commands(&["interface Gi0/1", " shutdown", " no cdp enable"]);

        assert_eq!(commands[1].add_key(), "interface Gi0/1 > shutdown");
        assert_eq!(commands[1].remove_key(), "interface Gi0/1 > no shutdown");
        assert!(commands[2].negated);
        assert_eq!(commands[2].add_key(), "interface Gi0/1 > no cdp enable");
        assert_eq!(commands[2].remove_key(), "interface Gi0/1 > cdp enable");
    }

    #[test]
    fn test_key_map_keeps_insertion_order() {
        let commands = parse_change_commands(&["no vlan 10", "no vlan 20", "no vlan 10"]);
        let maps = build_key_maps(&commands);

        let keys: Vec<&str> = maps.remove.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["vlan 10", "vlan 20"]);
        assert_eq!(maps.remove.get("vlan 10"), Some(&[0, 2][..]));
    }

    #[test]
    fn test_prefix_lookup_covers_children() {
        let commands = parse_change_commands(&["no interface Gi0/2"]);
        let maps = build_key_maps(&commands);

        assert_eq!(
            maps.remove.lookup_with_prefix("INTERFACE Gi0/2 > description x"),
            Some(&[0][..])
        );
        assert_eq!(maps.remove.lookup_with_prefix("interface Gi0/20"), None);
        assert_eq!(maps.add.lookup_with_prefix("no interface Gi0/2"), Some(&[0][..]));
    }

    #[test]
    fn test_prefix_lookup_respects_segment_boundaries() {
        let commands = parse_change_commands(&["no router ospf 1"]);
        let maps = build_key_maps(&commands);

        assert_eq!(maps.remove.lookup_with_prefix("Router OSPF 1 > area 0 > range 10.0.0.0"), Some(&[0][..]));
        assert_eq!(maps.remove.lookup_with_prefix("router ospf 10 > area 0"), None);
        assert_eq!(maps.remove.lookup_with_prefix("router ospf 1>area 0"), None);
    }
}
