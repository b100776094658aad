//! VLAN id sets and range notation.

use crate::utils::error::VlanError;
use std::collections::BTreeSet;
use std::fmt;

/// Sorted set of VLAN ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VlanSet(BTreeSet<u16>);

impl VlanSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand `"10,20,100-105"` style notation
    ///
    /// Tokens are comma-separated; whitespace around tokens and empty tokens
    /// are tolerated. `block` only labels the error.
    ///
    /// # Errors
    /// * `VlanError::MalformedId` - a token is not an id, not an `a-b`
    ///   range, out of range, or reversed
    pub fn parse(notation: &str, block: &str) -> Result<Self, VlanError> {
        let mut ids = BTreeSet::new();

        for token in notation.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let malformed = || VlanError::MalformedId {
                token: token.to_string(),
                block: block.to_string(),
            };

            match token.split_once('-') {
                Some((start, end)) => {
                    let start: u16 = start.trim().parse().map_err(|_| malformed())?;
                    let end: u16 = end.trim().parse().map_err(|_| malformed())?;
                    if start > end {
                        return Err(malformed());
                    }
                    ids.extend(start..=end);
                }
                None => {
                    ids.insert(token.parse().map_err(|_| malformed())?);
                }
            }
        }

        Ok(Self(ids))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, id: u16) -> bool {
        self.0.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }

    pub fn extend(&mut self, other: &VlanSet) {
        self.0.extend(other.iter());
    }

    /// Ids in `self` but not in `other`
    pub fn difference(&self, other: &VlanSet) -> VlanSet {
        Self(self.0.difference(&other.0).copied().collect())
    }

    /// Canonical notation: ascending, consecutive runs as `start-end`
    ///
    /// # Example
    /// `{10, 11, 12, 20, 30, 31}` renders as `"10-12,20,30-31"`.
    pub fn compact(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut ids = self.iter();

        let Some(first) = ids.next() else {
            return String::new();
        };
        let (mut start, mut prev) = (first, first);

        for id in ids {
            if prev.checked_add(1) == Some(id) {
                prev = id;
                continue;
            }
            parts.push(render_run(start, prev));
            start = id;
            prev = id;
        }
        parts.push(render_run(start, prev));

        parts.join(",")
    }
}

fn render_run(start: u16, end: u16) -> String {
    if start == end {
        start.to_string()
    } else {
        format!("{}-{}", start, end)
    }
}

impl fmt::Display for VlanSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.compact())
    }
}

impl FromIterator<u16> for VlanSet {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_notation() {
        let set = VlanSet::parse(" 10 , 20,100-102,, ", "interface Gi1/0/1").unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![10, 20, 100, 101, 102]);
    }

    #[test]
    fn test_compact_runs() {
        let set: VlanSet = [10, 11, 12, 20, 30, 31].into_iter().collect();
        assert_eq!(set.compact(), "10-12,20,30-31");
        assert_eq!(VlanSet::new().compact(), "");
    }

    #[test]
    fn test_compact_reaches_top_of_range() {
        let set: VlanSet = [65534, 65535].into_iter().collect();
        assert_eq!(set.to_string(), "65534-65535");
    }

    #[test]
    fn test_malformed_tokens() {
        for bad in ["abc", "10-", "-5", "20-10", "70000", "1-2-3"] {
            let err = VlanSet::parse(bad, "interface Gi0/1").unwrap_err();
            assert_eq!(
                err,
                VlanError::MalformedId {
                    token: bad.to_string(),
                    block: "interface Gi0/1".to_string(),
                }
            );
        }
    }

    #[test]
    fn test_difference() {
        let a = VlanSet::parse("1-5", "x").unwrap();
        let b = VlanSet::parse("4-8", "x").unwrap();

        assert_eq!(a.difference(&b).compact(), "1-3");
        assert_eq!(b.difference(&a).compact(), "6-8");
    }
}
