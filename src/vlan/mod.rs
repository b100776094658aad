//! VLAN trunk normalization.
//!
//! Switch configs often spread the allowed VLAN list of a trunk over an
//! initial `switchport trunk allowed vlan` line and any number of `... add`
//! lines. Two configs carrying the same VLANs in a different split would
//! otherwise diff noisily; this module rewrites each interface's list into
//! one canonical, range-compacted line.
//!
//! # Example
//! ```ignore
//! use config_lens::vlan::{normalize_pair, VlanSet};
//!
//! let (running, candidate) = normalize_pair(&running, &candidate)?;
//! let ids = VlanSet::parse("10,20,100-105", "interface Gi1/0/1")?;
//! assert_eq!(ids.compact(), "10,20,100-105");
//! ```

mod normalizer;
mod ranges;

// Public API exports
pub use normalizer::{normalize, normalize_pair};
pub use ranges::VlanSet;
