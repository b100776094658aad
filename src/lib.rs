//! Config Lens
//!
//! Hierarchy-aware comparison and change validation for network device
//! configurations.
//!
//! Lines are identified by their full ancestor chain, so `no shutdown`
//! under two different interfaces never compares equal; moved blocks are
//! reported as reorders rather than delete/insert pairs; split VLAN trunk
//! declarations are canonicalized before comparing; and a change command
//! list can be checked against the difference it is supposed to produce.
//!
//! This crate provides the engine and the implementation of the
//! `config-lens` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install config-lens
//! config-lens compare running.cfg candidate.cfg --summary
//! config-lens validate running.cfg change.txt expected.cfg
//! ```

pub mod commands;
pub mod engine;
pub mod output;
pub mod utils;
pub mod validate;
pub mod vlan;
