//! Trunk line normalization and pair annotation.

use super::ranges::VlanSet;
use crate::utils::config::{VLAN_DIFF_ANNOTATION_MARKER, VLAN_TRUNK_KEYWORD};
use crate::utils::error::VlanError;
use log::debug;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

fn init_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(\s*)switchport\s+trunk\s+allowed\s+vlan\s+([\d,\-\s]+)\s*$")
            .expect("initial trunk pattern is valid")
    })
}

fn add_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(\s*)switchport\s+trunk\s+allowed\s+vlan\s+add\s+([\d,\-\s]+)\s*$")
            .expect("additive trunk pattern is valid")
    })
}

fn interface_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^interface\s+").expect("interface pattern is valid"))
}

fn is_interface_header(line: &str) -> bool {
    interface_re().is_match(line.trim())
}

/// `(indent, ids)` captured from an initial or additive trunk line
fn trunk_match(line: &str) -> Option<(&str, &str)> {
    init_re()
        .captures(line)
        .or_else(|| add_re().captures(line))
        .and_then(|caps| {
            let indent = caps.get(1)?.as_str();
            let ids = caps.get(2)?.as_str();
            Some((indent, ids))
        })
}

/// Split lines into the preamble and one slice per interface block
fn blocks<'a>(lines: &'a [&'a str]) -> (&'a [&'a str], Vec<&'a [&'a str]>) {
    let starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| is_interface_header(line))
        .map(|(i, _)| i)
        .collect();

    let Some(&first) = starts.first() else {
        return (lines, Vec::new());
    };

    let ends = starts.iter().skip(1).copied().chain(std::iter::once(lines.len()));
    let blocks = starts.iter().zip(ends).map(|(&s, e)| &lines[s..e]).collect();

    (&lines[..first], blocks)
}

/// Merge every trunk line of one interface block into a canonical line
fn normalize_block(block: &[&str]) -> Result<Vec<String>, VlanError> {
    let header = block.first().map(|l| l.trim()).unwrap_or_default();

    let mut ids = VlanSet::new();
    let mut first_match: Option<(usize, &str)> = None;
    let mut kept: Vec<(usize, &str)> = Vec::with_capacity(block.len());

    for (i, line) in block.iter().enumerate() {
        match trunk_match(line) {
            Some((indent, notation)) => {
                ids.extend(&VlanSet::parse(notation, header)?);
                first_match.get_or_insert((i, indent));
            }
            None => kept.push((i, *line)),
        }
    }

    let Some((first_index, indent)) = first_match.filter(|_| !ids.is_empty()) else {
        return Ok(block.iter().map(|l| l.to_string()).collect());
    };

    let canonical = format!("{}{} {}", indent, VLAN_TRUNK_KEYWORD, ids.compact());
    let at = kept.partition_point(|(i, _)| *i < first_index);

    let mut out: Vec<String> = kept.iter().map(|(_, l)| l.to_string()).collect();
    out.insert(at, canonical);
    Ok(out)
}

/// Collapse multi-line VLAN trunk declarations into one canonical line
///
/// **Public** - single-sided pre-pass
///
/// Per interface block, every `switchport trunk allowed vlan [add] ...` line
/// is merged into one sorted, range-compacted line placed where the first
/// of them was. Text outside interface blocks passes through. The output is
/// `\n`-joined and normalizing it again changes nothing.
///
/// # Errors
/// * `VlanError::MalformedId` - a VLAN token could not be parsed; nothing is
///   returned for the text
///
/// # Example
/// ```ignore
/// let text = "interface Gi1/0/1\n switchport trunk allowed vlan 20,10\n switchport trunk allowed vlan add 11";
/// assert_eq!(
///     normalize(text)?,
///     "interface Gi1/0/1\n switchport trunk allowed vlan 10-11,20"
/// );
/// ```
pub fn normalize(text: &str) -> Result<String, VlanError> {
    let lines: Vec<&str> = text.lines().collect();
    let (preamble, interface_blocks) = blocks(&lines);

    let mut out: Vec<String> = preamble.iter().map(|l| l.to_string()).collect();
    for block in &interface_blocks {
        out.extend(normalize_block(block)?);
    }

    Ok(out.join("\n"))
}

/// Canonical VLAN line of every interface in normalized text
///
/// Keyed by lowercased interface header.
fn extract_vlans(normalized: &str) -> Result<HashMap<String, (String, VlanSet)>, VlanError> {
    let mut vlans = HashMap::new();
    let mut current: Option<String> = None;

    for line in normalized.lines() {
        if is_interface_header(line) {
            current = Some(line.trim().to_lowercase());
            continue;
        }
        let Some(interface) = &current else {
            continue;
        };
        if let Some(caps) = init_re().captures(line) {
            let indent = caps.get(1).map_or("", |m| m.as_str());
            let ids = VlanSet::parse(caps.get(2).map_or("", |m| m.as_str()), interface)?;
            vlans.insert(interface.clone(), (indent.to_string(), ids));
        }
    }

    Ok(vlans)
}

fn annotation_line(indent: &str, source_only: &VlanSet, target_only: &VlanSet) -> String {
    let mut parts = Vec::with_capacity(2);
    if !source_only.is_empty() {
        parts.push(format!("-delete:{}", source_only));
    }
    if !target_only.is_empty() {
        parts.push(format!("+add:{}", target_only));
    }
    format!("{}{}  {}", indent, VLAN_DIFF_ANNOTATION_MARKER, parts.join("  "))
}

/// Insert each interface's annotation right after its canonical VLAN line
fn inject_annotations(text: &str, annotations: &HashMap<String, String>) -> String {
    let mut out: Vec<&str> = Vec::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        if is_interface_header(line) {
            current = Some(line.trim().to_lowercase());
        }
        out.push(line);

        let annotation = current
            .as_ref()
            .filter(|_| init_re().is_match(line))
            .and_then(|interface| annotations.get(interface));
        if let Some(annotation) = annotation {
            out.push(annotation);
        }
    }

    out.join("\n")
}

/// Normalize both texts and annotate per-interface VLAN deltas
///
/// **Public** - paired pre-pass used by the compare pipeline
///
/// For every interface present on both sides whose VLAN sets differ, an
/// identical `! [vlan diff]  -delete:..  +add:..` line is injected after
/// the canonical VLAN line in both texts, so it aligns as an equal row.
///
/// # Errors
/// * `VlanError::MalformedId` - either text has an unparsable VLAN token
pub fn normalize_pair(source: &str, target: &str) -> Result<(String, String), VlanError> {
    let source_norm = normalize(source)?;
    let target_norm = normalize(target)?;

    let source_vlans = extract_vlans(&source_norm)?;
    let target_vlans = extract_vlans(&target_norm)?;

    let annotations: HashMap<String, String> = source_vlans
        .iter()
        .filter_map(|(interface, (indent, source_ids))| {
            let (_, target_ids) = target_vlans.get(interface)?;
            let source_only = source_ids.difference(target_ids);
            let target_only = target_ids.difference(source_ids);
            if source_only.is_empty() && target_only.is_empty() {
                return None;
            }
            Some((
                interface.clone(),
                annotation_line(indent, &source_only, &target_only),
            ))
        })
        .collect();

    if annotations.is_empty() {
        return Ok((source_norm, target_norm));
    }

    debug!("Annotating VLAN deltas on {} interfaces", annotations.len());
    Ok((
        inject_annotations(&source_norm, &annotations),
        inject_annotations(&target_norm, &annotations),
    ))
}
