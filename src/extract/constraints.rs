//! `upper-constraints.txt` extractor.
//!
//! One requirement specifier per line; environment markers after `;` are
//! ignored. Only exact-version operators (`==`, `===`) are recorded, and
//! the first line seen for a package wins. Both are long-standing quirks
//! of the constraints format, kept for compatibility.

use std::str::FromStr;

use indexmap::IndexMap;
use pep508_rs::pep440_rs::{Operator, Version, VersionSpecifiers};
use tracing::warn;

/// Parse a constraints blob into package name -> pinned version.
pub fn parse_upper_constraints(content: &str) -> IndexMap<String, Version> {
    let mut pins = IndexMap::new();
    for raw_line in content.lines() {
        // markers are ignored
        let line = raw_line.split(';').next().unwrap_or("").trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((name, spec)) = split_requirement(line) else {
            warn!("skipping constraint line '{line}': no package name");
            continue;
        };
        let Ok(specifiers) = VersionSpecifiers::from_str(spec).inspect_err(|err| {
            warn!("skipping constraint line '{line}': {err}");
        }) else {
            continue;
        };
        let pinned = specifiers.iter().find_map(|s| match s.operator() {
            Operator::Equal | Operator::ExactEqual => Some(s.version().clone()),
            _ => None,
        });
        if let Some(version) = pinned {
            pins.entry(name.to_string()).or_insert(version);
        }
    }
    pins
}

/// Split `name[extras]<specifiers>` into the package name and the
/// specifier tail.
fn split_requirement(line: &str) -> Option<(&str, &str)> {
    let split = line
        .find(|c: char| "<>=!~".contains(c))
        .unwrap_or(line.len());
    let (head, spec) = line.split_at(split);
    let name = head.trim().split('[').next()?.trim();
    if name.is_empty() {
        None
    } else {
        Some((name, spec.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_pin_is_recorded() {
        let pins = parse_upper_constraints("bar===1.5\n");
        assert_eq!(pins.get("bar").unwrap().to_string(), "1.5");
    }

    #[test]
    fn double_equals_pin_is_recorded() {
        let pins = parse_upper_constraints("requests==2.32.0\n");
        assert_eq!(pins.get("requests").unwrap().to_string(), "2.32.0");
    }

    #[test]
    fn range_only_line_records_nothing() {
        let pins = parse_upper_constraints("foo<2.0,>=1.0;python_version>='3'\n");
        assert!(pins.get("foo").is_none());
    }

    #[test]
    fn environment_marker_is_ignored() {
        let pins = parse_upper_constraints("bar===1.5;python_version=='2.7'\n");
        assert_eq!(pins.get("bar").unwrap().to_string(), "1.5");
    }

    #[test]
    fn first_line_per_package_wins() {
        let pins = parse_upper_constraints("dup===1.0\ndup===2.0\n");
        assert_eq!(pins.get("dup").unwrap().to_string(), "1.0");
    }

    #[test]
    fn extras_bracket_is_stripped_from_the_name() {
        let pins = parse_upper_constraints("oslo.db[fixtures]===4.40.0\n");
        assert_eq!(pins.get("oslo.db").unwrap().to_string(), "4.40.0");
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        let pins = parse_upper_constraints("\n# pinned below\nbar===1.5\n");
        assert_eq!(pins.len(), 1);
    }

    #[test]
    fn unparseable_specifier_is_skipped() {
        let pins = parse_upper_constraints("broken=!=not\nbar===1.5\n");
        assert_eq!(pins.len(), 1);
        assert!(pins.get("bar").is_some());
    }
}
