//! Parsing of sectioned override text.
//!
//! The override format is a plain `[section]` / `key = value` text file.
//! Blank lines and `#`/`;` comment lines are ignored, surrounding
//! whitespace is trimmed, and a value may itself contain `=` (the split
//! happens on the first one). Parsing is strict: repeated section headers
//! or repeated keys within a section are rejected rather than silently
//! overwritten, and any malformed line fails the whole parse before a
//! single group is touched.

use crate::error::{Error, Result};

/// One parsed `[section]` with its raw key/value pairs in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Section {
    pub(crate) name: String,
    pub(crate) entries: Vec<(String, String)>,
}

/// Parse override text into sections.
///
/// Values stay raw strings here; heuristic interpretation happens at
/// apply time in [`ConfigIndex::load_override`](crate::ConfigIndex).
pub(crate) fn parse(source: &str) -> Result<Vec<Section>> {
    let mut sections: Vec<Section> = Vec::new();

    for (index, raw_line) in source.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let Some(name) = header.strip_suffix(']') else {
                return Err(Error::Parse {
                    line: line_number,
                    reason: format!("unterminated section header '{line}'"),
                });
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::Parse {
                    line: line_number,
                    reason: "empty section name".to_string(),
                });
            }
            if sections.iter().any(|section| section.name == name) {
                return Err(Error::DuplicateKey {
                    key: name.to_string(),
                });
            }
            sections.push(Section {
                name: name.to_string(),
                entries: Vec::new(),
            });
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(Error::Parse {
                line: line_number,
                reason: format!("expected 'key = value', got '{line}'"),
            });
        };
        let key = key.trim();
        let value = value.trim();
        if key.is_empty() {
            return Err(Error::Parse {
                line: line_number,
                reason: "empty key".to_string(),
            });
        }
        let Some(section) = sections.last_mut() else {
            return Err(Error::Parse {
                line: line_number,
                reason: "key/value pair before any [section] header".to_string(),
            });
        };
        if section.entries.iter().any(|(existing, _)| existing == key) {
            return Err(Error::DuplicateKey {
                key: key.to_string(),
            });
        }
        section
            .entries
            .push((key.to_string(), value.to_string()));
    }

    Ok(sections)
}
