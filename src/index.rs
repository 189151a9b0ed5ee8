//! A collection of uniquely-named configuration groups with override
//! loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config_value::HintEntry;
use crate::error::{Error, Result};
use crate::group::ConfigGroup;
use crate::loader;
use crate::value::Value;

/// An index of [`ConfigGroup`]s, addressable by group name.
///
/// The index owns its groups exclusively. It is mutated only through
/// override loading, which parses sectioned text, decodes every value with
/// [`Value::interpret`], and applies each section through the owning
/// group's [`ConfigGroup::bulk_update`].
///
/// # Examples
///
/// ```
/// use flexconf::{ConfigGroup, ConfigIndex, ConfigValue, Value};
///
/// let num_apples = ConfigValue::builder("num_apples", 0i64)
///     .hint("number of apples")
///     .validator(Value::is_int)
///     .lock_on_read()
///     .build()
///     .unwrap();
/// let stats = ConfigGroup::new("stats", vec![num_apples]).unwrap();
/// let mut index = ConfigIndex::new(vec![stats]).unwrap();
///
/// index.load_override("[stats]\nnum_apples = 1\n").unwrap();
/// let value = index.get_mut("stats").unwrap().get("num_apples").unwrap();
/// assert_eq!(value, Value::Int(1));
/// ```
#[derive(Debug)]
pub struct ConfigIndex {
    groups: Vec<ConfigGroup>,
}

impl ConfigIndex {
    /// Create an index from a list of groups.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] naming the first group whose name
    /// collides with an earlier one.
    pub fn new(groups: Vec<ConfigGroup>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for group in &groups {
            if !seen.insert(group.name().to_string()) {
                return Err(Error::DuplicateKey {
                    key: group.name().to_string(),
                });
            }
        }
        Ok(Self { groups })
    }

    /// Whether the index contains a group named `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.groups.iter().any(|group| group.name() == name)
    }

    /// The group names in insertion order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(ConfigGroup::name)
    }

    /// Number of groups in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the index holds no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Borrow the group named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] if no group with that name exists.
    pub fn get(&self, name: &str) -> Result<&ConfigGroup> {
        self.groups
            .iter()
            .find(|group| group.name() == name)
            .ok_or_else(|| Error::UnknownKey {
                key: name.to_string(),
            })
    }

    /// Mutably borrow the group named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] if no group with that name exists.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut ConfigGroup> {
        self.groups
            .iter_mut()
            .find(|group| group.name() == name)
            .ok_or_else(|| Error::UnknownKey {
                key: name.to_string(),
            })
    }

    /// Apply overrides from sectioned text.
    ///
    /// The source is parsed first, then every section name is checked
    /// against the index before any mutation: an unknown section rejects
    /// the whole load, because silently accepting one would mask typos in
    /// override files. Each known section's values are decoded with
    /// [`Value::interpret`] and applied through the group's
    /// [`ConfigGroup::bulk_update`], inheriting its atomic precondition
    /// check.
    ///
    /// Sections apply independently: a lock violation (or unknown key) in
    /// one section is logged and does not block the remaining sections.
    /// The first per-section error is returned once the pass completes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] / [`Error::DuplicateKey`] for malformed
    /// sources and [`Error::UnknownSection`] for unrecognized section
    /// names, in both cases with no group touched; otherwise the first
    /// error reported by a section's `bulk_update`.
    pub fn load_override(&mut self, source: &str) -> Result<()> {
        let sections = loader::parse(source)?;

        for section in &sections {
            if !self.contains(&section.name) {
                return Err(Error::UnknownSection {
                    section: section.name.clone(),
                });
            }
        }

        let mut first_error = None;
        for section in sections {
            let name = section.name;
            let decoded: Vec<(String, Value)> = section
                .entries
                .into_iter()
                .map(|(key, raw)| (key, Value::interpret(&raw)))
                .collect();
            log::debug!("applying {} override(s) to section '{name}'", decoded.len());

            let group = self.get_mut(&name)?;
            if let Err(err) = group.bulk_update(decoded) {
                log::warn!("overrides for section '{name}' not applied: {err}");
                first_error.get_or_insert(err);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Apply overrides from a file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, otherwise
    /// whatever [`ConfigIndex::load_override`] returns for its contents.
    pub fn load_override_file(&mut self, path: &Path) -> Result<()> {
        let source = fs::read_to_string(path)?;
        self.load_override(&source)
    }

    /// Documentation entries for every group, keyed by group then value
    /// name.
    ///
    /// Unaffected by lock state and by override loading; suitable for
    /// generating a configuration reference or a usage-help surface.
    #[must_use]
    pub fn hint(&self) -> BTreeMap<String, BTreeMap<String, HintEntry>> {
        self.groups
            .iter()
            .map(|group| (group.name().to_string(), group.hint()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_value::ConfigValue;

    fn locking_int(name: &str, default: i64) -> ConfigValue {
        ConfigValue::builder(name, default)
            .hint("an integer setting")
            .validator(Value::is_int)
            .lock_on_read()
            .build()
            .unwrap()
    }

    fn sample_index() -> ConfigIndex {
        let stats = ConfigGroup::new(
            "stats",
            vec![locking_int("num_apples", 0), locking_int("num_oranges", 0)],
        )
        .unwrap();
        let flags = ConfigGroup::new(
            "flags",
            vec![ConfigValue::builder("verbose", false)
                .hint("emit progress output")
                .validator(Value::is_bool)
                .build()
                .unwrap()],
        )
        .unwrap();
        ConfigIndex::new(vec![stats, flags]).unwrap()
    }

    #[test]
    fn test_new_rejects_duplicate_group_names() {
        let a = ConfigGroup::new("stats", vec![]).unwrap();
        let b = ConfigGroup::new("stats", vec![]).unwrap();
        let err = ConfigIndex::new(vec![a, b]).unwrap_err();
        assert_eq!(format!("{err}"), "duplicate key 'stats'");
    }

    #[test]
    fn test_get_unknown_group() {
        let index = sample_index();
        assert!(index.get("nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_load_override_decodes_values() {
        let mut index = sample_index();
        index
            .load_override("[stats]\nnum_apples = 1\n\n[flags]\nverbose = on\n")
            .unwrap();
        assert_eq!(
            index.get_mut("stats").unwrap().get("num_apples").unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            index.get_mut("flags").unwrap().get("verbose").unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_load_override_unknown_section_applies_nothing() {
        let mut index = sample_index();
        let err = index
            .load_override("[stats]\nnum_apples = 1\n\n[statz]\nnum_apples = 2\n")
            .unwrap_err();
        assert!(matches!(err, Error::UnknownSection { ref section } if section == "statz"));
        // Section names are validated before any mutation.
        assert_eq!(
            index.get_mut("stats").unwrap().get("num_apples").unwrap(),
            Value::Int(0)
        );
    }

    #[test]
    fn test_load_override_sections_are_independent() {
        let mut index = sample_index();
        // Lock the whole stats group by reading it.
        let _ = index.get_mut("stats").unwrap().items();

        let err = index
            .load_override("[stats]\nnum_apples = 1\n\n[flags]\nverbose = yes\n")
            .unwrap_err();
        assert!(err.is_locked());
        // The locked section blocked nothing else.
        assert_eq!(
            index.get_mut("flags").unwrap().get("verbose").unwrap(),
            Value::Bool(true)
        );
        assert_eq!(
            index.get_mut("stats").unwrap().get("num_apples").unwrap(),
            Value::Int(0)
        );
    }

    #[test]
    fn test_load_override_parse_error_applies_nothing() {
        let mut index = sample_index();
        let err = index
            .load_override("[stats]\nnum_apples = 1\ngarbage line\n")
            .unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
        assert_eq!(
            index.get_mut("stats").unwrap().get("num_apples").unwrap(),
            Value::Int(0)
        );
    }

    #[test]
    fn test_hint_is_nested_by_group() {
        let index = sample_index();
        let hints = index.hint();
        assert_eq!(hints.len(), 2);
        assert_eq!(hints["stats"]["num_apples"].example, Value::Int(0));
        assert_eq!(hints["flags"]["verbose"].hint, "emit progress output");
    }

    #[test]
    fn test_group_names_in_insertion_order() {
        let index = sample_index();
        let names: Vec<&str> = index.group_names().collect();
        assert_eq!(names, vec!["stats", "flags"]);
        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
    }
}
