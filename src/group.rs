//! An ordered collection of uniquely-named configuration values.

use std::collections::{BTreeMap, HashSet};

use crate::config_value::{ConfigValue, HintEntry};
use crate::error::{Error, Result};
use crate::value::Value;

/// A named group of [`ConfigValue`]s with map-like access.
///
/// Value names are unique within a group (construction fails on the first
/// duplicate) and insertion order is preserved. The group owns its values
/// exclusively; reads and writes delegate to the individual values, so the
/// lock-on-read side effect propagates through [`ConfigGroup::get`].
///
/// # Examples
///
/// ```
/// use flexconf::{ConfigGroup, ConfigValue, Value};
///
/// let num_apples = ConfigValue::builder("num_apples", 0i64)
///     .hint("number of apples")
///     .validator(Value::is_int)
///     .lock_on_read()
///     .build()
///     .unwrap();
/// let mut stats = ConfigGroup::new("stats", vec![num_apples]).unwrap();
///
/// stats.set("num_apples", 1i64).unwrap();
/// assert_eq!(stats.get("num_apples").unwrap(), Value::Int(1));
/// // The read above locked the value.
/// assert!(stats.set("num_apples", 2i64).unwrap_err().is_locked());
/// ```
#[derive(Debug)]
pub struct ConfigGroup {
    name: String,
    values: Vec<ConfigValue>,
}

impl ConfigGroup {
    /// Create a group from a list of values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] naming the first value whose name
    /// collides with an earlier one, in iteration order.
    pub fn new(name: impl Into<String>, values: Vec<ConfigValue>) -> Result<Self> {
        let mut seen = HashSet::new();
        for value in &values {
            if !seen.insert(value.name().to_string()) {
                return Err(Error::DuplicateKey {
                    key: value.name().to_string(),
                });
            }
        }
        Ok(Self {
            name: name.into(),
            values,
        })
    }

    /// The group's unique name within its index.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the group contains a value named `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.iter().any(|value| value.name() == key)
    }

    /// The value names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(ConfigValue::name)
    }

    /// Number of values in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the group holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read the current value for `key`.
    ///
    /// Delegates to [`ConfigValue::read`], so a lock-on-read value becomes
    /// permanently locked by this call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] if no value with that name exists.
    pub fn get(&mut self, key: &str) -> Result<Value> {
        Ok(self.value_mut(key)?.read().clone())
    }

    /// Write a new raw value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] if no value with that name exists, and
    /// propagates [`Error::Locked`] / [`Error::Validation`] from the value.
    pub fn set(&mut self, key: &str, raw: impl Into<Value>) -> Result<()> {
        self.value_mut(key)?.set(raw)
    }

    /// Whether the value named `key` is locked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] if no value with that name exists.
    pub fn locked(&self, key: &str) -> Result<bool> {
        Ok(self.value(key)?.locked())
    }

    /// Apply a batch of writes with an all-or-nothing precondition check.
    ///
    /// Two phases: first every entry is checked, in order, to refer to an
    /// existing and currently-unlocked value; the first unknown or locked
    /// key aborts the whole call with no mutation applied. Only then is
    /// each entry's [`ConfigGroup::set`] applied in the original order.
    ///
    /// Override sources are untrusted, so callers get atomic semantics for
    /// the precondition phase instead of having to audit partial side
    /// effects. A validation failure during the apply phase still aborts
    /// the call, but entries already applied stay applied.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownKey`] or [`Error::Locked`] from the check
    /// phase (nothing mutated), or [`Error::Validation`] from the apply
    /// phase.
    pub fn bulk_update<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let entries: Vec<(String, Value)> = entries.into_iter().collect();
        for (key, _) in &entries {
            if self.value(key)?.locked() {
                return Err(Error::Locked { name: key.clone() });
            }
        }
        for (key, raw) in entries {
            self.set(&key, raw)?;
        }
        Ok(())
    }

    /// Documentation entries for every value, keyed by name.
    ///
    /// Unaffected by lock state and safe to call at any time: hints must
    /// remain visible even for locked values.
    #[must_use]
    pub fn hint(&self) -> BTreeMap<String, HintEntry> {
        self.values
            .iter()
            .map(|value| (value.name().to_string(), value.hint_entry()))
            .collect()
    }

    /// Snapshot of every current value, keyed by name.
    ///
    /// The read path delegates per value, so this call locks **every**
    /// lock-on-read value in the group. That is a documented side effect:
    /// callers who want to keep values writable must not snapshot a group
    /// of locking values.
    pub fn items(&mut self) -> BTreeMap<String, Value> {
        self.values
            .iter_mut()
            .map(|value| (value.name().to_string(), value.read().clone()))
            .collect()
    }

    fn value(&self, key: &str) -> Result<&ConfigValue> {
        self.values
            .iter()
            .find(|value| value.name() == key)
            .ok_or_else(|| Error::UnknownKey {
                key: key.to_string(),
            })
    }

    fn value_mut(&mut self, key: &str) -> Result<&mut ConfigValue> {
        self.values
            .iter_mut()
            .find(|value| value.name() == key)
            .ok_or_else(|| Error::UnknownKey {
                key: key.to_string(),
            })
    }
}
