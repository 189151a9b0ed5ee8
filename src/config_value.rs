//! A single named, typed, validated configuration value.
//!
//! A [`ConfigValue`] couples a current value with a human-readable hint, a
//! preprocessing transform, a validation predicate, and a lock policy.
//! Values built with [`LockPolicy::OnRead`] freeze permanently the first
//! time they are read, so downstream code can rely on a setting never
//! changing after it has been consumed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::value::Value;

/// Preprocessing transform applied to raw input before validation.
///
/// Must be pure: the bulk-update protocol in
/// [`ConfigGroup`](crate::ConfigGroup) assumes transforms have no
/// observable side effects. A transform that cannot coerce its input
/// should return it unchanged and let the validator reject it.
pub type Preprocessor = Box<dyn Fn(Value) -> Value + Send + Sync>;

/// Validation predicate applied to the preprocessed value.
///
/// Must be pure, for the same reason as [`Preprocessor`].
pub type Validator = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// When, if ever, a value locks itself against further writes.
///
/// # Examples
///
/// ```
/// use flexconf::{ConfigValue, LockPolicy};
///
/// let plain = ConfigValue::builder("retries", 3i64).build().unwrap();
/// assert_eq!(plain.policy(), LockPolicy::Plain);
///
/// let locking = ConfigValue::builder("retries", 3i64)
///     .lock_on_read()
///     .build()
///     .unwrap();
/// assert_eq!(locking.policy(), LockPolicy::OnRead);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockPolicy {
    /// The value never locks; reads have no side effect.
    Plain,
    /// Every read, including the first, locks the value permanently.
    OnRead,
}

/// A named configuration value with validation and an optional read lock.
///
/// Constructed through [`ConfigValue::builder`]. The stored value always
/// satisfies the validation predicate: invalid input is rejected before any
/// mutation, at construction time and on every write.
///
/// # Examples
///
/// ```
/// use flexconf::{ConfigValue, Value};
///
/// let mut retries = ConfigValue::builder("retries", 3i64)
///     .hint("how many times to retry a failed request")
///     .validator(Value::is_int)
///     .build()
///     .unwrap();
///
/// retries.set(5i64).unwrap();
/// assert_eq!(retries.read(), &Value::Int(5));
/// ```
pub struct ConfigValue {
    name: String,
    hint: String,
    example: Value,
    preprocessor: Preprocessor,
    validator: Validator,
    value: Value,
    policy: LockPolicy,
    locked: bool,
}

impl ConfigValue {
    /// Start building a configuration value from a name and a raw default.
    ///
    /// The default doubles as the documentation example and must pass the
    /// configured validator (after preprocessing) when
    /// [`ConfigValueBuilder::build`] runs.
    pub fn builder(name: impl Into<String>, default: impl Into<Value>) -> ConfigValueBuilder {
        ConfigValueBuilder {
            name: name.into(),
            hint: String::new(),
            default: default.into(),
            preprocessor: Box::new(|value| value),
            validator: Box::new(|_| true),
            policy: LockPolicy::Plain,
        }
    }

    /// The value's unique name within its group.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The human-readable description of what the value controls.
    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// The original, unprocessed default, kept for documentation.
    #[must_use]
    pub fn example(&self) -> &Value {
        &self.example
    }

    /// The value's lock policy.
    #[must_use]
    pub fn policy(&self) -> LockPolicy {
        self.policy
    }

    /// Whether the value is locked against further writes.
    ///
    /// Always `false` for [`LockPolicy::Plain`] values.
    #[must_use]
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Read the current value.
    ///
    /// For [`LockPolicy::OnRead`] values this permanently locks the value
    /// before returning it; every read locks, including the first. Reads of
    /// [`LockPolicy::Plain`] values have no side effect.
    ///
    /// # Examples
    ///
    /// ```
    /// use flexconf::{ConfigValue, Value};
    ///
    /// let mut batch_size = ConfigValue::builder("batch_size", 32i64)
    ///     .lock_on_read()
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(!batch_size.locked());
    /// assert_eq!(batch_size.read(), &Value::Int(32));
    /// assert!(batch_size.locked());
    /// assert!(batch_size.set(64i64).is_err());
    /// ```
    pub fn read(&mut self) -> &Value {
        if self.policy == LockPolicy::OnRead {
            self.locked = true;
        }
        &self.value
    }

    /// Write a new raw value.
    ///
    /// The input runs through the preprocessor and validator before it is
    /// committed; the prior value survives any failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Locked`] if the value has been locked, or
    /// [`Error::Validation`] if the preprocessed input fails the validation
    /// predicate.
    pub fn set(&mut self, raw: impl Into<Value>) -> Result<()> {
        if self.locked {
            return Err(Error::Locked {
                name: self.name.clone(),
            });
        }
        self.value = self.parse(raw.into())?;
        Ok(())
    }

    /// The value's documentation entry, independent of lock state.
    #[must_use]
    pub fn hint_entry(&self) -> HintEntry {
        HintEntry {
            hint: self.hint.clone(),
            example: self.example.clone(),
        }
    }

    /// Preprocess and validate raw input.
    fn parse(&self, raw: Value) -> Result<Value> {
        let value = (self.preprocessor)(raw);
        if (self.validator)(&value) {
            Ok(value)
        } else {
            Err(Error::Validation {
                name: self.name.clone(),
                hint: self.hint.clone(),
                example: self.example.clone(),
            })
        }
    }
}

impl fmt::Debug for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigValue")
            .field("name", &self.name)
            .field("hint", &self.hint)
            .field("example", &self.example)
            .field("value", &self.value)
            .field("policy", &self.policy)
            .field("locked", &self.locked)
            .finish_non_exhaustive()
    }
}

/// Builder for [`ConfigValue`].
///
/// The preprocessor defaults to the identity transform, the validator to
/// always-true, and the lock policy to [`LockPolicy::Plain`].
///
/// # Examples
///
/// Coercing override text into a typed value before validating it:
///
/// ```
/// use flexconf::{ConfigValue, Value};
///
/// let threshold = ConfigValue::builder("threshold", 0.5f64)
///     .hint("decision threshold between 0 and 1")
///     .preprocessor(Value::interpreted)
///     .validator(|v| v.as_float().is_some_and(|x| (0.0..=1.0).contains(&x)))
///     .build()
///     .unwrap();
/// assert_eq!(threshold.example(), &Value::Float(0.5));
/// ```
pub struct ConfigValueBuilder {
    name: String,
    hint: String,
    default: Value,
    preprocessor: Preprocessor,
    validator: Validator,
    policy: LockPolicy,
}

impl ConfigValueBuilder {
    /// Set the human-readable hint.
    #[must_use]
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = hint.into();
        self
    }

    /// Set the preprocessing transform (raw input to typed value).
    #[must_use]
    pub fn preprocessor<F>(mut self, preprocessor: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.preprocessor = Box::new(preprocessor);
        self
    }

    /// Set the validation predicate (typed value to pass/fail).
    #[must_use]
    pub fn validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.validator = Box::new(validator);
        self
    }

    /// Lock the value permanently on its first read.
    #[must_use]
    pub fn lock_on_read(mut self) -> Self {
        self.policy = LockPolicy::OnRead;
        self
    }

    /// Build the value, running the default through the preprocessor and
    /// validator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the preprocessed default fails the
    /// validation predicate; no value is produced.
    pub fn build(self) -> Result<ConfigValue> {
        let value = (self.preprocessor)(self.default.clone());
        if !(self.validator)(&value) {
            return Err(Error::Validation {
                name: self.name,
                hint: self.hint,
                example: self.default,
            });
        }
        Ok(ConfigValue {
            name: self.name,
            hint: self.hint,
            example: self.default,
            preprocessor: self.preprocessor,
            validator: self.validator,
            value,
            policy: self.policy,
            locked: false,
        })
    }
}

/// A (hint, example) documentation pair for one configuration value.
///
/// Hint entries never reflect lock state and never change once a value is
/// constructed, so they stay usable for generating configuration
/// documentation over the whole lifetime of a group.
///
/// # Examples
///
/// ```
/// use flexconf::{HintEntry, Value};
///
/// let entry = HintEntry {
///     hint: "number of apples".into(),
///     example: Value::Int(0),
/// };
/// assert_eq!(entry.to_string(), "number of apples. Example: 0");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintEntry {
    /// The human-readable description.
    pub hint: String,
    /// A raw default known to pass validation.
    pub example: Value,
}

impl fmt::Display for HintEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. Example: {}", self.hint, self.example)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_value(name: &str, default: i64) -> ConfigValue {
        ConfigValue::builder(name, default)
            .hint("an integer setting")
            .validator(Value::is_int)
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_with_valid_default() {
        let value = int_value("num_apples", 0);
        assert_eq!(value.name(), "num_apples");
        assert_eq!(value.example(), &Value::Int(0));
        assert!(!value.locked());
    }

    #[test]
    fn test_build_with_invalid_default_fails() {
        let result = ConfigValue::builder("num_apples", "zero")
            .hint("number of apples")
            .validator(Value::is_int)
            .build();
        let err = result.unwrap_err();
        assert!(err.is_validation());
        let display = format!("{err}");
        assert!(display.contains("number of apples"));
        assert!(display.contains("zero"));
    }

    #[test]
    fn test_build_defaults_accept_anything() {
        let value = ConfigValue::builder("anything", "free-form text")
            .build()
            .unwrap();
        assert_eq!(value.example(), &Value::Str("free-form text".into()));
    }

    #[test]
    fn test_set_rejects_invalid_and_keeps_prior_value() {
        let mut value = int_value("num_apples", 0);
        value.set(1i64).unwrap();
        let err = value.set("one").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(value.read(), &Value::Int(1));
    }

    #[test]
    fn test_plain_value_never_locks() {
        let mut value = int_value("num_apples", 0);
        value.set(1i64).unwrap();
        assert!(!value.locked());
        let _ = value.read();
        assert!(!value.locked());
        value.set(2i64).unwrap();
        assert_eq!(value.read(), &Value::Int(2));
    }

    #[test]
    fn test_on_read_value_locks_on_first_read() {
        let mut value = ConfigValue::builder("num_apples", 0i64)
            .validator(Value::is_int)
            .lock_on_read()
            .build()
            .unwrap();
        value.set(1i64).unwrap();
        assert!(!value.locked());
        assert_eq!(value.read(), &Value::Int(1));
        assert!(value.locked());

        let err = value.set(2i64).unwrap_err();
        assert!(err.is_locked());
        assert_eq!(format!("{err}"), "'num_apples' is locked from updates");
        assert_eq!(value.read(), &Value::Int(1));
    }

    #[test]
    fn test_lock_is_monotonic() {
        let mut value = ConfigValue::builder("num_apples", 0i64)
            .lock_on_read()
            .build()
            .unwrap();
        let _ = value.read();
        let _ = value.read();
        assert!(value.locked());
    }

    #[test]
    fn test_preprocessor_coerces_before_validation() {
        let mut value = ConfigValue::builder("num_apples", 0i64)
            .preprocessor(Value::interpreted)
            .validator(Value::is_int)
            .build()
            .unwrap();
        value.set("17").unwrap();
        assert_eq!(value.read(), &Value::Int(17));
    }

    #[test]
    fn test_hint_entry_display() {
        let value = ConfigValue::builder("num_apples", 0i64)
            .hint("number of apples")
            .build()
            .unwrap();
        let entry = value.hint_entry();
        assert_eq!(entry.to_string(), "number of apples. Example: 0");
    }

    #[test]
    fn test_debug_does_not_require_closure_debug() {
        let value = int_value("num_apples", 0);
        let rendered = format!("{value:?}");
        assert!(rendered.contains("num_apples"));
        assert!(rendered.contains("locked: false"));
    }
}
