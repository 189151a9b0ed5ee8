#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # flexconf
//!
//! A toolkit for libraries that want to be dynamically configured by their
//! users: named, typed, validated configuration values with defaults,
//! hints, and an optional lock-on-read guarantee, overridable at runtime
//! from a sectioned text file.
//!
//! ## Core Types
//!
//! - [`Value`]: dynamically typed values plus heuristic interpretation of
//!   override text
//! - [`ConfigValue`] and [`ConfigValueBuilder`]: a single validated value
//!   with an optional [`LockPolicy::OnRead`] freeze
//! - [`ConfigGroup`]: an ordered group of uniquely-named values with
//!   all-or-nothing bulk updates
//! - [`ConfigIndex`]: named groups plus override loading and a nested
//!   documentation view
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use flexconf::{ConfigGroup, ConfigIndex, ConfigValue, Value};
//!
//! // A value that freezes the first time dependent code reads it.
//! let num_apples = ConfigValue::builder("num_apples", 0i64)
//!     .hint("number of apples")
//!     .validator(Value::is_int)
//!     .lock_on_read()
//!     .build()
//!     .unwrap();
//!
//! let stats = ConfigGroup::new("stats", vec![num_apples]).unwrap();
//! let mut index = ConfigIndex::new(vec![stats]).unwrap();
//!
//! // User-supplied override text: values are decoded heuristically.
//! index.load_override("[stats]\nnum_apples = 1\n").unwrap();
//!
//! let stats = index.get_mut("stats").unwrap();
//! assert_eq!(stats.get("num_apples").unwrap(), Value::Int(1));
//!
//! // The read above locked the value; later writes are rejected.
//! assert!(stats.set("num_apples", 2i64).unwrap_err().is_locked());
//! ```

pub mod config_value;
pub mod error;
pub mod group;
pub mod index;
mod loader;
pub mod value;

// Re-export key types at crate root for convenience
pub use config_value::{
    ConfigValue, ConfigValueBuilder, HintEntry, LockPolicy, Preprocessor, Validator,
};
pub use error::{Error, Result};
pub use group::ConfigGroup;
pub use index::ConfigIndex;
pub use value::Value;
