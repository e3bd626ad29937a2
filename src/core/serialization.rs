//! JSON helpers for grid and driver payloads.
//!
//! [`Axis`](crate::grid::Axis) serializes as a plain array of ticks and is
//! validated again on the way back in, so a payload can never smuggle a
//! non-increasing axis past construction.
//!
//! # Examples
//! ```rust
//! use quantpde::axis;
//! use quantpde::core::{from_json, to_json_pretty};
//! use quantpde::grid::Axis;
//!
//! let axis = axis![0.0, 50.0, 100.0];
//! let json = to_json_pretty(&axis).expect("json serialization");
//! let decoded: Axis = from_json(&json).expect("json deserialization");
//! assert_eq!(decoded, axis);
//!
//! assert!(from_json::<Axis>("[3.0, 2.0, 1.0]").is_err());
//! ```

use serde::de::DeserializeOwned;

/// Serialize a value to pretty JSON.
pub fn to_json_pretty<T: serde::Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Deserialize a value from JSON.
pub fn from_json<T: DeserializeOwned>(payload: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(payload)
}
