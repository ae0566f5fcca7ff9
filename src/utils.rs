use serde::Serialize;
use std::fmt::Debug;

/// Pretty JSON rendering of `value`, or its `Debug` form when it can't be serialized.
pub fn to_string<T: Serialize + Debug + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| format!("{:?}", value))
}
