pub mod attendance;
pub mod dashboard;
pub mod employee;
pub mod project;
pub mod role;

use serde::{Deserialize, Deserializer};

/// Deserializes a field that distinguishes "absent" (`None`) from an explicit `null` (`Some(None)`).
/// Use together with `#[serde(default)]`.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
