use serde::{Deserialize, Deserializer};

/// Decode `null` the same way as an absent field.
///
/// The backend serialises empty relations as `null`, which plain
/// `#[serde(default)]` rejects for collections.
pub fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
