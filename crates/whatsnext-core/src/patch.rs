//! Serde helpers for partial-update payloads.
//!
//! A patch field is `Option<Option<T>>`: the outer `None` means the key was
//! absent (leave the stored value alone), `Some(None)` means an explicit
//! `null` (clear it), and `Some(Some(v))` overwrites.

use serde::{Deserialize, Deserializer};

/// Use with `#[serde(default, deserialize_with = "nullable")]`.
pub fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}

/// Treat a blank string as absent.
pub(crate) fn non_blank(s: Option<String>) -> Option<String> {
  s.filter(|s| !s.is_empty())
}

/// Resolve a nullable text patch: `null` clears to the blank string.
pub(crate) fn apply_text(slot: &mut String, patch: Option<Option<String>>) {
  if let Some(value) = patch {
    *slot = value.unwrap_or_default();
  }
}
