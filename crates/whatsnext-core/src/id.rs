//! Entity identifiers and the canonical pair key.
//!
//! Person and event ids are opaque strings minted from random v4 UUIDs.
//! Connection ids are never minted: they are derived from the two endpoint
//! ids by [`pair_key`], which makes the unordered pair the real primary key.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Joins the two sorted endpoint ids of a connection.
pub const PAIR_KEY_SEPARATOR: char = '_';

macro_rules! string_id {
  ($(#[$meta:meta])* $name:ident) => {
    $(#[$meta])*
    #[derive(
      Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
      Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(String);

    impl $name {
      pub fn as_str(&self) -> &str { &self.0 }

      pub fn into_inner(self) -> String { self.0 }

      pub fn is_blank(&self) -> bool { self.0.trim().is_empty() }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
      }
    }

    impl From<String> for $name {
      fn from(s: String) -> Self { Self(s) }
    }

    impl From<&str> for $name {
      fn from(s: &str) -> Self { Self(s.to_owned()) }
    }
  };
}

string_id! {
  /// Identity of a [`Person`](crate::person::Person).
  PersonId
}

string_id! {
  /// Identity of an [`Event`](crate::event::Event).
  EventId
}

string_id! {
  /// Identity of a [`Connection`](crate::connection::Connection); always the
  /// output of [`pair_key`].
  ConnectionId
}

impl PersonId {
  /// Mint a fresh, globally unique id.
  pub fn generate() -> Self { Self(Uuid::new_v4().to_string()) }
}

impl EventId {
  /// Mint a fresh, globally unique id.
  pub fn generate() -> Self { Self(Uuid::new_v4().to_string()) }
}

/// The canonical id of the undirected connection between `a` and `b`.
///
/// Symmetric: `pair_key(a, b) == pair_key(b, a)`.
pub fn pair_key(a: &PersonId, b: &PersonId) -> ConnectionId {
  let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
  ConnectionId(format!("{lo}{PAIR_KEY_SEPARATOR}{hi}"))
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;

  #[test]
  fn pair_key_sorts_endpoints() {
    let a = PersonId::from("b-second");
    let b = PersonId::from("a-first");
    assert_eq!(pair_key(&a, &b).as_str(), "a-first_b-second");
  }

  #[test]
  fn generated_ids_are_distinct() {
    assert_ne!(PersonId::generate(), PersonId::generate());
    assert_ne!(EventId::generate(), EventId::generate());
  }

  #[test]
  fn ids_serialize_as_plain_strings() {
    let id = PersonId::from("abc");
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
  }

  proptest! {
    #[test]
    fn prop_pair_key_is_symmetric(a in "[a-f0-9-]{1,36}", b in "[a-f0-9-]{1,36}") {
      let a = PersonId::from(a);
      let b = PersonId::from(b);
      prop_assert_eq!(pair_key(&a, &b), pair_key(&b, &a));
    }
  }
}
