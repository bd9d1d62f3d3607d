//! Connections: undirected edges between two people.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{ConnectionId, EventId, PersonId, Result, error::Error, pair_key};

pub const DEFAULT_RELATIONSHIP: &str = "knows";
pub const MIN_STRENGTH: u8 = 1;
pub const MAX_STRENGTH: u8 = 5;

// ─── Connection ──────────────────────────────────────────────────────────────

/// A stored connection. `from` and `to` keep the order they were submitted
/// in; only `id` is normalised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
  pub id:                ConnectionId,
  pub from:              PersonId,
  pub to:                PersonId,
  pub relationship_type: String,
  /// Always within `MIN_STRENGTH..=MAX_STRENGTH`.
  pub strength:          u8,
  pub notes:             String,
  pub event_id:          Option<EventId>,
  pub created_at:        DateTime<Utc>,
}

impl Connection {
  pub fn touches(&self, person: &PersonId) -> bool {
    &self.from == person || &self.to == person
  }
}

// ─── NewConnection ───────────────────────────────────────────────────────────

/// Input to [`crate::store::GraphStore::add_connection`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewConnection {
  #[serde(default)]
  pub from:              PersonId,
  #[serde(default)]
  pub to:                PersonId,
  pub relationship_type: Option<String>,
  /// Raw, unclamped strength. Accepts numbers and numeric strings on the
  /// wire; anything else reads as absent.
  #[serde(default, deserialize_with = "lenient_strength")]
  pub strength:          Option<i64>,
  pub notes:             Option<String>,
  pub event_id:          Option<EventId>,
}

impl NewConnection {
  pub fn new(from: impl Into<PersonId>, to: impl Into<PersonId>) -> Self {
    Self { from: from.into(), to: to.into(), ..Self::default() }
  }

  /// Shape checks that need no store lookups: both endpoints present and
  /// distinct.
  pub fn validate(&self) -> Result<()> {
    if self.from.is_blank() || self.to.is_blank() {
      return Err(Error::validation("from and to are required"));
    }
    if self.from == self.to {
      return Err(Error::validation("cannot connect a person to themselves"));
    }
    Ok(())
  }

  pub fn key(&self) -> ConnectionId { pair_key(&self.from, &self.to) }

  pub fn event_ref(&self) -> Option<&EventId> {
    self.event_id.as_ref().filter(|id| !id.is_blank())
  }

  /// Callers must have run [`Self::validate`] first.
  pub fn into_connection(self, now: DateTime<Utc>) -> Connection {
    Connection {
      id: self.key(),
      relationship_type: self
        .relationship_type
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| DEFAULT_RELATIONSHIP.to_owned()),
      strength: clamp_strength(self.strength),
      notes: self.notes.unwrap_or_default(),
      event_id: self.event_id.filter(|id| !id.is_blank()),
      from: self.from,
      to: self.to,
      created_at: now,
    }
  }
}

// ─── Strength ────────────────────────────────────────────────────────────────

/// Clamp a raw strength into range; absent reads as the minimum.
pub fn clamp_strength(raw: Option<i64>) -> u8 {
  raw
    .unwrap_or(i64::from(MIN_STRENGTH))
    .clamp(i64::from(MIN_STRENGTH), i64::from(MAX_STRENGTH)) as u8
}

/// Read an integer out of an arbitrary JSON value the lenient way: numbers
/// are truncated toward zero, strings contribute their leading signed
/// integer. Everything else yields `None`.
pub fn parse_strength(raw: &serde_json::Value) -> Option<i64> {
  match raw {
    serde_json::Value::Number(n) => n
      .as_i64()
      .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
    serde_json::Value::String(s) => leading_integer(s),
    _ => None,
  }
}

fn leading_integer(s: &str) -> Option<i64> {
  let s = s.trim_start();
  let sign_len = usize::from(s.starts_with(['+', '-']));
  let digits = s[sign_len..]
    .bytes()
    .take_while(u8::is_ascii_digit)
    .count();
  if digits == 0 {
    return None;
  }
  let end = sign_len + digits;
  // Saturate rather than fail on absurdly long digit runs.
  s[..end].parse::<i64>().ok().or(Some(if s.starts_with('-') {
    i64::MIN
  } else {
    i64::MAX
  }))
}

fn lenient_strength<'de, D>(de: D) -> std::result::Result<Option<i64>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = Option::<serde_json::Value>::deserialize(de)?;
  Ok(raw.as_ref().and_then(parse_strength))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn self_connection_is_invalid() {
    let err = NewConnection::new("p1", "p1").validate().unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
  }

  #[test]
  fn missing_endpoint_is_invalid() {
    assert!(NewConnection::new("", "p2").validate().is_err());
  }

  #[test]
  fn defaults_are_substituted() {
    let mut input = NewConnection::new("p2", "p1");
    input.relationship_type = Some(String::new());
    let c = input.into_connection(Utc::now());

    assert_eq!(c.id.as_str(), "p1_p2");
    assert_eq!(c.from.as_str(), "p2");
    assert_eq!(c.to.as_str(), "p1");
    assert_eq!(c.relationship_type, DEFAULT_RELATIONSHIP);
    assert_eq!(c.strength, 1);
    assert_eq!(c.notes, "");
    assert_eq!(c.event_id, None);
  }

  #[test]
  fn strength_is_clamped() {
    assert_eq!(clamp_strength(None), 1);
    assert_eq!(clamp_strength(Some(0)), 1);
    assert_eq!(clamp_strength(Some(-7)), 1);
    assert_eq!(clamp_strength(Some(3)), 3);
    assert_eq!(clamp_strength(Some(42)), 5);
  }

  #[test]
  fn strength_parses_leniently() {
    assert_eq!(parse_strength(&json!(4)), Some(4));
    assert_eq!(parse_strength(&json!(3.9)), Some(3));
    assert_eq!(parse_strength(&json!("2")), Some(2));
    assert_eq!(parse_strength(&json!(" 4 stars")), Some(4));
    assert_eq!(parse_strength(&json!("-3")), Some(-3));
    assert_eq!(parse_strength(&json!("strong")), None);
    assert_eq!(parse_strength(&json!(true)), None);
    assert_eq!(parse_strength(&json!(null)), None);
  }

  #[test]
  fn strength_deserializes_from_any_json() {
    let c: NewConnection =
      serde_json::from_value(json!({"from": "a", "to": "b", "strength": "9"}))
        .unwrap();
    assert_eq!(clamp_strength(c.strength), 5);

    let c: NewConnection =
      serde_json::from_value(json!({"from": "a", "to": "b", "strength": [1]}))
        .unwrap();
    assert_eq!(c.strength, None);
  }
}
