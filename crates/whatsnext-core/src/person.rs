//! People: the vertices of the graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  EventId, PersonId, Result,
  error::Error,
  patch::{apply_text, non_blank, nullable},
};

// ─── Person ──────────────────────────────────────────────────────────────────

/// A stored person. Optional text fields hold `""` rather than `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  pub id:         PersonId,
  pub name:       String,
  pub email:      String,
  pub phone:      String,
  pub profession: String,
  pub company:    String,
  pub location:   String,
  pub notes:      String,
  /// Insertion order preserved; duplicates allowed.
  pub tags:       Vec<String>,
  /// Where this person was met. A weak reference: cleared, never cascaded.
  pub event_id:   Option<EventId>,
  pub created_at: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at: Option<DateTime<Utc>>,
}

// ─── NewPerson ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::GraphStore::add_person`]. `id` and `created_at`
/// are always assigned by the store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
  #[serde(default)]
  pub name:       String,
  pub email:      Option<String>,
  pub phone:      Option<String>,
  pub profession: Option<String>,
  pub company:    Option<String>,
  pub location:   Option<String>,
  pub notes:      Option<String>,
  pub tags:       Option<Vec<String>>,
  pub event_id:   Option<EventId>,
}

impl NewPerson {
  /// Convenience constructor with every optional field left out.
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), ..Self::default() }
  }

  pub fn validate(&self) -> Result<()> {
    if self.name.trim().is_empty() {
      return Err(Error::validation("name is required"));
    }
    Ok(())
  }

  /// The event this person will reference once stored, if any.
  pub fn event_ref(&self) -> Option<&EventId> {
    self.event_id.as_ref().filter(|id| !id.is_blank())
  }

  /// Build the stored record, substituting defaults for absent fields.
  /// Callers must have run [`Self::validate`] first.
  pub fn into_person(self, id: PersonId, now: DateTime<Utc>) -> Person {
    Person {
      id,
      name: self.name,
      email: self.email.unwrap_or_default(),
      phone: self.phone.unwrap_or_default(),
      profession: self.profession.unwrap_or_default(),
      company: self.company.unwrap_or_default(),
      location: self.location.unwrap_or_default(),
      notes: self.notes.unwrap_or_default(),
      tags: self.tags.unwrap_or_default(),
      event_id: self.event_id.filter(|id| !id.is_blank()),
      created_at: now,
      updated_at: None,
    }
  }
}

// ─── PersonPatch ─────────────────────────────────────────────────────────────

/// Input to [`crate::store::GraphStore::update_person`].
///
/// Absent fields are left untouched. An explicit `null` clears the field
/// (blank text, no tags, no event). `name` cannot be cleared.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonPatch {
  pub name:       Option<String>,
  #[serde(default, deserialize_with = "nullable")]
  pub email:      Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub phone:      Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub profession: Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub company:    Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub location:   Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub notes:      Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable")]
  pub tags:       Option<Option<Vec<String>>>,
  #[serde(default, deserialize_with = "nullable")]
  pub event_id:   Option<Option<EventId>>,
}

impl PersonPatch {
  pub fn validate(&self) -> Result<()> {
    if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
      return Err(Error::validation("name cannot be blank"));
    }
    Ok(())
  }

  /// The event this patch points the person at, if it sets one.
  pub fn event_ref(&self) -> Option<&EventId> {
    match &self.event_id {
      Some(Some(id)) if !id.is_blank() => Some(id),
      _ => None,
    }
  }

  /// Merge this patch over `person` and stamp `updated_at`.
  /// Callers must have run [`Self::validate`] first.
  pub fn apply(self, person: &mut Person, now: DateTime<Utc>) {
    if let Some(name) = non_blank(self.name) {
      person.name = name;
    }
    apply_text(&mut person.email, self.email);
    apply_text(&mut person.phone, self.phone);
    apply_text(&mut person.profession, self.profession);
    apply_text(&mut person.company, self.company);
    apply_text(&mut person.location, self.location);
    apply_text(&mut person.notes, self.notes);
    if let Some(tags) = self.tags {
      person.tags = tags.unwrap_or_default();
    }
    if let Some(event_id) = self.event_id {
      person.event_id = event_id.filter(|id| !id.is_blank());
    }
    person.updated_at = Some(now);
  }
}
