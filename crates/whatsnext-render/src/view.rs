//! Projecting a store snapshot into render nodes and links.

use std::collections::HashMap;

use serde::Serialize;
use whatsnext_core::{ConnectionId, PersonId, store::Snapshot};

use crate::{node::RenderNode, options::NodeKind};

/// An edge for the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderLink {
  pub id:                ConnectionId,
  pub source:            PersonId,
  pub target:            PersonId,
  pub relationship_type: String,
  pub strength:          u8,
}

/// People and events as nodes, connections as links.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphView {
  pub nodes: Vec<RenderNode>,
  pub links: Vec<RenderLink>,
}

impl GraphView {
  /// People first, then events, each in snapshot order.
  ///
  /// A person's degree is the number of connections it is an endpoint of.
  /// An event's degree is the number of people and connections that
  /// reference it.
  pub fn from_snapshot(snapshot: &Snapshot) -> Self {
    let mut degree: HashMap<&str, usize> = HashMap::new();
    for conn in &snapshot.connections {
      *degree.entry(conn.from.as_str()).or_default() += 1;
      *degree.entry(conn.to.as_str()).or_default() += 1;
      if let Some(event) = &conn.event_id {
        *degree.entry(event.as_str()).or_default() += 1;
      }
    }
    for person in &snapshot.people {
      if let Some(event) = &person.event_id {
        *degree.entry(event.as_str()).or_default() += 1;
      }
    }
    let degree_of =
      |id: &str| Some(degree.get(id).copied().unwrap_or_default() as f64);

    let people = snapshot.people.iter().map(|p| RenderNode {
      id: p.id.to_string(),
      kind: Some(NodeKind::Person),
      name: p.name.clone(),
      degree: degree_of(p.id.as_str()),
      ..RenderNode::default()
    });
    let events = snapshot.events.iter().map(|e| RenderNode {
      id: e.id.to_string(),
      kind: Some(NodeKind::Event),
      name: e.name.clone(),
      degree: degree_of(e.id.as_str()),
      ..RenderNode::default()
    });

    Self {
      nodes: people.chain(events).collect(),
      links: snapshot
        .connections
        .iter()
        .map(|c| RenderLink {
          id:                c.id.clone(),
          source:            c.from.clone(),
          target:            c.to.clone(),
          relationship_type: c.relationship_type.clone(),
          strength:          c.strength,
        })
        .collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use whatsnext_core::{
    EventId,
    connection::NewConnection,
    event::NewEvent,
    person::NewPerson,
  };

  use super::*;

  fn snapshot() -> Snapshot {
    let now = Utc::now();
    let conf = NewEvent::new("Conf").into_event(EventId::from("e1"), now);
    let mut alice = NewPerson::new("Alice");
    alice.event_id = Some(conf.id.clone());
    let alice = alice.into_person(PersonId::from("a"), now);
    let bob = NewPerson::new("Bob").into_person(PersonId::from("b"), now);
    let carol = NewPerson::new("Carol").into_person(PersonId::from("c"), now);

    let mut ab = NewConnection::new("a", "b");
    ab.event_id = Some(conf.id.clone());
    let ac = NewConnection::new("c", "a");

    Snapshot {
      people:      vec![alice, bob, carol],
      events:      vec![conf],
      connections: vec![ab.into_connection(now), ac.into_connection(now)],
    }
  }

  #[test]
  fn degrees_count_incident_connections() {
    let view = GraphView::from_snapshot(&snapshot());
    let degrees: Vec<_> = view
      .nodes
      .iter()
      .map(|n| (n.id.as_str(), n.degree))
      .collect();
    assert_eq!(degrees, [
      ("a", Some(2.0)),
      ("b", Some(1.0)),
      ("c", Some(1.0)),
      ("e1", Some(2.0)),
    ]);
  }

  #[test]
  fn links_keep_submitted_direction() {
    let view = GraphView::from_snapshot(&snapshot());
    assert_eq!(view.links.len(), 2);
    assert_eq!(view.links[1].source.as_str(), "c");
    assert_eq!(view.links[1].target.as_str(), "a");
    assert_eq!(view.links[1].id.as_str(), "a_c");
  }

  #[test]
  fn empty_snapshot_gives_empty_view() {
    assert_eq!(GraphView::from_snapshot(&Snapshot::default()), GraphView::default());
  }
}
