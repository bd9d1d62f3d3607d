//! SQL schema for the What's Next SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Reads order by `rowid`, which `UPDATE` leaves alone, so insertion order
/// survives edits.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS events (
    event_id    TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    date        TEXT,                       -- RFC 3339 instant or YYYY-MM-DD
    location    TEXT NOT NULL DEFAULT '',
    description TEXT NOT NULL DEFAULT '',
    attendees   TEXT NOT NULL DEFAULT '[]', -- JSON array of person ids
    created_at  TEXT NOT NULL,
    updated_at  TEXT
);

CREATE TABLE IF NOT EXISTS people (
    person_id  TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    email      TEXT NOT NULL DEFAULT '',
    phone      TEXT NOT NULL DEFAULT '',
    profession TEXT NOT NULL DEFAULT '',
    company    TEXT NOT NULL DEFAULT '',
    location   TEXT NOT NULL DEFAULT '',
    notes      TEXT NOT NULL DEFAULT '',
    tags       TEXT NOT NULL DEFAULT '[]',  -- JSON array of strings
    event_id   TEXT REFERENCES events(event_id) ON DELETE SET NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT
);

-- One row per unordered pair; connection_id is the pair key.
CREATE TABLE IF NOT EXISTS connections (
    connection_id     TEXT PRIMARY KEY,
    from_id           TEXT NOT NULL REFERENCES people(person_id) ON DELETE CASCADE,
    to_id             TEXT NOT NULL REFERENCES people(person_id) ON DELETE CASCADE,
    relationship_type TEXT NOT NULL,
    strength          INTEGER NOT NULL CHECK (strength BETWEEN 1 AND 5),
    notes             TEXT NOT NULL DEFAULT '',
    event_id          TEXT REFERENCES events(event_id) ON DELETE SET NULL,
    created_at        TEXT NOT NULL,
    CHECK (from_id != to_id)
);

CREATE INDEX IF NOT EXISTS connections_from_idx  ON connections(from_id);
CREATE INDEX IF NOT EXISTS connections_to_idx    ON connections(to_id);
CREATE INDEX IF NOT EXISTS people_event_idx      ON people(event_id);
CREATE INDEX IF NOT EXISTS connections_event_idx ON connections(event_id);

PRAGMA user_version = 1;
";
