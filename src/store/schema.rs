//! Schema for the person store, applied on every open.

pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS persons (
    id          TEXT PRIMARY KEY,
    nickname    TEXT NOT NULL UNIQUE,
    name        TEXT NOT NULL,
    birth_date  TEXT NOT NULL   -- YYYY-MM-DD
);

-- Tags have no identity of their own; position keeps submission order.
CREATE TABLE IF NOT EXISTS stack_tags (
    person_id   TEXT NOT NULL REFERENCES persons(id),
    position    INTEGER NOT NULL,
    tag         TEXT NOT NULL,
    PRIMARY KEY (person_id, position)
);
";
