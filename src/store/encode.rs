//! Conversions between domain values and the text stored in SQLite columns.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::structs::person::Person;

use super::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn encode_date(date: NaiveDate) -> String { date.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

/// A `persons` row plus its tags, still in column form.
pub struct RawPerson {
    pub id: String,
    pub nickname: String,
    pub name: String,
    pub birth_date: String,
    pub stack: Vec<String>,
}

impl RawPerson {
    /// Expects `id, nickname, name, birth_date` in that order.
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            nickname: row.get(1)?,
            name: row.get(2)?,
            birth_date: row.get(3)?,
            stack: Vec::new(),
        })
    }

    pub fn decode(self) -> Result<Person> {
        Ok(Person {
            id: Uuid::parse_str(&self.id)?,
            nickname: self.nickname,
            name: self.name,
            birth_date: decode_date(&self.birth_date)?,
            stack: (!self.stack.is_empty()).then_some(self.stack),
        })
    }
}

/// Tags of one person, in submission order.
pub fn load_stack(conn: &rusqlite::Connection, person_id: &str) -> rusqlite::Result<Vec<String>> {
    let mut statement = conn
        .prepare_cached("SELECT tag FROM stack_tags WHERE person_id = ?1 ORDER BY position")?;
    let tags = statement
        .query_map(rusqlite::params![person_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(tags)
}
