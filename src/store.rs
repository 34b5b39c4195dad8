//! SQLite persistence for persons and their stack tags.
//!
//! All access goes through [`tokio_rusqlite`], which runs queries on a
//! dedicated thread so handlers never block the runtime.

mod encode;
mod schema;

pub mod error;

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::structs::person::{NewPerson, Person};

use encode::{encode_date, encode_uuid, load_stack, RawPerson};
pub use error::{Error, Result};
use schema::SCHEMA;

/// Persons whose nickname, name or any tag contains `?1`.
///
/// `instr` is case-sensitive and treats `%`/`_` literally.
const SEARCH_SQL: &str = "
SELECT p.id, p.nickname, p.name, p.birth_date
FROM persons p
WHERE instr(p.nickname, ?1) > 0
   OR instr(p.name, ?1) > 0
   OR EXISTS (
       SELECT 1 FROM stack_tags s
       WHERE s.person_id = p.id AND instr(s.tag, ?1) > 0
   )
ORDER BY p.rowid
";

/// Handle to the person store.
///
/// Cloning is cheap; every clone talks to the same connection.
#[derive(Clone)]
pub struct PersonStore {
    conn: tokio_rusqlite::Connection,
}

impl PersonStore {
    /// Open (or create) a store at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = tokio_rusqlite::Connection::open(path).await?;
        let store = Self { conn };
        store.init_schema().await?;
        Ok(store)
    }

    pub async fn open_in_memory() -> Result<Self> {
        let conn = tokio_rusqlite::Connection::open_in_memory().await?;
        let store = Self { conn };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.execute_batch(SCHEMA)?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    pub async fn count_by_nickname(&self, nickname: &str) -> Result<i64> {
        let nickname = nickname.to_owned();
        let count = self
            .conn
            .call(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM persons WHERE nickname = ?1",
                    rusqlite::params![nickname],
                    |row| row.get(0),
                )?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }

    /// Insert a person and its tags in one transaction.
    ///
    /// The returned [`Person`] never carries tags.
    pub async fn insert(&self, new_person: NewPerson) -> Result<Person> {
        let NewPerson { nickname, name, birth_date, stack } = new_person;
        let person = Person { id: Uuid::new_v4(), nickname, name, birth_date, stack: None };

        let id = encode_uuid(person.id);
        let nickname = person.nickname.clone();
        let name = person.name.clone();
        let birth_date = encode_date(person.birth_date);

        let inserted = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;

                let result = tx.execute(
                    "INSERT INTO persons (id, nickname, name, birth_date) VALUES (?1, ?2, ?3, ?4)",
                    rusqlite::params![id, nickname, name, birth_date],
                );
                match result {
                    Err(rusqlite::Error::SqliteFailure(failure, _))
                        if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
                    {
                        return Ok(false);
                    }
                    other => {
                        other?;
                    }
                }

                {
                    let mut statement = tx.prepare(
                        "INSERT INTO stack_tags (person_id, position, tag) VALUES (?1, ?2, ?3)",
                    )?;
                    for (position, tag) in stack.iter().enumerate() {
                        let position = position as i64;
                        statement.execute(rusqlite::params![id, position, tag])?;
                    }
                }

                tx.commit()?;
                Ok(true)
            })
            .await?;

        if !inserted {
            return Err(Error::DuplicateNickname(person.nickname));
        }
        Ok(person)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>> {
        let id = encode_uuid(id);
        let raw = self
            .conn
            .call(move |conn| {
                let raw = conn
                    .query_row(
                        "SELECT id, nickname, name, birth_date FROM persons WHERE id = ?1",
                        rusqlite::params![id],
                        RawPerson::from_row,
                    )
                    .optional()?;

                let Some(mut raw) = raw else {
                    return Ok(None);
                };
                raw.stack = load_stack(conn, &raw.id)?;
                Ok(Some(raw))
            })
            .await?;

        raw.map(RawPerson::decode).transpose()
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Person>> {
        let term = term.to_owned();
        let raws = self
            .conn
            .call(move |conn| {
                let mut statement = conn.prepare_cached(SEARCH_SQL)?;
                let mut raws = statement
                    .query_map(rusqlite::params![term], RawPerson::from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                drop(statement);

                for raw in &mut raws {
                    raw.stack = load_stack(conn, &raw.id)?;
                }
                Ok(raws)
            })
            .await?;

        raws.into_iter().map(RawPerson::decode).collect()
    }

    pub async fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .call(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM persons", [], |row| row.get(0))?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }
}
