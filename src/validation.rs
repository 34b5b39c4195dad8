//! Checks a create payload and turns it into a [`NewPerson`].
//!
//! Checks run in a fixed order and the first failure wins:
//! name present, nickname present, birth date present, nickname unused,
//! name is a string.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

use crate::error::ApiError;
use crate::store::PersonStore;
use crate::structs::api::CreatePersonBody;
use crate::structs::person::NewPerson;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Nickname,
    BirthDate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Field::Name => "nome",
            Field::Nickname => "apelido",
            Field::BirthDate => "nascimento",
        };
        f.write_str(key)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("O {0} é Obrigatório")]
    MissingField(Field),

    #[error("O {0} deve ser string")]
    TypeMismatch(Field),

    #[error("O apelido deve ser único")]
    DuplicateNickname,
}

#[instrument(skip(store, body))]
pub async fn validate(store: &PersonStore, body: CreatePersonBody) -> Result<NewPerson, ApiError> {
    require(Field::Name, body.name.as_ref())?;
    require(Field::Nickname, body.nickname.as_ref())?;
    require(Field::BirthDate, body.birth_date.as_ref())?;

    let nickname = expect_string(Field::Nickname, body.nickname)?;
    if store.count_by_nickname(&nickname).await? > 0 {
        return Err(ValidationError::DuplicateNickname.into());
    }

    let name = expect_string(Field::Name, body.name)?;
    let birth_date = parse_birth_date(body.birth_date)?;
    let stack = stack_tags(body.stacks)?;

    Ok(NewPerson { nickname, name, birth_date, stack })
}

/// Missing, `null`, `false`, `0` and `""` all count as absent.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn require(field: Field, value: Option<&Value>) -> Result<(), ValidationError> {
    if is_present(value) {
        Ok(())
    } else {
        Err(ValidationError::MissingField(field))
    }
}

fn expect_string(field: Field, value: Option<Value>) -> Result<String, ValidationError> {
    match value {
        Some(Value::String(text)) => Ok(text),
        _ => Err(ValidationError::TypeMismatch(field)),
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn parse_birth_date(value: Option<Value>) -> Result<NaiveDate, ApiError> {
    match value {
        Some(Value::String(raw)) => {
            let parsed = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|timestamp| timestamp.date_naive()));
            parsed.map_err(|_| ApiError::InvalidBirthDate(raw))
        }
        other => Err(ApiError::InvalidBirthDate(other.map(|v| v.to_string()).unwrap_or_default())),
    }
}

/// Only arrays carry tags. A non-empty string is rejected; any other
/// non-array value has no length and means "no tags".
fn stack_tags(value: Option<Value>) -> Result<Vec<String>, ApiError> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(tag) => Ok(tag),
                other => Err(ApiError::InvalidStack(other.to_string())),
            })
            .collect(),
        Some(Value::String(text)) if !text.is_empty() => Err(ApiError::InvalidStack(text)),
        _ => Ok(Vec::new()),
    }
}
