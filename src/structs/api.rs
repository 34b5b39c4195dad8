use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::person::Person;

/// Raw create payload. Fields stay untyped so validation can tell a missing
/// field from one of the wrong type.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePersonBody {
    #[serde(rename(deserialize = "apelido"))]
    pub nickname: Option<Value>,
    #[serde(rename(deserialize = "nome"))]
    pub name: Option<Value>,
    #[serde(rename(deserialize = "nascimento"))]
    pub birth_date: Option<Value>,
    #[serde(rename(deserialize = "stack"))]
    pub stacks: Option<Value>,
}

impl CreatePersonBody {
    /// Reads a create request body. A request that is not JSON, an empty
    /// body, or a JSON value that is not an object carries no fields, so it
    /// fails validation on the first required field.
    pub fn parse(content_type: Option<&str>, bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let is_json = content_type
            .is_some_and(|value| value.trim_start().to_ascii_lowercase().starts_with("application/json"));
        if !is_json || bytes.is_empty() {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(bytes)? {
            fields @ Value::Object(_) => serde_json::from_value(fields),
            _ => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchPersonQuery {
    #[serde(rename(deserialize = "t"))]
    pub search_term: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PersonBody {
    pub id: Uuid,
    #[serde(rename = "apelido")]
    pub nickname: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "nascimento")]
    pub birth_date: NaiveDate,
    #[serde(rename = "stack", default, skip_serializing_if = "Option::is_none")]
    pub stacks: Option<Vec<String>>,
}

impl From<Person> for PersonBody {
    fn from(person: Person) -> Self {
        PersonBody {
            id: person.id,
            nickname: person.nickname,
            name: person.name,
            birth_date: person.birth_date,
            stacks: person.stack,
        }
    }
}
