use chrono::NaiveDate;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    pub id: Uuid,
    pub nickname: String,
    pub name: String,
    pub birth_date: NaiveDate,
    /// `None` when the person has no tags.
    pub stack: Option<Vec<String>>,
}

/// A validated person that has not been stored yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewPerson {
    pub nickname: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub stack: Vec<String>,
}
