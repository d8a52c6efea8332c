//! The `Person` entity and its storage-assigned identifier.

use std::fmt;

/// Identifier assigned by storage on first successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PersonId(i64);

impl PersonId {
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    pub fn to_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A person record. `age` is free-form text, not a number.
///
/// The id starts out unset and can only be filled in by a repository via
/// [`Person::persisted`], so it moves from unset to assigned exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    id: Option<PersonId>,
    name: String,
    age: String,
}

impl Person {
    pub const DEMO_NAME: &'static str = "Johannes";
    pub const DEMO_AGE: &'static str = "23";

    pub fn new(name: impl Into<String>, age: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            age: age.into(),
        }
    }

    /// The fixed payload written by the persist-and-report endpoint.
    pub fn demo() -> Self {
        Self::new(Self::DEMO_NAME, Self::DEMO_AGE)
    }

    pub fn id(&self) -> Option<PersonId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> &str {
        &self.age
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Unset -> assigned transition, for repositories only.
    pub(crate) fn persisted(self, id: PersonId) -> Self {
        debug_assert!(self.id.is_none(), "person id assigned twice");
        Self {
            id: Some(id),
            ..self
        }
    }
}
