use serde::{Deserialize, Serialize};

use super::person::{Person, PersonId};

/// Ordered list of the persons taking part in the contribution.
///
/// The roster is fixed at initialization: persons are neither added nor
/// removed at runtime, only their payment maps grow.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    persons: Vec<Person>,
}

impl Roster {
    /// Creates a roster from already built persons, keeping their order.
    pub fn new(persons: Vec<Person>) -> Self {
        Self { persons }
    }

    /// Creates a roster of persons without payments, numbered from 1 in the
    /// given order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let persons = names
            .into_iter()
            .zip(1..)
            .map(|(name, id)| Person::new(PersonId(id), name))
            .collect();
        Self { persons }
    }

    /// Gets all persons in roster order.
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.persons.iter()
    }

    /// Looks a person up by ID.
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.iter().find(|p| p.id() == id)
    }

    /// Looks a person up by ID for mutation.
    pub fn person_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.persons.iter_mut().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}
