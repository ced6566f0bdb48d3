//! Registration draft, per-field errors and the "already registered" marker.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One named input of the registration form.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    PhoneNumber,
    Position,
    Age,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Name, Self::PhoneNumber, Self::Position, Self::Age];

    /// Form and wire name of the field.
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PhoneNumber => "phoneNumber",
            Self::Position => "position",
            Self::Age => "age",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// The in-progress registration record, holding exactly what the user typed.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_number: String,
    /// Position code, empty until one is selected.
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub age: String,
}

impl Draft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::PhoneNumber => &self.phone_number,
            Field::Position => &self.position,
            Field::Age => &self.age,
        }
    }

    /// Replace one field, leaving the others untouched.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::PhoneNumber => &mut self.phone_number,
            Field::Position => &mut self.position,
            Field::Age => &mut self.age,
        };
        *slot = value.into();
    }

    /// Named pairs in the order they are transmitted.
    pub fn form_fields(&self) -> [(&'static str, &str); 4] {
        Field::ALL.map(|f| (f.key(), self.get(f)))
    }
}

/// Message per failing field. Empty means the draft passed validation.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Whether this client has registered before. Independent of any stored snapshot.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RegistrationMarker {
    #[default]
    Absent,
    Present,
}

impl RegistrationMarker {
    /// A stored `true` is presence; a missing or `false` flag is absence.
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Self::Present,
            Some(false) | None => Self::Absent,
        }
    }

    pub fn is_present(self) -> bool {
        self == Self::Present
    }
}
