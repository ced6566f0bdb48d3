//! Whole-draft validation, run only when the user tries to submit.

use crate::models::{Draft, Field, FieldErrors, Position};
use std::ops::RangeInclusive;

pub const AGE_RANGE: RangeInclusive<u8> = 15..=50;
pub const PHONE_DIGITS: usize = 10;
/// Longest accepted name, in characters.
pub const NAME_MAX_CHARS: usize = 100;

/// A draft whose fields all passed validation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidDraft {
    pub name: String,
    pub phone_number: String,
    pub position: Position,
    pub age: u8,
}

/// Check every field independently. Any failure yields the full map of failures.
pub fn validate(draft: &Draft) -> Result<ValidDraft, FieldErrors> {
    let name = check_name(&draft.name);
    let phone_number = check_phone_number(&draft.phone_number);
    let position = check_position(&draft.position);
    let age = check_age(&draft.age);

    match (name, phone_number, position, age) {
        (Ok(name), Ok(phone_number), Ok(position), Ok(age)) => Ok(ValidDraft {
            name,
            phone_number,
            position,
            age,
        }),
        (name, phone_number, position, age) => {
            let mut errors = FieldErrors::default();
            if let Err(message) = name {
                errors.insert(Field::Name, message);
            }
            if let Err(message) = phone_number {
                errors.insert(Field::PhoneNumber, message);
            }
            if let Err(message) = position {
                errors.insert(Field::Position, message);
            }
            if let Err(message) = age {
                errors.insert(Field::Age, message);
            }
            Err(errors)
        }
    }
}

fn check_name(value: &str) -> Result<String, &'static str> {
    if value.trim().is_empty() {
        return Err("Name is required");
    }
    if value.chars().count() > NAME_MAX_CHARS {
        return Err("Name must be at most 100 characters");
    }
    Ok(value.to_string())
}

/// Exactly ten ASCII digits; surrounding whitespace counts against it.
fn check_phone_number(value: &str) -> Result<String, &'static str> {
    if value.trim().is_empty() {
        return Err("Phone number is required");
    }
    if value.len() != PHONE_DIGITS || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err("Enter a valid 10-digit phone number");
    }
    Ok(value.to_string())
}

fn check_position(value: &str) -> Result<Position, &'static str> {
    if value.is_empty() {
        return Err("Position is required");
    }
    Position::from_code(value).ok_or("Select a valid position")
}

/// Whole integers only: unlike a lenient `parseInt`, "20.5" and "20abc" are rejected on purpose.
fn check_age(value: &str) -> Result<u8, &'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Age is required");
    }
    value
        .parse::<i64>()
        .ok()
        .and_then(|age| u8::try_from(age).ok())
        .filter(|age| AGE_RANGE.contains(age))
        .ok_or("Age must be between 15 and 50")
}
