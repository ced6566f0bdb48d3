//! Data structures for the league site: countdown, positions, registration draft.

mod countdown;
mod position;
mod registration;

pub use countdown::{Countdown, Deadline, DEADLINE_OFFSET_DAYS};
pub use position::{Position, PositionCategory};
pub use registration::{Draft, Field, FieldErrors, RegistrationMarker};
