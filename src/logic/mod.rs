//! Site behavior: countdown, validation, delivery, marker storage and the form flow.

mod countdown;
mod flow;
mod marker;
mod transport;
mod validation;

pub use countdown::{remaining, CountdownTimer, TICK_PERIOD};
pub use flow::{FormState, RegistrationFlow, OVERLAY_DURATION_SECS};
pub use marker::{
    MarkerStore, MemoryMarkerStore, SessionMarkerStore, MAX_SNAPSHOT_BYTES, REGISTERED_KEY,
    SNAPSHOT_KEY,
};
pub use transport::{DeliveryOutcome, HttpTransport, Transport};
pub use validation::{validate, ValidDraft, AGE_RANGE, NAME_MAX_CHARS, PHONE_DIGITS};
