//! Chennarathadam Premier League site: library with models, registration logic and HTTP handlers.

pub mod config;
pub mod error;
pub mod logic;
pub mod models;
pub mod web;

pub use config::Config;
pub use error::{Result, SiteError};
pub use logic::{
    remaining, validate, CountdownTimer, DeliveryOutcome, FormState, HttpTransport, MarkerStore,
    MemoryMarkerStore, RegistrationFlow, SessionMarkerStore, Transport, ValidDraft,
};
pub use models::{
    Countdown, Deadline, Draft, Field, FieldErrors, Position, PositionCategory, RegistrationMarker,
};
