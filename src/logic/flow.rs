//! Registration form state machine.
//!
//! `Editing -> Validating -> Editing` when a field fails, or
//! `Editing -> Validating -> Submitting -> Submitted` when all pass. A client that already carries
//! the marker starts (and stays) in `AlreadyRegistered`.

use crate::error::Result;
use crate::logic::marker::MarkerStore;
use crate::logic::transport::{DeliveryOutcome, Transport};
use crate::logic::validation::validate;
use crate::models::{Draft, Field, FieldErrors};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long the confirmation overlay stays up after a submission.
pub const OVERLAY_DURATION_SECS: i64 = 3;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    /// Marker found on load; the form is never shown.
    AlreadyRegistered,
    Editing,
    Validating,
    Submitting,
    Submitted,
}

#[derive(Clone, Debug)]
pub struct RegistrationFlow {
    state: FormState,
    draft: Draft,
    errors: FieldErrors,
    outcome: Option<DeliveryOutcome>,
    overlay_opened_at: Option<DateTime<Utc>>,
}

impl RegistrationFlow {
    /// Construct the view: a single marker check decides between the form and the bypass.
    pub fn load<S: MarkerStore>(store: &S) -> Result<Self> {
        let state = if store.marker()?.is_present() {
            FormState::AlreadyRegistered
        } else {
            FormState::Editing
        };
        Ok(Self {
            state,
            draft: Draft::default(),
            errors: FieldErrors::default(),
            outcome: None,
            overlay_opened_at: None,
        })
    }

    /// Replace one field of the draft. Existing error messages stay until the next submit.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        if self.state == FormState::Editing {
            self.draft.set(field, value);
        }
    }

    /// Validate and, if everything passes, deliver once and mark the client as registered.
    ///
    /// The marker is written whatever the delivery outcome. Outside `Editing` this does nothing.
    pub async fn submit<T, S>(
        &mut self,
        transport: &T,
        store: &mut S,
        now: DateTime<Utc>,
    ) -> Result<FormState>
    where
        T: Transport,
        S: MarkerStore,
    {
        if self.state != FormState::Editing {
            return Ok(self.state);
        }

        self.state = FormState::Validating;
        let valid = match validate(&self.draft) {
            Ok(valid) => valid,
            Err(errors) => {
                log::debug!("Registration rejected: {} invalid field(s)", errors.len());
                self.errors = errors;
                self.state = FormState::Editing;
                return Ok(self.state);
            }
        };
        self.errors = FieldErrors::default();

        self.state = FormState::Submitting;
        let outcome = transport.deliver(&self.draft).await;
        if outcome == DeliveryOutcome::Failed {
            log::warn!(
                "Delivery of registration for {} failed; marking as registered anyway",
                valid.name
            );
        }
        self.outcome = Some(outcome);

        store.mark_registered(&self.draft)?;
        self.state = FormState::Submitted;
        self.overlay_opened_at = Some(now);
        log::info!("Registered {} as {} (age {})", valid.name, valid.position, valid.age);
        Ok(self.state)
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Result of the delivery attempt, once one was made.
    pub fn outcome(&self) -> Option<DeliveryOutcome> {
        self.outcome
    }

    /// Whether the form should be rendered at all.
    pub fn shows_form(&self) -> bool {
        matches!(self.state, FormState::Editing | FormState::Validating)
    }

    /// The confirmation overlay is up for three seconds after submission. The state stays
    /// `Submitted` after it closes.
    pub fn overlay_visible(&self, now: DateTime<Utc>) -> bool {
        self.overlay_opened_at
            .is_some_and(|opened| now < opened + Duration::seconds(OVERLAY_DURATION_SECS))
    }

    /// Time left before the overlay closes, zero when it is not up.
    pub fn overlay_remaining(&self, now: DateTime<Utc>) -> std::time::Duration {
        self.overlay_opened_at
            .map(|opened| opened + Duration::seconds(OVERLAY_DURATION_SECS) - now)
            .and_then(|left| left.to_std().ok())
            .unwrap_or_default()
    }
}
