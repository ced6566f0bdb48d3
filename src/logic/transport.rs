//! Delivery of a registration to the external spreadsheet endpoint.
//!
//! The endpoint's response is never interpreted: a request that completes counts as sent, a
//! request that errors counts as failed. Nothing is retried.

use crate::error::Result;
use crate::models::Draft;
use reqwest::Client;
use std::future::Future;

/// What happened to a single delivery attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeliveryOutcome {
    Sent,
    Failed,
}

/// Hands a draft to the outside world exactly once.
pub trait Transport {
    fn deliver(&self, draft: &Draft) -> impl Future<Output = DeliveryOutcome>;
}

/// Posts the draft as form fields `name`, `phoneNumber`, `position`, `age`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for HttpTransport {
    async fn deliver(&self, draft: &Draft) -> DeliveryOutcome {
        match self
            .client
            .post(&self.url)
            .form(&draft.form_fields())
            .send()
            .await
        {
            Ok(response) => {
                log::info!("Registration data submitted (status {})", response.status());
                DeliveryOutcome::Sent
            }
            Err(e) => {
                log::error!("Error submitting registration: {e}");
                DeliveryOutcome::Failed
            }
        }
    }
}
