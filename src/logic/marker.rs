//! Where the "already registered" marker and the submitted snapshot are kept.

use crate::error::Result;
use crate::models::{Draft, RegistrationMarker};
use actix_session::Session;

/// Session key of the registered flag.
pub const REGISTERED_KEY: &str = "cpl_registered";
/// Session key of the last submitted draft.
pub const SNAPSHOT_KEY: &str = "cpl_user_data";

/// Largest serialized snapshot kept in the session cookie. The whole cookie is capped at 4064
/// bytes after encryption and encoding, and the marker must always fit.
pub const MAX_SNAPSHOT_BYTES: usize = 1024;

/// Client-local registration state. The marker and the snapshot are stored and read separately;
/// a missing snapshot never implies absence and vice versa.
pub trait MarkerStore {
    fn marker(&self) -> Result<RegistrationMarker>;
    fn snapshot(&self) -> Result<Option<Draft>>;
    /// Set the marker and replace the snapshot.
    fn mark_registered(&mut self, snapshot: &Draft) -> Result<()>;
}

/// In-process store, one per simulated client.
#[derive(Clone, Debug, Default)]
pub struct MemoryMarkerStore {
    registered: Option<bool>,
    snapshot: Option<Draft>,
}

impl MemoryMarkerStore {
    /// Store holding a marker but no snapshot.
    pub fn registered() -> Self {
        Self {
            registered: Some(true),
            snapshot: None,
        }
    }

    /// Forget everything, like a user clearing site data.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl MarkerStore for MemoryMarkerStore {
    fn marker(&self) -> Result<RegistrationMarker> {
        Ok(RegistrationMarker::from_flag(self.registered))
    }

    fn snapshot(&self) -> Result<Option<Draft>> {
        Ok(self.snapshot.clone())
    }

    fn mark_registered(&mut self, snapshot: &Draft) -> Result<()> {
        self.registered = Some(true);
        self.snapshot = Some(snapshot.clone());
        Ok(())
    }
}

/// Marker kept in the browser's session cookie.
pub struct SessionMarkerStore {
    session: Session,
}

impl SessionMarkerStore {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl MarkerStore for SessionMarkerStore {
    fn marker(&self) -> Result<RegistrationMarker> {
        Ok(RegistrationMarker::from_flag(
            self.session.get::<bool>(REGISTERED_KEY)?,
        ))
    }

    fn snapshot(&self) -> Result<Option<Draft>> {
        Ok(self.session.get::<Draft>(SNAPSHOT_KEY)?)
    }

    /// Oversized snapshots are left out; the marker is written regardless.
    fn mark_registered(&mut self, snapshot: &Draft) -> Result<()> {
        self.session.insert(REGISTERED_KEY, true)?;
        let size = serde_json::to_string(snapshot)?.len();
        if size > MAX_SNAPSHOT_BYTES {
            log::warn!("Registration snapshot is {size} bytes; keeping only the marker");
            self.session.remove(SNAPSHOT_KEY);
        } else {
            self.session.insert(SNAPSHOT_KEY, snapshot)?;
        }
        Ok(())
    }
}
