//! Page state and its projection onto what the UI shows.

use crate::ceremony::Completion;
use crate::error::AuthorizeError;
use crate::types::AuthorizationPayload;

pub const SUCCESS_STATUS: &str = "Successfully authorized.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub payload: Option<AuthorizationPayload>,
    pub error: Option<String>,
    pub status: Option<String>,
    /// A ceremony is in flight.
    pub busy: bool,
    generation: u64,
}

/// Issued by [`PageState::begin_ceremony`]; only the ticket of the page's
/// current generation may record an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CeremonyTicket(u64);

/// Everything the presentation layer needs, derived from [`PageState`].
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub show_payload: bool,
    pub payload_json: String,
    pub show_error: bool,
    pub error: String,
    pub show_status: bool,
    pub status: String,
    pub authorize_enabled: bool,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new context was observed: forget everything from the previous one.
    /// Outstanding ceremony tickets become stale.
    pub fn reset(&mut self) {
        *self = Self {
            generation: self.generation.wrapping_add(1),
            ..Self::default()
        };
    }

    pub fn apply_context_error(&mut self, error: &AuthorizeError) {
        self.reset();
        self.error = Some(error.to_string());
    }

    pub fn apply_details(&mut self, result: Result<AuthorizationPayload, AuthorizeError>) {
        match result {
            Ok(payload) => {
                // `data: null` means there is nothing to authorize.
                self.payload = Some(payload).filter(|p| !p.is_null());
                self.error = None;
            }
            Err(e) => {
                self.payload = None;
                self.error = Some(e.to_string());
            }
        }
    }

    /// Returns `None` when a ceremony is already running.
    pub fn begin_ceremony(&mut self) -> Option<CeremonyTicket> {
        if self.busy {
            return None;
        }
        self.busy = true;
        self.error = None;
        self.status = None;
        Some(CeremonyTicket(self.generation))
    }

    /// Record the ceremony outcome. Returns the URL to navigate to, if any.
    ///
    /// An outcome for a ticket issued before the last [`reset`](Self::reset)
    /// belongs to a previous context and is dropped.
    pub fn finish_ceremony(
        &mut self,
        ticket: CeremonyTicket,
        outcome: Result<Completion, AuthorizeError>,
    ) -> Option<String> {
        if ticket.0 != self.generation {
            return None;
        }
        self.busy = false;
        match outcome {
            Ok(completion) => {
                self.error = None;
                self.status = Some(SUCCESS_STATUS.to_string());
                completion.redirect
            }
            Err(e) => {
                self.status = None;
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn view(&self) -> PageView {
        let payload_json = self
            .payload
            .as_ref()
            .and_then(|p| serde_json::to_string_pretty(p).ok())
            .unwrap_or_default();
        PageView {
            show_payload: self.payload.is_some(),
            payload_json,
            show_error: self.error.is_some(),
            error: self.error.clone().unwrap_or_default(),
            show_status: self.status.is_some(),
            status: self.status.clone().unwrap_or_default(),
            authorize_enabled: self.payload.is_some() && !self.busy,
        }
    }
}
