//! Core backend trait definitions

use async_trait::async_trait;
use slotwise_api::{
    BlocksByDay, ConfirmationReceipt, ConfirmationRequest, DayRange, InitiateRequest,
    MeetingInitiation, Proposal,
};
use slotwise_util::SlotwiseError;
use thiserror::Error;

/// Errors from backend operations.
///
/// Every failure is terminal for the user action that triggered it; the
/// core never retries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {code}: {details}")]
    Http { code: u16, details: String },

    #[error("Parsing error: {0}")]
    Parsing(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl BackendError {
    /// Whether the server answered at all
    pub fn is_http(&self) -> bool {
        matches!(self, BackendError::Http { .. })
    }
}

impl From<SlotwiseError> for BackendError {
    fn from(err: SlotwiseError) -> Self {
        match err {
            SlotwiseError::Parsing(msg) | SlotwiseError::InvalidDuration(msg) => {
                BackendError::Parsing(msg)
            }
            other => BackendError::Unknown(other.to_string()),
        }
    }
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Remote scheduling service as seen by the session flow
#[async_trait]
pub trait SchedulingBackend: Send + Sync {
    /// Busy blocks for every day in `range`, keyed by absolute day index.
    /// Days without blocks may be absent from the map.
    async fn get_blocks(&self, range: DayRange) -> BackendResult<BlocksByDay>;

    /// Start a meeting search; returns the duration, default title, intent
    /// code and any server-suggested slots.
    async fn initiate_meeting(&self, request: InitiateRequest) -> BackendResult<MeetingInitiation>;

    /// Submit the finalized proposal; returns a shareable message.
    async fn submit_proposal(&self, proposal: &Proposal) -> BackendResult<String>;

    /// Recipient-side confirmation of one proposed time
    async fn confirm(&self, request: ConfirmationRequest) -> BackendResult<ConfirmationReceipt>;
}
