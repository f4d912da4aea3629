//! Mock scheduling backend for testing

use async_trait::async_trait;
use slotwise_api::{
    BlocksByDay, BusyBlock, ConfirmationReceipt, ConfirmationRequest, DayRange, InitiateRequest,
    MeetingInitiation, Proposal,
};
use slotwise_util::IntentCode;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

use crate::{BackendError, BackendResult, SchedulingBackend};

/// In-memory backend for unit/integration testing
pub struct MockBackend {
    blocks: Arc<Mutex<BlocksByDay>>,
    initiation: Arc<Mutex<MeetingInitiation>>,
    submitted: Arc<Mutex<Vec<Proposal>>>,

    /// Configure get_blocks to fail
    pub fail_blocks: Arc<Mutex<bool>>,

    /// Configure initiate_meeting to fail
    pub fail_initiate: Arc<Mutex<bool>>,

    /// Configure submit_proposal to fail
    pub fail_submit: Arc<Mutex<bool>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            blocks: Arc::new(Mutex::new(BlocksByDay::new())),
            initiation: Arc::new(Mutex::new(MeetingInitiation {
                duration_minutes: 30,
                default_title: "Meeting".into(),
                intent_code: IntentCode::new("mock-intent"),
                suggested_slots: Vec::new(),
            })),
            submitted: Arc::new(Mutex::new(Vec::new())),
            fail_blocks: Arc::new(Mutex::new(false)),
            fail_initiate: Arc::new(Mutex::new(false)),
            fail_submit: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_initiation(self, initiation: MeetingInitiation) -> Self {
        self.set_initiation(initiation);
        self
    }

    /// Change the answer to later initiations
    pub fn set_initiation(&self, initiation: MeetingInitiation) {
        if let Ok(mut current) = self.initiation.lock() {
            *current = initiation;
        }
    }

    /// Add a busy block under an absolute day index
    pub fn add_block(&self, day_index: i64, block: BusyBlock) {
        if let Ok(mut blocks) = self.blocks.lock() {
            blocks.entry(day_index).or_default().push(block);
        }
    }

    /// Every proposal submitted so far
    pub fn submitted(&self) -> Vec<Proposal> {
        self.submitted
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }

    pub fn set_fail_submit(&self, fail: bool) {
        if let Ok(mut flag) = self.fail_submit.lock() {
            *flag = fail;
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn is_set(flag: &Mutex<bool>) -> bool {
    flag.lock().map(|f| *f).unwrap_or(false)
}

fn state<T>(m: &Mutex<T>) -> BackendResult<MutexGuard<'_, T>> {
    m.lock()
        .map_err(|_| BackendError::Unknown("mock state poisoned".into()))
}

#[async_trait]
impl SchedulingBackend for MockBackend {
    async fn get_blocks(&self, range: DayRange) -> BackendResult<BlocksByDay> {
        if is_set(&self.fail_blocks) {
            return Err(BackendError::Network("Mock network failure".into()));
        }

        let blocks = state(&self.blocks)?;
        Ok(blocks
            .range(range.first..=range.last)
            .map(|(day, list)| (*day, list.clone()))
            .collect())
    }

    async fn initiate_meeting(&self, request: InitiateRequest) -> BackendResult<MeetingInitiation> {
        if is_set(&self.fail_initiate) {
            return Err(BackendError::Http {
                code: 500,
                details: "Mock initiate failure".into(),
            });
        }

        let mut initiation = state(&self.initiation)?.clone();
        if let Some(minutes) = request.duration_minutes {
            initiation.duration_minutes = minutes;
        }
        if let Some(title) = request.title {
            initiation.default_title = title;
        }
        Ok(initiation)
    }

    async fn submit_proposal(&self, proposal: &Proposal) -> BackendResult<String> {
        if is_set(&self.fail_submit) {
            return Err(BackendError::Http {
                code: 502,
                details: "Mock submit failure".into(),
            });
        }

        debug!(times = proposal.times.len(), "Mock proposal submitted");
        let mut submitted = state(&self.submitted)?;
        submitted.push(proposal.clone());
        Ok(format!(
            "Pick a time that works: {} option(s) proposed",
            proposal.times.len()
        ))
    }

    async fn confirm(&self, request: ConfirmationRequest) -> BackendResult<ConfirmationReceipt> {
        let submitted = state(&self.submitted)?;
        let known = submitted.iter().any(|p| {
            p.intent_code.as_ref() == Some(&request.intent_code) && p.times.contains(&request.time)
        });
        if !known {
            return Err(BackendError::Http {
                code: 404,
                details: format!("no proposed time for intent {}", request.intent_code),
            });
        }

        let title = state(&self.initiation)?.default_title.clone();
        Ok(ConfirmationReceipt {
            initiator_name: "Mock Organizer".into(),
            meeting_title: title,
        })
    }
}
