//! JSON fixture backend
//!
//! A fixture file describes a reference date, the busy blocks around it and
//! the server's answer to a meeting initiation. It stands in for the
//! remote scheduling service.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use slotwise_api::{
    BlocksByDay, BusyBlock, ConfirmationReceipt, ConfirmationRequest, DayRange, InitiateRequest,
    MeetingInitiation, Proposal,
};
use slotwise_backend_api::{BackendError, BackendResult, SchedulingBackend};
use slotwise_util::{BlockId, Hours, day_index};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// One busy block in a fixture, placed by day offset from the reference date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureBlock {
    pub day: i32,
    /// `HH:MM`
    pub start: String,
    pub duration_minutes: u32,
    pub title: String,
    #[serde(default = "default_account")]
    pub account: String,
    #[serde(default = "default_calendar")]
    pub calendar: String,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default)]
    pub colour: Option<String>,
}

fn default_account() -> String {
    "local".into()
}

fn default_calendar() -> String {
    "primary".into()
}

impl FixtureBlock {
    pub fn to_block(&self) -> BackendResult<BusyBlock> {
        let start = Hours::parse_clock(&self.start)?;
        let mut block = BusyBlock::new(
            BlockId::composite(&self.account, &self.calendar),
            self.title.clone(),
            start,
            Hours::from_minutes(self.duration_minutes as i32),
        );
        block.is_blocked_time = self.blocked;
        block.colour = self.colour.clone();
        Ok(block)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    /// Day offset 0
    pub reference: NaiveDate,
    /// Wall-clock "now" for the session; the real clock is used when absent
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
    #[serde(default)]
    pub blocks: Vec<FixtureBlock>,
    pub initiation: MeetingInitiation,
}

impl Fixture {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fixture {:?}", path))?;
        let fixture: Fixture = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse fixture {:?}", path))?;

        info!(
            path = %path.display(),
            reference = %fixture.reference,
            block_count = fixture.blocks.len(),
            "Fixture loaded"
        );
        Ok(fixture)
    }

    /// Every block paired with its absolute day index
    pub fn dated_blocks(&self) -> BackendResult<Vec<(i64, BusyBlock)>> {
        let today = day_index(self.reference);
        self.blocks
            .iter()
            .map(|b| Ok((today + b.day as i64, b.to_block()?)))
            .collect()
    }

    /// Session clock: the fixture's `now`, else the (mockable) local clock
    pub fn now(&self) -> NaiveDateTime {
        self.now
            .unwrap_or_else(|| slotwise_util::now().naive_local())
    }
}

/// Backend answering from a loaded fixture
pub struct FixtureBackend {
    fixture: Fixture,
    submitted: Mutex<Vec<Proposal>>,
}

impl FixtureBackend {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture,
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }
}

#[async_trait]
impl SchedulingBackend for FixtureBackend {
    async fn get_blocks(&self, range: DayRange) -> BackendResult<BlocksByDay> {
        let mut blocks = BlocksByDay::new();
        for (day, block) in self.fixture.dated_blocks()? {
            if range.contains(day) {
                blocks.entry(day).or_default().push(block);
            }
        }

        debug!(first = range.first, last = range.last, days = blocks.len(), "Fixture blocks served");
        Ok(blocks)
    }

    async fn initiate_meeting(&self, request: InitiateRequest) -> BackendResult<MeetingInitiation> {
        let mut initiation = self.fixture.initiation.clone();
        if let Some(minutes) = request.duration_minutes {
            initiation.duration_minutes = minutes;
        }
        if let Some(title) = request.title {
            initiation.default_title = title;
        }
        Ok(initiation)
    }

    async fn submit_proposal(&self, proposal: &Proposal) -> BackendResult<String> {
        let mut submitted = self
            .submitted
            .lock()
            .map_err(|_| BackendError::Unknown("fixture state poisoned".into()))?;
        submitted.push(proposal.clone());

        Ok(format!(
            "{}: choose one of {} proposed time(s) with code {}",
            self.fixture.initiation.default_title,
            proposal.times.len(),
            proposal
                .intent_code
                .as_ref()
                .map(|c| c.as_str())
                .unwrap_or("-"),
        ))
    }

    async fn confirm(&self, request: ConfirmationRequest) -> BackendResult<ConfirmationReceipt> {
        let submitted = self
            .submitted
            .lock()
            .map_err(|_| BackendError::Unknown("fixture state poisoned".into()))?;

        let known = submitted
            .iter()
            .filter(|p| p.intent_code.as_ref() == Some(&request.intent_code))
            .any(|p| p.times.contains(&request.time));
        if !known {
            return Err(BackendError::Http {
                code: 404,
                details: format!("time not proposed for {}", request.intent_code),
            });
        }

        Ok(ConfirmationReceipt {
            initiator_name: "slotwise".into(),
            meeting_title: self.fixture.initiation.default_title.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FIXTURE: &str = r#"{
        "reference": "2025-06-02",
        "now": "2025-06-02T08:40:00",
        "blocks": [
            { "day": 1, "start": "12:30", "duration_minutes": 60, "title": "Lunch" },
            { "day": 9, "start": "09:00", "duration_minutes": 30, "title": "Far away" },
            { "day": 1, "start": "25:00", "duration_minutes": 30, "title": "Broken" }
        ],
        "initiation": {
            "durationMinutes": 45,
            "defaultTitle": "Sync",
            "intentCode": "xyz"
        }
    }"#;

    fn fixture() -> Fixture {
        serde_json::from_str(FIXTURE).unwrap()
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FIXTURE.as_bytes()).unwrap();

        let fixture = Fixture::load(file.path()).unwrap();
        assert_eq!(fixture.blocks.len(), 3);
        assert_eq!(fixture.initiation.duration_minutes, 45);
        assert_eq!(
            fixture.now(),
            NaiveDate::from_ymd_opt(2025, 6, 2)
                .unwrap()
                .and_hms_opt(8, 40, 0)
                .unwrap()
        );
    }

    #[tokio::test]
    async fn bad_block_time_is_a_parsing_error() {
        let backend = FixtureBackend::new(fixture());
        let today = day_index(backend.fixture().reference);

        let result = backend.get_blocks(DayRange::new(today, today + 3)).await;
        assert!(matches!(result, Err(BackendError::Parsing(_))));
    }

    #[tokio::test]
    async fn blocks_keyed_by_absolute_day() {
        let mut fixture = fixture();
        fixture.blocks.pop();
        let backend = FixtureBackend::new(fixture);
        let today = day_index(backend.fixture().reference);

        let blocks = backend.get_blocks(DayRange::new(today, today + 3)).await.unwrap();
        assert_eq!(blocks.len(), 1);
        let lunch = &blocks[&(today + 1)][0];
        assert_eq!(lunch.id.as_str(), "local:primary");
        assert_eq!(lunch.start, Hours::from_hours(12.5));
    }
}
