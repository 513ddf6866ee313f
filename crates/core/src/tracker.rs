use crate::domain::date_range::DateRange;
use crate::domain::neo::NeoRecord;
use crate::ingest::mapper::map_records;
use crate::ingest::provider::FeedClient;
use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Dates did not parse; nothing was requested.
    InvalidInput(String),
    /// The feed had nothing for us; current records were left alone.
    NoData,
    /// Records were replaced with this many new ones.
    Updated(usize),
}

/// Holds the records currently on display.
pub struct Tracker<C> {
    client: C,
    records: Vec<NeoRecord>,
}

impl<C: FeedClient> Tracker<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[NeoRecord] {
        &self.records
    }

    pub async fn refresh(&mut self, start_date: &str, end_date: &str) -> Result<RefreshOutcome> {
        let range = match DateRange::parse(start_date, end_date) {
            Ok(range) => range,
            Err(err) => {
                tracing::info!(error = %err, "rejected date input");
                return Ok(RefreshOutcome::InvalidInput(err.user_message().to_string()));
            }
        };

        let Some(body) = self.client.fetch_feed(&range).await? else {
            return Ok(RefreshOutcome::NoData);
        };

        let records = map_records(body)?;
        let count = records.len();
        self.records = records;

        tracing::info!(
            %range,
            provider = self.client.provider_name(),
            records = count,
            "NEO records refreshed"
        );
        Ok(RefreshOutcome::Updated(count))
    }
}
