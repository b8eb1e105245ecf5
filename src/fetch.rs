use std::cell::Cell;
use std::time::Duration;

use anyhow::Result;

use crate::http_client::Transport;
use crate::leaders_api::{BIG_PAGE_ITEMS, LeadersClient, LeadersQuery, Pause, Split, StatType};
use crate::rows::{Row, merge_rows};

/// Row count upstream has been seen to truncate responses to.
pub const SUSPECTED_ROW_CAP: usize = 10;

pub fn chunk_ids(ids: &[u32], size: usize) -> Vec<&[u32]> {
    ids.chunks(size.max(1)).collect()
}

/// Fetches a segment in fixed-size player-id batches and merges the results.
pub struct BatchFetcher<'a, T, P> {
    client: &'a LeadersClient<T, P>,
    season: u16,
    batch_size: usize,
    batch_pause: Duration,
    requests: Cell<usize>,
}

impl<'a, T: Transport, P: Pause> BatchFetcher<'a, T, P> {
    pub fn new(
        client: &'a LeadersClient<T, P>,
        season: u16,
        batch_size: usize,
        batch_pause: Duration,
    ) -> Self {
        Self {
            client,
            season,
            batch_size,
            batch_pause,
            requests: Cell::new(0),
        }
    }

    /// Upstream requests issued so far, including truncation refetches.
    pub fn requests(&self) -> usize {
        self.requests.get()
    }

    pub fn fetch(&self, stats: StatType, split: Split, ids: &[u32]) -> Result<Vec<Row>> {
        let batches = chunk_ids(ids, self.batch_size);
        let total = batches.len();
        let mut merged = Vec::new();
        for (idx, batch) in batches.into_iter().enumerate() {
            log::debug!(
                "{} split {}: batch {}/{} ({} ids)",
                stats.as_str(),
                split.code(),
                idx + 1,
                total,
                batch.len()
            );
            let rows = self.fetch_batch(stats, split, batch)?;
            merged = merge_rows(merged, rows);
        }
        Ok(merged)
    }

    fn fetch_batch(&self, stats: StatType, split: Split, batch: &[u32]) -> Result<Vec<Row>> {
        if self.requests.get() > 0 {
            self.client.pause(self.batch_pause);
        }
        self.requests.set(self.requests.get() + 1);

        let query = LeadersQuery {
            season: self.season,
            stats,
            split,
            players: batch,
            page_items: BIG_PAGE_ITEMS,
            page_num: 1,
        };
        let rows = self.client.fetch_rows(&query)?;

        if batch.len() > SUSPECTED_ROW_CAP && rows.len() == SUSPECTED_ROW_CAP {
            log::warn!(
                "{} split {}: {} ids returned exactly {} rows, splitting batch",
                stats.as_str(),
                split.code(),
                batch.len(),
                SUSPECTED_ROW_CAP
            );
            let (left, right) = batch.split_at(batch.len() / 2);
            let left = self.fetch_batch(stats, split, left)?;
            let right = self.fetch_batch(stats, split, right)?;
            return Ok(merge_rows(left, right));
        }
        Ok(rows)
    }
}
