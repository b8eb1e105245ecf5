use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;

use crate::config::RetryPolicy;
use crate::http_client::{HttpReply, Transport};
use crate::rows::{Row, extract_rows};

/// Page size large enough that one page holds any batch.
pub const BIG_PAGE_ITEMS: u64 = 2_000_000_000;

/// Statuses the leaders endpoint returns while throttling or redeploying.
pub const TRANSIENT_STATUSES: [u16; 5] = [429, 403, 502, 503, 504];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatType {
    Bat,
    Pit,
}

impl StatType {
    pub fn as_str(self) -> &'static str {
        match self {
            StatType::Bat => "bat",
            StatType::Pit => "pit",
        }
    }
}

/// Situational split, sent upstream as the `month` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    All,
    VsLeft,
    VsRight,
}

impl Split {
    pub fn code(self) -> u8 {
        match self {
            Split::All => 0,
            Split::VsLeft => 13,
            Split::VsRight => 14,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LeadersQuery<'a> {
    pub season: u16,
    pub stats: StatType,
    pub split: Split,
    pub players: &'a [u32],
    pub page_items: u64,
    pub page_num: u32,
}

impl LeadersQuery<'_> {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let players = self
            .players
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        vec![
            ("ind", "0".to_string()),
            ("lg", "all".to_string()),
            ("pos", "all".to_string()),
            ("qual", "0".to_string()),
            ("season", self.season.to_string()),
            ("season1", self.season.to_string()),
            ("stats", self.stats.as_str().to_string()),
            ("month", self.split.code().to_string()),
            ("players", players),
            ("team", "0,ts".to_string()),
            ("rost", "0".to_string()),
            ("type", "8".to_string()),
            ("sortcol", "17".to_string()),
            ("sortdir", "default".to_string()),
            ("pageitems", self.page_items.to_string()),
            ("pagenum", self.page_num.to_string()),
            ("filter", String::new()),
        ]
    }
}

/// Outcome of a single upstream call, consumed by the retry loop.
#[derive(Debug)]
pub enum Attempt {
    Success(Value),
    Transient(anyhow::Error),
    Fatal(anyhow::Error),
}

pub fn classify(exchange: Result<HttpReply>) -> Attempt {
    let reply = match exchange {
        Ok(reply) => reply,
        Err(err) => return Attempt::Transient(err),
    };
    if TRANSIENT_STATUSES.contains(&reply.status) {
        return Attempt::Transient(anyhow!("http {}: {}", reply.status, snippet(&reply.body)));
    }
    if !(200..300).contains(&reply.status) {
        return Attempt::Fatal(anyhow!("http {}: {}", reply.status, snippet(&reply.body)));
    }
    match serde_json::from_str::<Value>(reply.body.trim()) {
        Ok(value) => Attempt::Success(value),
        Err(err) => Attempt::Transient(anyhow::Error::new(err).context("invalid leaders json")),
    }
}

fn snippet(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

pub trait Pause {
    fn pause(&self, duration: Duration);
}

impl<P: Pause + ?Sized> Pause for &P {
    fn pause(&self, duration: Duration) {
        (**self).pause(duration);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPause;

impl Pause for ThreadPause {
    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

pub struct LeadersClient<T, P = ThreadPause> {
    transport: T,
    pause: P,
    retry: RetryPolicy,
}

impl<T: Transport, P: Pause> LeadersClient<T, P> {
    pub fn new(transport: T, pause: P, retry: RetryPolicy) -> Self {
        Self {
            transport,
            pause,
            retry,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn pause(&self, duration: Duration) {
        self.pause.pause(duration);
    }

    /// GET with bounded retry. Transient failures back off and retry; fatal
    /// ones and exhausted attempts surface as errors.
    pub fn call(&self, params: &[(&str, String)]) -> Result<Value> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut last_err = None;
        for attempt in 1..=max_attempts {
            match classify(self.transport.get(params)) {
                Attempt::Success(value) => return Ok(value),
                Attempt::Fatal(err) => {
                    return Err(err.context(format!("leaders request failed on attempt {attempt}")));
                }
                Attempt::Transient(err) => {
                    log::warn!("leaders attempt {attempt}/{max_attempts} failed: {err:#}");
                    last_err = Some(err);
                    if attempt < max_attempts {
                        self.pause.pause(self.retry.delay_after(attempt));
                    }
                }
            }
        }
        let err = last_err.unwrap_or_else(|| anyhow!("no attempts made"));
        Err(err.context(format!("leaders request gave up after {max_attempts} attempts")))
    }

    pub fn fetch_rows(&self, query: &LeadersQuery<'_>) -> Result<Vec<Row>> {
        let payload = self
            .call(&query.params())
            .with_context(|| format!("fetch {} split {}", query.stats.as_str(), query.split.code()))?;
        Ok(extract_rows(&payload))
    }
}
