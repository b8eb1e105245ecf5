use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};

pub const DEFAULT_API_URL: &str = "https://www.fangraphs.com/api/leaders/major-league/data";
pub const DEFAULT_REFERER: &str = "https://www.fangraphs.com/leaders/major-league";
pub const DEFAULT_OUT_DIR: &str = "data/fa";
pub const DEFAULT_SEASON: u16 = 2025;
pub const DEFAULT_BATCH_SIZE: usize = 40;

const DEFAULT_BATCH_PAUSE_MS: u64 = 700;
const DEFAULT_TASK_PAUSE_MS: u64 = 1200;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Bounded exponential backoff for upstream calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub multiplier: f64,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 6,
            initial_delay: Duration::from_secs(2),
            multiplier: 1.8,
            max_delay: Duration::from_secs(20),
        }
    }
}

impl RetryPolicy {
    /// Wait applied after the given failed attempt (1-based) before the next one.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let cap = self.max_delay.as_secs_f64() * 1000.0;
        let mut delay_ms = (self.initial_delay.as_secs_f64() * 1000.0).min(cap);
        for _ in 1..attempt.max(1) {
            delay_ms = (delay_ms * self.multiplier).min(cap);
        }
        Duration::from_millis(delay_ms.round() as u64)
    }
}

#[derive(Debug, Clone)]
pub struct JobConfig {
    pub api_url: String,
    pub referer: String,
    pub out_dir: PathBuf,
    pub season: u16,
    pub batch_size: usize,
    pub batch_pause: Duration,
    pub task_pause: Duration,
    pub request_timeout: Duration,
    pub retry: RetryPolicy,
    pub segments_file: Option<PathBuf>,
    // Empty means every task.
    pub only: Vec<String>,
    pub verbose: bool,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            season: DEFAULT_SEASON,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_pause: Duration::from_millis(DEFAULT_BATCH_PAUSE_MS),
            task_pause: Duration::from_millis(DEFAULT_TASK_PAUSE_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            segments_file: None,
            only: Vec::new(),
            verbose: false,
        }
    }
}

impl JobConfig {
    /// Defaults, then process environment, then command line arguments.
    pub fn from_env_and_args() -> Result<Self> {
        let args = std::env::args().skip(1).collect::<Vec<_>>();
        Self::resolve(|key| std::env::var(key).ok(), &args)
    }

    pub fn resolve<F>(env: F, args: &[String]) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(url) = lookup("FA_API_URL") {
            cfg.api_url = url.trim().to_string();
        }
        if let Some(dir) = lookup("FA_OUT_DIR") {
            cfg.out_dir = PathBuf::from(dir.trim());
        }
        if let Some(raw) = lookup("FA_SEASON") {
            cfg.season = parse_num("FA_SEASON", &raw)?;
        }
        if let Some(raw) = lookup("FA_BATCH_SIZE") {
            cfg.batch_size = parse_num("FA_BATCH_SIZE", &raw)?;
        }
        if let Some(raw) = lookup("FA_BATCH_PAUSE_MS") {
            cfg.batch_pause = Duration::from_millis(parse_num("FA_BATCH_PAUSE_MS", &raw)?);
        }
        if let Some(raw) = lookup("FA_TASK_PAUSE_MS") {
            cfg.task_pause = Duration::from_millis(parse_num("FA_TASK_PAUSE_MS", &raw)?);
        }
        if let Some(raw) = lookup("FA_REQUEST_TIMEOUT_SECS") {
            cfg.request_timeout =
                Duration::from_secs(parse_num("FA_REQUEST_TIMEOUT_SECS", &raw)?);
        }
        if let Some(path) = lookup("FA_SEGMENTS_FILE") {
            cfg.segments_file = Some(PathBuf::from(path.trim()));
        }

        if let Some(dir) = arg_value(args, "--out") {
            cfg.out_dir = PathBuf::from(dir);
        }
        if let Some(raw) = arg_value(args, "--season") {
            cfg.season = parse_num("--season", &raw)?;
        }
        if let Some(raw) = arg_value(args, "--batch-size") {
            cfg.batch_size = parse_num("--batch-size", &raw)?;
        }
        if let Some(path) = arg_value(args, "--segments") {
            cfg.segments_file = Some(PathBuf::from(path));
        }
        if let Some(raw) = arg_value(args, "--only") {
            cfg.only = raw
                .split([',', ' '])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }
        cfg.verbose = args.iter().any(|a| a == "--verbose" || a == "-v");

        if cfg.batch_size == 0 {
            return Err(anyhow!("batch size must be at least 1"));
        }
        Ok(cfg)
    }
}

fn parse_num<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("invalid value for {name}: {raw:?}"))
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(next.trim().to_string());
            }
        }
    }
    None
}
