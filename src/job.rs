use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};

use crate::config::JobConfig;
use crate::fetch::BatchFetcher;
use crate::hitters::normalize_hitter;
use crate::http_client::Transport;
use crate::leaders_api::{LeadersClient, Pause, Split, StatType};
use crate::output::save_rows;
use crate::segments::Segments;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub name: &'static str,
    pub segment: &'static str,
    pub stats: StatType,
    pub split: Split,
}

const fn task(name: &'static str, segment: &'static str, stats: StatType, split: Split) -> Task {
    Task {
        name,
        segment,
        stats,
        split,
    }
}

pub const DEFAULT_TASKS: [Task; 9] = [
    task("hit_bat_all", "hit", StatType::Bat, Split::All),
    task("hit_bat_lhp", "hit", StatType::Bat, Split::VsLeft),
    task("hit_bat_rhp", "hit", StatType::Bat, Split::VsRight),
    task("sp_pit_all", "sp", StatType::Pit, Split::All),
    task("sp_pit_lhb", "sp", StatType::Pit, Split::VsLeft),
    task("sp_pit_rhb", "sp", StatType::Pit, Split::VsRight),
    task("rp_pit_all", "rp", StatType::Pit, Split::All),
    task("rp_pit_lhb", "rp", StatType::Pit, Split::VsLeft),
    task("rp_pit_rhb", "rp", StatType::Pit, Split::VsRight),
];

#[derive(Debug, Clone)]
pub struct TaskReport {
    pub name: String,
    pub path: PathBuf,
    pub rows: usize,
    pub requests: usize,
}

#[derive(Debug, Clone)]
pub struct JobSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub tasks: Vec<TaskReport>,
}

impl JobSummary {
    pub fn total_rows(&self) -> usize {
        self.tasks.iter().map(|t| t.rows).sum()
    }

    pub fn total_requests(&self) -> usize {
        self.tasks.iter().map(|t| t.requests).sum()
    }
}

/// Default task list, optionally narrowed to the given names (in list order).
pub fn select_tasks(only: &[String]) -> Result<Vec<Task>> {
    if only.is_empty() {
        return Ok(DEFAULT_TASKS.to_vec());
    }
    if let Some(unknown) = only
        .iter()
        .find(|name| !DEFAULT_TASKS.iter().any(|t| t.name == name.as_str()))
    {
        return Err(anyhow!("unknown task {unknown:?}"));
    }
    Ok(DEFAULT_TASKS
        .iter()
        .filter(|t| only.iter().any(|name| name == t.name))
        .copied()
        .collect())
}

pub fn run_task<T: Transport, P: Pause>(
    cfg: &JobConfig,
    segments: &Segments,
    client: &LeadersClient<T, P>,
    task: &Task,
) -> Result<TaskReport> {
    let ids = segments.resolve(task.segment)?;
    let fetcher = BatchFetcher::new(client, cfg.season, cfg.batch_size, cfg.batch_pause);
    let mut rows = fetcher.fetch(task.stats, task.split, ids)?;
    if task.stats == StatType::Bat {
        rows = rows.iter().map(normalize_hitter).collect();
    }
    let path = save_rows(&cfg.out_dir, task.name, &rows)?;
    Ok(TaskReport {
        name: task.name.to_string(),
        path,
        rows: rows.len(),
        requests: fetcher.requests(),
    })
}

/// Runs tasks in order and stops at the first failure.
pub fn run_job<T: Transport, P: Pause>(
    cfg: &JobConfig,
    segments: &Segments,
    client: &LeadersClient<T, P>,
    tasks: &[Task],
) -> Result<JobSummary> {
    let started_at = Utc::now();
    let mut reports = Vec::with_capacity(tasks.len());
    for (idx, task) in tasks.iter().enumerate() {
        if idx > 0 {
            client.pause(cfg.task_pause);
        }
        let report = run_task(cfg, segments, client, task)
            .with_context(|| format!("task {} failed", task.name))?;
        println!("Saved {}: {} rows", report.name, report.rows);
        log::debug!(
            "{} -> {} ({} requests)",
            report.name,
            report.path.display(),
            report.requests
        );
        reports.push(report);
    }
    Ok(JobSummary {
        started_at,
        finished_at: Utc::now(),
        tasks: reports,
    })
}
