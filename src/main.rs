use anyhow::{Context, Result};

use fa_leaderboards::config::JobConfig;
use fa_leaderboards::http_client::ReqwestTransport;
use fa_leaderboards::job::{run_job, select_tasks};
use fa_leaderboards::leaders_api::{LeadersClient, ThreadPause};
use fa_leaderboards::segments::Segments;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let cfg = JobConfig::from_env_and_args()?;
    let log_level = if cfg.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let segments = match &cfg.segments_file {
        Some(path) => Segments::load(path)?,
        None => Segments::builtin(),
    };
    log::debug!("segments: {}", segments.names().collect::<Vec<_>>().join(", "));
    let tasks = select_tasks(&cfg.only)?;

    let transport = ReqwestTransport::new(&cfg.api_url, &cfg.referer, cfg.request_timeout)
        .context("unable to set up leaders transport")?;
    let client = LeadersClient::new(transport, ThreadPause, cfg.retry.clone());

    log::info!(
        "season {}: {} task(s) into {}",
        cfg.season,
        tasks.len(),
        cfg.out_dir.display()
    );
    let summary = run_job(&cfg, &segments, &client, &tasks)?;
    let elapsed = summary.finished_at - summary.started_at;
    log::info!(
        "done: {} rows across {} file(s), {} request(s) in {}s",
        summary.total_rows(),
        summary.tasks.len(),
        summary.total_requests(),
        elapsed.num_seconds()
    );
    Ok(())
}
