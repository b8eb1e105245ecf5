#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};

use fa_leaderboards::http_client::{HttpReply, Transport};
use fa_leaderboards::leaders_api::Pause;

pub fn reply(status: u16, body: &str) -> Result<HttpReply> {
    Ok(HttpReply {
        status,
        body: body.to_string(),
    })
}

pub fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, v)| v.as_str())
}

/// Replays canned replies in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<HttpReply>>>,
    pub calls: RefCell<Vec<Vec<(String, String)>>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<HttpReply>>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, params: &[(&str, String)]) -> Result<HttpReply> {
        self.calls.borrow_mut().push(owned(params));
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("script exhausted")))
    }
}

/// Answers each request by calling `respond` with the query parameters.
pub struct FnTransport<F> {
    respond: F,
    pub calls: RefCell<Vec<Vec<(String, String)>>>,
}

impl<F> FnTransport<F>
where
    F: Fn(&[(String, String)]) -> Result<HttpReply>,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl<F> Transport for FnTransport<F>
where
    F: Fn(&[(String, String)]) -> Result<HttpReply>,
{
    fn get(&self, params: &[(&str, String)]) -> Result<HttpReply> {
        let params = owned(params);
        self.calls.borrow_mut().push(params.clone());
        (self.respond)(&params)
    }
}

#[derive(Default)]
pub struct RecordingPause {
    pub waits: RefCell<Vec<Duration>>,
}

impl Pause for RecordingPause {
    fn pause(&self, duration: Duration) {
        self.waits.borrow_mut().push(duration);
    }
}

pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "fa_leaderboards_{}_{}",
        std::process::id(),
        name
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn owned(params: &[(&str, String)]) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}
