use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, REFERER, USER_AGENT};

const BOT_USER_AGENT: &str = "Mozilla/5.0 (CBL dashboard bot)";
const ACCEPT_JSON: &str = "application/json,text/plain,*/*";

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Process-wide client. The timeout of the first caller sticks.
pub fn http_client(timeout: Duration) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")
    })
}

/// Status and body of one completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// One GET against a fixed endpoint. `Err` means the exchange itself failed
/// (connect, timeout, body read), not a non-2xx status.
pub trait Transport {
    fn get(&self, params: &[(&str, String)]) -> Result<HttpReply>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, params: &[(&str, String)]) -> Result<HttpReply> {
        (**self).get(params)
    }
}

pub struct ReqwestTransport {
    client: &'static Client,
    url: String,
    referer: String,
}

impl ReqwestTransport {
    pub fn new(url: &str, referer: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            url: url.to_string(),
            referer: referer.to_string(),
        })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, params: &[(&str, String)]) -> Result<HttpReply> {
        let resp = self
            .client
            .get(&self.url)
            .query(params)
            .header(USER_AGENT, BOT_USER_AGENT)
            .header(ACCEPT, ACCEPT_JSON)
            .header(REFERER, &self.referer)
            .send()
            .context("request failed")?;
        let status = resp.status().as_u16();
        let body = resp.text().context("failed reading body")?;
        Ok(HttpReply { status, body })
    }
}
