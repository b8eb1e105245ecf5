pub mod config;
pub mod fetch;
pub mod hitters;
pub mod http_client;
pub mod job;
pub mod leaders_api;
pub mod output;
pub mod rows;
pub mod segments;
