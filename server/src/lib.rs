//! HTTP surface for the meeting-notes assistant.

pub mod config;
pub mod http_server;
