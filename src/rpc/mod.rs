//! Remote command client for a running instance's control endpoint.
//!
//! This module provides types and traits for:
//! - Validating the endpoint address before any connection ([`TargetAddress`])
//! - Encoding requests and decoding replies ([`RpcRequest`], [`RpcResponse`])
//! - Abstracting the transport ([`HttpClient`]) with a reqwest implementation ([`ReqwestClient`])
//! - Forwarding a command and classifying the outcome ([`CommandClient`])
//!
//! # Wire Format
//!
//! `POST http://<ip>:<port>/daemon_command` with body
//! `{"command": ["print_height"]}`. The endpoint answers
//! `{"recognized": true, "output": "..."}`.

mod address;
mod client;
mod command;
mod error;
mod http;

#[cfg(test)]
mod client_tests;

pub use address::{COMMAND_PATH, TargetAddress};
pub use client::ReqwestClient;
pub use command::{CommandClient, CommandReply};
pub use error::{CommandError, HttpError, NetworkError};
pub use http::{HttpClient, JSON_CONTENT_TYPE, RpcRequest, RpcResponse};
