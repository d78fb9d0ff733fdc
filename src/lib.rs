//! coind: bootstrap orchestrator for the coin node daemon
//!
//! Turns an invocation into exactly one execution mode: print help or
//! system information, forward a command to a running instance, or start
//! the node in the foreground, in the background, or as a service.

pub mod bootstrap;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod lifecycle;
pub mod logging;
pub mod node;
pub mod rpc;
pub mod system;
