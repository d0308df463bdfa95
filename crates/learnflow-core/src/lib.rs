//! Request orchestration for the relay.
//!
//! This crate owns the per-request state machine: rate-limit check, admin
//! command dispatch, the chat pipeline (extract, search, compose, generate),
//! and the fallback policy. Recoverable failures never escape the
//! orchestrator; every chat path ends in an assistant message.

mod admin;
mod orchestrator;
mod rate_limit;

pub use admin::{AdminAuthorizer, AdminCommand, AllowListAuthorizer, parse_command};
pub use orchestrator::{ChatOrchestrator, RelayOutcome, RelayServices};
pub use rate_limit::{Decision, RateLimiter};
