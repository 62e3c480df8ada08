//! PhishGuard - AI-powered phishing and scam scanner
//!
//! This library provides the core functionality of the PhishGuard CLI tool:
//! scan input normalization, the analysis backend client, conversation state
//! for the follow-up assistant and the session state machine that drives the
//! interactive mode.

pub mod analysis;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod global;
pub mod input;
pub mod report;
pub mod session;
