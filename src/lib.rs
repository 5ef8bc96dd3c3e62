//! CLI Bridge - run external command-line programs and turn their output
//! into structured data.
//!
//! The pipeline: [`executor::Executor`] spawns the program with a timeout
//! and returns ANSI-free output, [`output::parse`] detects and parses the
//! output format, and [`classify::classify`] maps failures onto an error
//! taxonomy with remediation hints.

pub mod ansi;
pub mod classify;
pub mod commands;
pub mod config;
pub mod display;
pub mod executor;
pub mod output;
