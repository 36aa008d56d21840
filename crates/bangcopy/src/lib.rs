//! # bangcopy
//!
//! Core library for the bang file copier.
//!
//! Files in a source folder whose names start with one to three `!` marks
//! are matched, renamed to `<folder name> <name without marks>`, and copied
//! into every configured destination directory. A timestamped log records
//! what happened to each copy.
//!
//! The pipeline runs in one direction:
//! scan → [`matcher`] → [`pipeline::Planner`] → [`pipeline::Executor`] → summary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod matcher;
pub mod paths;
pub mod pipeline;
pub mod run_log;
pub mod scanner;
pub mod source;

pub use error::{BangError, ConfigError, Result};
pub use matcher::{MatchedFile, Matcher};
pub use pipeline::{ExitStatus, OperationResult, OperationStatus, RunSummary};
pub use source::SourceContext;
