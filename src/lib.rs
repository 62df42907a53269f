//! # Intake - validated web form intake
//!
//! Intake serves an HTML form, validates what comes back against per-field
//! and cross-field rules, and stores accepted submissions in one flat SQLite
//! table per form profile.
//!
//! ## Profiles
//!
//! - **rich**: a multi-party exception request with environments, affected
//!   hosts, RCA categories and a milestone plan.
//! - **minimal**: name and email.
//!
//! Both run through the same validation engine; a profile only selects the
//! schema and the default policies.
//!
//! ## Modules
//!
//! - [`form`] - URL-encoded multimap with list fields
//! - [`validation`] - field predicates, list checks and the engine
//! - [`repository`] - submission storage (SQLite and in-memory)
//! - [`server`] - axum routes and the submission pipeline
//! - [`config`] - markdown/YAML configuration
//!
//! ## Example
//!
//! ```no_run
//! use intake::form::FormData;
//! use intake::profile::Profile;
//! use intake::validation::validate_submission;
//!
//! let form = FormData::parse(b"name=Jane&email=jane%40example.com");
//! let rules = Profile::Minimal.default_rules();
//! match validate_submission(Profile::Minimal, &rules, &form) {
//!     Ok(submission) => println!("valid: {}", submission.summary()),
//!     Err(errors) => println!("rejected: {}", errors),
//! }
//! ```

pub mod config;
pub mod flash;
pub mod form;
pub mod profile;
pub mod render;
pub mod repository;
pub mod server;
pub mod state_machine;
pub mod submission;
pub mod validation;

/// Default path constants for the `.intake` directory.
pub mod paths {
    /// Working directory for config and data: `.intake`
    pub const INTAKE_DIR: &str = ".intake";
    /// Config file: `.intake/config.md`
    pub const CONFIG_FILE: &str = ".intake/config.md";
}

/// Generate a UTC timestamp in ISO 8601 format: `YYYY-MM-DDTHH:MM:SSZ`
pub fn utc_now_iso() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
