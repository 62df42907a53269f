//! Shared helpers for intake integration tests.

#![allow(dead_code)]

pub mod builders;
pub mod harness;
