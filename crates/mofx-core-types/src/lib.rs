//! Core types shared across mofx facilities
//!
//! This crate holds the canonical schema constants used by both the error
//! and logging facilities, so field names stay identical wherever an event
//! is emitted or asserted on.

pub mod schema;
