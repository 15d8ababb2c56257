//! Domain logic for the device registry.
//!
//! Everything in this crate is free of HTTP and storage concerns: the
//! [`validation`] engine (rule catalog, matcher, field evaluator) and the
//! [`device`] model consumed by the API crate.

pub mod device;
pub mod error;
pub mod types;
pub mod validation;
