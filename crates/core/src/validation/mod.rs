//! Device payload validation engine.
//!
//! Rule groups are loaded once into a [`catalog::RuleCatalog`], selected per
//! payload by [`matcher`], and applied field by field by [`evaluator`]. The
//! [`payload`] module ties the three together for a raw request body. No HTTP
//! types appear here. Shared value-to-text helpers live in [`text`].

pub mod catalog;
pub mod evaluator;
pub mod matcher;
pub mod payload;
pub mod rules;
pub mod text;
