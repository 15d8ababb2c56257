//! Request middleware.
//!
//! - [`validation::validate_device_payload`] -- Enforces the rule catalog on
//!   device create/update bodies.

pub mod validation;
