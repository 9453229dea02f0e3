//! Helper functions shared across layers.
//!
//! - [`code_generator`] - Random short code generation
//! - [`validation`] - Flattening `validator` reports into field/message maps

pub mod code_generator;
pub mod validation;
