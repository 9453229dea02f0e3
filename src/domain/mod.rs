//! Domain layer containing business entities and rules.
//!
//! This module implements the core domain logic following Clean Architecture principles.
//! It defines entities, their validation rules and repository interfaces,
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`validators`] - Field rules checked before every entity state change
//! - [`repositories`] - Data access trait definitions and the search contract
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Workflows are orchestrated by use cases (see [`crate::application::use_cases`])

pub mod entities;
pub mod repositories;
pub mod validators;
