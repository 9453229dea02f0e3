//! Application layer orchestrating the link workflows.
//!
//! This layer coordinates repository calls, entity state changes and
//! business rules. It never touches HTTP or request DTOs; handlers translate
//! requests into use case inputs and map [`crate::error::AppError`] back out.
//!
//! # Contents
//!
//! - [`use_cases`] - Shorten, redirect, list, update and delete workflows
//! - [`dto`] - The [`dto::LinkOutput`] shape every use case returns
//! - [`services::auth_service::AuthService`] - Bearer identity tokens

pub mod dto;
pub mod services;
pub mod use_cases;
