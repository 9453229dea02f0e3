//! Application services that sit beside the use cases.

pub mod auth_service;

pub use auth_service::AuthService;
