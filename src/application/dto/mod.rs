//! Use case output shapes.

pub mod link_output;

pub use link_output::LinkOutput;
