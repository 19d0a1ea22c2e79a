//! DTO modules that bridge services with the render step.

pub mod client;
pub mod main;
