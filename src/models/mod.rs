//! Database models and the configuration model.

pub mod audit;
pub mod client;
pub mod comment;
pub mod config;
pub mod document;
pub mod history;
pub mod installment;
pub mod user;
