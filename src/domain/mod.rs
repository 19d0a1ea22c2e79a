//! Domain aggregates exposed by the service layer.

pub mod audit;
pub mod client;
pub mod comment;
pub mod deadline;
pub mod document;
pub mod history;
pub mod installment;
pub mod types;
pub mod user;
