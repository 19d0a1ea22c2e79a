//! Client portfolio core for an accounting and tax-services office.
//!
//! The crate validates Brazilian taxpayer identifiers, runs the
//! search/filter/sort/paginate pipeline behind the client table and keeps the
//! dashboard state. Persistence goes through the [`repository`] traits.

pub mod db;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod pipeline;
pub mod repository;
pub mod schema;
pub mod services;
pub mod state;
pub mod tax_id;

mod error_conversions;
