//! Rental Catalog - a catalog service for vacation rental listings
//!
//! Locations, properties and their images behind a searchable, paginated,
//! read-only JSON API, plus CLI commands for bulk CSV import and admin
//! maintenance.
//!
//! # Architecture
//! - `storage`: SeaORM data access (queries, mutations, converters)
//! - `services`: query engine, image resolver, CSV import
//! - `api`: HTTP handlers, serialization and middleware
//! - `interfaces`: CLI commands
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging setup

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
