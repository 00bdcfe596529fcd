//! Service layer for business logic
//!
//! This module provides unified business logic that can be shared between
//! different interfaces (HTTP API, CLI).

mod catalog_service;
mod image_resolver;
mod import_service;

pub use catalog_service::*;
pub use image_resolver::ImageResolver;
pub use import_service::*;
