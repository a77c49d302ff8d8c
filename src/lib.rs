//! employee-directory - A small employee directory HTTP service
//!
//! This crate provides employee record CRUD with:
//! - A single JSON file as the authoritative record collection
//! - Photo uploads stored on local disk and served back over HTTP
//! - REST API with multipart create/update support

pub mod api;
pub mod config;
pub mod photos;
pub mod store;

use config::Config;
use photos::PhotoStore;
use store::EmployeeStore;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub employees: EmployeeStore,
    pub photos: PhotoStore,
}
