// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! EcoSphere: gamified environmental tracking backend
//!
//! This crate provides the API for carbon-footprint and vitamin D logging,
//! notes and notifications, and the progress engine that turns those
//! activities into points and ranks.

pub mod config;
pub mod db;
pub mod error;
pub mod id_utils;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Db;
use services::ProgressEngine;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Db,
    pub progress: ProgressEngine,
}

impl AppState {
    /// Wire the progress engine to `db` according to `config`.
    pub fn new(config: Config, db: Db) -> Self {
        let progress = ProgressEngine::new(db.clone(), config.activity_locking);
        Self {
            config,
            db,
            progress,
        }
    }
}
