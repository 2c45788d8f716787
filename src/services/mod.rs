// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Services module - business logic layer.

pub mod progress;
pub mod vitamin;

pub use progress::{ActivityOutcome, ProgressEngine};
