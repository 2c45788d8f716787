// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Data models for the application.

pub mod activity;
pub mod article;
pub mod carbon;
pub mod note;
pub mod notification;
pub mod sensor;
pub mod user;
pub mod vitamin;

pub use activity::ActivityEvent;
pub use article::{Article, Comment, Reply};
pub use carbon::CarbonLog;
pub use note::Note;
pub use notification::Notification;
pub use sensor::SensorReading;
pub use user::User;
pub use vitamin::VitaminRecord;
