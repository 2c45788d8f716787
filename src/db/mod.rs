// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Database layer.
//!
//! `Db` is a cheap-to-clone handle over either Firestore or the in-memory
//! tables. Handlers and the progress engine only ever see `Db`.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use crate::config::{Config, StorageBackend};
use crate::error::AppError;
use crate::models::{
    ActivityEvent, Article, CarbonLog, Comment, Note, Notification, Reply, SensorReading, User,
    VitaminRecord,
};
use std::sync::Arc;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ACTIVITIES: &str = "activities";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const CARBON_LOGS: &str = "carbon_logs";
    pub const VITAMIN_RECORDS: &str = "vitamin_records";
    pub const NOTES: &str = "notes";
    pub const ARTICLES: &str = "articles";
    pub const COMMENTS: &str = "comments";
    pub const REPLIES: &str = "replies";
    pub const SENSOR_READINGS: &str = "sensor_readings";
}

/// State read before deciding how an activity affects progress.
#[derive(Debug, Clone)]
pub struct ActivitySnapshot {
    /// The user, if the ID resolves to an account
    pub user: Option<User>,
    /// Events of the same kind already stored for the same user and day
    pub prior_same_day: usize,
}

/// New progress and rank for one user. Commits write these two fields only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub user_id: u64,
    pub progress: u32,
    pub rank: u32,
}

/// All writes caused by one recorded activity.
///
/// Committed as a single unit: either every record lands or none does.
#[derive(Debug, Clone)]
pub struct ActivityUnitOfWork {
    pub event: ActivityEvent,
    /// Present only when points were awarded
    pub progress: Option<ProgressUpdate>,
    /// Rank-up announcement, present only on promotion
    pub notification: Option<Notification>,
}

impl ActivityUnitOfWork {
    /// Keep the event row but drop the award.
    ///
    /// Used at commit time when the user row has disappeared since the snapshot.
    pub fn without_award(mut self) -> Self {
        self.event.points_awarded = 0;
        self.progress = None;
        self.notification = None;
        self
    }
}

/// Profile fields a user may edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.avatar.is_none()
    }

    /// Apply to a loaded user. Progress and rank are never touched.
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(email) = &self.email {
            user.email = Some(email.clone());
        }
        if let Some(avatar) = &self.avatar {
            user.avatar = Some(avatar.clone());
        }
    }

    /// Document field paths this change writes.
    pub fn field_paths(&self) -> Vec<&'static str> {
        let mut paths = Vec::with_capacity(3);
        if self.name.is_some() {
            paths.push("name");
        }
        if self.email.is_some() {
            paths.push("email");
        }
        if self.avatar.is_some() {
            paths.push("avatar");
        }
        paths
    }
}

#[derive(Clone)]
enum Backend {
    Firestore(FirestoreDb),
    Memory(Arc<MemoryStore>),
}

/// Database handle shared by all request handlers.
#[derive(Clone)]
pub struct Db {
    backend: Backend,
}

/// Forward a call to whichever backend is active.
macro_rules! dispatch {
    ($self:ident . $method:ident ( $($arg:expr),* )) => {
        match &$self.backend {
            Backend::Firestore(db) => db.$method($($arg),*).await,
            Backend::Memory(store) => store.$method($($arg),*),
        }
    };
}

impl Db {
    /// Connect to the backend selected in `config`.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        match config.storage {
            StorageBackend::Firestore => Ok(Self {
                backend: Backend::Firestore(FirestoreDb::new(&config.gcp_project_id).await?),
            }),
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; data will not survive a restart");
                Ok(Self::new_in_memory())
            }
        }
    }

    /// Handle over a fresh, empty in-memory store.
    pub fn new_in_memory() -> Self {
        Self::from_memory(Arc::new(MemoryStore::default()))
    }

    /// Handle over an existing in-memory store (tests keep the `Arc` to inspect it).
    pub fn from_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            backend: Backend::Memory(store),
        }
    }

    /// Handle over a Firestore client.
    pub fn from_firestore(db: FirestoreDb) -> Self {
        Self {
            backend: Backend::Firestore(db),
        }
    }

    // ─── User Operations ─────────────────────────────────────────

    pub async fn get_user(&self, user_id: u64) -> Result<Option<User>, AppError> {
        dispatch!(self.get_user(user_id))
    }

    /// Create or replace a whole user document. Only account creation uses this.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        dispatch!(self.upsert_user(user))
    }

    /// Write only the changed profile fields. Returns the updated user, or
    /// `None` if the account no longer exists.
    pub async fn update_profile(
        &self,
        user_id: u64,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, AppError> {
        dispatch!(self.update_profile(user_id, changes))
    }

    /// Users ordered by rank, then progress, highest first.
    pub async fn top_users(&self, limit: u32) -> Result<Vec<User>, AppError> {
        dispatch!(self.top_users(limit))
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Read the user and count same-day events of `kind`.
    pub async fn load_activity_snapshot(
        &self,
        user_id: u64,
        kind: &str,
        day: &str,
    ) -> Result<ActivitySnapshot, AppError> {
        match &self.backend {
            Backend::Firestore(db) => db.load_activity_snapshot(user_id, kind, day).await,
            Backend::Memory(store) => {
                let snapshot = store.load_activity_snapshot(user_id, kind, day)?;
                if let Some(barrier) = store.read_barrier() {
                    barrier.wait().await;
                }
                Ok(snapshot)
            }
        }
    }

    /// Commit an activity's event, progress update and notification atomically.
    ///
    /// Returns the unit of work as written: if the user row is gone by commit
    /// time the award is dropped and only the event is stored.
    pub async fn commit_activity(
        &self,
        work: ActivityUnitOfWork,
    ) -> Result<ActivityUnitOfWork, AppError> {
        dispatch!(self.commit_activity(work))
    }

    /// One page of a user's history (newest first) plus the total event count.
    pub async fn get_activity_page(
        &self,
        user_id: u64,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<ActivityEvent>, usize), AppError> {
        dispatch!(self.get_activity_page(user_id, limit, offset))
    }

    /// Events recorded at or after `since` (RFC3339).
    pub async fn get_activities_since(
        &self,
        user_id: u64,
        since: &str,
    ) -> Result<Vec<ActivityEvent>, AppError> {
        dispatch!(self.get_activities_since(user_id, since))
    }

    // ─── Notification Operations ─────────────────────────────────

    pub async fn get_notifications(
        &self,
        user_id: u64,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError> {
        dispatch!(self.get_notifications(user_id, unread_only))
    }

    /// Returns `false` if the notification does not exist or belongs to someone else.
    pub async fn mark_notification_read(
        &self,
        user_id: u64,
        notification_id: &str,
    ) -> Result<bool, AppError> {
        dispatch!(self.mark_notification_read(user_id, notification_id))
    }

    /// Returns the number of notifications changed.
    pub async fn mark_all_notifications_read(&self, user_id: u64) -> Result<usize, AppError> {
        dispatch!(self.mark_all_notifications_read(user_id))
    }

    // ─── Carbon / Vitamin Logs ───────────────────────────────────

    pub async fn add_carbon_log(&self, log: &CarbonLog) -> Result<(), AppError> {
        dispatch!(self.add_carbon_log(log))
    }

    pub async fn get_carbon_logs(&self, user_id: u64) -> Result<Vec<CarbonLog>, AppError> {
        dispatch!(self.get_carbon_logs(user_id))
    }

    pub async fn add_vitamin_record(&self, record: &VitaminRecord) -> Result<(), AppError> {
        dispatch!(self.add_vitamin_record(record))
    }

    pub async fn get_vitamin_records(&self, user_id: u64) -> Result<Vec<VitaminRecord>, AppError> {
        dispatch!(self.get_vitamin_records(user_id))
    }

    // ─── Sensor Readings ─────────────────────────────────────────

    pub async fn add_sensor_reading(&self, reading: &SensorReading) -> Result<(), AppError> {
        dispatch!(self.add_sensor_reading(reading))
    }

    pub async fn latest_sensor_reading(
        &self,
        user_id: u64,
    ) -> Result<Option<SensorReading>, AppError> {
        dispatch!(self.latest_sensor_reading(user_id))
    }

    // ─── Note Operations ─────────────────────────────────────────

    /// Create or replace a note.
    pub async fn set_note(&self, note: &Note) -> Result<(), AppError> {
        dispatch!(self.set_note(note))
    }

    /// Get a note, only if `user_id` owns it.
    pub async fn get_note(&self, user_id: u64, note_id: &str) -> Result<Option<Note>, AppError> {
        dispatch!(self.get_note(user_id, note_id))
    }

    pub async fn get_notes(&self, user_id: u64) -> Result<Vec<Note>, AppError> {
        dispatch!(self.get_notes(user_id))
    }

    /// Returns `false` if no note owned by `user_id` had that ID.
    pub async fn delete_note(&self, user_id: u64, note_id: &str) -> Result<bool, AppError> {
        dispatch!(self.delete_note(user_id, note_id))
    }

    // ─── Articles ────────────────────────────────────────────────

    /// Create or replace an article.
    pub async fn set_article(&self, article: &Article) -> Result<(), AppError> {
        dispatch!(self.set_article(article))
    }

    pub async fn get_article(&self, article_id: &str) -> Result<Option<Article>, AppError> {
        dispatch!(self.get_article(article_id))
    }

    /// Every article, newest first.
    pub async fn get_articles(&self) -> Result<Vec<Article>, AppError> {
        dispatch!(self.get_articles())
    }

    pub async fn get_user_articles(&self, user_id: u64) -> Result<Vec<Article>, AppError> {
        dispatch!(self.get_user_articles(user_id))
    }

    /// Delete an article owned by `user_id` together with its comments and
    /// their replies. Returns `false` if no such article exists for that user.
    pub async fn delete_article(&self, user_id: u64, article_id: &str) -> Result<bool, AppError> {
        dispatch!(self.delete_article(user_id, article_id))
    }

    // ─── Comments ────────────────────────────────────────────────

    /// Store a comment and, if given, the author notification in one write.
    pub async fn add_comment(
        &self,
        comment: &Comment,
        notification: Option<&Notification>,
    ) -> Result<(), AppError> {
        dispatch!(self.add_comment(comment, notification))
    }

    pub async fn get_comment(&self, comment_id: &str) -> Result<Option<Comment>, AppError> {
        dispatch!(self.get_comment(comment_id))
    }

    /// Comments on an article, newest first.
    pub async fn get_comments(&self, article_id: &str) -> Result<Vec<Comment>, AppError> {
        dispatch!(self.get_comments(article_id))
    }

    /// Delete a comment and its replies. Ownership is checked by the caller.
    pub async fn delete_comment(&self, comment_id: &str) -> Result<(), AppError> {
        dispatch!(self.delete_comment(comment_id))
    }

    /// Store a reply and, if given, the comment-author notification in one write.
    pub async fn add_reply(
        &self,
        reply: &Reply,
        notification: Option<&Notification>,
    ) -> Result<(), AppError> {
        dispatch!(self.add_reply(reply, notification))
    }

    pub async fn get_reply(&self, reply_id: &str) -> Result<Option<Reply>, AppError> {
        dispatch!(self.get_reply(reply_id))
    }

    /// Replies to a comment, oldest first.
    pub async fn get_replies(&self, comment_id: &str) -> Result<Vec<Reply>, AppError> {
        dispatch!(self.get_replies(comment_id))
    }

    pub async fn delete_reply(&self, reply_id: &str) -> Result<(), AppError> {
        dispatch!(self.delete_reply(reply_id))
    }

    // ─── Account Deletion ────────────────────────────────────────

    /// Delete a user and everything they own. Returns the number of records removed.
    pub async fn delete_user_data(&self, user_id: u64) -> Result<usize, AppError> {
        dispatch!(self.delete_user_data(user_id))
    }
}
