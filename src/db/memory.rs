// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! In-memory tables for local development and tests.
//!
//! All tables sit behind one mutex, so a unit of work applied under a single
//! lock is atomic with respect to every other operation.

use crate::db::{ActivitySnapshot, ActivityUnitOfWork, ProfileChanges};
use crate::error::AppError;
use crate::models::{
    ActivityEvent, Article, CarbonLog, Comment, Note, Notification, Reply, SensorReading, User,
    VitaminRecord,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Barrier;

#[derive(Default)]
struct Tables {
    users: HashMap<u64, User>,
    activities: Vec<ActivityEvent>,
    notifications: Vec<Notification>,
    carbon_logs: Vec<CarbonLog>,
    vitamin_records: Vec<VitaminRecord>,
    sensor_readings: Vec<SensorReading>,
    notes: Vec<Note>,
    articles: Vec<Article>,
    comments: Vec<Comment>,
    replies: Vec<Reply>,
}

/// Process-local storage backend.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_commits: AtomicBool,
    read_barrier: Mutex<Option<Arc<Barrier>>>,
}

/// Newest first. Ties keep reverse insertion order.
fn newest_first<T: Clone>(items: impl Iterator<Item = T>, key: impl Fn(&T) -> &str) -> Vec<T> {
    let mut out: Vec<T> = items.collect();
    out.reverse();
    out.sort_by(|a, b| key(b).cmp(key(a)));
    out
}

/// Drop rows matching `remove`, returning how many went.
fn remove_where<T>(rows: &mut Vec<T>, mut remove: impl FnMut(&T) -> bool) -> usize {
    let before = rows.len();
    rows.retain(|r| !remove(r));
    before - rows.len()
}

impl MemoryStore {
    fn tables(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        self.tables
            .lock()
            .map_err(|_| AppError::Database("In-memory store lock poisoned".to_string()))
    }

    /// Make every following activity commit fail until reset.
    ///
    /// Simulates a persistence outage; no part of a failed unit of work is applied.
    pub fn set_fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }

    /// Hold every activity snapshot read at `barrier` before it is returned.
    ///
    /// With a barrier of N, N concurrent recordings all finish reading before
    /// any of them commits.
    pub fn set_read_barrier(&self, barrier: Option<Arc<Barrier>>) {
        if let Ok(mut slot) = self.read_barrier.lock() {
            *slot = barrier;
        }
    }

    pub(crate) fn read_barrier(&self) -> Option<Arc<Barrier>> {
        self.read_barrier.lock().ok().and_then(|slot| slot.clone())
    }

    // ─── Users ───────────────────────────────────────────────────

    pub fn get_user(&self, user_id: u64) -> Result<Option<User>, AppError> {
        Ok(self.tables()?.users.get(&user_id).cloned())
    }

    pub fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.tables()?.users.insert(user.id, user.clone());
        Ok(())
    }

    pub fn update_profile(
        &self,
        user_id: u64,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, AppError> {
        let mut tables = self.tables()?;
        Ok(tables.users.get_mut(&user_id).map(|user| {
            changes.apply(user);
            user.clone()
        }))
    }

    pub fn top_users(&self, limit: u32) -> Result<Vec<User>, AppError> {
        let mut users: Vec<User> = self.tables()?.users.values().cloned().collect();
        users.sort_by(|a, b| {
            b.rank
                .cmp(&a.rank)
                .then_with(|| b.progress.cmp(&a.progress))
                .then_with(|| a.id.cmp(&b.id))
        });
        users.truncate(limit as usize);
        Ok(users)
    }

    // ─── Activities ──────────────────────────────────────────────

    pub fn load_activity_snapshot(
        &self,
        user_id: u64,
        kind: &str,
        day: &str,
    ) -> Result<ActivitySnapshot, AppError> {
        let tables = self.tables()?;
        let prior_same_day = tables
            .activities
            .iter()
            .filter(|a| a.user_id == user_id && a.kind == kind && a.day == day)
            .count();

        Ok(ActivitySnapshot {
            user: tables.users.get(&user_id).cloned(),
            prior_same_day,
        })
    }

    pub fn commit_activity(
        &self,
        work: ActivityUnitOfWork,
    ) -> Result<ActivityUnitOfWork, AppError> {
        let mut tables = self.tables()?;

        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(AppError::Database(
                "Transaction commit failed: injected failure".to_string(),
            ));
        }

        let user_present = work
            .progress
            .map_or(true, |update| tables.users.contains_key(&update.user_id));
        let work = if user_present {
            work
        } else {
            tracing::warn!(
                user_id = work.event.user_id,
                "User deleted before commit, dropping award"
            );
            work.without_award()
        };

        if let Some(update) = work.progress {
            if let Some(user) = tables.users.get_mut(&update.user_id) {
                user.progress = update.progress;
                user.rank = update.rank;
            }
        }
        tables.activities.push(work.event.clone());
        if let Some(notification) = &work.notification {
            tables.notifications.push(notification.clone());
        }
        Ok(work)
    }

    pub fn get_activity_page(
        &self,
        user_id: u64,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<ActivityEvent>, usize), AppError> {
        let tables = self.tables()?;
        let all = newest_first(
            tables
                .activities
                .iter()
                .filter(|a| a.user_id == user_id)
                .cloned(),
            |a| a.recorded_at.as_str(),
        );
        let total = all.len();
        let page = all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    pub fn get_activities_since(
        &self,
        user_id: u64,
        since: &str,
    ) -> Result<Vec<ActivityEvent>, AppError> {
        let tables = self.tables()?;
        Ok(newest_first(
            tables
                .activities
                .iter()
                .filter(|a| a.user_id == user_id && a.recorded_at.as_str() >= since)
                .cloned(),
            |a| a.recorded_at.as_str(),
        ))
    }

    // ─── Notifications ───────────────────────────────────────────

    pub fn get_notifications(
        &self,
        user_id: u64,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError> {
        let tables = self.tables()?;
        Ok(newest_first(
            tables
                .notifications
                .iter()
                .filter(|n| n.user_id == user_id && (!unread_only || !n.is_read))
                .cloned(),
            |n| n.created_at.as_str(),
        ))
    }

    pub fn mark_notification_read(
        &self,
        user_id: u64,
        notification_id: &str,
    ) -> Result<bool, AppError> {
        let mut tables = self.tables()?;
        match tables
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id && n.user_id == user_id)
        {
            Some(notification) => {
                notification.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn mark_all_notifications_read(&self, user_id: u64) -> Result<usize, AppError> {
        let mut tables = self.tables()?;
        let mut updated = 0;
        for notification in tables
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            notification.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }

    // ─── Logs ────────────────────────────────────────────────────

    pub fn add_carbon_log(&self, log: &CarbonLog) -> Result<(), AppError> {
        self.tables()?.carbon_logs.push(log.clone());
        Ok(())
    }

    pub fn get_carbon_logs(&self, user_id: u64) -> Result<Vec<CarbonLog>, AppError> {
        let tables = self.tables()?;
        Ok(newest_first(
            tables
                .carbon_logs
                .iter()
                .filter(|l| l.user_id == user_id)
                .cloned(),
            |l| l.logged_at.as_str(),
        ))
    }

    pub fn add_vitamin_record(&self, record: &VitaminRecord) -> Result<(), AppError> {
        self.tables()?.vitamin_records.push(record.clone());
        Ok(())
    }

    pub fn get_vitamin_records(&self, user_id: u64) -> Result<Vec<VitaminRecord>, AppError> {
        let tables = self.tables()?;
        Ok(newest_first(
            tables
                .vitamin_records
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned(),
            |r| r.created_at.as_str(),
        ))
    }

    pub fn add_sensor_reading(&self, reading: &SensorReading) -> Result<(), AppError> {
        self.tables()?.sensor_readings.push(reading.clone());
        Ok(())
    }

    pub fn latest_sensor_reading(&self, user_id: u64) -> Result<Option<SensorReading>, AppError> {
        let tables = self.tables()?;
        Ok(newest_first(
            tables
                .sensor_readings
                .iter()
                .filter(|r| r.user_id == user_id)
                .cloned(),
            |r| r.recorded_at.as_str(),
        )
        .into_iter()
        .next())
    }

    // ─── Notes ───────────────────────────────────────────────────

    pub fn set_note(&self, note: &Note) -> Result<(), AppError> {
        let mut tables = self.tables()?;
        match tables.notes.iter_mut().find(|n| n.id == note.id) {
            Some(existing) => *existing = note.clone(),
            None => tables.notes.push(note.clone()),
        }
        Ok(())
    }

    pub fn get_note(&self, user_id: u64, note_id: &str) -> Result<Option<Note>, AppError> {
        Ok(self
            .tables()?
            .notes
            .iter()
            .find(|n| n.id == note_id && n.user_id == user_id)
            .cloned())
    }

    pub fn get_notes(&self, user_id: u64) -> Result<Vec<Note>, AppError> {
        let tables = self.tables()?;
        Ok(newest_first(
            tables.notes.iter().filter(|n| n.user_id == user_id).cloned(),
            |n| n.created_at.as_str(),
        ))
    }

    pub fn delete_note(&self, user_id: u64, note_id: &str) -> Result<bool, AppError> {
        let mut tables = self.tables()?;
        Ok(remove_where(&mut tables.notes, |n| n.id == note_id && n.user_id == user_id) > 0)
    }

    // ─── Articles ────────────────────────────────────────────────

    pub fn set_article(&self, article: &Article) -> Result<(), AppError> {
        let mut tables = self.tables()?;
        match tables.articles.iter_mut().find(|a| a.id == article.id) {
            Some(existing) => *existing = article.clone(),
            None => tables.articles.push(article.clone()),
        }
        Ok(())
    }

    pub fn get_article(&self, article_id: &str) -> Result<Option<Article>, AppError> {
        Ok(self
            .tables()?
            .articles
            .iter()
            .find(|a| a.id == article_id)
            .cloned())
    }

    pub fn get_articles(&self) -> Result<Vec<Article>, AppError> {
        let tables = self.tables()?;
        Ok(newest_first(tables.articles.iter().cloned(), |a| {
            a.created_at.as_str()
        }))
    }

    pub fn get_user_articles(&self, user_id: u64) -> Result<Vec<Article>, AppError> {
        let tables = self.tables()?;
        Ok(newest_first(
            tables
                .articles
                .iter()
                .filter(|a| a.user_id == user_id)
                .cloned(),
            |a| a.created_at.as_str(),
        ))
    }

    pub fn delete_article(&self, user_id: u64, article_id: &str) -> Result<bool, AppError> {
        let mut tables = self.tables()?;
        if remove_where(&mut tables.articles, |a| {
            a.id == article_id && a.user_id == user_id
        }) == 0
        {
            return Ok(false);
        }

        let comment_ids: HashSet<String> = tables
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .map(|c| c.id.clone())
            .collect();
        remove_where(&mut tables.comments, |c| comment_ids.contains(&c.id));
        remove_where(&mut tables.replies, |r| comment_ids.contains(&r.comment_id));
        Ok(true)
    }

    // ─── Comments ────────────────────────────────────────────────

    pub fn add_comment(
        &self,
        comment: &Comment,
        notification: Option<&Notification>,
    ) -> Result<(), AppError> {
        let mut tables = self.tables()?;
        tables.comments.push(comment.clone());
        if let Some(notification) = notification {
            tables.notifications.push(notification.clone());
        }
        Ok(())
    }

    pub fn get_comment(&self, comment_id: &str) -> Result<Option<Comment>, AppError> {
        Ok(self
            .tables()?
            .comments
            .iter()
            .find(|c| c.id == comment_id)
            .cloned())
    }

    pub fn get_comments(&self, article_id: &str) -> Result<Vec<Comment>, AppError> {
        let tables = self.tables()?;
        Ok(newest_first(
            tables
                .comments
                .iter()
                .filter(|c| c.article_id == article_id)
                .cloned(),
            |c| c.created_at.as_str(),
        ))
    }

    pub fn delete_comment(&self, comment_id: &str) -> Result<(), AppError> {
        let mut tables = self.tables()?;
        remove_where(&mut tables.comments, |c| c.id == comment_id);
        remove_where(&mut tables.replies, |r| r.comment_id == comment_id);
        Ok(())
    }

    pub fn add_reply(
        &self,
        reply: &Reply,
        notification: Option<&Notification>,
    ) -> Result<(), AppError> {
        let mut tables = self.tables()?;
        tables.replies.push(reply.clone());
        if let Some(notification) = notification {
            tables.notifications.push(notification.clone());
        }
        Ok(())
    }

    pub fn get_reply(&self, reply_id: &str) -> Result<Option<Reply>, AppError> {
        Ok(self
            .tables()?
            .replies
            .iter()
            .find(|r| r.id == reply_id)
            .cloned())
    }

    pub fn get_replies(&self, comment_id: &str) -> Result<Vec<Reply>, AppError> {
        let tables = self.tables()?;
        let mut replies: Vec<Reply> = tables
            .replies
            .iter()
            .filter(|r| r.comment_id == comment_id)
            .cloned()
            .collect();
        replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(replies)
    }

    pub fn delete_reply(&self, reply_id: &str) -> Result<(), AppError> {
        let mut tables = self.tables()?;
        remove_where(&mut tables.replies, |r| r.id == reply_id);
        Ok(())
    }

    // ─── Account Deletion ────────────────────────────────────────

    pub fn delete_user_data(&self, user_id: u64) -> Result<usize, AppError> {
        let mut tables = self.tables()?;
        let mut deleted = 0;

        // Comments on the user's articles go with them, as do replies to
        // any removed comment.
        let article_ids: HashSet<String> = tables
            .articles
            .iter()
            .filter(|a| a.user_id == user_id)
            .map(|a| a.id.clone())
            .collect();
        let comment_ids: HashSet<String> = tables
            .comments
            .iter()
            .filter(|c| c.user_id == user_id || article_ids.contains(&c.article_id))
            .map(|c| c.id.clone())
            .collect();

        deleted += remove_where(&mut tables.replies, |r| {
            r.user_id == user_id || comment_ids.contains(&r.comment_id)
        });
        deleted += remove_where(&mut tables.comments, |c| comment_ids.contains(&c.id));
        deleted += remove_where(&mut tables.articles, |a| a.user_id == user_id);
        deleted += remove_where(&mut tables.activities, |r| r.user_id == user_id);
        deleted += remove_where(&mut tables.notifications, |r| r.user_id == user_id);
        deleted += remove_where(&mut tables.carbon_logs, |r| r.user_id == user_id);
        deleted += remove_where(&mut tables.vitamin_records, |r| r.user_id == user_id);
        deleted += remove_where(&mut tables.sensor_readings, |r| r.user_id == user_id);
        deleted += remove_where(&mut tables.notes, |r| r.user_id == user_id);

        if tables.users.remove(&user_id).is_some() {
            deleted += 1;
        }

        tracing::info!(user_id, deleted, "User data deletion complete");
        Ok(deleted)
    }
}
