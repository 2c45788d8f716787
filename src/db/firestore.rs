// SPDX-License-Identifier: MIT
// Copyright 2026 EcoSphere contributors

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile plus progress/rank)
//! - Activities (append-only event history)
//! - Notifications
//! - Carbon logs, vitamin records, sensor readings and notes
//! - Articles with their comments and replies

use crate::db::{collections, ActivitySnapshot, ActivityUnitOfWork, ProfileChanges};
use crate::error::AppError;
use crate::models::{
    ActivityEvent, Article, CarbonLog, Comment, Note, Notification, Reply, SensorReading, User,
    VitaminRecord,
};
use firestore::FirestoreQueryDirection::{Ascending, Descending};
use futures_util::future::try_join;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashSet;

// Firestore limits batch/transaction writes to 500 operations.
// We use a safe limit of 400 to allow headroom.
const BATCH_SIZE: usize = 400;

/// The only user fields an activity commit writes.
#[derive(Serialize, Deserialize)]
struct ProgressFields {
    progress: u32,
    rank: u32,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    // ─── Generic Helpers ─────────────────────────────────────────

    async fn get_doc<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        self.client
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn set_doc<T>(&self, collection: &str, id: &str, object: &T) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collection)
            .document_id(id)
            .object(object)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn delete_doc(&self, collection: &str, id: &str) -> Result<(), AppError> {
        self.client
            .fluent()
            .delete()
            .from(collection)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// All documents in `collection` where `field == value`, sorted by `order_field`.
    async fn query_eq<T, V>(
        &self,
        collection: &str,
        field: &str,
        value: V,
        order_field: &str,
        direction: firestore::FirestoreQueryDirection,
    ) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
        V: Into<firestore::FirestoreValue> + Clone + Send + Sync,
    {
        let field = field.to_string();
        self.client
            .fluent()
            .select()
            .from(collection)
            .filter(move |q| q.for_all([q.field(&field).eq(value.clone())]))
            .order_by([(order_field, direction)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// All documents in `collection` owned by `user_id`, newest first by `order_field`.
    async fn query_by_user<T>(
        &self,
        collection: &str,
        user_id: u64,
        order_field: &str,
    ) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned + Send,
    {
        self.query_eq(collection, "user_id", user_id, order_field, Descending)
            .await
    }

    async fn begin_transaction(&self) -> Result<firestore::FirestoreTransaction<'_>, AppError> {
        self.client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))
    }

    /// Read a user through `transaction` so the commit fails if the row changes underneath.
    async fn get_user_in(
        &self,
        transaction: &firestore::FirestoreTransaction<'_>,
        user_id: u64,
    ) -> Result<Option<User>, AppError> {
        self.client
            .clone_with_consistency_selector(firestore::FirestoreConsistencySelector::Transaction(
                transaction.transaction_id().clone(),
            ))
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id.to_string())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    pub async fn get_user(&self, user_id: u64) -> Result<Option<User>, AppError> {
        self.get_doc(collections::USERS, &user_id.to_string()).await
    }

    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.set_doc(collections::USERS, &user.id.to_string(), user)
            .await
    }

    /// Masked update of the changed profile fields inside a transaction.
    pub async fn update_profile(
        &self,
        user_id: u64,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, AppError> {
        let mut transaction = self.begin_transaction().await?;

        let Some(mut user) = self.get_user_in(&transaction, user_id).await? else {
            transaction
                .rollback()
                .await
                .map_err(|e| AppError::Database(format!("Rollback failed: {}", e)))?;
            return Ok(None);
        };
        changes.apply(&mut user);

        self.client
            .fluent()
            .update()
            .fields(changes.field_paths())
            .in_col(collections::USERS)
            .document_id(user_id.to_string())
            .object(&user)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add profile to transaction: {}", e))
            })?;

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        Ok(Some(user))
    }

    pub async fn top_users(&self, limit: u32) -> Result<Vec<User>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::USERS)
            .order_by([
                ("rank", Descending),
                ("progress", Descending),
            ])
            .limit(limit)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Activity Operations ─────────────────────────────────────

    pub async fn load_activity_snapshot(
        &self,
        user_id: u64,
        kind: &str,
        day: &str,
    ) -> Result<ActivitySnapshot, AppError> {
        let kind = kind.to_string();
        let day = day.to_string();
        let same_day_query = async {
            self.client
                .fluent()
                .select()
                .from(collections::ACTIVITIES)
                .filter(move |q| {
                    q.for_all([
                        q.field("user_id").eq(user_id),
                        q.field("kind").eq(kind.clone()),
                        q.field("day").eq(day.clone()),
                    ])
                })
                .obj::<ActivityEvent>()
                .query()
                .await
                .map_err(|e| AppError::Database(e.to_string()))
        };

        // The two reads are independent; issue them together.
        let (user, same_day) = try_join(self.get_user(user_id), same_day_query).await?;

        Ok(ActivitySnapshot {
            user,
            prior_same_day: same_day.len(),
        })
    }

    /// Write the event, progress update and notification in one Firestore transaction.
    ///
    /// The user is re-read inside the transaction. If it is gone, only the
    /// event is written, without points.
    pub async fn commit_activity(
        &self,
        work: ActivityUnitOfWork,
    ) -> Result<ActivityUnitOfWork, AppError> {
        let mut transaction = self.begin_transaction().await?;

        let user_present = match work.progress {
            Some(update) => self
                .get_user_in(&transaction, update.user_id)
                .await?
                .is_some(),
            None => true,
        };
        let work = if user_present {
            work
        } else {
            tracing::warn!(
                user_id = work.event.user_id,
                "User deleted before commit, dropping award"
            );
            work.without_award()
        };

        // 1. Event row (always)
        self.client
            .fluent()
            .update()
            .in_col(collections::ACTIVITIES)
            .document_id(&work.event.id)
            .object(&work.event)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add activity to transaction: {}", e))
            })?;

        // 2. Progress/rank update, masked so profile fields are untouched
        if let Some(update) = work.progress {
            let fields = ProgressFields {
                progress: update.progress,
                rank: update.rank,
            };
            self.client
                .fluent()
                .update()
                .fields(["progress", "rank"])
                .in_col(collections::USERS)
                .document_id(update.user_id.to_string())
                .object(&fields)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!("Failed to add user to transaction: {}", e))
                })?;
        }

        // 3. Rank-up notification
        if let Some(notification) = &work.notification {
            self.client
                .fluent()
                .update()
                .in_col(collections::NOTIFICATIONS)
                .document_id(&notification.id)
                .object(notification)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!(
                        "Failed to add notification to transaction: {}",
                        e
                    ))
                })?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        Ok(work)
    }

    pub async fn get_activity_page(
        &self,
        user_id: u64,
        limit: u32,
        offset: u32,
    ) -> Result<(Vec<ActivityEvent>, usize), AppError> {
        // Histories are small per user; paginate in memory to get an exact total.
        let all: Vec<ActivityEvent> = self
            .query_by_user(collections::ACTIVITIES, user_id, "recorded_at")
            .await?;
        let total = all.len();
        let page = all
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    pub async fn get_activities_since(
        &self,
        user_id: u64,
        since: &str,
    ) -> Result<Vec<ActivityEvent>, AppError> {
        let since = since.to_string();
        self.client
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id),
                    q.field("recorded_at").greater_than_or_equal(since.clone()),
                ])
            })
            .order_by([("recorded_at", Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Notification Operations ─────────────────────────────────

    pub async fn get_notifications(
        &self,
        user_id: u64,
        unread_only: bool,
    ) -> Result<Vec<Notification>, AppError> {
        let notifications: Vec<Notification> = self
            .query_by_user(collections::NOTIFICATIONS, user_id, "created_at")
            .await?;

        Ok(if unread_only {
            notifications.into_iter().filter(|n| !n.is_read).collect()
        } else {
            notifications
        })
    }

    pub async fn mark_notification_read(
        &self,
        user_id: u64,
        notification_id: &str,
    ) -> Result<bool, AppError> {
        let existing: Option<Notification> = self
            .get_doc(collections::NOTIFICATIONS, notification_id)
            .await?;

        match existing {
            Some(mut notification) if notification.user_id == user_id => {
                notification.is_read = true;
                self.set_doc(collections::NOTIFICATIONS, notification_id, &notification)
                    .await?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub async fn mark_all_notifications_read(&self, user_id: u64) -> Result<usize, AppError> {
        let mut unread = self.get_notifications(user_id, true).await?;
        for notification in &mut unread {
            notification.is_read = true;
        }

        for chunk in unread.chunks(BATCH_SIZE) {
            let mut transaction = self.begin_transaction().await?;

            for notification in chunk {
                self.client
                    .fluent()
                    .update()
                    .in_col(collections::NOTIFICATIONS)
                    .document_id(&notification.id)
                    .object(notification)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add notification to transaction: {}",
                            e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit notification batch: {}", e))
            })?;
        }

        Ok(unread.len())
    }

    // ─── Carbon / Vitamin Logs ───────────────────────────────────

    pub async fn add_carbon_log(&self, log: &CarbonLog) -> Result<(), AppError> {
        self.set_doc(collections::CARBON_LOGS, &log.id, log).await
    }

    pub async fn get_carbon_logs(&self, user_id: u64) -> Result<Vec<CarbonLog>, AppError> {
        self.query_by_user(collections::CARBON_LOGS, user_id, "logged_at")
            .await
    }

    pub async fn add_vitamin_record(&self, record: &VitaminRecord) -> Result<(), AppError> {
        self.set_doc(collections::VITAMIN_RECORDS, &record.id, record)
            .await
    }

    pub async fn get_vitamin_records(&self, user_id: u64) -> Result<Vec<VitaminRecord>, AppError> {
        self.query_by_user(collections::VITAMIN_RECORDS, user_id, "created_at")
            .await
    }

    // ─── Sensor Readings ─────────────────────────────────────────

    pub async fn add_sensor_reading(&self, reading: &SensorReading) -> Result<(), AppError> {
        self.set_doc(collections::SENSOR_READINGS, &reading.id, reading)
            .await
    }

    pub async fn latest_sensor_reading(
        &self,
        user_id: u64,
    ) -> Result<Option<SensorReading>, AppError> {
        let readings: Vec<SensorReading> = self
            .client
            .fluent()
            .select()
            .from(collections::SENSOR_READINGS)
            .filter(move |q| q.for_all([q.field("user_id").eq(user_id)]))
            .order_by([("recorded_at", Descending)])
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(readings.into_iter().next())
    }

    // ─── Note Operations ─────────────────────────────────────────

    pub async fn set_note(&self, note: &Note) -> Result<(), AppError> {
        self.set_doc(collections::NOTES, &note.id, note).await
    }

    pub async fn get_note(&self, user_id: u64, note_id: &str) -> Result<Option<Note>, AppError> {
        let note: Option<Note> = self.get_doc(collections::NOTES, note_id).await?;
        Ok(note.filter(|n| n.user_id == user_id))
    }

    pub async fn get_notes(&self, user_id: u64) -> Result<Vec<Note>, AppError> {
        self.query_by_user(collections::NOTES, user_id, "created_at")
            .await
    }

    pub async fn delete_note(&self, user_id: u64, note_id: &str) -> Result<bool, AppError> {
        if self.get_note(user_id, note_id).await?.is_none() {
            return Ok(false);
        }
        self.delete_doc(collections::NOTES, note_id).await?;
        Ok(true)
    }

    // ─── Articles ──────────────────────────────────────────────────

    pub async fn set_article(&self, article: &Article) -> Result<(), AppError> {
        self.set_doc(collections::ARTICLES, &article.id, article)
            .await
    }

    pub async fn get_article(&self, article_id: &str) -> Result<Option<Article>, AppError> {
        self.get_doc(collections::ARTICLES, article_id).await
    }

    pub async fn get_articles(&self) -> Result<Vec<Article>, AppError> {
        self.client
            .fluent()
            .select()
            .from(collections::ARTICLES)
            .order_by([("created_at", Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    pub async fn get_user_articles(&self, user_id: u64) -> Result<Vec<Article>, AppError> {
        self.query_by_user(collections::ARTICLES, user_id, "created_at")
            .await
    }

    pub async fn delete_article(&self, user_id: u64, article_id: &str) -> Result<bool, AppError> {
        match self.get_article(article_id).await? {
            Some(article) if article.user_id == user_id => {}
            _ => return Ok(false),
        }

        let comment_ids: Vec<String> = self
            .get_comments(article_id)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();
        let mut reply_ids = Vec::new();
        for comment_id in &comment_ids {
            reply_ids.extend(self.get_replies(comment_id).await?.into_iter().map(|r| r.id));
        }

        self.batch_delete(&reply_ids, collections::REPLIES).await?;
        self.batch_delete(&comment_ids, collections::COMMENTS)
            .await?;
        self.delete_doc(collections::ARTICLES, article_id).await?;
        Ok(true)
    }

    // ─── Comments ──────────────────────────────────────────────────

    /// Write `object` and an optional notification in one transaction.
    async fn set_with_notification<T>(
        &self,
        collection: &str,
        id: &str,
        object: &T,
        notification: Option<&Notification>,
    ) -> Result<(), AppError>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let mut transaction = self.begin_transaction().await?;

        self.client
            .fluent()
            .update()
            .in_col(collection)
            .document_id(id)
            .object(object)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!(
                    "Failed to add {} to transaction: {}",
                    collection, e
                ))
            })?;

        if let Some(notification) = notification {
            self.client
                .fluent()
                .update()
                .in_col(collections::NOTIFICATIONS)
                .document_id(&notification.id)
                .object(notification)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!(
                        "Failed to add notification to transaction: {}",
                        e
                    ))
                })?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;
        Ok(())
    }

    pub async fn add_comment(
        &self,
        comment: &Comment,
        notification: Option<&Notification>,
    ) -> Result<(), AppError> {
        self.set_with_notification(collections::COMMENTS, &comment.id, comment, notification)
            .await
    }

    pub async fn get_comment(&self, comment_id: &str) -> Result<Option<Comment>, AppError> {
        self.get_doc(collections::COMMENTS, comment_id).await
    }

    pub async fn get_comments(&self, article_id: &str) -> Result<Vec<Comment>, AppError> {
        self.query_eq(
            collections::COMMENTS,
            "article_id",
            article_id.to_string(),
            "created_at",
            Descending,
        )
        .await
    }

    pub async fn delete_comment(&self, comment_id: &str) -> Result<(), AppError> {
        let reply_ids: Vec<String> = self
            .get_replies(comment_id)
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();
        self.batch_delete(&reply_ids, collections::REPLIES).await?;
        self.delete_doc(collections::COMMENTS, comment_id).await
    }

    pub async fn add_reply(
        &self,
        reply: &Reply,
        notification: Option<&Notification>,
    ) -> Result<(), AppError> {
        self.set_with_notification(collections::REPLIES, &reply.id, reply, notification)
            .await
    }

    pub async fn get_reply(&self, reply_id: &str) -> Result<Option<Reply>, AppError> {
        self.get_doc(collections::REPLIES, reply_id).await
    }

    pub async fn get_replies(&self, comment_id: &str) -> Result<Vec<Reply>, AppError> {
        self.query_eq(
            collections::REPLIES,
            "comment_id",
            comment_id.to_string(),
            "created_at",
            Ascending,
        )
        .await
    }

    pub async fn delete_reply(&self, reply_id: &str) -> Result<(), AppError> {
        self.delete_doc(collections::REPLIES, reply_id).await
    }

    // ─── Helper Methods ────────────────────────────────────────────

    /// Helper to batch delete documents using transactions.
    async fn batch_delete(&self, ids: &[String], collection: &str) -> Result<(), AppError> {
        for chunk in ids.chunks(BATCH_SIZE) {
            let mut transaction = self.begin_transaction().await?;

            for doc_id in chunk {
                self.client
                    .fluent()
                    .delete()
                    .from(collection)
                    .document_id(doc_id)
                    .add_to_transaction(&mut transaction)
                    .map_err(|e| {
                        AppError::Database(format!(
                            "Failed to add deletion to transaction for {}: {}",
                            collection, e
                        ))
                    })?;
            }

            transaction.commit().await.map_err(|e| {
                AppError::Database(format!("Failed to commit batch deletion: {}", e))
            })?;
        }

        Ok(())
    }

    // ─── Account Deletion ──────────────────────────────────────────

    /// Delete ALL data for a user.
    ///
    /// Owned records go first so a failure midway never leaves orphans
    /// without an account to attach them to.
    pub async fn delete_user_data(&self, user_id: u64) -> Result<usize, AppError> {
        let mut deleted_count = 0;

        // Threads first: the user's own comments and replies, plus every
        // comment (and its replies) on the user's articles.
        let articles = self.get_user_articles(user_id).await?;
        let mut comment_ids: HashSet<String> = self
            .query_by_user::<Comment>(collections::COMMENTS, user_id, "created_at")
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();
        for article in &articles {
            comment_ids.extend(self.get_comments(&article.id).await?.into_iter().map(|c| c.id));
        }
        let mut reply_ids: HashSet<String> = self
            .query_by_user::<Reply>(collections::REPLIES, user_id, "created_at")
            .await?
            .into_iter()
            .map(|r| r.id)
            .collect();
        for comment_id in &comment_ids {
            reply_ids.extend(self.get_replies(comment_id).await?.into_iter().map(|r| r.id));
        }

        let ids: Vec<String> = reply_ids.into_iter().collect();
        self.batch_delete(&ids, collections::REPLIES).await?;
        deleted_count += ids.len();

        let ids: Vec<String> = comment_ids.into_iter().collect();
        self.batch_delete(&ids, collections::COMMENTS).await?;
        deleted_count += ids.len();

        let ids: Vec<String> = articles.into_iter().map(|a| a.id).collect();
        self.batch_delete(&ids, collections::ARTICLES).await?;
        deleted_count += ids.len();

        let activities: Vec<ActivityEvent> = self
            .query_by_user(collections::ACTIVITIES, user_id, "recorded_at")
            .await?;
        let ids: Vec<String> = activities.into_iter().map(|a| a.id).collect();
        self.batch_delete(&ids, collections::ACTIVITIES).await?;
        deleted_count += ids.len();

        let notifications: Vec<Notification> = self
            .query_by_user(collections::NOTIFICATIONS, user_id, "created_at")
            .await?;
        let ids: Vec<String> = notifications.into_iter().map(|n| n.id).collect();
        self.batch_delete(&ids, collections::NOTIFICATIONS).await?;
        deleted_count += ids.len();

        let carbon_logs = self.get_carbon_logs(user_id).await?;
        let ids: Vec<String> = carbon_logs.into_iter().map(|l| l.id).collect();
        self.batch_delete(&ids, collections::CARBON_LOGS).await?;
        deleted_count += ids.len();

        let vitamin_records = self.get_vitamin_records(user_id).await?;
        let ids: Vec<String> = vitamin_records.into_iter().map(|r| r.id).collect();
        self.batch_delete(&ids, collections::VITAMIN_RECORDS).await?;
        deleted_count += ids.len();

        let readings: Vec<SensorReading> = self
            .query_by_user(collections::SENSOR_READINGS, user_id, "recorded_at")
            .await?;
        let ids: Vec<String> = readings.into_iter().map(|r| r.id).collect();
        self.batch_delete(&ids, collections::SENSOR_READINGS)
            .await?;
        deleted_count += ids.len();

        let notes = self.get_notes(user_id).await?;
        let ids: Vec<String> = notes.into_iter().map(|n| n.id).collect();
        self.batch_delete(&ids, collections::NOTES).await?;
        deleted_count += ids.len();

        if self.get_user(user_id).await?.is_some() {
            self.delete_doc(collections::USERS, &user_id.to_string())
                .await?;
            deleted_count += 1;
        }

        tracing::info!(user_id, deleted_count, "User data deletion complete");

        Ok(deleted_count)
    }
}
