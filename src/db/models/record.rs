//! Wellness record models: moods, journals, meditation sessions and
//! community posts.
//!
//! All records are append-only and keyed logically by owner email. Mood,
//! journal and meditation reads are always owner-scoped; community posts
//! are the one kind with store-wide read scope.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MoodEntry {
    pub id: String,
    pub email: String,
    pub mood: String,
    pub description: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct JournalEntry {
    pub id: String,
    pub email: String,
    pub entry: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MeditationSession {
    pub id: String,
    pub email: String,
    pub session_type: String,
    pub duration_minutes: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CommunityPost {
    pub id: String,
    pub email: String,
    pub name: String,
    pub content: String,
    pub created_at: String,
}

pub async fn insert_mood(
    pool: &SqlitePool,
    email: &str,
    mood: &str,
    description: &str,
) -> Result<MoodEntry, sqlx::Error> {
    let record = MoodEntry {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        mood: mood.to_string(),
        description: description.to_string(),
        created_at: Utc::now().to_rfc3339(),
    };

    sqlx::query(
        "INSERT INTO moods (id, email, mood, description, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&record.id)
    .bind(&record.email)
    .bind(&record.mood)
    .bind(&record.description)
    .bind(&record.created_at)
    .execute(pool)
    .await?;

    Ok(record)
}

pub async fn insert_journal(
    pool: &SqlitePool,
    email: &str,
    entry: &str,
) -> Result<JournalEntry, sqlx::Error> {
    let record = JournalEntry {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        entry: entry.to_string(),
        created_at: Utc::now().to_rfc3339(),
    };

    sqlx::query("INSERT INTO journals (id, email, entry, created_at) VALUES (?, ?, ?, ?)")
        .bind(&record.id)
        .bind(&record.email)
        .bind(&record.entry)
        .bind(&record.created_at)
        .execute(pool)
        .await?;

    Ok(record)
}

pub async fn insert_meditation(
    pool: &SqlitePool,
    email: &str,
    session_type: &str,
    duration_minutes: i64,
) -> Result<MeditationSession, sqlx::Error> {
    let record = MeditationSession {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        session_type: session_type.to_string(),
        duration_minutes,
        created_at: Utc::now().to_rfc3339(),
    };

    sqlx::query(
        "INSERT INTO meditations (id, email, session_type, duration_minutes, created_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&record.id)
    .bind(&record.email)
    .bind(&record.session_type)
    .bind(record.duration_minutes)
    .bind(&record.created_at)
    .execute(pool)
    .await?;

    Ok(record)
}

pub async fn insert_community_post(
    pool: &SqlitePool,
    email: &str,
    name: &str,
    content: &str,
) -> Result<CommunityPost, sqlx::Error> {
    let record = CommunityPost {
        id: Uuid::new_v4().to_string(),
        email: email.to_string(),
        name: name.to_string(),
        content: content.to_string(),
        created_at: Utc::now().to_rfc3339(),
    };

    sqlx::query(
        "INSERT INTO community_posts (id, email, name, content, created_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&record.id)
    .bind(&record.email)
    .bind(&record.name)
    .bind(&record.content)
    .bind(&record.created_at)
    .execute(pool)
    .await?;

    Ok(record)
}

// List queries return the full matching set, newest first. Timestamp ties
// fall back to rowid so later inserts still sort first.

pub async fn list_moods(pool: &SqlitePool, email: &str) -> Result<Vec<MoodEntry>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM moods WHERE email = ? ORDER BY created_at DESC, rowid DESC")
        .bind(email)
        .fetch_all(pool)
        .await
}

pub async fn list_journals(
    pool: &SqlitePool,
    email: &str,
) -> Result<Vec<JournalEntry>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM journals WHERE email = ? ORDER BY created_at DESC, rowid DESC")
        .bind(email)
        .fetch_all(pool)
        .await
}

pub async fn list_meditations(
    pool: &SqlitePool,
    email: &str,
) -> Result<Vec<MeditationSession>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM meditations WHERE email = ? ORDER BY created_at DESC, rowid DESC")
        .bind(email)
        .fetch_all(pool)
        .await
}

/// Community posts read store-wide, not per owner.
pub async fn list_community_posts(pool: &SqlitePool) -> Result<Vec<CommunityPost>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM community_posts ORDER BY created_at DESC, rowid DESC")
        .fetch_all(pool)
        .await
}

/// Posts authored by one owner, for the dashboard view.
pub async fn list_community_posts_by_owner(
    pool: &SqlitePool,
    email: &str,
) -> Result<Vec<CommunityPost>, sqlx::Error> {
    sqlx::query_as(
        "SELECT * FROM community_posts WHERE email = ? ORDER BY created_at DESC, rowid DESC",
    )
    .bind(email)
    .fetch_all(pool)
    .await
}
