use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::core::{
    errors::{AppError, AppResult},
    types::{StoredRecord, TimeStats},
};
use crate::schema::ResumeRecord;

/// Insert payload for one processed résumé. The extracted record and the
/// timing breakdown are stored as JSON columns and must read back intact.
pub struct NewRecord<'a> {
    pub unique_id: &'a str,
    pub file_name: &'a str,
    pub record: &'a ResumeRecord,
    pub time_stats: &'a TimeStats,
    pub created_at: DateTime<Utc>,
}

fn parse_timestamp(value: String) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&value)
        .map(|v| v.with_timezone(&Utc))
        .map_err(|err| AppError::Database(format!("invalid timestamp {value}: {err}")))
}

pub async fn insert_record(pool: &SqlitePool, record: NewRecord<'_>) -> AppResult<String> {
    let id = Uuid::new_v4().to_string();
    let llm_output = serde_json::to_string(record.record)
        .map_err(|err| AppError::Database(format!("unserializable record payload: {err}")))?;
    let time_stats = serde_json::to_string(record.time_stats)
        .map_err(|err| AppError::Database(format!("unserializable time stats: {err}")))?;
    sqlx::query(
        r#"
        INSERT INTO resume_records (id, unique_id, file_name, llm_output, time_stats, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(&id)
    .bind(record.unique_id)
    .bind(record.file_name)
    .bind(llm_output)
    .bind(time_stats)
    // Millisecond precision keeps the column lexicographically sortable.
    .bind(
        record
            .created_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    )
    .execute(pool)
    .await?;
    Ok(id)
}

pub async fn get_record(pool: &SqlitePool, record_id: &str) -> AppResult<StoredRecord> {
    let row = sqlx::query(
        "SELECT id, unique_id, file_name, llm_output, time_stats, created_at FROM resume_records WHERE id = ?1",
    )
    .bind(record_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("record {record_id}")))?;

    map_record(row)
}

pub async fn list_records(pool: &SqlitePool) -> AppResult<Vec<StoredRecord>> {
    let rows = sqlx::query(
        "SELECT id, unique_id, file_name, llm_output, time_stats, created_at FROM resume_records ORDER BY created_at DESC, id",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(map_record).collect()
}

fn map_record(row: sqlx::sqlite::SqliteRow) -> AppResult<StoredRecord> {
    let llm_output: String = row.try_get("llm_output")?;
    let time_stats: String = row.try_get("time_stats")?;
    let created_at: String = row.try_get("created_at")?;
    Ok(StoredRecord {
        id: row.try_get("id")?,
        unique_id: row.try_get("unique_id")?,
        file_name: row.try_get("file_name")?,
        llm_output: serde_json::from_str(&llm_output)
            .map_err(|err| AppError::Database(format!("invalid record payload: {err}")))?,
        time_stats: serde_json::from_str(&time_stats)
            .map_err(|err| AppError::Database(format!("invalid time stats: {err}")))?,
        created_at: parse_timestamp(created_at)?,
    })
}
