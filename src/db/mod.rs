use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;

use crate::transcript::{TimeSpan, Turn};

pub type DbPool = SqlitePool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TranscriptRecord {
    pub file_id: String,
    pub filename: String,
    pub transcript: String,
    pub turn_count: i64,
    pub processed_at: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct TurnRow {
    start_secs: f64,
    end_secs: f64,
    speaker: String,
    text: String,
}

impl From<TurnRow> for Turn {
    fn from(row: TurnRow) -> Self {
        Turn {
            span: TimeSpan::new(row.start_secs, row.end_secs),
            speaker: row.speaker,
            text: row.text,
        }
    }
}

pub async fn init_db(database_url: &str) -> Result<DbPool, sqlx::Error> {
    if let Some(path) = database_url.strip_prefix("sqlite:") {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Store a processed file's transcript and turns, replacing any previous
/// result for the same file id.
pub async fn store_transcript(
    pool: &DbPool,
    file_id: &str,
    filename: &str,
    transcript: &str,
    turns: &[Turn],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    let processed_at = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO transcripts (file_id, filename, transcript, turn_count, processed_at)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(file_id)
        DO UPDATE SET filename = excluded.filename,
                      transcript = excluded.transcript,
                      turn_count = excluded.turn_count,
                      processed_at = excluded.processed_at
        "#,
    )
    .bind(file_id)
    .bind(filename)
    .bind(transcript)
    .bind(turns.len() as i64)
    .bind(&processed_at)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM turns WHERE file_id = ?")
        .bind(file_id)
        .execute(&mut *tx)
        .await?;

    for (idx, turn) in turns.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO turns (file_id, idx, start_secs, end_secs, speaker, text)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(file_id)
        .bind(idx as i64)
        .bind(turn.span.start)
        .bind(turn.span.end)
        .bind(&turn.speaker)
        .bind(&turn.text)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Load a file's turns in their stored (merge) order.
pub async fn load_turns(pool: &DbPool, file_id: &str) -> Result<Vec<Turn>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TurnRow>(
        "SELECT start_secs, end_secs, speaker, text FROM turns WHERE file_id = ? ORDER BY idx",
    )
    .bind(file_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Turn::from).collect())
}

pub async fn get_transcript(
    pool: &DbPool,
    file_id: &str,
) -> Result<Option<TranscriptRecord>, sqlx::Error> {
    sqlx::query_as::<_, TranscriptRecord>("SELECT * FROM transcripts WHERE file_id = ?")
        .bind(file_id)
        .fetch_optional(pool)
        .await
}

pub async fn list_transcripts(pool: &DbPool) -> Result<Vec<TranscriptRecord>, sqlx::Error> {
    sqlx::query_as::<_, TranscriptRecord>("SELECT * FROM transcripts ORDER BY processed_at")
        .fetch_all(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_pool(dir: &tempfile::TempDir) -> DbPool {
        let url = format!("sqlite:{}?mode=rwc", dir.path().join("test.db").display());
        init_db(&url).await.unwrap()
    }

    #[tokio::test]
    async fn test_store_and_load_turns_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool(&dir).await;

        let turns = vec![
            Turn::new(0.0, 2.0, "S1", "hi there"),
            Turn::new(2.0, 3.0, "S2", "bye"),
            Turn::new(3.0, 4.0, "S1", "again"),
        ];

        store_transcript(&pool, "file-1", "meeting.wav", "rendered", &turns)
            .await
            .unwrap();

        let loaded = load_turns(&pool, "file-1").await.unwrap();
        assert_eq!(loaded, turns);

        let record = get_transcript(&pool, "file-1").await.unwrap().unwrap();
        assert_eq!(record.filename, "meeting.wav");
        assert_eq!(record.transcript, "rendered");
        assert_eq!(record.turn_count, 3);
    }

    #[tokio::test]
    async fn test_reprocessing_replaces_previous_turns() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool(&dir).await;

        let first = vec![Turn::new(0.0, 1.0, "S1", "v1")];
        store_transcript(&pool, "file-1", "a.wav", "t1", &first)
            .await
            .unwrap();

        let second = vec![
            Turn::new(0.0, 1.0, "S1", "v2"),
            Turn::new(1.0, 2.0, "S2", "v2b"),
        ];
        store_transcript(&pool, "file-1", "a.wav", "t2", &second)
            .await
            .unwrap();

        let loaded = load_turns(&pool, "file-1").await.unwrap();
        assert_eq!(loaded, second);

        let records = list_transcripts(&pool).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].transcript, "t2");
    }

    #[tokio::test]
    async fn test_unknown_file_id_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let pool = test_pool(&dir).await;

        assert!(load_turns(&pool, "missing").await.unwrap().is_empty());
        assert!(get_transcript(&pool, "missing").await.unwrap().is_none());
    }
}
