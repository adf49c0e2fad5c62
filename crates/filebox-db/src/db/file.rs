use chrono::{DateTime, Utc};
use filebox_core::{
    models::{FileRecord, NewFileRecord},
    AppError,
};
use sqlx::{FromRow, Sqlite, SqlitePool};

/// Row shape of the `files` table.
#[derive(Debug, FromRow)]
struct FileRow {
    id: i64,
    product_id: String,
    filename: String,
    storage_path: String,
    upload_date: DateTime<Utc>,
}

impl FileRow {
    fn into_record(self) -> FileRecord {
        FileRecord {
            id: self.id,
            application_code: self.product_id,
            original_filename: self.filename,
            storage_key: self.storage_path,
            uploaded_at: self.upload_date,
        }
    }
}

/// Repository for file metadata
#[derive(Clone)]
pub struct FileRepository {
    pool: SqlitePool,
}

impl FileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a record; id and upload time are assigned here.
    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "insert"))]
    pub async fn create(&self, record: NewFileRecord) -> Result<FileRecord, AppError> {
        let row = sqlx::query_as::<Sqlite, FileRow>(
            r#"
            INSERT INTO files (product_id, filename, storage_path, upload_date)
            VALUES (?, ?, ?, ?)
            RETURNING id, product_id, filename, storage_path, upload_date
            "#,
        )
        .bind(&record.application_code)
        .bind(&record.original_filename)
        .bind(&record.storage_key)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_record())
    }

    /// All records whose application code equals `code` exactly, oldest first.
    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "select"))]
    pub async fn find_by_application_code(&self, code: &str) -> Result<Vec<FileRecord>, AppError> {
        let rows = sqlx::query_as::<Sqlite, FileRow>(
            "SELECT id, product_id, filename, storage_path, upload_date FROM files WHERE product_id = ? ORDER BY id ASC",
        )
        .bind(code)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(FileRow::into_record).collect())
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "select", db.record_id = id))]
    pub async fn get_by_id(&self, id: i64) -> Result<Option<FileRecord>, AppError> {
        let row = sqlx::query_as::<Sqlite, FileRow>(
            "SELECT id, product_id, filename, storage_path, upload_date FROM files WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(FileRow::into_record))
    }

    #[tracing::instrument(skip(self), fields(db.table = "files", db.operation = "count"))]
    pub async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<Sqlite, i64>("SELECT COUNT(*) FROM files")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
