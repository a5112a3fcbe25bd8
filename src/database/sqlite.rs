use crate::database::StudentRepository;
use crate::domain::{Student, StudentDraft};
use crate::features::students::model::DbStudent;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

// AUTOINCREMENT keeps sqlite from handing out the id of a deleted row again
const CREATE_STUDENT_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS student (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name VARCHAR(100) NOT NULL,
        last_name VARCHAR(100) NOT NULL,
        dob DATE NOT NULL,
        amount_due REAL NOT NULL
    )
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaStatus {
    Created,
    AlreadyPresent,
}

/// Makes sure the `student` table exists. Safe to call on every startup.
pub async fn ensure_schema(pool: &Pool<Sqlite>) -> Result<SchemaStatus> {
    let existing: Option<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind("student")
            .fetch_optional(pool)
            .await
            .context("Failed to inspect sqlite_master for the student table")?;

    if existing.is_some() {
        return Ok(SchemaStatus::AlreadyPresent);
    }

    sqlx::query(CREATE_STUDENT_TABLE)
        .execute(pool)
        .await
        .context("Failed to create the student table")?;

    Ok(SchemaStatus::Created)
}

pub struct SqliteRepository {
    pool: Pool<Sqlite>,
}

impl SqliteRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for SqliteRepository {
    async fn get_all_students(&self) -> Result<Vec<Student>> {
        let db_students = sqlx::query_as::<_, DbStudent>(
            "SELECT id, first_name, last_name, dob, amount_due FROM student",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list students")?;

        Ok(db_students.into_iter().map(Student::from).collect())
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        let db_student_opt = sqlx::query_as::<_, DbStudent>(
            "SELECT id, first_name, last_name, dob, amount_due FROM student WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to look up student {}", id))?;

        Ok(db_student_opt.map(Student::from))
    }

    async fn insert_student(&self, draft: &StudentDraft) -> Result<Student> {
        // the db assigns the id, RETURNING hands the full row back in the same statement
        let db_student = sqlx::query_as::<_, DbStudent>(
            r#"
            INSERT INTO student (first_name, last_name, dob, amount_due)
            VALUES (?, ?, ?, ?)
            RETURNING id, first_name, last_name, dob, amount_due
            "#,
        )
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(draft.dob)
        .bind(draft.amount_due)
        .fetch_one(&self.pool)
        .await
        .with_context(|| {
            format!(
                "Failed to insert student {} {}",
                draft.first_name, draft.last_name
            )
        })?;

        Ok(db_student.into())
    }

    async fn update_student(&self, id: i64, draft: &StudentDraft) -> Result<Option<Student>> {
        // a single UPDATE: either all four columns change or none do
        let db_student_opt = sqlx::query_as::<_, DbStudent>(
            r#"
            UPDATE student
            SET
                first_name = ?,
                last_name = ?,
                dob = ?,
                amount_due = ?
            WHERE id = ?
            RETURNING id, first_name, last_name, dob, amount_due
            "#,
        )
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(draft.dob)
        .bind(draft.amount_due)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to update student {}", id))?;

        Ok(db_student_opt.map(Student::from))
    }

    async fn delete_student(&self, id: i64) -> Result<Option<Student>> {
        let db_student_opt = sqlx::query_as::<_, DbStudent>(
            r#"
            DELETE FROM student WHERE id = ?
            RETURNING id, first_name, last_name, dob, amount_due
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to delete student {}", id))?;

        Ok(db_student_opt.map(Student::from))
    }
}
