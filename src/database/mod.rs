use crate::domain::{Student, StudentDraft};
use anyhow::Result;
use async_trait::async_trait;

pub mod sqlite;

// handlers only ever see this trait, the sqlite pool stays behind it
// sqlx::Pool is thread safe, so an implementation can be shared through an Arc
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn get_all_students(&self) -> Result<Vec<Student>>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;

    // write operations, one statement each
    async fn insert_student(&self, draft: &StudentDraft) -> Result<Student>;
    /// Overwrites every mutable field of an existing record. `None` when `id` is unknown;
    /// a missing record is never created here.
    async fn update_student(&self, id: i64, draft: &StudentDraft) -> Result<Option<Student>>;
    /// Removes the record and hands back its last stored value.
    async fn delete_student(&self, id: i64) -> Result<Option<Student>>;
}
