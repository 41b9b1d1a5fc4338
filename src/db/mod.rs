pub mod submissions;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{NewSubmission, Submission};

/// Persistence seam for enquiry submissions. The server wires in the
/// Postgres-backed store; tests substitute an in-memory one.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert(&self, submission: &NewSubmission) -> Result<Submission, String>;
}

/// Stores submissions in the `submissions` table.
pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, submission: &NewSubmission) -> Result<Submission, String> {
        submissions::create(&self.pool, submission)
            .await
            .map_err(|e| format!("insert submission: {e}"))
    }
}
