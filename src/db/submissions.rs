use sqlx::PgPool;
use sqlx::types::Json;

use crate::models::{NewSubmission, Submission};

pub async fn create(pool: &PgPool, submission: &NewSubmission) -> Result<Submission, sqlx::Error> {
    sqlx::query_as::<_, Submission>(
        "INSERT INTO submissions (received_at, form_type, form_data)
         VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(submission.received_at)
    .bind(submission.form_type.as_str())
    .bind(Json(&submission.form_data))
    .fetch_one(pool)
    .await
}
