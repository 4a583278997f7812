use sqlx::SqlitePool;

use crate::{error::AppResult, models::UserProfile};

/// Fetches a user's public profile fields
///
/// The users/user_info join is expected to produce exactly one row for a
/// valid user. Zero rows (unknown user) or more than one row (inconsistent
/// info records) both come back as `None`; callers treat absence as failure.
pub async fn get_user_data(pool: &SqlitePool, user_id: i64) -> AppResult<Option<UserProfile>> {
    let rows: Vec<UserProfile> = sqlx::query_as(
        r#"
        SELECT u.user_id, u.username, u.email, i.profile_picture_path
        FROM users u
        JOIN user_info i ON i.user_id = u.user_id
        WHERE u.user_id = ?1
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    if rows.len() != 1 {
        tracing::debug!(
            user_id,
            row_count = rows.len(),
            "Profile lookup did not yield exactly one row"
        );
        return Ok(None);
    }

    Ok(rows.into_iter().next())
}
