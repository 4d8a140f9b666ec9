//! Analytics share token repository

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// Share token repository for database operations
pub struct ShareTokenRepository;

impl ShareTokenRepository {
    /// Owner of a share token, if the token exists
    pub async fn find_user_id(pool: &PgPool, token: Uuid) -> Result<Option<Uuid>> {
        let user_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT user_id
            FROM analytics_share_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(user_id)
    }
}
