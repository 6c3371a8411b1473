use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::{Profile, ProfileUpdate};

pub async fn fetch_profile(db: &PgPool, user_id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
        .bind(user_id)
        .fetch_optional(db)
        .await
}

/// The name to sign community posts with, if the user set one.
pub async fn fetch_display_name(db: &PgPool, user_id: Uuid) -> Result<Option<String>, sqlx::Error> {
    let name = sqlx::query_scalar::<_, Option<String>>(
        "SELECT display_name FROM profiles WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(name.flatten())
}

pub async fn upsert_profile(
    db: &PgPool,
    user_id: Uuid,
    update: &ProfileUpdate,
) -> Result<Profile, sqlx::Error> {
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        INSERT INTO profiles (id, display_name, bio, avatar_url)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE SET
            display_name = EXCLUDED.display_name,
            bio = EXCLUDED.bio,
            avatar_url = EXCLUDED.avatar_url,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&update.display_name)
    .bind(&update.bio)
    .bind(&update.avatar_url)
    .fetch_one(db)
    .await?;

    tracing::debug!(user_id = %user_id, "Profile saved");
    Ok(profile)
}
