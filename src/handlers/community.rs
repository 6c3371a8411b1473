use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::db::profiles::fetch_display_name;
use crate::dto::{
    resolve_author, CreateCommentRequest, CreatePostRequest, LikeResponse, PostListQuery,
};
use crate::error::{AppError, AppResult};
use crate::models::community::{CommentRow, CommunityPost, PostComment, PostRow};
use crate::AppState;

const POST_COLUMNS: &str = r#"
    p.id, p.user_id, p.author_name, p.content, p.mood, p.tags, p.created_at,
    (SELECT COUNT(*) FROM post_likes l WHERE l.post_id = p.id) AS likes,
    (SELECT COUNT(*) FROM post_comments c WHERE c.post_id = p.id) AS comments,
    EXISTS (SELECT 1 FROM post_likes l WHERE l.post_id = p.id AND l.user_id = $1) AS user_liked
"#;

async fn ensure_post_exists(state: &AppState, post_id: Uuid) -> AppResult<()> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM community_posts WHERE id = $1)",
    )
    .bind(post_id)
    .fetch_one(&state.db)
    .await?;

    if exists {
        Ok(())
    } else {
        Err(AppError::NotFound("Post not found".into()))
    }
}

/// The typed-in name wins; otherwise sign with the user's profile name.
async fn author_for(state: &AppState, user_id: Uuid, explicit: Option<String>) -> AppResult<String> {
    let profile_name = match explicit {
        Some(_) => None,
        None => fetch_display_name(&state.db, user_id).await?,
    };
    Ok(resolve_author(explicit, profile_name))
}

pub async fn list_posts(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<PostListQuery>,
) -> AppResult<Json<Vec<CommunityPost>>> {
    let tag = query
        .tag
        .as_deref()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty());

    let sql = format!(
        r#"
        SELECT {POST_COLUMNS}
        FROM community_posts p
        WHERE ($2::text IS NULL OR $2 = ANY(p.tags))
        ORDER BY p.created_at DESC
        LIMIT $3
        "#
    );

    let rows = sqlx::query_as::<_, PostRow>(&sql)
        .bind(auth_user.id)
        .bind(tag)
        .bind(query.limit())
        .fetch_all(&state.db)
        .await?;

    let posts = rows
        .into_iter()
        .map(|row| CommunityPost::from_row(row, auth_user.id))
        .collect();

    Ok(Json(posts))
}

pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreatePostRequest>,
) -> AppResult<Json<CommunityPost>> {
    body.validate()?;
    let post = body.normalize().map_err(AppError::Validation)?;
    let author_name = author_for(&state, auth_user.id, post.author_name).await?;

    let post_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO community_posts (id, user_id, author_name, content, mood, tags)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(post_id)
    .bind(auth_user.id)
    .bind(&author_name)
    .bind(&post.content)
    .bind(&post.mood)
    .bind(&post.tags)
    .execute(&state.db)
    .await?;

    let sql = format!("SELECT {POST_COLUMNS} FROM community_posts p WHERE p.id = $2");
    let row = sqlx::query_as::<_, PostRow>(&sql)
        .bind(auth_user.id)
        .bind(post_id)
        .fetch_one(&state.db)
        .await?;

    tracing::info!(user_id = %auth_user.id, post_id = %post_id, "Community post created");

    Ok(Json(CommunityPost::from_row(row, auth_user.id)))
}

/// Like the post, or remove the like if the user already gave one.
pub async fn toggle_like(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> AppResult<Json<LikeResponse>> {
    ensure_post_exists(&state, post_id).await?;

    let removed = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
        .bind(post_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?
        .rows_affected();

    let liked = if removed > 0 {
        false
    } else {
        sqlx::query(
            r#"
            INSERT INTO post_likes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;
        true
    };

    let likes = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM post_likes WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(&state.db)
        .await?;

    Ok(Json(LikeResponse { liked, likes }))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> AppResult<Json<Vec<PostComment>>> {
    ensure_post_exists(&state, post_id).await?;

    let rows = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT * FROM post_comments
        WHERE post_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(&state.db)
    .await?;

    let comments = rows
        .into_iter()
        .map(|row| PostComment::from_row(row, auth_user.id))
        .collect();

    Ok(Json(comments))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
    Json(body): Json<CreateCommentRequest>,
) -> AppResult<Json<PostComment>> {
    body.validate()?;
    let (explicit_author, content) = body.normalize().map_err(AppError::Validation)?;

    ensure_post_exists(&state, post_id).await?;
    let author_name = author_for(&state, auth_user.id, explicit_author).await?;

    let row = sqlx::query_as::<_, CommentRow>(
        r#"
        INSERT INTO post_comments (id, post_id, user_id, author_name, content)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(post_id)
    .bind(auth_user.id)
    .bind(&author_name)
    .bind(&content)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(PostComment::from_row(row, auth_user.id)))
}
