/*
 * Responsibility
 * - the /posts.* operations: list, getById, post, edit, delete, restore,
 *   like, dislike
 * - validate query parameters, apply the post lifecycle rules via post_repo,
 *   hand the outcome to AppError/Json for emission
 * - routing is method-agnostic and paths are exact; state changes arrive as
 *   query parameters
 */
use axum::{Json, extract::Query, extract::State};

use crate::{
    api::dto::posts::{CreateQuery, EditQuery, IdQuery, PostResponse},
    error::AppError,
    repos::post_repo,
    state::AppState,
};

/// GET /posts.get — all visible posts, newest first.
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let rows = post_repo::list_active(&state.db).await?;
    Ok(Json(rows.into_iter().map(PostResponse::from).collect()))
}

/// GET /posts.getById?id= — one visible post or 404.
pub async fn get_post(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<PostResponse>, AppError> {
    let id = query
        .post_id()
        .map_err(|m| AppError::bad_request("INVALID_QUERY", m))?;

    let row = post_repo::get_active(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("post"))?;

    Ok(Json(row.into()))
}

/// POST /posts.post?content= — create and return the inserted row.
///
/// The store assigns id/likes/created/removed. Returning the inserted row
/// (not the newest row in the table) keeps concurrent creates from handing
/// back someone else's post.
pub async fn create_post(
    State(state): State<AppState>,
    Query(query): Query<CreateQuery>,
) -> Result<Json<PostResponse>, AppError> {
    let content = query
        .content()
        .map_err(|m| AppError::bad_request("INVALID_QUERY", m))?;

    let row = post_repo::create(&state.db, content).await?;
    Ok(Json(row.into()))
}

/// POST /posts.edit?id=&content= — replace content on a visible post.
///
/// Absent and removed look the same from here: the conditional update
/// touches zero rows and we answer 404.
pub async fn edit_post(
    State(state): State<AppState>,
    Query(query): Query<EditQuery>,
) -> Result<Json<PostResponse>, AppError> {
    let id = query
        .post_id()
        .map_err(|m| AppError::bad_request("INVALID_QUERY", m))?;
    let content = query
        .content()
        .map_err(|m| AppError::bad_request("INVALID_QUERY", m))?;

    let row = post_repo::update_content(&state.db, id, content)
        .await?
        .ok_or_else(|| AppError::not_found("post"))?;

    Ok(Json(row.into()))
}

/// POST /posts.delete?id= — soft delete, valid only from the active state.
///
/// Deleting an already-removed post is refused with 404, not absorbed.
pub async fn delete_post(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<PostResponse>, AppError> {
    let id = query
        .post_id()
        .map_err(|m| AppError::bad_request("INVALID_QUERY", m))?;

    let row = post_repo::mark_removed(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("post"))?;

    Ok(Json(row.into()))
}

/// POST /posts.restore?id= — undo a soft delete, valid only from the
/// removed state. Restoring an active post is refused with 404.
pub async fn restore_post(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<PostResponse>, AppError> {
    let id = query
        .post_id()
        .map_err(|m| AppError::bad_request("INVALID_QUERY", m))?;

    let row = post_repo::mark_restored(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("post"))?;

    Ok(Json(row.into()))
}

/// POST /posts.like?id= — likes + 1 on a visible post.
pub async fn like_post(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<PostResponse>, AppError> {
    adjust_likes(state, query, 1).await
}

/// POST /posts.dislike?id= — likes - 1; no floor, the counter may go
/// negative.
pub async fn dislike_post(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<PostResponse>, AppError> {
    adjust_likes(state, query, -1).await
}

async fn adjust_likes(
    state: AppState,
    query: IdQuery,
    delta: i32,
) -> Result<Json<PostResponse>, AppError> {
    let id = query
        .post_id()
        .map_err(|m| AppError::bad_request("INVALID_QUERY", m))?;

    let row = post_repo::adjust_likes(&state.db, id, delta)
        .await?
        .ok_or_else(|| AppError::not_found("post"))?;

    Ok(Json(row.into()))
}
