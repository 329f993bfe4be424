/*
 * Responsibility
 * - the dispatch table: one exact path per operation, built once at startup
 * - routing is method-agnostic (`any`); the operation is named by the path,
 *   not the verb
 * - no match falls through to axum's 404 with an empty body, before any
 *   store work happens
 */
use axum::{Router, routing::any, routing::get};

use crate::state::AppState;

use crate::api::handlers::{
    health::health,
    posts::{
        create_post, delete_post, dislike_post, edit_post, get_post, like_post, list_posts,
        restore_post,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/posts.get", any(list_posts))
        .route("/posts.getById", any(get_post))
        .route("/posts.post", any(create_post))
        .route("/posts.edit", any(edit_post))
        .route("/posts.delete", any(delete_post))
        .route("/posts.restore", any(restore_post))
        .route("/posts.like", any(like_post))
        .route("/posts.dislike", any(dislike_post))
}
