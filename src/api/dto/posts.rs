/*
 * Responsibility
 * - Posts query-parameter DTOs + response DTO
 * - presence/parse checks live here; handlers only map the &'static str
 *   reason to a 400
 * - `removed` is internal state and never appears in a response
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::post_repo::PostRow;

/// Every parameter arrives as an optional raw string so that "missing" and
/// "present but malformed" stay distinguishable; axum's typed extraction
/// would collapse both into one rejection.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    /// Presence first, then numeric parse, per the validation order of the
    /// API contract.
    pub fn post_id(&self) -> Result<i64, &'static str> {
        let raw = self.id.as_deref().ok_or("id is required")?;
        raw.parse::<i64>().map_err(|_| "id must be an integer")
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateQuery {
    pub content: Option<String>,
}

impl CreateQuery {
    pub fn content(&self) -> Result<&str, &'static str> {
        self.content.as_deref().ok_or("content is required")
    }
}

#[derive(Debug, Deserialize)]
pub struct EditQuery {
    pub id: Option<String>,
    pub content: Option<String>,
}

impl EditQuery {
    pub fn post_id(&self) -> Result<i64, &'static str> {
        let raw = self.id.as_deref().ok_or("id is required")?;
        raw.parse::<i64>().map_err(|_| "id must be an integer")
    }

    pub fn content(&self) -> Result<&str, &'static str> {
        self.content.as_deref().ok_or("content is required")
    }
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub content: String,
    pub likes: i32,
    pub created: DateTime<Utc>,
}

impl From<PostRow> for PostResponse {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            likes: row.likes,
            created: row.created,
        }
    }
}
