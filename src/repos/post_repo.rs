/*
 * Responsibility
 * - posts table access: list/get/insert plus the conditional state updates
 * - every mutation is a single UPDATE guarded by the current `removed` state,
 *   so check-then-act races never span two round-trips
 * - rows are never physically deleted; `removed` is a visibility flag
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::RepoError;

/// A post as stored. `removed` stays out of this row type: every query that
/// returns rows already filters or transitions on it, so callers only ever
/// see the visible shape.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    pub id: i64,
    pub content: String,
    pub likes: i32,
    pub created: DateTime<Utc>,
}

/// All non-removed posts, newest first. No pagination.
pub async fn list_active(pool: &PgPool) -> Result<Vec<PostRow>, RepoError> {
    let rows = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, content, likes, created
        FROM posts
        WHERE removed = false
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_active(pool: &PgPool, id: i64) -> Result<Option<PostRow>, RepoError> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        SELECT id, content, likes, created
        FROM posts
        WHERE id = $1 AND removed = false
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Insert with only `content` set; the store assigns id, likes default,
/// created and removed=false. RETURNING hands back the row we actually
/// inserted, not whatever happens to have the highest id at read time.
pub async fn create(pool: &PgPool, content: &str) -> Result<PostRow, RepoError> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        INSERT INTO posts (content)
        VALUES ($1)
        RETURNING id, content, likes, created
        "#,
    )
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Replace `content` on a visible post. None when the post is absent or
/// removed (the caller cannot tell which, and does not need to).
pub async fn update_content(
    pool: &PgPool,
    id: i64,
    content: &str,
) -> Result<Option<PostRow>, RepoError> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        UPDATE posts
        SET content = $2
        WHERE id = $1 AND removed = false
        RETURNING id, content, likes, created
        "#,
    )
    .bind(id)
    .bind(content)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// active -> removed, valid only from the active state. The `removed = false`
/// guard makes the transition and its precondition one statement: if the row
/// is absent or already removed, zero rows come back.
pub async fn mark_removed(pool: &PgPool, id: i64) -> Result<Option<PostRow>, RepoError> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        UPDATE posts
        SET removed = true
        WHERE id = $1 AND removed = false
        RETURNING id, content, likes, created
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// removed -> active, the mirror of [`mark_removed`].
pub async fn mark_restored(pool: &PgPool, id: i64) -> Result<Option<PostRow>, RepoError> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        UPDATE posts
        SET removed = false
        WHERE id = $1 AND removed = true
        RETURNING id, content, likes, created
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// likes += delta on a visible post, atomically in the store. Two concurrent
/// calls both land; there is no read-modify-write window to lose one in.
/// No floor: dislike may push the counter negative.
pub async fn adjust_likes(
    pool: &PgPool,
    id: i64,
    delta: i32,
) -> Result<Option<PostRow>, RepoError> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        UPDATE posts
        SET likes = likes + $2
        WHERE id = $1 AND removed = false
        RETURNING id, content, likes, created
        "#,
    )
    .bind(id)
    .bind(delta)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test gets its own database from #[sqlx::test]; the schema is the
    // table contract the row type compiles against.
    async fn init_schema(pool: &PgPool) {
        sqlx::query(
            r#"
            CREATE TABLE posts (
                id BIGSERIAL PRIMARY KEY,
                content TEXT NOT NULL,
                likes INTEGER NOT NULL DEFAULT 0,
                created TIMESTAMPTZ NOT NULL DEFAULT now(),
                removed BOOLEAN NOT NULL DEFAULT false
            )
            "#,
        )
        .execute(pool)
        .await
        .expect("create posts table");
    }

    #[sqlx::test]
    async fn create_assigns_store_defaults(pool: PgPool) {
        init_schema(&pool).await;

        let row = create(&pool, "hello").await.expect("create");
        assert!(row.id > 0);
        assert_eq!(row.content, "hello");
        assert_eq!(row.likes, 0);

        let fetched = get_active(&pool, row.id)
            .await
            .expect("get")
            .expect("visible after create");
        assert_eq!(fetched.content, "hello");
    }

    #[sqlx::test]
    async fn edited_content_round_trips(pool: PgPool) {
        init_schema(&pool).await;

        let row = create(&pool, "first").await.expect("create");
        let updated = update_content(&pool, row.id, "second")
            .await
            .expect("update")
            .expect("post is active");
        assert_eq!(updated.content, "second");

        let fetched = get_active(&pool, row.id)
            .await
            .expect("get")
            .expect("still visible");
        assert_eq!(fetched.content, "second");
    }

    #[sqlx::test]
    async fn second_delete_is_refused(pool: PgPool) {
        init_schema(&pool).await;

        let row = create(&pool, "doomed").await.expect("create");
        let removed = mark_removed(&pool, row.id).await.expect("delete");
        assert!(removed.is_some(), "first delete transitions");

        let again = mark_removed(&pool, row.id).await.expect("second delete");
        assert!(again.is_none(), "already-removed post refuses delete");
    }

    #[sqlx::test]
    async fn restore_refuses_an_active_post(pool: PgPool) {
        init_schema(&pool).await;

        let row = create(&pool, "alive").await.expect("create");
        let restored = mark_restored(&pool, row.id).await.expect("restore");
        assert!(restored.is_none(), "active post refuses restore");

        mark_removed(&pool, row.id)
            .await
            .expect("delete")
            .expect("active post deletes");
        let restored = mark_restored(&pool, row.id)
            .await
            .expect("restore")
            .expect("removed post restores");
        assert_eq!(restored.id, row.id);

        let fetched = get_active(&pool, row.id).await.expect("get");
        assert!(fetched.is_some(), "restored post is visible again");
    }

    #[sqlx::test]
    async fn likes_increment_each_call_and_dislike_undoes(pool: PgPool) {
        init_schema(&pool).await;

        let row = create(&pool, "popular").await.expect("create");

        let once = adjust_likes(&pool, row.id, 1)
            .await
            .expect("like")
            .expect("post is active");
        assert_eq!(once.likes, 1);

        let twice = adjust_likes(&pool, row.id, 1)
            .await
            .expect("like")
            .expect("post is active");
        assert_eq!(twice.likes, 2);

        let back = adjust_likes(&pool, row.id, -1)
            .await
            .expect("dislike")
            .expect("post is active");
        assert_eq!(back.likes, 1);
    }

    #[sqlx::test]
    async fn dislike_has_no_floor(pool: PgPool) {
        init_schema(&pool).await;

        let row = create(&pool, "unloved").await.expect("create");
        let disliked = adjust_likes(&pool, row.id, -1)
            .await
            .expect("dislike")
            .expect("post is active");
        assert_eq!(disliked.likes, -1);
    }

    #[sqlx::test]
    async fn list_excludes_removed_and_orders_newest_first(pool: PgPool) {
        init_schema(&pool).await;

        let a = create(&pool, "a").await.expect("create");
        let b = create(&pool, "b").await.expect("create");
        let c = create(&pool, "c").await.expect("create");

        mark_removed(&pool, b.id)
            .await
            .expect("delete")
            .expect("b is active");

        let listed = list_active(&pool).await.expect("list");
        let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![c.id, a.id]);
    }

    #[sqlx::test]
    async fn removed_posts_are_invisible_to_every_operation(pool: PgPool) {
        init_schema(&pool).await;

        let row = create(&pool, "hidden").await.expect("create");
        mark_removed(&pool, row.id)
            .await
            .expect("delete")
            .expect("active post deletes");

        assert!(get_active(&pool, row.id).await.expect("get").is_none());
        assert!(
            update_content(&pool, row.id, "nope")
                .await
                .expect("edit")
                .is_none()
        );
        assert!(
            adjust_likes(&pool, row.id, 1)
                .await
                .expect("like")
                .is_none()
        );
    }
}
