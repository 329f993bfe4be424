/*
 * Responsibility
 * - shared context bound to the Router (AppState)
 * - Clone is cheap: PgPool is an Arc around the connection set
 */
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: sqlx::PgPool,
}

impl AppState {
    pub fn new(db: sqlx::PgPool) -> Self {
        Self { db }
    }
}
