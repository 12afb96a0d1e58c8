use time::OffsetDateTime;

/// A registered account. The password hash never leaves the server; the API
/// schema type omits it.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}
