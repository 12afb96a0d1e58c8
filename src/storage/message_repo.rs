use crate::domain::message::{Direction, Message, MessageFlags};
use crate::domain::page::PageRequest;
use crate::error::{AppError, Result};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone, Debug)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        sender: &str,
        receiver: &str,
        subject: &str,
        body: &str,
    ) -> Result<Message> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (sender, receiver, subject, body)
            VALUES ($1, $2, $3, $4)
            RETURNING id, sender, receiver, subject, body, is_read, is_archived, created_at
            "#,
        )
        .bind(sender)
        .bind(receiver)
        .bind(subject)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    pub async fn count(&self, identity: &str, direction: Direction, archived: bool) -> Result<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM messages WHERE {} = $1 AND is_archived = $2",
            direction.owner_column()
        );
        let count: i64 = sqlx::query_scalar(&sql)
            .bind(identity)
            .bind(archived)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Fetches one page of messages, newest first.
    ///
    /// Rows that fail to decode are logged and skipped rather than failing
    /// the whole page; the caller gets a partial page with the skip count in
    /// the logs.
    pub async fn list(
        &self,
        identity: &str,
        direction: Direction,
        archived: bool,
        page: PageRequest,
    ) -> Result<Vec<Message>> {
        let sql = format!(
            r#"
            SELECT id, sender, receiver, subject, body, is_read, is_archived, created_at
            FROM messages
            WHERE {} = $1 AND is_archived = $2
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
            direction.owner_column()
        );

        let rows = sqlx::query(&sql)
            .bind(identity)
            .bind(archived)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        let mut messages = Vec::with_capacity(rows.len());
        let mut skipped = 0_usize;
        for row in &rows {
            match Message::from_row(row) {
                Ok(message) => messages.push(message),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping message row that failed to decode");
                    skipped += 1;
                }
            }
        }
        if skipped > 0 {
            tracing::warn!(skipped, "Returning a partial page");
        }

        Ok(messages)
    }

    /// Applies a partial flag update to the given ids, restricted to rows the
    /// identity received. Returns the number of rows actually changed, which
    /// may be less than `ids.len()` when some ids belong to someone else.
    pub async fn update_flags(
        &self,
        receiver: &str,
        ids: &[i64],
        flags: MessageFlags,
    ) -> Result<u64> {
        // Without at least one flag the builder would render an UPDATE with
        // an empty SET clause; reject before any SQL is assembled.
        if flags.is_empty() {
            return Err(AppError::BadRequest("no update fields provided".to_string()));
        }

        let mut update = FlagUpdate::new();
        if let Some(is_read) = flags.is_read {
            update.set("is_read", is_read);
        }
        if let Some(is_archived) = flags.is_archived {
            update.set("is_archived", is_archived);
        }

        let mut query = update.scope_to_receiver(receiver, ids);
        let result = query.build().execute(&self.pool).await?;

        Ok(result.rows_affected())
    }

    /// Deletes the given ids, restricted to rows the identity received.
    pub async fn delete(&self, receiver: &str, ids: &[i64]) -> Result<u64> {
        let result = sqlx::query("DELETE FROM messages WHERE receiver = $1 AND id = ANY($2)")
            .bind(receiver)
            .bind(ids.to_vec())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Accumulates SET clauses for a partial flag update.
///
/// The only way to turn the accumulated clauses into an executable statement
/// is `scope_to_receiver`, which appends the ownership predicate itself, so
/// a flag update can never be issued without it. Column names come from the
/// fixed call sites above, never from request input.
struct FlagUpdate {
    builder: QueryBuilder<'static, Postgres>,
    fields: usize,
}

impl FlagUpdate {
    fn new() -> Self {
        Self { builder: QueryBuilder::new("UPDATE messages SET "), fields: 0 }
    }

    fn set(&mut self, column: &str, value: bool) {
        if self.fields > 0 {
            self.builder.push(", ");
        }
        self.builder.push(column).push(" = ").push_bind(value);
        self.fields += 1;
    }

    fn scope_to_receiver(mut self, receiver: &str, ids: &[i64]) -> QueryBuilder<'static, Postgres> {
        self.builder
            .push(" WHERE receiver = ")
            .push_bind(receiver.to_string())
            .push(" AND id = ANY(")
            .push_bind(ids.to_vec())
            .push(")");
        self.builder
    }
}
