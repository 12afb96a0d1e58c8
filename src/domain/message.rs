use time::OffsetDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub sender: String,
    pub receiver: String,
    pub subject: String,
    pub body: String,
    pub is_read: bool,
    pub is_archived: bool,
    pub created_at: OffsetDateTime,
}

/// Which side of a message the caller's identity is matched against when
/// listing: `Inbox` matches `receiver`, `Outbox` matches `sender`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Inbox,
    Outbox,
}

impl Direction {
    pub(crate) const fn owner_column(self) -> &'static str {
        match self {
            Self::Inbox => "receiver",
            Self::Outbox => "sender",
        }
    }
}

/// Optional flag assignments for a partial bulk update. Unset fields are
/// left untouched by the update, not reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageFlags {
    pub is_read: Option<bool>,
    pub is_archived: Option<bool>,
}

impl MessageFlags {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_read.is_none() && self.is_archived.is_none()
    }
}
