use crate::domain::message::Message;
use crate::domain::page::Page;
use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct SendMessage {
    pub receiver: String,
    pub subject: String,
    pub body: String,
}

/// List filters off the query string. Values that do not parse fall back to
/// their defaults instead of rejecting the request, the same way unparsable
/// values are treated as absent elsewhere in the query API.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default, deserialize_with = "lenient_number")]
    pub page: Option<i64>,
    #[serde(default, rename = "pageSize", deserialize_with = "lenient_number")]
    pub page_size: Option<i64>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub archived: bool,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub sent: bool,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref() == Some("true"))
}

#[derive(Debug, Deserialize)]
pub struct BulkUpdate {
    pub ids: Vec<i64>,
    pub is_read: Option<bool>,
    pub is_archived: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct BulkDelete {
    pub ids: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: i64,
    pub sender: String,
    pub receiver: String,
    pub subject: String,
    pub body: String,
    pub is_read: bool,
    pub is_archived: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id,
            sender: message.sender,
            receiver: message.receiver,
            subject: message.subject,
            body: message.body,
            is_read: message.is_read,
            is_archived: message.is_archived,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginatedMessages {
    pub data: Vec<MessageResponse>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_items: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub page_size: i64,
}

impl From<Page<Message>> for PaginatedMessages {
    fn from(page: Page<Message>) -> Self {
        Self {
            data: page.items.into_iter().map(MessageResponse::from).collect(),
            pagination: Pagination {
                total_items: page.total_items,
                total_pages: page.total_pages,
                current_page: page.current_page,
                page_size: page.page_size,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub updated: u64,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: u64,
}
