use crate::domain::message::{Direction, Message, MessageFlags};
use crate::domain::page::{Page, PageRequest, total_pages};
use crate::error::{AppError, Result};
use crate::storage::message_repo::MessageRepository;

#[derive(Clone, Debug)]
pub struct MessageService {
    repo: MessageRepository,
}

impl MessageService {
    #[must_use]
    pub const fn new(repo: MessageRepository) -> Self {
        Self { repo }
    }

    /// Persists a new message from `sender`.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if receiver, subject, or body is empty
    /// after trimming.
    #[tracing::instrument(skip(self, sender, receiver, subject, body), err(level = "warn"))]
    pub async fn send(
        &self,
        sender: &str,
        receiver: &str,
        subject: &str,
        body: &str,
    ) -> Result<Message> {
        let receiver = receiver.trim();
        let subject = subject.trim();
        let body = body.trim();

        if receiver.is_empty() || subject.is_empty() || body.is_empty() {
            return Err(AppError::BadRequest("missing fields".to_string()));
        }

        self.repo.create(sender, receiver, subject, body).await
    }

    /// Lists one page of the identity's inbox or outbox, newest first,
    /// partitioned by the archived flag.
    #[tracing::instrument(skip(self, identity), err(level = "warn"))]
    pub async fn list(
        &self,
        identity: &str,
        direction: Direction,
        archived: bool,
        page: PageRequest,
    ) -> Result<Page<Message>> {
        let total_items = self.repo.count(identity, direction, archived).await?;
        let items = self.repo.list(identity, direction, archived, page).await?;

        Ok(Page {
            items,
            total_items,
            total_pages: total_pages(total_items, page.page_size()),
            current_page: page.page(),
            page_size: page.page_size(),
        })
    }

    /// Applies a partial flag update to messages the identity received.
    /// Returns the number of rows changed; ids addressed to someone else
    /// simply do not count.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if `ids` is empty or no flag is set.
    #[tracing::instrument(skip(self, identity), fields(count = ids.len()), err(level = "warn"))]
    pub async fn update_flags(
        &self,
        identity: &str,
        ids: &[i64],
        flags: MessageFlags,
    ) -> Result<u64> {
        if ids.is_empty() {
            return Err(AppError::BadRequest("no ids provided".to_string()));
        }
        if flags.is_empty() {
            return Err(AppError::BadRequest("no update fields provided".to_string()));
        }

        self.repo.update_flags(identity, ids, flags).await
    }

    /// Deletes messages the identity received. Same partial-count semantics
    /// as `update_flags`.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if `ids` is empty.
    #[tracing::instrument(skip(self, identity), fields(count = ids.len()), err(level = "warn"))]
    pub async fn delete(&self, identity: &str, ids: &[i64]) -> Result<u64> {
        if ids.is_empty() {
            return Err(AppError::BadRequest("no ids provided".to_string()));
        }

        self.repo.delete(identity, ids).await
    }
}
