// src/domain/repositories/repository.rs

use crate::domain::bookmark::{Bookmark, BookmarkId, DraftBookmark};
use crate::domain::error::DomainResult;
use async_trait::async_trait;

/*
   Repository Interface
   The remote bookmark service is the only store the client knows. Methods
   speak in domain terms; the HTTP details live in the infrastructure layer,
   and tests substitute an in-memory implementation.
*/
/// Remote bookmark collection
#[async_trait]
pub trait BookmarkRepository: std::fmt::Debug + Send + Sync {
    /// Fetch the full collection, in server order
    async fn list(&self) -> DomainResult<Vec<Bookmark>>;

    /// Fetch a single bookmark
    async fn get(&self, id: &BookmarkId) -> DomainResult<Bookmark>;

    /// Submit a draft for creation; the response body is not interpreted
    async fn create(&self, draft: &DraftBookmark) -> DomainResult<()>;

    /// Replace the fields of an existing bookmark
    async fn update(&self, id: &BookmarkId, fields: &DraftBookmark) -> DomainResult<()>;

    /// Delete a bookmark by id
    async fn delete(&self, id: &BookmarkId) -> DomainResult<()>;
}
