use crate::application::error::ApplicationResult;
use crate::application::BookmarkClient;
use crate::config::Settings;
use crate::infrastructure::http::HttpBookmarkRepository;
use std::sync::Arc;
use tracing::debug;

/// Production service container - single source of truth for service creation
pub struct ServiceContainer {
    pub repository: Arc<HttpBookmarkRepository>,
    pub client: Arc<BookmarkClient<HttpBookmarkRepository>>,
}

impl ServiceContainer {
    pub fn new(config: &Settings) -> ApplicationResult<Self> {
        let repository = Arc::new(
            HttpBookmarkRepository::new(&config.base_url, config.timeout())
                .map_err(|e| {
                    crate::application::error::ApplicationError::from(e)
                        .context("Failed to create bookmark service client")
                })?,
        );
        debug!("Bookmark service at {}", repository.base_url());

        let client = Arc::new(BookmarkClient::new(repository.clone()));

        Ok(Self { repository, client })
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("base_url", &self.repository.base_url().as_str())
            .field("client", &"Arc<BookmarkClient<HttpBookmarkRepository>>")
            .finish()
    }
}
