use crate::domain::bookmark::{Bookmark, BookmarkId, DraftBookmark};
use crate::domain::error::DomainResult;
use crate::domain::repositories::repository::BookmarkRepository;
use crate::infrastructure::error::{InfrastructureError, InfrastructureResult};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

const COLLECTION_PATH: &str = "api/bookmarks";

/// Bookmark repository backed by the service's REST API
#[derive(Debug, Clone)]
pub struct HttpBookmarkRepository {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBookmarkRepository {
    /// `base_url` is treated as a directory: `http://host/app` and
    /// `http://host/app/` both resolve the collection to `http://host/app/api/bookmarks`.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> InfrastructureResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| InfrastructureError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn collection_url(&self) -> InfrastructureResult<Url> {
        Ok(self.base_url.join(COLLECTION_PATH)?)
    }

    fn item_url(&self, id: &BookmarkId) -> InfrastructureResult<Url> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|_| InfrastructureError::InvalidUrl(self.base_url.to_string()))?
            .push(id.as_str());
        Ok(url)
    }

    /// Send the request and turn any non-2xx status into an error carrying the body.
    async fn send(&self, request: RequestBuilder) -> InfrastructureResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Bookmark service returned {}: {}", status, body);
            return Err(InfrastructureError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

fn normalize_base_url(base_url: &str) -> InfrastructureResult<Url> {
    let mut url = Url::parse(base_url.trim())?;
    if url.cannot_be_a_base() {
        return Err(InfrastructureError::InvalidUrl(format!(
            "{} cannot be used as a base URL",
            base_url
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[async_trait]
impl BookmarkRepository for HttpBookmarkRepository {
    #[instrument(skip(self), level = "debug")]
    async fn list(&self) -> DomainResult<Vec<Bookmark>> {
        let url = self.collection_url()?;
        debug!("GET {}", url);
        let response = self.send(self.client.get(url)).await?;
        let body = response.bytes().await.map_err(InfrastructureError::from)?;
        let bookmarks: Vec<Bookmark> =
            serde_json::from_slice(&body).map_err(InfrastructureError::from)?;
        debug!("Fetched {} bookmarks", bookmarks.len());
        Ok(bookmarks)
    }

    #[instrument(skip(self, id), level = "debug", fields(id = %id))]
    async fn get(&self, id: &BookmarkId) -> DomainResult<Bookmark> {
        let url = self.item_url(id)?;
        debug!("GET {}", url);
        let response = self.send(self.client.get(url)).await?;
        let body = response.bytes().await.map_err(InfrastructureError::from)?;
        let bookmark: Bookmark = serde_json::from_slice(&body).map_err(InfrastructureError::from)?;
        Ok(bookmark)
    }

    #[instrument(skip(self, draft), level = "debug", fields(field_count = draft.fields().len()))]
    async fn create(&self, draft: &DraftBookmark) -> DomainResult<()> {
        let url = self.collection_url()?;
        debug!("POST {}", url);
        // .json() sets Content-Type: application/json
        self.send(self.client.post(url).json(draft)).await?;
        Ok(())
    }

    #[instrument(skip(self, id, fields), level = "debug", fields(id = %id))]
    async fn update(&self, id: &BookmarkId, fields: &DraftBookmark) -> DomainResult<()> {
        let url = self.item_url(id)?;
        debug!("PUT {}", url);
        self.send(self.client.put(url).json(fields)).await?;
        Ok(())
    }

    #[instrument(skip(self, id), level = "debug", fields(id = %id))]
    async fn delete(&self, id: &BookmarkId) -> DomainResult<()> {
        let url = self.item_url(id)?;
        debug!("DELETE {}", url);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
