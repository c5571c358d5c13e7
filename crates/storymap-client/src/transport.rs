//! HTTP transport
//!
//! REST client for a remote story service. Routes, relative to the
//! configured base URL:
//!
//! - `POST /stories` with a [`StoryDraft`] body, answers the stored [`Story`]
//! - `POST /stories/filter` with `{"ids": [...]}`, answers a story array
//! - `GET /theme-rooms/{id}/stories`, answers a story array

use reqwest::Url;
use serde::{Serialize, de::DeserializeOwned};
use storymap_core::{Story, StoryDraft, StoryId, ThemeRoomId};

use crate::{ApiConfig, RequestError, StoryApi};

/// Body of a filtered fetch.
#[derive(Serialize)]
struct FilterRequest<'a> {
    ids: &'a [StoryId],
}

/// Story API over HTTP.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct HttpStoryApi {
    client: reqwest::Client,
    config: ApiConfig,
}

impl HttpStoryApi {
    /// Build a client for the service described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Transport`] if the TLS backend or connection
    /// pool cannot be initialized.
    pub fn new(config: ApiConfig) -> Result<Self, RequestError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Connection settings in use.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Listing URL for one room. The id is percent-encoded as a single path
    /// segment, so `#`, `?` and `%` in an id never leak into the query or
    /// fragment.
    fn room_stories_url(&self, theme_room_id: &ThemeRoomId) -> Result<Url, RequestError> {
        let invalid = |reason: String| RequestError::Transport(format!("invalid API URL: {reason}"));

        let mut url = Url::parse(&self.config.endpoint("/theme-rooms"))
            .map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid(format!("{} cannot be a base", self.config.base_url)))?
            .push(theme_room_id.as_str())
            .push("stories");
        Ok(url)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, RequestError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(RequestError::Rejected { status, message });
        }

        response.json().await.map_err(|e| RequestError::Decode(e.to_string()))
    }
}

impl StoryApi for HttpStoryApi {
    async fn create_story(&self, draft: StoryDraft) -> Result<Story, RequestError> {
        let url = self.config.endpoint("/stories");
        tracing::debug!(%url, story_type = %draft.story_type, "creating story");

        let response = self
            .client
            .post(url)
            .json(&draft)
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        Self::decode(response).await
    }

    async fn fetch_filtered_stories(&self, ids: Vec<StoryId>) -> Result<Vec<Story>, RequestError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.config.endpoint("/stories/filter");
        tracing::debug!(%url, count = ids.len(), "fetching stories");

        let response = self
            .client
            .post(url)
            .json(&FilterRequest { ids: &ids })
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        Self::decode(response).await
    }

    async fn fetch_theme_room_stories(
        &self,
        theme_room_id: ThemeRoomId,
    ) -> Result<Vec<Story>, RequestError> {
        let url = self.room_stories_url(&theme_room_id)?;
        tracing::debug!(%url, "fetching theme room");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;

        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_url_embeds_id() {
        let api = HttpStoryApi::new(ApiConfig::new("http://localhost:5000/api/")).unwrap();
        assert_eq!(
            api.room_stories_url(&"r7".into()).unwrap().as_str(),
            "http://localhost:5000/api/theme-rooms/r7/stories"
        );
    }

    #[test]
    fn room_url_encodes_reserved_characters() {
        let api = HttpStoryApi::new(ApiConfig::new("http://localhost:5000/api")).unwrap();

        let url = api.room_stories_url(&"a#b".into()).unwrap();
        assert_eq!(url.path(), "/api/theme-rooms/a%23b/stories");
        assert_eq!(url.fragment(), None);

        let url = api.room_stories_url(&"a?b/c".into()).unwrap();
        assert_eq!(url.path(), "/api/theme-rooms/a%3Fb%2Fc/stories");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn filter_body_shape() {
        let ids = vec![StoryId::new("s1"), StoryId::new("s2")];
        let body = serde_json::to_value(FilterRequest { ids: &ids }).unwrap();
        assert_eq!(body, serde_json::json!({ "ids": ["s1", "s2"] }));
    }

    #[tokio::test]
    async fn empty_filter_skips_network() {
        // Nothing listens on port 9; the request would fail if sent.
        let api = HttpStoryApi::new(ApiConfig::new("http://127.0.0.1:9")).unwrap();
        assert_eq!(api.fetch_filtered_stories(Vec::new()).await, Ok(Vec::new()));
    }
}
