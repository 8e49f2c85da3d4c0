use reqwest::Client;
use shiori_core::models::Anime;

use crate::error::ApiError;
use crate::types::{
    AddRequest, AddResponse, RemoveResponse, SearchHit, SearchResponse, UpdateAction,
    UpdateRequest, UpdateResponse,
};

/// One page of search results.
#[derive(Debug)]
pub struct SearchPage {
    pub hits: Vec<SearchHit>,
    pub total: u32,
}

/// Outcome of an add request the backend answered.
///
/// `Rejected` carries the server's message verbatim (duplicate entry,
/// unknown catalog id); transport and HTTP-level failures are
/// [`ApiError`]s instead.
#[derive(Debug, Clone)]
pub enum AddOutcome {
    Added(Anime),
    Rejected(String),
}

/// Client for the tracker backend's JSON API.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    base_url: String,
    http: Client,
}

impl TrackerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status, "tracker API error");
            Err(ApiError::Api {
                status,
                message: body,
            })
        }
    }

    /// Fetch the full tracked list. Called once at startup.
    pub async fn list(&self) -> Result<Vec<Anime>, ApiError> {
        let resp = self
            .http
            .get(format!("{}/api/list", self.base_url))
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Search the catalog. Pages are 1-based.
    pub async fn search(&self, query: &str, page: u32) -> Result<SearchPage, ApiError> {
        let resp = self
            .http
            .get(format!("{}/api/search", self.base_url))
            .query(&[("q", query), ("page", &page.to_string())])
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: SearchResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(SearchPage {
            hits: body.results,
            total: body.total,
        })
    }

    /// Add a catalog entry to the list by its external id.
    pub async fn add(&self, aid: u64) -> Result<AddOutcome, ApiError> {
        let resp = self
            .http
            .post(format!("{}/api/add", self.base_url))
            .json(&AddRequest { aid })
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: AddResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        if body.success {
            let anime = body
                .anime
                .ok_or_else(|| ApiError::Parse("add succeeded without a record".into()))?;
            Ok(AddOutcome::Added(anime))
        } else {
            Ok(AddOutcome::Rejected(
                body.message.unwrap_or_else(|| "add failed".into()),
            ))
        }
    }

    /// Remove a tracked entry. The caller touches its local state only
    /// after this returns `Ok`.
    pub async fn remove(&self, id: i64) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(format!("{}/api/remove/{id}", self.base_url))
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: RemoveResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        if body.success {
            Ok(())
        } else {
            Err(ApiError::Api {
                status: 200,
                message: body.message.unwrap_or_else(|| "remove failed".into()),
            })
        }
    }

    /// Step an entry's watched count. Returns the authoritative count;
    /// the backend clamps, the client never does.
    pub async fn update(&self, id: i64, action: UpdateAction) -> Result<u32, ApiError> {
        let resp = self
            .http
            .post(format!("{}/api/update/{id}", self.base_url))
            .json(&UpdateRequest { action })
            .send()
            .await?;

        let resp = Self::check_response(resp).await?;
        let body: UpdateResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        if body.success {
            Ok(body.watched_episodes)
        } else {
            Err(ApiError::Api {
                status: 200,
                message: "update failed".into(),
            })
        }
    }

    /// Resolve a record's image URL against the backend base.
    pub fn image_url(&self, image_path: &str) -> String {
        if image_path.starts_with("http://") || image_path.starts_with("https://") {
            image_path.to_string()
        } else {
            format!("{}/{}", self.base_url, image_path.trim_start_matches('/'))
        }
    }

    /// Fetch raw cover-image bytes. Relative paths go through the
    /// backend's image proxy; absolute URLs are fetched directly.
    pub async fn fetch_image(&self, image_path: &str) -> Result<Vec<u8>, ApiError> {
        let resp = self.http.get(self.image_url(image_path)).send().await?;
        let resp = Self::check_response(resp).await?;
        let bytes = resp.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = TrackerClient::new("http://127.0.0.1:5000/");
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn test_image_url_resolution() {
        let client = TrackerClient::new("http://127.0.0.1:5000");
        assert_eq!(
            client.image_url("/api/image/73862.jpg"),
            "http://127.0.0.1:5000/api/image/73862.jpg"
        );
        assert_eq!(
            client.image_url("https://cdn.example.net/73862.jpg"),
            "https://cdn.example.net/73862.jpg"
        );
    }
}
