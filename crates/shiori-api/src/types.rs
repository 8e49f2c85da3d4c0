//! Wire types for the tracker backend's JSON API.

use serde::{Deserialize, Serialize};
use shiori_core::models::Anime;

/// One hit from `GET /api/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub aid: u64,
    pub title: String,
}

/// Response body of `GET /api/search?q=..&page=..`.
///
/// `total` counts all matches across pages; `results` is one page.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
    pub total: u32,
}

/// Request body of `POST /api/add`.
#[derive(Debug, Serialize)]
pub struct AddRequest {
    pub aid: u64,
}

/// Response body of `POST /api/add`.
///
/// On success the backend echoes the full new record; on an explicit
/// rejection (duplicate entry, unknown aid) it sends `success: false`
/// with a human-readable `message` to surface verbatim.
#[derive(Debug, Deserialize)]
pub struct AddResponse {
    pub success: bool,
    pub anime: Option<Anime>,
    pub message: Option<String>,
}

/// Response body of `DELETE /api/remove/<id>`.
#[derive(Debug, Deserialize)]
pub struct RemoveResponse {
    pub success: bool,
    pub message: Option<String>,
}

/// Direction of an episode-count update.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateAction {
    Increment,
    Decrement,
}

/// Request body of `POST /api/update/<id>`.
#[derive(Debug, Serialize)]
pub struct UpdateRequest {
    pub action: UpdateAction,
}

/// Response body of `POST /api/update/<id>`.
///
/// `watched_episodes` is the authoritative count after clamping
/// server-side; the client applies it as-is.
#[derive(Debug, Deserialize)]
pub struct UpdateResponse {
    pub success: bool,
    pub watched_episodes: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_response() {
        let json = r#"{
            "results": [
                {"aid": 17617, "title": "Sousou no Frieren"},
                {"aid": 4563, "title": "Toki wo Kakeru Shoujo"}
            ],
            "total": 37
        }"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.results.len(), 2);
        assert_eq!(resp.results[0].aid, 17617);
        assert_eq!(resp.total, 37);
    }

    #[test]
    fn test_deserialize_add_success() {
        let json = r#"{
            "success": true,
            "anime": {
                "id": 9,
                "aid": 11123,
                "title": "Mushishi",
                "description": "",
                "anime_type": "TV Series",
                "image_url": null,
                "start_date": "2005-10-23",
                "end_date": "2006-06-19",
                "total_episodes": 26,
                "watched_episodes": 0
            }
        }"#;
        let resp: AddResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.anime.unwrap().title, "Mushishi");
        assert!(resp.message.is_none());
    }

    #[test]
    fn test_deserialize_add_rejection() {
        let json = r#"{"success": false, "message": "Anime is already in your list"}"#;
        let resp: AddResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.success);
        assert!(resp.anime.is_none());
        assert_eq!(resp.message.as_deref(), Some("Anime is already in your list"));
    }

    #[test]
    fn test_deserialize_update_response() {
        let json = r#"{"success": true, "watched_episodes": 12}"#;
        let resp: UpdateResponse = serde_json::from_str(json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.watched_episodes, 12);
    }

    #[test]
    fn test_serialize_update_action_lowercase() {
        let body = serde_json::to_string(&UpdateRequest {
            action: UpdateAction::Increment,
        })
        .unwrap();
        assert_eq!(body, r#"{"action":"increment"}"#);

        let body = serde_json::to_string(&UpdateRequest {
            action: UpdateAction::Decrement,
        })
        .unwrap();
        assert_eq!(body, r#"{"action":"decrement"}"#);
    }
}
