use serde::{Deserialize, Serialize};

/// A tracked anime, as stored by the backend and mirrored locally.
///
/// `id` is the backend's stable row id; `aid` is the external catalog
/// id the entry was added from. Dates are opaque backend strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anime {
    pub id: i64,
    pub aid: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub anime_type: String,
    pub image_url: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub total_episodes: u32,
    pub watched_episodes: u32,
}

impl Anime {
    /// Watch progress as a whole percentage, floored.
    ///
    /// A total of zero means progress is undefined and reports 0 —
    /// it is never divided into.
    pub fn progress_percent(&self) -> u8 {
        if self.total_episodes == 0 {
            return 0;
        }
        let pct = u64::from(self.watched_episodes) * 100 / u64::from(self.total_episodes);
        pct.min(100) as u8
    }

    /// Completed iff there is a known total and it has been reached.
    ///
    /// Recomputed from the store on every progress change; never cached.
    pub fn is_completed(&self) -> bool {
        self.total_episodes > 0 && self.watched_episodes >= self.total_episodes
    }

    /// Date range for display: present dates joined with an en dash.
    pub fn date_range(&self) -> String {
        match (self.start_date.as_deref(), self.end_date.as_deref()) {
            (Some(s), Some(e)) => format!("{s} \u{2013} {e}"),
            (Some(s), None) => s.to_string(),
            (None, Some(e)) => e.to_string(),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anime(watched: u32, total: u32) -> Anime {
        Anime {
            id: 1,
            aid: 17617,
            title: "Sousou no Frieren".into(),
            description: String::new(),
            anime_type: "TV Series".into(),
            image_url: None,
            start_date: Some("2023-09-29".into()),
            end_date: Some("2024-03-22".into()),
            total_episodes: total,
            watched_episodes: watched,
        }
    }

    #[test]
    fn test_progress_is_floored() {
        assert_eq!(anime(11, 12).progress_percent(), 91);
        assert_eq!(anime(1, 3).progress_percent(), 33);
        assert_eq!(anime(2, 3).progress_percent(), 66);
    }

    #[test]
    fn test_zero_total_is_undefined_progress() {
        assert_eq!(anime(5, 0).progress_percent(), 0);
        assert!(!anime(5, 0).is_completed());
    }

    #[test]
    fn test_completion_boundary() {
        assert!(!anime(11, 12).is_completed());
        assert!(anime(12, 12).is_completed());
        assert_eq!(anime(12, 12).progress_percent(), 100);
    }

    #[test]
    fn test_overshoot_caps_at_100() {
        // Backend is authoritative; a count above total still displays sanely.
        assert_eq!(anime(14, 12).progress_percent(), 100);
        assert!(anime(14, 12).is_completed());
    }

    #[test]
    fn test_date_range() {
        assert_eq!(anime(0, 1).date_range(), "2023-09-29 \u{2013} 2024-03-22");
        let mut a = anime(0, 1);
        a.end_date = None;
        assert_eq!(a.date_range(), "2023-09-29");
        a.start_date = None;
        assert_eq!(a.date_range(), "");
    }

    #[test]
    fn test_deserialize_backend_record() {
        let json = r#"{
            "id": 3,
            "aid": 11123,
            "title": "Mushishi",
            "description": "They are neither plants nor animals.",
            "anime_type": "TV Series",
            "image_url": "/api/image/73862.jpg",
            "start_date": "2005-10-23",
            "end_date": "2006-06-19",
            "total_episodes": 26,
            "watched_episodes": 4
        }"#;
        let a: Anime = serde_json::from_str(json).unwrap();
        assert_eq!(a.id, 3);
        assert_eq!(a.total_episodes, 26);
        assert_eq!(a.progress_percent(), 15);
    }
}
