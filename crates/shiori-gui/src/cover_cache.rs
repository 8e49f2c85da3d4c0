use std::collections::HashMap;
use std::path::PathBuf;

use shiori_api::TrackerClient;

/// Where a cover image stands for one tracked entry.
#[derive(Debug, Clone)]
pub enum CoverState {
    Loading,
    Loaded(PathBuf),
    Failed,
}

/// Tracks cover images kept on disk, keyed by entry id.
///
/// Cache file names are derived from the backend's image path rather
/// than the entry id, so removing and re-adding the same catalog entry
/// reuses the file already on disk.
#[derive(Debug)]
pub struct CoverCache {
    states: HashMap<i64, CoverState>,
    dir: PathBuf,
}

impl CoverCache {
    pub fn new() -> Self {
        let dir = directories::ProjectDirs::from("", "", "shiori")
            .map(|dirs| dirs.data_dir().join("covers"))
            .unwrap_or_else(|| PathBuf::from("covers"));
        Self {
            states: HashMap::new(),
            dir,
        }
    }

    pub fn state(&self, id: i64) -> Option<&CoverState> {
        self.states.get(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.states.contains_key(&id)
    }

    pub fn set(&mut self, id: i64, state: CoverState) {
        self.states.insert(id, state);
    }

    /// On-disk location for a backend image path.
    pub fn disk_path(&self, image_path: &str) -> PathBuf {
        self.dir.join(cache_file_name(image_path))
    }
}

/// Flatten a backend image path into a cache file name: the last path
/// segment, with anything unsafe in a file name replaced by an
/// underscore. The backend serves one image per catalog entry, so the
/// segment is unique enough.
fn cache_file_name(image_path: &str) -> String {
    let segment = image_path
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(image_path);
    let name: String = segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if name.is_empty() {
        "cover".to_string()
    } else {
        name
    }
}

/// Fetch one cover through the backend client and write it to `dest`.
pub async fn download(
    client: TrackerClient,
    image_path: String,
    dest: PathBuf,
) -> Result<PathBuf, String> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    let bytes = client
        .fetch_image(&image_path)
        .await
        .map_err(|e| e.to_string())?;
    std::fs::write(&dest, &bytes).map_err(|e| e.to_string())?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_file_name_keeps_the_last_segment() {
        assert_eq!(cache_file_name("/api/image/73862.jpg"), "73862.jpg");
        assert_eq!(
            cache_file_name("https://cdn.example.net/covers/912.png"),
            "912.png"
        );
    }

    #[test]
    fn test_cache_file_name_sanitizes_odd_paths() {
        assert_eq!(cache_file_name("/img?id=5&size=lg"), "img_id_5_size_lg");
        assert_eq!(cache_file_name("///"), "cover");
    }
}
