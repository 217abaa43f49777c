// src/store.rs
// =============================================================================
// Saves downloaded pages to disk.
//
// Every page becomes one file directly under the output directory. The file
// name is built from the URL's host + path:
//
//   https://Example.com/Blog/My Post  ->  example.com_blog_my_post.html
//   https://example.com/              ->  example.com_.html
//
// Query strings and fragments are not part of the name, so pages that only
// differ by query overwrite each other.
// =============================================================================

use async_trait::async_trait;
use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

use crate::error::CrawlError;

#[async_trait]
pub trait PageStore: Send + Sync {
    // Creates the output root. Failing here aborts the run before any fetch.
    async fn prepare(&self) -> Result<(), CrawlError>;

    // Writes one page and returns the path it was written to
    async fn save(&self, url: &Url, content: &str) -> Result<PathBuf, CrawlError>;
}

#[derive(Debug, Clone)]
pub struct FsPageStore {
    root: PathBuf,
}

impl FsPageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, url: &Url) -> PathBuf {
        let host = url.host_str().unwrap_or_default();
        let name = sanitize_file_name(&format!("{}{}", host, url.path()));
        self.root.join(format!("{}.html", name))
    }
}

#[async_trait]
impl PageStore for FsPageStore {
    async fn prepare(&self) -> Result<(), CrawlError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CrawlError::storage(&self.root, e))
    }

    async fn save(&self, url: &Url, content: &str) -> Result<PathBuf, CrawlError> {
        let path = self.path_for(url);

        // create_dir_all is idempotent, so concurrent saves can both call it
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CrawlError::storage(parent, e))?;
        }

        tokio::fs::write(&path, content)
            .await
            .map_err(|e| CrawlError::storage(&path, e))?;

        debug!(url = %url, path = %path.display(), "page written");
        Ok(path)
    }
}

// Characters that are invalid in a file name on at least one common platform
const INVALID_CHARS: &str = r#"<>:"/\\|?*\x00-\x1f"#;

fn invalid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Either a run of trailing dots (optionally preceded by invalid chars)
        // or any run of invalid chars
        let pattern = format!(r"([{0}]*\.+$)|([{0}]+)", INVALID_CHARS);
        Regex::new(&pattern).expect("file name pattern is a valid regex")
    })
}

pub fn sanitize_file_name(raw: &str) -> String {
    invalid_pattern()
        .replace_all(raw, "_")
        .replace(' ', "_")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_separators() {
        assert_eq!(sanitize_file_name("example.com/blog/post"), "example.com_blog_post");
    }

    #[test]
    fn test_sanitize_collapses_runs() {
        assert_eq!(sanitize_file_name("a//b<>c"), "a_b_c");
    }

    #[test]
    fn test_sanitize_trailing_dots() {
        assert_eq!(sanitize_file_name("x.com/a."), "x.com_a_");
        assert_eq!(sanitize_file_name("x.com/a..."), "x.com_a_");
        assert_eq!(sanitize_file_name("x.com/..."), "x.com_");
    }

    #[test]
    fn test_sanitize_spaces_and_case() {
        assert_eq!(sanitize_file_name("Example.COM/My Page"), "example.com_my_page");
    }

    #[test]
    fn test_path_ignores_query_and_fragment() {
        let store = FsPageStore::new("out");
        let url = Url::parse("https://example.com/docs/intro?lang=en#top").unwrap();
        assert_eq!(
            store.path_for(&url),
            PathBuf::from("out").join("example.com_docs_intro.html")
        );
    }

    #[test]
    fn test_path_for_root_page() {
        let store = FsPageStore::new("out");
        let url = Url::parse("https://example.com").unwrap();
        assert_eq!(store.path_for(&url), PathBuf::from("out").join("example.com_.html"));
    }

    #[tokio::test]
    async fn test_prepare_and_save_write_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsPageStore::new(dir.path().join("nested").join("downloads"));
        store.prepare().await.unwrap();
        assert!(store.root.is_dir());

        let url = Url::parse("https://example.com/a/b").unwrap();
        let path = store.save(&url, "<html>b</html>").await.unwrap();
        assert_eq!(path, store.root.join("example.com_a_b.html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html>b</html>");
    }

    #[tokio::test]
    async fn test_prepare_fails_when_root_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("taken");
        std::fs::write(&file, "x").unwrap();

        let store = FsPageStore::new(&file);
        let err = store.prepare().await.unwrap_err();
        assert!(matches!(err, CrawlError::Storage { .. }));
    }
}
