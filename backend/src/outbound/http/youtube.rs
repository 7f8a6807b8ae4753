//! Video search by scraping the YouTube results page.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;

use crate::domain::feeds::{SearchQuery, VideoId};
use crate::domain::ports::{UpstreamError, VideoSearch};

use super::fetch;

/// Results page queried with `search_query`.
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.youtube.com/results";

static WATCH_LINK: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"watch\?v=([A-Za-z0-9_-]{11})").ok());

/// Returns the first video linked from a search results page.
pub struct YoutubeSearch {
    client: Client,
    endpoint: String,
}

impl YoutubeSearch {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            endpoint: DEFAULT_SEARCH_ENDPOINT.to_owned(),
        }
    }
}

fn first_video_id(page: &str) -> Option<VideoId> {
    let captures = WATCH_LINK.as_ref()?.captures(page)?;
    VideoId::new(captures.get(1)?.as_str())
}

#[async_trait]
impl VideoSearch for YoutubeSearch {
    async fn first_video(&self, query: &SearchQuery) -> Result<Option<VideoId>, UpstreamError> {
        let request = self
            .client
            .get(&self.endpoint)
            .query(&[("search_query", query.as_str())]);
        let body = fetch(request).await?;
        Ok(first_video_id(&String::from_utf8_lossy(&body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{"url":"/watch?v=dQw4w9WgXcQ","next":"/watch?v=aaaaaaaaaaa"}"#, Some("dQw4w9WgXcQ"))]
    #[case(r#"<a href="/watch?v=abc">short</a> then /watch?v=Zz_-09Zz_-0"#, Some("Zz_-09Zz_-0"))]
    #[case("<html>no results</html>", None)]
    fn extracts_first_eleven_character_id(#[case] page: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            first_video_id(page).as_ref().map(VideoId::as_str),
            expected
        );
    }
}
