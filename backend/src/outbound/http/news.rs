//! RSS headline adapter.
//!
//! Only RSS 2.0 `channel/item` documents are understood; each item's
//! `title`, `link` and `pubDate` pass through verbatim.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::feeds::NewsItem;
use crate::domain::ports::{NewsSource, UpstreamError};

use super::fetch;

/// Feed used unless the configuration names another.
pub const DEFAULT_NEWS_FEED: &str = "https://news.google.com/rss?hl=en-IN&gl=IN&ceid=IN:en";

/// News source reading one RSS feed.
pub struct RssNews {
    client: Client,
    feed_url: String,
}

impl RssNews {
    pub fn new(client: Client, feed_url: Option<String>) -> Self {
        Self {
            client,
            feed_url: feed_url.unwrap_or_else(|| DEFAULT_NEWS_FEED.to_owned()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RssDto {
    channel: ChannelDto,
}

#[derive(Debug, Deserialize)]
struct ChannelDto {
    #[serde(default, rename = "item")]
    items: Vec<ItemDto>,
}

#[derive(Debug, Deserialize)]
struct ItemDto {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
}

fn parse_feed(body: &[u8], limit: usize) -> Result<Vec<NewsItem>, UpstreamError> {
    let text = std::str::from_utf8(body)
        .map_err(|err| UpstreamError::decode(format!("feed is not UTF-8: {err}")))?;
    let feed: RssDto = quick_xml::de::from_str(text)
        .map_err(|err| UpstreamError::decode(format!("invalid RSS document: {err}")))?;
    Ok(feed
        .channel
        .items
        .into_iter()
        .take(limit)
        .map(|item| NewsItem {
            title: item.title,
            link: item.link,
            published: item.pub_date,
        })
        .collect())
}

#[async_trait]
impl NewsSource for RssNews {
    async fn headlines(&self, limit: usize) -> Result<Vec<NewsItem>, UpstreamError> {
        let body = fetch(self.client.get(&self.feed_url)).await?;
        parse_feed(&body, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Top stories</title>
    <link>https://news.example.com</link>
    <item>
      <title>First headline</title>
      <link>https://news.example.com/1</link>
      <pubDate>Sun, 18 Oct 2026 08:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Second headline</title>
      <link>https://news.example.com/2</link>
    </item>
    <item>
      <title>Third headline</title>
    </item>
  </channel>
</rss>"#;

    #[rstest]
    fn parses_items_in_feed_order() {
        let items = parse_feed(FEED.as_bytes(), 10).expect("feed should parse");

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title.as_deref(), Some("First headline"));
        assert_eq!(
            items[0].published.as_deref(),
            Some("Sun, 18 Oct 2026 08:00:00 GMT")
        );
        assert_eq!(items[1].published, None);
        assert_eq!(items[2].link, None);
    }

    #[rstest]
    fn respects_limit() {
        let items = parse_feed(FEED.as_bytes(), 2).expect("feed should parse");
        assert_eq!(items.len(), 2);
    }

    #[rstest]
    fn empty_channel_has_no_items() {
        let body = br#"<rss version="2.0"><channel><title>quiet</title></channel></rss>"#;
        assert!(parse_feed(body, 10).expect("feed should parse").is_empty());
    }

    #[rstest]
    fn non_rss_is_a_decode_error() {
        assert!(matches!(
            parse_feed(b"{\"not\": \"xml\"}", 10),
            Err(UpstreamError::Decode { .. })
        ));
    }
}
