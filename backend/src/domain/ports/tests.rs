//! Behaviour of the port fixtures and port error formatting.

use super::*;
use crate::domain::PhotoUpload;
use crate::domain::feeds::{Coordinates, SearchQuery};
use actix_rt::System;
use rstest::rstest;

#[rstest]
fn fixture_feeds_return_empty_collections() {
    let feeds = FixtureFeeds;
    System::new().block_on(async move {
        let news = feeds.headlines(10).await.expect("news fixture succeeds");
        let events = feeds
            .nearby(Coordinates::default(), 50, 10)
            .await
            .expect("events fixture succeeds");
        let query = SearchQuery::new("lofi").expect("non-blank query");
        let video = feeds.first_video(&query).await.expect("search fixture succeeds");

        assert!(news.is_empty());
        assert!(events.is_empty());
        assert!(video.is_none());
    });
}

#[rstest]
fn fixture_weather_reports_unconfigured() {
    System::new().block_on(async {
        let err = FixtureFeeds
            .current(Coordinates::default())
            .await
            .expect_err("weather fixture has no data");
        assert!(matches!(err, UpstreamError::Unconfigured { .. }));
    });
}

#[rstest]
fn fixture_photo_store_names_without_writing() {
    let photo = PhotoUpload::try_new("me.png", vec![1])
        .expect("allowed extension")
        .expect("photo present");
    System::new().block_on(async move {
        let stored = FixturePhotoStore.save(&photo).await.expect("save succeeds");
        assert_eq!(stored, "0_me.png");
        FixturePhotoStore
            .remove(&stored)
            .await
            .expect("remove succeeds");
    });
}

#[rstest]
#[case(
    CredentialStoreError::duplicate_username("ada").to_string(),
    "username already registered: ada"
)]
#[case(
    CredentialStoreError::connection("pool timed out").to_string(),
    "credential store connection failed: pool timed out"
)]
#[case(
    UpstreamError::status(503_u16, "busy").to_string(),
    "upstream returned 503: busy"
)]
fn port_errors_render_messages(#[case] rendered: String, #[case] expected: &str) {
    assert_eq!(rendered, expected);
}
