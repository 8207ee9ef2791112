//! Feed assembly properties: strict join, ordering, batching

mod common;

use chrono::{TimeZone, Utc};
use common::{profile, FakeIdentityProvider};
use emote_service::error::AppError;
use emote_service::models::Post;
use emote_service::services::FeedAssembler;
use std::sync::Arc;

fn post(id: i64, author_id: &str, epoch_secs: i64) -> Post {
    Post {
        id,
        author_id: author_id.to_string(),
        content: "😀".to_string(),
        created_at: Utc.timestamp_opt(epoch_secs, 0).unwrap(),
    }
}

#[tokio::test]
async fn empty_input_skips_the_provider() {
    let identity = Arc::new(FakeIdentityProvider::empty());
    let assembler = FeedAssembler::new(identity.clone());

    let enriched = assembler.enrich(Vec::new()).await.unwrap();

    assert!(enriched.is_empty());
    assert_eq!(identity.batch_call_count(), 0);
}

#[tokio::test]
async fn one_batched_call_for_many_posts() {
    let identity = Arc::new(FakeIdentityProvider::new(vec![
        profile("u1", Some("alice")),
        profile("u2", Some("bob")),
    ]));
    let assembler = FeedAssembler::new(identity.clone());

    let posts = vec![
        post(1, "u1", 10),
        post(2, "u2", 20),
        post(3, "u1", 30),
        post(4, "u2", 40),
    ];

    let enriched = assembler.enrich(posts).await.unwrap();

    assert_eq!(enriched.len(), 4);
    assert_eq!(identity.batch_call_count(), 1);
}

#[tokio::test]
async fn output_order_matches_input_order() {
    let identity = Arc::new(FakeIdentityProvider::new(vec![
        profile("u1", Some("alice")),
        profile("u2", Some("bob")),
    ]));
    let assembler = FeedAssembler::new(identity);

    let posts = vec![post(2, "u2", 20), post(1, "u1", 10)];
    let enriched = assembler.enrich(posts).await.unwrap();

    assert_eq!(enriched[0].post.id, 2);
    assert_eq!(enriched[0].author.username, "bob");
    assert_eq!(enriched[1].post.id, 1);
    assert_eq!(enriched[1].author.username, "alice");
}

#[tokio::test]
async fn missing_author_fails_the_whole_call() {
    // provider only knows about u1
    let identity = Arc::new(FakeIdentityProvider::new(vec![profile("u1", Some("alice"))]));
    let assembler = FeedAssembler::new(identity);

    let posts = vec![post(1, "u1", 10), post(2, "u2", 20)];
    let result = assembler.enrich(posts).await;

    assert!(matches!(result, Err(AppError::Enrichment(_))));
}

#[tokio::test]
async fn author_without_username_fails_the_whole_call() {
    let identity = Arc::new(FakeIdentityProvider::new(vec![
        profile("u1", Some("alice")),
        profile("u2", None),
    ]));
    let assembler = FeedAssembler::new(identity);

    let posts = vec![post(1, "u1", 10), post(2, "u2", 20)];
    let result = assembler.enrich(posts).await;

    assert!(matches!(result, Err(AppError::Enrichment(_))));
}
