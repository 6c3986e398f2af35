//! End-to-end word-map runs against a mocked Media Cloud API.

use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wordmap_core::{
    MapOptions, MediaId, MediaSource, TermCount, TopMediaSort, TopicScope, WordSet,
};
use wordmap_mediacloud::MediaCloudClient;
use wordmap_network::export::read_d3;
use wordmap_network::{
    create_word_map_files, fetch_top_words, generate_network_of_frames, remove_word_source,
    select_sources, NetworkError, RunLock,
};

const SCOPE: TopicScope = TopicScope {
    topics_id: 7,
    timespans_id: Some(11),
};

fn test_client(server: &MockServer) -> MediaCloudClient {
    MediaCloudClient::with_base_url(
        "test-key",
        &format!("{}/api/v2", server.uri()),
        30,
        "wordmap-test/0.1",
    )
    .expect("client construction should not fail")
    .with_retry_policy(0, 0)
}

async fn mount_media_list(server: &MockServer, limit: &str, media: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v2/topics/7/media/list"))
        .and(query_param("limit", limit))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "media": media })),
        )
        .mount(server)
        .await;
}

async fn mount_words(server: &MockServer, media_id: i64, terms: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v2/topics/7/wc/list"))
        .and(query_param("q", format!("media_id:{media_id}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(terms))
        .mount(server)
        .await;
}

fn options(num_sources: usize, num_words: usize) -> MapOptions {
    MapOptions {
        num_sources,
        num_words,
        ..MapOptions::default()
    }
}

#[tokio::test]
async fn full_run_writes_all_three_files() {
    let server = MockServer::start().await;
    mount_media_list(
        &server,
        "2",
        serde_json::json!([
            { "media_id": 1, "name": "A" },
            { "media_id": 2, "name": "B" }
        ]),
    )
    .await;
    mount_words(
        &server,
        1,
        serde_json::json!([{ "term": "x", "count": 5 }, { "term": "y", "count": 2 }]),
    )
    .await;
    mount_words(&server, 2, serde_json::json!([{ "term": "x", "count": 3 }])).await;

    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("topic-7");
    let client = test_client(&server);

    let files = create_word_map_files(&client, SCOPE, &base, &options(2, 10), 4)
        .await
        .expect("run should succeed");

    assert_eq!(files.gexf_path, dir.path().join("topic-7.gexf"));
    assert_eq!(files.json_path, dir.path().join("topic-7.json"));
    assert_eq!(files.word_list_path, Some(dir.path().join("topic-7.txt")));
    assert!(files.gexf_path.exists());
    assert!(!RunLock::is_held(&base));

    let graph = read_d3(&files.json_path).unwrap();
    assert_eq!(graph.nodes.len(), 4);
    assert_eq!(graph.links.len(), 3);
    let x_in = graph.links.iter().filter(|l| l.target == "x").count();
    assert_eq!(x_in, 2);

    let words = std::fs::read_to_string(dir.path().join("topic-7.txt")).unwrap();
    assert!(words.contains("A (media id: 1):\n- x (5)\n- y (2)\n"));
    assert!(words.contains("B (media id: 2):\n- x (3)\n"));
}

#[tokio::test]
async fn generate_returns_the_gexf_written_to_disk() {
    let server = MockServer::start().await;
    mount_media_list(&server, "1", serde_json::json!([{ "media_id": 1, "name": "A" }])).await;
    mount_words(&server, 1, serde_json::json!([{ "term": "x", "count": 5 }])).await;

    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("map");
    let mut opts = options(1, 10);
    opts.generate_word_lists = false;

    let doc = generate_network_of_frames(&test_client(&server), SCOPE, &base, &opts, 2)
        .await
        .unwrap();

    assert_eq!(std::fs::read_to_string(dir.path().join("map.gexf")).unwrap(), doc);
    assert!(doc.contains("<edge source=\"A\" target=\"x\" id=\"0\" weight=\"5\"/>"));
    assert!(!dir.path().join("map.txt").exists());
}

#[tokio::test]
async fn exclusions_widen_the_ranked_fetch_and_drop_named_sources() {
    let server = MockServer::start().await;
    // limit = 2 wanted + 1 excluded
    mount_media_list(
        &server,
        "3",
        serde_json::json!([
            { "media_id": 1, "name": "Twitter" },
            { "media_id": 2, "name": "A" },
            { "media_id": 3, "name": "B" }
        ]),
    )
    .await;
    mount_words(&server, 2, serde_json::json!([{ "term": "x", "count": 1 }])).await;
    mount_words(&server, 3, serde_json::json!([{ "term": "y", "count": 1 }])).await;

    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("map");
    let mut opts = options(2, 10);
    opts.excluded_sources = vec!["Twitter".to_string()];

    generate_network_of_frames(&test_client(&server), SCOPE, &base, &opts, 2)
        .await
        .unwrap();

    let graph = read_d3(&dir.path().join("map.json")).unwrap();
    assert!(graph.nodes.iter().all(|n| n.id != "Twitter"));
    assert!(graph.nodes.iter().any(|n| n.id == "A"));
    assert!(graph.nodes.iter().any(|n| n.id == "B"));
}

#[tokio::test]
async fn stopwords_widen_the_word_fetch_and_are_stripped() {
    let server = MockServer::start().await;
    mount_media_list(&server, "1", serde_json::json!([{ "media_id": 1, "name": "A" }])).await;
    // num_words = 2 wanted + 2 stopwords
    Mock::given(method("GET"))
        .and(path("/api/v2/topics/7/wc/list"))
        .and(query_param("q", "media_id:1"))
        .and(query_param("num_words", "4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "term": "said", "count": 9 },
            { "term": "vote", "count": 8 },
            { "term": "the", "count": 7 },
            { "term": "tax", "count": 6 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("map");
    let mut opts = options(1, 2);
    opts.stopwords = vec!["said".to_string(), "the".to_string()];

    generate_network_of_frames(&test_client(&server), SCOPE, &base, &opts, 1)
        .await
        .unwrap();

    let graph = read_d3(&dir.path().join("map.json")).unwrap();
    let targets: Vec<&str> = graph.links.iter().map(|l| l.target.as_str()).collect();
    assert_eq!(targets, vec!["vote", "tax"]);
}

#[tokio::test]
async fn explicit_media_list_skips_the_ranking_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/topics/7/media/list"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;
    mount_words(&server, 42, serde_json::json!([{ "term": "z", "count": 4 }])).await;

    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("map");
    let mut opts = options(50, 10);
    opts.include_media = Some(vec![MediaSource::new(42, "Chosen")]);

    generate_network_of_frames(&test_client(&server), SCOPE, &base, &opts, 2)
        .await
        .unwrap();

    let graph = read_d3(&dir.path().join("map.json")).unwrap();
    assert_eq!(graph.links.len(), 1);
    assert_eq!(graph.links[0].source, "Chosen");
}

#[tokio::test]
async fn failed_fetch_writes_nothing_and_releases_the_lock() {
    let server = MockServer::start().await;
    mount_media_list(
        &server,
        "2",
        serde_json::json!([
            { "media_id": 1, "name": "A" },
            { "media_id": 2, "name": "B" }
        ]),
    )
    .await;
    mount_words(&server, 1, serde_json::json!([{ "term": "x", "count": 5 }])).await;
    Mock::given(method("GET"))
        .and(path("/api/v2/topics/7/wc/list"))
        .and(query_param("q", "media_id:2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("map");

    let err = create_word_map_files(&test_client(&server), SCOPE, &base, &options(2, 10), 2)
        .await
        .unwrap_err();

    assert!(matches!(err, NetworkError::WordFetch { media_id: 2, .. }));
    assert!(!dir.path().join("map.gexf").exists());
    assert!(!dir.path().join("map.json").exists());
    assert!(!RunLock::is_held(&base));
}

#[tokio::test]
async fn lock_is_held_while_the_run_is_in_flight() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/topics/7/media/list"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "media": [{ "media_id": 1, "name": "A" }] }))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&server)
        .await;
    mount_words(&server, 1, serde_json::json!([{ "term": "x", "count": 1 }])).await;

    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("map");
    let client = test_client(&server);

    let run = {
        let base = base.clone();
        tokio::spawn(async move {
            create_word_map_files(&client, SCOPE, &base, &options(1, 10), 1).await
        })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(RunLock::is_held(&base));

    run.await.unwrap().unwrap();
    assert!(!RunLock::is_held(&base));
}

#[tokio::test]
async fn remove_word_source_drops_the_unique_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/media/list"))
        .and(query_param("name", "Twitter"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "media_id": 1095, "name": "Twitter" }])),
        )
        .mount(&server)
        .await;

    let mut word_set: WordSet = vec![
        (1095, vec![TermCount::new("rt", 9)]),
        (1, vec![TermCount::new("x", 1)]),
    ]
    .into_iter()
    .collect();

    remove_word_source(&test_client(&server), "Twitter", &mut word_set)
        .await
        .unwrap();

    assert!(!word_set.contains(1095));
    assert!(word_set.contains(1));
}

#[tokio::test]
async fn remove_word_source_ignores_ambiguous_and_missing_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/media/list"))
        .and(query_param("name", "Daily News"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "media_id": 1, "name": "Daily News" },
            { "media_id": 2, "name": "Daily News" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v2/media/list"))
        .and(query_param("name", "Nobody"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let mut word_set: WordSet = vec![
        (1, vec![TermCount::new("a", 1)]),
        (2, vec![TermCount::new("b", 1)]),
    ]
    .into_iter()
    .collect();
    let client = test_client(&server);

    remove_word_source(&client, "Daily News", &mut word_set).await.unwrap();
    remove_word_source(&client, "Nobody", &mut word_set).await.unwrap();

    assert_eq!(word_set.len(), 2);
}

async fn mount_delayed_words(server: &MockServer, media_id: i64, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path("/api/v2/topics/7/wc/list"))
        .and(query_param("q", format!("media_id:{media_id}").as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "term": "w", "count": media_id }]))
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetched_word_set_follows_source_order_not_completion_order() {
    let server = MockServer::start().await;
    mount_delayed_words(&server, 1, 300).await;
    mount_delayed_words(&server, 2, 0).await;
    mount_delayed_words(&server, 3, 150).await;

    let sources = vec![
        MediaSource::new(1, "A"),
        MediaSource::new(2, "B"),
        MediaSource::new(3, "C"),
    ];

    let word_set = fetch_top_words(&test_client(&server), &sources, SCOPE, 0, 10, 3)
        .await
        .unwrap();

    let ids: Vec<MediaId> = word_set.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(word_set.get(3), Some(&[TermCount::new("w", 3)][..]));
}

#[tokio::test]
async fn repeated_media_id_is_fetched_once() {
    let server = MockServer::start().await;
    mount_delayed_words(&server, 1, 0).await;
    mount_delayed_words(&server, 2, 0).await;

    let sources = vec![
        MediaSource::new(1, "A"),
        MediaSource::new(2, "B"),
        MediaSource::new(1, "A again"),
    ];

    let word_set = fetch_top_words(&test_client(&server), &sources, SCOPE, 0, 10, 4)
        .await
        .unwrap();

    let ids: Vec<MediaId> = word_set.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn oversized_word_count_saturates_instead_of_overflowing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/topics/7/wc/list"))
        .and(query_param("num_words", usize::MAX.to_string().as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{ "term": "x", "count": 1 }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let sources = vec![MediaSource::new(1, "A")];
    let word_set = fetch_top_words(&test_client(&server), &sources, SCOPE, 2, usize::MAX, 1)
        .await
        .unwrap();

    assert_eq!(word_set.len(), 1);
}

#[tokio::test]
async fn oversized_source_count_saturates_instead_of_overflowing() {
    let server = MockServer::start().await;
    mount_media_list(
        &server,
        usize::MAX.to_string().as_str(),
        serde_json::json!([
            { "media_id": 1, "name": "Twitter" },
            { "media_id": 2, "name": "A" }
        ]),
    )
    .await;

    let sources = select_sources(
        &test_client(&server),
        SCOPE,
        usize::MAX,
        TopMediaSort::Inlink,
        &["Twitter".to_string()],
        None,
    )
    .await
    .unwrap();

    assert_eq!(sources, vec![MediaSource::new(2, "A")]);
}
