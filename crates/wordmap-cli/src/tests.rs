use std::collections::HashMap;
use std::path::{Path, PathBuf};

use wordmap_core::{AppConfig, Environment, MapProfile};

use super::*;
use crate::word_map::{build_options, profile_path, WordMapArgs};

fn word_map_args(cli: Cli) -> WordMapArgs {
    match cli.command {
        Commands::WordMap {
            topic,
            timespan,
            out,
            sort,
            sources,
            words,
            exclude_sources,
            stopwords,
            no_word_lists,
            profile,
        } => WordMapArgs {
            topic,
            timespan,
            out,
            sort,
            sources,
            words,
            exclude_sources,
            stopwords,
            word_lists: !no_word_lists,
            profile,
        },
        Commands::LockStatus { .. } => panic!("expected word-map command"),
    }
}

fn config(profile_path: Option<&str>) -> AppConfig {
    AppConfig {
        env: Environment::Test,
        log_level: "info".to_string(),
        mediacloud_api_key: "test-key".to_string(),
        mediacloud_base_url: "http://localhost/api/v2/".to_string(),
        request_timeout_secs: 30,
        user_agent: "wordmap-test/0.1".to_string(),
        max_concurrent_fetches: 8,
        max_retries: 0,
        retry_backoff_base_ms: 0,
        profile_path: profile_path.map(PathBuf::from),
    }
}

#[test]
fn parses_word_map_with_defaults() {
    let cli = Cli::try_parse_from(["wordmap-cli", "word-map", "--topic", "7", "--out", "maps/t7"])
        .expect("expected valid cli args");

    let args = word_map_args(cli);
    assert_eq!(args.topic, 7);
    assert_eq!(args.timespan, None);
    assert_eq!(args.out, PathBuf::from("maps/t7"));
    assert_eq!(args.sort, TopMediaSort::Inlink);
    assert_eq!(args.sources, 50);
    assert_eq!(args.words, 100);
    assert!(args.exclude_sources.is_empty());
    assert!(args.stopwords.is_empty());
    assert!(args.word_lists);
    assert!(args.profile.is_none());
}

#[test]
fn parses_repeated_exclusions_and_stopwords() {
    let cli = Cli::try_parse_from([
        "wordmap-cli",
        "word-map",
        "--topic",
        "7",
        "--timespan",
        "11",
        "--out",
        "t7",
        "--sort",
        "twitter",
        "--sources",
        "10",
        "--words",
        "25",
        "--exclude-source",
        "Twitter",
        "--exclude-source",
        "YouTube",
        "--stopword",
        "said",
        "--no-word-lists",
    ])
    .expect("expected valid cli args");

    let args = word_map_args(cli);
    assert_eq!(args.timespan, Some(11));
    assert_eq!(args.sort, TopMediaSort::Twitter);
    assert_eq!(args.sources, 10);
    assert_eq!(args.words, 25);
    assert_eq!(args.exclude_sources, vec!["Twitter", "YouTube"]);
    assert_eq!(args.stopwords, vec!["said"]);
    assert!(!args.word_lists);
}

#[test]
fn unknown_sort_is_rejected() {
    let result = Cli::try_parse_from([
        "wordmap-cli",
        "word-map",
        "--topic",
        "7",
        "--out",
        "t7",
        "--sort",
        "popularity",
    ]);
    assert!(result.is_err());
}

#[test]
fn word_map_requires_topic_and_out() {
    assert!(Cli::try_parse_from(["wordmap-cli", "word-map", "--out", "t7"]).is_err());
    assert!(Cli::try_parse_from(["wordmap-cli", "word-map", "--topic", "7"]).is_err());
}

#[test]
fn parses_lock_status() {
    let cli = Cli::try_parse_from(["wordmap-cli", "lock-status", "--out", "t7"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::LockStatus { ref out } if out == Path::new("t7")
    ));
}

#[test]
fn build_options_appends_profile_after_flags() {
    let cli = Cli::try_parse_from([
        "wordmap-cli",
        "word-map",
        "--topic",
        "7",
        "--out",
        "t7",
        "--stopword",
        "said",
    ])
    .unwrap();
    let args = word_map_args(cli);

    let mut attrs = HashMap::new();
    attrs.insert(1, "national".to_string());
    let profile = MapProfile {
        excluded_sources: vec!["Twitter".to_string()],
        stopwords: vec!["the".to_string()],
        media_attributes: attrs,
    };

    let options = build_options(&args, Some(profile));
    assert_eq!(options.stopwords, vec!["said", "the"]);
    assert_eq!(options.excluded_sources, vec!["Twitter"]);
    assert_eq!(
        options
            .media_attributes
            .as_ref()
            .and_then(|m| m.get(&1))
            .map(String::as_str),
        Some("national")
    );
    assert!(options.include_media.is_none());
}

#[test]
fn profile_flag_overrides_config() {
    let with_flag = word_map_args(
        Cli::try_parse_from([
            "wordmap-cli",
            "word-map",
            "--topic",
            "7",
            "--out",
            "t7",
            "--profile",
            "flag.yaml",
        ])
        .unwrap(),
    );
    let without_flag = word_map_args(
        Cli::try_parse_from(["wordmap-cli", "word-map", "--topic", "7", "--out", "t7"]).unwrap(),
    );
    let cfg = config(Some("env.yaml"));

    assert_eq!(profile_path(&with_flag, &cfg), Some(Path::new("flag.yaml")));
    assert_eq!(profile_path(&without_flag, &cfg), Some(Path::new("env.yaml")));
    assert_eq!(profile_path(&without_flag, &config(None)), None);
}
