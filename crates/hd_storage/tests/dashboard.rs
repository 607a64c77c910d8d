use hd_core::aggregate::YearCount;
use hd_core::{run, DashboardConfig, Notice, RunOptions, RunOutcome};
use hd_storage::create_store;
use tempfile::tempdir;

const DUMP: &str = r#"
{"_id": {"$oid": "1"}, "title": "Apa itu Skoliosis?", "content": "Skoliosis adalah kelengkungan tulang belakang.", "published_at": "2019-08-01T10:00:00Z"}
{"_id": {"$oid": "2"}, "title": "Latihan postur", "content": "Latihan postur untuk skoliosis ringan, latihan rutin.", "published_at": {"$date": "2020-02-01T00:00:00Z"}}
{"_id": {"$oid": "3"}, "title": "Kifosis", "published_at": "bulan lalu"}
"#;

fn options(config: &DashboardConfig, topic: &str) -> RunOptions {
    RunOptions {
        topic: config.parse_topic(topic),
        cleaner: config.cleaner(),
        ..RunOptions::default()
    }
}

#[tokio::test]
async fn test_dashboard_from_json_dump() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("artikel.ndjson");
    std::fs::write(&path, DUMP.trim_start()).unwrap();

    let config = DashboardConfig::default().with_store_url(&format!("json:{}", path.display()));
    let store = create_store(&config.store_url).await.unwrap();

    let outcome = run(store.as_ref(), &options(&config, "Semua")).await.unwrap();
    let dashboard = match outcome {
        RunOutcome::Rendered(dashboard) => dashboard,
        RunOutcome::Halted(notice) => panic!("unexpected halt: {}", notice),
    };

    assert_eq!(
        dashboard.yearly_counts,
        vec![
            YearCount { year: 2000, count: 1 },
            YearCount { year: 2019, count: 1 },
            YearCount { year: 2020, count: 1 },
        ]
    );
    assert_eq!(dashboard.warnings.len(), 1);
    assert_eq!(dashboard.top_words.iter().map(|t| t.year).collect::<Vec<_>>(), vec![2019, 2020]);
    assert_eq!(dashboard.top_words[1].word, "latihan");
    assert_eq!(dashboard.top_words[1].count, 2);

    let outcome = run(store.as_ref(), &options(&config, "SKOLIOSIS")).await.unwrap();
    match outcome {
        RunOutcome::Rendered(dashboard) => assert_eq!(dashboard.shown_articles, 2),
        RunOutcome::Halted(notice) => panic!("unexpected halt: {}", notice),
    }

    let outcome = run(store.as_ref(), &options(&config, "Lordosis")).await.unwrap();
    assert!(matches!(outcome, RunOutcome::Halted(Notice::NoArticlesForTopic(ref t)) if t == "Lordosis"));
}

#[tokio::test]
async fn test_empty_store_halts() {
    let store = create_store("memory://").await.unwrap();
    let outcome = run(store.as_ref(), &RunOptions::default()).await.unwrap();
    assert!(matches!(outcome, RunOutcome::Halted(Notice::EmptySource)));
}
