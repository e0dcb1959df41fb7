use std::fs;
use std::path::PathBuf;

use tempfile::{TempDir, tempdir};

use vqa_gallery::{ListParams, LoadOptions, QueryEngine, load_dataset};

/// 15 items: q0..q8 in ep_1, q9..q14 in ep_2; every third item tagged
/// "counting", the rest "spatial".
fn fixture() -> (TempDir, PathBuf) {
    let temp = tempdir().unwrap();
    let items: Vec<String> = (0..15)
        .map(|idx| {
            let episode = if idx < 9 { "ep_1" } else { "ep_2" };
            let tag = if idx % 3 == 0 { "counting" } else { "spatial" };
            format!(
                r#"{{"unique_id": "q{idx}", "episode_dir": "{episode}",
                     "question": {{"text": "?", "image_ids": []}},
                     "choices": [{{"text": "a", "is_correct": true}}],
                     "metadata": {{"tag": "{tag}"}}}}"#
            )
        })
        .collect();
    let source = temp.path().join("vqa_data.json");
    fs::write(&source, format!(r#"{{"vqa_items": [{}]}}"#, items.join(","))).unwrap();
    (temp, source)
}

fn loaded_engine() -> (TempDir, QueryEngine) {
    let (temp, source) = fixture();
    let snapshot = load_dataset(
        &source,
        temp.path(),
        &LoadOptions::default().with_shuffle(false),
    )
    .unwrap();
    (temp, QueryEngine::new(snapshot))
}

fn ids(page: &vqa_gallery::ListPage) -> Vec<String> {
    page.data.iter().map(|item| item.unique_id.clone()).collect()
}

#[test]
fn page_length_obeys_the_window_formula() {
    let (_temp, engine) = loaded_engine();
    let total: i64 = 15;
    for limit in [1i64, 2, 5, 10, 20] {
        for page in 0i64..5 {
            let result = engine.list(&ListParams::default().with_page(page).with_limit(limit));
            assert_eq!(result.total, 15);

            let start = (page * limit).min(total);
            let expected_len = (total - start).min(limit).max(0);
            assert_eq!(
                result.data.len() as i64,
                expected_len,
                "page={page} limit={limit}"
            );

            // Pages are contiguous, non-overlapping windows in store order.
            let expected: Vec<String> = (start..start + expected_len)
                .map(|idx| format!("q{idx}"))
                .collect();
            assert_eq!(ids(&result), expected, "page={page} limit={limit}");
        }
    }
}

#[test]
fn page_two_of_fifteen_items_is_empty() {
    let (_temp, engine) = loaded_engine();
    let result = engine.list(&ListParams::default().with_page(2).with_limit(10));
    assert_eq!(result.total, 15);
    assert_eq!(result.page, 2);
    assert_eq!(result.limit, 10);
    assert!(result.data.is_empty());
}

#[test]
fn out_of_domain_paging_values_yield_empty_pages() {
    let (_temp, engine) = loaded_engine();
    for params in [
        ListParams::default().with_page(-3),
        ListParams::default().with_limit(0),
        ListParams::default().with_limit(-1),
        ListParams::default().with_page(i64::MAX).with_limit(i64::MAX),
    ] {
        let result = engine.list(&params);
        assert_eq!(result.total, 15, "params={params:?}");
        assert!(result.data.is_empty(), "params={params:?}");
        assert_eq!(result.page, params.page);
        assert_eq!(result.limit, params.limit);
    }
}

#[test]
fn filters_compose_and_restrict_total() {
    let (_temp, engine) = loaded_engine();

    let by_category = engine.list(&ListParams::default().with_category("counting"));
    assert_eq!(by_category.total, 5);
    assert_eq!(ids(&by_category), ["q0", "q3", "q6", "q9", "q12"]);

    let by_episode = engine.list(&ListParams::default().with_episode("ep_2"));
    assert_eq!(by_episode.total, 6);

    let both = engine.list(
        &ListParams::default()
            .with_episode("ep_2")
            .with_category("counting"),
    );
    assert_eq!(both.total, 2);
    assert_eq!(ids(&both), ["q9", "q12"]);

    // Paging applies after filtering.
    let paged = engine.list(
        &ListParams::default()
            .with_category("counting")
            .with_page(1)
            .with_limit(3),
    );
    assert_eq!(paged.total, 5);
    assert_eq!(ids(&paged), ["q9", "q12"]);
}

#[test]
fn unknown_filter_values_are_empty_results() {
    let (_temp, engine) = loaded_engine();
    for params in [
        ListParams::default().with_category("no_such_tag"),
        ListParams::default().with_episode("ep_99"),
        ListParams::default()
            .with_category("counting")
            .with_episode("ep_99"),
    ] {
        let result = engine.list(&params);
        assert_eq!(result.total, 0, "params={params:?}");
        assert!(result.data.is_empty());
    }
}

#[test]
fn lookups_and_views_agree_with_the_fixture() {
    let (_temp, engine) = loaded_engine();

    assert_eq!(engine.by_index(9).unwrap().episode_dir, "ep_2");
    assert_eq!(engine.by_unique_id("q3").unwrap().metadata.tag, "counting");
    assert_eq!(engine.episodes(), ["ep_1", "ep_2"]);

    let listing = engine.categories();
    assert_eq!(listing.categories, ["counting", "spatial"]);
    assert_eq!(listing.counts.get("counting"), Some(&5));
    assert_eq!(listing.counts.get("spatial"), Some(&10));

    let stats = engine.statistics();
    assert_eq!(stats.total_items, 15);
    assert_eq!(stats.correct_answer_distribution.a, 15);
}
