//! Sorted set ranges, extreme scores and removals

use crate::common::*;
use redkey::SortedSetFacade;

// ============================================================================
// Score ranges
// ============================================================================

#[test]
fn score_range_exclude_both_keeps_interior() {
    let client = client("zset");
    seed_scores(&client, "s");

    let hits: Vec<String> = client
        .sorted_set_range_by_score("s", 10.0, 30.0, Exclusivity::ExcludeBoth, Order::Ascending)
        .unwrap();
    assert_eq!(hits, vec!["b"]);
}

#[test]
fn score_range_include_both_keeps_everything() {
    let client = client("zset");
    seed_scores(&client, "s");

    let hits: Vec<String> = client
        .sorted_set_range_by_score("s", 10.0, 30.0, Exclusivity::IncludeBoth, Order::Ascending)
        .unwrap();
    assert_eq!(hits, vec!["a", "b", "c"]);
}

#[test]
fn score_range_one_sided_exclusivity() {
    let client = client("zset");
    seed_scores(&client, "s");

    let start: Vec<String> = client
        .sorted_set_range_by_score("s", 10.0, 30.0, Exclusivity::ExcludeStart, Order::Ascending)
        .unwrap();
    assert_eq!(start, vec!["b", "c"]);

    let stop: Vec<String> = client
        .sorted_set_range_by_score("s", 10.0, 30.0, Exclusivity::ExcludeStop, Order::Ascending)
        .unwrap();
    assert_eq!(stop, vec!["a", "b"]);
}

#[test]
fn score_range_descending() {
    let client = client("zset");
    seed_scores(&client, "s");

    let hits: Vec<String> = client
        .sorted_set_range_by_score("s", 15.0, 30.0, Exclusivity::IncludeBoth, Order::Descending)
        .unwrap();
    assert_eq!(hits, vec!["c", "b"]);
}

#[test]
fn unbounded_score_range() {
    let client = client("zset");
    seed_scores(&client, "s");

    let hits: Vec<String> = client
        .sorted_set_range("s", &RangeSpec::by_score_all())
        .unwrap();
    assert_eq!(hits, vec!["a", "b", "c"]);
}

#[test]
fn alice_and_bob_end_to_end() {
    let client = client("zset");
    client.sorted_set_add("players", "alice", 10.0).unwrap();
    client.sorted_set_add("players", "bob", 20.0).unwrap();

    let spec = RangeSpec::by_score(0.0, 15.0)
        .exclusivity(Exclusivity::IncludeBoth)
        .order(Order::Ascending);
    let hits: Vec<String> = client.sorted_set_range("players", &spec).unwrap();
    assert_eq!(hits, vec!["alice"]);
}

// ============================================================================
// Rank ranges
// ============================================================================

#[test]
fn default_rank_range_is_full_collection() {
    let client = client("zset");
    seed_scores(&client, "s");

    let spec: RangeSpec = RangeSpec::default();
    let all: Vec<String> = client.sorted_set_range("s", &spec).unwrap();
    assert_eq!(all, vec!["a", "b", "c"]);
}

#[test]
fn rank_range_descending_and_negative_indices() {
    let client = client("zset");
    seed_scores(&client, "s");

    let top_two: Vec<String> = client
        .sorted_set_range_by_rank("s", 0, 1, Order::Descending)
        .unwrap();
    assert_eq!(top_two, vec!["c", "b"]);

    let last: Vec<String> = client
        .sorted_set_range_by_rank("s", -1, -1, Order::Ascending)
        .unwrap();
    assert_eq!(last, vec!["c"]);

    let out_of_range: Vec<String> = client
        .sorted_set_range_by_rank("s", 5, 10, Order::Ascending)
        .unwrap();
    assert!(out_of_range.is_empty());
}

#[test]
fn range_on_missing_key_is_empty() {
    let client = client("zset");
    let hits: Vec<String> = client.sorted_set_range("ghost", &RangeSpec::all()).unwrap();
    assert!(hits.is_empty());
    assert_eq!(client.sorted_set_length("ghost").unwrap(), 0);
}

// ============================================================================
// Lexical ranges
// ============================================================================

fn seed_names(client: &Client) {
    for name in ["ann", "bob", "cat", "dan", "eve"] {
        client.sorted_set_add("names", name, 0.0).unwrap();
    }
}

#[test]
fn lex_range_each_exclusivity() {
    let client = client("lex");
    seed_names(&client);

    let cases = [
        (Exclusivity::IncludeBoth, vec!["bob", "cat", "dan"]),
        (Exclusivity::ExcludeStart, vec!["cat", "dan"]),
        (Exclusivity::ExcludeStop, vec!["bob", "cat"]),
        (Exclusivity::ExcludeBoth, vec!["cat"]),
    ];
    for (exclusivity, expected) in cases {
        let hits: Vec<String> = client
            .sorted_set_range_by_value(
                "names",
                ValueBound::Value("bob"),
                ValueBound::Value("dan"),
                exclusivity,
                Order::Ascending,
            )
            .unwrap();
        assert_eq!(hits, expected, "{exclusivity:?}");
    }
}

#[test]
fn lex_range_descending_and_count() {
    let client = client("lex");
    seed_names(&client);

    let hits: Vec<String> = client
        .sorted_set_range_by_value(
            "names",
            ValueBound::Value("bob"),
            ValueBound::Value("dan"),
            Exclusivity::IncludeBoth,
            Order::Descending,
        )
        .unwrap();
    assert_eq!(hits, vec!["dan", "cat", "bob"]);

    let count = client
        .sorted_set_length_by_value(
            "names",
            ValueBound::Value("a"),
            ValueBound::Value("c"),
            Exclusivity::IncludeBoth,
        )
        .unwrap();
    assert_eq!(count, 2);
}

#[test]
fn lex_remove_range() {
    let client = client("lex");
    seed_names(&client);

    let removed = client
        .sorted_set_remove_range_by_value(
            "names",
            ValueBound::Value("cat"),
            ValueBound::Value("eve"),
            Exclusivity::ExcludeStop,
        )
        .unwrap();
    assert_eq!(removed, 2);

    let left: Vec<String> = client.sorted_set_range("names", &RangeSpec::all()).unwrap();
    assert_eq!(left, vec!["ann", "bob", "eve"]);
}

#[test]
fn lex_range_from_lowest_returns_low_half() {
    let client = client("lex");
    for name in ["ann", "bob", "cat", "kim", "nia", "pat", "sam", "zed"] {
        client.sorted_set_add("names", name, 0.0).unwrap();
    }

    let low: Vec<String> = client
        .sorted_set_range_by_value(
            "names",
            ValueBound::Lowest,
            ValueBound::Value("m"),
            Exclusivity::IncludeBoth,
            Order::Ascending,
        )
        .unwrap();
    assert_eq!(low, vec!["ann", "bob", "cat", "kim"]);

    let high: Vec<String> = client
        .sorted_set_range("names", &RangeSpec::by_value_from("m").descending())
        .unwrap();
    assert_eq!(high, vec!["zed", "sam", "pat", "nia"]);

    let all = client
        .sorted_set_length_by_value::<&str>(
            "names",
            ValueBound::Lowest,
            ValueBound::Highest,
            Exclusivity::IncludeBoth,
        )
        .unwrap();
    assert_eq!(all, 8);
}

// ============================================================================
// Extreme scores
// ============================================================================

#[test]
fn min_and_max_on_populated_set() {
    let client = client("extreme");
    seed_scores(&client, "s");

    assert_eq!(client.sorted_set_min_score("s").unwrap(), 10.0);
    assert_eq!(client.sorted_set_max_score("s").unwrap(), 30.0);
}

#[test]
fn min_and_max_on_empty_set_are_exactly_zero() {
    let client = client("extreme");

    assert_eq!(client.sorted_set_min_score("empty").unwrap(), 0.0);
    assert_eq!(client.sorted_set_max_score("empty").unwrap(), 0.0);
}

#[test]
fn first_and_last_score_distinguish_empty() {
    let client = client("extreme");
    assert_eq!(client.sorted_set_first_score("empty").unwrap(), None);
    assert_eq!(client.sorted_set_last_score("empty").unwrap(), None);

    client.sorted_set_add("zero", "only", 0.0).unwrap();
    assert_eq!(client.sorted_set_first_score("zero").unwrap(), Some(0.0));
    assert_eq!(client.sorted_set_last_score("zero").unwrap(), Some(0.0));
}

#[test]
fn strict_policy_reports_empty_collection() {
    let client = strict_client("extreme");

    let err = client.sorted_set_max_score("empty").unwrap_err();
    assert!(matches!(err, Error::EmptyCollection { .. }));

    seed_scores(&client, "s");
    assert_eq!(client.sorted_set_max_score("s").unwrap(), 30.0);
}

// ============================================================================
// Mutation
// ============================================================================

#[test]
fn add_rescore_and_increment() {
    let client = client("mutate");
    assert!(client.sorted_set_add("s", "m", 1.0).unwrap());
    assert!(!client.sorted_set_add("s", "m", 5.0).unwrap());
    assert_eq!(client.sorted_set_score("s", "m").unwrap(), Some(5.0));

    assert_eq!(client.sorted_set_increment("s", "m", 2.5).unwrap(), 7.5);
    assert_eq!(client.sorted_set_decrement("s", "m", 7.5).unwrap(), 0.0);
    assert_eq!(client.sorted_set_increment("s", "fresh", 3.0).unwrap(), 3.0);
    assert_eq!(client.sorted_set_length("s").unwrap(), 2);
}

#[test]
fn typed_members_with_scores() {
    let client = client("typed");
    client
        .sorted_set_add_many("ids", &[(7u64, Some(1.5)), (3u64, Some(0.5)), (9u64, None)])
        .unwrap();

    let ranked: Vec<ScoredMember<u64>> = client
        .sorted_set_range_with_scores("ids", &RangeSpec::all())
        .unwrap();
    let members: Vec<u64> = ranked.iter().map(|m| m.member).collect();
    assert_eq!(members, vec![9, 3, 7]);
    assert_eq!(ranked[0].score, 0.0);
}

#[test]
fn remove_by_rank_and_score() {
    let client = client("remove");
    seed_scores(&client, "s");
    client.sorted_set_add("s", "d", 40.0).unwrap();

    assert_eq!(client.sorted_set_remove_range_by_rank("s", 0, 0).unwrap(), 1);
    assert_eq!(
        client
            .sorted_set_remove_range_by_score("s", 20.0, 40.0, Exclusivity::ExcludeBoth)
            .unwrap(),
        1
    );
    let left: Vec<String> = client.sorted_set_range("s", &RangeSpec::all()).unwrap();
    assert_eq!(left, vec!["b", "d"]);

    assert_eq!(client.sorted_set_remove_many("s", &["b", "d", "x"]).unwrap(), 2);
    assert_eq!(client.sorted_set_length("s").unwrap(), 0);
}
