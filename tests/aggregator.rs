// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

mod helpers;

use commitsense::config::{Config, Grouping};
use commitsense::domain::CommitType;
use commitsense::services::aggregator::{
    GROUP_CONFIDENCE, SINGLE_FILE_CONFIDENCE, SuggestionAggregator,
};
use helpers::make_classified;
use proptest::prelude::*;

fn by_scope() -> SuggestionAggregator {
    SuggestionAggregator {
        grouping: Grouping::ByTypeScope,
        ..SuggestionAggregator::default()
    }
}

#[test]
fn empty_input_yields_nothing() {
    assert!(SuggestionAggregator::default().aggregate(&[]).is_empty());
    assert!(by_scope().aggregate(&[]).is_empty());
}

#[test]
fn single_file_gets_combined_and_individual() {
    let changes = [make_classified("src/cli/args.rs", CommitType::Feat, "cli")];
    let suggestions = SuggestionAggregator::default().aggregate(&changes);

    assert_eq!(suggestions.len(), 2);
    insta::assert_snapshot!(suggestions[0].header(), @"feat(cli): add features");
    insta::assert_snapshot!(suggestions[1].header(), @"feat(cli): touch src/cli/args.rs");
    assert_eq!(suggestions[0].confidence, SINGLE_FILE_CONFIDENCE);
}

#[test]
fn uniform_type_phrases() {
    let cases = [
        (CommitType::Feat, "add features"),
        (CommitType::Fix, "fix issues"),
        (CommitType::Docs, "update docs"),
        (CommitType::Test, "update tests"),
        (CommitType::Chore, "update config"),
        (CommitType::Refactor, "refactor code"),
        (CommitType::Style, "update files"),
    ];
    for (ty, phrase) in cases {
        let changes = [
            make_classified("a.rs", ty, ""),
            make_classified("b.rs", ty, ""),
        ];
        let combined = SuggestionAggregator::combined(&changes);
        assert_eq!(combined.commit_type, ty);
        assert_eq!(combined.message, format!("{phrase} (2 files)"));
        assert_eq!(combined.confidence, GROUP_CONFIDENCE);
    }
}

#[test]
fn mixed_types_pick_the_most_common() {
    let changes = [
        make_classified("src/a.rs", CommitType::Fix, "core"),
        make_classified("src/b.rs", CommitType::Feat, "core"),
        make_classified("src/c.rs", CommitType::Feat, "core"),
    ];
    let combined = SuggestionAggregator::combined(&changes);
    insta::assert_snapshot!(combined.header(), @"feat(core): update multiple files (3 files)");
}

#[test]
fn ties_go_to_the_first_seen_type() {
    let changes = [
        make_classified("README.md", CommitType::Docs, "docs"),
        make_classified("src/a.rs", CommitType::Fix, "core"),
    ];
    let combined = SuggestionAggregator::combined(&changes);
    assert_eq!(combined.commit_type, CommitType::Docs);
    assert_eq!(combined.scope, "");

    let reversed = [changes[1].clone(), changes[0].clone()];
    assert_eq!(
        SuggestionAggregator::combined(&reversed).commit_type,
        CommitType::Fix
    );
}

#[test]
fn individual_suggestions_stop_above_limit() {
    let changes: Vec<_> = (0..4)
        .map(|i| make_classified(&format!("src/f{i}.rs"), CommitType::Feat, "core"))
        .collect();

    let suggestions = SuggestionAggregator::default().aggregate(&changes);
    assert_eq!(suggestions.len(), 1);

    let suggestions = SuggestionAggregator::default().aggregate(&changes[..3]);
    assert_eq!(suggestions.len(), 4);
}

#[test]
fn scoped_groups_follow_the_combined_suggestion() {
    let changes = [
        make_classified("src/api/a.rs", CommitType::Feat, "api"),
        make_classified("src/api/b.rs", CommitType::Feat, "api"),
        make_classified("tests/a.rs", CommitType::Test, "test"),
        make_classified("src/api/c.rs", CommitType::Fix, "api"),
        make_classified("src/a.rs", CommitType::Perf, ""),
        make_classified("src/b.rs", CommitType::Perf, ""),
    ];

    let headers: Vec<String> = by_scope()
        .aggregate(&changes)
        .iter()
        .map(|s| s.header())
        .collect();

    insta::assert_snapshot!(headers.join("\n"), @r"
    feat: update multiple files (6 files)
    feat(api): add api functionality
    test(test): touch tests/a.rs
    fix(api): touch src/api/c.rs
    perf: update files
    ");
}

#[test]
fn max_suggestions_caps_the_list() {
    let changes: Vec<_> = ["a", "b", "c", "d", "e", "f", "g"]
        .iter()
        .map(|s| make_classified(&format!("{s}/x.rs"), CommitType::Feat, s))
        .collect();

    let aggregator = SuggestionAggregator {
        max_suggestions: 3,
        ..by_scope()
    };
    assert_eq!(aggregator.aggregate(&changes).len(), 3);
}

#[test]
fn from_config_copies_settings() {
    let config = Config {
        grouping: Grouping::ByTypeScope,
        max_suggestions: 9,
        individual_limit: 1,
        ..Config::default()
    };
    let aggregator = SuggestionAggregator::from_config(&config);
    assert_eq!(aggregator.grouping, Grouping::ByTypeScope);
    assert_eq!(aggregator.max_suggestions, 9);
    assert_eq!(aggregator.individual_limit, 1);
}

fn commit_type_strategy() -> impl Strategy<Value = CommitType> {
    prop::sample::select(
        CommitType::ALL
            .iter()
            .filter_map(|s| CommitType::parse(s))
            .collect::<Vec<_>>(),
    )
}

proptest! {
    #[test]
    fn aggregate_is_bounded_and_deterministic(
        types in prop::collection::vec(commit_type_strategy(), 1..12),
        scoped in any::<bool>(),
        max in 1usize..8,
    ) {
        let changes: Vec<_> = types
            .iter()
            .enumerate()
            .map(|(i, ty)| make_classified(&format!("src/m{}/f{i}.rs", i % 3), *ty, &format!("m{}", i % 3)))
            .collect();
        let aggregator = SuggestionAggregator {
            grouping: if scoped { Grouping::ByTypeScope } else { Grouping::ByType },
            max_suggestions: max,
            individual_limit: 3,
        };

        let first = aggregator.aggregate(&changes);
        prop_assert!(!first.is_empty());
        prop_assert!(first.len() <= max);
        prop_assert_eq!(&first[0], &SuggestionAggregator::combined(&changes));
        for s in &first {
            prop_assert!((0.0..=1.0).contains(&s.confidence));
        }
        prop_assert_eq!(first, aggregator.aggregate(&changes));
    }
}
