// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

mod helpers;

use std::path::Path;

use commitsense::domain::{ChangeStatus, CommitType, DiffFacts};
use commitsense::services::classifier::ChangeClassifier;
use helpers::make_facts;
use proptest::prelude::*;

fn classify(path: &str, status: ChangeStatus, facts: &DiffFacts) -> CommitType {
    ChangeClassifier::classify(Path::new(path), status, facts)
}

fn scope(path: &str) -> String {
    ChangeClassifier::scope(Path::new(path))
}

// ─── Added files ─────────────────────────────────────────────────────────────

#[test]
fn new_test_file_is_test() {
    let facts = make_facts(20, 0, &["test_login"]);
    assert_eq!(classify("tests/auth.rs", ChangeStatus::Added, &facts), CommitType::Test);
    assert_eq!(
        classify("src/auth_test.go", ChangeStatus::Added, &facts),
        CommitType::Test
    );
    assert_eq!(
        classify("web/app.spec.ts", ChangeStatus::Added, &facts),
        CommitType::Test
    );
}

#[test]
fn test_named_files_are_tests_when_added_or_modified() {
    let facts = make_facts(6, 2, &["check"]);
    for path in [
        "test.py",
        "conftest.py",
        "src/tests.rs",
        "src/FooTest.java",
        "pkg/parser_test.go",
        "lib/testHelpers.js",
    ] {
        for status in [ChangeStatus::Added, ChangeStatus::Modified] {
            assert_eq!(
                classify(path, status, &facts),
                CommitType::Test,
                "{path} as {status:?}"
            );
        }
    }
}

#[test]
fn root_test_file_gets_test_type_and_scope() {
    let c = helpers::make_change("test.py", "A ", make_facts(4, 0, &[]));
    assert_eq!(c.commit_type, CommitType::Test);
    assert_eq!(c.scope, "test");
    assert_eq!(c.message, "add test.py");
}

#[test]
fn words_merely_containing_test_are_not_tests() {
    let facts = make_facts(30, 0, &[]);
    for path in ["src/latest.rs", "src/contest.rs", "src/Attestation.java"] {
        assert_eq!(classify(path, ChangeStatus::Modified, &facts), CommitType::Feat, "{path}");
    }
}

#[test]
fn doc_substring_ignores_case() {
    let facts = make_facts(30, 0, &[]);
    assert_eq!(
        classify("src/Document.rs", ChangeStatus::Modified, &facts),
        CommitType::Docs
    );
}

#[test]
fn new_doc_file_is_docs() {
    let facts = make_facts(12, 0, &[]);
    assert_eq!(classify("GUIDE.md", ChangeStatus::Added, &facts), CommitType::Docs);
    assert_eq!(classify("docs/intro.txt", ChangeStatus::Added, &facts), CommitType::Docs);
}

#[test]
fn new_source_file_is_feat() {
    let with_fn = make_facts(30, 0, &["serve"]);
    let without = make_facts(3, 0, &[]);
    assert_eq!(classify("src/server.rs", ChangeStatus::Added, &with_fn), CommitType::Feat);
    assert_eq!(classify("src/consts.rs", ChangeStatus::Added, &without), CommitType::Feat);
}

#[test]
fn untracked_files_classify_like_added() {
    let facts = make_facts(5, 0, &[]);
    assert_eq!(
        classify("tests/new_case.rs", ChangeStatus::Untracked, &facts),
        CommitType::Test
    );
    assert_eq!(
        classify("src/new.rs", ChangeStatus::Untracked, &facts),
        CommitType::Feat
    );
}

// ─── Deleted files ───────────────────────────────────────────────────────────

#[test]
fn deleted_is_chore_whatever_the_path() {
    let facts = make_facts(0, 40, &[]);
    for path in ["README.md", "tests/old.rs", "src/legacy.rs"] {
        assert_eq!(classify(path, ChangeStatus::Deleted, &facts), CommitType::Chore);
    }
}

// ─── Modified files ──────────────────────────────────────────────────────────

#[test]
fn modified_rules_apply_in_order() {
    let cases: &[(&str, DiffFacts, CommitType, &str)] = &[
        ("README.md", make_facts(50, 0, &[]), CommitType::Docs, "modified-docs"),
        ("tests/api.rs", make_facts(1, 30, &[]), CommitType::Test, "modified-test"),
        ("app/settings.yaml", make_facts(2, 1, &[]), CommitType::Chore, "modified-config"),
        ("Dockerfile", make_facts(4, 1, &[]), CommitType::Chore, "modified-config"),
        ("src/parser.rs", make_facts(2, 10, &[]), CommitType::Fix, "net-removal"),
        ("src/parser.rs", make_facts(30, 40, &["parse"]), CommitType::Fix, "net-removal"),
        ("src/parser.rs", make_facts(5, 5, &["parse"]), CommitType::Feat, "growth"),
        ("src/parser.rs", make_facts(21, 10, &[]), CommitType::Feat, "growth"),
        ("src/parser.rs", make_facts(15, 10, &[]), CommitType::Refactor, "rebalance"),
        ("src/parser.rs", make_facts(2, 0, &[]), CommitType::Feat, "growth"),
        ("src/parser.rs", make_facts(0, 0, &[]), CommitType::Fix, "small-edit"),
        ("src/parser.rs", make_facts(40, 20, &[]), CommitType::Feat, "modified"),
    ];

    for (path, facts, expected, rule) in cases {
        let path = Path::new(path);
        assert_eq!(
            ChangeClassifier::classify(path, ChangeStatus::Modified, facts),
            *expected,
            "{} with {:?}",
            path.display(),
            facts
        );
        assert_eq!(
            ChangeClassifier::rule_name(path, ChangeStatus::Modified, facts),
            *rule
        );
    }
}

#[test]
fn dependency_manifest_without_config_extension() {
    let mut facts = make_facts(1, 0, &[]);
    assert_eq!(classify("go.mod", ChangeStatus::Modified, &facts), CommitType::Chore);

    facts.import_lines.push("require github.com/pkg/errors v0.9.1".into());
    assert_eq!(classify("go.mod", ChangeStatus::Modified, &facts), CommitType::Feat);
}

#[test]
fn config_extension_wins_over_manifest() {
    let mut facts = make_facts(1, 0, &[]);
    facts.import_lines.push("import x".into());
    assert_eq!(
        ChangeClassifier::rule_name(Path::new("package.json"), ChangeStatus::Modified, &facts),
        "modified-config"
    );
}

#[test]
fn unrecognized_status_falls_back_to_chore() {
    let facts = make_facts(100, 0, &["main"]);
    for status in [ChangeStatus::Renamed, ChangeStatus::Unmerged, ChangeStatus::Unknown] {
        assert_eq!(classify("src/main.rs", status, &facts), CommitType::Chore);
    }
}

// ─── Scope ───────────────────────────────────────────────────────────────────

#[test]
fn scope_from_known_directories() {
    assert_eq!(scope("src/services/git.rs"), "services");
    assert_eq!(scope("src/main.rs"), "core");
    assert_eq!(scope("lib/util.js"), "core");
    assert_eq!(scope("tests/cli.rs"), "test");
    assert_eq!(scope("documentation/setup.md"), "docs");
    assert_eq!(scope("configs/prod.toml"), "config");
    assert_eq!(scope("server/routes.go"), "api");
    assert_eq!(scope("frontend/App.tsx"), "ui");
    assert_eq!(scope("tools/release.sh"), "tools");
    assert_eq!(scope("migrations/001_init.sql"), "migrations");
}

#[test]
fn scope_for_root_files() {
    assert_eq!(scope("test_helpers.py"), "test");
    assert_eq!(scope("CHANGELOG.md"), "docs");
    assert_eq!(scope("webpack.config.js"), "config");
    assert_eq!(scope("main.go"), "");
}

#[test]
fn classify_change_fills_every_field() {
    let classified = helpers::make_change("src/cache/store.rs", " M", make_facts(3, 3, &["evict"]));
    assert_eq!(classified.commit_type, CommitType::Feat);
    assert_eq!(classified.scope, "cache");
    assert_eq!(classified.message, "update evict function");
}

proptest! {
    #[test]
    fn classification_is_total(
        path in "[a-zA-Z0-9_./-]{0,40}",
        code in prop::sample::select(vec!["A ", " M", "D ", "R ", "??", "UU", "!!"]),
        added in 0usize..200,
        removed in 0usize..200,
    ) {
        let facts = make_facts(added, removed, &[]);
        let status = ChangeStatus::from_code(code);
        let ty = ChangeClassifier::classify(Path::new(&path), status, &facts);
        prop_assert!(CommitType::parse(ty.as_str()).is_some());
        let _ = ChangeClassifier::scope(Path::new(&path));
    }
}
