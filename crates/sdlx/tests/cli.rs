//! CLI integration tests for sdlx commands.
//!
//! These tests focus on exit codes and basic behavioral verification,
//! not specific output formatting which may change.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;

/// Schema used by most tests.
const SCHEMA: &str = r#"
"Entry points"
type Query {
  "Look up one account."
  user(id: ID!): User
  search(term: String): [Result!]!
}

type Mutation {
  rename(id: ID!, name: String!): User
}

"An account holder."
type User {
  id: ID!
  name: String!
  friends: [User!]!
  joined: Date
}

type Post {
  title: String
  author: User
}

union Result = User | Post

scalar Date

enum Role { ADMIN GUEST }

directive @auth(role: Role) on FIELD_DEFINITION
"#;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get an sdlx command with HOME isolated to `home`.
fn sdlx(home: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("sdlx").unwrap();
    cmd.env("HOME", home)
        .env_remove("XDG_DATA_HOME")
        .env_remove("SDLX_LOG")
        .current_dir(home);
    cmd
}

/// Writes the sample schema and a config keeping indexes inside `dir`.
fn setup(dir: &Path) {
    fs::write(dir.join("schema.graphql"), SCHEMA).unwrap();
    fs::write(
        dir.join(".sdlx.toml"),
        "root = true\n\n[index]\ndirectory = \"index\"\n\n[schema.api]\npath = \"schema.graphql\"\n",
    )
    .unwrap();
}

/// Runs a command and returns its stdout.
fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

/// Strips ANSI escape sequences from a string.
fn strip_ansi(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else {
            output.push(ch);
        }
    }

    output
}

mod init {
    use super::*;

    #[test]
    fn creates_config_file() {
        let dir = temp_dir();

        sdlx(dir.path()).arg("init").assert().success();

        let contents = fs::read_to_string(dir.path().join(".sdlx.toml")).unwrap();
        assert!(contents.contains("# [schema."));
    }

    #[test]
    fn registers_schema_files_in_the_directory() {
        let home = temp_dir();
        let project = home.path().join("project");
        fs::create_dir(&project).unwrap();
        fs::write(project.join("api.graphql"), SCHEMA).unwrap();

        sdlx(home.path())
            .current_dir(&project)
            .arg("init")
            .assert()
            .success();

        let contents = fs::read_to_string(project.join(".sdlx.toml")).unwrap();
        assert!(contents.contains("[schema.api]"));

        let out = stdout_of(
            sdlx(home.path())
                .current_dir(&project)
                .args(["ls", "object", "api"]),
        );
        assert!(strip_ansi(&out).contains("User"));
    }

    #[test]
    fn fails_if_config_exists() {
        let dir = temp_dir();
        fs::write(dir.path().join(".sdlx.toml"), "existing").unwrap();

        sdlx(dir.path())
            .arg("init")
            .assert()
            .failure()
            .stderr(predicate::str::contains("use --force to overwrite"));
    }

    #[test]
    fn force_overwrites_existing() {
        let dir = temp_dir();
        fs::write(dir.path().join(".sdlx.toml"), "old content").unwrap();

        sdlx(dir.path()).args(["init", "--force"]).assert().success();

        let contents = fs::read_to_string(dir.path().join(".sdlx.toml")).unwrap();
        assert!(contents.contains("# [settings]"));
    }
}

mod browse {
    use super::*;

    #[test]
    fn ls_lists_a_category_from_a_file() {
        let dir = temp_dir();
        setup(dir.path());

        let out = stdout_of(sdlx(dir.path()).args(["ls", "object", "schema.graphql"]));
        let names: Vec<String> = strip_ansi(&out)
            .lines()
            .filter_map(|l| l.split_whitespace().next().map(str::to_string))
            .collect();
        assert_eq!(names, ["Post", "User"]);
    }

    #[test]
    fn ls_accepts_configured_ids_and_plurals() {
        let dir = temp_dir();
        setup(dir.path());

        let out = stdout_of(sdlx(dir.path()).args(["ls", "queries", "api", "--long"]));
        let out = strip_ansi(&out);
        assert!(out.contains("user"));
        assert!(out.contains("[Result!]!"));
        assert!(out.contains("Look up one account."));
    }

    #[test]
    fn ls_rejects_search_and_unknown_categories() {
        let dir = temp_dir();
        setup(dir.path());

        sdlx(dir.path())
            .args(["ls", "search", "api"])
            .assert()
            .failure();
        sdlx(dir.path())
            .args(["ls", "widgets", "api"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown category"));
    }

    #[test]
    fn unknown_schema_fails() {
        let dir = temp_dir();
        setup(dir.path());

        sdlx(dir.path())
            .args(["ls", "object", "missing.graphql"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unknown schema 'missing.graphql'"));
    }

    #[test]
    fn parse_errors_are_reported() {
        let dir = temp_dir();
        fs::write(dir.path().join("bad.graphql"), "type User {").unwrap();

        sdlx(dir.path())
            .args(["ls", "object", "bad.graphql"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse"));
    }

    #[test]
    fn usages_lists_every_reference() {
        let dir = temp_dir();
        setup(dir.path());

        let out = strip_ansi(&stdout_of(sdlx(dir.path()).args(["usages", "User", "api"])));
        for path in ["Query.user", "Mutation.rename", "User.friends", "Post.author"] {
            assert!(out.contains(path), "missing {path} in:\n{out}");
        }
    }

    #[test]
    fn usages_json() {
        let dir = temp_dir();
        setup(dir.path());

        let out = stdout_of(sdlx(dir.path()).args(["usages", "Date", "api", "--json"]));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["type_name"], "Date");
        assert_eq!(json["defined"], true);
        let usages = json["usages"].as_array().unwrap();
        assert_eq!(usages.len(), 1);
        assert_eq!(usages[0]["path"], "User.joined");
    }

    #[test]
    fn usages_of_unreferenced_type_is_empty() {
        let dir = temp_dir();
        setup(dir.path());

        sdlx(dir.path())
            .args(["usages", "Nothing", "api"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No usages of Nothing."));
    }
}

mod resolve {
    use super::*;

    #[test]
    fn resolves_fields_types_and_directives() {
        let dir = temp_dir();
        setup(dir.path());

        let field = strip_ansi(&stdout_of(sdlx(dir.path()).args(["resolve", "User.friends", "api"])));
        assert!(field.contains("friends: [User!]!"));
        assert!(field.contains("[User!]! (type)"));

        let root = strip_ansi(&stdout_of(sdlx(dir.path()).args(["resolve", "Query.user", "api"])));
        assert!(root.contains("user(id: ID!): User"));

        let ty = strip_ansi(&stdout_of(sdlx(dir.path()).args(["resolve", "Result", "api"])));
        assert!(ty.contains("union"));
        assert!(ty.contains("Post"));

        let directive = strip_ansi(&stdout_of(sdlx(dir.path()).args(["resolve", "@auth", "api"])));
        assert!(directive.contains("FIELD_DEFINITION"));
    }

    #[test]
    fn builtins_are_not_errors() {
        let dir = temp_dir();
        setup(dir.path());

        sdlx(dir.path())
            .args(["resolve", "String", "api"])
            .assert()
            .success()
            .stdout(predicate::str::contains("built-in"));
    }

    #[test]
    fn unknown_names_fail() {
        let dir = temp_dir();
        setup(dir.path());

        sdlx(dir.path())
            .args(["resolve", "TrulyUnknownType", "api"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("type not found: TrulyUnknownType"));
        sdlx(dir.path())
            .args(["resolve", "Query.nothing", "api"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("query field not found: nothing"));
        sdlx(dir.path())
            .args(["resolve", "User.nothing", "api"])
            .assert()
            .failure();
    }
}

mod walk {
    use super::*;

    #[test]
    fn names_build_breadcrumbs() {
        let dir = temp_dir();
        setup(dir.path());

        let out = strip_ansi(&stdout_of(
            sdlx(dir.path()).args(["walk", "api", "user", "friends"]),
        ));
        assert!(out.contains("Path: user › friends"), "{out}");
        assert!(out.contains("joined"));
    }

    #[test]
    fn keys_move_and_switch_categories() {
        let dir = temp_dir();
        setup(dir.path());

        let out = strip_ansi(&stdout_of(
            sdlx(dir.path()).args(["walk", "api", "user", "h", "tab"]),
        ));
        assert!(out.contains("[Mutation]"));
        assert!(out.contains("Path: (top)"));
        assert!(out.contains("rename"));
    }

    #[test]
    fn filter_steps_narrow_the_panel() {
        let dir = temp_dir();
        setup(dir.path());

        let out = strip_ansi(&stdout_of(
            sdlx(dir.path()).args(["walk", "api", "-c", "object", "User", "/fri"]),
        ));
        assert!(out.contains("friends"));
        assert!(!out.contains("joined"));
    }

    #[test]
    fn leaf_steps_fail() {
        let dir = temp_dir();
        setup(dir.path());

        sdlx(dir.path())
            .args(["walk", "api", "-c", "object", "User", "id"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("'id' has nothing to open"));
    }

    #[test]
    fn search_category_needs_a_query() {
        let dir = temp_dir();
        setup(dir.path());

        sdlx(dir.path())
            .args(["walk", "api", "-c", "search"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("needs --query"));

        let out = strip_ansi(&stdout_of(
            sdlx(dir.path()).args(["walk", "api", "-c", "search", "-q", "account"]),
        ));
        assert!(out.contains("[Search]"));
        assert!(out.contains("User"));
    }
}

mod search {
    use super::*;

    #[test]
    fn indexes_on_first_search() {
        let dir = temp_dir();
        setup(dir.path());

        sdlx(dir.path())
            .args(["search", "api", "user", "--json"])
            .assert()
            .success()
            .stderr(predicate::str::contains("updating"));

        assert!(dir.path().join("index/api/meta.json").exists());

        // Second search finds a current index.
        sdlx(dir.path())
            .args(["search", "api", "user"])
            .assert()
            .success()
            .stderr(predicate::str::contains("updating").not());
    }

    #[test]
    fn json_results_are_ranked() {
        let dir = temp_dir();
        setup(dir.path());

        let out = stdout_of(sdlx(dir.path()).args(["search", "api", "account", "--json"]));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["schema"], "api");
        assert_eq!(json["query"], "account");

        let results = json["results"].as_array().unwrap();
        let paths: Vec<&str> = results.iter().map(|r| r["path"].as_str().unwrap()).collect();
        assert!(paths.contains(&"User"));
        assert!(paths.contains(&"Query.user"));

        let scores: Vec<f64> = results.iter().map(|r| r["score"].as_f64().unwrap()).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn limit_caps_results() {
        let dir = temp_dir();
        setup(dir.path());

        let out = stdout_of(sdlx(dir.path()).args(["search", "api", "user", "-n", "1", "--json"]));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["total_matches"], 1);
    }

    #[test]
    fn source_changes_trigger_reindex() {
        let dir = temp_dir();
        setup(dir.path());

        sdlx(dir.path()).args(["index", "api"]).assert().success();
        fs::write(
            dir.path().join("schema.graphql"),
            format!("{SCHEMA}\ntype Invoice {{ total: Int }}\n"),
        )
        .unwrap();

        sdlx(dir.path())
            .args(["status", "api"])
            .assert()
            .stdout(predicate::str::contains("stale"));

        let out = stdout_of(sdlx(dir.path()).args(["search", "api", "invoice", "--json"]));
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        let paths: Vec<&str> = json["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["path"].as_str().unwrap())
            .collect();
        assert!(paths.contains(&"Invoice"), "{paths:?}");
    }
}

mod index {
    use super::*;

    #[test]
    fn index_status_and_remove() {
        let dir = temp_dir();
        setup(dir.path());

        sdlx(dir.path())
            .args(["index", "api"])
            .assert()
            .success()
            .stdout(predicate::str::contains("records"));

        sdlx(dir.path())
            .args(["status", "api"])
            .assert()
            .success()
            .stdout(predicate::str::contains("current"));

        sdlx(dir.path())
            .args(["remove", "api"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed index 'api'"));
        assert!(!dir.path().join("index/api").exists());

        sdlx(dir.path())
            .args(["remove", "api"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No index for 'api'."));
    }

    #[test]
    fn custom_ids_are_namespaced() {
        let dir = temp_dir();
        setup(dir.path());

        sdlx(dir.path())
            .args(["index", "schema.graphql", "--id", "other"])
            .assert()
            .success();
        assert!(dir.path().join("index/other/meta.json").exists());
        assert!(!dir.path().join("index/api").exists());
    }

    #[test]
    fn invalid_ids_fail() {
        let dir = temp_dir();
        setup(dir.path());

        sdlx(dir.path())
            .args(["remove", ".."])
            .assert()
            .failure();
    }
}

mod config {
    use super::*;

    #[test]
    fn shows_effective_settings() {
        let dir = temp_dir();
        setup(dir.path());

        let out = strip_ansi(&stdout_of(sdlx(dir.path()).arg("config")));
        assert!(out.contains("visible_panels = 2"));
        assert!(out.contains("api"));
    }

    #[test]
    fn status_without_config_suggests_init() {
        let dir = temp_dir();

        sdlx(dir.path())
            .arg("status")
            .assert()
            .success()
            .stdout(predicate::str::contains("sdlx init"));
    }

    #[test]
    fn status_reports_warnings() {
        let dir = temp_dir();
        setup(dir.path());
        fs::write(
            dir.path().join(".sdlx.toml"),
            "root = true\n[search]\nstemmer = \"klingon\"\n[index]\ndirectory = \"index\"\n",
        )
        .unwrap();

        sdlx(dir.path())
            .arg("status")
            .assert()
            .failure()
            .stdout(predicate::str::contains("klingon"));
    }

    #[test]
    fn invalid_config_fails() {
        let dir = temp_dir();
        fs::write(dir.path().join(".sdlx.toml"), "[settings\n").unwrap();

        sdlx(dir.path())
            .arg("config")
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to load configuration"));
    }
}
