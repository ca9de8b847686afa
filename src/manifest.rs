//! A minimal TOML manifest loader.
//!
//! Deliberately small: no repo groups, no manifest inheritance, no
//! file-copy directives. It exists so the CLI binary has something real to
//! point the synchronizer at; a richer workspace-bootstrap format is left
//! for another crate.

use std::path::Path;

use serde::Deserialize;

use crate::error::ManifestError;
use crate::repo::{Remote, Repo};

/// `remotes = "url"` (sole implicit `origin`) or `remotes = [{name=.., url=..}, ...]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RemotesField {
    Single(String),
    List(Vec<RemoteRecord>),
}

#[derive(Debug, Deserialize)]
struct RemoteRecord {
    name: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct RepoRecord {
    dest: String,
    remotes: RemotesField,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    sha1: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(rename = "repo", default)]
    repos: Vec<RepoRecord>,
}

/// Read and validate the manifest at `path`, returning its repos in file order.
pub fn load(path: &Path) -> Result<Vec<Repo>, ManifestError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ManifestError(format!("{}: {e}", path.display())))?;
    load_str(&text)
}

fn load_str(text: &str) -> Result<Vec<Repo>, ManifestError> {
    let parsed: ManifestFile =
        toml::from_str(text).map_err(|e| ManifestError(format!("malformed manifest: {e}")))?;

    parsed
        .repos
        .into_iter()
        .map(|record| {
            let remotes = match record.remotes {
                RemotesField::Single(url) => vec![Remote {
                    name: "origin".to_string(),
                    url,
                }],
                RemotesField::List(list) => list
                    .into_iter()
                    .map(|r| Remote {
                        name: r.name,
                        url: r.url,
                    })
                    .collect(),
            };

            Repo::new(record.dest, remotes, record.branch, record.tag, record.sha1)
                .map_err(|e| ManifestError(e.0))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::Pin;
    use rstest::rstest;

    #[rstest]
    #[case("tag = \"v1.0\"\nsha1 = \"abcdef0123456789abcdef0123456789abcdef01\"")]
    #[case("")]
    fn rejects_invalid_pin_combinations(#[case] pin_lines: &str) {
        let text = format!(
            r#"
            [[repo]]
            dest = "foo"
            remotes = "git@example.com:foo.git"
            {pin_lines}
        "#
        );
        assert!(load_str(&text).is_err());
    }

    #[test]
    fn loads_bare_string_remote_as_origin() {
        let text = r#"
            [[repo]]
            dest = "foo"
            remotes = "git@example.com:foo.git"
            branch = "main"
        "#;
        let repos = load_str(text).unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].default_remote().name, "origin");
        assert_eq!(repos[0].pin(), Pin::Branch("main"));
    }

    #[test]
    fn loads_explicit_remote_list_in_order() {
        let text = r#"
            [[repo]]
            dest = "foo"
            tag = "v1.0"
            [[repo.remotes]]
            name = "origin"
            url = "git@example.com:foo.git"
            [[repo.remotes]]
            name = "upstream"
            url = "git@upstream.example.com:foo.git"
        "#;
        let repos = load_str(text).unwrap();
        assert_eq!(repos[0].remotes.len(), 2);
        assert_eq!(repos[0].remotes[0].name, "origin");
        assert_eq!(repos[0].remotes[1].name, "upstream");
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(load_str("not = [valid").is_err());
    }

    #[test]
    fn empty_manifest_yields_no_repos() {
        assert!(load_str("").unwrap().is_empty());
    }
}
