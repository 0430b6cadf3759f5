// Test infrastructure shared by the keyword-formatter integration tests
#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Keywords every filesystem fixture resolves to
pub const FILESYSTEM_KEYWORDS: [&str; 3] = ["durian", "marang", "rambutan"];

/// Environment variables that would leak into a run from the outside
const ISOLATED_ENV: &[&str] = &[
    "INPUT_KEYWORDS",
    "INPUT_KEYWORDS-PATH",
    "INPUT_KEYWORDS_PATH",
    "INPUT_PREFIX",
    "INPUT_DRY-RUN",
    "INPUT_DRY_RUN",
    "GITHUB_OUTPUT",
    "GITHUB_EVENT_NAME",
    "GITHUB_EVENT_PATH",
    "GITHUB_REPOSITORY",
];

/// Keyword sources laid out in a temporary directory
pub struct Fixtures {
    dir: TempDir,
}

impl Fixtures {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        fs::write(root.join("comma.txt"), "durian, marang, rambutan").unwrap();
        fs::write(root.join("linebreak"), "durian\nmarang\nrambutan\n").unwrap();
        fs::write(root.join("empty-file"), "").unwrap();
        fs::create_dir(root.join("empty-directory")).unwrap();

        let directory = root.join("directory");
        fs::create_dir(&directory).unwrap();
        for name in ["durian.md", "marang.txt", "rambutan"] {
            fs::write(directory.join(name), "").unwrap();
        }

        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a title store with the given `(owner, repo, number, title)` records
    pub fn write_store(&self, records: &[(&str, &str, u64, &str)]) -> PathBuf {
        let records: Vec<_> = records
            .iter()
            .map(|(owner, repo, number, title)| {
                serde_json::json!({"owner": owner, "repo": repo, "number": number, "title": title})
            })
            .collect();

        let path = self.path("titles.json");
        fs::write(&path, serde_json::json!({ "records": records }).to_string()).unwrap();
        path
    }

    /// Write an event payload and return its path
    pub fn write_event(&self, payload: serde_json::Value) -> PathBuf {
        let path = self.path("event.json");
        fs::write(&path, payload.to_string()).unwrap();
        path
    }

    /// Read back a title from the store
    pub fn stored_title(&self, store: &Path, number: u64) -> String {
        let content = fs::read_to_string(store).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        value["records"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["number"] == number)
            .map(|r| r["title"].as_str().unwrap().to_string())
            .unwrap()
    }

    /// The CLI, run inside the fixture directory with a clean environment
    pub fn kwfmt(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("kwfmt");
        cmd.current_dir(self.root());
        for name in ISOLATED_ENV {
            cmd.env_remove(name);
        }
        cmd
    }
}
