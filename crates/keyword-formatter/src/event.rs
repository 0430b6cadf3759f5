//! Trigger events and record identity
//!
//! A run targets one issue or pull request, either named explicitly as
//! `owner/repo#number` or taken from the event that triggered the workflow.

use crate::errors::{Error, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// Event names a run accepts
pub const SUPPORTED_EVENTS: &[&str] = &["issues", "pull_request", "pull_request_target"];

/// Event actions a run accepts
pub const SUPPORTED_ACTIONS: &[&str] = &["opened", "edited"];

/// Identifies the issue or pull request whose title is formatted
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl RecordRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self { owner: owner.into(), repo: repo.into(), number }
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

impl FromStr for RecordRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidRecord(s.to_string());
        let (slug, number) = s.trim().split_once('#').ok_or_else(invalid)?;
        let (owner, repo) = parse_repository(slug).map_err(|_| invalid())?;
        let number = number.parse().map_err(|_| invalid())?;
        Ok(RecordRef { owner, repo, number })
    }
}

/// Split an `owner/repo` slug
pub fn parse_repository(slug: &str) -> Result<(String, String)> {
    match slug.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(Error::InvalidRepository(slug.to_string())),
    }
}

/// The parts of a webhook payload a run needs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventPayload {
    pub action: Option<String>,
    pub issue: Option<Numbered>,
    pub pull_request: Option<Numbered>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Numbered {
    pub number: u64,
}

impl EventPayload {
    /// Issue number, falling back to the pull request number
    pub fn number(&self) -> Option<u64> {
        self.issue.as_ref().or(self.pull_request.as_ref()).map(|item| item.number)
    }
}

/// Validate the event and resolve the record it is about
pub fn record_from_event(
    event_name: &str,
    payload: &EventPayload,
    repository: &str,
) -> Result<RecordRef> {
    if !SUPPORTED_EVENTS.contains(&event_name) {
        return Err(Error::UnsupportedEvent(event_name.to_string()));
    }

    let action = payload.action.as_deref().unwrap_or("none");
    if !SUPPORTED_ACTIONS.contains(&action) {
        return Err(Error::UnsupportedAction {
            event: event_name.to_string(),
            action: action.to_string(),
        });
    }

    let (owner, repo) = parse_repository(repository)?;
    let number = payload.number().ok_or(Error::MissingNumber)?;
    Ok(RecordRef { owner, repo, number })
}

/// Resolve the record from `GITHUB_EVENT_NAME`, `GITHUB_EVENT_PATH` and `GITHUB_REPOSITORY`
pub fn record_from_env() -> Result<RecordRef> {
    record_from_vars(|name| std::env::var(name).ok())
}

/// Same as [`record_from_env`] with a custom variable lookup
pub fn record_from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<RecordRef> {
    let require = |name: &'static str| {
        lookup(name).filter(|value| !value.is_empty()).ok_or(Error::MissingEnv(name))
    };

    let event_name = require("GITHUB_EVENT_NAME")?;
    // Reject unsupported events before touching the payload
    if !SUPPORTED_EVENTS.contains(&event_name.as_str()) {
        return Err(Error::UnsupportedEvent(event_name));
    }

    let payload_path = PathBuf::from(require("GITHUB_EVENT_PATH")?);
    let repository = require("GITHUB_REPOSITORY")?;

    let content =
        fs::read_to_string(&payload_path).map_err(|source| Error::io(&payload_path, source))?;
    let payload: EventPayload = serde_json::from_str(&content)
        .map_err(|source| Error::Json { path: payload_path.clone(), source })?;

    debug!("Event {} with action {:?}", event_name, payload.action);
    record_from_event(&event_name, &payload, &repository)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn payload(action: &str, issue: Option<u64>, pull_request: Option<u64>) -> EventPayload {
        EventPayload {
            action: Some(action.to_string()),
            issue: issue.map(|number| Numbered { number }),
            pull_request: pull_request.map(|number| Numbered { number }),
        }
    }

    #[test]
    fn test_record_display_and_parse() {
        let record = RecordRef::new("fregante", "keyword-formatter", 12);
        assert_eq!(record.to_string(), "fregante/keyword-formatter#12");
        assert_eq!("fregante/keyword-formatter#12".parse::<RecordRef>().unwrap(), record);
    }

    #[test]
    fn test_record_parse_rejects_malformed() {
        for text in ["owner/repo", "owner#1", "/repo#1", "owner/#1", "a/b/c#1", "owner/repo#x"] {
            assert!(
                matches!(text.parse::<RecordRef>(), Err(Error::InvalidRecord(_))),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_issue_event() {
        let record = record_from_event("issues", &payload("opened", Some(3), None), "o/r").unwrap();
        assert_eq!(record, RecordRef::new("o", "r", 3));
    }

    #[test]
    fn test_pull_request_event() {
        let record =
            record_from_event("pull_request_target", &payload("edited", None, Some(8)), "o/r")
                .unwrap();
        assert_eq!(record.number, 8);
    }

    #[test]
    fn test_unsupported_event() {
        let err = record_from_event("push", &payload("opened", Some(1), None), "o/r").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Only `issues`, `pull_request`, and `pull_request_target` events are supported. Received: push"
        );
    }

    #[test]
    fn test_unsupported_action() {
        let closed = payload("closed", Some(1), None);
        let err = record_from_event("issues", &closed, "o/r").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Only types `opened` and `edited` events are supported. Received: issues.closed"
        );
    }

    #[test]
    fn test_missing_number() {
        let err = record_from_event("issues", &payload("opened", None, None), "o/r").unwrap_err();
        assert!(matches!(err, Error::MissingNumber));
    }

    #[test]
    fn test_invalid_repository() {
        let opened = payload("opened", Some(1), None);
        let err = record_from_event("issues", &opened, "nope").unwrap_err();
        assert!(matches!(err, Error::InvalidRepository(_)));
    }

    #[test]
    fn test_record_from_vars() {
        let temp = TempDir::new().unwrap();
        let event_path = temp.path().join("event.json");
        fs::write(&event_path, r#"{"action": "opened", "issue": {"number": 42, "title": "x"}}"#)
            .unwrap();

        let vars: HashMap<&str, String> = HashMap::from([
            ("GITHUB_EVENT_NAME", "issues".to_string()),
            ("GITHUB_EVENT_PATH", event_path.display().to_string()),
            ("GITHUB_REPOSITORY", "octo/widgets".to_string()),
        ]);

        let record = record_from_vars(|name| vars.get(name).cloned()).unwrap();
        assert_eq!(record, RecordRef::new("octo", "widgets", 42));
    }

    #[test]
    fn test_record_from_vars_missing_variable() {
        let err = record_from_vars(|_| None).unwrap_err();
        assert!(matches!(err, Error::MissingEnv("GITHUB_EVENT_NAME")));
    }

    #[test]
    fn test_record_from_vars_bad_payload() {
        let temp = TempDir::new().unwrap();
        let event_path = temp.path().join("event.json");
        fs::write(&event_path, "not json").unwrap();

        let vars: HashMap<&str, String> = HashMap::from([
            ("GITHUB_EVENT_NAME", "issues".to_string()),
            ("GITHUB_EVENT_PATH", event_path.display().to_string()),
            ("GITHUB_REPOSITORY", "octo/widgets".to_string()),
        ]);

        let err = record_from_vars(|name| vars.get(name).cloned()).unwrap_err();
        assert!(matches!(err, Error::Json { .. }));
    }
}
