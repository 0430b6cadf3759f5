//! Step outputs (`title`, `changed`) for the workflow runner

use crate::errors::{Error, Result};
use crate::run::Outcome;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment variable naming the runner's output file
pub const OUTPUT_ENV: &str = "GITHUB_OUTPUT";

const DELIMITER: &str = "KWFMT_EOF";

/// The output file, if the runner provides one
pub fn output_path() -> Option<PathBuf> {
    std::env::var_os(OUTPUT_ENV).filter(|path| !path.is_empty()).map(PathBuf::from)
}

/// Render outputs in the runner's `name<<delimiter` form
pub fn render_outputs(outcome: &Outcome) -> String {
    let mut delimiter = DELIMITER.to_string();
    while outcome.title.contains(&delimiter) {
        delimiter.push('_');
    }

    format!(
        "title<<{delimiter}\n{}\n{delimiter}\nchanged={}\n",
        outcome.title, outcome.changed
    )
}

/// Append outputs to the runner's output file
pub fn write_outputs(path: &Path, outcome: &Outcome) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| Error::io(path, source))?;

    file.write_all(render_outputs(outcome).as_bytes()).map_err(|source| Error::io(path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn outcome(title: &str, changed: bool) -> Outcome {
        Outcome {
            original: "hello".to_string(),
            title: title.to_string(),
            changed,
            applied: false,
        }
    }

    #[test]
    fn test_render_outputs() {
        assert_eq!(
            render_outputs(&outcome("`hello`", true)),
            "title<<KWFMT_EOF\n`hello`\nKWFMT_EOF\nchanged=true\n"
        );
    }

    #[test]
    fn test_render_outputs_avoids_delimiter_in_title() {
        let rendered = render_outputs(&outcome("KWFMT_EOF", false));
        assert!(rendered.starts_with("title<<KWFMT_EOF_\nKWFMT_EOF\nKWFMT_EOF_\n"));
    }

    #[test]
    fn test_write_outputs_appends() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("output");
        fs::write(&path, "other=1\n").unwrap();

        write_outputs(&path, &outcome("x", false)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("other=1\ntitle<<"));
        assert!(content.ends_with("changed=false\n"));
    }

    #[test]
    #[serial]
    fn test_output_path_from_env() {
        std::env::set_var(OUTPUT_ENV, "/tmp/kwfmt-output");
        let path = output_path();
        std::env::set_var(OUTPUT_ENV, "");
        let empty = output_path();
        std::env::remove_var(OUTPUT_ENV);

        assert_eq!(path, Some(PathBuf::from("/tmp/kwfmt-output")));
        assert_eq!(empty, None);
    }
}
