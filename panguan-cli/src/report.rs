//! Batch reports.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use panguan_pipeline::PipelineState;
use std::{fmt::Write, fs, path::{Path, PathBuf}};

/// Renders the verification report of a state as Markdown lines.
pub fn verification_summary(state: &PipelineState) -> String {
    let Some(report) = state.verification_report() else {
        return "Not verified.".to_owned();
    };

    let mut out = format!("Status: {}", report.status);
    for detail in &report.details {
        let _ = write!(out, "\n- {}", detail);
    }
    out
}

/// Renders the report for a batch of questions and the states they produced.
pub fn render(entries: &[(String, PipelineState)]) -> String {
    let mut out = String::from("# Panguan Report\n");
    for (question, state) in entries {
        let _ = write!(
            out,
            "\n## Problem\n{}\n\n### Final Writeup\n{}\n\n### Verification\n{}\n",
            question,
            state.final_writeup().unwrap_or_default(),
            verification_summary(state),
        );
    }
    out
}

/// Returns the path of the report written at the given time.
pub fn report_path(dir: &Path, time: DateTime<Local>) -> PathBuf {
    dir.join(format!("report-{}.md", time.format("%Y%m%d-%H%M%S")))
}

/// Writes the report into the directory, creating it if needed. Returns the path written to.
pub fn write(dir: &Path, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create reports directory `{}`", dir.display()))?;
    let path = report_path(dir, Local::now());
    fs::write(&path, contents)
        .with_context(|| format!("failed to write report `{}`", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use panguan_pipeline::{build_root_pipeline, stages::OfflineSearch, Stage};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn timestamped_path() {
        let time = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(report_path(Path::new("reports"), time), Path::new("reports/report-20240309-070501.md"));
    }

    #[test]
    fn one_section_per_question() {
        let pipeline = build_root_pipeline(Box::new(OfflineSearch));
        let entries = ["Compute ∫_0^1 x^2 dx", "Find the general solution to y'' - y = 0"]
            .into_iter()
            .map(|question| (question.to_owned(), pipeline.run(question, PipelineState::new("sess-test"))))
            .collect::<Vec<_>>();

        let report = render(&entries);
        assert!(report.starts_with("# Panguan Report\n"));
        assert_eq!(report.matches("## Problem").count(), 2);
        assert!(report.contains(r"\boxed{1/3}"));
        assert!(report.contains(r"\boxed{}"));
        assert_eq!(report.matches("Status: passed").count(), 4);
    }

    #[test]
    fn writes_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let reports = dir.path().join("nested/reports");
        let path = write(&reports, "# Panguan Report\n").unwrap();
        assert!(path.starts_with(&reports));
        assert_eq!(fs::read_to_string(path).unwrap(), "# Panguan Report\n");
    }
}
