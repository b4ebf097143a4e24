//! Human-readable run output and the JSON report file.

use crate::{CaseOutcome, ProbeResult, Result, RunSummary, TestCase};
use serde::Serialize;
use serde_json::Value;
use std::{borrow::Cow, fs::File, io, io::Write, path::Path};
use url::Url;
use yansi::{Color, Condition, Painted};

/// Writes colorized progress lines for a run
pub struct Reporter<W> {
    out: W,
    color: bool,
    preview_chars: usize,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, preview_chars: usize) -> Self {
        Self {
            out,
            color: true,
            preview_chars,
        }
    }

    /// Disables ANSI colors regardless of the terminal.
    pub fn without_color(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint<T>(&self, value: T, color: Color) -> Painted<T> {
        let painted = Painted::new(value).fg(color);
        if self.color {
            painted
        } else {
            painted.whenever(Condition::NEVER)
        }
    }

    pub fn header(&mut self, base_url: &Url) -> io::Result<()> {
        let header = self.paint("=== MCP Server Test Suite ===", Color::Magenta);
        writeln!(self.out, "{header}")?;
        writeln!(
            self.out,
            "Testing server at: {}\n",
            base_url.as_str().trim_end_matches('/')
        )
    }

    pub fn case_started(&mut self, case: &TestCase, url: &str) -> io::Result<()> {
        let name = self.paint(format!("Testing: {}", case.name), Color::Blue);
        let target = self.paint(format!("{} {url}", case.method), Color::Yellow);
        writeln!(self.out, "\n{name}")?;
        writeln!(self.out, "{target}")?;
        if let Some(body) = &case.body {
            writeln!(self.out, "Body: {}", pretty(body))?;
        }
        Ok(())
    }

    pub fn case_finished(&mut self, result: &ProbeResult) -> io::Result<()> {
        if let Some(error) = &result.error {
            let line = self.paint(format!("✗ Error: {error}"), Color::Red);
            return writeln!(self.out, "{line}");
        }

        let status = result.status.unwrap_or_default();
        let body = result
            .data
            .as_ref()
            .map(pretty)
            .unwrap_or_else(|| "null".to_string());
        let body = preview(&body, self.preview_chars);

        if result.success() {
            let line = self.paint(format!("✓ Success ({status})"), Color::Green);
            writeln!(self.out, "{line}")?;
            writeln!(self.out, "Response: {body}")
        } else {
            let line = self.paint(format!("✗ Failed ({status})"), Color::Red);
            writeln!(self.out, "{line}")?;
            writeln!(self.out, "Error: {body}")
        }
    }

    pub fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        let title = self.paint("=== Test Summary ===", Color::Magenta);
        let passed = self.paint(format!("Passed: {}", summary.passed), Color::Green);
        let failed = self.paint(format!("Failed: {}", summary.failed), Color::Red);
        writeln!(self.out, "\n{title}")?;
        writeln!(self.out, "{passed}")?;
        writeln!(self.out, "{failed}")?;
        writeln!(self.out, "Total: {}", summary.total())?;

        let verdict = if summary.all_passed() {
            self.paint("✓ All tests passed!", Color::Green)
        } else {
            self.paint("✗ Some tests failed", Color::Red)
        };
        writeln!(self.out, "\n{verdict}")?;
        self.out.flush()
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Cuts `text` to `max` characters, marking the cut with `...`.
pub fn preview(text: &str, max: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max) {
        Some((end, _)) => Cow::Owned(format!("{}...", &text[..end])),
        None => Cow::Borrowed(text),
    }
}

#[derive(Serialize)]
struct Report<'a> {
    base_url: &'a str,
    passed: usize,
    failed: usize,
    total: usize,
    success: bool,
    outcomes: &'a [CaseOutcome],
}

/// Writes the run summary as pretty JSON to `path`.
pub fn write_json(path: &Path, base_url: &Url, summary: &RunSummary) -> Result<()> {
    let report = Report {
        base_url: base_url.as_str().trim_end_matches('/'),
        passed: summary.passed,
        failed: summary.failed,
        total: summary.total(),
        success: summary.all_passed(),
        outcomes: &summary.outcomes,
    };
    let mut file = File::create(path)?;
    serde_json::to_writer_pretty(&mut file, &report)?;
    file.write_all(b"\n")?;
    Ok(())
}
