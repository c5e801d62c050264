//! Diagnostic output formats.

use std::path::Path;

use serde::Serialize;
use typolens_types::{TypoDiagnostic, TypoSeverity};

/// One line per diagnostic, compiler style.
pub fn render_text(path: &Path, diagnostics: &[TypoDiagnostic]) -> String {
    let mut out = String::new();
    for diagnostic in diagnostics {
        out.push_str(&diagnostic.display_with_path(path));
        out.push('\n');
    }
    out
}

#[derive(Debug, Serialize)]
struct JsonDiagnostic<'a> {
    path: &'a Path,
    /// 1-indexed.
    line: u32,
    /// 1-indexed, in the configured position encoding.
    column: u32,
    end_line: u32,
    end_column: u32,
    severity: TypoSeverity,
    code: &'static str,
    token: &'a str,
    message: &'a str,
    suggestions: &'a [String],
}

pub fn render_json(path: &Path, diagnostics: &[TypoDiagnostic]) -> serde_json::Result<String> {
    let items: Vec<JsonDiagnostic<'_>> = diagnostics
        .iter()
        .map(|d| {
            let range = d.range();
            JsonDiagnostic {
                path,
                line: range.start.line + 1,
                column: range.start.character + 1,
                end_line: range.end.line + 1,
                end_column: range.end.character + 1,
                severity: d.severity(),
                code: d.code(),
                token: d.typo().token(),
                message: d.message(),
                suggestions: d.suggestions(),
            }
        })
        .collect();
    serde_json::to_string_pretty(&items)
}

/// Added blocks separated by blank lines.
pub fn render_blocks(blocks: &[String]) -> String {
    let mut out = blocks.join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
