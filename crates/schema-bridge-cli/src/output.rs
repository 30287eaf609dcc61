use std::path::Path;

use console::{Style, Term};
use schema_bridge_backend::{ApplyOutcome, ApplyReport};
use schema_bridge_core::UnsupportedTypeWarning;
use schema_bridge_dsl::{DslError, ParseWarning, ParsedDocument};

use crate::cli::GlobalOpts;
use crate::diagnostic::{render_diagnostics, render_warnings};
use crate::error::CliError;

/// Output format mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

/// Where translation results and diagnostics go.
///
/// Model text, schema documents and JSON summaries go to stdout so they can
/// be piped. Progress, warnings and rendered diagnostics go to stderr.
pub struct OutputContext {
    pub mode: OutputMode,
    pub quiet: bool,
    pub use_color: bool,
}

/// Running totals for a `parse` run, plus the per-file JSON results.
#[derive(Debug, Default)]
pub struct ParseSummary {
    pub files: usize,
    pub classes: usize,
    pub errors: usize,
    pub warnings: usize,
    results: Vec<serde_json::Value>,
}

impl ParseSummary {
    pub fn failed(&self) -> bool {
        self.errors > 0
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "files": self.files,
            "classes": self.classes,
            "errors": self.errors,
            "warnings": self.warnings,
            "results": self.results,
        })
    }
}

impl OutputContext {
    pub fn from_global(global: &GlobalOpts) -> Self {
        let mode = match global.format.as_str() {
            "json" => OutputMode::Json,
            "plain" => OutputMode::Plain,
            _ => OutputMode::Human,
        };
        let use_color = !global.no_color
            && std::env::var("TERM").map_or(true, |t| t != "dumb")
            && Term::stderr().is_term();
        Self {
            mode,
            quiet: global.quiet,
            use_color,
        }
    }

    fn label(&self, text: &str, style: Style) -> String {
        if self.use_color {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn human(&self) -> bool {
        !self.quiet && self.mode == OutputMode::Human
    }

    /// One-line confirmation on stderr; human mode only.
    pub fn success(&self, msg: &str) {
        if self.human() {
            eprintln!("{} {msg}", self.label("ok", Style::new().green().bold()));
        }
    }

    /// Progress line on stderr; human mode only.
    pub fn status(&self, msg: &str) {
        if self.human() {
            eprintln!("{msg}");
        }
    }

    pub fn warn(&self, msg: &str) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human => {
                eprintln!("{} {msg}", self.label("warning:", Style::new().yellow().bold()));
            }
            OutputMode::Json => eprintln!("{}", serde_json::json!({ "warning": msg })),
            OutputMode::Plain => eprintln!("warning\t{msg}"),
        }
    }

    /// Reports a failed command. Always printed, even when quiet.
    pub fn print_error(&self, err: &CliError) {
        match self.mode {
            OutputMode::Human => {
                eprintln!("{} {err}", self.label("error:", Style::new().red().bold()));
            }
            OutputMode::Json => eprintln!("{}", err.to_json()),
            OutputMode::Plain => eprintln!("error\t{err}"),
        }
    }

    pub fn print_json(&self, value: &serde_json::Value) {
        if let Ok(s) = serde_json::to_string_pretty(value) {
            println!("{s}");
        }
    }

    /// Writes model text or a schema document to stdout with one trailing newline.
    pub fn print_text(&self, text: &str) {
        if !text.is_empty() {
            println!("{}", text.trim_end_matches('\n'));
        }
    }

    pub fn show_progress(&self) -> bool {
        self.human() && Term::stderr().is_term()
    }

    // -- Translation warnings --

    /// Text the parser skipped in `file`.
    pub fn skipped(&self, file: &Path, warnings: &[ParseWarning]) {
        for warning in warnings {
            self.warn(&format!("{}: {warning}", file.display()));
        }
    }

    /// Types that had no mapping and were replaced by the fallback sentinel.
    pub fn unmapped_types(&self, warnings: &[UnsupportedTypeWarning]) {
        for warning in warnings {
            self.warn(&warning.to_string());
        }
    }

    // -- parse --

    /// Records a file that parsed. `text` is the canonical model text when
    /// `--print` was given; JSON mode carries it inside the file result.
    pub fn parsed_file(
        &self,
        summary: &mut ParseSummary,
        file: &Path,
        source: &str,
        document: &ParsedDocument,
        text: Option<&str>,
    ) {
        let filename = file.display().to_string();
        let count = document.classes.len();
        summary.files += 1;
        summary.classes += count;
        summary.warnings += document.warnings.len();

        match self.mode {
            OutputMode::Json => {
                let warnings: Vec<serde_json::Value> = document
                    .warnings
                    .iter()
                    .map(|w| serde_json::json!({ "message": w.to_string() }))
                    .collect();
                let mut result = serde_json::json!({
                    "file": filename,
                    "classes": count,
                    "warnings": warnings,
                    "errors": [],
                });
                if let Some(text) = text {
                    result["text"] = serde_json::Value::from(text);
                }
                summary.results.push(result);
            }
            OutputMode::Human => {
                if !self.quiet {
                    for report in render_warnings(&document.warnings, source, &filename) {
                        eprintln!("{report:?}");
                    }
                }
                if let Some(text) = text {
                    self.print_text(text);
                }
                self.status(&format!("  {filename} .... {count} classes"));
            }
            OutputMode::Plain => {
                self.skipped(file, &document.warnings);
                if let Some(text) = text {
                    self.print_text(text);
                }
            }
        }
    }

    /// Records a file that failed to parse and renders its errors.
    pub fn failed_file(
        &self,
        summary: &mut ParseSummary,
        file: &Path,
        source: &str,
        errors: &[DslError],
    ) {
        let filename = file.display().to_string();
        summary.files += 1;
        summary.errors += errors.len();

        match self.mode {
            OutputMode::Human => {
                for report in render_diagnostics(errors, source, &filename) {
                    eprintln!("{report:?}");
                }
            }
            OutputMode::Json => {
                let errors: Vec<serde_json::Value> = errors
                    .iter()
                    .map(|e| {
                        serde_json::json!({
                            "message": e.to_string(),
                            "start": e.span().start,
                            "end": e.span().end,
                        })
                    })
                    .collect();
                summary.results.push(serde_json::json!({
                    "file": filename,
                    "classes": 0,
                    "warnings": [],
                    "errors": errors,
                }));
            }
            OutputMode::Plain => {
                for err in errors {
                    eprintln!("{filename}\terror\t{err}");
                }
            }
        }
    }

    /// Closing line of a `parse` run. Plain mode skips it when model text
    /// was printed so stdout stays parseable.
    pub fn parse_summary(&self, summary: &ParseSummary, printed: bool) {
        match self.mode {
            OutputMode::Human => {
                let line = format!(
                    "{} classes parsed from {} files, {} errors, {} warnings",
                    summary.classes, summary.files, summary.errors, summary.warnings
                );
                if summary.failed() {
                    self.warn(&line);
                } else {
                    self.success(&line);
                }
            }
            OutputMode::Json => self.print_json(&summary.to_json()),
            OutputMode::Plain if !printed => println!(
                "{}\t{}\t{}\t{}",
                summary.files, summary.classes, summary.errors, summary.warnings
            ),
            OutputMode::Plain => {}
        }
    }

    // -- apply --

    /// Warns about warehouse columns the model no longer declares.
    pub fn retained_fields(&self, reports: &[ApplyReport]) {
        for report in reports {
            for field in &report.retained {
                self.warn(&format!(
                    "{}.{field} is in the warehouse but not in the model; kept",
                    report.table
                ));
            }
        }
    }

    /// Per-table outcomes of an apply or dry run.
    pub fn apply_summary(&self, reports: &[ApplyReport], dry_run: bool) {
        let changed = reports.iter().filter(|r| r.changed()).count();
        match self.mode {
            OutputMode::Human => {
                for report in reports {
                    self.status(&format!(
                        "  {:<16} {}",
                        report.table.as_str(),
                        describe(&report.outcome)
                    ));
                }
                if dry_run {
                    self.success(&format!(
                        "Dry run: {changed} of {} tables would change.",
                        reports.len()
                    ));
                } else {
                    self.success(&format!(
                        "Applied {} tables ({changed} changed).",
                        reports.len()
                    ));
                }
            }
            OutputMode::Json => {
                let results: Vec<serde_json::Value> = reports.iter().map(report_json).collect();
                self.print_json(&serde_json::json!({
                    "dry_run": dry_run,
                    "tables": reports.len(),
                    "changed": changed,
                    "results": results,
                }));
            }
            OutputMode::Plain => {
                for report in reports {
                    println!("{}\t{}", report.table, outcome_name(&report.outcome));
                }
            }
        }
    }
}

fn outcome_name(outcome: &ApplyOutcome) -> &'static str {
    match outcome {
        ApplyOutcome::Created => "created",
        ApplyOutcome::Unchanged => "unchanged",
        ApplyOutcome::Altered { .. } => "altered",
    }
}

fn describe(outcome: &ApplyOutcome) -> String {
    match outcome {
        ApplyOutcome::Created => "CREATE".to_string(),
        ApplyOutcome::Unchanged => "no changes".to_string(),
        ApplyOutcome::Altered { added } => {
            let names: Vec<&str> = added.iter().map(|f| f.as_str()).collect();
            format!("ALTER add {}", names.join(", "))
        }
    }
}

fn report_json(report: &ApplyReport) -> serde_json::Value {
    let added: Vec<&str> = match &report.outcome {
        ApplyOutcome::Altered { added } => added.iter().map(|f| f.as_str()).collect(),
        _ => Vec::new(),
    };
    let retained: Vec<&str> = report.retained.iter().map(|f| f.as_str()).collect();
    serde_json::json!({
        "table": report.table.as_str(),
        "outcome": outcome_name(&report.outcome),
        "added": added,
        "retained": retained,
    })
}

#[cfg(test)]
mod tests {
    use schema_bridge_core::types::Identifier;

    use super::*;

    fn global(format: &str, quiet: bool, no_color: bool) -> GlobalOpts {
        GlobalOpts {
            format: format.into(),
            quiet,
            no_color,
            ..GlobalOpts::default()
        }
    }

    fn json_output() -> OutputContext {
        OutputContext {
            mode: OutputMode::Json,
            quiet: true,
            use_color: false,
        }
    }

    fn id(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    #[test]
    fn format_selects_mode() {
        for (format, mode) in [
            ("human", OutputMode::Human),
            ("json", OutputMode::Json),
            ("plain", OutputMode::Plain),
        ] {
            assert_eq!(OutputContext::from_global(&global(format, false, false)).mode, mode);
        }
    }

    #[test]
    fn no_color_disables_color() {
        let ctx = OutputContext::from_global(&global("human", false, true));
        assert!(!ctx.use_color);
        assert_eq!(ctx.label("ok", Style::new().green()), "ok");
    }

    #[test]
    fn progress_only_in_human_mode() {
        let quiet = OutputContext::from_global(&global("human", true, true));
        assert!(quiet.quiet);
        assert!(!quiet.show_progress());
        assert!(!json_output().show_progress());
    }

    #[test]
    fn json_file_result_carries_printed_text() {
        let document = schema_bridge_dsl::parse_document("class A { a : String; }").unwrap();
        let mut summary = ParseSummary::default();
        json_output().parsed_file(
            &mut summary,
            Path::new("a.pure"),
            "",
            &document,
            Some("class A {\n  a : String;\n}"),
        );

        let json = summary.to_json();
        assert_eq!(json["files"], 1);
        assert_eq!(json["classes"], 1);
        assert_eq!(json["results"][0]["file"], "a.pure");
        assert_eq!(json["results"][0]["text"], "class A {\n  a : String;\n}");
    }

    #[test]
    fn json_file_result_omits_text_without_print() {
        let document = schema_bridge_dsl::parse_document("class A { }").unwrap();
        let mut summary = ParseSummary::default();
        json_output().parsed_file(&mut summary, Path::new("a.pure"), "", &document, None);
        assert!(summary.to_json()["results"][0].get("text").is_none());
    }

    #[test]
    fn failed_file_counts_errors() {
        let source = "class A { a : String; a : String; }";
        let errors = schema_bridge_dsl::parse_document(source).unwrap_err();
        let mut summary = ParseSummary::default();
        json_output().failed_file(&mut summary, Path::new("a.pure"), source, &errors);

        assert!(summary.failed());
        let json = summary.to_json();
        assert_eq!(json["errors"], 1);
        assert_eq!(json["results"][0]["classes"], 0);
        assert!(json["results"][0]["errors"][0]["message"]
            .as_str()
            .unwrap()
            .contains("duplicate"));
    }

    #[test]
    fn describe_outcomes() {
        assert_eq!(describe(&ApplyOutcome::Created), "CREATE");
        assert_eq!(describe(&ApplyOutcome::Unchanged), "no changes");
        assert_eq!(
            describe(&ApplyOutcome::Altered {
                added: vec![id("age"), id("team")]
            }),
            "ALTER add age, team"
        );
    }

    #[test]
    fn report_json_lists_fields() {
        let report = ApplyReport {
            table: id("Employee"),
            outcome: ApplyOutcome::Altered {
                added: vec![id("age")],
            },
            retained: vec![id("legacy")],
        };
        let json = report_json(&report);
        assert_eq!(json["outcome"], "altered");
        assert_eq!(json["added"][0], "age");
        assert_eq!(json["retained"][0], "legacy");
    }
}
