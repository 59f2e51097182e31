use crate::config::ReportConfig;
use crate::pipeline::{Phase, ViewState};
use crate::reporting::shared::{bar, pluralize};
use crate::source::SourceFile;
use crate::types::{AnalysisReport, ComplianceSummary, FrequencyEntry, NormalizedResult};
use colored::Colorize;
use std::fmt::Write;

const RULE: &str = "────────────────────────────────────────────────────────────";
const BAR_WIDTH: usize = 24;

/// Prints the rendered report to stdout.
pub fn print_report(state: &ViewState, source: Option<&SourceFile>, opts: &ReportConfig) {
    print!("{}", render_report(state, source, opts));
}

/// Renders the whole report: failure banner, compliance summary, followed
/// practices, policy errors, violations and the frequency table.
#[must_use]
pub fn render_report(state: &ViewState, source: Option<&SourceFile>, opts: &ReportConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", RULE.dimmed());
    let _ = writeln!(out, "{}", " PLC SECURE CODING REPORT".bold());
    if let Some(file) = source {
        let _ = writeln!(out, " {}", file.name().dimmed());
    }
    let _ = writeln!(out, "{}", RULE.dimmed());
    let _ = writeln!(out);

    if let Some(msg) = state.error_message() {
        let _ = writeln!(out, "{} {}", "X".red().bold(), msg.red());
        if state.report.is_some() {
            let _ = writeln!(out, "  {}", "Showing results from the previous successful run.".dimmed());
        }
        let _ = writeln!(out);
    }

    match state.report.as_deref() {
        Some(report) => render_analysis(&mut out, report, source, opts),
        None if state.phase == Phase::Loading => {
            let _ = writeln!(out, "Analyzing… please wait");
        }
        None => {}
    }

    let _ = writeln!(out, "{}", RULE.dimmed());
    out
}

fn render_analysis(
    out: &mut String,
    report: &AnalysisReport,
    source: Option<&SourceFile>,
    opts: &ReportConfig,
) {
    write_summary(out, &report.summary);

    let results = &report.results;
    if opts.show_followed && !results.followed.is_empty() {
        let _ = writeln!(out, "{}", "  PRACTICES FOLLOWED".green().bold());
        for r in &results.followed {
            let _ = writeln!(out, "    {} {}. {}", "✓".green(), r.rule_no, r.rule_name);
        }
        let _ = writeln!(out);
    }

    if !results.errors.is_empty() {
        let _ = writeln!(out, "{}", "  POLICY ERRORS".yellow().bold());
        for r in &results.errors {
            write_policy_error(out, r);
        }
        let _ = writeln!(out);
    }

    if !results.violations.is_empty() {
        let _ = writeln!(out, "{}", "  PRACTICES NOT FOLLOWED".red().bold());
        let _ = writeln!(out);
        for v in &results.violations {
            write_violation(out, v, source, opts.show_source);
        }
    }

    if !report.frequency.is_empty() {
        write_frequency(out, &report.frequency);
    }

    write_verdict(out, report);
}

fn write_summary(out: &mut String, s: &ComplianceSummary) {
    let percent = format!("{}% compliant", s.percent);
    let percent = if s.failed_rule_count == 0 {
        percent.green().bold()
    } else {
        percent.yellow().bold()
    };
    let _ = writeln!(out, "  {} {percent}", "Overall Compliance:".white());
    let _ = writeln!(
        out,
        "  {} {} passed, {} failed of {} rules",
        "Rules:".white(),
        s.passed_rule_count.to_string().green(),
        s.failed_rule_count.to_string().red(),
        s.total_rules
    );
    let _ = writeln!(out);
}

fn write_policy_error(out: &mut String, r: &NormalizedResult) {
    let _ = write!(out, "    {} {}. {}", "!".yellow().bold(), r.rule_no, r.rule_name);
    if let Some(reason) = &r.reason {
        let _ = write!(out, ": {reason}");
    }
    let _ = writeln!(out);
}

fn write_violation(out: &mut String, v: &NormalizedResult, source: Option<&SourceFile>, show_source: bool) {
    let header = format!("error: {}. {}", v.rule_no, v.rule_name);
    let _ = writeln!(out, "{}", header.red().bold());

    let file = source.map_or("<source>", SourceFile::name);
    match v.line {
        Some(line) => {
            let _ = writeln!(out, "  {} {file}:{line}", "-->".blue());
        }
        None => {
            let _ = writeln!(out, "  {} {file}", "-->".blue());
        }
    }

    if show_source {
        if let (Some(line), Some(code)) = (v.line, source.and_then(|s| s.line(v.line))) {
            let gutter = format!("{line:4} |");
            let _ = writeln!(out, "   {} {code}", gutter.blue());
        }
    }

    if let Some(reason) = &v.reason {
        let _ = writeln!(out, "   {} {} {reason}", "=".blue(), "REASON:".cyan());
    }
    if let Some(suggestion) = &v.suggestion {
        let _ = writeln!(out, "   {} {} {suggestion}", "=".blue(), "FIX:".green());
    }
    let _ = writeln!(out);
}

fn write_frequency(out: &mut String, table: &[FrequencyEntry]) {
    let max = table.iter().map(|e| e.count).max().unwrap_or(0);
    let _ = writeln!(out, "{}", "  VIOLATION FREQUENCY".yellow().bold());
    for e in table {
        let label = format!("Rule {}", e.rule_no);
        let _ = writeln!(
            out,
            "    {label:<8} {} {}",
            bar(e.count, max, BAR_WIDTH).red(),
            e.count
        );
    }
    let _ = writeln!(out);
}

fn write_verdict(out: &mut String, report: &AnalysisReport) {
    let violations = report.results.violations.len();
    if violations == 0 {
        let _ = writeln!(out, "{} No secure coding violations found.", "OK".green().bold());
        return;
    }
    let rules = report.frequency.len();
    let _ = writeln!(
        out,
        "{} {violations} {} across {rules} {}.",
        "X".red().bold(),
        pluralize("violation", violations),
        pluralize("rule", rules)
    );
}
