use std::{fmt::Write as _, path::Path};

use {
    anyhow::Result,
    skillets_builder::{BuildReport, Diagnostic, PathBuilder, Severity},
};

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

pub fn handle_build(path: &Path, name: Option<&str>, json: bool) -> Result<()> {
    let name = name.map(str::to_string).unwrap_or_else(|| default_name(path));
    let report = PathBuilder::new(path)?.build(&name)?;

    print_diagnostics(&report.diagnostics);
    if json {
        println!("{}", serde_json::to_string_pretty(&report.collection)?);
    } else {
        print!("{}", render_summary(&report));
    }
    Ok(())
}

/// Collection name for a tree: its directory name.
pub fn default_name(path: &Path) -> String {
    path.canonicalize()
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .or_else(|| path.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "skillets".into())
}

pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        let (color, label) = match d.severity {
            Severity::Error => (RED, "error"),
            Severity::Warning => (YELLOW, "warning"),
        };
        eprintln!(
            "  {BOLD}{color}{label}{RESET} {}: {}",
            d.path.display(),
            d.message
        );
    }
}

/// Type → stack → snippet outline of a build.
pub fn render_summary(report: &BuildReport) -> String {
    let sc = &report.collection;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}: {} skillet(s), {} stack(s), {} snippet(s)",
        sc.name,
        sc.len(),
        sc.stack_count(),
        sc.snippet_count()
    );

    for skillet in sc.skillets.values() {
        let _ = writeln!(out, "  {}", skillet.skillet_type);
        for stack in &skillet.stacks {
            let label = stack
                .metadata
                .label
                .as_deref()
                .map(|l| format!(" ({l})"))
                .unwrap_or_default();
            let _ = writeln!(out, "    {}{label}", stack.name);
            for snippet in &stack.snippets {
                let _ = writeln!(out, "      {} -> {}", snippet.name, snippet.xpath);
            }
        }
    }

    let errors = report.count(Severity::Error);
    let warnings = report.count(Severity::Warning);
    if errors + warnings > 0 {
        let _ = writeln!(out, "{errors} error(s), {warnings} warning(s)");
    }
    out
}
