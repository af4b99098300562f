//! Terminal output utilities.
//!
//! Provides formatting helpers and the run summary printed by the binary.

use crate::models::Severity;
use crate::processing::Reconciled;
use colored::Colorize;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

/// Build the summary lines for a reconciled set.
pub fn summary_lines(title: &str, result: &Reconciled) -> Vec<String> {
    let mut lines = vec![format!(
        "#{title}# {count} networks after {passes} passes",
        count = result.set.len(),
        passes = result.passes
    )];
    for net in result.sorted() {
        lines.push(format!(
            "{cidr},{netmask},{hi}",
            cidr = format_field(net, 20),
            netmask = format_field(net.netmask(), 18),
            hi = format_field(net.hi(), 22),
        ));
    }
    lines
}

/// Print the summary to stdout, highlighting warnings and non-convergence.
pub fn print_summary(title: &str, result: &Reconciled) {
    for line in summary_lines(title, result) {
        println!("{line}");
    }
    let warnings = result.diagnostics.count(Severity::Warning);
    if warnings > 0 {
        println!("#{}# {warnings} warnings, see log", "NOTE".on_red());
    }
    if !result.converged {
        println!("#{}# no fixpoint reached", "WARN".on_red());
    }
}
