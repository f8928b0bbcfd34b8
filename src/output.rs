use autodeploy::scan::{ScanOutcome, ScannedEntry};
use autodeploy::Verdict;
use console::{style, Style};
use std::path::Path;

/// Status of a scanned entry for display purposes
#[derive(Debug, Clone, Copy, PartialEq)]
enum EntryStatus {
    Deploy,
    Skip,
    Error,
}

fn status_of(outcome: &ScanOutcome) -> EntryStatus {
    match outcome {
        ScanOutcome::Deployable(_) => EntryStatus::Deploy,
        ScanOutcome::Rejected(_) => EntryStatus::Skip,
        ScanOutcome::Failed(_) => EntryStatus::Error,
    }
}

fn detail_of(outcome: &ScanOutcome) -> String {
    match outcome {
        ScanOutcome::Deployable(d) => d.context_path.clone(),
        ScanOutcome::Rejected(verdict) => verdict_text(verdict),
        ScanOutcome::Failed(e) => e.to_string(),
    }
}

/// One-line text for a verdict
pub fn verdict_text(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Accept => "accepted".to_string(),
        Verdict::Reject(reason) => reason.describe(),
    }
}

/// Print all scan results
pub fn print_scan_results(entries: &[ScannedEntry], dir: &Path) {
    println!(
        "{} {}",
        style("Scanning").dim(),
        style(dir.display()).cyan()
    );
    println!();

    if entries.is_empty() {
        println!("  {}", style("No entries found").dim());
        return;
    }

    let green = Style::new().green();
    let dim = Style::new().dim();
    let red = Style::new().red();

    let max_name_len = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);

    for entry in entries {
        let status = status_of(&entry.outcome);
        let (badge, badge_style, status_text): (&str, &Style, &str) = match status {
            EntryStatus::Deploy => ("✓", &green, "[deploy]"),
            EntryStatus::Skip => ("·", &dim, "[skip]"),
            EntryStatus::Error => ("✗", &red, "[error]"),
        };

        let name_style = match status {
            EntryStatus::Deploy => Style::new().white(),
            EntryStatus::Skip => Style::new().dim(),
            EntryStatus::Error => Style::new().red(),
        };

        // Format: "  ✓ blog.war   → /blog   [deploy]"
        println!(
            "  {} {:<width$} {} {} {}",
            badge_style.apply_to(badge),
            name_style.apply_to(&entry.name),
            dim.apply_to("→"),
            dim.apply_to(detail_of(&entry.outcome)),
            badge_style.apply_to(status_text),
            width = max_name_len,
        );
    }

    print_scan_summary(entries);
}

fn print_scan_summary(entries: &[ScannedEntry]) {
    let count = |wanted: EntryStatus| {
        entries
            .iter()
            .filter(|e| status_of(&e.outcome) == wanted)
            .count()
    };
    let deploy = count(EntryStatus::Deploy);
    let skip = count(EntryStatus::Skip);
    let error = count(EntryStatus::Error);

    println!();
    let mut parts = vec![format!("{} deployable", deploy), format!("{} skipped", skip)];
    if error > 0 {
        parts.push(style(format!("{} failed", error)).red().to_string());
    }
    let separator = style(" · ").dim().to_string();
    println!("{}", parts.join(separator.as_str()));
}
