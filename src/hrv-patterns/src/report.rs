use hrv_patterns_types::Finding;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct PatternReport<'a> {
    user_id: &'a str,
    days: usize,
    findings: &'a [Finding],
}

/// Console listing of the top `limit` findings, numbered from 1.
pub fn render_text(user_id: &str, days: usize, findings: &[Finding], limit: usize) -> String {
    let mut out = format!("=== PATTERNS (User {user_id}, {days} days) ===\n\n");
    for (rank, finding) in findings.iter().take(limit).enumerate() {
        out.push_str(&format!(
            "{}. [{}] {}\n   → {}\n\n",
            rank + 1,
            finding.strength,
            finding.pattern,
            finding.action
        ));
    }
    out
}

pub fn render_json(
    user_id: &str,
    days: usize,
    findings: &[Finding],
    limit: usize,
) -> serde_json::Result<String> {
    let report = PatternReport {
        user_id,
        days,
        findings: &findings[..findings.len().min(limit)],
    };
    serde_json::to_string_pretty(&report)
}
