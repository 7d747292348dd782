use hrv_patterns_types::{DailyRecord, Finding};

use crate::{DetectError, RULES, helpers::stats::median, rules::Rule};

/// Ranks lifestyle patterns that move a subject's HRV or sleep latency.
///
/// Expects the records of one subject only; mixing subjects skews both the
/// baseline and the group means.
pub struct PatternDetector<'r> {
    rules: &'r [Rule],
}

impl Default for PatternDetector<'static> {
    fn default() -> Self {
        Self::new(RULES)
    }
}

impl<'r> PatternDetector<'r> {
    pub const MIN_DAYS: usize = 14;

    pub fn new(rules: &'r [Rule]) -> Self {
        Self { rules }
    }

    /// Runs every rule against `records` and returns the fired findings,
    /// strongest first. Fewer than [`Self::MIN_DAYS`] records, or no fired
    /// rule, produce a single placeholder finding instead.
    pub fn detect(&self, records: &[DailyRecord]) -> Result<Vec<Finding>, DetectError> {
        if records.len() < Self::MIN_DAYS {
            info!(
                "{} days logged, need at least {}",
                records.len(),
                Self::MIN_DAYS
            );
            return Ok(vec![Finding::not_enough_data()]);
        }

        let baseline_hrv = Self::baseline_hrv(records)?;
        debug!("baseline HRV {baseline_hrv:.1}ms over {} days", records.len());

        let mut findings = self
            .rules
            .iter()
            .filter_map(|rule| rule.evaluate(records, baseline_hrv))
            .collect::<Vec<_>>();

        // stable: equal effects keep rule order
        findings.sort_by(|a, b| b.rank_value().total_cmp(&a.rank_value()));

        if findings.is_empty() {
            info!("no rule fired over {} days", records.len());
            findings.push(Finding::no_strong_patterns());
        }

        Ok(findings)
    }

    fn baseline_hrv(records: &[DailyRecord]) -> Result<f64, DetectError> {
        if let Some((index, field)) = records
            .iter()
            .enumerate()
            .find_map(|(i, r)| r.first_non_finite().map(|field| (i, field)))
        {
            return Err(DetectError::NonFiniteValue { index, field });
        }

        let hrv = records.iter().map(|r| r.hrv_rmssd_ms).collect::<Vec<_>>();
        match median(&hrv) {
            Some(baseline) if baseline > 0.0 => Ok(baseline),
            Some(baseline) => Err(DetectError::InvalidBaseline(baseline)),
            None => Err(DetectError::InvalidBaseline(f64::NAN)),
        }
    }
}
