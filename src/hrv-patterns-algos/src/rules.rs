use hrv_patterns_types::{DailyRecord, Finding, Strength};

use crate::helpers::stats::mean;

/// Which group mean is subtracted from which.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The condition lowers the outcome (HRV drops).
    ReferenceMinusCondition,
    /// The condition raises the outcome (latency grows).
    ConditionMinusReference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Difference as a percentage of the baseline HRV.
    PercentOfBaseline,
    /// Difference in the outcome's own unit.
    Raw,
}

/// A single lifestyle comparison: two groups split by fixed thresholds on one
/// input, compared on one outcome.
pub struct Rule {
    pub name: &'static str,
    pub condition: fn(&DailyRecord) -> bool,
    pub reference: fn(&DailyRecord) -> bool,
    pub outcome: fn(&DailyRecord) -> f64,
    pub direction: Direction,
    pub normalization: Normalization,
    /// The effect must be strictly greater than this to fire.
    pub fire_above: f64,
    /// `None` means the rule never reports `STRONG`.
    pub strong_above: Option<f64>,
    pub describe: fn(f64) -> String,
    pub action: &'static str,
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "caffeine",
        condition: |r| r.caffeine_mg > 150.0,
        reference: |r| r.caffeine_mg <= 150.0,
        outcome: |r| r.hrv_rmssd_ms,
        direction: Direction::ReferenceMinusCondition,
        normalization: Normalization::PercentOfBaseline,
        fire_above: 3.0,
        strong_above: Some(10.0),
        describe: |pct| format!("High caffeine drops HRV by {pct:.1}%"),
        action: "Limit caffeine, none after 2pm",
    },
    Rule {
        name: "alcohol",
        condition: |r| r.alcohol_units > 0.0,
        reference: |r| r.alcohol_units == 0.0,
        outcome: |r| r.hrv_rmssd_ms,
        direction: Direction::ReferenceMinusCondition,
        normalization: Normalization::PercentOfBaseline,
        fire_above: 3.0,
        strong_above: Some(8.0),
        describe: |pct| format!("Alcohol drops HRV by {pct:.1}%"),
        action: "Avoid alcohol before bed",
    },
    Rule {
        name: "sleep_duration",
        condition: |r| r.sleep_duration_hours < 6.5,
        reference: |r| r.sleep_duration_hours >= 7.0,
        outcome: |r| r.hrv_rmssd_ms,
        direction: Direction::ReferenceMinusCondition,
        normalization: Normalization::PercentOfBaseline,
        fire_above: 3.0,
        strong_above: Some(10.0),
        describe: |pct| format!("Sleep <6.5h drops HRV by {pct:.1}%"),
        action: "Get 7+ hours of sleep",
    },
    Rule {
        name: "stress",
        condition: |r| r.stress_score > 60.0,
        reference: |r| r.stress_score <= 40.0,
        outcome: |r| r.hrv_rmssd_ms,
        direction: Direction::ReferenceMinusCondition,
        normalization: Normalization::PercentOfBaseline,
        fire_above: 3.0,
        strong_above: Some(10.0),
        describe: |pct| format!("High stress drops HRV by {pct:.1}%"),
        action: "Add meditation or breathing exercises",
    },
    Rule {
        name: "screen_time",
        condition: |r| r.screen_time_min > 180.0,
        reference: |r| r.screen_time_min <= 120.0,
        outcome: |r| r.sleep_latency_min,
        direction: Direction::ConditionMinusReference,
        normalization: Normalization::Raw,
        fire_above: 3.0,
        strong_above: None,
        describe: |minutes| format!("High screen time adds {minutes:.0}min to fall asleep"),
        action: "Reduce screens before bed",
    },
];

impl Rule {
    /// Minimum size of both groups before the comparison is reported.
    pub const MIN_SUPPORT: usize = 5;

    /// Returns `None` when either group lacks support or the effect stays at
    /// or below the firing threshold.
    pub fn evaluate(&self, records: &[DailyRecord], baseline_hrv: f64) -> Option<Finding> {
        let condition = self.outcomes(records, self.condition);
        let reference = self.outcomes(records, self.reference);

        if condition.len() < Self::MIN_SUPPORT || reference.len() < Self::MIN_SUPPORT {
            debug!(
                "{}: abstaining, groups of {} and {} days",
                self.name,
                condition.len(),
                reference.len()
            );
            return None;
        }

        let diff = match self.direction {
            Direction::ReferenceMinusCondition => mean(&reference) - mean(&condition),
            Direction::ConditionMinusReference => mean(&condition) - mean(&reference),
        };

        let effect = match self.normalization {
            Normalization::PercentOfBaseline => diff / baseline_hrv * 100.0,
            Normalization::Raw => diff,
        };

        if effect <= self.fire_above {
            debug!("{}: effect {effect:.2} below threshold", self.name);
            return None;
        }

        let strength = match self.strong_above {
            Some(strong) if effect > strong => Strength::Strong,
            _ => Strength::Moderate,
        };

        debug!("{}: fired {strength} with effect {effect:.2}", self.name);
        Some(Finding::new(
            (self.describe)(effect),
            strength,
            self.action,
            Some(effect),
        ))
    }

    fn outcomes(&self, records: &[DailyRecord], group: fn(&DailyRecord) -> bool) -> Vec<f64> {
        records
            .iter()
            .filter(|&r| group(r))
            .map(self.outcome)
            .collect()
    }
}
