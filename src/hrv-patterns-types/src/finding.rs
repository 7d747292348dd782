use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Strength {
    None,
    Moderate,
    Strong,
}

/// A detected lifestyle pattern and the action it suggests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub pattern: String,
    pub strength: Strength,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<f64>,
}

impl Finding {
    pub fn new(
        pattern: impl Into<String>,
        strength: Strength,
        action: impl Into<String>,
        correlation: Option<f64>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            strength,
            action: action.into(),
            correlation,
        }
    }

    pub fn not_enough_data() -> Self {
        Self::new("Not enough data", Strength::None, "Log at least 14 days", None)
    }

    pub fn no_strong_patterns() -> Self {
        Self::new("No strong patterns yet", Strength::None, "Keep logging", None)
    }

    /// Ranking key; findings without a correlation rank as zero.
    pub fn rank_value(&self) -> f64 {
        self.correlation.unwrap_or_default()
    }

    /// True for the two placeholder findings that carry no detected pattern.
    pub fn is_sentinel(&self) -> bool {
        self.strength == Strength::None
    }
}
