use chrono::NaiveDate;

/// One day of lifestyle inputs and recovery outcomes for a single subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub hrv_rmssd_ms: f64,
    pub caffeine_mg: f64,
    pub alcohol_units: f64,
    pub sleep_duration_hours: f64,
    pub stress_score: f64,
    pub screen_time_min: f64,
    pub sleep_latency_min: f64,
}

impl DailyRecord {
    pub const FIELD_COUNT: usize = 7;

    /// Numeric columns paired with their names, in CSV column order.
    pub fn fields(&self) -> [(&'static str, f64); Self::FIELD_COUNT] {
        [
            ("hrv_rmssd_ms", self.hrv_rmssd_ms),
            ("caffeine_mg", self.caffeine_mg),
            ("alcohol_units", self.alcohol_units),
            ("sleep_duration_hours", self.sleep_duration_hours),
            ("stress_score", self.stress_score),
            ("screen_time_min", self.screen_time_min),
            ("sleep_latency_min", self.sleep_latency_min),
        ]
    }

    /// First numeric column that is NaN or infinite.
    pub fn first_non_finite(&self) -> Option<&'static str> {
        self.fields()
            .into_iter()
            .find(|(_, value)| !value.is_finite())
            .map(|(name, _)| name)
    }
}
