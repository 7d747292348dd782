use std::{collections::BTreeMap, fs::File, io::Read, path::Path};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use hrv_patterns_types::DailyRecord;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("line {line}: `{field}` is not a finite number")]
    NonFinite { line: u64, field: &'static str },
    #[error("no rows for user `{0}`")]
    UnknownUser(String),
}

/// One line of the daily wearable export.
#[derive(Debug, Deserialize)]
struct DailyRow {
    user_id: String,
    #[serde(default)]
    date: Option<NaiveDate>,
    hrv_rmssd_ms: f64,
    caffeine_mg: f64,
    alcohol_units: f64,
    sleep_duration_hours: f64,
    stress_score: f64,
    screen_time_min: f64,
    sleep_latency_min: f64,
}

impl From<DailyRow> for DailyRecord {
    fn from(row: DailyRow) -> Self {
        Self {
            date: row.date,
            hrv_rmssd_ms: row.hrv_rmssd_ms,
            caffeine_mg: row.caffeine_mg,
            alcohol_units: row.alcohol_units,
            sleep_duration_hours: row.sleep_duration_hours,
            stress_score: row.stress_score,
            screen_time_min: row.screen_time_min,
            sleep_latency_min: row.sleep_latency_min,
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserRow {
    user_id: String,
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads every row of `user_id` from the CSV at `path`.
pub fn load_user(path: impl AsRef<Path>, user_id: &str) -> Result<Vec<DailyRecord>, LoadError> {
    let path = path.as_ref();
    debug!("reading {}", path.display());
    load_user_from_reader(open(path)?, user_id)
}

/// Every row must parse, including rows of other users; only the rows of
/// `user_id` are returned.
pub fn load_user_from_reader<R: Read>(
    reader: R,
    user_id: &str,
) -> Result<Vec<DailyRecord>, LoadError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut raw = StringRecord::new();
    let mut records = Vec::new();
    let mut skipped = 0_usize;

    while reader.read_record(&mut raw)? {
        let row: DailyRow = raw.deserialize(Some(&headers))?;
        if row.user_id != user_id {
            skipped += 1;
            continue;
        }

        let record = DailyRecord::from(row);
        if let Some(field) = record.first_non_finite() {
            let line = raw.position().map(|p| p.line()).unwrap_or_default();
            return Err(LoadError::NonFinite { line, field });
        }
        records.push(record);
    }

    debug!(
        "kept {} rows for {user_id}, skipped {skipped} of other users",
        records.len()
    );

    if records.is_empty() {
        return Err(LoadError::UnknownUser(user_id.to_string()));
    }

    Ok(records)
}

/// Distinct users in the CSV at `path` with their row counts, ordered by id.
pub fn list_users(path: impl AsRef<Path>) -> Result<BTreeMap<String, usize>, LoadError> {
    list_users_from_reader(open(path.as_ref())?)
}

pub fn list_users_from_reader<R: Read>(reader: R) -> Result<BTreeMap<String, usize>, LoadError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let mut users = BTreeMap::new();
    for row in reader.deserialize::<UserRow>() {
        *users.entry(row?.user_id).or_insert(0_usize) += 1;
    }

    Ok(users)
}

/// First and last dated day, if any record carries a date.
pub fn date_range(records: &[DailyRecord]) -> Option<(NaiveDate, NaiveDate)> {
    let mut dates = records.iter().filter_map(|r| r.date);
    let first = dates.next()?;
    Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    const EXPORT: &str = "\
user_id,date,hrv_rmssd_ms,resting_hr,caffeine_mg,alcohol_units,sleep_duration_hours,stress_score,screen_time_min,sleep_latency_min
U0001,2024-03-02,48.5,58,120,0,7.2,35,90,12
U0002,2024-03-01,61.0,52,0,1.5,8.1,20,60,8
U0001,2024-03-01,44.0,60,220,2,6.1,70,200,25
U0002,2024-03-02,59.5,53,80,0,7.9,25,45,9
U0001,2024-03-03,51.25,57,0,0,7.8,30,100,10
";

    #[test]
    fn keeps_only_requested_user() {
        let records = load_user_from_reader(EXPORT.as_bytes(), "U0001").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].hrv_rmssd_ms, 48.5);
        assert_eq!(records[1].caffeine_mg, 220.0);
        assert_eq!(records[2].sleep_latency_min, 10.0);
        assert_eq!(
            records[1].date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
    }

    #[test]
    fn date_column_is_optional() {
        let csv = "\
user_id,hrv_rmssd_ms,caffeine_mg,alcohol_units,sleep_duration_hours,stress_score,screen_time_min,sleep_latency_min
U7, 50 ,100,0,7,30,90,10
";
        let records = load_user_from_reader(csv.as_bytes(), "U7").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, None);
        assert_eq!(records[0].hrv_rmssd_ms, 50.0);
    }

    #[test]
    fn unknown_user_is_an_error() {
        let err = load_user_from_reader(EXPORT.as_bytes(), "U9999").unwrap_err();
        assert!(matches!(err, LoadError::UnknownUser(ref u) if u == "U9999"));
    }

    #[test]
    fn non_numeric_value_is_an_error() {
        let csv = "\
user_id,hrv_rmssd_ms,caffeine_mg,alcohol_units,sleep_duration_hours,stress_score,screen_time_min,sleep_latency_min
U1,50,lots,0,7,30,90,10
";
        let err = load_user_from_reader(csv.as_bytes(), "U1").unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)), "{err}");
    }

    #[test]
    fn missing_column_is_an_error() {
        let csv = "\
user_id,hrv_rmssd_ms,caffeine_mg,alcohol_units,sleep_duration_hours,stress_score,screen_time_min
U1,50,100,0,7,30,90
";
        let err = load_user_from_reader(csv.as_bytes(), "U1").unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)), "{err}");
    }

    #[test]
    fn nan_value_is_an_error() {
        let csv = "\
user_id,hrv_rmssd_ms,caffeine_mg,alcohol_units,sleep_duration_hours,stress_score,screen_time_min,sleep_latency_min
U1,50,100,0,7,30,90,10
U1,NaN,100,0,7,30,90,10
";
        let err = load_user_from_reader(csv.as_bytes(), "U1").unwrap_err();
        assert!(
            matches!(
                err,
                LoadError::NonFinite {
                    line: 3,
                    field: "hrv_rmssd_ms"
                }
            ),
            "{err}"
        );
    }

    #[test]
    fn lists_users_with_counts() {
        let users = list_users_from_reader(EXPORT.as_bytes()).unwrap();
        assert_eq!(
            users.into_iter().collect::<Vec<_>>(),
            [("U0001".to_string(), 3), ("U0002".to_string(), 2)]
        );
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_user("/nonexistent/daily.csv", "U0001").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/daily.csv"), "{err}");
    }

    #[test]
    fn date_range_spans_unordered_days() {
        let records = load_user_from_reader(EXPORT.as_bytes(), "U0001").unwrap();
        let (first, last) = date_range(&records).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
        assert_eq!(date_range(&[DailyRecord::default()]), None);
    }
}
