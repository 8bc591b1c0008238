//! JPL Horizons ephemerides around a close approach.
//!
//! API docs: <https://ssd-api.jpl.nasa.gov/doc/horizons.html>

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::client::{FetchError, QueryClient};
use crate::close_approach::CloseApproach;

/// Horizons API endpoint.
pub const HORIZONS_URL: &str = "https://ssd.jpl.nasa.gov/api/horizons.api";

/// MPC code of Rubin Observatory.
pub const SITE_CODE: &str = "X05";

/// Observer quantities requested from Horizons.
pub const QUANTITIES: &str = "1,3,4,9,19,20,23,24,38,42,33,46,47,48";

/// Airmass cutoff, about 20° altitude.
pub const AIRMASS_LIMIT: f64 = 2.93;

/// Local hour-angle cutoff in hours.
pub const HOUR_ANGLE_LIMIT: f64 = 12.0;

/// TDB − UTC in seconds.
pub const TDB_MINUS_UTC_S: f64 = 69.184;

/// Julian Date of the Unix epoch.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Converts a Julian Date in TDB to a UTC timestamp.
///
/// Returns `None` for non-finite or out-of-range dates.
#[must_use]
pub fn jd_tdb_to_utc(jd_tdb: f64) -> Option<DateTime<Utc>> {
    let unix_s = (jd_tdb - UNIX_EPOCH_JD) * SECONDS_PER_DAY - TDB_MINUS_UTC_S;
    if !unix_s.is_finite() {
        return None;
    }
    let secs = unix_s.floor();
    // f64 resolves sub-microsecond offsets poorly at current epochs
    let micros = ((unix_s - secs) * 1e6).round().min(999_999.0) as u32;
    DateTime::from_timestamp(secs as i64, micros * 1_000)
}

/// An ephemeris request centred on a close approach.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisRequest {
    /// Small-body designation.
    pub target: String,
    /// Close-approach epoch as a Julian Date (TDB).
    pub close_approach_jd_tdb: f64,
    /// Days before and after the close approach to cover.
    pub delta_days: i64,
    /// Horizons step size, e.g. `"1h"` or `"10m"`.
    pub step: String,
}

impl EphemerisRequest {
    /// Creates a ±15 day request at 1 hour steps.
    #[must_use]
    pub fn new(target: impl Into<String>, close_approach_jd_tdb: f64) -> Self {
        Self {
            target: target.into(),
            close_approach_jd_tdb,
            delta_days: 15,
            step: "1h".to_string(),
        }
    }

    /// Creates a request for a catalog close approach.
    #[must_use]
    pub fn for_close_approach(approach: &CloseApproach) -> Self {
        Self::new(approach.des.clone(), approach.jd)
    }

    /// Returns the close-approach time in UTC.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Parse`] if the epoch is not a valid date.
    pub fn close_approach_utc(&self) -> Result<DateTime<Utc>, FetchError> {
        jd_tdb_to_utc(self.close_approach_jd_tdb).ok_or_else(|| {
            FetchError::Parse(format!("invalid Julian Date {}", self.close_approach_jd_tdb))
        })
    }

    /// Start and stop of the ephemeris, truncated to the minute.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Parse`] if the epoch is not a valid date or the
    /// window reaches outside the representable date range.
    pub fn window(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), FetchError> {
        let ca = self.close_approach_utc()?;
        let rounded = ca
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(ca);
        let out_of_range =
            || FetchError::Parse(format!("window of ±{} days is out of range", self.delta_days));
        let delta = Duration::try_days(self.delta_days).ok_or_else(out_of_range)?;
        let start = rounded.checked_sub_signed(delta).ok_or_else(out_of_range)?;
        let stop = rounded.checked_add_signed(delta).ok_or_else(out_of_range)?;
        Ok((start, stop))
    }

    /// Query parameters for the Horizons API.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Parse`] if the epoch is not a valid date.
    pub fn query_params(&self) -> Result<Vec<(&'static str, String)>, FetchError> {
        let (start, stop) = self.window()?;
        let quoted = |value: &str| format!("'{value}'");
        Ok(vec![
            ("format", "text".to_string()),
            ("COMMAND", quoted(&format!("{};", self.target))),
            ("OBJ_DATA", quoted("NO")),
            ("MAKE_EPHEM", quoted("YES")),
            ("EPHEM_TYPE", quoted("OBSERVER")),
            ("CENTER", quoted(SITE_CODE)),
            ("START_TIME", quoted(&start.format("%Y-%m-%d %H:%M").to_string())),
            ("STOP_TIME", quoted(&stop.format("%Y-%m-%d %H:%M").to_string())),
            ("STEP_SIZE", quoted(&self.step)),
            ("QUANTITIES", quoted(QUANTITIES)),
            ("SKIP_DAYLT", quoted("NO")),
            ("AIRMASS", quoted(&AIRMASS_LIMIT.to_string())),
            ("LHA_CUTOFF", quoted(&HOUR_ANGLE_LIMIT.to_string())),
            ("ANG_FORMAT", quoted("DEG")),
            ("CSV_FORMAT", quoted("YES")),
        ])
    }
}

/// One ephemeris line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisRow {
    /// Epoch of the line in UTC.
    pub datetime: DateTime<Utc>,
    /// Days from the close approach, negative before it.
    pub time_to_ca: f64,
    /// Raw values in column order.
    pub values: Vec<String>,
}

/// An ephemeris annotated with time to close approach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisTable {
    /// Small-body designation.
    pub target: String,
    /// Close-approach time in UTC.
    pub close_approach: DateTime<Utc>,
    /// Column names as returned by Horizons.
    pub columns: Vec<String>,
    /// Ephemeris lines in time order.
    pub rows: Vec<EphemerisRow>,
}

impl EphemerisTable {
    /// Returns the number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if Horizons returned no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the position of a column.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the raw value of `column` in `row`.
    #[must_use]
    pub fn value<'a>(&self, row: &'a EphemerisRow, column: &str) -> Option<&'a str> {
        self.column_index(column)
            .and_then(|i| row.values.get(i))
            .map(String::as_str)
    }

    /// Returns the value of `column` in `row` as a number.
    #[must_use]
    pub fn number(&self, row: &EphemerisRow, column: &str) -> Option<f64> {
        self.value(row, column).and_then(|v| v.parse().ok())
    }

    /// Returns the line nearest to the close approach.
    #[must_use]
    pub fn nearest_to_close_approach(&self) -> Option<&EphemerisRow> {
        self.rows
            .iter()
            .min_by(|a, b| a.time_to_ca.abs().total_cmp(&b.time_to_ca.abs()))
    }
}

/// Splits a CSV line, dropping the empty field after a trailing comma.
fn split_csv(line: &str) -> Vec<String> {
    let mut fields: Vec<String> = line.split(',').map(|f| f.trim().to_string()).collect();
    if line.trim_end().ends_with(',') {
        fields.pop();
    }
    fields
}

/// Names the unlabeled flag columns that follow the date.
fn column_names(header: &str) -> Vec<String> {
    let mut unnamed = 0;
    split_csv(header)
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            if !name.is_empty() {
                return name;
            }
            unnamed += 1;
            match unnamed {
                1 => "solar_presence".to_string(),
                2 => "lunar_presence".to_string(),
                _ => format!("col{i}"),
            }
        })
        .collect()
}

fn parse_datetime(value: &str) -> Result<DateTime<Utc>, FetchError> {
    ["%Y-%b-%d %H:%M", "%Y-%b-%d %H:%M:%S", "%Y-%b-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.and_utc())
        .ok_or_else(|| FetchError::Parse(format!("invalid ephemeris date '{value}'")))
}

/// Parses a Horizons CSV ephemeris.
///
/// The table lies between the `$$SOE` and `$$EOE` markers; the header is the
/// last non-separator line before `$$SOE`.
///
/// # Errors
///
/// Returns [`FetchError::Parse`] if the markers or header are missing, or a
/// line has an unreadable date.
pub fn parse_ephemeris(
    text: &str,
    target: &str,
    close_approach: DateTime<Utc>,
) -> Result<EphemerisTable, FetchError> {
    let lines: Vec<&str> = text.lines().collect();
    let soe = lines
        .iter()
        .position(|l| l.trim() == "$$SOE")
        .ok_or_else(|| FetchError::Parse("no $$SOE marker in Horizons output".to_string()))?;
    let eoe = lines[soe..]
        .iter()
        .position(|l| l.trim() == "$$EOE")
        .map(|i| soe + i)
        .ok_or_else(|| FetchError::Parse("no $$EOE marker in Horizons output".to_string()))?;

    let header = lines[..soe]
        .iter()
        .rev()
        .map(|l| l.trim())
        .find(|l| !l.is_empty() && !l.starts_with('*'))
        .ok_or_else(|| FetchError::Parse("no column header in Horizons output".to_string()))?;
    let columns = column_names(header);

    let rows = lines[soe + 1..eoe]
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            let values = split_csv(line);
            let date = values
                .first()
                .ok_or_else(|| FetchError::Parse("empty ephemeris line".to_string()))?;
            let datetime = parse_datetime(date)?;
            let time_to_ca =
                (datetime - close_approach).num_milliseconds() as f64 / (SECONDS_PER_DAY * 1e3);
            Ok(EphemerisRow {
                datetime,
                time_to_ca,
                values,
            })
        })
        .collect::<Result<Vec<_>, FetchError>>()?;

    Ok(EphemerisTable {
        target: target.to_string(),
        close_approach,
        columns,
        rows,
    })
}

/// A source of ephemerides.
#[async_trait]
pub trait EphemerisSource: Send + Sync {
    /// Returns the ephemeris for `request`, or `None` if the service is unavailable.
    async fn ephemeris(
        &self,
        request: &EphemerisRequest,
    ) -> Result<Option<EphemerisTable>, FetchError>;
}

#[async_trait]
impl EphemerisSource for QueryClient {
    async fn ephemeris(
        &self,
        request: &EphemerisRequest,
    ) -> Result<Option<EphemerisTable>, FetchError> {
        let params = request.query_params()?;
        let Some(body) = self.get_text(HORIZONS_URL, &params).await? else {
            return Ok(None);
        };
        let table = parse_ephemeris(&body, &request.target, request.close_approach_utc()?)?;
        tracing::info!(designation = %request.target, lines = table.len(), "ephemeris retrieved");
        Ok(Some(table))
    }
}
