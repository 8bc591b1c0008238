//! JPL SBDB close-approach data queries.
//!
//! API docs: <https://ssd-api.jpl.nasa.gov/doc/cad.html>

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::{FetchError, QueryClient};

/// Close-approach API endpoint.
pub const CAD_URL: &str = "https://ssd-api.jpl.nasa.gov/cad.api";

/// Search criteria for close approaches.
#[derive(Debug, Clone, PartialEq)]
pub struct CloseApproachQuery {
    /// Maximum miss distance, in au or with an `LD` suffix for lunar distances.
    pub max_distance: String,
    /// Faintest absolute magnitude H to return.
    pub max_h: f64,
    /// Earliest close-approach date.
    pub date_min: NaiveDate,
    /// Latest close-approach date.
    pub date_max: NaiveDate,
}

impl Default for CloseApproachQuery {
    fn default() -> Self {
        Self {
            max_distance: "1LD".to_string(),
            max_h: 28.0,
            date_min: NaiveDate::from_ymd_opt(2023, 3, 14).unwrap_or_default(),
            date_max: NaiveDate::from_ymd_opt(2024, 3, 14).unwrap_or_default(),
        }
    }
}

impl CloseApproachQuery {
    /// Creates a query for a date range with the default distance and H limits.
    #[must_use]
    pub fn between(date_min: NaiveDate, date_max: NaiveDate) -> Self {
        Self {
            date_min,
            date_max,
            ..Self::default()
        }
    }

    /// Builds the request URL, sorted by distance and including diameters.
    ///
    /// # Example
    ///
    /// ```
    /// use etc_fetch::CloseApproachQuery;
    ///
    /// let url = CloseApproachQuery::default().url();
    /// assert_eq!(
    ///     url,
    ///     "https://ssd-api.jpl.nasa.gov/cad.api?dist-max=1LD&date-min=2023-03-14\
    ///      &date-max=2024-03-14&h-max=28&sort=dist&diameter=true"
    /// );
    /// ```
    #[must_use]
    pub fn url(&self) -> String {
        format!(
            "{CAD_URL}?dist-max={}&date-min={}&date-max={}&h-max={}&sort=dist&diameter=true",
            self.max_distance,
            self.date_min.format("%Y-%m-%d"),
            self.date_max.format("%Y-%m-%d"),
            self.max_h,
        )
    }
}

/// One close approach of a small body to the Earth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseApproach {
    /// Primary designation.
    pub des: String,
    /// Orbit solution used.
    pub orbit_id: String,
    /// Close-approach epoch as a Julian Date (TDB).
    pub jd: f64,
    /// Close-approach calendar date (TDB), e.g. `2023-Mar-14 05:12`.
    pub cd: String,
    /// Nominal approach distance in au.
    pub dist: f64,
    /// Minimum 3σ approach distance in au.
    pub dist_min: f64,
    /// Maximum 3σ approach distance in au.
    pub dist_max: f64,
    /// Velocity relative to the Earth at close approach in km/s.
    pub v_rel: f64,
    /// Velocity relative to a massless Earth in km/s.
    pub v_inf: Option<f64>,
    /// 3σ uncertainty of the approach time, formatted as by the service.
    pub t_sigma_f: String,
    /// Absolute magnitude H.
    pub h: Option<f64>,
    /// Diameter in km, when known.
    pub diameter: Option<f64>,
    /// Diameter uncertainty in km.
    pub diameter_sigma: Option<f64>,
}

/// Raw response; every value arrives as a string or null.
#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    fields: Vec<String>,
    #[serde(default)]
    data: Vec<Vec<Option<String>>>,
}

/// Parses a close-approach API response, sorted by nominal distance.
///
/// # Errors
///
/// Returns [`FetchError::Parse`] if the JSON is malformed or a required field
/// is missing or not numeric.
pub fn parse_close_approaches(json: &str) -> Result<Vec<CloseApproach>, FetchError> {
    let raw: RawResponse = serde_json::from_str(json)?;
    let column = |name: &str| raw.fields.iter().position(|f| f == name);

    let columns = Columns {
        des: column("des"),
        orbit_id: column("orbit_id"),
        jd: column("jd"),
        cd: column("cd"),
        dist: column("dist"),
        dist_min: column("dist_min"),
        dist_max: column("dist_max"),
        v_rel: column("v_rel"),
        v_inf: column("v_inf"),
        t_sigma_f: column("t_sigma_f"),
        h: column("h"),
        diameter: column("diameter"),
        diameter_sigma: column("diameter_sigma"),
    };

    let mut approaches = raw
        .data
        .iter()
        .map(|row| columns.record(row))
        .collect::<Result<Vec<_>, _>>()?;
    approaches.sort_by(|a, b| a.dist.total_cmp(&b.dist));
    Ok(approaches)
}

/// Column positions of the known fields.
#[derive(Debug)]
struct Columns {
    des: Option<usize>,
    orbit_id: Option<usize>,
    jd: Option<usize>,
    cd: Option<usize>,
    dist: Option<usize>,
    dist_min: Option<usize>,
    dist_max: Option<usize>,
    v_rel: Option<usize>,
    v_inf: Option<usize>,
    t_sigma_f: Option<usize>,
    h: Option<usize>,
    diameter: Option<usize>,
    diameter_sigma: Option<usize>,
}

impl Columns {
    fn record(&self, row: &[Option<String>]) -> Result<CloseApproach, FetchError> {
        Ok(CloseApproach {
            des: required(row, self.des, "des")?.to_string(),
            orbit_id: text(row, self.orbit_id).unwrap_or_default().to_string(),
            jd: number(row, self.jd, "jd")?,
            cd: text(row, self.cd).unwrap_or_default().to_string(),
            dist: number(row, self.dist, "dist")?,
            dist_min: number(row, self.dist_min, "dist_min")?,
            dist_max: number(row, self.dist_max, "dist_max")?,
            v_rel: number(row, self.v_rel, "v_rel")?,
            v_inf: optional_number(row, self.v_inf),
            t_sigma_f: text(row, self.t_sigma_f).unwrap_or_default().to_string(),
            h: optional_number(row, self.h),
            diameter: optional_number(row, self.diameter),
            diameter_sigma: optional_number(row, self.diameter_sigma),
        })
    }
}

fn text(row: &[Option<String>], index: Option<usize>) -> Option<&str> {
    index
        .and_then(|i| row.get(i))
        .and_then(Option::as_deref)
        .map(str::trim)
}

fn required<'a>(
    row: &'a [Option<String>],
    index: Option<usize>,
    name: &str,
) -> Result<&'a str, FetchError> {
    text(row, index).ok_or_else(|| FetchError::Parse(format!("missing field '{name}'")))
}

fn number(row: &[Option<String>], index: Option<usize>, name: &str) -> Result<f64, FetchError> {
    let value = required(row, index, name)?;
    value
        .parse()
        .map_err(|_| FetchError::Parse(format!("field '{name}' is not a number: {value}")))
}

fn optional_number(row: &[Option<String>], index: Option<usize>) -> Option<f64> {
    text(row, index).and_then(|v| v.parse().ok())
}

/// A source of close-approach records.
#[async_trait]
pub trait CloseApproachSource: Send + Sync {
    /// Returns the close approaches matching `query`, nearest first.
    ///
    /// An unavailable service yields an empty list.
    async fn close_approaches(
        &self,
        query: &CloseApproachQuery,
    ) -> Result<Vec<CloseApproach>, FetchError>;
}

#[async_trait]
impl CloseApproachSource for QueryClient {
    async fn close_approaches(
        &self,
        query: &CloseApproachQuery,
    ) -> Result<Vec<CloseApproach>, FetchError> {
        let Some(body) = self.get_text(&query.url(), &[]).await? else {
            return Ok(Vec::new());
        };
        let approaches = parse_close_approaches(&body)?;
        tracing::info!(count = approaches.len(), "close approaches found");
        Ok(approaches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const RESPONSE: &str = include_str!("../tests/fixtures/cad.json");

    #[test]
    fn test_url_custom_query() {
        let query = CloseApproachQuery {
            max_distance: "0.05".to_string(),
            max_h: 22.5,
            date_min: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            date_max: NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
        };
        assert_eq!(
            query.url(),
            "https://ssd-api.jpl.nasa.gov/cad.api?dist-max=0.05&date-min=2025-01-01\
             &date-max=2025-12-31&h-max=22.5&sort=dist&diameter=true"
        );
    }

    #[test]
    fn test_parse_fixture() {
        let approaches = parse_close_approaches(RESPONSE).unwrap();
        assert_eq!(approaches.len(), 3);

        let nearest = &approaches[0];
        assert_eq!(nearest.des, "2023 EY");
        assert_eq!(nearest.orbit_id, "9");
        assert_relative_eq!(nearest.jd, 2_460_017.717_048_63, epsilon = 1e-6);
        assert_eq!(nearest.cd, "2023-Mar-14 05:12");
        assert_relative_eq!(nearest.dist, 0.000_658_1, epsilon = 1e-10);
        assert_eq!(nearest.h, Some(27.9));
        assert_eq!(nearest.diameter, None);
        assert_eq!(nearest.t_sigma_f, "< 00:01");
    }

    #[test]
    fn test_parse_sorts_by_distance() {
        let approaches = parse_close_approaches(RESPONSE).unwrap();
        assert!(approaches.windows(2).all(|w| w[0].dist <= w[1].dist));
        assert_eq!(approaches[2].des, "2023 FW13");
        assert_eq!(approaches[2].diameter, Some(0.015));
    }

    #[test]
    fn test_parse_empty_response() {
        let json = r#"{"signature": {"source": "NASA/JPL SBDB Close Approach Data API", "version": "1.5"}, "count": "0"}"#;
        assert!(parse_close_approaches(json).unwrap().is_empty());
    }

    #[test]
    fn test_parse_missing_distance() {
        let json = r#"{"fields": ["des", "jd"], "data": [["2023 EY", "2460017.5"]]}"#;
        let err = parse_close_approaches(json).unwrap_err();
        assert!(err.to_string().contains("missing field 'dist'"));
    }
}
