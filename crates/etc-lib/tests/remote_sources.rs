//! Close-approach follow-up planning against in-memory sources.

#![cfg(feature = "fetch")]

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use etc_lib::{
    CloseApproach, CloseApproachQuery, CloseApproachSource, EphemerisRequest, EphemerisRow,
    EphemerisSource, EphemerisTable, FetchError, jd_tdb_to_utc,
};

struct CannedCatalog {
    approaches: Vec<CloseApproach>,
}

#[async_trait]
impl CloseApproachSource for CannedCatalog {
    async fn close_approaches(
        &self,
        query: &CloseApproachQuery,
    ) -> Result<Vec<CloseApproach>, FetchError> {
        let start = query.date_min.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let end = query.date_max.and_hms_opt(0, 0, 0).unwrap().and_utc();
        Ok(self
            .approaches
            .iter()
            .filter(|a| {
                let when = jd_tdb_to_utc(a.jd).unwrap();
                when >= start && when <= end && a.h.is_some_and(|h| h <= query.max_h)
            })
            .cloned()
            .collect())
    }
}

struct Unavailable;

#[async_trait]
impl EphemerisSource for Unavailable {
    async fn ephemeris(
        &self,
        _request: &EphemerisRequest,
    ) -> Result<Option<EphemerisTable>, FetchError> {
        Ok(None)
    }
}

struct HourlyEphemeris;

#[async_trait]
impl EphemerisSource for HourlyEphemeris {
    async fn ephemeris(
        &self,
        request: &EphemerisRequest,
    ) -> Result<Option<EphemerisTable>, FetchError> {
        let ca = request.close_approach_utc()?;
        let (start, stop) = request.window()?;
        let mut rows = Vec::new();
        let mut datetime = start;
        while datetime <= stop {
            let time_to_ca = (datetime - ca).num_seconds() as f64 / 86_400.0;
            rows.push(EphemerisRow {
                datetime,
                time_to_ca,
                values: vec![datetime.to_string()],
            });
            datetime += Duration::hours(1);
        }
        Ok(Some(EphemerisTable {
            target: request.target.clone(),
            close_approach: ca,
            columns: vec!["Date__(UT)__HR:MN".to_string()],
            rows,
        }))
    }
}

fn approach(des: &str, jd: f64, dist: f64, h: f64) -> CloseApproach {
    CloseApproach {
        des: des.to_string(),
        orbit_id: "1".to_string(),
        jd,
        cd: String::new(),
        dist,
        dist_min: dist,
        dist_max: dist,
        v_rel: 10.0,
        v_inf: Some(9.9),
        t_sigma_f: "< 00:01".to_string(),
        h: Some(h),
        diameter: None,
        diameter_sigma: None,
    }
}

fn catalog() -> CannedCatalog {
    CannedCatalog {
        approaches: vec![
            approach("2023 EY", 2_460_017.717, 0.000_66, 27.9),
            approach("2023 DZ2", 2_460_030.284, 0.001_17, 24.1),
            approach("2024 AA", 2_460_400.5, 0.000_30, 26.0),
            approach("2023 BU", 2_460_020.5, 0.000_03, 29.7),
        ],
    }
}

#[tokio::test]
async fn catalog_filters_by_date_and_magnitude() {
    let source: Box<dyn CloseApproachSource> = Box::new(catalog());
    let query = CloseApproachQuery::between(
        NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
        NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
    );
    let found = source.close_approaches(&query).await.unwrap();
    let names: Vec<&str> = found.iter().map(|a| a.des.as_str()).collect();
    assert_eq!(names, vec!["2023 EY", "2023 DZ2"]);
}

#[tokio::test]
async fn ephemeris_spans_close_approach() {
    let source: &dyn EphemerisSource = &HourlyEphemeris;
    let request = EphemerisRequest::for_close_approach(&catalog().approaches[0]);
    let table = source.ephemeris(&request).await.unwrap().unwrap();

    assert_eq!(table.len(), 30 * 24 + 1);
    assert!(table.rows.first().unwrap().time_to_ca < -14.9);
    assert!(table.rows.last().unwrap().time_to_ca > 14.9);
    let nearest = table.nearest_to_close_approach().unwrap();
    assert!(nearest.time_to_ca.abs() <= 0.5 / 24.0);
}

#[tokio::test]
async fn unavailable_service_is_no_data() {
    let request = EphemerisRequest::new("2023 EY", 2_460_017.717);
    assert!(Unavailable.ephemeris(&request).await.unwrap().is_none());
}
