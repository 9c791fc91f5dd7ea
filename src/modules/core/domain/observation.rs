//! Observation rows and the rules that shape them into responses

use climate_api_types::TemperatureSummary;
use serde_json::{Map, Value};

/// Station whose observations are served by the tobs route
pub const MOST_ACTIVE_STATION: &str = "USC00519281";

/// One `(date, value)` pair read from the measurement table.
///
/// `value` keeps whatever storage type the store reported, so an integer
/// reading stays an integer on the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: String,
    pub value: Value,
}

impl Observation {
    pub fn new(date: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            date: date.into(),
            value: value.into(),
        }
    }
}

/// Date filter for the temperature aggregate routes.
///
/// Bounds are bound as text and compared against the stored date column by
/// the store, never parsed. Both bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateWindow {
    pub start: String,
    pub end: Option<String>,
}

impl DateWindow {
    /// Everything on or after `start`
    pub fn starting(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    /// Everything from `start` to `end`, both inclusive
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
        }
    }
}

/// Raw MIN/AVG/MAX as returned by the store
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TemperatureAggregate {
    pub min: Value,
    pub avg: Option<f64>,
    pub max: Value,
}

impl TemperatureAggregate {
    /// Shape the aggregate into the wire summary, rounding the average
    pub fn into_summary(self) -> TemperatureSummary {
        TemperatureSummary {
            lowest: self.min,
            average: round_average(self.avg),
            highest: self.max,
        }
    }
}

/// Round an average to two decimal places, halves away from zero.
/// `None` and non-finite averages become `None`.
pub fn round_average(avg: Option<f64>) -> Option<f64> {
    avg.filter(|v| v.is_finite())
        .map(|v| (v * 100.0).round() / 100.0)
}

/// Build the date -> precipitation object.
///
/// Rows sharing a date overwrite each other, so the last row read wins.
pub fn precipitation_by_date<I>(rows: I) -> Map<String, Value>
where
    I: IntoIterator<Item = Observation>,
{
    let mut map = Map::new();
    for row in rows {
        map.insert(row.date, row.value);
    }
    map
}

/// Flatten observations into `[date, value, date, value, ...]`
pub fn interleave_observations<I>(rows: I) -> Vec<Value>
where
    I: IntoIterator<Item = Observation>,
{
    let rows = rows.into_iter();
    let mut flat = Vec::with_capacity(rows.size_hint().0 * 2);
    for row in rows {
        flat.push(Value::String(row.date));
        flat.push(row.value);
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_precipitation_last_row_wins() {
        let rows = vec![
            Observation::new("2017-01-01", 0.1),
            Observation::new("2017-01-02", 0.0),
            Observation::new("2017-01-01", 0.35),
            Observation::new("2017-01-01", Value::Null),
        ];
        let map = precipitation_by_date(rows);
        assert_eq!(map.len(), 2);
        assert_eq!(map["2017-01-01"], Value::Null);
        assert_eq!(map["2017-01-02"], json!(0.0));
    }

    #[test]
    fn test_precipitation_keys_sorted() {
        let rows = vec![
            Observation::new("2017-03-01", 1.0),
            Observation::new("2016-12-31", 2.0),
        ];
        let text = serde_json::to_string(&precipitation_by_date(rows)).unwrap();
        assert_eq!(text, r#"{"2016-12-31":2.0,"2017-03-01":1.0}"#);
    }

    #[test]
    fn test_interleave() {
        let rows = vec![
            Observation::new("2017-01-01", 70),
            Observation::new("2017-01-02", 75),
        ];
        assert_eq!(
            interleave_observations(rows),
            vec![json!("2017-01-01"), json!(70), json!("2017-01-02"), json!(75)]
        );
        assert!(interleave_observations(Vec::new()).is_empty());
    }

    #[test]
    fn test_round_average() {
        assert_eq!(round_average(Some(72.456)), Some(72.46));
        assert_eq!(round_average(Some(72.454)), Some(72.45));
        assert_eq!(round_average(Some(75.0)), Some(75.0));
        // 70.125 is exact in binary, so this is a true half
        assert_eq!(round_average(Some(70.125)), Some(70.13));
        assert_eq!(round_average(Some(-70.125)), Some(-70.13));
        assert_eq!(round_average(None), None);
        assert_eq!(round_average(Some(f64::NAN)), None);
    }

    #[test]
    fn test_date_window_bounds() {
        assert_eq!(DateWindow::starting("2017").end, None);
        let window = DateWindow::between("2017-01-01", "2017-01-31");
        assert_eq!(window.start, "2017-01-01");
        assert_eq!(window.end.as_deref(), Some("2017-01-31"));
    }

    #[test]
    fn test_aggregate_into_summary() {
        let aggregate = TemperatureAggregate {
            min: json!(62),
            avg: Some(71.663_333),
            max: json!(82),
        };
        let summary = aggregate.into_summary();
        assert_eq!(summary.lowest, json!(62));
        assert_eq!(summary.average, Some(71.66));
        assert_eq!(summary.highest, json!(82));

        assert!(TemperatureAggregate::default().into_summary().is_empty());
    }
}
