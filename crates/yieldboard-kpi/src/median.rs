use chrono::NaiveDate;
use yieldboard_types::{MedianApyPoint, SmoothedMedianPoint};

/// The feed carries one corrupt observation: too few datapoints that day
/// skew the median, so it is excluded before any computation.
pub const EXCLUDED_TIMESTAMP: &str = "2022-06-04T00:00:00.000Z";

const WINDOW_SIZE: usize = 7;

/// Drop the known-bad observation. Re-applying to an already filtered
/// series is a no-op.
pub fn drop_known_bad(points: Vec<MedianApyPoint>) -> Vec<MedianApyPoint> {
    points
        .into_iter()
        .filter(|point| point.timestamp != EXCLUDED_TIMESTAMP)
        .collect()
}

/// Reduce the raw median-APY series to calendar-day points carrying a
/// trailing seven-day average. The first six days carry no average rather
/// than a partial-window mean.
pub fn smooth(points: Vec<MedianApyPoint>) -> Vec<SmoothedMedianPoint> {
    let mut days: Vec<SmoothedMedianPoint> = drop_known_bad(points)
        .into_iter()
        .filter_map(|point| match parse_day(&point.timestamp) {
            Some(timestamp) => Some(SmoothedMedianPoint {
                timestamp,
                median_apy: point.median_apy,
                unique_pools: point.unique_pools,
                avg_7day: None,
            }),
            None => {
                tracing::warn!(timestamp = %point.timestamp, "unparseable median timestamp, dropping point");
                None
            }
        })
        .collect();
    days.sort_by_key(|point| point.timestamp);

    for i in (WINDOW_SIZE - 1)..days.len() {
        let sum: f64 = days[i + 1 - WINDOW_SIZE..=i]
            .iter()
            .map(|point| point.median_apy)
            .sum();
        days[i].avg_7day = Some(sum / WINDOW_SIZE as f64);
    }
    days
}

fn parse_day(timestamp: &str) -> Option<NaiveDate> {
    let day = timestamp.split('T').next().unwrap_or(timestamp);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
