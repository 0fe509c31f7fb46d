// src/mapping.rs
//
// Row → DTO mapping and the display rules that go with it. Queries only
// fetch columns; ordering, defaulting and derived fields happen here.

use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::{NaiveTime, Weekday};
use rand::Rng;

use crate::error::StoreError;
use crate::models::{
    Driver, DriverRow, DriverStatus, EarningsSummary, HourlyDemandPoint, HourlyRow, LiveRide,
    LocationRow, MetricRow, MetricsSnapshot, PopularLocation, RevenueRow, RideRow, Trend,
    WeeklyRevenuePoint,
};

/// Row cap for the ranked lists (drivers, locations).
pub const MAX_RANKED_ROWS: usize = 100;

/// Keyword → color tag for popular locations. Case-sensitive substring
/// match on the location name; first rule wins.
pub const LOCATION_COLORS: [(&str, &str); 6] = [
    ("VIT", "bg-red-500"),
    ("Airport", "bg-orange-500"),
    ("CMC", "bg-yellow-500"),
    ("FORT", "bg-green-500"),
    ("PARK", "bg-blue-500"),
    ("RAILWAY", "bg-indigo-500"),
];
pub const DEFAULT_LOCATION_COLOR: &str = "bg-pink-500";

/// Ride duration estimate bounds, in minutes.
pub const RIDE_MINUTES: std::ops::RangeInclusive<u32> = 1..=15;

// Metric table keys
pub const TOTAL_RIDES: &str = "total_rides_today";
pub const ACTIVE_DRIVERS: &str = "active_drivers";
pub const REVENUE_TODAY: &str = "revenue_today";
pub const AVG_RATING: &str = "avg_rating";
pub const COMPLETION_RATE: &str = "completion_rate";
pub const AVG_RESPONSE: &str = "avg_response";
pub const REVENUE_THIS_WEEK: &str = "revenue_this_week";
pub const REVENUE_THIS_MONTH: &str = "revenue_this_month";
pub const REVENUE_GROWTH: &str = "revenue_growth";

pub const EARNINGS_KEYS: [&str; 4] =
    [REVENUE_TODAY, REVENUE_THIS_WEEK, REVENUE_THIS_MONTH, REVENUE_GROWTH];

pub fn location_color(name: &str) -> &'static str {
    LOCATION_COLORS
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_LOCATION_COLOR)
}

pub fn parse_weekday(day: &str) -> Result<Weekday, StoreError> {
    day.trim()
        .parse::<Weekday>()
        .map_err(|_| StoreError::schema("weekday", day))
}

/// Parses "6AM", "12PM", "5 pm" into a time of day.
pub fn parse_hour(hour: &str) -> Option<NaiveTime> {
    let compact: String = hour.chars().filter(|c| !c.is_whitespace()).collect();
    let split = compact.len().checked_sub(2)?;
    if !compact.is_char_boundary(split) {
        return None;
    }
    let (h, meridiem) = compact.split_at(split);
    NaiveTime::parse_from_str(&format!("{h}:00{meridiem}"), "%I:%M%p").ok()
}

pub fn ride_duration(minutes: u32) -> String {
    format!("{minutes} min")
}

pub fn estimate_ride_minutes() -> u32 {
    rand::thread_rng().gen_range(RIDE_MINUTES)
}

/// Coerces a stored metric to a number. Missing keys and values that do not
/// parse read as 0.
pub fn metric_value(values: &HashMap<String, Option<String>>, key: &str) -> f64 {
    values
        .get(key)
        .and_then(|v| v.as_deref())
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn metric_map(rows: Vec<MetricRow>) -> HashMap<String, Option<String>> {
    rows.into_iter().map(|r| (r.key, r.value)).collect()
}

pub fn metrics_from_rows(rows: Vec<MetricRow>) -> MetricsSnapshot {
    let values = metric_map(rows);
    MetricsSnapshot {
        total_rides: metric_value(&values, TOTAL_RIDES).round() as i64,
        active_drivers: metric_value(&values, ACTIVE_DRIVERS).round() as i64,
        total_revenue: metric_value(&values, REVENUE_TODAY),
        avg_rating: metric_value(&values, AVG_RATING),
        completion_rate: metric_value(&values, COMPLETION_RATE),
        response_time: metric_value(&values, AVG_RESPONSE),
    }
}

pub fn earnings_from_rows(rows: Vec<MetricRow>) -> EarningsSummary {
    let values = metric_map(rows);
    EarningsSummary {
        today: metric_value(&values, REVENUE_TODAY),
        this_week: metric_value(&values, REVENUE_THIS_WEEK),
        this_month: metric_value(&values, REVENUE_THIS_MONTH),
        growth: metric_value(&values, REVENUE_GROWTH),
    }
}

pub fn drivers_from_rows(rows: Vec<DriverRow>) -> Result<Vec<Driver>, StoreError> {
    let mut drivers = rows
        .into_iter()
        .map(|r| {
            Ok(Driver {
                status: r.status.parse::<DriverStatus>()?,
                id: r.id,
                name: r.name,
                rating: r.rating.unwrap_or(0.0),
                rides_completed: r.rides_completed.unwrap_or(0),
                earnings: r.earnings.unwrap_or(0.0),
                // no history to derive a trend from
                trend: Trend::Stable,
            })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;
    drivers.sort_by_key(|d| Reverse(d.rides_completed));
    drivers.truncate(MAX_RANKED_ROWS);
    Ok(drivers)
}

pub fn live_rides_from_rows(rows: Vec<RideRow>) -> Result<Vec<LiveRide>, StoreError> {
    let mut rides = rows
        .into_iter()
        .map(|r| {
            Ok(LiveRide {
                status: r.status.parse()?,
                id: r.id,
                driver: r.driver,
                passenger: r.passenger,
                pickup: r.pickup,
                destination: r.destination,
                duration: ride_duration(estimate_ride_minutes()),
                fare: r.fare.unwrap_or(0.0),
            })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;
    rides.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(rides)
}

pub fn locations_from_rows(rows: Vec<LocationRow>) -> Vec<PopularLocation> {
    let mut locations: Vec<PopularLocation> = rows
        .into_iter()
        .map(|r| PopularLocation {
            color: location_color(&r.name).to_string(),
            name: r.name,
            rides: r.rides.unwrap_or(0),
            growth: r.growth.unwrap_or(0.0),
        })
        .collect();
    locations.sort_by_key(|l| Reverse(l.rides));
    locations.truncate(MAX_RANKED_ROWS);
    locations
}

pub fn weekly_revenue_from_rows(rows: Vec<RevenueRow>) -> Result<Vec<WeeklyRevenuePoint>, StoreError> {
    let mut points = rows
        .into_iter()
        .map(|r| {
            Ok(WeeklyRevenuePoint {
                day: parse_weekday(&r.day)?,
                revenue: r.revenue.unwrap_or(0.0),
            })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;
    points.sort_by_key(|p| p.day.num_days_from_monday());
    Ok(points)
}

/// Rows whose hour does not parse keep their relative order after the
/// parsed ones.
pub fn hourly_demand_from_rows(rows: Vec<HourlyRow>) -> Result<Vec<HourlyDemandPoint>, StoreError> {
    let mut points = rows
        .into_iter()
        .map(|r| {
            Ok(HourlyDemandPoint {
                demand: r.demand.parse()?,
                hour: r.hour,
                rides: r.rides.unwrap_or(0),
            })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;
    points.sort_by_key(|p| match parse_hour(&p.hour) {
        Some(t) => (0, t),
        None => (1, NaiveTime::MIN),
    });
    Ok(points)
}
