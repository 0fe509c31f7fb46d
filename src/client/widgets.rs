// src/client/widgets.rs

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::binder::{Binder, Phase, ViewState};
use super::fetch::HttpFetcher;
use crate::models::{
    Driver, EarningsSummary, HourlyDemandPoint, LiveRide, MetricsSnapshot, PopularLocation,
    WeeklyRevenuePoint,
};

/// A dashboard panel: where it reads from and how often.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Widget {
    pub name: &'static str,
    pub path: &'static str,
    pub interval: Option<Duration>,
    pub error_message: &'static str,
    /// Page anchor, also the target of search results.
    pub anchor: &'static str,
}

pub const METRICS: Widget = Widget {
    name: "metrics",
    path: "/api/metrics",
    interval: Some(Duration::from_secs(10)),
    error_message: "Failed metrics fetch",
    anchor: "metrics",
};

pub const EARNINGS: Widget = Widget {
    name: "earnings",
    path: "/api/earnings/overview",
    interval: None,
    error_message: "Failed to load earnings",
    anchor: "earnings",
};

pub const DRIVERS: Widget = Widget {
    name: "drivers",
    path: "/api/drivers",
    interval: None,
    error_message: "Failed to load drivers",
    anchor: "drivers",
};

pub const LIVE_RIDES: Widget = Widget {
    name: "live rides",
    path: "/api/rides/live",
    interval: Some(Duration::from_secs(10)),
    error_message: "Failed to load live rides",
    anchor: "live-rides",
};

pub const LOCATIONS: Widget = Widget {
    name: "locations",
    path: "/api/locations/popular",
    interval: None,
    error_message: "Failed to load locations",
    anchor: "locations",
};

pub const WEEKLY_REVENUE: Widget = Widget {
    name: "weekly revenue",
    path: "/api/revenue/weekly",
    interval: None,
    error_message: "Failed to load weekly revenue",
    anchor: "revenue",
};

pub const HOURLY_DEMAND: Widget = Widget {
    name: "hourly demand",
    path: "/api/analytics/hourly",
    interval: Some(Duration::from_secs(15)),
    error_message: "Failed to load hourly analytics",
    anchor: "hourly",
};

pub const ALL: [Widget; 7] =
    [METRICS, EARNINGS, DRIVERS, LIVE_RIDES, LOCATIONS, WEEKLY_REVENUE, HOURLY_DEMAND];

impl Widget {
    pub fn binder<T>(&self, client: &reqwest::Client, base: &str) -> Binder<T>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        let fetcher = Arc::new(HttpFetcher::new(client.clone(), base, self.path));
        Binder::new(self.name, fetcher)
            .interval(self.interval)
            .error_message(self.error_message)
    }
}

// ───────────────────────────────────────
// Text rendering
// ───────────────────────────────────────

/// Groups digits in threes: 10000 → "10,000".
pub fn thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Width of a bar relative to the largest value, in percent. The divisor
/// is never below 1.
pub fn bar_percent(value: f64, max: f64) -> f64 {
    value / max.max(1.0) * 100.0
}

fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(1.0, f64::max)
}

fn frame<T>(title: &str, state: &ViewState<T>, show_error: bool, rows: impl FnOnce(&T) -> Vec<String>) -> Vec<String> {
    let mut out = vec![format!("== {title} ==")];
    if show_error {
        if let Some(e) = &state.error {
            out.push(format!("! {e}"));
        }
    }
    match &state.data {
        Some(data) => out.extend(rows(data)),
        None if state.phase == Phase::Loading || state.phase == Phase::Idle => out.push("Loading…".into()),
        None => {}
    }
    out
}

/// Metric cards. A failed poll is silent; the last known figures stay.
pub fn render_metrics(state: &ViewState<MetricsSnapshot>) -> Vec<String> {
    frame("Overview", state, false, |m| {
        vec![
            format!("Total Rides Today: {}", thousands(m.total_rides as f64)),
            format!("Active Drivers: {}", m.active_drivers),
            format!("Revenue Today: ₹{}", thousands(m.total_revenue)),
            format!("Avg Rating: {:.1}", m.avg_rating),
            format!("Completion Rate: {:.1}%", m.completion_rate),
            format!("Avg Response: {:.1} min", m.response_time),
        ]
    })
}

pub fn render_earnings(state: &ViewState<EarningsSummary>) -> Vec<String> {
    frame("Earnings", state, true, |e| {
        let sign = if e.growth >= 0.0 { "+" } else { "" };
        vec![
            format!("Today: ₹{}", thousands(e.today)),
            format!("This Week: ₹{}", thousands(e.this_week)),
            format!("This Month: ₹{}", thousands(e.this_month)),
            format!("Growth: {sign}{:.1}%", e.growth),
        ]
    })
}

pub fn render_drivers(state: &ViewState<Vec<Driver>>) -> Vec<String> {
    frame("Top Drivers", state, true, |drivers| {
        drivers
            .iter()
            .map(|d| {
                format!(
                    "{} {} ★{:.1} {} rides ₹{} {} ({})",
                    d.id, d.name, d.rating, d.rides_completed, thousands(d.earnings), d.status, d.trend
                )
            })
            .collect()
    })
}

pub fn render_live_rides(state: &ViewState<Vec<LiveRide>>) -> Vec<String> {
    frame("Live Rides", state, true, |rides| {
        rides
            .iter()
            .map(|r| {
                format!(
                    "{} {} → {} | {} → {} | {} | {} | ₹{}",
                    r.id, r.driver, r.passenger, r.pickup, r.destination, r.status, r.duration, thousands(r.fare)
                )
            })
            .collect()
    })
}

pub fn render_locations(state: &ViewState<Vec<PopularLocation>>) -> Vec<String> {
    frame("Popular Locations", state, true, |locations| {
        let max = max_of(locations.iter().map(|l| l.rides as f64));
        locations
            .iter()
            .map(|l| {
                let arrow = if l.growth >= 0.0 { '▲' } else { '▼' };
                format!(
                    "{} {} rides [{:.0}%] {arrow}{:.1}%",
                    l.name,
                    l.rides,
                    bar_percent(l.rides as f64, max),
                    l.growth.abs()
                )
            })
            .collect()
    })
}

pub fn render_weekly_revenue(state: &ViewState<Vec<WeeklyRevenuePoint>>) -> Vec<String> {
    frame("Weekly Revenue", state, true, |points| {
        let max = max_of(points.iter().map(|p| p.revenue));
        points
            .iter()
            .map(|p| format!("{} ₹{} [{:.0}%]", p.day, thousands(p.revenue), bar_percent(p.revenue, max)))
            .collect()
    })
}

pub fn render_hourly_demand(state: &ViewState<Vec<HourlyDemandPoint>>) -> Vec<String> {
    frame("Peak Hours", state, true, |points| {
        let max = max_of(points.iter().map(|p| p.rides as f64));
        points
            .iter()
            .map(|p| format!("{} {} rides {} [{:.0}%]", p.hour, p.rides, p.demand, bar_percent(p.rides as f64, max)))
            .collect()
    })
}
