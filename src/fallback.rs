// src/fallback.rs
//
// Static payloads served when the store cannot answer. Each resource has
// exactly one; handlers never invent their own.

use chrono::Weekday;

use crate::models::{
    Demand, Driver, DriverStatus, EarningsSummary, HourlyDemandPoint, LiveRide, MetricsSnapshot,
    PopularLocation, RideStatus, Trend, WeeklyRevenuePoint,
};

pub const METRICS: MetricsSnapshot = MetricsSnapshot {
    total_rides: 247,
    active_drivers: 149,
    total_revenue: 4589.0,
    avg_rating: 4.8,
    completion_rate: 94.2,
    response_time: 3.2,
};

pub const EARNINGS: EarningsSummary = EarningsSummary {
    today: 488.0,
    this_week: 2694.0,
    this_month: 10000.0,
    growth: 18.5,
};

// id, name, rating, rides completed, earnings, status, trend
const DRIVERS: [(&str, &str, f64, i64, f64, DriverStatus, Trend); 5] = [
    ("RC001", "Rajesh", 4.8, 256, 1400.0, DriverStatus::Online, Trend::Up),
    ("RC002", "Amit", 4.6, 234, 800.0, DriverStatus::Busy, Trend::Stable),
    ("RC003", "Suresh", 4.9, 289, 500.0, DriverStatus::Online, Trend::Up),
    ("RC004", "Vikram", 4.7, 198, 410.0, DriverStatus::Offline, Trend::Down),
    ("RC005", "Arjun", 4.5, 167, 350.0, DriverStatus::Online, Trend::Stable),
];

// id, driver, passenger, pickup, destination, status, duration, fare
//
// RC003 is "arrived", a status the live query never selects.
const LIVE_RIDES: [(&str, &str, &str, &str, &str, RideStatus, &str, f64); 3] = [
    ("RC001", "Rajesh", "Priya", "Sathvacheri", "Kaspa", RideStatus::Enroute, "12 min", 450.0),
    ("RC002", "Amit", "Neha", "Katpadi Railway Station", "VIT", RideStatus::Pickup, "3 min", 280.0),
    ("RC003", "Suresh", "Kavya", "New Bus Stand", "Vellore Fort", RideStatus::Arrived, "0 min", 180.0),
];

// name, rides, growth, color
//
// Colors are fixed here rather than derived: GOLDEN TEMPLE is purple,
// which no keyword rule produces.
const LOCATIONS: [(&str, i64, f64, &str); 8] = [
    ("VIT UNIVERSITY", 456, 12.5, "bg-red-500"),
    ("VELLORE Airport", 342, 8.2, "bg-orange-500"),
    ("CMC HOSPITAL", 289, -2.1, "bg-yellow-500"),
    ("VELLORE FORT", 234, 15.8, "bg-green-500"),
    ("PERIYAR PARK", 187, 6.4, "bg-blue-500"),
    ("KATPADI RAILWAY STATION", 145, 3.2, "bg-indigo-500"),
    ("GOLDEN TEMPLE", 98, 4.7, "bg-purple-500"),
    ("NEW BUS STAND", 76, 22.1, "bg-pink-500"),
];

pub const WEEKLY_REVENUE: [WeeklyRevenuePoint; 7] = [
    WeeklyRevenuePoint { day: Weekday::Mon, revenue: 250.0 },
    WeeklyRevenuePoint { day: Weekday::Tue, revenue: 520.0 },
    WeeklyRevenuePoint { day: Weekday::Wed, revenue: 180.0 },
    WeeklyRevenuePoint { day: Weekday::Thu, revenue: 690.0 },
    WeeklyRevenuePoint { day: Weekday::Fri, revenue: 140.0 },
    WeeklyRevenuePoint { day: Weekday::Sat, revenue: 480.0 },
    WeeklyRevenuePoint { day: Weekday::Sun, revenue: 960.0 },
];

const HOURLY_DEMAND: [(&str, i64, Demand); 12] = [
    ("6AM", 45, Demand::Low),
    ("7AM", 128, Demand::Medium),
    ("8AM", 245, Demand::High),
    ("9AM", 189, Demand::Medium),
    ("10AM", 167, Demand::Medium),
    ("11AM", 201, Demand::High),
    ("12PM", 298, Demand::Peak),
    ("1PM", 267, Demand::High),
    ("2PM", 198, Demand::Medium),
    ("3PM", 234, Demand::High),
    ("4PM", 289, Demand::Peak),
    ("5PM", 356, Demand::Peak),
];

pub fn metrics() -> MetricsSnapshot {
    METRICS
}

pub fn earnings() -> EarningsSummary {
    EARNINGS
}

pub fn drivers() -> Vec<Driver> {
    DRIVERS
        .iter()
        .map(|&(id, name, rating, rides_completed, earnings, status, trend)| Driver {
            id: id.into(),
            name: name.into(),
            rating,
            rides_completed,
            earnings,
            status,
            trend,
        })
        .collect()
}

pub fn live_rides() -> Vec<LiveRide> {
    LIVE_RIDES
        .iter()
        .map(|&(id, driver, passenger, pickup, destination, status, duration, fare)| LiveRide {
            id: id.into(),
            driver: driver.into(),
            passenger: passenger.into(),
            pickup: pickup.into(),
            destination: destination.into(),
            status,
            duration: duration.into(),
            fare,
        })
        .collect()
}

pub fn popular_locations() -> Vec<PopularLocation> {
    LOCATIONS
        .iter()
        .map(|&(name, rides, growth, color)| PopularLocation {
            name: name.into(),
            rides,
            growth,
            color: color.into(),
        })
        .collect()
}

pub fn weekly_revenue() -> Vec<WeeklyRevenuePoint> {
    WEEKLY_REVENUE.to_vec()
}

pub fn hourly_demand() -> Vec<HourlyDemandPoint> {
    HOURLY_DEMAND
        .iter()
        .map(|&(hour, rides, demand)| HourlyDemandPoint { hour: hour.into(), rides, demand })
        .collect()
}
