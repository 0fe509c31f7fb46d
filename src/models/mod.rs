// src/models/mod.rs

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::StoreError;

pub mod number;

// ───────────────────────────────────────
// Store rows (as returned by the queries)
// ───────────────────────────────────────
#[derive(Debug, Clone, FromRow)]
pub struct MetricRow {
    pub key: String,
    pub value: Option<String>,   // numeric or text column, whichever is set
}

#[derive(Debug, Clone, FromRow)]
pub struct DriverRow {
    pub id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub rides_completed: Option<i64>,
    pub earnings: Option<f64>,
    pub status: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct RideRow {
    pub id: String,
    pub driver: String,
    pub passenger: String,
    pub pickup: String,
    pub destination: String,
    pub status: String,
    pub fare: Option<f64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct LocationRow {
    pub name: String,
    pub rides: Option<i64>,
    pub growth: Option<f64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct RevenueRow {
    pub day: String,
    pub revenue: Option<f64>,
}

#[derive(Debug, Clone, FromRow)]
pub struct HourlyRow {
    pub hour: String,
    pub rides: Option<i64>,
    pub demand: String,
}

// ───────────────────────────────────────
// Vocabularies
// ───────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverStatus {
    Online,
    Busy,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RideStatus {
    Pickup,
    Enroute,
    Arrived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Demand {
    Low,
    Medium,
    High,
    Peak,
}

impl DriverStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DriverStatus::Online => "online",
            DriverStatus::Busy => "busy",
            DriverStatus::Offline => "offline",
        }
    }
}

impl Trend {
    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }
}

impl RideStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RideStatus::Pickup => "pickup",
            RideStatus::Enroute => "enroute",
            RideStatus::Arrived => "arrived",
        }
    }
}

impl Demand {
    pub fn as_str(self) -> &'static str {
        match self {
            Demand::Low => "low",
            Demand::Medium => "medium",
            Demand::High => "high",
            Demand::Peak => "peak",
        }
    }
}

impl FromStr for DriverStatus {
    type Err = StoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "online" => Ok(DriverStatus::Online),
            "busy" => Ok(DriverStatus::Busy),
            "offline" => Ok(DriverStatus::Offline),
            other => Err(StoreError::schema("driver status", other)),
        }
    }
}

impl FromStr for RideStatus {
    type Err = StoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pickup" => Ok(RideStatus::Pickup),
            "enroute" => Ok(RideStatus::Enroute),
            "arrived" => Ok(RideStatus::Arrived),
            other => Err(StoreError::schema("ride status", other)),
        }
    }
}

impl FromStr for Demand {
    type Err = StoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "low" => Ok(Demand::Low),
            "medium" => Ok(Demand::Medium),
            "high" => Ok(Demand::High),
            "peak" => Ok(Demand::Peak),
            other => Err(StoreError::schema("demand level", other)),
        }
    }
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl fmt::Display for RideStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl fmt::Display for Demand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

// ───────────────────────────────────────
// Response DTOs (the JSON contract)
// ───────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub total_rides: i64,
    pub active_drivers: i64,
    #[serde(serialize_with = "number::compact")]
    pub total_revenue: f64,
    #[serde(serialize_with = "number::compact")]
    pub avg_rating: f64,
    #[serde(serialize_with = "number::compact")]
    pub completion_rate: f64,   // percent
    #[serde(serialize_with = "number::compact")]
    pub response_time: f64,     // minutes
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsSummary {
    #[serde(serialize_with = "number::compact")]
    pub today: f64,
    #[serde(serialize_with = "number::compact")]
    pub this_week: f64,
    #[serde(serialize_with = "number::compact")]
    pub this_month: f64,
    #[serde(serialize_with = "number::compact")]
    pub growth: f64,            // percent
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: String,
    pub name: String,
    #[serde(serialize_with = "number::compact")]
    pub rating: f64,
    pub rides_completed: i64,
    #[serde(serialize_with = "number::compact")]
    pub earnings: f64,
    pub status: DriverStatus,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveRide {
    pub id: String,
    pub driver: String,
    pub passenger: String,
    pub pickup: String,
    pub destination: String,
    pub status: RideStatus,
    pub duration: String,       // "N min"
    #[serde(serialize_with = "number::compact")]
    pub fare: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularLocation {
    pub name: String,
    pub rides: i64,
    #[serde(serialize_with = "number::compact")]
    pub growth: f64,
    pub color: String,          // tailwind background class
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyRevenuePoint {
    pub day: Weekday,           // "Mon" .. "Sun"
    #[serde(serialize_with = "number::compact")]
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyDemandPoint {
    pub hour: String,           // "6AM" .. "5PM"
    pub rides: i64,
    pub demand: Demand,
}
