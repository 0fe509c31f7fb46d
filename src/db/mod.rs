// src/db/mod.rs

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, query_as, query_scalar, PgPool};
use tracing::info;

use crate::config::Config;
use crate::error::StoreError;
use crate::mapping::EARNINGS_KEYS;
use crate::models::{DriverRow, HourlyRow, LocationRow, MetricRow, RevenueRow, RideRow};

/// Builds the pool without opening a connection, so the API comes up (and
/// serves fallbacks) while the database is still unreachable.
pub fn connect(config: &Config) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy(&config.database_url)?;

    info!(schema = %config.schema, "PostgreSQL pool ready (lazy)");
    Ok(pool)
}

/// One read per dashboard resource. Implementations return raw rows; all
/// reshaping lives in `mapping`.
#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// Trivial liveness query; `true` when the store answered `1`.
    async fn ping(&self) -> Result<bool, StoreError>;
    async fn metrics(&self) -> Result<Vec<MetricRow>, StoreError>;
    async fn earnings(&self) -> Result<Vec<MetricRow>, StoreError>;
    async fn drivers(&self) -> Result<Vec<DriverRow>, StoreError>;
    async fn live_rides(&self) -> Result<Vec<RideRow>, StoreError>;
    async fn popular_locations(&self) -> Result<Vec<LocationRow>, StoreError>;
    async fn weekly_revenue(&self) -> Result<Vec<RevenueRow>, StoreError>;
    async fn hourly_demand(&self) -> Result<Vec<HourlyRow>, StoreError>;
}

/// Quotes an identifier for PostgreSQL, doubling embedded quotes.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        Self { pool, schema: schema.into() }
    }

    fn table(&self, name: &str) -> String {
        format!("{}.{}", quote_ident(&self.schema), quote_ident(name))
    }

    // Vocabulary columns are read as text so enum-typed columns decode too.

    fn drivers_sql(&self) -> String {
        format!(
            r#"SELECT id::text AS id, name, rating::float8 AS rating,
                      rides_completed::int8 AS rides_completed,
                      earnings::float8 AS earnings, status::text AS status
               FROM {}
               ORDER BY rides_completed DESC NULLS LAST
               LIMIT 100"#,
            self.table("drivers")
        )
    }

    fn live_rides_sql(&self) -> String {
        format!(
            r#"SELECT id::text AS id, driver, passenger, pickup, destination,
                      status::text AS status, fare::float8 AS fare
               FROM {}
               WHERE status::text IN ('pickup','enroute')
               ORDER BY id"#,
            self.table("rides")
        )
    }

    fn weekly_revenue_sql(&self) -> String {
        format!(
            r#"SELECT day::text AS day, revenue::float8 AS revenue FROM {}"#,
            self.table("revenue_weekly")
        )
    }

    fn hourly_demand_sql(&self) -> String {
        format!(
            r#"SELECT hour, rides::int8 AS rides, demand::text AS demand FROM {}"#,
            self.table("hourly_demand")
        )
    }
}

#[async_trait]
impl DashboardStore for PgStore {
    async fn ping(&self) -> Result<bool, StoreError> {
        let ok: i32 = query_scalar("SELECT 1 AS ok").fetch_one(&self.pool).await?;
        Ok(ok == 1)
    }

    async fn metrics(&self) -> Result<Vec<MetricRow>, StoreError> {
        let sql = format!(
            r#"SELECT "key", COALESCE(value_text, value_numeric::text) AS value
               FROM {}"#,
            self.table("metrics")
        );
        Ok(query_as::<_, MetricRow>(&sql).fetch_all(&self.pool).await?)
    }

    async fn earnings(&self) -> Result<Vec<MetricRow>, StoreError> {
        let sql = format!(
            r#"SELECT "key", COALESCE(value_numeric::text, value_text) AS value
               FROM {}
               WHERE "key" = ANY($1)"#,
            self.table("metrics")
        );
        let keys: Vec<String> = EARNINGS_KEYS.iter().map(|k| k.to_string()).collect();
        Ok(query_as::<_, MetricRow>(&sql).bind(keys).fetch_all(&self.pool).await?)
    }

    async fn drivers(&self) -> Result<Vec<DriverRow>, StoreError> {
        Ok(query_as::<_, DriverRow>(&self.drivers_sql()).fetch_all(&self.pool).await?)
    }

    async fn live_rides(&self) -> Result<Vec<RideRow>, StoreError> {
        Ok(query_as::<_, RideRow>(&self.live_rides_sql()).fetch_all(&self.pool).await?)
    }

    async fn popular_locations(&self) -> Result<Vec<LocationRow>, StoreError> {
        let sql = format!(
            r#"SELECT name, rides::int8 AS rides, growth::float8 AS growth
               FROM {}
               ORDER BY rides DESC NULLS LAST
               LIMIT 100"#,
            self.table("locations")
        );
        Ok(query_as::<_, LocationRow>(&sql).fetch_all(&self.pool).await?)
    }

    async fn weekly_revenue(&self) -> Result<Vec<RevenueRow>, StoreError> {
        Ok(query_as::<_, RevenueRow>(&self.weekly_revenue_sql()).fetch_all(&self.pool).await?)
    }

    async fn hourly_demand(&self) -> Result<Vec<HourlyRow>, StoreError> {
        Ok(query_as::<_, HourlyRow>(&self.hourly_demand_sql()).fetch_all(&self.pool).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("metrics"), r#""metrics""#);
        assert_eq!(quote_ident("ROOT 001"), r#""ROOT 001""#);
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
    }

    #[tokio::test]
    async fn tables_are_schema_qualified() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://cabs@127.0.0.1:1/cabs")
            .unwrap();
        let store = PgStore::new(pool, "ROOT 001");
        assert_eq!(store.table("drivers"), r#""ROOT 001"."drivers""#);
    }

    #[tokio::test]
    async fn vocabulary_columns_are_read_as_text() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://cabs@127.0.0.1:1/cabs")
            .unwrap();
        let store = PgStore::new(pool, "public");
        assert!(store.drivers_sql().contains("status::text AS status"));

        let rides = store.live_rides_sql();
        assert!(rides.contains("status::text AS status"));
        assert!(rides.contains("WHERE status::text IN ('pickup','enroute')"));

        assert!(store.weekly_revenue_sql().contains("day::text AS day"));
        let hourly = store.hourly_demand_sql();
        assert!(hourly.contains("demand::text AS demand"));
        assert!(hourly.contains(r#"FROM "public"."hourly_demand""#));
    }
}
