// src/config.rs

use std::net::SocketAddr;

use anyhow::{anyhow, Context};

const DEFAULT_SCHEMA: &str = "public";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Schema every dashboard table lives in. May contain spaces.
    pub schema: String,
    pub port: u16,
    pub max_connections: u32,
}

impl Config {
    /// Reads `DATABASE_URL`, `DB_NAME`, `PORT` and `DB_MAX_CONNECTIONS`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;

        let schema = lookup("DB_NAME")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SCHEMA.into());

        let port = match lookup("PORT") {
            Some(p) => p.trim().parse().with_context(|| format!("invalid PORT {p:?}"))?,
            None => DEFAULT_PORT,
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(n) => n
                .trim()
                .parse()
                .with_context(|| format!("invalid DB_MAX_CONNECTIONS {n:?}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Config { database_url, schema, port, max_connections })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let cfg = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/cabs")])).unwrap();
        assert_eq!(cfg.schema, "public");
        assert_eq!(cfg.port, 5000);
        assert_eq!(cfg.max_connections, 10);
        assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:5000");
    }

    #[test]
    fn schema_keeps_spaces() {
        let cfg = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/cabs"),
            ("DB_NAME", "ROOT 001"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(cfg.schema, "ROOT 001");
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn missing_url_is_an_error() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn bad_port_is_an_error() {
        let err = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/cabs"),
            ("PORT", "http"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
