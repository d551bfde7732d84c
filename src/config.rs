use anyhow::{Context, Result, anyhow};
use chrono::{FixedOffset, Local, NaiveDate, Utc};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,

    // Rate limiting, 0 turns the limiter off
    pub rate_api_per_min: u32,

    pub api_prefix: String,
    pub log_dir: String,

    /// Which calendar day counts as "today" for dashboard stats
    pub stats_timezone: StatsTimezone,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "0.0.0.0:8000"),
            database_url: var_or("DATABASE_URL", "sqlite://hrms.db"),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            rate_api_per_min: parse_var("RATE_API_PER_MIN", 1000)?,
            api_prefix: var_or("API_PREFIX", "/api"),
            log_dir: var_or("LOG_DIR", "logs"),
            stats_timezone: parse_var("STATS_TIMEZONE", StatsTimezone::Local)?,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}

/// Timezone policy used to resolve the current calendar date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatsTimezone {
    /// Server-local date
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl StatsTimezone {
    pub fn today(&self) -> NaiveDate {
        match self {
            StatsTimezone::Local => Local::now().date_naive(),
            StatsTimezone::Utc => Utc::now().date_naive(),
            StatsTimezone::Fixed(offset) => Utc::now().with_timezone(offset).date_naive(),
        }
    }
}

impl FromStr for StatsTimezone {
    type Err = String;

    /// Accepts `local`, `utc` or an offset like `+05:30` / `-0800`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" | "" => Ok(StatsTimezone::Local),
            "utc" | "z" => Ok(StatsTimezone::Utc),
            _ => s
                .parse::<FixedOffset>()
                .map(StatsTimezone::Fixed)
                .map_err(|e| format!("expected local, utc or +HH:MM, got {s:?}: {e}")),
        }
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            server_addr: "127.0.0.1:0".to_string(),
            database_url: "sqlite::memory:".to_string(),
            db_max_connections: 1,
            rate_api_per_min: 0,
            api_prefix: "/api".to_string(),
            log_dir: "logs".to_string(),
            stats_timezone: StatsTimezone::Utc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_timezones() {
        assert_eq!("local".parse::<StatsTimezone>(), Ok(StatsTimezone::Local));
        assert_eq!("UTC".parse::<StatsTimezone>(), Ok(StatsTimezone::Utc));
    }

    #[test]
    fn parses_fixed_offsets() {
        let east = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        let west = FixedOffset::west_opt(8 * 3600).unwrap();
        assert_eq!("+05:30".parse::<StatsTimezone>(), Ok(StatsTimezone::Fixed(east)));
        assert_eq!("-0800".parse::<StatsTimezone>(), Ok(StatsTimezone::Fixed(west)));
    }

    #[test]
    fn rejects_garbage_timezones() {
        for raw in ["Europe/Paris", "+5", "+25:00", "05:30", "+ab:cd"] {
            assert!(raw.parse::<StatsTimezone>().is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn fixed_offset_today_tracks_utc_plus_offset() {
        let offset = FixedOffset::east_opt(14 * 3600).unwrap();
        let expected = Utc::now().with_timezone(&offset).date_naive();
        assert_eq!(StatsTimezone::Fixed(offset).today(), expected);
    }
}
