//! Gateway configuration
//!
//! Defaults are layered under `FAIRPRICE_`-prefixed environment variables
//! (nested keys use `__`, e.g. `FAIRPRICE_RATE_LIMIT__BURST`). A bare `PORT`
//! variable overrides the port last, for hosting platforms that inject it.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment};
use fairprice_engine::{BlendWeights, EngineConfig};
use serde::{Deserialize, Serialize};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "FAIRPRICE";

/// Gateway service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Service host
    pub host: String,
    /// Service port
    pub port: u16,
    /// Log output format
    pub log_format: LogFormat,
    /// CORS configuration
    pub cors: CorsSettings,
    /// Per-client rate limiting
    pub rate_limit: RateLimitSettings,
    /// Cost/market blend handed to the engine
    pub weights: BlendWeights,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_format: LogFormat::Json,
            cors: CorsSettings::default(),
            rate_limit: RateLimitSettings::default(),
            weights: BlendWeights::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from `.env`, the process environment, and `PORT`
    pub fn load() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::build(Self::environment(), std::env::var("PORT").ok())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("cors.allowed_origins")
            .try_parsing(true)
    }

    fn build(env: Environment, port: Option<String>) -> Result<Self> {
        let cfg = Config::builder()
            .add_source(Config::try_from(&Self::default()).context("encoding defaults")?)
            .add_source(env)
            .set_override_option("port", port)
            .context("applying PORT override")?
            .build()
            .context("reading configuration")?;

        let cfg: Self = cfg
            .try_deserialize()
            .context("invalid gateway configuration")?;
        cfg.rate_limit.check()?;
        Ok(cfg)
    }

    /// Socket address to bind
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            weights: self.weights,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Json,
    Pretty,
}

/// CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    /// Allowed browser origins; `*` allows any origin without credentials
    pub allowed_origins: Vec<String>,
    /// Whether cookies and auth headers may be sent
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds
    pub max_age_secs: u64,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            allow_credentials: true,
            max_age_secs: 12 * 60 * 60,
        }
    }
}

/// Token bucket settings, one bucket per client IP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitSettings {
    /// Steady refill rate
    pub requests_per_second: f64,
    /// Bucket capacity
    pub burst: u32,
    /// Clients unseen for this long are forgotten
    pub idle_ttl_secs: u64,
    /// How often idle clients are swept
    pub sweep_interval_secs: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            requests_per_second: 1.0,
            burst: 5,
            idle_ttl_secs: 3 * 60,
            sweep_interval_secs: 60,
        }
    }
}

impl RateLimitSettings {
    pub fn idle_ttl(&self) -> Duration {
        Duration::from_secs(self.idle_ttl_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    fn check(&self) -> Result<()> {
        anyhow::ensure!(
            self.requests_per_second.is_finite() && self.requests_per_second > 0.0,
            "rate_limit.requests_per_second must be positive, got {}",
            self.requests_per_second
        );
        anyhow::ensure!(self.burst > 0, "rate_limit.burst must be at least 1");
        anyhow::ensure!(
            self.sweep_interval_secs > 0,
            "rate_limit.sweep_interval_secs must be at least 1"
        );
        Ok(())
    }
}
