use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::{anyhow, bail, Context};

/// Longest token lifetime accepted from the environment (one year).
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(366 * 24 * 60 * 60);

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub audience: String,
    pub ttl: Duration,
}

/// Sizing for the shared Postgres pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_idle: u32,
    pub max_open: u32,
    pub max_lifetime: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub request_timeout: Duration,
    pub pool: PoolConfig,
    pub listen_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Every required value
    /// must be present and parseable.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Lookup(lookup);

        let database_url = env.required("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: env.required("JWT_SECRET")?,
            audience: env.optional("JWT_AUDIENCE").unwrap_or_else(|| "users".into()),
            ttl: Duration::from_secs(env.parsed::<u64>("TOKEN_EXPIRY_SECONDS")?),
        };
        let request_timeout = Duration::from_millis(env.parsed::<u64>("CONTEXT_TIMEOUT_MS")?);
        let pool = PoolConfig {
            max_idle: env.parsed("DB_MAX_IDLE_CONNECTIONS")?,
            max_open: env.parsed("DB_MAX_OPEN_CONNECTIONS")?,
            max_lifetime: Duration::from_secs(
                env.parsed::<u64>("DB_CONNECTION_LIFETIME_MINUTES")?
                    .checked_mul(60)
                    .context("DB_CONNECTION_LIFETIME_MINUTES is too large")?,
            ),
        };

        let listen_addr = format!(
            "{}:{}",
            env.optional("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            env.optional("APP_PORT").unwrap_or_else(|| "8080".into())
        )
        .parse()
        .context("APP_HOST/APP_PORT do not form a socket address")?;

        let config = Self {
            database_url,
            jwt,
            request_timeout,
            pool,
            listen_addr,
        };
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.jwt.ttl.is_zero() {
            bail!("TOKEN_EXPIRY_SECONDS must be greater than zero");
        }
        if self.jwt.ttl > MAX_TOKEN_TTL {
            bail!(
                "TOKEN_EXPIRY_SECONDS may not exceed {}",
                MAX_TOKEN_TTL.as_secs()
            );
        }
        if self.request_timeout.is_zero() {
            bail!("CONTEXT_TIMEOUT_MS must be greater than zero");
        }
        if self.pool.max_open == 0 {
            bail!("DB_MAX_OPEN_CONNECTIONS must be greater than zero");
        }
        if self.pool.max_idle > self.pool.max_open {
            bail!("DB_MAX_IDLE_CONNECTIONS may not exceed DB_MAX_OPEN_CONNECTIONS");
        }
        if self.pool.max_lifetime.is_zero() {
            bail!("DB_CONNECTION_LIFETIME_MINUTES must be greater than zero");
        }
        Ok(())
    }
}

struct Lookup<F>(F);

impl<F> Lookup<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn required(&self, key: &str) -> anyhow::Result<String> {
        self.optional(key).ok_or_else(|| anyhow!("{key} not set"))
    }

    fn parsed<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let raw = self.required(key)?;
        raw.trim()
            .parse::<T>()
            .with_context(|| format!("invalid {key}: {raw:?}"))
    }
}
