use anyhow::Context;
use chrono::Duration;

/// Signing secret used when `JWT_SECRET` is not set. Development only.
pub const DEV_JWT_SECRET: &str = "dev-secret";

pub const DEFAULT_TOKEN_TTL_MINUTES: i64 = 30;

/// Process-wide service settings, loaded once at startup.
#[derive(Clone)]
pub struct ServiceConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
}

impl ServiceConfig {
    pub fn new(jwt_secret: impl Into<String>, token_ttl: Duration) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl,
        }
    }

    /// Read `JWT_SECRET` and `JWT_TTL_MINUTES` from the environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEV_JWT_SECRET.to_string()
        });

        let token_ttl = match lookup("JWT_TTL_MINUTES") {
            Some(raw) => parse_ttl_minutes(&raw)?,
            None => Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES),
        };

        Ok(Self::new(jwt_secret, token_ttl))
    }
}

fn parse_ttl_minutes(raw: &str) -> anyhow::Result<Duration> {
    let minutes: i64 = raw
        .trim()
        .parse()
        .with_context(|| format!("JWT_TTL_MINUTES must be a whole number of minutes, got '{raw}'"))?;
    if minutes <= 0 {
        anyhow::bail!("JWT_TTL_MINUTES must be positive, got {minutes}");
    }
    Duration::try_minutes(minutes)
        .with_context(|| format!("JWT_TTL_MINUTES is out of range, got {minutes}"))
}

impl core::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
