use std::{env, time::Duration};

use crate::error::TransportError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_KEY_VARS: &[&str] = &["API_KEY", "GEMINI_API_KEY"];

/// Where the API key comes from.
#[derive(Clone, Debug)]
pub enum CredentialSource {
    /// Read the first set variable on every call. Nothing is cached, so a key
    /// added to the environment after startup is picked up by the next call.
    Environment(Vec<String>),
    /// A key supplied up front.
    Fixed(String),
}

impl Default for CredentialSource {
    fn default() -> Self {
        CredentialSource::Environment(DEFAULT_KEY_VARS.iter().map(|v| v.to_string()).collect())
    }
}

impl CredentialSource {
    pub fn resolve(&self) -> Result<String, TransportError> {
        match self {
            CredentialSource::Fixed(key) if !key.trim().is_empty() => Ok(key.clone()),
            CredentialSource::Fixed(_) => {
                Err(TransportError::MissingCredential("configuration".to_string()))
            }
            CredentialSource::Environment(vars) => vars
                .iter()
                .filter_map(|name| env::var(name).ok())
                .find(|value| !value.trim().is_empty())
                .ok_or_else(|| TransportError::MissingCredential(vars.join(", "))),
        }
    }
}

/// Bounded retry for transient transport failures.
///
/// Disabled by default: every operation is a single exchange.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::disabled()
    }
}

impl RetryPolicy {
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(8),
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Backoff before retry number `attempt` (1-based), without jitter.
    pub fn backoff(&self, attempt: usize) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Settings shared by every call a [`TravelAssistant`](crate::TravelAssistant) makes.
#[derive(Clone, Debug)]
pub struct AssistantConfig {
    pub model: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub retry: RetryPolicy,
    pub credentials: CredentialSource,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            retry: RetryPolicy::default(),
            credentials: CredentialSource::default(),
        }
    }
}

impl AssistantConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `SAFAR_MODEL`, `SAFAR_BASE_URL`,
    /// `SAFAR_TIMEOUT_SECS` and `SAFAR_MAX_RETRIES`. The API key itself stays
    /// in the environment and is looked up per call.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(model) = env::var("SAFAR_MODEL") {
            config.model = model;
        }
        if let Ok(base_url) = env::var("SAFAR_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(secs) = env::var("SAFAR_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
        {
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(retries) = env::var("SAFAR_MAX_RETRIES")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
        {
            config.retry.max_retries = retries;
        }

        config
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.credentials = CredentialSource::Fixed(api_key.into());
        self
    }

    pub fn with_key_variables<I, S>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.credentials = CredentialSource::Environment(vars.into_iter().map(Into::into).collect());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_key_resolves() {
        let source = CredentialSource::Fixed("abc".to_string());
        assert_eq!(source.resolve().unwrap(), "abc");
    }

    #[test]
    fn blank_fixed_key_is_missing() {
        let source = CredentialSource::Fixed("  ".to_string());
        assert!(matches!(
            source.resolve(),
            Err(TransportError::MissingCredential(_))
        ));
    }

    #[test]
    fn environment_key_read_at_resolve_time() {
        let var = "SAFAR_TEST_KEY_RESOLVE_AT_CALL";
        let source = CredentialSource::Environment(vec![var.to_string()]);

        env::remove_var(var);
        assert!(source.resolve().is_err());

        env::set_var(var, "late-key");
        assert_eq!(source.resolve().unwrap(), "late-key");
        env::remove_var(var);
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy::disabled().with_base_delay(Duration::from_millis(100));
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
        assert_eq!(policy.backoff(30), Duration::from_secs(8));
    }

    #[test]
    fn defaults_match_reference_behavior() {
        let config = AssistantConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert!(config.timeout.is_none());
        assert_eq!(config.retry.max_retries, 0);
    }
}
