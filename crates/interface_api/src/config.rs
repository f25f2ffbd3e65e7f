//! API configuration

use serde::Deserialize;
use std::time::Duration;

use core_kernel::{AccessPolicy, Money, Principal};
use domain_claims::DeskSettings;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Log level
    pub log_level: String,
    /// Principal allowed to run administrative operations
    pub administrator: String,
    /// Maximum votes a verification session accepts
    pub max_votes_per_claim: u32,
    /// Maximum claim description length, in characters
    pub max_description_len: usize,
    /// Comma-separated verifier principals; unset means any non-claimant may vote
    pub verifier_allow_list: Option<String>,
    /// Move the claim as soon as its verification resolves
    pub auto_apply_resolution: bool,
    /// Capital placed in the premium pool at startup, in minor units
    pub treasury_opening_balance: u64,
    /// Wall-clock seconds per billing-calendar tick
    pub billing_tick_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let desk = DeskSettings::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            log_level: "info".to_string(),
            administrator: "admin".to_string(),
            max_votes_per_claim: desk.max_votes,
            max_description_len: desk.max_description_len,
            verifier_allow_list: None,
            auto_apply_resolution: desk.auto_apply_resolution,
            treasury_opening_balance: 0,
            billing_tick_secs: 86_400,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn desk_settings(&self) -> DeskSettings {
        DeskSettings {
            max_description_len: self.max_description_len,
            max_votes: self.max_votes_per_claim,
            auto_apply_resolution: self.auto_apply_resolution,
        }
    }

    /// Builds the access policy from the administrator and allow-list settings
    pub fn access_policy(&self) -> AccessPolicy {
        let policy = AccessPolicy::new(Principal::new(self.administrator.trim()));
        match self.verifier_allow_list.as_deref() {
            Some(list) => policy.with_verifier_allow_list(
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(Principal::from),
            ),
            None => policy,
        }
    }

    pub fn treasury_opening_balance(&self) -> Money {
        Money::from_minor(self.treasury_opening_balance)
    }

    /// Returns the billing tick length, never shorter than one second
    pub fn billing_tick(&self) -> Duration {
        Duration::from_secs(self.billing_tick_secs.max(1))
    }
}
