//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated
//! configuration.

use spot_rush::{GameSettings, constants};
use std::net::SocketAddr;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Prometheus scrape address; metrics are disabled when unset
    pub metrics_bind: Option<SocketAddr>,
    /// Room defaults configuration
    pub game: GameDefaultsConfig,
}

/// Default room configuration
#[derive(Debug, Clone)]
pub struct GameDefaultsConfig {
    /// Maximum players per room
    pub max_players: usize,
    /// Cards kept on the grid
    pub grid_capacity: usize,
    /// Points per accepted match
    pub match_reward: u32,
    /// Deck order (must be prime)
    pub order: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables, with CLI overrides
    /// taking precedence.
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        metrics_override: Option<SocketAddr>,
    ) -> Self {
        let bind = bind_override
            .or_else(|| {
                std::env::var("SERVER_BIND")
                    .ok()
                    .and_then(|s| s.parse().ok())
            })
            .unwrap_or_else(|| {
                "127.0.0.1:7171"
                    .parse()
                    .expect("Default bind address is valid")
            });

        let metrics_bind = metrics_override.or_else(|| {
            std::env::var("METRICS_BIND")
                .ok()
                .and_then(|s| s.parse().ok())
        });

        let game = GameDefaultsConfig {
            max_players: parse_env_or("ROOM_MAX_PLAYERS", constants::DEFAULT_MAX_PLAYERS),
            grid_capacity: parse_env_or("ROOM_GRID_CAPACITY", constants::DEFAULT_GRID_CAPACITY),
            match_reward: parse_env_or("ROOM_MATCH_REWARD", constants::DEFAULT_MATCH_REWARD),
            order: parse_env_or("ROOM_ORDER", constants::DEFAULT_ORDER),
        };

        ServerConfig {
            bind,
            metrics_bind,
            game,
        }
    }

    /// Validate configuration after loading.
    ///
    /// # Errors
    ///
    /// Returns an error if the room defaults could not run a game (non-prime
    /// order, alphabet too small for the order, unusable grid or player cap).
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game
            .to_settings()
            .validate()
            .map_err(|e| ConfigError::Invalid {
                var: "ROOM_*".to_string(),
                reason: e.to_string(),
            })
    }
}

impl GameDefaultsConfig {
    /// Materialize the library settings these defaults describe.
    pub fn to_settings(&self) -> GameSettings {
        GameSettings {
            order: self.order,
            alphabet: constants::EMOJI_SYMBOLS,
            grid_capacity: self.grid_capacity,
            max_players: self.max_players,
            match_reward: self.match_reward,
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
