//! Error taxonomy.
//!
//! - `ConfigError` — невалидная конфигурация, fatal для init агента.
//! - `SetupError` — config + не привязанный collaborator (locomotion).
//!
//! Отсутствие tagged entity в мире ошибкой не является: `TagLookup` возвращает
//! `None`, и это трактуется как "нет кандидата" на текущем тике.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("waypoint set is empty: patrol has no destination")]
    EmptyWaypoints,

    #[error("view radius must be > 0 (got {0})")]
    NonPositiveViewRadius(f32),

    #[error("view angle must be in (0, 360] degrees (got {0})")]
    ViewAngleOutOfRange(f32),

    #[error("{what} must be > 0 (got {value})")]
    NonPositiveSpeed { what: &'static str, value: f32 },

    #[error("{what} must be >= 0 (got {value})")]
    NegativeValue { what: &'static str, value: f32 },

    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(&'static str),
}

pub type WardenResult<T> = Result<T, SetupError>;
