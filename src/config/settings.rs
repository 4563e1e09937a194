use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub database_path: String,
    pub change_buffer: usize,
    pub poll_interval_ms: u64,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            database_path: "padel_journal.db".to_string(),
            change_buffer: 64,
            poll_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub recent_limit: usize,
    pub deletion_window_days: i64,
    pub command_buffer: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            recent_limit: 5,
            deletion_window_days: 3,
            command_buffer: 32,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationSettings {
    pub min_name_length: usize,
    pub min_duration_minutes: u32,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            min_name_length: 2,
            min_duration_minutes: 60,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreSettings,
    pub session: SessionSettings,
    pub validation: ValidationSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            store: StoreSettings::default(),
            session: SessionSettings::default(),
            validation: ValidationSettings::default(),
        }
    }

    /// Defaults overridden by environment variables, when set and readable
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(path) = std::env::var("DATABASE_PATH") {
            config.store.database_path = path;
        }
        override_from_env("PADEL_POLL_INTERVAL_MS", &mut config.store.poll_interval_ms);
        override_from_env(
            "PADEL_DELETION_WINDOW_DAYS",
            &mut config.session.deletion_window_days,
        );
        override_from_env("PADEL_RECENT_LIMIT", &mut config.session.recent_limit);

        config
    }
}

fn override_from_env<T: FromStr>(key: &str, target: &mut T) {
    let Ok(raw) = std::env::var(key) else {
        return;
    };

    match raw.parse() {
        Ok(value) => *target = value,
        Err(_) => log::warn!("Ignoring {}={:?}: not a valid value", key, raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.store.database_path, "padel_journal.db");
        assert_eq!(config.session.deletion_window_days, 3);
        assert_eq!(config.session.recent_limit, 5);
        assert_eq!(config.validation.min_duration_minutes, 60);
    }

    #[test]
    fn test_unset_variable_keeps_value() {
        let mut limit = 7usize;
        override_from_env("PADEL_TEST_VARIABLE_THAT_IS_NEVER_SET", &mut limit);
        assert_eq!(limit, 7);
    }
}
