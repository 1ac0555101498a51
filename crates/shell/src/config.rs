use config::ConfigError;
use serde::Deserialize;
use session::SessionConfig;
use std::collections::HashMap;
use storage::StoreConfig;

const ENV_PREFIX: &str = "LATENT_";

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub user: UserSettings,
    pub seed: SeedSettings,
    pub session: SessionSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct UserSettings {
    pub name: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SeedSettings {
    pub rng_seed: Option<u64>,
    pub comment_threshold: f64,
    pub vote_floor: i64,
    pub vote_span: i64,
}

#[derive(Deserialize, Clone, Debug)]
pub struct SessionSettings {
    pub command_buffer: usize,
    pub event_buffer: usize,
    pub max_attachment_bytes: usize,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        Self::build(&run_mode, collect_env_vars())
    }

    fn build(run_mode: &str, env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let env_json = serde_json::to_string(&env_map)
            .map_err(|e| ConfigError::Message(format!("environment does not serialize: {}", e)))?;

        let s = config::Config::builder()
            .set_default("user.name", "guest_user")?
            .set_default("seed.comment_threshold", 0.8)?
            .set_default("seed.vote_floor", 10)?
            .set_default("seed.vote_span", 500)?
            .set_default("session.command_buffer", 100)?
            .set_default("session.event_buffer", 100)?
            .set_default("session.max_attachment_bytes", 10 * 1024 * 1024)?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(&env_json, config::FileFormat::Json))
            .build()?;

        s.try_deserialize()
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            local_user: self.user.name.clone(),
            rng_seed: self.seed.rng_seed,
            comment_threshold: self.seed.comment_threshold,
            vote_floor: self.seed.vote_floor,
            vote_span: self.seed.vote_span,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            command_buffer: self.session.command_buffer.max(1),
            event_buffer: self.session.event_buffer.max(1),
            max_attachment_bytes: self.session.max_attachment_bytes,
        }
    }
}

fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with(ENV_PREFIX))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches(ENV_PREFIX)
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::build("test", HashMap::new()).unwrap();
        assert_eq!(s.user.name, "guest_user");
        assert!(s.seed.rng_seed.is_none());
        assert_eq!(s.store_config().vote_floor, 10);
        assert_eq!(s.session_config().command_buffer, 100);
    }

    #[test]
    fn test_env_overrides() {
        let env = HashMap::from([
            ("user.name".to_string(), "ferris".to_string()),
            ("seed.rng_seed".to_string(), "42".to_string()),
            ("session.event_buffer".to_string(), "0".to_string()),
        ]);
        let s = Settings::build("test", env).unwrap();
        assert_eq!(s.store_config().local_user, "ferris");
        assert_eq!(s.store_config().rng_seed, Some(42));
        assert_eq!(s.session_config().event_buffer, 1);
    }
}
