use std::{env, fs, path::PathBuf};

use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::deskwm::{builtin_apps, AppDefinition, GeometryPolicy, Screen, WindowRegistry};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to read config: {0}")]
    UnableToReadConfig(PathBuf),
    #[error("invalid toml file: {0}")]
    TomlSyntaxError(String),
    #[error("$HOME is not defined")]
    HomeNotDefined,
}

/// Everything is optional, a missing key takes the default below.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub screen_width: i32,
    pub screen_height: i32,
    pub min_window_width: i32,
    pub min_window_height: i32,
    pub min_visible_margin: i32,
    pub taskbar_reserved_height: i32,
    pub initial_z_index: u64,
    pub placement: String,
    pub log_level: String,
    pub log_file: String,
    pub apps: Vec<AppDefinition>,
}

impl Default for Config {
    fn default() -> Self {
        let policy = GeometryPolicy::default();
        Self {
            screen_width: 1920,
            screen_height: 1080,
            min_window_width: policy.min_width,
            min_window_height: policy.min_height,
            min_visible_margin: policy.min_visible_margin,
            taskbar_reserved_height: 48,
            initial_z_index: 1000,
            placement: String::from("cascade"),
            log_level: String::from("info"),
            log_file: String::from("deskwm.log"),
            apps: builtin_apps(),
        }
    }
}

impl Config {
    pub fn geometry_policy(&self) -> GeometryPolicy {
        GeometryPolicy {
            min_width: self.min_window_width,
            min_height: self.min_window_height,
            min_visible_margin: self.min_visible_margin,
        }
    }

    pub fn screen(&self) -> Screen {
        Screen::new_screen(
            self.screen_width,
            self.screen_height,
            self.taskbar_reserved_height,
        )
    }

    /// A fresh, empty registry set up with these options.
    pub fn registry(&self) -> WindowRegistry {
        WindowRegistry::new(self.screen(), self.geometry_policy(), self.initial_z_index)
    }
}

pub fn config_path() -> Result<PathBuf, ConfigError> {
    let home_dir = match env::var("HOME") {
        Ok(home_dir) => home_dir,
        Err(_e) => return Err(ConfigError::HomeNotDefined),
    };

    Ok([home_dir.as_str(), ".config", "deskwm", "deskwm.toml"]
        .iter()
        .collect())
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::TomlSyntaxError(e.to_string()))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = config_path()?;
    let config_content = fs::read_to_string(config_path.clone())
        .map_err(|_| ConfigError::UnableToReadConfig(config_path))?;

    let config = parse_config(&config_content)?;
    info!("config loaded !");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deskwm::ContentRef;

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.min_window_width, 300);
        assert_eq!(config.min_window_height, 200);
        assert_eq!(config.min_visible_margin, 50);
        assert_eq!(config.taskbar_reserved_height, 48);
        assert_eq!(config.initial_z_index, 1000);
        assert_eq!(config.apps.len(), 5);
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = parse_config(
            r#"
            screen_width = 1280
            min_window_width = 200
            placement = "center"
            "#,
        )
        .unwrap();
        assert_eq!(config.screen_width, 1280);
        assert_eq!(config.screen_height, 1080);
        assert_eq!(config.geometry_policy().min_width, 200);
        assert_eq!(config.geometry_policy().min_height, 200);
        assert_eq!(config.placement, "center");
    }

    #[test]
    fn apps_table_replaces_builtin_list() {
        let config = parse_config(
            r#"
            [[apps]]
            id = "paint"
            title = "Paint"
            content = "paint"
            default_width = 640
            default_height = 480
            closable = false
            "#,
        )
        .unwrap();
        assert_eq!(config.apps.len(), 1);
        let paint = &config.apps[0];
        assert_eq!(paint.content, ContentRef::Other("paint".into()));
        assert!(paint.resizable);
        assert!(!paint.closable);
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = parse_config("screen_width = ").unwrap_err();
        assert!(matches!(err, ConfigError::TomlSyntaxError(_)));
    }

    #[test]
    fn registry_uses_configured_base_z_index() {
        let config = parse_config("initial_z_index = 5").unwrap();
        let mut registry = config.registry();
        let id = registry.create_window(crate::deskwm::WindowSpec::new(
            "a",
            ContentRef::Settings,
            crate::deskwm::Position { x: 0, y: 0 },
            crate::deskwm::Size { width: 400, height: 300 },
        ));
        assert_eq!(registry.get_window(id).unwrap().z_index, 5);
    }
}
