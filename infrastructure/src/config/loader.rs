//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["orchestra.toml", ".orchestra.toml"];

/// Prefix of environment overrides
const ENV_PREFIX: &str = "ORCHESTRA_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (`ORCHESTRA_ORCHESTRATOR__POLICY=fail_fast`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./orchestra.toml` or `./.orchestra.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/context-orchestra/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        if let Some(path) = config_path
            && !path.exists()
        {
            let message = format!("config file not found: {}", path.display());
            return Err(Box::new(figment::Error::from(message)));
        }
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns `$XDG_CONFIG_HOME/context-orchestra/config.toml` if set,
    /// otherwise the platform config directory.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("context-orchestra").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(config_path: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] Environment: {}<SECTION>__<KEY>", ENV_PREFIX);

        if let Some(path) = config_path {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:5}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./orchestra.toml or ./.orchestra.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use orchestra_domain::FailurePolicy;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.providers.is_empty());
        assert_eq!(config.strategy.kind, "concat");
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("context-orchestra"));
    }

    #[test]
    fn test_project_file_is_merged() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "orchestra.toml",
                r#"
[orchestrator]
policy = "fail_fast"

[[providers]]
kind = "memory"
name = "scratch"
"#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.orchestrator.parse_policy().0, FailurePolicy::FailFast);
            assert_eq!(config.providers.len(), 1);
            // untouched sections keep their defaults
            assert_eq!(config.strategy.collision, "last_wins");
            Ok(())
        });
    }

    #[test]
    fn test_explicit_path_overrides_project_file() {
        Jail::expect_with(|jail| {
            jail.create_file("orchestra.toml", "[strategy]\nkind = \"dictionary\"\n")?;
            jail.create_file("custom.toml", "[strategy]\nkind = \"source_keyed\"\n")?;

            let config = ConfigLoader::load(Some(Path::new("custom.toml"))).map_err(|e| *e)?;
            assert_eq!(config.strategy.kind, "source_keyed");
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        Jail::expect_with(|_jail| {
            assert!(ConfigLoader::load(Some(Path::new("missing.toml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        Jail::expect_with(|jail| {
            jail.create_file("orchestra.toml", "[orchestrator]\ntimeout_ms = 100\n")?;
            jail.set_env("ORCHESTRA_ORCHESTRATOR__TIMEOUT_MS", "750");
            jail.set_env("ORCHESTRA_OUTPUT__COLOR", "false");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.orchestrator.timeout_ms, Some(750));
            assert!(!config.output.color);
            Ok(())
        });
    }
}
