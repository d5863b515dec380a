//! Check command implementation
//!
//! Validates the resolved configuration and prints it.

use clap::ValueEnum;
use tracing::info;

use crate::config::CliConfig;
use crate::model::SabrModel;
use crate::Result;

/// How `check` prints the resolved configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConfigFormat {
    #[default]
    Toml,
    Json,
}

/// Render the configuration after validating it end to end.
pub fn render(config: &CliConfig, format: ConfigFormat) -> Result<String> {
    config.validate()?;
    let model = SabrModel::from_config(config)?;
    info!(kind = %model.kind(), sigma = model.sigma(), "Configuration is valid");

    let text = match format {
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
    };
    Ok(text)
}

/// Run the check command
pub fn run(config: &CliConfig, format: ConfigFormat) -> Result<()> {
    println!("{}", render(config, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_render_default_toml() {
        let text = render(&CliConfig::default(), ConfigFormat::Toml).unwrap();
        assert!(text.contains("[model]"));
        assert!(text.contains("[solver]"));
        assert!(text.contains("max_iterations = 100"));
    }

    #[test]
    fn test_render_json() {
        let text = render(&CliConfig::default(), ConfigFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["model"]["kind"], "lognormal");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = CliConfig::default();
        config.model.beta = 1.5;
        assert!(matches!(
            render(&config, ConfigFormat::Toml),
            Err(CliError::Config(_))
        ));
    }
}
