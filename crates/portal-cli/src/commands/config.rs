use anyhow::{Context, Result};
use colored::Colorize;
use portal_core::PortalConfig;
use portal_infrastructure::ConfigService;

pub fn show(service: &ConfigService, effective: &PortalConfig) -> Result<()> {
    let rendered =
        toml::to_string_pretty(effective).context("Failed to render configuration as TOML")?;
    println!("{} {}", "# file:".bright_black(), service.path().display());
    print!("{rendered}");
    Ok(())
}

pub fn set(service: &ConfigService, key: &str, value: &str) -> Result<()> {
    service.set(key, value)?;
    println!("{} {key} = {value}", "✓".green());
    Ok(())
}

pub fn init(service: &ConfigService) -> Result<()> {
    service.ensure_file()?;
    println!("{} {}", "✓ Configuration at".green(), service.path().display());
    Ok(())
}
