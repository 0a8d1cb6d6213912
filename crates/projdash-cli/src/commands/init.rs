use anyhow::{bail, Result};

use projdash_core::AppConfig;

pub fn run(config: &AppConfig, force: bool) -> Result<()> {
    let config_path = AppConfig::config_path();

    if config_path.exists() && !force {
        bail!(
            "Config file already exists at {}\nUse --force to overwrite it.",
            config_path.display()
        );
    }

    AppConfig::default().save()?;
    println!("Wrote default config to {}", config_path.display());

    let projects_path = config.projects_path();
    if !projects_path.exists() {
        println!("\nPlace your projects JSON at:");
        println!("  {}", projects_path.display());
    }

    Ok(())
}
