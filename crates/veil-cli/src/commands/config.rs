use std::path::Path;

use anyhow::Result;
use veil_config::Config;

pub async fn handle(path_only: bool, config: &Config, path: &Path) -> Result<()> {
    if path_only {
        println!("{}", path.display());
        return Ok(());
    }

    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
