pub mod categories;
pub mod completions;
pub mod config;
pub mod mask;
pub mod scan;
pub mod session;

use std::io::Read;

use anyhow::{Context, Result};
use veil_core::{Category, Settings};

use crate::cli::{CategoryArgs, InputArgs};

/// Read the whole input file, or stdin when no file was given
pub fn read_input(input: &InputArgs) -> Result<String> {
    match &input.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Configured settings with the per-run category overrides applied
pub fn settings_for(base: &Settings, filter: &CategoryArgs) -> Settings {
    let mut settings = base.clone();
    for name in &filter.enable {
        settings.categories.set(Category::from(name.as_str()), true);
    }
    for name in &filter.disable {
        settings.categories.set(Category::from(name.as_str()), false);
    }
    settings
}
