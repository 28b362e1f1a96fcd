use anyhow::Result;
use veil_config::Config;
use veil_security::Masker;

use crate::cli::{CategoryArgs, InputArgs};
use crate::commands::{read_input, settings_for};

pub async fn handle(
    input: InputArgs,
    filter: CategoryArgs,
    json: bool,
    config: &Config,
) -> Result<()> {
    let text = read_input(&input)?;
    let settings = settings_for(&config.settings, &filter);

    let result = Masker::builtin().mask_secrets(
        &text,
        Some(&settings.categories),
        &settings.custom_patterns,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", result.masked);
        if !result.masked.ends_with('\n') {
            println!();
        }
        if result.replacements > 0 {
            eprintln!("✓ Masked {} secret(s)", result.replacements);
        }
    }

    Ok(())
}
