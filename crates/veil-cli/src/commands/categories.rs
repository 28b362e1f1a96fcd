use anyhow::Result;
use veil_config::Config;
use veil_core::Category;
use veil_security::Catalogue;

pub async fn handle(config: &Config) -> Result<()> {
    let settings = &config.settings;
    let catalogue = Catalogue::builtin();

    println!("Categories:");
    for category in Category::builtin() {
        let state = if settings.categories.is_enabled(category) {
            "on"
        } else {
            "off"
        };
        let default = if category.is_opt_in() { " (opt-in)" } else { "" };
        println!(
            "  {:<14} {:<4} {} rules{}",
            category,
            state,
            catalogue.rules_for(category).count(),
            default
        );
    }

    let mut custom: Vec<&Category> = settings
        .custom_patterns
        .iter()
        .map(|p| &p.category)
        .filter(|c| !c.is_builtin())
        .collect();
    custom.sort();
    custom.dedup();

    for category in custom {
        let state = if settings.categories.is_enabled(category) {
            "on"
        } else {
            "off"
        };
        let rules = settings
            .custom_patterns
            .iter()
            .filter(|p| &p.category == category)
            .count();
        println!("  {:<14} {:<4} {} rules (custom)", category, state, rules);
    }

    Ok(())
}
