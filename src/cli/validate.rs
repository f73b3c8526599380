//! Validate command implementation

use anyhow::{Context, Result};

use lessons::Registry;
use lessons::catalog::Gate;

/// Build the built-in catalog and print its gating structure
pub fn validate_command() -> Result<()> {
    let registry = Registry::builtin().context("Built-in lesson catalog is invalid")?;

    println!(
        "Catalog OK: {} lessons in {} categories\n",
        registry.item_count(),
        registry.category_count()
    );

    for category in registry.categories() {
        let prerequisites: Vec<&str> = category
            .prerequisites()
            .iter()
            .map(|handle| registry.item(*handle).id.as_str())
            .collect();
        let gating = match category.gate() {
            Gate::Open => "always unlocked".to_string(),
            Gate::AllDone => format!("requires {}", prerequisites.join(", ")),
            Gate::FirstRoot => format!("opens when unlocked by {}", prerequisites.join(" or ")),
        };
        println!("  {} [{}]: {}", category.title, category.id, gating);
    }

    Ok(())
}
