//! Implementation of the `pubdeck search` command.

use anyhow::{Context, Result};
use pubdeck_core::RegistryClient;

/// Print package-name suggestions for a query, best match first.
pub fn search_packages(query: &str) -> Result<()> {
    let client = RegistryClient::new()?;
    let results = client
        .search(query)
        .with_context(|| format!("Failed to search for '{query}'"))?;

    if results.is_empty() {
        println!("No packages found for '{query}'");
        return Ok(());
    }
    for name in results {
        println!("{name}");
    }
    Ok(())
}
