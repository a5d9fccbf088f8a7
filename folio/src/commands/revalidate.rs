use anyhow::Context;
use folio_config::Config;
use folio_core_revalidate_contracts::RevalidateService;
use folio_di::Provide;

use crate::environment::{types::Revalidate, ConfigProvider, Provider};

/// Invalidate the blog section once, the same way `POST /api/revalidate` does.
pub async fn revalidate(config: Config) -> anyhow::Result<()> {
    let config_provider = ConfigProvider::new(&config)?;
    let mut provider = Provider::new(config_provider);
    let revalidate: Revalidate = provider.provide();

    let record = revalidate
        .revalidate()
        .await
        .context("Failed to revalidate blog")?;

    println!(
        "Created invalidation {} ({}) for {}",
        record.id,
        record.status,
        record.paths.join(", ")
    );

    Ok(())
}
