use folio_config::Config;
use folio_di::Provide;
use tracing::info;

use crate::environment::{types::RestServer, ConfigProvider, Provider};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let config_provider = ConfigProvider::new(&config)?;
    if !config_provider.revalidation_enabled() {
        info!("No CDN distribution configured, revalidation requests will be refused");
    }

    let mut provider = Provider::new(config_provider);
    let server: RestServer = provider.provide();
    server.serve().await
}
