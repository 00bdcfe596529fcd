use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::api::services::MediaContext;
use crate::config::get_config;
use crate::services::{CatalogService, CatalogSettings, ImportService};
use crate::storage::{SeaOrmStorage, StorageFactory};

pub struct StartupContext {
    pub storage: Arc<SeaOrmStorage>,
    pub catalog: Arc<CatalogService>,
    pub import: Arc<ImportService>,
    pub media: MediaContext,
    pub route_config: RouteConfig,
}

#[derive(Clone, Debug)]
pub struct RouteConfig {
    pub route_prefix: String,
    pub health_prefix: String,
}

/// 准备运行上下文（存储、服务、路由配置），Server 与 CLI 共用
pub async fn prepare_startup() -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let storage = StorageFactory::create()
        .await
        .context("Failed to create storage backend")?;
    info!("Using storage backend: {}", storage.backend_name());

    let config = get_config();
    let settings = CatalogSettings::from_config(&config.api);
    let catalog = Arc::new(CatalogService::new(storage.clone(), settings));
    let import = Arc::new(ImportService::new(storage.clone()));

    let route_config = RouteConfig {
        route_prefix: config.api.route_prefix.clone(),
        health_prefix: config.api.health_prefix.clone(),
    };

    debug!(
        "Pre-startup completed in {} ms (page size {}..{}, autocomplete limit {})",
        start_time.elapsed().as_millis(),
        settings.default_page_size,
        settings.max_page_size,
        settings.autocomplete_limit
    );

    Ok(StartupContext {
        storage,
        catalog,
        import,
        media: MediaContext::from_config(&config.api),
        route_config,
    })
}
