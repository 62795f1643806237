use std::{process, sync::Arc};

use credenza::{
    application::{content::ContentService, error::AppError},
    config,
    infra::{
        cache::RedisContentCache,
        error::InfraError,
        http::{self, ApiState},
        store::MongoContentStore,
        telemetry,
    },
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (_cli, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    let store_url = settings
        .store
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("store url is not configured"))
        .map_err(AppError::from)?;
    let cache_url = settings
        .cache
        .url
        .as_ref()
        .ok_or_else(|| InfraError::configuration("cache url is not configured"))
        .map_err(AppError::from)?;

    let store = MongoContentStore::connect(store_url, &settings.store.database)
        .await
        .map_err(|err| AppError::from(InfraError::store(err.to_string())))?;
    store
        .health_check()
        .await
        .map_err(|err| AppError::from(InfraError::store(err.to_string())))?;
    info!(database = %settings.store.database, "connected to document store");

    let cache = RedisContentCache::connect(cache_url)
        .await
        .map_err(|err| AppError::from(InfraError::cache(err.to_string())))?;
    cache
        .health_check()
        .await
        .map_err(|err| AppError::from(InfraError::cache(err.to_string())))?;
    info!("connected to cache store");

    let contents = ContentService::new(Arc::new(store), Arc::new(cache));
    let router = http::build_router(ApiState { contents });

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(addr = %settings.server.addr, "serving content API");

    axum::serve(listener, router.into_make_service())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    Ok(())
}
