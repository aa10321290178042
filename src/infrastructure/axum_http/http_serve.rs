use crate::{
    config::config_model::DotEnvyConfig,
    infrastructure::{
        axum_http::{auth::JwtKeys, default_routers, routers},
        postgres::postgres_connection::PgPoolSquad,
        revalidation::BroadcastRevalidator,
        storage::local_disk::{LocalDiskConfig, LocalDiskStore},
    },
};
use anyhow::Result;
use axum::{
    Extension, Router,
    http::{
        Method, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info, warn};

pub fn app(config: &DotEnvyConfig, db_pool: Arc<PgPoolSquad>) -> Result<Router> {
    let revalidator = Arc::new(BroadcastRevalidator::new());
    let file_store = Arc::new(LocalDiskStore::new(LocalDiskConfig {
        root: config.uploads.dir.clone(),
        url_prefix: config.uploads.url_prefix.clone(),
    }));

    let app = Router::new()
        .fallback(default_routers::not_found)
        .nest(
            "/api/v1/invoices",
            routers::invoices::routes(Arc::clone(&db_pool), Arc::clone(&revalidator)),
        )
        .nest(
            "/api/v1/reviews",
            routers::reviews::routes(Arc::clone(&db_pool), file_store, Arc::clone(&revalidator)),
        )
        .nest(
            "/api/v1/customers",
            routers::customers::routes(Arc::clone(&db_pool)),
        )
        .nest(
            "/api/v1/auth",
            routers::auth::routes(Arc::clone(&db_pool), &config.auth),
        )
        .nest(
            "/api/v1/revalidations",
            routers::revalidations::routes(revalidator),
        )
        .route("/api/v1/health-check", get(default_routers::health_check))
        .nest_service(
            &config.uploads.url_prefix,
            ServeDir::new(&config.uploads.dir),
        )
        .layer(Extension(Arc::new(JwtKeys::new(&config.auth.jwt_secret))))
        .layer(timeout_layer(Duration::from_secs(config.server.timeout)))
        .layer(RequestBodyLimitLayer::new(
            (config.server.body_limit * 1024 * 1024).try_into()?,
        ))
        .layer(
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::DELETE])
                .allow_headers([AUTHORIZATION, CONTENT_TYPE])
                .allow_origin(Any),
        )
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

pub async fn start(config: Arc<DotEnvyConfig>, db_pool: Arc<PgPoolSquad>) -> Result<()> {
    if !config.uploads.dir.is_dir() {
        warn!(
            upload_dir = %config.uploads.dir.display(),
            "Upload directory does not exist; review images will be skipped"
        );
    }

    let app = app(&config, db_pool)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Server is running on port {}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl+C signal"),
        _ = terminate => info!("Received terminate signal"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test(start_paused = true)]
    async fn slow_requests_time_out_with_408() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    "done"
                }),
            )
            .layer(timeout_layer(Duration::from_secs(1)));

        let response = app
            .oneshot(Request::builder().uri("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
