use super::shutdown::{ShutdownCoordinator, coordinated_shutdown};
use crate::errors::handlers::not_found;
use crate::http::cors::{cors_layer_from_env, cors_layer_from_origins};
use crate::http::security::security_headers;
use axum::{Router, handler::HandlerWithoutStateExt, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;

/// Shape of the router assembled by [`create_router`].
#[derive(Clone, Debug)]
pub struct RouterOptions {
    /// Path the API routes are nested under.
    pub api_prefix: String,
    /// Requests running longer than this are answered with 408.
    pub request_timeout: Duration,
    /// Directory served at `/` for any path no route matched.
    pub static_root: Option<PathBuf>,
    /// Extra `(mount path, directory)` pairs served as-is.
    pub static_mounts: Vec<(String, PathBuf)>,
    /// Comma-separated CORS origins. Read from `CORS_ALLOWED_ORIGIN` when `None`.
    pub cors_origins: Option<String>,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            api_prefix: "/api/v1".to_string(),
            request_timeout: Duration::from_secs(30),
            static_root: None,
            static_mounts: Vec::new(),
            cors_origins: None,
        }
    }
}

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - OpenAPI documentation (Swagger UI, ReDoc, RapiDoc, Scalar)
/// - API routes nested under `options.api_prefix`
/// - Static hosting for the built web client, with the JSON 404 as fallback
/// - Common middleware (tracing, security headers, CORS, compression, timeout)
///
/// Health endpoints (/health, /ready) are merged in by the app.
///
/// # Errors
/// Returns an error when the CORS origin list is missing, empty, or invalid.
///
/// # Example
/// ```ignore
/// let options = RouterOptions {
///     static_root: Some("./web/build".into()),
///     static_mounts: vec![("/static".into(), "./static".into())],
///     ..RouterOptions::default()
/// };
/// let router = create_router::<ApiDoc>(api_routes, &options)?;
/// ```
pub fn create_router<T>(apis: Router, options: &RouterOptions) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    let cors_layer = match &options.cors_origins {
        Some(origins) => cors_layer_from_origins(origins)?,
        None => cors_layer_from_env()?,
    };

    let mut router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest(&options.api_prefix, apis);

    for (mount, dir) in &options.static_mounts {
        info!("Serving {} from {}", mount, dir.display());
        router = router.nest_service(mount, ServeDir::new(dir));
    }

    router = match &options.static_root {
        Some(root) => {
            info!("Serving web client from {}", root.display());
            router.fallback_service(ServeDir::new(root).not_found_service(not_found.into_service()))
        }
        None => router.fallback(not_found),
    };

    #[allow(deprecated)]
    let timeout_layer = TimeoutLayer::new(options.request_timeout);

    let router = router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(timeout_layer)
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Production server with coordinated shutdown and cleanup.
///
/// Once SIGINT or SIGTERM arrives the listener stops accepting, in-flight
/// requests drain, and `cleanup` runs for at most `shutdown_timeout`.
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     client.shutdown().await;
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let mut shutdown_rx = coordinator.subscribe();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        if shutdown_rx.recv().await.is_err() {
            return;
        }

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => {
                tracing::warn!(
                    "Cleanup exceeded timeout of {:?}, forcing shutdown",
                    shutdown_timeout
                );
            }
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinated_shutdown(coordinator))
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    cleanup_handle.await.ok();

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test"))]
    struct TestDoc;

    fn ping_routes() -> Router {
        Router::new().route("/ping", get(|| async { "pong" }))
    }

    fn options() -> RouterOptions {
        RouterOptions {
            cors_origins: Some("http://localhost:3000".to_string()),
            ..RouterOptions::default()
        }
    }

    #[tokio::test]
    async fn test_api_routes_are_nested_under_prefix() {
        let app = create_router::<TestDoc>(ping_routes(), &options()).unwrap();

        let response = app
            .oneshot(Request::get("/api/v1/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-content-type-options"));
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_not_found() {
        let app = create_router::<TestDoc>(ping_routes(), &options()).unwrap();

        let response = app
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_missing_static_file_falls_back_to_not_found() {
        let opts = RouterOptions {
            static_root: Some(std::env::temp_dir().join("stories-api-missing-web-build")),
            ..options()
        };
        let app = create_router::<TestDoc>(ping_routes(), &opts).unwrap();

        let response = app
            .oneshot(Request::get("/missing.js").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let app = create_router::<TestDoc>(ping_routes(), &options()).unwrap();

        let response = app
            .oneshot(
                Request::get("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_invalid_cors_origins_fail() {
        let opts = RouterOptions {
            cors_origins: Some(String::new()),
            ..RouterOptions::default()
        };
        assert!(create_router::<TestDoc>(ping_routes(), &opts).is_err());
    }
}
