use crate::{
    modules,
    types::{Config, Context, CorsContext, ToContext},
};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors, trace};

pub struct App {
    ctx: Arc<Context>,
    router: Router,
}

fn cors_layer(config: &CorsContext) -> cors::CorsLayer {
    let layer = cors::CorsLayer::new()
        .allow_methods([Method::OPTIONS, Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .expose_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match &config.allowed_origin {
        Some(origin) => layer
            .allow_origin(origin.clone())
            .allow_credentials(true),
        None => layer.allow_origin(cors::Any),
    }
}

pub fn build_router(ctx: Arc<Context>) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(trace::TraceLayer::new_for_http())
        .layer(cors_layer(&ctx.cors))
        .layer(DefaultBodyLimit::max(1024 * 1024));

    Router::new()
        .nest("/api", modules::get_router())
        .with_state(ctx)
        .layer(middleware)
}

impl App {
    pub async fn new() -> Self {
        let ctx: Arc<Context> = Arc::new(Config::default().to_context().await);
        let router = build_router(ctx.clone());

        Self { ctx, router }
    }

    pub async fn serve(self) -> std::io::Result<()> {
        let listener =
            TcpListener::bind(format!("{}:{}", self.ctx.app.host, self.ctx.app.port)).await?;

        tracing::info!(
            "App is running on {}:{} ({:?}, {})",
            self.ctx.app.host,
            self.ctx.app.port,
            self.ctx.app.environment,
            self.ctx.app.url
        );

        axum::serve(
            listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
    }
}
