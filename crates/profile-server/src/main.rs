use axum::middleware as axum_middleware;
use axum::routing::{delete, get, post, put};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use profile_api::handlers::{auth, contact, groups, health, roles};
use profile_api::middleware::require_auth;
use profile_api::state::AppState;
use profile_core::services::{AuthService, GroupService, RoleService};
use profile_infrastructure::database::connection;
use profile_infrastructure::{Mailer, PgGroupRepository, PgRoleRepository, PgUserRepository};
use profile_security::JwtService;
use profile_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    profile_shared::telemetry::init_telemetry();

    info!("Profile server starting...");

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let pool = connection::create_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;
    info!("Database connection established.");

    let group_repo = Arc::new(PgGroupRepository::new(pool.clone()));
    let role_repo = Arc::new(PgRoleRepository::new(pool.clone()));
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));

    let role_service = Arc::new(RoleService::new(role_repo));
    let group_service = Arc::new(GroupService::new(group_repo, role_service.clone()));
    let auth_service = Arc::new(AuthService::new(
        user_repo,
        JwtService::new(
            config.jwt.secret.clone(),
            config.jwt.access_token_expiry,
            config.jwt.refresh_token_expiry,
        ),
    ));
    let jwt = Arc::new(JwtService::new(
        config.jwt.secret.clone(),
        config.jwt.access_token_expiry,
        config.jwt.refresh_token_expiry,
    ));
    let mailer = Arc::new(Mailer::new(&config.mail)?);

    let state = AppState {
        group_service,
        role_service,
        auth_service,
        jwt,
        mailer,
        config: config.clone(),
    };

    // Admin routes sit behind the bearer-token guard.
    let admin_routes = Router::new()
        .route("/groups", post(groups::create))
        .route("/groups", put(groups::update))
        .route("/groups", get(groups::list))
        .route("/groups/total", get(groups::total))
        .route("/groups/{id}", get(groups::get_by_id))
        .route("/groups/{id}", delete(groups::delete))
        .route("/groups/by-name/{name}", get(groups::get_by_name))
        .route("/groups/by-name/{name}", delete(groups::delete_by_name))
        .route("/roles", post(roles::create))
        .route("/roles/total", get(roles::total))
        .route("/roles/by-name/{name}", get(roles::get_by_name))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let app = Router::new()
        .route("/health", get(health::health_check))
        .nest(
            "/api/v1",
            Router::new()
                .route("/auth/register", post(auth::register))
                .route("/auth/verify", post(auth::verify_email))
                .route("/auth/login", post(auth::login))
                .route("/contact", post(contact::contact_us))
                .merge(admin_routes),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
