use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::Router;
use dotenvy::dotenv;
use migration::MigratorTrait;
use tracing::info;

use configs::AppConfig;
use service::auth::{domain::RegisterInput, repo::seaorm::SeaOrmAuthRepository, AuthService, TokenIssuer};
use service::catalog::{repo::seaorm::SeaOrmCatalogRepository, CatalogService};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

/// Build the token issuer from config; an unusable key stops startup.
pub fn build_issuer(cfg: &configs::JwtConfig) -> Result<TokenIssuer, StartupError> {
    let validity = chrono::Duration::try_minutes(cfg.validity_minutes)
        .ok_or_else(|| StartupError::InvalidConfig(format!("jwt.validity_minutes {} is out of range", cfg.validity_minutes)))?;
    TokenIssuer::new(cfg.issuer.clone(), cfg.key.as_bytes(), validity)
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Create configured accounts that do not exist yet.
pub async fn seed_users(auth: &AuthService, users: &[configs::SeedUser]) -> Result<(), StartupError> {
    for u in users {
        let input = RegisterInput {
            username: u.username.clone(),
            email: u.email.clone(),
            password: u.password.clone(),
            roles: u.roles.clone(),
        };
        let user = auth.ensure_user(input).await.map_err(|e| StartupError::Seed(format!("{}: {}", u.username, e)))?;
        info!(user_id = %user.id, username = %user.username, "seed user ready");
    }
    Ok(())
}

/// Wire repositories, services and the router from a validated config.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let issuer = Arc::new(build_issuer(&cfg.jwt)?);

    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;
    info!("migrations applied");

    let auth_repo = Arc::new(SeaOrmAuthRepository { db: db.clone() });
    let auth = Arc::new(AuthService::new(auth_repo, issuer, Duration::from_millis(cfg.auth.login_timeout_ms)));
    seed_users(&auth, &cfg.seed.users).await?;

    let catalog_repo = Arc::new(SeaOrmCatalogRepository { db });
    let catalog = Arc::new(CatalogService::new(catalog_repo.clone(), catalog_repo));

    let state = ServerState::new(auth, catalog, cfg.auth.login_failure_status);
    Ok(routes::build_router(state))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down");
    }
}

/// Public entry: load config, build the app and serve until Ctrl+C
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    info!(jwt = ?cfg.jwt, auth = ?cfg.auth, seed_users = cfg.seed.users.len(), "configuration loaded");

    let app = build_app(&cfg).await?;

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "bookstore api listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt(validity_minutes: i64) -> configs::JwtConfig {
        configs::JwtConfig {
            issuer: "bookstore".into(),
            key: "startup-signing-key-0123456789abcdef".into(),
            validity_minutes,
        }
    }

    #[test]
    fn issuer_from_config() {
        let issuer = build_issuer(&jwt(300)).unwrap();
        assert_eq!(issuer.validity(), chrono::Duration::hours(5));
    }

    #[test]
    fn out_of_range_validity_fails_at_startup() {
        assert!(matches!(build_issuer(&jwt(200_000_000_000)), Err(StartupError::InvalidConfig(_))));
        assert!(matches!(build_issuer(&jwt(i64::MAX)), Err(StartupError::InvalidConfig(_))));
        assert!(matches!(build_issuer(&jwt(0)), Err(StartupError::InvalidConfig(_))));
    }

    #[test]
    fn empty_key_fails_at_startup() {
        let cfg = configs::JwtConfig { key: String::new(), ..jwt(300) };
        assert!(matches!(build_issuer(&cfg), Err(StartupError::InvalidConfig(_))));
    }
}
