use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use chrono::Utc;
use emote_service::db::{self, SqlxPostStore};
use emote_service::handlers::{self, AppState};
use emote_service::identity::HttpIdentityClient;
use emote_service::services::{PostService, RedisRateLimiter};
use redis::aio::ConnectionManager;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct HealthState {
    db_pool: sqlx::Pool<sqlx::Postgres>,
    redis_manager: Arc<Mutex<ConnectionManager>>,
}

#[derive(serde::Serialize, Clone)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(serde::Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

impl HealthState {
    async fn check_postgres(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.db_pool)
            .await
            .map(|_| ())
    }

    async fn check_redis(&self) -> Result<(), redis::RedisError> {
        let mut conn = self.redis_manager.lock().await;
        let pong: String = redis::cmd("PING").query_async(&mut *conn).await?;
        if pong == "PONG" {
            Ok(())
        } else {
            Err(redis::RedisError::from((
                redis::ErrorKind::ResponseError,
                "unexpected PING response",
            )))
        }
    }
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match state.check_postgres().await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "emote-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "emote-service"
        })),
    }
}

async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "alive": true }))
}

async fn readiness_summary(state: web::Data<HealthState>) -> HttpResponse {
    let mut checks = HashMap::new();
    let mut ready = true;

    let start = Instant::now();
    let postgres_check = match state.check_postgres().await {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "connected".to_string(),
            latency_ms: Some(start.elapsed().as_millis() as u64),
        },
        Err(e) => {
            ready = false;
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: e.to_string(),
                latency_ms: None,
            }
        }
    };
    checks.insert("postgres".to_string(), postgres_check);

    let start = Instant::now();
    let redis_check = match state.check_redis().await {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "connected".to_string(),
            latency_ms: Some(start.elapsed().as_millis() as u64),
        },
        Err(e) => {
            // Rate limiting fails closed without Redis, so the service is
            // not ready to accept writes
            ready = false;
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: e.to_string(),
                latency_ms: None,
            }
        }
    };
    checks.insert("redis".to_string(), redis_check);

    let body = serde_json::json!({
        "ready": ready,
        "checks": checks,
        "timestamp": Utc::now().to_rfc3339(),
    });

    if ready {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// Split the configured origin list; empty segments from stray or
/// trailing commas are dropped (actix-cors rejects an empty origin at
/// app construction).
fn parse_allowed_origins(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .collect()
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = match emote_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting emote-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    // Initialize database connection pool and run migrations
    let db_pool = match db::create_pool(&config.database.url, config.database.max_connections).await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    db::MIGRATOR.run(&db_pool).await.map_err(|e| {
        io::Error::new(io::ErrorKind::Other, format!("Migration failed: {}", e))
    })?;
    tracing::info!("Connected to database, migrations applied");

    // Initialize Redis connection for rate-limit counters
    let redis_client = redis::Client::open(config.cache.url.as_str()).map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to construct Redis client: {}", e),
        )
    })?;
    let redis_manager = ConnectionManager::new(redis_client).await.map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to initialize Redis connection: {}", e),
        )
    })?;
    tracing::info!("Connected to Redis");

    // Wire collaborators into the post service
    let identity = Arc::new(HttpIdentityClient::new(&config.identity).map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to construct identity client: {}", e),
        )
    })?);
    let store = Arc::new(SqlxPostStore::new(db_pool.clone()));
    let limiter = Arc::new(RedisRateLimiter::new(
        redis_manager.clone(),
        config.rate_limit.clone(),
    ));
    let post_service = Arc::new(PostService::new(store, limiter, identity));

    let app_state = web::Data::new(AppState {
        posts: post_service,
    });
    let health_state = web::Data::new(HealthState {
        db_pool: db_pool.clone(),
        redis_manager: Arc::new(Mutex::new(redis_manager)),
    });

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!("Starting HTTP server at {}", bind_address);

    let cors_origins = config.cors.allowed_origins.clone();

    HttpServer::new(move || {
        let mut cors = Cors::default();
        for origin in parse_allowed_origins(&cors_origins) {
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(app_state.clone())
            .app_data(health_state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/health", web::get().to(health_summary))
            .route("/health/live", web::get().to(liveness_check))
            .route("/health/ready", web::get().to(readiness_summary))
            .service(
                web::scope("/api/v1")
                    .route("/feed", web::get().to(handlers::get_feed))
                    .service(
                        web::scope("/posts")
                            .service(
                                web::resource("").route(web::post().to(handlers::create_post)),
                            )
                            .service(
                                web::resource("/user/{user_id}")
                                    .route(web::get().to(handlers::get_user_posts)),
                            ),
                    )
                    .route(
                        "/profiles/{username}",
                        web::get().to(handlers::get_profile_by_username),
                    ),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_origins_drops_empty_segments() {
        assert_eq!(
            parse_allowed_origins("http://a.example, ,http://b.example,"),
            vec!["http://a.example", "http://b.example"]
        );
        assert!(parse_allowed_origins("").is_empty());
    }

    #[test]
    fn test_parse_allowed_origins_keeps_wildcard() {
        assert_eq!(parse_allowed_origins("*"), vec!["*"]);
    }
}
