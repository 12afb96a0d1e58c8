use courier_server::config::{AuthConfig, Config, LogFormat, ServerConfig, TelemetryConfig};
use courier_server::{api, storage};
use sqlx::PgPool;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("courier_server=debug".parse().unwrap())
            .add_directive("sqlx=warn".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

/// Connects to the test database named by `DATABASE_URL` and runs the
/// migrations. Returns `None` (so the test can bail out) when the variable
/// is unset.
#[allow(dead_code)]
pub async fn try_test_pool() -> Option<PgPool> {
    setup_tracing();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return None;
    };

    let pool = storage::init_pool(&database_url)
        .await
        .expect("Failed to connect to DB. Is Postgres running?");

    sqlx::migrate!().run(&pool).await.expect("Failed to run migrations");

    Some(pool)
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/unused".to_string(),
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origin: "http://localhost:3000".to_string(),
        },
        auth: AuthConfig { jwt_secret: "test_secret".to_string(), token_ttl_secs: 3600 },
        telemetry: TelemetryConfig { log_format: LogFormat::Text },
    }
}

/// Boots the application router on an ephemeral port and returns its base
/// URL.
pub async fn spawn_app(pool: PgPool) -> String {
    let app = api::app_router(test_config(), pool);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// Registers a user and returns their login token.
#[allow(dead_code)]
pub async fn register_and_login(
    client: &reqwest::Client,
    server_url: &str,
    username: &str,
    password: &str,
) -> String {
    let resp = client
        .post(format!("{server_url}/register"))
        .json(&serde_json::json!({ "username": username, "password": password }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "registration failed for {username}");

    let resp = client
        .post(format!("{server_url}/login"))
        .json(&serde_json::json!({ "username": username, "password": password }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "login failed for {username}");

    resp.json::<serde_json::Value>().await.unwrap()["token"].as_str().unwrap().to_string()
}

/// Sends a message and returns its generated id.
#[allow(dead_code)]
pub async fn send_message(
    client: &reqwest::Client,
    server_url: &str,
    token: &str,
    receiver: &str,
    subject: &str,
    body: &str,
) -> i64 {
    let resp = client
        .post(format!("{server_url}/messages"))
        .header("Authorization", format!("Bearer {token}"))
        .json(&serde_json::json!({ "receiver": receiver, "subject": subject, "body": body }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200, "message send failed");

    resp.json::<serde_json::Value>().await.unwrap()["id"].as_i64().unwrap()
}
