use sea_orm::Database;
use tracing::info;

use syntra::config::SyntraConfig;
use syntra::infra::mailer::SmtpMailer;
use syntra::infra::oauth::GoogleOAuth;
use syntra::infra::storage::HttpObjectStorage;
use syntra::router::build_router;
use syntra::state::AppState;

#[tokio::main]
async fn main() {
    syntra_core::tracing::init_tracing();

    let config = SyntraConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let mailer = SmtpMailer::from_config(&config.smtp_url, &config.smtp_from)
        .expect("invalid SMTP configuration");

    let http = reqwest::Client::new();
    let state = AppState {
        db,
        jwt_secret: config.jwt_secret,
        cookie_domain: config.cookie_domain,
        storage: HttpObjectStorage {
            client: http.clone(),
            upload_url: config.storage_upload_url,
            upload_preset: config.storage_upload_preset,
        },
        mailer,
        oauth: GoogleOAuth {
            client: http,
            client_id: config.google_client_id,
            client_secret: config.google_client_secret,
            redirect_url: config.google_redirect_url,
        },
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("syntra listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
