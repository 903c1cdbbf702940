use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use sqlx::{postgres::PgPoolOptions, Executor, PgPool};

static SERVER: OnceLock<TestServer> = OnceLock::new();

/// Admin token the spawned server is configured with
pub const ADMIN_TOKEN: &str = "test-admin-token";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/product-purge");
        cmd.env("PRODUCT_PURGE_PORT", port.to_string())
            .env("ADMIN_TOKEN", ADMIN_TOKEN)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server sees DATABASE_URL from .env (loaded by the server)
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Consider server ready on any non-404 response
                if resp.status() == StatusCode::OK
                    || resp.status() == StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Direct pool for seeding and asserting on store state
pub async fn test_pool() -> Result<PgPool> {
    let _ = dotenvy::dotenv();
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL not set")?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .context("failed to connect to test database")?;
    Ok(pool)
}

/// Wipe products, attachments, and this service's settings record
pub async fn reset_store(pool: &PgPool) -> Result<()> {
    // Simple-query protocol: schema.sql holds multiple statements
    pool.execute(include_str!("../../schema.sql")).await?;
    sqlx::query("TRUNCATE records, record_meta").execute(pool).await?;
    sqlx::query("DELETE FROM options WHERE name = 'product_purge_settings'")
        .execute(pool)
        .await?;
    Ok(())
}

/// Insert a product row, optionally with thumbnail/gallery metadata
pub async fn seed_product(
    pool: &PgPool,
    title: &str,
    thumbnail_id: Option<i64>,
    gallery_ids: Option<&str>,
) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO records (record_type, title, created_at)
         VALUES ('product', $1, now()) RETURNING id",
    )
    .bind(title)
    .fetch_one(pool)
    .await?;

    if let Some(thumb) = thumbnail_id {
        seed_meta(pool, id, "thumbnail_id", &thumb.to_string()).await?;
    }
    if let Some(gallery) = gallery_ids {
        seed_meta(pool, id, "gallery_ids", gallery).await?;
    }

    Ok(id)
}

/// Insert an attachment row, optionally with a file_path meta
pub async fn seed_attachment(pool: &PgPool, file_path: Option<&str>) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO records (record_type, title, created_at)
         VALUES ('attachment', 'media', now()) RETURNING id",
    )
    .fetch_one(pool)
    .await?;

    if let Some(path) = file_path {
        seed_meta(pool, id, "file_path", path).await?;
    }

    Ok(id)
}

async fn seed_meta(pool: &PgPool, record_id: i64, key: &str, value: &str) -> Result<()> {
    sqlx::query("INSERT INTO record_meta (record_id, meta_key, meta_value) VALUES ($1, $2, $3)")
        .bind(record_id)
        .bind(key)
        .bind(value)
        .execute(pool)
        .await?;
    Ok(())
}

/// Count of rows remaining for a record id (0 once deleted)
pub async fn record_exists(pool: &PgPool, id: i64) -> Result<bool> {
    let count = sqlx::query_scalar::<_, i64>("SELECT count(*) FROM records WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}
