//! Database connection utilities.

use std::path::Path;

use switchy_database::Database;
use switchy_database_connection::{Credentials, init_sqlite_rusqlite};

/// Default path for the SQLite content database.
pub const DEFAULT_DB_PATH: &str = "data/club_network.db";

/// Opens the content database.
///
/// When `DATABASE_URL` is set, connects to PostgreSQL and configures a
/// 120-second `statement_timeout` so stalled queries fail with an error
/// instead of hanging indefinitely. Otherwise opens (creating if necessary)
/// the SQLite database at `CLUB_NETWORK_DB`, defaulting to
/// [`DEFAULT_DB_PATH`].
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_from_env() -> Result<Box<dyn Database>, Box<dyn std::error::Error>> {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        // Strip query parameters (e.g., ?sslmode=require&channel_binding=require)
        // that the Credentials parser doesn't understand. TLS is handled by the
        // native-tls connector automatically.
        let url_base = url.split('?').next().unwrap_or(&url);

        let creds = Credentials::from_url(url_base)?;
        let db = switchy_database_connection::init_postgres_raw_native_tls(creds).await?;

        db.exec_raw("SET statement_timeout = '120s'").await?;

        return Ok(db);
    }

    let path = std::env::var("CLUB_NETWORK_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    let path = Path::new(&path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    Ok(init_sqlite_rusqlite(Some(path))?)
}
