use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::Connection;

use crate::config::MariaDbConfig;
use crate::probe::{ServiceStatus, PROBE_TIMEOUT};

pub async fn get_status(cfg: &MariaDbConfig) -> ServiceStatus {
    match tokio::time::timeout(PROBE_TIMEOUT, fetch_server_version(cfg)).await {
        Ok(Ok(version)) => ServiceStatus {
            name: "MariaDB".to_string(),
            icon: "fa-database".to_string(),
            status: true,
            info: short_version(&version),
        },
        Ok(Err(e)) => {
            tracing::debug!("mariadb probe failed: {}", e);
            unreachable_status()
        }
        Err(_) => {
            tracing::debug!("mariadb probe timed out after {:?}", PROBE_TIMEOUT);
            unreachable_status()
        }
    }
}

async fn fetch_server_version(cfg: &MariaDbConfig) -> Result<String, sqlx::Error> {
    let opts = MySqlConnectOptions::new()
        .host(&cfg.host)
        .port(cfg.port)
        .username(&cfg.user)
        .password(&cfg.password)
        .database(&cfg.database)
        .charset(&cfg.charset);
    let mut conn = MySqlConnection::connect_with(&opts).await?;
    let version: String = sqlx::query_scalar("SELECT VERSION()")
        .fetch_one(&mut conn)
        .await?;
    conn.close().await?;
    Ok(version)
}

fn unreachable_status() -> ServiceStatus {
    ServiceStatus {
        name: "MariaDB".to_string(),
        icon: "fa-database".to_string(),
        status: false,
        info: String::new(),
    }
}

/// Drops the vendor suffix: "10.11.2-MariaDB" -> "10.11.2"
fn short_version(raw: &str) -> String {
    raw.split('-').next().unwrap_or(raw).to_string()
}

#[cfg(test)]
mod tests {
    use super::short_version;

    #[test]
    fn keeps_leading_token_of_vendor_suffixed_version() {
        assert_eq!(short_version("10.11.2-MariaDB"), "10.11.2");
        assert_eq!(short_version("8.0.36"), "8.0.36");
    }
}
