//! Initial fleet map retrieval.
//!
//! The map is fetched from the configured URL first and falls back to the
//! local JSON file. If neither yields a non-empty map the caller aborts.

use std::path::Path;
use std::time::Duration;

use crate::config::BootstrapConfig;
use crate::error::BootstrapError;
use crate::fleet::registry::FleetMap;

/// Resolve the initial fleet map from the configured sources.
pub async fn load_fleet(config: &BootstrapConfig) -> Result<FleetMap, BootstrapError> {
    if let Some(url) = &config.url {
        match fetch_fleet(url, Duration::from_secs(config.timeout_secs)).await {
            Ok(fleet) => {
                tracing::info!(url = %url, servers = fleet.len(), "Fleet map fetched");
                return Ok(fleet);
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Fleet fetch failed, falling back to file");
            }
        }
    }

    let fleet = read_fleet_file(Path::new(&config.file))?;
    tracing::info!(file = %config.file, servers = fleet.len(), "Fleet map read from file");
    Ok(fleet)
}

async fn fetch_fleet(url: &str, timeout: Duration) -> Result<FleetMap, BootstrapError> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let body = client
        .get(url)
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    parse_fleet(&body)
}

pub fn read_fleet_file(path: &Path) -> Result<FleetMap, BootstrapError> {
    let content = std::fs::read_to_string(path)?;
    parse_fleet(&content)
}

/// Decode a fleet JSON object. Map keys are the authoritative node names.
pub fn parse_fleet(json: &str) -> Result<FleetMap, BootstrapError> {
    let mut fleet: FleetMap = serde_json::from_str(json)?;
    if fleet.is_empty() {
        return Err(BootstrapError::Empty);
    }

    for (key, server) in fleet.iter_mut() {
        if server.name != *key {
            if !server.name.is_empty() {
                tracing::warn!(key = %key, name = %server.name, "Fleet entry name differs from key, using key");
            }
            server.name = key.clone();
        }
        // Counters are runtime state, never trusted from the source.
        server.missed_ping = 0;
    }

    Ok(fleet)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLEET: &str = r#"{
        "str1": {"name": "str1", "dns": "str1.example.com", "enable": true, "online": true},
        "str2": {"dns": "str2.example.com", "enable": false, "region": "RU", "sessions": 7}
    }"#;

    #[test]
    fn test_parse_fleet_uses_keys() {
        let fleet = parse_fleet(FLEET).unwrap();
        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet["str2"].name, "str2");
        assert_eq!(fleet["str2"].region, "RU");
        assert_eq!(fleet["str2"].sessions, 7);
        assert!(fleet["str1"].is_routable());
    }

    #[test]
    fn test_parse_empty_fleet_fails() {
        assert!(matches!(parse_fleet("{}"), Err(BootstrapError::Empty)));
        assert!(matches!(parse_fleet("[]"), Err(BootstrapError::Parse(_))));
    }

    #[tokio::test]
    async fn test_no_usable_source_is_an_error() {
        let config = BootstrapConfig {
            url: Some("http://127.0.0.1:1/fleet".into()),
            file: "/nonexistent/conf.json".into(),
            timeout_secs: 1,
        };
        assert!(load_fleet(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_file_fallback() {
        let path = std::env::temp_dir().join(format!("relay-router-fleet-{}.json", std::process::id()));
        std::fs::write(&path, FLEET).unwrap();
        let config = BootstrapConfig {
            url: None,
            file: path.to_string_lossy().into_owned(),
            timeout_secs: 1,
        };
        let fleet = load_fleet(&config).await.unwrap();
        assert_eq!(fleet.len(), 2);
        let _ = std::fs::remove_file(path);
    }
}
