//! Server selection for routing requests.

use std::sync::Arc;

use crate::error::SelectError;
use crate::fleet::Registry;
use crate::load_balancer::least_sessions::least_loaded;
use crate::load_balancer::pool::candidate_pool;
use crate::load_balancer::random::RandomSource;
use crate::observability::metrics;

/// Picks the least-loaded eligible node for a country code.
///
/// Read-only over the registry; never performs I/O.
pub struct Selector {
    registry: Arc<Registry>,
    rng: Arc<dyn RandomSource>,
}

impl Selector {
    pub fn new(registry: Arc<Registry>, rng: Arc<dyn RandomSource>) -> Self {
        Self { registry, rng }
    }

    /// Choose a node name for `country_code` (empty for no affinity).
    pub fn pick(&self, country_code: &str) -> Result<String, SelectError> {
        let snapshot = self.registry.snapshot();
        let (pool_kind, pool) = candidate_pool(snapshot.values(), country_code);

        let Some((min_sessions, tied)) = least_loaded(&pool) else {
            tracing::error!(country_code = %country_code, pool_type = %pool_kind, "No available servers");
            metrics::record_selection_failure();
            return Err(SelectError::NotFound {
                country_code: country_code.to_string(),
            });
        };

        let selected = tied[self.rng.index(tied.len())];

        let reason = if tied.len() > 1 {
            format!("random from {} servers with minimum sessions", tied.len())
        } else {
            "minimum sessions".to_string()
        };
        let available: Vec<String> = pool
            .iter()
            .map(|s| format!("{}({})", s.name, s.sessions))
            .collect();
        let candidates: Vec<&str> = tied.iter().map(|s| s.name.as_str()).collect();

        tracing::info!(
            country_code = %country_code,
            pool_type = %pool_kind,
            available_servers = ?available,
            min_sessions,
            candidates = ?candidates,
            selected_server = %selected.name,
            server_dns = %selected.dns,
            server_region = %selected.region,
            selection_reason = %reason,
            "Server selected for client"
        );
        metrics::record_selection(pool_kind.as_str());

        Ok(selected.name.clone())
    }
}
