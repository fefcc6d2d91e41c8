//! Active health checking.
//!
//! # Responsibilities
//! - Periodically advance every live node's missed probe counter
//! - Evict nodes whose counter crosses the threshold
//! - Publish an admin probe to every node still online

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::HealthConfig;
use crate::error::BusError;
use crate::fleet::Registry;
use crate::health::state::{self, TickOutcome};
use crate::messaging::payload::AdminProbe;
use crate::messaging::topic::TopicScheme;
use crate::messaging::MessageBus;
use crate::observability::metrics;

/// Result of a single probe cycle.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProbeCycleReport {
    /// Nodes a probe was published to.
    pub probed: Vec<String>,
    /// Nodes taken offline this cycle.
    pub evicted: Vec<String>,
    /// Probes the bus refused.
    pub publish_failures: usize,
}

pub struct HealthMonitor {
    registry: Arc<Registry>,
    bus: Arc<dyn MessageBus>,
    topics: Arc<TopicScheme>,
    admin_secret: String,
    threshold: u32,
    interval: Duration,
}

impl HealthMonitor {
    pub fn new(
        registry: Arc<Registry>,
        bus: Arc<dyn MessageBus>,
        topics: Arc<TopicScheme>,
        config: &HealthConfig,
        admin_secret: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            bus,
            topics,
            admin_secret: admin_secret.into(),
            threshold: config.missed_ping_threshold,
            interval: Duration::from_secs(config.probe_interval_secs),
        }
    }

    /// Override the probe period.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_ms = self.interval.as_millis() as u64,
            threshold = self.threshold,
            "Health monitor starting"
        );

        // First tick one full period after start, not immediately.
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Publishes outlive the tick that started them; the clock never waits on the bus.
        let mut in_flight = JoinSet::new();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = self.advance();
                    self.spawn_probes(&report.probed, &mut in_flight);
                    tracing::debug!(
                        probed = report.probed.len(),
                        evicted = report.evicted.len(),
                        in_flight = in_flight.len(),
                        "Probe tick complete"
                    );
                }
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    record_publish(joined);
                }
                _ = shutdown.recv() => {
                    tracing::info!(
                        in_flight = in_flight.len(),
                        "Health monitor received shutdown signal, exiting loop"
                    );
                    in_flight.abort_all();
                    break;
                }
            }
        }
    }

    /// Advance the failure detector once and wait for the resulting probes.
    ///
    /// Each publish is bounded by the probe interval.
    pub async fn run_probe_cycle(&self) -> ProbeCycleReport {
        let mut report = self.advance();

        let mut publishes = JoinSet::new();
        self.spawn_probes(&report.probed, &mut publishes);
        while let Some(joined) = publishes.join_next().await {
            if !record_publish(joined) {
                report.publish_failures += 1;
            }
        }

        tracing::debug!(
            probed = report.probed.len(),
            evicted = report.evicted.len(),
            publish_failures = report.publish_failures,
            "Probe cycle complete"
        );
        report
    }

    /// Tick every record under the write lock. No I/O happens here.
    fn advance(&self) -> ProbeCycleReport {
        let mut report = ProbeCycleReport::default();

        for name in self.registry.names() {
            let outcome = self
                .registry
                .mutate(&name, |server| state::probe_tick(server, self.threshold));

            match outcome {
                Some(TickOutcome::Probe { .. }) => report.probed.push(name),
                Some(TickOutcome::Evicted { missed_ping }) => {
                    tracing::warn!(server = %name, missed_ping, "Server evicted: no admin reply");
                    metrics::record_eviction(&name);
                    report.evicted.push(name);
                }
                Some(TickOutcome::Skipped) | None => {}
            }
        }

        metrics::record_routable_nodes(self.registry.routable_count());
        report
    }

    fn spawn_probes(&self, names: &[String], tasks: &mut JoinSet<Result<(), BusError>>) {
        for name in names {
            let bus = self.bus.clone();
            let topic = self.topics.probe_topic(name);
            let probe = AdminProbe::list_sessions(&self.admin_secret);
            let limit = self.interval;
            tasks.spawn(async move {
                let sent = time::timeout(limit, send_probe(bus.as_ref(), &topic, &probe)).await;
                sent.unwrap_or_else(|_| {
                    Err(BusError::Publish {
                        topic,
                        reason: format!("timed out after {}ms", limit.as_millis()),
                    })
                })
            });
        }
    }
}

/// Log and count one finished publish. Returns `true` on success.
///
/// A failed publish does not roll back the counter; the node still ages toward eviction.
fn record_publish(joined: Result<Result<(), BusError>, JoinError>) -> bool {
    match joined {
        Ok(Ok(())) => {
            metrics::record_probe_sent();
            true
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Probe publish failed");
            metrics::record_probe_publish_failure();
            false
        }
        Err(e) => {
            tracing::error!(error = %e, "Probe publish task failed");
            false
        }
    }
}

async fn send_probe(bus: &dyn MessageBus, topic: &str, probe: &AdminProbe) -> Result<(), BusError> {
    let payload = serde_json::to_vec(probe)?;
    tracing::debug!(topic = %topic, transaction = %probe.transaction_id, "Sending admin probe");
    bus.publish(topic, payload).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::{FleetMap, Server};
    use crate::lifecycle::Shutdown;
    use crate::messaging::local::LocalBus;

    fn monitor(servers: Vec<Server>) -> (HealthMonitor, Arc<Registry>, LocalBus) {
        let map: FleetMap = servers.into_iter().map(|s| (s.name.clone(), s)).collect();
        let registry = Arc::new(Registry::from_map(map));
        let (bus, _rx) = LocalBus::new();
        let topics = Arc::new(TopicScheme::new("janus", "^[a-z]+[0-9]+$").unwrap());
        let monitor = HealthMonitor::new(
            registry.clone(),
            Arc::new(bus.clone()),
            topics,
            &HealthConfig::default(),
            "secret",
        );
        (monitor, registry, bus)
    }

    #[tokio::test]
    async fn test_cycle_probes_only_live_nodes() {
        let (monitor, registry, bus) = monitor(vec![
            Server::new("str1", "a"),
            Server::new("str2", "b").with_enable(false),
            Server::new("str3", "c").with_online(false),
        ]);
        let mut out = bus.subscribe_outbound();

        let report = monitor.run_probe_cycle().await;
        assert_eq!(report.probed, vec!["str1".to_string()]);
        assert_eq!(registry.get("str1").unwrap().missed_ping, 1);
        assert_eq!(registry.get("str2").unwrap().missed_ping, 0);
        assert_eq!(registry.get("str3").unwrap().missed_ping, 0);

        let msg = out.recv().await.unwrap();
        assert_eq!(msg.topic, "janus/str1/to-janus-admin");
        let probe: AdminProbe = serde_json::from_slice(&msg.payload).unwrap();
        assert_eq!(probe.action, "list_sessions");
        assert_eq!(probe.shared_secret, "secret");
    }

    #[tokio::test]
    async fn test_cycle_evicts_after_threshold() {
        let (monitor, registry, _bus) = monitor(vec![Server::new("str1", "a").with_sessions(6)]);
        registry.mutate("str1", |s| s.missed_ping = 3);

        let report = monitor.run_probe_cycle().await;
        assert_eq!(report.evicted, vec!["str1".to_string()]);
        assert!(report.probed.is_empty());
        let s = registry.get("str1").unwrap();
        assert_eq!((s.missed_ping, s.online, s.sessions), (4, false, 0));
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let (monitor, registry, _bus) = monitor(vec![Server::new("str1", "a")]);
        let shutdown = Shutdown::new();
        let handle = tokio::spawn(
            monitor
                .with_interval(Duration::from_millis(20))
                .run(shutdown.subscribe()),
        );

        tokio::time::sleep(Duration::from_millis(70)).await;
        shutdown.trigger();
        handle.await.unwrap();

        let missed = registry.get("str1").unwrap().missed_ping;
        assert!(missed >= 1, "expected at least one tick, got {missed}");
    }
}
