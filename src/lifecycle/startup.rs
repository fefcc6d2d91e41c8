//! Startup orchestration.
//!
//! # Responsibilities
//! - Obtain the initial fleet map (fatal if none)
//! - Wire registry, selector, bus, dispatcher and probe clock
//! - Start background tasks, then bind the HTTP listener

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::{AdminConfig, RouterConfig};
use crate::error::StartupError;
use crate::fleet::bootstrap::load_fleet;
use crate::fleet::{FleetMap, Registry};
use crate::health::HealthMonitor;
use crate::http::{AppState, HttpServer};
use crate::lifecycle::signals::spawn_signal_handler;
use crate::lifecycle::Shutdown;
use crate::load_balancer::{Selector, SharedRng};
use crate::messaging::{Dispatcher, LocalBus, Message, MessageBus, TopicScheme};
use crate::observability::metrics;

/// Every runtime component, wired but not yet running.
pub struct Services {
    pub registry: Arc<Registry>,
    pub selector: Arc<Selector>,
    pub bus: LocalBus,
    pub dispatcher: Arc<Dispatcher>,
    pub monitor: HealthMonitor,
    pub inbound: mpsc::UnboundedReceiver<Message>,
}

impl Services {
    /// Assemble the components around an already loaded fleet map.
    pub fn build(config: &RouterConfig, fleet: FleetMap) -> Result<Self, StartupError> {
        let topics = TopicScheme::new(
            config.messaging.topic_prefix.clone(),
            &config.health.node_name_pattern,
        )
        .map_err(|e| StartupError::Config(e.to_string()))?;
        let topics = Arc::new(topics);

        let registry = Arc::new(Registry::new());
        registry.load(fleet);
        metrics::record_routable_nodes(registry.routable_count());

        let selector = Arc::new(Selector::new(registry.clone(), Arc::new(SharedRng::from_entropy())));
        let (bus, inbound) = LocalBus::new();
        let dispatcher = Arc::new(Dispatcher::new(registry.clone(), topics.clone()));
        let monitor = HealthMonitor::new(
            registry.clone(),
            Arc::new(bus.clone()),
            topics,
            &config.health,
            config.messaging.admin_secret.clone(),
        );

        Ok(Self {
            registry,
            selector,
            bus,
            dispatcher,
            monitor,
            inbound,
        })
    }

    /// Start the dispatcher and probe clock; return the HTTP state.
    pub fn spawn(self, shutdown: &Shutdown, admin: &AdminConfig) -> AppState {
        tokio::spawn(self.dispatcher.run(self.inbound, shutdown.subscribe()));
        tokio::spawn(self.monitor.run(shutdown.subscribe()));
        AppState::new(self.registry, self.selector, self.bus, admin)
    }
}

/// Run the router until a shutdown signal arrives.
pub async fn run(config: RouterConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let fleet = load_fleet(&config.bootstrap).await?;
    let services = Services::build(&config, fleet)?;
    let bus = services.bus.clone();

    let shutdown = Shutdown::new();
    spawn_signal_handler(shutdown.clone());

    announce_presence(&bus, config.messaging.service_status_topic.as_deref(), "Online").await;
    let state = services.spawn(&shutdown, &config.admin);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(state, &config.admin);
    server.run(listener, shutdown.subscribe()).await?;

    announce_presence(&bus, config.messaging.service_status_topic.as_deref(), "Offline").await;
    Ok(())
}

async fn announce_presence(bus: &LocalBus, topic: Option<&str>, status: &str) {
    let Some(topic) = topic else {
        return;
    };
    match bus.publish(topic, status.as_bytes().to_vec()).await {
        Ok(()) => tracing::info!(topic = %topic, status, "Router presence announced"),
        Err(e) => tracing::error!(topic = %topic, error = %e, "Failed to announce router presence"),
    }
}
