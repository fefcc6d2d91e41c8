//! HTTP query surface against a live listener.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use relay_router::config::{AdminConfig, RouterConfig};
use relay_router::fleet::{FleetMap, Server};
use relay_router::http::response::ServerResponse;
use relay_router::lifecycle::startup::Services;
use relay_router::lifecycle::Shutdown;
use relay_router::{HttpServer, Registry};

mod common;

const API_KEY: &str = "test-admin-key";

struct Harness {
    addr: SocketAddr,
    registry: Arc<Registry>,
    shutdown: Shutdown,
    client: reqwest::Client,
}

impl Harness {
    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

async fn start(servers: Vec<Server>) -> Harness {
    let fleet: FleetMap = servers.into_iter().map(|s| (s.name.clone(), s)).collect();
    let mut config = RouterConfig::default();
    config.admin = AdminConfig {
        enabled: true,
        api_key: API_KEY.to_string(),
    };

    let services = Services::build(&config, fleet).unwrap();
    let registry = services.registry.clone();
    let shutdown = Shutdown::new();
    let state = services.spawn(&shutdown, &config.admin);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(state, &config.admin);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    Harness {
        addr,
        registry,
        shutdown,
        client,
    }
}

#[tokio::test]
async fn test_get_server_and_not_found() {
    let h = start(vec![Server::new("str1", "str1.example").with_sessions(1)]).await;

    let res = h.client.get(h.url("/server")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let body: ServerResponse = res.json().await.unwrap();
    assert_eq!(body.server, "str1");

    h.registry.mutate("str1", |s| s.online = false);
    let res = h.client.get(h.url("/server")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    h.shutdown.trigger();
}

#[tokio::test]
async fn test_post_server_uses_country_code() {
    let h = start(vec![
        Server::new("ru1", "ru1.example").with_region("RU").with_sessions(3),
        Server::new("str1", "str1.example"),
    ])
    .await;

    let res = h
        .client
        .post(h.url("/server"))
        .json(&serde_json::json!({
            "username": "alice",
            "geo": { "country_code": "RU", "city": "Moscow" }
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<ServerResponse>().await.unwrap().server, "ru1");

    let res = h
        .client
        .post(h.url("/server"))
        .json(&serde_json::json!({ "geo": { "country_code": "IL" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.json::<ServerResponse>().await.unwrap().server, "str1");

    h.shutdown.trigger();
}

#[tokio::test]
async fn test_status_lists_fleet() {
    let h = start(vec![Server::new("str1", "a"), Server::new("str2", "b").with_enable(false)]).await;

    let fleet: FleetMap = h.client.get(h.url("/status")).send().await.unwrap().json().await.unwrap();
    assert_eq!(fleet.len(), 2);
    assert!(!fleet["str2"].enable);

    h.shutdown.trigger();
}

#[tokio::test]
async fn test_bus_ingress_applies_announcement() {
    let h = start(vec![Server::new("str1", "a")]).await;

    let res = h
        .client
        .post(h.url("/bus/janus/str1/status"))
        .body(r#"{"online":false}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 202);

    let mut offline = false;
    for _ in 0..100 {
        if !h.registry.get("str1").unwrap().online {
            offline = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(offline);

    h.shutdown.trigger();
}

#[tokio::test]
async fn test_admin_enable_requires_key() {
    let h = start(vec![Server::new("str1", "a")]).await;
    let body = serde_json::json!({ "enable": false });

    let res = h
        .client
        .put(h.url("/admin/servers/str1/enable"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 401);
    assert!(h.registry.get("str1").unwrap().enable);

    let res = h
        .client
        .put(h.url("/admin/servers/str1/enable"))
        .bearer_auth(API_KEY)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(!h.registry.get("str1").unwrap().enable);

    let res = h
        .client
        .put(h.url("/admin/servers/nope1/enable"))
        .bearer_auth(API_KEY)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    h.shutdown.trigger();
}
