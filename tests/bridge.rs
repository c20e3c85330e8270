//! Bridge behaviour against a mocked LIFX cloud API.

use std::time::Duration;

use lifx_cloud_bridge::{BridgeConfig, ConfigKV, Error, HostPlugin, LifxBridge};
use serde_json::{Value, json};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn bridge_for(server: &MockServer, config: BridgeConfig) -> LifxBridge {
    let config = config.with_base_url(&format!("{}/v1", server.uri()));
    LifxBridge::new(config).unwrap()
}

fn listing() -> Value {
    json!([
        {"id": "d1", "power": "on", "product": {"company": "LIFX", "name": "A19"}},
        {"id": "d2", "power": "off", "product": {"company": "LIFX", "name": "Beam"}},
        {"id": "d3", "power": "on", "label": "Desk", "product": {"company": "LIFX", "name": "Mini"}}
    ])
}

async fn mount_listing(server: &MockServer, token: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v1/lights/all"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn listing_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == "GET" && r.url.path() == "/v1/lights/all")
        .count()
}

#[tokio::test]
async fn lists_single_device_and_reports_power() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        "abc",
        json!([{"id": "d1", "power": "on", "product": {"company": "LIFX", "name": "A19"}}]),
    )
    .await;
    let bridge = bridge_for(&server, BridgeConfig::new().with_token("abc"));

    let devices = bridge.get_available_devices().await;
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].unique_id, "d1");
    assert_eq!(devices[0].manufacturer_name, "LIFX");
    assert_eq!(devices[0].model_name, "A19");

    assert!(bridge.get_device_status("d1").await);
    assert_eq!(listing_requests(&server).await, 1);
}

#[tokio::test]
async fn refresh_fills_one_state_per_device() {
    let server = MockServer::start().await;
    mount_listing(&server, "abc", listing()).await;
    let bridge = bridge_for(&server, BridgeConfig::new().with_token("abc"));

    assert_eq!(bridge.get_available_devices().await.len(), 3);

    let cache = bridge.cache_snapshot().await;
    assert_eq!(cache.len(), 3);
    assert_eq!(cache.states().get("d1"), Some(&true));
    assert_eq!(cache.states().get("d2"), Some(&false));
    assert_eq!(cache.states().get("d3"), Some(&true));
}

#[tokio::test]
async fn unknown_device_is_off() {
    let server = MockServer::start().await;
    mount_listing(&server, "abc", listing()).await;
    let bridge = bridge_for(&server, BridgeConfig::new().with_token("abc"));

    assert!(!bridge.get_device_status("nope").await);
}

#[tokio::test]
async fn reads_within_interval_share_one_request() {
    let server = MockServer::start().await;
    mount_listing(&server, "abc", listing()).await;
    let bridge = bridge_for(&server, BridgeConfig::new().with_token("abc"));

    let (a, b, c) = tokio::join!(
        bridge.get_device_status("d1"),
        bridge.get_available_devices(),
        bridge.get_device_status("d2"),
    );
    assert!(a);
    assert_eq!(b.len(), 3);
    assert!(!c);

    bridge.get_device_status("d3").await;
    assert_eq!(listing_requests(&server).await, 1);
}

#[tokio::test]
async fn stale_cache_is_refreshed() {
    let server = MockServer::start().await;
    mount_listing(&server, "abc", listing()).await;
    let bridge = bridge_for(
        &server,
        BridgeConfig::new()
            .with_token("abc")
            .with_refresh_interval(Duration::from_millis(100)),
    );

    bridge.get_available_devices().await;
    tokio::time::sleep(Duration::from_millis(200)).await;
    bridge.get_available_devices().await;

    assert_eq!(listing_requests(&server).await, 2);
}

#[tokio::test]
async fn failed_refresh_keeps_cache_and_suppresses_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/lights/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(listing()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/lights/all"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;
    let bridge = bridge_for(
        &server,
        BridgeConfig::new()
            .with_token("abc")
            .with_request_timeout(Duration::from_millis(200))
            .with_refresh_interval(Duration::from_secs(1)),
    );

    let before_devices = bridge.get_available_devices().await;
    let before = bridge.cache_snapshot().await;
    tokio::time::sleep(Duration::from_millis(1100)).await;

    // Stale: this read attempts a refresh which times out.
    let after_devices = bridge.get_available_devices().await;
    assert_eq!(after_devices, before_devices);
    assert_eq!(listing_requests(&server).await, 2);

    // The failed attempt still counts; no third request inside the interval.
    assert!(bridge.get_device_status("d1").await);
    assert_eq!(listing_requests(&server).await, 2);

    let after = bridge.cache_snapshot().await;
    assert_eq!(after.available(), before.available());
    assert_eq!(after.states(), before.states());
    assert!(bridge.history().await.last_error().is_some());
}

#[tokio::test]
async fn failed_first_refresh_serves_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/lights/all"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid token"})))
        .mount(&server)
        .await;
    let bridge = bridge_for(&server, BridgeConfig::new().with_token("bad"));

    assert!(bridge.get_available_devices().await.is_empty());
    assert!(!bridge.get_device_status("d1").await);
    assert_eq!(listing_requests(&server).await, 1);

    let err = bridge.refresh().await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 401, .. }));
}

#[tokio::test]
async fn malformed_listing_is_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/lights/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    let bridge = bridge_for(&server, BridgeConfig::new().with_token("abc"));

    assert!(matches!(bridge.refresh().await, Err(Error::JsonLoad(_))));
    assert!(bridge.cache_snapshot().await.is_empty());
}

#[tokio::test]
async fn toggle_sends_form_and_updates_cache() {
    let server = MockServer::start().await;
    mount_listing(&server, "abc", listing()).await;
    Mock::given(method("PUT"))
        .and(path("/v1/lights/id:d1/state"))
        .and(header("authorization", "Bearer abc"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("power=off"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let bridge = bridge_for(&server, BridgeConfig::new().with_token("abc"));

    assert!(bridge.get_device_status("d1").await);
    bridge.on_device_toggle("d1", false).await.unwrap();
    assert!(!bridge.get_device_status("d1").await);
    assert_eq!(listing_requests(&server).await, 1);
}

#[tokio::test]
async fn toggle_before_any_refresh_is_cached() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/lights/id:d9/state"))
        .and(body_string("power=on"))
        .respond_with(ResponseTemplate::new(207))
        .expect(1)
        .mount(&server)
        .await;
    let bridge = bridge_for(&server, BridgeConfig::new().with_token("abc"));

    bridge.on_device_toggle("d9", true).await.unwrap();

    let cache = bridge.cache_snapshot().await;
    assert!(cache.power("d9"));
    assert!(cache.since_refresh().is_none());
}

#[tokio::test]
async fn rejected_toggle_leaves_cache() {
    let server = MockServer::start().await;
    mount_listing(&server, "abc", listing()).await;
    Mock::given(method("PUT"))
        .and(path("/v1/lights/id:d1/state"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    let bridge = bridge_for(&server, BridgeConfig::new().with_token("abc"));

    assert!(bridge.get_device_status("d1").await);
    let err = bridge.on_device_toggle("d1", false).await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 429, .. }));
    assert!(bridge.get_device_status("d1").await);
}

#[tokio::test]
async fn unreachable_toggle_leaves_cache() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v1/lights/id:d1/state"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;
    let bridge = bridge_for(
        &server,
        BridgeConfig::new()
            .with_token("abc")
            .with_request_timeout(Duration::from_millis(200)),
    );

    let err = bridge.on_device_toggle("d1", true).await.unwrap_err();
    assert!(matches!(err, Error::Http { .. }));
    assert!(bridge.cache_snapshot().await.is_empty());
}

#[tokio::test]
async fn configuration_update_switches_token() {
    let server = MockServer::start().await;
    mount_listing(
        &server,
        "old",
        json!([{"id": "d1", "power": "off", "product": {"company": "LIFX", "name": "A19"}}]),
    )
    .await;
    mount_listing(
        &server,
        "new",
        json!([{"id": "d1", "power": "on", "product": {"company": "LIFX", "name": "A19"}}]),
    )
    .await;
    let bridge = bridge_for(&server, BridgeConfig::new().with_token("old"));

    assert!(!bridge.get_device_status("d1").await);

    bridge
        .on_configuration_update(&[ConfigKV::new("pak", "new")])
        .await;

    // A new token refreshes immediately, inside the 30 second window.
    assert!(bridge.get_device_status("d1").await);
    assert_eq!(listing_requests(&server).await, 2);
}

#[tokio::test]
async fn unchanged_token_keeps_window() {
    let server = MockServer::start().await;
    mount_listing(&server, "abc", listing()).await;
    let bridge = bridge_for(&server, BridgeConfig::new().with_token("abc"));

    bridge.get_available_devices().await;
    bridge
        .on_configuration_update(&[ConfigKV::new("pak", "abc")])
        .await;
    bridge.get_available_devices().await;

    assert_eq!(listing_requests(&server).await, 1);
}

#[tokio::test]
async fn diagnostics_report_cache_and_history() {
    let server = MockServer::start().await;
    mount_listing(&server, "abc", listing()).await;
    let bridge = bridge_for(&server, BridgeConfig::new().with_token("abc"));

    bridge.get_available_devices().await;
    let diag = bridge.diagnostics().await;

    assert_eq!(diag["manifest"]["Id"], "lifx");
    assert_eq!(diag["token_configured"], true);
    assert_eq!(diag["cache"]["devices"], 3);
    assert_eq!(diag["cache"]["powered_on"], 2);
    assert_eq!(diag["history"]["request_count"], 1);
    assert_eq!(diag["history"]["response_count"], 1);
    assert!(diag.to_string().find("abc").is_none());
}
