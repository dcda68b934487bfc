//! End-to-end lifecycle tests for the betteruptime_monitor resource
//!
//! A stateful mock server stands in for the remote API: POST stores and
//! echoes the payload while injecting a server-computed pronounceable
//! name, PATCH merges the delta into what is stored, GET returns the
//! stored attributes, and DELETE clears them. The tests walk the full
//! create/read/update/import/delete sequence against it.

use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{bearer_token, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use betteruptime_provider::provider::{lifecycle, registry, state::AttrMap, ProviderConfig};
use betteruptime_provider::ApiClient;

const API_TOKEN: &str = "foo";
const MONITOR_ID: &str = "1";
const COLLECTION: &str = "/api/v2/monitors";

/// Attributes currently stored by the mock API; `None` means no monitor exists
type Stored = Arc<Mutex<Option<Map<String, Value>>>>;

fn envelope(attributes: &Map<String, Value>) -> Value {
    json!({"data": {"id": MONITOR_ID, "attributes": attributes}})
}

/// POST /api/v2/monitors - store the payload, inject pronounceable_name
struct CreateMonitor {
    stored: Stored,
}

impl Respond for CreateMonitor {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut attributes: Map<String, Value> =
            serde_json::from_slice(&request.body).expect("create body should be a JSON object");
        attributes.insert("pronounceable_name".into(), json!("computed_by_betteruptime"));
        *self.stored.lock().unwrap() = Some(attributes.clone());
        ResponseTemplate::new(201).set_body_json(envelope(&attributes))
    }
}

/// GET /api/v2/monitors/1 - return stored attributes or 404
struct GetMonitor {
    stored: Stored,
}

impl Respond for GetMonitor {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        match self.stored.lock().unwrap().as_ref() {
            Some(attributes) => ResponseTemplate::new(200).set_body_json(envelope(attributes)),
            None => ResponseTemplate::new(404).set_body_json(json!({"errors": "Resource not found"})),
        }
    }
}

/// PATCH /api/v2/monitors/1 - merge the delta into stored attributes
struct PatchMonitor {
    stored: Stored,
}

impl Respond for PatchMonitor {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let delta: Map<String, Value> =
            serde_json::from_slice(&request.body).expect("patch body should be a JSON object");
        let mut stored = self.stored.lock().unwrap();
        let Some(attributes) = stored.as_mut() else {
            return ResponseTemplate::new(404).set_body_json(json!({"errors": "Resource not found"}));
        };
        for (name, value) in delta {
            attributes.insert(name, value);
        }
        ResponseTemplate::new(200).set_body_json(envelope(attributes))
    }
}

/// DELETE /api/v2/monitors/1 - clear storage, 404 when already gone
struct DeleteMonitor {
    stored: Stored,
}

impl Respond for DeleteMonitor {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let mut stored = self.stored.lock().unwrap();
        if stored.take().is_none() {
            return ResponseTemplate::new(404).set_body_json(json!({"errors": "Resource not found"}));
        }
        ResponseTemplate::new(204)
    }
}

async fn mock_api(stored: &Stored) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COLLECTION))
        .and(bearer_token(API_TOKEN))
        .respond_with(CreateMonitor {
            stored: stored.clone(),
        })
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{COLLECTION}/{MONITOR_ID}")))
        .and(bearer_token(API_TOKEN))
        .respond_with(GetMonitor {
            stored: stored.clone(),
        })
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("{COLLECTION}/{MONITOR_ID}")))
        .and(bearer_token(API_TOKEN))
        .respond_with(PatchMonitor {
            stored: stored.clone(),
        })
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("{COLLECTION}/{MONITOR_ID}")))
        .and(bearer_token(API_TOKEN))
        .respond_with(DeleteMonitor {
            stored: stored.clone(),
        })
        .mount(&server)
        .await;

    server
}

fn client_for(server: &MockServer) -> ApiClient {
    init_tracing();
    ProviderConfig::new(API_TOKEN)
        .with_base_url(server.uri())
        .client()
        .expect("client should build")
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn config(value: Value) -> AttrMap {
    value.as_object().expect("config should be an object").clone()
}

#[tokio::test]
async fn monitor_full_lifecycle() {
    let stored = Stored::default();
    let server = mock_api(&stored).await;
    let client = client_for(&server);
    let def = registry::get_resource("betteruptime_monitor").unwrap();

    // Step 1 - create.
    let config1 = config(json!({
        "url": "http://example.com",
        "monitor_type": "status",
        "paused": true,
        "regions": ["us", "eu"],
    }));
    let created = lifecycle::create(&client, def, &config1).await.unwrap();
    assert_eq!(created.id, MONITOR_ID);
    assert_eq!(created.get("url"), Some(&json!("http://example.com")));
    assert_eq!(created.get("monitor_type"), Some(&json!("status")));
    assert_eq!(created.get("paused"), Some(&json!(true)));
    assert_eq!(created.get("regions"), Some(&json!(["us", "eu"])));
    assert_eq!(
        created.get("pronounceable_name"),
        Some(&json!("computed_by_betteruptime")),
        "server-computed field should land in state"
    );

    // Refresh returns exactly what create stored.
    let refreshed = lifecycle::read(&client, def, &created).await.unwrap().unwrap();
    assert_eq!(refreshed, created);

    // Identical configuration plans to an empty diff.
    let diff = betteruptime_provider::provider::state::plan(def, Some(&refreshed), &config1).unwrap();
    assert!(diff.is_empty(), "unexpected changes: {:?}", diff.changes);

    // Step 2 - update: paused removed (reverts to default), computed name overridden.
    let config2 = config(json!({
        "url": "http://example.com",
        "monitor_type": "status",
        "pronounceable_name": "override",
    }));
    let updated = lifecycle::update(&client, def, &refreshed, &config2).await.unwrap();
    assert_eq!(updated.get("url"), Some(&json!("http://example.com")));
    assert_eq!(updated.get("paused"), Some(&json!(false)));
    assert_eq!(updated.get("pronounceable_name"), Some(&json!("override")));

    // Step 3 - update http_method only; the earlier override must survive.
    let config3 = config(json!({
        "url": "http://example.com",
        "monitor_type": "status",
        "http_method": "POST",
    }));
    let updated = lifecycle::update(&client, def, &updated, &config3).await.unwrap();
    assert_eq!(updated.get("http_method"), Some(&json!("POST")));
    assert_eq!(updated.get("pronounceable_name"), Some(&json!("override")));
    assert_eq!(updated.get("paused"), Some(&json!(false)));
    assert_eq!(updated.get("monitor_type"), Some(&json!("status")));

    // Step 4 - re-applying the same configuration plans to nothing.
    let diff = betteruptime_provider::provider::state::plan(def, Some(&updated), &config3).unwrap();
    assert!(diff.is_empty(), "unexpected changes: {:?}", diff.changes);

    // Step 5 - import by id reconstructs the same state.
    let imported = lifecycle::import(&client, def, MONITOR_ID).await.unwrap().unwrap();
    assert_eq!(imported, updated);

    // Destroy, then verify the monitor is gone.
    lifecycle::delete(&client, def, &updated).await.unwrap();
    assert!(lifecycle::read(&client, def, &updated).await.unwrap().is_none());
    assert!(lifecycle::import(&client, def, MONITOR_ID).await.unwrap().is_none());
}

#[tokio::test]
async fn unchanged_config_issues_no_update_call() {
    let stored = Stored::default();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(COLLECTION))
        .and(bearer_token(API_TOKEN))
        .respond_with(CreateMonitor {
            stored: stored.clone(),
        })
        .mount(&server)
        .await;

    // No PATCH is allowed on this server.
    Mock::given(method("PATCH"))
        .and(path(format!("{COLLECTION}/{MONITOR_ID}")))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let def = registry::get_resource("betteruptime_monitor").unwrap();

    let desired = config(json!({
        "url": "http://example.com",
        "monitor_type": "status",
        "paused": true,
    }));
    let created = lifecycle::create(&client, def, &desired).await.unwrap();

    let unchanged = lifecycle::update(&client, def, &created, &desired).await.unwrap();
    assert_eq!(unchanged, created);
}

#[tokio::test]
async fn delete_after_remote_removal_succeeds() {
    let stored = Stored::default();
    let server = mock_api(&stored).await;
    let client = client_for(&server);
    let def = registry::get_resource("betteruptime_monitor").unwrap();

    let desired = config(json!({
        "url": "http://example.com",
        "monitor_type": "status",
    }));
    let created = lifecycle::create(&client, def, &desired).await.unwrap();

    // Simulate out-of-band deletion.
    *stored.lock().unwrap() = None;

    lifecycle::delete(&client, def, &created)
        .await
        .expect("deleting an already-absent monitor should succeed");
}
