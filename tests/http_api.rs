use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, Value};
use tempfile::NamedTempFile;

use PlayerDB::config::{ServerConfig, StoreConfig};
use PlayerDB::server::handler::{handle, CONTENT_TYPE_JSON, CONTENT_TYPE_PROMETHEUS};
use PlayerDB::store::{plan_page, IndexedFileStore, Page, RecordStore};
use PlayerDB::{Record, StoreError};

/// Canned store: two players, and "boom" always fails to read.
struct MockStore {
    records: Vec<Record>,
}

impl MockStore {
    fn new() -> Self {
        let records = vec![
            Record::from_iter([("playerID", "p1"), ("name", "Alex")]),
            Record::from_iter([("playerID", "p2"), ("name", "Alexa")]),
        ];
        Self { records }
    }
}

impl RecordStore for MockStore {
    fn load(&self, _path: &Path) -> PlayerDB::Result<()> {
        Ok(())
    }

    fn get_by_key(&self, key: &str) -> PlayerDB::Result<Option<Record>> {
        if key == "boom" {
            return Err(StoreError::Read {
                key: key.to_string(),
                reason: "disk on fire".to_string(),
                source: None,
            });
        }
        Ok(self
            .records
            .iter()
            .find(|r| r.get("playerID") == Some(key))
            .cloned())
    }

    fn get_page(&self, page: usize, limit: usize) -> PlayerDB::Result<Page> {
        let plan = plan_page(page, limit, self.records.len(), 200)?;
        Ok(Page {
            number: plan.page,
            limit: plan.limit,
            max_page: plan.max_page,
            total_count: self.records.len(),
            records: self.records[plan.start..plan.end].to_vec(),
        })
    }

    fn total_count(&self) -> usize {
        self.records.len()
    }

    fn header(&self) -> Vec<String> {
        vec!["playerID".into(), "name".into()]
    }
}

fn get(store: &dyn RecordStore, url: &str) -> (u16, Value) {
    let resp = handle(store, &ServerConfig::default(), "GET", url);
    assert_eq!(resp.content_type, CONTENT_TYPE_JSON, "{url}");
    let body: Value = serde_json::from_str(&resp.body).expect("json body");
    (resp.status, body)
}

#[test]
fn health_is_unconditional() {
    let empty = IndexedFileStore::new(StoreConfig::default());
    let (status, body) = get(&empty, "/health");
    assert_eq!(status, 200);
    assert_eq!(body, json!({"status": "ok"}));
}

#[test]
fn list_players_with_explicit_params() {
    let store = MockStore::new();
    let (status, body) = get(&store, "/api/players?page=1&limit=2");
    assert_eq!(status, 200);
    assert_eq!(body["total_players"], 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 2);
    assert_eq!(body["players"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["players"][0], json!({"playerID": "p1", "name": "Alex"}));
}

#[test]
fn list_players_defaults_and_clamp() {
    let store = MockStore::new();
    let (status, body) = get(&store, "/api/players");
    assert_eq!(status, 200);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 100);

    let (status, body) = get(&store, "/api/players?limit=500");
    assert_eq!(status, 200);
    assert_eq!(body["limit"], 200, "effective limit is reported");
}

#[test]
fn list_players_rejects_bad_params() {
    let store = MockStore::new();
    for url in [
        "/api/players?page=0",
        "/api/players?limit=0",
        "/api/players?page=-3&limit=10",
    ] {
        let (status, body) = get(&store, url);
        assert_eq!(status, 400, "{url}");
        assert_eq!(body["error"], "Page and limit must be greater than 0", "{url}");
    }

    let (status, body) = get(&store, "/api/players?page=abc");
    assert_eq!(status, 400);
    assert!(body["error"].as_str().unwrap_or_default().contains("page"));
}

#[test]
fn list_players_query_is_form_decoded() {
    let store = MockStore::new();
    let (status, body) = get(&store, "/api/players?page=%32&limit=+1&sort=name");
    assert_eq!(status, 200);
    assert_eq!(body["page"], 2);
    assert_eq!(body["limit"], 1);
    assert_eq!(body["players"][0]["playerID"], "p2");

    let (status, body) = get(&store, "/api/players?limit=%7A");
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid 'limit' value 'z': must be an integer");
}

#[test]
fn list_players_page_out_of_range() {
    let store = MockStore::new();
    let (status, body) = get(&store, "/api/players?page=3&limit=1");
    assert_eq!(status, 400);
    assert_eq!(
        body["error"],
        "Invalid 'page' value 3. Must be between 1 and 2."
    );
}

#[test]
fn get_player_found_missing_and_broken() {
    let store = MockStore::new();

    let (status, body) = get(&store, "/api/players/p1");
    assert_eq!(status, 200);
    assert_eq!(body["playerID"], "p1");
    assert_eq!(body["name"], "Alex");

    let (status, body) = get(&store, "/api/players/p3");
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Requested player=p3 is not found");

    let (status, body) = get(&store, "/api/players/boom");
    assert_eq!(status, 500);
    assert!(body["error"].as_str().unwrap_or_default().contains("disk on fire"));
}

#[test]
fn player_id_is_percent_decoded() -> Result<()> {
    let mut f = NamedTempFile::new()?;
    f.write_all("playerID,name\nde la cruz01,Luis\nplain,Pat\n".as_bytes())?;
    f.flush()?;
    let store = IndexedFileStore::open(f.path(), StoreConfig::default())?;

    let (status, body) = get(&store, "/api/players/de%20la%20cruz01");
    assert_eq!(status, 200);
    assert_eq!(body["name"], "Luis");
    Ok(())
}

#[test]
fn unknown_routes_and_methods() {
    let store = MockStore::new();
    let cfg = ServerConfig::default();

    for url in ["/", "/api", "/api/players/", "/api/players/p1/extra", "/api/playersX"] {
        let resp = handle(&store, &cfg, "GET", url);
        assert_eq!(resp.status, 404, "{url}");
    }

    let resp = handle(&store, &cfg, "POST", "/api/players");
    assert_eq!(resp.status, 405);
    let resp = handle(&store, &cfg, "DELETE", "/api/players/p1");
    assert_eq!(resp.status, 405);
}

#[test]
fn real_store_end_to_end() -> Result<()> {
    let mut f = NamedTempFile::new()?;
    f.write_all(b"playerID,name\np1,Alex\np2,Alexa\np3,Bob\np4,Alice\n")?;
    f.flush()?;
    let store = IndexedFileStore::open(f.path(), StoreConfig::default())?;

    let (status, body) = get(&store, "/api/players?page=2&limit=3");
    assert_eq!(status, 200);
    assert_eq!(body["total_players"], 4);
    assert_eq!(body["players"], json!([{"playerID": "p4", "name": "Alice"}]));

    let (status, _) = get(&store, "/api/players?page=3&limit=2");
    assert_eq!(status, 400);
    Ok(())
}

#[test]
fn metrics_route_is_prometheus_text() {
    let store = MockStore::new();
    let resp = handle(&store, &ServerConfig::default(), "GET", "/metrics");
    assert_eq!(resp.status, 200);
    assert_eq!(resp.content_type, CONTENT_TYPE_PROMETHEUS);
    assert!(resp.body.contains("# TYPE playerdb_lookups_total counter"));
    assert!(resp.body.contains("playerdb_build_info{version="));
}
