use psf_domain::config::{
    ApiConfig, CostResolutionMode, LoggingConfig, PgtuneConfig, ServerConfig, SponsorshipConfig,
};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 8000);
    assert!(server.ssl.is_none());

    let sponsorship = SponsorshipConfig::default();
    assert!(sponsorship.catalog.is_none());
    assert_eq!(sponsorship.cost_resolution, CostResolutionMode::Static);
    assert_eq!(sponsorship.desktop_width_limit, 1200);

    let pgtune = PgtuneConfig::default();
    assert_eq!(pgtune.db_type, "mixed");
    assert_eq!(pgtune.machine, "x86_64");
    assert!(pgtune.total_memory.is_none());

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "info");
    assert!(logging.path.is_none());
    assert!(!logging.json);
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "sponsorship": {
            "catalog": "/srv/catalog.json",
            "cost_resolution": "remote",
            "cost_endpoint": "https://www.python.org/sponsors/cost/"
        },
        "pgtune": { "db_type": "web", "total_memory": "8388608kB" },
        "logging": { "level": "debug", "json": true }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.sponsorship.cost_resolution, CostResolutionMode::Remote);
    assert_eq!(cfg.sponsorship.catalog.as_deref(), Some(std::path::Path::new("/srv/catalog.json")));
    assert_eq!(cfg.sponsorship.cost_timeout_seconds, 10);
    assert_eq!(cfg.pgtune.db_type, "web");
    assert_eq!(cfg.pgtune.machine, "x86_64");
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert_eq!(cfg.logging.max_files, 10);
}

#[test]
fn api_config_is_cheap_to_clone_and_copy_on_write() {
    let original = ApiConfig::default();
    let mut edited = original.clone();
    edited.server.port = 9000;

    assert_eq!(original.server.port, 8000);
    assert_eq!(edited.server.port, 9000);
}
