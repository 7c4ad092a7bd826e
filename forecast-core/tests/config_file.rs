use forecast_core::{Config, ServiceId};

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("defaults");

    assert!(cfg.providers.is_empty());
    assert_eq!(cfg.forecast.max_days, forecast_core::DEFAULT_MAX_DAYS);
}

#[test]
fn saved_config_loads_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("config.toml");

    let mut cfg = Config::default();
    cfg.upsert_provider_api_key(ServiceId::OpenWeather, "OPEN_KEY".into());
    cfg.upsert_provider_api_key(ServiceId::Cohere, "COHERE_KEY".into());
    cfg.forecast.max_days = 5;
    cfg.save_to(&path).expect("save");

    let loaded = Config::load_from(&path).expect("load");
    assert_eq!(loaded.provider_api_key(ServiceId::OpenWeather), Some("OPEN_KEY"));
    assert_eq!(loaded.provider_api_key(ServiceId::Cohere), Some("COHERE_KEY"));
    assert_eq!(loaded.provider_model(ServiceId::Cohere), None);
    assert_eq!(loaded.forecast.max_days, 5);
}

#[test]
fn overrides_in_file_are_read() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[providers.openweather]
api_key = "abc"
base_url = "http://localhost:8080/data/2.5"

[providers.cohere]
api_key = "xyz"
model = "command-light"

[forecast]
max_days = 3
"#,
    )
    .expect("write config");

    let cfg = Config::load_from(&path).expect("load");
    assert_eq!(
        cfg.provider_base_url(ServiceId::OpenWeather),
        Some("http://localhost:8080/data/2.5")
    );
    assert_eq!(cfg.provider_model(ServiceId::Cohere), Some("command-light"));
    assert_eq!(cfg.forecast.max_days, 3);
}

#[test]
fn invalid_toml_reports_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "providers = [").expect("write config");

    let err = Config::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}
