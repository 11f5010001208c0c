use super::{apply_env_overrides, apply_file_overrides, load_settings, ClientSettings};

use std::{
    collections::HashMap,
    env, fs,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_point_at_local_predict_endpoint() {
    let settings = ClientSettings::default();
    assert_eq!(
        settings.endpoint_url().expect("url").as_str(),
        "http://127.0.0.1:5001/predict"
    );
    assert_eq!(settings.reveal_delay(), Duration::from_millis(10));
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn endpoint_path_replaces_base_path() {
    let settings = ClientSettings {
        server_url: "https://energy.example.com/app/".into(),
        ..ClientSettings::default()
    };
    assert_eq!(
        settings.endpoint_url().expect("url").as_str(),
        "https://energy.example.com/predict"
    );
}

#[test]
fn rejects_unparseable_server_url() {
    let settings = ClientSettings {
        server_url: "not a url".into(),
        ..ClientSettings::default()
    };
    let err = settings.endpoint_url().expect_err("must fail");
    assert!(err.to_string().contains("not a url"), "unexpected error: {err}");
}

#[test]
fn file_values_override_defaults() {
    let mut settings = ClientSettings::default();
    apply_file_overrides(
        &mut settings,
        r#"
server_url = "http://10.0.0.5:8080"
reveal_delay_ms = "25"
request_timeout_secs = "30"
"#,
    );
    assert_eq!(settings.server_url, "http://10.0.0.5:8080");
    assert_eq!(settings.predict_path, "/predict");
    assert_eq!(settings.reveal_delay_ms, 25);
    assert_eq!(settings.request_timeout_secs, Some(30));
}

#[test]
fn unparseable_numbers_keep_defaults() {
    let mut settings = ClientSettings::default();
    apply_file_overrides(&mut settings, "reveal_delay_ms = \"soon\"\n");
    apply_env_overrides(
        &mut settings,
        lookup_from(&[("APP__REQUEST_TIMEOUT_SECS", "never")]),
    );
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn non_flat_file_is_ignored() {
    let mut settings = ClientSettings::default();
    apply_file_overrides(&mut settings, "[server]\nurl = \"http://x\"\n");
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let mut settings = ClientSettings::default();
    apply_env_overrides(
        &mut settings,
        lookup_from(&[
            ("PREDICT_SERVER_URL", "http://plain:1"),
            ("APP__SERVER_URL", "http://prefixed:2"),
            ("APP__PREDICT_PATH", "/v2/predict"),
            ("APP__REVEAL_DELAY_MS", "0"),
        ]),
    );
    assert_eq!(settings.server_url, "http://prefixed:2");
    assert_eq!(settings.predict_path, "/v2/predict");
    assert_eq!(settings.reveal_delay_ms, 0);
}

#[test]
fn load_settings_reads_file_when_present() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("predict_form_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("create temp dir");
    let path = temp_root.join("client.toml");
    fs::write(&path, "predict_path = \"/score\"\n").expect("write settings");

    let settings = load_settings(&path);
    assert_eq!(settings.predict_path, "/score");

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn load_settings_tolerates_missing_file() {
    let path = env::temp_dir().join("predict_form_config_test_missing/client.toml");
    let settings = load_settings(&path);
    assert_eq!(settings.reveal_delay_ms, 10);
}
