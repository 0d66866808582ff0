use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_explicit_override() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("CLASSIC_PLAYER_CONFIG_PATH", "/tmp/classic-player-test.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/classic-player-test.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("classic-player")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("classic-player")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_classic_shortcut_behavior() {
    let s = Settings::default();
    assert_eq!(s.playback.seek_step_secs, 5.0);
    assert_eq!(s.playback.volume_step, 0.05);
    assert_eq!(s.playback.previous_threshold_secs, 5.0);
    assert_eq!(
        s.playback.previous_policy,
        PreviousPolicySetting::RestartThenPrevious
    );
    assert_eq!(s.artwork.batch_size, 3);
    assert!(s.artwork.countries.is_empty());
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file_and_parse_policy_aliases() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
seek_step_secs = 10.0
volume_step = 0.1
previous_policy = "always_previous"
previous_threshold_secs = 3.0

[artwork]
enabled = false
batch_size = 5
countries = ["GB", "US"]

[ui]
show_queue = false
picker_start_dir = "/media"

[startup]
check_for_updates = false
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CLASSIC_PLAYER_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("CLASSIC_PLAYER__ARTWORK__BATCH_SIZE");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.seek_step_secs, 10.0);
    assert_eq!(s.playback.volume_step, 0.1);
    assert_eq!(s.playback.previous_policy, PreviousPolicySetting::AlwaysPrevious);
    assert_eq!(s.playback.previous_threshold_secs, 3.0);
    assert!(!s.artwork.enabled);
    assert_eq!(s.artwork.batch_size, 5);
    assert_eq!(s.artwork.countries, vec!["GB".to_string(), "US".to_string()]);
    assert_eq!(s.artwork.search_endpoint, "https://itunes.apple.com/search");
    assert!(!s.ui.show_queue);
    assert_eq!(s.ui.picker_start_dir.as_deref(), Some("/media"));
    assert!(!s.startup.check_for_updates);
    assert!(s.startup.restore_window_size);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[artwork]
batch_size = 2
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("CLASSIC_PLAYER_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("CLASSIC_PLAYER__ARTWORK__BATCH_SIZE", "7");

    let s = Settings::load().unwrap();
    assert_eq!(s.artwork.batch_size, 7);
}

#[test]
fn validate_rejects_zero_batch_and_bad_steps() {
    let mut s = Settings::default();
    s.artwork.batch_size = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.volume_step = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.seek_step_secs = 0.0;
    assert!(s.validate().is_err());
}
