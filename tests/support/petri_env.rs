use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_HOME_VAR: &str = "PETRI_CONFIG_HOME";
const API_BASE_URL_VAR: &str = "PETRI_API_BASE_URL";

/// Points the config layer at a scratch directory and clears the backend
/// address override so tests only see what they wrote themselves.
pub struct PetriEnvGuard {
    previous_home: Option<String>,
    previous_api: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl PetriEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous_home = std::env::var(CONFIG_HOME_VAR).ok();
        let previous_api = std::env::var(API_BASE_URL_VAR).ok();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_VAR, path);
            std::env::remove_var(API_BASE_URL_VAR);
        }
        Self {
            previous_home,
            previous_api,
            _lock: lock,
        }
    }
}

impl Drop for PetriEnvGuard {
    fn drop(&mut self) {
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            match self.previous_home.take() {
                Some(value) => std::env::set_var(CONFIG_HOME_VAR, value),
                None => std::env::remove_var(CONFIG_HOME_VAR),
            }
            match self.previous_api.take() {
                Some(value) => std::env::set_var(API_BASE_URL_VAR, value),
                None => std::env::remove_var(API_BASE_URL_VAR),
            }
        }
    }
}
