use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_POLL_INTERVAL_SECS: u32 = 60;
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_PERSONAL_DAY_LIMIT: u32 = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuntimeConfig {
    #[serde(default, alias = "API_BASE_URL")]
    pub api_base_url: Option<String>,
    #[serde(default, alias = "POLL_INTERVAL_SECS")]
    pub poll_interval_secs: Option<u32>,
    #[serde(default, alias = "PAGE_SIZE")]
    pub page_size: Option<usize>,
    #[serde(default, alias = "PERSONAL_DAY_LIMIT")]
    pub personal_day_limit: Option<u32>,
}

/// Effective settings after defaults are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub poll_interval_secs: u32,
    pub page_size: usize,
    pub personal_day_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_runtime(RuntimeConfig::default())
    }
}

impl AppConfig {
    pub fn from_runtime(cfg: RuntimeConfig) -> Self {
        Self {
            api_base_url: cfg
                .api_base_url
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            poll_interval_secs: cfg
                .poll_interval_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
            page_size: cfg
                .page_size
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            personal_day_limit: cfg
                .personal_day_limit
                .unwrap_or(DEFAULT_PERSONAL_DAY_LIMIT),
        }
    }
}

static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Returns the loaded configuration, or defaults before `init` completes.
pub fn current() -> AppConfig {
    APP_CONFIG.get().cloned().unwrap_or_default()
}

fn cache_config(cfg: AppConfig) -> AppConfig {
    let _ = APP_CONFIG.set(cfg.clone());
    APP_CONFIG.get().cloned().unwrap_or(cfg)
}

#[cfg(target_arch = "wasm32")]
fn read_global(name: &str) -> Option<RuntimeConfig> {
    // Optional global objects: window.__VACATIONS_ENV (env.js) and
    // window.__VACATIONS_CONFIG, e.g. { api_base_url: "..." }
    let window = web_sys::window()?;
    let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let json = js_sys::JSON::stringify(&any).ok()?.as_string()?;
    serde_json::from_str(&json).ok()
}

#[cfg(target_arch = "wasm32")]
fn snapshot_from_globals() -> Option<RuntimeConfig> {
    read_global("__VACATIONS_ENV").or_else(|| read_global("__VACATIONS_CONFIG"))
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_from_globals() -> Option<RuntimeConfig> {
    None
}

async fn fetch_runtime_config() -> anyhow::Result<RuntimeConfig> {
    let resp = reqwest::get(config_json_url()).await?;
    if !resp.status().is_success() {
        anyhow::bail!("config.json returned {}", resp.status());
    }
    Ok(resp.json::<RuntimeConfig>().await?)
}

#[cfg(target_arch = "wasm32")]
fn config_json_url() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .map(|origin| format!("{}/config.json", origin))
        .unwrap_or_else(|| "./config.json".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn config_json_url() -> String {
    "http://localhost/config.json".to_string()
}

pub async fn load() -> AppConfig {
    if let Some(cached) = APP_CONFIG.get() {
        return cached.clone();
    }
    if let Some(existing) = snapshot_from_globals() {
        return cache_config(AppConfig::from_runtime(existing));
    }
    match fetch_runtime_config().await {
        Ok(cfg) => cache_config(AppConfig::from_runtime(cfg)),
        Err(err) => {
            log::warn!("Falling back to default runtime config: {}", err);
            cache_config(AppConfig::default())
        }
    }
}

pub async fn await_api_base_url() -> String {
    load().await.api_base_url
}

pub async fn init() {
    let cfg = load().await;
    log::info!("API base URL: {}", cfg.api_base_url);
}
