#[cfg(target_arch = "wasm32")]
fn main() {
    use vacations_frontend::{config, router};

    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"console logger already initialized".into());
    }
    let perf = web_sys::window().and_then(|w| w.performance().ok());
    let t0 = perf.as_ref().map(|p| p.now());
    log::info!("starting vacations frontend: initializing runtime config");

    // window.__VACATIONS_ENV (env.js) takes precedence over ./config.json.
    wasm_bindgen_futures::spawn_local(async move {
        config::init().await;
        match (perf.as_ref(), t0) {
            (Some(p), Some(start)) => {
                log::info!("runtime config initialized ({} ms)", p.now() - start)
            }
            _ => log::info!("runtime config initialized"),
        }
        router::mount_app();
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {}
