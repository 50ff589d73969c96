use tracing::Level;

pub fn parse_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" | "warning" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Installs the console subscriber and panic hook. Later calls are ignored.
#[cfg(target_arch = "wasm32")]
pub fn init(level: &str) {
    use std::sync::Once;

    static INIT: Once = Once::new();
    let level = parse_level(level);
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        let config = tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(level)
            .build();
        tracing_wasm::set_as_global_default_with_config(config);
    });
}
