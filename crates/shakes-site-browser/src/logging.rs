use std::sync::Once;

use tracing::Level;
use tracing::subscriber::set_global_default;
use tracing_subscriber::Registry;
use tracing_subscriber::layer::SubscriberExt;

static INIT: Once = Once::new();

/// Panic hook plus a console tracing subscriber. Safe to call more than once.
pub fn init() {
    INIT.call_once(|| {
        // Set up better panic messages for wasm
        console_error_panic_hook::set_once();

        let console_level = if cfg!(debug_assertions) {
            Level::DEBUG
        } else {
            Level::INFO
        };

        let wasm_layer = tracing_wasm::WASMLayer::new(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(console_level)
                .build(),
        );

        let reg = Registry::default().with(wasm_layer);

        // someone else may have installed a subscriber already
        let _ = set_global_default(reg);
    });
}
