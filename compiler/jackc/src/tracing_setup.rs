use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set, e.g.
/// `RUST_LOG=jack_codegen=debug`. With `JACKC_LOG_TREE` also set, events are
/// rendered as an indented tree grouped by unit.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }

        let filter = EnvFilter::from_default_env();
        let tree = std::env::var_os("JACKC_LOG_TREE").is_some();

        let tree_layer = tree.then(|| {
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_indent_lines(true)
        });
        let fmt_layer = (!tree).then(|| {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
        });

        tracing_subscriber::registry()
            .with(filter)
            .with(tree_layer)
            .with(fmt_layer)
            .init();
    });
}
