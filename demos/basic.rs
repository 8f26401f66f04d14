//! Two independent facades over one shared emitter.
//!
//! Run with `cargo run --example basic`.

use named_events::{proxy_listener, Emitter, Listener};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let em: Emitter<String> = Emitter::new();

    // One subsystem listens through a renamed facade.
    let ui = proxy_listener([("row:selected", "onRowSelected")]).bind(&em);
    ui.register(
        "onRowSelected",
        [Listener::new(|row: &String| {
            println!("[ui] highlighting {row}");
        })],
    )
    .expect("method is in the event map");

    // Another registers directly on the emitter.
    em.on(
        "row:selected",
        [Listener::new(|row: &String| {
            println!("[audit] {row} selected");
        })],
    );

    em.dispatch("row:selected", &"row-7".to_string());

    // Tearing the facade down leaves the audit listener in place.
    ui.off_all();
    em.dispatch("row:selected", &"row-9".to_string());
}
