//! Headless demo of the reveal pipeline.
//!
//! Drives a `RevealDriver` and a `ScrollProgressTracker` against the
//! simulated host: a "card" sits partway down a scripted page, the
//! page scrolls past it over a few seconds of frames, and the computed
//! style snapshots are logged as the card reveals itself.

use std::sync::Arc;

use scroll_reveal::{ElementRect, RevealArgs, RevealDriver, ScrollProgressTracker, sim::SimHost};
use tracing::info;

const VIEWPORT_HEIGHT: f32 = 800.0;
const CONTENT_HEIGHT: f32 = 2400.0;
/// Distance from the top of the page to the card's top edge.
const CARD_PAGE_TOP: f32 = 1400.0;
const CARD_HEIGHT: f32 = 400.0;
const FRAMES: u32 = 180;

fn main() {
    init_tracing();

    let host = Arc::new(SimHost::new());
    host.set_viewport(VIEWPORT_HEIGHT, CONTENT_HEIGHT);

    let driver = RevealDriver::new(
        host.clone(),
        host.clone(),
        host.clone(),
        RevealArgs::default(),
    );
    let tracker = ScrollProgressTracker::new(host.clone(), host.clone());
    driver.attach();
    tracker.attach();

    for frame in 0..=FRAMES {
        // Scripted scroll: smoothstep from the top of the page to the
        // bottom over the whole run.
        let t = frame as f32 / FRAMES as f32;
        let scroll_y = (CONTENT_HEIGHT - VIEWPORT_HEIGHT) * t * t * (3.0 - 2.0 * t);
        host.set_scroll_y(scroll_y);
        host.set_element(Some(ElementRect {
            top: CARD_PAGE_TOP - scroll_y,
            height: CARD_HEIGHT,
        }));

        host.step_frame();

        if frame % 30 == 0 {
            let style = driver.style();
            let scroll = tracker.state();
            info!(
                frame,
                scroll_y = scroll.scroll_y,
                scroll_progress = scroll.scroll_progress,
                opacity = %style.opacity,
                transform = %style.transform,
                "tick"
            );
        }
    }

    tracker.detach();
    driver.detach();
    info!("demo finished");
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => tracing_subscriber::EnvFilter::new("info"),
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
