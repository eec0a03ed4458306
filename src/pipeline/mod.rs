//! Pipeline stages for URL-to-report classification.
//!
//! Each submodule implements exactly one transformation step. Keeping
//! stages separate makes each independently testable and lets us swap
//! implementations (e.g. a different PDF parser) without touching the
//! other stage.
//!
//! ## Data Flow
//!
//! ```text
//! fetch ──▶ extract ──▶ classify/report
//! (reqwest)  (lopdf)    (pure, see crate::classify)
//! ```
//!
//! 1. [`fetch`]   — download the PDF with a bounded retry policy, a
//!    connect/read timeout pair, and an incrementally-enforced size
//!    ceiling; the only stage with network I/O
//! 2. [`extract`] — walk each page's content stream and count drawing
//!    operators; runs in `spawn_blocking` because lopdf parsing is
//!    CPU-bound

pub mod extract;
pub mod fetch;
