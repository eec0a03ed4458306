//! # vectorcheck
//!
//! Classify PDF pages as vector artwork versus plain text.
//!
//! ## Why this crate?
//!
//! Rendering a page to pixels and running image analysis is an expensive way
//! to answer a cheap question: "does this page carry intentional vector
//! content (illustrations, technical drawings, diagrams) or is it just
//! running text with a few decorative rules?" The page's own content stream
//! already says. This crate walks the raw PDF drawing operators, counts the
//! geometric primitives (line, curve and rectangle operators) and the shown
//! text, and feeds those counts through a rule-based scorer that returns a
//! boolean verdict, the matched categories, and a human-readable reason.
//!
//! ## Pipeline Overview
//!
//! ```text
//! URL
//!  │
//!  ├─ 1. Fetch     download with retry/backoff, timeout pair, size ceiling
//!  ├─ 2. Extract   lopdf content-stream walk → per-page PageMetrics
//!  ├─ 3. Classify  rule-based scorer → ClassificationResult per page
//!  └─ 4. Report    DocumentReport with vector-page list, input order kept
//! ```
//!
//! Steps 1–2 are I/O plumbing; step 3 is the core and is a pure function:
//! same metrics in, same verdict out, with no hidden state between pages.
//!
//! ## Quick Start
//!
//! ```rust
//! use vectorcheck::{Classifier, PageMetrics};
//!
//! let classifier = Classifier::default();
//! let metrics = PageMetrics {
//!     line_count: 12,
//!     curve_count: 3,
//!     rect_count: 1,
//!     char_count: 40,
//!     text_length: 50,
//! };
//! let result = classifier.classify(&metrics);
//! assert!(result.is_vector);
//! println!("{}", result.reason);
//! ```
//!
//! ## HTTP surface
//!
//! The `vectorcheck` binary exposes `GET /vector-check?pdf_url=<url>` plus
//! `/health` and `/`. The same router is available to embedders via
//! [`server::router`].

// ── Modules ──────────────────────────────────────────────────────────────

pub mod classify;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod server;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use classify::{
    ClassificationResult, Classifier, ClassifierThresholds, PageMetrics, VectorCategory,
};
pub use config::{ServiceConfig, ServiceConfigBuilder};
pub use error::{PageError, VectorCheckError};
pub use pipeline::extract::extract_pages;
pub use pipeline::fetch::Fetcher;
pub use report::{DocumentReport, PageNumbering, PageReport};
