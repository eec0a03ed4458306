//! Page classification: rule-based scoring of vector-primitive counts.
//!
//! ## Why counts instead of geometry?
//!
//! A page that is "mostly drawing" differs from a page that is "mostly text"
//! in the raw operator statistics of its content stream long before any
//! geometric interpretation. Counting line, curve and rectangle operators
//! and normalising against the amount of shown text separates technical
//! drawings from body text with a handful of integer comparisons, without
//! rendering, path flattening, or bounding-box math.
//!
//! ## Decision order
//!
//! The scorer is tiered: a no-graphics short-circuit first, then a
//! layout-only exclusion that *must* win over the category predicates (a few
//! decorative rules inside dense text would otherwise weakly match
//! `illustration`), and finally four independent category predicates whose
//! results are unioned. The tiers are ordered; the categories are not.
//!
//! [`Classifier::classify`] is a pure function: no I/O, no state carried
//! between pages, and no failure path (all arithmetic saturates, so no
//! input can panic it).

use serde::{Deserialize, Serialize};

// ── Input ────────────────────────────────────────────────────────────────

/// Per-page facts extracted from the content stream, computed once per page.
///
/// All counts refer to content-stream operators: `l` for lines, `c`/`v`/`y`
/// for Bézier curves, `re` for rectangles, and the show-text operators for
/// characters. `text_length` is the length of the extracted, trimmed page
/// text, which can differ from `char_count` (ligatures, encoding expansion,
/// whitespace trimming).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetrics {
    /// Straight path segments (`l` operators).
    pub line_count: u32,
    /// Bézier segments (`c`, `v`, `y` operators).
    pub curve_count: u32,
    /// Rectangle subpaths (`re` operators).
    pub rect_count: u32,
    /// Characters drawn by show-text operators.
    pub char_count: u32,
    /// Length of the extracted, trimmed page text.
    pub text_length: u32,
}

// ── Output ───────────────────────────────────────────────────────────────

/// Category tags a page can match. A page may match several at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorCategory {
    /// Graphics-dominant page: enough primitives and little competing text.
    Illustration,
    /// Many straight lines plus curved or boxed detail: plans, schematics.
    TechnicalDrawing,
    /// Curve-heavy artwork.
    ComplexGraphics,
    /// Boxes-and-connectors structure: flowcharts, org charts.
    Diagram,
}

impl VectorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            VectorCategory::Illustration => "illustration",
            VectorCategory::TechnicalDrawing => "technical_drawing",
            VectorCategory::ComplexGraphics => "complex_graphics",
            VectorCategory::Diagram => "diagram",
        }
    }
}

/// Verdict for one page. Derived purely from [`PageMetrics`].
///
/// `vector_types` is non-empty exactly when `is_vector` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub is_vector: bool,
    pub vector_types: Vec<VectorCategory>,
    /// Human-readable explanation of the verdict.
    pub reason: String,
    /// `line_count + curve_count + rect_count`.
    pub total_vector_elements: u32,
    /// Primitives per 100 characters of text; equals `total_vector_elements`
    /// when the page has no text.
    pub graphics_to_text_ratio: f64,
}

impl ClassificationResult {
    /// A non-vector verdict standing in for a page whose metrics could not
    /// be derived. Used by the aggregator for fail-soft recovery.
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            is_vector: false,
            vector_types: Vec::new(),
            reason: reason.into(),
            total_vector_elements: 0,
            graphics_to_text_ratio: 0.0,
        }
    }
}

// ── Thresholds ───────────────────────────────────────────────────────────

/// The fixed policy constants of the scorer, injected at construction so
/// they can be tuned and tested without touching the decision logic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierThresholds {
    /// Layout-only exclusion: fewer than this many total primitives…
    pub layout_max_elements: u32,
    /// …embedded in more than this much text…
    pub layout_min_text: u32,
    /// …at a ratio below this is decoration, not artwork.
    pub layout_max_ratio: f64,

    /// Illustration: at least this many total primitives…
    pub illustration_min_elements: u32,
    /// …and either a ratio above this…
    pub illustration_min_ratio: f64,
    /// …or less text than this.
    pub illustration_max_text: u32,

    /// Technical drawing: at least this many lines…
    pub technical_min_lines: u32,
    /// …plus this many curves-or-rects.
    pub technical_min_complex_shapes: u32,

    /// Complex graphics: this many curves alone suffice…
    pub complex_min_curves: u32,
    /// …or this many curves…
    pub complex_alt_min_curves: u32,
    /// …combined with this many lines.
    pub complex_alt_min_lines: u32,

    /// Diagram: rectangles, lines and total primitives all at once.
    pub diagram_min_rects: u32,
    pub diagram_min_lines: u32,
    pub diagram_min_elements: u32,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            layout_max_elements: 5,
            layout_min_text: 500,
            layout_max_ratio: 0.1,
            illustration_min_elements: 5,
            illustration_min_ratio: 0.5,
            illustration_max_text: 200,
            technical_min_lines: 10,
            technical_min_complex_shapes: 2,
            complex_min_curves: 5,
            complex_alt_min_curves: 2,
            complex_alt_min_lines: 5,
            diagram_min_rects: 3,
            diagram_min_lines: 3,
            diagram_min_elements: 8,
        }
    }
}

// ── Classifier ───────────────────────────────────────────────────────────

/// The page scorer. Construct once, reuse for every page; classification
/// of one page never depends on another.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    thresholds: ClassifierThresholds,
}

impl Classifier {
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.thresholds
    }

    /// Score one page.
    ///
    /// Tier 1: pages without a single drawing primitive are text-only, no
    /// matter how much or little text they carry. Tier 2: sparse primitives
    /// drowned in text are layout decoration; this exclusion is checked
    /// before the category predicates and wins over them. Tier 3: the four
    /// category predicates, evaluated independently and unioned.
    pub fn classify(&self, metrics: &PageMetrics) -> ClassificationResult {
        let t = &self.thresholds;

        if metrics.line_count == 0 && metrics.curve_count == 0 && metrics.rect_count == 0 {
            return ClassificationResult {
                is_vector: false,
                vector_types: Vec::new(),
                reason: "text only".into(),
                total_vector_elements: 0,
                graphics_to_text_ratio: 0.0,
            };
        }

        let total = metrics
            .line_count
            .saturating_add(metrics.curve_count)
            .saturating_add(metrics.rect_count);
        let complex_shapes = metrics.curve_count.saturating_add(metrics.rect_count);
        let ratio = graphics_to_text_ratio(total, metrics.text_length);

        if total < t.layout_max_elements
            && metrics.text_length > t.layout_min_text
            && ratio < t.layout_max_ratio
        {
            return ClassificationResult {
                is_vector: false,
                vector_types: Vec::new(),
                reason: "likely layout only".into(),
                total_vector_elements: total,
                graphics_to_text_ratio: ratio,
            };
        }

        let mut vector_types = Vec::new();

        if total >= t.illustration_min_elements
            && (ratio > t.illustration_min_ratio || metrics.text_length < t.illustration_max_text)
        {
            vector_types.push(VectorCategory::Illustration);
        }
        if metrics.line_count >= t.technical_min_lines
            && complex_shapes >= t.technical_min_complex_shapes
        {
            vector_types.push(VectorCategory::TechnicalDrawing);
        }
        if metrics.curve_count >= t.complex_min_curves
            || (metrics.curve_count >= t.complex_alt_min_curves
                && metrics.line_count >= t.complex_alt_min_lines)
        {
            vector_types.push(VectorCategory::ComplexGraphics);
        }
        if metrics.rect_count >= t.diagram_min_rects
            && metrics.line_count >= t.diagram_min_lines
            && total >= t.diagram_min_elements
        {
            vector_types.push(VectorCategory::Diagram);
        }

        let is_vector = !vector_types.is_empty();
        let reason = if is_vector {
            let names: Vec<&str> = vector_types.iter().map(|c| c.as_str()).collect();
            format!("vector content detected: {}", names.join(", "))
        } else {
            "no significant vector content".into()
        };

        ClassificationResult {
            is_vector,
            vector_types,
            reason,
            total_vector_elements: total,
            graphics_to_text_ratio: ratio,
        }
    }
}

/// Primitives per 100 characters of text. Pages without text use the raw
/// primitive count so graphics-only pages score high instead of dividing
/// by zero.
fn graphics_to_text_ratio(total_elements: u32, text_length: u32) -> f64 {
    if text_length > 0 {
        f64::from(total_elements) / (f64::from(text_length) / 100.0)
    } else {
        f64::from(total_elements)
    }
}
