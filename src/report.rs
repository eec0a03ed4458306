//! Report types: per-page and per-document classification results as they
//! go out on the wire.
//!
//! The aggregator is where the fail-soft policy lives: a page whose metrics
//! could not be derived gets a degraded non-vector verdict naming the fault,
//! and the rest of the document is reported normally. Input page order is
//! preserved in the output sequence no matter how many pages fail.

use crate::classify::{ClassificationResult, Classifier, PageMetrics};
use crate::error::PageError;
use serde::{Deserialize, Serialize};
use tracing::warn;

// ── Page numbering ───────────────────────────────────────────────────────

/// How pages are numbered in the report.
///
/// Callers that split a larger document into single-page PDFs before
/// uploading want the page's number in the *original* document on the
/// report. That is the only coherent reading of an override supplied once
/// per request: applied to a multi-page document it would stamp every page
/// with the same number, so there it is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageNumbering {
    /// Natural 1-based numbering by document position.
    Natural,
    /// Use the given number; honoured only for single-page documents.
    OverrideSingle(u32),
}

impl PageNumbering {
    fn effective(&self, index: usize, page_count: usize) -> u32 {
        match self {
            PageNumbering::OverrideSingle(n) if page_count == 1 => *n,
            _ => index as u32 + 1,
        }
    }
}

// ── Wire types ───────────────────────────────────────────────────────────

/// One page's verdict, tagged with its effective page number and source URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    pub page_url: String,
    pub page_number: u32,
    #[serde(flatten)]
    pub classification: ClassificationResult,
}

/// The whole-document report returned by `/vector-check`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    pub success: bool,
    pub page_count: usize,
    pub vector_pages_count: usize,
    /// Page numbers flagged as vector, in document order.
    pub vector_pages: Vec<u32>,
    pub pages: Vec<PageReport>,
}

impl DocumentReport {
    /// Aggregate per-page extraction outcomes into a document report.
    ///
    /// `outcomes` must be in document order; the report preserves it. A
    /// failed page is recorded as a degraded non-vector verdict and does not
    /// abort the document.
    pub fn build(
        url: &str,
        outcomes: Vec<Result<PageMetrics, PageError>>,
        numbering: PageNumbering,
        classifier: &Classifier,
    ) -> DocumentReport {
        let page_count = outcomes.len();

        if matches!(numbering, PageNumbering::OverrideSingle(_)) && page_count > 1 {
            warn!(
                page_count,
                "ignoring page-number override for multi-page document"
            );
        }

        let pages: Vec<PageReport> = outcomes
            .into_iter()
            .enumerate()
            .map(|(index, outcome)| {
                let page_number = numbering.effective(index, page_count);
                let classification = match outcome {
                    Ok(metrics) => classifier.classify(&metrics),
                    Err(e) => {
                        warn!(page = page_number, error = %e, "page metrics unavailable");
                        ClassificationResult::degraded(format!("page processing failed: {e}"))
                    }
                };
                PageReport {
                    page_url: url.to_string(),
                    page_number,
                    classification,
                }
            })
            .collect();

        let vector_pages: Vec<u32> = pages
            .iter()
            .filter(|p| p.classification.is_vector)
            .map(|p| p.page_number)
            .collect();

        DocumentReport {
            success: true,
            page_count,
            vector_pages_count: vector_pages.len(),
            vector_pages,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector_metrics() -> PageMetrics {
        // 12 lines + 3 curves + 1 rect: technical drawing territory.
        PageMetrics {
            line_count: 12,
            curve_count: 3,
            rect_count: 1,
            char_count: 10,
            text_length: 50,
        }
    }

    fn text_metrics() -> PageMetrics {
        PageMetrics {
            line_count: 0,
            curve_count: 0,
            rect_count: 0,
            char_count: 200,
            text_length: 900,
        }
    }

    #[test]
    fn natural_numbering_is_one_based_positional() {
        let classifier = Classifier::default();
        let report = DocumentReport::build(
            "http://example.com/a.pdf",
            vec![Ok(text_metrics()), Ok(vector_metrics()), Ok(text_metrics())],
            PageNumbering::Natural,
            &classifier,
        );
        let numbers: Vec<u32> = report.pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(report.page_count, 3);
        assert_eq!(report.vector_pages, vec![2]);
        assert_eq!(report.vector_pages_count, 1);
        assert!(report.success);
    }

    #[test]
    fn override_applies_to_single_page_document() {
        let classifier = Classifier::default();
        let report = DocumentReport::build(
            "http://example.com/page-17.pdf",
            vec![Ok(vector_metrics())],
            PageNumbering::OverrideSingle(17),
            &classifier,
        );
        assert_eq!(report.pages[0].page_number, 17);
        assert_eq!(report.vector_pages, vec![17]);
    }

    #[test]
    fn override_is_ignored_for_multi_page_document() {
        let classifier = Classifier::default();
        let report = DocumentReport::build(
            "http://example.com/a.pdf",
            vec![Ok(text_metrics()), Ok(text_metrics())],
            PageNumbering::OverrideSingle(17),
            &classifier,
        );
        let numbers: Vec<u32> = report.pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn failed_page_degrades_without_aborting_the_document() {
        let classifier = Classifier::default();
        let report = DocumentReport::build(
            "http://example.com/a.pdf",
            vec![
                Ok(vector_metrics()),
                Err(PageError::ContentUnreadable {
                    page: 2,
                    detail: "missing stream".into(),
                }),
                Ok(vector_metrics()),
            ],
            PageNumbering::Natural,
            &classifier,
        );

        assert!(report.success);
        assert_eq!(report.page_count, 3);
        // Order preserved, failed page in its slot.
        let numbers: Vec<u32> = report.pages.iter().map(|p| p.page_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        let failed = &report.pages[1];
        assert!(!failed.classification.is_vector);
        assert!(failed.classification.reason.contains("page processing failed"));
        assert!(failed.classification.reason.contains("missing stream"));

        assert_eq!(report.vector_pages, vec![1, 3]);
    }

    #[test]
    fn all_pages_failing_still_reports_success() {
        let classifier = Classifier::default();
        let outcomes: Vec<Result<PageMetrics, PageError>> = (1..=3)
            .map(|page| {
                Err(PageError::ContentUndecodable {
                    page,
                    detail: "garbage operators".into(),
                })
            })
            .collect();
        let report = DocumentReport::build(
            "http://example.com/a.pdf",
            outcomes,
            PageNumbering::Natural,
            &classifier,
        );
        assert!(report.success);
        assert_eq!(report.page_count, 3);
        assert_eq!(report.vector_pages_count, 0);
        assert!(report.vector_pages.is_empty());
    }

    #[test]
    fn wire_shape_flattens_classification() {
        let classifier = Classifier::default();
        let report = DocumentReport::build(
            "http://example.com/a.pdf",
            vec![Ok(vector_metrics())],
            PageNumbering::Natural,
            &classifier,
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["page_count"], 1);
        let page = &json["pages"][0];
        assert_eq!(page["page_url"], "http://example.com/a.pdf");
        assert_eq!(page["page_number"], 1);
        assert_eq!(page["is_vector"], true);
        assert!(page["vector_types"]
            .as_array()
            .unwrap()
            .iter()
            .any(|t| t == "technical_drawing"));
        assert!(page["reason"].as_str().unwrap().contains("vector content"));
        assert!(page["total_vector_elements"].is_number());
        assert!(page["graphics_to_text_ratio"].is_number());
    }
}
