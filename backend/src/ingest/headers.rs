//! Header normalization and template validation.
//!
//! Spreadsheets arrive with headers typed by hand over many years: wrapped
//! lines, stray punctuation, abbreviations. Both sides are collapsed to a
//! `[a-z0-9]` token before comparison, and the match is deliberately
//! permissive: an upload is accepted when at least half of the template's
//! distinctive headers are recognised.

use crate::error::IngestError;
use std::collections::BTreeSet;

/// Tokens too generic to anchor a match on.
const IGNORED_TOKENS: [&str; 1] = ["date"];

/// Lowercases and strips every character that is not an ASCII lowercase
/// letter or digit.
///
/// `"Forward\ner Name"` becomes `"forwardername"`, `"S/Bill No."` becomes
/// `"sbillno"`.
pub fn normalize(header: &str) -> String {
    header
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Outcome of comparing an uploaded header row with the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCheck {
    pub matched: usize,
    pub expected: usize,
    /// Template tokens nothing in the upload matched, for diagnostics.
    pub missing: Vec<String>,
}

impl HeaderCheck {
    pub fn is_accepted(&self) -> bool {
        self.matched * 2 >= self.expected
    }
}

pub fn validate<S, T>(raw_headers: &[S], expected_headers: &[T]) -> HeaderCheck
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let uploaded: Vec<String> = raw_headers
        .iter()
        .map(|h| normalize(h.as_ref()))
        .filter(|h| !h.is_empty())
        .collect();

    let expected: BTreeSet<String> = expected_headers
        .iter()
        .map(|h| normalize(h.as_ref()))
        .filter(|h| !h.is_empty() && !IGNORED_TOKENS.contains(&h.as_str()))
        .collect();

    let mut matched = 0;
    let mut missing = Vec::new();
    for token in &expected {
        let found = uploaded
            .iter()
            .any(|h| h.contains(token.as_str()) || token.contains(h.as_str()));
        if found {
            matched += 1;
        } else {
            missing.push(token.clone());
        }
    }

    HeaderCheck {
        matched,
        expected: expected.len(),
        missing,
    }
}

/// Fails with [`IngestError::InvalidHeader`] when fewer than half of the
/// expected headers are present.
pub fn validate_headers<S, T>(raw_headers: &[S], expected_headers: &[T]) -> Result<(), IngestError>
where
    S: AsRef<str>,
    T: AsRef<str>,
{
    let check = validate(raw_headers, expected_headers);
    if check.is_accepted() {
        Ok(())
    } else {
        log::debug!("Unmatched template headers: {:?}", check.missing);
        Err(IngestError::InvalidHeader {
            matched: check.matched,
            expected: check.expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EXPORT, IMPORT};

    #[test]
    fn normalize_examples() {
        assert_eq!(normalize("Forward\ner Name"), "forwardername");
        assert_eq!(normalize("S/Bill No."), "sbillno");
        assert_eq!(normalize("  Inv.Value (FC) "), "invvaluefc");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("Größe №"), "gre");
    }

    #[test]
    fn normalize_is_idempotent_and_restricted() {
        let samples = [
            "Job No",
            "POL - Port of Loading",
            "N.N Copy Received",
            "ÀÉÎ mixed 123 ~!@",
            "\t\r\n",
            "İstanbul",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once);
            assert!(once
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn exact_template_is_accepted() {
        for def in [&IMPORT, &EXPORT] {
            let check = validate(def.expected_headers, def.expected_headers);
            assert!(check.is_accepted());
            assert_eq!(check.matched, check.expected);
        }
    }

    #[test]
    fn unrelated_headers_are_rejected() {
        assert!(!validate(&["foo"], EXPORT.expected_headers).is_accepted());
        assert!(matches!(
            validate_headers(&["foo"], IMPORT.expected_headers),
            Err(IngestError::InvalidHeader { matched: 0, .. })
        ));
    }

    #[test]
    fn truncated_and_expanded_headers_match() {
        let check = validate(&["FOB Value INR", "job"], &["fob value", "job no"]);
        assert_eq!(check.matched, 2);
    }

    #[test]
    fn generic_and_blank_expected_tokens_are_dropped() {
        let check = validate(&["Remarks"], &["", "Date", "Remarks", "remarks"]);
        assert_eq!(check.expected, 1);
        assert!(check.is_accepted());
    }

    #[test]
    fn blank_uploaded_headers_match_nothing() {
        let check = validate(&["", "  "], &["Job No", "Remarks"]);
        assert_eq!(check.matched, 0);
        assert!(!check.is_accepted());
    }

    #[test]
    fn half_is_enough() {
        let expected = ["Job No", "Inv No", "S/Bill No", "Remarks"];
        assert!(validate(&["Job No", "Remarks"], &expected).is_accepted());
        assert!(!validate(&["Job No"], &expected).is_accepted());
    }
}
