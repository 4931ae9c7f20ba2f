// Copyright 2026 the Velum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading-position normalization and chunk naming.
//!
//! Pages carry reading positions in two shapes: plain numbers, or
//! `"major;minor"` strings where both halves may be decorated with
//! non-digit characters. Normalization reduces either shape to a stable
//! digit string so a rendered page range can be identified by its start
//! and end positions.

use velum::payload::{Page, PositionValue};

/// A page's reading position at one end of a rendered range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PagePosition {
    /// The raw position value as it appeared in the payload.
    pub(crate) raw: String,
    /// Digit-string normalization of the position.
    pub(crate) normalized: String,
    /// Numeric position id, when the payload carries one.
    pub(crate) position_id: Option<i64>,
}

/// Normalizes a position value to its digit-string form.
///
/// Numbers are truncated to integers. For `"major;minor"` strings the
/// minor half is zero-padded to three digits and appended to the major
/// half; other strings collapse to their digits.
pub(crate) fn normalize_position(value: &PositionValue) -> Option<String> {
    match value {
        PositionValue::Number(n) => Some(format!("{}", *n as i64)),
        PositionValue::Text(text) => {
            if let Some((major, minor)) = text.split_once(';') {
                let major_digits: String = major.chars().filter(char::is_ascii_digit).collect();
                let minor_digits: String = minor.chars().filter(char::is_ascii_digit).collect();
                if !major_digits.is_empty() {
                    let major: u64 = major_digits.parse().ok()?;
                    return Some(format!("{major}{minor_digits:0>3}"));
                }
            }
            let digits: String = text.chars().filter(char::is_ascii_digit).collect();
            (!digits.is_empty()).then_some(digits)
        }
    }
}

/// Which end of a page the position describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PositionKind {
    /// `startPosition` / `startPositionId`.
    Start,
    /// `endPosition` / `endPositionId`.
    End,
}

/// Extracts and normalizes one end's position from a page, falling back
/// to the numeric position id when the raw value cannot be normalized.
pub(crate) fn page_position(page: &Page, kind: PositionKind) -> Option<PagePosition> {
    let (raw, position_id) = match kind {
        PositionKind::Start => (&page.start_position, page.start_position_id),
        PositionKind::End => (&page.end_position, page.end_position_id),
    };
    // `{:?}` keeps the trailing `.0` of integral floats, matching how
    // the payload's numeric positions read in the summary.
    let raw_text = match raw {
        Some(PositionValue::Number(n)) => format!("{n:?}"),
        Some(PositionValue::Text(text)) => text.clone(),
        None => String::new(),
    };
    let normalized = raw
        .as_ref()
        .and_then(normalize_position)
        .or_else(|| normalize_position(&PositionValue::Number(position_id? as f64)))?;
    Some(PagePosition {
        raw: raw_text,
        normalized,
        position_id,
    })
}

/// Builds the identifier for a rendered page range.
///
/// Position ids are preferred when both ends carry one; otherwise the
/// normalized positions are used.
pub(crate) fn build_chunk_id(start: &PagePosition, end: &PagePosition) -> String {
    match (start.position_id, end.position_id) {
        (Some(start_id), Some(end_id)) => format!("chunk_pid_{start_id}_{end_id}"),
        _ => format!("chunk_pos_{}_{}", start.normalized, end.normalized),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use velum::payload::PageEntry;

    use super::*;

    fn page(value: serde_json::Value) -> Page {
        let entry: PageEntry = serde_json::from_value(value).unwrap();
        Page::from_entry(&entry)
    }

    #[test]
    fn normalize_numeric_position() {
        assert_eq!(
            normalize_position(&PositionValue::Number(98467.0)),
            Some("98467".into())
        );
        assert_eq!(
            normalize_position(&PositionValue::Number(12.9)),
            Some("12".into())
        );
    }

    #[test]
    fn normalize_major_minor_position() {
        assert_eq!(
            normalize_position(&PositionValue::Text("12;3".into())),
            Some("12003".into())
        );
        assert_eq!(
            normalize_position(&PositionValue::Text("0012;345".into())),
            Some("12345".into())
        );
        // Minor wider than three digits is kept as-is.
        assert_eq!(
            normalize_position(&PositionValue::Text("7;1234".into())),
            Some("71234".into())
        );
    }

    #[test]
    fn normalize_decorated_position_string() {
        assert_eq!(
            normalize_position(&PositionValue::Text("pos-00042".into())),
            Some("00042".into())
        );
        assert_eq!(normalize_position(&PositionValue::Text("none".into())), None);
    }

    #[test]
    fn page_position_falls_back_to_position_id() {
        let page = page(serde_json::json!({
            "width": 1, "height": 1, "children": [],
            "startPosition": "no digits here",
            "startPositionId": 5150.0,
        }));
        let position = page_position(&page, PositionKind::Start).unwrap();
        assert_eq!(position.normalized, "5150");
        assert_eq!(position.position_id, Some(5150));
        assert_eq!(position.raw, "no digits here");
    }

    #[test]
    fn page_position_raw_keeps_float_form() {
        let page = page(serde_json::json!({
            "width": 1, "height": 1, "children": [],
            "startPosition": 100.0,
            "endPosition": 212.5,
        }));
        let start = page_position(&page, PositionKind::Start).unwrap();
        assert_eq!(start.raw, "100.0");
        assert_eq!(start.normalized, "100");
        let end = page_position(&page, PositionKind::End).unwrap();
        assert_eq!(end.raw, "212.5");
        assert_eq!(end.normalized, "212");
    }

    #[test]
    fn page_position_missing_everything_is_none() {
        let page = page(serde_json::json!({"width": 1, "height": 1, "children": []}));
        assert!(page_position(&page, PositionKind::End).is_none());
    }

    #[test]
    fn chunk_id_prefers_position_ids() {
        let start = PagePosition {
            raw: "a".into(),
            normalized: "100".into(),
            position_id: Some(98467),
        };
        let end = PagePosition {
            raw: "b".into(),
            normalized: "200".into(),
            position_id: Some(106883),
        };
        assert_eq!(build_chunk_id(&start, &end), "chunk_pid_98467_106883");
        let end_without_id = PagePosition {
            position_id: None,
            ..end
        };
        assert_eq!(build_chunk_id(&start, &end_without_id), "chunk_pos_100_200");
    }
}
