//! Reference segment texts.
//!
//! Each vector pairs a segment file's text with the entries a reader must
//! recover from it. Hand-edited and damaged files are included.

use serde::{Deserialize, Serialize};

/// A segment text and its expected decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentVector {
    /// Unique identifier for this vector.
    pub id: String,
    /// Human-readable description.
    pub description: String,
    /// Segment file content.
    pub text: String,
    /// Expected `(timestamp, body)` pairs, timestamps as written in headers.
    pub expected: Vec<(String, String)>,
}

fn vector(id: &str, description: &str, text: &str, expected: &[(&str, &str)]) -> SegmentVector {
    SegmentVector {
        id: id.into(),
        description: description.into(),
        text: text.into(),
        expected: expected
            .iter()
            .map(|(ts, body)| ((*ts).to_string(), (*body).to_string()))
            .collect(),
    }
}

/// Segment decoding vectors.
pub fn segment_vectors() -> Vec<SegmentVector> {
    vec![
        vector("empty", "Empty file", "", &[]),
        vector(
            "single",
            "One single-line entry",
            "[2024-01-16 10:00:00] - Follow-up call.\n--------------------\n",
            &[("2024-01-16 10:00:00", "Follow-up call.")],
        ),
        vector(
            "multiline",
            "Body with a continuation line holding keywords",
            "[2024-01-15 09:30:00] - Finished the design doc.\n\
             on:project-x due:2024-01-20\n\
             --------------------\n\
             [2024-01-16 10:00:00] - Follow-up call.\n\
             --------------------\n",
            &[
                (
                    "2024-01-15 09:30:00",
                    "Finished the design doc.\non:project-x due:2024-01-20",
                ),
                ("2024-01-16 10:00:00", "Follow-up call."),
            ],
        ),
        vector(
            "blank_lines",
            "Blank lines inside a body are kept",
            "[2024-01-15 09:30:00] - top\n\n\nbottom\n--------------------\n",
            &[("2024-01-15 09:30:00", "top\n\n\nbottom")],
        ),
        vector(
            "truncated_tail",
            "Last entry lost its separator",
            "[2024-01-15 09:30:00] - kept\n\
             --------------------\n\
             [2024-01-15 09:31:00] - half written\n\
             more",
            &[("2024-01-15 09:30:00", "kept")],
        ),
        vector(
            "malformed_header",
            "An entry with a broken timestamp is skipped with its body",
            "[2024-01-15 09:30:00] - before\n\
             --------------------\n\
             [2024-01-15 9:31] - broken\n\
             body of broken\n\
             --------------------\n\
             [2024-01-15 09:32:00] - after\n\
             --------------------\n",
            &[
                ("2024-01-15 09:30:00", "before"),
                ("2024-01-15 09:32:00", "after"),
            ],
        ),
        vector(
            "stray_text",
            "Text between entries is ignored",
            "notes scribbled by hand\n\
             --------------------\n\
             [2024-01-15 09:30:00] - real\n\
             --------------------\n\
             trailing junk\n",
            &[("2024-01-15 09:30:00", "real")],
        ),
        vector(
            "separator_whitespace",
            "Separators with trailing spaces still close entries",
            "[2024-01-15 09:30:00] - spaced\n--------------------   \n",
            &[("2024-01-15 09:30:00", "spaced")],
        ),
        vector(
            "header_inside_body",
            "A header-shaped line inside an entry is body text",
            "[2024-01-15 09:30:00] - quoting\n\
             [2024-01-01 00:00:00] - an older entry\n\
             --------------------\n",
            &[(
                "2024-01-15 09:30:00",
                "quoting\n[2024-01-01 00:00:00] - an older entry",
            )],
        ),
    ]
}

/// Exports every vector as pretty JSON.
pub fn all_vectors_json() -> String {
    serde_json::to_string_pretty(&segment_vectors()).unwrap_or_default()
}
