//! Pulls a JSON payload out of free-form model output.
//!
//! Models wrap JSON in ```json fences, bare ``` fences, or nothing at all.
//! Strategies are tried in order and the first one that yields text wins;
//! parsing is only ever attempted on that one candidate.

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

pub struct ExtractionStrategy {
    pub name: &'static str,
    extract: fn(&str) -> Option<&str>,
}

pub const STRATEGIES: &[ExtractionStrategy] = &[
    ExtractionStrategy {
        name: "json_fence",
        extract: json_fenced,
    },
    ExtractionStrategy {
        name: "bare_fence",
        extract: bare_fenced,
    },
    ExtractionStrategy {
        name: "raw",
        extract: raw,
    },
];

#[derive(Debug, PartialEq, Eq)]
pub struct Extracted<'a> {
    pub strategy: &'static str,
    pub payload: &'a str,
}

/// Returns the candidate JSON text and the strategy that produced it,
/// or `None` when the response is blank.
pub fn extract_json_payload(text: &str) -> Option<Extracted<'_>> {
    STRATEGIES.iter().find_map(|s| {
        (s.extract)(text).map(|payload| Extracted {
            strategy: s.name,
            payload,
        })
    })
}

/// Text after the opening marker up to the next fence, or to the end if unclosed.
fn after_marker<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];
    let end = rest.find(FENCE).unwrap_or(rest.len());
    Some(rest[..end].trim())
}

fn json_fenced(text: &str) -> Option<&str> {
    after_marker(text, JSON_FENCE)
}

fn bare_fenced(text: &str) -> Option<&str> {
    after_marker(text, FENCE)
}

fn raw(text: &str) -> Option<&str> {
    Some(text.trim()).filter(|t| !t.is_empty())
}
