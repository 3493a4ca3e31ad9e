//! Structured reply parsing for delegated evaluators.
//!
//! Backend replies are free text. These functions pull a JSON payload out of
//! them, patch up payloads that were cut off mid-stream, and report whether
//! the result could be used. They are pure domain logic, no I/O.
//!
//! # Functions
//!
//! | Function | Use Case |
//! |----------|----------|
//! | [`extract_payload`] | Locate the JSON part of a reply (fenced block or bare object) |
//! | [`looks_truncated`] | Decide whether a failed payload is worth repairing |
//! | [`repair_truncated_json`] | Close a truncated payload so it parses |
//! | [`parse_structured_reply`] | Full pipeline: extract, parse, repair, re-parse |

use serde::de::DeserializeOwned;

/// Marker some backends emit when they cut output short
pub const TRUNCATION_MARKER: &str = "...";

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Outcome of parsing a structured reply.
///
/// The raw reply is not stored here; callers keep it alongside regardless
/// of the outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadOutcome<T> {
    /// The payload parsed, possibly after the repair pass
    Parsed { payload: T, repaired: bool },
    /// Nothing usable could be recovered
    Degraded { reason: String },
}

impl<T> PayloadOutcome<T> {
    pub fn is_parsed(&self) -> bool {
        matches!(self, PayloadOutcome::Parsed { .. })
    }

    pub fn was_repaired(&self) -> bool {
        matches!(self, PayloadOutcome::Parsed { repaired: true, .. })
    }

    /// Take the payload, substituting `fallback` when degraded
    pub fn into_payload_or(self, fallback: T) -> T {
        match self {
            PayloadOutcome::Parsed { payload, .. } => payload,
            PayloadOutcome::Degraded { .. } => fallback,
        }
    }
}

/// Locate the structured part of a reply.
///
/// A block fenced as ```` ```json ```` wins. A missing closing fence is
/// treated as "runs to the end of the reply". Without a fence, the payload
/// starts at the first `{`, and a reply with no `{` at all is returned whole.
pub fn extract_payload(reply: &str) -> &str {
    if let Some(start) = find_ignore_ascii_case(reply, JSON_FENCE) {
        let body_start = start + JSON_FENCE.len();
        let body = &reply[body_start..];
        let body = match body.find(FENCE) {
            Some(end) => &body[..end],
            None => body,
        };
        return body.trim();
    }

    match reply.find('{') {
        Some(start) => reply[start..].trim(),
        None => reply.trim(),
    }
}

/// A payload is visibly truncated when it carries the truncation marker or
/// does not end with a closing brace.
pub fn looks_truncated(payload: &str) -> bool {
    payload.contains(TRUNCATION_MARKER) || !payload.trim_end().ends_with('}')
}

/// Repair a truncated JSON payload.
///
/// 1. Everything from the truncation marker on is dropped.
/// 2. If the innermost container still open at the end has a separator
///    (`,`) in it, the incomplete element after the last one is dropped. If
///    it has none but the text stops inside a string or after a key, the
///    container's partial content is dropped instead. A partial object that
///    is an array element is dropped together with its separator.
/// 3. Closing brackets and braces are appended for every container left
///    open, innermost first.
///
/// The result is not guaranteed to parse; callers re-check it.
pub fn repair_truncated_json(payload: &str) -> String {
    let mut text = match payload.find(TRUNCATION_MARKER) {
        Some(pos) => payload[..pos].to_string(),
        None => payload.to_string(),
    };
    truncate_end_whitespace(&mut text);

    let scan = scan_containers(&text);
    if let Some(innermost) = scan.open.last() {
        let dangling = scan.in_string || text.ends_with(':') || innermost.key_pending;
        if let Some(comma) = innermost.last_separator {
            text.truncate(comma);
        } else if dangling {
            // An object left empty inside an array is dropped as a whole element
            let parent = scan.open.iter().rev().nth(1);
            match parent {
                Some(parent) if innermost.kind == '{' && parent.kind == '[' => {
                    text.truncate(parent.last_separator.unwrap_or(parent.start + 1));
                }
                _ => text.truncate(innermost.start + 1),
            }
        }
    }

    truncate_end_whitespace(&mut text);
    while text.ends_with(',') {
        text.pop();
        truncate_end_whitespace(&mut text);
    }

    // The cut may have closed or reopened containers; rescan before closing.
    let scan = scan_containers(&text);
    for open in scan.open.iter().rev() {
        text.push(if open.kind == '{' { '}' } else { ']' });
    }

    text
}

/// Extract, parse and, when needed, repair a structured reply.
pub fn parse_structured_reply<T: DeserializeOwned>(reply: &str) -> PayloadOutcome<T> {
    let payload = extract_payload(reply);

    let first_error = match serde_json::from_str::<T>(payload) {
        Ok(parsed) => {
            return PayloadOutcome::Parsed {
                payload: parsed,
                repaired: false,
            };
        }
        Err(e) => e,
    };

    // A complete value followed by trailing prose
    if let Some(Ok(parsed)) = serde_json::Deserializer::from_str(payload)
        .into_iter::<T>()
        .next()
    {
        return PayloadOutcome::Parsed {
            payload: parsed,
            repaired: false,
        };
    }

    if !looks_truncated(payload) {
        return PayloadOutcome::Degraded {
            reason: first_error.to_string(),
        };
    }

    let repaired = repair_truncated_json(payload);
    match serde_json::from_str::<T>(&repaired) {
        Ok(parsed) => PayloadOutcome::Parsed {
            payload: parsed,
            repaired: true,
        },
        Err(e) => PayloadOutcome::Degraded {
            reason: format!("{} (after repair: {})", first_error, e),
        },
    }
}

#[derive(Debug, Clone, Copy)]
struct OpenContainer {
    kind: char,
    start: usize,
    last_separator: Option<usize>,
    /// Object member has a `:` since the last separator
    colon_seen: bool,
    /// Object member is a bare key with no `:` yet
    key_pending: bool,
}

struct ContainerScan {
    open: Vec<OpenContainer>,
    in_string: bool,
}

/// Walk the text tracking open containers, ignoring brackets inside strings.
fn scan_containers(text: &str) -> ContainerScan {
    let mut open: Vec<OpenContainer> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
                if let Some(current) = open.last_mut()
                    && current.kind == '{'
                    && !current.colon_seen
                {
                    current.key_pending = true;
                }
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' | '[' => open.push(OpenContainer {
                kind: c,
                start: i,
                last_separator: None,
                colon_seen: false,
                key_pending: false,
            }),
            '}' | ']' => {
                open.pop();
            }
            ',' => {
                if let Some(current) = open.last_mut() {
                    current.last_separator = Some(i);
                    current.colon_seen = false;
                    current.key_pending = false;
                }
            }
            ':' => {
                if let Some(current) = open.last_mut() {
                    current.colon_seen = true;
                    current.key_pending = false;
                }
            }
            _ => {}
        }
    }

    ContainerScan { open, in_string }
}

fn truncate_end_whitespace(text: &mut String) {
    let trimmed = text.trim_end().len();
    text.truncate(trimmed);
}

fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle.as_bytes()))
}
