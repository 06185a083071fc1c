//! Translation of external configuration keys into internal field identifiers.
//!
//! External keys are dotted lowercase strings such as `session.timeout.ms`.
//! The internal identifier is the concatenation of the capitalized segments,
//! with a trailing `id` or `ms` segment rendered fully upper case:
//!
//! | external             | internal           |
//! |----------------------|--------------------|
//! | `fetch.min.bytes`    | `FetchMinBytes`    |
//! | `client.id`          | `ClientID`         |
//! | `session.timeout.ms` | `SessionTimeoutMS` |

/// Converts an external dotted key into its internal identifier.
pub fn normalize_key(key: &str) -> String {
    let mut segments = key.split('.').peekable();
    let mut ident = String::with_capacity(key.len());
    while let Some(segment) = segments.next() {
        let is_last = segments.peek().is_none();
        match segment {
            "id" if is_last => ident.push_str("ID"),
            "ms" if is_last => ident.push_str("MS"),
            _ => push_capitalized(&mut ident, segment),
        }
    }
    ident
}

fn push_capitalized(out: &mut String, segment: &str) {
    let mut chars = segment.chars();
    if let Some(first) = chars.next() {
        out.extend(first.to_uppercase());
        out.push_str(chars.as_str());
    }
}
