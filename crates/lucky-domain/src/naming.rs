//! Naming Resolver
//!
//! Converts a bare type or method name into the canonical identifier used
//! for component ids, aspect names and point names whenever no explicit
//! name is declared.
//!
//! The transform lower-cases the first letter and joins `_`-separated words
//! in camel case:
//!
//! | Raw | Canonical |
//! |-----|-----------|
//! | `OrderAudit` | `orderAudit` |
//! | `order_audit` | `orderAudit` |
//! | `logResult` | `logResult` |
//! | `T_USER_INFO` | `tUSERINFO` |

use crate::constants::NAME_SEGMENT_SEPARATOR;

/// Resolve the canonical name of `raw`, honouring an explicit override
///
/// A non-empty override is returned verbatim.
pub fn canonical_name(raw: &str, override_name: Option<&str>) -> String {
    match override_name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => to_canonical(raw),
    }
}

/// Apply the canonical transform unconditionally
pub fn to_canonical(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for (index, segment) in raw
        .split(NAME_SEGMENT_SEPARATOR)
        .filter(|s| !s.is_empty())
        .enumerate()
    {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            if index == 0 {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
            out.push_str(chars.as_str());
        }
    }
    out
}
