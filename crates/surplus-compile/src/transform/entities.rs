//! Pass 3: HTML entity translation, native dialect only.
//!
//! The JSX dialect's transform omits this pass entirely — JSX text is
//! expected to arrive already decoded by whatever editor/formatter wrote
//! it, while the native dialect treats markup text as raw HTML-ish
//! source. This asymmetry is intentional (see `DESIGN.md`), not a gap.
//!
//! Recognizes decimal (`&#65;`) and hex (`&#x41;`) numeric references and
//! a fixed table of named entities. An unknown named entity passes
//! through verbatim — this is not an error (spec.md §7).

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::ast::{Child, CodeTopLevel};
use crate::transform::visitor::{walk_element, Transform};

fn entity_table() -> &'static HashMap<&'static str, char> {
    static TABLE: OnceLock<HashMap<&'static str, char>> = OnceLock::new();
    TABLE.get_or_init(|| {
        HashMap::from([
            ("amp", '&'),
            ("lt", '<'),
            ("gt", '>'),
            ("quot", '"'),
            ("apos", '\''),
            ("nbsp", '\u{a0}'),
            ("copy", '\u{a9}'),
            ("reg", '\u{ae}'),
            ("trade", '\u{2122}'),
            ("hellip", '\u{2026}'),
            ("mdash", '\u{2014}'),
            ("ndash", '\u{2013}'),
            ("larr", '\u{2190}'),
            ("rarr", '\u{2192}'),
            ("uarr", '\u{2191}'),
            ("darr", '\u{2193}'),
            ("deg", '\u{b0}'),
            ("middot", '\u{b7}'),
            ("laquo", '\u{ab}'),
            ("raquo", '\u{bb}'),
            ("euro", '\u{20ac}'),
            ("pound", '\u{a3}'),
            ("cent", '\u{a2}'),
            ("sect", '\u{a7}'),
            ("para", '\u{b6}'),
            ("bull", '\u{2022}'),
            ("lsquo", '\u{2018}'),
            ("rsquo", '\u{2019}'),
            ("ldquo", '\u{201c}'),
            ("rdquo", '\u{201d}'),
        ])
    })
}

struct TranslateEntities;

impl Transform for TranslateEntities {
    fn visit_element(&mut self, node: &mut crate::ast::Element) {
        for child in &mut node.content {
            if let Child::Text(t) = child {
                t.text = translate(&t.text);
            }
        }
        walk_element(self, node);
    }
}

/// Replaces every recognized entity reference in `text`. A malformed or
/// unknown reference (including an unknown named entity) is left as-is.
pub fn translate(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'&' {
            let ch_len = text[i..].chars().next().map(|c| c.len_utf8()).unwrap_or(1);
            out.push_str(&text[i..i + ch_len]);
            i += ch_len;
            continue;
        }
        if let Some((replacement, consumed)) = decode_at(&text[i..]) {
            out.push(replacement);
            i += consumed;
        } else {
            out.push('&');
            i += 1;
        }
    }
    out
}

/// Attempts to decode one entity reference starting at `s[0] == '&'`.
/// Returns the decoded character and the number of bytes consumed,
/// including the `&` and the terminating `;`.
fn decode_at(s: &str) -> Option<(char, usize)> {
    let rest = &s[1..];
    let semi = rest.find(';')?;
    let body = &rest[..semi];
    let consumed = 1 + semi + 1;

    if let Some(numeric) = body.strip_prefix('#') {
        if let Some(hex) = numeric.strip_prefix('x').or_else(|| numeric.strip_prefix('X')) {
            let code = u32::from_str_radix(hex, 16).ok()?;
            return char::from_u32(code).map(|c| (c, consumed));
        }
        let code = numeric.parse::<u32>().ok()?;
        return char::from_u32(code).map(|c| (c, consumed));
    }
    entity_table().get(body).map(|&c| (c, consumed))
}

pub fn translate_entities(top: &mut CodeTopLevel) {
    TranslateEntities.visit_code_top_level(top);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_entity_translates() {
        assert_eq!(translate("a &amp; b"), "a & b");
    }

    #[test]
    fn decimal_numeric_reference_translates() {
        assert_eq!(translate("&#65;"), "A");
    }

    #[test]
    fn hex_numeric_reference_translates() {
        assert_eq!(translate("&#x41;"), "A");
    }

    #[test]
    fn combined_entities_match_spec_example() {
        assert_eq!(translate("&amp;&#65;"), "&A");
    }

    #[test]
    fn unknown_named_entity_passes_through_verbatim() {
        assert_eq!(translate("&unknownentity;"), "&unknownentity;");
    }

    #[test]
    fn bare_ampersand_not_starting_a_reference_is_untouched() {
        assert_eq!(translate("Q&A"), "Q&A");
    }
}
