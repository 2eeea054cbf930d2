//! Source map emission.
//!
//! This emitter deliberately does **not** produce a standard Base64 VLQ
//! `mappings` string. Per spec.md §4.5, each delta is sign-encoded to an
//! unsigned value, converted to base-32 (5 data bits per digit, least
//! significant digit first), and every digit but the last — the most
//! significant one, which ends the run — is looked up in a *different*
//! alphabet than the run-ending digit: continuation digits map through
//! [`CONTINUATION_ALPHABET`] (`g..z0..9+/`), the final digit through
//! [`FINAL_ALPHABET`] (`A..Z a..f`). This is not the standard Base64 VLQ
//! scheme (which uses one 64-symbol alphabet and a reserved continuation
//! bit within each digit) — tooling downstream of a real preprocessor like
//! this would already be written against its exact encoding, so this
//! reproduces the spec's own scheme bit for bit rather than "fixing" it to
//! conventional source-map VLQ. See the crate's design notes for the open
//! question this resolves.

use serde::Serialize;

use crate::options::Options;

/// Alphabet for every base-32 digit except the most significant one.
const CONTINUATION_ALPHABET: &[u8; 32] = b"ghijklmnopqrstuvwxyz0123456789+/";
/// Alphabet for the most significant base-32 digit, which ends the run.
const FINAL_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdef";

/// One generated-position -> source-position correspondence, recovered
/// from a single location mark during [`finalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    pub generated_line: u32,
    pub generated_col: u32,
    pub source_line: u32,
    pub source_col: u32,
}

/// The literal location-mark wrapper [`crate::codegen`] writes around
/// every emitted chunk: NUL, decimal line, `,`, decimal column, NUL.
const MARK: char = '\u{0}';

/// Strips every location mark out of `marked` (codegen's output with
/// marks still embedded) and returns the clean source alongside one
/// [`Mapping`] per mark, in emission order. Marks are removed entirely
/// rather than replaced with a comment — the simpler of the two
/// mark-stripping policies the source supports (see the crate's design
/// notes), chosen so stripped output never carries stray text a
/// consumer didn't ask for.
///
/// Generated line/column are tracked over the *stripped* text as it is
/// built, in bytes (matching [`crate::loc::Loc`]'s column convention),
/// so a mark's `generated_col` is always relative to real output, never
/// to a position that includes other marks.
pub fn finalize(marked: &str) -> (String, Vec<Mapping>) {
    let mut code = String::with_capacity(marked.len());
    let mut mappings = Vec::new();
    let mut gen_line = 0u32;
    let mut gen_col = 0u32;

    let mut chars = marked.chars().peekable();
    while let Some(c) = chars.next() {
        if c == MARK {
            let mut buf = String::new();
            for nc in chars.by_ref() {
                if nc == MARK {
                    break;
                }
                buf.push(nc);
            }
            if let Some((line_str, col_str)) = buf.split_once(',') {
                if let (Ok(source_line), Ok(source_col)) = (line_str.parse(), col_str.parse()) {
                    mappings.push(Mapping { generated_line: gen_line, generated_col: gen_col, source_line, source_col });
                }
            }
            continue;
        }
        if c == '\n' {
            gen_line += 1;
            gen_col = 0;
        } else {
            gen_col += c.len_utf8() as u32;
        }
        code.push(c);
    }
    (code, mappings)
}

/// Encodes one signed integer per spec.md §4.5: sign-encode to unsigned,
/// split into base-32 digits least-significant first, and emit each
/// through [`CONTINUATION_ALPHABET`] except the last (most significant)
/// digit, which is emitted through [`FINAL_ALPHABET`].
fn encode_vlq(value: i64, out: &mut String) {
    let mut n: u64 = if value < 0 { ((-value) as u64) << 1 | 1 } else { (value as u64) << 1 };
    let mut digits = Vec::new();
    loop {
        digits.push((n & 0b11111) as u8);
        n >>= 5;
        if n == 0 {
            break;
        }
    }
    let last = digits.len() - 1;
    for (i, &d) in digits.iter().enumerate() {
        if i == last {
            out.push(FINAL_ALPHABET[d as usize] as char);
        } else {
            out.push(CONTINUATION_ALPHABET[d as usize] as char);
        }
    }
}

/// Decodes one VLQ-encoded run starting at `chars[0]`, returning the
/// value and the number of symbols consumed. Reads continuation-alphabet
/// digits (least significant first) until it hits a final-alphabet digit,
/// which ends the run. Exposed for round-trip testing and for any
/// downstream tool that wants to read a map this emitter produced.
pub fn decode_vlq(s: &str) -> Option<(i64, usize)> {
    let mut n: u64 = 0;
    let mut shift = 0u32;
    let mut consumed = 0usize;
    for ch in s.chars() {
        consumed += 1;
        if let Some(index) = FINAL_ALPHABET.iter().position(|&b| b as char == ch) {
            n |= (index as u64) << shift;
            break;
        }
        let index = CONTINUATION_ALPHABET.iter().position(|&b| b as char == ch)?;
        n |= (index as u64) << shift;
        shift += 5;
    }
    let negative = n & 1 != 0;
    let magnitude = (n >> 1) as i64;
    Some((if negative { -magnitude } else { magnitude }, consumed))
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceMap {
    pub version: u32,
    pub file: String,
    pub sources: Vec<String>,
    #[serde(rename = "sourcesContent")]
    pub sources_content: Vec<String>,
    pub names: Vec<String>,
    pub mappings: String,
}

/// Builds a source map from the coarse generated/source position pairs
/// [`finalize`] recovered from the marked output. Segments are encoded
/// relative to the previous one, the same delta-encoding convention as
/// standard source maps, just carried over the non-standard alphabet
/// above.
pub fn build(mappings: &[Mapping], options: &Options, original_source: &str) -> SourceMap {
    let mut out = String::new();
    let mut prev_gen_col = 0i64;
    let mut prev_source_line = 0i64;
    let mut prev_source_col = 0i64;
    let mut current_line = 0i64;
    let mut first_on_line = true;

    for m in mappings {
        let gen_line = m.generated_line as i64;
        while current_line < gen_line {
            out.push(';');
            current_line += 1;
            prev_gen_col = 0;
            first_on_line = true;
        }
        if !first_on_line {
            out.push(',');
        }
        first_on_line = false;

        encode_vlq(m.generated_col as i64 - prev_gen_col, &mut out);
        encode_vlq(0, &mut out); // source index, always the single source file
        encode_vlq(m.source_line as i64 - prev_source_line, &mut out);
        encode_vlq(m.source_col as i64 - prev_source_col, &mut out);

        prev_gen_col = m.generated_col as i64;
        prev_source_line = m.source_line as i64;
        prev_source_col = m.source_col as i64;
    }

    SourceMap {
        version: 3,
        file: options.target_file.clone(),
        sources: vec![options.source_file.clone()],
        sources_content: vec![original_source.to_string()],
        names: Vec::new(),
        mappings: out,
    }
}

/// Renders a source map as an inline percent-encoded data-URI comment,
/// appended to generated output when
/// [`crate::options::SourceMapMode::Append`] is selected. §4.5 specifies
/// this exact form — `data:application/json,<urlencoded JSON>` — rather
/// than the base64 data URIs some other source-map emitters use.
pub fn append_comment(code: &str, map: &SourceMap) -> String {
    use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

    let json = serde_json::to_string(map).unwrap_or_default();
    let encoded = utf8_percent_encode(&json, NON_ALPHANUMERIC).to_string();
    format!("{}\n//# sourceMappingURL=data:application/json,{}\n", code, encoded)
}
