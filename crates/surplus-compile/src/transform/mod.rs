//! AST normalization.
//!
//! Six passes (spec.md §4.3), applied outermost-first over the same
//! `CodeTopLevel`, plus one ancillary pass that only matters for the JSX
//! dialect (folding repeated `style=` attributes together before the
//! rest of the pipeline ever has to reason about more than one `style`
//! property per element):
//!
//! 0. Merge `StyleProperty` occurrences into one `style` `DynamicProperty`.
//! 1. Drop insignificant whitespace-only Text (dialect-dependent).
//! 2. Collapse interior whitespace runs (native dialect only).
//! 3. Translate HTML entities in Text (native dialect only).
//! 4. Translate `onX` event property names on Html-dialect elements.
//! 5. Promote a sole Text child to a `textContent` static property.
//! 6. Drop duplicate properties by name, keeping the last occurrence.
//!
//! Order matters: whitespace must settle before pass 5 decides whether an
//! element's content is "exactly one Text node" (a trailing insignificant
//! whitespace text would otherwise make that content two nodes and block
//! the promotion), entity translation has to run before that same Text
//! is captured into a property value, and dedup runs last since pass 5
//! can itself introduce a fresh `textContent` property that needs to be
//! reconciled against one the author wrote by hand.

pub mod dedupe;
pub mod entities;
pub mod rename_events;
pub mod style;
pub mod text_content;
pub mod visitor;
pub mod whitespace;

use crate::ast::CodeTopLevel;

/// Runs the full normalization pipeline once, from the root, per
/// `jsx`'s dialect. Each pass owns its own traversal rather than sharing
/// one generic `Transform` composition, since several of them (pre-aware
/// whitespace handling, property-name indexing) need state a plain
/// identity-walk override can't thread through cleanly on its own.
pub fn run_passes(top: &mut CodeTopLevel, jsx: bool) {
    style::merge_style_properties(top);
    whitespace::trim_insignificant_whitespace(top, jsx);
    if !jsx {
        whitespace::collapse_whitespace(top);
        entities::translate_entities(top);
    }
    rename_events::rename_event_properties(top);
    text_content::promote_text_content(top);
    dedupe::dedupe_properties(top);
}
