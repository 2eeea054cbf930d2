//! The parsed representation: a flat top-level sequence of plain code and
//! markup elements, with markup itself a tree of elements/children/
//! properties. Every node is a plain struct or enum — no shared mutable
//! state, no arena, no parent pointers. A child owns its subtree outright,
//! the same shape `howth-parser::ast` uses for its expression tree.

use crate::loc::Loc;

/// The whole parsed program: alternating runs of plain code text and
/// markup elements, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeTopLevel {
    pub segments: Vec<Segment>,
}

/// One member of the `CodeTopLevel`/`EmbeddedCode` union: either a run of
/// plain source or a markup element. `EmbeddedCode` reuses this exact
/// type because an element's property value or an inline insert can
/// itself contain nested markup (`onClick={() => <Spinner/>}`) — the
/// grammar that recognizes `<tag>` inside code is the same one that
/// recognizes it at the top level.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Code(CodeText),
    Elem(Element),
}

/// A verbatim run of base-language source, carried through to the output
/// unchanged except for byte-identical copying.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeText {
    pub loc: Loc,
    pub text: String,
}

/// Code embedded inside a property value, a mixin, or an inline insert.
/// Concatenating the rendered text of every segment (code verbatim,
/// elements recursively compiled) reconstructs the expression a property
/// or insert was bound to.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmbeddedCode {
    pub segments: Vec<Segment>,
}

impl EmbeddedCode {
    pub fn plain(loc: Loc, text: String) -> Self {
        Self { segments: vec![Segment::Code(CodeText { loc, text })] }
    }
}

/// The kind of element a tag name denotes, derived at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Lower-cased tag, not one of the known SVG element names: a plain
    /// DOM element created through `createElement`/`createRootElement`.
    Html,
    /// Lower-cased tag drawn from the fixed SVG element name set. Changes
    /// nothing about the runtime call shape (the runtime exposes no
    /// SVG-specific factory) — this only exists so a reader can tell at a
    /// glance which elements need namespace-aware handling downstream.
    SvgInferred,
    /// Tag starting with an upper-case letter: a reference to a component
    /// function, invoked directly or through `runtime.subcomponent`.
    Component,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub loc: Loc,
    pub tag: String,
    pub dialect: Dialect,
    pub properties: Vec<Property>,
    pub content: Vec<Child>,
}

impl Element {
    pub fn is_html_like(&self) -> bool {
        matches!(self.dialect, Dialect::Html | Dialect::SvgInferred)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// `name="literal text"` — copied through as a string constant, never
    /// wrapped in a reactive computation.
    Static(StaticProperty),
    /// `name={expression}` (jsx) / `name=expression` (native) — assigned
    /// once, or wrapped in a reactive computation if the expression looks
    /// like it reads a signal.
    Dynamic(DynamicProperty),
    /// `style={{ ... }}` / `style="..."` parsed under the JSX dialect,
    /// prior to normalization — may repeat. [`crate::transform`] folds
    /// every `StyleProperty` on an element into a single `style`
    /// `DynamicProperty` before codegen ever sees one.
    Style(StyleProperty),
    /// `{...expr}` (jsx) / `@expr` (native) — a spread of an arbitrary
    /// property bag, threaded through `runtime.spread`. May repeat; order
    /// relative to other properties is significant.
    Spread(SpreadProperty),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaticProperty {
    pub loc: Loc,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DynamicProperty {
    pub loc: Loc,
    pub name: String,
    pub code: EmbeddedCode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleProperty {
    pub loc: Loc,
    pub code: EmbeddedCode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadProperty {
    pub loc: Loc,
    pub code: EmbeddedCode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Element(Element),
    Text(TextChild),
    Comment(CommentChild),
    /// `{expression}` (jsx) / `@expression` (native) in child position: a
    /// value to be inserted into the DOM between two anchor text nodes,
    /// reactively re-run every time it is invoked.
    Insert(InsertChild),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextChild {
    pub loc: Loc,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentChild {
    pub loc: Loc,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertChild {
    pub loc: Loc,
    pub code: EmbeddedCode,
}

/// Tag names treated as SVG elements for [`Dialect::SvgInferred`]
/// classification. Kept intentionally small: this only needs to be right
/// for the common namespace-sensitive elements, not exhaustive.
pub const SVG_TAGS: &[&str] = &[
    "svg", "path", "circle", "rect", "line", "polyline", "polygon", "g", "use",
    "defs", "symbol", "clippath", "lineargradient", "radialgradient", "stop",
    "tspan", "ellipse", "mask", "pattern", "marker",
];

/// `tag` starting with an upper-case letter ⇒ [`Dialect::Component`];
/// else [`Dialect::Html`], unless it names a known SVG element, in which
/// case [`Dialect::SvgInferred`].
pub fn classify_tag(tag: &str) -> Dialect {
    match tag.chars().next() {
        Some(c) if c.is_uppercase() => Dialect::Component,
        _ if SVG_TAGS.contains(&tag.to_ascii_lowercase().as_str()) => Dialect::SvgInferred,
        _ => Dialect::Html,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercase_tag_is_component() {
        assert_eq!(classify_tag("MyButton"), Dialect::Component);
    }

    #[test]
    fn known_svg_tag_is_svg_inferred() {
        assert_eq!(classify_tag("circle"), Dialect::SvgInferred);
    }

    #[test]
    fn plain_lowercase_tag_is_html() {
        assert_eq!(classify_tag("div"), Dialect::Html);
    }
}
