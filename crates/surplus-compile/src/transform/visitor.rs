//! Identity-traversal visitor.
//!
//! [`Transform`] gives every normalization pass a full walk of the tree
//! for free: override only the `visit_*` method you care about, and the
//! default implementation recurses into children unchanged. This
//! generalizes `howth-parser`'s own AST-rewriting passes (which compose
//! an open record of per-variant functions by reverse-order folding) to
//! a named trait: here each pass is a `Transform` object, applied in
//! sequence by [`crate::transform::run_passes`] over the whole tree in
//! turn rather than folded into one composed overlay — same net effect
//! of "first-listed pass behaves outermost", reached by running passes
//! one at a time instead of nesting them.
//!
//! Recursion follows markup wherever it can appear, including inside a
//! property value, a mixin, or an insert's code — `onClick={() =>
//! <Spinner/>}` has a nested `Element` that needs the same normalization
//! as everything at the top level.

use crate::ast::{Child, CodeTopLevel, EmbeddedCode, Element, Property, Segment};

pub trait Transform {
    fn visit_code_top_level(&mut self, node: &mut CodeTopLevel) {
        walk_code_top_level(self, node);
    }
    fn visit_segment(&mut self, node: &mut Segment) {
        walk_segment(self, node);
    }
    fn visit_embedded_code(&mut self, node: &mut EmbeddedCode) {
        walk_embedded_code(self, node);
    }
    fn visit_element(&mut self, node: &mut Element) {
        walk_element(self, node);
    }
    fn visit_property(&mut self, node: &mut Property) {
        walk_property(self, node);
    }
    fn visit_child(&mut self, node: &mut Child) {
        walk_child(self, node);
    }
}

pub fn walk_code_top_level<T: Transform + ?Sized>(t: &mut T, node: &mut CodeTopLevel) {
    for seg in &mut node.segments {
        t.visit_segment(seg);
    }
}

pub fn walk_segment<T: Transform + ?Sized>(t: &mut T, node: &mut Segment) {
    if let Segment::Elem(el) = node {
        t.visit_element(el);
    }
}

pub fn walk_embedded_code<T: Transform + ?Sized>(t: &mut T, node: &mut EmbeddedCode) {
    for seg in &mut node.segments {
        t.visit_segment(seg);
    }
}

pub fn walk_element<T: Transform + ?Sized>(t: &mut T, node: &mut Element) {
    for prop in &mut node.properties {
        t.visit_property(prop);
    }
    for child in &mut node.content {
        t.visit_child(child);
    }
}

pub fn walk_property<T: Transform + ?Sized>(t: &mut T, node: &mut Property) {
    match node {
        Property::Static(_) => {}
        Property::Dynamic(p) => t.visit_embedded_code(&mut p.code),
        Property::Style(p) => t.visit_embedded_code(&mut p.code),
        Property::Spread(p) => t.visit_embedded_code(&mut p.code),
    }
}

pub fn walk_child<T: Transform + ?Sized>(t: &mut T, node: &mut Child) {
    match node {
        Child::Element(el) => t.visit_element(el),
        Child::Text(_) | Child::Comment(_) => {}
        Child::Insert(ins) => t.visit_embedded_code(&mut ins.code),
    }
}
