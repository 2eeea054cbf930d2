//! Ancillary pass, JSX dialect only: fold every `StyleProperty` on an
//! element into a single `style` `DynamicProperty` before codegen ever
//! sees one (see `ast::StyleProperty`'s doc comment). A lone `style=`
//! attribute just becomes a `Dynamic` property carrying the same code;
//! two or more (`style={base} style={{color: active() ? 'red' : ''}}`)
//! merge left-to-right through `Object.assign`, the same pattern
//! hand-written JSX-to-JS output uses for merged style objects — the
//! runtime contract (§6) defines no dedicated style-merge call.
//!
//! Native-dialect markup has no `StyleProperty` variant at all (`style`
//! there is just an ordinary `DynamicProperty`), so this pass is a no-op
//! on that tree shape and is safe to run unconditionally.

use crate::ast::{CodeTopLevel, DynamicProperty, Element, Property};
use crate::codegen::code_fragment_for_style;
use crate::transform::visitor::{walk_element, Transform};

struct MergeStyleProperties;

impl Transform for MergeStyleProperties {
    fn visit_element(&mut self, node: &mut Element) {
        merge_into_dynamic(node);
        walk_element(self, node);
    }
}

fn merge_into_dynamic(node: &mut Element) {
    let style_indices: Vec<usize> =
        node.properties.iter().enumerate().filter(|(_, p)| matches!(p, Property::Style(_))).map(|(i, _)| i).collect();
    if style_indices.is_empty() {
        return;
    }

    let first_idx = style_indices[0];
    let loc = match &node.properties[first_idx] {
        Property::Style(sp) => sp.loc,
        _ => unreachable!(),
    };

    let codes: Vec<_> = style_indices
        .iter()
        .map(|&i| match &node.properties[i] {
            Property::Style(sp) => sp.code.clone(),
            _ => unreachable!(),
        })
        .collect();

    let merged_code = code_fragment_for_style(&codes);

    // Remove every Style property, then insert the merged Dynamic one
    // where the first occurrence used to live.
    let mut kept = Vec::with_capacity(node.properties.len());
    let mut inserted = false;
    for (idx, prop) in node.properties.drain(..).enumerate() {
        if matches!(prop, Property::Style(_)) {
            if idx == first_idx && !inserted {
                kept.push(Property::Dynamic(DynamicProperty { loc, name: "style".to_string(), code: merged_code.clone() }));
                inserted = true;
            }
            continue;
        }
        kept.push(prop);
    }
    node.properties = kept;
}

pub fn merge_style_properties(top: &mut CodeTopLevel) {
    MergeStyleProperties.visit_code_top_level(top);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Segment;
    use crate::parser::parse;

    fn elem(top: &CodeTopLevel) -> &Element {
        top.segments
            .iter()
            .find_map(|s| match s {
                Segment::Elem(e) => Some(e),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn single_style_attribute_becomes_plain_dynamic_property() {
        let mut top = parse(r#"let x = <div style={{ color: 'red' }}>hi</div>;"#).unwrap();
        merge_style_properties(&mut top);
        let el = elem(&top);
        assert!(matches!(&el.properties[0], Property::Dynamic(d) if d.name == "style"));
    }

    #[test]
    fn repeated_style_attributes_merge_through_object_assign() {
        let mut top = parse(r#"let x = <div style={base} style={{ color: 'red' }}>hi</div>;"#).unwrap();
        merge_style_properties(&mut top);
        let el = elem(&top);
        assert_eq!(el.properties.len(), 1);
        let Property::Dynamic(d) = &el.properties[0] else { panic!() };
        assert_eq!(d.name, "style");
    }
}
