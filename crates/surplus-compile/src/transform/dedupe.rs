//! Pass 6: remove duplicate properties by name, keeping the last
//! occurrence. `Spread`/`Style` properties are exempt — they may repeat
//! and are not indexed by name at all.

use crate::ast::{Element, Property};
use crate::transform::visitor::{walk_element, Transform};
use std::collections::HashSet;

struct DedupeProperties;

impl Transform for DedupeProperties {
    fn visit_element(&mut self, node: &mut Element) {
        let mut seen = HashSet::new();
        let mut keep = vec![true; node.properties.len()];
        for (idx, prop) in node.properties.iter().enumerate().rev() {
            if let Some(name) = property_name(prop) {
                if !seen.insert(name) {
                    keep[idx] = false;
                }
            }
        }
        let mut iter = keep.into_iter();
        node.properties.retain(|_| iter.next().unwrap());
        walk_element(self, node);
    }
}

fn property_name(prop: &Property) -> Option<&str> {
    match prop {
        Property::Static(p) => Some(p.name.as_str()),
        Property::Dynamic(p) => Some(p.name.as_str()),
        Property::Style(_) | Property::Spread(_) => None,
    }
}

pub fn dedupe_properties(top: &mut crate::ast::CodeTopLevel) {
    DedupeProperties.visit_code_top_level(top);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CodeTopLevel, Segment};
    use crate::parser::parse;

    fn elem(top: &CodeTopLevel) -> &crate::ast::Element {
        top.segments
            .iter()
            .find_map(|s| match s {
                Segment::Elem(e) => Some(e),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn later_duplicate_property_wins() {
        let mut top = parse(r#"let x = <div id="a" id="b"></div>;"#).unwrap();
        dedupe_properties(&mut top);
        let el = elem(&top);
        assert_eq!(el.properties.len(), 1);
        assert!(matches!(&el.properties[0], Property::Static(s) if s.value == "b"));
    }

    #[test]
    fn spread_properties_are_never_deduped() {
        let mut top = parse("let x = <div {...a} {...b}></div>;").unwrap();
        dedupe_properties(&mut top);
        assert_eq!(elem(&top).properties.len(), 2);
    }
}
