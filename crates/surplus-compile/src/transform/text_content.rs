//! Pass 5: promote an Html-dialect element's sole Text child to a
//! `textContent` static property, emptying `content`. Applies only when
//! content is *exactly* one Text node — an element with a Text sibling
//! next to an Element or Insert keeps its children as-is, since setting
//! `textContent` would blow away the siblings at runtime.

use crate::ast::{Child, Element, Property, StaticProperty};
use crate::transform::visitor::{walk_element, Transform};

struct PromoteTextContent;

impl Transform for PromoteTextContent {
    fn visit_element(&mut self, node: &mut Element) {
        walk_element(self, node);
        if node.is_html_like() && node.content.len() == 1 {
            if let Some(Child::Text(text)) = node.content.first() {
                node.properties.push(Property::Static(StaticProperty {
                    loc: text.loc,
                    name: "textContent".to_string(),
                    value: text.text.clone(),
                }));
                node.content.clear();
            }
        }
    }
}

pub fn promote_text_content(top: &mut crate::ast::CodeTopLevel) {
    PromoteTextContent.visit_code_top_level(top);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{CodeTopLevel, Segment};
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
    fn sole_text_child_becomes_text_content_property() {
        let mut top = parse("let x = <div>hi</div>;").unwrap();
        promote_text_content(&mut top);
        let el = elem(&top);
        assert!(el.content.is_empty());
        assert!(el.properties.iter().any(
            |p| matches!(p, Property::Static(s) if s.name == "textContent" && s.value == "hi")
        ));
    }

    #[test]
    fn element_child_is_not_promoted() {
        let mut top = parse("let x = <div><span>hi</span></div>;").unwrap();
        promote_text_content(&mut top);
        let el = elem(&top);
        assert_eq!(el.content.len(), 1);
        assert!(!el.properties.iter().any(|p| matches!(p, Property::Static(s) if s.name == "textContent")));
    }

    #[test]
    fn text_alongside_a_sibling_element_is_not_promoted() {
        let mut top = parse("let x = <div>hi<span>there</span></div>;").unwrap();
        promote_text_content(&mut top);
        let el = elem(&top);
        assert_eq!(el.content.len(), 2);
    }
}
