//! Pass 4: translate JSX-style event property names on Html-dialect
//! elements. `onClick` -> `onclick`, matching the DOM's lowercase event
//! property names; `onDoubleClick` is special-cased to `ondblclick`
//! rather than the regular-rule `ondoubleclick`, because that's the
//! actual DOM property name.

use crate::ast::{DynamicProperty, Element, Property};
use crate::transform::visitor::{walk_element, Transform};

struct RenameEventProperties;

impl Transform for RenameEventProperties {
    fn visit_element(&mut self, node: &mut Element) {
        if node.is_html_like() {
            for prop in &mut node.properties {
                if let Property::Dynamic(DynamicProperty { name, .. }) = prop {
                    if let Some(renamed) = rename(name) {
                        *name = renamed;
                    }
                }
            }
        }
        walk_element(self, node);
    }
}

/// Returns the renamed property name when `name` matches `^on[A-Z]`, or
/// `None` to leave it untouched.
fn rename(name: &str) -> Option<String> {
    if name == "onDoubleClick" {
        return Some("ondblclick".to_string());
    }
    let mut chars = name.chars();
    if chars.next() != Some('o') || chars.next() != Some('n') {
        return None;
    }
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() => Some(name.to_ascii_lowercase()),
        _ => None,
    }
}

pub fn rename_event_properties(top: &mut crate::ast::CodeTopLevel) {
    RenameEventProperties.visit_code_top_level(top);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_click_lowercases() {
        assert_eq!(rename("onClick"), Some("onclick".to_string()));
    }

    #[test]
    fn on_double_click_is_special_cased() {
        assert_eq!(rename("onDoubleClick"), Some("ondblclick".to_string()));
    }

    #[test]
    fn non_event_name_is_untouched() {
        assert_eq!(rename("class"), None);
    }

    #[test]
    fn once_without_uppercase_third_letter_is_untouched() {
        assert_eq!(rename("online"), None);
    }
}
