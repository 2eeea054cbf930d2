//! End-to-end scenarios driving the public `preprocess` entry point
//! directly, rather than any individual pipeline stage. Mirrors spec.md
//! §8's six end-to-end scenarios plus a few more invariant-shaped checks
//! that don't fit naturally into one module's own `#[cfg(test)]` block.

use surplus_compile::{preprocess, Options, ParseErrorKind, SourceMapMode};

fn compile(source: &str) -> String {
    preprocess(source, &Options::default()).unwrap().code
}

fn compile_native(source: &str) -> String {
    let opts = Options { jsx: false, ..Options::default() };
    preprocess(source, &opts).unwrap().code
}

/// spec.md §8, scenario 1.
#[test]
fn leaf_element_needs_no_iife_or_reactive_wrapper() {
    let code = compile("let x = <div></div>;");
    assert!(code.contains("Surplus.createRootElement('div')"));
    assert!(!code.contains("(function ()"));
    assert!(!code.contains("Surplus.S("));
}

/// spec.md §8, scenario 2: `class` maps to `className`, sole text child
/// is promoted to `textContent`.
#[test]
fn class_attribute_and_text_content_promotion() {
    let code = compile(r#"let x = <div class="a">hi</div>;"#);
    assert!(code.contains("__.className = 'a';"));
    assert!(code.contains("__.textContent = 'hi';"));
}

/// spec.md §8, scenario 3: a no-parens handler is not reactive.
#[test]
fn onclick_with_no_parens_property_is_not_wrapped_in_s() {
    let code = compile("let x = <div onClick={f}>hi</div>;");
    assert!(code.contains("(function ()"));
    assert!(code.contains("__.onclick = f;"));
    assert!(!code.contains("Surplus.S("));
}

/// spec.md §8, scenario 4: an Insert child allocates an anchor and a
/// reactive range.
#[test]
fn insert_child_allocates_anchor_and_s_wrapped_range() {
    let code = compile("let x = <div>{expr(a)}</div>;");
    assert!(code.contains("(function ()"));
    assert!(code.contains("Surplus.createTextNode('', __);"));
    assert!(code.contains("Surplus.S(function (range) { Surplus.insert(range, expr(a)); }, { start:"));
}

/// spec.md §8, scenario 5: mixed static/spread/dynamic component props.
#[test]
fn component_with_mixed_property_groups_and_spread() {
    let code = compile(r#"let x = <Foo a="1" {...m} b={y}/>;"#);
    assert_eq!(
        code.trim_end_matches(';').trim_end(),
        "let x = Surplus.subcomponent(Foo, [{ a: '1', children: [] }, m, { b: y }])"
    );
}

/// spec.md §8, scenario 6: native-dialect entity translation and
/// text-content promotion compose.
#[test]
fn native_entities_translate_and_promote_to_text_content() {
    let code = compile_native("let x = <div>&amp;&#65;</div>;");
    assert!(code.contains("__.textContent = '&A';"));
}

#[test]
fn plain_script_with_no_markup_is_untouched() {
    let source = "function add(a, b) { return a + b; }\n";
    assert_eq!(compile(source), source);
}

#[test]
fn nested_tree_with_mixed_children_builds_one_flat_iife() {
    let code = compile("let view = <ul className=\"list\"><li>first</li><li>{label()}</li></ul>;");
    assert_eq!(code.matches("(function ()").count(), 1);
    assert!(code.contains("Surplus.createElement('li', __)"));
    assert!(code.contains(".textContent = 'first';"));
}

#[test]
fn mismatched_closing_tag_is_rejected_with_a_location() {
    let err = preprocess("let x = <div>oops</p>;", &Options::default()).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::MismatchedTags { .. }));
    assert!(!err.excerpt.is_empty());
}

#[test]
fn native_dialect_ignores_jsx_braces_as_markup() {
    // `{...}` has no special meaning in the native dialect outside an
    // element's attribute/child position, so this is just code text.
    let code = compile_native("let config = { jsx: true };\n");
    assert_eq!(code, "let config = { jsx: true };\n");
}

#[test]
fn jsx_dialect_ignores_at_sigil_in_plain_code() {
    let code = compile("let handle = \"user@example.com\";\n");
    assert_eq!(code, "let handle = \"user@example.com\";\n");
}

#[test]
fn append_mode_source_map_is_percent_encoded_not_base64() {
    let opts = Options { source_map: SourceMapMode::Append, ..Options::default() };
    let out = preprocess("let x = <br/>;", &opts).unwrap();
    let marker = "sourceMappingURL=data:application/json,";
    let idx = out.code.find(marker).expect("source map comment present");
    let encoded = out.code[idx + marker.len()..].trim();
    assert!(!encoded.is_empty());
    assert!(!encoded.contains("base64"));
}

#[test]
fn extract_mode_records_the_original_source_verbatim() {
    let opts = Options { source_map: SourceMapMode::Extract, ..Options::default() };
    let source = "let x = <br/>;";
    let out = preprocess(source, &opts).unwrap();
    let map = out.source_map.expect("source map present in extract mode");
    assert_eq!(map.sources_content, vec![source.to_string()]);
}

#[test]
fn whitespace_only_text_between_tags_does_not_produce_a_text_node() {
    let code = compile("let x = <div>\n  <span>a</span>\n  <span>b</span>\n</div>;");
    assert!(code.contains("__span1.textContent = 'a';"));
    assert!(code.contains("__span2.textContent = 'b';"));
}
