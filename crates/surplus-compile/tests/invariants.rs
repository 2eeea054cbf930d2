//! Property-style checks for spec.md §8's six named invariants, as
//! opposed to `tests/fixtures.rs`'s fixed end-to-end scenarios. Each test
//! here is named after the invariant it checks, not after an input.

use surplus_compile::ast::{Child, CodeTopLevel, Element, EmbeddedCode, Property, Segment};
use surplus_compile::sourcemap;
use surplus_compile::{parser, transform, Options};

/// Walks every `Loc` in an `Element` (its own, then its properties', then
/// its children's) in the same depth-first order the parser visits them,
/// appending to `out`.
fn collect_locs(el: &Element, out: &mut Vec<u32>) {
    out.push(el.loc.pos);
    for prop in &el.properties {
        match prop {
            Property::Static(p) => out.push(p.loc.pos),
            Property::Dynamic(p) => {
                out.push(p.loc.pos);
                collect_embedded_locs(&p.code, out);
            }
            Property::Style(p) => {
                out.push(p.loc.pos);
                collect_embedded_locs(&p.code, out);
            }
            Property::Spread(p) => {
                out.push(p.loc.pos);
                collect_embedded_locs(&p.code, out);
            }
        }
    }
    for child in &el.content {
        match child {
            Child::Element(e) => collect_locs(e, out),
            Child::Text(t) => out.push(t.loc.pos),
            Child::Comment(c) => out.push(c.loc.pos),
            Child::Insert(i) => {
                out.push(i.loc.pos);
                collect_embedded_locs(&i.code, out);
            }
        }
    }
}

fn collect_embedded_locs(code: &EmbeddedCode, out: &mut Vec<u32>) {
    for seg in &code.segments {
        match seg {
            Segment::Code(c) => out.push(c.loc.pos),
            Segment::Elem(e) => collect_locs(e, out),
        }
    }
}

fn collect_top_level_locs(top: &CodeTopLevel) -> Vec<u32> {
    let mut out = Vec::new();
    for seg in &top.segments {
        match seg {
            Segment::Code(c) => out.push(c.loc.pos),
            Segment::Elem(e) => collect_locs(e, &mut out),
        }
    }
    out
}

fn balanced(s: &str) -> bool {
    let mut stack = Vec::new();
    for c in s.chars() {
        match c {
            '(' | '[' | '{' => stack.push(c),
            ')' => {
                if stack.pop() != Some('(') {
                    return false;
                }
            }
            ']' => {
                if stack.pop() != Some('[') {
                    return false;
                }
            }
            '}' => {
                if stack.pop() != Some('{') {
                    return false;
                }
            }
            _ => {}
        }
    }
    stack.is_empty()
}

fn embedded_text(code: &EmbeddedCode) -> String {
    let mut out = String::new();
    for seg in &code.segments {
        match seg {
            Segment::Code(c) => out.push_str(&c.text),
            Segment::Elem(_) => {}
        }
    }
    out
}

/// Invariant 1: a depth-first traversal of a parsed AST yields
/// non-decreasing `Loc.pos` values.
#[test]
fn location_monotonicity_holds_across_nested_markup() {
    let samples = [
        r#"let x = <div id="a" data-n={count()}><span>hi</span>{item}</div>;"#,
        r#"let y = <Foo a="1" {...m} b={y}><Bar/></Foo>;"#,
        "let z = <ul><li>one</li><li>two</li><li>{dyn_()}</li></ul>;",
    ];
    for src in samples {
        let top = parser::parse(src).unwrap();
        let locs = collect_top_level_locs(&top);
        for pair in locs.windows(2) {
            assert!(pair[0] <= pair[1], "locs not monotonic in {src:?}: {locs:?}");
        }
    }
}

/// Invariant 2: every parsed `EmbeddedCode`'s concatenated segment text
/// has balanced `()[]{}`.
#[test]
fn embedded_code_brackets_are_balanced() {
    let src = r#"let x = <div onClick={(e) => handle(e, [1, 2], { a: f(1) })} data-n={count()}><span ref={el}>{expr(a)}</span></div>;"#;
    let top = parser::parse(src).unwrap();
    let Segment::Elem(el) = top.segments.iter().find(|s| matches!(s, Segment::Elem(_))).unwrap() else {
        unreachable!()
    };
    for prop in &el.properties {
        let code = match prop {
            Property::Static(_) => continue,
            Property::Dynamic(p) => &p.code,
            Property::Style(p) => &p.code,
            Property::Spread(p) => &p.code,
        };
        assert!(balanced(&embedded_text(code)), "unbalanced: {:?}", embedded_text(code));
    }
    let Child::Element(span) = &el.content[0] else { unreachable!() };
    let Property::Dynamic(ref_prop) = &span.properties[0] else { unreachable!() };
    assert!(balanced(&embedded_text(&ref_prop.code)));
    let Child::Insert(ins) = &span.content[0] else { unreachable!() };
    assert!(balanced(&embedded_text(&ins.code)));
}

/// Invariant 3: after normalization, no Element has two non-spread/style
/// properties sharing a name.
#[test]
fn property_names_are_unique_after_normalization() {
    let mut top = parser::parse(r#"let x = <div id="a" id="b" {...m} {...n}></div>;"#).unwrap();
    transform::run_passes(&mut top, true);
    let Segment::Elem(el) = top.segments.iter().find(|s| matches!(s, Segment::Elem(_))).unwrap() else {
        unreachable!()
    };
    let mut names = Vec::new();
    for prop in &el.properties {
        match prop {
            Property::Static(p) => names.push(p.name.clone()),
            Property::Dynamic(p) => names.push(p.name.clone()),
            Property::Style(_) | Property::Spread(_) => {}
        }
    }
    let mut sorted = names.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(names.len(), sorted.len(), "duplicate property names survived: {names:?}");
}

/// Invariant 4: for an input with no `<` outside strings/comments, the
/// generated output equals the input exactly (once source-map marks are
/// stripped).
#[test]
fn code_text_round_trips_when_no_markup_is_present() {
    let samples = [
        "const x = a < b ? 1 : 2;\nfunction f() { return x; }\n",
        "// a < b is a comment, not markup\nlet y = \"a < b\";\n",
        "/* block < comment */\nlet z = 1;\n",
    ];
    for src in samples {
        let out = surplus_compile::preprocess(src, &Options::default()).unwrap();
        assert_eq!(out.code, src, "round trip failed for {src:?}");
    }
}

/// Invariant 5: applying the normalize pipeline twice is equivalent to
/// applying it once.
#[test]
fn normalize_pipeline_is_idempotent() {
    let samples = [
        r#"let x = <div class="a" onClick={f}>  hi  </div>;"#,
        r#"let y = <div style={base} style={{ color: 'red' }}><span>a</span>   <span>b</span></div>;"#,
    ];
    for src in samples {
        let mut once = parser::parse(src).unwrap();
        transform::run_passes(&mut once, true);
        let mut twice = once.clone();
        transform::run_passes(&mut twice, true);
        assert_eq!(once, twice, "pipeline not idempotent for {src:?}");
    }
}

/// Invariant 6: every location mark in generated code resolves to exactly
/// one mapping, and generated columns are non-negative and strictly
/// increasing within a generated line.
#[test]
fn source_map_columns_are_strictly_increasing_per_line() {
    let src = "let a = <div id=\"x\" data-n={count()}><span>{a}</span><span>{b}</span></div>;";
    let top = parser::parse(src).unwrap();
    let mut top = top;
    transform::run_passes(&mut top, true);
    let generated = surplus_compile::codegen::generate(&top);
    let mark_count = generated.code.matches('\u{0}').count() / 2;
    let (_, mappings) = sourcemap::finalize(&generated.code);
    assert_eq!(mappings.len(), mark_count);

    let mut last_col_by_line: std::collections::HashMap<u32, i64> = std::collections::HashMap::new();
    for m in &mappings {
        assert!(m.generated_col as i64 >= 0);
        let prev = last_col_by_line.entry(m.generated_line).or_insert(-1);
        assert!(m.generated_col as i64 > *prev, "columns not strictly increasing on line {}", m.generated_line);
        *prev = m.generated_col as i64;
    }
}
