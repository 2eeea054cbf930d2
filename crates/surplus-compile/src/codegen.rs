//! Code generation.
//!
//! Each embedded markup expression compiles to a single JavaScript
//! expression built against the runtime's eight entry points:
//! `createRootElement`, `createElement`, `createTextNode`,
//! `createComment`, `insert`, `spread`, `subcomponent`, and `S`, called
//! as `Surplus.<name>(...)`. Plain code segments are copied through byte
//! for byte.
//!
//! The element tree for one embedded expression compiles into one flat
//! list of statements wrapped in a single IIFE — there is no nesting of
//! IIFEs per descendant the way a naive recursive translation would
//! produce. Every descendant element gets its own `var` declaration in
//! that same statement list; only the root's own creation is
//! special-cased (see [`ElementEmitter::finish`]).
//!
//! During generation every segment is prefixed with a location mark (a
//! `\u{0}line,col\u{0}` run); [`crate::sourcemap`] strips these and turns
//! them into VLQ mappings after the whole string is built.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Child, CodeTopLevel, Dialect, Element, EmbeddedCode, Property, Segment};
use crate::loc::Loc;

pub struct GenResult {
    /// Generated source with embedded `\u{0}line,col\u{0}` location marks,
    /// not yet stripped. [`crate::sourcemap::finalize`] turns this into
    /// the final `(code, map)` pair.
    pub code: String,
}

pub fn generate(top: &CodeTopLevel) -> GenResult {
    let mut out = String::new();
    for segment in &top.segments {
        match segment {
            Segment::Code(c) => push_code_with_marks(&mut out, c.loc, &c.text),
            Segment::Elem(e) => {
                out.push_str(&mark(e.loc));
                let indent = trailing_line_indent(&out);
                out.push_str(&generate_embedded(e, &indent));
            }
        }
    }
    GenResult { code: out }
}

/// The literal location-mark text: NUL, decimal line, `,`, decimal
/// column, NUL (see §4.5 of the design).
fn mark(loc: Loc) -> String {
    format!("\u{0}{},{}\u{0}", loc.line, loc.col)
}

fn push_code_with_marks(out: &mut String, loc: Loc, text: &str) {
    out.push_str(&mark(loc));
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            out.push_str(&mark(Loc::new(loc.line + i as u32, 0, loc.pos)));
        }
        out.push_str(line);
    }
}

/// The whitespace prefix of the line `out` currently ends on, used as the
/// base indent for a freshly-emitted IIFE so its body lines up with the
/// surrounding code.
fn trailing_line_indent(out: &str) -> String {
    let line_start = out.rfind('\n').map(|i| i + 1).unwrap_or(0);
    out[line_start..].chars().take_while(|c| *c == ' ' || *c == '\t').collect()
}

fn generate_embedded(el: &Element, base_indent: &str) -> String {
    match el.dialect {
        Dialect::Component => generate_component_call(el),
        Dialect::Html | Dialect::SvgInferred => {
            let mut emitter = ElementEmitter::new();
            let root_id = emitter.emit(el, None);
            emitter.finish(&root_id, base_indent)
        }
    }
}

/// Concatenates an `EmbeddedCode`'s segments: plain code verbatim,
/// nested elements recursively compiled. Used for property values,
/// mixins, and inserts, none of which need their own base indent.
pub(crate) fn render_embedded(code: &EmbeddedCode) -> String {
    let mut out = String::new();
    for seg in &code.segments {
        match seg {
            Segment::Code(c) => out.push_str(&c.text),
            Segment::Elem(e) => out.push_str(&generate_embedded(e, "")),
        }
    }
    out
}

/// Builds the flat statement list for one root Html/Svg element and all
/// of its descendants. `next_id` keys its per-tag counters by parent id
/// so siblings with the same tag under the same parent get distinct
/// suffixes (`__div1_span1`, `__div1_span2`, ...).
struct ElementEmitter {
    stmts: Vec<String>,
    counters: std::collections::HashMap<(String, String), u32>,
}

impl ElementEmitter {
    fn new() -> Self {
        Self { stmts: Vec::new(), counters: std::collections::HashMap::new() }
    }

    /// Identifier scheme: root is `__`; a child at index `n` under parent
    /// `p` with tag/role `t` is `p + "_" + t + (n+1)`, with a run of more
    /// than two leading underscores collapsed to exactly two (so joining
    /// onto the root `__` doesn't leave `___div1`).
    fn next_id(&mut self, parent_id: &str, tag: &str) -> String {
        let slug: String =
            tag.chars().map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' }).collect();
        let key = (parent_id.to_string(), slug.clone());
        let counter = self.counters.entry(key).or_insert(0);
        *counter += 1;
        dedup_leading_underscores(&format!("{}_{}{}", parent_id, slug, counter))
    }

    // Tag names go through `code_str` here the same as everywhere else, so
    // a leaf root comes out `Surplus.createRootElement('div')`, single-quoted.
    // spec.md's own prose writes this particular call double-quoted in one
    // place (§8 scenario 1) while §4.4 defines `codeStr` as single-quoting
    // every string literal it produces, `createRootElement` included — the
    // two parts of the spec disagree with each other, not just with this
    // implementation. Single quotes win here so every string literal in
    // generated output comes from the one `codeStr` rule, not a special case
    // for this one call site.
    fn emit(&mut self, el: &Element, parent_id: Option<&str>) -> String {
        let id = match parent_id {
            None => "__".to_string(),
            Some(p) => self.next_id(p, &el.tag),
        };
        let create = match parent_id {
            None => format!("Surplus.createRootElement({})", code_str(&el.tag)),
            Some(p) => format!("Surplus.createElement({}, {})", code_str(&el.tag), p),
        };
        self.stmts.push(format!("var {} = {};", id, create));

        let is_html_like = el.is_html_like();
        let (prop_stmts, dynamic, any_mixin) = build_property_statements(&el.properties, &id, is_html_like);
        if dynamic {
            self.stmts.push(wrap_reactive(prop_stmts, any_mixin));
        } else {
            self.stmts.extend(prop_stmts);
        }

        self.emit_children(&id, &el.content);
        id
    }

    fn emit_children(&mut self, parent_id: &str, children: &[Child]) {
        for child in children {
            match child {
                Child::Element(child_el) if child_el.dialect == Dialect::Component => {
                    let call = generate_component_call(child_el);
                    self.emit_insert_anchor(parent_id, &call);
                }
                Child::Element(child_el) => {
                    self.emit(child_el, Some(parent_id));
                }
                Child::Text(t) => {
                    self.stmts.push(format!("Surplus.createTextNode({}, {});", code_str(&t.text), parent_id));
                }
                Child::Comment(c) => {
                    self.stmts.push(format!("Surplus.createComment({}, {});", code_str(&c.text), parent_id));
                }
                Child::Insert(ins) => {
                    let expr = render_embedded(&ins.code);
                    self.emit_insert_anchor(parent_id, &expr);
                }
            }
        }
    }

    /// Shared by Insert children and Component children: allocate an
    /// anchor text node and wrap the value in a reactive `S` whose seed
    /// is the anchor used as both `start` and `end` of the range.
    fn emit_insert_anchor(&mut self, parent_id: &str, expr: &str) {
        let id = self.next_id(parent_id, "insert");
        self.stmts.push(format!("var {} = Surplus.createTextNode('', {});", id, parent_id));
        self.stmts.push(format!(
            "Surplus.S(function (range) {{ Surplus.insert(range, {}); }}, {{ start: {}, end: {} }});",
            expr, id, id
        ));
    }

    /// Leaf optimization: a root with no properties and no content needs
    /// no IIFE at all. Otherwise wraps the full statement list, returning
    /// the root's identifier, indented relative to `base_indent`.
    fn finish(self, root_id: &str, base_indent: &str) -> String {
        if self.stmts.len() == 1 {
            return self.stmts.into_iter().next().unwrap().trim_start_matches("var __ = ").trim_end_matches(';').to_string();
        }
        let inner = format!("{}    ", base_indent);
        let mut body = String::new();
        for (i, stmt) in self.stmts.iter().enumerate() {
            if i > 0 {
                body.push_str("\r\n");
            }
            body.push_str(&inner);
            body.push_str(stmt);
        }
        format!("(function () {{\r\n{}\r\n{}return {};\r\n{}}})()", body, inner, root_id, base_indent)
    }
}

fn dedup_leading_underscores(s: &str) -> String {
    let trimmed = s.trim_start_matches('_');
    let count = s.len() - trimmed.len();
    if count >= 2 {
        format!("__{}", trimmed)
    } else {
        s.to_string()
    }
}

/// Builds one statement per property, in source order, plus whether the
/// element as a whole is "dynamic" (any Mixin, or any DynamicProperty
/// whose code fails the no-apparent-signals heuristic). Mixin state is
/// threaded through `Surplus.spread` calls: intermediate mixins bind a
/// fresh `mixinN`, the last mixin binds `__state` (the reactive
/// wrapper's own parameter), and the assignment is dropped entirely when
/// that last mixin is also the element's final property — its value is
/// returned instead, by [`wrap_reactive`].
fn build_property_statements(properties: &[Property], id: &str, is_html_like: bool) -> (Vec<String>, bool, bool) {
    let last_mixin_index = properties.iter().rposition(|p| matches!(p, Property::Spread(_)));
    let any_mixin = last_mixin_index.is_some();

    let any_reactive_dynamic = properties.iter().any(|p| match p {
        Property::Dynamic(dp) => looks_reactive(&render_embedded(&dp.code)),
        _ => false,
    });
    let dynamic = any_mixin || any_reactive_dynamic;

    let mut stmts = Vec::new();
    let mut prev_ref = "__state".to_string();
    let mut mixin_n = 0usize;

    for (idx, prop) in properties.iter().enumerate() {
        let is_last_prop = idx + 1 == properties.len();
        match prop {
            Property::Static(sp) => {
                let name = js_property_name(&sp.name, is_html_like);
                stmts.push(format!("{} = {};", member_access(id, &name), code_str(&sp.value)));
            }
            Property::Dynamic(dp) if dp.name == "ref" => {
                let expr = render_embedded(&dp.code);
                stmts.push(format!("{} = {};", expr.trim(), id));
            }
            Property::Dynamic(dp) => {
                let name = js_property_name(&dp.name, is_html_like);
                let expr = render_embedded(&dp.code);
                stmts.push(format!("{} = {};", member_access(id, &name), expr));
            }
            Property::Style(sp) => {
                // Normally folded into a Dynamic "style" property by
                // crate::transform before codegen runs; handled directly
                // here too so a caller invoking generate() on a
                // not-yet-normalized tree still gets valid output.
                let expr = render_embedded(&sp.code);
                stmts.push(format!("{} = {};", member_access(id, "style"), expr));
            }
            Property::Spread(sp) => {
                let expr = render_embedded(&sp.code);
                let call = format!("Surplus.spread({}, {}, {})", expr, id, prev_ref);
                let is_last_mixin = last_mixin_index == Some(idx);
                if is_last_mixin && is_last_prop {
                    stmts.push(format!("{};", call));
                } else if is_last_mixin {
                    stmts.push(format!("__state = {};", call));
                    prev_ref = "__state".to_string();
                } else {
                    mixin_n += 1;
                    let var = format!("mixin{}", mixin_n);
                    stmts.push(format!("var {} = {};", var, call));
                    prev_ref = var;
                }
            }
        }
    }
    (stmts, dynamic, any_mixin)
}

/// Collects property statements into a single `Surplus.S(...)` call. When
/// `any_mixin` is true the wrapper function takes `__state` as its sole
/// parameter (the previous invocation's return value, read by the first
/// mixin) and its last statement is turned into a `return`.
fn wrap_reactive(mut stmts: Vec<String>, any_mixin: bool) -> String {
    if any_mixin {
        if let Some(last) = stmts.last_mut() {
            *last = format!("return {}", last);
        }
    }
    let param = if any_mixin { "__state" } else { "" };
    format!("Surplus.S(function ({}) {{ {} }});", param, stmts.join(" "))
}

/// `class` is the one Html-dialect property name codegen maps to its DOM
/// property (`className`); everything else (including already
/// event-lowercased names from `crate::transform`) passes through as-is.
fn js_property_name(name: &str, is_html_like: bool) -> String {
    if is_html_like && name == "class" {
        "className".to_string()
    } else {
        name.to_string()
    }
}

/// `obj.name` when `name` is a valid identifier, `obj['data-name']`
/// otherwise (attribute names like `data-id` are common and aren't valid
/// JS identifiers).
fn member_access(obj: &str, name: &str) -> String {
    if is_plain_ident(name) {
        format!("{}.{}", obj, name)
    } else {
        format!("{}[{}]", obj, code_str(name))
    }
}

fn is_plain_ident(name: &str) -> bool {
    !name.is_empty()
        && name.chars().enumerate().all(|(i, c)| {
            if i == 0 {
                c.is_ascii_alphabetic() || c == '_' || c == '$'
            } else {
                c.is_ascii_alphanumeric() || c == '_' || c == '$'
            }
        })
}

static LONE_FUNCTION_HEAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(function\b|\([^()]*\)\s*=>|[A-Za-z_$][A-Za-z0-9_$]*\s*=>)").unwrap()
});

/// The "no apparent signals" heuristic, inverted: an expression is
/// treated as reactive when it contains `(` and isn't just a lone
/// function head (`function ...`, `(args) =>`, `name =>`) — see design
/// note on the heuristic's intentional imprecision.
fn looks_reactive(code: &str) -> bool {
    let trimmed = code.trim();
    trimmed.contains('(') && !LONE_FUNCTION_HEAD.is_match(trimmed)
}

// ---------------------------------------------------------------------
// Component (SubComponent) calls
// ---------------------------------------------------------------------

enum Group {
    Props(Vec<(String, String)>),
    Mixin(String),
}

fn generate_component_call(el: &Element) -> String {
    let mut groups: Vec<Group> = Vec::new();
    for prop in &el.properties {
        match prop {
            Property::Spread(sp) => groups.push(Group::Mixin(render_embedded(&sp.code))),
            other => {
                let (key, value) = component_entry(other);
                match groups.last_mut() {
                    Some(Group::Props(entries)) => entries.push((key, value)),
                    _ => groups.push(Group::Props(vec![(key, value)])),
                }
            }
        }
    }

    let children = component_children_literal(el);
    match groups.first_mut() {
        Some(Group::Props(entries)) => entries.push(("children".to_string(), children)),
        _ => groups.insert(0, Group::Props(vec![("children".to_string(), children)])),
    }

    if groups.len() == 1 {
        if let Group::Props(entries) = &groups[0] {
            return format!("{}({})", el.tag, render_object(entries));
        }
    }

    let rendered: Vec<String> = groups
        .iter()
        .map(|g| match g {
            Group::Props(entries) => render_object(entries),
            Group::Mixin(expr) => expr.clone(),
        })
        .collect();
    format!("Surplus.subcomponent({}, [{}])", el.tag, rendered.join(", "))
}

fn component_entry(prop: &Property) -> (String, String) {
    match prop {
        Property::Static(sp) => (prop_key(&sp.name), code_str(&sp.value)),
        Property::Dynamic(dp) => (prop_key(&dp.name), render_embedded(&dp.code)),
        Property::Style(sp) => ("style".to_string(), render_embedded(&sp.code)),
        Property::Spread(_) => unreachable!("Spread handled as its own group"),
    }
}

fn render_object(entries: &[(String, String)]) -> String {
    if entries.is_empty() {
        return "{}".to_string();
    }
    let rendered: Vec<String> = entries.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
    format!("{{ {} }}", rendered.join(", "))
}

/// Children always become an array literal, `[]` when empty — there is
/// no single-child unwrap.
fn component_children_literal(el: &Element) -> String {
    let items: Vec<String> = el.content.iter().map(component_child_value).collect();
    format!("[{}]", items.join(", "))
}

/// A component child rendered as a plain array value, not a live DOM
/// node: text/comments take their one-argument form (there is no parent
/// to append to yet) and an Insert is passed through as a bare
/// expression, left for the receiving component/runtime to treat
/// reactively if it chooses.
fn component_child_value(child: &Child) -> String {
    match child {
        Child::Element(el) => generate_embedded(el, ""),
        Child::Text(t) => code_str(&t.text),
        Child::Comment(c) => format!("Surplus.createComment({})", code_str(&c.text)),
        Child::Insert(ins) => render_embedded(&ins.code),
    }
}

/// Builds the `EmbeddedCode` for a merged `style` property
/// ([`crate::transform::style`]): a single style value is passed through
/// unchanged, two or more merge left-to-right through `Object.assign`.
pub(crate) fn code_fragment_for_style(codes: &[EmbeddedCode]) -> EmbeddedCode {
    if let [single] = codes {
        return single.clone();
    }
    let loc = codes
        .first()
        .and_then(|c| c.segments.first())
        .map(|seg| match seg {
            Segment::Code(c) => c.loc,
            Segment::Elem(e) => e.loc,
        })
        .unwrap_or_default();
    let mut text = String::from("Object.assign({}, ");
    for (i, code) in codes.iter().enumerate() {
        if i > 0 {
            text.push_str(", ");
        }
        text.push_str(&render_embedded(code));
    }
    text.push(')');
    EmbeddedCode::plain(loc, text)
}

fn prop_key(name: &str) -> String {
    if is_plain_ident(name) {
        name.to_string()
    } else {
        code_str(name)
    }
}

/// Encodes a Rust string as a single-quoted JavaScript string literal:
/// `\` and `'` are escaped, and a literal newline becomes a backslash
/// line continuation rather than an escaped `\n`.
pub fn code_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\\n"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}
