//! Passes 1 and 2: insignificant whitespace.
//!
//! Pass 1 drops Text children that are pure whitespace runs, so that the
//! indentation between sibling tags never turns into a stray text node.
//! The two dialects disagree on exactly which runs count: the native
//! dialect only drops a whitespace run that *spans a newline* (a single
//! inline space, `<b>a</b> <b>b</b>`, stays significant), and exempts
//! anything nested under `<pre>`; the JSX-dialect analogue is coarser and
//! drops any whitespace-only text outright, `<pre>` included. This
//! asymmetry is in the source spec, not an oversight.
//!
//! Pass 2 collapses interior whitespace runs (`/\s\s+/` -> one space) and
//! only runs for the native dialect; `<pre>` is exempt there too.

use crate::ast::{Child, CodeTopLevel, Element};
use crate::transform::visitor::{walk_element, Transform};

struct TrimInsignificantWhitespace {
    jsx: bool,
    pre_depth: u32,
}

impl Transform for TrimInsignificantWhitespace {
    fn visit_element(&mut self, node: &mut Element) {
        let is_pre = node.tag.eq_ignore_ascii_case("pre");
        if is_pre {
            self.pre_depth += 1;
        }
        node.content.retain(|child| match child {
            Child::Text(t) => !self.is_insignificant(&t.text),
            _ => true,
        });
        walk_element(self, node);
        if is_pre {
            self.pre_depth -= 1;
        }
    }
}

impl TrimInsignificantWhitespace {
    fn is_insignificant(&self, text: &str) -> bool {
        if !text.trim().is_empty() {
            return false;
        }
        if self.jsx {
            true
        } else {
            self.pre_depth == 0 && text.contains('\n')
        }
    }
}

struct CollapseWhitespace {
    pre_depth: u32,
}

impl Transform for CollapseWhitespace {
    fn visit_element(&mut self, node: &mut Element) {
        let is_pre = node.tag.eq_ignore_ascii_case("pre");
        if is_pre {
            self.pre_depth += 1;
        }
        if self.pre_depth == 0 {
            for child in &mut node.content {
                if let Child::Text(t) = child {
                    t.text = collapse_runs(&t.text);
                }
            }
        }
        walk_element(self, node);
        if is_pre {
            self.pre_depth -= 1;
        }
    }
}

fn collapse_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() && matches!(chars.peek(), Some(n) if n.is_whitespace()) {
            out.push(' ');
            while matches!(chars.peek(), Some(n) if n.is_whitespace()) {
                chars.next();
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Pass 1, dialect-dependent.
pub fn trim_insignificant_whitespace(top: &mut CodeTopLevel, jsx: bool) {
    let mut pass = TrimInsignificantWhitespace { jsx, pre_depth: 0 };
    pass.visit_code_top_level(top);
}

/// Pass 2, native dialect only.
pub fn collapse_whitespace(top: &mut CodeTopLevel) {
    let mut pass = CollapseWhitespace { pre_depth: 0 };
    pass.visit_code_top_level(top);
}
