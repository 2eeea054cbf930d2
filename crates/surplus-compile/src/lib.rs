//! Compiles inline markup expressions — both the `@`-prefixed native
//! dialect and the JSX-like `{<tag>...}` dialect — into plain calls
//! against a small reactive-DOM runtime (`createRootElement`,
//! `createElement`, `createTextNode`, `createComment`, `insert`,
//! `spread`, `subcomponent`, `S`). The rest of the source is passed
//! through untouched.
//!
//! The entry point is [`preprocess`]: a pure function from source text
//! and [`Options`] to generated text (plus, optionally, a source map).
//! It does no I/O and keeps no state between calls — everything it needs
//! travels through its arguments and return value, so it is trivially
//! re-entrant.

pub mod ast;
pub mod codegen;
pub mod error;
pub mod lexer;
pub mod loc;
pub mod options;
pub mod parser;
pub mod sourcemap;
pub mod token;
pub mod transform;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use options::{Options, SourceMapMode};

/// The result of compiling one source file: the generated code, and a
/// source map when [`Options::source_map`] asked for one to be kept
/// separate from the output (`SourceMapMode::Extract`).
#[derive(Debug, Clone)]
pub struct PreprocessOutput {
    pub code: String,
    pub source_map: Option<sourcemap::SourceMap>,
}

/// Parses, normalizes, and compiles `source` according to `options`.
///
/// This is the library's only public entry point doing real work; the
/// `ast`/`lexer`/`parser`/`transform`/`codegen`/`sourcemap` modules are
/// public so a caller can drop down to an individual stage (for tooling,
/// testing, or diagnostics), but ordinary use needs only this function.
/// `preprocess` itself keeps no state across calls and mutates nothing
/// outside its own locals, so two calls on independent inputs can run
/// without any coordination between them (spec.md §5).
pub fn preprocess(source: &str, options: &Options) -> ParseResult<PreprocessOutput> {
    let mut top = parser::parse_with_dialect(source, options.jsx)?;
    transform::run_passes(&mut top, options.jsx);
    let generated = codegen::generate(&top);
    let (code, mappings) = sourcemap::finalize(&generated.code);

    let source_map = match options.source_map {
        options::SourceMapMode::None => None,
        options::SourceMapMode::Extract | options::SourceMapMode::Append => {
            Some(sourcemap::build(&mappings, options, source))
        }
    };

    let code = match (&options.source_map, &source_map) {
        (options::SourceMapMode::Append, Some(map)) => sourcemap::append_comment(&code, map),
        _ => code,
    };

    Ok(PreprocessOutput { code, source_map })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_code_passes_through_unchanged() {
        let out = preprocess("const x = 1;\n", &Options::default()).unwrap();
        assert_eq!(out.code, "const x = 1;\n");
        assert!(out.source_map.is_none());
    }

    #[test]
    fn jsx_embedding_is_replaced_with_runtime_calls() {
        let out = preprocess("let x = <div>hi</div>;", &Options::default()).unwrap();
        assert!(out.code.contains("Surplus.createRootElement('div')"));
        assert!(!out.code.contains("<div>"));
    }

    #[test]
    fn extract_mode_returns_a_source_map_without_touching_code() {
        let opts = Options { source_map: SourceMapMode::Extract, ..Options::default() };
        let out = preprocess("let x = <br/>;", &opts).unwrap();
        assert!(!out.code.contains("sourceMappingURL"));
        assert!(out.source_map.is_some());
    }

    #[test]
    fn append_mode_inlines_a_source_map_comment() {
        let opts = Options { source_map: SourceMapMode::Append, ..Options::default() };
        let out = preprocess("let x = <br/>;", &opts).unwrap();
        assert!(out.code.contains("//# sourceMappingURL=data:application/json,"));
    }

    #[test]
    fn malformed_markup_surfaces_a_parse_error_with_location() {
        let err = preprocess("let x = <div>oops</span>;", &Options::default()).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::MismatchedTags { .. }));
    }

    #[test]
    fn native_dialect_option_selects_at_prefixed_mixins() {
        let opts = Options { jsx: false, ..Options::default() };
        let out = preprocess("let x = <div @others></div>;", &opts).unwrap();
        assert!(out.code.contains("Surplus.spread(others"));
    }
}
