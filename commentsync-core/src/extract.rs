//! Declaration extraction: walks a parsed module and materializes the
//! callable units the merge engine operates on, each with the structural
//! handles (byte spans) later used to reattach its comment.

use crate::commentsync_debug;
use crate::parse::*;
use proc_macro2::{Delimiter, Spacing, TokenStream, TokenTree};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use unsynn::*;

/// Sentinel used when a parameter's type text cannot be recovered.
pub const UNKNOWN_TYPE: &str = "UnknownType";

/// The kind of callable unit a declaration is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    /// A function or method (free, inherent, trait-provided or trait-required)
    Method,
    /// A type alias whose target is an `fn` pointer type
    CallableType,
}

/// One documented parameter position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    /// Rendered spelling of the type, one line
    pub type_text: String,
}

/// A callable declaration, materialized once per run.
///
/// `doc_spans` and `anchor` are byte offsets into the original source text;
/// reattachment happens strictly through them, never through a second
/// name-based search.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: String,
    /// Whether the item itself carries a `pub` spelling (trait requirements
    /// count as public).
    pub public: bool,
    pub params: Vec<Param>,
    /// Rendered return type spelling; `None` is the void sentinel (no `->`,
    /// or a unit `()` return)
    pub return_type: Option<String>,
    /// Byte ranges of the attached doc trivia, one per contiguous run of doc
    /// lines. A non-doc attribute between two doc lines splits the runs, so
    /// regeneration can leave it in place.
    pub doc_spans: Vec<Range<usize>>,
    /// Byte offset of the declaration's first token; insertion point when no
    /// doc trivia exists
    pub anchor: usize,
}

impl Declaration {
    pub fn has_doc(&self) -> bool {
        !self.doc_spans.is_empty()
    }
}

/// Errors raised while turning source text into declarations.
#[derive(Debug)]
pub enum ParseError {
    /// Source text failed to tokenize
    Lex(String),
    /// Token stream did not match the module grammar
    Syntax(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(msg) => write!(f, "lex error: {}", msg),
            ParseError::Syntax(msg) => write!(f, "parse failed: {}", msg),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a whole source file into the module grammar.
pub fn parse_module(source: &str) -> std::result::Result<ModuleContent, ParseError> {
    let tokens = TokenStream::from_str(source).map_err(|e| ParseError::Lex(e.to_string()))?;
    tokens
        .into_token_iter()
        .parse::<ModuleContent>()
        .map_err(|e| ParseError::Syntax(e.to_string()))
}

/// Extracts every callable declaration from a source file, in source order.
pub fn extract_declarations(source: &str) -> std::result::Result<Vec<Declaration>, ParseError> {
    let content = parse_module(source)?;
    let mut declarations = Vec::new();
    collect_content(&content, source, &mut declarations);
    commentsync_debug!("extracted {} declaration(s)", declarations.len());
    Ok(declarations)
}

fn collect_content(content: &ModuleContent, source: &str, out: &mut Vec<Declaration>) {
    for item in &content.items.0 {
        collect_item(&item.value, source, out);
    }
}

fn collect_item(item: &ModuleItem, source: &str, out: &mut Vec<Declaration>) {
    match item {
        ModuleItem::Function(sig) => {
            out.extend(function_decl(sig, source));
        }
        ModuleItem::TraitMethod(sig) => {
            out.extend(trait_method_decl(sig, source));
        }
        ModuleItem::TypeAlias(alias) => {
            out.extend(type_alias_decl(alias, source));
        }
        ModuleItem::ImplBlock(block) => collect_content(&block.items.content, source, out),
        ModuleItem::Module(module) => collect_content(&module.items.content, source, out),
        ModuleItem::Trait(trait_def) => collect_content(&trait_def.items.content, source, out),
        ModuleItem::Other(_) => {}
    }
}

fn function_decl(sig: &FnSig, source: &str) -> Option<Declaration> {
    let anchor = decl_anchor(&sig.attributes, &tokens_of(sig), source)?;
    Some(Declaration {
        kind: DeclKind::Method,
        name: sig.name.to_string(),
        public: sig.visibility.is_some(),
        params: fn_params(&sig.params),
        return_type: return_type_text(&sig.return_type),
        doc_spans: doc_spans(&sig.attributes, source),
        anchor,
    })
}

fn trait_method_decl(sig: &TraitMethodSig, source: &str) -> Option<Declaration> {
    let anchor = decl_anchor(&sig.attributes, &tokens_of(sig), source)?;
    Some(Declaration {
        kind: DeclKind::Method,
        name: sig.name.to_string(),
        public: true,
        params: fn_params(&sig.params),
        return_type: return_type_text(&sig.return_type),
        doc_spans: doc_spans(&sig.attributes, source),
        anchor,
    })
}

/// A type alias is a callable-type declaration iff its target parses as an
/// `fn` pointer type; any other alias is left alone.
fn type_alias_decl(alias: &TypeAliasSig, source: &str) -> Option<Declaration> {
    let target = tokens_of(&alias.target);
    let ptr = target.into_token_iter().parse::<FnPtrType>().ok()?;
    let anchor = decl_anchor(&alias.attributes, &tokens_of(alias), source)?;

    let mut params = Vec::new();
    if let Some(list) = ptr.params.content.as_ref() {
        for param in &list.0 {
            match &param.value {
                FnPtrParam::Named(named) => params.push(named_param(named)),
                // An unnamed position still gets a parameter line, under a
                // placeholder name.
                FnPtrParam::Bare(bare) => params.push(Param {
                    name: "_".to_string(),
                    type_text: type_text(&tokens_of(&bare.type_text)),
                }),
            }
        }
    }

    Some(Declaration {
        kind: DeclKind::CallableType,
        name: alias.name.to_string(),
        public: alias.visibility.is_some(),
        params,
        return_type: return_type_text(&ptr.return_type),
        doc_spans: doc_spans(&alias.attributes, source),
        anchor,
    })
}

fn fn_params(params: &ParenthesisGroupContaining<Option<CommaDelimitedVec<FnParam>>>) -> Vec<Param> {
    let mut out = Vec::new();
    if let Some(list) = params.content.as_ref() {
        for param in &list.0 {
            match &param.value {
                // Receivers are not documentable parameters.
                FnParam::SelfParam(_) => {}
                FnParam::Named(named) => out.push(named_param(named)),
                FnParam::Pattern(pattern) => out.push(Param {
                    name: render_tokens(&tokens_of(&pattern.pattern)),
                    type_text: type_text(&tokens_of(&pattern.param_type)),
                }),
            }
        }
    }
    out
}

fn named_param(named: &NamedParam) -> Param {
    Param {
        name: named.name.to_string(),
        type_text: type_text(&tokens_of(&named.param_type)),
    }
}

fn return_type_text(ret: &Option<ReturnType>) -> Option<String> {
    let ret = ret.as_ref()?;
    let tokens = tokens_of(&ret.return_type);
    // Unit is the void sentinel: no returns line.
    if is_unit(&tokens) {
        return None;
    }
    Some(type_text(&tokens))
}

/// A type is unit iff it is a single empty parenthesis group, whatever the
/// spelling (`()`, `( )`) looked like in source.
fn is_unit(tokens: &TokenStream) -> bool {
    let mut iter = tokens.clone().into_iter();
    let only = match (iter.next(), iter.next()) {
        (Some(tt), None) => tt,
        _ => return false,
    };
    match only {
        TokenTree::Group(group) => {
            group.delimiter() == Delimiter::Parenthesis && group.stream().into_iter().next().is_none()
        }
        _ => false,
    }
}

fn type_text(tokens: &TokenStream) -> String {
    let text = render_tokens(tokens);
    if text.is_empty() {
        UNKNOWN_TYPE.to_string()
    } else {
        text
    }
}

/// Renders a token run back to one line of text. Token spans cannot be
/// trusted here (re-emitted punctuation lands on empty call-site spans), so
/// the spelling is rebuilt from the tokens themselves.
fn render_tokens(tokens: &TokenStream) -> String {
    let mut out = String::new();
    render_into(tokens.clone(), &mut out);
    while out.ends_with(' ') {
        out.pop();
    }
    out
}

fn render_into(tokens: TokenStream, out: &mut String) {
    // Joint punctuation accumulates into one operator run (`::`, `->`, `>>`).
    let mut run = String::new();
    for tt in tokens {
        match tt {
            TokenTree::Punct(punct) => {
                run.push(punct.as_char());
                if punct.spacing() == Spacing::Alone {
                    flush_punct_run(out, &run);
                    run.clear();
                }
            }
            other => {
                if !run.is_empty() {
                    // A joint punct before a non-punct token: a lifetime tick.
                    flush_punct_run(out, &run);
                    run.clear();
                }
                match other {
                    TokenTree::Ident(ident) => push_word(out, &ident.to_string()),
                    TokenTree::Literal(lit) => push_word(out, &lit.to_string()),
                    TokenTree::Group(group) => render_group(out, &group),
                    TokenTree::Punct(_) => unreachable!(),
                }
            }
        }
    }
    if !run.is_empty() {
        flush_punct_run(out, &run);
    }
}

fn render_group(out: &mut String, group: &proc_macro2::Group) {
    let (open, close) = match group.delimiter() {
        Delimiter::Parenthesis => ("(", ")"),
        Delimiter::Bracket => ("[", "]"),
        Delimiter::Brace => ("{", "}"),
        Delimiter::None => ("", ""),
    };
    // Array and brace groups read as standalone words; parentheses attach to
    // the callable that precedes them (`Fn(i32)`).
    if group.delimiter() != Delimiter::Parenthesis && ends_with_word(out) {
        out.push(' ');
    }
    out.push_str(open);
    render_into(group.stream(), out);
    while out.ends_with(' ') {
        out.pop();
    }
    out.push_str(close);
}

fn push_word(out: &mut String, word: &str) {
    if ends_with_word(out) {
        out.push(' ');
    }
    out.push_str(word);
}

fn ends_with_word(out: &str) -> bool {
    out.chars()
        .next_back()
        .is_some_and(|ch| ch.is_alphanumeric() || ch == '_')
}

fn flush_punct_run(out: &mut String, run: &str) {
    match run {
        // Separators keep the space after, never before.
        "," | ";" => {
            out.push_str(run);
            out.push(' ');
        }
        // Binary operators get a space on both sides.
        "->" | "=>" | "+" | "=" | "|" => {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
            out.push_str(run);
            out.push(' ');
        }
        // Everything else binds tightly: `&`, `<`, `>`, `::`, `'`, `*`, `!`.
        _ => {
            if run.starts_with('>') {
                while out.ends_with(' ') {
                    out.pop();
                }
            }
            out.push_str(run);
        }
    }
}

/// Checks whether an attribute is doc trivia: `doc = ...`, bare `doc`, or
/// `doc(...)` forms (lexed `///` and `/** */` comments are the first form).
pub fn is_doc_attr(attr: &Attribute) -> bool {
    let Some(inner) = attr_arg_tokens(attr) else {
        return false;
    };
    let mut iter = inner.into_iter();
    if !matches!(iter.next(), Some(TokenTree::Ident(ident)) if ident == "doc") {
        return false;
    }
    match iter.next() {
        None => true,
        Some(TokenTree::Punct(punct)) => punct.as_char() == '=',
        Some(TokenTree::Group(_)) => true,
        Some(_) => false,
    }
}

fn attr_arg_tokens(attr: &Attribute) -> Option<TokenStream> {
    let tokens = tokens_of(&attr.content);
    match tokens.into_iter().next() {
        Some(TokenTree::Group(group)) => Some(group.stream()),
        _ => None,
    }
}

/// Byte ranges of the attached doc trivia, one per contiguous run. A run ends
/// where a non-doc attribute interrupts the doc lines.
fn doc_spans(attrs: &Option<Many<Attribute>>, source: &str) -> Vec<Range<usize>> {
    let mut runs: Vec<Range<usize>> = Vec::new();
    let mut in_run = false;
    let Some(attrs) = attrs.as_ref() else {
        return runs;
    };
    for attr in &attrs.0 {
        let attr = &attr.value;
        if !is_doc_attr(attr) {
            in_run = false;
            continue;
        }
        let Some(range) = attr_byte_range(attr, source) else {
            in_run = false;
            continue;
        };
        let extend = in_run && runs.last().is_some_and(|last| range.start >= last.end);
        if extend {
            if let Some(last) = runs.last_mut() {
                last.end = range.end;
            }
        } else {
            runs.push(range);
        }
        in_run = true;
    }
    runs
}

/// Byte range of one attribute. The bracket group's span survives re-emission
/// while the leading `#` does not, so the range is recovered from the group
/// and widened over the hash byte when one precedes it in source (a lexed
/// `///` comment has no hash; its group span already covers the whole line).
fn attr_byte_range(attr: &Attribute, source: &str) -> Option<Range<usize>> {
    let mut range = stream_byte_range(&tokens_of(&attr.content))?;
    if range.start > 0 && source.as_bytes()[range.start - 1] == b'#' {
        range.start -= 1;
    }
    Some(range)
}

/// Byte offset where the declaration starts: its first attribute if it has
/// any, otherwise its first surviving token span.
fn decl_anchor(
    attrs: &Option<Many<Attribute>>,
    sig_tokens: &TokenStream,
    source: &str,
) -> Option<usize> {
    if let Some(attrs) = attrs.as_ref() {
        if let Some(first) = attrs.0.first() {
            return attr_byte_range(&first.value, source).map(|range| range.start);
        }
    }
    stream_byte_range(sig_tokens).map(|range| range.start)
}

fn tokens_of<T: ToTokens>(node: &T) -> TokenStream {
    let mut tokens = TokenStream::new();
    ToTokens::to_tokens(node, &mut tokens);
    tokens
}

/// Byte hull of a token run. Re-emitted punctuation carries empty call-site
/// spans; those are skipped so they cannot drag the hull to offset zero.
fn stream_byte_range(tokens: &TokenStream) -> Option<Range<usize>> {
    let mut range: Option<Range<usize>> = None;
    for tt in tokens.clone() {
        let span = tt.span().byte_range();
        if span.start == span.end {
            continue;
        }
        range = Some(match range {
            None => span,
            Some(acc) => acc.start.min(span.start)..acc.end.max(span.end),
        });
    }
    range
}
