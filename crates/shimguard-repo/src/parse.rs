//! Lightweight scanner for the top level of a Rust source file.
//!
//! This is not a Rust parser. It recognizes exactly what the forward checks
//! need: top-level item declarations and `use` trees, with their visibility
//! and line. Comments and literals are blanked first so braces and keywords
//! inside them are never seen. Item bodies are skipped by brace matching.
//! Every function here tolerates arbitrary input without panicking.

use shimguard_domain::model::{ItemKind, ReexportSymbol, Visibility};

/// Result of scanning one file, before paths are resolved against the crate.
#[derive(Clone, Debug, Default)]
pub struct ScannedFile {
    pub items: Vec<ScannedItem>,
    pub uses: Vec<ScannedUse>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannedItem {
    pub kind: ItemKind,
    pub name: String,
    pub visibility: Visibility,
    pub line: u32,
}

/// One leaf of a `use` tree with its module path still unresolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannedUse {
    /// Written with a leading `::`.
    pub global: bool,
    /// Module segments as written, including `crate`, `self`, `super`.
    pub module: Vec<String>,
    pub symbol: ReexportSymbol,
    pub visibility: Visibility,
    pub line: u32,
}

pub fn scan_file(source: &str) -> ScannedFile {
    let code = blank_non_code(source);
    let mut out = ScannedFile::default();
    for stmt in split_top_level(&code) {
        classify(&code, stmt, &mut out);
    }
    out
}

// ---------------------------------------------------------------------------
// Blanking
// ---------------------------------------------------------------------------

/// Replace comments, string, and char literals with spaces.
///
/// Newlines are preserved so line numbers computed on the result match the
/// input. Lifetimes are left alone.
pub(crate) fn blank_non_code(src: &str) -> String {
    let chars: Vec<char> = src.chars().collect();
    let mut out = String::with_capacity(src.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();
        if let Some(hashes) = raw_string_hashes(&chars, i) {
            i = blank_raw_string(&chars, i, hashes, &mut out);
            continue;
        }
        match c {
            '/' if next == Some('/') => {
                while i < chars.len() && chars[i] != '\n' {
                    out.push(' ');
                    i += 1;
                }
            }
            '/' if next == Some('*') => {
                i = blank_block_comment(&chars, i, &mut out);
            }
            '"' => {
                i = blank_string(&chars, i, &mut out);
            }
            '\'' => {
                i = blank_char_literal(&chars, i, &mut out);
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

fn blank(c: char, out: &mut String) {
    out.push(if c == '\n' { '\n' } else { ' ' });
}

fn blank_block_comment(chars: &[char], start: usize, out: &mut String) -> usize {
    let mut depth = 0usize;
    let mut i = start;
    while i < chars.len() {
        let next = chars.get(i + 1).copied();
        if chars[i] == '/' && next == Some('*') {
            depth += 1;
            out.push_str("  ");
            i += 2;
            continue;
        }
        if chars[i] == '*' && next == Some('/') {
            depth = depth.saturating_sub(1);
            out.push_str("  ");
            i += 2;
            if depth == 0 {
                return i;
            }
            continue;
        }
        blank(chars[i], out);
        i += 1;
    }
    i
}

fn blank_string(chars: &[char], start: usize, out: &mut String) -> usize {
    out.push(' ');
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                blank(chars[i], out);
                if let Some(&escaped) = chars.get(i + 1) {
                    blank(escaped, out);
                }
                i += 2;
            }
            '"' => {
                out.push(' ');
                return i + 1;
            }
            c => {
                blank(c, out);
                i += 1;
            }
        }
    }
    i
}

/// `Some(n)` when a raw string with `n` hashes starts at `i` (`r"`, `r#"`, `br"`).
fn raw_string_hashes(chars: &[char], i: usize) -> Option<usize> {
    if chars.get(i) != Some(&'r') {
        return None;
    }
    let standalone = match i.checked_sub(1).and_then(|p| chars.get(p)) {
        None => true,
        Some('b') => !i
            .checked_sub(2)
            .and_then(|p| chars.get(p))
            .is_some_and(|c| is_ident_char(*c)),
        Some(c) => !is_ident_char(*c),
    };
    if !standalone {
        return None;
    }
    let mut j = i + 1;
    while chars.get(j) == Some(&'#') {
        j += 1;
    }
    (chars.get(j) == Some(&'"')).then_some(j - i - 1)
}

fn blank_raw_string(chars: &[char], start: usize, hashes: usize, out: &mut String) -> usize {
    // `r`, the hashes and the opening quote.
    let mut i = start;
    for _ in 0..hashes + 2 {
        if let Some(&c) = chars.get(i) {
            blank(c, out);
        }
        i += 1;
    }
    while i < chars.len() {
        if chars[i] == '"' && (1..=hashes).all(|k| chars.get(i + k) == Some(&'#')) {
            for _ in 0..=hashes {
                out.push(' ');
            }
            return i + hashes + 1;
        }
        blank(chars[i], out);
        i += 1;
    }
    i
}

fn blank_char_literal(chars: &[char], start: usize, out: &mut String) -> usize {
    let next = chars.get(start + 1).copied();
    let end = if next == Some('\\') {
        // '\n', '\'', '\u{1F600}'
        (start + 3..chars.len().min(start + 14)).find(|&j| chars[j] == '\'')
    } else if next.is_some() && next != Some('\n') && chars.get(start + 2) == Some(&'\'') {
        Some(start + 2)
    } else {
        None
    };

    match end {
        Some(end) => {
            for &c in &chars[start..=end] {
                blank(c, out);
            }
            end + 1
        }
        None => {
            out.push('\'');
            start + 1
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

// ---------------------------------------------------------------------------
// Statements
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
struct Stmt {
    start: usize,
    end: usize,
}

/// Split blanked code into top-level statements: text up to a `;` or up to
/// the `{` that opens an item body. Bodies themselves are skipped. Braces of
/// a `use` group stay inside the statement.
fn split_top_level(code: &str) -> Vec<Stmt> {
    let bytes = code.as_bytes();
    let mut out = Vec::new();
    let mut start = 0;
    let mut use_depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' => {
                if use_depth > 0 || is_use_statement(&code[start..i]) {
                    use_depth += 1;
                } else {
                    out.push(Stmt { start, end: i });
                    i = skip_block(bytes, i);
                    start = i;
                    continue;
                }
            }
            b'}' => {
                if use_depth > 0 {
                    use_depth -= 1;
                } else {
                    start = i + 1;
                }
            }
            b';' => {
                out.push(Stmt { start, end: i });
                start = i + 1;
                use_depth = 0;
            }
            _ => {}
        }
        i += 1;
    }
    out
}

/// Index just past the `}` matching the `{` at `open`, or the end of input.
fn skip_block(bytes: &[u8], open: usize) -> usize {
    let mut depth = 0usize;
    for (j, b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return j + 1;
                }
            }
            _ => {}
        }
    }
    bytes.len()
}

fn is_use_statement(text: &str) -> bool {
    let (_, rest) = parse_visibility(strip_attributes(text));
    matches!(next_ident(rest), Some(("use", _)))
}

fn strip_attributes(mut text: &str) -> &str {
    loop {
        text = text.trim_start();
        let body = if let Some(rest) = text.strip_prefix("#!") {
            rest
        } else if let Some(rest) = text.strip_prefix('#') {
            rest
        } else {
            return text;
        };
        if !body.starts_with('[') {
            return text;
        }
        match matching_close(body, b'[', b']') {
            Some(end) => text = &body[end + 1..],
            None => return "",
        }
    }
}

/// Byte index of the delimiter closing the one at position 0.
fn matching_close(text: &str, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    for (j, b) in text.bytes().enumerate() {
        if b == open {
            depth += 1;
        } else if b == close {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(j);
            }
        }
    }
    None
}

fn parse_visibility(text: &str) -> (Visibility, &str) {
    let text = text.trim_start();
    let Some(("pub", rest)) = next_ident(text) else {
        return (Visibility::Private, text);
    };
    let rest = rest.trim_start();
    if !rest.starts_with('(') {
        return (Visibility::Public, rest);
    }
    match matching_close(rest, b'(', b')') {
        Some(end) => {
            let inner = rest[1..end].trim();
            let vis = if inner == "self" {
                Visibility::Private
            } else {
                Visibility::Restricted
            };
            (vis, &rest[end + 1..])
        }
        None => (Visibility::Public, rest),
    }
}

/// Leading identifier (raw identifiers lose their `r#`) and the text after it.
fn next_ident(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    let text = text.strip_prefix("r#").unwrap_or(text);
    let end = text
        .char_indices()
        .find(|(_, c)| !is_ident_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    if end == 0 {
        return None;
    }
    let ident = &text[..end];
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some((ident, &text[end..]))
}

fn line_at(code: &str, offset: usize) -> u32 {
    let offset = offset.min(code.len());
    let newlines = code.as_bytes()[..offset]
        .iter()
        .filter(|b| **b == b'\n')
        .count();
    u32::try_from(newlines + 1).unwrap_or(u32::MAX)
}

fn offset_in(base: &str, sub: &str) -> usize {
    (sub.as_ptr() as usize).saturating_sub(base.as_ptr() as usize)
}

fn classify(code: &str, stmt: Stmt, out: &mut ScannedFile) {
    let text = &code[stmt.start..stmt.end];
    let (visibility, mut rest) = parse_visibility(strip_attributes(text));

    loop {
        let Some((word, after)) = next_ident(rest) else {
            return;
        };
        let kind = match word {
            "default" | "unsafe" | "async" | "extern" | "auto" => {
                rest = after;
                continue;
            }
            "const" => match next_ident(after) {
                Some(("fn" | "unsafe" | "async" | "extern", _)) => {
                    rest = after;
                    continue;
                }
                _ => ItemKind::Const,
            },
            "use" => {
                let base = offset_in(code, after);
                for leaf in parse_use_tree(after) {
                    let line = line_at(code, base + leaf.offset);
                    if let Some(u) = leaf.into_scanned(visibility, line) {
                        out.uses.push(u);
                    }
                }
                return;
            }
            "struct" => ItemKind::Struct,
            "enum" => ItemKind::Enum,
            "union" => ItemKind::Union,
            "trait" => ItemKind::Trait,
            "type" => ItemKind::TypeAlias,
            "fn" => ItemKind::Fn,
            "static" => ItemKind::Static,
            "mod" => ItemKind::Mod,
            _ => return,
        };

        let mut name_text = after;
        if kind == ItemKind::Static
            && let Some(("mut", after_mut)) = next_ident(name_text)
        {
            name_text = after_mut;
        }
        if let Some((name, _)) = next_ident(name_text)
            && name != "_"
        {
            let line = line_at(code, offset_in(code, name_text.trim_start()));
            out.items.push(ScannedItem {
                kind,
                name: name.to_string(),
                visibility,
                line,
            });
        }
        return;
    }
}

// ---------------------------------------------------------------------------
// Use trees
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
enum Tok<'a> {
    Ident(&'a str),
    PathSep,
    Open,
    Close,
    Comma,
    Star,
}

#[derive(Clone, Debug)]
struct UseLeaf {
    global: bool,
    path: Vec<String>,
    glob: bool,
    alias: Option<String>,
    offset: usize,
}

impl UseLeaf {
    fn into_scanned(self, visibility: Visibility, line: u32) -> Option<ScannedUse> {
        let mut path = self.path;
        let symbol = if self.glob {
            ReexportSymbol::Glob
        } else {
            if path.last().map(String::as_str) == Some("self") {
                path.pop();
            }
            let name = path.pop()?;
            if matches!(name.as_str(), "crate" | "self" | "super") {
                return None;
            }
            ReexportSymbol::Named {
                name,
                alias: self.alias,
            }
        };
        Some(ScannedUse {
            global: self.global,
            module: path,
            symbol,
            visibility,
            line,
        })
    }
}

fn tokenize(text: &str) -> Vec<(Tok<'_>, usize)> {
    let mut out = Vec::new();
    let mut i = 0;
    let bytes = text.as_bytes();
    while i < bytes.len() {
        let rest = &text[i..];
        let b = bytes[i];
        match b {
            b':' if rest.starts_with("::") => {
                out.push((Tok::PathSep, i));
                i += 2;
            }
            b'{' => {
                out.push((Tok::Open, i));
                i += 1;
            }
            b'}' => {
                out.push((Tok::Close, i));
                i += 1;
            }
            b',' => {
                out.push((Tok::Comma, i));
                i += 1;
            }
            b'*' => {
                out.push((Tok::Star, i));
                i += 1;
            }
            _ if b.is_ascii_whitespace() => i += 1,
            _ => match next_ident(rest) {
                Some((ident, after)) => {
                    let start = offset_in(text, ident);
                    out.push((Tok::Ident(ident), start));
                    i = offset_in(text, after);
                }
                // Anything else ends the tree.
                None => return out,
            },
        }
    }
    out
}

struct UseParser<'a> {
    toks: Vec<(Tok<'a>, usize)>,
    pos: usize,
    global: bool,
}

impl<'a> UseParser<'a> {
    fn peek(&self) -> Option<&Tok<'a>> {
        self.toks.get(self.pos).map(|(t, _)| t)
    }

    fn bump(&mut self) -> Option<(Tok<'a>, usize)> {
        let t = self.toks.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    /// Returns false on malformed input so the caller can stop.
    fn tree(&mut self, prefix: &[String], depth: usize, out: &mut Vec<UseLeaf>) -> bool {
        if depth > 64 {
            return false;
        }
        let mut path = prefix.to_vec();
        loop {
            match self.bump() {
                Some((Tok::Ident(name), offset)) => {
                    path.push(name.to_string());
                    if self.peek() == Some(&Tok::PathSep) {
                        self.pos += 1;
                        continue;
                    }
                    let mut alias = None;
                    if self.peek() == Some(&Tok::Ident("as")) {
                        self.pos += 1;
                        match self.bump() {
                            Some((Tok::Ident(a), _)) => alias = Some(a.to_string()),
                            _ => return false,
                        }
                    }
                    out.push(UseLeaf {
                        global: self.global,
                        path,
                        glob: false,
                        alias,
                        offset,
                    });
                    return true;
                }
                Some((Tok::Star, offset)) => {
                    out.push(UseLeaf {
                        global: self.global,
                        path,
                        glob: true,
                        alias: None,
                        offset,
                    });
                    return true;
                }
                Some((Tok::Open, _)) => loop {
                    if self.peek() == Some(&Tok::Close) {
                        self.pos += 1;
                        return true;
                    }
                    if !self.tree(&path, depth + 1, out) {
                        return false;
                    }
                    match self.bump() {
                        Some((Tok::Comma, _)) => {}
                        Some((Tok::Close, _)) => return true,
                        _ => return false,
                    }
                },
                _ => return false,
            }
        }
    }
}

fn parse_use_tree(text: &str) -> Vec<UseLeaf> {
    let toks = tokenize(text);
    let mut parser = UseParser {
        toks,
        pos: 0,
        global: false,
    };
    if parser.peek() == Some(&Tok::PathSep) {
        parser.pos += 1;
        parser.global = true;
    }
    let mut leaves = Vec::new();
    parser.tree(&[], 0, &mut leaves);
    leaves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> ReexportSymbol {
        ReexportSymbol::Named {
            name: name.to_string(),
            alias: None,
        }
    }

    fn modules(file: &ScannedFile) -> Vec<(String, String)> {
        file.uses
            .iter()
            .map(|u| (u.module.join("::"), u.symbol.exposed_name().to_string()))
            .collect()
    }

    #[test]
    fn blanking_keeps_lines_and_lifetimes() {
        let src = "// a { comment\nlet s = \"}\";\nfn f<'a>(x: &'a str) {}\n/* multi\nline */ let c = '{';";
        let blanked = blank_non_code(src);
        assert_eq!(blanked.matches('\n').count(), src.matches('\n').count());
        assert!(!blanked.contains("comment"));
        assert!(blanked.contains("'a"));
        assert_eq!(blanked.matches('{').count(), 1);
        assert_eq!(blanked.matches('}').count(), 1);
    }

    #[test]
    fn blanking_handles_raw_and_escaped_literals() {
        let src = r####"let a = r#"quote " { "#; let b = br"{"; let c = '\''; let d = "\" {";"####;
        let blanked = blank_non_code(src);
        assert!(!blanked.contains('{'));
        assert!(!blanked.contains('"'));
    }

    #[test]
    fn nested_block_comments_are_blanked() {
        let blanked = blank_non_code("/* outer /* inner */ still { */ pub struct A;");
        assert!(!blanked.contains('{'));
        assert!(blanked.contains("pub struct A"));
    }

    #[test]
    fn scans_item_kinds_and_visibility() {
        let src = r#"
#![forbid(unsafe_code)]
pub struct EmailRecord { pub id: u64 }
pub(crate) enum Status { Open, Closed }
struct Private;
pub trait Store {}
pub type Id = u64;
pub const fn version() -> u32 { 1 }
pub static mut COUNTER: u32 = 0;
pub unsafe fn raw() {}
pub mod nested { pub struct Inner; }
#[derive(Debug)]
pub union Bits { a: u32 }
pub(self) fn hidden() {}
impl Store for Private {}
const _: () = ();
"#;
        let file = scan_file(src);
        let got: Vec<(ItemKind, &str, Visibility)> = file
            .items
            .iter()
            .map(|i| (i.kind, i.name.as_str(), i.visibility))
            .collect();
        assert_eq!(
            got,
            vec![
                (ItemKind::Struct, "EmailRecord", Visibility::Public),
                (ItemKind::Enum, "Status", Visibility::Restricted),
                (ItemKind::Struct, "Private", Visibility::Private),
                (ItemKind::Trait, "Store", Visibility::Public),
                (ItemKind::TypeAlias, "Id", Visibility::Public),
                (ItemKind::Fn, "version", Visibility::Public),
                (ItemKind::Static, "COUNTER", Visibility::Public),
                (ItemKind::Fn, "raw", Visibility::Public),
                (ItemKind::Mod, "nested", Visibility::Public),
                (ItemKind::Union, "Bits", Visibility::Public),
                (ItemKind::Fn, "hidden", Visibility::Private),
            ]
        );
        assert_eq!(file.items[0].line, 3);
    }

    #[test]
    fn nested_items_are_not_top_level() {
        let file = scan_file("pub mod a { pub struct Hidden; pub use crate::x::Y; }\nimpl A { pub fn m() {} }");
        assert_eq!(file.items.len(), 1);
        assert_eq!(file.items[0].name, "a");
        assert!(file.uses.is_empty());
    }

    #[test]
    fn scans_use_groups_aliases_and_globs() {
        let src = "pub use crate::domain::models::{email_record::EmailRecord, report::{self, Report as Summary}, *};";
        let file = scan_file(src);
        assert_eq!(
            modules(&file),
            vec![
                ("crate::domain::models::email_record".to_string(), "EmailRecord".to_string()),
                ("crate::domain::models".to_string(), "report".to_string()),
                ("crate::domain::models::report".to_string(), "Summary".to_string()),
                ("crate::domain::models".to_string(), "*".to_string()),
            ]
        );
        assert!(file.uses.iter().all(|u| u.visibility == Visibility::Public));
    }

    #[test]
    fn multi_line_use_reports_each_leaf_line() {
        let src = "use std::fmt;\n\npub use crate::a::{\n    B,\n    C,\n};\n";
        let file = scan_file(src);
        let lines: Vec<u32> = file.uses.iter().map(|u| u.line).collect();
        assert_eq!(lines, vec![1, 4, 5]);
        assert_eq!(file.uses[0].visibility, Visibility::Private);
        assert_eq!(file.uses[1].symbol, named("B"));
    }

    #[test]
    fn global_paths_are_flagged() {
        let file = scan_file("pub use ::serde::Serialize;");
        assert_eq!(file.uses.len(), 1);
        assert!(file.uses[0].global);
        assert_eq!(file.uses[0].module, vec!["serde".to_string()]);
    }

    #[test]
    fn attributes_before_use_are_stripped() {
        let file = scan_file("#[doc(inline)]\n#[allow(unused_imports)]\npub use super::report::Report;");
        assert_eq!(file.uses.len(), 1);
        assert_eq!(file.uses[0].module, vec!["super".to_string(), "report".to_string()]);
        assert_eq!(file.uses[0].line, 3);
    }

    #[test]
    fn text_in_comments_and_strings_is_ignored() {
        let src = "// pub use crate::gone::Thing;\nconst DOC: &str = \"pub struct Fake;\";\n/* pub struct AlsoFake; */";
        let file = scan_file(src);
        assert!(file.uses.is_empty());
        let names: Vec<&str> = file.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["DOC"]);
    }

    #[test]
    fn struct_literal_in_const_does_not_derail_scanning() {
        let src = "pub const DEFAULT: Config = Config { retries: 3 };\npub struct After;";
        let names: Vec<String> = scan_file(src).items.into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["DEFAULT".to_string(), "After".to_string()]);
    }

    #[test]
    fn malformed_input_does_not_panic() {
        for src in [
            "pub use crate::{a, b",
            "pub use ;",
            "pub use crate::a as ;",
            "}}}} pub struct",
            "r#\"unterminated",
            "'",
            "'\\",
            "/* never closed",
            "pub(in",
            "#[attr",
            "pub use {{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{{;",
        ] {
            let _ = scan_file(src);
        }
    }
}
