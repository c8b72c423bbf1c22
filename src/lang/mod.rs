//! # Language module
//!
//! Generic, language-agnostic pieces shared by the HLASM analysis pipeline
//! and its LSP surface: the open-document record and small helpers for
//! turning a raw line/offset into LSP ranges and identifier words.

pub mod server;

use lsp_types as lsp;

/// An open text document together with the version the client reported for
/// it. `version` is `None` for documents synthesized outside the LSP
/// lifecycle (tests, CLI use).
#[derive(Clone)]
pub struct Document {
    pub uri: lsp::Uri,
    pub text: String,
    pub version: Option<i32>,
}

/// Characters that continue an HLASM identifier word (labels, symbols,
/// ordinary names). Matches the identifier alphabet used by the operand
/// lexer (`[A-Za-z0-9@#$_]`).
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '@' || c == '#' || c == '$' || c == '_'
}

/// Find the contiguous run of identifier characters surrounding `character`
/// (a 0-based UTF-16-agnostic byte/char offset; HLASM source is ASCII-range
/// in practice so byte and char offsets coincide). Returns `None` if the
/// offset is past the end of the line or lands on a non-identifier
/// character. The trailing `\r` of a line split from a `\r\n` document is
/// stripped before the search.
pub fn word_at(line: &str, character: usize) -> Option<(String, std::ops::Range<usize>)> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let chars: Vec<char> = line.chars().collect();
    if character >= chars.len() {
        return None;
    }
    if !is_word_char(chars[character]) {
        return None;
    }
    let mut start = character;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = character + 1;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }
    let word: String = chars[start..end].iter().collect();
    Some((word, start..end))
}

/// Build an LSP range spanning `[start_col,end_col)` on a single `line`.
pub fn line_range(line: u32, start_col: usize, end_col: usize) -> lsp::Range {
    lsp::Range::new(
        lsp::Position::new(line, start_col as u32),
        lsp::Position::new(line, end_col as u32),
    )
}

/// Case-insensitive search for the first occurrence of `needle` in
/// `haystack`, bounded so the returned end column never exceeds
/// `max_col` (HLASM's comment column, 71). Used by the diagnostic and
/// navigation code to locate an operand's source text on its raw line.
pub fn find_ci_bounded(haystack: &str, needle: &str, max_col: usize) -> Option<std::ops::Range<usize>> {
    if needle.is_empty() {
        return None;
    }
    let hay_upper = haystack.to_uppercase();
    let needle_upper = needle.to_uppercase();
    let bound = haystack.len().min(max_col);
    let search_region = if bound <= hay_upper.len() { &hay_upper[..bound] } else { &hay_upper[..] };
    search_region.find(&needle_upper).map(|start| {
        let end = (start + needle_upper.len()).min(max_col);
        start..end
    })
}

/// Column at which the HLASM comment/identification field begins (byte
/// index 71 for 1-based column 72), shared by every raw-line locator.
pub const COMMENT_COLUMN: usize = 71;

/// Fallback column used when `name` cannot be relocated on `raw`: the
/// fixed range `(9, 9 + len(name))`. Shared by the diagnostic locator and
/// the reference finder, which use the same raw-line search.
pub const FALLBACK_COL: usize = 9;

/// Locate `name` (case-insensitively) on `raw` for line `line`, falling
/// back to the fixed `(9, 9 + len(name))` range when it cannot be found
/// there (e.g. it only appears via the symbol table, not literally on
/// this raw line).
pub fn locate_name(raw: &str, line: u32, name: &str) -> lsp::Range {
    find_ci_bounded(raw, name, COMMENT_COLUMN)
        .map(|r| line_range(line, r.start, r.end))
        .unwrap_or_else(|| line_range(line, FALLBACK_COL, FALLBACK_COL + name.len()))
}

/// Pass a client-supplied URI straight through. A real client always sends
/// canonical `file://` URIs, and this core has no cross-file includes, so
/// there is nothing to canonicalize beyond what `lsp_types` already parses.
pub fn normalize_client_uri(uri: lsp::Uri) -> lsp::Uri {
    uri
}

#[cfg(test)]
mod word_at_test {
    use super::word_at;

    #[test]
    fn middle_of_word() {
        let (w, r) = word_at("   WORK     EQUREG R3,G", 5).expect("word expected");
        assert_eq!(w, "WORK");
        assert_eq!(r, 3..7);
    }

    #[test]
    fn past_end_of_line() {
        assert!(word_at("SHORT", 50).is_none());
    }

    #[test]
    fn on_whitespace() {
        assert!(word_at("A B", 1).is_none());
    }

    #[test]
    fn strips_trailing_cr() {
        let (w, _) = word_at("LABEL\r", 2).expect("word expected");
        assert_eq!(w, "LABEL");
    }
}
