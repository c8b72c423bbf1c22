//! Quote/paren-aware scanning shared by the line parser and the operand
//! splitter. Both need to find a delimiter (a space
//! terminating the operand field, a comma separating operands) while
//! ignoring delimiters that fall inside a single-quoted string or a
//! parenthesised group.

/// Byte index of the first occurrence of `delim` in `s` that is outside any
/// single-quoted run and at paren depth 0. Parens are tracked unescaped;
/// a quote toggles regardless of paren depth.
pub fn find_outside(s: &str, delim: char) -> Option<usize> {
    let mut depth = 0i32;
    let mut in_quote = false;
    for (i, c) in s.char_indices() {
        if c == '\'' {
            in_quote = !in_quote;
            continue;
        }
        if in_quote {
            continue;
        }
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if c == delim && depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Split `s` on every occurrence of `delim` that is outside a quoted run
/// and at paren depth 0, using the same discipline as [`find_outside`].
pub fn split_outside(s: &str, delim: char) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut depth = 0i32;
    let mut in_quote = false;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        if c == '\'' {
            in_quote = !in_quote;
            continue;
        }
        if in_quote {
            continue;
        }
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if c == delim && depth == 0 => {
                pieces.push(s[start..i].to_string());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(s[start..].to_string());
    pieces
}
