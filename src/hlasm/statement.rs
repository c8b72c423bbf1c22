//! Fixed-column line parser.
//!
//! Splits one raw source line into its label/opcode/operand/comment fields
//! and classifies the operand field into [`Operand`] values, then stitches
//! whole-document parsing on top by running the line parser over every
//! line and keeping line numbers 0-based.

use crate::hlasm::operand::{classify, split_operands, Operand};
use crate::hlasm::scan::find_outside;

/// Column at which the HLASM comment/identification field begins (1-based
/// column 72, byte index 71 in a 0-based line). Anything at or past this
/// column is discarded before label/op/operand/comment splitting runs;
/// only `raw` keeps the untruncated original.
const COMMENT_COLUMN: usize = 71;

#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub line: u32,
    pub label: Option<String>,
    pub op: Option<String>,
    pub operands: Vec<Operand>,
    pub comment: Option<String>,
    pub raw: String,
}

/// Parse one source line. Returns `None` for a blank line (nothing to
/// analyse); a line whose first non-empty character is `*` is a comment
/// statement (`op = "*"`, full text captured as `comment`, no label, no
/// operands), using the untruncated raw text.
pub fn parse_line(raw_line: &str, line: u32) -> Option<Statement> {
    let raw = raw_line.strip_suffix('\r').unwrap_or(raw_line).to_string();
    if raw.trim().is_empty() {
        return None;
    }

    if raw.starts_with('*') {
        return Some(Statement {
            line,
            label: None,
            op: Some("*".to_string()),
            operands: Vec::new(),
            comment: Some(raw.clone()),
            raw,
        });
    }

    let bound = raw.len().min(COMMENT_COLUMN);
    let code = &raw[..bound];

    let label = if code.chars().next() != Some(' ') {
        let end = code.find(' ').unwrap_or(code.len());
        Some(code[..end].to_string())
    } else {
        None
    };

    let after_label = match &label {
        Some(lbl) => &code[lbl.len()..],
        None => code,
    };
    let after_label = after_label.trim_start_matches(' ');

    let op_end = after_label.find(' ').unwrap_or(after_label.len());
    let op = if op_end > 0 {
        Some(after_label[..op_end].to_uppercase())
    } else {
        None
    };

    let rest = after_label[op_end..].trim_start_matches(' ');
    let operand_end = find_outside(rest, ' ').unwrap_or(rest.len());
    let operand_field = &rest[..operand_end];
    let inline_comment = rest[operand_end..].trim_start_matches(' ');

    let operands = if operand_field.is_empty() {
        Vec::new()
    } else {
        split_operands(operand_field).iter().map(|p| classify(p)).collect()
    };

    let comment = if inline_comment.is_empty() {
        None
    } else {
        Some(inline_comment.to_string())
    };

    Some(Statement {
        line,
        label,
        op,
        operands,
        comment,
        raw,
    })
}

/// Parse a whole document into its constituent statements, skipping blank
/// lines. `\r\n` line endings are normalised to `\n` by stripping the
/// trailing `\r` from each line before parsing; line numbers are 0-based
/// and match what the client sends in LSP positions.
pub fn parse_document(text: &str) -> Vec<Statement> {
    text.split('\n')
        .enumerate()
        .filter_map(|(i, line)| parse_line(line, i as u32))
        .collect()
}

#[cfg(test)]
mod statement_test {
    use super::*;
    use crate::hlasm::operand::AddrDisp;

    #[test]
    fn blank_line_is_skipped() {
        assert!(parse_line("   ", 0).is_none());
    }

    #[test]
    fn full_line_comment() {
        let s = parse_line("* a note", 0).unwrap();
        assert_eq!(s.label, None);
        assert_eq!(s.op.as_deref(), Some("*"));
        assert_eq!(s.operands, Vec::new());
        assert_eq!(s.comment.as_deref(), Some("* a note"));
    }

    #[test]
    fn label_op_and_operands() {
        let s = parse_line("FPR      EQUREG R0,F", 3).unwrap();
        assert_eq!(s.label.as_deref(), Some("FPR"));
        assert_eq!(s.op.as_deref(), Some("EQUREG"));
        assert_eq!(s.operands, vec![Operand::Reg(0), Operand::Sym("F".to_string())]);
    }

    #[test]
    fn opcode_only_no_label() {
        let s = parse_line("         LA    R1,4(R2)", 0).unwrap();
        assert_eq!(s.label, None);
        assert_eq!(s.op.as_deref(), Some("LA"));
        assert_eq!(
            s.operands,
            vec![Operand::Reg(1), Operand::Addr { disp: AddrDisp::Imm(4), base: "R2".to_string(), index: None }]
        );
    }

    #[test]
    fn inline_comment_after_operands() {
        let s = parse_line("         LR    R1,R2   move it", 0).unwrap();
        assert_eq!(s.operands, vec![Operand::Reg(1), Operand::Reg(2)]);
        assert_eq!(s.comment.as_deref(), Some("move it"));
    }

    #[test]
    fn quoted_operand_with_embedded_space() {
        let s = parse_line("         DC    C'A B'", 0).unwrap();
        assert_eq!(s.operands, vec![Operand::Str("A B".to_string())]);
    }

    #[test]
    fn beyond_comment_column_is_discarded() {
        let long_label = "X".repeat(80);
        let s = parse_line(&long_label, 0).unwrap();
        assert_eq!(s.label.as_deref(), Some(long_label[..71].to_string()).as_deref());
        assert_eq!(s.comment, None);
    }

    #[test]
    fn document_keeps_zero_based_line_numbers() {
        let doc = "A EQU 1\n\nB EQU 2\n";
        let stmts = parse_document(doc);
        assert_eq!(stmts.len(), 2);
        assert_eq!(stmts[0].line, 0);
        assert_eq!(stmts[1].line, 2);
    }

    #[test]
    fn crlf_line_endings_are_normalised() {
        let s = parse_line("LBL OP R1\r", 0).unwrap();
        assert_eq!(s.label.as_deref(), Some("LBL"));
        assert!(!s.raw.ends_with('\r'));
    }

    #[test]
    fn label_only_line_has_no_op() {
        let s = parse_line("LOOP", 0).unwrap();
        assert_eq!(s.label.as_deref(), Some("LOOP"));
        assert_eq!(s.op, None);
        assert!(s.operands.is_empty());
    }
}
