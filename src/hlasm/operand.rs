//! Operand classifier.
//!
//! Consumes one comma-separated operand piece at a time and classifies its
//! token shape into a closed [`Operand`] variant. Splitting the operand
//! field itself into pieces lives here too, since it shares the quote/paren
//! discipline in `scan.rs` with the line parser.

use crate::hlasm::scan::split_outside;
use crate::hlasm::token::{lex, Token};

/// The value side of an `Addr` displacement: either a bare symbol or an
/// integer literal, matching the two shapes the address-form table
/// allows in that position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddrDisp {
    Sym(String),
    Imm(i64),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Reg(u8),
    Sym(String),
    Imm(i64),
    Str(String),
    Addr {
        disp: AddrDisp,
        base: String,
        index: Option<String>,
    },
    Raw(String),
}

/// Split an operand field into its comma-separated pieces, honouring quoted
/// strings and parenthesised address forms (a comma inside `C'A,B'` or
/// `4(R1,R2)` does not start a new operand).
pub fn split_operands(field: &str) -> Vec<String> {
    split_outside(field, ',')
        .into_iter()
        .map(|piece| piece.trim().to_string())
        .filter(|piece| !piece.is_empty())
        .collect()
}

fn as_register(piece: &str) -> Option<u8> {
    let piece = piece.trim();
    if piece.len() < 2 {
        return None;
    }
    let mut chars = piece.chars();
    let first = chars.next().unwrap();
    if first != 'R' && first != 'r' {
        return None;
    }
    let rest = &piece[1..];
    if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let n: u32 = rest.parse().ok()?;
    if n <= 15 {
        Some(n as u8)
    } else {
        None
    }
}

/// Classify one trimmed operand piece into its closed-variant shape. Never
/// fails: a piece that matches none of the recognised token shapes becomes
/// `Operand::Raw` holding the original text.
pub fn classify(piece: &str) -> Operand {
    let trimmed = piece.trim();
    let tokens = lex(trimmed);

    match tokens.as_slice() {
        [Token::Ident(s), Token::Eof] => {
            if let Some(n) = as_register(trimmed) {
                Operand::Reg(n)
            } else {
                Operand::Sym(s.clone())
            }
        }
        [Token::Number(n), Token::Eof] => Operand::Imm(*n),
        [Token::String(s), Token::Eof] => Operand::Str(s.clone()),
        [Token::Ident(d), Token::LParen, Token::Ident(b), Token::RParen, Token::Eof] => Operand::Addr {
            disp: AddrDisp::Sym(d.clone()),
            base: b.clone(),
            index: None,
        },
        [Token::Number(d), Token::LParen, Token::Ident(b), Token::RParen, Token::Eof] => Operand::Addr {
            disp: AddrDisp::Imm(*d),
            base: b.clone(),
            index: None,
        },
        [Token::Ident(d), Token::LParen, Token::Ident(x), Token::Comma, Token::Ident(b), Token::RParen, Token::Eof] => {
            Operand::Addr {
                disp: AddrDisp::Sym(d.clone()),
                base: b.clone(),
                index: Some(x.clone()),
            }
        }
        [Token::Number(d), Token::LParen, Token::Ident(x), Token::Comma, Token::Ident(b), Token::RParen, Token::Eof] => {
            Operand::Addr {
                disp: AddrDisp::Imm(*d),
                base: b.clone(),
                index: Some(x.clone()),
            }
        }
        [Token::Number(d), Token::LParen, Token::Comma, Token::Ident(b), Token::RParen, Token::Eof] => Operand::Addr {
            disp: AddrDisp::Imm(*d),
            base: b.clone(),
            index: None,
        },
        _ => Operand::Raw(trimmed.to_string()),
    }
}

#[cfg(test)]
mod operand_test {
    use super::*;

    #[test]
    fn splits_simple_list() {
        assert_eq!(split_operands("R3,G"), vec!["R3", "G"]);
    }

    #[test]
    fn split_respects_quoted_comma() {
        assert_eq!(split_operands("=C'A,B',X"), vec!["=C'A,B'", "X"]);
    }

    #[test]
    fn split_respects_address_comma() {
        assert_eq!(split_operands("4(R1,R2),SYM"), vec!["4(R1,R2)", "SYM"]);
    }

    #[test]
    fn classifies_register() {
        assert_eq!(classify("R3"), Operand::Reg(3));
        assert_eq!(classify("r0"), Operand::Reg(0));
    }

    #[test]
    fn classifies_register_rejects_out_of_range() {
        assert_eq!(classify("R16"), Operand::Sym("R16".to_string()));
    }

    #[test]
    fn classifies_symbol() {
        assert_eq!(classify("WORK"), Operand::Sym("WORK".to_string()));
    }

    #[test]
    fn classifies_immediate() {
        assert_eq!(classify("42"), Operand::Imm(42));
    }

    #[test]
    fn classifies_string() {
        assert_eq!(classify("C'AB'"), Operand::Str("AB".to_string()));
    }

    #[test]
    fn classifies_simple_address() {
        assert_eq!(
            classify("4(R2)"),
            Operand::Addr {
                disp: AddrDisp::Imm(4),
                base: "R2".to_string(),
                index: None
            }
        );
    }

    #[test]
    fn classifies_symbolic_displacement_address() {
        assert_eq!(
            classify("DISP(R2)"),
            Operand::Addr {
                disp: AddrDisp::Sym("DISP".to_string()),
                base: "R2".to_string(),
                index: None
            }
        );
    }

    #[test]
    fn classifies_indexed_address() {
        assert_eq!(
            classify("4(R1,R2)"),
            Operand::Addr {
                disp: AddrDisp::Imm(4),
                base: "R2".to_string(),
                index: Some("R1".to_string())
            }
        );
    }

    #[test]
    fn classifies_bare_indexed_address() {
        assert_eq!(
            classify("4(,R2)"),
            Operand::Addr {
                disp: AddrDisp::Imm(4),
                base: "R2".to_string(),
                index: None
            }
        );
    }

    #[test]
    fn unclassifiable_shape_is_raw() {
        assert_eq!(classify("4+5"), Operand::Raw("4+5".to_string()));
    }
}
