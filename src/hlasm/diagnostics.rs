//! Register-type diagnostics.
//!
//! Two checks run over the statement stream once symbols have been
//! collected: an opcode/register-type mismatch check (a float instruction
//! fed a non-float register, or an address instruction fed a float
//! register) and an odd-float-register warning (float instructions
//! conventionally address even-numbered registers).

use lsp_types as lsp;

use crate::hlasm::operand::Operand;
use crate::hlasm::statement::Statement;
use crate::hlasm::symbols::{RegisterDescriptor, RegisterType};
use crate::lang::server::basic_diag;
use crate::lang::locate_name;

/// Opcodes expecting a float register operand.
const FLOAT_OPS: &[&str] = &[
    "LE", "LER", "LD", "LDR", "STE", "STD", "AE", "AER", "AD", "ADR", "SE", "SER", "SD", "SDR", "ME", "MER", "MD",
    "MDR", "DE", "DER", "DD", "DDR", "CE", "CER", "CD", "CDR", "AW", "AWR", "SW", "SWR", "HDR", "HER", "LCER",
    "LCDR", "LNER", "LNDR", "LPER", "LPDR", "LTER", "LTDR", "SQER", "SQDR",
];

/// Opcodes expecting a general/address register operand.
const ADDRESS_OPS: &[&str] = &["LA", "LAE", "LAM", "LAY", "LARL", "BAL", "BALR", "BAS", "BASR"];

/// Run every register-type check over `stmts`, given the register table
/// `regs` gathered by `scan_equregs`. Diagnostics are emitted in statement
/// order; within a statement, operands are checked left to right.
pub fn run(regs: &std::collections::HashMap<String, RegisterDescriptor>, stmts: &[Statement]) -> Vec<lsp::Diagnostic> {
    let mut diags = Vec::new();

    for stmt in stmts {
        let Some(op) = &stmt.op else { continue };
        if op.is_empty() || op == "*" {
            continue;
        }
        let is_float_op = FLOAT_OPS.contains(&op.as_str());
        let is_address_op = ADDRESS_OPS.contains(&op.as_str());
        if !is_float_op && !is_address_op {
            continue;
        }

        for operand in &stmt.operands {
            let Operand::Sym(name) = operand else { continue };
            let Some(descriptor) = regs.get(name.as_str()) else { continue };

            if is_float_op && descriptor.rtype != RegisterType::Float {
                diags.push(basic_diag(
                    locate_name(&stmt.raw, stmt.line, name),
                    &format!("{name} is a {} register but {op} requires a float register", descriptor.rtype.name()),
                    lsp::DiagnosticSeverity::WARNING,
                ));
            } else if is_address_op && descriptor.rtype == RegisterType::Float {
                diags.push(basic_diag(
                    locate_name(&stmt.raw, stmt.line, name),
                    &format!("{name} is a float register but {op} expects general/address"),
                    lsp::DiagnosticSeverity::WARNING,
                ));
            }

            if is_float_op && descriptor.rtype == RegisterType::Float && descriptor.reg % 2 != 0 {
                diags.push(basic_diag(
                    locate_name(&stmt.raw, stmt.line, name),
                    &format!("float register {name} (R{}) has odd number; even registers expected", descriptor.reg),
                    lsp::DiagnosticSeverity::WARNING,
                ));
            }
        }
    }

    diags
}

#[cfg(test)]
mod diagnostics_test {
    use super::*;
    use crate::hlasm::statement::parse_document;
    use crate::hlasm::symbols::scan_equregs;

    #[test]
    fn flags_float_op_on_general_register() {
        let stmts = parse_document("WORK     EQUREG R3,G\n         LE    WORK,=E'1.0'\n");
        let regs = scan_equregs(&stmts);
        let diags = run(&regs, &stmts);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "WORK is a general register but LE requires a float register");
        assert_eq!(diags[0].range.start.line, 1);
    }

    #[test]
    fn flags_address_op_on_float_register() {
        let stmts = parse_document("FPR      EQUREG R0,F\n         LA    FPR,0\n");
        let regs = scan_equregs(&stmts);
        let diags = run(&regs, &stmts);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "FPR is a float register but LA expects general/address");
        assert_eq!(diags[0].range.start.line, 1);
    }

    #[test]
    fn flags_odd_float_register() {
        let stmts = parse_document("FPR      EQUREG R3,F\n         LE    FPR,=E'1.0'\n");
        let regs = scan_equregs(&stmts);
        let diags = run(&regs, &stmts);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].message, "float register FPR (R3) has odd number; even registers expected");
    }

    #[test]
    fn matching_even_float_register_is_silent() {
        let stmts = parse_document("FPR      EQUREG R0,F\n         LE    FPR,=E'1.0'\n");
        let regs = scan_equregs(&stmts);
        assert!(run(&regs, &stmts).is_empty());
    }

    #[test]
    fn unknown_opcode_is_not_checked() {
        let stmts = parse_document("WORK     EQUREG R3,G\n         XYZZY WORK\n");
        let regs = scan_equregs(&stmts);
        assert!(run(&regs, &stmts).is_empty());
    }

    #[test]
    fn each_operand_checked_independently() {
        let stmts = parse_document("A        EQUREG R3,G\nB        EQUREG R5,G\n         LE    A,B\n");
        let regs = scan_equregs(&stmts);
        let diags = run(&regs, &stmts);
        assert_eq!(diags.len(), 2);
    }

    #[test]
    fn fallback_column_used_when_name_not_found_on_line() {
        // Register name only appears via the symbol table, not literally
        // on this particular raw line (synthetic statement built by hand).
        use crate::hlasm::statement::Statement;
        let stmt = Statement {
            line: 5,
            label: None,
            op: Some("LE".to_string()),
            operands: vec![Operand::Sym("GONE".to_string())],
            comment: None,
            raw: "         LE".to_string(),
        };
        let mut regs = std::collections::HashMap::new();
        regs.insert(
            "GONE".to_string(),
            RegisterDescriptor { name: "GONE".to_string(), reg: 3, rtype: RegisterType::General, line: 0 },
        );
        let diags = run(&regs, &[stmt]);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].range.start.character, crate::lang::FALLBACK_COL as u32);
        assert_eq!(diags[0].range.end.character, (crate::lang::FALLBACK_COL + 4) as u32);
    }
}
