//! Symbol table construction.
//!
//! A single forward pass over parsed statements builds two registries:
//! register declarations introduced by `EQUREG`, and ordinary labels
//! (anything with a label field, including `EQUREG` statements themselves).

use std::collections::HashMap;

use crate::hlasm::operand::Operand;
use crate::hlasm::statement::Statement;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterType {
    General,
    Address,
    Float,
    Control,
}

impl RegisterType {
    /// The type name as it appears in an `EQUREG` second operand
    /// (`G`/`A`/`F`/`C`), matched case-insensitively.
    fn from_operand_text(text: &str) -> Option<Self> {
        match text.to_uppercase().as_str() {
            "G" => Some(RegisterType::General),
            "A" => Some(RegisterType::Address),
            "F" => Some(RegisterType::Float),
            "C" => Some(RegisterType::Control),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RegisterType::General => "general",
            RegisterType::Address => "address",
            RegisterType::Float => "float",
            RegisterType::Control => "control",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegisterDescriptor {
    pub name: String,
    pub reg: u8,
    pub rtype: RegisterType,
    pub line: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelDescriptor {
    pub name: String,
    pub line: u32,
}

#[derive(Clone, Debug, Default)]
pub struct Symbols {
    pub regs: HashMap<String, RegisterDescriptor>,
    pub labels: HashMap<String, LabelDescriptor>,
}

/// Record every `EQUREG label  Rn[,type]` declaration. The register number
/// comes from the first operand (must classify as `Operand::Reg`); the
/// type comes from the second operand if present, defaulting to
/// `General` when absent or unrecognised, EQUREG still registers the
/// name, it just does not infer a narrower type than declared. Keyed by
/// the uppercased label, matching how every caller looks the name back up.
pub fn scan_equregs(stmts: &[Statement]) -> HashMap<String, RegisterDescriptor> {
    let mut regs = HashMap::new();
    for stmt in stmts {
        let Some(op) = &stmt.op else { continue };
        if op != "EQUREG" {
            continue;
        }
        let Some(label) = &stmt.label else { continue };
        let Some(n) = stmt.operands.first().and_then(resolve_register_operand) else {
            continue;
        };
        let rtype = stmt
            .operands
            .get(1)
            .and_then(|o| match o {
                Operand::Sym(s) | Operand::Raw(s) => RegisterType::from_operand_text(s),
                _ => None,
            })
            .unwrap_or(RegisterType::General);
        let upper = label.to_uppercase();
        regs.insert(
            upper.clone(),
            RegisterDescriptor {
                name: upper,
                reg: n,
                rtype,
                line: stmt.line,
            },
        );
    }
    regs
}

/// Resolve an `EQUREG` first operand to a register number. `classify`
/// already turns any `Rn` text into `Operand::Reg`, but a bare `Sym`
/// spelling of the same shape is honoured too.
fn resolve_register_operand(op: &Operand) -> Option<u8> {
    match op {
        Operand::Reg(n) => Some(*n),
        Operand::Sym(s) => {
            let rest = s.strip_prefix('R')?;
            if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let n: u32 = rest.parse().ok()?;
            (n <= 15).then_some(n as u8)
        }
        _ => None,
    }
}

/// Record every statement with a label field, keyed by the uppercased
/// label name. A later re-declaration of the same label on a subsequent
/// line overwrites the earlier one, keeping the table's behaviour
/// identical to assembling the file top to bottom.
pub fn scan_labels(stmts: &[Statement]) -> HashMap<String, LabelDescriptor> {
    let mut labels = HashMap::new();
    for stmt in stmts {
        let Some(label) = &stmt.label else { continue };
        let upper = label.to_uppercase();
        labels.insert(
            upper.clone(),
            LabelDescriptor {
                name: upper,
                line: stmt.line,
            },
        );
    }
    labels
}
