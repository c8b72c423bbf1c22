//! Completion provider.
//!
//! Candidates are drawn from four pools: the fixed instruction set, the
//! catalogue's macros, the sixteen registers `R0`-`R15`, and the current
//! document's declared registers/labels, filtered by a case
//! insensitive prefix match against the in-progress word. Pools are
//! concatenated in that order; candidates are not deduplicated or ranked
//! against each other beyond the prefix filter.

use lsp_types as lsp;

use crate::hlasm::catalogue::Catalogue;
use crate::hlasm::state::AnalysisState;

/// The fixed HLASM instruction mnemonics this engine knows about,
/// independent of any catalogue: the float/address opcode classes the
/// diagnostic engine recognises, plus the common declarative directives.
const INSTRUCTIONS: &[&str] = &[
    "LE", "LER", "LD", "LDR", "STE", "STD", "AE", "AER", "AD", "ADR", "SE", "SER", "SD", "SDR", "ME", "MER", "MD",
    "MDR", "DE", "DER", "DD", "DDR", "CE", "CER", "CD", "CDR", "AW", "AWR", "SW", "SWR", "HDR", "HER", "LCER",
    "LCDR", "LNER", "LNDR", "LPER", "LPDR", "LTER", "LTDR", "SQER", "SQDR", "LA", "LAE", "LAM", "LAY", "LARL", "BAL",
    "BALR", "BAS", "BASR", "EQUREG", "DC", "DS", "EQU", "USING", "DROP", "CSECT", "DSECT", "END",
];

fn item(label: &str, kind: lsp::CompletionItemKind, detail: String) -> lsp::CompletionItem {
    lsp::CompletionItem { label: label.to_string(), kind: Some(kind), detail: Some(detail), ..Default::default() }
}

/// Build the completion list for `prefix` (the partial word already typed,
/// possibly empty), given the current document's analysis and the loaded
/// catalogue.
pub fn complete(state: &AnalysisState, catalogue: &Catalogue, prefix: &str) -> Vec<lsp::CompletionItem> {
    let prefix_upper = prefix.to_uppercase();
    let matches = |candidate: &str| candidate.to_uppercase().starts_with(&prefix_upper);

    let mut items = Vec::new();

    for op in INSTRUCTIONS {
        if matches(op) {
            items.push(item(op, lsp::CompletionItemKind::KEYWORD, "HLASM instruction".to_string()));
        }
    }

    for name in catalogue.macro_names() {
        if matches(name) {
            let detail = catalogue.find_macro(name).map(|m| m.description.clone()).filter(|d| !d.is_empty());
            items.push(item(name, lsp::CompletionItemKind::FUNCTION, detail.unwrap_or_else(|| "Macro".to_string())));
        }
    }

    for n in 0..=15 {
        let label = format!("R{n}");
        if matches(&label) {
            items.push(item(&label, lsp::CompletionItemKind::VARIABLE, format!("Register {n}")));
        }
    }

    for descriptor in state.regs.values() {
        if matches(&descriptor.name) {
            items.push(item(
                &descriptor.name,
                lsp::CompletionItemKind::VARIABLE,
                format!("R{} ({})", descriptor.reg, descriptor.rtype.name()),
            ));
        }
    }

    for label in state.labels.values() {
        if matches(&label.name) {
            items.push(item(&label.name, lsp::CompletionItemKind::VALUE, format!("Label (line {})", label.line + 1)));
        }
    }

    items
}
