//! Go-to-definition and find-references.
//!
//! Definition resolution tries, in order, a document label, a declared
//! `EQUREG` register, then a macro source file located by searching the
//! configured macro directories. References scan every statement's
//! operands for a match, recursing into `Addr`'s displacement/base/index
//! sub-fields so an address-form reference to a register or symbol is not
//! missed just because it is nested inside the operand.

use std::path::PathBuf;

use lsp_types as lsp;

use crate::hlasm::catalogue::Catalogue;
use crate::hlasm::operand::{AddrDisp, Operand};
use crate::hlasm::state::AnalysisState;
use crate::lang::{locate_name, line_range};

/// Where a definition was found: inside the current document, or on disk
/// (a macro source file pulled from one of the configured macro
/// directories).
#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    Document(lsp::Location),
    MacroFile(PathBuf),
}

/// Search `macro_dirs` in order for `<name>.mac`, returning the first one
/// found.
fn find_macro_file(macro_dirs: &[PathBuf], name: &str) -> Option<PathBuf> {
    let filename = format!("{name}.mac");
    macro_dirs.iter().map(|dir| dir.join(&filename)).find(|path| path.is_file())
}

/// Resolve `word` to a definition, trying document labels first, then
/// declared registers, then, only if the catalogue actually knows the
/// word, a macro source file on disk.
pub fn definition(
    state: &AnalysisState,
    catalogue: &Catalogue,
    uri: &lsp::Uri,
    macro_dirs: &[PathBuf],
    word: &str,
) -> Option<Definition> {
    let upper = word.to_uppercase();

    if let Some(label) = state.labels.get(&upper) {
        return Some(Definition::Document(lsp::Location {
            uri: uri.clone(),
            range: line_range(label.line, 0, label.name.len()),
        }));
    }

    if let Some(reg) = state.regs.get(&upper) {
        return Some(Definition::Document(lsp::Location {
            uri: uri.clone(),
            range: line_range(reg.line, 0, reg.name.len()),
        }));
    }

    if catalogue.find_macro(&upper).is_none() {
        return None;
    }
    find_macro_file(macro_dirs, &upper).map(Definition::MacroFile)
}

fn operand_mentions(op: &Operand, name: &str) -> bool {
    match op {
        Operand::Sym(s) => s.eq_ignore_ascii_case(name),
        Operand::Addr { disp, base, index } => {
            base.eq_ignore_ascii_case(name)
                || index.as_deref().is_some_and(|i| i.eq_ignore_ascii_case(name))
                || matches!(disp, AddrDisp::Sym(s) if s.eq_ignore_ascii_case(name))
        }
        _ => false,
    }
}

/// Collect every location in the document where `name` is mentioned: a
/// label declaration (only when `include_declaration` is set) and every
/// operand occurrence (including nested inside an `Addr`), in document
/// order.
pub fn references(state: &AnalysisState, uri: &lsp::Uri, name: &str, include_declaration: bool) -> Vec<lsp::Location> {
    let mut locations = Vec::new();
    for stmt in &state.stmts {
        if include_declaration && stmt.label.as_deref().is_some_and(|l| l.eq_ignore_ascii_case(name)) {
            locations.push(lsp::Location { uri: uri.clone(), range: line_range(stmt.line, 0, name.len()) });
        }
        if stmt.operands.iter().any(|op| operand_mentions(op, name)) {
            let range = locate_name(&stmt.raw, stmt.line, name);
            locations.push(lsp::Location { uri: uri.clone(), range });
        }
    }
    locations
}
