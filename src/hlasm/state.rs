//! Analysis state.
//!
//! `analyse` is the single entry point tying the lexer, parser, symbol
//! scanner and diagnostic engine together: it is a pure, total function
//! from a statement stream to the full analysis
//! result, with no I/O and no partial failure. Re-running it on the same
//! input always produces the same output, which is what lets the
//! controller simply replace a document's prior analysis on every edit
//! instead of patching it incrementally.

use std::collections::HashMap;

use lsp_types as lsp;

use crate::hlasm::diagnostics;
use crate::hlasm::statement::{parse_document, Statement};
use crate::hlasm::symbols::{scan_equregs, scan_labels, LabelDescriptor, RegisterDescriptor};

#[derive(Clone, Debug, Default)]
pub struct AnalysisState {
    pub stmts: Vec<Statement>,
    pub regs: HashMap<String, RegisterDescriptor>,
    pub labels: HashMap<String, LabelDescriptor>,
    pub diags: Vec<lsp::Diagnostic>,
}

/// Run the full analysis pipeline over `text`: parse every line, collect
/// register declarations and labels, then run the register-type
/// diagnostics against the resulting symbol table.
pub fn analyse(text: &str) -> AnalysisState {
    let stmts = parse_document(text);
    let regs = scan_equregs(&stmts);
    let labels = scan_labels(&stmts);
    let diags = diagnostics::run(&regs, &stmts);
    AnalysisState { stmts, regs, labels, diags }
}
