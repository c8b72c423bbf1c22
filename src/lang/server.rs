//! # Small generics shared by the LSP surface
//!
//! Kept separate from `hlasm::controller` so the controller can stay
//! language-specific while this module holds the handful of helpers that
//! would apply to any LSP-backed analyzer.

use lsp_types as lsp;

/// Build a minimal diagnostic: just range, severity and message, with every
/// other field left at its LSP default (no code, no related information).
pub fn basic_diag(range: lsp::Range, message: &str, severity: lsp::DiagnosticSeverity) -> lsp::Diagnostic {
    lsp::Diagnostic {
        range,
        severity: Some(severity),
        code: None,
        code_description: None,
        source: None,
        message: message.to_string(),
        related_information: None,
        tags: None,
        data: None,
    }
}
