//! # `hlasm-lsp` core library
//!
//! This library implements the analysis pipeline behind the HLASM language
//! server: a fixed-column line parser, a semantic pass that recognises
//! register declarations (`EQUREG`) and labels, a register-type diagnostic
//! engine, a macro/field knowledge base, and the hover/completion/navigation
//! providers that answer editor queries. The document-lifecycle controller
//! wires these pieces to the LSP request/notification surface.
//!
//! ## Architecture
//!
//! Analysis is synchronous and pure: [`hlasm::state::AnalysisState`] is
//! produced from document text by a chain of total functions with no I/O.
//! The only stateful, mutable piece is [`hlasm::controller::DocumentController`],
//! which owns the per-URI document/analysis registries, the catalogue, and
//! the macro-directory search list. Transport framing (`Content-Length`
//! headers) and JSON-RPC/LSP payload encoding are handled by the `lsp-server`
//! and `lsp-types` crates; this library never touches raw bytes on the wire.

pub mod hlasm;
pub mod lang;

/// Shorthand for a fallible operation that produces no value on success.
pub type STDRESULT = Result<(), Box<dyn std::error::Error>>;
