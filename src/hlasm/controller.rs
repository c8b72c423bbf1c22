//! Document lifecycle controller.
//!
//! The one stateful piece of the engine: it owns the open-document
//! registry, the analysis produced for each, the macro catalogue, and the
//! macro search directories, and exposes the operations the LSP binary
//! dispatches requests and notifications to. Every method runs to
//! completion before the next is invoked, there is no background work and
//! no interior mutability beyond this struct's own fields, matching the
//! single-threaded, message-ordered server loop the binary drives.

use std::collections::HashMap;
use std::path::PathBuf;

use lsp_types as lsp;

use crate::hlasm::catalogue::Catalogue;
use crate::hlasm::completions;
use crate::hlasm::hovers;
use crate::hlasm::navigation::{self, Definition};
use crate::hlasm::state::{analyse, AnalysisState};
use crate::lang::{normalize_client_uri, word_at, Document};

#[derive(Default)]
pub struct DocumentController {
    documents: HashMap<lsp::Uri, Document>,
    analyses: HashMap<lsp::Uri, AnalysisState>,
    catalogue: Catalogue,
    macro_dirs: Vec<PathBuf>,
    pub shutdown_received: bool,
}

impl DocumentController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the macro catalogue from `data_dir` and record the macro search
    /// directories. Called once, from the `initialize` request handler.
    /// `data_dir` has already been resolved (explicit override, else
    /// `<rootUri-path>/data`, else `"data"`) by the caller.
    pub fn initialize(&mut self, data_dir: PathBuf, macro_dirs: Vec<PathBuf>) {
        self.catalogue = Catalogue::load(&data_dir);
        self.macro_dirs = macro_dirs;
        log::debug!("controller initialized with {} macro director{}", self.macro_dirs.len(), if self.macro_dirs.len() == 1 { "y" } else { "ies" });
    }

    fn store(&mut self, uri: lsp::Uri, text: String, version: Option<i32>) {
        let analysis = analyse(&text);
        self.documents.insert(
            uri.clone(),
            Document {
                uri: uri.clone(),
                text,
                version,
            },
        );
        self.analyses.insert(uri, analysis);
    }

    /// Record a newly opened document and analyse it immediately.
    pub fn did_open(&mut self, uri: lsp::Uri, text: String, version: i32) {
        let uri = normalize_client_uri(uri);
        log::debug!("didOpen {uri:?} v{version}");
        self.store(uri, text, Some(version));
    }

    /// Replace a document's text with the first content-change entry and
    /// reanalyse it. Full-document sync only; a client sending incremental
    /// ranges is expected to have negotiated `TextDocumentSyncKind::FULL`
    /// during `initialize`, so only `changes[0].text` is consulted.
    pub fn did_change(&mut self, uri: lsp::Uri, text: String, version: i32) {
        let uri = normalize_client_uri(uri);
        log::debug!("didChange {uri:?} v{version}");
        self.store(uri, text, Some(version));
    }

    pub fn did_close(&mut self, uri: lsp::Uri) {
        let uri = normalize_client_uri(uri);
        log::debug!("didClose {uri:?}");
        self.documents.remove(&uri);
        self.analyses.remove(&uri);
    }

    /// Diagnostics currently held for `uri`, or an empty list if it is not
    /// open (or has no diagnostics).
    pub fn diagnostics(&self, uri: &lsp::Uri) -> Vec<lsp::Diagnostic> {
        self.analyses.get(uri).map(|a| a.diags.clone()).unwrap_or_default()
    }

    fn word_at_position(&self, uri: &lsp::Uri, pos: lsp::Position) -> Option<String> {
        let doc = self.documents.get(uri)?;
        let line = doc.text.split('\n').nth(pos.line as usize)?;
        word_at(line, pos.character as usize).map(|(w, _)| w)
    }

    pub fn hover(&self, uri: &lsp::Uri, pos: lsp::Position) -> Option<lsp::Hover> {
        let word = self.word_at_position(uri, pos)?;
        let analysis = self.analyses.get(uri)?;
        hovers::hover(analysis, &self.catalogue, &word)
    }

    pub fn completion(&self, uri: &lsp::Uri, pos: lsp::Position) -> Vec<lsp::CompletionItem> {
        let Some(analysis) = self.analyses.get(uri) else {
            return Vec::new();
        };
        let prefix = self.word_at_position(uri, pos).unwrap_or_default();
        completions::complete(analysis, &self.catalogue, &prefix)
    }

    pub fn definition(&self, uri: &lsp::Uri, pos: lsp::Position) -> Option<Definition> {
        let word = self.word_at_position(uri, pos)?;
        let analysis = self.analyses.get(uri)?;
        navigation::definition(analysis, &self.catalogue, uri, &self.macro_dirs, &word)
    }

    pub fn references(&self, uri: &lsp::Uri, pos: lsp::Position, include_declaration: bool) -> Vec<lsp::Location> {
        let Some(word) = self.word_at_position(uri, pos) else {
            return Vec::new();
        };
        let Some(analysis) = self.analyses.get(uri) else {
            return Vec::new();
        };
        navigation::references(analysis, uri, &word, include_declaration)
    }

    pub fn shutdown(&mut self) {
        log::debug!("shutdown requested");
        self.shutdown_received = true;
    }
}
