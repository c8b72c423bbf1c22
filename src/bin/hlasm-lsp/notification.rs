//! Notification dispatch: `didOpen`/`didChange`/`didClose` update the
//! controller's document registry and trigger re-analysis; every one of
//! them is followed by a fresh `publishDiagnostics` push so the client's
//! view never lags the controller's.

use lsp_server::{Connection, Message, Notification};
use lsp_types as lsp;
use lsp_types::notification::Notification as _;

use hlasm_lsp::hlasm::controller::DocumentController;
use hlasm_lsp::STDRESULT;

fn push_diagnostics(connection: &Connection, controller: &DocumentController, uri: &lsp::Uri) -> STDRESULT {
    let diagnostics = controller.diagnostics(uri);
    let params = lsp::PublishDiagnosticsParams {
        uri: uri.clone(),
        diagnostics,
        version: None,
    };
    let not = Notification::new(lsp::notification::PublishDiagnostics::METHOD.to_string(), params);
    connection.sender.send(Message::Notification(not))?;
    Ok(())
}

/// Whether `not` is the base-protocol `exit` notification.
pub fn is_exit(not: &Notification) -> bool {
    not.method == lsp::notification::Exit::METHOD
}

/// Dispatch one notification. A malformed payload for a known method is
/// logged and swallowed rather than propagated, so one bad message cannot
/// bring the whole server down.
pub fn handle(connection: &Connection, controller: &mut DocumentController, not: Notification) -> STDRESULT {
    match not.method.as_str() {
        m if m == lsp::notification::DidOpenTextDocument::METHOD => {
            let params: lsp::DidOpenTextDocumentParams = match serde_json::from_value(not.params) {
                Ok(p) => p,
                Err(e) => return log_and_continue("didOpen", e),
            };
            let doc = params.text_document;
            controller.did_open(doc.uri.clone(), doc.text, doc.version);
            push_diagnostics(connection, controller, &doc.uri)?;
        }
        m if m == lsp::notification::DidChangeTextDocument::METHOD => {
            let params: lsp::DidChangeTextDocumentParams = match serde_json::from_value(not.params) {
                Ok(p) => p,
                Err(e) => return log_and_continue("didChange", e),
            };
            let uri = params.text_document.uri;
            let version = params.text_document.version;
            if let Some(change) = params.content_changes.into_iter().next() {
                controller.did_change(uri.clone(), change.text, version);
                push_diagnostics(connection, controller, &uri)?;
            }
        }
        m if m == lsp::notification::DidCloseTextDocument::METHOD => {
            let params: lsp::DidCloseTextDocumentParams = match serde_json::from_value(not.params) {
                Ok(p) => p,
                Err(e) => return log_and_continue("didClose", e),
            };
            let uri = params.text_document.uri;
            controller.did_close(uri.clone());
            push_diagnostics(connection, controller, &uri)?;
        }
        other => {
            log::trace!("ignoring notification {other}");
        }
    }
    Ok(())
}

fn log_and_continue(method: &str, err: impl std::fmt::Display) -> STDRESULT {
    log::warn!("[hlasm-lsp] could not decode {method} notification: {err}");
    Ok(())
}
