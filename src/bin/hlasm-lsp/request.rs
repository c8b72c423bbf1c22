//! Request dispatch: hover, completion, definition and references each
//! read the controller's current analysis for the request's document and
//! answer synchronously. Anything else comes back as `MethodNotFound`,
//! matching an engine that deliberately implements a small, fixed surface
//! rather than every optional LSP capability.

use lsp_server::{ErrorCode, Request, RequestId, Response};
use lsp_types as lsp;
use lsp_types::request::Request as _;
use std::str::FromStr;

use hlasm_lsp::hlasm::controller::DocumentController;
use hlasm_lsp::hlasm::navigation::Definition;

fn ok(id: RequestId, value: impl serde::Serialize) -> Response {
    Response::new_ok(id, value)
}

fn method_not_found(id: RequestId, method: &str) -> Response {
    Response::new_err(id, ErrorCode::MethodNotFound as i32, format!("unhandled method {method}"))
}

/// A known method whose params could not be decoded. Reported as
/// `InvalidRequest` (not `InvalidParams`) with the decoder's own message.
fn invalid_params(id: RequestId, err: impl std::fmt::Display) -> Response {
    Response::new_err(id, ErrorCode::InvalidRequest as i32, err.to_string())
}

fn macro_file_location(path: &std::path::Path) -> Option<lsp::Location> {
    let uri = format!("file://{}", path.display());
    lsp::Uri::from_str(&uri).ok().map(|uri| lsp::Location {
        uri,
        range: lsp::Range::new(lsp::Position::new(0, 0), lsp::Position::new(0, 0)),
    })
}

pub fn handle(controller: &mut DocumentController, req: Request) -> Response {
    match req.method.as_str() {
        m if m == lsp::request::Shutdown::METHOD => {
            controller.shutdown();
            ok(req.id, serde_json::Value::Null)
        }
        m if m == lsp::request::HoverRequest::METHOD => {
            let params: lsp::HoverParams = match serde_json::from_value(req.params) {
                Ok(p) => p,
                Err(e) => return invalid_params(req.id, e),
            };
            let doc = params.text_document_position_params;
            let hover = controller.hover(&doc.text_document.uri, doc.position);
            ok(req.id, hover)
        }
        m if m == lsp::request::Completion::METHOD => {
            let params: lsp::CompletionParams = match serde_json::from_value(req.params) {
                Ok(p) => p,
                Err(e) => return invalid_params(req.id, e),
            };
            let doc = params.text_document_position;
            let items = controller.completion(&doc.text_document.uri, doc.position);
            ok(req.id, lsp::CompletionResponse::Array(items))
        }
        m if m == lsp::request::GotoDefinition::METHOD => {
            let params: lsp::GotoDefinitionParams = match serde_json::from_value(req.params) {
                Ok(p) => p,
                Err(e) => return invalid_params(req.id, e),
            };
            let doc = params.text_document_position_params;
            let definition = controller.definition(&doc.text_document.uri, doc.position);
            let location = match definition {
                Some(Definition::Document(loc)) => Some(loc),
                Some(Definition::MacroFile(path)) => macro_file_location(&path),
                None => None,
            };
            ok(req.id, location.map(lsp::GotoDefinitionResponse::Scalar))
        }
        m if m == lsp::request::References::METHOD => {
            let params: lsp::ReferenceParams = match serde_json::from_value(req.params) {
                Ok(p) => p,
                Err(e) => return invalid_params(req.id, e),
            };
            let doc = params.text_document_position;
            let include_declaration = params.context.include_declaration;
            let locations = controller.references(&doc.text_document.uri, doc.position, include_declaration);
            ok(req.id, locations)
        }
        other => method_not_found(req.id, other),
    }
}
