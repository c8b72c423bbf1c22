//! `hlasm-lsp`: the LSP server binary wrapping `hlasm::hlasm::controller::DocumentController`.
//!
//! The main loop is deliberately simple: one message in, one message (or
//! notification) out, in the order `lsp_server` hands them to us. There is
//! no background analysis thread and no message queue, every request is
//! answered from the controller's current state before the next message is
//! read, which is what keeps re-analysis and query results always
//! consistent with each other.

mod notification;
mod request;

use lsp_server::{Connection, Message};
use lsp_types as lsp;

use hlasm_lsp::hlasm::cli::{parse_args, setup_env_logger};
use hlasm_lsp::hlasm::controller::DocumentController;
use hlasm_lsp::STDRESULT;

/// Resolve the catalogue data directory: an explicit `--data-dir` override
/// wins; otherwise `<rootUri-path>/data`; otherwise the relative path
/// `"data"`.
fn resolve_data_dir(explicit: Option<std::path::PathBuf>, root_uri: Option<&lsp::Uri>) -> std::path::PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    if let Some(root) = root_uri {
        let text = root.to_string();
        let path = text.strip_prefix("file://").unwrap_or(&text);
        if !path.is_empty() {
            return std::path::PathBuf::from(path).join("data");
        }
    }
    std::path::PathBuf::from("data")
}

fn server_capabilities() -> lsp::ServerCapabilities {
    lsp::ServerCapabilities {
        text_document_sync: Some(lsp::TextDocumentSyncCapability::Kind(lsp::TextDocumentSyncKind::FULL)),
        hover_provider: Some(lsp::HoverProviderCapability::Simple(true)),
        completion_provider: Some(lsp::CompletionOptions {
            trigger_characters: Some(vec![" ".to_string()]),
            ..Default::default()
        }),
        definition_provider: Some(lsp::OneOf::Left(true)),
        references_provider: Some(lsp::OneOf::Left(true)),
        ..Default::default()
    }
}

fn main() -> STDRESULT {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = parse_args(&args);
    setup_env_logger(&opts);

    log::info!("hlasm-lsp starting");

    let (connection, io_threads) = Connection::stdio();

    let (id, params) = connection.initialize_start()?;
    let initialize_params: lsp::InitializeParams = serde_json::from_value(params)?;
    let result = lsp::InitializeResult {
        capabilities: server_capabilities(),
        server_info: Some(lsp::ServerInfo { name: "hlasm-lsp".to_string(), version: Some("0.3.0".to_string()) }),
    };
    connection.initialize_finish(id, serde_json::to_value(result)?)?;

    let data_dir = resolve_data_dir(opts.data_dir.clone(), initialize_params.root_uri.as_ref());
    log::debug!("resolved catalogue data directory: {}", data_dir.display());

    let mut controller = DocumentController::new();
    controller.initialize(data_dir, opts.macro_dirs.clone());

    main_loop(&connection, &mut controller)?;

    io_threads.join()?;
    log::info!("hlasm-lsp shutting down");
    Ok(())
}

/// Drive the message loop until the client closes stdin or sends `exit`.
///
/// `shutdown` only sets a flag and replies null; the actual termination
/// (and its exit code) is decided on `exit`: code 0 if
/// `shutdown` was received first, code 1 otherwise. If the input stream
/// closes without an `exit` notification ever arriving, the loop falls out
/// naturally and the same rule is applied once more before returning.
fn main_loop(connection: &Connection, controller: &mut DocumentController) -> STDRESULT {
    for msg in &connection.receiver {
        match msg {
            Message::Request(req) => {
                let response = request::handle(controller, req);
                connection.sender.send(Message::Response(response))?;
            }
            Message::Notification(not) => {
                if notification::is_exit(&not) {
                    exit_process(controller.shutdown_received);
                }
                notification::handle(connection, controller, not)?;
            }
            Message::Response(_) => {
                // We never send requests to the client, so nothing to correlate here.
            }
        }
    }
    log::info!("stdin closed without an exit notification");
    exit_process(controller.shutdown_received);
}

/// Terminate the process with the exit code the base LSP protocol mandates
/// for a well-behaved `exit`: 0 if `shutdown` was received first, 1 otherwise.
fn exit_process(shutdown_received: bool) -> ! {
    std::process::exit(if shutdown_received { 0 } else { 1 });
}
