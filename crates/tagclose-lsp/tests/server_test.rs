//! Server behaviour without a connected client

use std::fs;

use serde_json::json;
use tagclose_lsp::TagCloseLanguageServer;
use tempfile::TempDir;
use tower_lsp::{LanguageServer, LspService};
use tower_lsp::lsp_types::*;

fn uri(path: &str) -> Url {
    Url::parse(&format!("file:///workspace/{path}")).expect("uri")
}

fn typed(line: u32, character: u32, text: &str) -> TextDocumentContentChangeEvent {
    let at = Position::new(line, character);
    TextDocumentContentChangeEvent {
        range: Some(Range::new(at, at)),
        range_length: None,
        text: text.to_string(),
    }
}

async fn open(server: &TagCloseLanguageServer, uri: &Url, language_id: &str, text: &str) {
    server
        .did_open(DidOpenTextDocumentParams {
            text_document: TextDocumentItem::new(
                uri.clone(),
                language_id.to_string(),
                1,
                text.to_string(),
            ),
        })
        .await;
}

#[tokio::test]
async fn test_initialize_advertises_incremental_sync() {
    let (service, _socket) = LspService::new(TagCloseLanguageServer::new);
    let result = service
        .inner()
        .initialize(InitializeParams::default())
        .await
        .expect("initialize");

    let Some(TextDocumentSyncCapability::Options(sync)) = result.capabilities.text_document_sync
    else {
        panic!("expected sync options");
    };
    assert_eq!(sync.change, Some(TextDocumentSyncKind::INCREMENTAL));
    assert_eq!(sync.open_close, Some(true));
}

#[tokio::test]
async fn test_initialization_options_override_files() {
    let (service, _socket) = LspService::new(TagCloseLanguageServer::new);
    let params = InitializeParams {
        initialization_options: Some(json!({ "excludedTags": ["li"] })),
        ..Default::default()
    };
    service.inner().initialize(params).await.expect("initialize");

    assert!(service.inner().config().is_excluded("li"));
}

#[tokio::test]
async fn test_config_discovered_from_workspace_folder() {
    let temp_dir = TempDir::new().expect("temp dir");
    fs::write(
        temp_dir.path().join(".tagcloserc.toml"),
        "extensions = [\"xml\"]\n",
    )
    .expect("write config");

    let (service, _socket) = LspService::new(TagCloseLanguageServer::new);
    let params = InitializeParams {
        workspace_folders: Some(vec![WorkspaceFolder {
            uri: Url::from_directory_path(temp_dir.path()).expect("dir uri"),
            name: "workspace".to_string(),
        }]),
        ..Default::default()
    };
    service.inner().initialize(params).await.expect("initialize");

    assert_eq!(service.inner().config().extensions, vec!["xml".to_string()]);
}

#[tokio::test]
async fn test_typing_close_tag_plans_edit() {
    let (service, _socket) = LspService::new(TagCloseLanguageServer::new);
    let server = service.inner();
    let uri = uri("index.html");
    open(server, &uri, "html", "<div>\n  <p>text\n").await;

    let first = server.handle_changes(&uri, 2, &[typed(2, 0, "<")]);
    assert!(first.is_empty());

    let planned = server.handle_changes(&uri, 3, &[typed(2, 1, "/")]);
    assert_eq!(planned.len(), 1);
    let auto_close = &planned[0];
    assert_eq!(auto_close.uri, uri);
    assert_eq!(auto_close.edit.new_text, "p>");
    assert_eq!(
        auto_close.edit.range,
        Range::new(Position::new(2, 2), Position::new(2, 2))
    );
    assert_eq!(auto_close.selection.start, Position::new(2, 4));

    // The edit is left to the client; the store only sees what it reports.
    let id = tagclose_lsp::convert::document_id(&uri);
    assert_eq!(
        &*server.store().text(&id).expect("text"),
        "<div>\n  <p>text\n</"
    );
    assert_eq!(server.store().version(&id).expect("version"), 3);
}

#[tokio::test]
async fn test_disabled_language_is_ignored() {
    let (service, _socket) = LspService::new(TagCloseLanguageServer::new);
    let server = service.inner();
    let uri = uri("notes.txt");
    open(server, &uri, "plaintext", "<div><").await;

    assert!(server.handle_changes(&uri, 2, &[typed(0, 6, "/")]).is_empty());
}

#[tokio::test]
async fn test_batched_changes_are_applied_in_order() {
    let (service, _socket) = LspService::new(TagCloseLanguageServer::new);
    let server = service.inner();
    let uri = uri("App.tsx");
    open(server, &uri, "typescriptreact", "<Foo.Bar>").await;

    let planned = server.handle_changes(&uri, 3, &[typed(0, 9, "<"), typed(0, 10, "/")]);
    assert_eq!(planned.len(), 1);
    assert_eq!(planned[0].edit.new_text, "Foo.Bar>");
}

#[tokio::test]
async fn test_trigger_followed_by_more_changes_is_not_planned() {
    let (service, _socket) = LspService::new(TagCloseLanguageServer::new);
    let server = service.inner();
    let uri = uri("index.html");
    open(server, &uri, "html", "<div><").await;

    let planned = server.handle_changes(&uri, 2, &[typed(0, 6, "/"), typed(0, 0, "\n")]);
    assert!(planned.is_empty());

    let id = tagclose_lsp::convert::document_id(&uri);
    assert_eq!(&*server.store().text(&id).expect("text"), "\n<div></");
}

#[tokio::test]
async fn test_close_forgets_document() {
    let (service, _socket) = LspService::new(TagCloseLanguageServer::new);
    let server = service.inner();
    let uri = uri("index.html");
    open(server, &uri, "html", "<div>").await;

    server
        .did_close(DidCloseTextDocumentParams {
            text_document: TextDocumentIdentifier::new(uri.clone()),
        })
        .await;

    assert!(server.store().is_empty());
    assert!(server.handle_changes(&uri, 2, &[typed(0, 5, "/")]).is_empty());
}
