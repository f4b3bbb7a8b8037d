//! LSP server implementation for closing-tag completion
//!
//! The server keeps every open document in a [`DocumentStore`] with
//! incremental sync. Each content change is applied to the store and then
//! offered to the [`ChangeListener`]. A planned closing tag is sent to the
//! client with `workspace/applyEdit`; once the client reports the edit as
//! applied, the cursor is moved with `window/showDocument`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tagclose_core::provider::TextSource;
use tagclose_core::{
    ChangeListener, ConfigLoader, DocumentId, DocumentStore, ResultExt, TagCloseConfig,
    TagCloseError,
};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::convert::{LspAutoClose, document_id, to_core_change, to_lsp_auto_close};

/// Key under which editors may nest this server's settings
const SETTINGS_SECTION: &str = "tagclose";

#[derive(Debug, Default)]
struct Settings {
    config: TagCloseConfig,
    listener: ChangeListener,
}

impl Settings {
    fn new(config: TagCloseConfig) -> Self {
        Self {
            listener: ChangeListener::from_config(&config),
            config,
        }
    }
}

/// tagclose Language Server
pub struct TagCloseLanguageServer {
    client: Client,
    store: Arc<DocumentStore>,
    settings: RwLock<Settings>,
    config_path: Option<PathBuf>,
}

impl TagCloseLanguageServer {
    /// Create a new server that discovers its configuration on `initialize`
    pub fn new(client: Client) -> Self {
        Self::with_config_path(client, None)
    }

    /// Create a new server that loads its configuration from `config_path`
    pub fn with_config_path(client: Client, config_path: Option<PathBuf>) -> Self {
        Self {
            client,
            store: Arc::new(DocumentStore::new()),
            settings: RwLock::new(Settings::default()),
            config_path,
        }
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Snapshot of the active configuration
    pub fn config(&self) -> TagCloseConfig {
        self.settings
            .read()
            .map(|s| s.config.clone())
            .unwrap_or_default()
    }

    fn set_config(&self, config: TagCloseConfig) {
        match self.settings.write() {
            Ok(mut settings) => *settings = Settings::new(config),
            Err(err) => tracing::warn!("Settings lock poisoned: {}", err),
        }
    }

    /// Configuration from `initializationOptions`, else from a config file
    fn resolve_config(&self, options: Option<Value>, root: Option<&Path>) -> TagCloseConfig {
        if let Some(config) = options.and_then(config_from_value) {
            tracing::debug!("Using configuration from initialization options");
            return config;
        }

        ConfigLoader::load(self.config_path.as_deref(), root)
            .log_and_continue()
            .unwrap_or_default()
    }

    /// Apply editor changes to the store and collect closing tags to send
    ///
    /// Changes are applied in order. Only the last one is offered to the
    /// listener: the client applies the returned edit to the text after the
    /// whole batch, and a trigger followed by further changes in the same
    /// notification has already been typed past.
    pub fn handle_changes(
        &self,
        uri: &Url,
        version: i32,
        changes: &[TextDocumentContentChangeEvent],
    ) -> Vec<LspAutoClose> {
        let id = document_id(uri);
        let Ok(settings) = self.settings.read() else {
            tracing::warn!("Settings lock poisoned; dropping change");
            return Vec::new();
        };
        let enabled = settings.config.is_enabled_for(
            id.extension().as_deref(),
            self.store.language_id(&id).as_deref(),
        );

        let mut planned = Vec::new();
        let last = changes.len().saturating_sub(1);
        for (idx, event) in changes.iter().enumerate() {
            let change = to_core_change(event);
            // Only the final change carries the editor's version.
            let is_last = idx == last;
            let change_version = is_last.then_some(version);
            if self
                .store
                .apply_change(&id, &change, change_version)
                .log_and_continue()
                .is_none()
            {
                return planned;
            }

            if !enabled || !is_last {
                continue;
            }

            let Some(edit) = settings.listener.on_change(self.store.as_ref(), &id, &change) else {
                continue;
            };
            let converted = self
                .store
                .line_index(&id)
                .and_then(|index| to_lsp_auto_close(uri.clone(), &edit, &index))
                .log_and_continue();
            planned.extend(converted);
        }

        planned
    }
}

/// Send the edit, then move the cursor once the client has applied it
async fn send_auto_close(client: Client, auto_close: LspAutoClose) {
    let mut changes = HashMap::new();
    changes.insert(auto_close.uri.clone(), vec![auto_close.edit]);

    let response = client
        .apply_edit(WorkspaceEdit::new(changes))
        .await
        .map_err(|e| TagCloseError::lsp_error(format!("workspace/applyEdit failed: {e}")))
        .log_and_continue();
    let Some(response) = response else {
        return;
    };

    if !response.applied {
        tracing::debug!(
            reason = response.failure_reason.as_deref().unwrap_or("none given"),
            "Client declined closing tag"
        );
        return;
    }

    let params = ShowDocumentParams {
        uri: auto_close.uri,
        external: None,
        take_focus: Some(true),
        selection: Some(auto_close.selection),
    };
    let shown = client
        .show_document(params)
        .await
        .map_err(|e| TagCloseError::lsp_error(format!("window/showDocument failed: {e}")))
        .log_and_continue();
    if shown == Some(false) {
        tracing::debug!("Client did not move the cursor");
    }
}

/// Parse settings, accepting them either bare or nested under `tagclose`
fn config_from_value(value: Value) -> Option<TagCloseConfig> {
    let value = match value {
        Value::Object(mut map) if map.contains_key(SETTINGS_SECTION) => {
            map.remove(SETTINGS_SECTION).unwrap_or_default()
        }
        Value::Null => return None,
        other => other,
    };

    match serde_json::from_value(value) {
        Ok(config) => Some(config),
        Err(err) => {
            tracing::warn!("Ignoring invalid settings: {}", err);
            None
        }
    }
}

#[allow(deprecated)]
fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .and_then(|folder| folder.uri.to_file_path().ok())
        .or_else(|| params.root_uri.as_ref()?.to_file_path().ok())
}

#[tower_lsp::async_trait]
impl LanguageServer for TagCloseLanguageServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let root = workspace_root(&params);
        let config = self.resolve_config(params.initialization_options, root.as_deref());
        tracing::info!(
            enabled = config.enabled,
            excluded = config.excluded_tags.len(),
            "Loaded configuration"
        );
        self.set_config(config);

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "tagclose-lsp".to_string(),
                version: Some(crate::VERSION.to_string()),
            }),
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::INCREMENTAL),
                        ..Default::default()
                    },
                )),
                ..Default::default()
            },
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "tagclose LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.store.open(
            document_id(&doc.uri),
            &doc.text,
            doc.version,
            Some(doc.language_id),
        );
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let doc = params.text_document;
        let planned = self.handle_changes(&doc.uri, doc.version, &params.content_changes);

        for auto_close in planned {
            // The edit cannot be awaited inside this notification: the
            // client's answer arrives after it has sent us the change the
            // edit causes, which needs this handler to have returned.
            tokio::spawn(send_auto_close(self.client.clone(), auto_close));
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let id: DocumentId = document_id(&params.text_document.uri);
        if !self.store.close(&id) {
            tracing::debug!(document = %id, "Closed a document that was not open");
        }
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        if let Some(config) = config_from_value(params.settings) {
            tracing::info!("Configuration updated by client");
            self.set_config(config);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_from_nested_settings() {
        let config =
            config_from_value(json!({ "tagclose": { "excludedTags": ["br"] } })).expect("config");
        assert!(config.is_excluded("br"));
    }

    #[test]
    fn test_config_from_bare_settings() {
        let config = config_from_value(json!({ "enabled": false })).expect("config");
        assert!(!config.enabled);
    }

    #[test]
    fn test_invalid_settings_are_ignored() {
        assert!(config_from_value(json!({ "enabled": "yes" })).is_none());
        assert!(config_from_value(Value::Null).is_none());
    }
}
