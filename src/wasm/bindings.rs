//! JavaScript bindings for MindMesh core types
//!
//! Everything crosses the boundary as JSON strings: actions and records in,
//! document state and drained records out. The session publishes into an
//! internal outbox that JavaScript drains with `takeRecords` after each
//! call, since wasm-bindgen exports cannot hold a JS callback across
//! reentrant calls.

use crate::document::DocumentState;
use crate::history::EditAction;
use crate::session::EditorSession;
use crate::sync::{SyncPublisher, SyncRecord};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Publisher that parks records until JavaScript drains them
struct OutboxPublisher {
    records: Rc<RefCell<Vec<SyncRecord>>>,
}

impl SyncPublisher for OutboxPublisher {
    fn publish(&mut self, record: SyncRecord) {
        self.records.borrow_mut().push(record);
    }
}

/// JavaScript-friendly wrapper for EditorSession
#[wasm_bindgen]
pub struct WasmSession {
    inner: EditorSession,
    outbox: Rc<RefCell<Vec<SyncRecord>>>,
}

#[wasm_bindgen]
impl WasmSession {
    /// Create a session for the given document ID
    #[wasm_bindgen(constructor)]
    pub fn new(document_id: String) -> Self {
        crate::wasm::utils::init_panic_hook();
        let outbox = Rc::new(RefCell::new(Vec::new()));
        let mut inner = EditorSession::new(document_id);
        inner.set_publisher(Box::new(OutboxPublisher {
            records: Rc::clone(&outbox),
        }));
        Self { inner, outbox }
    }

    /// Apply a local edit (pass the action as a JSON string)
    #[wasm_bindgen(js_name = applyEdit)]
    pub fn apply_edit(&mut self, action_json: String) -> Result<(), JsValue> {
        let edit: EditAction = serde_json::from_str(&action_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid JSON: {}", e)))?;
        self.inner.apply(edit);
        Ok(())
    }

    /// Jump to a history position; -1 is the pre-edit document
    ///
    /// Out-of-range, already-current, and below-watermark targets are
    /// ignored silently, matching the native API.
    #[wasm_bindgen(js_name = jumpToHistory)]
    pub fn jump_to_history(&mut self, target: i32) {
        self.inner.jump_to_history(target as i64);
    }

    /// Apply a record received from a collaborator (JSON string)
    #[wasm_bindgen(js_name = applyRemote)]
    pub fn apply_remote(&mut self, record_json: String) -> Result<(), JsValue> {
        let record: SyncRecord = serde_json::from_str(&record_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid JSON: {}", e)))?;
        self.inner
            .apply_remote(&record)
            .map_err(|e| JsValue::from_str(&format!("Record application failed: {}", e)))
    }

    /// Drain outbound records accumulated since the last call
    ///
    /// Returns a JSON array string, in publish order.
    #[wasm_bindgen(js_name = takeRecords)]
    pub fn take_records(&mut self) -> Result<String, JsValue> {
        let records: Vec<SyncRecord> = self.outbox.borrow_mut().drain(..).collect();
        serde_json::to_string(&records)
            .map_err(|e| JsValue::from_str(&format!("JSON serialization failed: {}", e)))
    }

    /// Export the live document state as a JSON string
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.inner.state())
            .map_err(|e| JsValue::from_str(&format!("JSON serialization failed: {}", e)))
    }

    /// Replace the document wholesale and reset history (JSON string)
    #[wasm_bindgen(js_name = loadState)]
    pub fn load_state(&mut self, state_json: String) -> Result<(), JsValue> {
        let state: DocumentState = serde_json::from_str(&state_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid JSON: {}", e)))?;
        self.inner.load(state);
        Ok(())
    }

    /// Mark the current history position as durably saved
    #[wasm_bindgen(js_name = markSaved)]
    pub fn mark_saved(&mut self) {
        self.inner.mark_saved();
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    #[wasm_bindgen(js_name = hasUnsavedChanges)]
    pub fn has_unsaved_changes(&self) -> bool {
        self.inner.has_unsaved_changes()
    }

    /// Current history position, -1 before any edit
    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> i32 {
        self.inner.history().current_index() as i32
    }

    /// Number of recorded history entries
    #[wasm_bindgen(js_name = historyLength)]
    pub fn history_length(&self) -> usize {
        self.inner.history().len()
    }

    /// Get document ID
    #[wasm_bindgen(js_name = getDocumentId)]
    pub fn get_document_id(&self) -> String {
        self.inner.document_id().to_string()
    }
}
