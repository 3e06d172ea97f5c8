//! # Editor Facade
//!
//! Owns the reducer state for one editing session and wires the external
//! collaborators together: the source catalog, the change notification, the
//! undo stack, and the Output view serialization.
//!
//! All edits flow through [`Editor::dispatch`]; views only ever read the
//! tree. Dispatch runs synchronously to completion, so within one editor
//! instance there is never concurrent mutation.

use mosaic_document::{ElementSource, Node};

use crate::dnd::{map_drop, DragPayload, DropTarget};
use crate::mutations::{Mutation, MutationError};
use crate::reducer::{reduce, Action, EditMode, EditorState, Reduction};
use crate::undo_stack::UndoStack;

/// Change subscriber, invoked with the full new tree snapshot.
pub type OnChange = Box<dyn FnMut(&Node)>;

/// One editing session over a layout tree.
pub struct Editor {
    state: EditorState,
    sources: Vec<ElementSource>,
    undo: UndoStack,
    on_change: Option<OnChange>,
}

impl Editor {
    /// Create an editor over an initial tree snapshot, in the default
    /// edit mode with an empty palette.
    pub fn new(initial_tree: Node) -> Self {
        Self {
            state: EditorState::new(initial_tree, EditMode::default()),
            sources: Vec::new(),
            undo: UndoStack::new(),
            on_change: None,
        }
    }

    /// Supply the palette catalog. Immutable for the session.
    pub fn with_sources(mut self, sources: Vec<ElementSource>) -> Self {
        self.sources = sources;
        self
    }

    /// Start in a specific edit mode instead of the default.
    pub fn with_edit_mode(mut self, mode: EditMode) -> Self {
        self.state.edit_mode = mode;
        self
    }

    /// Subscribe to change notifications. Called synchronously, exactly
    /// once per successful mutation, never on a no-op.
    pub fn on_change(mut self, callback: impl FnMut(&Node) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn tree(&self) -> &Node {
        &self.state.tree
    }

    pub fn edit_mode(&self) -> EditMode {
        self.state.edit_mode
    }

    pub fn sources(&self) -> &[ElementSource] {
        &self.sources
    }

    /// Run one action through the reducer, recording history and notifying
    /// subscribers when the tree actually changed.
    pub fn dispatch(&mut self, action: Action) -> Reduction {
        // Only mutations can end up in history; mode switches need no
        // snapshot.
        let before = match &action {
            Action::Mutate(_) => Some(self.state.tree.clone()),
            Action::SetEditMode(_) => None,
        };
        let (next, reduction) = reduce(&self.state, action);
        self.state = next;

        if reduction == Reduction::Mutated {
            if let Some(before) = before {
                self.undo.record(before);
            }
            self.notify();
        }
        reduction
    }

    /// Apply a single mutation. Rejections surface as errors and leave the
    /// tree untouched.
    pub fn apply(&mut self, mutation: Mutation) -> Result<(), MutationError> {
        match self.dispatch(Action::Mutate(mutation)) {
            Reduction::Rejected(err) => Err(err),
            _ => Ok(()),
        }
    }

    pub fn set_edit_mode(&mut self, mode: EditMode) {
        self.dispatch(Action::SetEditMode(mode));
    }

    /// Complete a drag gesture. Self-drops resolve to `Ok` without
    /// touching the tree or notifying anyone.
    pub fn handle_drop(&mut self, drag: &DragPayload, target: &DropTarget) -> Result<(), MutationError> {
        match map_drop(&self.state.tree, drag, target) {
            Some(mutation) => self.apply(mutation),
            None => Ok(()),
        }
    }

    /// Step back one mutation. Fires the change notification when a
    /// snapshot was restored.
    pub fn undo(&mut self) -> bool {
        match self.undo.undo(&self.state.tree) {
            Some(previous) => {
                self.state.tree = previous;
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Step forward one undone mutation.
    pub fn redo(&mut self) -> bool {
        match self.undo.redo(&self.state.tree) {
            Some(next) => {
                self.state.tree = next;
                self.notify();
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// The Output view: the current tree as pretty-printed JSON. The
    /// encoding round-trips losslessly through [`Node`].
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.state.tree)
    }

    fn notify(&mut self) {
        if let Some(on_change) = &mut self.on_change {
            on_change(&self.state.tree);
        }
    }
}
