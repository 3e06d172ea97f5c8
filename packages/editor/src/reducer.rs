//! # Reducer
//!
//! Pure state machine over `{ tree, edit_mode }`.
//!
//! `reduce` is total: every action yields a defined next state. A mutation
//! that fails validation leaves the state untouched and surfaces the
//! rejection in the returned [`Reduction`]; nothing at this boundary ever
//! panics on a malformed intent.

use mosaic_document::{IdGenerator, Node};
use serde::{Deserialize, Serialize};

use crate::mutations::{Mutation, MutationError};

/// Display/interaction filter, independent of tree content. Every mode is
/// reachable from every other; switching never touches the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditMode {
    #[default]
    All,
    Element,
    Layout,
    Preview,
    Output,
}

/// Reducer state. The id generator is explicit state threaded through
/// reduction, not a module-level singleton.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub tree: Node,
    pub edit_mode: EditMode,
    ids: IdGenerator,
}

impl EditorState {
    pub fn new(tree: Node, edit_mode: EditMode) -> Self {
        let ids = IdGenerator::new(&tree.id);
        Self {
            tree,
            edit_mode,
            ids,
        }
    }
}

/// Actions accepted by the reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Mutate(Mutation),
    SetEditMode(EditMode),
}

/// Observable outcome of one reduction step.
#[derive(Debug, Clone, PartialEq)]
pub enum Reduction {
    /// The tree changed; subscribers must be notified.
    Mutated,
    /// Only the edit mode changed.
    ModeChanged,
    /// The action was rejected; state is the prior state, unchanged.
    Rejected(MutationError),
}

/// Apply one action. Rejections return a state identical to the input.
pub fn reduce(state: &EditorState, action: Action) -> (EditorState, Reduction) {
    match action {
        Action::Mutate(mutation) => {
            tracing::debug!(mutation = mutation.name(), "reduce: mutate");
            let mut ids = state.ids.clone();
            match mutation.apply(&state.tree, &mut ids) {
                Ok(tree) => (
                    EditorState {
                        tree,
                        edit_mode: state.edit_mode,
                        ids,
                    },
                    Reduction::Mutated,
                ),
                Err(err) => {
                    tracing::warn!(mutation = mutation.name(), %err, "mutation rejected");
                    (state.clone(), Reduction::Rejected(err))
                }
            }
        }
        Action::SetEditMode(mode) => {
            tracing::debug!(?mode, "reduce: set edit mode");
            (
                EditorState {
                    tree: state.tree.clone(),
                    edit_mode: mode,
                    ids: state.ids.clone(),
                },
                Reduction::ModeChanged,
            )
        }
    }
}
