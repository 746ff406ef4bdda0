use thiserror::Error;

use crate::ir::RecordRef;

/// Structural problems in a hierarchy description. None of them are
/// recoverable inside the layout pass.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("unknown node `{id}` referenced by `{referrer}`")]
    DanglingReference {
        id: String,
        referrer: String,
        record: Option<RecordRef>,
    },

    #[error("root `{id}` does not match any configured forest")]
    UnclassifiedRoot { id: String },

    #[error("node `{id}` is declared twice ({first} and {second})")]
    DuplicateNodeId {
        id: String,
        first: RecordRef,
        second: RecordRef,
    },

    #[error("forest `{forest}` is not configured")]
    UnknownForest { forest: String },

    #[error("node `{id}` is not reachable from any root")]
    Unreachable { id: String },
}
