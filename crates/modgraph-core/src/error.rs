//! Typed error conditions for graph construction and queries.

use thiserror::Error;

use crate::node::ModuleId;

/// Errors surfaced by successor resolution and the read-only graph façade.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A symbolic accessor reference in a module's build script did not
    /// resolve against any accessor table entry.
    ///
    /// This fails the whole resolution pass for the module rather than
    /// dropping the edge: a missing table entry is a rule-data defect the
    /// caller must fix, not a condition to paper over.
    #[error("unknown module accessor `{reference}` in `{module}`")]
    UnknownAccessor {
        /// The dotted symbolic name that failed to resolve.
        reference: String,
        /// The module whose build script contained the reference.
        module: ModuleId,
    },

    /// A query named a module that the constructed graph never contained.
    ///
    /// A usage error on the caller's side, not a recoverable runtime
    /// condition.
    #[error("module `{0}` is not part of this graph")]
    NotInGraph(ModuleId),
}
