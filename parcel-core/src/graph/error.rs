use thiserror::Error;

/// Errors from [`crate::AddressGraph::distance_between`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// No edge was ever inserted for the requested ordered pair.
    ///
    /// Callers decide whether this is fatal. The dispatch simulator logs it
    /// and continues with a zero contribution unless configured otherwise.
    #[error("no distance recorded from {from} to {to}")]
    MissingEdge {
        /// Display form of the origin location.
        from: String,
        /// Display form of the destination location.
        to: String,
    },
}
