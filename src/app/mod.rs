//! Application layer: the host loop around the headless kernel.

pub mod host;
pub mod shutdown;
pub mod tree_view;

pub use host::{HostEvent, WorkspaceHost};
pub use shutdown::{install_termination_signals, TerminationSignal};
pub use tree_view::{flatten_rows, render_row, render_tree, RowMarks, TreeRow};
