//! The view pipeline.
//!
//! Dataset → [`filter`] → [`sort`] → ([`pagination`] | full result) →
//! [`window`]. Each stage is a pure function of its inputs; [`selection`]
//! and the column layout decorate the output without being filtered.

pub mod debounce;
pub mod filter;
pub mod pagination;
pub mod selection;
pub mod sort;
pub mod window;

pub use debounce::Debouncer;
pub use filter::{CompiledFilter, FilterSpec, FilterValue, Predicate, RangeInput};
pub use pagination::PaginationState;
pub use selection::{PageSelectionState, Selection};
pub use sort::{SortDirection, SortKey, SortSpec};
pub use window::{ViewWindow, VirtualScrollState, compute_window};
