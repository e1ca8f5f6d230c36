//! Filter and transform passes
//!
//! Each pass is a self-contained [`Visitor`](crate::traverse::Visitor)
//! applied by re-running the traversal engine over the current roots. Passes
//! run in the order the caller applies them and each one observes the
//! cumulative `marked` and ordering changes of the passes before it; there is
//! no canonical order, but pruning only makes sense after the filters whose
//! effect it should fold upward, and a flatten replaces the caller's roots.

mod date;
mod flag;
mod flatten;
mod name;
mod prune;
mod sort;

pub use date::{DateField, DateFilter};
pub use flag::FlagFilter;
pub use flatten::FlattenPass;
pub use name::NameFilter;
pub use prune::PrunePass;
pub use sort::{SortKey, SortPass, sort_roots};

/// Whether a filter keeps matches or drops them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Unmark nodes that do NOT satisfy the predicate.
    Include,
    /// Unmark nodes that DO satisfy the predicate.
    Exclude,
}

/// Node kinds a filter applies to. Kinds outside the scope are left
/// untouched, so scoped filters are structurally transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Any,
    Folder,
    Project,
    Task,
    Context,
}

impl Scope {
    fn covers(self, kind: crate::model::Kind) -> bool {
        use crate::model::Kind;
        matches!(
            (self, kind),
            (Scope::Any, _)
                | (Scope::Folder, Kind::Folder)
                | (Scope::Project, Kind::Project)
                | (Scope::Task, Kind::Task)
                | (Scope::Context, Kind::Context)
        )
    }
}
