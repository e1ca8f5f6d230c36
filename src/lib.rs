//! Sprig - export hierarchical task outlines into plain text formats
//!
//! The core is a dual-hierarchy tree model (organizational folders, projects,
//! tasks; categorical contexts over the same tasks), a depth-first visitor
//! engine, and a composable set of filter/transform passes. Formatters are
//! just visitors too; the CLI wires a caller-ordered pipeline of passes and
//! one terminal formatter over a loaded outline.

pub mod filter;
pub mod loader;
pub mod model;
pub mod output;
pub mod traverse;

pub use filter::{
    DateField, DateFilter, FlagFilter, FlattenPass, NameFilter, Polarity, PrunePass, Scope,
    SortKey, SortPass, sort_roots,
};
pub use model::{Kind, Node, NodeId, Outline, Payload, ProjectInfo, TaskInfo};
pub use output::{Format, render};
pub use traverse::{Mode, Visitor, traverse, traverse_list};
