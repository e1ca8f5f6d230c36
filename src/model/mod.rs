//! Dual-hierarchy data model for task outlines
//!
//! Items belong to an organizational hierarchy (folders owning projects
//! owning tasks) and, for tasks, a categorical hierarchy (contexts listing
//! the same task instances). Nodes live in an [`Outline`] arena; hierarchy is
//! expressed through ids, which keeps the shared-leaf shape a plain tree for
//! ownership purposes.

mod node;
mod outline;

pub use node::{Kind, Node, NodeId, Payload, ProjectInfo, TaskInfo};
pub use outline::Outline;
