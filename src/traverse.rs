//! Depth-first traversal engine and the visitor contract
//!
//! Every filter, transform, and formatter in this crate is a [`Visitor`];
//! the engine drives them over either forest of an
//! [`Outline`](crate::model::Outline). Hook ordering is fixed: `begin_any`,
//! the kind-specific begin hook, recursion into children, the kind-specific
//! end hook, `end_any`. Begin and end hooks are strictly paired; a node
//! unmarked by its own begin hook still gets its end hooks, but its children
//! are skipped.

use std::io;

use crate::model::{Kind, NodeId, Outline};

/// Which hierarchy a traversal is walking.
///
/// In project mode, projects and tasks recurse into their organizational
/// children. In context mode they do not: categorical traversal visits only
/// the first-level task membership under a context, never nested sub-tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Project,
    Context,
}

/// The single extension point of the tree core.
///
/// All hooks default to no-ops, so a visitor implements only the ones it
/// cares about. Hooks receive the outline mutably: filters flip `marked`,
/// sorters reorder `children`, formatters read. Errors raised by a hook
/// propagate out of the engine and abort the pass; state mutated before the
/// error stays as is.
pub trait Visitor {
    /// Called by the engine before each node's hooks with the mode in
    /// effect for that node.
    fn set_mode(&mut self, _mode: Mode) {}

    fn begin_any(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        Ok(())
    }
    fn end_any(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        Ok(())
    }

    fn begin_folder(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        Ok(())
    }
    fn end_folder(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        Ok(())
    }

    fn begin_project(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        Ok(())
    }
    fn end_project(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        Ok(())
    }

    fn begin_task(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        Ok(())
    }
    fn end_task(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        Ok(())
    }

    fn begin_context(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        Ok(())
    }
    fn end_context(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        Ok(())
    }
}

/// Walk each item of a root sequence in order.
pub fn traverse_list<V: Visitor + ?Sized>(
    visitor: &mut V,
    outline: &mut Outline,
    items: &[NodeId],
    ignore_marked: bool,
    mode: Mode,
) -> io::Result<()> {
    visitor.set_mode(mode);
    for &id in items {
        traverse(visitor, outline, id, ignore_marked, mode)?;
    }
    Ok(())
}

/// Walk a single subtree depth-first.
///
/// Folders are always traversed in project mode regardless of `mode`; a
/// context forces context mode onto its whole subtree; projects and tasks
/// honor the caller's mode. Unmarked nodes are skipped entirely unless
/// `ignore_marked` is set.
pub fn traverse<V: Visitor + ?Sized>(
    visitor: &mut V,
    outline: &mut Outline,
    id: NodeId,
    ignore_marked: bool,
    mode: Mode,
) -> io::Result<()> {
    let kind = outline[id].kind();
    let mode = match kind {
        Kind::Folder => Mode::Project,
        Kind::Context => Mode::Context,
        Kind::Project | Kind::Task => mode,
    };
    visitor.set_mode(mode);

    if !(outline[id].marked || ignore_marked) {
        return Ok(());
    }

    visitor.begin_any(outline, id)?;
    match kind {
        Kind::Folder => visitor.begin_folder(outline, id)?,
        Kind::Project => visitor.begin_project(outline, id)?,
        Kind::Task => visitor.begin_task(outline, id)?,
        Kind::Context => visitor.begin_context(outline, id)?,
    }

    let recurse = match kind {
        Kind::Folder | Kind::Context => true,
        Kind::Project | Kind::Task => mode == Mode::Project,
    };
    // A begin hook may have unmarked the node; children are then skipped,
    // but the end hooks below still fire to keep begin/end paired.
    if recurse && (outline[id].marked || ignore_marked) {
        let children = outline[id].children.clone();
        traverse_list(visitor, outline, &children, ignore_marked, mode)?;
        visitor.set_mode(mode);
    }

    match kind {
        Kind::Folder => visitor.end_folder(outline, id)?,
        Kind::Project => visitor.end_project(outline, id)?,
        Kind::Task => visitor.end_task(outline, id)?,
        Kind::Context => visitor.end_context(outline, id)?,
    }
    visitor.end_any(outline, id)
}
