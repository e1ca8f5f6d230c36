//! Empty-branch pruning

use std::io;

use crate::model::{NodeId, Outline};
use crate::traverse::Visitor;

/// Unmarks containers whose subtree has no remaining marked member.
///
/// Runs post-order: by the time a container's end hook fires, its children
/// have already been pruned themselves, so "no marked child" means "no
/// marked descendant". Folders, projects, and contexts are pruned; tasks
/// never are. Run this after the filters whose effect it should fold upward.
/// Idempotent: a second run sees the same marks and changes nothing.
pub struct PrunePass;

impl PrunePass {
    fn prune(&self, outline: &mut Outline, id: NodeId) {
        if !outline.has_marked_child(id) {
            outline[id].marked = false;
        }
    }
}

impl Visitor for PrunePass {
    fn end_folder(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.prune(outline, id);
        Ok(())
    }

    fn end_project(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.prune(outline, id);
        Ok(())
    }

    fn end_context(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.prune(outline, id);
        Ok(())
    }
}
