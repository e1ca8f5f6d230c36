//! Hierarchy flattening

use std::io;

use crate::model::{Kind, NodeId, Outline};
use crate::traverse::{Mode, Visitor};

/// Collapses organizational nesting into a flat root sequence.
///
/// In project mode the pass collects every project into a side sequence,
/// recording the folder path it came from, and hoists nested sub-tasks so
/// each project ends up with a single flat task list (the hoisted task keeps
/// its former parent chain as a display path). In context mode it collects
/// every context with its context path; task membership is untouched.
///
/// The walked folder structure itself is not modified — the caller must
/// adopt [`FlattenPass::into_roots`] as the new root sequence instead of the
/// original roots. Re-traversing the flat sequence produces no folder hooks.
#[derive(Default)]
pub struct FlattenPass {
    mode: Mode,
    items: Vec<NodeId>,
}

impl FlattenPass {
    pub fn new() -> Self {
        Self::default()
    }

    /// The flat sequence to use as the new roots.
    pub fn into_roots(self) -> Vec<NodeId> {
        self.items
    }
}

impl Visitor for FlattenPass {
    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn begin_project(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        outline[id].path = outline.ancestor_path(id, Kind::Folder);
        self.items.push(id);
        Ok(())
    }

    fn begin_context(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        outline[id].path = outline.ancestor_path(id, Kind::Context);
        self.items.push(id);
        Ok(())
    }

    fn end_task(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        // Hoisting only applies to the organizational walk; a categorical
        // walk never recurses into sub-tasks in the first place.
        if self.mode != Mode::Project || outline[id].children.is_empty() {
            return Ok(());
        }
        let Some(parent) = outline[id].parent else {
            return Ok(());
        };
        let children = std::mem::take(&mut outline[id].children);
        let chain = outline[id].name.clone();
        for child in children {
            outline[child].parent = Some(parent);
            outline[child].path = Some(match outline[child].path.take() {
                Some(path) => format!("{chain} : {path}"),
                None => chain.clone(),
            });
            outline[parent].children.push(child);
        }
        Ok(())
    }
}
