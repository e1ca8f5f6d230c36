//! Outline arena holding both forests over one set of nodes

use std::ops::{Index, IndexMut};

use super::node::{Kind, Node, NodeId, Payload, ProjectInfo, TaskInfo};

/// Arena of nodes plus the two root sequences.
///
/// `project_roots` is the organizational forest (folders, projects, tasks);
/// `context_roots` is the categorical forest (contexts and their task
/// memberships). Tasks are owned once, by the arena, and referenced from both
/// hierarchies, so walking either forest mutates the same instances.
#[derive(Debug, Default)]
pub struct Outline {
    nodes: Vec<Node>,
    pub project_roots: Vec<NodeId>,
    pub context_roots: Vec<NodeId>,
}

impl Outline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_folder(&mut self, name: &str) -> NodeId {
        self.push(Node::new(name, Payload::Folder))
    }

    pub fn add_project(&mut self, name: &str, info: ProjectInfo) -> NodeId {
        self.push(Node::new(name, Payload::Project { info, folder: None }))
    }

    pub fn add_task(&mut self, name: &str, info: TaskInfo) -> NodeId {
        self.push(Node::new(name, Payload::Task { info, context: None }))
    }

    pub fn add_context(&mut self, name: &str) -> NodeId {
        self.push(Node::new(name, Payload::Context))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Attach `child` under `parent`, establishing the appropriate relation.
    ///
    /// A task attached to a context becomes a categorical membership: the
    /// task joins the context's children and records the context as a
    /// back-reference, but its organizational `parent` stays untouched. Any
    /// other combination is an ownership edge and sets `parent`; a project
    /// attached to a folder additionally records the folder back-reference.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            !self[parent].children.contains(&child),
            "child attached twice to the same parent"
        );
        self[parent].children.push(child);
        match (self[parent].kind(), &mut self[child].payload) {
            (Kind::Context, Payload::Task { context, .. }) => *context = Some(parent),
            (Kind::Folder, Payload::Project { folder, .. }) => {
                *folder = Some(parent);
                self[child].parent = Some(parent);
            }
            _ => self[child].parent = Some(parent),
        }
    }

    /// Whether any direct child of `id` is still marked.
    pub fn has_marked_child(&self, id: NodeId) -> bool {
        self[id].children.iter().any(|&c| self[c].marked)
    }

    /// Names of the ancestor chain of `id`, root first, restricted to `kind`.
    ///
    /// Used by the flatten pass to record where a collected node came from.
    pub fn ancestor_path(&self, id: NodeId, kind: Kind) -> Option<String> {
        let mut names = Vec::new();
        let mut cursor = self[id].parent;
        while let Some(pid) = cursor {
            if self[pid].kind() == kind {
                names.push(self[pid].name.as_str());
            }
            cursor = self[pid].parent;
        }
        if names.is_empty() {
            return None;
        }
        names.reverse();
        Some(names.join(" : "))
    }
}

impl Index<NodeId> for Outline {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for Outline {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }
}
