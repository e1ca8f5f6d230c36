//! Node types for the task outline

use chrono::NaiveDate;

/// Index of a node inside its [`Outline`](super::Outline) arena.
///
/// Ids are cheap to copy and remain valid for the lifetime of the outline;
/// nodes are never removed, only unmarked or reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// The four node kinds of the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Folder,
    Project,
    Task,
    Context,
}

/// Project-specific fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectInfo {
    pub flagged: bool,
    pub date_completed: Option<NaiveDate>,
}

/// Task-specific fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskInfo {
    pub flagged: bool,
    pub date_completed: Option<NaiveDate>,
    pub date_to_start: Option<NaiveDate>,
    pub date_due: Option<NaiveDate>,
}

/// Kind-specific payload of a node.
///
/// Back-references (`folder` on projects, `context` on tasks) are lookup
/// references, not ownership edges; ownership lives in the arena and the
/// `parent`/`children` links of [`Node`].
#[derive(Debug, Clone)]
pub enum Payload {
    Folder,
    Project {
        info: ProjectInfo,
        /// Owning folder, independent of the positional `parent` link.
        folder: Option<NodeId>,
    },
    Task {
        info: TaskInfo,
        /// The context this task belongs to in the categorical forest.
        context: Option<NodeId>,
    },
    Context,
}

/// A member of the outline tree.
///
/// `parent`/`children` form the organizational hierarchy; tasks additionally
/// appear in the children of their context, giving the categorical forest a
/// view onto the same instances.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Inclusion flag consumed by filters and traversal. Defaults to true.
    pub marked: bool,
    pub note: Option<String>,
    /// Ancestor display path, recorded by the flatten pass.
    pub path: Option<String>,
    pub payload: Payload,
}

impl Node {
    pub(crate) fn new(name: &str, payload: Payload) -> Self {
        Self {
            name: normalize_name(name),
            parent: None,
            children: Vec::new(),
            marked: true,
            note: None,
            path: None,
            payload,
        }
    }

    pub fn kind(&self) -> Kind {
        match self.payload {
            Payload::Folder => Kind::Folder,
            Payload::Project { .. } => Kind::Project,
            Payload::Task { .. } => Kind::Task,
            Payload::Context => Kind::Context,
        }
    }

    /// Flag state for kinds that define it (projects and tasks).
    pub fn flagged(&self) -> Option<bool> {
        match &self.payload {
            Payload::Project { info, .. } => Some(info.flagged),
            Payload::Task { info, .. } => Some(info.flagged),
            _ => None,
        }
    }

    pub fn date_completed(&self) -> Option<NaiveDate> {
        match &self.payload {
            Payload::Project { info, .. } => info.date_completed,
            Payload::Task { info, .. } => info.date_completed,
            _ => None,
        }
    }

    pub fn date_to_start(&self) -> Option<NaiveDate> {
        match &self.payload {
            Payload::Task { info, .. } => info.date_to_start,
            _ => None,
        }
    }

    pub fn date_due(&self) -> Option<NaiveDate> {
        match &self.payload {
            Payload::Task { info, .. } => info.date_due,
            _ => None,
        }
    }

    /// Context back-reference of a task.
    pub fn context(&self) -> Option<NodeId> {
        match &self.payload {
            Payload::Task { context, .. } => *context,
            _ => None,
        }
    }

    /// Folder back-reference of a project.
    pub fn folder(&self) -> Option<NodeId> {
        match &self.payload {
            Payload::Project { folder, .. } => *folder,
            _ => None,
        }
    }
}

/// Collapse tabs and newlines into single spaces and trim the ends.
///
/// Names come out of the source database with embedded whitespace; every
/// output format here is line-oriented, so normalization happens once at
/// construction.
fn normalize_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_was_space = false;
    for ch in raw.chars() {
        if ch == '\t' || ch == '\n' || ch == '\r' || ch == ' ' {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out.trim().to_string()
}
