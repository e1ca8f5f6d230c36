//! JSON database loader
//!
//! Builds the two forests from an exported task database: an organizational
//! forest of folders, projects, and (nested) tasks, and a categorical forest
//! of contexts listing the same task instances. All cross-references — each
//! task's context and each project's folder — are resolved here, before any
//! traversal runs.
//!
//! Tasks and projects may carry note text. Note lines of the form
//! `@due 2013-04-15`, `@start ...`, or `@done ...` override the matching
//! date field; malformed directive lines are logged and skipped, never
//! fatal.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use log::warn;
use serde::Deserialize;

use crate::model::{NodeId, Outline, Payload, ProjectInfo, TaskInfo};

/// Name of the context fabricated for tasks without a resolvable one.
pub const NO_CONTEXT: &str = "No Context";

#[derive(Debug, Deserialize)]
struct Database {
    #[serde(default)]
    contexts: Vec<ContextDoc>,
    #[serde(default)]
    folders: Vec<FolderDoc>,
    #[serde(default)]
    projects: Vec<ProjectDoc>,
}

#[derive(Debug, Deserialize)]
struct ContextDoc {
    name: String,
    #[serde(default)]
    contexts: Vec<ContextDoc>,
}

#[derive(Debug, Deserialize)]
struct FolderDoc {
    name: String,
    #[serde(default)]
    folders: Vec<FolderDoc>,
    #[serde(default)]
    projects: Vec<ProjectDoc>,
}

#[derive(Debug, Deserialize)]
struct ProjectDoc {
    name: String,
    #[serde(default)]
    flagged: bool,
    completed: Option<NaiveDate>,
    note: Option<String>,
    #[serde(default)]
    tasks: Vec<TaskDoc>,
}

#[derive(Debug, Deserialize)]
struct TaskDoc {
    name: String,
    #[serde(default)]
    flagged: bool,
    context: Option<String>,
    completed: Option<NaiveDate>,
    start: Option<NaiveDate>,
    due: Option<NaiveDate>,
    note: Option<String>,
    #[serde(default)]
    tasks: Vec<TaskDoc>,
}

/// Load an outline from a JSON database file.
pub fn load(path: &Path) -> Result<Outline> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading database '{}'", path.display()))?;
    parse(&text).with_context(|| format!("parsing database '{}'", path.display()))
}

/// Parse an outline from JSON text.
pub fn parse(text: &str) -> Result<Outline> {
    let doc: Database = serde_json::from_str(text)?;
    Ok(Builder::default().build(doc))
}

#[derive(Default)]
struct Builder {
    outline: Outline,
    contexts_by_name: HashMap<String, NodeId>,
    no_context: Option<NodeId>,
}

impl Builder {
    fn build(mut self, doc: Database) -> Outline {
        // Contexts first, so task references resolve in one pass.
        for context in doc.contexts {
            self.add_context(context, None);
        }
        for folder in doc.folders {
            self.add_folder(folder, None);
        }
        for project in doc.projects {
            self.add_project(project, None);
        }
        self.outline
    }

    fn add_context(&mut self, doc: ContextDoc, parent: Option<NodeId>) {
        let id = self.outline.add_context(&doc.name);
        let name = self.outline[id].name.clone();
        if self.contexts_by_name.insert(name.clone(), id).is_some() {
            warn!("duplicate context name '{name}', later tasks resolve to the last one");
        }
        match parent {
            Some(parent) => self.outline.attach(parent, id),
            None => self.outline.context_roots.push(id),
        }
        for child in doc.contexts {
            self.add_context(child, Some(id));
        }
    }

    fn add_folder(&mut self, doc: FolderDoc, parent: Option<NodeId>) {
        let id = self.outline.add_folder(&doc.name);
        match parent {
            Some(parent) => self.outline.attach(parent, id),
            None => self.outline.project_roots.push(id),
        }
        for child in doc.folders {
            self.add_folder(child, Some(id));
        }
        for project in doc.projects {
            self.add_project(project, Some(id));
        }
    }

    fn add_project(&mut self, doc: ProjectDoc, folder: Option<NodeId>) {
        let id = self.outline.add_project(
            &doc.name,
            ProjectInfo {
                flagged: doc.flagged,
                date_completed: doc.completed,
            },
        );
        match folder {
            Some(folder) => self.outline.attach(folder, id),
            None => self.outline.project_roots.push(id),
        }
        self.outline[id].note = doc.note;
        self.apply_note_directives(id);
        for task in doc.tasks {
            self.add_task(task, id);
        }
    }

    fn add_task(&mut self, doc: TaskDoc, parent: NodeId) {
        let id = self.outline.add_task(
            &doc.name,
            TaskInfo {
                flagged: doc.flagged,
                date_completed: doc.completed,
                date_to_start: doc.start,
                date_due: doc.due,
            },
        );
        self.outline.attach(parent, id);
        self.outline[id].note = doc.note;
        self.apply_note_directives(id);

        let task_name = self.outline[id].name.clone();
        let context = self.resolve_context(doc.context.as_deref(), &task_name);
        self.outline.attach(context, id);

        for sub in doc.tasks {
            self.add_task(sub, id);
        }
    }

    fn resolve_context(&mut self, name: Option<&str>, task_name: &str) -> NodeId {
        match name {
            Some(name) => match self.contexts_by_name.get(name) {
                Some(&id) => id,
                None => {
                    warn!("task '{task_name}' references unknown context '{name}'");
                    self.fabricated_context()
                }
            },
            None => self.fabricated_context(),
        }
    }

    /// Lazily create the catch-all context and make it a root of the
    /// categorical forest.
    fn fabricated_context(&mut self) -> NodeId {
        if let Some(id) = self.no_context {
            return id;
        }
        let id = self.outline.add_context(NO_CONTEXT);
        self.outline.context_roots.push(id);
        self.no_context = Some(id);
        id
    }

    fn apply_note_directives(&mut self, id: NodeId) {
        let Some(note) = self.outline[id].note.clone() else {
            return;
        };
        let name = self.outline[id].name.clone();
        for line in note.lines() {
            let line = line.trim();
            let Some(directive) = line.strip_prefix('@') else {
                continue;
            };
            let (key, value) = match directive.split_once(char::is_whitespace) {
                Some((key, value)) => (key, value.trim()),
                None => {
                    warn!("'{name}': ignoring malformed note directive '{line}'");
                    continue;
                }
            };
            let date: NaiveDate = match value.parse() {
                Ok(date) => date,
                Err(_) => {
                    warn!("'{name}': ignoring note directive '{line}': bad date '{value}'");
                    continue;
                }
            };
            match (&mut self.outline[id].payload, key) {
                (Payload::Task { info, .. }, "due") => info.date_due = Some(date),
                (Payload::Task { info, .. }, "start") => info.date_to_start = Some(date),
                (Payload::Task { info, .. }, "done") => info.date_completed = Some(date),
                (Payload::Project { info, .. }, "done") => info.date_completed = Some(date),
                _ => {
                    warn!("'{name}': ignoring unsupported note directive '{line}'");
                }
            }
        }
    }
}
