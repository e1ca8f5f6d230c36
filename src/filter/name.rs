//! Regex name filtering

use std::io;

use regex::Regex;

use crate::model::{NodeId, Outline};
use crate::traverse::Visitor;

use super::{Polarity, Scope};

/// Unmarks nodes by matching a regex against their name.
///
/// With [`Polarity::Include`] a node of the filter's scope survives only if
/// its name matches; with [`Polarity::Exclude`] a match unmarks it. An
/// include filter that unmarks a container also cuts off its subtree, since
/// the engine re-checks `marked` before recursing; a later prune pass turns
/// surviving-descendant information into ancestor keep-state, not this one.
pub struct NameFilter {
    pattern: Regex,
    scope: Scope,
    polarity: Polarity,
}

impl NameFilter {
    pub fn new(pattern: &str, scope: Scope, polarity: Polarity) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            scope,
            polarity,
        })
    }

    fn apply(&self, outline: &mut Outline, id: NodeId) {
        if !self.scope.covers(outline[id].kind()) {
            return;
        }
        let hit = self.pattern.is_match(&outline[id].name);
        let keep = match self.polarity {
            Polarity::Include => hit,
            Polarity::Exclude => !hit,
        };
        if !keep {
            outline[id].marked = false;
        }
    }
}

impl Visitor for NameFilter {
    fn begin_folder(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.apply(outline, id);
        Ok(())
    }

    fn begin_project(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.apply(outline, id);
        Ok(())
    }

    fn begin_task(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.apply(outline, id);
        Ok(())
    }

    fn begin_context(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.apply(outline, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectInfo, TaskInfo};
    use crate::traverse::{Mode, traverse_list};

    fn project_with_tasks(names: &[&str]) -> (Outline, Vec<NodeId>) {
        let mut outline = Outline::new();
        let project = outline.add_project("P", ProjectInfo::default());
        let tasks: Vec<NodeId> = names
            .iter()
            .map(|n| {
                let t = outline.add_task(n, TaskInfo::default());
                outline.attach(project, t);
                t
            })
            .collect();
        outline.project_roots.push(project);
        (outline, tasks)
    }

    #[test]
    fn test_exclude_unmarks_matches() {
        let (mut outline, tasks) = project_with_tasks(&["call bank", "mow lawn"]);
        let roots = outline.project_roots.clone();
        let mut filter = NameFilter::new("bank", Scope::Task, Polarity::Exclude).unwrap();
        traverse_list(&mut filter, &mut outline, &roots, false, Mode::Project).unwrap();

        assert!(!outline[tasks[0]].marked);
        assert!(outline[tasks[1]].marked);
    }

    #[test]
    fn test_include_unmarks_non_matches() {
        let (mut outline, tasks) = project_with_tasks(&["call bank", "mow lawn"]);
        let roots = outline.project_roots.clone();
        let mut filter = NameFilter::new("bank", Scope::Task, Polarity::Include).unwrap();
        traverse_list(&mut filter, &mut outline, &roots, false, Mode::Project).unwrap();

        assert!(outline[tasks[0]].marked);
        assert!(!outline[tasks[1]].marked);
    }

    #[test]
    fn test_scoped_filter_leaves_other_kinds_untouched() {
        let (mut outline, tasks) = project_with_tasks(&["nothing matches this"]);
        let roots = outline.project_roots.clone();
        // Project-scoped include whose pattern matches no task name: the
        // project goes, but only because of its own name, not the task's.
        let mut filter = NameFilter::new("^P$", Scope::Project, Polarity::Include).unwrap();
        traverse_list(&mut filter, &mut outline, &roots, false, Mode::Project).unwrap();

        assert!(outline[roots[0]].marked);
        assert!(outline[tasks[0]].marked);
    }

    #[test]
    fn test_include_container_cutoff() {
        let (mut outline, tasks) = project_with_tasks(&["visible"]);
        let roots = outline.project_roots.clone();
        let mut filter = NameFilter::new("no such name", Scope::Any, Polarity::Include).unwrap();
        traverse_list(&mut filter, &mut outline, &roots, false, Mode::Project).unwrap();

        // The project was unmarked by its begin hook, so the task was never
        // even visited and keeps its mark.
        assert!(!outline[roots[0]].marked);
        assert!(outline[tasks[0]].marked);
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        assert!(NameFilter::new("(", Scope::Any, Polarity::Include).is_err());
    }
}
