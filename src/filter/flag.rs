//! Flagged-state filtering

use std::io;

use crate::model::{NodeId, Outline};
use crate::traverse::Visitor;

use super::{Polarity, Scope};

/// Unmarks projects and tasks by their `flagged` attribute.
///
/// Folders and contexts do not define the attribute and are always left
/// untouched, even under [`Scope::Any`].
pub struct FlagFilter {
    scope: Scope,
    polarity: Polarity,
}

impl FlagFilter {
    pub fn new(scope: Scope, polarity: Polarity) -> Self {
        Self { scope, polarity }
    }

    fn apply(&self, outline: &mut Outline, id: NodeId) {
        if !self.scope.covers(outline[id].kind()) {
            return;
        }
        let Some(flagged) = outline[id].flagged() else {
            return;
        };
        let keep = match self.polarity {
            Polarity::Include => flagged,
            Polarity::Exclude => !flagged,
        };
        if !keep {
            outline[id].marked = false;
        }
    }
}

impl Visitor for FlagFilter {
    fn begin_project(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.apply(outline, id);
        Ok(())
    }

    fn begin_task(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.apply(outline, id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectInfo, TaskInfo};
    use crate::traverse::{Mode, traverse_list};

    #[test]
    fn test_include_flagged_tasks() {
        let mut outline = Outline::new();
        let project = outline.add_project("P", ProjectInfo::default());
        let hot = outline.add_task(
            "hot",
            TaskInfo {
                flagged: true,
                ..Default::default()
            },
        );
        let cold = outline.add_task("cold", TaskInfo::default());
        outline.attach(project, hot);
        outline.attach(project, cold);
        let roots = vec![project];

        let mut filter = FlagFilter::new(Scope::Task, Polarity::Include);
        traverse_list(&mut filter, &mut outline, &roots, false, Mode::Project).unwrap();

        assert!(outline[hot].marked);
        assert!(!outline[cold].marked);
        // The project itself has no task scope and keeps its mark.
        assert!(outline[project].marked);
    }

    #[test]
    fn test_any_scope_skips_folders() {
        let mut outline = Outline::new();
        let folder = outline.add_folder("F");
        let project = outline.add_project(
            "P",
            ProjectInfo {
                flagged: true,
                ..Default::default()
            },
        );
        outline.attach(folder, project);
        let roots = vec![folder];

        let mut filter = FlagFilter::new(Scope::Any, Polarity::Include);
        traverse_list(&mut filter, &mut outline, &roots, false, Mode::Project).unwrap();

        assert!(outline[folder].marked);
        assert!(outline[project].marked);
    }

    #[test]
    fn test_exclude_flagged_projects() {
        let mut outline = Outline::new();
        let project = outline.add_project(
            "P",
            ProjectInfo {
                flagged: true,
                ..Default::default()
            },
        );
        let roots = vec![project];

        let mut filter = FlagFilter::new(Scope::Project, Polarity::Exclude);
        traverse_list(&mut filter, &mut outline, &roots, false, Mode::Project).unwrap();
        assert!(!outline[project].marked);
    }
}
