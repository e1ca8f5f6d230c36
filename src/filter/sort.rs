//! Child-order sorting

use std::cmp::Ordering;
use std::io;

use crate::model::{NodeId, Outline};
use crate::traverse::Visitor;

/// Comparison key for [`SortPass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Alphabetical by name.
    Name,
    /// By completion date (unset dates first), name as tie-break.
    Completion,
}

impl SortKey {
    fn compare(self, outline: &Outline, a: NodeId, b: NodeId) -> Ordering {
        match self {
            SortKey::Name => outline[a].name.cmp(&outline[b].name),
            SortKey::Completion => outline[a]
                .date_completed()
                .cmp(&outline[b].date_completed())
                .then_with(|| outline[a].name.cmp(&outline[b].name)),
        }
    }
}

/// Sorts each container's children as the container completes.
///
/// End hooks fire bottom-up, so a parent's list is ordered using keys that
/// are already final. The top-level root sequence has no parent node to
/// trigger a hook; callers cover it with [`sort_roots`].
pub struct SortPass {
    key: SortKey,
}

impl SortPass {
    pub fn new(key: SortKey) -> Self {
        Self { key }
    }

    fn sort_children(&self, outline: &mut Outline, id: NodeId) {
        let mut children = outline[id].children.clone();
        children.sort_by(|&a, &b| self.key.compare(outline, a, b));
        outline[id].children = children;
    }
}

impl Visitor for SortPass {
    fn end_folder(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.sort_children(outline, id);
        Ok(())
    }

    fn end_project(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.sort_children(outline, id);
        Ok(())
    }

    fn end_task(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.sort_children(outline, id);
        Ok(())
    }

    fn end_context(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.sort_children(outline, id);
        Ok(())
    }
}

/// Sort a root sequence by the same key a [`SortPass`] uses for children.
pub fn sort_roots(outline: &Outline, roots: &mut [NodeId], key: SortKey) {
    roots.sort_by(|&a, &b| key.compare(outline, a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectInfo, TaskInfo};
    use crate::traverse::{Mode, traverse_list};
    use chrono::NaiveDate;

    fn names(outline: &Outline, ids: &[NodeId]) -> Vec<String> {
        ids.iter().map(|&id| outline[id].name.clone()).collect()
    }

    #[test]
    fn test_sort_by_name() {
        let mut outline = Outline::new();
        let project = outline.add_project("P", ProjectInfo::default());
        for n in ["b", "a", "c"] {
            let t = outline.add_task(n, TaskInfo::default());
            outline.attach(project, t);
        }
        let roots = vec![project];

        let mut pass = SortPass::new(SortKey::Name);
        traverse_list(&mut pass, &mut outline, &roots, false, Mode::Project).unwrap();
        assert_eq!(names(&outline, &outline[project].children), ["a", "b", "c"]);

        // Second application is a no-op.
        let before = outline[project].children.clone();
        let mut pass = SortPass::new(SortKey::Name);
        traverse_list(&mut pass, &mut outline, &roots, false, Mode::Project).unwrap();
        assert_eq!(outline[project].children, before);
    }

    #[test]
    fn test_sort_is_bottom_up() {
        let mut outline = Outline::new();
        let folder = outline.add_folder("F");
        let p2 = outline.add_project("zeta", ProjectInfo::default());
        let p1 = outline.add_project("alpha", ProjectInfo::default());
        outline.attach(folder, p2);
        outline.attach(folder, p1);
        for n in ["y", "x"] {
            let t = outline.add_task(n, TaskInfo::default());
            outline.attach(p2, t);
        }
        let roots = vec![folder];

        let mut pass = SortPass::new(SortKey::Name);
        traverse_list(&mut pass, &mut outline, &roots, false, Mode::Project).unwrap();

        assert_eq!(names(&outline, &outline[folder].children), ["alpha", "zeta"]);
        assert_eq!(names(&outline, &outline[p2].children), ["x", "y"]);
    }

    #[test]
    fn test_sort_by_completion() {
        let mut outline = Outline::new();
        let project = outline.add_project("P", ProjectInfo::default());
        let dates = [Some("2013-05-01"), None, Some("2013-01-01")];
        for (i, d) in dates.iter().enumerate() {
            let t = outline.add_task(
                &format!("t{i}"),
                TaskInfo {
                    date_completed: d.map(|s| s.parse::<NaiveDate>().unwrap()),
                    ..Default::default()
                },
            );
            outline.attach(project, t);
        }
        let roots = vec![project];

        let mut pass = SortPass::new(SortKey::Completion);
        traverse_list(&mut pass, &mut outline, &roots, false, Mode::Project).unwrap();
        // Unset first, then ascending.
        assert_eq!(names(&outline, &outline[project].children), ["t1", "t2", "t0"]);
    }

    #[test]
    fn test_sort_roots() {
        let mut outline = Outline::new();
        let b = outline.add_folder("b");
        let a = outline.add_folder("a");
        let mut roots = vec![b, a];
        sort_roots(&outline, &mut roots, SortKey::Name);
        assert_eq!(roots, vec![a, b]);
    }
}
