//! Date filtering
//!
//! Dates are filtered the way the CLI surface has always worked: the chosen
//! date field is rendered as `YYYY-MM-DD` (empty when unset) and a regex is
//! matched against that text. `2013-04` matches a whole month, `^$` matches
//! items without the date, and so on.

use std::io;

use regex::Regex;

use crate::model::{NodeId, Outline};
use crate::traverse::Visitor;

use super::{Polarity, Scope};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which date attribute a [`DateFilter`] inspects.
///
/// `Start` and `Due` exist on tasks only; constructing a project-scoped
/// filter over them is a contract violation at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Completed,
    Start,
    Due,
}

/// Unmarks tasks or projects whose rendered date fails the predicate.
pub struct DateFilter {
    field: DateField,
    pattern: Regex,
    scope: Scope,
    polarity: Polarity,
}

impl DateFilter {
    pub fn new(
        field: DateField,
        pattern: &str,
        scope: Scope,
        polarity: Polarity,
    ) -> Result<Self, regex::Error> {
        debug_assert!(
            matches!(scope, Scope::Task) || field == DateField::Completed,
            "projects only define a completion date"
        );
        Ok(Self {
            field,
            pattern: Regex::new(pattern)?,
            scope,
            polarity,
        })
    }

    fn apply(&self, outline: &mut Outline, id: NodeId) {
        if !self.scope.covers(outline[id].kind()) {
            return;
        }
        let date = match self.field {
            DateField::Completed => outline[id].date_completed(),
            DateField::Start => outline[id].date_to_start(),
            DateField::Due => outline[id].date_due(),
        };
        let rendered = date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default();
        let hit = self.pattern.is_match(&rendered);
        let keep = match self.polarity {
            Polarity::Include => hit,
            Polarity::Exclude => !hit,
        };
        if !keep {
            outline[id].marked = false;
        }
    }
}

impl Visitor for DateFilter {
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
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_include_due_month() {
        let mut outline = Outline::new();
        let project = outline.add_project("P", ProjectInfo::default());
        let soon = outline.add_task(
            "soon",
            TaskInfo {
                date_due: Some(date("2013-04-15")),
                ..Default::default()
            },
        );
        let later = outline.add_task(
            "later",
            TaskInfo {
                date_due: Some(date("2013-07-01")),
                ..Default::default()
            },
        );
        let never = outline.add_task("never", TaskInfo::default());
        for t in [soon, later, never] {
            outline.attach(project, t);
        }
        let roots = vec![project];

        let mut filter =
            DateFilter::new(DateField::Due, "2013-04", Scope::Task, Polarity::Include).unwrap();
        traverse_list(&mut filter, &mut outline, &roots, false, Mode::Project).unwrap();

        assert!(outline[soon].marked);
        assert!(!outline[later].marked);
        assert!(!outline[never].marked);
    }

    #[test]
    fn test_missing_date_renders_empty() {
        let mut outline = Outline::new();
        let project = outline.add_project("P", ProjectInfo::default());
        let open = outline.add_task("open", TaskInfo::default());
        let done = outline.add_task(
            "done",
            TaskInfo {
                date_completed: Some(date("2013-01-01")),
                ..Default::default()
            },
        );
        outline.attach(project, open);
        outline.attach(project, done);
        let roots = vec![project];

        // `^$` keeps only items that were never completed.
        let mut filter =
            DateFilter::new(DateField::Completed, "^$", Scope::Task, Polarity::Include).unwrap();
        traverse_list(&mut filter, &mut outline, &roots, false, Mode::Project).unwrap();

        assert!(outline[open].marked);
        assert!(!outline[done].marked);
    }

    #[test]
    fn test_project_completion_exclude() {
        let mut outline = Outline::new();
        let shipped = outline.add_project(
            "shipped",
            ProjectInfo {
                date_completed: Some(date("2013-03-03")),
                ..Default::default()
            },
        );
        let active = outline.add_project("active", ProjectInfo::default());
        let roots = vec![shipped, active];

        let mut filter = DateFilter::new(
            DateField::Completed,
            "2013",
            Scope::Project,
            Polarity::Exclude,
        )
        .unwrap();
        traverse_list(&mut filter, &mut outline, &roots, false, Mode::Project).unwrap();

        assert!(!outline[shipped].marked);
        assert!(outline[active].marked);
    }
}
