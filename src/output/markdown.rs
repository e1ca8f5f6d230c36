//! Markdown output
//!
//! Containers become headings one level deeper than their parent (capped at
//! h6); tasks become check-list items indented by their nesting depth, with
//! `[x]` for completed tasks.

use std::io::{self, Write};

use crate::model::{NodeId, Outline};
use crate::traverse::Visitor;

use super::{DATE_FORMAT, qualified_name};

pub struct MarkdownFormatter<W: Write> {
    out: W,
    heading: usize,
    task_depth: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            heading: 0,
            task_depth: 0,
        }
    }

    fn write_heading(&mut self, outline: &Outline, id: NodeId) -> io::Result<()> {
        let level = (self.heading + 1).min(6);
        writeln!(
            self.out,
            "{} {}\n",
            "#".repeat(level),
            qualified_name(&outline[id])
        )?;
        self.heading += 1;
        Ok(())
    }
}

impl<W: Write> Visitor for MarkdownFormatter<W> {
    fn begin_folder(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.write_heading(outline, id)
    }

    fn end_folder(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        self.heading -= 1;
        Ok(())
    }

    fn begin_project(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.write_heading(outline, id)
    }

    fn end_project(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        self.heading -= 1;
        // Separate the project's task list from the next heading.
        writeln!(self.out)
    }

    fn begin_context(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.write_heading(outline, id)
    }

    fn end_context(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        self.heading -= 1;
        writeln!(self.out)
    }

    fn begin_task(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        let check = if outline[id].date_completed().is_some() {
            'x'
        } else {
            ' '
        };
        let mut line = format!(
            "{}- [{check}] {}",
            "  ".repeat(self.task_depth),
            qualified_name(&outline[id])
        );
        if let Some(due) = outline[id].date_due() {
            line.push_str(&format!(" *(due {})*", due.format(DATE_FORMAT)));
        }
        if outline[id].flagged() == Some(true) {
            line.push_str(" **!**");
        }
        writeln!(self.out, "{line}")?;
        self.task_depth += 1;
        Ok(())
    }

    fn end_task(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        self.task_depth -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectInfo, TaskInfo};
    use crate::traverse::{Mode, traverse_list};

    #[test]
    fn test_markdown_headings_and_tasks() {
        let mut outline = Outline::new();
        let folder = outline.add_folder("Work");
        let project = outline.add_project("Ship", ProjectInfo::default());
        let done = outline.add_task(
            "tag the release",
            TaskInfo {
                date_completed: Some("2013-04-15".parse().unwrap()),
                ..Default::default()
            },
        );
        let open = outline.add_task("announce it", TaskInfo::default());
        outline.attach(folder, project);
        outline.attach(project, done);
        outline.attach(project, open);
        let roots = vec![folder];

        let mut buf = Vec::new();
        let mut formatter = MarkdownFormatter::new(&mut buf);
        traverse_list(&mut formatter, &mut outline, &roots, false, Mode::Project).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("# Work\n"));
        assert!(text.contains("## Ship\n"));
        assert!(text.contains("- [x] tag the release"));
        assert!(text.contains("- [ ] announce it"));
    }

    #[test]
    fn test_markdown_subtask_indent() {
        let mut outline = Outline::new();
        let project = outline.add_project("P", ProjectInfo::default());
        let task = outline.add_task("outer", TaskInfo::default());
        let sub = outline.add_task("inner", TaskInfo::default());
        outline.attach(project, task);
        outline.attach(task, sub);
        let roots = vec![project];

        let mut buf = Vec::new();
        let mut formatter = MarkdownFormatter::new(&mut buf);
        traverse_list(&mut formatter, &mut outline, &roots, false, Mode::Project).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("- [ ] outer"));
        assert!(text.contains("  - [ ] inner"));
    }

    #[test]
    fn test_heading_level_caps_at_six() {
        let mut outline = Outline::new();
        let mut parent = outline.add_folder("f0");
        let roots = vec![parent];
        for i in 1..8 {
            let child = outline.add_folder(&format!("f{i}"));
            outline.attach(parent, child);
            parent = child;
        }

        let mut buf = Vec::new();
        let mut formatter = MarkdownFormatter::new(&mut buf);
        traverse_list(&mut formatter, &mut outline, &roots, false, Mode::Project).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("###### f6"));
        assert!(text.contains("###### f7"));
        assert!(!text.contains("#######"));
    }
}
