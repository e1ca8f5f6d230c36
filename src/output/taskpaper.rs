//! TaskPaper output
//!
//! Containers are `name:` lines, tasks are `- name` lines with `@tag`
//! annotations. Indentation is one tab per level, which is what TaskPaper
//! uses to infer structure.

use std::io::{self, Write};

use crate::model::{NodeId, Outline};
use crate::traverse::{Mode, Visitor};

use super::{DATE_FORMAT, owning_project, qualified_name};

pub struct TaskpaperFormatter<W: Write> {
    out: W,
    depth: usize,
    mode: Mode,
}

impl<W: Write> TaskpaperFormatter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            depth: 0,
            mode: Mode::Project,
        }
    }

    fn container(&mut self, outline: &Outline, id: NodeId) -> io::Result<()> {
        let indent = "\t".repeat(self.depth);
        writeln!(self.out, "{indent}{}:", qualified_name(&outline[id]))?;
        self.depth += 1;
        Ok(())
    }
}

impl<W: Write> Visitor for TaskpaperFormatter<W> {
    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn begin_folder(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.container(outline, id)
    }

    fn end_folder(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        self.depth -= 1;
        Ok(())
    }

    fn begin_project(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.container(outline, id)
    }

    fn end_project(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        self.depth -= 1;
        Ok(())
    }

    fn begin_context(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.container(outline, id)
    }

    fn end_context(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        self.depth -= 1;
        Ok(())
    }

    fn begin_task(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        let mut line = format!(
            "{}- {}",
            "\t".repeat(self.depth),
            qualified_name(&outline[id])
        );
        if let Some(done) = outline[id].date_completed() {
            line.push_str(&format!(" @done({})", done.format(DATE_FORMAT)));
        }
        if let Some(start) = outline[id].date_to_start() {
            line.push_str(&format!(" @start({})", start.format(DATE_FORMAT)));
        }
        if let Some(due) = outline[id].date_due() {
            line.push_str(&format!(" @due({})", due.format(DATE_FORMAT)));
        }
        if outline[id].flagged() == Some(true) {
            line.push_str(" @flagged");
        }
        match self.mode {
            Mode::Project => {
                if let Some(context) = outline[id].context() {
                    line.push_str(&format!(" @context({})", outline[context].name));
                }
            }
            Mode::Context => {
                if let Some(project) = owning_project(outline, id) {
                    line.push_str(&format!(" @project({})", outline[project].name));
                }
            }
        }
        writeln!(self.out, "{line}")?;
        self.depth += 1;
        Ok(())
    }

    fn end_task(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        self.depth -= 1;
        Ok(())
    }
}
