//! Plain text output

use std::io::{self, Write};

use crate::model::{NodeId, Outline};
use crate::traverse::{Mode, Visitor};

use super::{DATE_FORMAT, owning_project, qualified_name};

/// Tab-indented `Kind: name` lines with date and flag annotations.
pub struct TextFormatter<W: Write> {
    out: W,
    depth: usize,
    mode: Mode,
}

impl<W: Write> TextFormatter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            depth: 0,
            mode: Mode::Project,
        }
    }

    fn line(&mut self, kind: &str, body: &str) -> io::Result<()> {
        let indent = "\t".repeat(self.depth);
        writeln!(self.out, "{indent}{kind}: {body}")
    }
}

impl<W: Write> Visitor for TextFormatter<W> {
    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    fn begin_folder(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.line("Folder", &qualified_name(&outline[id]))?;
        self.depth += 1;
        Ok(())
    }

    fn end_folder(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        self.depth -= 1;
        Ok(())
    }

    fn begin_project(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        let mut body = qualified_name(&outline[id]);
        if let Some(done) = outline[id].date_completed() {
            body.push_str(&format!(" (done {})", done.format(DATE_FORMAT)));
        }
        if outline[id].flagged() == Some(true) {
            body.push_str(" [flagged]");
        }
        self.line("Project", &body)?;
        self.depth += 1;
        Ok(())
    }

    fn end_project(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        self.depth -= 1;
        Ok(())
    }

    fn begin_task(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        let mut body = qualified_name(&outline[id]);
        if let Some(done) = outline[id].date_completed() {
            body.push_str(&format!(" (done {})", done.format(DATE_FORMAT)));
        }
        if let Some(start) = outline[id].date_to_start() {
            body.push_str(&format!(" (start {})", start.format(DATE_FORMAT)));
        }
        if let Some(due) = outline[id].date_due() {
            body.push_str(&format!(" (due {})", due.format(DATE_FORMAT)));
        }
        if outline[id].flagged() == Some(true) {
            body.push_str(" [flagged]");
        }
        match self.mode {
            Mode::Project => {
                if let Some(context) = outline[id].context() {
                    body.push_str(&format!(" @{}", outline[context].name));
                }
            }
            Mode::Context => {
                if let Some(project) = owning_project(outline, id) {
                    body.push_str(&format!(" (in {})", outline[project].name));
                }
            }
        }
        self.line("Task", &body)?;
        self.depth += 1;
        Ok(())
    }

    fn end_task(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        self.depth -= 1;
        Ok(())
    }

    fn begin_context(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.line("Context", &qualified_name(&outline[id]))?;
        self.depth += 1;
        Ok(())
    }

    fn end_context(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        self.depth -= 1;
        Ok(())
    }
}
