//! OPML output
//!
//! Nested `<outline>` elements with node attributes carried as XML
//! attributes. Notes are folded into the `_note` attribute with `&#10;`
//! line separators, which is the convention outliner apps expect.

use std::io::{self, Write};

use crate::model::{NodeId, Outline};
use crate::traverse::Visitor;

use super::DATE_FORMAT;

pub struct OpmlFormatter<W: Write> {
    out: W,
    depth: usize,
}

impl<W: Write> OpmlFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out, depth: 2 }
    }

    pub fn write_header(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>"
        )?;
        writeln!(self.out, "<opml version=\"1.0\">")?;
        writeln!(self.out, "  <head>")?;
        writeln!(self.out, "    <title>sprig</title>")?;
        writeln!(self.out, "  </head>")?;
        writeln!(self.out, "  <body>")
    }

    pub fn write_footer(&mut self) -> io::Result<()> {
        writeln!(self.out, "  </body>")?;
        writeln!(self.out, "</opml>")
    }

    fn open(&mut self, outline: &Outline, id: NodeId) -> io::Result<()> {
        let node = &outline[id];
        let indent = "  ".repeat(self.depth);
        let mut attrs = format!(" text=\"{}\"", escape(&node.name));
        if let Some(path) = &node.path {
            attrs.push_str(&format!(" path=\"{}\"", escape(path)));
        }
        if node.flagged() == Some(true) {
            attrs.push_str(" flagged=\"true\"");
        }
        if let Some(done) = node.date_completed() {
            attrs.push_str(&format!(" done=\"{}\"", done.format(DATE_FORMAT)));
        }
        if let Some(start) = node.date_to_start() {
            attrs.push_str(&format!(" start=\"{}\"", start.format(DATE_FORMAT)));
        }
        if let Some(due) = node.date_due() {
            attrs.push_str(&format!(" due=\"{}\"", due.format(DATE_FORMAT)));
        }
        if let Some(context) = node.context() {
            attrs.push_str(&format!(" context=\"{}\"", escape(&outline[context].name)));
        }
        if let Some(note) = &node.note {
            attrs.push_str(&format!(" _note=\"{}\"", escape_note(note)));
        }
        writeln!(self.out, "{indent}<outline{attrs}>")?;
        self.depth += 1;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.depth -= 1;
        let indent = "  ".repeat(self.depth);
        writeln!(self.out, "{indent}</outline>")
    }
}

impl<W: Write> Visitor for OpmlFormatter<W> {
    fn begin_any(&mut self, outline: &mut Outline, id: NodeId) -> io::Result<()> {
        self.open(outline, id)
    }

    fn end_any(&mut self, _outline: &mut Outline, _id: NodeId) -> io::Result<()> {
        self.close()
    }
}

fn escape(val: &str) -> String {
    val.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_note(note: &str) -> String {
    note.lines().map(escape).collect::<Vec<_>>().join("&#10;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectInfo, TaskInfo};
    use crate::output::{Format, render};
    use crate::traverse::Mode;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a & b <c> \"d\""), "a &amp; b &lt;c&gt; &quot;d&quot;");
    }

    #[test]
    fn test_opml_document() {
        let mut outline = Outline::new();
        let folder = outline.add_folder("R&D");
        let project = outline.add_project("Ship", ProjectInfo::default());
        let task = outline.add_task(
            "tag <release>",
            TaskInfo {
                date_due: Some("2013-04-15".parse().unwrap()),
                ..Default::default()
            },
        );
        outline.attach(folder, project);
        outline.attach(project, task);
        outline[task].note = Some("first line\nsecond line".to_string());
        let roots = vec![folder];

        let mut buf = Vec::new();
        render(&mut outline, &roots, Mode::Project, Format::Opml, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("<?xml version=\"1.0\""));
        assert!(text.contains("<outline text=\"R&amp;D\">"));
        assert!(text.contains("text=\"tag &lt;release&gt;\""));
        assert!(text.contains("due=\"2013-04-15\""));
        assert!(text.contains("_note=\"first line&#10;second line\""));
        assert!(text.trim_end().ends_with("</opml>"));

        // Every open tag is closed.
        assert_eq!(text.matches("<outline").count(), 3);
        assert_eq!(text.matches("</outline>").count(), 3);
    }
}
