//! Output formatters
//!
//! Each formatter is a [`Visitor`](crate::traverse::Visitor) that serializes
//! nodes on its begin hooks, keeping an indentation depth that grows on
//! begin and shrinks on end. The traversal engine supplies marking semantics
//! and ordering; formatters only own syntax and escaping.
//!
//! - `text` - tab-indented plain text
//! - `markdown` - headings for containers, check-list items for tasks
//! - `taskpaper` - TaskPaper projects and `@tag` annotations
//! - `opml` - nested OPML `<outline>` elements

mod markdown;
mod opml;
mod taskpaper;
mod text;

use std::io;
use std::path::Path;

pub use markdown::MarkdownFormatter;
pub use opml::OpmlFormatter;
pub use taskpaper::TaskpaperFormatter;
pub use text::TextFormatter;

use crate::model::{Kind, Node, NodeId, Outline};
use crate::traverse::{Mode, traverse_list};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Markdown,
    Taskpaper,
    Opml,
}

impl Format {
    /// Infer the format from an output file name suffix.
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "txt" | "text" => Some(Format::Text),
            "md" | "markdown" | "ft" => Some(Format::Markdown),
            "tp" | "taskpaper" => Some(Format::Taskpaper),
            "opml" => Some(Format::Opml),
            _ => None,
        }
    }
}

/// Render the surviving forest with the chosen formatter.
///
/// This is the terminal pass of an export: one more traversal over roots
/// that filters and transforms have already shaped.
pub fn render<W: io::Write>(
    outline: &mut Outline,
    roots: &[NodeId],
    mode: Mode,
    format: Format,
    out: &mut W,
) -> io::Result<()> {
    match format {
        Format::Text => {
            let mut formatter = TextFormatter::new(&mut *out);
            traverse_list(&mut formatter, outline, roots, false, mode)
        }
        Format::Markdown => {
            let mut formatter = MarkdownFormatter::new(&mut *out);
            traverse_list(&mut formatter, outline, roots, false, mode)
        }
        Format::Taskpaper => {
            let mut formatter = TaskpaperFormatter::new(&mut *out);
            traverse_list(&mut formatter, outline, roots, false, mode)
        }
        Format::Opml => {
            let mut formatter = OpmlFormatter::new(&mut *out);
            formatter.write_header()?;
            traverse_list(&mut formatter, outline, roots, false, mode)?;
            formatter.write_footer()
        }
    }
}

/// Node name prefixed with the path the flatten pass recorded, if any.
pub(crate) fn qualified_name(node: &Node) -> String {
    match &node.path {
        Some(path) => format!("{path} : {}", node.name),
        None => node.name.clone(),
    }
}

/// Nearest project ancestor of a task, for context-mode back-references.
pub(crate) fn owning_project(outline: &Outline, id: NodeId) -> Option<NodeId> {
    let mut cursor = outline[id].parent;
    while let Some(pid) = cursor {
        if outline[pid].kind() == Kind::Project {
            return Some(pid);
        }
        cursor = outline[pid].parent;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProjectInfo, TaskInfo};

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            Format::from_extension(Path::new("out.md")),
            Some(Format::Markdown)
        );
        assert_eq!(
            Format::from_extension(Path::new("out.taskpaper")),
            Some(Format::Taskpaper)
        );
        assert_eq!(Format::from_extension(Path::new("out.ics")), None);
        assert_eq!(Format::from_extension(Path::new("out")), None);
    }

    #[test]
    fn test_owning_project() {
        let mut outline = Outline::new();
        let project = outline.add_project("P", ProjectInfo::default());
        let task = outline.add_task("t", TaskInfo::default());
        let sub = outline.add_task("s", TaskInfo::default());
        outline.attach(project, task);
        outline.attach(task, sub);

        assert_eq!(owning_project(&outline, sub), Some(project));
        assert_eq!(owning_project(&outline, project), None);
    }
}
