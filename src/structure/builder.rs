//! Page tree construction.

use crate::model::{Node, Page};

use super::classifier::{classify, Level};
use super::cleaner::clean;
use super::{Fragment, StructureOptions};

/// A heading still receiving children. Owned by the builder until the
/// next heading of equal or higher rank (or the end of the page) closes
/// it, at which point it is attached to its parent.
#[derive(Debug)]
struct OpenHeading {
    title: String,
    children: Vec<Node>,
}

impl OpenHeading {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            children: Vec::new(),
        }
    }

    fn into_section(self) -> Node {
        Node::Section {
            title: self.title,
            content: self.children,
        }
    }

    fn into_subsection(self) -> Node {
        Node::Subsection {
            title: self.title,
            content: self.children,
        }
    }
}

/// Incremental builder for one page's structure tree.
///
/// Holds at most one open section and one open subsection at a time.
/// Body lines accumulate in a paragraph buffer that flushes into the
/// innermost open container when a heading arrives or the page ends, so
/// contiguous prose always lands in a single paragraph node.
pub struct HierarchyBuilder<'a> {
    options: &'a StructureOptions,
    page: Page,
    open_section: Option<OpenHeading>,
    open_subsection: Option<OpenHeading>,
    paragraph: String,
}

impl<'a> HierarchyBuilder<'a> {
    /// Start building a page.
    pub fn new(page_number: u32, options: &'a StructureOptions) -> Self {
        Self {
            options,
            page: Page::new(page_number),
            open_section: None,
            open_subsection: None,
            paragraph: String::new(),
        }
    }

    /// Feed one fragment: clean its text and process every surviving
    /// line at the fragment's font size.
    pub fn push(&mut self, fragment: &Fragment) {
        for line in clean(&fragment.text) {
            self.accept(&line, fragment.font_size);
        }
    }

    /// Flush the trailing paragraph, close open headings, and return
    /// the finished page.
    pub fn finish(mut self) -> Page {
        self.flush_paragraph();
        self.close_subsection();
        self.close_section();
        self.page
    }

    fn accept(&mut self, line: &str, font_size: f32) {
        match classify(line, font_size, self.options) {
            Level::Body => {
                if !self.paragraph.is_empty() {
                    self.paragraph.push(' ');
                }
                self.paragraph.push_str(line);
            }
            Level::Section => {
                self.flush_paragraph();
                self.close_subsection();
                self.close_section();
                self.open_section = Some(OpenHeading::new(line));
            }
            Level::Subsection => {
                self.flush_paragraph();
                self.close_subsection();
                self.open_subsection = Some(OpenHeading::new(line));
            }
        }
    }

    /// Flush the paragraph buffer into the innermost open container:
    /// subsection if open, else section, else the page root. A buffer
    /// holding no text is a no-op.
    fn flush_paragraph(&mut self) {
        let buffered = std::mem::take(&mut self.paragraph);
        let text = buffered.trim();
        if text.is_empty() {
            return;
        }

        let paragraph = Node::paragraph(text);
        if let Some(subsection) = self.open_subsection.as_mut() {
            subsection.children.push(paragraph);
        } else if let Some(section) = self.open_section.as_mut() {
            section.children.push(paragraph);
        } else {
            self.page.push(paragraph);
        }
    }

    /// Attach the open subsection to its parent. The parent is the open
    /// section when one exists, the page root otherwise; the section
    /// slot cannot have changed while the subsection was open.
    fn close_subsection(&mut self) {
        if let Some(subsection) = self.open_subsection.take() {
            let node = subsection.into_subsection();
            if let Some(section) = self.open_section.as_mut() {
                section.children.push(node);
            } else {
                self.page.push(node);
            }
        }
    }

    fn close_section(&mut self) {
        if let Some(section) = self.open_section.take() {
            self.page.push(section.into_section());
        }
    }
}
