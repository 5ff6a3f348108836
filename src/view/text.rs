//! Plain-text layout of a render tree.
//!
//! Deterministic: the same tree always produces the same bytes. Inline
//! children share a line, stacked children get their own lines, and nested
//! blocks are indented by two spaces per level. Buttons are shown as
//! `[label]`, literal tokens as `` `literal` ``.

use super::Element;

pub(super) fn layout(element: &Element) -> String {
    let mut writer = Writer::default();
    writer.write(element);
    writer.finish()
}

#[derive(Default)]
struct Writer {
    lines: Vec<String>,
    current: String,
    current_depth: usize,
    depth: usize,
}

impl Writer {
    fn atom(&mut self, text: &str) {
        if self.current.is_empty() {
            self.current_depth = self.depth;
        } else {
            self.current.push(' ');
        }
        self.current.push_str(text);
    }

    fn break_line(&mut self) {
        if !self.current.is_empty() {
            let line = format!("{}{}", "  ".repeat(self.current_depth), self.current);
            self.lines.push(line);
            self.current.clear();
        }
    }

    fn nested(&mut self, children: &[Element]) {
        self.break_line();
        self.depth += 1;
        for child in children {
            self.write(child);
            self.break_line();
        }
        self.depth -= 1;
    }

    fn write(&mut self, element: &Element) {
        match element {
            Element::Empty => {}
            Element::Text(text) => self.atom(text),
            Element::Code(text) => self.atom(&format!("`{text}`")),
            Element::Heading { level, text } => {
                self.break_line();
                let marker = "#".repeat(usize::from(*level).max(1));
                self.atom(&format!("{marker} {text}"));
                self.break_line();
            }
            Element::Button { label, .. } => self.atom(&format!("[{label}]")),
            Element::Inline(children) => {
                for child in children {
                    self.write(child);
                }
            }
            Element::Stack(children) => {
                self.break_line();
                for child in children {
                    self.write(child);
                    self.break_line();
                }
            }
            Element::Indent(children) => self.nested(children),
            Element::Table(rows) => {
                self.break_line();
                for row in rows {
                    self.atom(&format!("{}:", row.label));
                    self.depth += 1;
                    self.write(&row.value);
                    self.depth -= 1;
                    self.break_line();
                }
            }
            Element::Slot(token) => self.atom(&format!("<{token}>")),
        }
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.lines.join("\n")
    }
}
