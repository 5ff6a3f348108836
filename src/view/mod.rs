//! Render output handed to the host.
//!
//! Presenters describe what to show as an [`Element`] tree. Operator
//! interactions are plain data ([`Command`]) attached to buttons; the host
//! sends them back to the panel when a button is pressed.

mod text;

use crate::core::TransitionId;
use crate::memo::Token;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An operator interaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "command", content = "target", rename_all = "snake_case")]
pub enum Command {
    /// Open the panel
    Open,
    /// Close the panel
    Close,
    /// Expand or collapse the presenter bound to the token
    Toggle(Token),
    /// Rewind to the state after the transition
    Commit(TransitionId),
    /// Delete the transition and replay the rest
    Delete(TransitionId),
}

/// One `label: value` row of a table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableRow {
    pub label: String,
    pub value: Element,
}

/// A node of the render tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Element {
    Empty,
    Text(String),
    /// An inline literal token.
    Code(String),
    Heading {
        level: u8,
        text: String,
    },
    Button {
        label: String,
        command: Command,
    },
    /// Children laid out on one line.
    Inline(Vec<Element>),
    /// Children laid out one per line.
    Stack(Vec<Element>),
    /// Children laid out one per line, one level deeper.
    Indent(Vec<Element>),
    Table(Vec<TableRow>),
    /// Output of the memoized presenter bound to the token, filled in by
    /// [`MemoCache::resolve`](crate::memo::MemoCache::resolve).
    Slot(Token),
}

impl Element {
    pub fn text(text: impl Into<String>) -> Self {
        Element::Text(text.into())
    }

    pub fn code(text: impl Into<String>) -> Self {
        Element::Code(text.into())
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Element::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn button(label: impl Into<String>, command: Command) -> Self {
        Element::Button {
            label: label.into(),
            command,
        }
    }

    pub fn row(label: impl Into<String>, value: Element) -> TableRow {
        TableRow {
            label: label.into(),
            value,
        }
    }

    /// Tokens of the slots in this tree, in document order.
    ///
    /// Does not look inside the slots themselves.
    pub fn slots(&self) -> Vec<Token> {
        let mut slots = Vec::new();
        self.walk(&mut |element| {
            if let Element::Slot(token) = element {
                slots.push(token.clone());
            }
        });
        slots
    }

    /// Every button in this tree as `(label, command)`, in document order.
    pub fn buttons(&self) -> Vec<(&str, &Command)> {
        let mut buttons = Vec::new();
        self.walk_ref(&mut buttons);
        buttons
    }

    /// First button whose label matches.
    pub fn find_button(&self, label: &str) -> Option<&Command> {
        self.buttons()
            .into_iter()
            .find(|(text, _)| *text == label)
            .map(|(_, command)| command)
    }

    /// Text of every inline literal token, in document order.
    pub fn literals(&self) -> Vec<String> {
        let mut literals = Vec::new();
        self.walk(&mut |element| {
            if let Element::Code(text) = element {
                literals.push(text.clone());
            }
        });
        literals
    }

    fn children(&self) -> Vec<&Element> {
        match self {
            Element::Inline(children) | Element::Stack(children) | Element::Indent(children) => {
                children.iter().collect()
            }
            Element::Table(rows) => rows.iter().map(|row| &row.value).collect(),
            _ => Vec::new(),
        }
    }

    fn walk(&self, visit: &mut dyn FnMut(&Element)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    fn walk_ref<'a>(&'a self, buttons: &mut Vec<(&'a str, &'a Command)>) {
        if let Element::Button { label, command } = self {
            buttons.push((label.as_str(), command));
        }
        for child in self.children() {
            child.walk_ref(buttons);
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&text::layout(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::Stack(vec![
            Element::Inline(vec![
                Element::text("["),
                Element::button("2 items", Command::Toggle(Token::root("list"))),
                Element::text("]"),
            ]),
            Element::Table(vec![
                Element::row("a", Element::code("1")),
                Element::row("b", Element::Slot(Token::root("nested"))),
            ]),
        ])
    }

    #[test]
    fn buttons_are_listed_in_order() {
        let element = sample();
        let buttons = element.buttons();

        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].0, "2 items");
        assert_eq!(
            element.find_button("2 items"),
            Some(&Command::Toggle(Token::root("list")))
        );
        assert_eq!(element.find_button("missing"), None);
    }

    #[test]
    fn slots_and_literals_are_collected() {
        let element = sample();
        assert_eq!(element.slots(), vec![Token::root("nested")]);
        assert_eq!(element.literals(), vec!["1".to_string()]);
    }

    #[test]
    fn commands_serialize_as_tagged_data() {
        let json = serde_json::to_string(&Command::Commit(TransitionId(4))).unwrap();
        assert_eq!(json, r#"{"command":"commit","target":4}"#);

        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Command::Commit(TransitionId(4)));

        let open: Command = serde_json::from_str(r#"{"command":"open"}"#).unwrap();
        assert_eq!(open, Command::Open);
    }

    #[test]
    fn elements_serialize_for_hosts() {
        let json = serde_json::to_value(Element::code("42")).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "code", "content": "42"}));
    }
}
