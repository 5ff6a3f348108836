use super::serialize_value;
use crate::memo::{Presenter, Scope};
use crate::value::Value;
use crate::view::{Command, Element};
use std::rc::Rc;

/// Shows an unordered collection of distinct elements as `Set[ ... ]`.
pub struct SetPresenter {
    items: Rc<[Value]>,
    show_contents: bool,
}

impl Presenter for SetPresenter {
    type Args = Rc<[Value]>;

    fn new(items: Rc<[Value]>) -> Self {
        Self {
            items,
            show_contents: false,
        }
    }

    fn update(&mut self, items: Rc<[Value]>) {
        self.items = items;
    }

    fn render(&self, scope: &mut Scope<'_>) -> Element {
        let label = if self.show_contents {
            "-".to_string()
        } else {
            format!("{} items", self.items.len())
        };
        let mut parts = vec![
            Element::text("Set["),
            Element::button(label, Command::Toggle(scope.token().clone())),
        ];

        if self.show_contents {
            let items = self
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| serialize_value(scope, index, item))
                .collect();
            parts.push(Element::Indent(items));
        }

        parts.push(Element::text("]"));
        Element::Inline(parts)
    }

    fn toggle(&mut self) {
        self.show_contents = !self.show_contents;
    }
}
