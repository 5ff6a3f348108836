use super::RecordPresenter;
use crate::core::{Inspect, Transition};
use crate::memo::{Presenter, Scope};
use crate::view::{Command, Element};
use std::rc::Rc;

/// One row of the dispatch list.
///
/// The header carries the expand toggle, the commit (`!`) and delete (`x`)
/// controls, and the action's type name. The controls name the transition
/// by id; the panel turns the id back into a log position when pressed.
pub struct DispatchPresenter<S, A> {
    transition: Rc<Transition<S, A>>,
    show_contents: bool,
}

impl<S: Inspect, A: Inspect> Presenter for DispatchPresenter<S, A> {
    type Args = Rc<Transition<S, A>>;

    fn new(transition: Rc<Transition<S, A>>) -> Self {
        Self {
            transition,
            show_contents: false,
        }
    }

    fn update(&mut self, transition: Rc<Transition<S, A>>) {
        self.transition = transition;
    }

    fn render(&self, scope: &mut Scope<'_>) -> Element {
        let token = scope.token().clone();
        let id = self.transition.id;

        let header = Element::Inline(vec![
            Element::button(
                if self.show_contents { "-" } else { "+" },
                Command::Toggle(token.clone()),
            ),
            Element::button("!", Command::Commit(id)),
            Element::button("x", Command::Delete(id)),
            Element::text(self.transition.action.type_name()),
        ]);

        if !self.show_contents {
            return Element::Stack(vec![header]);
        }

        let details = Element::Table(vec![
            Element::row(
                "Action",
                scope.child(RecordPresenter::memoize(
                    token.child("action"),
                    self.transition.action.inspect(),
                )),
            ),
            Element::row(
                "Before",
                scope.child(RecordPresenter::memoize(
                    token.child("before"),
                    self.transition.before.inspect(),
                )),
            ),
            Element::row(
                "After",
                scope.child(RecordPresenter::memoize(
                    token.child("after"),
                    self.transition.after.inspect(),
                )),
            ),
        ]);
        Element::Stack(vec![header, details])
    }

    fn toggle(&mut self) {
        self.show_contents = !self.show_contents;
    }
}
