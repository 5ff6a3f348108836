//! Presenters for inspected values and recorded dispatches.
//!
//! [`serialize_value`] is the single switch of the recursive descent: every
//! composite presenter calls back into it for each child value it shows.

mod dispatch;
mod mapping;
mod record;
mod sequence;
mod set;

pub use dispatch::DispatchPresenter;
pub use mapping::MappingPresenter;
pub use record::RecordPresenter;
pub use sequence::{segment_ranges, SegmentPresenter, SequencePresenter, Window};
pub use set::SetPresenter;

use crate::memo::{Presenter, Scope};
use crate::value::Value;
use crate::view::Element;
use std::fmt;
use std::rc::Rc;

/// Render `value` as a child of the presenter owning `scope`.
///
/// Primitives become inline literal tokens and are never memoized. Composites
/// are memoized under the child token `key` of the current presenter.
pub fn serialize_value(scope: &mut Scope<'_>, key: impl fmt::Display, value: &Value) -> Element {
    match value {
        Value::Opaque(text) => Element::text(text.to_string()),
        Value::Sequence(items) => {
            let token = scope.token().child(key);
            scope.child(SequencePresenter::memoize(token, Rc::clone(items)))
        }
        Value::Mapping(entries) => {
            let token = scope.token().child(key);
            scope.child(MappingPresenter::memoize(token, Rc::clone(entries)))
        }
        Value::Set(items) => {
            let token = scope.token().child(key);
            scope.child(SetPresenter::memoize(token, Rc::clone(items)))
        }
        Value::Record(_) => {
            let token = scope.token().child(key);
            scope.child(RecordPresenter::memoize(token, value.clone()))
        }
        primitive => Element::code(primitive.literal()),
    }
}

/// Label of a collapsed collection toggle.
fn count_label(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
