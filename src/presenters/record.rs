//! Record presenter: a heading with the type name over a table of fields.

use super::serialize_value;
use crate::memo::{Presenter, Scope};
use crate::value::Value;
use crate::view::Element;

/// Shows a value as its type name and a `field: value` row per attribute.
///
/// This is also the fallback for shapes without named attributes: they get
/// their type name and an empty table instead of an error.
pub struct RecordPresenter {
    value: Value,
}

impl Presenter for RecordPresenter {
    type Args = Value;

    fn new(value: Value) -> Self {
        Self { value }
    }

    fn update(&mut self, value: Value) {
        self.value = value;
    }

    fn render(&self, scope: &mut Scope<'_>) -> Element {
        let rows = match self.value.as_record() {
            Some(record) => record
                .fields()
                .iter()
                .map(|(name, field)| Element::row(name.clone(), serialize_value(scope, name, field)))
                .collect(),
            None => Vec::new(),
        };

        Element::Stack(vec![
            Element::heading(3, self.value.type_name()),
            Element::Table(rows),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memo::{MemoCache, Token};

    fn render(cache: &mut MemoCache, value: Value) -> String {
        let slot = cache.reconcile(RecordPresenter::memoize(Token::root("record"), value));
        cache.resolve(&slot).to_string()
    }

    #[test]
    fn fields_are_listed_by_name() {
        let mut cache = MemoCache::default();
        let todo = Value::record(
            "Todo",
            [("title", Value::from("docs")), ("done", Value::from(false))],
        );

        assert_eq!(
            render(&mut cache, todo),
            "### Todo\ndone: `false`\ntitle: `\"docs\"`"
        );
    }

    #[test]
    fn nested_composites_start_collapsed() {
        let mut cache = MemoCache::default();
        let list = Value::record("List", [("items", Value::from(vec![1, 2, 3]))]);

        assert_eq!(render(&mut cache, list), "### List\nitems: [ [3 items] ]");
        assert!(cache.contains(&Token::root("record").child("items")));
    }

    #[test]
    fn unknown_shapes_degrade_to_an_empty_table() {
        let mut cache = MemoCache::default();
        assert_eq!(render(&mut cache, Value::from(7)), "### Integer");
        assert_eq!(render(&mut cache, Value::from(vec![1])), "### Sequence");
    }

    #[test]
    fn field_names_containing_separators_stay_distinct() {
        let mut cache = MemoCache::default();
        let outer = Value::record(
            "Outer",
            [
                (
                    "a",
                    Value::record("Inner", [("b", Value::from(vec![1, 2, 3]))]),
                ),
                (
                    "a/b",
                    Value::mapping([(Value::from("k"), Value::from(1))]),
                ),
            ],
        );

        let first = render(&mut cache, outer.clone());
        let second = render(&mut cache, outer);

        assert_eq!(
            first,
            "### Outer\na:\n  ### Inner\n  b: [ [3 items] ]\na/b: { [1 key] }"
        );
        assert_eq!(first, second);
        assert_eq!(cache.stats().built, 4);
    }

    #[test]
    fn same_record_is_not_rendered_twice() {
        let mut cache = MemoCache::default();
        let point = Value::record("Point", [("x", Value::from(1))]);

        render(&mut cache, point.clone());
        render(&mut cache, point);

        assert_eq!(cache.stats().built, 1);
        assert_eq!(cache.stats().reused, 1);
    }
}
