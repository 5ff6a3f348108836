use super::{count_label, serialize_value};
use crate::memo::{Presenter, Scope};
use crate::value::Value;
use crate::view::{Command, Element};
use std::rc::Rc;

/// Shows a key-unique mapping as `{ key => value ... }`.
///
/// Empty mappings have no toggle.
pub struct MappingPresenter {
    entries: Rc<[(Value, Value)]>,
    show_contents: bool,
}

impl Presenter for MappingPresenter {
    type Args = Rc<[(Value, Value)]>;

    fn new(entries: Rc<[(Value, Value)]>) -> Self {
        Self {
            entries,
            show_contents: false,
        }
    }

    fn update(&mut self, entries: Rc<[(Value, Value)]>) {
        self.entries = entries;
    }

    fn render(&self, scope: &mut Scope<'_>) -> Element {
        let mut parts = vec![Element::text("{")];

        if !self.entries.is_empty() {
            let label = if self.show_contents {
                "-".to_string()
            } else {
                count_label(self.entries.len(), "key", "keys")
            };
            parts.push(Element::button(label, Command::Toggle(scope.token().clone())));

            if self.show_contents {
                let rows = self
                    .entries
                    .iter()
                    .enumerate()
                    .map(|(index, (key, value))| {
                        Element::Inline(vec![
                            serialize_value(scope, format!("key-{index}"), key),
                            Element::text("=>"),
                            serialize_value(scope, format!("value-{index}"), value),
                        ])
                    })
                    .collect();
                parts.push(Element::Indent(rows));
            }
        }

        parts.push(Element::text("}"));
        Element::Inline(parts)
    }

    fn toggle(&mut self) {
        self.show_contents = !self.show_contents;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memo::{MemoCache, Token};

    fn render(cache: &mut MemoCache, entries: &Rc<[(Value, Value)]>) -> String {
        let slot = cache.reconcile(MappingPresenter::memoize(
            Token::root("map"),
            Rc::clone(entries),
        ));
        cache.resolve(&slot).to_string()
    }

    fn entries(pairs: &[(&str, i64)]) -> Rc<[(Value, Value)]> {
        pairs
            .iter()
            .map(|(key, value)| (Value::from(*key), Value::from(*value)))
            .collect()
    }

    #[test]
    fn key_count_is_pluralized() {
        let mut cache = MemoCache::default();
        assert_eq!(render(&mut cache, &entries(&[("a", 1)])), "{ [1 key] }");

        let mut cache = MemoCache::default();
        assert_eq!(
            render(&mut cache, &entries(&[("a", 1), ("b", 2)])),
            "{ [2 keys] }"
        );
    }

    #[test]
    fn empty_mapping_has_no_toggle() {
        let mut cache = MemoCache::default();
        assert_eq!(render(&mut cache, &entries(&[])), "{ }");
    }

    #[test]
    fn expanded_mapping_lists_entries() {
        let mut cache = MemoCache::default();
        let map = entries(&[("a", 1), ("b", 2)]);

        render(&mut cache, &map);
        assert!(cache.toggle(&Token::root("map")));

        assert_eq!(
            render(&mut cache, &map),
            "{ [-]\n  `\"a\"` => `1`\n  `\"b\"` => `2`\n}"
        );
    }

    #[test]
    fn composite_keys_and_values_get_their_own_tokens() {
        let mut cache = MemoCache::default();
        let map: Rc<[(Value, Value)]> = Rc::from(vec![(
            Value::from(vec![1]),
            Value::record("Point", [("x", Value::from(0))]),
        )]);

        render(&mut cache, &map);
        cache.toggle(&Token::root("map"));
        render(&mut cache, &map);

        assert!(cache.contains(&Token::root("map").child("key-0")));
        assert!(cache.contains(&Token::root("map").child("value-0")));
    }
}
