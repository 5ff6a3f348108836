//! Sequence presenter with segmented rendering of large sequences.
//!
//! Expanding a sequence longer than the segment size shows one collapsed
//! segment per window instead of every item, so the cost of expanding a
//! huge sequence is bounded by the segments the operator actually opens.

use super::serialize_value;
use crate::memo::{Identity, Presenter, Scope};
use crate::value::Value;
use crate::view::{Command, Element};
use std::ops::Range;
use std::rc::Rc;

/// Consecutive windows of at most `size` indices covering `0..len`.
///
/// ```rust
/// use rewind::presenters::segment_ranges;
///
/// assert_eq!(segment_ranges(250, 100), vec![0..100, 100..200, 200..250]);
/// assert!(segment_ranges(0, 100).is_empty());
/// ```
pub fn segment_ranges(len: usize, size: usize) -> Vec<Range<usize>> {
    let size = size.max(1);
    (0..len)
        .step_by(size)
        .map(|start| start..(start + size).min(len))
        .collect()
}

pub struct SequencePresenter {
    items: Rc<[Value]>,
    show_contents: bool,
}

impl Presenter for SequencePresenter {
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
        let token = scope.token().clone();
        let label = if self.show_contents {
            "-".to_string()
        } else {
            format!("{} items", self.items.len())
        };

        let mut parts = vec![
            Element::text("["),
            Element::button(label, Command::Toggle(token.clone())),
        ];

        if self.show_contents {
            let size = scope.segment_size();
            let body = if self.items.len() > size {
                segment_ranges(self.items.len(), size)
                    .into_iter()
                    .enumerate()
                    .map(|(index, range)| {
                        let open = index == 0 && range.len() < size;
                        let window = Window {
                            items: Rc::clone(&self.items),
                            range,
                            open,
                        };
                        scope.child(SegmentPresenter::memoize(
                            token.child(format!("segment-{index}")),
                            window,
                        ))
                    })
                    .collect()
            } else {
                self.items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| serialize_value(scope, index, item))
                    .collect()
            };
            parts.push(Element::Indent(body));
        }

        parts.push(Element::text("]"));
        Element::Inline(parts)
    }

    fn toggle(&mut self) {
        self.show_contents = !self.show_contents;
    }
}

/// A window of a shared sequence shown by one segment.
#[derive(Clone, Debug)]
pub struct Window {
    pub items: Rc<[Value]>,
    pub range: Range<usize>,
    /// Whether a newly built segment starts expanded.
    pub open: bool,
}

impl Window {
    fn items(&self) -> &[Value] {
        self.items.get(self.range.clone()).unwrap_or_default()
    }
}

impl Identity for Window {
    // `open` only seeds a new segment; it does not make a segment stale.
    fn same(&self, other: &Self) -> bool {
        self.items.same(&other.items) && self.range == other.range
    }
}

/// One independently expandable window of a large sequence.
pub struct SegmentPresenter {
    window: Window,
    open: bool,
}

impl Presenter for SegmentPresenter {
    type Args = Window;

    fn new(window: Window) -> Self {
        Self {
            open: window.open,
            window,
        }
    }

    fn update(&mut self, window: Window) {
        self.window = window;
    }

    fn render(&self, scope: &mut Scope<'_>) -> Element {
        let toggle = Command::Toggle(scope.token().clone());
        if !self.open {
            let Range { start, end } = self.window.range;
            return Element::button(format!("{start}...{end}"), toggle);
        }

        let start = self.window.range.start;
        let mut parts = vec![Element::button("-", toggle)];
        parts.extend(
            self.window
                .items()
                .iter()
                .enumerate()
                .map(|(offset, item)| serialize_value(scope, start + offset, item)),
        );
        Element::Stack(parts)
    }

    fn toggle(&mut self) {
        self.open = !self.open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memo::{MemoCache, Token};

    fn numbers(len: usize) -> Rc<[Value]> {
        (0..len).map(Value::from).collect()
    }

    fn root() -> Token {
        Token::root("list")
    }

    fn render(cache: &mut MemoCache, items: &Rc<[Value]>) -> Element {
        let slot = cache.reconcile(SequencePresenter::memoize(root(), Rc::clone(items)));
        cache.resolve(&slot)
    }

    #[test]
    fn ranges_cover_the_sequence() {
        assert_eq!(
            segment_ranges(357, 100),
            vec![0..100, 100..200, 200..300, 300..357]
        );
        assert_eq!(segment_ranges(100, 100), vec![0..100]);
        assert_eq!(segment_ranges(3, 0), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn collapsed_sequence_shows_item_count() {
        let mut cache = MemoCache::default();
        let items = numbers(3);

        assert_eq!(render(&mut cache, &items).to_string(), "[ [3 items] ]");
    }

    #[test]
    fn small_sequence_expands_to_flat_items() {
        let mut cache = MemoCache::default();
        let items = numbers(2);

        render(&mut cache, &items);
        assert!(cache.toggle(&root()));

        assert_eq!(
            render(&mut cache, &items).to_string(),
            "[ [-]\n  `0`\n  `1`\n]"
        );
    }

    #[test]
    fn large_sequence_expands_to_collapsed_segments() {
        let mut cache = MemoCache::default();
        let items = numbers(357);

        render(&mut cache, &items);
        assert!(cache.toggle(&root()));
        let tree = render(&mut cache, &items);

        let labels: Vec<&str> = tree.buttons().into_iter().map(|(label, _)| label).collect();
        assert_eq!(
            labels,
            vec!["-", "0...100", "100...200", "200...300", "300...357"]
        );
        assert!(tree.literals().is_empty());
    }

    #[test]
    fn only_toggled_segments_render_items() {
        let mut cache = MemoCache::default();
        let items = numbers(357);

        render(&mut cache, &items);
        cache.toggle(&root());
        render(&mut cache, &items);
        assert!(cache.toggle(&root().child("segment-3")));

        let tree = render(&mut cache, &items);
        let literals = tree.literals();
        assert_eq!(literals.len(), 57);
        assert_eq!(literals.first().map(String::as_str), Some("300"));
        assert_eq!(literals.last().map(String::as_str), Some("356"));
        assert!(tree.find_button("300...357").is_none());
    }

    #[test]
    fn segment_state_survives_a_new_sequence_with_same_window() {
        let mut cache = MemoCache::default();
        let items = numbers(150);
        let token = root().child("segment-1");
        let window = |open| Window {
            items: Rc::clone(&items),
            range: 100..150,
            open,
        };

        cache.reconcile(SegmentPresenter::memoize(token.clone(), window(false)));
        cache.toggle(&token);
        cache.reconcile(SegmentPresenter::memoize(token.clone(), window(false)));

        assert_eq!(cache.stats().reused, 1);
        let output = cache.resolve(&Element::Slot(token)).to_string();
        assert!(output.starts_with("[-]\n`100`"));
    }

    #[test]
    fn partial_first_window_starts_open() {
        let mut cache = MemoCache::new(10);
        let items = numbers(4);
        let window = Window {
            items: Rc::clone(&items),
            range: 0..4,
            open: true,
        };

        let slot = cache.reconcile(SegmentPresenter::memoize(root(), window));
        assert_eq!(cache.resolve(&slot).literals().len(), 4);
    }
}
