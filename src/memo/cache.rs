//! Memoized presenter instances keyed by identity token.
//!
//! Each render pass describes presenters as [`Placeholder`]s. The cache
//! matches every placeholder against the instance bound to the same token in
//! an earlier pass:
//! - no instance (or one of another kind): build a new one and render it
//! - same arguments, no override: reuse it untouched, keeping its output
//! - otherwise: update it in place with the new arguments and re-render
//!
//! An instance owns only its own output. Children appear in it as
//! [`Element::Slot`] references, so an instance that re-renders on its own
//! (after an operator toggle) does not invalidate its ancestors.

use super::identity::Identity;
use super::token::Token;
use crate::view::Element;
use std::any::{type_name, Any};
use std::collections::{HashMap, HashSet};

/// Default number of elements per segment of a large sequence.
pub const DEFAULT_SEGMENT_SIZE: usize = 100;

/// A stateful unit that renders one value.
///
/// Presenters own their UI-local state (such as an expanded flag). The
/// cache keeps that state alive across render passes for as long as the
/// same token keeps producing a node of the same presenter kind.
pub trait Presenter: Sized + 'static {
    /// Arguments the presenter is constructed from, compared by
    /// [`Identity`] to decide reuse.
    type Args: Identity + Clone + 'static;

    fn new(args: Self::Args) -> Self;

    /// Take new arguments while keeping local state.
    fn update(&mut self, args: Self::Args);

    fn render(&self, scope: &mut Scope<'_>) -> Element;

    /// Operator interaction. Default implementation does nothing.
    fn toggle(&mut self) {}

    /// Describe this presenter bound to `token`, without constructing it.
    fn memoize(token: Token, args: Self::Args) -> Placeholder<Self> {
        Placeholder::new(token, args)
    }
}

/// Description of a presenter to render: kind, identity token and
/// arguments. Creating one has no side effects.
pub struct Placeholder<P: Presenter> {
    token: Token,
    args: P::Args,
    force: bool,
}

impl<P: Presenter> Placeholder<P> {
    pub fn new(token: Token, args: P::Args) -> Self {
        Self {
            token,
            args,
            force: false,
        }
    }

    /// Re-render even if the arguments are identical to the previous pass.
    pub fn forced(mut self) -> Self {
        self.force = true;
        self
    }
}

/// Counters of reconciliation decisions since the cache was created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoStats {
    /// New instances constructed and rendered
    pub built: usize,
    /// Existing instances updated with new arguments and re-rendered
    pub updated: usize,
    /// Existing instances reused without any recomputation
    pub reused: usize,
    /// Instances re-rendered after an operator interaction
    pub refreshed: usize,
}

trait Mounted {
    fn render(&self, scope: &mut Scope<'_>) -> Element;
    fn toggle(&mut self);
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

struct Instance<P: Presenter> {
    args: P::Args,
    presenter: P,
}

impl<P: Presenter> Mounted for Instance<P> {
    fn render(&self, scope: &mut Scope<'_>) -> Element {
        self.presenter.render(scope)
    }

    fn toggle(&mut self) {
        self.presenter.toggle();
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct Entry {
    kind: &'static str,
    instance: Box<dyn Mounted>,
    output: Element,
}

/// Render context handed to a presenter: its own token and access to the
/// cache for its children.
pub struct Scope<'a> {
    cache: &'a mut MemoCache,
    token: &'a Token,
}

impl Scope<'_> {
    /// Token of the presenter being rendered.
    pub fn token(&self) -> &Token {
        self.token
    }

    pub fn segment_size(&self) -> usize {
        self.cache.segment_size
    }

    /// Reconcile a child presenter and return the slot standing for it.
    pub fn child<P: Presenter>(&mut self, node: Placeholder<P>) -> Element {
        self.cache.reconcile(node)
    }
}

/// Previous-pass bindings from tokens to presenter instances.
///
/// # Example
///
/// ```rust
/// use rewind::memo::{MemoCache, Presenter, Scope, Token};
/// use rewind::view::Element;
/// use std::rc::Rc;
///
/// struct Greeting {
///     name: Rc<str>,
/// }
///
/// impl Presenter for Greeting {
///     type Args = Rc<str>;
///
///     fn new(name: Rc<str>) -> Self {
///         Greeting { name }
///     }
///
///     fn update(&mut self, name: Rc<str>) {
///         self.name = name;
///     }
///
///     fn render(&self, _scope: &mut Scope<'_>) -> Element {
///         Element::text(format!("hello {}", self.name))
///     }
/// }
///
/// let mut cache = MemoCache::default();
/// let name: Rc<str> = Rc::from("ada");
///
/// let slot = cache.reconcile(Greeting::memoize(Token::root("greeting"), Rc::clone(&name)));
/// cache.reconcile(Greeting::memoize(Token::root("greeting"), name));
///
/// assert_eq!(cache.resolve(&slot), Element::text("hello ada"));
/// assert_eq!(cache.stats().built, 1);
/// assert_eq!(cache.stats().reused, 1);
/// ```
pub struct MemoCache {
    entries: HashMap<Token, Entry>,
    segment_size: usize,
    stats: MemoStats,
}

impl Default for MemoCache {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENT_SIZE)
    }
}

impl MemoCache {
    /// Create an empty cache. `segment_size` is the pagination window
    /// presenters read through [`Scope::segment_size`].
    pub fn new(segment_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            segment_size,
            stats: MemoStats::default(),
        }
    }

    /// Resolve a placeholder against the instance previously bound to its
    /// token, and return the slot standing for its output.
    pub fn reconcile<P: Presenter>(&mut self, node: Placeholder<P>) -> Element {
        let Placeholder { token, args, force } = node;

        let previous = self
            .entries
            .get_mut(&token)
            .and_then(|entry| entry.instance.as_any_mut().downcast_mut::<Instance<P>>());

        match previous {
            Some(instance) if !force && instance.args.same(&args) => {
                self.stats.reused += 1;
                tracing::trace!(token = %token, "Presenter reused");
            }
            Some(instance) => {
                instance.presenter.update(args.clone());
                instance.args = args;
                self.stats.updated += 1;
                tracing::trace!(token = %token, force, "Presenter updated");
                self.rerender(&token);
            }
            None => {
                self.build::<P>(token.clone(), args);
            }
        }

        Element::Slot(token)
    }

    /// Apply an operator toggle to the instance bound to `token` and
    /// re-render it in place.
    ///
    /// Returns `false` if no instance is bound to the token.
    pub fn toggle(&mut self, token: &Token) -> bool {
        match self.entries.get_mut(token) {
            Some(entry) => {
                entry.instance.toggle();
                self.stats.refreshed += 1;
                tracing::trace!(token = %token, "Presenter toggled");
                self.rerender(token);
                true
            }
            None => false,
        }
    }

    /// Expand every slot of `element` into the output bound to its token.
    ///
    /// Slots whose token has no instance resolve to [`Element::Empty`].
    pub fn resolve(&self, element: &Element) -> Element {
        match element {
            Element::Slot(token) => self
                .entries
                .get(token)
                .map_or(Element::Empty, |entry| self.resolve(&entry.output)),
            Element::Inline(children) => Element::Inline(self.resolve_all(children)),
            Element::Stack(children) => Element::Stack(self.resolve_all(children)),
            Element::Indent(children) => Element::Indent(self.resolve_all(children)),
            Element::Table(rows) => Element::Table(
                rows.iter()
                    .map(|row| Element::row(row.label.clone(), self.resolve(&row.value)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Drop every instance not reachable from `roots` through slots.
    ///
    /// Instances below a reused ancestor were not visited in the pass but
    /// are still reachable through the ancestor's output, so they stay.
    pub fn retain_reachable(&mut self, roots: &[Token]) {
        let mut live: HashSet<Token> = HashSet::new();
        let mut pending: Vec<Token> = roots.to_vec();

        while let Some(token) = pending.pop() {
            if let Some(entry) = self.entries.get(&token) {
                if live.insert(token) {
                    pending.extend(entry.output.slots());
                }
            }
        }

        let before = self.entries.len();
        self.entries.retain(|token, _| live.contains(token));
        let dropped = before - self.entries.len();
        if dropped > 0 {
            tracing::trace!(dropped, kept = self.entries.len(), "Dropped unreachable presenters");
        }
    }

    /// Kind of presenter bound to `token`.
    pub fn kind(&self, token: &Token) -> Option<&'static str> {
        self.entries.get(token).map(|entry| entry.kind)
    }

    pub fn contains(&self, token: &Token) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> MemoStats {
        self.stats
    }

    pub fn segment_size(&self) -> usize {
        self.segment_size
    }

    fn build<P: Presenter>(&mut self, token: Token, args: P::Args) {
        let instance: Box<dyn Mounted> = Box::new(Instance {
            presenter: P::new(args.clone()),
            args,
        });
        let output = instance.render(&mut Scope {
            cache: self,
            token: &token,
        });

        self.stats.built += 1;
        tracing::trace!(token = %token, kind = type_name::<P>(), "Presenter built");
        self.entries.insert(
            token,
            Entry {
                kind: type_name::<P>(),
                instance,
                output,
            },
        );
    }

    fn rerender(&mut self, token: &Token) {
        // The entry is out of the map while it renders, so its children can
        // be reconciled through the same cache.
        let Some(mut entry) = self.entries.remove(token) else {
            return;
        };
        entry.output = entry.instance.render(&mut Scope { cache: self, token });
        self.entries.insert(token.clone(), entry);
    }

    fn resolve_all(&self, children: &[Element]) -> Vec<Element> {
        children.iter().map(|child| self.resolve(child)).collect()
    }
}
