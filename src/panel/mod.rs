//! The dev tools panel.
//!
//! A [`DevToolsPanel`] attaches to a [`Store`], records every dispatch in a
//! [`DispatchLog`], and renders the current state and the dispatch list
//! through the memoized presenters. Operator commands coming back from the
//! host rewind or edit the history.
//!
//! Every notification and every command triggers one full render pass,
//! synchronously, before returning.

mod config;
mod error;
mod host;

pub use config::{ConfigError, PanelBuilder, PanelConfig};
pub use error::PanelError;
pub use host::{HeadlessHost, RenderHost};

use crate::core::{Inspect, Transition, TransitionId};
use crate::log::{ChainViolation, DispatchLog};
use crate::memo::{MemoCache, MemoStats, Presenter, Token};
use crate::presenters::{DispatchPresenter, RecordPresenter};
use crate::store::{Store, Subscription};
use crate::view::{Command, Element};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Whether the panel shows its contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PanelStatus {
    #[default]
    Closed,
    Open,
}

const STATE_ROOT: &str = "state";
const DISPATCH_ROOT: &str = "dispatch";

struct PanelCore<S, A> {
    store: Store<S, A>,
    log: DispatchLog<S, A>,
    cache: MemoCache,
    status: PanelStatus,
    config: PanelConfig,
    host: Box<dyn RenderHost>,
    force_state: bool,
    renders: u64,
}

impl<S: Inspect, A: Inspect> PanelCore<S, A> {
    fn render(&mut self) -> Element {
        let root = match self.status {
            PanelStatus::Closed => {
                self.cache.retain_reachable(&[]);
                Element::Inline(vec![
                    Element::text(self.config.title.clone()),
                    Element::button("+", Command::Open),
                ])
            }
            PanelStatus::Open => self.render_open(),
        };

        let tree = self.cache.resolve(&root);
        self.renders += 1;
        self.host.mount(&tree);
        tree
    }

    fn render_open(&mut self) -> Element {
        let state_token = Token::root(STATE_ROOT);
        // The `Rc` impl of `Inspect` returns the same snapshot for an
        // unchanged state, and for every subtree the reducer shared.
        let state_value = self.store.state().inspect();
        let mut state_node = RecordPresenter::memoize(state_token.clone(), state_value);
        if std::mem::take(&mut self.force_state) {
            state_node = state_node.forced();
        }
        let state = self.cache.reconcile(state_node);

        let mut roots = vec![state_token];
        let mut dispatches = Vec::with_capacity(self.log.len());
        for transition in self.log.transitions() {
            let token = Token::root(DISPATCH_ROOT).child(transition.id.0);
            roots.push(token.clone());
            dispatches.push(
                self.cache
                    .reconcile(DispatchPresenter::memoize(token, Rc::clone(transition))),
            );
        }
        self.cache.retain_reachable(&roots);

        Element::Stack(vec![
            Element::Inline(vec![
                Element::text(self.config.title.clone()),
                Element::button("-", Command::Close),
            ]),
            Element::heading(2, "State"),
            state,
            Element::heading(2, "Actions"),
            Element::Stack(dispatches),
        ])
    }

    fn set_status(&mut self, status: PanelStatus) {
        if self.status != status {
            tracing::debug!(?status, "Panel status changed");
        }
        self.status = status;
        self.render();
    }

    fn commit(&mut self, id: TransitionId) -> Result<(), PanelError> {
        let index = self
            .log
            .position(id)
            .ok_or(PanelError::UnknownTransition(id))?;
        self.log.commit_to(index, &self.store);
        self.force_state = true;
        self.render();
        Ok(())
    }

    fn delete(&mut self, id: TransitionId) -> Result<(), PanelError> {
        let index = self
            .log
            .position(id)
            .ok_or(PanelError::UnknownTransition(id))?;
        self.log.delete_at(index, &self.store);
        self.force_state = true;
        self.render();
        Ok(())
    }

    fn toggle(&mut self, token: &Token) -> Result<(), PanelError> {
        if !self.cache.toggle(token) {
            return Err(PanelError::UnknownPresenter(token.clone()));
        }
        self.render();
        Ok(())
    }
}

/// Time-travel inspector attached to a store.
///
/// Dropping the panel unsubscribes it from the store.
///
/// Hosts must not dispatch to the store from inside
/// [`RenderHost::mount`]; the panel is mid-render at that point.
///
/// # Example
///
/// ```rust
/// use rewind::panel::{DevToolsPanel, HeadlessHost, PanelConfig};
/// use rewind::store::Store;
///
/// let store = Store::new(0_i64, |count: &i64, step: &i64| count + step);
/// let host = HeadlessHost::new();
/// let panel = DevToolsPanel::attach(&store, PanelConfig::default(), host.clone());
///
/// store.dispatch(1);
/// store.dispatch(2);
///
/// let second = panel.transitions()[1].id;
/// panel.commit(panel.transitions()[0].id).unwrap();
///
/// assert_eq!(*store.state(), 1);
/// assert!(panel.commit(second).is_err());
/// assert_eq!(host.last_text(), "Dev Tools [+]");
/// ```
pub struct DevToolsPanel<S, A> {
    core: Rc<RefCell<PanelCore<S, A>>>,
    _subscription: Subscription,
}

impl<S: Inspect, A: Inspect> DevToolsPanel<S, A> {
    /// Attach to `store`: capture its current state as the initial state,
    /// render once, and record every later dispatch.
    pub fn attach<H>(store: &Store<S, A>, config: PanelConfig, host: H) -> Self
    where
        H: RenderHost + 'static,
    {
        let initial = store.state();
        let log = DispatchLog::new(initial).with_policy(config.delete_policy);
        let status = if config.start_open {
            PanelStatus::Open
        } else {
            PanelStatus::Closed
        };

        let core = Rc::new(RefCell::new(PanelCore {
            store: store.clone(),
            log,
            cache: MemoCache::new(config.segment_size),
            status,
            config,
            host: Box::new(host),
            force_state: false,
            renders: 0,
        }));
        core.borrow_mut().render();

        let weak = Rc::downgrade(&core);
        let subscription = store.on_dispatch(move |before, after, action| {
            if let Some(core) = weak.upgrade() {
                let mut core = core.borrow_mut();
                core.log
                    .record(Rc::clone(before), Rc::clone(after), Rc::clone(action));
                core.render();
            }
        });

        tracing::debug!("Panel attached");
        Self {
            core,
            _subscription: subscription,
        }
    }

    /// Show the current state and the dispatch list. Idempotent.
    pub fn open(&self) {
        self.core.borrow_mut().set_status(PanelStatus::Open);
    }

    /// Collapse to the one-line label. Idempotent.
    pub fn close(&self) {
        self.core.borrow_mut().set_status(PanelStatus::Closed);
    }

    pub fn status(&self) -> PanelStatus {
        self.core.borrow().status
    }

    /// Apply an operator command received from the host.
    pub fn handle(&self, command: &Command) -> Result<(), PanelError> {
        match command {
            Command::Open => {
                self.open();
                Ok(())
            }
            Command::Close => {
                self.close();
                Ok(())
            }
            Command::Toggle(token) => self.toggle(token),
            Command::Commit(id) => self.commit(*id),
            Command::Delete(id) => self.delete(*id),
        }
    }

    /// Rewind the store to the state after transition `id` and drop every
    /// later transition.
    pub fn commit(&self, id: TransitionId) -> Result<(), PanelError> {
        self.core.borrow_mut().commit(id)
    }

    /// Delete transition `id` (per the configured delete policy) and replay
    /// the rest of the log.
    pub fn delete(&self, id: TransitionId) -> Result<(), PanelError> {
        self.core.borrow_mut().delete(id)
    }

    /// Expand or collapse the presenter mounted at `token`.
    pub fn toggle(&self, token: &Token) -> Result<(), PanelError> {
        self.core.borrow_mut().toggle(token)
    }

    /// Run a full render pass and return the tree handed to the host.
    pub fn render(&self) -> Element {
        self.core.borrow_mut().render()
    }
}

impl<S, A> DevToolsPanel<S, A> {
    /// Recorded transitions, oldest first.
    pub fn transitions(&self) -> Vec<Rc<Transition<S, A>>> {
        self.core.borrow().log.transitions().to_vec()
    }

    /// State captured when the panel attached.
    pub fn initial_state(&self) -> Rc<S> {
        Rc::clone(self.core.borrow().log.initial())
    }

    pub fn memo_stats(&self) -> MemoStats {
        self.core.borrow().cache.stats()
    }

    /// Number of full render passes so far.
    pub fn render_count(&self) -> u64 {
        self.core.borrow().renders
    }

    pub fn config(&self) -> PanelConfig {
        self.core.borrow().config.clone()
    }
}

impl<S: PartialEq, A> DevToolsPanel<S, A> {
    /// Check that the recorded history is one unbroken chain.
    pub fn verify_chain(&self) -> Validation<(), NonEmptyVec<ChainViolation>> {
        self.core.borrow().log.verify_chain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attach(config: PanelConfig) -> (Store<i64, i64>, DevToolsPanel<i64, i64>, HeadlessHost) {
        let store = Store::new(0_i64, |count: &i64, step: &i64| count + step);
        let host = HeadlessHost::new();
        let panel = DevToolsPanel::attach(&store, config, host.clone());
        (store, panel, host)
    }

    #[test]
    fn attach_renders_closed_label() {
        let (store, panel, host) = attach(PanelConfig::default());

        assert_eq!(panel.status(), PanelStatus::Closed);
        assert_eq!(host.frame_count(), 1);
        assert_eq!(host.last_text(), "Dev Tools [+]");
        assert_eq!(store.listener_count(), 1);
    }

    #[test]
    fn every_dispatch_is_recorded_and_rendered() {
        let (store, panel, host) = attach(PanelConfig::default());

        store.dispatch(2);
        store.dispatch(3);

        assert_eq!(panel.transitions().len(), 2);
        assert_eq!(*panel.transitions()[1].after, 5);
        assert_eq!(host.frame_count(), 3);
        assert_eq!(panel.render_count(), 3);
    }

    #[test]
    fn start_open_shows_state_and_actions() {
        let config = PanelConfig::builder().start_open(true).build().unwrap();
        let (store, panel, host) = attach(config);

        store.dispatch(4);

        assert_eq!(panel.status(), PanelStatus::Open);
        assert_eq!(
            host.last_text(),
            "Dev Tools [-]\n## State\n### Integer\n## Actions\n[+] [!] [x] Integer"
        );
    }

    #[test]
    fn dropping_the_panel_unsubscribes() {
        let (store, panel, _host) = attach(PanelConfig::default());
        drop(panel);

        assert_eq!(store.listener_count(), 0);
        store.dispatch(1);
    }

    #[test]
    fn stale_commands_are_rejected() {
        let (store, panel, _host) = attach(PanelConfig::default());
        store.dispatch(1);
        let id = panel.transitions()[0].id;

        panel.delete(id).unwrap();

        assert_eq!(panel.delete(id), Err(PanelError::UnknownTransition(id)));
        assert_eq!(
            panel.handle(&Command::Toggle(Token::root("missing"))),
            Err(PanelError::UnknownPresenter(Token::root("missing")))
        );
    }

    #[test]
    fn unchanged_state_is_inspected_once() {
        let config = PanelConfig::builder().start_open(true).build().unwrap();
        let (_store, panel, _host) = attach(config);

        panel.render();
        panel.render();

        assert_eq!(panel.memo_stats().built, 1);
        assert_eq!(panel.memo_stats().reused, 2);
    }
}
