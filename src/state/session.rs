use crate::model::{GameStatus, MatchState};
use crate::util::clog;
use std::cell::RefCell;
use std::rc::Rc;

type Listener = Rc<dyn Fn(&MatchState)>;

/// One page session: the match being viewed and the last state fetched for it.
///
/// The stored state is only ever replaced wholesale. Listeners run after each
/// replacement, in subscription order.
pub struct ClientSession {
    match_id: u64,
    store: RefCell<Rc<MatchState>>,
    listeners: RefCell<Vec<Listener>>,
}

impl ClientSession {
    pub fn new(match_id: u64) -> Self {
        Self {
            match_id,
            store: RefCell::new(Rc::new(MatchState::default())),
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn match_id(&self) -> u64 {
        self.match_id
    }

    pub fn current(&self) -> Rc<MatchState> {
        self.store.borrow().clone()
    }

    pub fn status(&self) -> GameStatus {
        self.store.borrow().state.clone()
    }

    pub fn replace(&self, next: MatchState) {
        let next = Rc::new(next);
        let prev = std::mem::replace(&mut *self.store.borrow_mut(), next.clone());
        if prev.state != next.state {
            clog(&format!("match {}: {} -> {}", self.match_id, prev.state, next.state));
        }
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&next);
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&MatchState) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn clear_listeners(&self) {
        self.listeners.borrow_mut().clear();
    }
}
