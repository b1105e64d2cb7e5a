//! Lazy handles and the memoizing suspension behind them.

use crate::err::{EvalError, Result};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A deferred computation. Runs at most once, owns the captured environment
/// of the binding it stands for, and may answer with another suspended node:
/// laziness composes, and a thunk is allowed to simply alias a different
/// not-yet-evaluated node.
pub type Compute<T> = Box<dyn FnOnce() -> Result<Lazy<T>>>;

enum State<T> {
    /// Not yet demanded. The closure holds the captured environment.
    Suspended(Compute<T>),
    /// Being evaluated right now. Observing this state from within a force
    /// means the value depends on itself.
    Locked,
    /// Weak-head normal form.
    Ready(T),
}

/// A suspended-or-evaluated node.
///
/// The single mutable resource of the whole runtime: the state moves
/// `Suspended -> Locked -> Ready` exactly once, driven by the one evaluator
/// that owns the graph (see [`Lazy::force`]). An evaluator running on
/// multiple threads would need to make the `Suspended -> Locked` transition
/// atomic with respect to concurrent forcers; this runtime assumes a single
/// control flow and uses plain `Rc`/`RefCell` sharing.
pub struct Thunk<T> {
    state: RefCell<State<T>>,
}

/// Shared handle to a [`Thunk`]. Cloning shares the node, so every holder
/// observes the same single evaluation.
pub struct Lazy<T>(Rc<Thunk<T>>);

impl<T> Clone for Lazy<T> {
    fn clone(&self) -> Self {
        Lazy(self.0.clone())
    }
}

impl<T> From<T> for Lazy<T> {
    fn from(value: T) -> Self {
        Lazy::ready(value)
    }
}

impl<T> Lazy<T> {
    /// A node that is already in weak-head normal form.
    pub fn ready(value: T) -> Self {
        Lazy(Rc::new(Thunk { state: RefCell::new(State::Ready(value)) }))
    }

    /// Suspend `compute` until the first force.
    pub fn defer(compute: impl FnOnce() -> Result<Lazy<T>> + 'static) -> Self {
        Lazy(Rc::new(Thunk { state: RefCell::new(State::Suspended(Box::new(compute))) }))
    }

    /// Tie a recursive binding: `tie` receives a weak handle to the very node
    /// being defined and returns its computation. Mutually recursive bindings
    /// compile to deliberately cyclic graphs built this way; the cycle is
    /// intentional and lives as long as the program does.
    pub fn knot(tie: impl FnOnce(LazyWeak<T>) -> Compute<T>) -> Self {
        Lazy(Rc::new_cyclic(|weak| {
            let compute = tie(LazyWeak(weak.clone()));
            Thunk { state: RefCell::new(State::Suspended(compute)) }
        }))
    }

    /// Whether the node has reached weak-head normal form. Pure observation,
    /// never forces.
    pub fn is_evaluated(&self) -> bool {
        matches!(&*self.0.state.borrow(), State::Ready(_))
    }
}

impl<T: Clone> Lazy<T> {
    /// Drive the node to weak-head normal form.
    ///
    /// The first force consumes the suspended computation (releasing its
    /// captured environment), chases whatever chain of aliasing nodes it
    /// answers with, caches the final value on this node and returns it.
    /// Every later force is a cache read; the computation never reruns, and
    /// chains are never re-walked.
    ///
    /// Forcing a node that is already being forced by the running evaluation
    /// fails with [`EvalError::SelfReferentialValue`] instead of looping.
    /// Failures raised by the computation propagate unchanged; the node stays
    /// locked afterwards, and re-forcing it is unspecified.
    pub fn force(&self) -> Result<T> {
        match self.0.state.replace(State::Locked) {
            | State::Ready(value) => {
                let out = value.clone();
                self.0.state.replace(State::Ready(value));
                Ok(out)
            }
            | State::Locked => Err(EvalError::SelfReferentialValue),
            | State::Suspended(compute) => {
                let value = compute()?.force()?;
                self.0.state.replace(State::Ready(value.clone()));
                Ok(value)
            }
        }
    }
}

/// Weak handle handed out by [`Lazy::knot`].
pub struct LazyWeak<T>(Weak<Thunk<T>>);

impl<T> Clone for LazyWeak<T> {
    fn clone(&self) -> Self {
        LazyWeak(self.0.clone())
    }
}

impl<T> LazyWeak<T> {
    /// Recover the strong handle. Inside the computation of the node being
    /// tied this always succeeds, since the node is alive while it is being
    /// forced. A dangling upgrade means the recursive binding outlived its
    /// own value graph and is reported as the self-reference it amounts to.
    pub fn upgrade(&self) -> Result<Lazy<T>> {
        self.0.upgrade().map(Lazy).ok_or(EvalError::SelfReferentialValue)
    }
}
