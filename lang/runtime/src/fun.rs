//! The curried function family compiled code applies.
//!
//! A function of arity N is a [`Fun1`]..[`Fun12`] value holding nothing but
//! its body. Call sites either feed arguments one at a time (`apply`, each
//! step allocating exactly one narrower function value) or all at once
//! (`apply_all`, one deferred node and no intermediate values). The two forms
//! are observably equivalent: same result, same set of arguments forced, in
//! the order the body forces them. Arguments are never forced by application
//! itself.
//!
//! The whole family is emitted by one structural pattern; the per-arity
//! expansion only exists so that the saturated call path passes every
//! argument as its own typed parameter instead of boxing an argument array.
//! Arguments reach the body in declaration order.

use crate::err::Result;
use crate::thunk::Lazy;
use crate::value::{FUN_TAG, Value};
use std::mem::{ManuallyDrop, transmute_copy};
use std::rc::Rc;

/// Curried function value of arity 1, the base of the family.
pub struct Fun1<A1, R> {
    pub(crate) body: Rc<dyn Fn(Lazy<A1>) -> Result<Lazy<R>>>,
}

impl<A1, R> Clone for Fun1<A1, R> {
    fn clone(&self) -> Self {
        Self { body: self.body.clone() }
    }
}

impl<A1, R> Value for Fun1<A1, R> {
    fn variant_tag(&self) -> u32 {
        FUN_TAG
    }
}

impl<A1: 'static, R: 'static> Fun1<A1, R> {
    pub fn new(body: impl Fn(Lazy<A1>) -> Result<Lazy<R>> + 'static) -> Self {
        Self { body: Rc::new(body) }
    }

    /// Apply the last argument without forcing it; what comes back is the
    /// deferred result itself.
    pub fn apply(&self, arg: Lazy<A1>) -> Lazy<R> {
        self.apply_all(arg)
    }

    /// The saturated and incremental forms coincide at arity 1.
    pub fn apply_all(&self, a1: Lazy<A1>) -> Lazy<R> {
        let body = self.body.clone();
        Lazy::defer(move || body(a1))
    }

    /// Reinterpret the type parameters of this function value.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that every substituted parameter is
    /// representationally equivalent to the one it replaces: all
    /// instantiations must be runtime types handled exclusively through
    /// [`Lazy`] handles, so the underlying body works unchanged. The code
    /// generator emits this only where it has proven that; nothing is
    /// validated here.
    pub unsafe fn coerce<X1, S>(self) -> Fun1<X1, S> {
        let this = ManuallyDrop::new(self);
        // Every instantiation is a single Rc fat pointer.
        unsafe { transmute_copy::<ManuallyDrop<Self>, Fun1<X1, S>>(&this) }
    }
}

macro_rules! fun_family {
    ($Fun:ident, $n:literal => $Next:ident :
     $A1:ident $a1:ident $X1:ident $(, $A:ident $a:ident $X:ident)+) => {
        #[doc = concat!("Curried function value of arity ", stringify!($n), ".")]
        ///
        /// Immutable once constructed; partial application allocates the next
        /// narrower function value instead of mutating this one.
        pub struct $Fun<$A1, $($A,)+ R> {
            pub(crate) body: Rc<dyn Fn(Lazy<$A1>, $(Lazy<$A>,)+) -> Result<Lazy<R>>>,
        }

        impl<$A1, $($A,)+ R> Clone for $Fun<$A1, $($A,)+ R> {
            fn clone(&self) -> Self {
                Self { body: self.body.clone() }
            }
        }

        impl<$A1, $($A,)+ R> Value for $Fun<$A1, $($A,)+ R> {
            fn variant_tag(&self) -> u32 {
                FUN_TAG
            }
        }

        impl<$A1: 'static, $($A: 'static,)+ R: 'static> $Fun<$A1, $($A,)+ R> {
            pub fn new(
                body: impl Fn(Lazy<$A1>, $(Lazy<$A>,)+) -> Result<Lazy<R>> + 'static,
            ) -> Self {
                Self { body: Rc::new(body) }
            }

            /// Apply one argument without forcing it.
            ///
            /// Allocates exactly one new function value that remembers `arg`
            /// and forwards every argument to the original body once the
            /// rest have arrived.
            pub fn apply(&self, arg: Lazy<$A1>) -> $Next<$($A,)+ R> {
                let body = self.body.clone();
                $Next::new(move |$($a),+| body(arg.clone(), $($a),+))
            }

            /// Apply all arguments at once.
            ///
            /// Produces the deferred result directly, skipping the
            /// intermediate function values the incremental form would
            /// allocate. Equivalent to chained [`apply`](Self::apply) in its
            /// result and in which arguments the body ends up forcing.
            pub fn apply_all(&self, $a1: Lazy<$A1>, $($a: Lazy<$A>),+) -> Lazy<R> {
                let body = self.body.clone();
                Lazy::defer(move || body($a1, $($a),+))
            }

            /// Reinterpret the type parameters of this function value.
            ///
            /// # Safety
            ///
            /// The caller must guarantee that every substituted parameter is
            /// representationally equivalent to the one it replaces: all
            /// instantiations must be runtime types handled exclusively
            /// through [`Lazy`] handles, so the underlying body works
            /// unchanged. The code generator emits this only where it has
            /// proven that; nothing is validated here.
            pub unsafe fn coerce<$X1, $($X,)+ S>(self) -> $Fun<$X1, $($X,)+ S> {
                let this = ManuallyDrop::new(self);
                // Every instantiation is a single Rc fat pointer.
                unsafe { transmute_copy::<ManuallyDrop<Self>, $Fun<$X1, $($X,)+ S>>(&this) }
            }
        }
    };
}

fun_family!(Fun2, 2 => Fun1: A1 a1 X1, A2 a2 X2);
fun_family!(Fun3, 3 => Fun2: A1 a1 X1, A2 a2 X2, A3 a3 X3);
fun_family!(Fun4, 4 => Fun3: A1 a1 X1, A2 a2 X2, A3 a3 X3, A4 a4 X4);
fun_family!(Fun5, 5 => Fun4: A1 a1 X1, A2 a2 X2, A3 a3 X3, A4 a4 X4, A5 a5 X5);
fun_family!(Fun6, 6 => Fun5: A1 a1 X1, A2 a2 X2, A3 a3 X3, A4 a4 X4, A5 a5 X5, A6 a6 X6);
fun_family!(Fun7, 7 => Fun6: A1 a1 X1, A2 a2 X2, A3 a3 X3, A4 a4 X4, A5 a5 X5, A6 a6 X6,
    A7 a7 X7);
fun_family!(Fun8, 8 => Fun7: A1 a1 X1, A2 a2 X2, A3 a3 X3, A4 a4 X4, A5 a5 X5, A6 a6 X6,
    A7 a7 X7, A8 a8 X8);
fun_family!(Fun9, 9 => Fun8: A1 a1 X1, A2 a2 X2, A3 a3 X3, A4 a4 X4, A5 a5 X5, A6 a6 X6,
    A7 a7 X7, A8 a8 X8, A9 a9 X9);
fun_family!(Fun10, 10 => Fun9: A1 a1 X1, A2 a2 X2, A3 a3 X3, A4 a4 X4, A5 a5 X5, A6 a6 X6,
    A7 a7 X7, A8 a8 X8, A9 a9 X9, A10 a10 X10);
fun_family!(Fun11, 11 => Fun10: A1 a1 X1, A2 a2 X2, A3 a3 X3, A4 a4 X4, A5 a5 X5, A6 a6 X6,
    A7 a7 X7, A8 a8 X8, A9 a9 X9, A10 a10 X10, A11 a11 X11);
fun_family!(Fun12, 12 => Fun11: A1 a1 X1, A2 a2 X2, A3 a3 X3, A4 a4 X4, A5 a5 X5, A6 a6 X6,
    A7 a7 X7, A8 a8 X8, A9 a9 X9, A10 a10 X10, A11 a11 X11, A12 a12 X12);
