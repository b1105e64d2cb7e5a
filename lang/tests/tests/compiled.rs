//! The runtime exercised the way compiled module code targets it: a data
//! universe, lazy stream combinators, and recursive knots.

use fado_runtime::{Fun1, Fun2, Lazy, ProgramFailure, Value};
use fado_tests::utils::{counted, poison};
use pretty_assertions::assert_eq;
use std::cell::Cell;
use std::rc::Rc;

/// Value universe of the compiled `demo.stream` module.
#[derive(Clone)]
enum Val {
    Int(i64),
    Nil,
    Cons(Lazy<Val>, Lazy<Val>),
}

impl Value for Val {
    fn variant_tag(&self) -> u32 {
        match self {
            | Val::Int(_) => 1,
            | Val::Nil => 2,
            | Val::Cons(..) => 3,
        }
    }
}

fn bad_match(location: &str) -> fado_runtime::EvalError {
    ProgramFailure::PatternMatch { location: location.to_string() }.into()
}

/// `add = \a b -> a + b`
fn add() -> Fun2<Val, Val, Val> {
    Fun2::new(|a, b| match (a.force()?, b.force()?) {
        | (Val::Int(x), Val::Int(y)) => Ok(Lazy::ready(Val::Int(x + y))),
        | _ => Err(bad_match("add")),
    })
}

/// `nats n = n : nats (n + 1)`
fn nats(n: i64) -> Lazy<Val> {
    Lazy::defer(move || Ok(Lazy::ready(Val::Cons(Val::Int(n).into(), nats(n + 1)))))
}

/// `take n xs` — strict in the spine, lazy in the elements
fn take(n: i64, xs: &Lazy<Val>) -> Lazy<Val> {
    let xs = xs.clone();
    Lazy::defer(move || {
        if n <= 0 {
            return Ok(Lazy::ready(Val::Nil));
        }
        match xs.force()? {
            | Val::Cons(head, tail) => Ok(Lazy::ready(Val::Cons(head, take(n - 1, &tail)))),
            | Val::Nil => Ok(Lazy::ready(Val::Nil)),
            | Val::Int(_) => Err(bad_match("take")),
        }
    })
}

/// `map f xs`
fn map(f: &Fun1<Val, Val>, xs: &Lazy<Val>) -> Lazy<Val> {
    let f = f.clone();
    let xs = xs.clone();
    Lazy::defer(move || match xs.force()? {
        | Val::Cons(head, tail) => Ok(Lazy::ready(Val::Cons(f.apply(head), map(&f, &tail)))),
        | Val::Nil => Ok(Lazy::ready(Val::Nil)),
        | Val::Int(_) => Err(bad_match("map")),
    })
}

/// `zipWith f xs ys`
fn zip_with(f: &Fun2<Val, Val, Val>, xs: &Lazy<Val>, ys: &Lazy<Val>) -> Lazy<Val> {
    let f = f.clone();
    let xs = xs.clone();
    let ys = ys.clone();
    Lazy::defer(move || match (xs.force()?, ys.force()?) {
        | (Val::Cons(x, xt), Val::Cons(y, yt)) => {
            Ok(Lazy::ready(Val::Cons(f.apply_all(x, y), zip_with(&f, &xt, &yt))))
        }
        | _ => Ok(Lazy::ready(Val::Nil)),
    })
}

/// Force the whole spine and every element.
fn collect(xs: &Lazy<Val>) -> fado_runtime::Result<Vec<i64>> {
    let mut out = Vec::new();
    let mut xs = xs.clone();
    loop {
        match xs.force()? {
            | Val::Nil => return Ok(out),
            | Val::Cons(head, tail) => {
                match head.force()? {
                    | Val::Int(n) => out.push(n),
                    | _ => return Err(bad_match("collect")),
                }
                xs = tail;
            }
            | Val::Int(_) => return Err(bad_match("collect")),
        }
    }
}

#[test]
fn infinite_streams_are_finite_to_observe() {
    assert_eq!(collect(&take(5, &nats(0))).unwrap(), vec![0, 1, 2, 3, 4]);
}

#[test]
fn partial_application_shapes_stream_transformers() {
    // `map (add 10)` the way generated code builds it: bind one argument,
    // pass the arity-1 remainder around as a plain value
    let add10 = add().apply(Val::Int(10).into());
    let out = map(&add10, &take(3, &nats(1)));
    assert_eq!(collect(&out).unwrap(), vec![11, 12, 13]);
}

#[test]
fn untaken_elements_are_never_forced() {
    let spine = Lazy::ready(Val::Cons(
        Val::Int(1).into(),
        Lazy::ready(Val::Cons(poison("second element"), Lazy::ready(Val::Nil))),
    ));
    assert_eq!(collect(&take(1, &spine)).unwrap(), vec![1]);
}

#[test]
fn shared_stream_heads_compute_once() {
    let runs = Rc::new(Cell::new(0u32));
    let head = counted(Val::Int(7), runs.clone());
    let spine = Lazy::ready(Val::Cons(head, Lazy::ready(Val::Nil)));
    let doubled = zip_with(&add(), &spine, &spine);
    assert_eq!(collect(&doubled).unwrap(), vec![14]);
    assert_eq!(runs.get(), 1);
}

#[test]
fn cyclic_fibonacci_stream() {
    // fibs = 0 : 1 : zipWith add fibs (tail fibs)
    let fibs: Lazy<Val> = Lazy::knot(|this| {
        Box::new(move || {
            let fibs = this.upgrade()?;
            let tail = {
                let fibs = fibs.clone();
                Lazy::defer(move || match fibs.force()? {
                    | Val::Cons(_, tail) => Ok(tail),
                    | _ => Err(bad_match("tail")),
                })
            };
            let rest = zip_with(&add(), &fibs, &tail);
            Ok(Lazy::ready(Val::Cons(
                Val::Int(0).into(),
                Lazy::ready(Val::Cons(Val::Int(1).into(), rest)),
            )))
        })
    });
    assert_eq!(collect(&take(8, &fibs)).unwrap(), vec![0, 1, 1, 2, 3, 5, 8, 13]);
}
