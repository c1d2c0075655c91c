//! Integration tests for the tagvariant-internals crate.
//!
//! These tests drive the raw container through its public surface only:
//!
//! ## Lists (2 tests)
//! - `test_list_constants`: Length, drop glue and never-valueless flags
//! - `test_table_shapes`: One table entry per alternative, plus a valueless
//!   slot for raw tables of lists that can become valueless
//!
//! ## Visitation (5 tests)
//! - `test_visit_categories`: Shared, exclusive and owned arguments
//! - `test_visit_table_path`: Lists longer than the direct dispatch limit
//! - `test_raw_visit_valueless`: The valueless branch of raw visitation
//! - `test_visit_all`: Two and three containers, including the valueless
//!   rejection of the deduced mode
//! - `test_raw_visit_all`: Indices of every dimension, including valueless
//!   ones
//!
//! ## Lifecycle (2 tests)
//! - `test_owned_visit_moves_out`: Owned visitation moves the value out
//!   without dropping it twice
//! - `test_panicking_destructor`: A panicking destructor leaves the container
//!   valueless

use std::{
    cell::Cell,
    panic::{AssertUnwindSafe, catch_unwind},
    rc::Rc,
};

use tagvariant_internals::{
    AlternativeList, DIRECT_DISPATCH_LIMIT, Dispatch, Indexed, Owned, RawDispatch, RawVariant,
    Shared, VARIANT_NPOS, Valueless, Visitor, raw_visit, raw_visit_all, raw_visit_indexed, visit,
    visit_all,
};

/// Accepts anything and does nothing.
struct Ignore;

impl<T> Visitor<T> for Ignore {
    type Output = ();

    fn visit(self, _args: T) {}
}

/// Panics when dropped while armed.
struct Bomb {
    armed: bool,
}

impl Drop for Bomb {
    fn drop(&mut self) {
        if self.armed {
            panic!("bomb destructor");
        }
    }
}

type Fallible = (Bomb, u32);

fn valueless() -> RawVariant<Fallible> {
    let mut raw = RawVariant::<Fallible>::new::<0>(Bomb { armed: true });
    let result = catch_unwind(AssertUnwindSafe(|| {
        raw.emplace::<1>(1);
    }));
    assert!(result.is_err());
    raw
}

type Wide = (u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, char, bool, u128);

#[test]
fn test_list_constants() {
    assert_eq!(<(u8,)>::LEN, 1);
    assert_eq!(Wide::LEN, 13);
    assert!(!Wide::NEEDS_DROP);
    assert!(Wide::NEVER_VALUELESS);

    assert!(Fallible::NEEDS_DROP);
    assert!(!Fallible::NEVER_VALUELESS);
    assert!(!<(u8, [u8; 512])>::NEVER_VALUELESS);
}

#[test]
fn test_table_shapes() {
    assert_eq!(<Wide as Dispatch<Shared<'static>, Ignore>>::TABLE.len(), 13);
    assert_eq!(<Wide as RawDispatch<Shared<'static>, Ignore>>::RAW_TABLE.len(), 13);
    assert_eq!(<Fallible as Dispatch<Owned, Ignore>>::TABLE.len(), 2);
    assert_eq!(<Fallible as RawDispatch<Owned, Ignore>>::RAW_TABLE.len(), 3);
}

#[test]
fn test_visit_categories() {
    let mut raw = RawVariant::<(String, u8)>::new::<0>(String::from("ab"));

    assert_eq!(visit(&raw, Ignore), Some(()));
    assert_eq!(visit(&mut raw, Push('c')), Some(3));
    assert_eq!(raw.get::<0>().map(String::as_str), Some("abc"));
    assert_eq!(visit(raw, Length), Some(3));
}

/// Appends a character to strings, and reports the length of numbers.
struct Push(char);

impl<'a> Visitor<&'a mut String> for Push {
    type Output = usize;

    fn visit(self, value: &'a mut String) -> usize {
        value.push(self.0);
        value.len()
    }
}

impl<'a> Visitor<&'a mut u8> for Push {
    type Output = usize;

    fn visit(self, _value: &'a mut u8) -> usize {
        1
    }
}

/// Reports the length of an owned alternative.
struct Length;

impl Visitor<String> for Length {
    type Output = usize;

    fn visit(self, value: String) -> usize {
        value.len()
    }
}

impl Visitor<u8> for Length {
    type Output = usize;

    fn visit(self, _value: u8) -> usize {
        1
    }
}

#[test]
fn test_visit_table_path() {
    struct Position<'c>(&'c Cell<usize>);

    impl<const I: usize, T> Visitor<Indexed<I, T>> for Position<'_> {
        type Output = ();

        fn visit(self, _value: Indexed<I, T>) {
            self.0.set(I);
        }
    }

    impl Visitor<Valueless> for Position<'_> {
        type Output = ();

        fn visit(self, _value: Valueless) {
            self.0.set(VARIANT_NPOS);
        }
    }

    assert!(Wide::LEN > DIRECT_DISPATCH_LIMIT);
    let seen = Cell::new(0);
    raw_visit_indexed(&RawVariant::<Wide>::new::<11>(true), Position(&seen));
    assert_eq!(seen.get(), 11);
    raw_visit_indexed(&RawVariant::<Wide>::new::<0>(1), Position(&seen));
    assert_eq!(seen.get(), 0);

    let mut raw = RawVariant::<Wide>::new::<12>(7);
    assert_eq!(visit(&mut raw, Ignore), Some(()));
    assert_eq!(raw.get::<12>(), Some(&7));
}

#[test]
fn test_raw_visit_valueless() {
    struct Seen<'c>(&'c Cell<Option<bool>>);

    impl<'c, 'a> Visitor<&'a Bomb> for Seen<'c> {
        type Output = ();

        fn visit(self, _value: &'a Bomb) {
            self.0.set(Some(true));
        }
    }

    impl<'c, 'a> Visitor<&'a u32> for Seen<'c> {
        type Output = ();

        fn visit(self, _value: &'a u32) {
            self.0.set(Some(true));
        }
    }

    impl Visitor<Valueless> for Seen<'_> {
        type Output = ();

        fn visit(self, _value: Valueless) {
            self.0.set(Some(false));
        }
    }

    let seen = Cell::new(None);
    let raw = RawVariant::<Fallible>::new::<1>(4);
    raw_visit(&raw, Seen(&seen));
    assert_eq!(seen.get(), Some(true));

    let raw = valueless();
    assert!(!raw.is_valid());
    assert_eq!(raw.index(), VARIANT_NPOS);
    raw_visit(&raw, Seen(&seen));
    assert_eq!(seen.get(), Some(false));
    assert_eq!(visit(&raw, Ignore), None);
}

#[test]
fn test_visit_all() {
    let a = RawVariant::<(u16, u16)>::new::<1>(2);
    let b = RawVariant::<(u128, u128)>::new::<0>(3);
    let c = RawVariant::<(u32,)>::new::<0>(4);

    let sum = visit_all((&a, (&b, (&c, ()))), |(a, b, c): (&u16, &u128, &u32)| {
        u128::from(*a) + *b + u128::from(*c)
    });
    assert_eq!(sum, Some(9));

    let bad = valueless();
    assert_eq!(visit_all((&a, (&bad, ())), Ignore), None);
}

#[test]
fn test_raw_visit_all() {
    struct Pair<'c>(&'c Cell<(usize, usize)>);

    impl<const I: usize, const J: usize, A, B> Visitor<(Indexed<I, A>, Indexed<J, B>)>
        for Pair<'_>
    {
        type Output = ();

        fn visit(self, _args: (Indexed<I, A>, Indexed<J, B>)) {
            self.0.set((I, J));
        }
    }

    impl<const I: usize, A> Visitor<(Indexed<I, A>, Valueless)> for Pair<'_> {
        type Output = ();

        fn visit(self, _args: (Indexed<I, A>, Valueless)) {
            self.0.set((I, VARIANT_NPOS));
        }
    }

    impl<const J: usize, B> Visitor<(Valueless, Indexed<J, B>)> for Pair<'_> {
        type Output = ();

        fn visit(self, _args: (Valueless, Indexed<J, B>)) {
            self.0.set((VARIANT_NPOS, J));
        }
    }

    impl Visitor<(Valueless, Valueless)> for Pair<'_> {
        type Output = ();

        fn visit(self, _args: (Valueless, Valueless)) {
            self.0.set((VARIANT_NPOS, VARIANT_NPOS));
        }
    }

    let seen = Cell::new((0, 0));
    let a = RawVariant::<Wide>::new::<12>(1);
    let b = RawVariant::<Fallible>::new::<1>(1);
    raw_visit_all((&a, (&b, ())), Pair(&seen));
    assert_eq!(seen.get(), (12, 1));

    let bad = valueless();
    raw_visit_all((&a, (&bad, ())), Pair(&seen));
    assert_eq!(seen.get(), (12, VARIANT_NPOS));
}

#[test]
fn test_owned_visit_moves_out() {
    let counter = Rc::new(());
    let raw = RawVariant::<(Rc<()>, Rc<()>)>::new::<1>(counter.clone());
    assert_eq!(Rc::strong_count(&counter), 2);

    let moved = visit(raw, |value: Rc<()>| value);
    assert_eq!(Rc::strong_count(&counter), 2);
    drop(moved);
    assert_eq!(Rc::strong_count(&counter), 1);
}

#[test]
fn test_panicking_destructor() {
    let raw = valueless();
    assert_eq!(raw.get::<1>(), None);
    assert!(raw.get::<0>().is_none());

    let mut raw = raw;
    raw.emplace::<0>(Bomb { armed: false });
    assert!(raw.is_valid());
    assert_eq!(raw.index(), 0);
}
