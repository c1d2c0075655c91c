use std::{
    any::type_name,
    cell::Cell,
    panic::{AssertUnwindSafe, catch_unwind},
};

use tagvariant::{
    BadAccess, DIRECT_DISPATCH_LIMIT, Handles, Indexed, VARIANT_NPOS, Valueless, Variant,
    VisitOutput, Visitor,
    markers::{AlternativeList, Curry, Deduced, Mode, RawDispatch, RawIndexed, Shared, Unindexed},
    visit, visit_raw_indexed,
};

/// Thirteen alternatives, more than a direct match handles.
type Wide = (u8, u16, u32, u64, i8, i16, i32, i64, f32, f64, char, bool, u128);

/// Returns the type name of the visited alternative.
struct TypeName;

impl<T> Visitor<&T> for TypeName {
    type Output = &'static str;

    fn visit(self, _value: &T) -> &'static str {
        type_name::<T>()
    }
}

impl<A, B> Visitor<(&A, &B)> for TypeName {
    type Output = (&'static str, &'static str);

    fn visit(self, _values: (&A, &B)) -> Self::Output {
        (type_name::<A>(), type_name::<B>())
    }
}

/// Records the indices a raw-indexed visit was called with.
struct Indices<'c>(&'c Cell<Option<(usize, usize)>>);

impl<const I: usize, const J: usize, A, B> Visitor<(Indexed<I, A>, Indexed<J, B>)> for Indices<'_> {
    type Output = ();

    fn visit(self, _values: (Indexed<I, A>, Indexed<J, B>)) {
        self.0.set(Some((I, J)));
    }
}

impl<const J: usize, B> Visitor<(Valueless, Indexed<J, B>)> for Indices<'_> {
    type Output = ();

    fn visit(self, _values: (Valueless, Indexed<J, B>)) {
        self.0.set(Some((VARIANT_NPOS, J)));
    }
}

impl<const I: usize, A> Visitor<(Indexed<I, A>, Valueless)> for Indices<'_> {
    type Output = ();

    fn visit(self, _values: (Indexed<I, A>, Valueless)) {
        self.0.set(Some((I, VARIANT_NPOS)));
    }
}

impl Visitor<(Valueless, Valueless)> for Indices<'_> {
    type Output = ();

    fn visit(self, _values: (Valueless, Valueless)) {
        self.0.set(Some((VARIANT_NPOS, VARIANT_NPOS)));
    }
}

/// Panics when dropped while armed.
#[derive(Debug)]
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

fn valueless() -> Variant<(Bomb, String)> {
    let mut variant = Variant::new::<0>(Bomb { armed: true });
    let result = catch_unwind(AssertUnwindSafe(|| {
        variant.emplace::<1>(String::new());
    }));
    assert!(result.is_err());
    variant
}

#[test]
fn test_wide_list_uses_table() {
    assert!(Variant::<Wide>::SIZE > DIRECT_DISPATCH_LIMIT);

    assert_eq!(Variant::<Wide>::new::<0>(1).visit(TypeName), Ok("u8"));
    assert_eq!(Variant::<Wide>::new::<7>(-1).visit(TypeName), Ok("i64"));
    assert_eq!(Variant::<Wide>::new::<10>('x').visit(TypeName), Ok("char"));
    assert_eq!(Variant::<Wide>::new::<11>(true).visit(TypeName), Ok("bool"));
    assert_eq!(Variant::<Wide>::new::<12>(5).visit(TypeName), Ok("u128"));
}

#[test]
fn test_wide_list_raw_indexed() {
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

    let position = Cell::new(0);
    Variant::<Wide>::new::<12>(5).raw_visit_indexed(Position(&position));
    assert_eq!(position.get(), 12);
    Variant::<Wide>::new::<9>(0.5).raw_visit_indexed(Position(&position));
    assert_eq!(position.get(), 9);
}

#[test]
fn test_wide_list_mutation() {
    let mut variant: Variant<Wide> = Variant::new::<6>(1);
    *variant.emplace::<12>(1) <<= 100;
    assert_eq!(variant.get::<12>(), Ok(&(1u128 << 100)));
    assert_eq!(variant.clone(), variant);
}

#[test]
fn test_two_containers() {
    let a: Variant<(u8, String)> = Variant::new::<1>(String::from("a"));
    let b: Variant<Wide> = Variant::new::<10>('b');
    assert_eq!(
        visit((&a, &b), TypeName),
        Ok((type_name::<String>(), "char"))
    );

    let a: Variant<(u8, String)> = Variant::new::<0>(0);
    let b: Variant<Wide> = Variant::new::<3>(0);
    assert_eq!(visit((&a, &b), TypeName), Ok(("u8", "u64")));
}

#[test]
fn test_mixed_handles() {
    let mut text: Variant<(String, String)> = Variant::new::<1>(String::from("ab"));
    let suffix: Variant<(char, char)> = Variant::new::<0>('c');

    let length = visit((&mut text, suffix), |(text, suffix): (&mut String, char)| {
        text.push(suffix);
        text.len()
    });
    assert_eq!(length, Ok(3));
    assert_eq!(text.get::<1>().map(String::as_str), Ok("abc"));
}

#[test]
fn test_eight_containers() {
    let v: [Variant<(u8, u8)>; 8] = core::array::from_fn(|i| {
        let value = u8::try_from(i).unwrap_or(0);
        if i % 2 == 0 {
            Variant::new::<0>(value)
        } else {
            Variant::new::<1>(value)
        }
    });
    let [a, b, c, d, e, f, g, h] = &v;

    let sum = visit(
        (a, b, c, d, e, f, g, h),
        |(a, b, c, d, e, f, g, h): (&u8, &u8, &u8, &u8, &u8, &u8, &u8, &u8)| {
            a + b + c + d + e + f + g + h
        },
    );
    assert_eq!(sum, Ok(28));
}

#[test]
fn test_valueless_rejected_before_dispatch() {
    let bad = valueless();
    let good: Variant<(u8, u16)> = Variant::new::<0>(1);
    let called = Cell::new(false);

    struct Flag<'c>(&'c Cell<bool>);

    impl<A, B> Visitor<(&A, &B)> for Flag<'_> {
        type Output = ();

        fn visit(self, _values: (&A, &B)) {
            self.0.set(true);
        }
    }

    assert_eq!(visit((&good, &bad), Flag(&called)), Err(BadAccess::Valueless));
    assert!(!called.get());
}

#[test]
fn test_raw_indexed_pairs() {
    let seen = Cell::new(None);
    let bad = valueless();
    let good: Variant<(u8, u16, u32)> = Variant::new::<2>(1);

    visit_raw_indexed((&good, &bad), Indices(&seen));
    assert_eq!(seen.get(), Some((2, VARIANT_NPOS)));

    visit_raw_indexed((&bad, &good), Indices(&seen));
    assert_eq!(seen.get(), Some((VARIANT_NPOS, 2)));

    visit_raw_indexed((&bad, &bad), Indices(&seen));
    assert_eq!(seen.get(), Some((VARIANT_NPOS, VARIANT_NPOS)));

    let other: Variant<(Bomb, String)> = Variant::new::<1>(String::new());
    visit_raw_indexed((&good, &other), Indices(&seen));
    assert_eq!(seen.get(), Some((2, 1)));
}

/// Forwards to [`visit`] from generic code.
fn forward_visit<H, V>(handles: H, visitor: V) -> Result<VisitOutput<H, V>, BadAccess>
where
    H: Handles,
    Deduced: Mode<H::Head, Curry<Deduced, V, (), H::Tail>>,
{
    visit(handles, visitor)
}

/// Forwards to [`visit_raw_indexed`] from generic code.
fn forward_raw_indexed<H, V>(handles: H, visitor: V)
where
    H: Handles,
    RawIndexed: Mode<H::Head, Curry<RawIndexed, V, (), H::Tail>>,
{
    visit_raw_indexed(handles, visitor);
}

/// Forwards to [`Variant::raw_visit`] from generic code.
fn forward_raw_visit<'a, L, V>(variant: &'a Variant<L>, visitor: V)
where
    L: AlternativeList + RawDispatch<Shared<'a>, Unindexed<V>>,
{
    variant.raw_visit(visitor);
}

#[test]
fn test_generic_forwarding() {
    struct Seen<'c>(&'c Cell<bool>);

    impl<T> Visitor<&T> for Seen<'_> {
        type Output = ();

        fn visit(self, _value: &T) {
            self.0.set(true);
        }
    }

    impl Visitor<Valueless> for Seen<'_> {
        type Output = ();

        fn visit(self, _value: Valueless) {
            self.0.set(false);
        }
    }

    let a: Variant<(u8, String)> = Variant::new::<1>(String::from("a"));
    let b: Variant<Wide> = Variant::new::<11>(true);
    assert_eq!(
        forward_visit((&a, &b), TypeName),
        Ok((type_name::<String>(), "bool"))
    );

    let seen = Cell::new(None);
    forward_raw_indexed((&b, &valueless()), Indices(&seen));
    assert_eq!(seen.get(), Some((11, VARIANT_NPOS)));

    let flag = Cell::new(false);
    forward_raw_visit(&a, Seen(&flag));
    assert!(flag.get());
    forward_raw_visit(&valueless(), Seen(&flag));
    assert!(!flag.get());
}
