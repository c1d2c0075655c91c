use std::{cell::Cell, rc::Rc};

use tagvariant::{
    Variant,
    markers::{CopyAssignable, CopyConstructible, MoveAssignable, MoveConstructible},
};

#[derive(Default)]
struct Counts {
    clones: Cell<usize>,
    clone_froms: Cell<usize>,
    drops: Cell<usize>,
}

/// Records how it is copied and destroyed.
struct Probe {
    counts: Rc<Counts>,
    value: u32,
}

impl Probe {
    fn new(counts: &Rc<Counts>, value: u32) -> Self {
        Probe {
            counts: counts.clone(),
            value,
        }
    }
}

impl Clone for Probe {
    fn clone(&self) -> Self {
        self.counts.clones.set(self.counts.clones.get() + 1);
        Probe::new(&self.counts, self.value)
    }

    fn clone_from(&mut self, source: &Self) {
        self.counts.clone_froms.set(self.counts.clone_froms.get() + 1);
        self.value = source.value;
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        self.counts.drops.set(self.counts.drops.get() + 1);
    }
}

type List = (Probe, String);

#[test]
fn test_clone_preserves_index_and_value() {
    let counts = Rc::new(Counts::default());
    let original: Variant<List> = Variant::new::<0>(Probe::new(&counts, 3));
    let copy = original.clone();
    assert_eq!(copy.index(), 0);
    assert_eq!(copy.get::<0>().map(|probe| probe.value), Ok(3));
    assert_eq!(counts.clones.get(), 1);

    let text: Variant<List> = Variant::new::<1>(String::from("abc"));
    assert_eq!(text.clone().get::<1>().map(String::as_str), Ok("abc"));
}

#[test]
fn test_move_preserves_index_and_value() {
    let counts = Rc::new(Counts::default());
    let original: Variant<List> = Variant::new::<0>(Probe::new(&counts, 3));
    let moved = original;
    assert_eq!(moved.get::<0>().map(|probe| probe.value), Ok(3));
    assert_eq!(counts.clones.get(), 0);
    assert_eq!(counts.drops.get(), 0);
}

#[test]
fn test_clone_from_same_alternative_assigns_in_place() {
    let counts = Rc::new(Counts::default());
    let source: Variant<List> = Variant::new::<0>(Probe::new(&counts, 1));
    let mut target: Variant<List> = Variant::new::<0>(Probe::new(&counts, 2));

    target.clone_from(&source);
    assert_eq!(target.get::<0>().map(|probe| probe.value), Ok(1));
    assert_eq!(counts.clone_froms.get(), 1);
    assert_eq!(counts.clones.get(), 0);
    assert_eq!(counts.drops.get(), 0);
}

#[test]
fn test_clone_from_other_alternative_replaces() {
    let counts = Rc::new(Counts::default());
    let source: Variant<List> = Variant::new::<0>(Probe::new(&counts, 1));
    let mut target: Variant<List> = Variant::new::<1>(String::from("old"));

    target.clone_from(&source);
    assert_eq!(target.index(), 0);
    assert_eq!(counts.clones.get(), 1);
    assert_eq!(counts.clone_froms.get(), 0);

    target.clone_from(&Variant::new::<1>(String::from("new")));
    assert_eq!(target.get::<1>().map(String::as_str), Ok("new"));
    assert_eq!(counts.drops.get(), 1);
}

#[test]
fn test_assign_same_alternative_moves_in_place() {
    let counts = Rc::new(Counts::default());
    let mut target: Variant<List> = Variant::new::<0>(Probe::new(&counts, 1));

    target.assign(Variant::new::<0>(Probe::new(&counts, 5)));
    assert_eq!(target.get::<0>().map(|probe| probe.value), Ok(5));
    // Only the overwritten value is dropped.
    assert_eq!(counts.drops.get(), 1);
    assert_eq!(counts.clones.get() + counts.clone_froms.get(), 0);
}

#[test]
fn test_assign_other_alternative() {
    let counts = Rc::new(Counts::default());
    let mut target: Variant<List> = Variant::new::<0>(Probe::new(&counts, 1));

    target.assign(Variant::new::<1>(String::from("text")));
    assert_eq!(target.get::<1>().map(String::as_str), Ok("text"));
    assert_eq!(counts.drops.get(), 1);

    target.assign(Variant::new::<0>(Probe::new(&counts, 2)));
    assert_eq!(target.get::<0>().map(|probe| probe.value), Ok(2));
    drop(target);
    assert_eq!(counts.drops.get(), 2);
}

#[test]
fn test_assign_without_drop_glue() {
    let mut target: Variant<(u8, [u64; 2])> = Variant::new::<1>([1, 2]);
    target.assign(Variant::new::<0>(7));
    assert_eq!(target.get::<0>(), Ok(&7));
    assert!(!target.is_valueless());
}

#[test]
fn test_capabilities_follow_alternatives() {
    struct NotClone;

    static_assertions::assert_impl_all!(List: CopyConstructible, CopyAssignable, MoveConstructible, MoveAssignable);
    static_assertions::assert_impl_all!((u8, NotClone): MoveConstructible, MoveAssignable);
    static_assertions::assert_not_impl_any!((u8, NotClone): CopyConstructible, CopyAssignable);

    static_assertions::assert_impl_all!(Variant<List>: Clone);
    static_assertions::assert_not_impl_any!(Variant<(u8, NotClone)>: Clone, Copy);
}
