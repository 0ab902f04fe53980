mod ordered;

use quickcheck::{Arbitrary, Gen};

/// A single step applied to both a tree and a reference set.
#[derive(Clone, Debug)]
pub enum Op<T> {
    Insert(T),
    Remove(T),
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(T::arbitrary(g))
        } else {
            Op::Remove(T::arbitrary(g))
        }
    }
}
