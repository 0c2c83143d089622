// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use std::ops::Deref;
use std::sync::Arc;

/// A clone-on-write growable vector.
///
/// A shared instance clones in O(1); the underlying storage is copied lazily
/// on the first mutation. Buffers that fork into many descendants (partition
/// key prefixes, scan bound scratch space) call [`CowVec::to_shared`] once and
/// hand out cheap clones.
#[derive(Debug)]
pub enum CowVec<T>
where
    T: Clone,
{
    /// Uniquely owned storage, mutable in place.
    Owned(Vec<T>),
    /// Reference-counted storage, copied before the next mutation.
    Shared(Arc<Vec<T>>),
}

impl<T> CowVec<T>
where
    T: Clone,
{
    /// Takes ownership of the given storage.
    pub fn new(vec: Vec<T>) -> Self {
        CowVec::Owned(vec)
    }

    /// Converts the storage to shared mode so that subsequent clones are
    /// reference counted rather than copied.
    pub fn to_shared(&mut self) {
        if let CowVec::Owned(vec) = self {
            let vec = std::mem::take(vec);
            *self = CowVec::Shared(Arc::new(vec));
        }
    }

    /// Ensures unique ownership and returns a mutable reference to the inner
    /// Vec.
    pub fn make_mut(&mut self) -> &mut Vec<T> {
        match self {
            CowVec::Owned(vec) => vec,
            CowVec::Shared(arc) => {
                let cloned = (**arc).clone();
                *self = CowVec::Owned(cloned);
                match self {
                    CowVec::Owned(vec) => vec,
                    CowVec::Shared(_) => unreachable!(),
                }
            }
        }
    }

    /// Access as immutable slice.
    pub fn as_slice(&self) -> &[T] {
        match self {
            CowVec::Owned(vec) => vec,
            CowVec::Shared(arc) => arc,
        }
    }

    /// Appends an element, detaching shared storage first.
    pub fn push(&mut self, value: T) {
        self.make_mut().push(value);
    }

    /// Appends a slice, detaching shared storage first.
    pub fn extend_from_slice(&mut self, other: &[T]) {
        if other.is_empty() {
            return;
        }
        self.make_mut().extend_from_slice(other);
    }

    /// Shortens to the given length, detaching shared storage first.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len() {
            self.make_mut().truncate(len);
        }
    }

    /// Unwraps into a plain Vec, copying only if the storage is shared.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            CowVec::Owned(vec) => vec,
            CowVec::Shared(arc) => Arc::try_unwrap(arc).unwrap_or_else(|arc| (*arc).clone()),
        }
    }
}

impl<T> Clone for CowVec<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        match self {
            CowVec::Owned(vec) => CowVec::Owned(vec.clone()),
            CowVec::Shared(arc) => CowVec::Shared(Arc::clone(arc)),
        }
    }
}

impl<T> Default for CowVec<T>
where
    T: Clone,
{
    fn default() -> Self {
        CowVec::Owned(Vec::new())
    }
}

impl<T> Deref for CowVec<T>
where
    T: Clone,
{
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> From<Vec<T>> for CowVec<T>
where
    T: Clone,
{
    fn from(vec: Vec<T>) -> Self {
        CowVec::Owned(vec)
    }
}

impl<T> From<&[T]> for CowVec<T>
where
    T: Clone,
{
    fn from(slice: &[T]) -> Self {
        CowVec::Owned(slice.to_vec())
    }
}

impl<T> PartialEq for CowVec<T>
where
    T: Clone + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T> Eq for CowVec<T> where T: Clone + Eq {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_clone_is_cheap() {
        let mut buf = CowVec::new(vec![1u8, 2, 3]);
        buf.to_shared();

        let clone = buf.clone();
        match (&buf, &clone) {
            (CowVec::Shared(a), CowVec::Shared(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("expected shared storage"),
        }
    }

    #[test]
    fn test_mutation_detaches_clone() {
        let mut buf = CowVec::new(vec![1u8, 2]);
        buf.to_shared();
        let mut clone = buf.clone();

        clone.push(3);
        assert_eq!(buf.as_slice(), &[1, 2]);
        assert_eq!(clone.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_eq_ignores_storage_mode() {
        let owned = CowVec::new(vec![1u8, 2]);
        let mut shared = CowVec::new(vec![1u8, 2]);
        shared.to_shared();
        assert_eq!(owned, shared);
    }

    #[test]
    fn test_truncate_and_extend() {
        let mut buf = CowVec::new(vec![1u8, 2, 3, 4]);
        buf.truncate(2);
        buf.extend_from_slice(&[9]);
        assert_eq!(buf.as_slice(), &[1, 2, 9]);
    }
}
