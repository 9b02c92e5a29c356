/// Defines an index new-type together with a `Vec` new-type that can only be
/// indexed by it.
///
/// Representations that keep vertices in a fixed order (matrix rows, adjacency
/// lists) use this so that a position in the vertex order cannot be confused
/// with a multiplicity or a raw count.
#[macro_export]
macro_rules! define_indexed_vec {
    (
        $(#[$idx_meta:meta])*
        $idx_vis:vis struct $Idx:ident ;

        $(#[$vec_meta:meta])*
        $vec_vis:vis struct $Vec:ident ;
    ) => {
        // index new-type

        $(#[$idx_meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $idx_vis struct $Idx(pub usize);

        impl ::std::convert::From<usize> for $Idx {
            fn from(value: usize) -> Self {
                $Idx(value)
            }
        }

        impl ::std::convert::From<$Idx> for usize {
            fn from(value: $Idx) -> Self {
                value.0
            }
        }

        // vector new-type

        $(#[$vec_meta])*
        #[derive(Clone, Debug, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vec_vis struct $Vec<T>(::std::vec::Vec<T>);

        // no `T: Default` bound, so storages of vertex identities stay `Default`
        impl<T> ::std::default::Default for $Vec<T> {
            fn default() -> Self { Self::new() }
        }

        impl<T> ::std::ops::Index<$Idx> for $Vec<T> {
            type Output = T;
            #[inline] fn index(&self, i: $Idx) -> &Self::Output { &self.0[i.0] }
        }
        impl<T> ::std::ops::IndexMut<$Idx> for $Vec<T> {
            #[inline] fn index_mut(&mut self, i: $Idx) -> &mut Self::Output { &mut self.0[i.0] }
        }

        impl<T> $Vec<T> {
            #[inline] pub fn new() -> Self { Self(::std::vec::Vec::new()) }

            #[inline] pub fn len(&self) -> usize { self.0.len() }
            #[inline] pub fn is_empty(&self) -> bool { self.0.is_empty() }

            #[inline] pub fn push(&mut self, value: T) -> $Idx {
                self.0.push(value);
                $Idx(self.0.len() - 1)
            }

            /// Removes the entry at `idx`, shifting every later entry down by one.
            #[inline] pub fn remove(&mut self, idx: $Idx) -> T { self.0.remove(idx.0) }

            /// Position of the first entry satisfying `pred`.
            pub fn position(&self, pred: impl FnMut(&T) -> bool) -> Option<$Idx> {
                self.0.iter().position(pred).map($Idx)
            }

            /// Iterates over all valid indices, in order.
            pub fn indices(&self) -> impl Iterator<Item = $Idx> {
                (0..self.0.len()).map($Idx)
            }

            #[inline] pub fn iter<'a>(&'a self) -> ::std::iter::Map<::std::iter::Enumerate<::std::slice::Iter<'a, T>>, fn((usize, &T)) -> ($Idx, &T)> {
                self.0.iter().enumerate().map(|(u, t)| ($Idx(u), t))
            }
            #[inline] pub fn iter_mut<'a>(&'a mut self) -> ::std::iter::Map<
                ::std::iter::Enumerate<::std::slice::IterMut<'a, T>>,
                fn((usize, &mut T)) -> ($Idx, &mut T),
            > { self.0.iter_mut().enumerate().map(|(u, t)| ($Idx(u), t)) }

            #[inline] pub fn values(&self) -> ::std::slice::Iter<'_, T> { self.0.iter() }

            #[inline] pub fn raw(&self) -> &[T] { &self.0 }
        }

        impl<T: Clone> $Vec<T> {
            /// `len` copies of `value`.
            pub fn filled(value: T, len: usize) -> Self {
                Self(::std::vec![value; len])
            }
        }

        impl<T> ::std::iter::FromIterator<T> for $Vec<T> {
            #[inline] fn from_iter<I: ::std::iter::IntoIterator<Item = T>>(it: I) -> Self {
                Self(::std::vec::Vec::from_iter(it))
            }
        }

        impl<T> ::std::iter::Extend<T> for $Vec<T> {
            #[inline] fn extend<I: ::std::iter::IntoIterator<Item = T>>(&mut self, it: I) {
                self.0.extend(it)
            }
        }

        impl<T> ::std::convert::From<::std::vec::Vec<T>> for $Vec<T> {
            #[inline] fn from(v: ::std::vec::Vec<T>) -> Self { Self(v) }
        }

        impl<'a, T> ::std::iter::IntoIterator for &'a $Vec<T> {
            type Item = ($Idx, &'a T);
            type IntoIter = ::std::iter::Map<
                ::std::iter::Enumerate<::std::slice::Iter<'a, T>>,
                fn((usize, &T)) -> ($Idx, &T),
            >;
            fn into_iter(self) -> Self::IntoIter {
                self.0.iter().enumerate().map(|(u, t)| ($Idx(u), t))
            }
        }
    };
}

#[cfg(test)]
mod test {
    use crate::graph::{Slot, SlotVec};
    use crate::vertex::{Vertex, VertexSource};

    #[test]
    fn default_needs_no_default_elements() {
        let mut stored: SlotVec<Vertex> = SlotVec::default();
        assert!(stored.is_empty());

        let source = VertexSource::new();
        let (a, b) = (source.fresh(), source.fresh());
        assert_eq!(stored.push(a), Slot(0));
        let at_b = stored.push(b);
        assert_eq!(stored.position(|v| *v == b), Some(at_b));

        assert_eq!(stored.remove(Slot(0)), a);
        assert_eq!(stored[Slot(0)], b);
        assert_eq!(stored.indices().collect::<Vec<_>>(), vec![Slot(0)]);
    }
}
