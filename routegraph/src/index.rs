use std::marker::PhantomData;

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
/// A valid node index.
pub struct NodeIndex(usize);
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
/// A valid edge index.
pub struct EdgeIndex(usize);
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone)]
/// A node index that can be `None`.
/// The `None` variant is stored as `usize::MAX`, so a matrix of these is as compact as a matrix of plain indices.
pub struct OptionalNodeIndex(usize);

/// A valid graph index.
pub trait GraphIndex: std::fmt::Debug + Eq + Ord + std::hash::Hash + Copy + From<usize> {
    // No `Into<usize>` on purpose, indices of different kinds should not mix by accident.
    /// Get this index as `usize`.
    fn as_usize(self) -> usize;
}

/// A graph index that can be `None`.
pub trait OptionalGraphIndex<Index: GraphIndex>:
    std::fmt::Debug + Default + Eq + Copy + From<Index> + From<Option<Index>> + Into<Option<Index>>
{
    /// Get this index as `usize`, or `None` if it is marked as invalid.
    fn as_usize(self) -> Option<usize>;

    /// Returns `true` if the index is `None`.
    fn is_none(self) -> bool {
        self.as_usize().is_none()
    }

    /// Returns `true` if the index is `Some`.
    fn is_some(self) -> bool {
        self.as_usize().is_some()
    }

    /// Returns a new optional index that is marked as invalid.
    fn new_none() -> Self {
        Default::default()
    }
}

macro_rules! impl_graph_index {
    ($GraphIndexType:ident, $prefix:literal) => {
        impl GraphIndex for $GraphIndexType {
            #[inline]
            fn as_usize(self) -> usize {
                self.0
            }
        }

        impl From<usize> for $GraphIndexType {
            fn from(source: usize) -> Self {
                debug_assert!(source != usize::MAX);
                Self(source)
            }
        }

        impl std::fmt::Debug for $GraphIndexType {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    };
}

macro_rules! impl_optional_graph_index {
    ($GraphIndexType:ident, $OptionalGraphIndexType:ident, $prefix:literal) => {
        impl OptionalGraphIndex<$GraphIndexType> for $OptionalGraphIndexType {
            #[inline]
            fn as_usize(self) -> Option<usize> {
                if self.0 != usize::MAX {
                    Some(self.0)
                } else {
                    None
                }
            }
        }

        impl Default for $OptionalGraphIndexType {
            fn default() -> Self {
                Self(usize::MAX)
            }
        }

        impl From<$GraphIndexType> for $OptionalGraphIndexType {
            fn from(source: $GraphIndexType) -> Self {
                Self(source.0)
            }
        }

        impl From<Option<$GraphIndexType>> for $OptionalGraphIndexType {
            fn from(source: Option<$GraphIndexType>) -> Self {
                source.map(Self::from).unwrap_or_default()
            }
        }

        impl From<$OptionalGraphIndexType> for Option<$GraphIndexType> {
            fn from(source: $OptionalGraphIndexType) -> Self {
                source.as_usize().map($GraphIndexType)
            }
        }

        impl std::fmt::Debug for $OptionalGraphIndexType {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                if let Some(value) = self.as_usize() {
                    write!(f, "{}{}", $prefix, value)
                } else {
                    write!(f, "None")
                }
            }
        }
    };
}

impl_graph_index!(NodeIndex, "n");
impl_graph_index!(EdgeIndex, "e");
impl_optional_graph_index!(NodeIndex, OptionalNodeIndex, "n");

/// An iterator over the consecutive indices `0..limit` of a graph.
pub struct GraphIndices<Index> {
    current: usize,
    limit: usize,
    index_type: PhantomData<Index>,
}

impl<Index> GraphIndices<Index> {
    /// Iterate over the indices `0..limit`.
    pub fn new(limit: usize) -> Self {
        Self {
            current: 0,
            limit,
            index_type: PhantomData,
        }
    }
}

impl<Index: GraphIndex> Iterator for GraphIndices<Index> {
    type Item = Index;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current < self.limit {
            let result = Index::from(self.current);
            self.current += 1;
            Some(result)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.limit - self.current;
        (remaining, Some(remaining))
    }
}

impl<Index: GraphIndex> ExactSizeIterator for GraphIndices<Index> {}
