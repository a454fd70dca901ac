//! Identifier-based equality for stored entities.
//!
//! Every entity gets its `i64` id from the store on insert. Two values with
//! the same id describe the same row, so `PartialEq`, `Eq` and `Hash` only
//! look at the id.

/// A value that carries a store-assigned identifier.
pub trait Identified {
    fn id(&self) -> i64;
}

/// Implement [`Identified`], `PartialEq`, `Eq` and `Hash` by the `id` field.
#[macro_export]
macro_rules! identity_eq {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::identity::Identified for $ty {
                fn id(&self) -> i64 {
                    self.id
                }
            }

            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    self.id == other.id
                }
            }

            impl Eq for $ty {}

            impl std::hash::Hash for $ty {
                fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                    std::hash::Hash::hash(&self.id, state);
                }
            }
        )+
    };
}
