//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. Sequential IDs are
//! issued by an [`IdSequence`] owned by whoever assembles the objects, so
//! construction stays deterministic.

use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicI32, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe sequential ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>` and `Into<i32>` implementations
///
/// # Example
///
/// ```rust
/// # use bazaar_core::define_id;
/// define_id!(ShelfId);
/// define_id!(BinId);
///
/// let shelf = ShelfId::new(1);
/// let bin = BinId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: ShelfId = bin;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Macro to define a random (UUID v4) identifier.
macro_rules! define_uuid_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random ID.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// First eight hex characters, for compact display.
            #[must_use]
            pub fn short(&self) -> String {
                self.0.simple().to_string().chars().take(8).collect()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(AccountNumber);

define_uuid_id!(UserId);
define_uuid_id!(OrderId);
define_uuid_id!(StudentId);

/// Issues sequential IDs of type `T`.
///
/// Replaces class-level counters: the sequence is an ordinary value, so two
/// catalogs built in the same process never share numbering.
///
/// ```rust
/// use bazaar_core::{IdSequence, ProductId};
///
/// let ids: IdSequence<ProductId> = IdSequence::default();
/// assert_eq!(ids.next_id(), ProductId::new(1));
/// assert_eq!(ids.next_id(), ProductId::new(2));
/// ```
#[derive(Debug)]
pub struct IdSequence<T> {
    next: AtomicI32,
    _marker: PhantomData<fn() -> T>,
}

impl<T: From<i32>> IdSequence<T> {
    /// Create a sequence whose first issued ID is `first`.
    #[must_use]
    pub const fn starting_at(first: i32) -> Self {
        Self {
            next: AtomicI32::new(first),
            _marker: PhantomData,
        }
    }

    /// Issue the next ID.
    pub fn next_id(&self) -> T {
        T::from(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// The ID that the next call to [`next_id`](Self::next_id) will return.
    #[must_use]
    pub fn peek(&self) -> T {
        T::from(self.next.load(Ordering::Relaxed))
    }
}

impl<T: From<i32>> Default for IdSequence<T> {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
