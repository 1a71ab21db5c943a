//! Newtype IDs for type-safe entity references.
//!
//! Two flavours exist: `define_id!` wraps a sequential `i32` (records whose
//! id is assigned by counting, such as damage returns) and `define_key!`
//! wraps an opaque `String` (records keyed by document ids like `PO-2023-001`
//! or `B001`). Both prevent mixing ids from different entity types.

/// Macro to define a sequential, integer-backed ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `as_i32()`, `next()`
/// - `From<i32>`, `Into<i32>` and `FromStr` implementations
///
/// # Example
///
/// ```rust
/// # use stockinvent_core::define_id;
/// define_id!(TicketId);
///
/// let id = TicketId::new(4);
/// assert_eq!(id.next().as_i32(), 5);
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
            PartialOrd,
            Ord,
            Hash,
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

            /// The id that follows this one in sequence.
            #[must_use]
            pub const fn next(&self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
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

/// Macro to define an opaque, string-backed key wrapper.
///
/// # Example
///
/// ```rust
/// # use stockinvent_core::define_key;
/// define_key!(ShelfKey);
///
/// let key = ShelfKey::new("A-12");
/// assert_eq!(key.as_str(), "A-12");
/// ```
#[macro_export]
macro_rules! define_key {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new key.
            #[must_use]
            pub fn new(key: impl Into<String>) -> Self {
                Self(key.into())
            }

            /// Borrow the key as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(key: &str) -> Self {
                Self(key.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(key: String) -> Self {
                Self(key)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Document keys
define_key!(ProductId);
define_key!(OrderId);
define_key!(BillId);
define_key!(RetailerId);
define_key!(ArchiveEntryId);
define_key!(UserId);

// Sequential ids
define_id!(ReturnId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_return_id_sequence() {
        let id = ReturnId::new(5);
        assert_eq!(id.next(), ReturnId::new(6));
        assert_eq!("7".parse::<ReturnId>().unwrap(), ReturnId::new(7));
        assert!("seven".parse::<ReturnId>().is_err());
    }

    #[test]
    fn test_keys_are_transparent_in_json() {
        let id = OrderId::new("PO-2023-001");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"PO-2023-001\"");
        let back: OrderId = serde_json::from_str("\"PO-2023-001\"").unwrap();
        assert_eq!(back, id);
    }
}
