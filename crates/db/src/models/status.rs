//! Enums for the SMALLINT code columns.
//!
//! Discriminants are the stored values. For `RestrictionKind` they are also
//! the ids seeded into the `restrictions` lookup table.

/// SMALLINT code as stored.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident = $val:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $variant = $val ),+
        }

        impl $name {
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Decode a stored code; `None` for a value no variant uses.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Name shown on admin pages.
            pub fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Why a room is unavailable (`room_restrictions.restriction_id`).
    RestrictionKind {
        Reservation = 1 => "Reservation",
        OwnerBlock = 2 => "Owner Block",
    }
}

define_status_enum! {
    /// `reservations.processed`.
    ProcessedStatus {
        New = 0 => "New",
        Processed = 1 => "Processed",
    }
}
