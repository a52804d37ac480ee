//! Text-backed status enums for leads, clients and tasks.
//!
//! Each enum is stored as `TEXT` in the Record Store and constrained by a
//! `CHECK` in the migrations. The string returned by `as_str` is the exact
//! value persisted in the column and used on the wire.

use serde::{Deserialize, Serialize};

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Return the value as stored in the database.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $val ),+
                }
            }

            /// Parse a stored value. Returns `None` for unknown values.
            pub fn from_str(s: &str) -> Option<Self> {
                match s {
                    $( $val => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

define_text_enum! {
    /// Coarse lifecycle of a lead.
    LeadStatus {
        New = "new",
        Contacted = "contacted",
        Qualified = "qualified",
        Converted = "converted",
    }
}

define_text_enum! {
    /// Outreach sub-state of a lead. An absent value means the same as `Pending`.
    CallStatus {
        Pending = "pending",
        NoAnswer = "no_answer",
        AppointmentScheduled = "appointment_scheduled",
        Agreed = "agreed",
        NotInterested = "not_interested",
    }
}

define_text_enum! {
    ClientStatus {
        Active = "active",
        Inactive = "inactive",
    }
}

define_text_enum! {
    TaskPriority {
        Low = "low",
        Medium = "medium",
        High = "high",
    }
}

define_text_enum! {
    TaskStatus {
        Todo = "todo",
        InProgress = "in_progress",
        Done = "done",
    }
}
