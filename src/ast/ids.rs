//! Typed handles into the syntax tree arenas.
//!
//! Each arena hands out its own handle type, so a `ScopeId` can never be used
//! to index the node arena by mistake.

use std::fmt;

/// A handle that can be turned into and out of a raw arena slot.
pub trait ArenaId: Copy {
    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
        pub struct $name(u32);

        impl ArenaId for $name {
            fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_id!(NodeId);
define_id!(ScopeId);
