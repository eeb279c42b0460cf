//! Field type classification.
//!
//! Maps a base-type keyword, optionally pointer-qualified, to the family that
//! selects its `printf` conversion.

use serde::Serialize;

/// Qualifiers skipped (once) in front of the base type.
pub const QUALIFIERS: &[&str] = &["const", "volatile"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormatFamily {
    /// Unsupported type; aborts the enclosing structure.
    Invalid,
    Integer32,
    Integer64,
    FloatingPoint,
    /// `char *`, always printed as text.
    CString,
    Pointer,
    Character,
}

impl FormatFamily {
    pub fn classify(keyword: &str, pointer: bool) -> Self {
        let base = match keyword {
            "int" | "short" => Self::Integer32,
            "long" => Self::Integer64,
            "float" | "double" => Self::FloatingPoint,
            "char" => Self::Character,
            _ => return Self::Invalid,
        };

        match (base, pointer) {
            (_, false) => base,
            (Self::Character, true) => Self::CString,
            (_, true) => Self::Pointer,
        }
    }

    pub fn is_valid(self) -> bool {
        self != Self::Invalid
    }

    /// `printf` conversion for this family; `None` for [`FormatFamily::Invalid`].
    pub fn specifier(self) -> Option<&'static str> {
        match self {
            Self::Invalid => None,
            Self::Integer32 => Some("%d"),
            Self::Integer64 => Some("%ld"),
            Self::FloatingPoint => Some("%f"),
            Self::CString => Some("%s"),
            Self::Pointer => Some("%p"),
            Self::Character => Some("%c"),
        }
    }
}

pub fn is_qualifier(word: &str) -> bool {
    QUALIFIERS.contains(&word)
}
