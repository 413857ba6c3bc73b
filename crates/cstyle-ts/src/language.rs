//! Supported source dialects and how files map to them.

use std::path::Path;
use tree_sitter::Language;

/// A C-family dialect with a Tree-sitter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// C, parsed with `tree-sitter-c`.
    C,
    /// C++, parsed with `tree-sitter-cpp`.
    Cpp,
}

impl Dialect {
    /// Every dialect.
    pub const ALL: [Self; 2] = [Self::C, Self::Cpp];

    /// Language identifier (e.g., `"c"`, `"cpp"`).
    #[must_use]
    pub fn language_id(self) -> &'static str {
        match self {
            Self::C => "c",
            Self::Cpp => "cpp",
        }
    }

    /// File extensions this dialect handles, without the dot.
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::C => &["c", "h"],
            Self::Cpp => &["cc", "cpp", "cxx", "c++", "hh", "hpp", "hxx", "h++"],
        }
    }

    /// Picks the dialect from a file extension, ignoring case.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.extensions().contains(&ext.as_str()))
    }

    /// Grammar to retry with when `path` does not parse as this dialect.
    ///
    /// `.h` is shared by C and C++, so a header that is not valid C gets a
    /// second chance as C++.
    #[must_use]
    pub fn header_fallback(self, path: &Path) -> Option<Self> {
        let is_h = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("h"));
        (self == Self::C && is_h).then_some(Self::Cpp)
    }

    /// Tree-sitter grammar for this dialect.
    #[must_use]
    pub fn language(self) -> Language {
        match self {
            Self::C => tree_sitter_c::LANGUAGE.into(),
            Self::Cpp => tree_sitter_cpp::LANGUAGE.into(),
        }
    }
}

/// Whether any dialect handles `path`.
#[must_use]
pub fn is_supported(path: &Path) -> bool {
    Dialect::from_path(path).is_some()
}
