//! Syntactic categories that rules and checks are keyed on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Syntactic category of a [`SyntaxNode`](crate::SyntaxNode).
///
/// Variable, parameter and function declarations plus return and goto
/// statements drive the built-in checks. All other kinds are only ever
/// matched against naming rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxKind {
    /// Root of a parsed file. Never has a location of its own.
    TranslationUnit,
    /// Variable declaration (`int count;`).
    VarDecl,
    /// Function parameter (`char **argv`).
    ParmDecl,
    /// Function definition or prototype.
    FunctionDecl,
    /// `return` statement.
    ReturnStmt,
    /// `goto` statement.
    GotoStmt,
    /// Struct or union member.
    FieldDecl,
    /// Struct definition.
    StructDecl,
    /// Union definition.
    UnionDecl,
    /// Enum definition.
    EnumDecl,
    /// Enumerator inside an enum body.
    EnumConstantDecl,
    /// `typedef` name.
    TypedefDecl,
    /// `#define` name.
    MacroDefinition,
    /// Statement label (`out:`).
    LabelStmt,
    /// C++ class definition.
    ClassDecl,
    /// C++ namespace definition.
    Namespace,
}

impl SyntaxKind {
    /// Every known kind, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::TranslationUnit,
        Self::VarDecl,
        Self::ParmDecl,
        Self::FunctionDecl,
        Self::ReturnStmt,
        Self::GotoStmt,
        Self::FieldDecl,
        Self::StructDecl,
        Self::UnionDecl,
        Self::EnumDecl,
        Self::EnumConstantDecl,
        Self::TypedefDecl,
        Self::MacroDefinition,
        Self::LabelStmt,
        Self::ClassDecl,
        Self::Namespace,
    ];

    /// Stable lowercase name used as the key in the `[Rules]` table.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TranslationUnit => "translation_unit",
            Self::VarDecl => "var_decl",
            Self::ParmDecl => "parm_decl",
            Self::FunctionDecl => "function_decl",
            Self::ReturnStmt => "return_stmt",
            Self::GotoStmt => "goto_stmt",
            Self::FieldDecl => "field_decl",
            Self::StructDecl => "struct_decl",
            Self::UnionDecl => "union_decl",
            Self::EnumDecl => "enum_decl",
            Self::EnumConstantDecl => "enum_constant_decl",
            Self::TypedefDecl => "typedef_decl",
            Self::MacroDefinition => "macro_definition",
            Self::LabelStmt => "label_stmt",
            Self::ClassDecl => "class_decl",
            Self::Namespace => "namespace",
        }
    }

    /// Whether a built-in check treats this kind specially.
    #[must_use]
    pub const fn is_special(self) -> bool {
        matches!(
            self,
            Self::VarDecl | Self::ParmDecl | Self::FunctionDecl | Self::ReturnStmt | Self::GotoStmt
        )
    }

    /// Whether this kind declares something that may carry a pointer type.
    #[must_use]
    pub const fn is_variable(self) -> bool {
        matches!(self, Self::VarDecl | Self::ParmDecl)
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a name does not correspond to any [`SyntaxKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown syntax kind `{0}`")]
pub struct UnknownKind(pub String);

impl FromStr for SyntaxKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownKind(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in SyntaxKind::ALL {
            assert_eq!(kind.as_str().parse::<SyntaxKind>(), Ok(kind));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("VAR_DECL".parse(), Ok(SyntaxKind::VarDecl));
        assert_eq!("Goto_Stmt".parse(), Ok(SyntaxKind::GotoStmt));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "cxx_method".parse::<SyntaxKind>().unwrap_err();
        assert_eq!(err, UnknownKind("cxx_method".into()));
        assert!(err.to_string().contains("cxx_method"));
    }

    #[test]
    fn names_are_unique_and_lowercase() {
        let mut names: Vec<&str> = SyntaxKind::ALL.iter().map(|k| k.as_str()).collect();
        assert!(names.iter().all(|n| n.chars().all(|c| c.is_ascii_lowercase() || c == '_')));
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), SyntaxKind::ALL.len());
    }

    #[test]
    fn special_kinds() {
        assert!(SyntaxKind::GotoStmt.is_special());
        assert!(!SyntaxKind::TypedefDecl.is_special());
        assert!(SyntaxKind::ParmDecl.is_variable());
        assert!(!SyntaxKind::FieldDecl.is_variable());
    }
}
