//! List-kinds command implementation.

use cstyle_core::options::OPTION_SPECS;
use cstyle_core::SyntaxKind;

/// Checks that look at a node of this kind besides its naming rule.
fn checks_for(kind: SyntaxKind) -> &'static str {
    if !kind.is_special() {
        return "naming-pattern";
    }
    match kind {
        SyntaxKind::VarDecl | SyntaxKind::ParmDecl => "pointer-prefix, naming-pattern",
        SyntaxKind::FunctionDecl => "resets return count, naming-pattern",
        SyntaxKind::ReturnStmt => "goto-preference, naming-pattern",
        SyntaxKind::GotoStmt => "goto-harmful, naming-pattern",
        _ => "naming-pattern",
    }
}

/// Runs the list-kinds command.
pub fn run() {
    println!("Syntax kinds:\n");
    println!("{:<20} Checks", "Kind");
    println!("{}", "-".repeat(60));

    for kind in SyntaxKind::ALL {
        println!("{:<20} {}", kind.as_str(), checks_for(kind));
    }

    println!("\nOptions:\n");
    println!("{:<24} {:<10} Description", "Name", "Default");
    println!("{}", "-".repeat(80));

    for spec in &OPTION_SPECS {
        println!(
            "{:<24} {:<10} {}",
            spec.name,
            spec.default_value().to_toml(),
            spec.doc
        );
    }

    println!("\nNaming rules go in the [Rules] table, keyed by kind, e.g.:");
    println!("  var_decl = '[a-z][a-z0-9_]*'");
    println!("  macro_definition = '[A-Z][A-Z0-9_]*'");
}
