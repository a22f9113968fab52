//! DSL (Domain Specific Language) parser for converter design files.
//!
//! Design files (`.dcd`) are line-oriented and human-editable. Each line is
//! either a directive, an electrical parameter, a comment, or empty.
//!
//! # Grammar Overview
//!
//! ```text
//! design      = { line }
//! line        = comment | directive | parameter | empty
//! comment     = ('#' | ';') { any_char }
//! parameter   = name ['='] value
//! directive   = '.' directive_name { argument }
//! param_list  = ['('] { name '=' value } [')']
//!
//! directive_name = "topology" | "core" | "material" | "limits" | "sim" | "margin"
//! name        = identifier
//! value       = number [unit_suffix]
//!
//! number      = ['-'] digit+ ['.' digit+] [('e'|'E') ['-'|'+'] digit+]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! identifier  = (letter | '_') { letter | digit | '_' | '-' }
//! ```
//!
//! # Parameters
//!
//! | Name | Aliases | Unit | Default |
//! |------|---------|------|---------|
//! | vin | | V | required |
//! | vout | vo | V | required |
//! | pout | po, power | W | required |
//! | fsw | frequency | Hz | 10k |
//! | ripple | | % of IL avg | 20 |
//! | vripple | | % of Vo | 0.5 |
//! | eff | efficiency | % | 100 |
//!
//! # Directives
//!
//! | Directive | Description | Syntax |
//! |-----------|-------------|--------|
//! | .topology | Converter topology | `.topology buck\|boost` |
//! | .core | Select a core, optionally overriding fields | `.core <name> [(al= bsat= ae=)]` |
//! | .material | Define a core material | `.material <name> (al= bsat= ae=)` |
//! | .limits | Hardware limits | `.limits isat=<A> vgs=<V>` |
//! | .sim | Waveform grid | `.sim cycles=<n> samples=<n>` |
//! | .margin | Saturation safety margin | `.margin 0.8` |
//!
//! Parameters, `.topology`, `.core` and `.margin` may each be given once.
//! `.limits` and `.sim` may span several lines as long as no key repeats.
//!
//! # Example
//!
//! ```text
//! # 12V -> 5V buck on a PC40 core
//! .topology buck
//! .core pc40
//! .limits isat=10 vgs=10
//!
//! vin   12
//! vout  5
//! pout  20
//! fsw   10k
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a design DSL string into an AST.
pub fn parse(input: &str) -> Result<DesignAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer);
    parser.parse()
}

/// Parse a design DSL file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<DesignAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::DesignError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
