//! Parser for the design DSL.

use std::collections::HashMap;

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{DesignError, Result};

/// Parser for design DSL.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            current: Token {
                kind: TokenKind::Newline,
                text: String::new(),
                line: 1,
                column: 1,
            },
        }
    }

    /// Parse the entire design description.
    pub fn parse(&mut self) -> Result<DesignAst> {
        let mut ast = DesignAst::new();
        self.advance()?;

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Newline => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => self.parse_parameter(&mut ast)?,
                _ => {
                    return Err(DesignError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            self.expect_line_end()?;
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(DesignError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn expect_line_end(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline => self.advance(),
            TokenKind::Eof => Ok(()),
            _ => Err(DesignError::parse(
                self.current.line,
                format!("unexpected trailing token: {:?}", self.current.text),
            )),
        }
    }

    fn expect_value(&mut self) -> Result<f64> {
        let tok = self.expect(TokenKind::Number)?;
        parse_value(&tok.text)
            .ok_or_else(|| DesignError::parse(tok.line, format!("invalid number: {}", tok.text)))
    }

    /// `<name> <value>`
    fn parse_parameter(&mut self, ast: &mut DesignAst) -> Result<()> {
        let name = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let kind = ParamKind::from_name(&name)
            .ok_or_else(|| DesignError::UnknownParameter {
                name: name.clone(),
                line,
            })?;

        // Accept both "vin 12" and "vin = 12"
        if self.current.kind == TokenKind::Equals {
            self.advance()?;
        }
        let value = self.expect_value()?;

        if ast.parameters.contains_key(&kind) {
            return Err(DesignError::DuplicateParameter {
                name: kind.name().to_string(),
                line,
            });
        }
        ast.parameters.insert(kind, Located { value, line });
        Ok(())
    }

    fn parse_directive(&mut self, ast: &mut DesignAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".topology" => {
                let name = self.expect(TokenKind::Identifier)?.text;
                if ast.topology.is_some() {
                    return Err(duplicate(".topology", line));
                }
                ast.topology = Some(Located { value: name, line });
            }
            ".core" => {
                let name = self.expect(TokenKind::Identifier)?.text;
                let overrides = self.parse_param_list(line)?;
                if ast.core.is_some() {
                    return Err(duplicate(".core", line));
                }
                ast.core = Some(CoreRef {
                    name,
                    overrides,
                    line,
                });
            }
            ".material" => {
                let name = self.expect(TokenKind::Identifier)?.text;
                let params = self.parse_param_list(line)?;
                let key = name.to_lowercase();
                if ast.materials.contains_key(&key) {
                    return Err(DesignError::DuplicateMaterial { name });
                }
                ast.materials.insert(key, MaterialDef { name, params, line });
            }
            ".limits" => {
                let params = self.parse_param_list(line)?;
                merge_params(".limits", &mut ast.limits, params, line)?;
            }
            ".sim" => {
                let params = self.parse_param_list(line)?;
                merge_params(".sim", &mut ast.sim, params, line)?;
            }
            ".margin" => {
                let margin = self.expect_value()?;
                if ast.margin.is_some() {
                    return Err(duplicate(".margin", line));
                }
                ast.margin = Some(margin);
            }
            _ => {
                return Err(DesignError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    /// Parse `key=value` pairs, optionally wrapped in parentheses:
    /// `(al=2000 bsat=0.3)` or `isat=10 vgs=12`.
    fn parse_param_list(&mut self, line: usize) -> Result<HashMap<String, f64>> {
        let mut params = HashMap::new();

        let parenthesized = self.current.kind == TokenKind::OpenParen;
        if parenthesized {
            self.advance()?;
        }

        while self.current.kind == TokenKind::Identifier {
            let param_name = self.expect(TokenKind::Identifier)?.text;
            self.expect(TokenKind::Equals)?;
            let value = self.expect_value()?;
            let key = param_name.to_lowercase();
            if params.contains_key(&key) {
                return Err(duplicate(&key, line));
            }
            params.insert(key, value);
        }

        if parenthesized {
            self.expect(TokenKind::CloseParen).map_err(|_| {
                DesignError::parse(line, "unterminated parameter list, expected ')'")
            })?;
        }

        Ok(params)
    }
}

fn duplicate(name: &str, line: usize) -> DesignError {
    DesignError::DuplicateParameter {
        name: name.to_string(),
        line,
    }
}

/// Keys of a repeated `.limits`/`.sim` line may not overlap earlier ones.
fn merge_params(
    directive: &str,
    into: &mut HashMap<String, f64>,
    params: HashMap<String, f64>,
    line: usize,
) -> Result<()> {
    for (key, value) in params {
        if into.contains_key(&key) {
            return Err(duplicate(&format!("{} {}", directive, key), line));
        }
        into.insert(key, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsl::parse;

    #[test]
    fn test_parse_parameters() {
        let ast = parse("vin 12\nvout = 5\npower 20\nfsw 100k").unwrap();
        assert_eq!(ast.param(ParamKind::InputVoltage), Some(12.0));
        assert_eq!(ast.param(ParamKind::OutputVoltage), Some(5.0));
        assert_eq!(ast.param(ParamKind::OutputPower), Some(20.0));
        assert_eq!(ast.param(ParamKind::SwitchingFrequency), Some(100e3));
        assert_eq!(ast.parameters[&ParamKind::SwitchingFrequency].line, 4);
    }

    #[test]
    fn test_parse_topology_and_core() {
        let ast = parse(".topology boost\n.core pc40 (bsat=0.42)").unwrap();
        assert_eq!(ast.topology.unwrap().value, "boost");
        let core = ast.core.unwrap();
        assert_eq!(core.name, "pc40");
        assert_eq!(core.overrides["bsat"], 0.42);
        assert_eq!(core.line, 2);
    }

    #[test]
    fn test_parse_material() {
        let ast = parse(".material N87 (al=2200 bsat=0.39 ae=97)").unwrap();
        let material = &ast.materials["n87"];
        assert_eq!(material.name, "N87");
        assert_eq!(material.params["ae"], 97.0);
    }

    #[test]
    fn test_parse_limits_sim_margin() {
        let ast = parse(".limits isat=6 vgs=12\n.sim cycles=5 samples=2k\n.margin 0.7").unwrap();
        assert_eq!(ast.limits["isat"], 6.0);
        assert_eq!(ast.limits["vgs"], 12.0);
        assert_eq!(ast.sim["cycles"], 5.0);
        assert_eq!(ast.sim["samples"], 2000.0);
        assert_eq!(ast.margin, Some(0.7));
    }

    #[test]
    fn test_parse_with_comments() {
        let input = "# Buck stage\nvin 12 ; from the bench supply\n\n";
        let ast = parse(input).unwrap();
        assert_eq!(ast.parameters.len(), 1);
    }

    #[test]
    fn test_unknown_parameter() {
        let err = parse("vin 12\nvbus 48").unwrap_err();
        assert!(matches!(err, DesignError::UnknownParameter { ref name, line: 2 } if name == "vbus"));
    }

    #[test]
    fn test_duplicate_parameter() {
        let err = parse("vin 12\nvin 24").unwrap_err();
        assert!(matches!(err, DesignError::DuplicateParameter { line: 2, .. }));
    }

    #[test]
    fn test_repeated_directives_rejected() {
        let err = parse(".topology buck\n.topology boost").unwrap_err();
        assert!(matches!(err, DesignError::DuplicateParameter { ref name, line: 2 } if name == ".topology"));

        let err = parse(".core pc40\n.core ferrite").unwrap_err();
        assert!(matches!(err, DesignError::DuplicateParameter { ref name, .. } if name == ".core"));

        let err = parse(".margin 0.8\n.margin 0.7").unwrap_err();
        assert!(matches!(err, DesignError::DuplicateParameter { ref name, .. } if name == ".margin"));
    }

    #[test]
    fn test_repeated_keys_rejected() {
        let err = parse(".limits isat=5\n.limits isat=7").unwrap_err();
        assert!(matches!(err, DesignError::DuplicateParameter { ref name, line: 2 } if name == ".limits isat"));

        let err = parse(".sim samples=10 samples=20").unwrap_err();
        assert!(matches!(err, DesignError::DuplicateParameter { ref name, .. } if name == "samples"));

        // Disjoint keys on separate lines still merge
        let ast = parse(".limits isat=5\n.limits vgs=12").unwrap();
        assert_eq!(ast.limits.len(), 2);
    }

    #[test]
    fn test_duplicate_material() {
        let err = parse(".material a (al=1)\n.material A (al=2)").unwrap_err();
        assert!(matches!(err, DesignError::DuplicateMaterial { .. }));
    }

    #[test]
    fn test_unknown_directive() {
        let err = parse(".input in").unwrap_err();
        assert!(matches!(err, DesignError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_trailing_tokens_rejected() {
        assert!(parse("vin 12 13").is_err());
        assert!(parse(".core pc40 (al=1").is_err());
    }
}
