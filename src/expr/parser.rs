//! Lexer and recursive-descent parser for the restricted grammar.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expr    := term { ("+" | "-") term }
//! term    := power { ("*" | "/") power | power-adjacent }   (implicit mult)
//! power   := unary [ "^" power ]                            (right assoc)
//! unary   := ("-" | "+") unary | primary
//! primary := number | ident | ident "(" args ")" | "(" expr ")"
//! ```
//!
//! Implicit multiplication covers the forms students actually type: `2x`,
//! `2(x+1)`, `x(x-1)`, `2pi`. Depth counts actual nesting (parentheses,
//! call arguments, chained unary minus, exponent towers), and a node budget
//! bounds the tree on adversarial input.

use super::{BinaryOp, Constant, Expr, ExprError, Func, MAX_DEPTH, MAX_NODES};

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
    Comma,
}

fn lex(input: &str) -> Result<Vec<Tok>, ExprError> {
    let mut toks = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        match c {
            ' ' => i += 1,
            '+' => {
                toks.push(Tok::Plus);
                i += 1;
            }
            '-' => {
                toks.push(Tok::Minus);
                i += 1;
            }
            '*' => {
                toks.push(Tok::Star);
                i += 1;
            }
            '/' => {
                toks.push(Tok::Slash);
                i += 1;
            }
            '^' => {
                toks.push(Tok::Caret);
                i += 1;
            }
            '(' => {
                toks.push(Tok::LParen);
                i += 1;
            }
            ')' => {
                toks.push(Tok::RParen);
                i += 1;
            }
            ',' => {
                toks.push(Tok::Comma);
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                    i += 1;
                }
                let text = &input[start..i];
                let value = text.parse::<f64>().map_err(|_| ExprError::UnexpectedToken(start))?;
                toks.push(Tok::Num(value));
            }
            'a'..='z' => {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_lowercase() {
                    i += 1;
                }
                toks.push(Tok::Ident(input[start..i].to_string()));
            }
            other => return Err(ExprError::UnexpectedChar(other)),
        }
    }
    Ok(toks)
}

pub(crate) fn parse(input: &str) -> Result<Expr, ExprError> {
    let toks = lex(input)?;
    if toks.is_empty() {
        return Err(ExprError::UnexpectedEnd);
    }
    let mut parser = Parser { toks, pos: 0, nodes: 0 };
    let expr = parser.expr(0)?;
    if parser.pos != parser.toks.len() {
        return Err(ExprError::UnexpectedToken(parser.pos));
    }
    Ok(expr)
}

struct Parser {
    toks: Vec<Tok>,
    pos: usize,
    nodes: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos)
    }

    fn bump(&mut self) -> Option<Tok> {
        let tok = self.toks.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn node(&mut self, expr: Expr) -> Result<Expr, ExprError> {
        self.nodes += 1;
        if self.nodes > MAX_NODES {
            return Err(ExprError::TooLarge);
        }
        Ok(expr)
    }

    fn expr(&mut self, depth: usize) -> Result<Expr, ExprError> {
        if depth > MAX_DEPTH {
            return Err(ExprError::TooDeep);
        }
        let mut lhs = self.term(depth)?;
        while let Some(op) = match self.peek() {
            Some(Tok::Plus) => Some(BinaryOp::Add),
            Some(Tok::Minus) => Some(BinaryOp::Sub),
            _ => None,
        } {
            self.bump();
            let rhs = self.term(depth)?;
            lhs = self.node(Expr::Binary(op, Box::new(lhs), Box::new(rhs)))?;
        }
        Ok(lhs)
    }

    fn term(&mut self, depth: usize) -> Result<Expr, ExprError> {
        let mut lhs = self.power(depth)?;
        loop {
            let op = match self.peek() {
                Some(Tok::Star) => {
                    self.bump();
                    BinaryOp::Mul
                }
                Some(Tok::Slash) => {
                    self.bump();
                    BinaryOp::Div
                }
                // Implicit multiplication: a primary directly follows.
                Some(Tok::Num(_)) | Some(Tok::Ident(_)) | Some(Tok::LParen) => BinaryOp::Mul,
                _ => break,
            };
            let rhs = self.power(depth)?;
            lhs = self.node(Expr::Binary(op, Box::new(lhs), Box::new(rhs)))?;
        }
        Ok(lhs)
    }

    fn power(&mut self, depth: usize) -> Result<Expr, ExprError> {
        let base = self.unary(depth)?;
        if matches!(self.peek(), Some(Tok::Caret)) {
            self.bump();
            // Right-associative: 2^3^2 is 2^(3^2).
            let exponent = self.power(depth + 1)?;
            return self.node(Expr::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn unary(&mut self, depth: usize) -> Result<Expr, ExprError> {
        if depth > MAX_DEPTH {
            return Err(ExprError::TooDeep);
        }
        match self.peek() {
            Some(Tok::Minus) => {
                self.bump();
                let inner = self.unary(depth + 1)?;
                self.node(Expr::Unary(Box::new(inner)))
            }
            Some(Tok::Plus) => {
                self.bump();
                self.unary(depth + 1)
            }
            _ => self.primary(depth),
        }
    }

    fn primary(&mut self, depth: usize) -> Result<Expr, ExprError> {
        match self.bump() {
            Some(Tok::Num(value)) => self.node(Expr::Number(value)),
            Some(Tok::Ident(name)) => self.ident(name, depth),
            Some(Tok::LParen) => {
                let inner = self.expr(depth + 1)?;
                match self.bump() {
                    Some(Tok::RParen) => Ok(inner),
                    Some(_) => Err(ExprError::UnexpectedToken(self.pos - 1)),
                    None => Err(ExprError::UnexpectedEnd),
                }
            }
            Some(_) => Err(ExprError::UnexpectedToken(self.pos - 1)),
            None => Err(ExprError::UnexpectedEnd),
        }
    }

    fn ident(&mut self, name: String, depth: usize) -> Result<Expr, ExprError> {
        // A known function name followed by "(" is a call; everything else is
        // a constant or a free variable.
        if let Some(func) = Func::from_name(&name) {
            if matches!(self.peek(), Some(Tok::LParen)) {
                self.bump();
                let mut args = Vec::with_capacity(func.arity());
                loop {
                    args.push(self.expr(depth + 1)?);
                    match self.bump() {
                        Some(Tok::Comma) => continue,
                        Some(Tok::RParen) => break,
                        Some(_) => return Err(ExprError::UnexpectedToken(self.pos - 1)),
                        None => return Err(ExprError::UnexpectedEnd),
                    }
                }
                if args.len() != func.arity() {
                    return Err(ExprError::UnexpectedToken(self.pos));
                }
                return self.node(Expr::Call(func, args));
            }
        }
        match name.as_str() {
            "pi" => self.node(Expr::Constant(Constant::Pi)),
            "e" => self.node(Expr::Constant(Constant::E)),
            _ => self.node(Expr::Variable(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_arithmetic() {
        assert_eq!(
            parse("2+3").unwrap(),
            Expr::Binary(
                BinaryOp::Add,
                Box::new(Expr::Number(2.0)),
                Box::new(Expr::Number(3.0))
            )
        );
        assert!(parse("2*3/4").is_ok());
        assert!(parse("(1+2)^3").is_ok());
    }

    #[test]
    fn implicit_multiplication() {
        let explicit = parse("2*x").unwrap();
        assert_eq!(parse("2x").unwrap(), explicit);
        assert!(parse("2(x+1)").is_ok());
        assert_eq!(parse("2pi").unwrap(), parse("2*pi").unwrap());
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(parse("2^3^2").unwrap(), parse("2^(3^2)").unwrap());
    }

    #[test]
    fn functions_and_constants() {
        assert!(matches!(parse("sqrt(16)").unwrap(), Expr::Call(Func::Sqrt, _)));
        assert!(matches!(parse("root(8,3)").unwrap(), Expr::Call(Func::Root, _)));
        assert_eq!(parse("pi").unwrap(), Expr::Constant(Constant::Pi));
        // Unknown names are variables, not errors.
        assert_eq!(parse("theta").unwrap(), Expr::Variable("theta".into()));
    }

    #[test]
    fn wrong_arity_is_an_error() {
        assert!(parse("sqrt(1,2)").is_err());
        assert!(parse("root(8)").is_err());
    }

    #[test]
    fn depth_cap_holds() {
        let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert_eq!(parse(&deep), Err(ExprError::TooDeep));
        let shallow = format!("{}1{}", "(".repeat(10), ")".repeat(10));
        assert!(parse(&shallow).is_ok());
        let minus_chain = format!("{}5", "-".repeat(500));
        assert_eq!(parse(&minus_chain), Err(ExprError::TooDeep));
    }

    #[test]
    fn node_cap_holds() {
        let wide = vec!["1"; 400].join("+");
        assert_eq!(parse(&wide), Err(ExprError::TooLarge));
    }

    #[test]
    fn junk_is_an_error_not_a_panic() {
        assert!(parse("").is_err());
        assert!(parse("2+").is_err());
        assert!(parse(")(").is_err());
        assert!(parse("1..2").is_err());
        assert!(parse("drop table answers;").is_err());
        assert!(parse("<script>alert(1)</script>").is_err());
    }
}
