//! Expression parsing: the precedence cascade of spec.md §4.2.
//!
//! `expr` is `commaExpr`, the loosest-binding layer: `assign (',' assign)*`,
//! folded left-associatively into nested [`Expr::Comma`] nodes. Call
//! arguments and `for`-clauses parse at `assign` directly (their own
//! grammar positions already delimit them with `,`), so the comma operator
//! only shows up where a bare top-level expression is parsed, e.g. inside
//! parens: `(1, 2)` evaluates both and yields `2` (spec.md §4.4).

use loxc_lex::Token;
use loxc_util::diagnostic::DiagnosticCode;

use crate::ast::{BinaryOp, Expr, Literal, UnaryOp};

use super::core::{FunType, ParseUnwind, PResult, Parser};

/// Call-argument limit, matching the parameter limit of spec.md §4.2.
const MAX_ARGS: usize = 255;

impl<'a> Parser<'a> {
    pub(crate) fn expr(&mut self) -> PResult<Expr> {
        let mut expr = self.assign()?;

        while self.match_token(Token::Comma) {
            let second = self.assign()?;
            let span = expr.span().merge(second.span());
            expr = Expr::Comma {
                first: Box::new(expr),
                second: Box::new(second),
                span,
            };
        }

        Ok(expr)
    }

    fn assign(&mut self) -> PResult<Expr> {
        let expr = self.ternary()?;

        if self.match_token(Token::Eq) {
            let eq_span = self.previous_span;
            let value = self.assign()?; // right-associative

            return match expr {
                Expr::Ident { name, span } => {
                    let full_span = span.merge(value.span());
                    Ok(Expr::Assignment {
                        name,
                        value: Box::new(value),
                        span: full_span,
                    })
                },
                Expr::Get { object, name, span } => {
                    let full_span = span.merge(value.span());
                    Ok(Expr::Set {
                        object,
                        name,
                        value: Box::new(value),
                        span: full_span,
                    })
                },
                _ => {
                    self.diagnose(
                        DiagnosticCode::E_PARSE_BAD_ASSIGN_TARGET,
                        eq_span,
                        "invalid assignment target",
                    );
                    Err(ParseUnwind)
                },
            };
        }

        Ok(expr)
    }

    fn ternary(&mut self) -> PResult<Expr> {
        let cond = self.logic_or()?;
        if self.match_token(Token::Question) {
            let then_branch = self.expr()?;
            self.consume(Token::Colon, "in ternary expression")?;
            let else_branch = self.ternary()?; // right-associative
            let span = cond.span().merge(else_branch.span());
            return Ok(Expr::Ternary {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
                span,
            });
        }
        Ok(cond)
    }

    /// Shared helper for every left-associative binary precedence level:
    /// parse one operand via `next`, then fold in `(operator operand)*`.
    fn parse_binary_level(
        &mut self,
        next: fn(&mut Self) -> PResult<Expr>,
        operators: &[(Token, BinaryOp)],
    ) -> PResult<Expr> {
        let mut expr = next(self)?;
        'fold: loop {
            for (token, op) in operators {
                if self.current_is(token) {
                    self.advance();
                    let right = next(self)?;
                    let span = expr.span().merge(right.span());
                    expr = Expr::Binary {
                        left: Box::new(expr),
                        op: *op,
                        right: Box::new(right),
                        span,
                    };
                    continue 'fold;
                }
            }
            break;
        }
        Ok(expr)
    }

    fn logic_or(&mut self) -> PResult<Expr> {
        self.parse_binary_level(Self::logic_and, &[(Token::Or, BinaryOp::Or)])
    }

    fn logic_and(&mut self) -> PResult<Expr> {
        self.parse_binary_level(Self::equality, &[(Token::And, BinaryOp::And)])
    }

    fn equality(&mut self) -> PResult<Expr> {
        self.parse_binary_level(
            Self::relational,
            &[(Token::EqEq, BinaryOp::Eq), (Token::NotEq, BinaryOp::Ne)],
        )
    }

    fn relational(&mut self) -> PResult<Expr> {
        self.parse_binary_level(
            Self::additive,
            &[
                (Token::Lt, BinaryOp::Lt),
                (Token::LtEq, BinaryOp::Le),
                (Token::Gt, BinaryOp::Gt),
                (Token::GtEq, BinaryOp::Ge),
            ],
        )
    }

    fn additive(&mut self) -> PResult<Expr> {
        self.parse_binary_level(
            Self::multiplicative,
            &[(Token::Plus, BinaryOp::Add), (Token::Minus, BinaryOp::Sub)],
        )
    }

    fn multiplicative(&mut self) -> PResult<Expr> {
        self.parse_binary_level(
            Self::unary,
            &[
                (Token::Star, BinaryOp::Mul),
                (Token::Slash, BinaryOp::Div),
                (Token::Percent, BinaryOp::Mod),
            ],
        )
    }

    fn unary(&mut self) -> PResult<Expr> {
        match self.current {
            Token::Bang | Token::Minus => {
                let start = self.current_span;
                let op = if self.current == Token::Bang {
                    UnaryOp::Not
                } else {
                    UnaryOp::Neg
                };
                self.advance();
                let right = self.unary()?;
                let span = start.merge(right.span());
                Ok(Expr::Unary {
                    op,
                    right: Box::new(right),
                    span,
                })
            },
            _ => self.call(),
        }
    }

    fn call(&mut self) -> PResult<Expr> {
        let mut expr = self.primary()?;
        loop {
            if self.match_token(Token::LParen) {
                expr = self.finish_call(expr)?;
            } else if self.match_token(Token::Dot) {
                let (name, name_span) = self.consume_ident("property name after '.'")?;
                let span = expr.span().merge(name_span);
                expr = Expr::Get {
                    object: Box::new(expr),
                    name,
                    span,
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> PResult<Expr> {
        let mut args = Vec::new();
        if !self.current_is(&Token::RParen) {
            loop {
                if args.len() >= MAX_ARGS {
                    self.diagnose(
                        DiagnosticCode::E_PARSE_ARITY_LIMIT,
                        self.current_span,
                        "a call cannot have more than 255 arguments",
                    );
                }
                args.push(self.assign()?);
                if !self.match_token(Token::Comma) {
                    break;
                }
            }
        }
        let rparen = self.consume(Token::RParen, "after arguments")?;
        let span = callee.span().merge(rparen);
        Ok(Expr::Call {
            callee: Box::new(callee),
            args,
            paren: rparen,
            span,
        })
    }

    fn primary(&mut self) -> PResult<Expr> {
        let start = self.current_span;
        match self.current.clone() {
            Token::False => {
                self.advance();
                Ok(Expr::Literal {
                    value: Literal::Bool(false),
                    span: start,
                })
            },
            Token::True => {
                self.advance();
                Ok(Expr::Literal {
                    value: Literal::Bool(true),
                    span: start,
                })
            },
            Token::Nil => {
                self.advance();
                Ok(Expr::Literal {
                    value: Literal::Nil,
                    span: start,
                })
            },
            Token::Number(n) => {
                self.advance();
                Ok(Expr::Literal {
                    value: Literal::Number(n),
                    span: start,
                })
            },
            Token::String(s) => {
                self.advance();
                Ok(Expr::Literal {
                    value: Literal::String(s),
                    span: start,
                })
            },
            Token::Ident(name) => {
                self.advance();
                Ok(Expr::Ident { name, span: start })
            },
            Token::This => {
                self.advance();
                Ok(Expr::This { span: start })
            },
            Token::Super => {
                self.advance();
                self.consume(Token::Dot, "after 'super'")?;
                let (method, method_span) = self.consume_ident("superclass method name")?;
                Ok(Expr::Super {
                    method,
                    span: start.merge(method_span),
                })
            },
            Token::Fun => {
                self.advance();
                let function = self.function(FunType::Function)?;
                let span = start.merge(function.span);
                Ok(Expr::Fun { function, span })
            },
            Token::LParen => {
                self.advance();
                let inner = self.expr()?;
                let rparen = self.consume(Token::RParen, "after expression")?;
                Ok(Expr::Group {
                    inner: Box::new(inner),
                    span: start.merge(rparen),
                })
            },
            // Error productions: a binary operator with no left-hand
            // operand (spec.md §4.2's `primary`). Reported with a more
            // specific message than the generic "expected expression"
            // fallback, then the malformed right-hand side is consumed
            // best-effort before unwinding.
            Token::Plus
            | Token::Star
            | Token::Slash
            | Token::Percent
            | Token::EqEq
            | Token::NotEq
            | Token::Lt
            | Token::LtEq
            | Token::Gt
            | Token::GtEq
            | Token::And
            | Token::Or
            | Token::Question => {
                let description = self.current.describe().to_string();
                self.diagnose(
                    DiagnosticCode::E_PARSE_UNEXPECTED_TOKEN,
                    start,
                    format!("binary operator {description} has no left-hand operand"),
                );
                self.advance();
                let _ = self.ternary();
                Err(ParseUnwind)
            },
            _ => {
                let message = format!("expected expression, found {}", self.current.describe());
                self.diagnose(DiagnosticCode::E_PARSE_UNEXPECTED_TOKEN, start, message);
                Err(ParseUnwind)
            },
        }
    }
}
