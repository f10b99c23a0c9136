//! Statement parsing (spec.md §4.2's `stmt` production and the comment
//! nodes used when `preserve_comments` is enabled).

use loxc_lex::Token;
use loxc_util::diagnostic::DiagnosticCode;

use crate::ast::Stmt;

use super::core::{FunType, PResult, Parser};

impl<'a> Parser<'a> {
    pub(crate) fn statement(&mut self) -> PResult<Stmt> {
        match &self.current {
            Token::Print => self.print_stmt(),
            Token::LBrace => self.block_stmt(),
            Token::If => self.if_stmt(),
            Token::While => self.while_stmt(),
            Token::For => self.for_stmt(),
            Token::Break => self.break_stmt(),
            Token::Continue => self.continue_stmt(),
            Token::Return => self.return_stmt(),
            Token::Comment(_) if self.preserve_comments => self.comment_stmt(),
            _ => self.expr_stmt(),
        }
    }

    fn print_stmt(&mut self) -> PResult<Stmt> {
        let start = self.current_span;
        self.advance(); // 'print'
        let expr = self.expr()?;
        let end = self.consume(Token::Semicolon, "after value")?;
        Ok(Stmt::PrintStmt {
            expr,
            span: start.merge(end),
        })
    }

    pub(crate) fn block_stmt(&mut self) -> PResult<Stmt> {
        let start = self.current_span;
        self.advance(); // '{'
        let stmts = self.block_stmts()?;
        let span = start.merge(self.previous_span);
        Ok(Stmt::Block { stmts, span })
    }

    /// Parses statements up to (and including) the closing `}`, assuming
    /// the opening `{` has already been consumed. Each nested statement
    /// goes through `declaration`, not `statement`, so a single malformed
    /// statement inside the block is recovered in place rather than
    /// aborting the whole block.
    pub(crate) fn block_stmts(&mut self) -> PResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !self.current_is(&Token::RBrace) && !self.is_at_end() {
            stmts.push(self.declaration());
        }
        self.consume(Token::RBrace, "after block")?;
        Ok(stmts)
    }

    fn if_stmt(&mut self) -> PResult<Stmt> {
        let start = self.current_span;
        self.advance(); // 'if'
        self.consume(Token::LParen, "after 'if'")?;
        let cond = self.expr()?;
        self.consume(Token::RParen, "after if condition")?;
        let then_branch = Box::new(self.statement()?);

        let mut end_span = then_branch.span();
        let else_branch = if self.match_token(Token::Else) {
            let stmt = self.statement()?;
            end_span = stmt.span();
            Some(Box::new(stmt))
        } else {
            None
        };

        Ok(Stmt::IfStmt {
            cond,
            then_branch,
            else_branch,
            span: start.merge(end_span),
        })
    }

    fn while_stmt(&mut self) -> PResult<Stmt> {
        let start = self.current_span;
        self.advance(); // 'while'
        self.consume(Token::LParen, "after 'while'")?;
        let cond = self.expr()?;
        self.consume(Token::RParen, "after while condition")?;

        self.loop_depth += 1;
        let body = self.statement();
        self.loop_depth -= 1;
        let body = Box::new(body?);

        let span = start.merge(body.span());
        Ok(Stmt::WhileStmt { cond, body, span })
    }

    fn for_stmt(&mut self) -> PResult<Stmt> {
        let start = self.current_span;
        self.advance(); // 'for'
        self.consume(Token::LParen, "after 'for'")?;

        let init: Option<Box<Stmt>> = if self.match_token(Token::Semicolon) {
            None
        } else if self.current_is(&Token::Var) {
            Some(Box::new(self.var_decl()?))
        } else {
            Some(Box::new(self.expr_stmt()?))
        };

        let cond = if self.current_is(&Token::Semicolon) {
            None
        } else {
            Some(self.expr()?)
        };
        self.consume(Token::Semicolon, "after loop condition")?;

        let update = if self.current_is(&Token::RParen) {
            None
        } else {
            Some(self.expr()?)
        };
        self.consume(Token::RParen, "after for clauses")?;

        self.loop_depth += 1;
        let body = self.statement();
        self.loop_depth -= 1;
        let body = Box::new(body?);

        let span = start.merge(body.span());
        Ok(Stmt::ForStmt {
            init,
            cond,
            update,
            body,
            span,
        })
    }

    fn break_stmt(&mut self) -> PResult<Stmt> {
        let start = self.current_span;
        self.advance(); // 'break'
        if self.loop_depth == 0 {
            self.diagnose(
                DiagnosticCode::E_RESOLVE_JUMP_OUTSIDE_LOOP,
                start,
                "'break' used outside a loop",
            );
        }
        let end = self.consume(Token::Semicolon, "after 'break'")?;
        Ok(Stmt::BreakStmt {
            span: start.merge(end),
        })
    }

    fn continue_stmt(&mut self) -> PResult<Stmt> {
        let start = self.current_span;
        self.advance(); // 'continue'
        if self.loop_depth == 0 {
            self.diagnose(
                DiagnosticCode::E_RESOLVE_JUMP_OUTSIDE_LOOP,
                start,
                "'continue' used outside a loop",
            );
        }
        let end = self.consume(Token::Semicolon, "after 'continue'")?;
        Ok(Stmt::ContinueStmt {
            span: start.merge(end),
        })
    }

    fn return_stmt(&mut self) -> PResult<Stmt> {
        let start = self.current_span;
        self.advance(); // 'return'
        if self.cur_fun_type == FunType::None {
            self.diagnose(
                DiagnosticCode::E_RESOLVE_RETURN_OUTSIDE_FN,
                start,
                "'return' used outside a function",
            );
        }

        let value = if self.current_is(&Token::Semicolon) {
            None
        } else {
            Some(self.expr()?)
        };
        if value.is_some() && self.cur_fun_type == FunType::Init {
            self.diagnose(
                DiagnosticCode::E_RESOLVE_RETURN_VALUE_IN_INIT,
                start,
                "cannot return a value from an initializer",
            );
        }

        let end = self.consume(Token::Semicolon, "after return value")?;
        Ok(Stmt::ReturnStmt {
            value,
            span: start.merge(end),
        })
    }

    fn expr_stmt(&mut self) -> PResult<Stmt> {
        let start = self.current_span;
        let expr = self.expr()?;
        let end = self.consume(Token::Semicolon, "after expression")?;
        Ok(Stmt::ExprStmt {
            expr,
            span: start.merge(end),
        })
    }

    fn comment_stmt(&mut self) -> PResult<Stmt> {
        let span = self.current_span;
        let text = match self.current.clone() {
            Token::Comment(text) => text,
            _ => unreachable!("comment_stmt dispatched on a non-Comment token"),
        };
        self.advance();
        Ok(Stmt::Comment { text, span })
    }

    /// If the statement just parsed is immediately followed, on the same
    /// line, by a `//` comment, folds it into a `CommentedStmt` instead of
    /// leaving a bare trailing `Comment` statement next in the list.
    pub(crate) fn attach_trailing_comment(&mut self, stmt: Stmt) -> Stmt {
        if !self.preserve_comments {
            return stmt;
        }
        if let Token::Comment(text) = self.current.clone() {
            if self.current_span.line == self.previous_span.line {
                let comment_span = self.current_span;
                self.advance();
                let span = stmt.span().merge(comment_span);
                return Stmt::CommentedStmt {
                    stmt: Box::new(stmt),
                    trailing_comment: text,
                    span,
                };
            }
        }
        stmt
    }
}
