//! Statement emission.

use jack_divide::{
    condition, do_call, if_blocks, let_parts, range_text, return_value, while_body, call_parts,
    Statement, StatementKind,
};
use jack_ir::vm::{ArithmeticOp, Segment};
use jack_ir::Token;
use tracing::trace;

use super::{malformed, SubroutineCompiler};
use crate::outcome::CodegenError;

impl SubroutineCompiler<'_> {
    pub(super) fn statements(&mut self, stmts: &[Statement<'_>]) -> Result<(), CodegenError> {
        for stmt in stmts {
            self.statement(stmt)?;
        }
        Ok(())
    }

    fn statement(&mut self, stmt: &Statement<'_>) -> Result<(), CodegenError> {
        trace!(kind = stmt.kind.as_str(), "statement");
        if self.annotate {
            self.out.comment(&range_text(statement_head(stmt)));
        }

        match stmt.kind {
            StatementKind::Let => self.let_statement(stmt.tokens),
            StatementKind::If => self.if_statement(stmt.tokens),
            StatementKind::While => self.while_statement(stmt.tokens),
            StatementKind::Do => self.do_statement(stmt.tokens),
            StatementKind::Return => self.return_statement(stmt.tokens),
        }
    }

    fn let_statement(&mut self, tokens: &[Token]) -> Result<(), CodegenError> {
        let parts = let_parts(tokens)
            .filter(|p| !p.value.is_empty())
            .ok_or_else(|| malformed("let statement", tokens))?;

        match parts.index {
            None => {
                self.assignment_expression(parts.value)?;
                self.pop_variable(parts.target);
            }
            Some(index) => {
                self.assignment_expression(index)?;
                self.push_variable(parts.target);
                self.out.arithmetic(ArithmeticOp::Add);
                self.assignment_expression(parts.value)?;
                self.out.pop(Segment::Temp, 0);
                self.out.pop(Segment::Pointer, 1);
                self.out.push(Segment::Temp, 0);
                self.out.pop(Segment::That, 0);
            }
        }
        Ok(())
    }

    fn if_statement(&mut self, tokens: &[Token]) -> Result<(), CodegenError> {
        let cond = condition(tokens);
        if cond.is_empty() {
            return Err(malformed("if condition", tokens));
        }
        self.expression(cond)?;

        let blocks = if_blocks(tokens);
        let labels = self.labels.next_if();

        self.out.if_goto(&labels.if_true);
        self.out.goto(&labels.if_false);
        self.out.label(&labels.if_true);
        self.statements(&blocks.then_branch)?;

        if blocks.has_else {
            self.out.goto(&labels.end);
            self.out.label(&labels.if_false);
            self.statements(&blocks.else_branch)?;
            self.out.label(&labels.end);
        } else {
            self.out.label(&labels.if_false);
        }
        Ok(())
    }

    fn while_statement(&mut self, tokens: &[Token]) -> Result<(), CodegenError> {
        let cond = condition(tokens);
        if cond.is_empty() {
            return Err(malformed("while condition", tokens));
        }
        let labels = self.labels.next_while();

        self.out.label(&labels.start);
        self.expression(cond)?;
        self.out.arithmetic(ArithmeticOp::Not);
        self.out.if_goto(&labels.end);
        self.statements(&while_body(tokens))?;
        self.out.goto(&labels.start);
        self.out.label(&labels.end);
        Ok(())
    }

    fn do_statement(&mut self, tokens: &[Token]) -> Result<(), CodegenError> {
        let call = call_parts(do_call(tokens)).ok_or_else(|| malformed("do statement", tokens))?;
        self.call(&call)?;
        self.out.pop(Segment::Temp, 0);
        Ok(())
    }

    fn return_statement(&mut self, tokens: &[Token]) -> Result<(), CodegenError> {
        let value = return_value(tokens);
        if value.is_empty() {
            self.out.push(Segment::Constant, 0);
        } else {
            self.expression(value)?;
        }
        self.out.ret();
        Ok(())
    }
}

/// What an annotation line shows: compound statements up to their first
/// block, simple statements whole.
fn statement_head<'a>(stmt: &Statement<'a>) -> &'a [Token] {
    match stmt.kind {
        StatementKind::If | StatementKind::While => {
            let end = stmt
                .tokens
                .iter()
                .position(|t| t.is_symbol('{'))
                .unwrap_or(stmt.tokens.len());
            &stmt.tokens[..end]
        }
        _ => stmt.tokens,
    }
}
