//! Expression, term and call emission.

use jack_divide::scan::inside;
use jack_divide::{
    array_access, assignment_terms, call_parts, expression_list, postfix, terms, CallParts,
    PostfixItem,
};
use jack_ir::grammar::is_builtin_class;
use jack_ir::vm::{runtime, ArithmeticOp, Segment};
use jack_ir::{Keyword, Token, TokenKind};
use tracing::debug;

use super::{ensure_sufficient_stack, malformed, operand, SubroutineCompiler};
use crate::outcome::CodegenError;
use crate::symbol_table::StorageKind;

impl SubroutineCompiler<'_> {
    pub(super) fn expression(&mut self, expr: &[Token]) -> Result<(), CodegenError> {
        self.ordered_terms(expr, &terms(expr))
    }

    /// Expressions on either side of a `let`.
    pub(super) fn assignment_expression(&mut self, expr: &[Token]) -> Result<(), CodegenError> {
        self.ordered_terms(expr, &assignment_terms(expr))
    }

    fn ordered_terms(&mut self, expr: &[Token], terms: &[&[Token]]) -> Result<(), CodegenError> {
        let items = postfix(terms);
        if !items.iter().any(|i| matches!(i, PostfixItem::Operand(_))) {
            return Err(malformed("expression", expr));
        }

        for item in items {
            match item {
                PostfixItem::Operand(term) => self.term(term)?,
                PostfixItem::Binary(op) => self.binary(op),
                PostfixItem::Unary(op) => self.unary(op),
            }
        }
        Ok(())
    }

    fn term(&mut self, term: &[Token]) -> Result<(), CodegenError> {
        ensure_sufficient_stack(|| self.term_inner(term))
    }

    fn term_inner(&mut self, term: &[Token]) -> Result<(), CodegenError> {
        match term {
            [] => Err(malformed("term", term)),
            [single] => self.atom(single),
            [first, ..] if first.is_symbol('(') => self.expression(inside(term, 0)),
            _ => {
                if let Some(call) = call_parts(term) {
                    return self.call(&call);
                }
                if let Some(access) = array_access(term) {
                    self.expression(access.index)?;
                    self.push_variable(access.name);
                    self.out.arithmetic(ArithmeticOp::Add);
                    self.out.pop(Segment::Pointer, 1);
                    self.out.push(Segment::That, 0);
                    return Ok(());
                }
                Err(malformed("term", term))
            }
        }
    }

    fn atom(&mut self, token: &Token) -> Result<(), CodegenError> {
        match &token.kind {
            TokenKind::IntConst(value) => self.out.push(Segment::Constant, *value),
            TokenKind::StringConst(body) => self.string_constant(body)?,
            TokenKind::Identifier(name) => self.push_variable(name),
            TokenKind::Keyword(Keyword::True) => {
                self.out.push(Segment::Constant, 0);
                self.out.arithmetic(ArithmeticOp::Not);
            }
            TokenKind::Keyword(Keyword::False | Keyword::Null) => {
                self.out.push(Segment::Constant, 0);
            }
            TokenKind::Keyword(Keyword::This) => self.out.push(Segment::Pointer, 0),
            TokenKind::Keyword(_) | TokenKind::Symbol(_) => {
                return Err(malformed("term", std::slice::from_ref(token)));
            }
        }
        Ok(())
    }

    fn string_constant(&mut self, body: &str) -> Result<(), CodegenError> {
        let length = operand("string length", body.chars().count())?;
        self.out.push(Segment::Constant, length);
        self.out.call(runtime::STRING_NEW, 1);
        for c in body.chars() {
            let code = operand("character code", c as usize)?;
            self.out.push(Segment::Constant, code);
            self.out.call(runtime::STRING_APPEND_CHAR, 2);
        }
        Ok(())
    }

    /// Emit a call, pushing the receiver first when there is one.
    ///
    /// Qualifier resolution order: field, built-in class, other variable,
    /// unknown name (static call on that class). An unqualified name is a
    /// method of the current class called on `pointer 0`.
    pub(super) fn call(&mut self, call: &CallParts<'_>) -> Result<(), CodegenError> {
        let mut argc = 0usize;

        let target = match call.qualifier {
            None => {
                self.out.push(Segment::Pointer, 0);
                argc += 1;
                format!("{}.{}", self.class_name, call.name)
            }
            Some(qualifier) => match self.table.resolve(qualifier) {
                Some(field) if field.kind == StorageKind::Field => {
                    self.out.push(Segment::This, field.index);
                    argc += 1;
                    format!("{}.{}", field.declared_type, call.name)
                }
                _ if is_builtin_class(qualifier) => format!("{qualifier}.{}", call.name),
                Some(variable) => {
                    self.out.push(variable.kind.segment(), variable.index);
                    argc += 1;
                    format!("{}.{}", variable.declared_type, call.name)
                }
                None => format!("{qualifier}.{}", call.name),
            },
        };

        for arg in expression_list(call.args) {
            self.expression(arg)?;
            argc += 1;
        }

        self.out.call(&target, operand("argument", argc)?);
        Ok(())
    }

    pub(super) fn push_variable(&mut self, name: &str) {
        match self.table.resolve(name) {
            Some(symbol) => self.out.push(symbol.kind.segment(), symbol.index),
            None => self.unresolved(name),
        }
    }

    pub(super) fn pop_variable(&mut self, name: &str) {
        match self.table.resolve(name) {
            Some(symbol) => self.out.pop(symbol.kind.segment(), symbol.index),
            None => self.unresolved(name),
        }
    }

    fn unresolved(&mut self, name: &str) {
        debug!(name, "unresolved symbol");
        self.warnings.push(jack_diagnostic::unresolved_symbol(name));
    }

    fn binary(&mut self, op: char) {
        let arithmetic = match op {
            '+' => ArithmeticOp::Add,
            '-' => ArithmeticOp::Sub,
            '&' => ArithmeticOp::And,
            '|' => ArithmeticOp::Or,
            '<' => ArithmeticOp::Lt,
            '>' => ArithmeticOp::Gt,
            '=' => ArithmeticOp::Eq,
            '*' => return self.out.call(runtime::MATH_MULTIPLY, 2),
            '/' => return self.out.call(runtime::MATH_DIVIDE, 2),
            _ => {
                debug!(op = %op, "not a binary operator");
                return;
            }
        };
        self.out.arithmetic(arithmetic);
    }

    fn unary(&mut self, op: char) {
        match op {
            '-' => self.out.arithmetic(ArithmeticOp::Neg),
            '~' => self.out.arithmetic(ArithmeticOp::Not),
            _ => debug!(op = %op, "not a unary operator"),
        }
    }
}
