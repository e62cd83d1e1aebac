//! Instruction text buffer and label counters.

use std::fmt::Write as _;

use jack_ir::vm::{ArithmeticOp, Command, Segment};

/// Builds stack-machine text one instruction per line.
#[derive(Default, Debug)]
pub struct VmWriter {
    buffer: String,
}

impl VmWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, command: &Command) {
        // Writing into a String cannot fail.
        let _ = writeln!(self.buffer, "{command}");
    }

    pub fn push(&mut self, segment: Segment, index: u16) {
        self.emit(&Command::Push(segment, index));
    }

    pub fn pop(&mut self, segment: Segment, index: u16) {
        self.emit(&Command::Pop(segment, index));
    }

    pub fn arithmetic(&mut self, op: ArithmeticOp) {
        self.emit(&Command::Arithmetic(op));
    }

    pub fn label(&mut self, name: &str) {
        self.emit(&Command::Label(name.to_owned()));
    }

    pub fn goto(&mut self, name: &str) {
        self.emit(&Command::Goto(name.to_owned()));
    }

    pub fn if_goto(&mut self, name: &str) {
        self.emit(&Command::IfGoto(name.to_owned()));
    }

    pub fn call(&mut self, name: &str, args: u16) {
        self.emit(&Command::Call {
            name: name.to_owned(),
            args,
        });
    }

    pub fn function(&mut self, name: &str, locals: u16) {
        self.emit(&Command::Function {
            name: name.to_owned(),
            locals,
        });
    }

    pub fn ret(&mut self) {
        self.emit(&Command::Return);
    }

    /// A `// text` line. Only written in annotation mode.
    pub fn comment(&mut self, text: &str) {
        self.buffer.push_str("// ");
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn finish(self) -> String {
        self.buffer
    }
}

/// Monotonic if/while label counters.
///
/// Owned by one generator and never reset, so labels stay unique for as long
/// as the generator is reused.
#[derive(Copy, Clone, Default, Debug, Eq, PartialEq)]
pub struct LabelCounters {
    if_count: u32,
    while_count: u32,
}

/// Labels for one `if`. `end` is only used when an `else` is present.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IfLabels {
    pub if_true: String,
    pub if_false: String,
    pub end: String,
}

/// Labels for one `while`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WhileLabels {
    pub start: String,
    pub end: String,
}

impl LabelCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_if(&mut self) -> IfLabels {
        let n = self.if_count;
        self.if_count += 1;
        IfLabels {
            if_true: format!("IF_TRUE{n}"),
            if_false: format!("IF_FALSE{n}"),
            end: format!("IF_END{n}"),
        }
    }

    pub fn next_while(&mut self) -> WhileLabels {
        let n = self.while_count;
        self.while_count += 1;
        WhileLabels {
            start: format!("WHILE_EXP{n}"),
            end: format!("WHILE_END{n}"),
        }
    }

    /// `(ifs, whiles)` allocated so far.
    pub fn issued(&self) -> (u32, u32) {
        (self.if_count, self.while_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn writer_lines() {
        let mut w = VmWriter::new();
        w.function("Main.main", 2);
        w.push(Segment::Constant, 7);
        w.call("Output.printInt", 1);
        w.pop(Segment::Temp, 0);
        w.arithmetic(ArithmeticOp::Not);
        w.label("L");
        w.if_goto("L");
        w.goto("L");
        w.ret();
        assert_eq!(
            w.finish(),
            "function Main.main 2\npush constant 7\ncall Output.printInt 1\npop temp 0\n\
             not\nlabel L\nif-goto L\ngoto L\nreturn\n"
        );
    }

    #[test]
    fn comment_line() {
        let mut w = VmWriter::new();
        assert!(w.is_empty());
        w.comment("let x = 1 ;");
        assert_eq!(w.as_str(), "// let x = 1 ;\n");
    }

    #[test]
    fn counters_are_independent_and_monotonic() {
        let mut c = LabelCounters::new();
        let first = c.next_if();
        assert_eq!(
            (first.if_true.as_str(), first.if_false.as_str(), first.end.as_str()),
            ("IF_TRUE0", "IF_FALSE0", "IF_END0")
        );
        let w = c.next_while();
        assert_eq!((w.start.as_str(), w.end.as_str()), ("WHILE_EXP0", "WHILE_END0"));
        assert_eq!(c.next_if().if_true, "IF_TRUE1");
        assert_eq!(c.next_while().end, "WHILE_END1");
        assert_eq!(c.issued(), (2, 2));
    }
}
