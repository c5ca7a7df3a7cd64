use std::io::{Read, Write};

use tracing::{debug, warn};

use crate::error::ShellError;
use crate::io::{LineRead, LineReader};
use crate::lexer::{Lexer, PrintStyle, TokenList};
use crate::prompt::ShellPrompt;

/// Consumer of token lists, e.g. a parser/executor.
///
/// The list is borrowed for the duration of one call and released by the REPL
/// once the call returns, whatever the outcome.
pub trait Interpreter {
    fn interpret(&mut self, tokens: &TokenList) -> Result<(), ShellError>;
}

/// Dumps every token list it is given.
pub struct DebugInterpreter<W> {
    out: W,
    style: PrintStyle,
}

impl<W: Write> DebugInterpreter<W> {
    pub fn new(out: W, style: PrintStyle) -> Self {
        DebugInterpreter { out, style }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Interpreter for DebugInterpreter<W> {
    fn interpret(&mut self, tokens: &TokenList) -> Result<(), ShellError> {
        tokens.print_list(&mut self.out, self.style)?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Exit,
}

pub struct Repl<R, I> {
    reader: LineReader<R>,
    prompt: ShellPrompt,
    interpreter: I,
}

impl<R: Read, I: Interpreter> Repl<R, I> {
    pub fn new(reader: LineReader<R>, prompt: ShellPrompt, interpreter: I) -> Self {
        Repl {
            reader,
            prompt,
            interpreter,
        }
    }

    /// One read-tokenize-interpret iteration.
    pub fn step(&mut self) -> Result<Step, ShellError> {
        self.prompt.show_prompt()?;

        let line = match self.reader.read_line()? {
            LineRead::Line(line) => line,
            LineRead::EndOfInput => {
                debug!("end of input");
                self.prompt.farewell()?;
                return Ok(Step::Exit);
            }
        };

        let tokens = Lexer::tokenize_line(&line)?;
        if tokens.is_empty() {
            return Ok(Step::Continue);
        }
        self.interpreter.interpret(&tokens)?;
        Ok(Step::Continue)
    }

    /// Runs until end of input or a fatal error. Recoverable errors are
    /// reported on stderr and only the offending line is dropped.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            match self.step() {
                Ok(Step::Continue) => continue,
                Ok(Step::Exit) => return Ok(()),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(error = %e, "discarding input line");
                    eprintln!("{}", e);
                }
            }
        }
    }

    pub fn interpreter(&self) -> &I {
        &self.interpreter
    }

    pub fn into_interpreter(self) -> I {
        self.interpreter
    }
}
