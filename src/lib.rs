pub mod config;
pub mod error;
pub mod io;
pub mod lexer;
pub mod prompt;
pub mod repl;
pub mod scanner;
