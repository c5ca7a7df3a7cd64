pub mod input;

pub use input::{INITIAL_STRING_SIZE, LineRead, LineReader, ReadError};
