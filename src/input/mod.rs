mod reader;

pub use reader::{InputError, InputReader, MAX_INPUT_SIZE};
