use std::io::{self, BufRead, Write};

#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("Failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("Input ended before the {0} was given")]
    Eof(&'static str),
    #[error("The {name} must be a whole number, got '{text}'")]
    NotANumber { name: &'static str, text: String },
    #[error("The {name} must be at least 1, got {value}")]
    NotPositive { name: &'static str, value: i64 },
}

/// Writes `Enter the maze {name}: ` and reads one positive number.
pub fn prompt_dimension<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    name: &'static str,
) -> Result<i32, InputError> {
    write!(output, "Enter the maze {}: ", name)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(InputError::Eof(name));
    }

    parse_dimension(line.trim(), name)
}

pub fn parse_dimension(text: &str, name: &'static str) -> Result<i32, InputError> {
    let value: i64 = text.parse().map_err(|_| InputError::NotANumber {
        name,
        text: text.to_string(),
    })?;

    match i32::try_from(value) {
        Ok(value) if value > 0 => Ok(value),
        Ok(_) => Err(InputError::NotPositive { name, value }),
        Err(_) => Err(InputError::NotANumber {
            name,
            text: text.to_string(),
        }),
    }
}
