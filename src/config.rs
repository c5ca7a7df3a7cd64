use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::io::INITIAL_STRING_SIZE;
use crate::lexer::PrintStyle;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt: String,
    pub print_style: PrintStyle,
    pub buffer_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        ConfigLoader::default_config()
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: "bb> ".to_string(),
            print_style: PrintStyle::Lines,
            buffer_capacity: INITIAL_STRING_SIZE,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path)?;
        let mut src = String::new();
        for line in BufReader::new(file).lines() {
            src.push_str(&line?);
            src.push('\n');
        }
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = ConfigLoader::default_config();

        for (lineno, line) in src.lines().enumerate() {
            let lineno = lineno + 1;
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::parse(lineno, format!("No '=' found: {}", line)));
            };

            // The prompt keeps its whitespace so "bb> " works; other values are trimmed.
            match key.trim() {
                "prompt" => config.prompt = value.to_string(),
                "print_style" => {
                    config.print_style = match value.trim() {
                        "lines" => PrintStyle::Lines,
                        "inline" => PrintStyle::Inline,
                        other => {
                            let message = format!("Invalid print_style: {}", other);
                            return Err(ConfigError::parse(lineno, message));
                        }
                    }
                }
                "buffer_capacity" => match value.trim().parse::<usize>() {
                    Ok(n) if n > 0 => config.buffer_capacity = n,
                    _ => {
                        let message = format!("Invalid buffer_capacity: {}", value.trim());
                        return Err(ConfigError::parse(lineno, message));
                    }
                },
                k => return Err(ConfigError::parse(lineno, format!("Unknown key: {}", k))),
            }
        }

        Ok(config)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: Line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl ConfigError {
    fn parse(line: usize, message: String) -> Self {
        ConfigError::Parse { line, message }
    }
}
