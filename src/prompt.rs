use std::io::{self, Write};

pub struct ShellPrompt {
    text: String,
    interactive: bool,
}

impl ShellPrompt {
    // Only show the prompt when a person is typing at a terminal.
    pub fn detect(text: &str) -> Self {
        // SAFETY: isatty only inspects the descriptor and has no memory preconditions.
        let interactive = unsafe { libc::isatty(libc::STDIN_FILENO) } == 1;
        ShellPrompt {
            text: text.to_string(),
            interactive,
        }
    }

    pub fn silent() -> Self {
        ShellPrompt {
            text: String::new(),
            interactive: false,
        }
    }

    pub fn show_prompt(&self) -> io::Result<()> {
        self.show_to(&mut io::stdout())
    }

    pub fn show_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if !self.interactive {
            return Ok(());
        }
        write!(out, "{}", self.text)?;
        out.flush()
    }

    pub fn farewell(&self) -> io::Result<()> {
        if self.interactive {
            // Keep the shell's parent prompt off our prompt line after Ctrl-D
            println!();
        }
        Ok(())
    }
}
