/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

pub(crate) const CLIENT_PROMPT: &str = "ftp> ";

/// Line based user input, with prompts written to the terminal.
pub(crate) struct ShellInput<R, W> {
    lines: Lines<R>,
    output: W,
}

impl<R, W> ShellInput<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub(crate) fn new(input: R, output: W) -> Self {
        ShellInput {
            lines: input.lines(),
            output,
        }
    }

    /// Show `msg` and read one line. `None` at end of input.
    pub(crate) async fn prompt(&mut self, msg: &str) -> anyhow::Result<Option<String>> {
        self.output.write_all(msg.as_bytes()).await?;
        self.output.flush().await?;
        let line = self.lines.next_line().await?;
        Ok(line)
    }

    /// Like [`Self::prompt`], but the answer is trimmed and must not be empty.
    pub(crate) async fn prompt_word(&mut self, msg: &str) -> anyhow::Result<Option<String>> {
        match self.prompt(msg).await? {
            Some(line) => {
                let word = line.trim();
                if word.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(word.to_string()))
                }
            }
            None => Ok(None),
        }
    }

    pub(crate) async fn print(&mut self, msg: &str) -> anyhow::Result<()> {
        self.output.write_all(msg.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}

/// Split a command line at the first space into the command and its argument.
pub(crate) fn split_command_line(line: &str) -> Vec<&str> {
    let line = line.trim_end_matches(['\r', '\n']);
    match line.split_once(' ') {
        Some((cmd, arg)) if !arg.trim().is_empty() => vec![cmd, arg.trim()],
        Some((cmd, _)) => vec![cmd],
        None => vec![line],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_line() {
        assert_eq!(split_command_line("ls"), vec!["ls"]);
        assert_eq!(split_command_line("ls "), vec!["ls"]);
        assert_eq!(split_command_line("get a.txt\r\n"), vec!["get", "a.txt"]);
        assert_eq!(
            split_command_line("put my file.txt"),
            vec!["put", "my file.txt"]
        );
    }

    #[tokio::test]
    async fn prompt_answers() {
        let input: &[u8] = b"first\n  \n second \n";
        let mut output = Vec::new();
        let mut shell = ShellInput::new(input, &mut output);
        assert_eq!(
            shell.prompt("(a) ").await.unwrap().as_deref(),
            Some("first")
        );
        assert_eq!(shell.prompt_word("(b) ").await.unwrap(), None);
        assert_eq!(
            shell.prompt_word("(c) ").await.unwrap().as_deref(),
            Some("second")
        );
        assert_eq!(shell.prompt("(d) ").await.unwrap(), None);
        drop(shell);
        assert_eq!(output, b"(a) (b) (c) (d) ");
    }
}
