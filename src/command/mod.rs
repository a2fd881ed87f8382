use brush_parser::ast;

/// A command ready to spawn: one executable plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

/// How a `--command` string is split into program and arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tokenizer {
    /// Split on whitespace. Quotes are not special: `echo "a b"` yields
    /// `["\"a", "b\""]`. Existing hook configurations rely on this.
    #[default]
    Whitespace,
    /// POSIX word splitting with quote and escape removal, limited to a
    /// single simple command.
    Shell,
}

/// Error returned when a command string cannot be tokenized.
#[derive(Debug, thiserror::Error)]
pub enum TokenizeError {
    #[error("cannot parse command: {0}")]
    Parse(String),
    #[error("only a single simple command is supported, found {0}")]
    Unsupported(&'static str),
}

impl CommandLine {
    /// Tokenize a raw command string.
    ///
    /// Returns `Ok(None)` when the string is empty or only whitespace.
    pub fn parse(raw: &str, tokenizer: Tokenizer) -> Result<Option<Self>, TokenizeError> {
        let words = match tokenizer {
            Tokenizer::Whitespace => split_whitespace(raw),
            Tokenizer::Shell => split_shell(raw)?,
        };
        let mut words = words.into_iter();
        Ok(words.next().map(|program| CommandLine {
            program,
            args: words.collect(),
        }))
    }

    /// Append one final argument, e.g. the file a linter should check.
    pub fn with_trailing_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

fn split_whitespace(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(String::from).collect()
}

/// Check with brush-parser that `raw` is exactly one simple command, then
/// split it into words with POSIX quote and escape removal.
///
/// Pipelines, lists, compound commands and redirections are rejected: the
/// hook spawns one program directly, never a shell.
fn split_shell(raw: &str) -> Result<Vec<String>, TokenizeError> {
    if raw.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut parser = brush_parser::Parser::builder()
        .reader(std::io::Cursor::new(raw.to_string()))
        .build();
    let program = parser
        .parse_program()
        .map_err(|e| TokenizeError::Parse(e.to_string()))?;

    let [complete_command] = program.complete_commands.as_slice() else {
        return Err(TokenizeError::Unsupported("multiple commands"));
    };
    // CompleteCommand = CompoundList, CompoundList.0 = Vec<CompoundListItem>
    let [item] = complete_command.0.as_slice() else {
        return Err(TokenizeError::Unsupported("a command list"));
    };
    let and_or = &item.0;
    if !and_or.additional.is_empty() {
        return Err(TokenizeError::Unsupported("`&&` or `||`"));
    }
    let [command] = and_or.first.seq.as_slice() else {
        return Err(TokenizeError::Unsupported("a pipeline"));
    };
    let ast::Command::Simple(simple) = command else {
        return Err(TokenizeError::Unsupported("a compound command"));
    };

    if simple.prefix.is_some() {
        return Err(TokenizeError::Unsupported("a redirection or assignment"));
    }
    if let Some(suffix) = &simple.suffix {
        if suffix
            .0
            .iter()
            .any(|item| !matches!(item, ast::CommandPrefixOrSuffixItem::Word(_)))
        {
            return Err(TokenizeError::Unsupported("a redirection or assignment"));
        }
    }

    // The AST keeps words as raw source text, so quote removal is left to shlex.
    shlex::split(raw).ok_or_else(|| TokenizeError::Parse("unbalanced quotes".to_string()))
}
