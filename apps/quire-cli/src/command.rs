//! Parsing of typed commands.

use thiserror::Error;

/// Compose fields settable from the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Excerpt,
    Category,
    Content,
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Compose,
    /// A 1-based list position or a post id.
    Open(String),
    Back,
    Search(String),
    ClearSearch,
    Set(Field, String),
    Draft,
    Refine(String),
    Publish,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for the list")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
}

pub const HELP: &str = "\
Commands:
  list                  show all posts
  search <text>         filter the list
  clear                 clear the search
  open <n|id>           read a post
  back                  return to the list
  compose               write a new post
  title|excerpt|category|content <text>
                        set a compose field
  prompt <text>         describe the post for the assistant
  draft                 ask the assistant for a draft
  refine <instruction>  ask the assistant to rewrite the content
  publish               publish the post
  help                  show this text
  quit                  exit";

/// Parse one input line. Empty lines are not commands.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "compose" | "new" => Command::Compose,
        "open" => Command::Open(required("open", rest)?),
        "back" => Command::Back,
        // An empty search is allowed and shows everything.
        "search" | "/" => Command::Search(rest.to_string()),
        "clear" => Command::ClearSearch,
        "title" => Command::Set(Field::Title, rest.to_string()),
        "excerpt" => Command::Set(Field::Excerpt, rest.to_string()),
        "category" => Command::Set(Field::Category, rest.to_string()),
        "content" => Command::Set(Field::Content, rest.to_string()),
        "prompt" => Command::Set(Field::Prompt, rest.to_string()),
        "draft" => Command::Draft,
        "refine" => Command::Refine(required("refine", rest)?),
        "publish" => Command::Publish,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };

    Ok(Some(command))
}

fn required(name: &'static str, rest: &str) -> Result<String, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::MissingArgument(name));
    }
    Ok(rest.to_string())
}
