//! User command parsing

/// Prefix command parser that accepts a name and any number of aliases.
///
/// # Example
///
/// ```rust
/// use serverinfo::command::Command;
/// let command = Command::with_aliases(".", "serverinfo", &["guildinfo"]);
/// assert_eq!(command.parse(".serverinfo"), Some(""));
/// assert_eq!(command.parse(".guildinfo now"), Some("now"));
/// assert_eq!(command.parse(".serverinfos"), None);
/// assert_eq!(command.parse("serverinfo"), None);
/// ```
#[derive(Debug, Clone)]
pub struct Command {
    /// The full triggers to match against, e.g. `.serverinfo`.
    triggers: Vec<String>,
}

impl Command {
    /// Creates a new command parser that expects `prefix` followed by `name`.
    #[must_use]
    pub fn new(prefix: &str, name: &str) -> Command {
        Command::with_aliases(prefix, name, &[])
    }

    /// Creates a new command parser that expects `prefix` followed by `name` or one of the
    /// `aliases`.
    #[must_use]
    pub fn with_aliases(prefix: &str, name: &str, aliases: &[&str]) -> Command {
        let triggers = std::iter::once(name)
            .chain(aliases.iter().copied())
            .map(|name| format!("{prefix}{name}"))
            .collect();

        Command { triggers }
    }

    /// Checks if the supplied input starts with one of the command triggers, and if so, returns
    /// a string slice that makes up the arguments, if any.
    #[must_use]
    pub fn parse<'a>(&self, input: &'a str) -> Option<&'a str> {
        self.triggers
            .iter()
            .find_map(|trigger| parse_trigger(trigger, input))
    }
}

fn parse_trigger<'a>(trigger: &str, input: &'a str) -> Option<&'a str> {
    let suffix = input.strip_prefix(trigger)?;

    match suffix.chars().next() {
        // The proceeding character is a whitespace, so we return a slice skipping it
        Some(' ') => Some(&suffix[1..]),
        // Part of a longer word, so it's a different command
        Some(_) => None,
        None => Some(""),
    }
}
