//! Command table shared by the channel adapters.
//!
//! Each adapter registers the commands it supports once at startup and
//! dispatches on the resolved [`Command`]. Parsing is deliberately minimal:
//! `/name[@bot] free text`.

use std::collections::HashMap;

use tracing::debug;

/// What a command does, independent of the platform it arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Static welcome text.
    Start,
    /// Personal greeting, then relay the argument text.
    Call,
    /// Relay the argument text.
    Ask,
}

impl Command {
    /// Reply used when the command needs argument text and got none.
    pub fn missing_argument_prompt(&self) -> Option<&'static str> {
        match self {
            Command::Start => None,
            Command::Call => Some("Please provide a message after /call."),
            Command::Ask => Some("Please provide a question after /ask."),
        }
    }
}

/// A registered command: its invocation name, help text and behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub command: Command,
}

impl CommandSpec {
    pub const fn new(name: &'static str, description: &'static str, command: Command) -> Self {
        Self {
            name,
            description,
            command,
        }
    }

    pub const fn start() -> Self {
        Self::new("start", "Show how to talk to the assistant", Command::Start)
    }

    pub const fn call() -> Self {
        Self::new("call", "Greet you, then answer your message", Command::Call)
    }

    pub const fn ask() -> Self {
        Self::new("ask", "Ask the AI a question", Command::Ask)
    }
}

/// Explicit command name → handler mapping, built at startup.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    entries: HashMap<&'static str, CommandSpec>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `spec`. A later registration with the same name replaces the earlier one.
    pub fn register(&mut self, spec: CommandSpec) -> &mut Self {
        debug!(command = spec.name, "registering command");
        self.entries.insert(spec.name, spec);
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, spec: CommandSpec) -> Self {
        self.register(spec);
        self
    }

    /// Look up a command by name (case-insensitive, without the leading `/`).
    pub fn resolve(&self, name: &str) -> Option<&CommandSpec> {
        self.entries.get(name.to_lowercase().as_str())
    }

    /// First registered command whose `/name` occurs anywhere in `token`.
    ///
    /// Loose matching used for tweets, where `/call` may be glued to
    /// punctuation. Checked in name order so the result is deterministic.
    pub fn find_in(&self, token: &str) -> Option<&CommandSpec> {
        let token = token.to_lowercase();
        self.specs()
            .into_iter()
            .find(|spec| token.contains(&format!("/{}", spec.name)))
    }

    /// All registered commands, sorted by name.
    pub fn specs(&self) -> Vec<&CommandSpec> {
        let mut specs: Vec<&CommandSpec> = self.entries.values().collect();
        specs.sort_by_key(|s| s.name);
        specs
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed `/name args` message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Lowercased command name without `/` or `@bot` suffix.
    pub name: String,
    /// Remaining text, trimmed. Empty when no argument was given.
    pub args: &'a str,
}

/// Split `/name[@bot] args` into its parts. Returns `None` for non-commands.
pub fn parse_invocation(text: &str) -> Option<Invocation<'_>> {
    let trimmed = text.trim_start();
    let body = trimmed.strip_prefix('/')?;

    let (head, args) = match body.find(char::is_whitespace) {
        Some(idx) => (&body[..idx], body[idx..].trim()),
        None => (body, ""),
    };
    let name = head.split('@').next().unwrap_or("");
    if name.is_empty() {
        return None;
    }

    Some(Invocation {
        name: name.to_lowercase(),
        args,
    })
}

/// Reply to `/start`.
pub const WELCOME: &str = "Welcome! Use /call <message> or /ask <question> to interact with the AI.";

/// What to do with a command before anything touches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// Reply with fixed text; no completion call.
    Static(&'static str),
    /// Relay this (non-empty) text to the completion API.
    Relay(&'a str),
}

/// Decide how to answer `command` given its argument text.
///
/// Empty arguments never reach the completion API.
pub fn plan(command: Command, args: &str) -> Outcome<'_> {
    let args = args.trim();
    match command {
        Command::Start => Outcome::Static(WELCOME),
        Command::Call | Command::Ask if args.is_empty() => {
            Outcome::Static(command.missing_argument_prompt().unwrap_or(WELCOME))
        }
        Command::Call | Command::Ask => Outcome::Relay(args),
    }
}

/// Personal greeting sent before answering a `/call`.
pub fn greeting(name: &str) -> String {
    format!("Hello, {name}, I am your assistant.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CommandRegistry {
        CommandRegistry::new()
            .with(CommandSpec::start())
            .with(CommandSpec::call())
            .with(CommandSpec::ask())
    }

    #[test]
    fn parses_name_and_args() {
        let inv = parse_invocation("/call   tell me a joke ").unwrap();
        assert_eq!(inv.name, "call");
        assert_eq!(inv.args, "tell me a joke");
    }

    #[test]
    fn strips_bot_suffix() {
        let inv = parse_invocation("/ask@relay_bot what time is it").unwrap();
        assert_eq!(inv.name, "ask");
        assert_eq!(inv.args, "what time is it");
    }

    #[test]
    fn bare_command_has_empty_args() {
        let inv = parse_invocation("/ASK").unwrap();
        assert_eq!(inv.name, "ask");
        assert!(inv.args.is_empty());
    }

    #[test]
    fn multiline_args_are_kept() {
        let inv = parse_invocation("/ask\nline one\nline two").unwrap();
        assert_eq!(inv.args, "line one\nline two");
    }

    #[test]
    fn non_commands_are_rejected() {
        assert!(parse_invocation("hello /ask").is_none());
        assert!(parse_invocation("/").is_none());
        assert!(parse_invocation("/@bot").is_none());
        assert!(parse_invocation("").is_none());
    }

    #[test]
    fn registry_resolves_registered_names_only() {
        let reg = registry();
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.resolve("Call").unwrap().command, Command::Call);
        assert!(reg.resolve("help").is_none());
    }

    #[test]
    fn later_registration_replaces_earlier() {
        let mut reg = CommandRegistry::new();
        reg.register(CommandSpec::ask())
            .register(CommandSpec::new("ask", "override", Command::Call));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.resolve("ask").unwrap().command, Command::Call);
    }

    #[test]
    fn specs_are_sorted_by_name() {
        let names: Vec<&str> = registry().specs().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["ask", "call", "start"]);
    }

    #[test]
    fn find_in_matches_substrings() {
        let reg = CommandRegistry::new()
            .with(CommandSpec::call())
            .with(CommandSpec::ask());
        assert_eq!(reg.find_in("/call,").unwrap().command, Command::Call);
        assert_eq!(reg.find_in("pls/ASK").unwrap().command, Command::Ask);
        assert!(reg.find_in("/start").is_none());
    }

    #[test]
    fn missing_argument_prompts() {
        assert_eq!(
            Command::Call.missing_argument_prompt(),
            Some("Please provide a message after /call.")
        );
        assert_eq!(
            Command::Ask.missing_argument_prompt(),
            Some("Please provide a question after /ask.")
        );
        assert_eq!(Command::Start.missing_argument_prompt(), None);
    }

    #[test]
    fn plan_never_relays_empty_arguments() {
        assert_eq!(
            plan(Command::Ask, "   "),
            Outcome::Static("Please provide a question after /ask.")
        );
        assert_eq!(
            plan(Command::Call, ""),
            Outcome::Static("Please provide a message after /call.")
        );
        assert_eq!(plan(Command::Start, "ignored"), Outcome::Static(WELCOME));
        assert_eq!(plan(Command::Ask, " why? "), Outcome::Relay("why?"));
    }

    #[test]
    fn greeting_text() {
        assert_eq!(greeting("Ada"), "Hello, Ada, I am your assistant.");
    }
}
