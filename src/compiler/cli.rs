use clap::{App, Arg, ErrorKind};
use io::Read;
use std::fmt;
use std::fs;
use std::io;
use std::iter::ExactSizeIterator;
use std::str::FromStr;

use super::{compile, Compilation, CompilerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    Human,
    Json,
}

impl MessageFormat {
    pub fn variants() -> impl Iterator<Item = MessageFormat> {
        IntoIterator::into_iter([Self::Human, Self::Json])
    }
}

impl fmt::Display for MessageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageFormat::Human => write!(f, "human"),
            MessageFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for MessageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::variants()
            .find(|x| x.to_string() == s)
            .ok_or_else(|| format!("Unknown message format: `{}`", s))
    }
}

#[derive(Debug)]
pub struct CompilerOptions {
    pub message_format: MessageFormat,
    pub dump_symbols: bool,
    pub filepath: Option<String>,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            message_format: MessageFormat::Human,
            dump_symbols: false,
            filepath: None,
        }
    }
}

impl CompilerOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Default)]
pub struct Command {}

impl Command {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(
        &self,
        args: impl ExactSizeIterator<Item = String>,
    ) -> Result<Compilation, CompilerError> {
        let options = parse_options(args)?;

        let src = if let Some(filepath) = &options.filepath {
            read_from_file(filepath.as_str())?
        } else {
            read_from_stdin()?
        };

        compile(&src, &options)
    }
}

fn parse_options(
    args: impl ExactSizeIterator<Item = String>,
) -> Result<CompilerOptions, CompilerError> {
    let mut options = CompilerOptions::new();

    let format_possible_values = MessageFormat::variants()
        .map(|f| f.to_string())
        .collect::<Vec<_>>();
    let format_possible_values: Vec<&str> =
        format_possible_values.iter().map(AsRef::as_ref).collect();

    let matches = App::new("dink")
        .arg(
            Arg::with_name("message-format")
                .long("message-format")
                .help("Sets how diagnostics are printed")
                .takes_value(true)
                .possible_values(&format_possible_values),
        )
        .arg(
            Arg::with_name("dump-symbols")
                .long("dump-symbols")
                .help("Prints every context and its symbols after analysis"),
        )
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the input document to use")
                .required(false)
                .index(1),
        )
        .get_matches_from_safe(args)
        .map_err(|err| match err.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => err.exit(),
            _ => CompilerError::InvalidOption(err.message),
        })?;

    if let Some(format) = matches.value_of("message-format") {
        options.message_format = format.parse::<MessageFormat>()?;
    }

    options.dump_symbols = matches.is_present("dump-symbols");

    if let Some(filepath) = matches.value_of("INPUT") {
        options.filepath = Some(filepath.to_string());
    }

    Ok(options)
}

fn read_from_stdin() -> Result<String, io::Error> {
    let mut content = String::new();

    io::stdin().read_to_string(&mut content)?;

    Ok(content)
}

fn read_from_file(filename: &str) -> io::Result<String> {
    fs::read_to_string(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn args(list: &[&str]) -> std::vec::IntoIter<String> {
        list.iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn default_options() {
        let options = parse_options(args(&["dink"])).unwrap();

        assert_eq!(options.message_format, MessageFormat::Human);
        assert!(!options.dump_symbols);
        assert_eq!(options.filepath, None);
    }

    #[test]
    fn all_options() {
        let options = parse_options(args(&[
            "dink",
            "--message-format",
            "json",
            "--dump-symbols",
            "fib.json",
        ]))
        .unwrap();

        assert_eq!(options.message_format, MessageFormat::Json);
        assert!(options.dump_symbols);
        assert_eq!(options.filepath.as_deref(), Some("fib.json"));
    }

    #[test]
    fn unknown_message_format() {
        assert_matches!(
            parse_options(args(&["dink", "--message-format", "xml"])),
            Err(CompilerError::InvalidOption(_))
        );
        assert_matches!(
            "xml".parse::<MessageFormat>(),
            Err(message) if message == "Unknown message format: `xml`"
        );
    }

    #[test]
    fn message_format_names() {
        let names: Vec<_> = MessageFormat::variants().map(|f| f.to_string()).collect();
        assert_eq!(names, vec!["human", "json"]);
        assert_eq!("json".parse::<MessageFormat>(), Ok(MessageFormat::Json));
    }

    #[test]
    fn missing_input_file() {
        assert_matches!(
            Command::new().run(args(&["dink", "/nonexistent/dink/input.json"])),
            Err(CompilerError::InputSourceError(_))
        );
    }
}
