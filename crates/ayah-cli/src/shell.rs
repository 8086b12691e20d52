//! Line-based interactive mode.
//!
//! Each line is first classified as a [`ShellInput`]; only lines that are not
//! commands are run through reference validation.

use crate::report;
use anyhow::Result;
use ayah_fetch::VerseClient;
use ayah_model::{OutputMode, ReferenceError, TranslationCatalog, VerseReference};
use ayah_render::format_verse;
use std::future::Future;
use std::io::Write;
use std::pin::Pin;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const FAREWELL: &str = "Thank you for using Ayah! May Allah bless you.";

const EXAMPLES: [(&str, &str); 4] = [
    ("2:255", "Ayat al-Kursi"),
    ("1:1", "Al-Fatiha, verse 1"),
    ("3:10", "Surah Al-Imran, verse 10"),
    ("18:65", "Surah Al-Kahf, verse 65"),
];

/// Shell commands recognised in place of a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Quit,
    List,
    Help,
}

/// What one line typed at the verse prompt means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Command(ShellCommand),
    Reference(VerseReference),
    Invalid(ReferenceError),
}

impl ShellInput {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_lowercase().as_str() {
            "quit" | "exit" | "q" => Self::Command(ShellCommand::Quit),
            "list" => Self::Command(ShellCommand::List),
            "help" => Self::Command(ShellCommand::Help),
            _ => match ayah_validate::validate(trimmed) {
                Ok(reference) => Self::Reference(reference),
                Err(e) => Self::Invalid(e),
            },
        }
    }
}

/// Pick the translation key for a prompt answer.
///
/// Blank picks the default; an unknown key also falls back to the default
/// and yields a notice for the user.
pub fn choose_translation(answer: &str) -> (&'static str, Option<String>) {
    let answer = answer.trim();
    if answer.is_empty() {
        return (TranslationCatalog::DEFAULT_KEY, None);
    }
    match TranslationCatalog::get(answer) {
        Some(t) => (t.key, None),
        None => (
            TranslationCatalog::DEFAULT_KEY,
            Some(format!(
                "Unknown translation '{answer}', using '{}' instead.",
                TranslationCatalog::DEFAULT_KEY
            )),
        ),
    }
}

/// Pick the output mode for a prompt answer; blank or unknown means `both`.
pub fn choose_mode(answer: &str) -> OutputMode {
    answer.parse().unwrap_or_default()
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}

enum Flow {
    Continue,
    Stop,
}

type Interrupt = Pin<Box<dyn Future<Output = ()>>>;

/// The interactive read loop.
pub struct Shell<R, W> {
    input: R,
    out: W,
    client: VerseClient,
    interrupt: Interrupt,
    interrupted: bool,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    /// A shell that stops on Ctrl-C.
    pub fn new(input: R, out: W, client: VerseClient) -> Self {
        Self::with_interrupt(input, out, client, ctrl_c())
    }

    /// A shell that stops when `interrupt` completes.
    pub fn with_interrupt(
        input: R,
        out: W,
        client: VerseClient,
        interrupt: impl Future<Output = ()> + 'static,
    ) -> Self {
        Self {
            input,
            out,
            client,
            interrupt: Box::pin(interrupt),
            interrupted: false,
        }
    }

    /// Run until the user quits, input ends, or the interrupt fires.
    ///
    /// Failures inside one iteration are reported and the loop goes on;
    /// only terminal I/O errors end it early.
    pub async fn run(&mut self) -> Result<()> {
        let rule = "=".repeat(60);
        writeln!(self.out, "{rule}\nAyah - Quran Verse Fetcher\n{rule}\n")?;

        loop {
            match self.step().await? {
                Flow::Continue => {}
                Flow::Stop => break,
            }
        }

        if self.interrupted {
            writeln!(self.out, "\n")?;
        }
        writeln!(self.out, "\n{FAREWELL}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Consume the shell and hand back its output sink.
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    async fn step(&mut self) -> Result<Flow> {
        writeln!(self.out, "Enter a verse in format 'chapter:verse' (e.g., '2:255', '1:1')")?;
        writeln!(
            self.out,
            "Or type 'list' to see available translations, 'help' for examples, or 'quit' to exit."
        )?;

        let Some(line) = self.ask("\nVerse: ").await? else {
            return Ok(Flow::Stop);
        };

        let reference = match ShellInput::parse(&line) {
            ShellInput::Command(ShellCommand::Quit) => return Ok(Flow::Stop),
            ShellInput::Command(ShellCommand::List) => {
                writeln!(self.out, "\nAvailable translations:")?;
                for t in TranslationCatalog::all() {
                    writeln!(self.out, "  - {} ({})", t.key, t.display_name)?;
                }
                writeln!(self.out)?;
                return Ok(Flow::Continue);
            }
            ShellInput::Command(ShellCommand::Help) => {
                writeln!(self.out, "\nExamples:")?;
                for (reference, description) in EXAMPLES {
                    writeln!(self.out, "  {reference:<9} - {description}")?;
                }
                writeln!(self.out)?;
                return Ok(Flow::Continue);
            }
            ShellInput::Invalid(e) => {
                writeln!(self.out, "Error: {e}")?;
                writeln!(self.out, "Please use format 'chapter:verse' (e.g., '2:255')\n")?;
                return Ok(Flow::Continue);
            }
            ShellInput::Reference(reference) => reference,
        };

        writeln!(
            self.out,
            "\nChoose translation (press Enter for default '{}'):",
            TranslationCatalog::DEFAULT_KEY
        )?;
        writeln!(self.out, "Options: {}", TranslationCatalog::keys().join(", "))?;
        let Some(answer) = self.ask("Translation: ").await? else {
            return Ok(Flow::Stop);
        };
        let (key, notice) = choose_translation(&answer);
        if let Some(notice) = notice {
            writeln!(self.out, "{notice}")?;
        }

        writeln!(self.out, "\nChoose format (press Enter for default 'both'):")?;
        writeln!(self.out, "Options: {}", OutputMode::NAMES.join(", "))?;
        let Some(answer) = self.ask("Format: ").await? else {
            return Ok(Flow::Stop);
        };
        let mode = choose_mode(&answer);

        let rule = "-".repeat(60);
        writeln!(self.out, "\nFetching verse {reference}...\n{rule}")?;
        self.out.flush()?;

        let translation = mode.includes_translation().then_some(key);
        let fetched = tokio::select! {
            biased;
            _ = &mut self.interrupt => {
                self.interrupted = true;
                return Ok(Flow::Stop);
            }
            result = self.client.fetch_verse(reference, translation) => result,
        };

        let outcome = match fetched {
            Ok(outcome) => outcome,
            Err(e) => {
                let err = anyhow::Error::from(e);
                writeln!(self.out, "{}", report::describe(&err))?;
                writeln!(self.out, "Please try again.\n")?;
                return Ok(Flow::Continue);
            }
        };

        for w in &outcome.warnings {
            writeln!(self.out, "Warning: {w}")?;
        }
        writeln!(self.out, "{}", format_verse(&outcome.record, mode))?;
        writeln!(self.out, "{rule}")?;

        writeln!(self.out, "Would you like to fetch another verse? (y/n)")?;
        let Some(answer) = self.ask("Continue: ").await? else {
            return Ok(Flow::Stop);
        };
        if matches!(answer.trim().to_lowercase().as_str(), "n" | "no" | "quit" | "exit") {
            return Ok(Flow::Stop);
        }
        writeln!(self.out)?;
        Ok(Flow::Continue)
    }

    /// Prompt and read one line. `None` on end of input or interrupt.
    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        let read = tokio::select! {
            biased;
            _ = &mut self.interrupt => {
                self.interrupted = true;
                return Ok(None);
            }
            read = self.input.read_line(&mut line) => read?,
        };

        if read == 0 {
            tracing::debug!("End of input");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_upstream::start_upstream;
    use ayah_fetch::ClientConfig;
    use std::net::SocketAddr;
    use std::time::Duration;
    use tokio::net::TcpListener;

    fn client(addr: SocketAddr) -> VerseClient {
        VerseClient::new(ClientConfig {
            base_url: format!("http://{addr}/v1"),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    /// Run a shell over scripted input and return everything it printed.
    async fn run_script(script: &str, client: VerseClient) -> String {
        let mut shell = Shell::with_interrupt(
            script.as_bytes(),
            Vec::new(),
            client,
            std::future::pending::<()>(),
        );
        shell.run().await.unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    async fn unreachable_client() -> VerseClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        client(addr)
    }

    #[test]
    fn test_parse_commands() {
        for quit in ["quit", "EXIT", " q "] {
            assert_eq!(ShellInput::parse(quit), ShellInput::Command(ShellCommand::Quit));
        }
        assert_eq!(ShellInput::parse("List"), ShellInput::Command(ShellCommand::List));
        assert_eq!(ShellInput::parse("help"), ShellInput::Command(ShellCommand::Help));
    }

    #[test]
    fn test_parse_reference_and_invalid() {
        assert_eq!(
            ShellInput::parse(" 2:255 "),
            ShellInput::Reference(VerseReference::new(2, 255).unwrap())
        );
        assert!(matches!(ShellInput::parse("quitt"), ShellInput::Invalid(ReferenceError::Format(_))));
        assert!(matches!(
            ShellInput::parse("114:7"),
            ShellInput::Invalid(ReferenceError::VerseOutOfRange { .. })
        ));
        assert_eq!(ShellInput::parse(""), ShellInput::Invalid(ReferenceError::Empty));
    }

    #[test]
    fn test_choose_translation() {
        assert_eq!(choose_translation(""), ("sahih", None));
        assert_eq!(choose_translation(" asad "), ("asad", None));
        let (key, notice) = choose_translation("klingon");
        assert_eq!(key, "sahih");
        assert_eq!(notice.unwrap(), "Unknown translation 'klingon', using 'sahih' instead.");
    }

    #[test]
    fn test_choose_mode() {
        assert_eq!(choose_mode(""), OutputMode::Both);
        assert_eq!(choose_mode("arabic"), OutputMode::Arabic);
        assert_eq!(choose_mode("TRANSLATION"), OutputMode::Translation);
        assert_eq!(choose_mode("latin"), OutputMode::Both);
    }

    #[tokio::test]
    async fn test_quit_immediately() {
        let out = run_script("q\n", unreachable_client().await).await;
        assert!(out.contains("Ayah - Quran Verse Fetcher"));
        assert!(out.contains(FAREWELL));
        assert!(!out.contains("Fetching"));
    }

    #[tokio::test]
    async fn test_commands_then_end_of_input() {
        let out = run_script("list\nhelp\n", unreachable_client().await).await;
        assert!(out.contains("  - sahih (Sahih International)"));
        assert!(out.contains("  - clearquran (Clear Quran)"));
        assert!(out.contains("  2:255     - Ayat al-Kursi"));
        assert!(out.ends_with(&format!("{FAREWELL}\n")));
    }

    #[tokio::test]
    async fn test_invalid_references_keep_looping() {
        let out = run_script("abc\n9:999\nexit\n", unreachable_client().await).await;
        assert!(out.contains("Error: Invalid format 'abc'"));
        assert!(out.contains("Error: Chapter 9 has 129 verses"));
        assert_eq!(out.matches("Please use format 'chapter:verse'").count(), 2);
        assert!(out.contains(FAREWELL));
    }

    #[tokio::test]
    async fn test_fetch_with_defaults() {
        let (addr, requests) = start_upstream().await;
        let out = run_script("1:1\n\n\nn\n", client(addr)).await;

        assert!(out.contains("Fetching verse 1:1..."));
        assert!(out.contains("Verse: 1:1 | Surah: Al-Faatiha"));
        assert!(out.contains("Arabic Text:"));
        assert!(out.contains("└─ Translation: Saheeh International"));
        assert!(out.contains("Would you like to fetch another verse?"));
        assert!(out.contains(FAREWELL));
        assert_eq!(
            *requests.lock().unwrap(),
            vec!["1:1".to_string(), "1:1/en.sahih".to_string()]
        );
    }

    #[tokio::test]
    async fn test_unknown_translation_falls_back() {
        let (addr, requests) = start_upstream().await;
        let out = run_script("1:1\nklingon\ntranslation\nno\n", client(addr)).await;

        assert!(out.contains("Unknown translation 'klingon', using 'sahih' instead."));
        assert!(!out.contains("Arabic Text:"));
        assert!(out.contains("In the name of Allah"));
        assert!(requests.lock().unwrap().contains(&"1:1/en.sahih".to_string()));
    }

    #[tokio::test]
    async fn test_arabic_mode_skips_translation_fetch() {
        let (addr, requests) = start_upstream().await;
        let out = run_script("1:1\nasad\narabic\nn\n", client(addr)).await;

        assert!(out.contains("Arabic Text:"));
        assert!(!out.contains("In the name of Allah"));
        assert_eq!(*requests.lock().unwrap(), vec!["1:1".to_string()]);
    }

    #[tokio::test]
    async fn test_continue_then_quit() {
        let (addr, requests) = start_upstream().await;
        let out = run_script("1:1\n\narabic\ny\n1:1\n\narabic\nn\n", client(addr)).await;

        assert_eq!(out.matches("Fetching verse 1:1...").count(), 2);
        assert_eq!(requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_looping() {
        let out = run_script("1:1\n\n\n1:1\n\n\n", unreachable_client().await).await;

        assert_eq!(
            out.matches("Network Error: Connection error. Please check your internet connection.").count(),
            2
        );
        assert_eq!(out.matches("Please try again.").count(), 2);
        assert!(out.contains(FAREWELL));
    }

    #[tokio::test]
    async fn test_interrupt_ends_loop() {
        let mut shell = Shell::with_interrupt(
            "2:255\n".as_bytes(),
            Vec::new(),
            unreachable_client().await,
            std::future::ready(()),
        );
        shell.run().await.unwrap();
        let out = String::from_utf8(shell.into_output()).unwrap();

        assert!(out.contains(&format!("\n\n\n{FAREWELL}")));
        assert!(!out.contains("Choose translation"));
    }
}
