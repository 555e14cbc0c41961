mod ui;

use clackr::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore, SourceKind},
    evaluator::Evaluator,
    logging,
    runtime::{ClackEvent, CrosstermEventSource, FixedTicker, Runner},
    session::{Mode, TargetText},
    source::{self, QuoteRotation, WordSource},
    ClackError,
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};
use tracing::{info, warn};

/// terminal typing speed test with live word and character highlighting
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    version,
    about,
    long_about = "Type the words on screen as fast and accurately as you can. Word mode scores net WPM from committed words; character mode scores gross WPM from every keystroke."
)]
pub struct Cli {
    /// evaluation mode
    #[clap(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// number of words, one of the presets 10, 20, 50, 100
    #[clap(short = 'w', long)]
    words: Option<usize>,

    /// custom number of words between 1 and 1000 (out of range falls back to the preset)
    #[clap(short = 'c', long)]
    custom_words: Option<usize>,

    /// finish the test after this many seconds
    #[clap(short = 's', long)]
    secs: Option<u64>,

    /// type bundled quotes in rotation instead of random words
    #[clap(short = 'q', long)]
    quotes: bool,

    /// custom prompt to use
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// where random words come from
    #[clap(long, value_enum)]
    source: Option<SourceKind>,

    /// endpoint of the random word service
    #[clap(long)]
    api_url: Option<String>,

    /// clock resolution in milliseconds
    #[clap(long)]
    tick_ms: Option<u64>,

    /// remember these settings for the next run
    #[clap(long)]
    save: bool,
}

impl Cli {
    /// Overlay the flags that were given onto stored settings.
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(mode) = self.mode {
            cfg.mode = mode;
        }
        if let Some(words) = self.words {
            cfg.word_count = words;
        }
        if self.custom_words.is_some() {
            cfg.custom_word_count = self.custom_words;
        }
        if self.secs.is_some() {
            cfg.time_limit_secs = self.secs;
        }
        if let Some(source) = self.source {
            cfg.source = source;
        }
        if let Some(ref url) = self.api_url {
            cfg.api_url = url.clone();
        }
        if let Some(tick_ms) = self.tick_ms {
            cfg.tick_ms = tick_ms;
        }
        cfg
    }

    fn text_choice(&self) -> TextChoice {
        match (&self.prompt, self.quotes) {
            (Some(prompt), _) => TextChoice::Prompt(prompt.clone()),
            (None, true) => TextChoice::Quotes,
            (None, false) => TextChoice::Words,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextChoice {
    Words,
    Quotes,
    Prompt(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Typing,
    Results,
    /// No target text could be loaded; input stays disabled until a retry.
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ExitType {
    Restart,
    New,
    Quit,
}

pub struct App {
    pub config: Config,
    pub evaluator: Evaluator,
    pub buffer: String,
    pub state: AppState,
    choice: TextChoice,
    source: Option<Box<dyn WordSource>>,
    quotes: Option<QuoteRotation>,
    last_target: Option<TargetText>,
}

impl App {
    pub fn new(config: Config, choice: TextChoice) -> Self {
        let source = match choice {
            TextChoice::Words => source::from_config(&config)
                .inspect_err(|err| warn!(error = %err, "word source unavailable"))
                .ok(),
            _ => None,
        };
        let quotes = match choice {
            TextChoice::Quotes => QuoteRotation::bundled()
                .inspect_err(|err| warn!(error = %err, "bundled quotes unavailable"))
                .ok(),
            _ => None,
        };

        let mut app = Self {
            config,
            evaluator: Evaluator::new(),
            buffer: String::new(),
            state: AppState::Typing,
            choice,
            source,
            quotes,
            last_target: None,
        };
        app.restart(false);
        app
    }

    fn next_target(&mut self, repeat: bool) -> Result<TargetText, ClackError> {
        if repeat {
            if let Some(ref target) = self.last_target {
                return Ok(target.clone());
            }
        }

        match self.choice {
            TextChoice::Prompt(ref prompt) => TargetText::from_quote(prompt),
            TextChoice::Quotes => match self.quotes.as_mut() {
                Some(rotation) => rotation.next_target(),
                None => Err(ClackError::TargetTextUnavailable(
                    "no quotes available".into(),
                )),
            },
            TextChoice::Words => {
                if self.source.is_none() {
                    self.source = Some(source::from_config(&self.config)?);
                }
                match self.source.as_deref() {
                    Some(src) => source::load_target(src, self.config.effective_word_count()),
                    None => Err(ClackError::TargetTextUnavailable(
                        "word source could not be created".into(),
                    )),
                }
            }
        }
    }

    /// Begin a fresh session, on the same text when `repeat` is set.
    pub fn restart(&mut self, repeat: bool) {
        self.evaluator.reset();
        self.buffer.clear();

        match self.next_target(repeat) {
            Ok(target) => {
                self.evaluator
                    .start(target.clone(), self.config.session_config());
                self.last_target = Some(target);
                self.state = AppState::Typing;
            }
            Err(err) => {
                self.state = AppState::Unavailable(err.to_string());
            }
        }
    }

    pub fn on_tick(&mut self) {
        if self.evaluator.on_clock_tick().is_some() && self.evaluator.is_finished() {
            self.state = AppState::Results;
        }
    }

    fn edit_buffer(&mut self, edit: impl FnOnce(&mut String)) {
        if self.evaluator.is_finished() {
            return;
        }
        edit(&mut self.buffer);
        self.evaluator.on_input(&self.buffer);
        if self.evaluator.is_finished() {
            self.state = AppState::Results;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<ExitType> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let state = self.state.clone();

        match (key.code, &state) {
            (KeyCode::Esc, _) => Some(ExitType::Quit),
            (KeyCode::Char('c'), _) if ctrl => Some(ExitType::Quit),
            (KeyCode::Tab | KeyCode::Left, AppState::Typing | AppState::Results) => {
                Some(ExitType::Restart)
            }
            (KeyCode::Right, _) => Some(ExitType::New),
            (KeyCode::Char('w'), AppState::Typing) if ctrl => {
                self.edit_buffer(delete_last_word);
                None
            }
            (KeyCode::Backspace, AppState::Typing) => {
                self.edit_buffer(|b| {
                    b.pop();
                });
                None
            }
            (KeyCode::Char(c), AppState::Typing) => {
                self.edit_buffer(|b| b.push(c));
                None
            }
            (KeyCode::Char('r'), AppState::Results) => Some(ExitType::Restart),
            (KeyCode::Char('n'), AppState::Results) => Some(ExitType::New),
            (KeyCode::Char('r'), AppState::Unavailable(_)) => Some(ExitType::New),
            _ => None,
        }
    }
}

fn delete_last_word(buffer: &mut String) {
    let trimmed = buffer.trim_end().len();
    buffer.truncate(trimmed);
    let cut = buffer
        .rfind(char::is_whitespace)
        .map_or(0, |idx| idx + buffer[idx..].chars().next().map_or(1, char::len_utf8));
    buffer.truncate(cut);
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(log_path) = AppDirs::log_path() {
        // logging is best effort; the test must still run without it
        if let Err(err) = logging::init(&log_path) {
            eprintln!("clackr: logging disabled: {err}");
        }
    }

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save {
        store.save(&config)?;
        info!(path = %store.path().display(), "saved settings");
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = App::new(config, cli.text_choice());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(app.config.tick()),
    );
    let res = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<CrosstermEventSource, FixedTicker>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            ClackEvent::Tick => {
                if app.evaluator.is_running() {
                    app.on_tick();
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            ClackEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            ClackEvent::Key(key) => {
                match app.handle_key(key) {
                    Some(ExitType::Quit) => break,
                    Some(ExitType::Restart) => app.restart(true),
                    Some(ExitType::New) => app.restart(false),
                    None => {}
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
