use std::env;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::{
    event::{self, Event as CEvent, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use pokedex_config::PokedexConfig;
use pokedex_core::{
    logging::{self, FooterLog, LogSettings},
    pokemon::{load_records, Pokemon},
    state::AppState,
    view::{render_pokemon_with, RenderOptions, ViewNode},
};
use pokedex_ui::{
    card::PokemonCard,
    layout::pokedex_layout,
    shell::{render_shell, ShellView},
};

const USAGE: &str = "usage: pokedex [--config <PATH>] [--print] <FILE>";

/// Parsed command line.
#[derive(Debug, PartialEq, Eq)]
struct Args {
    config: Option<PathBuf>,
    print: bool,
    data: PathBuf,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut config = None;
        let mut print = false;
        let mut data = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => match args.next() {
                    Some(path) => config = Some(PathBuf::from(path)),
                    None => bail!("--config requires a path\n{USAGE}"),
                },
                "--print" | "-p" => print = true,
                flag if flag.starts_with('-') => bail!("unknown flag {flag:?}\n{USAGE}"),
                _ if data.is_some() => bail!("only one data file may be given\n{USAGE}"),
                _ => data = Some(PathBuf::from(&arg)),
            }
        }

        let Some(data) = data else {
            bail!("missing data file\n{USAGE}");
        };

        Ok(Self {
            config,
            print,
            data,
        })
    }
}

struct App {
    state: AppState,
    records: Vec<Pokemon>,
    options: RenderOptions,
    config: PokedexConfig,
    footer: FooterLog,
}

impl App {
    fn new(records: Vec<Pokemon>, config: PokedexConfig, footer: FooterLog) -> Self {
        Self {
            state: AppState::new(records.len()),
            options: config.render_options(),
            records,
            config,
            footer,
        }
    }

    fn current_view(&self) -> Option<ViewNode> {
        self.records
            .get(self.state.selected)
            .map(|p| render_pokemon_with(p, &self.options))
    }

    fn footer_lines(&self) -> Vec<String> {
        self.footer
            .snapshot()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    fn footer_height(&self) -> u16 {
        // Borders + key hints + log lines.
        (3 + self.config.ui.footer_capacity()) as u16
    }

    fn select_next(&mut self) {
        self.state.select_next();
        self.on_selection_changed();
    }

    fn select_prev(&mut self) {
        self.state.select_prev();
        self.on_selection_changed();
    }

    fn on_selection_changed(&mut self) {
        if let Some(p) = self.records.get(self.state.selected) {
            tracing::debug!(id = p.id, name = %p.name, "selected record");
            self.state.status_line = format!("#{} {}", p.id, p.name);
        }
    }
}

/// Log each type name that repeats within a record.
fn warn_duplicate_types(records: &[Pokemon]) {
    for p in records {
        for name in p.duplicate_type_names() {
            tracing::warn!(
                id = p.id,
                type_name = %name,
                "duplicate type name in record"
            );
        }
    }
}

/// Write every record's display lines, separated by blank lines.
fn print_records(out: &mut impl Write, records: &[Pokemon], options: &RenderOptions) -> Result<()> {
    for (idx, p) in records.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        for line in render_pokemon_with(p, options).display_lines() {
            writeln!(out, "{line}")?;
        }
    }
    Ok(())
}

/// Run `setup`, calling `rollback` before handing back its error.
fn with_rollback<T>(setup: impl FnOnce() -> Result<T>, rollback: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| rollback())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    with_rollback(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        },
        || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        },
    )
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse(env::args().skip(1))?;
    let config = PokedexConfig::load(args.config.as_deref())?;
    let footer = logging::init(&LogSettings::from_env(config.ui.footer_capacity()));
    tracing::info!("pokedex starting up");

    let records = load_records(&args.data)?;
    tracing::info!(
        count = records.len(),
        path = %args.data.display(),
        "loaded pokemon records"
    );
    warn_duplicate_types(&records);

    if args.print {
        let stdout = io::stdout();
        return print_records(&mut stdout.lock(), &records, &config.render_options());
    }

    let mut app = App::new(records, config, footer);
    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(terminal)?;
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    let poll_timeout = Duration::from_millis(100);
    app.on_selection_changed();

    loop {
        terminal.draw(|f| {
            let rects = pokedex_layout(f.area(), app.footer_height());
            let position = app.state.position_label();
            let view = ShellView {
                position: &position,
                status_line: &app.state.status_line,
                footer_lines: app.footer_lines(),
            };
            let card_view = app.current_view();

            render_shell(f, rects, view, |f, area| {
                if let Some(card_view) = &card_view {
                    f.render_widget(PokemonCard::new(card_view), area);
                }
            });
        })?;

        if !event::poll(poll_timeout)? {
            continue;
        }
        match event::read()? {
            CEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('j') => {
                    app.select_next()
                }
                KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('k') => {
                    app.select_prev()
                }
                _ => {}
            },
            CEvent::Resize(cols, rows) => {
                tracing::debug!(cols, rows, "terminal resized");
            }
            _ => {}
        }
    }
}
