use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use four_in_a_row::ai::Difficulty;
use four_in_a_row::config::AppConfig;
use four_in_a_row::game::{Cell, COLS, ROWS};
use four_in_a_row::Engine;

/// Play four in a row against the engine in the terminal.
#[derive(Parser)]
#[command(name = "four_in_a_row", about = "Play four in a row against the engine")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "four_in_a_row.toml")]
    config: PathBuf,

    /// Override difficulty: 1 (easy), 2 (medium) or 3 (hard)
    #[arg(long)]
    difficulty: Option<u8>,

    /// Seed the engine's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Let the engine drop the first disk
    #[arg(long)]
    engine_first: bool,

    /// Log engine decisions to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if cli.print_config {
        print!("{}", AppConfig::default_toml().context("serializing default config")?);
        return Ok(());
    }

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(level) = cli.difficulty {
        app_config.play.difficulty = level;
    }
    if let Some(seed) = cli.seed {
        app_config.play.seed = Some(seed);
    }
    if cli.engine_first {
        app_config.play.human_first = false;
    }
    app_config.validate().context("validating configuration")?;

    let difficulty = Difficulty::try_from(app_config.play.difficulty)?;
    let mut engine = match app_config.play.seed {
        Some(seed) => Engine::seeded(app_config.engine.clone(), seed)?,
        None => Engine::with_config(app_config.engine.clone())?,
    };
    info!(
        %difficulty,
        level = difficulty.level(),
        human_first = app_config.play.human_first,
        "starting session"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    play(
        &mut engine,
        difficulty,
        app_config.play.human_first,
        stdin.lock(),
        &mut stdout,
    )
}

/// Render the board top row first. Cells of a finished four are shown in
/// lowercase.
fn render<O: Write>(engine: &Engine, out: &mut O) -> io::Result<()> {
    let highlighted = engine.four_in_a_row_positions();
    writeln!(out)?;
    for row in (0..ROWS).rev() {
        let mut line = String::with_capacity(2 * COLS);
        for column in 0..COLS {
            let cell = engine.state().value(column, row);
            let symbol = cell.symbol();
            if cell != Cell::Empty && highlighted.contains(&(column, row)) {
                line.push(symbol.to_ascii_lowercase());
            } else {
                line.push(symbol);
            }
            line.push(' ');
        }
        writeln!(out, "{}", line.trim_end())?;
    }
    let labels: Vec<String> = (1..=COLS).map(|c| c.to_string()).collect();
    writeln!(out, "{}", labels.join(" "))
}

/// Run games until the player quits or declines a rematch.
fn play<I: BufRead, O: Write>(
    engine: &mut Engine,
    difficulty: Difficulty,
    human_first: bool,
    input: I,
    out: &mut O,
) -> Result<()> {
    let mut lines = input.lines();
    let human_parity = if human_first { 0 } else { 1 };

    'games: loop {
        engine.new_game();
        writeln!(out, "New game ({difficulty}). You play X when moving first, O otherwise.")?;

        loop {
            let human_to_move = engine.state().number_of_moves() % 2 == human_parity;
            if human_to_move {
                render(engine, out)?;
                write!(out, "Your move (1-7, u = undo, n = new game, q = quit): ")?;
                out.flush()?;

                let Some(line) = lines.next() else {
                    return Ok(());
                };
                match line?.trim() {
                    "q" => return Ok(()),
                    "n" => continue 'games,
                    "u" => {
                        if engine.state().number_of_moves() < 2 {
                            writeln!(out, "Nothing to take back.")?;
                        } else {
                            engine.undo_move()?;
                            engine.undo_move()?;
                        }
                        continue;
                    }
                    text => match text.parse::<usize>() {
                        Ok(column) if (1..=COLS).contains(&column) => {
                            if let Err(err) = engine.make_move(column - 1) {
                                writeln!(out, "{err}")?;
                                continue;
                            }
                        }
                        _ => {
                            writeln!(out, "Please enter a column from 1 to {COLS}.")?;
                            continue;
                        }
                    },
                }
            } else {
                let column = engine.choose_move(difficulty)?;
                engine.make_move(column)?;
                writeln!(out, "Engine plays column {}.", column + 1)?;
            }

            if engine.four_in_a_row() {
                render(engine, out)?;
                if human_to_move {
                    writeln!(out, "You win! Congratulations!")?;
                } else {
                    writeln!(out, "Computer wins!")?;
                }
                break;
            }
            if engine.is_draw() {
                render(engine, out)?;
                writeln!(out, "Draw.")?;
                break;
            }
        }

        write!(out, "Play again? (y/n): ")?;
        out.flush()?;
        let answer = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };
        if !answer.trim().eq_ignore_ascii_case("y") {
            return Ok(());
        }
    }
}
