//! Terminal front end: builds a board, scatters obstacles, then animates
//! the search and the revealed path in place.

use std::{
    io::{self, stdout, Stdout, Write},
    thread,
    time::Duration,
};

use anyhow::{ensure, Context};
use clap::Parser;
use colored::{ColoredString, Colorize};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use gridpath::{CellPos, Grid, PathConfig, RunEvent, RunReport, Runner, RunnerOptions};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Animated A* pathfinding in the terminal.
#[derive(Parser, Debug)]
#[command(about, author, version)]
pub struct CliOptions {
    /// grid height in cells
    #[clap(long, default_value = "25")]
    pub rows: i32,

    /// grid width in cells
    #[clap(long, default_value = "25")]
    pub cols: i32,

    /// start cell as `row,col`; defaults to the top-left corner
    #[clap(long, value_parser = parse_cell)]
    pub start: Option<CellPos>,

    /// end cell as `row,col`; defaults to the bottom-right corner
    #[clap(long, value_parser = parse_cell)]
    pub end: Option<CellPos>,

    /// restrict movement to the four cardinal directions
    #[clap(short, long)]
    pub orthogonal: bool,

    /// probability that a free cell starts blocked
    #[clap(long, default_value = "0.3")]
    pub density: f64,

    /// seed for obstacle placement; picks one at random when omitted
    #[clap(long)]
    pub seed: Option<u64>,

    /// milliseconds to pause on each visited cell
    #[clap(long, default_value = "50")]
    pub step_ms: u64,

    /// milliseconds to pause on each revealed path cell
    #[clap(long, default_value = "100")]
    pub reveal_ms: u64,

    /// skip the animation and print the report only
    #[clap(short, long)]
    pub quiet: bool,
}

impl CliOptions {
    #[must_use]
    pub fn get() -> Self {
        Self::parse()
    }
}

fn parse_cell(raw: &str) -> Result<CellPos, String> {
    let (row, col) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected `row,col`, got `{raw}`"))?;
    let row = row.trim().parse().map_err(|_| format!("bad row in `{raw}`"))?;
    let col = col.trim().parse().map_err(|_| format!("bad col in `{raw}`"))?;
    Ok(CellPos::new(row, col))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    run()
}

fn run() -> anyhow::Result<()> {
    let CliOptions {
        rows,
        cols,
        start,
        end,
        orthogonal,
        density,
        seed,
        step_ms,
        reveal_ms,
        quiet,
    } = CliOptions::get();

    ensure!(
        rows >= 1 && cols >= 1 && i64::from(rows) * i64::from(cols) >= 2,
        "the grid needs at least two cells"
    );
    ensure!(
        (0.0..=1.0).contains(&density),
        "--density must lie within 0..=1"
    );

    let mut grid = Grid::new(rows, cols);
    place_endpoints(&mut grid, start, end)?;

    let seed = seed.unwrap_or_else(rand::random);
    let placed = grid.scatter_obstacles(&mut StdRng::seed_from_u64(seed), density);
    info!(seed, placed, "board generated");

    let config = PathConfig {
        allow_diagonal: !orthogonal,
        ..PathConfig::default()
    };
    let options = if quiet {
        RunnerOptions {
            step_delay: Duration::ZERO,
            reveal_delay: Duration::ZERO,
        }
    } else {
        RunnerOptions {
            step_delay: Duration::from_millis(step_ms),
            reveal_delay: Duration::from_millis(reveal_ms),
        }
    };
    let mut runner = Runner::new(grid, config, options);

    let report = if quiet {
        runner.run(|_| {})?
    } else {
        animate(&mut runner)?
    };

    print_report(&report);
    println!("{}", format!("seed {seed}").dimmed());
    Ok(())
}

fn place_endpoints(grid: &mut Grid, start: Option<CellPos>, end: Option<CellPos>) -> anyhow::Result<()> {
    // when the requested start sits on the default end, the end has to
    // move out of the way first
    if let (Some(start), Some(end)) = (start, end) {
        ensure!(start != end, "start and end must be different cells");
        if start == grid.end() {
            grid.set_end(end).context("placing the end cell")?;
            grid.set_start(start).context("placing the start cell")?;
            return Ok(());
        }
    }
    if let Some(start) = start {
        grid.set_start(start).context("placing the start cell")?;
    }
    if let Some(end) = end {
        grid.set_end(end).context("placing the end cell")?;
    }
    Ok(())
}

fn animate(runner: &mut Runner) -> anyhow::Result<RunReport> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), Hide).context("preparing the terminal")?;

    let result = animate_frames(&mut out, runner);

    // park the cursor under the board whatever happened above
    let bottom = runner.grid().rows() as u16 + 1;
    execute!(out, MoveTo(0, bottom), Show).ok();
    result
}

fn animate_frames(out: &mut Stdout, runner: &mut Runner) -> anyhow::Result<RunReport> {
    draw_board(out, runner.grid())?;
    let RunnerOptions {
        step_delay,
        reveal_delay,
    } = runner.options();
    let mut current: Option<CellPos> = None;

    runner.begin()?;
    let report = loop {
        match runner.step() {
            RunEvent::Visited(pos) => {
                if let Some(prev) = current.replace(pos) {
                    draw_cell(out, prev, "░░".blue())?;
                }
                draw_cell(out, pos, "▓▓".yellow())?;
                out.flush()?;
                thread::sleep(step_delay);
            }
            RunEvent::PathCell(pos) => {
                if let Some(prev) = current.take() {
                    draw_cell(out, prev, "░░".blue())?;
                }
                draw_cell(out, pos, "██".yellow())?;
                out.flush()?;
                thread::sleep(reveal_delay);
            }
            RunEvent::Finished(report) => {
                if let Some(prev) = current.take() {
                    draw_cell(out, prev, "░░".blue())?;
                    out.flush()?;
                }
                break report;
            }
        }
    };
    Ok(report)
}

fn draw_board(out: &mut Stdout, grid: &Grid) -> io::Result<()> {
    for pos in grid.positions() {
        draw_cell(out, pos, base_glyph(grid, pos))?;
    }
    out.flush()
}

fn base_glyph(grid: &Grid, pos: CellPos) -> ColoredString {
    if pos == grid.start() {
        "S ".green().bold()
    } else if pos == grid.end() {
        "E ".red().bold()
    } else if grid.cell(pos).obstacle {
        "██".normal()
    } else {
        "· ".dimmed()
    }
}

fn draw_cell(out: &mut Stdout, pos: CellPos, glyph: ColoredString) -> io::Result<()> {
    queue!(out, MoveTo(pos.col as u16 * 2, pos.row as u16), Print(glyph))
}

fn print_report(report: &RunReport) {
    let headline = report.path.as_ref().map_or_else(
        || "no path exists".red().bold().to_string(),
        |path| {
            format!(
                "{}  cost {:.3}, {} cells",
                "path found".green().bold(),
                path.cost,
                report.path_len()
            )
        },
    );
    println!("{headline}");
    println!(
        "visited {} cells in {:?}",
        report.nodes_visited, report.elapsed
    );
}
