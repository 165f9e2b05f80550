// bfeval: Brainfuck evaluator with a time-travel tape debugger

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bfeval::genetic::fitness::OutputDistance;
use bfeval::genetic::selection::{DEFAULT_TOURNAMENT_SIZE, Selection};
use bfeval::genetic::{GeneticAlgorithm, GeneticConfig, Objective};
use bfeval::interpreter::constants::{DEFAULT_HISTORY_LIMIT, DEFAULT_TIMEOUT_SECS};
use bfeval::parser::program::parse;
use bfeval::ui::App;
use bfeval::{Config, Interpreter, Outcome, evaluate_with};

const DEFAULT_GENERATIONS: usize = 100;
const DEFAULT_POPULATION: usize = 100;

struct Args {
    program: Option<String>,
    input: Option<String>,
    timeout: f64,
    run_only: bool,
    evolve: Option<Evolve>,
}

/// Settings for `--evolve`
struct Evolve {
    target: String,
    generations: usize,
    population: usize,
    selection: Selection,
}

fn usage(program_name: &str) -> ! {
    eprintln!("Usage: {} <program.bf> [--input FILE] [--timeout SECS] [--run]", program_name);
    eprintln!(
        "       {} --evolve TARGET [seed.bf] [--generations N] [--population N]",
        program_name
    );
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --input FILE    bytes read by ',' (default: none)");
    eprintln!(
        "  --timeout SECS  wall-clock budget, checked at ']' (default: {})",
        DEFAULT_TIMEOUT_SECS
    );
    eprintln!("  --run           print the output instead of opening the debugger");
    eprintln!("  --evolve TARGET search for a program that prints TARGET");
    eprintln!(
        "  --generations N generations to evolve (default: {})",
        DEFAULT_GENERATIONS
    );
    eprintln!(
        "  --population N  chromosomes per generation (default: {})",
        DEFAULT_POPULATION
    );
    eprintln!("  --selection S   roulette, tournament or tournament_K (default: tournament)");
    process::exit(1);
}

fn parse_args() -> Args {
    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| "bfeval".to_string());

    let mut program = None;
    let mut input = None;
    let mut timeout = DEFAULT_TIMEOUT_SECS;
    let mut run_only = false;
    let mut target = None;
    let mut generations = DEFAULT_GENERATIONS;
    let mut population = DEFAULT_POPULATION;
    let mut selection = Selection::Tournament(DEFAULT_TOURNAMENT_SIZE);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" | "-i" => match args.next() {
                Some(path) => input = Some(path),
                None => usage(&program_name),
            },
            "--timeout" | "-t" => match args.next().map(|s| s.parse::<f64>()) {
                Some(Ok(secs)) => timeout = secs,
                Some(Err(e)) => {
                    eprintln!("Error: invalid timeout: {}", e);
                    usage(&program_name);
                }
                None => usage(&program_name),
            },
            "--run" | "-r" => run_only = true,
            "--evolve" | "-e" => match args.next() {
                Some(t) => target = Some(t),
                None => usage(&program_name),
            },
            "--generations" | "-g" => generations = count_arg(args.next(), &program_name),
            "--population" | "-p" => population = count_arg(args.next(), &program_name),
            "--selection" | "-s" => match args.next().map(|s| s.parse::<Selection>()) {
                Some(Ok(s)) => selection = s,
                Some(Err(e)) => {
                    eprintln!("Error: {}", e);
                    usage(&program_name);
                }
                None => usage(&program_name),
            },
            "--help" | "-h" => usage(&program_name),
            _ if program.is_none() => program = Some(arg),
            _ => usage(&program_name),
        }
    }

    if program.is_none() && target.is_none() {
        eprintln!("Error: No program file provided");
        eprintln!();
        usage(&program_name);
    }

    Args {
        program,
        input,
        timeout,
        run_only,
        evolve: target.map(|target| Evolve {
            target,
            generations,
            population,
            selection,
        }),
    }
}

fn count_arg(value: Option<String>, program_name: &str) -> usize {
    match value.map(|s| s.parse::<usize>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            eprintln!("Error: invalid count: {}", e);
            usage(program_name);
        }
        None => usage(program_name),
    }
}

/// Evolve a program whose output is close to `evolve.target` and print it
fn run_evolution(evolve: Evolve, seed: Option<Vec<u8>>) -> io::Result<()> {
    let fitness = OutputDistance::new(evolve.target.as_bytes());
    let config = GeneticConfig {
        objective: Objective::Minimize,
        selection: evolve.selection,
        elitism: true,
        ..GeneticConfig::default()
    };

    let mut ga = GeneticAlgorithm::new(config);
    let evolution = ga.run(
        |genes| fitness.score(genes),
        evolve.generations,
        evolve.population,
        seed.as_deref(),
    );

    let best = evolution.best;
    info!(fitness = best.fitness, "evolution finished");

    let output = evaluate_with(&best.genes, b"", &Config::default().with_timeout_secs(1.0));
    let mut stdout = io::stdout();
    writeln!(stdout, "chromosome: {}", String::from_utf8_lossy(&best.genes))?;
    writeln!(stdout, "fitness: {:.5}", best.fitness)?;
    match output.output() {
        [] => writeln!(stdout, "output: (none)")?,
        bytes => {
            let shown = &bytes[..bytes.len().min(100)];
            writeln!(stdout, "output: {}", String::from_utf8_lossy(shown))?;
        }
    }
    stdout.flush()
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let args = parse_args();

    if let Some(path) = &args.program {
        if !Path::new(path).exists() {
            eprintln!("Error: File '{}' not found", path);
            process::exit(1);
        }
    }
    let source = args.program.as_ref().map(fs::read).transpose()?;

    if let Some(evolve) = args.evolve {
        run_evolution(evolve, source)?;
        return Ok(());
    }
    let (Some(path), Some(source)) = (args.program, source) else {
        return Ok(());
    };
    let input = match &args.input {
        Some(path) => fs::read(path)?,
        None => Vec::new(),
    };

    let config = Config::default().with_timeout_secs(args.timeout);

    if args.run_only {
        let outcome = evaluate_with(&source, &input, &config);
        if let Outcome::TimedOut { elapsed_ms } = outcome {
            warn!(elapsed_ms, "execution timed out, output discarded");
            process::exit(2);
        }
        let mut stdout = io::stdout();
        stdout.write_all(outcome.output())?;
        stdout.flush()?;
        return Ok(());
    }

    let program = parse(&source);
    info!(
        instructions = program.len(),
        operators = program.operator_count(),
        "parsed {}",
        path
    );

    // Run to completion first to build the history, then browse it
    let config = config.with_history(DEFAULT_HISTORY_LIMIT);
    let mut interpreter = Interpreter::new(program, input, &config);
    match interpreter.run() {
        Ok(halt) => info!(?halt, snapshots = interpreter.total_snapshots(), "execution finished"),
        Err(e) => warn!("{}; browsing partial history", e),
    }

    if let Err(e) = interpreter.rewind_to_start() {
        warn!("failed to rewind to start: {}", e);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(interpreter, source);
    let res = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
