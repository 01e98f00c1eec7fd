//! `stepwise` command line: list, trace and play algorithms

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use std::path::PathBuf;
use stepwise::{logging, problem_from_values, ProblemContext, Session, StepwiseConfig, TextRenderer};
use stepwise_algorithms::{run_algorithm, AlgorithmKind, Outcome, Problem, ProblemGenerator, Snapshot};
use stepwise_playback::{PlaybackMode, Renderer};
use stepwise_trace::Step;
use tokio::io::{AsyncBufReadExt, BufReader};

const INTERACTIVE_HELP: &str = "commands: g run | p pause/resume | s step | r reset | n new problem | \
                                a NAME algorithm | + faster | - slower | q quit";

fn problem_args() -> [Arg; 5] {
    [
        Arg::new("algorithm")
            .short('a')
            .long("algorithm")
            .help("Algorithm name, see `stepwise list`"),
        Arg::new("size")
            .short('n')
            .long("size")
            .value_parser(value_parser!(usize))
            .help("Problem size for generated input"),
        Arg::new("seed")
            .long("seed")
            .value_parser(value_parser!(u64))
            .help("Seed for generated input"),
        Arg::new("input")
            .long("input")
            .value_parser(value_parser!(i64))
            .value_delimiter(',')
            .num_args(1..)
            .allow_negative_numbers(true)
            .help("Comma separated values instead of a generated problem"),
        Arg::new("target")
            .long("target")
            .value_parser(value_parser!(i64))
            .allow_negative_numbers(true)
            .help("Target for search and pair problems, amount for coin change"),
    ]
}

fn cli() -> Command {
    Command::new("stepwise")
        .version(stepwise::VERSION)
        .about("Record textbook algorithms and replay them step by step")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(Command::new("list").about("List available algorithms"))
        .subcommand(
            Command::new("trace")
                .about("Record an algorithm and print every step")
                .args(problem_args())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the history as JSON"),
                ),
        )
        .subcommand(
            Command::new("play")
                .about("Play an algorithm back on a timer")
                .args(problem_args())
                .arg(
                    Arg::new("speed")
                        .long("speed")
                        .value_parser(value_parser!(u8))
                        .help("Starting speed"),
                )
                .arg(
                    Arg::new("interactive")
                        .short('i')
                        .long("interactive")
                        .action(ArgAction::SetTrue)
                        .help("Read playback commands from stdin"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> Result<StepwiseConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => StepwiseConfig::from_file(path).with_context(|| format!("loading {}", path.display())),
        None => Ok(StepwiseConfig::default()),
    }
}

fn apply_problem_args(mut config: StepwiseConfig, args: &ArgMatches) -> Result<StepwiseConfig> {
    if let Some(name) = args.get_one::<String>("algorithm") {
        config = config.with_algorithm(name.parse()?);
    }
    if let Some(&size) = args.get_one::<usize>("size") {
        config = config.with_size(size);
    }
    if let Some(&seed) = args.get_one::<u64>("seed") {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn typed_problem(kind: AlgorithmKind, args: &ArgMatches) -> Result<Option<Problem>> {
    let Some(values) = args.get_many::<i64>("input") else {
        return Ok(None);
    };
    let target = args.get_one::<i64>("target").copied();
    Ok(Some(problem_from_values(kind, values.copied().collect(), target)?))
}

fn list() {
    println!("{:<28} {:<22} sizes", "algorithm", "family");
    for kind in AlgorithmKind::ALL {
        println!("{:<28} {:<22} {}", kind.name(), kind.family().to_string(), kind.size_limits());
    }
}

#[derive(Serialize)]
struct TraceReport<'a> {
    algorithm: AlgorithmKind,
    problem: &'a Problem,
    steps: &'a [Step<Snapshot>],
    outcome: &'a Outcome,
}

fn trace(config: &StepwiseConfig, args: &ArgMatches) -> Result<()> {
    config.validate()?;
    let kind = config.problem.algorithm;
    let problem = match typed_problem(kind, args)? {
        Some(problem) => problem,
        None => {
            let mut generator = ProblemGenerator::new(config.problem.seed)
                .with_value_range(config.problem.value_min..=config.problem.value_max);
            kind.generate(&mut generator, config.problem.effective_size())
        }
    };
    let run = run_algorithm(kind, &problem).with_context(|| format!("recording {kind}"))?;

    if args.get_flag("json") {
        let report = TraceReport {
            algorithm: kind,
            problem: &problem,
            steps: run.history.steps(),
            outcome: &run.outcome,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let context = ProblemContext { kind, problem };
    let mut renderer = TextRenderer::new(std::io::stdout());
    renderer.render_problem(&context)?;
    for step in &run.history {
        renderer.render(step, &context)?;
    }
    println!("result: {}", run.outcome);
    Ok(())
}

async fn play(mut config: StepwiseConfig, args: &ArgMatches) -> Result<()> {
    if let Some(&speed) = args.get_one::<u8>("speed") {
        config = config.with_speed(speed);
    }
    let kind = config.problem.algorithm;
    let mut session = Session::new(config, TextRenderer::new(std::io::stdout()))?;
    if let Some(problem) = typed_problem(kind, args)? {
        session.set_problem(problem)?;
    }

    if !args.get_flag("interactive") {
        let steps = session.run()?.history.len();
        let status = session.wait_until_settled().await;
        if let Some(error) = status.last_error {
            bail!("playback stopped at step {} of {steps}: {error}", status.cursor);
        }
        if let Some(run) = session.last_run() {
            println!("result: {}", run.outcome);
        }
        return Ok(());
    }

    eprintln!("{INTERACTIVE_HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let result = match line.trim() {
            "" => continue,
            "q" => break,
            "g" => session.run().map(|_| ()),
            "p" => session.pause_or_resume().map(|_| ()),
            "s" => session.step(),
            "r" => session.reset(),
            "n" => session.generate_problem(),
            "+" => {
                eprintln!("speed {}", session.faster());
                Ok(())
            }
            "-" => {
                eprintln!("speed {}", session.slower());
                Ok(())
            }
            "?" | "h" => {
                eprintln!("{INTERACTIVE_HELP}");
                Ok(())
            }
            other => match other.strip_prefix("a ") {
                Some(name) => session.set_algorithm(name.trim()),
                None => {
                    eprintln!("unknown command '{other}'");
                    Ok(())
                }
            },
        };
        match result {
            Ok(()) => {
                let status = session.status();
                if status.mode == PlaybackMode::Finished {
                    if let Some(run) = session.last_run() {
                        eprintln!("result: {}", run.outcome);
                    }
                }
            }
            Err(e) if e.is_recoverable() => eprintln!("error: {e}"),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    let config = load_config(&matches)?;
    if let Err(e) = logging::init(&config.log_filter, matches.get_flag("log-json")) {
        eprintln!("logging disabled: {e}");
    }

    match matches.subcommand() {
        Some(("list", _)) => {
            list();
            Ok(())
        }
        Some(("trace", args)) => trace(&apply_problem_args(config, args)?, args),
        Some(("play", args)) => play(apply_problem_args(config, args)?, args).await,
        _ => bail!("unknown command"),
    }
}
