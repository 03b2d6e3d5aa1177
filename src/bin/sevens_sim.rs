use clap::{Parser, ValueEnum};
use rand::Rng;
use sevens_rs::agents::{AgentTable, BotProfile, Strategy};
use sevens_rs::driver::{play_game, play_many, DriverConfig, DriverError};
use sevens_rs::engine::{GameEngine, Table};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "sevens-sim",
    version = env!("CARGO_PKG_VERSION"),
    about = "Play bot-only games of Sevens and report the results",
    long_about = None,
)]
struct Args {
    /// Seed for the deal and the bots; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games. One game prints every move, more print a win tally.
    #[arg(long, default_value_t = 1)]
    games: usize,

    /// Strategy per seat, P1 first. Repeat or comma-separate.
    #[arg(
        long,
        value_enum,
        value_delimiter = ',',
        num_args = 1..=4,
        default_values_t = [BotKind::Heuristic, BotKind::Random, BotKind::Heuristic, BotKind::Random]
    )]
    strategy: Vec<BotKind>,

    /// Abort a game after this many events.
    #[arg(long, default_value_t = DriverConfig::DEFAULT_MAX_TURNS)]
    max_turns: usize,

    /// Only print the result; logging drops to warnings.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BotKind {
    Random,
    Heuristic,
}

impl From<BotKind> for Strategy {
    fn from(kind: BotKind) -> Self {
        match kind {
            BotKind::Random => Strategy::Random,
            BotKind::Heuristic => Strategy::Heuristic,
        }
    }
}

impl Args {
    /// Seats beyond the listed strategies repeat the last one.
    fn profiles(&self) -> [BotProfile; 4] {
        std::array::from_fn(|seat| {
            let kind = self
                .strategy
                .get(seat)
                .or_else(|| self.strategy.last())
                .copied()
                .unwrap_or(BotKind::Heuristic);
            BotProfile::for_strategy(kind.into())
        })
    }

    /// Default log filter; `RUST_LOG` still overrides it.
    fn log_filter(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

fn run(args: &Args) -> Result<(), DriverError> {
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("seed {seed}");
    let config = DriverConfig::default().with_seed(seed).with_max_turns(args.max_turns);

    if args.games > 1 {
        let tally = play_many(args.games, &args.profiles(), config)?;
        println!("{tally}");
        return Ok(());
    }

    let mut table = Table::deal_seeded(seed)?;
    if !args.quiet {
        println!("{}\n", table.state());
        table.subscribe(Box::new(|_, event| println!("{event}")));
    }
    let profiles = args.profiles();
    let mut agents = AgentTable::with_bots(std::array::from_fn(|seat| {
        profiles[seat].clone().with_seed(seed.wrapping_add(seat as u64))
    }));
    let outcome = play_game(&mut table, &mut agents, args.max_turns)?;
    if !args.quiet {
        println!("\n{}", outcome.final_state);
    }
    println!(
        "P{} wins after {} turns ({} passes)",
        outcome.winner + 1,
        outcome.turns,
        outcome.passes
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("sevens-sim").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn default_lineup_alternates_strategies() {
        let args = parse(&[]);
        let strategies: Vec<Strategy> = args.profiles().iter().map(|p| p.strategy).collect();
        assert_eq!(
            strategies,
            [Strategy::Heuristic, Strategy::Random, Strategy::Heuristic, Strategy::Random]
        );
        assert_eq!(args.games, 1);
        assert_eq!(args.max_turns, DriverConfig::DEFAULT_MAX_TURNS);
    }

    #[test]
    fn short_lineup_repeats_last_strategy() {
        let args = parse(&["--strategy", "random,heuristic"]);
        let strategies: Vec<Strategy> = args.profiles().iter().map(|p| p.strategy).collect();
        assert_eq!(
            strategies,
            [Strategy::Random, Strategy::Heuristic, Strategy::Heuristic, Strategy::Heuristic]
        );
        assert!(Args::try_parse_from(["sevens-sim", "--strategy", "greedy"]).is_err());
    }

    #[test]
    fn quiet_lowers_the_log_filter() {
        assert_eq!(parse(&[]).log_filter(), "info");
        assert_eq!(parse(&["--quiet"]).log_filter(), "warn");
        assert_eq!(parse(&["-q"]).log_filter(), "warn");
    }

    #[test]
    fn quiet_batch_runs_to_a_tally() {
        let args = parse(&["--games", "5", "--seed", "1", "--quiet"]);
        assert!(run(&args).is_ok());
    }
}
