use anyhow::anyhow;
use clap::Parser;
use clap::Subcommand;
use colored::Colorize;
use gauntlet::agent::Agent;
use gauntlet::agent::Mechanical;
use gauntlet::agent::Uniform;
use gauntlet::arena;
use gauntlet::arena::MatchOptions;
use gauntlet::arena::ReplayOptions;
use gauntlet::holdem::Holdem;
use gauntlet::holdem::HoldemConfig;
use gauntlet::ladder;
use gauntlet::ladder::EloConfig;
use gauntlet::ladder::EloTable;
use gauntlet::ladder::LadderConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gauntlet", about = "deterministic match runner and replay verifier")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// run one match between built-in agents and journal it
    Run {
        #[arg(long, default_value = "holdem")]
        game: String,
        /// comma-separated agent specs, `kind` or `kind=id`
        #[arg(long, default_value = "uniform=u1,uniform=u2")]
        agents: String,
        #[arg(long)]
        seed: String,
        #[arg(long, default_value = "match.jsonl")]
        out: PathBuf,
        #[arg(long, default_value_t = 5000)]
        timeout_ms: u64,
        #[arg(long, default_value_t = 10)]
        hands: usize,
        /// 10k/50/100 stakes instead of 1k/10/20
        #[arg(long)]
        deep: bool,
    },
    /// round-robin every agent against every other, Elo-rated
    Ladder {
        #[arg(long, default_value = "holdem")]
        game: String,
        #[arg(long, default_value = "mechanical=rock,uniform=u1,uniform=u2")]
        agents: String,
        #[arg(long)]
        seed: String,
        #[arg(long, default_value_t = 2)]
        matches_per_pair: usize,
        #[arg(long, default_value_t = 10)]
        hands: usize,
    },
    /// replay a JSONL journal against the rules and report tampering
    Verify {
        #[arg(long, default_value = "holdem")]
        game: String,
        file: PathBuf,
        #[arg(long)]
        skip_observations: bool,
    },
}

#[tokio::main]
async fn main() {
    gauntlet::log();
    let code = match dispatch(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            1
        }
    };
    std::process::exit(code);
}

async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Command::Run {
            game,
            agents,
            seed,
            out,
            timeout_ms,
            hands,
            deep,
        } => {
            check_game(&game)?;
            let mut agents = build_agents(&agents)?;
            let opts = MatchOptions::seeded(&seed)
                .with_timeout(std::time::Duration::from_millis(timeout_ms))
                .with_config(holdem_config(hands, deep));
            let report = run_holdem_match(&mut agents, opts).await?;
            arena::write_journal(&out, &report.events)?;
            println!(
                "{} {} turns in {}ms -> {}",
                report.match_id.bold(),
                report.total_turns,
                report.total_time_ms,
                out.display()
            );
            for player in &report.results.players {
                println!(
                    "  #{} {:<12} {:>6} chips  rank {}",
                    player.player_index,
                    report.agents[player.player_index].id,
                    player.score,
                    player.rank
                );
            }
            let replay = arena::verify_replay(&Holdem, &report.events, ReplayOptions::default());
            match replay.success {
                true => {
                    println!("{}", "replay verified".green());
                    Ok(0)
                }
                false => {
                    for error in &replay.errors {
                        eprintln!("{} {}", "replay:".red(), error);
                    }
                    Ok(2)
                }
            }
        }
        Command::Ladder {
            game,
            agents,
            seed,
            matches_per_pair,
            hands,
        } => {
            check_game(&game)?;
            let mut agents = build_agents(&agents)?;
            let ids = agents
                .iter()
                .map(|a| a.profile().id.clone())
                .collect::<Vec<String>>();
            let schedule = ladder::schedule(&ids, matches_per_pair, &seed);
            let bar = progress(schedule.len());
            let table = EloTable::new(EloConfig::default());
            let config = LadderConfig::seeded(&seed).with_matches_per_pair(matches_per_pair);
            let game_config = holdem_config(hands, false);
            for scheduled in &schedule {
                ladder::run_scheduled(&Holdem, &mut agents, scheduled, &config, &game_config, &table)
                    .await?;
                bar.inc(1);
            }
            bar.finish_and_clear();
            println!("{}", "standings".bold());
            for (place, entry) in table.standings().iter().enumerate() {
                println!(
                    "{:>3}. {:<16} {:>5}  {:>3}W {:>3}L {:>3}D",
                    place + 1,
                    entry.id,
                    entry.rating,
                    entry.wins,
                    entry.losses,
                    entry.draws
                );
            }
            Ok(0)
        }
        Command::Verify {
            game,
            file,
            skip_observations,
        } => {
            check_game(&game)?;
            let events = arena::read_journal(&file)?;
            let replay = arena::verify_replay(
                &Holdem,
                &events,
                ReplayOptions {
                    check_observations: !skip_observations,
                },
            );
            println!(
                "{}: {}/{} turns verified",
                replay.match_id.as_deref().unwrap_or("<unknown>"),
                replay.turns_verified,
                replay.total_turns
            );
            match replay.success {
                true => {
                    println!("{}", "ok".green());
                    Ok(0)
                }
                false => {
                    for error in &replay.errors {
                        eprintln!("{} {}", "error:".red(), error);
                    }
                    Ok(2)
                }
            }
        }
    }
}

async fn run_holdem_match(
    agents: &mut Vec<Box<dyn Agent<Holdem>>>,
    opts: MatchOptions<Holdem>,
) -> Result<arena::MatchReport, arena::MatchError> {
    let mut seats: Vec<&mut dyn Agent<Holdem>> = Vec::new();
    for a in agents.iter_mut() {
        seats.push(&mut **a);
    }
    arena::run_match(&Holdem, &mut seats, opts).await
}

fn check_game(game: &str) -> anyhow::Result<()> {
    match game {
        "holdem" => Ok(()),
        other => Err(anyhow!("unknown game: {}", other)),
    }
}

fn holdem_config(hands: usize, deep: bool) -> HoldemConfig {
    let base = match deep {
        true => HoldemConfig::deep(),
        false => HoldemConfig::default(),
    };
    HoldemConfig {
        max_hands: hands,
        ..base
    }
}

fn build_agents(specs: &str) -> anyhow::Result<Vec<Box<dyn Agent<Holdem>>>> {
    specs.split(',').map(|spec| build_agent(spec.trim())).collect()
}

fn build_agent(spec: &str) -> anyhow::Result<Box<dyn Agent<Holdem>>> {
    let (kind, id) = match spec.split_once('=') {
        Some((kind, id)) => (kind, id),
        None => (spec, spec),
    };
    match kind {
        "mechanical" => Ok(Box::new(Mechanical::new(id))),
        "uniform" => Ok(Box::new(Uniform::new(id))),
        other => Err(anyhow!("unknown agent: {}", other)),
    }
}

fn progress(n: usize) -> indicatif::ProgressBar {
    let style = indicatif::ProgressStyle::with_template(
        "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan}",
    )
    .expect("static template");
    let bar = indicatif::ProgressBar::new(n as u64);
    bar.set_style(style);
    bar
}
