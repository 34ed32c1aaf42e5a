use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use encoding_rs::Encoding;
use gridclash::api::{load_builtin, parse_battle_text, run_battle, BattleFile};
use gridclash::content::builtin_battles;
use gridclash::{auto_place, CombatReport, Position, Side};
use std::{fs, path::Path, path::PathBuf};
use tracing::Level;

#[derive(Copy, Clone, ValueEnum)]
enum Format {
    Summary,
    Transcript,
    Json,
}

#[derive(Copy, Clone, ValueEnum)]
enum SideArg {
    A,
    B,
}

impl From<SideArg> for Side {
    fn from(s: SideArg) -> Self {
        match s {
            SideArg::A => Side::A,
            SideArg::B => Side::B,
        }
    }
}

#[derive(clap::Args)]
struct Source {
    /// Battle file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(long, conflicts_with = "builtin")]
    file: Option<PathBuf>,
    /// Built-in battle id (see `list`)
    #[arg(long)]
    builtin: Option<String>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run a battle and print the result
    Simulate {
        #[command(flatten)]
        source: Source,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Summary)]
        format: Format,
        /// Pretty-print JSON output
        #[arg(long, default_value_t = false)]
        pretty: bool,
        /// Override the round cap
        #[arg(long)]
        max_rounds: Option<u32>,
        /// Idle healers skip their turn instead of attacking
        #[arg(long, default_value_t = false)]
        no_healer_fallback: bool,
        /// Auto-place seed for sides without a placement
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Auto-place one side of a battle and print the placement entries as JSON
    AutoPlace {
        #[command(flatten)]
        source: Source,
        /// Side to place
        #[arg(long, value_enum, default_value_t = SideArg::B)]
        side: SideArg,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// List built-in battles
    List,
}

#[derive(Parser)]
#[command(name = "gridclash")]
#[command(about = "Grid skirmish simulator CLI")]
struct Cli {
    /// Log to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Cmd,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn load_source(source: &Source) -> anyhow::Result<BattleFile> {
    match (&source.file, &source.builtin) {
        (Some(path), _) => {
            let text = read_text_auto(path)?;
            parse_battle_text(&text, path)
        }
        (None, Some(id)) => load_builtin(id),
        (None, None) => bail!("pass either --file or --builtin"),
    }
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", serde_json::to_string(value)?);
    }
    Ok(())
}

fn print_summary(report: &CombatReport) {
    println!("gridclash results");
    println!("-----------------");
    println!(
        "teams:              {} (A) vs {} (B)",
        report.teams.a.name, report.teams.b.name
    );
    println!(
        "board:              {}x{}",
        report.board.width, report.board.height
    );
    println!("rounds:             {}", report.rounds.len());
    println!("outcome:            {:?}", report.outcome);
    println!("winner:             {} ({})", report.winner, report.winning_side);
    if let Some(err) = &report.error {
        println!("error:              {}", err);
    }
    println!();
    for ((side, id), hp) in report.final_hp() {
        if let Some(unit) = report.unit(side, id) {
            println!(
                "  {}#{:<3} {:<16} {:>3}/{:<3}{}",
                side,
                id,
                unit.name,
                hp,
                unit.max_hp,
                if hp == 0 { "  down" } else { "" }
            );
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Cmd::Simulate {
            source,
            format,
            pretty,
            max_rounds,
            no_healer_fallback,
            seed,
        } => {
            let mut battle = load_source(&source)?;
            if let Some(max_rounds) = max_rounds {
                battle.rules.max_rounds = max_rounds;
            }
            if no_healer_fallback {
                battle.rules.healer_fallback_to_attack = false;
            }
            if seed.is_some() {
                battle.auto_place_seed = seed;
            }
            let report = run_battle(&battle)?;
            match format {
                Format::Summary => print_summary(&report),
                Format::Transcript => {
                    for line in report.transcript() {
                        println!("{}", line);
                    }
                }
                Format::Json => print_json(&report, pretty)?,
            }
        }
        Cmd::AutoPlace { source, side, seed } => {
            let battle = load_source(&source)?;
            battle.board.validate()?;
            let side = Side::from(side);
            let taken: Vec<Position> = battle
                .placement
                .for_side(side.opponent())
                .iter()
                .filter_map(|e| e.position)
                .collect();
            let entries = auto_place(
                &battle.team(side).roster,
                side,
                &battle.board,
                &taken,
                seed,
            );
            print_json(&entries, true)?;
        }
        Cmd::List => {
            for id in builtin_battles().keys() {
                println!("{}", id);
            }
        }
    }
    Ok(())
}
