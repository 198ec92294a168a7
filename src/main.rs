use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use matchup_stats::calculate::{self, AggregationReport, StatsSummary};
use matchup_stats::config::AppConfig;
use matchup_stats::ingest::{self, RoundMatches};
use matchup_stats::parse_rounds;
use matchup_stats::storage::{read_json, DataFile, StatsReport, StorageConfig};
use matchup_stats::TournamentStats;

#[derive(Parser)]
#[command(name = "matchup-stats")]
#[command(about = "Archetype win rates and matchups from tournament match results")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate archetype statistics from stored match data
    Aggregate {
        /// Tournament ID (default from config)
        #[arg(long)]
        tournament: Option<String>,

        /// Rounds to include (e.g., "4-8", "4,5,6", "4-8,12-16")
        #[arg(long)]
        rounds: Option<String>,

        /// Read matches from this file instead of the data directory
        #[arg(long)]
        matches: Option<PathBuf>,

        /// Compute and print but don't write files
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the top archetypes from saved statistics
    Summary {
        #[arg(long)]
        tournament: Option<String>,

        /// Minimum decided matches to be ranked
        #[arg(long)]
        min_matches: Option<u32>,

        /// Number of archetypes to show
        #[arg(long)]
        top: Option<usize>,
    },

    /// Print one archetype's matchup table from saved statistics
    Matchups {
        /// Archetype name (case-insensitive)
        archetype: String,

        #[arg(long)]
        tournament: Option<String>,
    },

    /// Parse a single result string and print the outcome
    ParseResult { text: String },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = AppConfig::load_optional(&cli.config)
        .with_context(|| format!("Failed to load config {:?}", cli.config))?;
    let using_defaults = loaded.is_none();
    let mut config = loaded.unwrap_or_default();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting matchup-stats v{}", env!("CARGO_PKG_VERSION"));
    if using_defaults {
        tracing::info!("No config file at {:?}, using defaults", cli.config);
    }

    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Aggregate {
            tournament,
            rounds,
            matches,
            dry_run,
        } => {
            let tournament_id = tournament.unwrap_or_else(|| config.tournament.id.clone());
            let rounds_spec = rounds.unwrap_or_else(|| config.tournament.rounds.clone());
            let rounds = parse_rounds(&rounds_spec)
                .with_context(|| format!("Invalid rounds configuration: {}", rounds_spec))?;
            tracing::info!("Aggregating tournament {} rounds {:?}", tournament_id, rounds);

            let matches_path =
                matches.unwrap_or_else(|| storage.path(DataFile::Matches, &tournament_id));
            let round_matches: RoundMatches = read_json(&matches_path)
                .with_context(|| format!("Failed to load match data from {:?}", matches_path))?;

            let missing: Vec<_> = rounds
                .iter()
                .filter(|r| !round_matches.contains_key(*r))
                .collect();
            if !missing.is_empty() {
                tracing::warn!("No match data for rounds {:?}", missing);
            }

            let selection = Some(rounds.as_slice());
            let player_decks = ingest::extract_player_archetypes(&round_matches, selection);
            let records = ingest::match_records(&round_matches, selection);
            tracing::info!("Mapped {} players to decks", player_decks.len());

            let (stats, report) = calculate::aggregate_with_report(&records, &player_decks);
            let stats_report = StatsReport::new(tournament_id.clone(), rounds, stats);

            if dry_run {
                println!("(dry run - no data written to disk)");
            } else {
                storage
                    .write(DataFile::PlayerDecks, &tournament_id, &player_decks)
                    .context("Failed to save player deck mapping")?;
                storage
                    .write_stats(&stats_report)
                    .context("Failed to save statistics")?;
                storage
                    .write_report(&tournament_id, &report)
                    .context("Failed to save run report")?;
            }

            print_report(&report);
            print_summary(&calculate::summarize(
                &stats_report.stats,
                config.summary.min_matches,
                config.summary.top_n,
            ));
        }
        Commands::Summary {
            tournament,
            min_matches,
            top,
        } => {
            let tournament_id = tournament.unwrap_or_else(|| config.tournament.id.clone());
            let saved = storage
                .read_stats(&tournament_id)
                .with_context(|| format!("No statistics for tournament {}", tournament_id))?;

            print_summary(&calculate::summarize(
                &saved.stats,
                min_matches.unwrap_or(config.summary.min_matches),
                top.unwrap_or(config.summary.top_n),
            ));
        }
        Commands::Matchups {
            archetype,
            tournament,
        } => {
            let tournament_id = tournament.unwrap_or_else(|| config.tournament.id.clone());
            let saved = storage
                .read_stats(&tournament_id)
                .with_context(|| format!("No statistics for tournament {}", tournament_id))?;

            print_matchups(&saved.stats, &archetype)?;
        }
        Commands::ParseResult { text } => {
            let outcome = calculate::parse_result(&text);
            println!("{}", outcome);
            if !outcome.is_parsed() {
                println!("(no winner or score found; such matches are skipped)");
            }
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}

fn print_report(report: &AggregationReport) {
    println!("\n=== Aggregation ===");
    println!("Matches seen:       {}", report.matches_seen);
    println!("Matches counted:    {}", report.matches_counted);
    println!("Skipped:            {}", report.skipped());
    println!("  missing player:   {}", report.skipped_missing_competitor);
    println!("  empty name:       {}", report.skipped_empty_name);
    println!("  no archetype:     {}", report.skipped_unknown_archetype);
    println!("  unparseable:      {}", report.unparseable_results);
    println!("Unresolved winners: {}", report.unresolved_winners);

    if !report.suspect_archetype_labels.is_empty() {
        println!("\nArchetype labels differing only by case/whitespace:");
        for (first, second) in &report.suspect_archetype_labels {
            println!("  - {:?} / {:?}", first, second);
        }
    }
}

fn print_matchups(stats: &TournamentStats, archetype: &str) -> Result<()> {
    let Some(rows) = calculate::matchup_table(stats, archetype) else {
        anyhow::bail!("Unknown archetype: {}", archetype);
    };

    println!("\n=== {} matchups ===", archetype);
    for row in rows {
        println!(
            "  {:<32} {:>8} {:>6.1}% {}",
            row.opponent, row.record, row.percentage, row.rating
        );
    }
    Ok(())
}

fn print_summary(summary: &StatsSummary) {
    println!(
        "\n=== Tournament Statistics Summary ===\n\nTop Archetypes ({}+ matches):",
        summary.min_matches
    );
    if summary.top.is_empty() {
        println!("  (none)");
    }
    for entry in &summary.top {
        println!(
            "  {}: {}-{}-{} ({:.1}% win rate)",
            entry.archetype, entry.wins, entry.losses, entry.draws, entry.win_rate
        );
    }
    println!("\nTotal archetypes: {}", summary.total_archetypes);
}
