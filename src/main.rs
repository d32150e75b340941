use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use workoutlog::{
    config::AppConfig,
    logging::{init_logging, LogLevel},
    color_of, color_rgb, DisplayFormatter, Intensity, Workout, WorkoutFilter, WorkoutInput,
    WorkoutLogError, WorkoutStore,
};

/// workoutlog - Personal workout log
///
/// Records exercise sessions locally and summarizes them: how many, how long,
/// and how hard on average.
#[derive(Parser)]
#[command(name = "workoutlog")]
#[command(author = "workoutlog contributors")]
#[command(version)]
#[command(about = "Personal workout log", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Overrides the data directory from the config
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a new workout
    Add {
        /// Exercise type, e.g. Running
        #[arg(short = 't', long = "type")]
        exercise_type: String,

        /// Duration in minutes
        #[arg(short, long)]
        duration: String,

        /// Date (YYYY-MM-DD), today if omitted
        #[arg(long)]
        date: Option<String>,

        /// Intensity (Low, Medium, High)
        #[arg(short, long, default_value = "Medium")]
        intensity: String,

        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Change fields of an existing workout
    Edit {
        /// Workout id
        id: String,

        #[arg(short = 't', long = "type")]
        exercise_type: Option<String>,

        #[arg(short, long)]
        duration: Option<String>,

        #[arg(long)]
        date: Option<String>,

        #[arg(short, long)]
        intensity: Option<String>,

        /// New notes; pass an empty string to clear them
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Delete a workout
    Delete {
        /// Workout id
        id: String,

        /// Skip the confirmation step
        #[arg(short, long)]
        yes: bool,
    },

    /// Show one workout in full
    Show {
        /// Workout id
        id: String,
    },

    /// List workouts, most recent first
    List {
        /// Only this exercise type (exact match)
        #[arg(short = 't', long = "type")]
        exercise_type: Option<String>,

        /// Case-insensitive text to find in type or notes
        #[arg(short, long)]
        search: Option<String>,

        /// Print the matching records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summary statistics
    Stats {
        #[arg(short = 't', long = "type")]
        exercise_type: Option<String>,

        #[arg(short, long)]
        search: Option<String>,
    },

    /// List the exercise types in the log
    Types,

    /// Show or create the configuration file
    Config {
        /// Write the current configuration to the config path
        #[arg(long)]
        init: bool,
    },
}

#[derive(Tabled)]
struct WorkoutRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    exercise_type: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Intensity")]
    intensity: String,
    #[tabled(rename = "Notes")]
    notes: String,
}

impl WorkoutRow {
    fn new(workout: &Workout, formatter: &DisplayFormatter) -> Self {
        Self {
            id: workout.id.clone(),
            exercise_type: workout.exercise_type.clone(),
            date: formatter.format_date(&workout.date),
            duration: formatter.format_duration(workout.duration),
            intensity: formatter.intensity_label(workout.intensity).to_string(),
            notes: workout.notes_or_empty().to_string(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<WorkoutLogError>() {
            Some(err) => {
                tracing::debug!(error = %err, "Command failed");
                eprintln!("{} {}", "✗".red().bold(), err.user_message().red());
            }
            None => eprintln!("{} {:#}", "✗".red().bold(), e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default(),
    };
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = data_dir;
    }
    if cli.verbose > 0 {
        config.logging.level = LogLevel::from_verbosity(cli.verbose);
    }
    init_logging(&config.logging)?;

    let formatter = config.display.formatter()?;

    let mut store = WorkoutStore::open(config.storage.repository())?;

    match cli.command {
        Commands::Add {
            exercise_type,
            duration,
            date,
            intensity,
            notes,
        } => {
            let date = date.unwrap_or_else(|| {
                Utc::now()
                    .with_timezone(&formatter.offset())
                    .date_naive()
                    .format("%Y-%m-%d")
                    .to_string()
            });
            let mut input = WorkoutInput::new()
                .exercise_type(exercise_type)
                .duration(duration)
                .date(date)
                .intensity(intensity);
            input.notes = notes;

            let workout = store.create(input)?;
            println!("{}", "✓ Workout added".green().bold());
            print_workout(&workout, &formatter);
        }

        Commands::Edit {
            id,
            exercise_type,
            duration,
            date,
            intensity,
            notes,
        } => {
            let input = WorkoutInput {
                exercise_type,
                duration,
                date,
                intensity,
                notes,
            };
            let workout = store.update(&id, input)?;
            println!("{}", "✓ Workout updated".green().bold());
            print_workout(&workout, &formatter);
        }

        Commands::Delete { id, yes } => {
            let Some(workout) = store.find_by_id(&id) else {
                println!("{}", format!("Nothing to delete: no workout with id {}", id).dimmed());
                return Ok(());
            };

            if !yes {
                println!(
                    "Delete \"{}\" on {}? Re-run with --yes to confirm.",
                    workout.exercise_type,
                    formatter.format_date(&workout.date)
                );
                return Ok(());
            }

            store.delete(&id)?;
            println!("{}", "✓ Workout deleted".green().bold());
        }

        Commands::Show { id } => {
            let workout = store
                .find_by_id(&id)
                .ok_or_else(|| WorkoutLogError::NotFound { id: id.clone() })?;
            print_workout(workout, &formatter);
        }

        Commands::List {
            exercise_type,
            search,
            json,
        } => {
            let criteria = build_filter(exercise_type, search);
            let workouts = workoutlog::filter(store.list(), &criteria);

            if json {
                println!("{}", serde_json::to_string_pretty(&workouts)?);
            } else if workouts.is_empty() {
                println!("{}", "No workouts found.".dimmed());
            } else {
                let rows: Vec<WorkoutRow> = workouts
                    .iter()
                    .map(|w| WorkoutRow::new(w, &formatter))
                    .collect();
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
        }

        Commands::Stats {
            exercise_type,
            search,
        } => {
            let criteria = build_filter(exercise_type, search);
            let stats = workoutlog::summarize(workoutlog::filter(store.list(), &criteria));

            println!("{}", "Workout summary".cyan().bold());
            println!("  Workouts:          {}", stats.count);
            println!("  Total minutes:     {}", stats.total_minutes);
            let label = formatter.average_label(stats.average_intensity);
            match stats.average_intensity.intensity() {
                Some(level) => println!("  Average intensity: {}", colorize(label, level)),
                None => println!("  Average intensity: {}", label),
            }
        }

        Commands::Types => {
            for exercise_type in workoutlog::exercise_types(store.list()) {
                println!("{}", exercise_type);
            }
        }

        Commands::Config { init } => {
            let path = cli.config.unwrap_or_else(AppConfig::default_config_path);
            if init {
                config.save_to_file(&path)?;
                println!("{} {}", "✓ Configuration written to".green(), path.display());
            } else {
                println!("{}", format!("# {}", path.display()).dimmed());
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

fn build_filter(exercise_type: Option<String>, search: Option<String>) -> WorkoutFilter {
    WorkoutFilter {
        exercise_type,
        search_term: search,
    }
}

fn colorize(text: &str, intensity: Intensity) -> ColoredString {
    match color_rgb(color_of(intensity)) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

fn print_workout(workout: &Workout, formatter: &DisplayFormatter) {
    println!("  {} {}", "ID:".dimmed(), workout.id);
    println!("  {} {}", "Type:".dimmed(), workout.exercise_type.bold());
    println!("  {} {}", "Date:".dimmed(), formatter.format_date(&workout.date));
    println!("  {} {}", "Duration:".dimmed(), formatter.format_duration(workout.duration));
    println!(
        "  {} {}",
        "Intensity:".dimmed(),
        colorize(formatter.intensity_label(workout.intensity), workout.intensity)
    );
    println!(
        "  {} {}",
        "Created:".dimmed(),
        formatter.format_date_time(&workout.created_at)
    );
    if let Some(updated_at) = &workout.updated_at {
        println!("  {} {}", "Updated:".dimmed(), formatter.format_date_time(updated_at));
    }
    if let Some(notes) = &workout.notes {
        println!("  {} {}", "Notes:".dimmed(), notes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_types_and_config_init() {
        let cli = Cli::try_parse_from(["workoutlog", "types"]).unwrap();
        assert!(matches!(cli.command, Commands::Types));

        let cli = Cli::try_parse_from(["workoutlog", "config", "--init"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { init: true }));

        let cli = Cli::try_parse_from(["workoutlog", "config"]).unwrap();
        assert!(matches!(cli.command, Commands::Config { init: false }));

        assert!(Cli::try_parse_from(["workoutlog", "config", "--path"]).is_err());
    }

    #[test]
    fn test_parses_delete_confirmation() {
        let cli = Cli::try_parse_from(["workoutlog", "delete", "abc", "-y"]).unwrap();
        assert!(matches!(cli.command, Commands::Delete { ref id, yes: true } if id == "abc"));
    }
}
