use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;

use tablero_board::output::PageOutput;
use tablero_board::pages::{growth, institutions, marketshare, matrix, participation};
use tablero_data::cache::WorkbookCache;

const DEFAULT_ENROLLMENT_FILE: &str = "files/baseEnrollment.xlsx";
const DEFAULT_MARKET_FILE: &str = "files/baseMarketShare2.xlsx";

/// Enrollment and market-share dashboard exporter
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output path (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a semester growth table with colored percentage cells
    Growth {
        /// Path to the enrollment workbook
        #[arg(long, default_value = DEFAULT_ENROLLMENT_FILE)]
        workbook: PathBuf,

        /// Which semester block to read
        #[arg(long, value_enum, default_value_t = Period::Ten)]
        period: Period,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Enrollment participation per faculty
    Faculties {
        #[arg(long, default_value = DEFAULT_ENROLLMENT_FILE)]
        workbook: PathBuf,

        /// Semesters to include (repeatable)
        #[arg(long = "semester")]
        semesters: Vec<String>,

        /// Print the available filter options and exit
        #[arg(long)]
        list_options: bool,
    },

    /// Enrollment participation per career within one faculty
    Careers {
        #[arg(long, default_value = DEFAULT_ENROLLMENT_FILE)]
        workbook: PathBuf,

        #[arg(long)]
        faculty: Option<String>,

        #[arg(long = "semester")]
        semesters: Vec<String>,

        #[arg(long)]
        list_options: bool,
    },

    /// Growth matrix of enrollment vs income variation per career
    Matrix {
        #[arg(long, default_value = DEFAULT_ENROLLMENT_FILE)]
        workbook: PathBuf,

        #[arg(long)]
        faculty: Option<String>,

        /// Careers to compare (repeatable; only faculties with more than
        /// one career are filterable)
        #[arg(long = "career")]
        careers: Vec<String>,

        #[arg(long = "semester")]
        semesters: Vec<String>,

        #[arg(long)]
        list_options: bool,
    },

    /// University participation in enrollment per year
    Marketshare {
        /// Path to the market-share workbook
        #[arg(long, default_value = DEFAULT_MARKET_FILE)]
        workbook: PathBuf,

        #[arg(long = "year")]
        years: Vec<i64>,

        #[arg(long = "region")]
        regions: Vec<String>,

        #[arg(long = "financing")]
        financing: Vec<String>,

        #[arg(long = "level")]
        levels: Vec<String>,

        #[arg(long)]
        faculty: Option<String>,

        #[arg(long = "career")]
        careers: Vec<String>,

        #[arg(long)]
        list_options: bool,
    },

    /// Institution counts and enrollment per year and level
    Institutions {
        #[arg(long, default_value = DEFAULT_MARKET_FILE)]
        workbook: PathBuf,

        #[arg(long = "level")]
        levels: Vec<String>,

        #[arg(long = "year")]
        years: Vec<i64>,

        #[arg(long = "faculty")]
        faculties: Vec<String>,

        #[arg(long = "career")]
        careers: Vec<String>,

        #[arg(long)]
        list_options: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Period {
    Ten,
    Twenty,
}

impl From<Period> for growth::GrowthPeriod {
    fn from(period: Period) -> Self {
        match period {
            Period::Ten => growth::GrowthPeriod::Ten,
            Period::Twenty => growth::GrowthPeriod::Twenty,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Html,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut cache = WorkbookCache::new();

    match cli.command {
        Commands::Growth {
            workbook,
            period,
            format,
        } => {
            let period = growth::GrowthPeriod::from(period);
            info!("loading {} from {}", period.label(), workbook.display());
            let table = growth::load(&mut cache, &workbook, period)?;
            match growth::build(&table, period)? {
                PageOutput::Chart(styled) => match format {
                    Format::Json => emit_json(&cli.output, &styled)?,
                    Format::Html => emit(&cli.output, styled.to_html())?,
                },
                PageOutput::Empty { message } => println!("{}", message),
            }
        }

        Commands::Faculties {
            workbook,
            semesters,
            list_options,
        } => {
            let table = participation::load(&mut cache, &workbook)?;
            if list_options {
                emit_json(
                    &cli.output,
                    &serde_json::json!({
                        "semesters": participation::semester_options(&table)?,
                    }),
                )?;
                return Ok(());
            }
            let selection = participation::FacultySelection { semesters };
            emit_page(&cli.output, participation::faculties(&table, &selection)?)?;
        }

        Commands::Careers {
            workbook,
            faculty,
            semesters,
            list_options,
        } => {
            let table = participation::load(&mut cache, &workbook)?;
            if list_options {
                let faculties = participation::faculty_options(&table)?;
                let semesters = match &faculty {
                    Some(f) => participation::semester_options_for_faculty(&table, f)?,
                    None => participation::semester_options(&table)?,
                };
                emit_json(
                    &cli.output,
                    &serde_json::json!({
                        "faculties": faculties,
                        "semesters": semesters,
                    }),
                )?;
                return Ok(());
            }
            let selection = participation::CareerSelection {
                faculty: faculty.unwrap_or_default(),
                semesters,
            };
            emit_page(&cli.output, participation::careers(&table, &selection)?)?;
        }

        Commands::Matrix {
            workbook,
            faculty,
            careers,
            semesters,
            list_options,
        } => {
            let table = matrix::load(&mut cache, &workbook)?;
            if list_options {
                let faculties = matrix::faculty_options(&table)?;
                let careers = match &faculty {
                    Some(f) => matrix::career_options(&table, f)?,
                    None => Vec::new(),
                };
                emit_json(
                    &cli.output,
                    &serde_json::json!({
                        "faculties": faculties,
                        "careers": careers,
                        "semesters": matrix::semester_options(&table)?,
                    }),
                )?;
                return Ok(());
            }
            let selection = matrix::MatrixSelection {
                faculty: faculty.unwrap_or_default(),
                careers,
                semesters,
            };
            emit_page(&cli.output, matrix::build(&table, &selection)?)?;
        }

        Commands::Marketshare {
            workbook,
            years,
            regions,
            financing,
            levels,
            faculty,
            careers,
            list_options,
        } => {
            let table = marketshare::load(&mut cache, &workbook)?;
            if list_options {
                emit_json(
                    &cli.output,
                    &serde_json::json!({
                        "years": marketshare::year_options(&table)?,
                        "regions": marketshare::region_options(&table)?,
                        "financing": marketshare::financing_options(&table)?,
                        "levels": marketshare::level_options(&table)?,
                        "faculties": marketshare::faculty_options(&table)?,
                        "careers": marketshare::career_options(&table, faculty.as_deref())?,
                    }),
                )?;
                return Ok(());
            }
            let selection = marketshare::MarketshareSelection {
                years,
                regions,
                financing,
                levels,
                faculty,
                careers,
            };
            emit_page(&cli.output, marketshare::build(&table, &selection)?)?;
        }

        Commands::Institutions {
            workbook,
            levels,
            years,
            faculties,
            careers,
            list_options,
        } => {
            let table = institutions::load(&mut cache, &workbook)?;
            if list_options {
                emit_json(
                    &cli.output,
                    &serde_json::json!({
                        "levels": institutions::level_options(&table)?,
                        "years": institutions::year_options(&table)?,
                        "faculties": institutions::faculty_options(&table)?,
                        "careers": institutions::career_options(&table, &faculties)?,
                    }),
                )?;
                return Ok(());
            }
            let selection = institutions::InstitutionsSelection {
                levels,
                years,
                faculties,
                careers,
            };
            emit_page(&cli.output, institutions::build(&table, &selection)?)?;
        }
    }

    Ok(())
}

/// Serialize a page result: the chart as JSON, or the empty-selection
/// message on stdout.
fn emit_page<T: Serialize>(output: &Option<PathBuf>, page: PageOutput<T>) -> Result<()> {
    match page {
        PageOutput::Chart(chart) => emit_json(output, &chart),
        PageOutput::Empty { message } => {
            println!("{}", message);
            Ok(())
        }
    }
}

fn emit_json<T: Serialize>(output: &Option<PathBuf>, value: &T) -> Result<()> {
    emit(output, serde_json::to_string_pretty(value)?)
}

fn emit(output: &Option<PathBuf>, contents: String) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, contents)?;
            info!("wrote {}", path.display());
        }
        None => println!("{}", contents),
    }
    Ok(())
}
