//! CLI interface for salary-predictor

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{self, Config};
use crate::evaluation::LogSummary;
use crate::predict::{career_insight, format_salary, PredictionService, SalaryBreakdown, PREDICTION_TIPS};
use crate::types::{
    Currency, EducationLevel, ExperienceTier, Gender, PredictionRequest, AGE_RANGE, EXPERIENCE_RANGE,
    JOB_TITLES,
};

#[derive(Parser)]
#[command(name = "salary-predictor")]
#[command(about = "Monthly employee salary predictor with an evaluation history", long_about = None)]
#[command(version)]
struct Cli {
    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web UI and JSON API
    Serve {
        /// Port to listen on (default from config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Host to bind to (default from config)
        #[arg(long)]
        host: Option<String>,
    },
    /// Predict one salary and append it to the evaluation log
    Predict {
        /// Age in years (18-65)
        #[arg(long)]
        age: u32,
        /// Male, Female or Other
        #[arg(long)]
        gender: String,
        /// High School, Diploma, Bachelor, Master or PhD
        #[arg(long)]
        education: String,
        /// Job title from the catalog (see `catalog`)
        #[arg(long)]
        job_title: String,
        /// Years of experience (0-50)
        #[arg(long)]
        years: u32,
        /// INR or USD
        #[arg(long, default_value = "INR")]
        currency: String,
    },
    /// Show the evaluation log and its summary
    History {
        /// Only show the most recent N records
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// List accepted input values
    Catalog,
    /// Show configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Print the config file location
        #[arg(long)]
        path: bool,
        /// Print the default configuration as TOML
        #[arg(long)]
        defaults: bool,
    },
}

/// Run the CLI
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_file = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };

    match cli.command {
        Commands::Serve { port, host } => {
            let config = Config::load_from(&config_file)?;
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            crate::server::start(config, &host, port).await?;
        }
        Commands::Predict { age, gender, education, job_title, years, currency } => {
            let config = Config::load_from(&config_file)?;
            let request = PredictionRequest {
                age,
                gender: gender.parse()?,
                education_level: education.parse()?,
                job_title,
                years_experience: years,
            };
            let currency: Currency = currency.parse()?;
            predict(&config, request, currency)?;
        }
        Commands::History { limit } => {
            let config = Config::load_from(&config_file)?;
            show_history(&config, limit)?;
        }
        Commands::Catalog => show_catalog(),
        Commands::Config { show, path, defaults } => {
            if path {
                println!("{}", config_file.display());
            } else if defaults {
                print!("{}", config::default_config_toml());
            } else if show {
                config::show_config(&config_file)?;
            } else {
                println!("Use --show, --path or --defaults");
            }
        }
    }

    Ok(())
}

fn predict(config: &Config, request: PredictionRequest, currency: Currency) -> Result<()> {
    let service = PredictionService::from_config(config)?;
    let sub = service
        .handle_submit(request, currency)
        .context("Prediction failed")?;
    let rate = service.settings().exchange_rate;
    let r = &sub.result;

    println!("🎯 Estimated Salary: {}", sub.display);
    println!("🏅 {}", sub.tier);
    println!();
    println!("📊 Salary Breakdown");
    for c in SalaryBreakdown::from_prediction(r.predicted_salary).components {
        println!("  {:<9} {:>3.0}%  {}", c.label, c.share * 100.0, format_salary(c.amount, currency, rate));
    }
    println!();
    println!("💡 {}", career_insight(&r.request.job_title, r.request.education_level, r.request.years_experience));
    println!();
    println!(
        "Simulated actual salary: {} (error {:+.0})",
        format_salary(r.synthetic_actual_salary, Currency::Inr, rate),
        r.error
    );
    if let Some(warning) = sub.warning() {
        println!("⚠ {}", warning);
    }

    Ok(())
}

fn show_history(config: &Config, limit: Option<usize>) -> Result<()> {
    let log = crate::evaluation::EvaluationLog::new(config.paths.evaluation_log.clone());
    let records = log.load_all()?;

    if records.is_empty() {
        println!("No evaluation data available yet. Predict a salary to populate the table.");
        return Ok(());
    }

    let skip = limit.map_or(0, |n| records.len().saturating_sub(n));
    println!(
        "{:>4} {:<7} {:<12} {:<22} {:>4} {:>12} {:>12} {:>10}",
        "Age", "Gender", "Education", "Job Title", "Exp", "Predicted", "Actual*", "Error"
    );
    for r in records.iter().skip(skip) {
        println!(
            "{:>4} {:<7} {:<12} {:<22} {:>4} {:>12.2} {:>12.2} {:>10.2}",
            r.age,
            r.gender,
            r.education_level,
            r.job_title,
            r.years_experience,
            r.predicted_salary,
            r.actual_salary,
            r.error
        );
    }

    let summary = LogSummary::from_records(&records);
    println!();
    println!(
        "{} predictions, MAE {:.2}, RMSE {:.2}",
        summary.count, summary.mean_absolute_error, summary.root_mean_squared_error
    );
    println!("* simulated: prediction plus random noise, not a measured salary");

    Ok(())
}

fn show_catalog() {
    println!("Age: {}-{}", AGE_RANGE.0, AGE_RANGE.1);
    println!("Years of experience: {}-{}", EXPERIENCE_RANGE.0, EXPERIENCE_RANGE.1);
    println!(
        "Gender: {}",
        Gender::ALL.iter().map(Gender::as_str).collect::<Vec<_>>().join(", ")
    );
    println!(
        "Education level: {}",
        EducationLevel::ALL.iter().map(EducationLevel::as_str).collect::<Vec<_>>().join(", ")
    );
    println!("Currency: {}, {}", Currency::Inr, Currency::Usd);
    println!("Job titles:");
    for title in JOB_TITLES {
        println!("  {}", title);
    }
    println!("Experience tiers:");
    for years in [0, 3, 6, 11] {
        println!("  from {:>2} years: {}", years, ExperienceTier::from_years(years));
    }
    println!("Tips:");
    for tip in PREDICTION_TIPS {
        println!("  - {}", tip);
    }
}
