//! ats-scorer: score resumes for applicant tracking system compatibility

use ats_scorer::cli::{self, Cli, Commands, ConfigAction};
use ats_scorer::config::{Config, OutputFormat};
use ats_scorer::error::{AtsScorerError, Result};
use ats_scorer::input::InputManager;
use ats_scorer::output::{save_report_to_file, suggest_filename, AnalysisReport, ReportGenerator};
use ats_scorer::processing::cache::AnalysisCache;
use ats_scorer::processing::lexicon::{lexicon, Industry, LEXICON_VERSION};
use ats_scorer::processing::profile::UserProfile;
use ats_scorer::processing::{AnalysisEngine, AnalysisRequest};
use clap::Parser;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::process;

const RESUME_EXTENSIONS: [&str; 5] = ["pdf", "txt", "text", "md", "markdown"];
const JOB_EXTENSIONS: [&str; 4] = ["txt", "text", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            industry,
            profile,
            detailed,
            output,
            save,
        } => {
            run_analyze(AnalyzeArgs {
                resume,
                jobs: job,
                industry,
                profile,
                detailed,
                output,
                save,
            }, &config)
            .await
        }

        Commands::Industries => {
            println!("Lexicon version {}\n", LEXICON_VERSION);
            for industry in Industry::ALL {
                let profile = lexicon().profile(industry);
                println!("{} ({} terms)", industry, profile.term_count());
                for (category, terms) in &profile.categories {
                    println!("  {:<24}{}", category.as_str(), terms.len());
                }
                for requirement in lexicon().requirements_for(industry) {
                    println!("  requires: {}", requirement.label);
                }
                println!();
            }
            Ok(())
        }

        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("# {}\n", config_path.display());
                    print!("{}", config.to_toml()?);
                }

                Some(ConfigAction::Path) => {
                    println!("{}", config_path.display());
                }

                Some(ConfigAction::Reset) => {
                    Config::default().save_to(config_path)?;
                    println!("Configuration reset to defaults");
                }

                Some(ConfigAction::Set { key, value }) => {
                    let mut updated = config;
                    updated.set(&key, &value)?;
                    updated.save_to(config_path)?;
                    println!("Set {} = {}", key, value);
                }
            }
            Ok(())
        }
    }
}

struct AnalyzeArgs {
    resume: PathBuf,
    jobs: Vec<PathBuf>,
    industry: Option<String>,
    profile: Option<PathBuf>,
    detailed: bool,
    output: Option<String>,
    save: Option<PathBuf>,
}

async fn run_analyze(args: AnalyzeArgs, config: &Config) -> Result<()> {
    cli::validate_file_extension(&args.resume, &RESUME_EXTENSIONS)
        .map_err(|e| AtsScorerError::InvalidInput(format!("Resume file: {}", e)))?;
    for job in &args.jobs {
        cli::validate_file_extension(job, &JOB_EXTENSIONS)
            .map_err(|e| AtsScorerError::InvalidInput(format!("Job description file: {}", e)))?;
    }

    let format = match &args.output {
        Some(format) => format
            .parse::<OutputFormat>()
            .map_err(AtsScorerError::InvalidInput)?,
        None => config.output.format,
    };
    let industry = args
        .industry
        .as_deref()
        .map(str::parse::<Industry>)
        .transpose()
        .map_err(AtsScorerError::InvalidInput)?;
    let profile = match &args.profile {
        Some(path) => Some(load_profile(path).await?),
        None => None,
    };

    let mut input_manager = InputManager::new();
    let resume_text = input_manager.extract_text(&args.resume).await?;
    info!("Resume text: {} characters", resume_text.len());

    let engine = AnalysisEngine::new(config)?;
    let mut cache = config.cache.enabled.then(|| AnalysisCache::from_config(&config.cache));

    let mut base = AnalysisRequest::new(resume_text);
    if let Some(industry) = industry {
        base = base.with_industry(industry);
    }
    if let Some(profile) = profile {
        base = base.with_profile(profile);
    }

    let mut runs: Vec<(AnalysisRequest, Option<&Path>)> = Vec::new();
    if args.jobs.is_empty() {
        runs.push((base, None));
    } else {
        for job in &args.jobs {
            let job_text = input_manager.extract_text(job).await?;
            runs.push((base.clone().with_job_description(job_text), Some(job.as_path())));
        }
    }

    let detailed = args.detailed || config.output.detailed;
    let use_colors = config.output.color_output && args.save.is_none();
    let generator = ReportGenerator::with_options(use_colors, detailed, true, true);

    let mut rendered = Vec::with_capacity(runs.len());
    for (request, job_path) in &runs {
        let analysis = match cache.as_mut() {
            Some(cache) => cache.get_or_compute(request, |r| engine.analyze(r))?,
            None => engine.analyze(request)?,
        };
        let report = AnalysisReport::new(analysis, &args.resume, *job_path);
        rendered.push(generator.generate_report(&report, format)?);
    }
    if let Some(cache) = &cache {
        let (hits, misses) = cache.stats();
        debug!("Analysis cache: {} entries, {} hits, {} misses", cache.len(), hits, misses);
    }

    let separator = match format {
        OutputFormat::Json => "\n",
        _ => "\n\n",
    };
    let content = rendered.join(separator);

    match &args.save {
        Some(path) => {
            // a directory gets a generated name, e.g. jane_resume_ats_20240101_120000.json
            let path = if path.is_dir() {
                path.join(suggest_filename(format, &args.resume.to_string_lossy(), true))
            } else {
                path.clone()
            };
            save_report_to_file(&content, &path)?;
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}

async fn load_profile(path: &Path) -> Result<UserProfile> {
    let content = tokio::fs::read_to_string(path).await?;
    let profile = serde_json::from_str(&content)?;
    Ok(profile)
}
