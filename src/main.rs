//! Skill matcher: candidate skill extraction and job matching CLI

use clap::Parser;
use log::{error, info};
use skill_matcher::cli::{self, Cli, Commands, ConfigAction};
use skill_matcher::config::Config;
use skill_matcher::output::formatter::ReportGenerator;
use skill_matcher::output::report::{
    ExtractionReport, MatchReport, RecommendationReport, Report, ReportMetadata, VocabularyReport,
};
use skill_matcher::processing::aggregator::CandidateProfile;
use skill_matcher::processing::ranker::JobListing;
use skill_matcher::{Result, SkillMatchEngine, SkillMatchError};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(cli: Cli, config: Config) -> Result<()> {
    let format = match cli.output.as_deref() {
        Some(format) => cli::parse_output_format(format).map_err(SkillMatchError::InvalidInput)?,
        None => config.output.format,
    };
    let generator = ReportGenerator::with_options(config.output.color_output, true);

    let report = match cli.command {
        Commands::Config { action } => return run_config_command(action, &config, cli.config.is_some()),
        Commands::Match {
            skills,
            requirements,
            document,
        } => {
            let engine = SkillMatchEngine::new(&config)?;
            let candidate = CandidateProfile {
                declared_skills: skills,
                document_locator: document.as_deref().map(cli::normalize_locator),
            };

            let candidate_skills = engine.resolve_effective_skills(&candidate).await;
            let result = engine.evaluate(&candidate_skills, &requirements);
            info!("Match computed: {}%", result.percentage);

            Report::Match(MatchReport {
                candidate_skills,
                job_requirements: requirements,
                result,
                metadata: ReportMetadata::new(&engine.get_stats()),
            })
        }
        Commands::Extract { document } => {
            let engine = SkillMatchEngine::new(&config)?;
            let locator = cli::normalize_locator(&document);
            let skills = engine.extract_document_skills(&locator).await;

            Report::Extraction(ExtractionReport {
                locator,
                skills,
                metadata: ReportMetadata::new(&engine.get_stats()),
            })
        }
        Commands::Recommend {
            jobs,
            skills,
            document,
            limit,
        } => {
            if limit == Some(0) {
                return Err(SkillMatchError::InvalidInput("--limit must be greater than zero".to_string()));
            }

            let content = tokio::fs::read_to_string(&jobs).await?;
            let listings: Vec<JobListing> = serde_json::from_str(&content)?;
            let jobs_considered = listings.len();

            let engine = SkillMatchEngine::new(&config)?;
            let candidate = CandidateProfile {
                declared_skills: skills,
                document_locator: document.as_deref().map(cli::normalize_locator),
            };
            let candidate_skills = engine.resolve_effective_skills(&candidate).await;
            let recommendations = engine.rank_recommended_jobs(listings, &candidate_skills, limit);

            Report::Recommendations(RecommendationReport {
                candidate_skills,
                jobs_considered,
                recommendations,
                metadata: ReportMetadata::new(&engine.get_stats()),
            })
        }
        Commands::Vocabulary => {
            let engine = SkillMatchEngine::new(&config)?;
            let mut skills = engine.vocabulary().tokens().to_vec();
            skills.sort();

            Report::Vocabulary(VocabularyReport {
                skills,
                metadata: ReportMetadata::new(&engine.get_stats()),
            })
        }
    };

    println!("{}", generator.generate_report(&report, &format)?);
    Ok(())
}

fn run_config_command(action: Option<ConfigAction>, config: &Config, custom_path: bool) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            let content = toml::to_string_pretty(config)
                .map_err(|e| SkillMatchError::OutputFormatting(format!("Failed to render config: {}", e)))?;
            println!("{}", content);
        }

        Some(ConfigAction::Path) => {
            println!("{}", Config::config_path().display());
        }

        Some(ConfigAction::Reset) => {
            if custom_path {
                return Err(SkillMatchError::InvalidInput(
                    "config reset only applies to the default configuration file".to_string(),
                ));
            }
            Config::default().save()?;
            println!("Configuration reset to defaults at {}", Config::config_path().display());
        }
    }

    Ok(())
}
