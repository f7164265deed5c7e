//! Applicant matcher: search, shortlist and analyze job applicants

use applicant_matcher::assistant::{AnswerStreamer, GREETING, SUGGESTED_QUESTIONS};
use applicant_matcher::cli::{self, Cli, Commands, ConfigAction, FilterAction, PipelineAction};
use applicant_matcher::config::{Config, OutputFormat};
use applicant_matcher::error::{MatcherError, Result};
use applicant_matcher::input::InputManager;
use applicant_matcher::matching::{
    answer_analytics_question, candidate_profile, get_shortlist_matches, parse_query_to_filter,
    smart_search,
};
use applicant_matcher::model::{ApplicantRecord, FilterState};
use applicant_matcher::output::{export_csv, export_filename, save_report_to_file, Report, ReportGenerator};
use applicant_matcher::store::{NewCustomFilter, WorkspaceStore};
use clap::Parser;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

/// Resolved settings for one invocation
struct Session {
    config: Config,
    config_path: PathBuf,
    applicants_path: PathBuf,
    format: OutputFormat,
}

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let format = match cli.output.as_deref().map(cli::parse_output_format).transpose() {
        Ok(format) => format.unwrap_or(config.output.format),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let session = Session {
        applicants_path: cli
            .applicants
            .clone()
            .unwrap_or_else(|| config.data.applicants_path.clone()),
        config,
        config_path,
        format,
    };

    // Execute command
    if let Err(e) = run_command(cli.command, session).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, session: Session) -> Result<()> {
    match command {
        Commands::Search {
            query,
            categories,
            experience_levels,
            employment_types,
            job_ids,
            detailed,
        } => {
            let applicants = load_applicants(&session).await?;
            let state = FilterState {
                categories: parse_all(&categories)?,
                experience_levels: parse_all(&experience_levels)?,
                employment_types: parse_all(&employment_types)?,
                job_ids,
                search_query: query.trim().to_string(),
            };

            let outcome = smart_search(&state, &applicants);
            info!("Search matched {} applicants ({:?})", outcome.applicants.len(), outcome.mode);

            let report = Report::Applicants {
                title: if state.search_query.is_empty() {
                    "Applicants".to_string()
                } else {
                    format!("Search: {}", state.search_query)
                },
                mode: (!state.search_query.is_empty()).then_some(outcome.mode),
                applicants: outcome.applicants,
            };
            emit(&session, &report, detailed, None)?;
        }

        Commands::Shortlist {
            description,
            job_file,
            create_pipeline,
            save,
        } => {
            let job_description = match (description, job_file) {
                (_, Some(path)) => {
                    cli::validate_file_extension(&path, &["txt", "md"])
                        .map_err(|e| MatcherError::InvalidInput(format!("Job description file: {}", e)))?;
                    tokio::fs::read_to_string(&path).await?
                }
                (Some(text), None) => text,
                (None, None) => {
                    return Err(MatcherError::InvalidInput("A job description is required".to_string()));
                }
            };

            let applicants = load_applicants(&session).await?;
            let matches = get_shortlist_matches(&job_description, &applicants);

            if let Some(name) = create_pipeline {
                let ids: Vec<String> = matches
                    .iter()
                    .take(session.config.assistant.shortlist_preselect)
                    .map(|m| m.applicant.id.clone())
                    .collect();
                let mut store = open_store(&session)?;
                let pipeline = store.create_pipeline(&name, ids)?;
                println!(
                    "✅ Created pipeline '{}' ({}) with {} applicants",
                    pipeline.name,
                    pipeline.id,
                    pipeline.applicant_ids.len()
                );
                store.save()?;
            }

            let report = Report::Shortlist {
                job_description,
                matches,
            };
            emit(&session, &report, false, save.as_deref())?;
        }

        Commands::Filter {
            query,
            save_as,
            pin,
            save,
        } => {
            let applicants = load_applicants(&session).await?;
            let result = parse_query_to_filter(&query, &applicants);

            if let Some(name) = save_as {
                let pinned = pin.then(|| result.matches.iter().map(|a| a.id.clone()).collect());
                let mut store = open_store(&session)?;
                let filter = store.save_custom_filter(NewCustomFilter {
                    name,
                    description: Some(result.summary.clone()),
                    criteria: result.criteria.clone(),
                    original_query: Some(query.clone()),
                    matched_applicant_ids: pinned,
                })?;
                println!("💾 Saved filter '{}' ({})", filter.name, filter.id);
                store.save()?;
            }

            let report = Report::Filter { query, result };
            emit(&session, &report, false, save.as_deref())?;
        }

        Commands::Ask {
            question,
            suggest,
            no_stream,
        } => {
            if suggest {
                println!("{}\n", GREETING);
                println!("Suggested questions:");
                for suggestion in &SUGGESTED_QUESTIONS {
                    println!("  • {}  ({})", suggestion.question, suggestion.description);
                }
                return Ok(());
            }

            let question = question
                .ok_or_else(|| MatcherError::InvalidInput("A question is required".to_string()))?;
            let applicants = load_applicants(&session).await?;

            if session.format == OutputFormat::Console {
                let mut assistant_config = session.config.assistant.clone();
                assistant_config.streaming &= !no_stream;
                let streamer = AnswerStreamer::new(&assistant_config);

                streamer.think().await;
                let answer = answer_analytics_question(&question, &applicants);
                let mut stdout = std::io::stdout();
                streamer.stream_to(&answer.message, &mut stdout).await?;
            } else {
                let answer = answer_analytics_question(&question, &applicants);
                emit(&session, &Report::Answer { question, answer }, false, None)?;
            }
        }

        Commands::Profile { id, detailed } => {
            let applicants = load_applicants(&session).await?;
            let applicant = find_applicant(&applicants, &id)?;
            let report = Report::Profile {
                applicant,
                profile: candidate_profile(applicant),
            };
            emit(&session, &report, detailed, None)?;
        }

        Commands::Export { file, query, pipeline } => {
            let applicants = load_applicants(&session).await?;
            let store;
            let (label, selected): (String, Vec<&ApplicantRecord>) = match (query, pipeline) {
                (Some(query), _) => {
                    let state = FilterState {
                        search_query: query.clone(),
                        ..Default::default()
                    };
                    (query, smart_search(&state, &applicants).applicants)
                }
                (None, Some(id)) => {
                    store = open_store(&session)?;
                    let pipeline = store.pipeline(&id)?;
                    let members = applicants
                        .iter()
                        .filter(|a| pipeline.applicant_ids.contains(&a.id))
                        .collect();
                    (pipeline.name.clone(), members)
                }
                (None, None) => ("all".to_string(), applicants.iter().collect()),
            };

            let path = file.unwrap_or_else(|| {
                PathBuf::from(export_filename(&label, chrono::Local::now().date_naive()))
            });
            export_csv(&path, &selected)?;
            println!("📤 Exported {} applicants to {}", selected.len(), path.display());
        }

        Commands::ImportForms { input, file } => {
            let input_manager = InputManager::new();
            let records = input_manager.load_form_submissions(&input).await?;
            let content = serde_json::to_string_pretty(&records)?;
            save_report_to_file(&content, &file)?;
            println!("📥 Mapped {} submissions into {}", records.len(), file.display());
        }

        Commands::Pipelines { action } => run_pipeline_action(action, &session).await?,

        Commands::Filters { action } => run_filter_action(action, &session).await?,

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", session.config_path.display());
                let content = toml::to_string_pretty(&session.config)
                    .map_err(|e| MatcherError::Configuration(e.to_string()))?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&session.config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", session.config_path.display());
            }
        },
    }

    Ok(())
}

async fn run_pipeline_action(action: PipelineAction, session: &Session) -> Result<()> {
    let mut store = open_store(session)?;

    match action {
        PipelineAction::List => {
            let report = Report::Pipelines {
                pipelines: store.list_pipelines().iter().collect(),
            };
            emit(session, &report, false, None)?;
        }

        PipelineAction::Show { id } => {
            let applicants = load_applicants(session).await?;
            let report = Report::pipeline(store.pipeline(&id)?, &applicants);
            emit(session, &report, false, None)?;
        }

        PipelineAction::Create { name, applicant_ids } => {
            let pipeline = store.create_pipeline(&name, applicant_ids)?;
            println!("✅ Created pipeline '{}' ({})", pipeline.name, pipeline.id);
            store.save()?;
        }

        PipelineAction::Rename { id, name } => {
            let pipeline = store.rename_pipeline(&id, &name)?;
            println!("✏️  Renamed pipeline {} to '{}'", pipeline.id, pipeline.name);
            store.save()?;
        }

        PipelineAction::SetMembers { id, applicant_ids } => {
            let pipeline = store.set_pipeline_members(&id, applicant_ids)?;
            println!("👥 Pipeline '{}' now has {} applicants", pipeline.name, pipeline.applicant_ids.len());
            store.save()?;
        }

        PipelineAction::Delete { id } => {
            let removed = store.delete_pipeline(&id)?;
            println!("🗑️  Deleted pipeline '{}'", removed.name);
            store.save()?;
        }
    }

    Ok(())
}

async fn run_filter_action(action: FilterAction, session: &Session) -> Result<()> {
    let mut store = open_store(session)?;

    match action {
        FilterAction::List => {
            let report = Report::CustomFilters {
                filters: store.list_custom_filters(),
            };
            emit(session, &report, false, None)?;
        }

        FilterAction::Apply { id } => {
            let applicants = load_applicants(session).await?;
            let filter = store.custom_filter(&id)?;
            let report = Report::Applicants {
                title: filter.name.clone(),
                mode: None,
                applicants: store.apply_custom_filter(&id, &applicants)?,
            };
            emit(session, &report, false, None)?;
        }

        FilterAction::Delete { id } => {
            let removed = store.delete_custom_filter(&id)?;
            println!("🗑️  Deleted filter '{}'", removed.name);
            store.save()?;
        }
    }

    Ok(())
}

async fn load_applicants(session: &Session) -> Result<Vec<ApplicantRecord>> {
    cli::validate_file_extension(&session.applicants_path, &["json", "csv"])
        .map_err(|e| MatcherError::InvalidInput(format!("Applicant file: {}", e)))?;

    let mut input_manager = InputManager::new();
    input_manager.load_applicants(&session.applicants_path).await
}

fn open_store(session: &Session) -> Result<WorkspaceStore> {
    WorkspaceStore::open(session.config.data.workspace_path.clone())
}

fn find_applicant<'a>(applicants: &'a [ApplicantRecord], id: &str) -> Result<&'a ApplicantRecord> {
    applicants
        .iter()
        .find(|a| a.id == id)
        .ok_or_else(|| MatcherError::NotFound(format!("applicant {}", id)))
}

fn parse_all<T: FromStr<Err = String>>(values: &[String]) -> Result<Vec<T>> {
    values
        .iter()
        .map(|v| v.parse::<T>().map_err(MatcherError::InvalidInput))
        .collect()
}

/// Render a report in the session's format, then print it or save it
fn emit(session: &Session, report: &Report<'_>, detailed: bool, save: Option<&Path>) -> Result<()> {
    let output = &session.config.output;
    let generator = ReportGenerator::with_options(
        output.color_output && save.is_none(),
        output.detailed || detailed,
        true,
        save.is_some(),
    );
    let content = generator.generate_report(report, &session.format)?;

    match save {
        Some(path) => {
            save_report_to_file(&content, path)?;
            println!("💾 Saved output to {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
