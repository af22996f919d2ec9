use intent_client::{cli, prelude::*};
use std::{path::PathBuf, sync::Arc};

// cargo run --bin intent_cli ready
// cargo run --bin intent_cli classify --text "show me flights from denver to boston" --corpus data/atis/train.tsv
// cargo run --bin intent_cli evaluate --corpus data/atis/train.tsv --test data/atis/test.tsv --limit 50

#[tokio::main]
pub async fn main() {
    let model_arg = || {
        clap::Arg::new("model")
            .help("Model id sent to the completion API")
            .long("model")
            .required(false)
    };
    let api_host_arg = || {
        clap::Arg::new("api_host")
            .help("Host of an OpenAI compatible API, uses api.openai.com when unset")
            .long("api_host")
            .required(false)
    };
    let corpus_arg = || {
        clap::Arg::new("corpus")
            .help("Tab separated training corpus, falls back to TRAIN_DATA_FILE_PATH")
            .long("corpus")
            .value_parser(clap::value_parser!(PathBuf))
            .required(false)
    };
    let log_dir_arg = || {
        clap::Arg::new("log_dir")
            .help("Directory for the rolling log files")
            .long("log_dir")
            .value_parser(clap::value_parser!(PathBuf))
            .required(false)
    };
    let no_log_arg = || {
        clap::Arg::new("no_log")
            .help("Disable logging")
            .long("no_log")
            .action(clap::ArgAction::SetTrue)
    };
    let chunk_size_arg = || {
        clap::Arg::new("chunk_size")
            .help("Examples per few-shot prompt")
            .long("chunk_size")
            .value_parser(clap::value_parser!(usize))
            .required(false)
    };

    let matches = clap::Command::new("intent_cli")
        .about("Few-shot intent classification over a hosted completion API")
        .subcommand_required(true)
        .subcommand(
            clap::Command::new("ready")
                .about("Checks that the backend is configured")
                .arg(model_arg())
                .arg(api_host_arg())
                .arg(log_dir_arg())
                .arg(no_log_arg()),
        )
        .subcommand(
            clap::Command::new("classify")
                .about("Ranks the most likely intents of a text")
                .arg(
                    clap::Arg::new("text")
                        .help("Text to classify")
                        .long("text")
                        .required(true),
                )
                .arg(corpus_arg())
                .arg(chunk_size_arg())
                .arg(model_arg())
                .arg(api_host_arg())
                .arg(log_dir_arg())
                .arg(no_log_arg()),
        )
        .subcommand(
            clap::Command::new("evaluate")
                .about("Scores the classifier against a labeled test corpus")
                .arg(corpus_arg())
                .arg(
                    clap::Arg::new("test")
                        .help("Tab separated test corpus, falls back to TEST_DATA_FILE_PATH")
                        .long("test")
                        .value_parser(clap::value_parser!(PathBuf))
                        .required(false),
                )
                .arg(
                    clap::Arg::new("limit")
                        .help("Number of test examples to score")
                        .long("limit")
                        .value_parser(clap::value_parser!(usize))
                        .required(false),
                )
                .arg(chunk_size_arg())
                .arg(model_arg())
                .arg(api_host_arg())
                .arg(log_dir_arg())
                .arg(no_log_arg()),
        )
        .get_matches();

    let res = match matches.subcommand() {
        Some(("ready", cmd)) => ready(cmd),
        Some(("classify", cmd)) => classify(cmd).await,
        Some(("evaluate", cmd)) => evaluate_corpus(cmd).await,
        _ => Err(IntentError::InvalidConfiguration(
            "unknown subcommand".to_string(),
        )),
    };

    if let Err(e) = res {
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn ready(cmd: &clap::ArgMatches) -> Result<(), IntentError> {
    let config = ClassifierConfig::from_env()?;
    let backend = init_backend(cmd, &config)?;
    println!("{}", cli::ready_report(backend.as_ref())?);
    Ok(())
}

async fn classify(cmd: &clap::ArgMatches) -> Result<(), IntentError> {
    let config = load_config(cmd)?;
    let text = cmd
        .get_one::<String>("text")
        .ok_or_else(|| IntentError::InvalidConfiguration("--text is required".to_string()))?;

    let examples = read_corpus(corpus_path(cmd, config.train_data_path.as_ref(), "corpus")?)?;
    let classifier = IntentClassifier::new(init_backend(cmd, &config)?, &config);
    let prompt_set = classifier.prepare(&examples, config.chunk_size)?;
    println!("{}", cli::classify_json(&classifier, &prompt_set, text).await?);
    Ok(())
}

async fn evaluate_corpus(cmd: &clap::ArgMatches) -> Result<(), IntentError> {
    let mut config = load_config(cmd)?;
    if let Some(limit) = cmd.get_one::<usize>("limit") {
        config = config.eval_limit(*limit);
    }

    let examples = read_corpus(corpus_path(cmd, config.train_data_path.as_ref(), "corpus")?)?;
    let test_examples = read_corpus(corpus_path(cmd, config.test_data_path.as_ref(), "test")?)?;
    let classifier = IntentClassifier::new(init_backend(cmd, &config)?, &config);
    let prompt_set = classifier.prepare(&examples, config.chunk_size)?;
    let metrics = evaluate(&classifier, &prompt_set, &test_examples, config.eval_limit).await?;

    println!("{:#}", cli::metrics_json(&metrics));
    Ok(())
}

fn load_config(cmd: &clap::ArgMatches) -> Result<ClassifierConfig, IntentError> {
    let mut config = ClassifierConfig::from_env()?;
    if let Some(chunk_size) = cmd.get_one::<usize>("chunk_size") {
        config = config.chunk_size(*chunk_size)?;
    }
    Ok(config)
}

fn corpus_path(
    cmd: &clap::ArgMatches,
    fallback: Option<&PathBuf>,
    arg: &str,
) -> Result<PathBuf, IntentError> {
    cmd.get_one::<PathBuf>(arg)
        .or(fallback)
        .cloned()
        .ok_or_else(|| IntentError::InvalidConfiguration(format!("no path given for --{}", arg)))
}

fn init_backend(
    cmd: &clap::ArgMatches,
    config: &ClassifierConfig,
) -> Result<Arc<dyn CompletionBackend>, IntentError> {
    let model_id = cmd
        .get_one::<String>("model")
        .or(config.model_id.as_ref())
        .cloned();

    match cmd.get_one::<String>("api_host") {
        Some(host) => {
            let model_id = model_id.ok_or_else(|| {
                IntentError::InvalidConfiguration(
                    "--model or INTENT_MODEL_NAME is required with --api_host".to_string(),
                )
            })?;
            with_logging(cmd, IntentClient::generic_api().with_api_host(host))
                .model_id(model_id)
                .init()
        }
        None => {
            let mut builder = with_logging(cmd, IntentClient::openai());
            if let Some(model_id) = model_id {
                builder = builder.model_id(model_id);
            }
            builder.init()
        }
    }
}

fn with_logging<B: LoggingConfigTrait>(cmd: &clap::ArgMatches, mut builder: B) -> B {
    if cmd.get_flag("no_log") {
        builder = builder.logging_enabled(false);
    }
    if let Some(log_dir) = cmd.get_one::<PathBuf>("log_dir") {
        builder = builder.log_dir(log_dir);
    }
    builder
}
