use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::path::PathBuf;

/// CLI arguments for ner-sidecar-server
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub model: Option<String>,
    pub config_file: Option<PathBuf>,
    pub log_level: Option<String>,
    pub max_request_size: Option<usize>,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse() -> Self {
        let matches = Self::command().get_matches();

        // Handle special help for environment variables
        if matches.get_flag("help_env") {
            Self::print_env_help();
            std::process::exit(0);
        }

        Self::from_matches(&matches)
    }

    /// Build the clap command definition
    pub fn command() -> Command {
        Command::new("ner-sidecar-server")
            .version(ner_sidecar::VERSION)
            .about("Named-entity recognition sidecar over HTTP")
            .long_about(
                r#"Loads one pretrained named-entity recognizer at startup and serves it
over HTTP. POST /extract returns the entities found in a text together with a
has_entities flag an upstream pipeline can use as a cheap pre-filter.

The model is loaded before the listener is bound; if it cannot be loaded the
process exits with an error.

Examples:
  ner-sidecar-server
  ner-sidecar-server --port 9000 --model dslim/bert-base-NER
  ner-sidecar-server --model ./models/bert-ner --log-level debug
  ner-sidecar-server --model rules"#,
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("Port to listen on")
                    .long_help(
                        "Port number for the HTTP server to listen on (default: 8099).
Environment variable: NER_SIDECAR_PORT",
                    )
                    .value_hint(ValueHint::Other)
                    .value_parser(clap::value_parser!(u16)),
            )
            .arg(
                Arg::new("host")
                    .long("host")
                    .value_name("HOST")
                    .help("Address to bind")
                    .long_help(
                        "Interface address to bind (default: 127.0.0.1). The sidecar is
meant to be reached from the same host only.
Environment variable: NER_SIDECAR_HOST",
                    )
                    .value_hint(ValueHint::Hostname),
            )
            .arg(
                Arg::new("model")
                    .short('m')
                    .long("model")
                    .value_name("MODEL")
                    .help("Model identifier to load")
                    .long_help(
                        "Hugging Face Hub repository id (default: dslim/bert-base-NER), a local
checkpoint directory, or `rules` for the built-in rule-based recognizer.
Environment variable: NER_SIDECAR_MODEL",
                    )
                    .value_hint(ValueHint::Other),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("Configuration file path")
                    .long_help(
                        "Path to a TOML, YAML or JSON configuration file with [model] and
[logging] sections. Merged under environment variables and CLI arguments.
Environment variable: NER_SIDECAR_CONFIG_FILE",
                    )
                    .value_hint(ValueHint::FilePath)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
            .arg(
                Arg::new("log_level")
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Logging level")
                    .long_help(
                        "Set the logging level. Valid values: error, warn, info, debug, trace
Environment variable: NER_SIDECAR_LOG_LEVEL (RUST_LOG takes precedence when set)",
                    )
                    .value_parser(["error", "warn", "info", "debug", "trace"]),
            )
            .arg(
                Arg::new("max_request_size")
                    .long("max-request-size")
                    .value_name("BYTES")
                    .help("Maximum request body size in bytes")
                    .long_help(
                        "Maximum size allowed for HTTP request bodies (default: 16MB).
Larger requests are rejected with 413.
Environment variable: NER_SIDECAR_MAX_REQUEST_SIZE",
                    )
                    .value_parser(clap::value_parser!(usize)),
            )
            .arg(
                Arg::new("help_env")
                    .long("help-env")
                    .help("Show all environment variables")
                    .long_help(
                        "Display a comprehensive list of all environment variables
that can be used to configure the server.",
                    )
                    .action(ArgAction::SetTrue),
            )
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            port: matches.get_one::<u16>("port").copied(),
            host: matches.get_one::<String>("host").cloned(),
            model: matches.get_one::<String>("model").cloned(),
            config_file: matches.get_one::<PathBuf>("config").cloned(),
            log_level: matches.get_one::<String>("log_level").cloned(),
            max_request_size: matches.get_one::<usize>("max_request_size").copied(),
        }
    }

    /// Print comprehensive environment variable help
    fn print_env_help() {
        println!("NER Sidecar Environment Variables");
        println!("=================================");
        println!();
        println!("Server Configuration:");
        println!("  NER_SIDECAR_PORT                  - Server port (default: 8099)");
        println!("  NER_SIDECAR_HOST                  - Bind address (default: 127.0.0.1)");
        println!(
            "  NER_SIDECAR_MAX_REQUEST_SIZE      - Max request body size in bytes (default: 16MB)"
        );
        println!("  NER_SIDECAR_CONFIG_FILE           - Path to config file");
        println!();
        println!("Model:");
        println!(
            "  NER_SIDECAR_MODEL                 - Model id, local directory or `rules` (default: dslim/bert-base-NER)"
        );
        println!("  NER_SIDECAR_MODEL__REVISION       - Hub revision (default: main)");
        println!("  NER_SIDECAR_MODEL__CACHE_DIR      - Hub cache directory");
        println!("  NER_SIDECAR_MODEL__MAX_LENGTH     - Max tokens per window (default: 512)");
        println!();
        println!("Logging:");
        println!("  NER_SIDECAR_LOG_LEVEL             - Logging level (default: info)");
        println!(
            "  NER_SIDECAR_LOGGING__FORMAT       - default, pretty, compact or json (default: default)"
        );
        println!("  NER_SIDECAR_LOGGING__FILE         - Write logs to this file instead of stdout");
        println!("  RUST_LOG                          - Filter directives, overrides the level");
        println!();
        println!("Note: Command line arguments take precedence over environment variables.");
        println!("Use --help for CLI argument documentation.");
    }
}
