pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, OutputFormat};

#[cfg(feature = "cli")]
pub mod cli {
    use chrono::NaiveDate;
    use clap::{Parser, ValueEnum};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    pub enum OutputFormat {
        Json,
        Csv,
    }

    #[derive(Debug, Clone, Parser)]
    #[command(name = "voice-expense")]
    #[command(about = "Turn spoken expense sentences into structured records")]
    pub struct CliConfig {
        /// Utterances to parse; one per line from stdin when omitted
        pub utterances: Vec<String>,

        /// Path to TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        /// Reference day for relative dates (YYYY-MM-DD), defaults to the local date
        #[arg(long)]
        pub today: Option<NaiveDate>,

        #[arg(long, value_enum, default_value = "json")]
        pub format: OutputFormat,

        /// Ask for the amount when none could be found
        #[arg(long)]
        pub prompt_missing: bool,

        /// Emit logs as JSON lines
        #[arg(long)]
        pub json_logs: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,
    }
}
