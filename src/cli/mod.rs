use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the callable functions over HTTP
    Serve {
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Generate a panic plan
    Plan {
        /// Intake as inline JSON, or @path to a JSON file
        #[arg(short, long)]
        intake: Option<String>,

        /// Replace the default system prompt
        #[arg(long)]
        system_prompt: Option<String>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Classify a daily check-in and fetch a micro-exercise when appropriate
    CheckIn {
        #[arg(short, long)]
        mood: f64,

        /// Repeat for several tags
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        #[arg(short, long)]
        note: Option<String>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}
