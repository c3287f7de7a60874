use clap::Subcommand;

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a rater
    Add {
        /// Data directory holding the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Stable rater id, referenced by ratings
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Reviewer role, e.g. 主编 or 内容评审
        #[arg(long)]
        role: Option<String>,

        /// Machine-readable role key
        #[arg(long)]
        role_type: Option<String>,

        #[arg(long)]
        department: Option<String>,
    },

    /// List registered raters
    List {
        /// Data directory holding the database
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
