use clap::Subcommand;

#[derive(Subcommand, Debug, Clone)]
pub enum SavedArgs {
    /// List saved queries
    List {},
    /// Save a query under a name
    Add {
        /// Name to refer to the query by (no whitespace)
        name: String,

        /// Query text
        #[clap(allow_hyphen_values = true)]
        query: String,

        /// Free-form note shown by `list`
        #[clap(long)]
        comment: Option<String>,
    },
    /// Remove a saved query
    Remove {
        /// Name of the saved query
        name: String,
    },
}
