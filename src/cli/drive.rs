use super::print_json;
use crate::drive::list_spreadsheets;
use crate::error::Result;
use crate::session::Session;
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum DriveCommand {
    /// List spreadsheets whose name contains the filter, ordered by name
    List {
        /// Case-sensitive name substring; empty lists everything
        #[arg(long, default_value = "")]
        filter: String,
    },
}

impl DriveCommand {
    pub async fn execute(&self, session: &Session) -> Result<()> {
        match self {
            DriveCommand::List { filter } => {
                let drive = session.drive_client().await?;
                let spreadsheets = list_spreadsheets(&drive, filter).await?;
                if spreadsheets.is_empty() {
                    info!(filter = %filter, "No sheets found");
                }
                print_json(&spreadsheets)
            }
        }
    }
}
