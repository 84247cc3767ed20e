use super::confirm;
use crate::config::Config;
use crate::error::Result;
use crate::session::{Session, clear_tokens};
use tracing::info;

pub async fn execute(config: Config, reset: bool, yes: bool) -> Result<()> {
    if reset {
        if !yes && !confirm("Delete cached Google tokens?")? {
            info!("Keeping cached tokens");
            return Ok(());
        }
        clear_tokens()?;
    }

    let session = Session::open(config.google)?;
    session.acquire_credential().await?;
    session.close();

    info!("Google authorization verified");

    Ok(())
}
