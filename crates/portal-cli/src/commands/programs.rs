use super::render;
use anyhow::Result;
use colored::Colorize;
use portal_application::PortalSession;

pub async fn list(session: &PortalSession) -> Result<()> {
    let programs = session.programs().await?;
    println!("{}", "Programs".bold());
    print!("{}", render::program_list(&programs));
    Ok(())
}
