//! Reset command implementation

use anyhow::Result;

use lessons::config::Config;

use super::open_session;

/// Delete all saved lesson progress
pub fn reset_command(config: &Config, yes: bool) -> Result<()> {
    if !yes {
        eprintln!("This deletes all lesson progress. Re-run with --yes to confirm.");
        return Ok(());
    }

    let Some(mut session) = open_session(config)? else {
        return Ok(());
    };
    session.reset()?;
    println!("Lesson progress reset.");
    Ok(())
}
