//! Seen command implementation

use anyhow::{Result, bail};

use lessons::config::Config;

use super::open_session;

/// Clear "new" badges
pub fn seen_command(config: &Config, id: Option<&str>, all: bool) -> Result<()> {
    let Some(mut session) = open_session(config)? else {
        return Ok(());
    };

    if all {
        let count = session.seen_all()?;
        println!("Cleared {} badge(s).", count);
        return Ok(());
    }

    let Some(id) = id else {
        bail!("Pass a lesson id or --all");
    };
    let title = session.lookup(id)?.title.clone();
    if session.seen(id)? {
        println!("Seen: {}", title);
    } else {
        println!("Already seen: {}", title);
    }
    Ok(())
}
