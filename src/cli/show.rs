//! Show command implementation

use anyhow::{Result, bail};

use lessons::config::Config;
use lessons::present::{ContentRenderer, SystemOpener, TerminalRenderer, TextContext};

use super::open_session;

/// Print a visible lesson and clear its "new" badge
pub fn show_command(config: &Config, id: &str, open_links: bool) -> Result<()> {
    let Some(mut session) = open_session(config)? else {
        return Ok(());
    };

    let item = session.lookup(id)?;
    if !session.engine().is_item_visible(item, session.progress()) {
        bail!("Lesson '{}' is still locked", id);
    }

    let renderer = TerminalRenderer;
    let mut ctx = if open_links {
        TextContext::with_opener(Box::new(SystemOpener))
    } else {
        TextContext::new()
    };
    renderer.render(&item.content, &mut ctx);

    println!("{}\n", item.title);
    print!("{}", ctx.as_str());

    session.seen(id)?;
    Ok(())
}
