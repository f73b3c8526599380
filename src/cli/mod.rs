//! CLI command implementations

pub mod complete;
pub mod init;
pub mod list;
pub mod reset;
pub mod seen;
pub mod show;
pub mod validate;

use anyhow::Result;

use lessons::config::Config;
use lessons::LessonSession;

/// Open the lesson session, telling the user when lessons are disabled
pub fn open_session(config: &Config) -> Result<Option<LessonSession>> {
    let session = LessonSession::open(config)?;
    if session.is_none() {
        eprintln!("Lessons are disabled: the built-in catalog is invalid. Run `lessons validate` for details.");
    }
    Ok(session)
}
