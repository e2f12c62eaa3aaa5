pub mod dispatcher;
pub mod handler;
pub mod keywords;
pub mod registry;
pub mod router;

use crate::session::Session;
pub use dispatcher::create_command_registry;

/// State the interactive front-end threads through slash commands.
pub struct ChatState {
    pub session: Session,
    pub should_continue: bool,
}

impl ChatState {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            should_continue: true,
        }
    }
}
