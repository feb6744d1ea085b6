//! Terminal command sender

use census_services::{CommandSender, MemoryPlayer, Player};
use std::io::Write;

/// Prints every message on its own line to stdout.
pub struct StdoutSender {
    player: Option<MemoryPlayer>,
    admin: bool,
}

impl StdoutSender {
    /// The server console: no player, all permissions.
    pub fn console() -> Self {
        Self {
            player: None,
            admin: true,
        }
    }

    /// A player standing at `player`'s location.
    pub fn for_player(player: MemoryPlayer, admin: bool) -> Self {
        Self {
            player: Some(player),
            admin,
        }
    }
}

impl CommandSender for StdoutSender {
    fn send_message(&mut self, message: &str) {
        let mut stdout = std::io::stdout().lock();
        // Ignore a closed stdout.
        let _ = writeln!(stdout, "{}", message);
    }

    fn has_permission(&self, _permission: &str) -> bool {
        self.admin
    }

    fn player(&self) -> Option<&dyn Player> {
        self.player.as_ref().map(|player| player as &dyn Player)
    }

    fn player_mut(&mut self) -> Option<&mut dyn Player> {
        self.player.as_mut().map(|player| player as &mut dyn Player)
    }
}
