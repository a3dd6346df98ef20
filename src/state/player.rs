use super::AppState;
use crate::protocol::Event;
use crate::types::{Player, PlayerId};

impl AppState {
    /// Add a player to the registry. Idempotent: an id that is already
    /// present is left untouched (first write wins) and nothing is
    /// broadcast. Returns the freshly inserted record otherwise.
    pub async fn register_player(
        &self,
        player_id: PlayerId,
        endpoint: String,
        nick: String,
    ) -> Option<Player> {
        let (player, recipients) = {
            let mut game = self.game.lock().await;
            if game.players.contains_key(&player_id) {
                return None;
            }
            let player = Player::new(player_id.clone(), endpoint, nick);
            game.players.insert(player_id, player.clone());
            (player, game.recipients(None))
        };

        tracing::info!(player_id = %player.player_id, nick = %player.nick, "player registered");
        self.notifier
            .broadcast(Event::NewPlayer(player.clone()), recipients);
        Some(player)
    }

    /// Drop a player from the registry. A no-op for unknown ids. The removed
    /// player is not among the PLAYER_LEFT recipients.
    pub async fn remove_player(&self, player_id: &str) -> Option<Player> {
        let (player, recipients) = {
            let mut game = self.game.lock().await;
            let player = game.players.remove(player_id)?;
            (player, game.recipients(None))
        };

        tracing::info!(player_id = %player.player_id, nick = %player.nick, "player left");
        self.notifier
            .broadcast(Event::PlayerLeft(player.clone()), recipients);
        Some(player)
    }

    pub async fn get_player(&self, player_id: &str) -> Option<Player> {
        self.game.lock().await.players.get(player_id).cloned()
    }

    /// Snapshot of every registered player
    pub async fn players(&self) -> Vec<Player> {
        self.game.lock().await.players.values().cloned().collect()
    }
}
