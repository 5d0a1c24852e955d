use tracing::{debug, trace};

use super::{Key, PlayerController};
use crate::player::types::WindDirection;

impl PlayerController {
    pub(super) async fn handle_key(&mut self, key: Key) {
        match key {
            Key::Space => self.toggle_play_pause().await,
            Key::ArrowLeft => self.nudge(WindDirection::Backward).await,
            Key::ArrowRight => self.nudge(WindDirection::Forward).await,
            Key::ArrowUp => self.adjust_volume(self.config.playback.volume_step).await,
            Key::ArrowDown => self.adjust_volume(-self.config.playback.volume_step).await,
            Key::Char('m') => self.toggle_mute().await,
            Key::Char('f') => self.toggle_fullscreen(),
            Key::Char(other) => trace!("Unmapped key {:?}", other),
        }
    }

    /// Jump one nudge step, clamped to the start and end of the media.
    async fn nudge(&mut self, direction: WindDirection) {
        let Some(duration) = self.media.duration().await.filter(|d| d.is_finite()) else {
            trace!("Ignoring nudge before metadata");
            return;
        };

        let current = self.media.current_time().await;
        let target = (current + direction.sign() * self.config.playback.nudge_step_secs)
            .clamp(0.0, duration.max(0.0));
        debug!("Nudge {:?} {} -> {}", direction, current, target);

        let result = self.media.set_current_time(target).await;
        self.report("nudge seek", result);
        self.render_time().await;
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::player::types::Icon;
    use crate::test_utils::{MockLookup, MockMedia};
    use crate::ui::player_controls::{Key, PlayerController, PlayerHandle};
    use std::sync::Arc;

    fn spawn(media: Arc<MockMedia>) -> (PlayerHandle, MockLookup) {
        let lookup = MockLookup::complete();
        let (handle, controller) =
            PlayerController::new(media, MockMedia::new(), &lookup, Config::default()).unwrap();
        tokio::spawn(controller.run());
        (handle, lookup)
    }

    #[tokio::test]
    async fn test_arrows_nudge_and_clamp() {
        let media = MockMedia::loaded(25.0);
        media.update(|s| s.current_time = 4.0);
        let (handle, _lookup) = spawn(media.clone());

        handle.key(Key::ArrowLeft).unwrap();
        handle.key(Key::ArrowRight).unwrap();
        handle.key(Key::ArrowRight).unwrap();
        handle.key(Key::ArrowRight).unwrap();
        let snapshot = handle.snapshot().await.unwrap();

        assert_eq!(media.state().seeks, vec![0.0, 10.0, 20.0, 25.0]);
        assert_eq!(snapshot.timer_text, "00:00:25");
    }

    #[tokio::test]
    async fn test_nudge_without_duration_is_ignored() {
        let media = MockMedia::new();
        let (handle, _lookup) = spawn(media.clone());

        handle.key(Key::ArrowRight).unwrap();
        handle.snapshot().await.unwrap();
        assert!(media.state().seeks.is_empty());
    }

    #[tokio::test]
    async fn test_key_map() {
        let media = MockMedia::loaded(60.0);
        media.update(|s| s.volume = 0.5);
        let (handle, lookup) = spawn(media.clone());

        handle.key(Key::Space).unwrap();
        assert_eq!(handle.snapshot().await.unwrap().play_icon, Icon::Pause);

        handle.key(Key::ArrowDown).unwrap();
        assert_eq!(handle.snapshot().await.unwrap().playback.volume, 0.4);
        handle.key(Key::ArrowUp).unwrap();
        assert_eq!(handle.snapshot().await.unwrap().playback.volume, 0.5);

        handle.key(Key::Char('m')).unwrap();
        assert!(handle.snapshot().await.unwrap().playback.muted);

        handle.key(Key::Char('f')).unwrap();
        handle.snapshot().await.unwrap();
        assert_eq!(lookup.mock_frame().state().requests, 1);
    }

    #[tokio::test]
    async fn test_unmapped_keys_change_nothing() {
        let media = MockMedia::loaded(60.0);
        let (handle, _lookup) = spawn(media.clone());
        let before = handle.snapshot().await.unwrap();

        handle.key(Key::Char('q')).unwrap();
        handle.key(Key::Char('1')).unwrap();
        assert_eq!(handle.snapshot().await.unwrap(), before);
        assert!(media.state().seeks.is_empty());
    }
}
