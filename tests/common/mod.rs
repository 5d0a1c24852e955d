pub mod mocks;

use playdeck::{Config, PlayerController, PlayerHandle};
use std::sync::Arc;

pub use mocks::{FakeMedia, FakePanel};

/// A running controller over fake media and a fake panel.
pub struct Harness {
    pub handle: PlayerHandle,
    pub media: Arc<FakeMedia>,
    pub preview: Arc<FakeMedia>,
    pub panel: FakePanel,
    pub task: tokio::task::JoinHandle<()>,
}

impl Harness {
    pub fn start(media: Arc<FakeMedia>, config: Config) -> Self {
        let preview = FakeMedia::empty();
        let panel = FakePanel::new();
        let (handle, controller) =
            PlayerController::new(media.clone(), preview.clone(), &panel, config)
                .expect("panel should bind");
        let task = tokio::spawn(controller.run());
        Self {
            handle,
            media,
            preview,
            panel,
            task,
        }
    }
}
