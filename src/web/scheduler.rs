//! `requestAnimationFrame` behind [`FrameScheduler`].

use std::cell::RefCell;
use std::rc::Weak;

use gloo::render::{request_animation_frame, AnimationFrame};

use super::WebVisualizer;
use crate::error::{GalaxyError, GalaxyResult};
use crate::visualizer::{FrameHandle, FrameScheduler};

/// Schedules [`WebVisualizer::on_frame`] on the next browser frame.
///
/// Holds the visualizer weakly: the visualizer owns this scheduler.
pub struct RafScheduler {
    target: Weak<RefCell<WebVisualizer>>,
    next_id: u64,
    pending: Option<(FrameHandle, AnimationFrame)>,
}

impl RafScheduler {
    pub fn new(target: Weak<RefCell<WebVisualizer>>) -> Self {
        Self {
            target,
            next_id: 0,
            pending: None,
        }
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> GalaxyResult<FrameHandle> {
        let target = self.target.clone();
        if target.strong_count() == 0 {
            return Err(GalaxyError::dom("visualizer was dropped"));
        }
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);

        let frame = request_animation_frame(move |_timestamp| {
            let Some(visualizer) = target.upgrade() else {
                return;
            };
            let Ok(mut visualizer) = visualizer.try_borrow_mut() else {
                log::warn!("frame {} skipped: visualizer busy", handle.0);
                return;
            };
            if let Err(e) = visualizer.on_frame() {
                log::error!("frame {} failed: {e}", handle.0);
            }
        });
        // Replacing a still-pending frame cancels it, so at most one is live.
        self.pending = Some((handle, frame));
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending.as_ref().is_some_and(|(h, _)| *h == handle) {
            self.pending = None;
        }
    }
}
