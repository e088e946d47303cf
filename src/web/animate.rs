//! Drives a [`Tween`] from animation frames.
//!
//! An animation keeps itself alive through its own pending frame and lets go
//! once a one-shot tween completes. Looping tweens run for the page lifetime.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};

use crate::anim::Tween;

type FrameFn = Box<dyn FnMut(f64)>;
type DoneFn = Box<dyn FnOnce()>;

struct Animation {
    tween: Tween,
    started_at: Option<f64>,
    on_frame: FrameFn,
    on_done: Option<DoneFn>,
    frame: Option<AnimationFrame>,
}

/// Play `tween`, calling `on_frame` with the eased progress each frame and
/// `on_done` once after the final frame.
pub fn play<F, D>(tween: Tween, on_frame: F, on_done: D)
where
    F: FnMut(f64) + 'static,
    D: FnOnce() + 'static,
{
    let animation = Rc::new(RefCell::new(Animation {
        tween,
        started_at: None,
        on_frame: Box::new(on_frame),
        on_done: Some(Box::new(on_done)),
        frame: None,
    }));
    schedule(&animation);
}

/// Play `tween` with no completion callback.
pub fn play_forever<F>(tween: Tween, on_frame: F)
where
    F: FnMut(f64) + 'static,
{
    play(tween, on_frame, || {});
}

fn schedule(animation: &Rc<RefCell<Animation>>) {
    let next = Rc::clone(animation);
    let frame = request_animation_frame(move |now| step(&next, now));
    animation.borrow_mut().frame = Some(frame);
}

fn step(animation: &Rc<RefCell<Animation>>, now: f64) {
    let complete = {
        let mut a = animation.borrow_mut();
        a.frame = None;
        let started_at = *a.started_at.get_or_insert(now);
        let elapsed = now - started_at;
        let progress = a.tween.progress(elapsed);
        (a.on_frame)(progress);
        a.tween.is_complete(elapsed)
    };

    if complete {
        let on_done = animation.borrow_mut().on_done.take();
        if let Some(on_done) = on_done {
            on_done();
        }
    } else {
        schedule(animation);
    }
}
