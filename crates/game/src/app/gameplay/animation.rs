#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum AnimState {
    Idle,
    Move,
    Attack,
    Hit,
}

impl AnimState {
    fn loops(self) -> bool {
        matches!(self, AnimState::Idle | AnimState::Move)
    }

    fn clip_name(self) -> &'static str {
        match self {
            AnimState::Idle => "idle",
            AnimState::Move => "walk",
            AnimState::Attack => "attack",
            AnimState::Hit => "hit",
        }
    }
}

/// Frame counts per state; sprite keys are `<prefix>_<clip>_<index>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrameSet {
    pub(crate) prefix: &'static str,
    pub(crate) idle: usize,
    pub(crate) walk: usize,
    pub(crate) attack: usize,
    pub(crate) hit: usize,
}

impl FrameSet {
    fn count(&self, state: AnimState) -> usize {
        match state {
            AnimState::Idle => self.idle,
            AnimState::Move => self.walk,
            AnimState::Attack => self.attack,
            AnimState::Hit => self.hit,
        }
    }
}

pub(crate) const HERO_FRAMES: FrameSet = FrameSet {
    prefix: "hero",
    idle: 6,
    walk: 8,
    attack: 3,
    hit: 2,
};

// Enemies die on the first hit, so they carry no hit clip.
pub(crate) const ENEMY_FRAMES: FrameSet = FrameSet {
    prefix: "enemy",
    idle: 6,
    walk: 6,
    attack: 5,
    hit: 0,
};

#[derive(Debug, Clone)]
pub(crate) struct SpriteAnimator {
    frames: FrameSet,
    interval: f32,
    state: AnimState,
    timer: f32,
    index: usize,
    finished: bool,
}

impl SpriteAnimator {
    pub(crate) fn new(frames: FrameSet, interval: f32) -> Self {
        Self {
            frames,
            interval,
            state: AnimState::Idle,
            timer: 0.0,
            index: 0,
            finished: false,
        }
    }

    /// Restarts the clip unless it is already playing. A finished one-shot clip
    /// restarts even when the same state is requested again.
    pub(crate) fn set_state(&mut self, state: AnimState) {
        if state == self.state && !self.finished {
            return;
        }
        self.state = state;
        self.timer = 0.0;
        self.index = 0;
        self.finished = false;
    }

    pub(crate) fn update(&mut self, dt: f32) {
        let count = self.frames.count(self.state);
        if count < 2 || (self.finished && !self.state.loops()) {
            return;
        }
        self.timer += dt;
        if self.timer < self.interval {
            return;
        }
        self.timer -= self.interval;
        self.index = (self.index + 1) % count;
        if !self.state.loops() && self.index == count - 1 {
            self.finished = true;
        }
    }

    pub(crate) fn state(&self) -> AnimState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn frame_index(&self) -> usize {
        self.index
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn sprite_key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.frames.prefix,
            self.state.clip_name(),
            self.index
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(animator: &mut SpriteAnimator, times: usize) {
        for _ in 0..times {
            animator.update(0.12);
        }
    }

    #[test]
    fn looping_clip_wraps() {
        let mut animator = SpriteAnimator::new(HERO_FRAMES, 0.12);
        step(&mut animator, 6);
        assert_eq!(animator.frame_index(), 0);
        assert!(!animator.is_finished());
    }

    #[test]
    fn one_shot_clip_freezes_on_last_frame() {
        let mut animator = SpriteAnimator::new(HERO_FRAMES, 0.12);
        animator.set_state(AnimState::Attack);
        step(&mut animator, 2);
        assert_eq!(animator.frame_index(), 2);
        assert!(animator.is_finished());

        step(&mut animator, 5);
        assert_eq!(animator.frame_index(), 2);
        assert_eq!(animator.sprite_key(), "hero_attack_2");
    }

    #[test]
    fn same_state_is_idempotent_while_playing() {
        let mut animator = SpriteAnimator::new(HERO_FRAMES, 0.12);
        animator.set_state(AnimState::Move);
        step(&mut animator, 3);
        animator.set_state(AnimState::Move);
        assert_eq!(animator.frame_index(), 3);
        assert_eq!(animator.sprite_key(), "hero_walk_3");
    }

    #[test]
    fn finished_one_shot_restarts_on_same_state() {
        let mut animator = SpriteAnimator::new(ENEMY_FRAMES, 0.12);
        animator.set_state(AnimState::Attack);
        step(&mut animator, 4);
        assert!(animator.is_finished());

        animator.set_state(AnimState::Attack);
        assert_eq!(animator.frame_index(), 0);
        assert!(!animator.is_finished());
    }

    #[test]
    fn frame_advances_only_after_interval() {
        let mut animator = SpriteAnimator::new(HERO_FRAMES, 0.12);
        animator.update(0.05);
        animator.update(0.05);
        assert_eq!(animator.frame_index(), 0);
        animator.update(0.05);
        assert_eq!(animator.frame_index(), 1);
        assert_eq!(animator.state(), AnimState::Idle);
    }
}
