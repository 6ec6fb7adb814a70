use std::collections::VecDeque;

use flappy_sampler_core::constants::{PIPE_BODY_WIDTH, PIPE_SCROLL_SPEED, SCREEN_HEIGHT};
use flappy_sampler_core::{apply_action, Action, BirdState, PipeContext, SeededRng, WorldSnapshot};

/// Horizontal position the bird is pinned at; only pipes move.
pub const BIRD_X: f64 = 150.0;

const FIRST_PIPE_X: f64 = 400.0;
const PIPE_SPACING: f64 = 220.0;
const GAP_HEIGHT: f64 = 120.0;
const GAP_TOP_MIN: f64 = 80.0;
const GAP_TOP_MAX: f64 = 400.0;
const BIRD_START_Y: f64 = 300.0;
const PIPE_COUNT: usize = 3;

#[derive(Clone, Copy, Debug)]
struct Pipe {
    x: f64,
    gap_top: f64,
    gap_bottom: f64,
    passed: bool,
}

/// Minimal deterministic scrolling-pipe world: the stand-in for the real
/// game loop the sampler normally plugs into. Enough to exercise the autoplay
/// policy end to end, not a calibrated clone of the game.
pub struct LiveWorld {
    rng: SeededRng,
    frame_count: u32,
    bird: BirdState,
    pipes: VecDeque<Pipe>,
    pipes_passed: u32,
    game_over: bool,
}

impl LiveWorld {
    pub fn new(seed: u32) -> Self {
        let mut world = Self {
            rng: SeededRng::new(seed),
            frame_count: 0,
            bird: BirdState::new(BIRD_START_Y, 0.0),
            pipes: VecDeque::with_capacity(PIPE_COUNT),
            pipes_passed: 0,
            game_over: false,
        };
        for slot in 0..PIPE_COUNT {
            let x = FIRST_PIPE_X + slot as f64 * PIPE_SPACING;
            let pipe = world.spawn_pipe(x);
            world.pipes.push_back(pipe);
        }
        world
    }

    fn spawn_pipe(&mut self, x: f64) -> Pipe {
        let gap_top = GAP_TOP_MIN + self.rng.next_f64() * (GAP_TOP_MAX - GAP_TOP_MIN);
        Pipe {
            x,
            gap_top,
            gap_bottom: gap_top + GAP_HEIGHT,
            passed: false,
        }
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let pipes = self
            .pipes
            .iter()
            .map(|pipe| PipeContext {
                distance: pipe.x - BIRD_X,
                gap_top: pipe.gap_top,
                gap_bottom: pipe.gap_bottom,
            })
            .collect();
        WorldSnapshot {
            frame_count: self.frame_count,
            bird: self.bird,
            pipes,
        }
    }

    pub fn step(&mut self, flap: bool) {
        if self.game_over {
            return;
        }
        let action = if flap { Action::Flap } else { Action::Fall };
        self.bird = apply_action(&self.bird, action);
        self.frame_count += 1;

        for pipe in &mut self.pipes {
            pipe.x -= PIPE_SCROLL_SPEED;
            if !pipe.passed && pipe.x + PIPE_BODY_WIDTH < BIRD_X {
                pipe.passed = true;
                self.pipes_passed += 1;
            }
        }
        self.recycle_pipes();

        if self.bird.position <= 0.0 || self.bird.position >= SCREEN_HEIGHT {
            self.game_over = true;
            return;
        }
        if self.pipes.iter().any(|pipe| {
            let overlaps = self.bird_overlaps(pipe);
            let outside_gap = self.bird.position <= pipe.gap_top
                || self.bird.position >= pipe.gap_bottom;
            overlaps && outside_gap
        }) {
            self.game_over = true;
        }
    }

    fn bird_overlaps(&self, pipe: &Pipe) -> bool {
        BIRD_X >= pipe.x && BIRD_X <= pipe.x + PIPE_BODY_WIDTH
    }

    fn recycle_pipes(&mut self) {
        while let Some(front) = self.pipes.front() {
            if front.x + PIPE_BODY_WIDTH >= 0.0 {
                break;
            }
            self.pipes.pop_front();
            let rightmost = self
                .pipes
                .back()
                .map(|pipe| pipe.x)
                .unwrap_or(FIRST_PIPE_X);
            let pipe = self.spawn_pipe(rightmost + PIPE_SPACING);
            self.pipes.push_back(pipe);
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn pipes_passed(&self) -> u32 {
        self.pipes_passed
    }

    pub fn bird(&self) -> BirdState {
        self.bird
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_world() {
        let mut a = LiveWorld::new(0x5151);
        let mut b = LiveWorld::new(0x5151);
        for frame in 0..200 {
            let flap = frame % 17 == 0;
            a.step(flap);
            b.step(flap);
            assert_eq!(a.snapshot(), b.snapshot());
        }
    }

    #[test]
    fn never_flapping_hits_the_floor() {
        let mut world = LiveWorld::new(1);
        for _ in 0..2_000 {
            world.step(false);
        }
        assert!(world.is_game_over());
        assert!(world.bird().position >= SCREEN_HEIGHT);
    }

    #[test]
    fn steps_after_game_over_are_ignored() {
        let mut world = LiveWorld::new(1);
        for _ in 0..2_000 {
            world.step(false);
        }
        let frozen = world.frame_count();
        world.step(true);
        assert_eq!(world.frame_count(), frozen);
    }

    #[test]
    fn recycling_replaces_cleared_pipes() {
        let mut world = LiveWorld::new(3);
        for pipe in &mut world.pipes {
            pipe.x -= 500.0;
        }
        world.recycle_pipes();
        assert_eq!(world.pipes.len(), PIPE_COUNT);
        let front = *world.pipes.front().unwrap();
        let back = *world.pipes.back().unwrap();
        assert!(front.x + PIPE_BODY_WIDTH >= 0.0);
        assert_eq!(back.x, world.pipes[world.pipes.len() - 2].x + PIPE_SPACING);
        assert!(back.gap_bottom - back.gap_top == GAP_HEIGHT);
    }

    #[test]
    fn gap_placement_stays_in_bounds() {
        let mut world = LiveWorld::new(0xABC);
        for frame in 0..3_000 {
            world.step(frame % 13 == 0);
            for pipe in world.snapshot().pipes {
                assert!(pipe.gap_top >= GAP_TOP_MIN);
                assert!(pipe.gap_bottom <= GAP_TOP_MAX + GAP_HEIGHT);
                assert_eq!(pipe.gap_bottom - pipe.gap_top, GAP_HEIGHT);
            }
        }
    }
}
