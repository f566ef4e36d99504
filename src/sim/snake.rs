//! The snake body and its steering

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::{Arena, Heading};
use crate::consts::INITIAL_SNAKE_LEN;

/// Ordered body segments (head first) plus heading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    segments: VecDeque<IVec2>,
    /// Heading used by the most recent move
    heading: Heading,
    /// Heading the next move will use
    queued: Heading,
}

impl Snake {
    /// Fresh snake: head at the arena centre, body trailing to the left, moving right
    pub fn new(arena: &Arena) -> Self {
        let head = arena.center();
        let segments = (0..INITIAL_SNAKE_LEN as i32)
            .map(|i| head - IVec2::new(i * arena.cell_size, 0))
            .collect();
        Self {
            segments,
            heading: Heading::Right,
            queued: Heading::Right,
        }
    }

    /// Build a snake from explicit segments (head first); None if empty
    pub fn from_segments(
        segments: impl IntoIterator<Item = IVec2>,
        heading: Heading,
    ) -> Option<Self> {
        let segments: VecDeque<IVec2> = segments.into_iter().collect();
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            segments,
            heading,
            queued: heading,
        })
    }

    #[inline]
    pub fn head(&self) -> IVec2 {
        self.segments[0]
    }

    pub fn tail(&self) -> IVec2 {
        self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = IVec2> + '_ {
        self.segments.iter().copied()
    }

    /// Heading of the last executed move
    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Heading the next move will use
    pub fn queued_heading(&self) -> Heading {
        self.queued
    }

    /// Request a new heading for the next move
    ///
    /// Rejected (returns false) if it reverses the heading of the last
    /// executed move, not the queued one.
    pub fn steer(&mut self, heading: Heading) -> bool {
        if heading.reverses(self.heading) {
            return false;
        }
        self.queued = heading;
        true
    }

    /// Where the head goes on the next move
    pub fn next_head(&self, arena: &Arena) -> IVec2 {
        arena.step(self.head(), self.queued)
    }

    /// Does `pos` hit the body?
    ///
    /// When `tail_moves` is set the tail cell is about to be vacated and is
    /// not counted.
    pub fn hits_body(&self, pos: IVec2, tail_moves: bool) -> bool {
        let checked = if tail_moves {
            self.segments.len() - 1
        } else {
            self.segments.len()
        };
        self.segments.iter().take(checked).any(|&s| s == pos)
    }

    /// Move the head to `new_head`; keep the tail when growing
    pub fn advance(&mut self, new_head: IVec2, grow: bool) {
        self.heading = self.queued;
        self.segments.push_front(new_head);
        if !grow {
            self.segments.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arena() -> Arena {
        Arena::new(800, 450, 20)
    }

    #[test]
    fn test_new_snake_centered() {
        let snake = Snake::new(&arena());
        let segs: Vec<_> = snake.segments().collect();
        assert_eq!(segs, vec![IVec2::new(400, 225), IVec2::new(380, 225)]);
        assert_eq!(snake.heading(), Heading::Right);
    }

    #[test]
    fn test_from_segments_needs_a_head() {
        assert!(Snake::from_segments(Vec::new(), Heading::Up).is_none());
        let snake = Snake::from_segments([IVec2::new(60, 40)], Heading::Up).unwrap();
        assert_eq!(snake.head(), snake.tail());
        assert_eq!(snake.queued_heading(), Heading::Up);
    }

    #[test]
    fn test_steer_rejects_reversal() {
        let mut snake = Snake::new(&arena());
        assert!(!snake.steer(Heading::Left));
        assert_eq!(snake.queued_heading(), Heading::Right);
        assert!(snake.steer(Heading::Right));
        assert!(snake.steer(Heading::Up));
        assert_eq!(snake.queued_heading(), Heading::Up);
    }

    #[test]
    fn test_two_turns_between_ticks_cannot_reverse() {
        let mut snake = Snake::new(&arena());
        assert!(snake.steer(Heading::Up));
        // Still moving right until the next tick, so Left is a reversal
        assert!(!snake.steer(Heading::Left));
        assert_eq!(snake.queued_heading(), Heading::Up);

        let head = snake.next_head(&arena());
        snake.advance(head, false);
        assert!(snake.steer(Heading::Left));
    }

    #[test]
    fn test_advance_and_grow() {
        let a = arena();
        let mut snake = Snake::new(&a);
        let head = snake.next_head(&a);
        snake.advance(head, false);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), IVec2::new(420, 225));
        assert_eq!(snake.tail(), IVec2::new(400, 225));

        let head = snake.next_head(&a);
        snake.advance(head, true);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), IVec2::new(400, 225));
    }

    #[test]
    fn test_hits_body_tail_exclusion() {
        let snake = Snake::from_segments(
            [
                IVec2::new(40, 40),
                IVec2::new(40, 60),
                IVec2::new(60, 60),
                IVec2::new(60, 40),
            ],
            Heading::Up,
        )
        .unwrap();
        let tail = IVec2::new(60, 40);
        assert!(!snake.hits_body(tail, true));
        assert!(snake.hits_body(tail, false));
        assert!(snake.hits_body(IVec2::new(40, 60), true));
        assert!(!snake.hits_body(IVec2::new(80, 80), false));
    }

    proptest! {
        #[test]
        fn prop_reversal_always_rejected(
            current in prop::sample::select(Heading::ALL.to_vec()),
            requested in prop::sample::select(Heading::ALL.to_vec()),
        ) {
            let mut snake = Snake::from_segments([IVec2::new(100, 100)], current).unwrap();
            let accepted = snake.steer(requested);
            prop_assert_eq!(accepted, requested != current.opposite());
            if accepted {
                prop_assert_eq!(snake.queued_heading(), requested);
            } else {
                prop_assert_eq!(snake.queued_heading(), current);
            }
        }
    }
}
