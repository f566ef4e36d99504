//! Per-frame input sample
//!
//! Everything here is edge-triggered (true only on the frame the key or
//! button went down) except `volume_delta`, which repeats while held.
//! Button hit-testing happens in the front end; the core only sees the
//! resulting choice.

use crate::sim::Heading;

/// Main menu buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    HighScores,
    Settings,
    Exit,
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Arrow key pressed this frame
    pub direction: Option<Heading>,
    /// Pause key (Escape) pressed
    pub pause: bool,
    /// Confirm / primary button (Resume, Back to Menu on game over)
    pub confirm: bool,
    /// Back button or Escape on secondary screens
    pub back: bool,
    /// "Quit to Menu" on the pause screen
    pub quit_to_menu: bool,
    /// Window close requested
    pub close: bool,
    /// Main menu button clicked
    pub menu_choice: Option<MenuChoice>,
    /// Volume steps while the adjust keys are held (-1, 0 or +1 per frame)
    pub volume_delta: i32,
}

impl FrameInput {
    pub fn steer(heading: Heading) -> Self {
        Self {
            direction: Some(heading),
            ..Default::default()
        }
    }

    pub fn menu(choice: MenuChoice) -> Self {
        Self {
            menu_choice: Some(choice),
            ..Default::default()
        }
    }

    pub fn pause() -> Self {
        Self {
            pause: true,
            ..Default::default()
        }
    }

    pub fn confirm() -> Self {
        Self {
            confirm: true,
            ..Default::default()
        }
    }

    pub fn back() -> Self {
        Self {
            back: true,
            ..Default::default()
        }
    }

    pub fn close() -> Self {
        Self {
            close: true,
            ..Default::default()
        }
    }
}
