//! Controller input for operator control.
//!
//! The teleop loop never talks to a controller directly. It reads through the
//! [`InputSource`] trait, which exposes exactly what a V5 controller reports
//! once per update:
//!
//! - **Analog axes**: the four stick axes, scaled to `[-127, 127]`.
//! - **Button levels**: whether a button is currently held.
//! - **Button edges**: `true` only on the sample where a button went from
//!   released to pressed.
//!
//! # Example
//!
//! ```ignore
//! use pushback::peripherals::controller::{Axis, ControllerButton, InputSource};
//!
//! fn forward<I: InputSource>(input: &mut I) -> i32 {
//!     input.refresh();
//!     if input.button_pressed(ControllerButton::ButtonX) {
//!         log::info!("X pressed");
//!     }
//!     input.axis(Axis::LeftY)
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Largest magnitude an axis reading can take.
pub const AXIS_MAX: i32 = 127;

/// A list of Controller Buttons.
///
/// # Example
///
/// ```
/// use pushback::peripherals::controller::ControllerButton;
///
/// let shoot = ControllerButton::ButtonX;
/// assert_ne!(shoot, ControllerButton::ButtonA);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerButton {
    ButtonA,
    ButtonB,
    ButtonX,
    ButtonY,
    ButtonUp,
    ButtonDown,
    ButtonLeft,
    ButtonRight,
    ButtonL1,
    ButtonL2,
    ButtonR1,
    ButtonR2,
}

impl ControllerButton {
    /// Every button, in declaration order.
    pub const ALL: [ControllerButton; 12] = [
        ControllerButton::ButtonA,
        ControllerButton::ButtonB,
        ControllerButton::ButtonX,
        ControllerButton::ButtonY,
        ControllerButton::ButtonUp,
        ControllerButton::ButtonDown,
        ControllerButton::ButtonLeft,
        ControllerButton::ButtonRight,
        ControllerButton::ButtonL1,
        ControllerButton::ButtonL2,
        ControllerButton::ButtonR1,
        ControllerButton::ButtonR2,
    ];

    /// Bit used for this button in a packed button mask.
    pub const fn mask(self) -> u16 { 1 << self as u16 }
}

/// The four analog stick axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

impl Axis {
    pub(crate) const fn index(self) -> usize { self as usize }
}

/// A source of controller input, sampled once per control tick.
///
/// Implementations must treat read failures as a neutral controller: axes at
/// zero and every button released. Nothing here can fail.
pub trait InputSource {
    /// Takes a fresh sample. Called exactly once at the start of every tick.
    ///
    /// Edge state is relative to the previous sample, so calling this more
    /// than once per tick would swallow presses.
    fn refresh(&mut self);

    /// Reads an axis, in `[-127, 127]`.
    fn axis(&self, axis: Axis) -> i32;

    /// Returns `true` only on the sample where `button` went from released to
    /// pressed.
    fn button_pressed(&self, button: ControllerButton) -> bool;

    /// Returns `true` while `button` is held.
    fn button_held(&self, button: ControllerButton) -> bool;
}
