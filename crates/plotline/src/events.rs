//! Pointer event model for gesture handlers.

/// Pointer buttons the gesture state machine distinguishes.
///
/// Hosts map their native button identifiers to these; anything beyond
/// primary/secondary is ignored by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

bitflags::bitflags! {
    /// Result of offering an event to a gesture handler.
    ///
    /// `HANDLED` means the handler looked at the event; `CONSUMED` means the
    /// host must not forward it to other interaction layers (e.g. tooltip
    /// hit-testing).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HandleStatus: u8 {
        const HANDLED = 0b0000_0001;
        const CONSUMED = 0b0000_0010;
    }
}

impl HandleStatus {
    pub const fn is_consumed(&self) -> bool {
        self.contains(Self::CONSUMED)
    }

    pub const fn is_handled(&self) -> bool {
        self.contains(Self::HANDLED)
    }

    pub const fn consumed() -> Self {
        Self::from_bits_truncate(Self::HANDLED.bits() | Self::CONSUMED.bits())
    }

    pub const fn handled() -> Self {
        Self::from_bits_truncate(Self::HANDLED.bits())
    }

    pub const fn ignored() -> Self {
        Self::empty()
    }
}
