use core::fmt::Debug;

use crate::SetupPacket;

/// Control pipe of an opened device, provided by the host USB stack.
///
/// The decoders only ever issue device-to-host requests;
/// enumeration, handle lifetime and timeouts stay with the implementor.
pub trait ControlTransfer {
    type Error: Debug;

    /// Issue `setup` on the default control pipe, reading the data stage into `buf`.
    ///
    /// `buf` is exactly `setup.w_length` bytes long.
    /// On success, the amount of data transferred into `buf` is returned.
    fn control_transfer(&mut self, setup: SetupPacket, buf: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error>;
}

impl<F, E> ControlTransfer for F
where
    F: FnMut(SetupPacket, &mut [u8], u32) -> Result<usize, E>,
    E: Debug,
{
    type Error = E;

    fn control_transfer(&mut self, setup: SetupPacket, buf: &mut [u8], timeout_ms: u32) -> Result<usize, E> {
        self(setup, buf, timeout_ms)
    }
}
