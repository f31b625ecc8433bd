//! This crate decodes raw USB descriptors read from a device and
//! renders them as human readable text.
//!
//! The `decode_device` and `decode_configuration` functions turn the
//! bytes of a GET_DESCRIPTOR response into plain value records. Every
//! record implements `Display`, producing the diagnostic dump.
//!
//! The `ControlTransfer` trait is the only seam to the host USB stack:
//! `read_device_descriptor` and `read_configuration_descriptor` drive
//! it to fetch the bytes, including the two-phase configuration read.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod class;
pub mod configuration;
pub mod control;
pub mod descriptor;
pub mod device;
pub mod endpoint;
pub mod host;
pub mod inspect;
pub mod names;
pub mod reader;
pub mod summary;

use core::fmt::{Display, Formatter};

pub use class::*;
pub use configuration::*;
pub use control::*;
pub use descriptor::*;
pub use device::*;
pub use endpoint::*;
pub use host::*;
pub use inspect::*;
pub use names::*;
pub use summary::*;

/// Max interface descriptors (alternate settings included) kept per configuration.
pub const MAX_INTERFACES: usize = 32;

/// Max endpoint descriptors kept per interface.
/// USB 2.0 allows 15 IN and 15 OUT endpoints besides the default control pipe.
pub const MAX_ENDPOINTS: usize = 30;

/// Errors that can be generated when decoding a descriptor buffer.
///
/// Offsets are byte positions in the buffer handed to the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DescriptorError {
    /// The length / type tag pair at the start of the buffer is not the one expected.
    InvalidHeader { expected: DescriptorType },

    /// The declared length runs past the bytes actually available.
    TruncatedDescriptor { at: usize },

    /// An interface record shorter than 9 bytes.
    InvalidInterfaceLength { at: usize },

    /// An endpoint record shorter than 7 bytes.
    InvalidEndpointLength { at: usize },

    /// A record that cannot be walked: zero length, or an endpoint outside any interface.
    MalformedRecord { at: usize },

    TooManyInterfaces,
    TooManyEndpoints { interface: u8 },
}

impl Display for DescriptorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidHeader { expected } => write!(f, "Invalid {} descriptor header", expected.name()),
            Self::TruncatedDescriptor { at } => write!(f, "Prematurely reached descriptor end at byte {}", at),
            Self::InvalidInterfaceLength { at } => write!(f, "Invalid interface descriptor length at byte {}", at),
            Self::InvalidEndpointLength { at } => write!(f, "Invalid endpoint descriptor length at byte {}", at),
            Self::MalformedRecord { at } => write!(f, "Malformed descriptor record at byte {}", at),
            Self::TooManyInterfaces => write!(f, "More than {} interfaces", MAX_INTERFACES),
            Self::TooManyEndpoints { interface } => {
                write!(f, "More than {} endpoints on interface {}", MAX_ENDPOINTS, interface)
            }
        }
    }
}

/// The type of transfer an endpoint uses.
///
/// cf §9.6.6 of USB 2.0
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum_macros::FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum TransferType {
    Control = 0,
    Isochronous = 1,
    Bulk = 2,
    Interrupt = 3,
}

const TRANSFER_TYPE_MASK: u8 = 0b00000011;

impl From<u8> for TransferType {
    /// Transfer type from an endpoint `bmAttributes` byte, upper bits ignored.
    fn from(bm_attributes: u8) -> Self {
        match bm_attributes & TRANSFER_TYPE_MASK {
            0 => Self::Control,
            1 => Self::Isochronous,
            2 => Self::Bulk,
            _ => Self::Interrupt,
        }
    }
}

/// The direction of the transfer with the USB device.
///
/// Discriminants are the bit 7 value of an endpoint address.
///
/// cf §9.6.6 of USB 2.0
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum_macros::FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Direction {
    Out = 0x00,
    In = 0x80,
}
