//! Readable names for USB class, transfer type and direction codes.
//!
//! Every lookup is total: codes without a name degrade to a hex rendering
//! or a fixed "unknown" label.

use core::fmt::Write;

use static_assertions::const_assert;

use crate::{DeviceClass, Direction, TransferType};

const CLASS_NAME_CAPACITY: usize = 32;

/// Long enough for "Application Specific 0xfe".
pub type ClassName = heapless::String<CLASS_NAME_CAPACITY>;

const_assert!(DeviceClass::ApplicationSpecific.label().len() + " 0xhh".len() <= CLASS_NAME_CAPACITY);
const_assert!(DeviceClass::VendorSpecific.label().len() + " 0xhh".len() <= CLASS_NAME_CAPACITY);
const_assert!(DeviceClass::FromInterface.label().len() <= CLASS_NAME_CAPACITY);
const_assert!(DeviceClass::Hid.label().len() <= CLASS_NAME_CAPACITY);

pub fn name_for_class(code: u8) -> ClassName {
    let mut name = ClassName::new();
    let _ = match DeviceClass::from_repr(code) {
        Some(class) if class.shows_code() => write!(name, "{} 0x{:02x}", class.label(), code),
        Some(class) => name.push_str(class.label()).map_err(|_| core::fmt::Error),
        None => write!(name, "0x{:02x}", code),
    };
    name
}

/// Name for the two low bits of an endpoint `bmAttributes`.
pub fn name_for_endpoint_type(code: u8) -> &'static str {
    match TransferType::from_repr(code) {
        Some(TransferType::Control) => "Control",
        Some(TransferType::Isochronous) => "Isochronous",
        Some(TransferType::Bulk) => "Bulk",
        Some(TransferType::Interrupt) => "Interrupt",
        None => "Unknown Type",
    }
}

/// Name for the direction bit of an endpoint address (`0x80` or `0x00`).
pub fn name_for_direction(code: u8) -> &'static str {
    match Direction::from_repr(code) {
        Some(Direction::In) => "IN",
        Some(Direction::Out) => "OUT",
        None => "Unknown Direction",
    }
}
