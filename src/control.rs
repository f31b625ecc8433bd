//! Structures and constants for control transfers
//!
//! cf §9.3 of USB 2.0

use static_assertions::const_assert;

use crate::DescriptorType;

/// Timeout handed to the transport for descriptor requests.
/// Its value means nothing to the decoders.
pub const DEFAULT_TIMEOUT_MS: u32 = 2000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct RequestType(u8);

const DIRECTION_MASK: u8 = 0b10000000;
const KIND_MASK: u8 = 0b01100000;
const RECIPIENT_MASK: u8 = 0b00011111;

impl RequestType {
    pub fn recipient(self) -> Option<RequestRecipient> {
        RequestRecipient::from_repr(self.0 & RECIPIENT_MASK)
    }

    pub fn kind(self) -> Option<RequestKind> {
        RequestKind::from_repr(self.0 & KIND_MASK)
    }

    pub fn direction(self) -> Option<RequestDirection> {
        RequestDirection::from_repr(self.0 & DIRECTION_MASK)
    }
}

impl From<(RequestDirection, RequestKind, RequestRecipient)> for RequestType {
    fn from(v: (RequestDirection, RequestKind, RequestRecipient)) -> Self {
        Self(v.0 as u8 | v.1 as u8 | v.2 as u8)
    }
}

impl From<RequestType> for u8 {
    fn from(v: RequestType) -> Self {
        v.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum_macros::FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RequestDirection {
    HostToDevice = 0x00,
    DeviceToHost = 0x80,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum_macros::FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RequestKind {
    Standard = 0x00,
    Class = 0x20,
    Vendor = 0x40,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum_macros::FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RequestRecipient {
    Device = 0x00,
    Interface = 0x01,
    Endpoint = 0x02,
    Other = 0x03,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct WValue(u16);

impl WValue {
    pub fn lo_hi(lo: u8, hi: u8) -> Self {
        Self(u16::from_le_bytes([lo, hi]))
    }

    pub fn w_value_lo(self) -> u8 {
        self.0.to_le_bytes()[0]
    }

    pub fn w_value_hi(self) -> u8 {
        self.0.to_le_bytes()[1]
    }
}

impl From<WValue> for u16 {
    fn from(v: WValue) -> Self {
        v.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RequestCode {
    GetStatus = 0,
    ClearFeature = 1,
    SetFeature = 3,
    SetAddress = 5,
    GetDescriptor = 6,
    SetDescriptor = 7,
    GetConfiguration = 8,
    SetConfiguration = 9,
    GetInterface = 10,
    SetInterface = 11,
    SynchFrame = 12,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(C)]
pub struct SetupPacket {
    pub bm_request_type: RequestType,
    pub b_request: RequestCode,
    pub w_value: WValue,
    pub w_index: u16,
    pub w_length: u16,
}

const_assert!(core::mem::size_of::<SetupPacket>() == 8);

impl SetupPacket {
    /// Standard GET_DESCRIPTOR request addressed to the device.
    /// `w_value` carries the descriptor type in the high byte, the index in the low byte.
    pub fn get_descriptor(desc_type: DescriptorType, desc_index: u8, length: u16) -> Self {
        Self {
            bm_request_type: RequestType::from((
                RequestDirection::DeviceToHost,
                RequestKind::Standard,
                RequestRecipient::Device,
            )),
            b_request: RequestCode::GetDescriptor,
            w_value: WValue::lo_hi(desc_index, desc_type as u8),
            w_index: 0,
            w_length: length,
        }
    }

    /// Wire format, multi-byte fields little-endian
    pub fn to_bytes(&self) -> [u8; 8] {
        let [value_lo, value_hi] = u16::from(self.w_value).to_le_bytes();
        let [index_lo, index_hi] = self.w_index.to_le_bytes();
        let [length_lo, length_hi] = self.w_length.to_le_bytes();
        [
            u8::from(self.bm_request_type),
            self.b_request as u8,
            value_lo,
            value_hi,
            index_lo,
            index_hi,
            length_lo,
            length_hi,
        ]
    }
}
