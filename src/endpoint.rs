use core::fmt::{self, Display, Formatter};

use crate::reader::Reader;
use crate::{name_for_direction, name_for_endpoint_type, DescriptorError, Direction, TransferType};

/// Bit 7 is the direction, with OUT = 0 and IN = 1
const ENDPOINT_DIRECTION_MASK: u8 = 0x80;

/// Bits 3..0 are the endpoint number
const ENDPOINT_NUMBER_MASK: u8 = 0x0F;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EpAddress(u8);

impl EpAddress {
    /// Direction inferred from endpoint address
    pub fn direction(&self) -> Direction {
        match self.0 & ENDPOINT_DIRECTION_MASK {
            0 => Direction::Out,
            _ => Direction::In,
        }
    }

    /// Absolute endpoint number, irrespective of direction
    pub fn absolute(&self) -> u8 {
        self.0 & ENDPOINT_NUMBER_MASK
    }
}

impl From<u8> for EpAddress {
    fn from(b_endpoint_address: u8) -> Self {
        Self(b_endpoint_address)
    }
}

impl From<EpAddress> for u8 {
    fn from(addr: EpAddress) -> Self {
        addr.0
    }
}

/// One endpoint record of a configuration descriptor set.
///
/// cf §9.6.6 of USB 2.0
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EndpointInfo {
    pub id: u8,
    pub direction: Direction,
    pub transfer_type: TransferType,
    pub max_packet_size: u16,
    pub interval: u8,
}

impl EndpointInfo {
    pub fn from_raw(b_endpoint_address: u8, bm_attributes: u8, max_packet_size: u16, interval: u8) -> Self {
        let addr = EpAddress::from(b_endpoint_address);
        Self {
            id: addr.absolute(),
            direction: addr.direction(),
            transfer_type: TransferType::from(bm_attributes),
            max_packet_size,
            interval,
        }
    }

    /// Decode the endpoint record starting at `at`.
    /// The caller has checked the record length.
    pub(crate) fn read(r: &Reader, at: usize) -> Result<Self, DescriptorError> {
        Ok(Self::from_raw(r.u8_at(at + 2)?, r.u8_at(at + 3)?, r.u16_at(at + 4)?, r.u8_at(at + 6)?))
    }
}

impl Display for EndpointInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "   -- Endpoint {}, {} {}, {} byte packets",
            self.id,
            name_for_endpoint_type(self.transfer_type as u8),
            name_for_direction(self.direction as u8),
            self.max_packet_size
        )
    }
}
