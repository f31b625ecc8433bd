use core::fmt::{self, Display, Formatter};

use heapless::Vec;

use crate::reader::Reader;
use crate::{
    name_for_class, DescriptorError, DescriptorType, EndpointInfo, ATTR_BUS_POWERED, ATTR_REMOTE_WAKEUP,
    ATTR_SELF_POWERED, CONFIGURATION_DESCRIPTOR_LEN, ENDPOINT_DESCRIPTOR_LEN, INTERFACE_DESCRIPTOR_LEN,
    MAX_ENDPOINTS, MAX_INTERFACES,
};

/// A configuration descriptor with the interfaces and endpoints that follow it.
///
/// cf §9.6.3 of USB 2.0
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigurationDescriptor {
    /// `bNumInterfaces` as declared by the device
    pub interface_count: u8,
    pub bus_powered: bool,
    pub self_powered: bool,
    pub remote_wakeup: bool,
    /// Max bus power draw in mA
    pub max_power: u16,
    /// Interface records in stream order, alternate settings included
    pub interfaces: Vec<InterfaceInfo, MAX_INTERFACES>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterfaceInfo {
    pub id: u8,
    /// `bNumEndpoints` as declared, may differ from `endpoints.len()`
    pub endpoint_count: u8,
    pub interface_class: u8,
    pub interface_subclass: u8,
    pub interface_protocol: u8,
    pub endpoints: Vec<EndpointInfo, MAX_ENDPOINTS>,
}

/// Check the 9 byte header of a configuration descriptor
/// and return the `wTotalLength` of the whole descriptor set.
pub fn header_length(buf: &[u8]) -> Result<u16, DescriptorError> {
    let r = Reader::new(buf);
    r.expect_header(DescriptorType::Configuration)?;
    r.u16_at(2)
}

/// Decode a complete configuration descriptor set, `wTotalLength` bytes long.
pub fn decode_configuration(buf: &[u8]) -> Result<ConfigurationDescriptor, DescriptorError> {
    let total_len = usize::from(header_length(buf)?);
    let r = Reader::new(buf);

    let attributes = r.u8_at(7)?;
    let mut config = ConfigurationDescriptor {
        interface_count: r.u8_at(4)?,
        bus_powered: attributes & ATTR_BUS_POWERED != 0,
        self_powered: attributes & ATTR_SELF_POWERED != 0,
        remote_wakeup: attributes & ATTR_REMOTE_WAKEUP != 0,
        // bMaxPower is in 2mA units
        max_power: u16::from(r.u8_at(8)?) * 2,
        interfaces: Vec::new(),
    };

    // index into config.interfaces of the interface owning the next endpoints
    let mut current: Option<usize> = None;
    let mut pos = usize::from(CONFIGURATION_DESCRIPTOR_LEN);

    while pos < total_len {
        if pos >= r.len() {
            return Err(DescriptorError::TruncatedDescriptor { at: pos });
        }
        let desc_len = usize::from(r.u8_at(pos)?);
        let desc_type = r.u8_at(pos + 1).map_err(|_| DescriptorError::TruncatedDescriptor { at: pos })?;
        trace!("USB descriptor type {} len {} at {}", desc_type, desc_len, pos);

        if desc_len == 0 {
            return Err(DescriptorError::MalformedRecord { at: pos });
        }

        match DescriptorType::from_repr(desc_type) {
            Some(DescriptorType::Interface) => {
                if desc_len < usize::from(INTERFACE_DESCRIPTOR_LEN) {
                    return Err(DescriptorError::InvalidInterfaceLength { at: pos });
                }
                r.record(pos, desc_len)?;
                let iface = InterfaceInfo::read(&r, pos)?;
                config.interfaces.push(iface).map_err(|_| DescriptorError::TooManyInterfaces)?;
                current = Some(config.interfaces.len() - 1);
            }
            Some(DescriptorType::Endpoint) => {
                if desc_len < usize::from(ENDPOINT_DESCRIPTOR_LEN) {
                    return Err(DescriptorError::InvalidEndpointLength { at: pos });
                }
                r.record(pos, desc_len)?;
                let iface = current
                    .and_then(|i| config.interfaces.get_mut(i))
                    .ok_or(DescriptorError::MalformedRecord { at: pos })?;
                let ep = EndpointInfo::read(&r, pos)?;
                let interface = iface.id;
                iface.endpoints.push(ep).map_err(|_| DescriptorError::TooManyEndpoints { interface })?;
            }
            // class specific and other descriptors are not decoded
            _ => {}
        }

        pos += desc_len;
    }

    debug!(
        "USB Configuration Descriptor with {} interface records",
        config.interfaces.len()
    );
    Ok(config)
}

impl InterfaceInfo {
    fn read(r: &Reader, at: usize) -> Result<Self, DescriptorError> {
        Ok(InterfaceInfo {
            id: r.u8_at(at + 2)?,
            endpoint_count: r.u8_at(at + 4)?,
            interface_class: r.u8_at(at + 5)?,
            interface_subclass: r.u8_at(at + 6)?,
            interface_protocol: r.u8_at(at + 7)?,
            endpoints: Vec::new(),
        })
    }
}

impl Display for ConfigurationDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration Descriptor:")?;
        writeln!(f, "{} Interfaces", self.interface_count)?;
        write!(f, "Attributes:")?;
        if self.bus_powered {
            write!(f, " BusPowered")?;
        }
        if self.self_powered {
            write!(f, " SelfPowered")?;
        }
        if self.remote_wakeup {
            write!(f, " RemoteWakeup")?;
        }
        writeln!(f)?;
        writeln!(f, "Max Power: {}mA", self.max_power)?;
        for iface in &self.interfaces {
            write!(f, "{}", iface)?;
            for ep in &iface.endpoints {
                write!(f, "{}", ep)?;
            }
        }
        Ok(())
    }
}

/// One line summary; endpoints are printed by the owning configuration.
impl Display for InterfaceInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "-- Interface {} Class: {} -> Subclass: 0x{:02x} -> Protocol: 0x{:02x}, {} Endpoints",
            self.id,
            name_for_class(self.interface_class),
            self.interface_subclass,
            self.interface_protocol,
            self.endpoint_count
        )
    }
}
