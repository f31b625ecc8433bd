//! Coarse device summaries built from metadata the host stack already enumerated,
//! without any descriptor transfer.

use core::fmt::{self, Display, Formatter};

use crate::{name_for_class, InterfaceInfo};

/// A device as listed by the host USB stack.
pub trait EnumeratedDevice {
    type Interface: EnumeratedInterface;

    /// Host specific device name, e.g. a bus path
    fn name(&self) -> &str;
    fn class(&self) -> u8;
    fn subclass(&self) -> u8;
    fn protocol(&self) -> u8;
    fn interface_count(&self) -> usize;
    fn interface(&self, index: usize) -> Option<Self::Interface>;
}

pub trait EnumeratedInterface {
    fn id(&self) -> u8;
    fn class(&self) -> u8;
    fn subclass(&self) -> u8;
    fn protocol(&self) -> u8;
    fn endpoint_count(&self) -> u8;
}

impl EnumeratedInterface for &InterfaceInfo {
    fn id(&self) -> u8 {
        self.id
    }

    fn class(&self) -> u8 {
        self.interface_class
    }

    fn subclass(&self) -> u8 {
        self.interface_subclass
    }

    fn protocol(&self) -> u8 {
        self.interface_protocol
    }

    fn endpoint_count(&self) -> u8 {
        self.endpoint_count
    }
}

/// Renders name, class triple and interfaces of one enumerated device.
pub struct DeviceSummary<'a, D: ?Sized>(pub &'a D);

impl<D: EnumeratedDevice + ?Sized> Display for DeviceSummary<'_, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let dev = self.0;
        writeln!(f, "Device Name: {}", dev.name())?;
        writeln!(
            f,
            "Device Class: {} -> Subclass: 0x{:02x} -> Protocol: 0x{:02x}",
            name_for_class(dev.class()),
            dev.subclass(),
            dev.protocol()
        )?;
        for iface in (0..dev.interface_count()).filter_map(|i| dev.interface(i)) {
            writeln!(
                f,
                "-- Interface {} Class: {} -> Subclass: 0x{:02x} -> Protocol: 0x{:02x}",
                iface.id(),
                name_for_class(iface.class()),
                iface.subclass(),
                iface.protocol()
            )?;
            writeln!(f, "   -- Endpoint Count: {}", iface.endpoint_count())?;
        }
        Ok(())
    }
}

/// Renders every currently connected device.
pub struct DeviceList<'a, D>(pub &'a [D]);

impl<D: EnumeratedDevice> Display for DeviceList<'_, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "No Devices Currently Connected");
        }
        write!(f, "Connected Device Count: {}\n\n", self.0.len())?;
        for dev in self.0 {
            write!(f, "{}\n\n", DeviceSummary(dev))?;
        }
        Ok(())
    }
}
