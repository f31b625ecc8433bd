//! Descriptor type tags and fixed sizes
//!
//! cf §9.5 and table 9-5 of USB 2.0

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DescriptorType {
    Device = 1,
    Configuration = 2,
    String = 3,
    Interface = 4,
    Endpoint = 5,
    DeviceQualifier = 6,
    OtherSpeed = 7,
    InterfacePower = 8,
}

impl DescriptorType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Device => "device",
            Self::Configuration => "configuration",
            Self::String => "string",
            Self::Interface => "interface",
            Self::Endpoint => "endpoint",
            Self::DeviceQualifier => "device qualifier",
            Self::OtherSpeed => "other speed configuration",
            Self::InterfacePower => "interface power",
        }
    }

    /// Fixed `bLength` of the descriptors this crate decodes.
    pub fn fixed_len(self) -> Option<u8> {
        match self {
            Self::Device => Some(DEVICE_DESCRIPTOR_LEN),
            Self::Configuration => Some(CONFIGURATION_DESCRIPTOR_LEN),
            Self::Interface => Some(INTERFACE_DESCRIPTOR_LEN),
            Self::Endpoint => Some(ENDPOINT_DESCRIPTOR_LEN),
            _ => None,
        }
    }
}

pub const DEVICE_DESCRIPTOR_LEN: u8 = 18;
pub const CONFIGURATION_DESCRIPTOR_LEN: u8 = 9;
pub const INTERFACE_DESCRIPTOR_LEN: u8 = 9;
pub const ENDPOINT_DESCRIPTOR_LEN: u8 = 7;

/// `bmAttributes` bits of a configuration descriptor
pub const ATTR_BUS_POWERED: u8 = 0x80;
pub const ATTR_SELF_POWERED: u8 = 0x40;
pub const ATTR_REMOTE_WAKEUP: u8 = 0x20;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn type_tags() {
        assert_eq!(Some(DescriptorType::Device), DescriptorType::from_repr(0x01));
        assert_eq!(Some(DescriptorType::Configuration), DescriptorType::from_repr(0x02));
        assert_eq!(Some(DescriptorType::Interface), DescriptorType::from_repr(0x04));
        assert_eq!(Some(DescriptorType::Endpoint), DescriptorType::from_repr(0x05));
        assert_eq!(None, DescriptorType::from_repr(0x21));
    }

    #[test]
    fn fixed_lengths() {
        assert_eq!(Some(18), DescriptorType::Device.fixed_len());
        assert_eq!(Some(9), DescriptorType::Configuration.fixed_len());
        assert_eq!(Some(9), DescriptorType::Interface.fixed_len());
        assert_eq!(Some(7), DescriptorType::Endpoint.fixed_len());
        assert_eq!(None, DescriptorType::String.fixed_len());
    }
}
