use core::fmt::{self, Display, Formatter};

use crate::reader::Reader;
use crate::{name_for_class, DescriptorError, DescriptorType, DEVICE_DESCRIPTOR_LEN};

/// The top-level descriptor of a USB device.
///
/// cf §9.6.1 of USB 2.0
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceDescriptor {
    pub device_class: u8,
    pub device_subclass: u8,
    pub device_protocol: u8,
    /// Max packet size of the default control pipe
    pub max_packet_size: u8,
    pub vendor_id: u16,
    pub product_id: u16,
}

/// Decode an 18 byte device descriptor.
pub fn decode_device(buf: &[u8]) -> Result<DeviceDescriptor, DescriptorError> {
    let r = Reader::new(buf);
    r.expect_header(DescriptorType::Device)?;
    if r.len() < DEVICE_DESCRIPTOR_LEN as usize {
        return Err(DescriptorError::TruncatedDescriptor { at: r.len() });
    }

    let desc = DeviceDescriptor {
        device_class: r.u8_at(4)?,
        device_subclass: r.u8_at(5)?,
        device_protocol: r.u8_at(6)?,
        max_packet_size: r.u8_at(7)?,
        vendor_id: r.u16_at(8)?,
        product_id: r.u16_at(10)?,
    };
    debug!("USB Device Descriptor {:?}", desc);
    Ok(desc)
}

impl Display for DeviceDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Device Descriptor:")?;
        writeln!(
            f,
            "Device Class: {} -> Subclass: 0x{:02x} -> Protocol: 0x{:02x}",
            name_for_class(self.device_class),
            self.device_subclass,
            self.device_protocol
        )?;
        writeln!(f, "Max Packet Size: {}", self.max_packet_size)?;
        writeln!(f, "VID: 0x{:04x}", self.vendor_id)?;
        writeln!(f, "PID: 0x{:04x}", self.product_id)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const KEYBOARD: [u8; 18] = [
        18, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x08, 0x6d, 0x04, 0x1c, 0xc3, 0x00, 0x49, 0x01, 0x02, 0x00, 0x01,
    ];

    #[test]
    fn decode_documented_offsets() {
        let buf = [18, 1, 0, 2, 0, 0, 0, 8, 0x34, 0x12, 0x78, 0x56, 0, 1, 1, 2, 3, 1];
        let desc = decode_device(&buf).unwrap();
        assert_eq!(
            DeviceDescriptor {
                device_class: 0,
                device_subclass: 0,
                device_protocol: 0,
                max_packet_size: 8,
                vendor_id: 0x1234,
                product_id: 0x5678,
            },
            desc
        );
    }

    #[test]
    fn decode_class_fields() {
        let mut buf = KEYBOARD;
        buf[4] = 0xef;
        buf[5] = 0x02;
        buf[6] = 0x01;
        buf[7] = 64;
        let desc = decode_device(&buf).unwrap();
        assert_eq!(0xef, desc.device_class);
        assert_eq!(0x02, desc.device_subclass);
        assert_eq!(0x01, desc.device_protocol);
        assert_eq!(64, desc.max_packet_size);
        assert_eq!(0x046d, desc.vendor_id);
        assert_eq!(0xc31c, desc.product_id);
    }

    #[test]
    fn trailing_bytes_ignored() {
        let mut buf = [0u8; 32];
        buf[..18].copy_from_slice(&KEYBOARD);
        buf[18] = 0xff;
        assert_eq!(decode_device(&KEYBOARD), decode_device(&buf));
    }

    #[test]
    fn wrong_length_tag() {
        let mut buf = KEYBOARD;
        buf[0] = 17;
        assert_eq!(
            Err(DescriptorError::InvalidHeader { expected: DescriptorType::Device }),
            decode_device(&buf)
        );
    }

    #[test]
    fn wrong_type_tag() {
        let mut buf = KEYBOARD;
        buf[1] = 0x02;
        assert_eq!(
            Err(DescriptorError::InvalidHeader { expected: DescriptorType::Device }),
            decode_device(&buf)
        );
        assert_eq!(
            Err(DescriptorError::InvalidHeader { expected: DescriptorType::Device }),
            decode_device(&[])
        );
    }

    #[test]
    fn short_buffer() {
        assert_eq!(Err(DescriptorError::TruncatedDescriptor { at: 8 }), decode_device(&KEYBOARD[..8]));
    }

    #[test]
    fn render() {
        let desc = decode_device(&KEYBOARD).unwrap();
        let expected = "Device Descriptor:\n\
                        Device Class: (Defined Per Interface) -> Subclass: 0x00 -> Protocol: 0x00\n\
                        Max Packet Size: 8\n\
                        VID: 0x046d\n\
                        PID: 0xc31c\n";
        assert_eq!(expected, format!("{}", desc));
        assert_eq!(format!("{}", desc), format!("{}", desc));
    }

    #[test]
    fn render_vendor_class() {
        let desc = DeviceDescriptor {
            device_class: 0xff,
            device_subclass: 0x42,
            device_protocol: 0x01,
            max_packet_size: 64,
            vendor_id: 0x0483,
            product_id: 0x5740,
        };
        assert!(format!("{}", desc).contains("Device Class: Vendor Specific 0xff -> Subclass: 0x42 -> Protocol: 0x01\n"));
    }
}
