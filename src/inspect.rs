//! Descriptor reads over a `ControlTransfer` pipe, and the combined device report.

use core::fmt::{self, Debug, Display, Formatter};

use crate::{
    decode_configuration, decode_device, header_length, ConfigurationDescriptor, ControlTransfer, DescriptorError,
    DescriptorType, DeviceDescriptor, SetupPacket, CONFIGURATION_DESCRIPTOR_LEN, DEFAULT_TIMEOUT_MS,
    DEVICE_DESCRIPTOR_LEN,
};

/// Errors that can be generated when reading a descriptor from a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError<E> {
    /// The control transfer itself failed
    Transport(E),

    /// The device answered with bytes that do not decode
    Descriptor(DescriptorError),

    /// The configuration descriptor set is larger than the caller's buffer
    BufferTooSmall { required: usize },
}

impl<E> From<DescriptorError> for ReadError<E> {
    fn from(err: DescriptorError) -> Self {
        Self::Descriptor(err)
    }
}

impl<E: Debug> Display for ReadError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "Control transfer failed: {:?}", err),
            Self::Descriptor(err) => write!(f, "{}", err),
            Self::BufferTooSmall { required } => write!(f, "Device config larger than buffer ({} bytes)", required),
        }
    }
}

/// Read and decode the device descriptor.
pub fn read_device_descriptor<H>(host: &mut H) -> Result<DeviceDescriptor, ReadError<H::Error>>
where
    H: ControlTransfer + ?Sized,
{
    let mut buf = [0u8; DEVICE_DESCRIPTOR_LEN as usize];
    let len = get_descriptor(host, DescriptorType::Device, 0, &mut buf)?;
    Ok(decode_device(&buf[..len])?)
}

/// Read and decode configuration `cfg_idx` with its interfaces and endpoints.
///
/// The total length is only known from the configuration header,
/// so the header is fetched first, then the whole set into `buf`.
pub fn read_configuration_descriptor<H>(
    host: &mut H,
    cfg_idx: u8,
    buf: &mut [u8],
) -> Result<ConfigurationDescriptor, ReadError<H::Error>>
where
    H: ControlTransfer + ?Sized,
{
    let mut header = [0u8; CONFIGURATION_DESCRIPTOR_LEN as usize];
    let len = get_descriptor(host, DescriptorType::Configuration, cfg_idx, &mut header)?;
    let total_len = usize::from(header_length(&header[..len])?);

    let buf = buf
        .get_mut(..total_len)
        .ok_or(ReadError::<H::Error>::BufferTooSmall { required: total_len })?;
    let len = get_descriptor(host, DescriptorType::Configuration, cfg_idx, buf)?;
    Ok(decode_configuration(&buf[..len])?)
}

fn get_descriptor<H>(host: &mut H, desc_type: DescriptorType, desc_index: u8, buf: &mut [u8]) -> Result<usize, ReadError<H::Error>>
where
    H: ControlTransfer + ?Sized,
{
    // descriptor sets are capped at 64k by wTotalLength
    let w_length = u16::try_from(buf.len()).unwrap_or(u16::MAX);
    let setup = SetupPacket::get_descriptor(desc_type, desc_index, w_length);
    let len = host
        .control_transfer(setup, buf, DEFAULT_TIMEOUT_MS)
        .map_err(ReadError::Transport)?;
    // some transports report more than fits in buf
    Ok(len.min(buf.len()))
}

/// Device and first configuration of an opened device.
///
/// A section that could not be read is kept as its error
/// and rendered as unavailable, the other section still prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDetails<E> {
    pub device: Result<DeviceDescriptor, ReadError<E>>,
    pub configuration: Result<ConfigurationDescriptor, ReadError<E>>,
}

impl<E: Debug> DeviceDetails<E> {
    /// `buf` receives the full configuration descriptor set.
    pub fn read<H>(host: &mut H, buf: &mut [u8]) -> Self
    where
        H: ControlTransfer<Error = E> + ?Sized,
    {
        let device = read_device_descriptor(host);
        if let Err(err) = &device {
            log_unavailable("Device", err);
        }
        let configuration = read_configuration_descriptor(host, 0, buf);
        if let Err(err) = &configuration {
            log_unavailable("Configuration", err);
        }
        Self { device, configuration }
    }
}

fn log_unavailable<E>(section: &str, err: &ReadError<E>) {
    match err {
        ReadError::Transport(_) => warn!("USB {} Descriptor unavailable: transfer failed", section),
        ReadError::Descriptor(err) => warn!("USB {} Descriptor unavailable: {:?}", section, err),
        ReadError::BufferTooSmall { required } => {
            warn!("USB {} Descriptor unavailable: needs {} bytes", section, required)
        }
    }
}

impl<E: Debug> Display for DeviceDetails<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.device {
            Ok(desc) => write!(f, "{}", desc)?,
            Err(err) => writeln!(f, "Device Descriptor unavailable: {}", err)?,
        }
        writeln!(f)?;
        match &self.configuration {
            Ok(desc) => write!(f, "{}", desc),
            Err(err) => writeln!(f, "Configuration Descriptor unavailable: {}", err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::vec::Vec;

    const DEVICE: [u8; 18] = [
        18, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x40, 0x83, 0x04, 0x40, 0x57, 0x00, 0x02, 0x01, 0x02, 0x03, 0x01,
    ];

    const CONFIG: [u8; 32] = [
        0x09, 0x02, 0x20, 0x00, 0x01, 0x01, 0x00, 0xc0, 0x32, //
        0x09, 0x04, 0x00, 0x00, 0x02, 0x08, 0x06, 0x50, 0x00, //
        0x07, 0x05, 0x81, 0x02, 0x40, 0x00, 0x00, //
        0x07, 0x05, 0x02, 0x02, 0x40, 0x00, 0x00,
    ];

    /// Answers GET_DESCRIPTOR from canned bytes, like a device would, and records every request
    struct FakeDevice {
        device: Vec<u8>,
        config: Vec<u8>,
        /// bytes returned for the full configuration read, if shorter than asked
        short_config: Option<usize>,
        requests: Vec<SetupPacket>,
    }

    impl FakeDevice {
        fn new() -> Self {
            Self { device: DEVICE.to_vec(), config: CONFIG.to_vec(), short_config: None, requests: Vec::new() }
        }
    }

    impl ControlTransfer for FakeDevice {
        type Error = &'static str;

        fn control_transfer(&mut self, setup: SetupPacket, buf: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error> {
            assert_eq!(DEFAULT_TIMEOUT_MS, timeout_ms);
            assert_eq!(usize::from(setup.w_length), buf.len());
            self.requests.push(setup);
            let src = match DescriptorType::from_repr(setup.w_value.w_value_hi()) {
                Some(DescriptorType::Device) => &self.device[..],
                Some(DescriptorType::Configuration) => match self.short_config {
                    Some(n) if buf.len() > 9 => &self.config[..n],
                    _ => &self.config[..],
                },
                _ => return Err("stall"),
            };
            let len = src.len().min(buf.len());
            buf[..len].copy_from_slice(&src[..len]);
            Ok(len)
        }
    }

    #[test]
    fn device_read() {
        let mut dev = FakeDevice::new();
        let desc = read_device_descriptor(&mut dev).unwrap();
        assert_eq!(0x0483, desc.vendor_id);
        assert_eq!(0x5740, desc.product_id);
        assert_eq!(64, desc.max_packet_size);
        assert_eq!(&[SetupPacket::get_descriptor(DescriptorType::Device, 0, 18)][..], &dev.requests[..]);
    }

    #[test]
    fn configuration_two_phase_read() {
        let mut dev = FakeDevice::new();
        let mut buf = [0u8; 256];
        let config = read_configuration_descriptor(&mut dev, 0, &mut buf).unwrap();

        let lengths: Vec<u16> = dev.requests.iter().map(|sp| sp.w_length).collect();
        assert_eq!(std::vec![9, 32], lengths);
        assert!(dev.requests.iter().all(|sp| u16::from(sp.w_value) == 0x0200));
        assert_eq!(1, config.interfaces.len());
        assert_eq!(2, config.interfaces[0].endpoints.len());
        assert!(config.self_powered);
    }

    #[test]
    fn configuration_larger_than_buffer() {
        let mut dev = FakeDevice::new();
        let mut buf = [0u8; 16];
        assert_eq!(
            Err(ReadError::BufferTooSmall { required: 32 }),
            read_configuration_descriptor(&mut dev, 0, &mut buf)
        );
        assert_eq!(1, dev.requests.len());
    }

    #[test]
    fn configuration_short_second_read() {
        let mut dev = FakeDevice::new();
        dev.short_config = Some(25);
        let mut buf = [0u8; 256];
        assert_eq!(
            Err(ReadError::Descriptor(DescriptorError::TruncatedDescriptor { at: 25 })),
            read_configuration_descriptor(&mut dev, 0, &mut buf)
        );
    }

    #[test]
    fn invalid_configuration_header() {
        let mut dev = FakeDevice::new();
        dev.config[1] = 0x04;
        let mut buf = [0u8; 256];
        assert_eq!(
            Err(ReadError::Descriptor(DescriptorError::InvalidHeader { expected: DescriptorType::Configuration })),
            read_configuration_descriptor(&mut dev, 0, &mut buf)
        );
        assert_eq!(1, dev.requests.len());
    }

    #[test]
    fn closure_transport() {
        let mut stall = |_: SetupPacket, _: &mut [u8], _: u32| -> Result<usize, u8> { Err(0x04) };
        assert_eq!(Err(ReadError::Transport(0x04)), read_device_descriptor(&mut stall));

        let mut answer = |_: SetupPacket, buf: &mut [u8], _: u32| -> Result<usize, u8> {
            buf.copy_from_slice(&DEVICE);
            Ok(18)
        };
        assert_eq!(0x0483, read_device_descriptor(&mut answer).unwrap().vendor_id);
    }

    #[test]
    fn transport_claiming_too_many_bytes() {
        let mut liar = |_: SetupPacket, buf: &mut [u8], _: u32| -> Result<usize, ()> {
            buf.copy_from_slice(&DEVICE);
            Ok(1000)
        };
        assert!(read_device_descriptor(&mut liar).is_ok());
    }

    #[test]
    fn details_render() {
        let mut dev = FakeDevice::new();
        let mut buf = [0u8; 256];
        let details = DeviceDetails::read(&mut dev, &mut buf);
        let text = format!("{}", details);
        assert!(text.starts_with("Device Descriptor:\n"));
        assert!(text.contains("PID: 0x5740\n\nConfiguration Descriptor:\n"));
        assert!(text.ends_with("   -- Endpoint 2, Bulk OUT, 64 byte packets\n"));
        assert_eq!(text, format!("{}", details));
    }

    #[test]
    fn details_keep_going_after_failure() {
        let mut dev = FakeDevice::new();
        dev.device[0] = 0x12 + 1;
        let mut buf = [0u8; 256];
        let details = DeviceDetails::read(&mut dev, &mut buf);
        assert!(details.device.is_err());
        assert!(details.configuration.is_ok());
        let text = format!("{}", details);
        assert!(text.starts_with("Device Descriptor unavailable: Invalid device descriptor header\n\nConfiguration Descriptor:\n"));
    }
}
