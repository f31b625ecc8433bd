//! USB class constants
//! Used by the name resolver for device and interface class codes

/// USB-IF assigned base class codes
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::FromRepr)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DeviceClass {
    FromInterface = 0x0,
    Audio = 0x01,
    Cdc = 0x02,
    Hid = 0x03,
    Physical = 0x05,
    Imaging = 0x06,
    Printer = 0x07,
    MassStorage = 0x08,
    Hub = 0x09,
    CdcData = 0x0A,
    SmartCard = 0x0B,
    ContentSecurity = 0x0D,
    Video = 0x0E,
    PersonalHealthcare = 0x0F,
    AudioVideo = 0x10,
    Billboard = 0x11,
    UsbTypeCBridge = 0x12,
    I3C = 0x3C,
    Diagnostic = 0xDC,
    WirelessController = 0xE0,
    Misc = 0xEF,
    ApplicationSpecific = 0xFE,
    VendorSpecific = 0xFF,
}

impl DeviceClass {
    pub const fn label(self) -> &'static str {
        match self {
            Self::FromInterface => "(Defined Per Interface)",
            Self::Audio => "Audio",
            Self::Cdc => "Communications",
            Self::Hid => "Human Interface Device",
            Self::Physical => "Physical",
            Self::Imaging => "Still Image",
            Self::Printer => "Printer",
            Self::MassStorage => "Mass Storage",
            Self::Hub => "Hub",
            Self::CdcData => "CDC Data",
            Self::SmartCard => "Content Smart Card",
            Self::ContentSecurity => "Content Security",
            Self::Video => "Video",
            Self::PersonalHealthcare => "Personal Healthcare",
            Self::AudioVideo => "Audio/Video",
            Self::Billboard => "Billboard",
            Self::UsbTypeCBridge => "USB Type-C Bridge",
            Self::I3C => "I3C",
            Self::Diagnostic => "Diagnostic",
            Self::WirelessController => "Wireless Controller",
            Self::Misc => "Wireless Miscellaneous",
            Self::ApplicationSpecific => "Application Specific",
            Self::VendorSpecific => "Vendor Specific",
        }
    }

    /// Classes whose label is followed by the raw code when displayed
    pub const fn shows_code(self) -> bool {
        matches!(self, Self::ApplicationSpecific | Self::VendorSpecific)
    }
}
