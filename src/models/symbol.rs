use super::Point;
use serde::Serialize;

/// Semantic classification of a decoded payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueType {
    /// Nothing recognizable
    Unknown = 0,
    /// Contact card (MECARD / vCard)
    ContactInfo = 1,
    /// Email message
    Email = 2,
    /// Book number
    Isbn = 3,
    /// Telephone number
    Phone = 4,
    /// Product code
    Product = 5,
    /// Text message
    Sms = 6,
    /// Plain text
    Text = 7,
    /// Bookmark or link
    Url = 8,
    /// Wi-Fi network credentials
    Wifi = 9,
    /// Geographic coordinates
    Geo = 10,
    /// Calendar event
    CalendarEvent = 11,
    /// Driver license data
    DriverLicense = 12,
}

impl ValueType {
    /// Numeric tag code
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Get value type from its numeric tag
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ValueType::Unknown),
            1 => Some(ValueType::ContactInfo),
            2 => Some(ValueType::Email),
            3 => Some(ValueType::Isbn),
            4 => Some(ValueType::Phone),
            5 => Some(ValueType::Product),
            6 => Some(ValueType::Sms),
            7 => Some(ValueType::Text),
            8 => Some(ValueType::Url),
            9 => Some(ValueType::Wifi),
            10 => Some(ValueType::Geo),
            11 => Some(ValueType::CalendarEvent),
            12 => Some(ValueType::DriverLicense),
            _ => None,
        }
    }

    /// Header label used by the result view (`TYPE_WIFI`, ...)
    pub fn label(&self) -> &'static str {
        match self {
            ValueType::Unknown => "TYPE_UNKNOWN",
            ValueType::ContactInfo => "TYPE_CONTACT_INFO",
            ValueType::Email => "TYPE_EMAIL",
            ValueType::Isbn => "TYPE_ISBN",
            ValueType::Phone => "TYPE_PHONE",
            ValueType::Product => "TYPE_PRODUCT",
            ValueType::Sms => "TYPE_SMS",
            ValueType::Text => "TYPE_TEXT",
            ValueType::Url => "TYPE_URL",
            ValueType::Wifi => "TYPE_WIFI",
            ValueType::Geo => "TYPE_GEO",
            ValueType::CalendarEvent => "TYPE_CALENDAR_EVENT",
            ValueType::DriverLicense => "TYPE_DRIVER_LICENSE",
        }
    }
}

/// Symbology of a decoded barcode
///
/// Codes are bit flags, so a set of formats fits in one mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BarcodeFormat {
    /// Unrecognized symbology
    #[default]
    Unknown = 0,
    /// Code 128
    Code128 = 0x0001,
    /// Code 39
    Code39 = 0x0002,
    /// Code 93
    Code93 = 0x0004,
    /// Codabar
    Codabar = 0x0008,
    /// Data Matrix
    DataMatrix = 0x0010,
    /// EAN-13
    Ean13 = 0x0020,
    /// EAN-8
    Ean8 = 0x0040,
    /// Interleaved 2 of 5
    Itf = 0x0080,
    /// QR code
    QrCode = 0x0100,
    /// UPC-A
    UpcA = 0x0200,
    /// UPC-E
    UpcE = 0x0400,
    /// PDF417
    Pdf417 = 0x0800,
    /// Aztec
    Aztec = 0x1000,
}

impl BarcodeFormat {
    /// Bit flag code, 0 for unknown
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Linear (1D) symbologies
    pub fn is_linear(&self) -> bool {
        matches!(
            self,
            BarcodeFormat::Code128
                | BarcodeFormat::Code39
                | BarcodeFormat::Code93
                | BarcodeFormat::Codabar
                | BarcodeFormat::Ean13
                | BarcodeFormat::Ean8
                | BarcodeFormat::Itf
                | BarcodeFormat::UpcA
                | BarcodeFormat::UpcE
        )
    }
}

/// Wi-Fi encryption scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionType {
    /// No password
    Open = 1,
    /// WPA family
    Wpa = 2,
    /// Legacy WEP
    Wep = 3,
}

impl EncryptionType {
    /// Get encryption type from its numeric code (1=OPEN, 2=WPA, 3=WEP)
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(EncryptionType::Open),
            2 => Some(EncryptionType::Wpa),
            3 => Some(EncryptionType::Wep),
            _ => None,
        }
    }

    /// Numeric code
    pub fn code(&self) -> i32 {
        *self as i32
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            EncryptionType::Open => "OPEN",
            EncryptionType::Wpa => "WPA",
            EncryptionType::Wep => "WEP",
        }
    }
}

/// Wi-Fi credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WifiInfo {
    /// Network name
    pub ssid: Option<String>,
    /// Network password
    pub password: Option<String>,
    /// Raw encryption code, see [`EncryptionType`]
    pub encryption_type: Option<i32>,
}

/// Bookmark
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UrlBookmark {
    /// Bookmark title
    pub title: Option<String>,
    /// Target URL
    pub url: Option<String>,
}

/// Email message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmailInfo {
    /// Recipient address
    pub address: Option<String>,
    /// Message body
    pub body: Option<String>,
    /// Message subject
    pub subject: Option<String>,
}

/// Phone entry of a contact card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Phone {
    /// Dialable number
    pub number: String,
}

impl Phone {
    /// Create a phone entry
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
        }
    }
}

/// Contact card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    /// Job title
    pub title: Option<String>,
    /// Company
    pub organization: Option<String>,
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Phone numbers in card order
    pub phones: Vec<Phone>,
}

/// Type-specific content of a decoded symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "fields", rename_all = "snake_case")]
pub enum SymbolPayload {
    /// Wi-Fi network
    Wifi(WifiInfo),
    /// Bookmark
    Url(UrlBookmark),
    /// Email
    Email(EmailInfo),
    /// Contact card
    ContactInfo(ContactInfo),
    /// Any type without structured fields
    Other(ValueType),
}

impl SymbolPayload {
    /// Value-type tag of this payload
    pub fn value_type(&self) -> ValueType {
        match self {
            SymbolPayload::Wifi(_) => ValueType::Wifi,
            SymbolPayload::Url(_) => ValueType::Url,
            SymbolPayload::Email(_) => ValueType::Email,
            SymbolPayload::ContactInfo(_) => ValueType::ContactInfo,
            SymbolPayload::Other(value_type) => *value_type,
        }
    }
}

/// One decoded barcode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedSymbol {
    /// Text exactly as encoded
    pub raw_value: Option<String>,
    /// Parsed content
    pub payload: SymbolPayload,
    /// Symbology the text was read from
    pub format: BarcodeFormat,
    /// Corner points in image coordinates, clockwise from top-left
    pub corner_points: Vec<Point>,
}

impl DecodedSymbol {
    /// Create a symbol without location data
    pub fn new(raw_value: Option<String>, payload: SymbolPayload) -> Self {
        Self {
            raw_value,
            payload,
            format: BarcodeFormat::Unknown,
            corner_points: Vec::new(),
        }
    }

    /// Set the symbology
    pub fn with_format(mut self, format: BarcodeFormat) -> Self {
        self.format = format;
        self
    }

    /// Attach corner points
    pub fn with_corners(mut self, corners: Vec<Point>) -> Self {
        self.corner_points = corners;
        self
    }

    /// Value-type tag
    pub fn value_type(&self) -> ValueType {
        self.payload.value_type()
    }
}
