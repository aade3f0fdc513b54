//! Result view formatting
//!
//! Each decoded symbol is turned into the multi-line summary shown in the
//! result text field. Missing fields print as `null`.

use crate::models::{DecodedSymbol, EncryptionType, SymbolPayload};
use tracing::debug;

const MISSING: &str = "null";

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING)
}

/// Label for a raw Wi-Fi encryption code
///
/// 1, 2 and 3 become `OPEN`, `WPA` and `WEP`; anything else is printed as is.
pub fn encryption_label(code: Option<i32>) -> String {
    match code {
        Some(code) => EncryptionType::from_code(code)
            .map(|e| e.label().to_string())
            .unwrap_or_else(|| code.to_string()),
        None => MISSING.to_string(),
    }
}

/// Format a single symbol
pub fn render_symbol(symbol: &DecodedSymbol) -> String {
    let raw = field(&symbol.raw_value);
    match &symbol.payload {
        SymbolPayload::Wifi(wifi) => format!(
            "TYPE_WIFI \nssid: {} \npassword: {} \nencryptionType: {} \n\nrawValue: {}",
            field(&wifi.ssid),
            field(&wifi.password),
            encryption_label(wifi.encryption_type),
            raw
        ),
        SymbolPayload::Url(bookmark) => format!(
            "TYPE_URL \ntitle: {} \nurl: {} \n\nrawValue: {}",
            field(&bookmark.title),
            field(&bookmark.url),
            raw
        ),
        SymbolPayload::Email(email) => format!(
            "TYPE_EMAIL \naddress: {} \nbody: {} \nsubject: {} \n\nrawValue: {}",
            field(&email.address),
            field(&email.body),
            field(&email.subject),
            raw
        ),
        SymbolPayload::ContactInfo(contact) => {
            let phone = contact.phones.first().map(|p| p.number.as_str()).unwrap_or("");
            format!(
                "TYPE_CONTACT_INFO \ntitle: {} \norganization: {} \nname: {} {} \nphone: {} \n\nrawValue: {}",
                field(&contact.title),
                field(&contact.organization),
                field(&contact.first_name),
                field(&contact.last_name),
                phone,
                raw
            )
        }
        SymbolPayload::Other(_) => format!("rawValue: {} ", raw),
    }
}

/// Render every symbol into `display`, in order
///
/// Each symbol overwrites the previous text, so only the last one remains.
/// An empty list leaves `display` untouched.
pub fn render(symbols: &[DecodedSymbol], display: &mut String) {
    for symbol in symbols {
        debug!(
            value_type = symbol.value_type().label(),
            raw_value = ?symbol.raw_value,
            "rendering symbol"
        );
        *display = render_symbol(symbol);
    }
}
