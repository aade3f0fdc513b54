//! Payload classification for decoded QR text
//!
//! Recognized formats:
//! - `WIFI:S:<ssid>;T:<WPA|WEP|nopass>;P:<password>;;`
//! - `MEBKM:TITLE:<title>;URL:<url>;;` and bare `http(s)://` / `www.` links
//! - `MATMSG:TO:<addr>;SUB:<subject>;BODY:<body>;;` and `mailto:` URIs
//! - `MECARD:N:<last>,<first>;TEL:<n>;ORG:<org>;TITLE:<title>;;` and vCard
//! - `tel:`, `sms:`/`smsto:`, `geo:`, `BEGIN:VEVENT`
//! - ISBN-13 (`978`/`979` + 10 digits) and EAN-8, UPC-A or EAN-13 product numbers
//!
//! Anything else is plain text.

use crate::models::{
    ContactInfo, EmailInfo, EncryptionType, Phone, SymbolPayload, UrlBookmark, ValueType, WifiInfo,
};

/// Classify raw decoded text into a typed payload
pub fn classify(raw: &str) -> SymbolPayload {
    let text = raw.trim();

    if let Some(body) = strip_prefix_ci(text, "WIFI:") {
        return SymbolPayload::Wifi(parse_wifi(body));
    }
    if let Some(body) = strip_prefix_ci(text, "MEBKM:") {
        let fields = split_fields(body);
        return SymbolPayload::Url(UrlBookmark {
            title: field(&fields, "TITLE"),
            url: field(&fields, "URL"),
        });
    }
    if ["http://", "https://", "www."]
        .iter()
        .any(|p| strip_prefix_ci(text, p).is_some())
    {
        return SymbolPayload::Url(UrlBookmark {
            title: None,
            url: Some(text.to_string()),
        });
    }
    if let Some(body) = strip_prefix_ci(text, "MATMSG:") {
        let fields = split_fields(body);
        return SymbolPayload::Email(EmailInfo {
            address: field(&fields, "TO"),
            body: field(&fields, "BODY"),
            subject: field(&fields, "SUB"),
        });
    }
    if let Some(body) = strip_prefix_ci(text, "mailto:") {
        return SymbolPayload::Email(parse_mailto(body));
    }
    if let Some(body) = strip_prefix_ci(text, "MECARD:") {
        return SymbolPayload::ContactInfo(parse_mecard(body));
    }
    if strip_prefix_ci(text, "BEGIN:VCARD").is_some() {
        return SymbolPayload::ContactInfo(parse_vcard(text));
    }

    SymbolPayload::Other(other_value_type(text))
}

fn other_value_type(text: &str) -> ValueType {
    if strip_prefix_ci(text, "tel:").is_some() {
        return ValueType::Phone;
    }
    if strip_prefix_ci(text, "smsto:").is_some() || strip_prefix_ci(text, "sms:").is_some() {
        return ValueType::Sms;
    }
    if strip_prefix_ci(text, "geo:").is_some() {
        return ValueType::Geo;
    }
    if strip_prefix_ci(text, "BEGIN:VEVENT").is_some() {
        return ValueType::CalendarEvent;
    }
    if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
        if text.len() == 13 && (text.starts_with("978") || text.starts_with("979")) {
            return ValueType::Isbn;
        }
        if matches!(text.len(), 8 | 12 | 13) {
            return ValueType::Product;
        }
    }
    ValueType::Text
}

fn strip_prefix_ci<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &text[prefix.len()..])
}

/// Split `KEY:value;KEY:value;;` into pairs, resolving backslash escapes
fn split_fields(body: &str) -> Vec<(String, String)> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut key_end = None;
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ':' if key_end.is_none() => {
                key_end = Some(current.len());
                current.push(c);
            }
            ';' => {
                push_segment(&mut segments, &current, key_end.take());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    push_segment(&mut segments, &current, key_end);

    segments
}

fn push_segment(segments: &mut Vec<(String, String)>, segment: &str, key_end: Option<usize>) {
    if let Some(at) = key_end {
        let key = segment[..at].trim().to_ascii_uppercase();
        let value = segment[at + 1..].to_string();
        segments.push((key, value));
    }
}

fn field(fields: &[(String, String)], key: &str) -> Option<String> {
    fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
}

fn parse_wifi(body: &str) -> WifiInfo {
    let fields = split_fields(body);
    let encryption = match field(&fields, "T") {
        None => EncryptionType::Open.code(),
        Some(t) => {
            let t = t.trim().to_ascii_uppercase();
            if t.is_empty() || t == "NOPASS" {
                EncryptionType::Open.code()
            } else if t.starts_with("WPA") || t == "SAE" {
                EncryptionType::Wpa.code()
            } else if t == "WEP" {
                EncryptionType::Wep.code()
            } else {
                0
            }
        }
    };

    WifiInfo {
        ssid: field(&fields, "S"),
        password: field(&fields, "P"),
        encryption_type: Some(encryption),
    }
}

fn parse_mailto(body: &str) -> EmailInfo {
    let (address, query) = match body.split_once('?') {
        Some((address, query)) => (address, Some(query)),
        None => (body, None),
    };

    let mut email = EmailInfo {
        address: Some(percent_decode(address)),
        ..Default::default()
    };
    for pair in query.into_iter().flat_map(|q| q.split('&')) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match key.to_ascii_lowercase().as_str() {
            "subject" => email.subject = Some(percent_decode(value)),
            "body" => email.body = Some(percent_decode(value)),
            _ => {}
        }
    }
    email
}

/// `%XX` escapes only; `+` is a literal character in `mailto:` URIs
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit() =>
            {
                out.push((hex_value(bytes[i + 1]) << 4) | hex_value(bytes[i + 2]));
                i += 3;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

fn parse_mecard(body: &str) -> ContactInfo {
    let fields = split_fields(body);
    let (last_name, first_name) = match field(&fields, "N") {
        Some(name) => match name.split_once(',') {
            Some((last, first)) => (Some(last.to_string()), Some(first.to_string())),
            None => (Some(name), None),
        },
        None => (None, None),
    };

    ContactInfo {
        title: field(&fields, "TITLE"),
        organization: field(&fields, "ORG"),
        first_name,
        last_name,
        phones: fields
            .iter()
            .filter(|(k, _)| k == "TEL")
            .map(|(_, v)| Phone::new(v.clone()))
            .collect(),
    }
}

fn parse_vcard(text: &str) -> ContactInfo {
    let mut contact = ContactInfo::default();
    let mut formatted_name = None;

    for line in text.lines() {
        let Some((name, value)) = line.trim_end_matches('\r').split_once(':') else {
            continue;
        };
        let name = name.split(';').next().unwrap_or("").trim().to_ascii_uppercase();
        match name.as_str() {
            "N" => {
                let mut parts = value.split(';');
                contact.last_name = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
                contact.first_name = parts.next().filter(|s| !s.is_empty()).map(str::to_string);
            }
            "FN" => formatted_name = Some(value.to_string()),
            "ORG" => contact.organization = value.split(';').next().map(str::to_string),
            "TITLE" => contact.title = Some(value.to_string()),
            "TEL" => contact.phones.push(Phone::new(value)),
            _ => {}
        }
    }

    if contact.first_name.is_none() && contact.last_name.is_none() {
        if let Some(full) = formatted_name {
            let (first, last) = full.split_once(' ').unwrap_or((full.as_str(), ""));
            contact.first_name = Some(first.to_string());
            contact.last_name = (!last.is_empty()).then(|| last.to_string());
        }
    }

    contact
}
