use anyhow::{bail, Result};

use super::WasteData;

pub const ALERT_CONTACT: &str = "6281234567890";
pub const ALERT_MESSAGE: &str = "Tempat sampah sudah penuh, mohon segera dikosongkan!";

/// WhatsApp deep link asking someone to empty the bin.
///
/// Only available while the gauge reads full.
pub fn full_alert_link(data: &WasteData, contact: &str, message: &str) -> Result<String> {
    if !data.is_full() {
        bail!(
            "bin is only {:.0}% full; the alert needs at least 80%",
            data.fill_percentage()
        );
    }

    Ok(format!(
        "https://wa.me/{contact}?text={}",
        urlencoding::encode(message)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_the_message() {
        let link = full_alert_link(&WasteData::default(), ALERT_CONTACT, ALERT_MESSAGE).unwrap();
        assert_eq!(
            link,
            "https://wa.me/6281234567890?text=Tempat%20sampah%20sudah%20penuh%2C%20mohon%20segera%20dikosongkan%21"
        );
    }

    #[test]
    fn refuses_while_not_full() {
        let data = WasteData {
            plastic_kg: 0.0,
            ..WasteData::default()
        };
        assert!(full_alert_link(&data, ALERT_CONTACT, ALERT_MESSAGE).is_err());
    }
}
