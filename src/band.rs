use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Wavelength range in micrometers for a well-known band common name.
pub fn band_range(common_name: &str) -> Option<(f64, f64)> {
    let range = match common_name {
        "coastal" => (0.40, 0.45),
        "blue" => (0.45, 0.50),
        "green" => (0.50, 0.60),
        "red" => (0.60, 0.70),
        "yellow" => (0.58, 0.62),
        "pan" => (0.50, 0.70),
        "rededge" => (0.70, 0.75),
        "nir" => (0.75, 1.00),
        "nir08" => (0.75, 0.90),
        "nir09" => (0.85, 1.05),
        "cirrus" => (1.35, 1.40),
        "swir16" => (1.55, 1.75),
        "swir22" => (2.10, 2.30),
        "lwir" => (10.5, 12.5),
        "lwir11" => (10.5, 11.5),
        "lwir12" => (11.5, 12.5),
        _ => return None,
    };
    Some(range)
}

/// Builds a readable description for a band common name. Names without a
/// catalog entry get a description without a range.
pub fn band_description(common_name: &str) -> String {
    match band_range(common_name) {
        Some((lo, hi)) => format!(
            "Common name: {}, Range: {} to {}",
            common_name,
            format_wavelength(lo),
            format_wavelength(hi)
        ),
        None => format!("Common name: {}", common_name),
    }
}

// Whole wavelengths keep one decimal so descriptions read "1.0", not "1".
fn format_wavelength(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// A single spectral band. Only fields present in the source fragment are
/// set, and only set fields are written back.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct Band {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_wavelength: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_width_half_max: Option<Number>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Band {
    pub fn new(name: &str) -> Self {
        Band {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Fills `description` from the common name catalog when unset.
    pub fn derive_description(&mut self) {
        if self.description.is_none() {
            if let Some(common_name) = &self.common_name {
                self.description = Some(band_description(common_name));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_band_description() {
        let desc = "Common name: nir, Range: 0.75 to 1.0";
        assert_eq!(band_description("nir"), desc);
        assert_eq!(band_description("uncommon name"), "Common name: uncommon name");
    }

    #[test]
    fn test_band_range() {
        assert_eq!(band_range("pan"), Some((0.50, 0.70)));
        assert_eq!(band_range("uncommon name"), None);
    }

    #[test]
    fn test_derive_description() {
        let mut band = Band::new("B5");
        band.common_name = Some("nir".to_string());
        band.derive_description();
        assert_eq!(
            band.description.as_deref(),
            Some("Common name: nir, Range: 0.75 to 1.0")
        );
    }

    #[test]
    fn test_derive_description_keeps_existing() {
        let mut band = Band::new("B5");
        band.common_name = Some("nir".to_string());
        band.description = Some("Near infrared".to_string());
        band.derive_description();
        assert_eq!(band.description.as_deref(), Some("Near infrared"));
    }

    #[test]
    fn test_encode_skips_absent_fields() {
        let band = Band::new("B8");
        let d = serde_json::to_value(&band).unwrap();
        assert_eq!(d, json!({"name": "B8"}));
    }

    #[test]
    fn test_decode_encode_fidelity() {
        let d = json!({
            "name": "B2",
            "common_name": "blue",
            "center_wavelength": 0.48,
            "full_width_half_max": 0.06,
            "description": "Common name: blue, Range: 0.45 to 0.5"
        });
        let band: Band = serde_json::from_value(d.clone()).unwrap();
        assert_eq!(serde_json::to_value(&band).unwrap(), d);
    }
}
