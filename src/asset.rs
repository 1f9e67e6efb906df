use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// Fragment key marking an asset as EO aware.
const BANDS_KEY: &str = "eo:bands";

/// A named file or resource reference attached to an item. Fragment keys
/// outside the typed set ride along in `additional_fields`.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Asset {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
    /// Id of the owning item. Set when the asset enters an item's asset
    /// mapping, never serialized.
    #[serde(skip)]
    pub owner: Option<String>,
}

impl Asset {
    pub fn new(href: &str) -> Self {
        Asset {
            href: href.to_string(),
            title: None,
            media_type: None,
            additional_fields: Map::new(),
            owner: None,
        }
    }
}

/// An asset carrying indices into the owning item's band list.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct EOAsset {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(rename = "eo:bands")]
    pub bands: Vec<usize>,
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
    #[serde(skip)]
    pub owner: Option<String>,
}

impl EOAsset {
    pub fn new(href: &str, bands: Vec<usize>) -> Self {
        EOAsset {
            href: href.to_string(),
            title: None,
            media_type: None,
            bands,
            additional_fields: Map::new(),
            owner: None,
        }
    }
}

/// An entry in an item's asset mapping. An asset is EO aware iff it is the
/// `Eo` variant.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum ItemAsset {
    Plain(Asset),
    Eo(EOAsset),
}

impl ItemAsset {
    pub fn href(&self) -> &str {
        match self {
            ItemAsset::Plain(asset) => &asset.href,
            ItemAsset::Eo(asset) => &asset.href,
        }
    }

    pub fn owner(&self) -> Option<&str> {
        match self {
            ItemAsset::Plain(asset) => asset.owner.as_deref(),
            ItemAsset::Eo(asset) => asset.owner.as_deref(),
        }
    }

    pub fn is_eo(&self) -> bool {
        matches!(self, ItemAsset::Eo(_))
    }

    pub fn as_eo(&self) -> Option<&EOAsset> {
        match self {
            ItemAsset::Eo(asset) => Some(asset),
            ItemAsset::Plain(_) => None,
        }
    }

    pub(crate) fn claim(&mut self, owner_id: &str) {
        let owner = match self {
            ItemAsset::Plain(asset) => &mut asset.owner,
            ItemAsset::Eo(asset) => &mut asset.owner,
        };
        *owner = Some(owner_id.to_string());
    }
}

impl From<Asset> for ItemAsset {
    fn from(asset: Asset) -> Self {
        ItemAsset::Plain(asset)
    }
}

impl From<EOAsset> for ItemAsset {
    fn from(asset: EOAsset) -> Self {
        ItemAsset::Eo(asset)
    }
}

// The variant is resolved here, once, by presence of the band index key.
// A fragment that carries the key but fails to decode as an EO asset is an
// error, not a plain asset.
impl<'de> Deserialize<'de> for ItemAsset {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.get(BANDS_KEY).is_some() {
            EOAsset::deserialize(value)
                .map(ItemAsset::Eo)
                .map_err(de::Error::custom)
        } else {
            Asset::deserialize(value)
                .map(ItemAsset::Plain)
                .map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classification() {
        let d = json!({"href": "B4.TIF", "eo:bands": [3]});
        let asset: ItemAsset = serde_json::from_value(d).unwrap();
        assert!(asset.is_eo());
        assert_eq!(asset.as_eo().unwrap().bands, vec![3]);

        let d = json!({"href": "thumb.jpg", "type": "image/jpeg"});
        let asset: ItemAsset = serde_json::from_value(d).unwrap();
        assert!(!asset.is_eo());
        assert!(asset.as_eo().is_none());
    }

    #[test]
    fn test_malformed_band_indices() {
        let d = json!({"href": "B4.TIF", "eo:bands": ["red"]});
        let result: Result<ItemAsset, _> = serde_json::from_value(d);
        assert!(result.is_err());
    }

    #[test]
    fn test_owner_starts_unset() {
        let asset = Asset::new("/asset_dir/asset.json");
        assert_eq!(asset.owner, None);
        let eo_asset = EOAsset::new("/asset_dir/eo_asset.json", vec![0, 1]);
        assert_eq!(eo_asset.owner, None);
    }

    #[test]
    fn test_encode_skips_absent_fields() {
        let asset = Asset::new("thumb.jpg");
        let d = serde_json::to_value(&asset).unwrap();
        assert_eq!(d, json!({"href": "thumb.jpg"}));
    }

    #[test]
    fn test_additional_fields_round_trip() {
        let d = json!({
            "href": "B4.TIF",
            "type": "image/x.geotiff",
            "eo:bands": [3],
            "file:checksum": "deadbeef"
        });
        let asset: ItemAsset = serde_json::from_value(d.clone()).unwrap();
        assert_eq!(
            asset.as_eo().unwrap().additional_fields["file:checksum"],
            json!("deadbeef")
        );
        assert_eq!(serde_json::to_value(&asset).unwrap(), d);
    }
}
