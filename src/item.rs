use std::collections::BTreeMap;
use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;
use url::Url;

use crate::asset::ItemAsset;
use crate::error::{Error, Result};

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Link {
    pub rel: String,
    pub href: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

/// A single catalog record: identifier, geometry, bounding box, an open
/// property bag, links, and a keyed asset mapping. Extension-namespaced
/// property keys stay in the bag verbatim; a typed view over them is the
/// job of [`crate::EOItem`].
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Item {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stac_extensions: Option<Vec<String>>,
    pub geometry: Value,
    pub bbox: [f64; 4],
    pub properties: Map<String, Value>,
    pub links: Vec<Link>,
    pub assets: BTreeMap<String, ItemAsset>,
    #[serde(flatten)]
    pub additional_fields: Map<String, Value>,
}

impl Item {
    /// Decodes an item from its dict form. Fails on the first missing or
    /// malformed required field; no partial item is ever returned.
    pub fn from_dict(d: Value) -> Result<Self> {
        let mut item: Item = serde_json::from_value(d).map_err(Error::Validation)?;
        item.claim_assets();
        Ok(item)
    }

    /// Reads an item from a local path or an http(s) href.
    pub fn from_file(href: &str) -> Result<Self> {
        Self::from_dict(read_json(href)?)
    }

    pub fn to_dict(&self) -> Result<Value> {
        let d = serde_json::to_value(self)?;
        Ok(d)
    }

    pub fn get_assets(&self) -> &BTreeMap<String, ItemAsset> {
        &self.assets
    }

    /// Inserts `asset` under `key`, replacing any previous asset at that
    /// key, and records this item as its owner.
    pub fn add_asset(&mut self, key: &str, asset: impl Into<ItemAsset>) {
        let mut asset = asset.into();
        asset.claim(&self.id);
        self.assets.insert(key.to_string(), asset);
    }

    /// Href of the `self` link, when the item carries one.
    pub fn get_self_href(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == "self")
            .map(|link| link.href.as_str())
    }

    fn claim_assets(&mut self) {
        let id = self.id.clone();
        for asset in self.assets.values_mut() {
            asset.claim(&id);
        }
    }
}

/// Fetches the JSON document behind `href`: a single blocking read of a
/// local file, or an http(s) GET for remote hrefs.
pub(crate) fn read_json(href: &str) -> Result<Value> {
    match Url::parse(href) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            debug!("Fetching remote item: {url}");
            let value = reqwest::blocking::get(url)?.json()?;
            Ok(value)
        }
        _ => {
            debug!("Reading item from file: {href}");
            let content = fs::read_to_string(href)?;
            serde_json::from_str(&content).map_err(Error::Validation)
        }
    }
}
