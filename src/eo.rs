use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Number, Value};

use crate::asset::{EOAsset, ItemAsset};
use crate::band::Band;
use crate::error::{Error, Result};
use crate::item::{read_json, Item};

/// Prefix marking a properties key as owned by the EO extension. Any key
/// starting with it belongs to the extension.
pub const EO_PREFIX: &str = "eo:";

/// The declared field set the projection moves between the property bag
/// and typed attributes.
pub const EO_FIELDS: [&str; 11] = [
    "gsd",
    "platform",
    "instrument",
    "bands",
    "constellation",
    "epsg",
    "cloud_cover",
    "off_nadir",
    "azimuth",
    "sun_azimuth",
    "sun_elevation",
];

/// Namespaces a field name into its EO properties key.
pub fn eo_key(field: &str) -> String {
    format!("{EO_PREFIX}{field}")
}

/// A typed EO view over an [`Item`]. Numeric attributes keep their exact
/// JSON number representation so the dict form survives a round trip
/// unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct EOItem {
    pub item: Item,
    pub gsd: Option<Number>,
    pub platform: Option<String>,
    pub instrument: Option<String>,
    pub bands: Option<Vec<Band>>,
    pub constellation: Option<String>,
    pub epsg: Option<i64>,
    pub cloud_cover: Option<Number>,
    pub off_nadir: Option<Number>,
    pub azimuth: Option<Number>,
    pub sun_azimuth: Option<Number>,
    pub sun_elevation: Option<Number>,
}

impl EOItem {
    /// Decodes the dict as a generic item, then materializes every EO
    /// field by removing its namespaced key from the property bag. The
    /// resulting view's bag holds no key for a materialized field.
    pub fn from_dict(d: Value) -> Result<Self> {
        let item = Item::from_dict(d)?;
        project(item, true)
    }

    /// Derives a typed view from an already decoded item by reading its
    /// namespaced keys without removing them. The snapshot is a deep copy;
    /// later mutation of `item` is not observed.
    pub fn from_item(item: &Item) -> Result<Self> {
        project(item.clone(), false)
    }

    /// Reads an EO item from a local path or an http(s) href.
    pub fn from_file(href: &str) -> Result<Self> {
        Self::from_dict(read_json(href)?)
    }

    /// Serializes the backing item, then overlays the EO fields back into
    /// its `properties` sub-mapping under their namespaced keys.
    pub fn to_dict(&self) -> Result<Value> {
        let mut d = self.item.to_dict()?;
        if let Some(properties) = d.get_mut("properties").and_then(Value::as_object_mut) {
            self.add_eo_fields_to_dict(properties);
        }
        Ok(d)
    }

    /// Writes every currently set EO attribute into `d` under its
    /// namespaced key. Unset attributes write nothing.
    pub fn add_eo_fields_to_dict(&self, d: &mut Map<String, Value>) {
        if let Some(gsd) = &self.gsd {
            d.insert(eo_key("gsd"), Value::Number(gsd.clone()));
        }
        if let Some(platform) = &self.platform {
            d.insert(eo_key("platform"), Value::String(platform.clone()));
        }
        if let Some(instrument) = &self.instrument {
            d.insert(eo_key("instrument"), Value::String(instrument.clone()));
        }
        if let Some(bands) = &self.bands {
            let bands = serde_json::to_value(bands).expect("band encoding cannot fail");
            d.insert(eo_key("bands"), bands);
        }
        if let Some(constellation) = &self.constellation {
            d.insert(eo_key("constellation"), Value::String(constellation.clone()));
        }
        if let Some(epsg) = self.epsg {
            d.insert(eo_key("epsg"), Value::from(epsg));
        }
        if let Some(cloud_cover) = &self.cloud_cover {
            d.insert(eo_key("cloud_cover"), Value::Number(cloud_cover.clone()));
        }
        if let Some(off_nadir) = &self.off_nadir {
            d.insert(eo_key("off_nadir"), Value::Number(off_nadir.clone()));
        }
        if let Some(azimuth) = &self.azimuth {
            d.insert(eo_key("azimuth"), Value::Number(azimuth.clone()));
        }
        if let Some(sun_azimuth) = &self.sun_azimuth {
            d.insert(eo_key("sun_azimuth"), Value::Number(sun_azimuth.clone()));
        }
        if let Some(sun_elevation) = &self.sun_elevation {
            d.insert(eo_key("sun_elevation"), Value::Number(sun_elevation.clone()));
        }
    }

    /// The full asset mapping, plain and EO aware mixed.
    pub fn get_assets(&self) -> &BTreeMap<String, ItemAsset> {
        self.item.get_assets()
    }

    /// The subset of the asset mapping that is EO aware.
    pub fn get_eo_assets(&self) -> BTreeMap<&str, &EOAsset> {
        self.item
            .assets
            .iter()
            .filter_map(|(key, asset)| asset.as_eo().map(|eo| (key.as_str(), eo)))
            .collect()
    }

    pub fn add_asset(&mut self, key: &str, asset: impl Into<ItemAsset>) {
        self.item.add_asset(key, asset);
    }

    pub fn get_self_href(&self) -> Option<&str> {
        self.item.get_self_href()
    }
}

// Both construction paths run through here; `take` decides whether the
// namespaced keys are removed from the bag or only read.
fn project(mut item: Item, take: bool) -> Result<EOItem> {
    let mut field = |name: &str| -> Option<Value> {
        let key = eo_key(name);
        if take {
            item.properties.remove(&key)
        } else {
            item.properties.get(&key).cloned()
        }
    };

    let gsd = field("gsd");
    let platform = field("platform");
    let instrument = field("instrument");
    let bands = field("bands");
    let constellation = field("constellation");
    let epsg = field("epsg");
    let cloud_cover = field("cloud_cover");
    let off_nadir = field("off_nadir");
    let azimuth = field("azimuth");
    let sun_azimuth = field("sun_azimuth");
    let sun_elevation = field("sun_elevation");

    let bands: Option<Vec<Band>> = decode::<Vec<Band>>(bands)?.map(|bands| {
        bands
            .into_iter()
            .map(|mut band| {
                band.derive_description();
                band
            })
            .collect()
    });

    Ok(EOItem {
        gsd: decode(gsd)?,
        platform: decode(platform)?,
        instrument: decode(instrument)?,
        bands,
        constellation: decode(constellation)?,
        epsg: decode(epsg)?,
        cloud_cover: decode(cloud_cover)?,
        off_nadir: decode(off_nadir)?,
        azimuth: decode(azimuth)?,
        sun_azimuth: decode(sun_azimuth)?,
        sun_elevation: decode(sun_elevation)?,
        item,
    })
}

fn decode<T: DeserializeOwned>(value: Option<Value>) -> Result<Option<T>> {
    value
        .map(serde_json::from_value)
        .transpose()
        .map_err(Error::Validation)
}
