//! Object model for geospatial catalog items carrying Electro-Optical
//! sensor metadata.
//!
//! A generic [`Item`] keeps an open, string-keyed property bag. [`EOItem`]
//! is a typed view over it: construction projects the `eo:` namespaced
//! subset of the bag into typed attributes ([`Band`] lists, sun angles,
//! cloud cover), and [`EOItem::to_dict`] projects them back, leaving
//! everything else in the bag untouched in both directions.

mod asset;
mod band;
mod eo;
mod error;
mod item;

pub use asset::{Asset, EOAsset, ItemAsset};
pub use band::{band_description, band_range, Band};
pub use eo::{eo_key, EOItem, EO_FIELDS, EO_PREFIX};
pub use error::{Error, Result};
pub use item::{Item, Link};
