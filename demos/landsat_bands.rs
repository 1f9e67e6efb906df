use anyhow::Result;

use stac_eo::EOItem;

fn main() -> Result<()> {
    let href = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/data-files/eo-landsat-example.json".to_string());

    let eo_item = EOItem::from_file(&href)?;
    println!("Item: {}", eo_item.item.id);

    if let Some(bands) = &eo_item.bands {
        for band in bands {
            println!("  {:4} {}", band.name, band.description.as_deref().unwrap_or("-"));
        }
    }

    for (key, asset) in eo_item.get_eo_assets() {
        println!("EO asset '{}' -> band indices {:?}", key, asset.bands);
    }

    Ok(())
}
