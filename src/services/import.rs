//! One-time seed import, run at startup before any traffic is served.
//!
//! The price table and the seat map come from static JSON files; a
//! non-empty collection means an earlier run already imported it and the
//! file is skipped.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context};
use tracing::info;

use crate::config::ImportConfig;
use crate::models::{PriceTier, Seat};
use crate::store::BookingStore;

pub async fn import_seed_data(
    store: &dyn BookingStore,
    config: &ImportConfig,
) -> anyhow::Result<()> {
    import_price_table(store, Path::new(&config.price_data_path)).await?;
    import_seat_map(store, Path::new(&config.seat_data_path)).await?;
    Ok(())
}

pub async fn import_price_table(store: &dyn BookingStore, path: &Path) -> anyhow::Result<u64> {
    if store.count_price_tiers().await? > 0 {
        info!("Price table already imported, skipping");
        return Ok(0);
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read price data from {}", path.display()))?;
    let tiers: Vec<PriceTier> =
        serde_json::from_str(&raw).context("price data is not valid JSON")?;

    // Дубликат класса - ошибка конфигурации, а не молчаливый выбор первой записи
    let mut seen = HashSet::new();
    for tier in &tiers {
        if !seen.insert(tier.seat_class.as_str()) {
            bail!("duplicate price tier for seat class {}", tier.seat_class);
        }
    }

    let imported = store.insert_price_tiers(&tiers).await?;
    info!("Imported {} price tiers", imported);
    Ok(imported)
}

pub async fn import_seat_map(store: &dyn BookingStore, path: &Path) -> anyhow::Result<u64> {
    if store.count_seats().await? > 0 {
        info!("Seat map already imported, skipping");
        return Ok(0);
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read seat data from {}", path.display()))?;
    let seats: Vec<Seat> = serde_json::from_str(&raw).context("seat data is not valid JSON")?;

    let mut seen = HashSet::new();
    for seat in &seats {
        if !seen.insert(seat.id) {
            bail!("duplicate seat id {}", seat.id);
        }
    }

    let imported = store.insert_seats(&seats).await?;
    info!("Imported {} seats", imported);
    Ok(imported)
}
