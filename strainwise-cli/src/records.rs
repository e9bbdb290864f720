//! Product and entry maintenance commands.

use std::io::Write;

use chrono::{DateTime, Utc};
use clap::Args;
use log::warn;
use serde::Serialize;
use strainwise_core::{
    ConsumptionMethod, Entry, EntryId, JournalStore, NewEntry, NewProduct, Product, ProductId,
    ProductKind, Rating, StoreError, Strain, catalog,
};

use crate::output::write_json;
use crate::{CliError, Journal};

/// Fields describing a new product.
#[derive(Debug, Clone, Args)]
pub(crate) struct ProductFields {
    /// Display name.
    #[arg(value_name = "name")]
    pub(crate) name: String,
    /// Physical form: flower, vape, edible, concentrate, tincture, topical or preroll.
    #[arg(long, value_name = "kind", default_value = "flower")]
    pub(crate) kind: ProductKind,
    /// Lineage: sativa, indica or hybrid.
    #[arg(long, value_name = "strain")]
    pub(crate) strain: Option<Strain>,
    /// Producer.
    #[arg(long, value_name = "brand")]
    pub(crate) brand: Option<String>,
    /// Cannabinoid content as `id=percent`; repeat for each compound.
    #[arg(long = "cannabinoid", value_name = "id=percent", value_parser = parse_compound)]
    pub(crate) cannabinoids: Vec<(String, f64)>,
    /// Terpene content as `id=percent`; repeat for each compound.
    #[arg(long = "terpene", value_name = "id=percent", value_parser = parse_compound)]
    pub(crate) terpenes: Vec<(String, f64)>,
    /// Free-text notes.
    #[arg(long, value_name = "text", default_value = "")]
    pub(crate) notes: String,
}

impl ProductFields {
    pub(crate) fn into_draft(self) -> NewProduct {
        for (id, _) in &self.cannabinoids {
            if catalog::cannabinoid(id).is_none() {
                warn!("cannabinoid '{id}' is not in the catalogue");
            }
        }
        for (id, _) in &self.terpenes {
            if catalog::terpene(id).is_none() {
                warn!("terpene '{id}' is not in the catalogue");
            }
        }
        NewProduct {
            name: self.name,
            kind: self.kind,
            strain: self.strain,
            brand: self.brand,
            cannabinoids: self.cannabinoids.into_iter().collect(),
            terpenes: self.terpenes.into_iter().collect(),
            notes: self.notes,
        }
    }
}

/// Fields describing a new entry.
#[derive(Debug, Clone, Args)]
pub(crate) struct EntryFields {
    /// Identifier of the product consumed.
    #[arg(value_name = "product-id")]
    pub(crate) product: u64,
    /// Rating from 1 to 5.
    #[arg(long, value_name = "1-5", value_parser = parse_rating)]
    pub(crate) rating: Option<Rating>,
    /// Effect identifier; repeat for each effect felt.
    #[arg(long = "effect", value_name = "id")]
    pub(crate) effects: Vec<String>,
    /// Consumption method.
    #[arg(long, value_name = "method")]
    pub(crate) method: Option<ConsumptionMethod>,
    /// Free-text dosage.
    #[arg(long, value_name = "text", default_value = "")]
    pub(crate) dosage: String,
    /// Free-text notes.
    #[arg(long, value_name = "text", default_value = "")]
    pub(crate) notes: String,
    /// When the experience happened (RFC 3339); defaults to now.
    #[arg(long = "at", value_name = "timestamp")]
    pub(crate) logged_at: Option<DateTime<Utc>>,
}

impl EntryFields {
    pub(crate) fn into_draft(self) -> NewEntry {
        for effect in &self.effects {
            if catalog::effect(effect).is_none() {
                warn!("effect '{effect}' is not in the catalogue");
            }
        }
        NewEntry {
            product_id: ProductId(self.product),
            logged_at: self.logged_at,
            rating: self.rating,
            effects: self.effects,
            method: self.method,
            dosage: self.dosage,
            notes: self.notes,
        }
    }
}

/// Identifier of the record to change or remove.
#[derive(Debug, Clone, Copy, Args)]
pub(crate) struct IdArg {
    /// Record identifier.
    #[arg(value_name = "id")]
    pub(crate) id: u64,
}

/// Narrow the product listing.
#[derive(Debug, Clone, Copy, Default, Args)]
pub(crate) struct ProductFilter {
    /// Only list products of this form.
    #[arg(long = "kind", value_name = "kind")]
    pub(crate) kind: Option<ProductKind>,
}

impl ProductFilter {
    fn keeps(self, product: &Product) -> bool {
        self.kind.is_none_or(|kind| product.kind == kind)
    }
}

/// Narrow the entry listing.
#[derive(Debug, Clone, Copy, Default, Args)]
pub(crate) struct EntryFilter {
    /// Only list entries rated at least this high; unrated entries are left out.
    #[arg(long = "min-rating", value_name = "1-5", value_parser = parse_rating)]
    pub(crate) min_rating: Option<Rating>,
}

impl EntryFilter {
    fn keeps(self, entry: &Entry) -> bool {
        self.min_rating
            .is_none_or(|minimum| entry.rating.is_some_and(|rating| rating >= minimum))
    }
}

#[derive(Debug, Serialize)]
struct Created {
    id: u64,
}

#[derive(Debug, Serialize)]
struct Updated {
    updated: u64,
}

#[derive(Debug, Serialize)]
struct Removed {
    removed: u64,
}

fn parse_compound(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected id=percent, found '{raw}'"))?;
    let id = name.trim().to_lowercase();
    if id.is_empty() {
        return Err(format!("missing compound id in '{raw}'"));
    }
    let percent: f64 = value
        .trim()
        .parse()
        .map_err(|err| format!("invalid percentage in '{raw}': {err}"))?;
    Ok((id, percent))
}

fn parse_rating(raw: &str) -> Result<Rating, String> {
    let value: u8 = raw
        .trim()
        .parse()
        .map_err(|err| format!("invalid rating '{raw}': {err}"))?;
    Rating::new(value).map_err(|err| err.to_string())
}

pub(crate) fn add_product(
    journal: &mut Journal,
    fields: ProductFields,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let ProductId(id) = journal.store.add_product(fields.into_draft())?;
    write_json(writer, &Created { id })
}

pub(crate) fn list_products(
    journal: &Journal,
    filter: ProductFilter,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut products = journal.store.list_products()?;
    products.retain(|product| filter.keeps(product));
    write_json(writer, &products)
}

/// Replace every field of an existing product; the creation time is kept.
pub(crate) fn edit_product(
    journal: &mut Journal,
    target: IdArg,
    fields: ProductFields,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let id = ProductId(target.id);
    let existing = journal
        .store
        .get_product(id)?
        .ok_or(StoreError::ProductNotFound(id))?;
    let replacement = fields.into_draft().into_product(id, existing.created_at);
    journal.store.update_product(replacement)?;
    write_json(writer, &Updated { updated: target.id })
}

pub(crate) fn remove_product(
    journal: &mut Journal,
    target: IdArg,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    journal.store.delete_product(ProductId(target.id))?;
    write_json(writer, &Removed { removed: target.id })
}

pub(crate) fn add_entry(
    journal: &mut Journal,
    fields: EntryFields,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let product = ProductId(fields.product);
    if journal.store.get_product(product)?.is_none() {
        return Err(StoreError::ProductNotFound(product).into());
    }
    let EntryId(id) = journal.store.add_entry(fields.into_draft())?;
    write_json(writer, &Created { id })
}

pub(crate) fn list_entries(
    journal: &Journal,
    filter: EntryFilter,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut entries = journal.store.list_entries()?;
    entries.retain(|entry| filter.keeps(entry));
    write_json(writer, &entries)
}

/// Replace every field of an existing entry.
///
/// The original timestamp is kept unless `--at` supplies a new one.
pub(crate) fn edit_entry(
    journal: &mut Journal,
    target: IdArg,
    fields: EntryFields,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let id = EntryId(target.id);
    let existing = journal
        .store
        .get_entry(id)?
        .ok_or(StoreError::EntryNotFound(id))?;
    let product = ProductId(fields.product);
    if journal.store.get_product(product)?.is_none() {
        return Err(StoreError::ProductNotFound(product).into());
    }
    let replacement = fields.into_draft().into_entry(id, existing.logged_at);
    journal.store.update_entry(replacement)?;
    write_json(writer, &Updated { updated: target.id })
}

pub(crate) fn remove_entry(
    journal: &mut Journal,
    target: IdArg,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    journal.store.delete_entry(EntryId(target.id))?;
    write_json(writer, &Removed { removed: target.id })
}
