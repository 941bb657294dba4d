//! Item catalog: the current filtered list the grid displays
//!
//! The catalog is replaced wholesale on every refresh, never patched; the
//! prior snapshot stays visible until the replacement arrives. Selection
//! indices are only meaningful against one snapshot, so the widget clears
//! its selection whenever a snapshot is applied with a new source.

use crate::client::ListingResponse;
use crate::config::BrowserKind;

/// One selectable entry in the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Text drawn on the chip and used for label-based serialization
    label: String,
    /// Raw backing value: the full column list for tabular sources, a
    /// single-element list otherwise
    columns: Vec<String>,
}

impl Item {
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The raw value (first column for tabular items)
    pub fn raw(&self) -> &str {
        self.columns.first().map(String::as_str).unwrap_or("")
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// A complete catalog replacement, built from one listing response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub items: Vec<Item>,
    pub headers: Vec<String>,
}

impl CatalogSnapshot {
    /// Build a snapshot from a listing document, validating that the field
    /// expected for this variant is present.
    pub fn from_listing(kind: BrowserKind, listing: ListingResponse) -> Result<Self, String> {
        match kind {
            BrowserKind::Rows => {
                let rows = listing
                    .rows
                    .ok_or_else(|| "listing is missing the `rows` field".to_string())?;
                let items = rows
                    .into_iter()
                    .enumerate()
                    .map(|(idx, columns)| Item {
                        label: row_label(&columns, idx),
                        columns,
                    })
                    .collect();
                Ok(Self {
                    items,
                    headers: listing.headers.unwrap_or_default(),
                })
            }
            BrowserKind::Files => {
                let files = listing
                    .files
                    .ok_or_else(|| "listing is missing the `files` field".to_string())?;
                let items = files
                    .into_iter()
                    .map(|name| Item {
                        label: file_stem(&name).to_string(),
                        columns: vec![name],
                    })
                    .collect();
                Ok(Self {
                    items,
                    headers: Vec::new(),
                })
            }
            BrowserKind::Tags => {
                let tags = listing
                    .tags
                    .ok_or_else(|| "listing is missing the `tags` field".to_string())?;
                let items = tags
                    .into_iter()
                    .map(|tag| Item {
                        label: tag.clone(),
                        columns: vec![tag],
                    })
                    .collect();
                Ok(Self {
                    items,
                    headers: Vec::new(),
                })
            }
        }
    }
}

/// Label for a tabular row: first column, or a positional fallback when the
/// first cell is empty
fn row_label(columns: &[String], index: usize) -> String {
    match columns.first() {
        Some(first) if !first.is_empty() => first.clone(),
        _ => format!("Row {}", index + 1),
    }
}

/// Filename without its extension
fn file_stem(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// The live catalog owned by a widget instance
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<Item>,
    headers: Vec<String>,
}

impl ItemCatalog {
    /// Replace the whole catalog. Applies unconditionally: whichever snapshot
    /// is handed in last wins, regardless of request order. Ordering across
    /// concurrent refreshes is the caller's concern (the widget tags worker
    /// responses with a generation and drops stale ones before calling this).
    pub fn apply(&mut self, snapshot: CatalogSnapshot) {
        self.items = snapshot.items;
        self.headers = snapshot.headers;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ListingResponse;

    fn tabular(rows: Vec<Vec<&str>>, headers: Vec<&str>) -> ListingResponse {
        ListingResponse {
            headers: Some(headers.into_iter().map(String::from).collect()),
            rows: Some(
                rows.into_iter()
                    .map(|r| r.into_iter().map(String::from).collect())
                    .collect(),
            ),
            ..Default::default()
        }
    }

    #[test]
    fn tabular_snapshot_labels_from_first_column() {
        let snap = CatalogSnapshot::from_listing(
            BrowserKind::Rows,
            tabular(vec![vec!["alpha", "x"], vec!["", "y"]], vec!["name", "val"]),
        )
        .unwrap();
        assert_eq!(snap.items[0].label(), "alpha");
        // Empty first cell falls back to a positional label
        assert_eq!(snap.items[1].label(), "Row 2");
        assert_eq!(snap.headers, vec!["name", "val"]);
    }

    #[test]
    fn file_snapshot_strips_extension() {
        let listing = ListingResponse {
            files: Some(vec!["sunset.txt".into(), "noext".into()]),
            ..Default::default()
        };
        let snap = CatalogSnapshot::from_listing(BrowserKind::Files, listing).unwrap();
        assert_eq!(snap.items[0].label(), "sunset");
        assert_eq!(snap.items[0].raw(), "sunset.txt");
        assert_eq!(snap.items[1].label(), "noext");
    }

    #[test]
    fn wrong_shape_is_rejected() {
        let listing = ListingResponse {
            files: Some(vec!["a.txt".into()]),
            ..Default::default()
        };
        assert!(CatalogSnapshot::from_listing(BrowserKind::Rows, listing).is_err());
        assert!(
            CatalogSnapshot::from_listing(BrowserKind::Tags, ListingResponse::default()).is_err()
        );
    }

    #[test]
    fn apply_replaces_wholesale_last_write_wins() {
        let mut catalog = ItemCatalog::default();
        let a = CatalogSnapshot::from_listing(
            BrowserKind::Tags,
            ListingResponse {
                tags: Some(vec!["from-a".into()]),
                ..Default::default()
            },
        )
        .unwrap();
        let b = CatalogSnapshot::from_listing(
            BrowserKind::Tags,
            ListingResponse {
                tags: Some(vec!["from-b-1".into(), "from-b-2".into()]),
                ..Default::default()
            },
        )
        .unwrap();

        // Request order A then B, completion order B then A: the catalog
        // itself applies whatever it is handed last.
        catalog.apply(b);
        catalog.apply(a);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().label(), "from-a");
    }
}
