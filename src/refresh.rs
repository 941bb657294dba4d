//! Background catalog refresh
//!
//! Each refresh runs on its own worker thread, performs the blocking HTTP
//! calls, and reports back over an `mpsc` channel. Events carry the
//! generation the refresh was issued under; the widget drops events whose
//! generation is no longer current, so a superseded refresh cannot
//! overwrite a newer one no matter which completes first.

use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::catalog::CatalogSnapshot;
use crate::client::BackendClient;
use crate::config::BrowserKind;
use crate::thumbs::ThumbnailCache;

/// Source reference for one refresh
#[derive(Debug, Clone)]
pub enum SourceRef {
    /// User-entered reference; resolved through `get_file_info` first
    Logical(String),
    /// Already-resolved path from an earlier refresh (filter changes reuse it)
    Resolved(String),
}

/// Worker-to-widget message, tagged with the issuing generation
#[derive(Debug)]
pub enum RefreshEvent {
    Catalog {
        generation: u64,
        /// Canonical path the source reference resolved to
        resolved_path: String,
        snapshot: CatalogSnapshot,
    },
    /// One encoded thumbnail payload; decoding happens on the UI thread
    Thumbnail {
        generation: u64,
        file: String,
        bytes: Vec<u8>,
    },
}

/// Parameters of one refresh run
#[derive(Debug, Clone)]
pub struct RefreshRequest {
    pub generation: u64,
    pub kind: BrowserKind,
    pub source: SourceRef,
    pub filter: String,
}

/// Spawn a worker for one refresh. Failures are logged and the widget keeps
/// its current snapshot; a dropped receiver ends the worker early.
pub fn spawn(
    client: BackendClient,
    request: RefreshRequest,
    events: Sender<RefreshEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || run(client, request, events))
}

fn run(client: BackendClient, request: RefreshRequest, events: Sender<RefreshEvent>) {
    let generation = request.generation;

    let resolved_path = match request.source {
        SourceRef::Resolved(path) => path,
        SourceRef::Logical(reference) => match client.get_file_info(&reference) {
            Ok(Some(path)) => path,
            Ok(None) => {
                warn!(generation, reference, "source reference did not resolve");
                return;
            }
            Err(err) => {
                warn!(generation, reference, %err, "failed to resolve source reference");
                return;
            }
        },
    };

    let listing = match client.get_directory_structure(&resolved_path, &request.filter) {
        Ok(listing) => listing,
        Err(err) => {
            warn!(generation, path = resolved_path, %err, "listing request failed");
            return;
        }
    };
    let snapshot = match CatalogSnapshot::from_listing(request.kind, listing) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            warn!(generation, path = resolved_path, err, "malformed listing response");
            return;
        }
    };

    // Thumbnail fetches need the file names after the snapshot moves out
    let files: Vec<String> = if request.kind == BrowserKind::Files {
        snapshot.items.iter().map(|i| i.raw().to_string()).collect()
    } else {
        Vec::new()
    };

    let sent = events.send(RefreshEvent::Catalog {
        generation,
        resolved_path: resolved_path.clone(),
        snapshot,
    });
    if sent.is_err() {
        return;
    }

    // One request at a time; a failed thumbnail just leaves its chip
    // label-only
    for file in files {
        let key = ThumbnailCache::image_key(&file);
        match client.get_thumbnail(&resolved_path, &key) {
            Ok(bytes) => {
                let event = RefreshEvent::Thumbnail {
                    generation,
                    file,
                    bytes,
                };
                if events.send(event).is_err() {
                    return;
                }
            }
            Err(err) => {
                debug!(generation, file, %err, "thumbnail fetch failed");
            }
        }
    }
}
