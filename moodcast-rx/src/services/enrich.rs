//! Concurrent catalog enrichment
//!
//! Fan-out/fan-in over the suggested songs: every lookup is issued at once
//! and the gathered results keep the input order. Each lookup isolates its
//! own failure, so one miss or one upstream error degrades only that song's
//! link fields and never the batch.

use futures::future::join_all;
use moodcast_common::SongDescriptor;
use tracing::{debug, warn};

use super::CatalogSearcher;

/// Attach catalog metadata to each song, preserving input order.
pub async fn enrich(catalog: &dyn CatalogSearcher, songs: Vec<SongDescriptor>) -> Vec<SongDescriptor> {
    let lookups = songs.into_iter().map(|mut song| async move {
        let query = format!("{} {}", song.name, song.artist);

        match catalog.find_track(&query).await {
            Ok(Some(track)) => {
                song.spotify_url = Some(track.spotify_url);
                song.album_cover = track.album_cover;
            }
            Ok(None) => {
                debug!("No catalog match for '{}'", query);
            }
            Err(e) => {
                warn!("Catalog lookup failed for '{}': {}", query, e);
            }
        }

        song
    });

    join_all(lookups).await
}
