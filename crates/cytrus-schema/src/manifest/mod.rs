//! Binary release manifest codec.
//!
//! Manifests are FlatBuffers documents (see [`generated`] for the schema).
//! Decoding is lenient below the root: a nested record that cannot be used
//! (a file without a name, a bundle or bundle chunk without a hash) is skipped
//! with a warning instead of failing the whole parse. Only a buffer that does
//! not verify against the schema is rejected.

pub mod generated;

use std::collections::HashMap;

use flatbuffers::{FlatBufferBuilder, ForwardsUOffset, Vector, WIPOffset};
use thiserror::Error;
use tracing::{debug, warn};

use crate::hash::ContentHash;
use crate::types::{BundleChunk, BundleEntry, ChunkRef, FileEntry, Fragment, FragmentSummary};

/// Upper bound on tables the verifier will walk. Every chunk is a table, so
/// large releases need far more than the library default.
const MAX_TABLES: usize = 64 * 1024 * 1024;

/// Upper bound on the apparent buffer size accepted by the verifier.
const MAX_APPARENT_SIZE: usize = 1 << 32;

/// Errors that can occur while decoding or encoding a manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// The buffer is not a valid manifest document.
    #[error("Invalid manifest buffer: {0}")]
    Invalid(#[from] flatbuffers::InvalidFlatbuffer),

    /// A hash could not be converted back into raw bytes while encoding.
    #[error("Invalid hash '{hash}': {source}")]
    InvalidHash {
        /// The offending hex string.
        hash: String,
        /// Underlying hex decoding error.
        #[source]
        source: hex::FromHexError,
    },
}

/// A decoded manifest, flattened across fragments.
#[derive(Debug, Clone, Default)]
pub struct ReleaseManifest {
    /// Fragment names and counts in manifest order.
    pub fragments: Vec<FragmentSummary>,
    /// Every file, in fragment order then declaration order.
    pub files: Vec<FileEntry>,
    /// Every bundle, unique by hash, in first-seen order.
    pub bundles: Vec<BundleEntry>,
}

impl ReleaseManifest {
    /// Sum of the declared sizes of all files.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    /// Total number of chunk entries across all bundles.
    pub fn bundle_chunk_count(&self) -> usize {
        self.bundles.iter().map(|b| b.chunks.len()).sum()
    }
}

/// Decode a manifest from raw bytes.
///
/// # Errors
///
/// Returns [`ManifestError::Invalid`] if the buffer does not verify against
/// the manifest schema.
pub fn decode(bytes: &[u8]) -> Result<ReleaseManifest, ManifestError> {
    let opts = flatbuffers::VerifierOptions {
        max_tables: MAX_TABLES,
        max_apparent_size: MAX_APPARENT_SIZE,
        ..Default::default()
    };
    let root = flatbuffers::root_with_opts::<generated::Manifest>(&opts, bytes)?;

    let mut manifest = ReleaseManifest::default();
    // Position of each bundle hash in `manifest.bundles`; a repeated hash
    // replaces the earlier entry but keeps its position.
    let mut bundle_slots: HashMap<ContentHash, usize> = HashMap::new();

    for fragment in root.fragments().iter().flat_map(|v| v.iter()) {
        let name = fragment.name().unwrap_or("unknown").to_string();
        let mut summary = FragmentSummary {
            name,
            files: 0,
            bundles: 0,
        };

        for file in fragment.files().iter().flat_map(|v| v.iter()) {
            if let Some(entry) = decode_file(file) {
                manifest.files.push(entry);
                summary.files += 1;
            }
        }

        for bundle in fragment.bundles().iter().flat_map(|v| v.iter()) {
            let Some(entry) = decode_bundle(bundle) else {
                continue;
            };
            summary.bundles += 1;
            if let Some(&slot) = bundle_slots.get(&entry.hash) {
                debug!(bundle = %entry.hash, "Bundle declared twice, keeping the later entry");
                manifest.bundles[slot] = entry;
            } else {
                bundle_slots.insert(entry.hash.clone(), manifest.bundles.len());
                manifest.bundles.push(entry);
            }
        }

        manifest.fragments.push(summary);
    }

    Ok(manifest)
}

fn decode_file(file: generated::File<'_>) -> Option<FileEntry> {
    let name = match file.name() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            warn!("Skipping manifest file without a name");
            return None;
        }
    };

    // A chunk without a hash is kept with an empty hash: it can never be
    // located, so the file fails instead of being rebuilt with a hole.
    let chunks = file
        .chunks()
        .iter()
        .flat_map(|v| v.iter())
        .map(|chunk| ChunkRef {
            hash: raw_hash(chunk.hash()),
            size: unsigned(chunk.size()),
            offset: unsigned(chunk.offset()),
        })
        .collect();

    Some(FileEntry {
        name,
        size: unsigned(file.size()),
        hash: raw_hash(file.hash()),
        executable: file.executable(),
        chunks,
    })
}

fn decode_bundle(bundle: generated::Bundle<'_>) -> Option<BundleEntry> {
    let hash = raw_hash(bundle.hash());
    if hash.is_empty() {
        warn!("Skipping manifest bundle without a hash");
        return None;
    }

    let mut chunks = HashMap::new();
    for chunk in bundle.chunks().iter().flat_map(|v| v.iter()) {
        let chunk_hash = raw_hash(chunk.hash());
        if chunk_hash.is_empty() {
            warn!(bundle = %hash, "Skipping bundle chunk without a hash");
            continue;
        }
        chunks.insert(
            chunk_hash,
            BundleChunk {
                size: unsigned(chunk.size()),
                offset: unsigned(chunk.offset()),
            },
        );
    }

    Some(BundleEntry { hash, chunks })
}

fn raw_hash(raw: Option<Vector<'_, i8>>) -> ContentHash {
    raw.map(|v| ContentHash::from_raw(v.bytes()))
        .unwrap_or_default()
}

/// Negative sizes and offsets are meaningless; clamp them to zero.
fn unsigned(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

fn signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Encode fragments into a manifest buffer.
///
/// Bundle chunks are written sorted by hash so the output is deterministic.
///
/// # Errors
///
/// Returns [`ManifestError::InvalidHash`] if any non-empty hash is not valid hex.
pub fn encode(fragments: &[Fragment]) -> Result<Vec<u8>, ManifestError> {
    let mut fbb = FlatBufferBuilder::new();
    let mut fragment_offsets = Vec::with_capacity(fragments.len());

    for fragment in fragments {
        let mut file_offsets = Vec::with_capacity(fragment.files.len());
        for file in &fragment.files {
            let chunks = write_chunks(
                &mut fbb,
                file.chunks.iter().map(|c| (&c.hash, c.size, c.offset)),
            )?;
            let hash = write_hash(&mut fbb, &file.hash)?;
            let name = fbb.create_string(&file.name);
            file_offsets.push(generated::File::create(
                &mut fbb,
                &generated::FileArgs {
                    name: Some(name),
                    size: signed(file.size),
                    hash,
                    chunks: Some(chunks),
                    executable: file.executable,
                    symlink: None,
                },
            ));
        }

        let mut bundle_offsets = Vec::with_capacity(fragment.bundles.len());
        for bundle in &fragment.bundles {
            let mut sorted: Vec<_> = bundle.chunks.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            let chunks = write_chunks(
                &mut fbb,
                sorted.into_iter().map(|(h, c)| (h, c.size, c.offset)),
            )?;
            let hash = write_hash(&mut fbb, &bundle.hash)?;
            bundle_offsets.push(generated::Bundle::create(
                &mut fbb,
                &generated::BundleArgs {
                    hash,
                    chunks: Some(chunks),
                },
            ));
        }

        let name = fbb.create_string(&fragment.name);
        let files = fbb.create_vector(&file_offsets);
        let bundles = fbb.create_vector(&bundle_offsets);
        fragment_offsets.push(generated::Fragment::create(
            &mut fbb,
            &generated::FragmentArgs {
                name: Some(name),
                files: Some(files),
                bundles: Some(bundles),
            },
        ));
    }

    let fragments = fbb.create_vector(&fragment_offsets);
    let root = generated::Manifest::create(
        &mut fbb,
        &generated::ManifestArgs {
            fragments: Some(fragments),
        },
    );
    fbb.finish(root, None);
    Ok(fbb.finished_data().to_vec())
}

fn write_hash<'fbb>(
    fbb: &mut FlatBufferBuilder<'fbb>,
    hash: &ContentHash,
) -> Result<Option<WIPOffset<Vector<'fbb, i8>>>, ManifestError> {
    if hash.is_empty() {
        return Ok(None);
    }
    let raw = hash.to_raw().map_err(|source| ManifestError::InvalidHash {
        hash: hash.to_string(),
        source,
    })?;
    let signed: Vec<i8> = raw.into_iter().map(|b| b as i8).collect();
    Ok(Some(fbb.create_vector(&signed)))
}

fn write_chunks<'a, 'fbb>(
    fbb: &mut FlatBufferBuilder<'fbb>,
    chunks: impl Iterator<Item = (&'a ContentHash, u64, u64)>,
) -> Result<WIPOffset<Vector<'fbb, ForwardsUOffset<generated::Chunk<'fbb>>>>, ManifestError> {
    let mut offsets = Vec::new();
    for (hash, size, offset) in chunks {
        let hash = write_hash(fbb, hash)?;
        offsets.push(generated::Chunk::create(
            fbb,
            &generated::ChunkArgs {
                hash,
                size: signed(size),
                offset: signed(offset),
            },
        ));
    }
    Ok(fbb.create_vector(&offsets))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(hash: &str, size: u64, offset: u64) -> ChunkRef {
        ChunkRef {
            hash: ContentHash::new(hash),
            size,
            offset,
        }
    }

    fn bundle(hash: &str, chunks: &[(&str, u64, u64)]) -> BundleEntry {
        BundleEntry {
            hash: ContentHash::new(hash),
            chunks: chunks
                .iter()
                .map(|(h, size, offset)| {
                    (
                        ContentHash::new(*h),
                        BundleChunk {
                            size: *size,
                            offset: *offset,
                        },
                    )
                })
                .collect(),
        }
    }

    fn sample() -> Vec<Fragment> {
        vec![
            Fragment {
                name: "main".to_string(),
                files: vec![
                    FileEntry {
                        name: "Dofus.exe".to_string(),
                        size: 6,
                        hash: ContentHash::new("f00d"),
                        executable: true,
                        chunks: vec![chunk("c1", 4, 0), chunk("c2", 2, 4)],
                    },
                    FileEntry {
                        name: "data/readme.txt".to_string(),
                        size: 2,
                        hash: ContentHash::new("beef"),
                        executable: false,
                        chunks: vec![chunk("c2", 2, 0)],
                    },
                ],
                bundles: vec![bundle("b1", &[("c1", 4, 0), ("c2", 2, 4)])],
            },
            Fragment {
                name: "config".to_string(),
                files: vec![],
                bundles: vec![bundle("b2", &[("c3", 8, 16)])],
            },
        ]
    }

    #[test]
    fn decode_preserves_order_and_fields() {
        let bytes = encode(&sample()).unwrap();
        let manifest = decode(&bytes).unwrap();

        let names: Vec<_> = manifest.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Dofus.exe", "data/readme.txt"]);

        let exe = &manifest.files[0];
        assert_eq!(exe.size, 6);
        assert!(exe.executable);
        assert_eq!(exe.hash.as_str(), "f00d");
        assert_eq!(exe.chunks, vec![chunk("c1", 4, 0), chunk("c2", 2, 4)]);

        assert_eq!(manifest.bundles.len(), 2);
        assert_eq!(manifest.bundles[0].hash.as_str(), "b1");
        assert_eq!(
            manifest.bundles[1].chunks[&ContentHash::new("c3")],
            BundleChunk {
                size: 8,
                offset: 16
            }
        );
        assert_eq!(manifest.bundle_chunk_count(), 3);
        assert_eq!(manifest.total_size(), 8);
    }

    #[test]
    fn decode_reports_fragments() {
        let manifest = decode(&encode(&sample()).unwrap()).unwrap();
        assert_eq!(
            manifest.fragments,
            vec![
                FragmentSummary {
                    name: "main".to_string(),
                    files: 2,
                    bundles: 1
                },
                FragmentSummary {
                    name: "config".to_string(),
                    files: 0,
                    bundles: 1
                },
            ]
        );
    }

    #[test]
    fn repeated_bundle_replaces_in_place() {
        let fragments = vec![
            Fragment {
                name: "a".to_string(),
                files: vec![],
                bundles: vec![bundle("b1", &[("c1", 1, 0)]), bundle("b2", &[])],
            },
            Fragment {
                name: "b".to_string(),
                files: vec![],
                bundles: vec![bundle("b1", &[("c9", 3, 7)])],
            },
        ];
        let manifest = decode(&encode(&fragments).unwrap()).unwrap();

        assert_eq!(manifest.bundles.len(), 2);
        assert_eq!(manifest.bundles[0].hash.as_str(), "b1");
        assert!(manifest.bundles[0].chunks.contains_key(&ContentHash::new("c9")));
        assert!(!manifest.bundles[0].chunks.contains_key(&ContentHash::new("c1")));
    }

    #[test]
    fn nameless_file_and_hashless_bundle_are_skipped() {
        let mut fbb = FlatBufferBuilder::new();
        let nameless = generated::File::create(
            &mut fbb,
            &generated::FileArgs {
                name: None,
                size: 10,
                hash: None,
                chunks: None,
                executable: false,
                symlink: None,
            },
        );
        let name = fbb.create_string("kept.bin");
        let kept = generated::File::create(
            &mut fbb,
            &generated::FileArgs {
                name: Some(name),
                size: -5,
                hash: None,
                chunks: None,
                executable: false,
                symlink: None,
            },
        );
        let hashless = generated::Bundle::create(
            &mut fbb,
            &generated::BundleArgs {
                hash: None,
                chunks: None,
            },
        );
        let files = fbb.create_vector(&[nameless, kept]);
        let bundles = fbb.create_vector(&[hashless]);
        let fragment = generated::Fragment::create(
            &mut fbb,
            &generated::FragmentArgs {
                name: None,
                files: Some(files),
                bundles: Some(bundles),
            },
        );
        let fragments = fbb.create_vector(&[fragment]);
        let root = generated::Manifest::create(
            &mut fbb,
            &generated::ManifestArgs {
                fragments: Some(fragments),
            },
        );
        fbb.finish(root, None);

        let manifest = decode(fbb.finished_data()).unwrap();
        assert_eq!(manifest.files.len(), 1);
        assert_eq!(manifest.files[0].name, "kept.bin");
        assert_eq!(manifest.files[0].size, 0);
        assert!(manifest.files[0].hash.is_empty());
        assert!(manifest.bundles.is_empty());
        assert_eq!(manifest.fragments[0].name, "unknown");
    }

    #[test]
    fn empty_manifest_decodes_to_nothing() {
        let manifest = decode(&encode(&[]).unwrap()).unwrap();
        assert!(manifest.files.is_empty());
        assert!(manifest.bundles.is_empty());
        assert!(manifest.fragments.is_empty());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(decode(&[]), Err(ManifestError::Invalid(_))));
        assert!(matches!(
            decode(&[0xff, 0xff, 0xff, 0x7f, 0, 0, 0, 0]),
            Err(ManifestError::Invalid(_))
        ));
    }

    #[test]
    fn encode_rejects_bad_hex() {
        let fragments = vec![Fragment {
            name: "main".to_string(),
            files: vec![],
            bundles: vec![bundle("not-hex", &[])],
        }];
        assert!(matches!(
            encode(&fragments),
            Err(ManifestError::InvalidHash { .. })
        ));
    }
}
