//! A section-by-section decoder for Blu-ray movie playlist (MPLS) files.
//!
//! An MPLS file is a fixed 40-byte header followed by length-prefixed
//! sections, most of which nest further length-prefixed sections. Every
//! section is decoded by its declared length: fields this crate does not know
//! about are skipped, and an unrecognized stream code only leaves that one
//! record undecoded (a warning is emitted through the [`log`] crate).
//!
//! There are two ways to use this crate:
//!
//! * [`Mpls`] decodes a whole file and offers helpers for the common task of
//!   extracting the playlist's angles and segments.
//! * The functions in [`load`] decode one top-level section each from a
//!   positioned source, for callers that want to walk the file themselves.
//!
//! Beyond that, this crate only provides a structured form of the playlist
//! data and does not re-interpret the movie playlist contents in any way. The
//! [`tables`] module gives names to the raw codes found in stream attributes.
//!
//! The format is not officially documented; this decoder follows the
//! third-party file specs in the [lw/BluRay] repository. Refer to those for
//! more in-depth information.
//!
//! [lw/BluRay]: https://github.com/lw/BluRay/wiki/MPLS
//!
//! # Examples
//! ```no_run
//! # fn main() -> Result<(), bluray_mpls::MplsError> {
//! use std::fs::File;
//! use bluray_mpls::Mpls;
//!
//! let mut file = File::open("00800.mpls")?;
//! let mpls = Mpls::load(&mut file)?;
//!
//! // extract the segments of every angle
//! for angle in mpls.angles() {
//!     let segments: Vec<&str> = angle
//!         .segments()
//!         .iter()
//!         .map(|s| s.file_name.as_ref())
//!         .collect();
//!     println!("angle {}: {:?}", angle, segments);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Decoding a single section:
//! ```no_run
//! # fn main() -> Result<(), bluray_mpls::MplsError> {
//! use std::fs::File;
//! use std::io::{Seek, SeekFrom};
//! use bluray_mpls::load::{load_movie_playlist, load_playlist_marks};
//!
//! let mut file = File::open("00800.mpls")?;
//! let header = load_movie_playlist(&mut file)?;
//!
//! file.seek(SeekFrom::Start(u64::from(header.playlist_mark_start_address)))?;
//! if let Some(marks) = load_playlist_marks(&mut file)?.data {
//!     for mark in &marks.marks {
//!         println!("chapter at {:.3}s", mark.mark_timestamp.seconds());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
#![doc(html_root_url = "https://docs.rs/bluray-mpls/0.1.0")]

mod error;
pub mod load;
mod parser;
pub mod source;
pub mod tables;
pub mod types;

pub use error::{MplsError, Result, SectionKind};
pub use load::{
    load_app_info_playlist, load_extension_data, load_movie_playlist, load_playlist,
    load_playlist_marks,
};
pub use source::Source;
pub use tables::FrameRate;
pub use types::*;
