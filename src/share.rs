//! Session sharing: a compact, URL-safe token for a full playground state.
//!
//! The token is the JSON serialization of the state record, deflate
//! compressed and base64 encoded without padding, so it survives inside a
//! URL fragment. Decoding is total: malformed tokens of any kind yield
//! `None`, never a panic or an error, because tokens arrive from arbitrary
//! links.

use std::io::{ Read, Write };

use base64::Engine as _ ;
use base64::engine::general_purpose::URL_SAFE_NO_PAD ;
use flate2::Compression ;
use flate2::read::DeflateDecoder ;
use flate2::write::DeflateEncoder ;
use pipe_trait::Pipe ;
use serde::{ Deserialize, Serialize };
use thiserror::Error ;

use crate::registry::ModuleSet ;



/// Current schema version written into every encoded state.
pub const SHARE_VERSION: u32 = 1 ;

/// A full playground session: the project files and the file open in the
/// editor. Valid when `active` is a key of `files`.
#[derive( Debug, Clone, PartialEq, Eq, Serialize, Deserialize )]
pub struct ShareState {
	pub files: ModuleSet,
	pub active: String,
	/// Schema version, for forward/backward compatibility decisions on decode.
	/// Tokens from before the field existed decode as the current version.
	#[serde( default = "current_version" )]
	pub v: u32,
}

impl ShareState {
	/// Creates a state at the current schema version.
	pub fn new( files: ModuleSet, active: impl Into<String> ) -> Self {
		Self { files, active: active.into(), v: SHARE_VERSION }
	}
}

/// Errors raised while encoding a state.
///
/// Practically unreachable for real states - a string map serializes and a
/// `Vec` sink never fails to write - but kept explicit so the plumbing stays
/// honest.
#[derive( Error, Debug )]
pub enum ShareEncodeError {
	#[error( "Serialise Failed: {0}" )] Serialise( #[from] serde_json::Error ),
	#[error( "Compress Failed: {0}" )] Compress( #[from] std::io::Error ),
}

/// Encodes a state into a URL-safe share token.
///
/// # Errors
/// Returns an error if serialization or compression fails.
pub fn encode_share_state( state: &ShareState ) -> Result<String, ShareEncodeError> {
	serde_json::to_vec( state )?
		.pipe(| json | deflate( &json ))?
		.pipe(| compressed | URL_SAFE_NO_PAD.encode( compressed ))
		.pipe( Ok )
}

/// Decodes a share token back into a state.
///
/// Returns `None` for anything that is not a well-formed token: bad base64,
/// a corrupt deflate stream, malformed JSON, or a record missing its `files`
/// map or `active` name.
pub fn decode_share_state( token: &str ) -> Option<ShareState> {
	let compressed = URL_SAFE_NO_PAD.decode( token ).ok()?;
	let state: ShareState = inflate( &compressed ).ok()?
		.pipe(| json | serde_json::from_slice( &json )).ok()?;
	( !state.active.is_empty() ).then_some( state )
}

/// Renders a shareable link: `<base>#code=<token>`.
///
/// # Errors
/// Returns an error if encoding the state fails.
pub fn share_url( base: &str, state: &ShareState ) -> Result<String, ShareEncodeError> {
	Ok( format!( "{}#code={}", base, encode_share_state( state )? ))
}

/// Recovers a state from a URL fragment of the form `code=<token>`, with or
/// without the leading `#` and tolerating additional `&`-separated pairs.
pub fn state_from_url_fragment( fragment: &str ) -> Option<ShareState> {
	fragment
		.trim_start_matches( '#' )
		.split( '&' )
		.find_map(| pair | pair.strip_prefix( "code=" ))
		.and_then( decode_share_state )
}

fn current_version() -> u32 {
	SHARE_VERSION
}

fn deflate( json: &[u8] ) -> std::io::Result<Vec<u8>> {
	let mut encoder = DeflateEncoder::new( Vec::new(), Compression::default() );
	encoder.write_all( json )?;
	encoder.finish()
}

fn inflate( compressed: &[u8] ) -> std::io::Result<Vec<u8>> {
	let mut json = Vec::new();
	DeflateDecoder::new( compressed ).read_to_end( &mut json )?;
	Ok( json )
}
