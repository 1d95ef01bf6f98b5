//! Asset location for the engine's binary payload.
//!
//! Every auxiliary asset the engine needs resolves under one pinned base
//! location, and every request for a compiled binary routes to the single
//! known engine binary. Embedders must not be able to end up loading a
//! binary from anywhere else by varying the asset name.

/// The canonical origin the hosted playground serves engine assets from.
pub const TRUSTED_ORIGIN: &str = "https://play.luau.org" ;

/// Logical name of the engine's compiled binary.
pub const RUNTIME_BINARY: &str = "luau.wasm" ;

/// Maps logical asset names to concrete locations under a pinned base.
///
/// The base can be an origin URL or a local mirror directory; the mapping
/// policy is the same either way: assets live under `<base>/wasm/`, and any
/// request for a `.wasm` asset resolves to [`RUNTIME_BINARY`].
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct AssetLocator {
	base: String,
}

impl AssetLocator {

	/// Creates a locator pinned to the given base location.
	///
	/// A trailing `/` on the base is tolerated and stripped.
	pub fn new( base: impl Into<String> ) -> Self {
		let mut base = base.into();
		while base.ends_with( '/' ) {
			base.pop();
		}
		Self { base }
	}

	/// Creates a locator pinned to [`TRUSTED_ORIGIN`].
	pub fn trusted() -> Self {
		Self::new( TRUSTED_ORIGIN )
	}

	/// The pinned base location.
	pub fn base( &self ) -> &str {
		&self.base
	}

	/// Resolves a logical asset name to its full location.
	pub fn locate( &self, asset: &str ) -> String {
		match asset.ends_with( ".wasm" ) {
			true => format!( "{}/wasm/{}", self.base, RUNTIME_BINARY ),
			false => format!( "{}/wasm/{}", self.base, asset ),
		}
	}

}
