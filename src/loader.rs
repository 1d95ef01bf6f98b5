//! Load-once acquisition of the engine binary.
//!
//! The loader owns the only mandatory mutual-exclusion point in the crate:
//! however many callers ask for the runtime concurrently, exactly one fetch
//! and one instantiation ever happen. The outcome - handle or error - is
//! recorded in a [`OnceCell`] and replayed to every later caller. A failed
//! load is deliberately permanent for the process: a broken engine asset
//! must not be re-fetched on every user interaction.

use std::path::PathBuf ;
use std::sync::{ Arc, Mutex };

use once_cell::sync::OnceCell ;
use thiserror::Error ;
use wasmtime::Engine ;
use wasmtime::component::Component ;

use crate::locator::{ AssetLocator, RUNTIME_BINARY };
use crate::wasm::{ SharedRuntime, WasmRuntime };



/// Errors raised while acquiring the engine.
///
/// This is the only error type that propagates out of the crate's public
/// surface as a true failure; everything downstream is absorbed into return
/// values. Cloneable so the recorded outcome can be replayed verbatim.
#[derive( Error, Debug, Clone, PartialEq, Eq )]
pub enum LoadError {
	/// The binary payload could not be fetched from its source.
	#[error( "Fetch Failed: {asset}: {message}" )] Fetch { asset: String, message: String },
	/// The fetched payload is not a valid engine component.
	#[error( "Compile Failed: {0}" )] Compile( String ),
	/// The component failed to instantiate.
	#[error( "Instantiation Failed: {0}" )] Instantiate( String ),
}

/// Source of the engine's binary payload.
///
/// Production embedders resolve assets through an [`AssetLocator`]; tests
/// substitute scripted sources to observe fetch counts and inject failures.
pub trait BinarySource: Send + Sync {
	/// Fetches the named asset.
	///
	/// # Errors
	/// Returns [`LoadError::Fetch`] if the asset cannot be retrieved.
	fn fetch( &self, asset: &str ) -> Result<Vec<u8>, LoadError> ;
}

/// Reads engine assets from a local mirror directory laid out like the
/// trusted origin (`<base>/wasm/<asset>`).
#[derive( Debug, Clone )]
pub struct DirSource {
	locator: AssetLocator,
}

impl DirSource {
	pub fn new( base: impl Into<String> ) -> Self {
		Self { locator: AssetLocator::new( base )}
	}
}

impl BinarySource for DirSource {
	fn fetch( &self, asset: &str ) -> Result<Vec<u8>, LoadError> {
		let path = PathBuf::from( self.locator.locate( asset ));
		std::fs::read( &path ).map_err(| error | LoadError::Fetch {
			asset: asset.to_string(),
			message: format!( "{}: {}", path.display(), error ),
		})
	}
}

/// Lazily loads and instantiates the engine, exactly once per loader.
///
/// The first [`ensure_loaded`]( Self::ensure_loaded ) call performs the load;
/// concurrent callers block on that same attempt rather than starting their
/// own. Success and failure are both terminal.
pub struct RuntimeLoader<S: BinarySource> {
	source: S,
	engine: Engine,
	gate: OnceCell<Result<SharedRuntime, LoadError>>,
}

impl<S: BinarySource> std::fmt::Debug for RuntimeLoader<S> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "RuntimeLoader" )
			.field( "loaded", &self.is_loaded() )
			.field( "load_error", &self.load_error() )
			.finish_non_exhaustive()
	}
}

impl<S: BinarySource> RuntimeLoader<S> {

	/// Creates a loader with a default wasmtime [`Engine`].
	pub fn new( source: S ) -> Self {
		Self::with_engine( Engine::default(), source )
	}

	/// Creates a loader with a caller-configured [`Engine`].
	pub fn with_engine( engine: Engine, source: S ) -> Self {
		Self { source, engine, gate: OnceCell::new() }
	}

	/// Returns the shared engine handle, loading it on first use.
	///
	/// Concurrent callers during the load observe the same in-flight attempt;
	/// exactly one fetch and one instantiation occur per loader lifetime.
	///
	/// # Errors
	/// Returns the recorded [`LoadError`] - the same one, without retrying -
	/// once a load has failed.
	pub fn ensure_loaded( &self ) -> Result<SharedRuntime, LoadError> {
		self.gate.get_or_init(|| self.load() ).clone()
	}

	/// Whether the engine has been loaded successfully.
	pub fn is_loaded( &self ) -> bool {
		self.gate.get().is_some_and( Result::is_ok )
	}

	/// The recorded load failure, if the load has run and failed.
	pub fn load_error( &self ) -> Option<LoadError> {
		self.gate.get().and_then(| outcome | outcome.as_ref().err().cloned() )
	}

	fn load( &self ) -> Result<SharedRuntime, LoadError> {
		let payload = self.source.fetch( RUNTIME_BINARY )?;
		let component = Component::new( &self.engine, &payload )
			.map_err(| error | LoadError::Compile( format!( "{error:#}" )))?;
		let runtime = WasmRuntime::instantiate( &self.engine, &component )
			.map_err(| error | LoadError::Instantiate( format!( "{error:#}" )))?;
		Ok( Arc::new( Mutex::new( runtime )))
	}

}
