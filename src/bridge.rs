//! The typed call bridge over the runtime's raw foreign-call surface.
//!
//! The sandboxed engine exposes a single untyped entry point: call an exported
//! function by name with primitive arguments. [`ForeignRuntime`] is that seam.
//! Everything above it uses the fixed-signature wrapper methods, so the set of
//! operations the host can issue is closed and checked at compile time, while
//! the marshalling to the untyped surface lives in one place per backend.

use thiserror::Error ;



/// Wire names of the engine's exported operations.
///
/// Component model exports are kebab-case; these constants are the only place
/// the wire spelling appears.
pub mod ops {
	pub const CLEAR_MODULES: &str = "clear-modules" ;
	pub const ADD_MODULE: &str = "add-module" ;
	pub const SET_SOURCE: &str = "set-source" ;
	pub const EXECUTE: &str = "execute" ;
	pub const GET_DIAGNOSTICS: &str = "get-diagnostics" ;
}

/// A primitive value crossing the foreign-call boundary.
///
/// The engine contract only ever passes strings and small integers; anything
/// richer travels as a JSON payload inside a string.
#[derive( Debug, Clone, PartialEq, Eq )]
pub enum ForeignValue {
	Str( String ),
	Int( i32 ),
}

impl ForeignValue {
	pub fn string( value: impl Into<String> ) -> Self {
		Self::Str( value.into() )
	}
}

/// The raw failure shapes a foreign call can produce, before normalization.
///
/// - `Host`: a conventional error raised by the bridge or host glue
///   (missing export, argument marshalling failure, engine API error).
/// - `Trap`: the sandboxed runtime aborted and all we have is a numeric code.
/// - `Other`: any other thrown value, already coerced to a string.
#[derive( Debug, Clone, PartialEq, Eq )]
pub enum ForeignFault {
	Host( String ),
	Trap( i32 ),
	Other( String ),
}

/// Errors surfaced by the typed bridge wrappers.
///
/// No retries happen at this layer; callers decide whether a failure is fatal.
/// The execution and diagnostics services absorb every variant into their
/// return values, so these never reach the embedding UI as exceptions.
#[derive( Error, Debug, Clone, PartialEq, Eq )]
pub enum ForeignCallError {
	/// A conventional error raised by the call bridge or host glue.
	#[error( "Host Exception: {0}" )] HostException( String ),
	/// The sandboxed runtime aborted with only a numeric code, no message.
	#[error( "Runtime Trap (code: {0})" )] RuntimeTrap( i32 ),
	/// Some other value was thrown across the boundary, coerced to a string.
	#[error( "Unrecognized Throw: {0}" )] Unrecognized( String ),
	/// The operation was expected to return a payload but didn't.
	#[error( "Missing Response" )] MissingResponse,
}

impl From<ForeignFault> for ForeignCallError {
	fn from( fault: ForeignFault ) -> Self { match fault {
		ForeignFault::Host( message ) => Self::HostException( message ),
		ForeignFault::Trap( code ) => Self::RuntimeTrap( code ),
		ForeignFault::Other( rendered ) => Self::Unrecognized( rendered ),
	}}
}

/// The raw foreign-call surface of an instantiated engine.
///
/// Implemented by [`WasmRuntime`]( crate::WasmRuntime ) for the real wasmtime
/// backend; tests substitute scripted implementations. The provided methods
/// are the closed set of typed operations the host issues - new operations are
/// added here, never by calling [`call`]( Self::call ) from outside the crate.
pub trait ForeignRuntime: Send {

	/// Invokes the named exported operation with the given arguments.
	///
	/// This is the single untyped dispatch point. `Ok( None )` means the
	/// operation completed without producing a value.
	///
	/// # Errors
	/// Returns the raw fault exactly as the backend observed it.
	fn call( &mut self, name: &str, args: &[ForeignValue] ) -> Result<Option<ForeignValue>, ForeignFault> ;

	/// Drops every module currently registered with the engine.
	///
	/// # Errors
	/// Returns an error if the foreign call fails.
	fn clear_modules( &mut self ) -> Result<(), ForeignCallError> {
		self.call( ops::CLEAR_MODULES, &[] )?;
		Ok(())
	}

	/// Registers `source` under `name` for the execution/require path.
	///
	/// # Errors
	/// Returns an error if the foreign call fails.
	fn add_module( &mut self, name: &str, source: &str ) -> Result<(), ForeignCallError> {
		self.call( ops::ADD_MODULE, &[ ForeignValue::string( name ), ForeignValue::string( source )])?;
		Ok(())
	}

	/// Registers `source` under `name` for the type-checking path.
	///
	/// The engine addresses diagnostic sources independently from executable
	/// modules, hence a separate primitive from [`add_module`]( Self::add_module ).
	///
	/// # Errors
	/// Returns an error if the foreign call fails.
	fn set_source( &mut self, name: &str, source: &str ) -> Result<(), ForeignCallError> {
		self.call( ops::SET_SOURCE, &[ ForeignValue::string( name ), ForeignValue::string( source )])?;
		Ok(())
	}

	/// Executes `source` and returns the engine's JSON result payload.
	///
	/// # Errors
	/// Returns an error if the foreign call fails or no payload comes back.
	fn execute( &mut self, source: &str ) -> Result<String, ForeignCallError> {
		expect_payload( self.call( ops::EXECUTE, &[ ForeignValue::string( source )])? )
	}

	/// Type-checks `source` and returns the engine's JSON diagnostics payload.
	///
	/// # Errors
	/// Returns an error if the foreign call fails or no payload comes back.
	fn get_diagnostics( &mut self, source: &str ) -> Result<String, ForeignCallError> {
		expect_payload( self.call( ops::GET_DIAGNOSTICS, &[ ForeignValue::string( source )])? )
	}

}

fn expect_payload( value: Option<ForeignValue> ) -> Result<String, ForeignCallError> {
	match value {
		Some( ForeignValue::Str( payload )) if !payload.is_empty() => Ok( payload ),
		Some( ForeignValue::Str( _ )) | None => Err( ForeignCallError::MissingResponse ),
		Some( other ) => Err( ForeignCallError::HostException(
			format!( "expected a string payload, got {other:?}" ),
		)),
	}
}
