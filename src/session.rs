//! Execution and diagnostics services.
//!
//! A cycle registers the project's modules, runs the entry module's source
//! through the engine, and turns whatever came back - payload, fault or
//! nothing - into plain data. Nothing in here returns an error to the caller:
//! execution failures are represented inside [`ExecuteResult`], diagnostics
//! failures collapse to an empty list. The only true failure an embedder ever
//! handles is "runtime unavailable", and that lives on [`Playground`].

use std::time::{ Duration, Instant };

use serde::{ Deserialize, Serialize };

use crate::bridge::{ ForeignCallError, ForeignRuntime };
use crate::loader::{ BinarySource, LoadError, RuntimeLoader };
use crate::registry::{ self, ModuleSet, RegistrationReport };
use crate::wasm::SharedRuntime ;



/// Structured outcome of one execution, as reported by the engine.
#[derive( Debug, Clone, PartialEq, Eq, Serialize, Deserialize )]
pub struct ExecuteResult {
	pub success: bool,
	#[serde( default )]
	pub output: String,
	#[serde( default )]
	pub error: Option<String>,
}

impl ExecuteResult {
	/// A synthetic failed result carrying a descriptive error. Used whenever
	/// the engine produced no usable payload.
	fn failed( error: impl Into<String> ) -> Self {
		Self { success: false, output: String::new(), error: Some( error.into() )}
	}
}

/// One static-analysis finding.
///
/// The shape is owned by the engine's type checker; this core passes the
/// record through without interpreting it.
#[derive( Debug, Clone, PartialEq, Serialize, Deserialize )]
#[serde( transparent )]
pub struct Diagnostic( pub serde_json::Value );

impl Diagnostic {
	/// The finding's message, when the engine supplied one.
	pub fn message( &self ) -> Option<&str> {
		self.0.get( "message" ).and_then( serde_json::Value::as_str )
	}
}

#[derive( Debug, Deserialize )]
struct DiagnosticsPayload {
	#[serde( default )]
	diagnostics: Vec<Diagnostic>,
}

/// Everything a run cycle produced.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct RunOutcome {
	pub result: ExecuteResult,
	/// Wall-clock time of the execute call itself, registration excluded.
	pub elapsed: Duration,
	/// The best-effort registration report for the cycle.
	pub registration: RegistrationReport,
}

/// Everything a diagnose cycle produced.
#[derive( Debug, Clone, PartialEq )]
pub struct DiagnoseOutcome {
	pub diagnostics: Vec<Diagnostic>,
	pub elapsed: Duration,
	pub registration: RegistrationReport,
}

/// Runs the entry module's source with all of `modules` registered.
///
/// A missing entry is not an error: the cycle executes empty source, which
/// the engine treats like an empty file. Bridge failures are rendered into
/// the result's error string; a trap surfaces as
/// `uncaught exception (code: N)`.
pub fn run<R>( runtime: &mut R, modules: &ModuleSet, entry: &str ) -> RunOutcome
where
	R: ForeignRuntime + ?Sized,
{

	let registration = registry::register_for_execution( runtime, modules );
	let source = entry_source( modules, entry );

	let started = Instant::now();
	let result = match runtime.execute( source ) {
		Ok( payload ) => parse_execute_payload( &payload ),
		Err( error ) => ExecuteResult::failed( render_failure( &error )),
	};

	RunOutcome { result, elapsed: started.elapsed(), registration }

}

/// Type-checks the entry module's source with all of `modules` registered.
///
/// Diagnostics are advisory: any bridge or payload failure yields an empty
/// list rather than an error, so a broken type-check path never blocks the
/// user from seeing execution results.
pub fn diagnose<R>( runtime: &mut R, modules: &ModuleSet, entry: &str ) -> DiagnoseOutcome
where
	R: ForeignRuntime + ?Sized,
{

	let registration = registry::register_for_diagnostics( runtime, modules );
	let source = entry_source( modules, entry );

	let started = Instant::now();
	let diagnostics = match runtime.get_diagnostics( source ) {
		Ok( payload ) => parse_diagnostics_payload( &payload ),
		Err( error ) => {
			tracing::warn!( %error, "diagnostics request failed; returning no findings" );
			Vec::new()
		}
	};

	DiagnoseOutcome { diagnostics, elapsed: started.elapsed(), registration }

}

fn entry_source<'a>( modules: &'a ModuleSet, entry: &str ) -> &'a str {
	modules.get( entry ).map_or( "", String::as_str )
}

fn parse_execute_payload( payload: &str ) -> ExecuteResult {
	serde_json::from_str( payload ).unwrap_or_else(| error | {
		ExecuteResult::failed( format!( "malformed execution payload: {error}" ))
	})
}

fn parse_diagnostics_payload( payload: &str ) -> Vec<Diagnostic> {
	match serde_json::from_str::<DiagnosticsPayload>( payload ) {
		Ok( parsed ) => parsed.diagnostics,
		Err( error ) => {
			tracing::warn!( %error, "malformed diagnostics payload; returning no findings" );
			Vec::new()
		}
	}
}

fn render_failure( error: &ForeignCallError ) -> String {
	match error {
		ForeignCallError::RuntimeTrap( code ) => format!( "uncaught exception (code: {code})" ),
		ForeignCallError::MissingResponse => "no result returned from execution".to_string(),
		ForeignCallError::HostException( message )
		| ForeignCallError::Unrecognized( message ) => message.clone(),
	}
}

/// The embedder-facing surface: a loader plus the run/diagnose services bound
/// to its shared handle.
///
/// [`LoadError`] is the only failure the embedder must handle; once the
/// engine is available, every cycle completes with plain data.
#[derive( Debug )]
pub struct Playground<S: BinarySource> {
	loader: RuntimeLoader<S>,
}

impl<S: BinarySource> Playground<S> {

	pub fn new( loader: RuntimeLoader<S> ) -> Self {
		Self { loader }
	}

	/// Access to the underlying loader.
	pub fn loader( &self ) -> &RuntimeLoader<S> {
		&self.loader
	}

	/// Returns the shared engine handle, loading it on first use.
	///
	/// # Errors
	/// Returns the loader's recorded [`LoadError`] when the engine is
	/// unavailable.
	pub fn ensure_loaded( &self ) -> Result<SharedRuntime, LoadError> {
		self.loader.ensure_loaded()
	}

	/// Runs one execution cycle. See [`run`].
	///
	/// # Errors
	/// Returns a [`LoadError`] only when the engine itself is unavailable.
	pub fn run( &self, modules: &ModuleSet, entry: &str ) -> Result<RunOutcome, LoadError> {
		let runtime = self.ensure_loaded()?;
		// A poisoned lock means a previous cycle panicked mid-call; the
		// recovered handle is still the process-wide singleton.
		let mut guard = runtime.lock().unwrap_or_else( std::sync::PoisonError::into_inner );
		Ok( run( &mut *guard, modules, entry ))
	}

	/// Runs one diagnostics cycle. See [`diagnose`].
	///
	/// # Errors
	/// Returns a [`LoadError`] only when the engine itself is unavailable.
	pub fn diagnose( &self, modules: &ModuleSet, entry: &str ) -> Result<DiagnoseOutcome, LoadError> {
		let runtime = self.ensure_loaded()?;
		let mut guard = runtime.lock().unwrap_or_else( std::sync::PoisonError::into_inner );
		Ok( diagnose( &mut *guard, modules, entry ))
	}

}
