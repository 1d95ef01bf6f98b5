//! Module registration for multi-file projects.
//!
//! Before a run or diagnose cycle, every file of the project is handed to the
//! engine so that `require` and cross-file type checking resolve. Modules
//! whose names carry a recognized source suffix are additionally registered
//! under the suffix-stripped stem, so sandboxed code can require them by
//! logical name without knowing the suffix convention.
//!
//! Registration is best effort by contract: the user's primary signal is the
//! execution or diagnostics output, not the registry, so one malformed file
//! must never abort the whole cycle. Failures are not discarded though - they
//! are collected into a [`RegistrationReport`] and logged, so callers and
//! tests can observe that they happened.

use std::collections::BTreeMap ;

use itertools::Itertools ;

use crate::bridge::{ ForeignCallError, ForeignRuntime };



/// All files registered with the engine at a point in time, keyed by module
/// name. Rebuilt at the start of every execute/diagnose cycle; the engine
/// keeps its own copy of each source.
pub type ModuleSet = BTreeMap<String, String> ;

/// Module name suffixes that trigger alias registration.
const SOURCE_SUFFIXES: [ &str; 2 ] = [ ".luau", ".lua" ];

/// One module that failed to register during a cycle.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct RegistrationFailure {
	/// The name the registration was attempted under (may be an alias).
	pub module: String,
	pub error: ForeignCallError,
}

/// Outcome of a best-effort registration pass.
#[derive( Debug, Clone, Default, PartialEq, Eq )]
pub struct RegistrationReport {
	registered: Vec<String>,
	failures: Vec<RegistrationFailure>,
}

impl RegistrationReport {

	/// Names registered successfully, aliases included, in registration order.
	pub fn registered( &self ) -> &[String] {
		&self.registered
	}

	/// Per-module failures that were swallowed during the pass.
	pub fn failures( &self ) -> &[RegistrationFailure] {
		&self.failures
	}

	/// Whether every registration attempt succeeded.
	pub fn is_complete( &self ) -> bool {
		self.failures.is_empty()
	}

}

/// Clears the engine's module registry and registers `modules` for execution.
///
/// The clear is best effort: its failure is logged and swallowed, because a
/// stale registry is indistinguishable from an empty one to the caller and
/// must not block execution. Each module registers under its given name plus
/// its suffix-stripped alias; duplicate names mean last registration wins.
pub fn register_for_execution<R>( runtime: &mut R, modules: &ModuleSet ) -> RegistrationReport
where
	R: ForeignRuntime + ?Sized,
{
	if let Err( error ) = runtime.clear_modules() {
		tracing::debug!( %error, "clearing module registry failed; registering over stale state" );
	}
	populate( modules, | name, source | runtime.add_module( name, source ))
}

/// Registers `modules` for the type-checking path.
///
/// Same alias expansion and best-effort policy as
/// [`register_for_execution`], but through the engine's `set-source`
/// primitive: the diagnostics subsystem addresses sources independently from
/// the execution/require path.
pub fn register_for_diagnostics<R>( runtime: &mut R, modules: &ModuleSet ) -> RegistrationReport
where
	R: ForeignRuntime + ?Sized,
{
	populate( modules, | name, source | runtime.set_source( name, source ))
}

fn populate(
	modules: &ModuleSet,
	mut register: impl FnMut( &str, &str ) -> Result<(), ForeignCallError>,
) -> RegistrationReport {

	let ( registered, failures ): ( Vec<String>, Vec<RegistrationFailure> ) = modules.iter()
		.flat_map(|( name, source )| {
			let mut attempts = vec![ attempt( &mut register, name, source )];
			if let Some( stem ) = module_stem( name ) {
				attempts.push( attempt( &mut register, stem, source ));
			}
			attempts
		})
		.partition_result();

	for failure in &failures {
		let RegistrationFailure { module, error } = failure ;
		tracing::warn!( %module, %error, "module registration failed; continuing with remaining modules" );
	}

	RegistrationReport { registered, failures }

}

fn attempt(
	register: &mut impl FnMut( &str, &str ) -> Result<(), ForeignCallError>,
	name: &str,
	source: &str,
) -> Result<String, RegistrationFailure> {
	register( name, source )
		.map(|()| name.to_string() )
		.map_err(| error | RegistrationFailure { module: name.to_string(), error })
}

/// The suffix-stripped alias for `name`, if it carries a recognized source
/// suffix. `"main.luau"` yields `"main"`; `"util"` yields nothing.
fn module_stem( name: &str ) -> Option<&str> {
	SOURCE_SUFFIXES.iter().find_map(| suffix | name.strip_suffix( suffix ))
}
