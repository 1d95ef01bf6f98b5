//! Wasmtime-backed implementation of the foreign-call surface.
//!
//! The engine ships as a wasm component exporting one interface,
//! [`ENGINE_INTERFACE`]. Exports are looked up at call time, so a handle can
//! be created from any component; a missing operation only surfaces when it
//! is actually invoked.

use std::sync::{ Arc, Mutex };

use wasmtime::{ Engine, Store, Trap };
use wasmtime::component::{ Component, Instance, Linker, Val };

use crate::bridge::{ ForeignFault, ForeignRuntime, ForeignValue };



/// Interface path under which the engine exports its operations.
pub const ENGINE_INTERFACE: &str = "luau:runtime/engine" ;

/// Data stored inside the wasmtime [`Store`]. The engine imports nothing from
/// the host today, so there is no state to carry yet.
#[derive( Debug, Default )]
pub struct HostState ;

/// The process-wide shared handle to the instantiated engine.
///
/// The mutex serializes run/diagnose cycles: module registration mutates
/// engine state, so at most one cycle may be in flight per handle.
pub type SharedRuntime = Arc<Mutex<WasmRuntime>> ;

/// An instantiated engine component with its store, ready for foreign calls.
///
/// Normally obtained through [`RuntimeLoader`]( crate::RuntimeLoader ), which
/// guarantees a single instantiation per process. Constructing one directly is
/// useful for tests that bypass the loader.
pub struct WasmRuntime {
	store: Store<HostState>,
	instance: Instance,
}

impl std::fmt::Debug for WasmRuntime {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "WasmRuntime" ).finish_non_exhaustive()
	}
}

impl WasmRuntime {

	/// Instantiates an engine component with an empty linker.
	///
	/// # Errors
	/// Returns an error if instantiation fails.
	pub fn instantiate( engine: &Engine, component: &Component ) -> Result<Self, wasmtime::Error> {
		let linker = Linker::new( engine );
		let mut store = Store::new( engine, HostState );
		let instance = linker.instantiate( &mut store, component )?;
		Ok( Self { store, instance })
	}

}

impl ForeignRuntime for WasmRuntime {

	fn call( &mut self, name: &str, args: &[ForeignValue] ) -> Result<Option<ForeignValue>, ForeignFault> {

		let interface_index = self.instance
			.get_export_index( &mut self.store, None, ENGINE_INTERFACE )
			.ok_or_else(|| ForeignFault::Host( format!( "missing interface export: {}", ENGINE_INTERFACE )))?;
		let func_index = self.instance
			.get_export_index( &mut self.store, Some( &interface_index ), name )
			.ok_or_else(|| ForeignFault::Host( format!( "missing function export: {}/{}", ENGINE_INTERFACE, name )))?;
		let func = self.instance
			.get_func( &mut self.store, func_index )
			.ok_or_else(|| ForeignFault::Host( format!( "export is not a function: {}", name )))?;

		let params: Vec<Val> = args.iter().map( lower ).collect();
		let mut results = vec![ Val::Bool( false ); func.ty( &self.store ).results().len() ];

		func.call( &mut self.store, &params, &mut results )
			.map_err(| error | normalise( &error ))?;
		let _ = func.post_return( &mut self.store );

		match results.pop() {
			Some( value ) => lift( value ).map( Some ),
			None => Ok( None ),
		}

	}

}

fn lower( value: &ForeignValue ) -> Val {
	match value {
		ForeignValue::Str( text ) => Val::String( text.clone().into() ),
		ForeignValue::Int( number ) => Val::S32( *number ),
	}
}

fn lift( value: Val ) -> Result<ForeignValue, ForeignFault> {
	match value {
		Val::String( text ) => Ok( ForeignValue::Str( text.into() )),
		Val::S32( number ) => Ok( ForeignValue::Int( number )),
		other => Err( ForeignFault::Host( format!( "unsupported return type: {other:?}" ))),
	}
}

/// Sorts a wasmtime error into the raw fault taxonomy: a guest trap carries
/// only a numeric code, everything else is a host-side exception.
fn normalise( error: &wasmtime::Error ) -> ForeignFault {
	match error.downcast_ref::<Trap>() {
		Some( trap ) => ForeignFault::Trap( trap_code( trap )),
		None => ForeignFault::Host( format!( "{error:#}" )),
	}
}

/// Stable numeric codes for guest traps. The engine contract reports uncaught
/// sandbox faults as bare numbers; codes must not change between releases
/// because embedders render them to users.
fn trap_code( trap: &Trap ) -> i32 {
	match trap {
		Trap::StackOverflow => 1,
		Trap::MemoryOutOfBounds => 2,
		Trap::TableOutOfBounds => 3,
		Trap::IndirectCallToNull => 4,
		Trap::IntegerDivisionByZero => 5,
		Trap::IntegerOverflow => 6,
		Trap::BadConversionToInteger => 7,
		Trap::UnreachableCodeReached => 8,
		Trap::Interrupt => 9,
		Trap::OutOfFuel => 10,
		_ => 0,
	}
}
