//! Host-side bridge to a sandboxed Luau runtime compiled to WebAssembly.
//!
//! An embedding UI (an editor widget, a docs page, a REPL) supplies a set of
//! named source files and asks this crate to execute or type-check one of
//! them inside the engine - a wasm component supplied by the playground's
//! trusted origin. The crate owns the engine's lifecycle and the call surface
//! over it; it knows nothing about editors, rendering, or the Luau language
//! itself.
//!
//! # Core Concepts
//!
//! - [`RuntimeLoader`]: acquires the engine binary exactly once per process.
//! 	Concurrent first calls coalesce into a single fetch + instantiation, and
//! 	a failed load is sticky: the recorded error is replayed without retry.
//! 	Where the bytes come from is the [`BinarySource`] seam; [`DirSource`]
//! 	reads a local mirror laid out like the trusted origin and
//! 	[`AssetLocator`] pins every asset to that origin's layout.
//!
//! - [`ForeignRuntime`]: the raw foreign-call surface of an instantiated
//! 	engine - one untyped `call( name, args )` primitive - plus the closed
//! 	set of typed operations built on it (`clear-modules`, `add-module`,
//! 	`set-source`, `execute`, `get-diagnostics`). [`WasmRuntime`] is the
//! 	wasmtime-backed implementation.
//!
//! - **Module registry**: [`register_for_execution`] and
//! 	[`register_for_diagnostics`] hand a [`ModuleSet`] to the engine, adding a
//! 	suffix-stripped alias for `.luau`/`.lua` names so sandboxed `require`
//! 	works with logical names. Registration is best effort: per-file failures
//! 	are collected into a [`RegistrationReport`] and never abort the cycle.
//!
//! - **Services**: [`run`] and [`diagnose`] drive a full cycle and always
//! 	come back with data. Engine faults become the [`ExecuteResult`]'s error
//! 	string (a trap renders as `uncaught exception (code: N)`); diagnostics
//! 	failures collapse to an empty list. [`Playground`] bundles a loader with
//! 	these services; its [`LoadError`] is the only failure an embedder
//! 	handles.
//!
//! - **Share codec**: [`encode_share_state`] / [`decode_share_state`] turn a
//! 	[`ShareState`] (files + active file) into a compressed URL-safe token
//! 	and back. Decoding never fails loudly: malformed tokens yield `None`.
//!
//! # Example
//!
//! ```
//! use luau_host::{
//! 	BinarySource, LoadError, ModuleSet, Playground, RuntimeLoader, ShareState,
//! 	decode_share_state, encode_share_state,
//! };
//!
//! // The engine is an opaque wasm component exporting `luau:runtime/engine`.
//! // This stub answers every execution with a canned result payload.
//! const STUB_ENGINE: &str = r#"(component
//! 	(core module $engine
//! 		(memory (export "memory") 1)
//! 		(global $next (mut i32) (i32.const 4096))
//! 		(func (export "realloc") (param i32 i32 i32 i32) (result i32)
//! 			(local $ptr i32)
//! 			(local.set $ptr (i32.and (i32.add (global.get $next) (i32.const 7)) (i32.const -8)))
//! 			(global.set $next (i32.add (local.get $ptr) (local.get 3)))
//! 			(local.get $ptr))
//! 		(func (export "clear-modules"))
//! 		(func (export "add-module") (param i32 i32 i32 i32))
//! 		(func (export "set-source") (param i32 i32 i32 i32))
//! 		(func (export "execute") (param i32 i32) (result i32)
//! 			(i32.store (i32.const 8) (i32.const 16))
//! 			(i32.store (i32.const 12) (i32.const 42))
//! 			(i32.const 8))
//! 		(func (export "get-diagnostics") (param i32 i32) (result i32)
//! 			(i32.store (i32.const 256) (i32.const 64))
//! 			(i32.store (i32.const 260) (i32.const 68))
//! 			(i32.const 256))
//! 		(data (i32.const 16) "{\"success\":true,\"output\":\"2\",\"error\":null}")
//! 		(data (i32.const 64) "{\"diagnostics\":[{\"message\":\"unused variable\",\"severity\":\"warning\"}]}")
//! 	)
//! 	(core instance $i (instantiate $engine))
//! 	(func $clear (canon lift (core func $i "clear-modules")))
//! 	(func $add (param "name" string) (param "source" string)
//! 		(canon lift (core func $i "add-module") (memory $i "memory") (realloc (func $i "realloc")) string-encoding=utf8))
//! 	(func $set (param "name" string) (param "source" string)
//! 		(canon lift (core func $i "set-source") (memory $i "memory") (realloc (func $i "realloc")) string-encoding=utf8))
//! 	(func $execute (param "source" string) (result string)
//! 		(canon lift (core func $i "execute") (memory $i "memory") (realloc (func $i "realloc")) string-encoding=utf8))
//! 	(func $diagnostics (param "source" string) (result string)
//! 		(canon lift (core func $i "get-diagnostics") (memory $i "memory") (realloc (func $i "realloc")) string-encoding=utf8))
//! 	(instance $iface
//! 		(export "clear-modules" (func $clear))
//! 		(export "add-module" (func $add))
//! 		(export "set-source" (func $set))
//! 		(export "execute" (func $execute))
//! 		(export "get-diagnostics" (func $diagnostics)))
//! 	(export "luau:runtime/engine" (instance $iface))
//! )"# ;
//!
//! // Production embedders read the binary from a mirror of the trusted
//! // origin with `DirSource`; any `BinarySource` will do.
//! struct InlineSource ;
//!
//! impl BinarySource for InlineSource {
//! 	fn fetch( &self, _asset: &str ) -> Result<Vec<u8>, LoadError> {
//! 		Ok( STUB_ENGINE.as_bytes().to_vec() )
//! 	}
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let playground = Playground::new( RuntimeLoader::new( InlineSource ));
//!
//! let mut files = ModuleSet::new();
//! files.insert( "main.luau".to_string(), "print(1 + 1)".to_string() );
//!
//! // Execute the entry module. Engine faults never surface as errors here;
//! // only an unavailable engine does.
//! let outcome = playground.run( &files, "main.luau" )?;
//! assert!( outcome.result.success );
//! assert_eq!( outcome.result.output, "2" );
//!
//! // Type-check the same project. Diagnostics are advisory; failure would
//! // yield an empty list, not an error.
//! let findings = playground.diagnose( &files, "main.luau" )?;
//! assert_eq!( findings.diagnostics.len(), 1 );
//!
//! // Reproduce the session from a link.
//! let state = ShareState::new( files, "main.luau" );
//! let token = encode_share_state( &state )?;
//! assert_eq!( decode_share_state( &token ), Some( state ));
//! # Ok(())
//! # }
//! ```

mod bridge ;
mod loader ;
mod locator ;
mod registry ;
mod session ;
mod share ;
mod wasm ;

#[doc( no_inline )]
pub use wasmtime::Engine ;
#[doc( no_inline )]
pub use wasmtime::component::Component ;

pub use bridge::{ ForeignCallError, ForeignFault, ForeignRuntime, ForeignValue, ops };
pub use loader::{ BinarySource, DirSource, LoadError, RuntimeLoader };
pub use locator::{ AssetLocator, RUNTIME_BINARY, TRUSTED_ORIGIN };
pub use registry::{
	ModuleSet, RegistrationFailure, RegistrationReport,
	register_for_diagnostics, register_for_execution,
};
pub use session::{
	DiagnoseOutcome, Diagnostic, ExecuteResult, Playground, RunOutcome,
	diagnose, run,
};
pub use share::{
	SHARE_VERSION, ShareEncodeError, ShareState,
	decode_share_state, encode_share_state, share_url, state_from_url_fragment,
};
pub use wasm::{ ENGINE_INTERFACE, HostState, SharedRuntime, WasmRuntime };
