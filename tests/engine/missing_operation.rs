use luau_host::{ ForeignCallError, ForeignRuntime, ModuleSet, run };

use crate::engine_fixtures::instantiate ;

#[test]
fn a_component_without_the_engine_interface_raises_host_exceptions() {

	let mut runtime = instantiate( "(component)" );

	match runtime.execute( "print(1)" ) {
		Err( ForeignCallError::HostException( message )) => {
			assert!( message.contains( "luau:runtime/engine" ), "unexpected message: {message}" );
		}
		other => panic!( "expected a host exception, found: {other:?}" ),
	}

}

#[test]
fn a_run_against_such_a_component_still_returns_data() {

	let mut runtime = instantiate( "(component)" );
	let mut modules = ModuleSet::new();
	modules.insert( "main.luau".to_string(), "print(1)".to_string() );

	let outcome = run( &mut runtime, &modules, "main.luau" );

	assert!( !outcome.result.success );
	assert!( outcome.result.error.is_some() );
	// Registration failed per-module but was swallowed, as designed.
	assert!( !outcome.registration.is_complete() );

}
