use luau_host::{ BinarySource, LoadError, ModuleSet, Playground, RuntimeLoader };

use crate::engine_fixtures::STUB_ENGINE ;

struct StubSource ;

impl BinarySource for StubSource {
	fn fetch( &self, _asset: &str ) -> Result<Vec<u8>, LoadError> {
		Ok( STUB_ENGINE.as_bytes().to_vec() )
	}
}

#[test]
fn a_cycle_after_a_panicked_one_still_completes() {

	let playground = Playground::new( RuntimeLoader::new( StubSource ));
	let handle = playground.ensure_loaded().expect( "engine unavailable" );

	// Poison the shared lock the way a panicking cycle would.
	let poisoner = std::thread::spawn( move || {
		let _guard = handle.lock().expect( "lock failed" );
		panic!( "cycle aborted mid-call" );
	});
	assert!( poisoner.join().is_err() );

	let mut modules = ModuleSet::new();
	modules.insert( "main.luau".to_string(), "print(1 + 1)".to_string() );

	let run = playground.run( &modules, "main.luau" ).expect( "engine unavailable" );
	assert!( run.result.success );
	assert_eq!( run.result.output, "2" );

	let diagnose = playground.diagnose( &modules, "main.luau" ).expect( "engine unavailable" );
	assert_eq!( diagnose.diagnostics.len(), 1 );

}
