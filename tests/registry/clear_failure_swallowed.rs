use luau_host::{ ModuleSet, register_for_execution };

use crate::scripted_runtime::ScriptedRuntime ;

#[test]
fn clear_failure_does_not_block_registration() {

	let mut runtime = ScriptedRuntime::new().failing_clear();
	let mut modules = ModuleSet::new();
	modules.insert( "main.luau".to_string(), "return 1".to_string() );

	let report = register_for_execution( &mut runtime, &modules );

	// A stale registry is indistinguishable from an empty one to the caller;
	// the clear failure must not surface in the report.
	assert!( report.is_complete() );
	assert_eq!( report.registered(), [ "main.luau", "main" ]);

}
