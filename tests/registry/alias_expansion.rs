use luau_host::{ ModuleSet, ops, register_for_execution };

use crate::scripted_runtime::ScriptedRuntime ;

#[test]
fn suffixed_names_also_register_their_stem() {

	let mut runtime = ScriptedRuntime::new();
	let mut modules = ModuleSet::new();
	modules.insert( "main.luau".to_string(), "return 1".to_string() );

	let report = register_for_execution( &mut runtime, &modules );

	assert!( report.is_complete() );
	assert_eq!( runtime.names_passed_to( ops::ADD_MODULE ), vec![ "main.luau", "main" ]);
	assert_eq!( report.registered(), [ "main.luau", "main" ]);

}

#[test]
fn lua_suffix_is_recognized_too() {

	let mut runtime = ScriptedRuntime::new();
	let mut modules = ModuleSet::new();
	modules.insert( "legacy.lua".to_string(), "return 2".to_string() );

	register_for_execution( &mut runtime, &modules );

	assert_eq!( runtime.names_passed_to( ops::ADD_MODULE ), vec![ "legacy.lua", "legacy" ]);

}

#[test]
fn unsuffixed_names_register_exactly_once() {

	let mut runtime = ScriptedRuntime::new();
	let mut modules = ModuleSet::new();
	modules.insert( "util".to_string(), "return 3".to_string() );

	let report = register_for_execution( &mut runtime, &modules );

	assert_eq!( runtime.names_passed_to( ops::ADD_MODULE ), vec![ "util" ]);
	assert_eq!( report.registered(), [ "util" ]);

}

#[test]
fn registry_is_cleared_before_registration() {

	let mut runtime = ScriptedRuntime::new();
	let mut modules = ModuleSet::new();
	modules.insert( "main.luau".to_string(), "return 1".to_string() );

	register_for_execution( &mut runtime, &modules );

	assert_eq!( runtime.calls[ 0 ].0, ops::CLEAR_MODULES );
	assert_eq!( runtime.count_of( ops::CLEAR_MODULES ), 1 );

}
