use std::time::Duration ;

use luau_host::{ ModuleSet, ops, run };

use crate::scripted_runtime::{ Behaviour, ScriptedRuntime };

#[test]
fn run_parses_the_engine_payload() {

	let mut runtime = ScriptedRuntime::new().with_execute( Behaviour::Payload(
		r#"{"success":true,"output":"2","error":null}"#.to_string(),
	));
	let mut modules = ModuleSet::new();
	modules.insert( "main.luau".to_string(), "print(1 + 1)".to_string() );

	let outcome = run( &mut runtime, &modules, "main.luau" );

	assert!( outcome.result.success );
	assert_eq!( outcome.result.output, "2" );
	assert_eq!( outcome.result.error, None );
	assert!( outcome.elapsed >= Duration::ZERO );
	assert!( outcome.registration.is_complete() );

}

#[test]
fn run_executes_the_entry_module_source() {

	let mut runtime = ScriptedRuntime::new();
	let mut modules = ModuleSet::new();
	modules.insert( "main.luau".to_string(), "print('entry')".to_string() );
	modules.insert( "util.luau".to_string(), "return {}".to_string() );

	run( &mut runtime, &modules, "main.luau" );

	assert_eq!( runtime.names_passed_to( ops::EXECUTE ), vec![ "print('entry')" ]);

}

#[test]
fn run_reports_engine_side_failures_as_data() {

	let mut runtime = ScriptedRuntime::new().with_execute( Behaviour::Payload(
		r#"{"success":false,"output":"","error":"attempt to call a nil value"}"#.to_string(),
	));
	let modules = ModuleSet::new();

	let outcome = run( &mut runtime, &modules, "main.luau" );

	assert!( !outcome.result.success );
	assert_eq!( outcome.result.error.as_deref(), Some( "attempt to call a nil value" ));

}
