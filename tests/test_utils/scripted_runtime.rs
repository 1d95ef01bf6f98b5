mod scripted_runtime {

	use std::collections::HashSet ;

	use luau_host::{ ForeignFault, ForeignRuntime, ForeignValue, ops };

	/// What the scripted engine does when `execute` or `get-diagnostics` is
	/// invoked.
	#[derive( Debug, Clone )]
	pub enum Behaviour {
		Payload( String ),
		NoResult,
		Fault( ForeignFault ),
	}

	impl Behaviour {
		fn respond( &self ) -> Result<Option<ForeignValue>, ForeignFault> {
			match self {
				Self::Payload( payload ) => Ok( Some( ForeignValue::Str( payload.clone() ))),
				Self::NoResult => Ok( None ),
				Self::Fault( fault ) => Err( fault.clone() ),
			}
		}
	}

	/// A scripted stand-in for the engine: records every foreign call and
	/// answers according to its configuration.
	#[derive( Debug )]
	pub struct ScriptedRuntime {
		pub calls: Vec<( String, Vec<ForeignValue> )>,
		execute: Behaviour,
		diagnostics: Behaviour,
		fail_clear: bool,
		rejected_modules: HashSet<String>,
	}

	impl ScriptedRuntime {

		pub fn new() -> Self {
			Self {
				calls: Vec::new(),
				execute: Behaviour::Payload(
					r#"{"success":true,"output":"","error":null}"#.to_string(),
				),
				diagnostics: Behaviour::Payload( r#"{"diagnostics":[]}"#.to_string() ),
				fail_clear: false,
				rejected_modules: HashSet::new(),
			}
		}

		pub fn with_execute( mut self, behaviour: Behaviour ) -> Self {
			self.execute = behaviour ;
			self
		}

		pub fn with_diagnostics( mut self, behaviour: Behaviour ) -> Self {
			self.diagnostics = behaviour ;
			self
		}

		pub fn failing_clear( mut self ) -> Self {
			self.fail_clear = true ;
			self
		}

		/// Makes registration of the exact module name fault.
		pub fn rejecting( mut self, module: &str ) -> Self {
			self.rejected_modules.insert( module.to_string() );
			self
		}

		/// Names passed to the given operation, in call order.
		pub fn names_passed_to( &self, operation: &str ) -> Vec<String> {
			self.calls.iter()
				.filter(|( name, _ )| name == operation )
				.filter_map(|( _, args )| match args.first() {
					Some( ForeignValue::Str( module )) => Some( module.clone() ),
					_ => None,
				})
				.collect()
		}

		/// How many times the given operation was invoked.
		pub fn count_of( &self, operation: &str ) -> usize {
			self.calls.iter().filter(|( name, _ )| name == operation ).count()
		}

	}

	impl ForeignRuntime for ScriptedRuntime {

		fn call( &mut self, name: &str, args: &[ForeignValue] ) -> Result<Option<ForeignValue>, ForeignFault> {

			self.calls.push(( name.to_string(), args.to_vec() ));

			match name {
				ops::CLEAR_MODULES => match self.fail_clear {
					true => Err( ForeignFault::Host( "clear rejected".to_string() )),
					false => Ok( None ),
				},
				ops::ADD_MODULE | ops::SET_SOURCE => {
					let module = match args.first() {
						Some( ForeignValue::Str( module )) => module.clone(),
						_ => return Err( ForeignFault::Host( "missing module name".to_string() )),
					};
					match self.rejected_modules.contains( &module ) {
						true => Err( ForeignFault::Host( format!( "rejected module: {module}" ))),
						false => Ok( None ),
					}
				}
				ops::EXECUTE => self.execute.respond(),
				ops::GET_DIAGNOSTICS => self.diagnostics.respond(),
				other => Err( ForeignFault::Host( format!( "unknown operation: {other}" ))),
			}

		}

	}

}
