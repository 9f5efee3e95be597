//! Records and enums declared by schema files bundled with the runtime.

pub mod grpc_testing;
