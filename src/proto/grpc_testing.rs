//! Types of `grpc.testing`, used by the interop test clients and servers.

use crate::{Enumeration, FileDescriptor, MapField, Record, RecordType, RepeatedField};

/// The type of payload that should be returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Enumeration)]
#[proto(name = "grpc.testing.PayloadType")]
pub enum PayloadType {
    /// Compressable text format.
    Compressable = 0,
}

/// The type of route that a client took to reach a server w.r.t. gRPCLB.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Enumeration)]
#[proto(name = "grpc.testing.GrpclbRouteType")]
pub enum GrpclbRouteType {
    #[proto(name = "GRPCLB_ROUTE_TYPE_UNKNOWN")]
    Unknown = 0,
    #[proto(name = "GRPCLB_ROUTE_TYPE_FALLBACK")]
    Fallback = 1,
    #[proto(name = "GRPCLB_ROUTE_TYPE_BACKEND")]
    Backend = 2,
}

/// A block of data, to simply increase gRPC message size.
#[derive(Clone, Debug, Default, PartialEq, Record)]
#[record(name = "grpc.testing.Payload")]
pub struct Payload {
    pub r#type: PayloadType,
    pub body: Vec<u8>,
}

/// Unary response, as configured by the request.
#[derive(Clone, Debug, Default, PartialEq, Record)]
#[record(name = "grpc.testing.SimpleResponse")]
pub struct SimpleResponse {
    pub payload: Option<Payload>,
    pub username: String,
    pub oauth_scope: String,
    pub server_id: String,
    pub grpclb_route_type: GrpclbRouteType,
    pub hostname: String,
}

#[derive(Clone, Debug, Default, PartialEq, Record)]
#[record(name = "grpc.testing.LoadBalancerStatsRequest")]
pub struct LoadBalancerStatsRequest {
    /// Request stats for the next num_rpcs sent by client.
    pub num_rpcs: i32,

    /// If num_rpcs have not completed within timeout_sec, return partial
    /// results.
    pub timeout_sec: i32,

    /// Response header + trailer metadata entries we want the values of.
    /// Matching of the keys is case-insensitive. `*` returns all entries.
    pub metadata_keys: RepeatedField<String>,
}

pub mod load_balancer_stats_response {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq, Record)]
    #[record(name = "grpc.testing.LoadBalancerStatsResponse.RpcsByPeer")]
    pub struct RpcsByPeer {
        /// The number of completed RPCs for each peer.
        pub rpcs_by_peer: MapField<String, i32>,
    }
}

/// Configurations for a test client.
#[derive(Clone, Debug, Default, PartialEq, Record)]
#[record(name = "grpc.testing.ClientConfigureRequest")]
pub struct ClientConfigureRequest {
    /// The types of RPCs the client sends.
    pub types: RepeatedField<client_configure_request::RpcType>,

    /// The collection of custom metadata to be attached to RPCs sent by the
    /// client.
    pub metadata: RepeatedField<client_configure_request::Metadata>,

    /// The deadline to use, in seconds, for all RPCs. If unset or zero, the
    /// client will use the default from the command-line.
    pub timeout_sec: i32,
}

pub mod client_configure_request {
    use super::*;

    /// Type of RPCs to send.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Enumeration)]
    #[proto(name = "grpc.testing.ClientConfigureRequest.RpcType")]
    pub enum RpcType {
        EmptyCall = 0,
        UnaryCall = 1,
    }

    /// Metadata to be attached for the given type of RPCs.
    #[derive(Clone, Debug, Default, PartialEq, Record)]
    #[record(name = "grpc.testing.ClientConfigureRequest.Metadata")]
    pub struct Metadata {
        pub r#type: RpcType,
        pub key: String,
        pub value: String,
    }
}

pub static FILE: FileDescriptor = FileDescriptor {
    name: "src/proto/grpc/testing/messages.proto",
    package: "grpc.testing",
    records: &[
        <Payload as RecordType>::record_descriptor,
        <SimpleResponse as RecordType>::record_descriptor,
        <LoadBalancerStatsRequest as RecordType>::record_descriptor,
        <load_balancer_stats_response::RpcsByPeer as RecordType>::record_descriptor,
        <ClientConfigureRequest as RecordType>::record_descriptor,
        <client_configure_request::Metadata as RecordType>::record_descriptor,
    ],
    enums: &[
        <PayloadType as Enumeration>::descriptor,
        <GrpclbRouteType as Enumeration>::descriptor,
        <client_configure_request::RpcType as Enumeration>::descriptor,
    ],
    dependencies: &[],
};
