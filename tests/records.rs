use typed_record::proto::grpc_testing::load_balancer_stats_response::RpcsByPeer;
use typed_record::proto::grpc_testing::{
    GrpclbRouteType, LoadBalancerStatsRequest, Payload, PayloadType, SimpleResponse,
};
use typed_record::{
    Error, ErrorKind, FieldType, MapField, Record, RecordType, RepeatedField, ScalarType, Value,
};

#[derive(Clone, Debug, Default, PartialEq, Record)]
#[record(name = "test.Scalars")]
pub struct Scalars {
    pub i32_field: i32,
    pub i64_field: i64,
    pub u32_field: u32,
    pub u64_field: u64,
    pub float_field: f32,
    pub double_field: f64,
    pub bool_field: bool,
    pub string_field: String,
    pub bytes_field: Vec<u8>,
    #[field(number = 20, name = "maybe")]
    pub optional_field: Option<i64>,
    pub labels: MapField<u32, String>,
}

#[test]
fn scalar_values_round_trip() {
    let cases = vec![
        ("i32_field", Value::Int(-(1 << 31))),
        ("i64_field", Value::Int(i64::MIN)),
        ("u32_field", Value::UInt(u32::MAX as u64)),
        ("u64_field", Value::UInt(u64::MAX)),
        ("float_field", Value::Float(0.5)),
        ("double_field", Value::Float(-1e300)),
        ("bool_field", Value::Bool(true)),
        ("string_field", Value::String("héllo".into())),
        ("bytes_field", Value::Bytes(vec![0, 0xff])),
        ("maybe", Value::Int(0)),
    ];

    let mut record = Scalars::default();
    for (name, value) in cases {
        record.set(name, value.clone()).unwrap();
        assert_eq!(record.get(name).unwrap(), value, "{}", name);
    }

    assert_eq!(record.u64_field, u64::MAX);
    assert_eq!(record.optional_field, Some(0));
}

#[test]
fn invalid_scalars_fail_with_their_kind() {
    let mut record = Scalars::default();

    let err = record.set("i32_field", Value::Int(1 << 31)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeError);
    match &err {
        Error::InField { record, field, .. } => {
            assert_eq!(*record, "test.Scalars");
            assert_eq!(*field, "i32_field");
        }
        e => panic!("unexpected error: {:?}", e),
    }

    assert_eq!(
        record.set("u32_field", Value::Int(-1)).unwrap_err().kind(),
        ErrorKind::RangeError
    );
    assert_eq!(
        record.set("float_field", Value::Float(1e39)).unwrap_err().kind(),
        ErrorKind::RangeError
    );
    assert_eq!(
        record
            .set("string_field", Value::Bytes(vec![0xf0, 0x28]))
            .unwrap_err()
            .kind(),
        ErrorKind::EncodingError
    );
    assert_eq!(
        record.set("bool_field", Value::Int(1)).unwrap_err().kind(),
        ErrorKind::TypeMismatch
    );

    // Nothing was modified by the failed assignments.
    assert_eq!(record, Scalars::default());
}

#[test]
fn optional_scalar_presence() {
    let mut record = Scalars::default();
    assert_eq!(record.has("maybe").unwrap(), false);
    assert_eq!(record.get("maybe").unwrap(), Value::Int(0));

    record.set("maybe", Value::Int(0)).unwrap();
    assert_eq!(record.has("maybe").unwrap(), true);
    assert_eq!(record.get("maybe").unwrap(), Value::Int(0));

    record.clear("maybe").unwrap();
    record.clear("maybe").unwrap();
    assert_eq!(record.has("maybe").unwrap(), false);
    assert_eq!(record.optional_field, None);
}

#[test]
fn has_on_plain_field_is_an_error() {
    let record = Scalars::default();
    let err = record.has("i32_field").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoPresence);
}

#[test]
fn unknown_fields() {
    let mut record = Scalars::default();
    assert_eq!(record.get("nope").unwrap_err().kind(), ErrorKind::UnknownField);
    assert_eq!(
        record.set("nope", Value::Int(1)).unwrap_err().kind(),
        ErrorKind::UnknownField
    );
    assert_eq!(record.has("nope").unwrap_err().kind(), ErrorKind::UnknownField);
    assert_eq!(record.clear("nope").unwrap_err().kind(), ErrorKind::UnknownField);
}

#[test]
fn descriptor_reflects_declaration() {
    let d = Scalars::record_descriptor();
    assert_eq!(d.name, "test.Scalars");
    assert_eq!(d.fields.len(), 11);

    let f = d.field("i32_field").unwrap();
    assert_eq!(f.number, 1);
    assert_eq!(f.ty, FieldType::Singular(typed_record::ElementType::Scalar(ScalarType::Int32)));
    assert!(!f.presence);

    let f = d.field("maybe").unwrap();
    assert_eq!(f.number, 20);
    assert!(f.presence);
    assert_eq!(f.default_value(), Value::Int(0));
    assert_eq!(d.field_by_number(20).map(|f| f.name), Some("maybe"));

    let f = d.field("labels").unwrap();
    assert_eq!(f.ty.to_string(), "map<uint32, string>");
    assert_eq!(f.default_value(), Value::Map(vec![]));

    assert!(d.validate().is_ok());
}

#[test]
fn construct_load_balancer_stats_request() {
    let request = LoadBalancerStatsRequest::from_values(vec![
        ("num_rpcs", Value::Int(5)),
        ("metadata_keys", Value::list(vec!["a", "*"])),
    ])
    .unwrap();

    assert_eq!(request.get("num_rpcs").unwrap(), Value::Int(5));
    assert_eq!(request.num_rpcs, 5);
    assert_eq!(
        request.metadata_keys.as_slice(),
        &["a".to_string(), "*".to_string()]
    );
    assert_eq!(
        request.get("metadata_keys").unwrap(),
        Value::list(vec!["a", "*"])
    );

    let err = LoadBalancerStatsRequest::from_values(vec![("num_rpcs", Value::Int(3000000000))])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeError);
}

#[test]
fn message_field_presence() {
    let mut response = SimpleResponse::default();
    assert_eq!(response.has("payload").unwrap(), false);
    assert_eq!(
        response.get("payload").unwrap(),
        Value::message(Payload::default())
    );

    response
        .set("payload", Value::message(Payload::default()))
        .unwrap();
    assert_eq!(response.has("payload").unwrap(), true);
    assert_eq!(response.payload, Some(Payload::default()));

    response.clear("payload").unwrap();
    assert_eq!(response.has("payload").unwrap(), false);
    assert_eq!(response.payload, None);

    // Scalars don't track presence.
    assert_eq!(
        response.has("username").unwrap_err().kind(),
        ErrorKind::NoPresence
    );
}

#[test]
fn message_field_requires_exact_type() {
    let mut response = SimpleResponse::default();
    let err = response
        .set("payload", Value::message(RpcsByPeer::default()))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(
        err.root(),
        &Error::TypeMismatch {
            expected: "message<grpc.testing.Payload>".into(),
            found: "message<grpc.testing.LoadBalancerStatsResponse.RpcsByPeer>".into(),
        }
    );
    assert_eq!(response.has("payload").unwrap(), false);

    let err = response.set("payload", Value::Int(1)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn enum_fields_are_closed() {
    let mut response = SimpleResponse::default();
    assert_eq!(response.get("grpclb_route_type").unwrap(), Value::Int(0));

    response.set("grpclb_route_type", Value::Int(2)).unwrap();
    assert_eq!(response.grpclb_route_type, GrpclbRouteType::Backend);

    let err = response
        .set("grpclb_route_type", Value::String("GRPCLB_ROUTE_TYPE_FALLBACK".into()))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);

    let err = response.set("grpclb_route_type", Value::Int(7)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UndefinedValue);

    let err = response
        .set("grpclb_route_type", Value::Int(1 << 40))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UndefinedValue);

    assert_eq!(response.grpclb_route_type, GrpclbRouteType::Backend);

    response.clear("grpclb_route_type").unwrap();
    assert_eq!(response.grpclb_route_type, GrpclbRouteType::Unknown);
}

#[test]
fn nested_message_values() {
    let payload = Payload::from_values(vec![
        ("type", Value::Int(0)),
        ("body", Value::from("abc")),
    ])
    .unwrap();
    assert_eq!(payload.r#type, PayloadType::Compressable);
    assert_eq!(payload.body, b"abc".to_vec());

    let response = SimpleResponse::from_values(vec![
        ("payload", Value::message(payload.clone())),
        ("hostname", Value::from("host-1")),
    ])
    .unwrap();

    let value = response.get("payload").unwrap();
    let inner = value.as_message().unwrap();
    assert_eq!(inner.downcast_ref::<Payload>(), Some(&payload));
    assert_eq!(inner.get("body").unwrap(), Value::Bytes(b"abc".to_vec()));
}

#[test]
fn map_replacement_is_atomic() {
    let mut stats = RpcsByPeer::default();
    stats
        .set("rpcs_by_peer", Value::map(vec![("peer-a", 3), ("peer-b", 4)]))
        .unwrap();
    assert_eq!(stats.rpcs_by_peer.len(), 2);

    let err = stats
        .set(
            "rpcs_by_peer",
            Value::map(vec![
                ("peer-c", Value::Int(1)),
                ("peer-d", Value::Int(3000000000)),
                ("peer-e", Value::Int(2)),
            ]),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeError);
    assert!(err.to_string().contains("peer-d"));

    assert_eq!(stats.rpcs_by_peer.len(), 2);
    assert_eq!(stats.rpcs_by_peer.get(&"peer-a".to_string()), Some(&3));
    assert_eq!(stats.rpcs_by_peer.get(&"peer-b".to_string()), Some(&4));

    let err = stats
        .set("rpcs_by_peer", Value::map(vec![(1, 1)]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(stats.rpcs_by_peer.len(), 2);
}

#[test]
fn repeated_replacement_is_atomic() {
    let mut request = LoadBalancerStatsRequest::default();
    request.metadata_keys.push("x".into());
    request.metadata_keys.push("x".into());

    let err = request
        .set(
            "metadata_keys",
            Value::List(vec![Value::from("ok"), Value::Bytes(vec![0xff])]),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EncodingError);
    assert_eq!(
        request.metadata_keys,
        RepeatedField::from(vec!["x".to_string(), "x".to_string()])
    );

    request.clear("metadata_keys").unwrap();
    assert!(request.metadata_keys.is_empty());
    assert_eq!(request.get("metadata_keys").unwrap(), Value::List(vec![]));
}

#[test]
fn boxed_records_compare_and_clone() {
    let a: Box<dyn Record> = Box::new(LoadBalancerStatsRequest {
        num_rpcs: 3,
        ..Default::default()
    });
    let b = a.clone();
    assert!(a.dyn_eq(b.as_ref()));
    assert_eq!(Value::Message(a.clone()), Value::Message(b));

    let c: Box<dyn Record> = Box::new(LoadBalancerStatsRequest::default());
    assert!(!a.dyn_eq(c.as_ref()));

    let d: Box<dyn Record> = Box::new(RpcsByPeer::default());
    assert!(!c.dyn_eq(d.as_ref()));
}
