use typed_record::proto::grpc_testing::client_configure_request::{Metadata, RpcType};
use typed_record::proto::grpc_testing::{ClientConfigureRequest, GrpclbRouteType, PayloadType};
use typed_record::{
    enum_from_value, Element, ElementType, EnumDescriptor, Enumeration, Error, ErrorKind, Record,
    RecordType, Value,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Enumeration)]
#[proto(name = "test.Signed")]
pub enum Signed {
    Zero = 0,
    MinusOne = -1,
    #[proto(name = "BIG")]
    Large = 1000,
}

#[test]
fn rpc_type_lookups() {
    let d = RpcType::descriptor();
    assert_eq!(d.name(0).unwrap(), "EMPTY_CALL");
    assert_eq!(d.value("unary_call").unwrap(), 1);
    assert_eq!(d.value("UNARY_CALL").unwrap(), 1);
    assert_eq!(d.name(2).unwrap_err().kind(), ErrorKind::UndefinedValue);
    assert_eq!(d.value("streaming_call").unwrap_err().kind(), ErrorKind::UndefinedName);

    assert_eq!(RpcType::try_from_name("Unary_Call").unwrap(), RpcType::UnaryCall);
    assert_eq!(RpcType::from_name("unary_call"), None);
    assert_eq!(RpcType::from_i32(1), Some(RpcType::UnaryCall));
    assert_eq!(
        RpcType::try_from_value(2).unwrap_err().kind(),
        ErrorKind::UndefinedValue
    );
    assert_eq!(RpcType::UnaryCall.name(), "UNARY_CALL");
    assert_eq!(RpcType::UnaryCall.value(), 1);
    assert_eq!(RpcType::default(), RpcType::EmptyCall);
}

fn check_round_trip(d: &'static EnumDescriptor) {
    d.validate().unwrap();
    for v in d.values {
        let name = d.name(v.number).unwrap();
        assert_eq!(d.name(d.value(name).unwrap()).unwrap(), name);
        assert_eq!(d.value(&name.to_lowercase()).unwrap(), v.number);
    }
}

#[test]
fn name_value_round_trip() {
    check_round_trip(RpcType::descriptor());
    check_round_trip(GrpclbRouteType::descriptor());
    check_round_trip(PayloadType::descriptor());
    check_round_trip(Signed::descriptor());
}

#[test]
fn derived_names_and_values() {
    let d = Signed::descriptor();
    assert_eq!(d.name, "test.Signed");
    assert_eq!(d.name(-1).unwrap(), "MINUS_ONE");
    assert_eq!(d.value("big").unwrap(), 1000);
    assert_eq!(d.value("LARGE").unwrap_err().kind(), ErrorKind::UndefinedName);
    assert_eq!(Signed::from_i32(-1), Some(Signed::MinusOne));
    assert_eq!(Signed::Large.to_value(), Value::Int(1000));
    assert_eq!(<Signed as Element>::TYPE, ElementType::Enum("test.Signed"));

    assert_eq!(
        GrpclbRouteType::Fallback.name(),
        "GRPCLB_ROUTE_TYPE_FALLBACK"
    );
}

#[test]
fn undefined_values_report_the_given_number() {
    let err = enum_from_value::<RpcType>(Value::UInt(u64::MAX)).unwrap_err();
    assert_eq!(
        err,
        Error::UndefinedValue {
            enumeration: "grpc.testing.ClientConfigureRequest.RpcType",
            value: u64::MAX as i128,
        }
    );
    assert!(err.to_string().contains("18446744073709551615"));

    let err = enum_from_value::<Signed>(Value::Int(i64::MIN)).unwrap_err();
    assert_eq!(
        err,
        Error::UndefinedValue {
            enumeration: "test.Signed",
            value: i64::MIN as i128,
        }
    );
}

#[test]
fn repeated_enum_fields() {
    let mut request = ClientConfigureRequest::from_values(vec![(
        "types",
        Value::list(vec![1, 0, 1]),
    )])
    .unwrap();

    assert_eq!(
        request.types.as_slice(),
        &[RpcType::UnaryCall, RpcType::EmptyCall, RpcType::UnaryCall]
    );

    let err = request
        .set("types", Value::list(vec![0, 5]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UndefinedValue);
    assert_eq!(request.types.len(), 3);

    request.types.push_value(Value::Int(0)).unwrap();
    assert_eq!(request.types.len(), 4);
    assert_eq!(
        request.types.push_value(Value::Int(9)).unwrap_err().kind(),
        ErrorKind::UndefinedValue
    );
}

#[test]
fn repeated_message_fields() {
    let metadata = Metadata::from_values(vec![
        ("type", Value::Int(1)),
        ("key", Value::from("k")),
        ("value", Value::from("v")),
    ])
    .unwrap();

    let mut request = ClientConfigureRequest::default();
    request
        .set("metadata", Value::List(vec![Value::message(metadata.clone())]))
        .unwrap();
    assert_eq!(request.metadata.as_slice(), &[metadata]);

    let err = request
        .set(
            "metadata",
            Value::List(vec![Value::message(ClientConfigureRequest::default())]),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(request.metadata.len(), 1);
}
