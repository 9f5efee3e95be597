use typed_record::proto::grpc_testing::{self, LoadBalancerStatsRequest};
use typed_record::{registry, RecordType, Value};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let registry = registry::init(&[&grpc_testing::FILE])?;

    let mut records = registry.records().collect::<Vec<_>>();
    records.sort_by_key(|r| r.name);
    for record in records {
        log::info!("message {}", record.name);
        for f in record.fields {
            log::info!(
                "  {} = {}: {}{}",
                f.name,
                f.number,
                f.ty,
                if f.presence { " (optional)" } else { "" }
            );
        }
    }

    let mut enums = registry.enums().collect::<Vec<_>>();
    enums.sort_by_key(|e| e.name);
    for e in enums {
        log::info!("enum {}", e.name);
        for v in e.values {
            log::info!("  {} = {}", v.name, v.number);
        }
    }

    let request = LoadBalancerStatsRequest::from_values(vec![
        ("num_rpcs", Value::Int(5)),
        ("metadata_keys", Value::list(vec!["a", "*"])),
    ])?;
    log::info!("{:?}", request);

    let response = registry.new_record(
        "grpc.testing.SimpleResponse",
        vec![("hostname", Value::from("localhost"))],
    )?;
    log::info!("{:?}", response);

    Ok(())
}
