use pretty_assertions::assert_eq;
use route_swagger::{
    config::DocsConfig,
    endpoint::{DocRequest, DocsEndpoint},
    registry::{KeyStrategy, SharedRegistry},
    route::{HttpMethod, RouteDescriptor},
};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

const READERS: usize = 8;
const MOUNTS: usize = 50;

fn widget_routes(batch: usize) -> Vec<RouteDescriptor> {
    (0..4)
        .map(|i| {
            RouteDescriptor::new(format!("/widgets/b{}/r{}", batch, i), HttpMethod::Get)
                .in_namespace("/widgets")
        })
        .collect()
}

/// Nicknames of the widgets resource as seen by one request.
fn observed_nicknames(endpoint: &DocsEndpoint) -> BTreeSet<String> {
    let response = endpoint
        .handle(&DocRequest::get("/swagger_doc/widgets", "http://localhost"))
        .unwrap()
        .unwrap();
    response.body["apis"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|api| api["operations"].as_array().unwrap().iter())
        .map(|op| op["nickname"].as_str().unwrap().to_string())
        .collect()
}

fn expected_after(mounts: usize) -> BTreeSet<String> {
    (0..=mounts)
        .flat_map(widget_routes)
        .map(|r| format!("GET{}", r.path.replace('/', "-")))
        .collect()
}

#[test]
fn test_readers_never_observe_partial_mount() {
    let registry = Arc::new(SharedRegistry::new(KeyStrategy::Namespace));
    let endpoint = Arc::new(
        DocsEndpoint::with_registry(DocsConfig::default(), Arc::clone(&registry)).unwrap(),
    );
    registry.mount(widget_routes(0));

    // Every consistent state: after k mounts the registry holds batches 0..=k.
    let valid_states: Vec<BTreeSet<String>> = (0..=MOUNTS).map(expected_after).collect();
    let done = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..READERS)
        .map(|_| {
            let endpoint = Arc::clone(&endpoint);
            let done = Arc::clone(&done);
            let valid_states = valid_states.clone();
            thread::spawn(move || {
                let mut reads = 0usize;
                while !done.load(Ordering::Acquire) || reads == 0 {
                    let seen = observed_nicknames(&endpoint);
                    assert!(
                        valid_states.contains(&seen),
                        "observed a partially mounted registry with {} routes",
                        seen.len()
                    );
                    reads += 1;
                }
                reads
            })
        })
        .collect();

    for batch in 1..=MOUNTS {
        registry.mount(widget_routes(batch));
    }
    done.store(true, Ordering::Release);

    for reader in readers {
        assert!(reader.join().expect("reader panicked") > 0);
    }

    assert_eq!(observed_nicknames(&endpoint), expected_after(MOUNTS));
}

#[test]
fn test_snapshot_is_stable_across_replace() {
    let registry = SharedRegistry::default();
    registry.mount(widget_routes(0));
    let before = registry.snapshot();

    thread::scope(|scope| {
        scope.spawn(|| registry.replace(widget_routes(1)));
        scope.spawn(|| {
            let snapshot = registry.snapshot();
            let count = snapshot.routes("widgets").len();
            assert_eq!(count, 4);
        });
    });

    assert_eq!(before.routes("widgets")[0].path, "/widgets/b0/r0");
    assert_eq!(registry.snapshot().routes("widgets")[0].path, "/widgets/b1/r0");
}
