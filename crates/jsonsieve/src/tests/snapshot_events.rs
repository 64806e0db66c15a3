//! Snapshot of the exact event sequence for a document with nested
//! containers, a syntax error and a recovery, fed in uneven chunks.

use insta::assert_snapshot;

use super::utils::{feed_split, record_found, recording_parser};

#[test]
fn snapshot_event_log() {
    let json = r#"{
        "users": [
            {"id": 1, "name": "Ada"},
            {"id": 2, "name": "Grace", "tags": ["x", "y"]}
        ],
        "meta": {"count": 2}
    }
    {"broken": [1, 2}
    {"id": 3}"#;

    let (mut parser, log) = recording_parser();
    record_found(&mut parser, &log, &["users", "id", "tags", "meta", "broken"]);
    feed_split(&mut parser, json, &[1, 2, 30, 31, 90, 150]);
    parser.finish();
    drop(parser);

    assert_snapshot!(log.borrow().join("\n"), @r#"
    found users
    found id
    parsed id = 1
    parsed name = "Ada"
    found id
    parsed id = 2
    parsed name = "Grace"
    found tags
    parsed tags = ["x","y"]
    parsed users = [{"id":1,"name":"Ada"},{"id":2,"name":"Grace","tags":["x","y"]}]
    found meta
    parsed count = 2
    parsed meta = {"count":2}
    complete {"users":[{"id":1,"name":"Ada"},{"id":2,"name":"Grace","tags":["x","y"]}],"meta":{"count":2}}
    found broken
    error closing bracket does not match an open object at 8:21
    found id
    parsed id = 3
    complete {"id":3}
    "#);
}
